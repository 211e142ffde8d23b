// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Lowpoly CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use lowpoly::geometry::{analyze, find_delaunay_violations, triangulate_batch};
use lowpoly::{build_mesh, io, Mesh, TriangleIndices, TriangulationConfig};
use nalgebra::Point2;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lowpoly")]
#[command(about = "Delaunay triangulation for low-poly meshes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./lowpoly.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Triangulate a point file
    Triangulate {
        /// Input point file (.json, or text with one "x y" pair per line)
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Check the empty-circumcircle property of the result
        #[arg(long)]
        verify: bool,

        /// Print triangulation statistics
        #[arg(long)]
        stats: bool,
    },

    /// Triangulate every point file in a directory in parallel
    Batch {
        /// Directory containing point files
        dir: PathBuf,

        /// Output directory for JSON results
        #[arg(short, long, default_value = "triangulations")]
        out: PathBuf,
    },

    /// Print the effective configuration
    Config {
        /// Write it to a file instead
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Stl,
    StlAscii,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match &cli.config {
        Some(path) => TriangulationConfig::from_file(path)?.with_env_overrides()?,
        None => TriangulationConfig::load()?,
    };

    match &cli.command {
        Commands::Triangulate {
            input,
            output,
            format,
            verify,
            stats,
        } => {
            triangulate_command(
                input,
                output.as_deref(),
                *format,
                *verify,
                *stats,
                &config,
                cli.verbose,
            )?;
        }
        Commands::Batch { dir, out } => {
            batch_command(dir, out, &config, cli.verbose)?;
        }
        Commands::Config { output } => match output {
            Some(path) => {
                config.save(path)?;
                println!("{} Configuration written to {}", "✓".green(), path.display());
            }
            None => print!("{}", toml::to_string_pretty(&config)?),
        },
        Commands::Version => {
            println!("Lowpoly v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn triangulate_command(
    input: &Path,
    output: Option<&Path>,
    format: Format,
    verify: bool,
    stats: bool,
    config: &TriangulationConfig,
    verbose: bool,
) -> Result<()> {
    if !input.exists() {
        eprintln!("{} Input file not found: {}", "Error:".red(), input.display());
        std::process::exit(1);
    }

    let points = io::import_points(input)?;

    let start = std::time::Instant::now();
    let (triangles, mesh) = build_mesh(&points, config)
        .with_context(|| format!("Triangulation of {} failed", input.display()))?;
    let elapsed = start.elapsed();

    if verbose {
        println!("Triangulated {} points in {:.2?}", points.len(), elapsed);
        println!("Triangles: {}", triangles.len());
    }

    if stats {
        analyze(&points, &triangles).print();
    }

    if verify {
        let violations = find_delaunay_violations(&points, &triangles, config.epsilon);
        if violations.is_empty() {
            println!("{} Delaunay property holds", "✓".green());
        } else {
            for v in &violations {
                match v.point {
                    Some(p) => eprintln!(
                        "{} triangle {:?} contains point {}",
                        "Violation:".red(),
                        v.vertices,
                        p
                    ),
                    None => eprintln!("{} triangle {:?} is degenerate", "Violation:".red(), v.vertices),
                }
            }
            eprintln!("{} {} violations", "✗".red(), violations.len());
            std::process::exit(2);
        }
    }

    match output {
        Some(path) => {
            write_output(&points, &triangles, &mesh, path, format)?;
            println!("{} {}", "✓".green(), path.display());
        }
        None => {
            for [i, j, k] in &triangles {
                println!("{} {} {}", i, j, k);
            }
        }
    }

    Ok(())
}

fn write_output(
    points: &[Point2<f64>],
    triangles: &[TriangleIndices],
    mesh: &Mesh,
    path: &Path,
    format: Format,
) -> Result<()> {
    match format {
        Format::Json => io::export_json(
            &io::TriangulationOutput {
                points,
                triangles,
                mesh,
            },
            path,
        ),
        Format::Stl => io::export_stl(mesh, path),
        Format::StlAscii => io::export_stl_ascii(mesh, path),
    }
}

fn batch_command(dir: &Path, out: &Path, config: &TriangulationConfig, verbose: bool) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use walkdir::WalkDir;

    if !dir.is_dir() {
        eprintln!("{} Directory not found: {}", "Error:".red(), dir.display());
        std::process::exit(1);
    }

    let files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .map(|s| s == "json" || s == "txt")
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();

    if files.is_empty() {
        eprintln!("{}", "No point files found".red());
        std::process::exit(1);
    }

    let mut names = Vec::new();
    let mut point_sets = Vec::new();
    for file in &files {
        match io::import_points(file) {
            Ok(points) => {
                names.push(file);
                point_sets.push(points);
            }
            Err(e) => eprintln!("{} {}: {:#}", "Warning:".yellow(), file.display(), e),
        }
    }

    if verbose {
        println!("Triangulating {} point sets...", point_sets.len());
    }

    let results = triangulate_batch(&point_sets, config);

    std::fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

    let progress = ProgressBar::new(results.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    let mut failures = 0;
    for ((file, points), result) in names.iter().zip(&point_sets).zip(results) {
        let stem = file.file_stem().unwrap_or_default().to_string_lossy();
        let target = out.join(format!("{}.json", stem));

        let written = result
            .map_err(anyhow::Error::from)
            .and_then(|triangles| {
                let mesh = Mesh::from_triangulation(points, &triangles)?;
                write_output(points, &triangles, &mesh, &target, Format::Json)
            });

        if let Err(e) = written {
            failures += 1;
            progress.println(format!("{} {}: {:#}", "Error".red(), file.display(), e));
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    let succeeded = point_sets.len() - failures;
    println!(
        "{} {} of {} point sets triangulated into {}",
        if failures == 0 { "✓".green() } else { "✗".red() },
        succeeded,
        point_sets.len(),
        out.display()
    );

    Ok(())
}
