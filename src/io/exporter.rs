// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh exporters for STL

use crate::geometry::{Mesh, Triangle};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export mesh to binary STL
pub fn export_stl(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    use stl_io::{Normal, Triangle as StlTriangle, Vertex as StlVertex};

    let to_stl = |tri: &Triangle| {
        let n = tri.normal();
        let [v0, v1, v2] = tri.vertices.map(|v| {
            StlVertex::new([
                v.position.x as f32,
                v.position.y as f32,
                v.position.z as f32,
            ])
        });

        StlTriangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: [v0, v1, v2],
        }
    };
    let triangles: Vec<StlTriangle> = mesh.triangles().iter().map(to_stl).collect();

    let file = File::create(path.as_ref()).context("Failed to create STL file")?;
    let mut writer = BufWriter::new(file);

    stl_io::write_stl(&mut writer, triangles.iter()).context("Failed to write STL file")?;

    Ok(())
}

/// Export mesh to ASCII STL
pub fn export_stl_ascii(mesh: &Mesh, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref()).context("Failed to create STL file")?;
    let mut file = BufWriter::new(file);

    writeln!(file, "solid lowpoly")?;

    for tri in mesh.triangles() {
        let normal = tri.normal();
        writeln!(
            file,
            "  facet normal {} {} {}",
            normal.x, normal.y, normal.z
        )?;
        writeln!(file, "    outer loop")?;
        for v in &tri.vertices {
            writeln!(
                file,
                "      vertex {} {} {}",
                v.position.x, v.position.y, v.position.z
            )?;
        }
        writeln!(file, "    endloop")?;
        writeln!(file, "  endfacet")?;
    }

    writeln!(file, "endsolid lowpoly")?;
    file.flush()?;

    Ok(())
}
