// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point set importer

use anyhow::{bail, Context, Result};
use nalgebra::Point2;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum PointRecord {
    Pair([f64; 2]),
    Object { x: f64, y: f64 },
}

impl From<PointRecord> for Point2<f64> {
    fn from(record: PointRecord) -> Self {
        match record {
            PointRecord::Pair([x, y]) => Point2::new(x, y),
            PointRecord::Object { x, y } => Point2::new(x, y),
        }
    }
}

/// Import a point file; `.json` files are parsed as JSON, anything else as text
pub fn import_points(path: impl AsRef<Path>) -> Result<Vec<Point2<f64>>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read point file: {}", path.display()))?;

    let points = if path.extension().map(|e| e == "json").unwrap_or(false) {
        parse_points_json(&source)
    } else {
        parse_points_text(&source)
    }
    .with_context(|| format!("Failed to parse point file: {}", path.display()))?;

    log::debug!("Imported {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Parse `[[x, y], ...]` or `[{"x": .., "y": ..}, ...]`
pub fn parse_points_json(source: &str) -> Result<Vec<Point2<f64>>> {
    let records: Vec<PointRecord> = serde_json::from_str(source)?;
    Ok(records.into_iter().map(Point2::from).collect())
}

/// Parse one `x y` or `x,y` pair per line; blank lines and `#` comments are ignored
pub fn parse_points_text(source: &str) -> Result<Vec<Point2<f64>>> {
    let mut points = Vec::new();

    for (number, line) in source.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();

        let [x, y] = fields.as_slice() else {
            bail!("line {}: expected two coordinates, found {}", number + 1, fields.len());
        };

        let x: f64 = x
            .parse()
            .with_context(|| format!("line {}: invalid x coordinate {:?}", number + 1, x))?;
        let y: f64 = y
            .parse()
            .with_context(|| format!("line {}: invalid y coordinate {:?}", number + 1, y))?;
        points.push(Point2::new(x, y));
    }

    Ok(points)
}
