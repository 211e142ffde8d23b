// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON exporter for triangulation results

use crate::geometry::{Mesh, TriangleIndices};
use anyhow::{Context, Result};
use nalgebra::Point2;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Everything a consumer needs from one triangulation request
#[derive(Debug, Serialize)]
pub struct TriangulationOutput<'a> {
    pub points: &'a [Point2<f64>],
    pub triangles: &'a [TriangleIndices],
    pub mesh: &'a Mesh,
}

/// Serialize a triangulation result to a JSON string
pub fn to_json_string(output: &TriangulationOutput<'_>) -> Result<String> {
    serde_json::to_string_pretty(output).context("Failed to serialize triangulation")
}

/// Export a triangulation result to a JSON file
pub fn export(output: &TriangulationOutput<'_>, path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(path.as_ref())
        .with_context(|| format!("Failed to create JSON file: {}", path.as_ref().display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, output)
        .context("Failed to write triangulation JSON")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_layout() -> Result<()> {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let triangles = vec![[0, 1, 2]];
        let mesh = Mesh::from_triangulation(&points, &triangles)?;

        let json = to_json_string(&TriangulationOutput {
            points: &points,
            triangles: &triangles,
            mesh: &mesh,
        })?;
        let value: Value = serde_json::from_str(&json)?;

        assert_eq!(value["triangles"][0], serde_json::json!([0, 1, 2]));
        assert_eq!(value["points"][1], serde_json::json!([1.0, 0.0]));
        let tri = &value["mesh"]["triangles"][0];
        assert_eq!(tri["normal"], serde_json::json!([0.0, 0.0, 1.0]));
        assert_eq!(tri["vertices"].as_array().map(Vec::len), Some(3));
        assert!(value["mesh"].get("dirty").is_none());

        Ok(())
    }
}
