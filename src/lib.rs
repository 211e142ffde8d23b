// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Lowpoly triangulation kernel
//!
//! Incremental Delaunay triangulation of planar point sets and the mesh model
//! handed to low-poly renderers.

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod utils;

pub use config::TriangulationConfig;
pub use error::{Result, TriangulationError};
pub use geometry::{triangulate, Mesh, TriangleIndices, Triangulator};

use nalgebra::Point2;

/// Triangulate `points` and assemble the mesh in one step
pub fn build_mesh(
    points: &[Point2<f64>],
    config: &TriangulationConfig,
) -> Result<(Vec<TriangleIndices>, Mesh)> {
    let triangles = Triangulator::new(config.clone()).triangulate(points)?;
    let mesh = Mesh::from_triangulation(points, &triangles)?;
    Ok((triangles, mesh))
}
