// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Parallel execution of independent triangulation requests using rayon

use super::delaunay::{TriangleIndices, Triangulator};
use crate::config::TriangulationConfig;
use crate::error::Result;
use nalgebra::Point2;
use rayon::prelude::*;

/// Triangulate several point sets in parallel.
///
/// Each set is an independent request with its own working state; results come
/// back in input order, one per set.
pub fn triangulate_batch(
    point_sets: &[Vec<Point2<f64>>],
    config: &TriangulationConfig,
) -> Vec<Result<Vec<TriangleIndices>>> {
    let triangulator = Triangulator::new(config.clone());
    point_sets
        .par_iter()
        .map(|points| triangulator.triangulate(points))
        .collect()
}
