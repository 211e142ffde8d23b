// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Errors raised by the triangulation core

use thiserror::Error;

/// Result type used throughout the geometry core
pub type Result<T> = std::result::Result<T, TriangulationError>;

/// Failure of a single triangulation or assembly request.
///
/// Every variant aborts the request as a whole; no partial triangle list is
/// ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TriangulationError {
    /// Three points are collinear or coincident within tolerance
    #[error("points {i}, {j} and {k} are collinear or coincident")]
    DegenerateTriple { i: usize, j: usize, k: usize },

    /// A coordinate is NaN or infinite
    #[error("point {index} has a non-finite coordinate ({x}, {y})")]
    InvalidInput { index: usize, x: f64, y: f64 },

    /// An edge bordered more than two dissolved triangles in one insertion step
    #[error("edge ({a}, {b}) occurs {count} times in a single insertion step")]
    EdgeMultiplicity { a: usize, b: usize, count: usize },

    /// An index triple references a point that does not exist
    #[error("triangle {vertices:?} references point {index}, but the point set has {len} points")]
    IndexOutOfRange {
        vertices: [usize; 3],
        index: usize,
        len: usize,
    },
}
