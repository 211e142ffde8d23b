// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - triangulation core and mesh representation

mod analytics;
mod barycentric;
mod bbox;
mod circumcircle;
mod delaunay;
mod edges;
mod mesh;
mod parallel;

pub use analytics::{
    analyze, find_delaunay_violations, hull_area, hull_point_count, DelaunayViolation,
    TriangulationStats,
};
pub use barycentric::locate;
pub use bbox::BoundingBox;
pub use circumcircle::{Circumcircle, EPSILON};
pub use delaunay::{super_triangle, triangulate, TriangleIndices, Triangulator};
pub use edges::{cancel_shared_edges, Edge};
pub use mesh::{Mesh, Triangle, Vertex};
pub use parallel::triangulate_batch;
