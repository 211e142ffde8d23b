// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Point2, Point3, Vector3};

/// Unit vector in the direction of `v`, or the zero vector when `v` has length exactly 0
pub fn normalize_or_zero(v: &Vector3<f64>) -> Vector3<f64> {
    let norm = v.norm();
    if norm == 0.0 {
        Vector3::zeros()
    } else {
        v / norm
    }
}

/// Calculate the normal of a triangle given three vertices.
///
/// The edge order `(p1 - p0) x (p2 - p0)` is fixed, so the sign follows the
/// winding of the arguments. Degenerate triangles get a zero normal.
pub fn calculate_triangle_normal(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
) -> Vector3<f64> {
    let v1 = p1 - p0;
    let v2 = p2 - p0;
    normalize_or_zero(&v1.cross(&v2))
}

/// Arithmetic mean of three points
pub fn triangle_centroid(p0: &Point3<f64>, p1: &Point3<f64>, p2: &Point3<f64>) -> Point3<f64> {
    Point3::from((p0.coords + p1.coords + p2.coords) / 3.0)
}

/// Twice the signed area of a planar triangle, positive for counter-clockwise winding
pub fn signed_area_2x(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}
