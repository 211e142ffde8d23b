// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Point-in-triangle queries

use nalgebra::Point2;

/// Locate `p` inside triangle `tri`.
///
/// Returns the barycentric coordinates `(u, v)` relative to `tri[0]`, so that
/// `p = tri[0] + u * (tri[1] - tri[0]) + v * (tri[2] - tri[0])`. Returns `None`
/// when `p` falls outside the triangle or the triangle has zero area. Points on
/// an edge are inside.
pub fn locate(tri: &[Point2<f64>; 3], p: &Point2<f64>) -> Option<(f64, f64)> {
    let [t0, t1, t2] = tri;

    // Cheap rejection against the bounding box first
    if (p.x < t0.x && p.x < t1.x && p.x < t2.x)
        || (p.x > t0.x && p.x > t1.x && p.x > t2.x)
        || (p.y < t0.y && p.y < t1.y && p.y < t2.y)
        || (p.y > t0.y && p.y > t1.y && p.y > t2.y)
    {
        return None;
    }

    let a = t1.x - t0.x;
    let b = t2.x - t0.x;
    let c = t1.y - t0.y;
    let d = t2.y - t0.y;
    let det = a * d - b * c;

    if det == 0.0 {
        return None;
    }

    let u = (d * (p.x - t0.x) - b * (p.y - t0.y)) / det;
    let v = (a * (p.y - t0.y) - c * (p.x - t0.x)) / det;

    if u < 0.0 || v < 0.0 || u + v > 1.0 {
        return None;
    }

    Some((u, v))
}
