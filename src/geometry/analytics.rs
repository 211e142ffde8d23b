// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Triangulation analytics and verification

use super::bbox::BoundingBox;
use super::circumcircle::{Circumcircle, EPSILON};
use super::delaunay::TriangleIndices;
use crate::utils::math::signed_area_2x;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Summary of a triangulation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangulationStats {
    /// Number of input points
    pub point_count: usize,
    /// Number of distinct coordinates among the input points
    pub unique_point_count: usize,
    /// Number of output triangles
    pub triangle_count: usize,
    /// Distinct points on the convex hull boundary, collinear ones included
    pub hull_point_count: usize,
    /// `2n - 2 - h` over distinct points; exact only in general position
    pub expected_triangle_count: usize,
    /// Sum of triangle areas
    pub total_area: f64,
    /// Area of the convex hull; equals `total_area` when the hull is fully covered
    pub hull_area: f64,
}

impl TriangulationStats {
    /// Pretty print statistics
    pub fn print(&self) {
        println!("Points:            {:>10}", self.point_count);
        println!("Unique points:     {:>10}", self.unique_point_count);
        println!("Hull points:       {:>10}", self.hull_point_count);
        println!(
            "Triangles:         {:>10} (expected {})",
            self.triangle_count, self.expected_triangle_count
        );
        println!(
            "Total area:        {:>10.4} (hull {:.4})",
            self.total_area, self.hull_area
        );
    }
}

/// Compute statistics for a triangulation of `points`
pub fn analyze(points: &[Point2<f64>], triangles: &[TriangleIndices]) -> TriangulationStats {
    let unique = unique_sorted(points);
    let hull = hull_point_count(points);

    let expected = if unique.len() < 3 || all_collinear(&unique) {
        0
    } else {
        2 * unique.len() - 2 - hull
    };

    let total_area: f64 = triangles
        .iter()
        .map(|&[i, j, k]| signed_area_2x(&points[i], &points[j], &points[k]).abs() / 2.0)
        .sum();

    TriangulationStats {
        point_count: points.len(),
        unique_point_count: unique.len(),
        triangle_count: triangles.len(),
        hull_point_count: hull,
        expected_triangle_count: expected,
        total_area,
        hull_area: hull_area(points),
    }
}

/// Number of distinct points on the convex hull boundary.
///
/// Points lying on a hull edge count; exact duplicates count once. When every
/// point is collinear, all of them are on the boundary.
pub fn hull_point_count(points: &[Point2<f64>]) -> usize {
    let pts = unique_sorted(points);
    if pts.len() < 3 {
        return pts.len();
    }

    if all_collinear(&pts) {
        return pts.len();
    }

    let lower = monotone_chain(pts.iter());
    let upper = monotone_chain(pts.iter().rev());
    lower.len() + upper.len() - 2
}

/// Area enclosed by the convex hull; zero for fewer than three distinct or
/// all collinear points.
pub fn hull_area(points: &[Point2<f64>]) -> f64 {
    let pts = unique_sorted(points);
    if pts.len() < 3 || all_collinear(&pts) {
        return 0.0;
    }

    // Counter-clockwise: lower chain left to right, then upper chain back
    let mut ring = monotone_chain(pts.iter());
    ring.pop();
    let mut upper = monotone_chain(pts.iter().rev());
    upper.pop();
    ring.append(&mut upper);

    let anchor = ring[0];
    let twice: f64 = ring
        .windows(2)
        .map(|w| signed_area_2x(anchor, w[0], w[1]))
        .sum();
    twice / 2.0
}

/// One half of Andrew's monotone chain. Pops only on strict right turns so
/// collinear boundary points survive.
fn monotone_chain<'a>(points: impl Iterator<Item = &'a Point2<f64>>) -> Vec<&'a Point2<f64>> {
    let mut hull: Vec<&Point2<f64>> = Vec::new();
    for p in points {
        while let [.., a, b] = hull.as_slice() {
            if signed_area_2x(a, b, p) >= 0.0 {
                break;
            }
            hull.pop();
        }
        hull.push(p);
    }
    hull
}

/// Triangle whose circumcircle strictly contains another input point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelaunayViolation {
    /// Position of the triangle in the checked list
    pub triangle: usize,
    pub vertices: TriangleIndices,
    /// Offending point, or `None` if the triangle itself is degenerate
    pub point: Option<usize>,
}

/// Brute-force check of the empty-circumcircle property.
///
/// A point violates a triangle when its squared distance to the circumcentre
/// falls short of the squared radius by more than `tolerance` times the squared
/// extent of the point set. That is the same scale the triangulator applies
/// its own epsilon on, so passing the configured epsilon accepts exactly the
/// ties it resolves either way. Quadratic in the input; meant for
/// verification, not for production paths.
pub fn find_delaunay_violations(
    points: &[Point2<f64>],
    triangles: &[TriangleIndices],
    tolerance: f64,
) -> Vec<DelaunayViolation> {
    let mut violations = Vec::new();
    let extent = BoundingBox::from_points(points).max_extent();
    let slack = if extent > 0.0 {
        tolerance * extent * extent
    } else {
        tolerance
    };

    for (t, &[i, j, k]) in triangles.iter().enumerate() {
        let circle = match Circumcircle::solve(points, i, j, k, EPSILON) {
            Ok(circle) => circle,
            Err(_) => {
                violations.push(DelaunayViolation {
                    triangle: t,
                    vertices: [i, j, k],
                    point: None,
                });
                continue;
            }
        };

        for (p, point) in points.iter().enumerate() {
            if p == i || p == j || p == k {
                continue;
            }
            if circle.radius_sq - (point - circle.center).norm_squared() > slack {
                violations.push(DelaunayViolation {
                    triangle: t,
                    vertices: [i, j, k],
                    point: Some(p),
                });
            }
        }
    }

    violations
}

/// Expects points sorted lexicographically, as produced by `unique_sorted`
fn all_collinear(sorted: &[Point2<f64>]) -> bool {
    match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => sorted
            .iter()
            .all(|p| signed_area_2x(first, last, p) == 0.0),
        _ => true,
    }
}

fn unique_sorted(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let mut pts = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    pts
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn test_hull_of_square_with_center() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)]);
        assert_eq!(hull_point_count(&points), 4);
    }

    #[test]
    fn test_hull_keeps_collinear_boundary_points() {
        let points = pts(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (5.0, 5.0)]);
        assert_eq!(hull_point_count(&points), 4);

        let points = pts(&[(0.0, 0.0), (0.0, 5.0), (0.0, 10.0), (10.0, 0.0), (10.0, 10.0)]);
        assert_eq!(hull_point_count(&points), 5);
    }

    #[test]
    fn test_hull_degenerate_sets() {
        assert_eq!(hull_point_count(&[]), 0);
        assert_eq!(hull_point_count(&pts(&[(1.0, 1.0), (1.0, 1.0)])), 1);
        assert_eq!(hull_point_count(&pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])), 3);
    }

    #[test]
    fn test_analyze_square_with_center() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)]);
        let triangles = vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]];
        let stats = analyze(&points, &triangles);

        assert_eq!(stats.point_count, 5);
        assert_eq!(stats.hull_point_count, 4);
        assert_eq!(stats.expected_triangle_count, 4);
        assert_relative_eq!(stats.total_area, 100.0);
        assert_relative_eq!(stats.hull_area, 100.0);
    }

    #[test]
    fn test_hull_area() {
        let points = pts(&[(0.0, 0.0), (4.0, 0.0), (2.0, 1.0), (4.0, 3.0), (0.0, 3.0), (2.0, 0.0)]);
        assert_relative_eq!(hull_area(&points), 12.0);

        assert_eq!(hull_area(&pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)])), 0.0);
        assert_eq!(hull_area(&pts(&[(0.0, 0.0), (1.0, 1.0)])), 0.0);
    }

    #[test]
    fn test_violation_detected() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)]);

        // Splitting the square along a diagonal ignores the centre point
        let bad = vec![[0, 1, 2], [0, 2, 3]];
        let violations = find_delaunay_violations(&points, &bad, EPSILON);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.point == Some(4)));

        let good = vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]];
        assert!(find_delaunay_violations(&points, &good, EPSILON).is_empty());
    }

    #[test]
    fn test_violation_slack_scales_with_extent() {
        // Point 3 sits just inside the circle through 0, 1, 2 (centre (0.5, 0.5))
        let inside = |scale: f64| {
            pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 0.999_999_9)])
                .into_iter()
                .map(|p| Point2::new(p.x * scale, p.y * scale))
                .collect::<Vec<_>>()
        };

        for scale in [1e-3, 1.0, 1e3] {
            let points = inside(scale);
            assert!(find_delaunay_violations(&points, &[[0, 1, 2]], EPSILON).is_empty());
            assert_eq!(find_delaunay_violations(&points, &[[0, 1, 2]], 1e-12).len(), 1);
        }
    }

    #[test]
    fn test_degenerate_triangle_reported() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let violations = find_delaunay_violations(&points, &[[0, 1, 2]], EPSILON);
        assert_eq!(violations[0].point, None);
    }
}
