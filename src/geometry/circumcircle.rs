// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Circumcircle solver
//!
//! Computes the circle through three points of a point set by intersecting
//! perpendicular bisectors. The bisector slopes are taken from whichever legs
//! have the larger vertical extent so that nearly horizontal legs never end up
//! in a denominator.

use super::edges::Edge;
use crate::error::{Result, TriangulationError};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Default tolerance for degeneracy and containment tests (2^-20)
pub const EPSILON: f64 = 1.0 / 1_048_576.0;

/// Circle through the three points of a candidate triangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circumcircle {
    /// Point indices the circle was built from, in construction order
    pub vertices: [usize; 3],
    pub center: Point2<f64>,
    /// Squared radius
    pub radius_sq: f64,
}

impl Circumcircle {
    /// Solve for the circumcircle of points `i`, `j` and `k`.
    ///
    /// Fails with [`TriangulationError::IndexOutOfRange`] when an index is
    /// outside `points`, and with [`TriangulationError::DegenerateTriple`] when
    /// the indices are not distinct, when both legs are flat within `epsilon`,
    /// or when the bisectors do not meet at a finite point (collinear or
    /// coincident input).
    pub fn solve(
        points: &[Point2<f64>],
        i: usize,
        j: usize,
        k: usize,
        epsilon: f64,
    ) -> Result<Self> {
        let point = |index: usize| {
            points.get(index).ok_or(TriangulationError::IndexOutOfRange {
                vertices: [i, j, k],
                index,
                len: points.len(),
            })
        };
        let (p1, p2, p3) = (point(i)?, point(j)?, point(k)?);

        let degenerate = TriangulationError::DegenerateTriple { i, j, k };
        if i == j || j == k || i == k {
            return Err(degenerate);
        }

        let dy12 = (p1.y - p2.y).abs();
        let dy23 = (p2.y - p3.y).abs();

        if dy12 < epsilon && dy23 < epsilon {
            return Err(degenerate);
        }

        let (xc, yc) = if dy12 < epsilon {
            let m2 = -((p3.x - p2.x) / (p3.y - p2.y));
            let mid2 = nalgebra::center(p2, p3);
            let xc = (p2.x + p1.x) / 2.0;
            (xc, m2 * (xc - mid2.x) + mid2.y)
        } else if dy23 < epsilon {
            let m1 = -((p2.x - p1.x) / (p2.y - p1.y));
            let mid1 = nalgebra::center(p1, p2);
            let xc = (p3.x + p2.x) / 2.0;
            (xc, m1 * (xc - mid1.x) + mid1.y)
        } else {
            let m1 = -((p2.x - p1.x) / (p2.y - p1.y));
            let m2 = -((p3.x - p2.x) / (p3.y - p2.y));
            let mid1 = nalgebra::center(p1, p2);
            let mid2 = nalgebra::center(p2, p3);
            let xc = (m1 * mid1.x - m2 * mid2.x + mid2.y - mid1.y) / (m1 - m2);
            let yc = if dy12 > dy23 {
                m1 * (xc - mid1.x) + mid1.y
            } else {
                m2 * (xc - mid2.x) + mid2.y
            };
            (xc, yc)
        };

        if !xc.is_finite() || !yc.is_finite() {
            return Err(degenerate);
        }

        let center = Point2::new(xc, yc);
        Ok(Self {
            vertices: [i, j, k],
            center,
            radius_sq: (p2 - center).norm_squared(),
        })
    }

    /// True when `point` lies to the right of the whole circle, clear of the
    /// `epsilon` band that [`Circumcircle::contains`] treats as inside.
    ///
    /// Once points arrive in ascending x order, such a circle can never be
    /// touched again. A point on the rightmost edge of the circle is never
    /// closed here, so it gets the same inclusive answer from `contains` as
    /// every other circle it lies on.
    pub fn lies_left_of(&self, point: &Point2<f64>, epsilon: f64) -> bool {
        let dx = point.x - self.center.x;
        dx > 0.0 && dx * dx - self.radius_sq > epsilon
    }

    /// Inclusive containment: points within `epsilon` of the boundary count as inside
    pub fn contains(&self, point: &Point2<f64>, epsilon: f64) -> bool {
        (point - self.center).norm_squared() - self.radius_sq <= epsilon
    }

    /// The three edges of the underlying triangle, in winding order
    pub fn edges(&self) -> [Edge; 3] {
        let [i, j, k] = self.vertices;
        [Edge::new(i, j), Edge::new(j, k), Edge::new(k, i)]
    }

    /// True if every vertex index is below `limit`
    pub fn all_below(&self, limit: usize) -> bool {
        self.vertices.iter().all(|&v| v < limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn test_right_triangle_with_flat_leg() {
        let points = pts(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]);
        let circle = Circumcircle::solve(&points, 0, 1, 2, EPSILON).unwrap();

        assert_relative_eq!(circle.center.x, 1.0);
        assert_relative_eq!(circle.center.y, 1.0);
        assert_relative_eq!(circle.radius_sq, 2.0);
    }

    #[test]
    fn test_general_triangle_is_equidistant() {
        let points = pts(&[(0.3, -1.2), (4.5, 2.25), (-3.0, 5.5)]);
        let circle = Circumcircle::solve(&points, 0, 1, 2, EPSILON).unwrap();

        for p in &points {
            let d = (p - circle.center).norm_squared();
            assert_relative_eq!(d, circle.radius_sq, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_second_leg_flat() {
        let points = pts(&[(1.0, 3.0), (0.0, 0.0), (4.0, 0.0)]);
        let circle = Circumcircle::solve(&points, 0, 1, 2, EPSILON).unwrap();

        assert_relative_eq!(circle.center.x, 2.0);
        for p in &points {
            let d = (p - circle.center).norm_squared();
            assert_relative_eq!(d, circle.radius_sq, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_horizontal_collinear_is_degenerate() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(
            Circumcircle::solve(&points, 0, 1, 2, EPSILON),
            Err(TriangulationError::DegenerateTriple { i: 0, j: 1, k: 2 })
        );
    }

    #[test]
    fn test_sloped_collinear_is_degenerate() {
        let points = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        assert!(Circumcircle::solve(&points, 0, 1, 2, EPSILON).is_err());
    }

    #[test]
    fn test_coincident_points_are_degenerate() {
        let points = pts(&[(0.0, 0.0), (3.0, 1.0), (0.0, 0.0)]);
        assert!(Circumcircle::solve(&points, 0, 1, 2, EPSILON).is_err());
        assert!(Circumcircle::solve(&points, 0, 0, 1, EPSILON).is_err());
    }

    #[test]
    fn test_containment_and_left_of() {
        let points = pts(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]);
        let circle = Circumcircle::solve(&points, 0, 1, 2, EPSILON).unwrap();

        assert!(circle.contains(&Point2::new(1.0, 1.0), EPSILON));
        // Exactly on the boundary counts as inside
        assert!(circle.contains(&Point2::new(2.0, 2.0), EPSILON));
        assert!(!circle.contains(&Point2::new(3.0, 3.0), EPSILON));

        assert!(circle.lies_left_of(&Point2::new(2.5, 1.0), EPSILON));
        assert!(!circle.lies_left_of(&Point2::new(2.0, 1.0), EPSILON));
        assert!(!circle.lies_left_of(&Point2::new(-5.0, 1.0), EPSILON));
    }

    #[test]
    fn test_rightmost_point_stays_open() {
        let points = pts(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]);
        let circle = Circumcircle::solve(&points, 0, 1, 2, EPSILON).unwrap();

        // Rightmost point of the circle, nudged outward by less than epsilon
        let edge = Point2::new(1.0 + 2f64.sqrt() + 1e-9, 1.0);
        assert!(!circle.lies_left_of(&edge, EPSILON));
        assert!(circle.contains(&edge, EPSILON));

        let clear = Point2::new(1.0 + 2f64.sqrt() + 1e-3, 1.0);
        assert!(circle.lies_left_of(&clear, EPSILON));
        assert!(!circle.contains(&clear, EPSILON));
    }

    #[test]
    fn test_index_out_of_range() {
        let points = pts(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)]);
        assert_eq!(
            Circumcircle::solve(&points, 0, 1, 5, EPSILON),
            Err(TriangulationError::IndexOutOfRange {
                vertices: [0, 1, 5],
                index: 5,
                len: 3
            })
        );
    }
}
