// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Incremental Delaunay triangulation
//!
//! Points are inserted one at a time in ascending x order into a
//! triangulation seeded with a super-triangle that encloses the whole set.
//! Every inserted point dissolves the triangles whose circumcircle it falls
//! into; the boundary of the dissolved region is then fanned out to the new
//! point. Circles lying entirely to the left of the sweep position are moved
//! to a closed set and never examined again.
//!
//! All geometry runs on a copy of the points centred on their bounding box and
//! scaled to unit extent. The Delaunay triangulation is unchanged by that
//! similarity, so indices come out the same, while the tolerance becomes
//! relative to the size of the set rather than absolute.

use super::bbox::BoundingBox;
use super::circumcircle::Circumcircle;
use super::edges::{cancel_shared_edges, Edge};
use crate::config::TriangulationConfig;
use crate::error::{Result, TriangulationError};
use ahash::AHashSet;
use nalgebra::Point2;

/// Output triangle: three indices into the input point set
pub type TriangleIndices = [usize; 3];

/// Delaunay triangulator
#[derive(Debug, Clone, Default)]
pub struct Triangulator {
    config: TriangulationConfig,
}

impl Triangulator {
    pub fn new(config: TriangulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TriangulationConfig {
        &self.config
    }

    /// Triangulate `points`, returning index triples into the slice.
    ///
    /// Fewer than three points yield an empty list. Non-finite coordinates are
    /// rejected before any work is done. Points whose normalized coordinates
    /// exactly repeat an earlier inserted point are skipped when
    /// `skip_duplicates` is set.
    pub fn triangulate(&self, points: &[Point2<f64>]) -> Result<Vec<TriangleIndices>> {
        let n = points.len();
        if n < 3 {
            return Ok(Vec::new());
        }
        validate_points(points)?;

        let epsilon = self.config.epsilon;

        let mut vertices = normalize(points);
        let enclosing = super_triangle(&vertices, self.config.super_triangle_margin);
        vertices.extend_from_slice(&enclosing);

        // Sorted by descending x and consumed from the back, so insertion runs
        // in ascending x
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| vertices[b].x.total_cmp(&vertices[a].x));

        let mut open = vec![Circumcircle::solve(&vertices, n, n + 1, n + 2, epsilon)?];
        let mut closed: Vec<Circumcircle> = Vec::new();
        let mut edges: Vec<Edge> = Vec::new();
        let mut inserted: AHashSet<(u64, u64)> = AHashSet::with_capacity(n);
        let mut skipped = 0usize;

        while let Some(c) = order.pop() {
            let point = vertices[c];

            if self.config.skip_duplicates && !inserted.insert(coordinate_key(&point)) {
                log::warn!(
                    "Skipping point {} at ({}, {}): coincides with an earlier point",
                    c,
                    points[c].x,
                    points[c].y
                );
                skipped += 1;
                continue;
            }

            edges.clear();

            let mut j = open.len();
            while j > 0 {
                j -= 1;

                if open[j].lies_left_of(&point, epsilon) {
                    closed.push(open.swap_remove(j));
                    continue;
                }

                if !open[j].contains(&point, epsilon) {
                    continue;
                }

                edges.extend(open.swap_remove(j).edges());
            }

            cancel_shared_edges(&mut edges)?;

            for edge in edges.iter().rev() {
                open.push(Circumcircle::solve(&vertices, edge.a, edge.b, c, epsilon)?);
            }

            log::trace!(
                "Inserted point {}: {} boundary edges, {} open, {} closed",
                c,
                edges.len(),
                open.len(),
                closed.len()
            );
        }

        let open_at_end = open.len();
        closed.append(&mut open);

        let triangles: Vec<TriangleIndices> = closed
            .iter()
            .filter(|circle| circle.all_below(n))
            .map(|circle| circle.vertices)
            .collect();

        log::debug!(
            "Triangulated {} points ({} duplicates skipped): {} triangles, {} circles closed early",
            n,
            skipped,
            triangles.len(),
            closed.len() - open_at_end
        );

        Ok(triangles)
    }
}

/// Triangulate with the default configuration
pub fn triangulate(points: &[Point2<f64>]) -> Result<Vec<TriangleIndices>> {
    Triangulator::default().triangulate(points)
}

/// Vertices of a triangle strictly enclosing every point.
///
/// The vertices sit `margin` times the larger bounding-box side away from the
/// box centre. A zero-extent set (all points coincident) is treated as having
/// unit extent.
pub fn super_triangle(points: &[Point2<f64>], margin: f64) -> [Point2<f64>; 3] {
    let bbox = BoundingBox::from_points(points);
    let extent = bbox.max_extent();
    let dmax = if extent > 0.0 { extent } else { 1.0 };
    let mid = bbox.center();

    [
        Point2::new(mid.x - margin * dmax, mid.y - dmax),
        Point2::new(mid.x, mid.y + margin * dmax),
        Point2::new(mid.x + margin * dmax, mid.y - dmax),
    ]
}

/// Translate `points` to their bounding-box centre and divide by the larger
/// box side. A zero-extent set is only translated.
fn normalize(points: &[Point2<f64>]) -> Vec<Point2<f64>> {
    let bbox = BoundingBox::from_points(points);
    let extent = bbox.max_extent();
    let scale = if extent > 0.0 { extent } else { 1.0 };
    let mid = bbox.center();

    let mut normalized = Vec::with_capacity(points.len() + 3);
    normalized.extend(points.iter().map(|p| Point2::from((p - mid) / scale)));
    normalized
}

fn validate_points(points: &[Point2<f64>]) -> Result<()> {
    match points
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        Some(index) => Err(TriangulationError::InvalidInput {
            index,
            x: points[index].x,
            y: points[index].y,
        }),
        None => Ok(()),
    }
}

/// Bit pattern of a point with negative zero folded into positive zero
fn coordinate_key(point: &Point2<f64>) -> (u64, u64) {
    ((point.x + 0.0).to_bits(), (point.y + 0.0).to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2<f64>> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn sorted(mut triangles: Vec<TriangleIndices>) -> Vec<TriangleIndices> {
        for t in &mut triangles {
            t.sort_unstable();
        }
        triangles.sort_unstable();
        triangles
    }

    #[test]
    fn test_fewer_than_three_points() {
        assert!(triangulate(&[]).unwrap().is_empty());
        assert!(triangulate(&pts(&[(1.0, 1.0)])).unwrap().is_empty());
        assert!(triangulate(&pts(&[(1.0, 1.0), (2.0, 5.0)])).unwrap().is_empty());
    }

    #[test]
    fn test_single_triangle() {
        let points = pts(&[(0.0, 0.0), (4.0, 0.0), (1.0, 3.0)]);
        assert_eq!(sorted(triangulate(&points).unwrap()), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_square_with_center() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)]);
        let triangles = sorted(triangulate(&points).unwrap());

        assert_eq!(
            triangles,
            vec![[0, 1, 4], [0, 3, 4], [1, 2, 4], [2, 3, 4]]
        );
    }

    #[test]
    fn test_collinear_base_with_apex() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (1.0, 1.0)]);
        let triangles = sorted(triangulate(&points).unwrap());

        assert_eq!(triangles, vec![[0, 1, 3], [1, 2, 3]]);
    }

    #[test]
    fn test_all_collinear_yields_nothing() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        assert!(triangulate(&points).unwrap().is_empty());
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let points = pts(&[(0.0, 0.0), (1.0, f64::NAN), (2.0, 1.0)]);
        assert!(matches!(
            triangulate(&points),
            Err(TriangulationError::InvalidInput { index: 1, .. })
        ));

        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (f64::INFINITY, 1.0)]);
        assert!(matches!(
            triangulate(&points),
            Err(TriangulationError::InvalidInput { index: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_point_is_skipped() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 0.0)]);
        let triangles = sorted(triangulate(&points).unwrap());

        // Index 3 is inserted first (ties are consumed in reverse input order)
        assert_eq!(triangles, vec![[0, 2, 3]]);
    }

    #[test]
    fn test_duplicate_point_supersedes_when_not_skipped() {
        let points = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 0.0)]);
        let triangulator = Triangulator::new(TriangulationConfig {
            skip_duplicates: false,
            ..Default::default()
        });

        let triangles = sorted(triangulator.triangulate(&points).unwrap());
        assert_eq!(triangles, vec![[0, 1, 2]]);
    }

    #[test]
    fn test_all_points_coincident() {
        let points = pts(&[(2.0, 2.0); 5]);
        assert!(triangulate(&points).unwrap().is_empty());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let points = pts(&[
            (3.0, 7.0),
            (9.5, 1.25),
            (4.0, 4.0),
            (0.5, 8.0),
            (6.0, 6.5),
            (2.0, 0.5),
            (8.0, 9.0),
        ]);
        let first = triangulate(&points).unwrap();
        let second = triangulate(&points).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tiny_extent_matches_unit_extent() {
        let unit = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)]);
        let tiny: Vec<_> = unit.iter().map(|p| Point2::new(p.x * 1e-4, p.y * 1e-4)).collect();

        assert_eq!(
            sorted(triangulate(&tiny).unwrap()),
            sorted(triangulate(&unit).unwrap())
        );
    }

    #[test]
    fn test_normalize_centres_and_scales() {
        let points = pts(&[(10.0, 20.0), (14.0, 20.0), (12.0, 22.0)]);
        let normalized = normalize(&points);

        assert_eq!(normalized[0], Point2::new(-0.5, -0.25));
        assert_eq!(normalized[1], Point2::new(0.5, -0.25));
        assert_eq!(normalized[2], Point2::new(0.0, 0.25));

        let coincident = normalize(&pts(&[(3.0, 3.0); 3]));
        assert!(coincident.iter().all(|p| *p == Point2::origin()));
    }

    #[test]
    fn test_super_triangle_encloses_points() {
        let points = pts(&[(-3.0, 2.0), (5.0, 9.0), (1.0, -4.0)]);
        let [a, b, c] = super_triangle(&points, 20.0);

        let edge = |p: &Point2<f64>, q: &Point2<f64>, r: &Point2<f64>| {
            (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x)
        };
        for p in &points {
            // Super-triangle is clockwise: a (left), b (top), c (right)
            assert!(edge(&a, &b, p) < 0.0);
            assert!(edge(&b, &c, p) < 0.0);
            assert!(edge(&c, &a, p) < 0.0);
        }
    }
}
