// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Mesh representation and utilities
//!
//! Every triangle owns its three vertices outright. Neighbouring triangles
//! therefore hold separate copies of a shared corner, and a consumer may move
//! one copy without dragging the neighbours along. Cached centroids and
//! normals are only refreshed by [`Mesh::update`] after the caller has marked
//! the mesh dirty.

use super::barycentric;
use super::delaunay::TriangleIndices;
use super::BoundingBox;
use crate::error::{Result, TriangulationError};
use crate::utils::math::{calculate_triangle_normal, triangle_centroid};
use nalgebra::{Matrix4, Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Vertex with position and consumer-owned auxiliary data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3<f64>,
    /// Depth offset applied by the consumer
    pub depth: f64,
    /// Rest position the consumer animates around
    pub anchor: Option<Point3<f64>>,
}

impl Vertex {
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            depth: 0.0,
            anchor: None,
        }
    }

    /// Lift a planar point to z = 0
    pub fn from_planar(point: &Point2<f64>) -> Self {
        Self::new(Point3::new(point.x, point.y, 0.0))
    }

    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        self.position = matrix.transform_point(&self.position);
        if let Some(anchor) = self.anchor.as_mut() {
            *anchor = matrix.transform_point(anchor);
        }
    }
}

/// Triangle owning three vertices, with cached centroid and normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    centroid: Point3<f64>,
    normal: Vector3<f64>,
}

impl Triangle {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        let mut triangle = Self {
            vertices: [a, b, c],
            centroid: Point3::origin(),
            normal: Vector3::zeros(),
        };
        triangle.recompute();
        triangle
    }

    /// Mean of the vertex positions as of the last recompute
    pub fn centroid(&self) -> Point3<f64> {
        self.centroid
    }

    /// Unit normal of `(b - a) x (c - a)` as of the last recompute; zero for a
    /// degenerate triangle
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Refresh centroid and normal from the current vertex positions
    pub fn recompute(&mut self) {
        let [a, b, c] = &self.vertices;
        self.centroid = triangle_centroid(&a.position, &b.position, &c.position);
        self.normal = calculate_triangle_normal(&a.position, &b.position, &c.position);
    }

    /// Vertex positions projected onto the xy plane
    pub fn planar(&self) -> [Point2<f64>; 3] {
        self.vertices.map(|v| v.position.xy())
    }
}

/// Triangular mesh
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    #[serde(skip)]
    dirty: bool,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
            dirty: false,
        }
    }

    pub fn empty() -> Self {
        Self::new()
    }

    pub fn with_capacity(triangle_count: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(triangle_count),
            dirty: false,
        }
    }

    /// Assemble a mesh from triangulation output.
    ///
    /// Each triple gets three freshly constructed vertices; nothing is shared
    /// between triangles even where positions coincide.
    pub fn from_triangulation(points: &[Point2<f64>], triangles: &[TriangleIndices]) -> Result<Self> {
        let mut mesh = Self::with_capacity(triangles.len());

        for indices in triangles {
            let mut corners = [Vertex::new(Point3::origin()); 3];
            for (corner, &index) in corners.iter_mut().zip(indices) {
                let point = points.get(index).ok_or(TriangulationError::IndexOutOfRange {
                    vertices: *indices,
                    index,
                    len: points.len(),
                })?;
                *corner = Vertex::from_planar(point);
            }
            let [a, b, c] = corners;
            mesh.add_triangle(Triangle::new(a, b, c));
        }

        log::debug!("Assembled mesh with {} triangles", mesh.triangle_count());
        Ok(mesh)
    }

    /// Add a triangle
    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Mutable access to the triangles.
    ///
    /// Moving vertices through this does not mark the mesh dirty; call
    /// [`Mesh::mark_dirty`] once the batch of edits is done.
    pub fn triangles_mut(&mut self) -> &mut [Triangle] {
        &mut self.triangles
    }

    /// Mutable access to one corner of one triangle
    pub fn vertex_mut(&mut self, triangle: usize, corner: usize) -> Option<&mut Vertex> {
        self.triangles
            .get_mut(triangle)
            .and_then(|t| t.vertices.get_mut(corner))
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.triangles.iter().flat_map(|t| t.vertices.iter())
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Recompute centroids and normals if the mesh is dirty.
    ///
    /// Returns whether anything was recomputed. Calling this on a clean mesh
    /// does nothing.
    pub fn update(&mut self) -> bool {
        if !self.dirty {
            return false;
        }

        for triangle in &mut self.triangles {
            triangle.recompute();
        }
        self.dirty = false;
        true
    }

    /// Transform all vertices by a matrix and mark the mesh dirty
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for triangle in &mut self.triangles {
            for vertex in &mut triangle.vertices {
                vertex.transform(matrix);
            }
        }
        self.dirty = true;
    }

    /// Compute the planar bounding box of all vertices
    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        for vertex in self.vertices() {
            bbox.expand_to_include(&vertex.position.xy());
        }
        bbox
    }

    /// First triangle whose xy projection contains `point`, with the
    /// barycentric coordinates of the point inside it
    pub fn locate(&self, point: &Point2<f64>) -> Option<(usize, (f64, f64))> {
        self.triangles
            .iter()
            .enumerate()
            .find_map(|(i, t)| barycentric::locate(&t.planar(), point).map(|uv| (i, uv)))
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Get vertex count (three per triangle)
    pub fn vertex_count(&self) -> usize {
        self.triangles.len() * 3
    }
}
