// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Undirected edges and shared-edge cancellation

use crate::error::{Result, TriangulationError};
use serde::{Deserialize, Serialize};

/// Undirected edge between two point indices
///
/// Equality ignores direction: `Edge::new(1, 2) == Edge::new(2, 1)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl Eq for Edge {}

/// Remove every edge that occurs exactly twice, keeping single edges in order.
///
/// Edges are scanned from the end of the list; each one is compared against
/// all earlier edges and both occurrences are dropped on the first match. What
/// remains is the boundary of the region formed by the dissolved triangles.
///
/// An edge occurring three or more times cannot come out of a well-formed
/// insertion step and is reported as [`TriangulationError::EdgeMultiplicity`].
pub fn cancel_shared_edges(edges: &mut Vec<Edge>) -> Result<()> {
    let mut j = edges.len();
    while j > 0 {
        j -= 1;
        let edge = edges[j];

        let Some(i) = edges[..j].iter().rposition(|other| *other == edge) else {
            continue;
        };

        let extra = edges[..i].iter().filter(|other| **other == edge).count();
        if extra > 0 {
            return Err(TriangulationError::EdgeMultiplicity {
                a: edge.a,
                b: edge.b,
                count: extra + 2,
            });
        }

        edges.remove(j);
        edges.remove(i);
        // Everything above `i` shifted down by one; resume just below the
        // removed pair's upper slot
        j -= 1;
    }
    Ok(())
}
