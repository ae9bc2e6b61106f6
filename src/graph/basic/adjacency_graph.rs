//! An array-of-rows adjacency graph.
//!
//! Each vertex owns two separately allocated rows: its neighbor indices and the
//! values attached to those edges. Reaching any element therefore goes through
//! the outer array first and the row pointer second.

use crate::alloc::{try_buffer, Buffer};
use crate::error::{BenchError, Result};

/// A uniform-degree adjacency graph with one heap row per vertex.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `generate` | \(O(n \cdot d)\) | `2n` row allocations |
/// | `neighbors` | \(O(1)\) | Borrowed row slice |
/// | `values` | \(O(1)\) | Borrowed row slice |
/// | `first_value` | \(O(1)\) | Two dependent loads |
#[derive(Debug)]
pub struct AdjacencyGraph {
    adj: Vec<Box<[usize]>>,
    values: Vec<Box<[usize]>>,
    degree: usize,
}

impl AdjacencyGraph {
    /// Builds `vertex_count` rows of `degree` evenly spaced neighbors.
    ///
    /// Row `i` holds `j * vertex_count / degree` for `j in 0..degree`, and every
    /// value is `1`.
    ///
    /// # Errors
    /// - `InvalidConfig` if `degree` is zero or `vertex_count * degree`
    ///   overflows `usize`
    /// - `Alloc` if any row or outer array cannot be allocated
    pub fn generate(vertex_count: usize, degree: usize) -> Result<Self> {
        // Every row must hold a first value to read.
        if degree == 0 {
            return Err(BenchError::InvalidConfig("degree must be at least 1".into()));
        }
        // Bounds every `j * vertex_count` below as well.
        if vertex_count.checked_mul(degree).is_none() {
            return Err(BenchError::InvalidConfig(format!(
                "{vertex_count} vertices x degree {degree} overflows usize"
            )));
        }

        let mut adj = try_buffer(Buffer::AdjacencyRows, vertex_count)?;
        let mut values = try_buffer(Buffer::ValueRows, vertex_count)?;

        for i in 0..vertex_count {
            let mut row: Vec<usize> = try_buffer(Buffer::AdjacencyRow(i), degree)?;
            row.extend((0..degree).map(|j| j * vertex_count / degree));
            row.sort_unstable();

            let mut vals: Vec<usize> = try_buffer(Buffer::ValueRow(i), degree)?;
            vals.resize(degree, 1);

            adj.push(row.into_boxed_slice());
            values.push(vals.into_boxed_slice());
        }

        Ok(Self { adj, values, degree })
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    /// Neighbors per vertex.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Total number of stored edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.vertex_count() * self.degree
    }

    /// Sorted neighbor indices of `vertex`.
    ///
    /// # Panics
    /// Panics if `vertex` is out of bounds.
    #[inline]
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.adj[vertex]
    }

    /// Edge values of `vertex`, aligned with [`neighbors`](Self::neighbors).
    ///
    /// # Panics
    /// Panics if `vertex` is out of bounds.
    #[inline]
    pub fn values(&self, vertex: usize) -> &[usize] {
        &self.values[vertex]
    }

    /// Iterates `(neighbors, values)` in vertex order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = (&[usize], &[usize])> + '_ {
        self.adj
            .iter()
            .zip(self.values.iter())
            .map(|(a, v)| (&a[..], &v[..]))
    }

    /// The value rows, one allocation per vertex.
    #[inline]
    pub(crate) fn value_rows(&self) -> &[Box<[usize]>] {
        &self.values
    }
}
