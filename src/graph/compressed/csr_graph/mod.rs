//! A compact CSR (compressed sparse row) graph carrying one value per edge.
//!
//! CSR is the standard sparse matrix format for graphs, storing edges in row-major order.
//!
//! Memory layout:
//! - `offsets` (`IA`): `Vec<usize>` of length `n + 1` (row offsets)
//! - `columns` (`JA`): contiguous `usize` targets for each row
//! - `values` (`VA`): contiguous `usize` edge values, aligned with `columns`

use crate::alloc::{try_buffer, Buffer};
use crate::error::{BenchError, Result};
use crate::graph::AdjacencyGraph;

/// A CSR graph with per-edge values.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `from_adjacency` | \(O(n + m)\) | Three allocations total |
/// | `from_csr_parts` | \(O(n + m)\) | Validates every offset and column |
/// | `neighbors` | \(O(1)\) | Borrowed slice of `JA` |
/// | `degree` | \(O(1)\) | Offset difference |
/// | `row_start_value` | \(O(1)\) | One dependent load through `IA` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    offsets: Vec<usize>,
    columns: Vec<usize>,
    values: Vec<usize>,
}

impl CsrGraph {
    /// Flattens an adjacency graph into CSR form.
    ///
    /// Rows are concatenated in vertex order, so `offsets[i] = degree * i`.
    ///
    /// # Errors
    /// Returns `Alloc` naming `IA`, `JA` or `VA` if a buffer cannot be allocated.
    pub fn from_adjacency(adjacency: &AdjacencyGraph) -> Result<Self> {
        let n = adjacency.vertex_count();
        let m = adjacency.edge_count();

        let mut offsets = try_buffer(Buffer::RowOffsets, n + 1)?;
        let mut columns = try_buffer(Buffer::Columns, m)?;
        let mut values = try_buffer(Buffer::Values, m)?;

        offsets.push(0);
        for (nbrs, vals) in adjacency.rows() {
            columns.extend_from_slice(nbrs);
            values.extend_from_slice(vals);
            offsets.push(columns.len());
        }

        debug_assert_eq!(offsets.len(), n + 1);
        debug_assert_eq!(columns.len(), m);

        Ok(Self {
            offsets,
            columns,
            values,
        })
    }

    /// Builds a CSR graph directly from CSR parts.
    ///
    /// # Errors
    /// Returns `InvalidCsr` if
    /// - `offsets` is empty or does not start at `0`
    /// - offsets are not monotone
    /// - `offsets.last()` differs from `columns.len()` or `values.len()`
    /// - a column is out of bounds
    pub fn from_csr_parts(offsets: Vec<usize>, columns: Vec<usize>, values: Vec<usize>) -> Result<Self> {
        let Some(&last) = offsets.last() else {
            return Err(BenchError::InvalidCsr("offsets must have length n+1".into()));
        };
        if offsets[0] != 0 {
            return Err(BenchError::InvalidCsr(format!(
                "offsets must start at 0, found {}",
                offsets[0]
            )));
        }
        if let Some(i) = offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(BenchError::InvalidCsr(format!(
                "offsets must be monotone: offsets[{i}]={} > offsets[{}]={}",
                offsets[i],
                i + 1,
                offsets[i + 1]
            )));
        }
        if last != columns.len() {
            return Err(BenchError::InvalidCsr(format!(
                "offsets last ({last}) must equal columns length ({})",
                columns.len()
            )));
        }
        if values.len() != columns.len() {
            return Err(BenchError::InvalidCsr(format!(
                "values length ({}) must equal columns length ({})",
                values.len(),
                columns.len()
            )));
        }
        let n = offsets.len() - 1;
        if let Some(&v) = columns.iter().find(|&&v| v >= n) {
            return Err(BenchError::InvalidCsr(format!(
                "column {v} out of bounds for n={n}"
            )));
        }

        Ok(Self {
            offsets,
            columns,
            values,
        })
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        // `offsets` is length `n + 1` by construction.
        self.offsets.len() - 1
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.columns.len()
    }

    /// Row offsets (`IA`).
    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Column indices (`JA`).
    #[inline]
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Edge values (`VA`).
    #[inline]
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    #[inline]
    fn row_range(&self, node: usize) -> core::ops::Range<usize> {
        assert!(node < self.node_count(), "node {node} out of bounds");
        self.offsets[node]..self.offsets[node + 1]
    }

    /// Returns the out-neighbors of `node`.
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.columns[self.row_range(node)]
    }

    /// Returns the edge values of `node`, aligned with [`neighbors`](Self::neighbors).
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    pub fn row_values(&self, node: usize) -> &[usize] {
        &self.values[self.row_range(node)]
    }

    /// Returns the out-degree of a node.
    ///
    /// # Panics
    /// Panics if `node` is out of bounds.
    pub fn degree(&self, node: usize) -> usize {
        self.row_range(node).len()
    }
}
