//! Analytic memory footprint of the two layouts.
//!
//! Footprints are derived from the graph shape, not measured: the adjacency
//! layout counts its `2·n·d` row words, the CSR layout adds the `n + 1`
//! offsets on top of the same payload. Outer pointer arrays and allocator
//! headers are not counted.

use serde::{Deserialize, Serialize};

/// Bytes per stored element.
pub const WORD_BYTES: usize = core::mem::size_of::<usize>();

const BYTES_PER_MB: usize = 1_000_000;

/// Byte footprint of both layouts for one graph shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprint {
    /// Neighbor rows plus value rows.
    pub adjacency_bytes: usize,
    /// `IA` plus `JA` plus `VA`.
    pub csr_bytes: usize,
}

impl Footprint {
    /// Computes the footprint of an `n`-vertex, degree-`d` graph.
    ///
    /// Saturates instead of overflowing; shapes are validated before a run.
    pub fn analytic(vertex_count: usize, degree: usize) -> Self {
        let payload_words = vertex_count.saturating_mul(degree).saturating_mul(2);
        let offset_words = vertex_count.saturating_add(1);
        Self {
            adjacency_bytes: payload_words.saturating_mul(WORD_BYTES),
            csr_bytes: offset_words
                .saturating_add(payload_words)
                .saturating_mul(WORD_BYTES),
        }
    }

    /// CSR bytes over adjacency bytes.
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        self.csr_bytes as f64 / self.adjacency_bytes as f64
    }

    /// Adjacency footprint in whole megabytes.
    pub fn adjacency_mb(&self) -> usize {
        self.adjacency_bytes / BYTES_PER_MB
    }

    /// CSR footprint in whole megabytes.
    pub fn csr_mb(&self) -> usize {
        self.csr_bytes / BYTES_PER_MB
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_ratio(n: usize, d: usize) -> f64 {
        ((n + 1) + 2 * n * d) as f64 / (2 * n * d) as f64
    }

    #[test]
    fn ratio_matches_closed_form() {
        for (n, d) in [(8, 2), (1_000, 3), (1_000_000, 1), (1_000_000, 128)] {
            let fp = Footprint::analytic(n, d);
            assert!((fp.ratio() - expected_ratio(n, d)).abs() < 1e-12, "n={n} d={d}");
        }
    }

    #[test]
    fn million_vertices_degree_one() {
        let fp = Footprint::analytic(1_000_000, 1);
        assert_eq!(fp.adjacency_bytes, 2_000_000 * WORD_BYTES);
        assert_eq!(fp.csr_bytes, 3_000_001 * WORD_BYTES);
        assert!((fp.ratio() - 1.500_000_5).abs() < 1e-9);
    }

    #[test]
    fn ratio_approaches_one_with_degree() {
        let fp = Footprint::analytic(1_000_000, 128);
        assert!((fp.ratio() - 1.003_906_254).abs() < 1e-9);
        let lo = Footprint::analytic(1_000_000, 1).ratio();
        assert!(fp.ratio() < lo);
    }

    #[test]
    fn megabytes_truncate() {
        let fp = Footprint::analytic(1_000_000, 1);
        assert_eq!(fp.adjacency_mb(), 2 * WORD_BYTES);
        assert_eq!(fp.csr_mb(), 3_000_001 * WORD_BYTES / 1_000_000);
    }
}
