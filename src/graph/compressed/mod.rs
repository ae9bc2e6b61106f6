//! Compressed graph implementations.
//!
//! Flat, contiguous storage: one allocation per array regardless of vertex count.

pub mod csr_graph;

pub use csr_graph::CsrGraph;
