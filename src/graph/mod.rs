//! The two sparse layouts under comparison.
//!
//! Graph implementations are organized into categories:
//! - `basic`: per-vertex row allocations
//! - `compressed`: flat CSR arrays

pub mod basic;
pub mod compressed;

pub use basic::AdjacencyGraph;
pub use compressed::CsrGraph;
