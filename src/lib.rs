//! # `csr_bench` - Sparse Layout Read-Latency Benchmark
//!
//! Compares two in-memory layouts of the same uniform-degree sparse graph:
//!
//! 1. **Adjacency rows** ([`AdjacencyGraph`]):
//!    - One heap allocation per vertex for neighbors, another for values
//!    - A value read goes through the outer array, then the row pointer
//!
//! 2. **Compressed sparse row** ([`CsrGraph`]):
//!    - Three flat arrays: row offsets `IA`, columns `JA`, values `VA`
//!    - A value read goes through `IA` into contiguous `VA`
//!
//! For each degree in a sweep the driver builds both layouts, scrubs the cache,
//! times one read per vertex on each, and reports the speedup alongside the
//! analytic memory ratio.
//!
//! ## Example
//!
//! ```rust
//! use csr_bench::{run, BenchConfig, TextReport};
//!
//! let config = BenchConfig {
//!     vertex_count: 8,
//!     degrees: vec![2],
//!     scratch_elements: 1024,
//!     ..BenchConfig::default()
//! };
//! let mut sink = TextReport::new(Vec::new());
//! let reports = run(&config, &mut sink).unwrap();
//!
//! assert_eq!(reports.len(), 1);
//! let text = String::from_utf8(sink.into_inner()).unwrap();
//! assert!(text.starts_with("D=2\nspeedup="));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod alloc;
pub mod bench;
pub mod config;
pub mod error;
pub mod graph;

pub use alloc::{AllocError, Buffer};
pub use bench::{
    run, run_degree, traverse_adjacency, traverse_csr, CacheScrubber, DegreeReport, Diagnostics,
    Footprint, JsonLinesReport, ReportSink, TextReport, TraversalSample, VerboseDiagnostics,
};
pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use graph::{AdjacencyGraph, CsrGraph};

// Compile-time assertions for the layouts being compared.
const _: () = {
    use core::mem;

    // Footprints are counted in host words.
    assert!(bench::WORD_BYTES == mem::size_of::<usize>());

    // Each adjacency row handle is a fat pointer: address plus length.
    assert!(mem::size_of::<Box<[usize]>>() == 2 * mem::size_of::<usize>());

    // The errors stay small enough to return by value.
    assert!(mem::size_of::<AllocError>() <= mem::size_of::<usize>() * 4);
};
