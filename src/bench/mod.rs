//! Timed traversals, cache scrubbing, and the degree sweep.

pub mod driver;
pub mod footprint;
pub mod report;
pub mod scrub;
pub mod traversal;

pub use driver::{run, run_degree};
pub use footprint::{Footprint, WORD_BYTES};
pub use report::{DegreeReport, JsonLinesReport, ReportSink, TextReport, VerboseDiagnostics};
pub use scrub::CacheScrubber;
pub use traversal::{traverse_adjacency, traverse_csr, Diagnostics, TraversalSample};
