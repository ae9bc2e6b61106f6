//! Sweeps the configured degrees and produces one report per degree.
//!
//! For each degree: build adjacency, convert to CSR, then per trial scrub,
//! time adjacency, scrub, time CSR. Both graphs are dropped before the report
//! is emitted, so at most one degree's buffers are live at a time.

use crate::bench::footprint::Footprint;
use crate::bench::report::{DegreeReport, ReportSink, VerboseDiagnostics};
use crate::bench::scrub::CacheScrubber;
use crate::bench::traversal::{traverse_adjacency, traverse_csr, Diagnostics, TraversalSample};
use crate::config::BenchConfig;
use crate::error::{BenchError, Result};
use crate::graph::{AdjacencyGraph, CsrGraph};

/// Runs every configured degree, feeding `sink` as results arrive.
///
/// # Errors
/// Returns `InvalidConfig` before allocating anything if the configuration is
/// not runnable, `Alloc` if a buffer cannot be allocated, and `Io` if the sink
/// fails.
pub fn run(config: &BenchConfig, sink: &mut impl ReportSink) -> Result<Vec<DegreeReport>> {
    config.validate()?;
    let scrubber = CacheScrubber::new(config.scratch_elements);

    tracing::info!(
        vertex_count = config.vertex_count,
        repeat_count = config.repeat_count,
        verbose = config.verbose,
        degrees = ?config.degrees,
        "starting sweep"
    );

    let mut reports = Vec::with_capacity(config.degrees.len());
    for &degree in &config.degrees {
        let _span = tracing::info_span!("degree", degree).entered();
        sink.begin_degree(degree)?;
        let report = run_degree(config, degree, &scrubber)?;
        sink.record(&report)?;
        reports.push(report);
    }
    Ok(reports)
}

/// Benchmarks a single degree.
///
/// # Errors
/// Returns `InvalidConfig` for a zero degree, vertex count or repeat count,
/// and `Alloc` if a graph or scratch buffer cannot be allocated.
pub fn run_degree(config: &BenchConfig, degree: usize, scrubber: &CacheScrubber) -> Result<DegreeReport> {
    if degree == 0 || config.vertex_count == 0 || config.repeat_count == 0 {
        return Err(BenchError::InvalidConfig(format!(
            "cannot time degree {degree} with {} vertices and {} trials",
            config.vertex_count, config.repeat_count
        )));
    }
    let n = config.vertex_count;
    let mode = Diagnostics::from_verbose(config.verbose);

    let adjacency = AdjacencyGraph::generate(n, degree)?;
    tracing::debug!(edges = adjacency.edge_count(), "generated adjacency rows");

    let csr = CsrGraph::from_adjacency(&adjacency)?;
    tracing::debug!(edges = csr.edge_count(), "converted to CSR");

    let mut totals = TrialTotals::default();
    let mut last: Option<(TraversalSample, TraversalSample)> = None;

    for trial in 0..config.repeat_count {
        scrubber.scrub()?;
        let adj = traverse_adjacency(&adjacency, mode);
        scrubber.scrub()?;
        let flat = traverse_csr(&csr, mode);

        tracing::debug!(trial, adjacency_us = adj.elapsed_us, csr_us = flat.elapsed_us, "trial done");
        totals.add(&adj, &flat);
        last = Some((adj, flat));
    }

    drop(csr);
    drop(adjacency);
    tracing::debug!("released buffers");

    let TrialTotals { adjacency_us, csr_us } = totals;

    let footprint = Footprint::analytic(n, degree);
    let diagnostics = match (mode, last) {
        (Diagnostics::Collect, Some((adj, flat))) => Some(VerboseDiagnostics {
            adjacency_sum: adj.sum,
            csr_sum: flat.sum,
            adjacency_stride: adj.mean_stride_bytes,
            csr_stride: flat.mean_stride_bytes,
            adjacency_us_per_access: per_access(adjacency_us, config.repeat_count, n),
            csr_us_per_access: per_access(csr_us, config.repeat_count, n),
        }),
        _ => None,
    };

    let report = DegreeReport {
        degree,
        vertex_count: n,
        repeat_count: config.repeat_count,
        adjacency_us,
        csr_us,
        speedup: DegreeReport::compute_speedup(adjacency_us, csr_us),
        memory_ratio: footprint.ratio(),
        footprint,
        diagnostics,
    };
    tracing::info!(
        adjacency_us,
        csr_us,
        speedup = ?report.speedup,
        memory_ratio = report.memory_ratio,
        "degree complete"
    );
    Ok(report)
}

/// Elapsed time summed over trials.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct TrialTotals {
    adjacency_us: u64,
    csr_us: u64,
}

impl TrialTotals {
    fn add(&mut self, adjacency: &TraversalSample, csr: &TraversalSample) {
        self.adjacency_us = self.adjacency_us.saturating_add(adjacency.elapsed_us);
        self.csr_us = self.csr_us.saturating_add(csr.elapsed_us);
    }
}

#[allow(clippy::cast_precision_loss)]
fn per_access(total_us: u64, repeats: usize, vertices: usize) -> f64 {
    total_us as f64 / repeats as f64 / vertices as f64
}
