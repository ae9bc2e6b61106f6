//! Per-degree results and the sinks that print them.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::bench::footprint::Footprint;
use crate::error::Result;

/// Access-pattern details gathered in verbose runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerboseDiagnostics {
    /// Sum read by the last adjacency trial.
    pub adjacency_sum: usize,
    /// Sum read by the last CSR trial.
    pub csr_sum: usize,
    /// Mean byte distance between adjacency reads, last trial.
    pub adjacency_stride: Option<i64>,
    /// Mean byte distance between CSR reads, last trial.
    pub csr_stride: Option<i64>,
    /// Adjacency microseconds per read, averaged over all trials.
    pub adjacency_us_per_access: f64,
    /// CSR microseconds per read, averaged over all trials.
    pub csr_us_per_access: f64,
}

/// Result of benchmarking one degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegreeReport {
    /// Neighbors per vertex.
    pub degree: usize,
    /// Vertices per graph.
    pub vertex_count: usize,
    /// Trials summed into the elapsed times.
    pub repeat_count: usize,
    /// Adjacency traversal time over all trials.
    pub adjacency_us: u64,
    /// CSR traversal time over all trials.
    pub csr_us: u64,
    /// `adjacency_us / csr_us`; `None` when the CSR time rounds to zero.
    /// The text report prints `inf` for that case, or `nan` if both times are zero.
    pub speedup: Option<f64>,
    /// CSR footprint over adjacency footprint.
    pub memory_ratio: f64,
    /// Analytic byte footprints.
    pub footprint: Footprint,
    /// Present in verbose runs.
    pub diagnostics: Option<VerboseDiagnostics>,
}

impl DegreeReport {
    /// Speedup of CSR over adjacency, if defined.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute_speedup(adjacency_us: u64, csr_us: u64) -> Option<f64> {
        (csr_us > 0).then(|| adjacency_us as f64 / csr_us as f64)
    }
}

/// Receives results as the driver produces them.
pub trait ReportSink {
    /// Called before a degree's graphs are built.
    ///
    /// # Errors
    /// Returns `Io` if the sink cannot be written.
    fn begin_degree(&mut self, degree: usize) -> Result<()>;

    /// Called once a degree's buffers have been released.
    ///
    /// # Errors
    /// Returns `Io` if the sink cannot be written.
    fn record(&mut self, report: &DegreeReport) -> Result<()>;
}

/// Line-oriented report: `D=<degree>`, then the ratio line.
pub struct TextReport<W> {
    out: W,
}

impl<W: Write> TextReport<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

// `x / 0` for a nonzero adjacency time, `0 / 0` otherwise.
fn fmt_speedup(report: &DegreeReport) -> String {
    match report.speedup {
        Some(s) => format!("{s:.6}"),
        None if report.adjacency_us == 0 => "nan".to_owned(),
        None => "inf".to_owned(),
    }
}

fn fmt_stride(stride: Option<i64>) -> String {
    stride.map_or_else(|| "-".to_owned(), |s| s.to_string())
}

impl<W: Write> ReportSink for TextReport<W> {
    fn begin_degree(&mut self, degree: usize) -> Result<()> {
        writeln!(self.out, "D={degree}")?;
        Ok(())
    }

    fn record(&mut self, report: &DegreeReport) -> Result<()> {
        if let Some(diag) = &report.diagnostics {
            write!(
                self.out,
                "sum_adj={} | mem_adj={} | sum_csr={} | mem_csr={} | ",
                diag.adjacency_sum,
                fmt_stride(diag.adjacency_stride),
                diag.csr_sum,
                fmt_stride(diag.csr_stride),
            )?;
            write!(
                self.out,
                "adj={:.6}us / csr={:.6}us | adj={}MB / csr={}MB | ",
                diag.adjacency_us_per_access,
                diag.csr_us_per_access,
                report.footprint.adjacency_mb(),
                report.footprint.csr_mb(),
            )?;
        }
        writeln!(
            self.out,
            "speedup={} | memory={:.6}",
            fmt_speedup(report),
            report.memory_ratio
        )?;
        self.out.flush()?;
        Ok(())
    }
}

/// One JSON object per degree, newline separated.
pub struct JsonLinesReport<W> {
    out: W,
}

impl<W: Write> JsonLinesReport<W> {
    /// Wraps a writer.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonLinesReport<W> {
    fn begin_degree(&mut self, _degree: usize) -> Result<()> {
        Ok(())
    }

    fn record(&mut self, report: &DegreeReport) -> Result<()> {
        serde_json::to_writer(&mut self.out, report).map_err(std::io::Error::from)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Collects reports in memory.
impl ReportSink for Vec<DegreeReport> {
    fn begin_degree(&mut self, _degree: usize) -> Result<()> {
        Ok(())
    }

    fn record(&mut self, report: &DegreeReport) -> Result<()> {
        self.push(report.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(diagnostics: Option<VerboseDiagnostics>) -> DegreeReport {
        let footprint = Footprint::analytic(1_000, 2);
        DegreeReport {
            degree: 2,
            vertex_count: 1_000,
            repeat_count: 1,
            adjacency_us: 3000,
            csr_us: 1200,
            speedup: DegreeReport::compute_speedup(3000, 1200),
            memory_ratio: footprint.ratio(),
            footprint,
            diagnostics,
        }
    }

    #[test]
    fn text_report_plain_lines() {
        let mut sink = TextReport::new(Vec::new());
        sink.begin_degree(2).unwrap();
        sink.record(&sample(None)).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "D=2\nspeedup=2.500000 | memory=1.250250\n");
    }

    #[test]
    fn text_report_verbose_field_order() {
        let diag = VerboseDiagnostics {
            adjacency_sum: 1_000,
            csr_sum: 1_000,
            adjacency_stride: Some(32),
            csr_stride: Some(8),
            adjacency_us_per_access: 0.003,
            csr_us_per_access: 0.0012,
        };
        let mut sink = TextReport::new(Vec::new());
        sink.record(&sample(Some(diag))).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            out,
            "sum_adj=1000 | mem_adj=32 | sum_csr=1000 | mem_csr=8 | \
             adj=0.003000us / csr=0.001200us | adj=0MB / csr=0MB | \
             speedup=2.500000 | memory=1.250250\n"
        );
    }

    #[test]
    fn degenerate_speedup_prints_inf() {
        assert_eq!(DegreeReport::compute_speedup(10, 0), None);
        let mut report = sample(None);
        report.csr_us = 0;
        report.speedup = DegreeReport::compute_speedup(report.adjacency_us, 0);
        let mut sink = TextReport::new(Vec::new());
        sink.record(&report).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.starts_with("speedup=inf | "));
    }

    #[test]
    fn zero_over_zero_speedup_prints_nan() {
        assert_eq!(DegreeReport::compute_speedup(0, 0), None);
        let mut report = sample(None);
        report.adjacency_us = 0;
        report.csr_us = 0;
        report.speedup = None;
        let mut sink = TextReport::new(Vec::new());
        sink.record(&report).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "speedup=nan | memory=1.250250\n");
    }

    #[test]
    fn json_lines_roundtrip() {
        let mut sink = JsonLinesReport::new(Vec::new());
        sink.begin_degree(1).unwrap();
        sink.record(&sample(None)).unwrap();
        sink.record(&sample(None)).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let back: DegreeReport = serde_json::from_str(lines[0]).unwrap();
        let want = sample(None);
        assert_eq!(back.degree, want.degree);
        assert_eq!(back.adjacency_us, want.adjacency_us);
        assert_eq!(back.csr_us, want.csr_us);
        assert_eq!(back.footprint, want.footprint);
        assert_eq!(back.speedup, Some(2.5));
        assert!((back.memory_ratio - want.memory_ratio).abs() < 1e-12);
        assert!(back.diagnostics.is_none());
    }
}
