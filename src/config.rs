//! Benchmark configuration.
//!
//! Defaults: one million vertices, a single trial,
//! no diagnostics, degrees 1 through 128.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bench::scrub::DEFAULT_SCRATCH_ELEMENTS;
use crate::error::{BenchError, Result};

/// Default vertex count.
pub const DEFAULT_VERTEX_COUNT: usize = 1_000_000;

/// Default degree sweep.
pub const DEFAULT_DEGREES: [usize; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

/// Parameters of a benchmark run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Vertices per graph (`N`).
    pub vertex_count: usize,
    /// Timed trials per degree; elapsed time is summed across them.
    pub repeat_count: usize,
    /// Collect sums, strides and per-access timings.
    pub verbose: bool,
    /// Degrees to sweep, in order.
    pub degrees: Vec<usize>,
    /// Words written by each cache scrub.
    pub scratch_elements: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            vertex_count: DEFAULT_VERTEX_COUNT,
            repeat_count: 1,
            verbose: false,
            degrees: DEFAULT_DEGREES.to_vec(),
            scratch_elements: DEFAULT_SCRATCH_ELEMENTS,
        }
    }
}

impl BenchConfig {
    /// Reads a JSON configuration; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read and `InvalidConfig` if it does
    /// not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
            .map_err(|e| BenchError::InvalidConfig(format!("{}: {e}", path.display())))
    }

    /// Parses a JSON configuration; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns the `serde_json` parse error.
    pub fn from_json_str(text: &str) -> core::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Checks that every degree describes a runnable graph.
    ///
    /// # Errors
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(BenchError::InvalidConfig(msg));

        if self.vertex_count == 0 {
            return invalid("vertex_count must be at least 1".into());
        }
        if self.repeat_count == 0 {
            return invalid("repeat_count must be at least 1".into());
        }
        if self.scratch_elements == 0 {
            return invalid("scratch_elements must be at least 1".into());
        }
        if self.degrees.is_empty() {
            return invalid("degrees must not be empty".into());
        }
        for &d in &self.degrees {
            if d == 0 {
                return invalid("degrees must be at least 1".into());
            }
            if self.vertex_count.checked_mul(d).and_then(|m| m.checked_mul(2)).is_none() {
                return invalid(format!(
                    "{} vertices x degree {d} overflows usize",
                    self.vertex_count
                ));
            }
        }
        Ok(())
    }
}
