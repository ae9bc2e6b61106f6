//! The two timed read loops.
//!
//! Both loops read one value per row and sum it. The adjacency loop reaches
//! the value through the outer row array and then the row pointer; the CSR
//! loop indexes `VA` through `IA`. Only the first value of each row is read.

use std::hint::black_box;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::graph::{AdjacencyGraph, CsrGraph};

/// Whether a traversal also records access-pattern diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Diagnostics {
    /// Plain timed loop.
    #[default]
    Off,
    /// Timed loop that also tracks the byte distance between accesses.
    Collect,
}

impl Diagnostics {
    /// `Collect` when `verbose` is set.
    pub fn from_verbose(verbose: bool) -> Self {
        if verbose {
            Diagnostics::Collect
        } else {
            Diagnostics::Off
        }
    }
}

/// Outcome of one timed traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalSample {
    /// Wall-clock duration of the loop.
    pub elapsed_us: u64,
    /// Sum of the values read.
    pub sum: usize,
    /// Mean signed distance between consecutive reads, when collected.
    pub mean_stride_bytes: Option<i64>,
}

/// Sums `values[i][0]` over every vertex.
#[inline(never)]
pub fn traverse_adjacency(graph: &AdjacencyGraph, diagnostics: Diagnostics) -> TraversalSample {
    let rows = graph.value_rows();
    match diagnostics {
        Diagnostics::Off => {
            let start = Instant::now();
            let mut sum = 0usize;
            for row in rows {
                sum = sum.wrapping_add(row[0]);
            }
            let sum = black_box(sum);
            TraversalSample {
                elapsed_us: elapsed_us(start),
                sum,
                mean_stride_bytes: None,
            }
        }
        Diagnostics::Collect => {
            let start = Instant::now();
            let mut sum = 0usize;
            let mut dist = StrideAccumulator::new(rows.first().map(|r| &r[0]));
            for row in rows {
                let cell = &row[0];
                sum = sum.wrapping_add(*cell);
                dist.visit(cell);
            }
            let sum = black_box(sum);
            TraversalSample {
                elapsed_us: elapsed_us(start),
                sum,
                mean_stride_bytes: dist.mean(rows.len()),
            }
        }
    }
}

/// Sums `VA[IA[i]]` over every non-empty row. `JA` is not read.
///
/// Rows with `IA[i] == IA[i + 1]` have no value and are skipped.
#[inline(never)]
pub fn traverse_csr(graph: &CsrGraph, diagnostics: Diagnostics) -> TraversalSample {
    let offsets = graph.offsets();
    let values = graph.values();
    match diagnostics {
        Diagnostics::Off => {
            let start = Instant::now();
            let mut sum = 0usize;
            for row in offsets.windows(2) {
                if row[0] < row[1] {
                    sum = sum.wrapping_add(values[row[0]]);
                }
            }
            let sum = black_box(sum);
            TraversalSample {
                elapsed_us: elapsed_us(start),
                sum,
                mean_stride_bytes: None,
            }
        }
        Diagnostics::Collect => {
            let start = Instant::now();
            let mut sum = 0usize;
            let mut reads = 0usize;
            let first = offsets.windows(2).find(|row| row[0] < row[1]);
            let mut dist = StrideAccumulator::new(first.map(|row| &values[row[0]]));
            for row in offsets.windows(2) {
                if row[0] < row[1] {
                    let cell = &values[row[0]];
                    sum = sum.wrapping_add(*cell);
                    dist.visit(cell);
                    reads += 1;
                }
            }
            let sum = black_box(sum);
            TraversalSample {
                elapsed_us: elapsed_us(start),
                sum,
                mean_stride_bytes: dist.mean(reads),
            }
        }
    }
}

/// Running sum of signed address deltas.
///
/// Wrapping arithmetic is exact here: the deltas telescope to
/// `last - first`, which always fits.
struct StrideAccumulator {
    prev: i64,
    total: i64,
}

impl StrideAccumulator {
    fn new(first: Option<&usize>) -> Self {
        Self {
            prev: first.map_or(0, address_of),
            total: 0,
        }
    }

    #[inline(always)]
    fn visit(&mut self, cell: &usize) {
        let addr = address_of(cell);
        self.total = self.total.wrapping_add(addr.wrapping_sub(self.prev));
        self.prev = addr;
    }

    fn mean(&self, accesses: usize) -> Option<i64> {
        let gaps = i64::try_from(accesses.checked_sub(1)?).ok()?;
        (gaps > 0).then(|| self.total / gaps)
    }
}

#[inline(always)]
#[allow(clippy::cast_possible_wrap)]
fn address_of(cell: &usize) -> i64 {
    (cell as *const usize as usize) as i64
}

fn elapsed_us(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX)
}
