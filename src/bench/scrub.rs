//! Cache scrubbing between timed traversals.

use std::hint::black_box;

use crate::alloc::{try_buffer, Buffer};
use crate::error::Result;

/// Default scratch size in words (2^22, 32 MiB on 64-bit hosts).
pub const DEFAULT_SCRATCH_ELEMENTS: usize = 1 << 22;

/// Evicts cache and TLB state by writing a large scratch region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheScrubber {
    elements: usize,
}

impl CacheScrubber {
    /// Creates a scrubber that writes `elements` words per call.
    pub const fn new(elements: usize) -> Self {
        Self { elements }
    }

    /// Words written per [`scrub`](Self::scrub).
    pub const fn elements(&self) -> usize {
        self.elements
    }

    /// Allocates the scratch region, zeroes every word, and releases it.
    ///
    /// # Errors
    /// Returns `Alloc` naming `scratch` if the region cannot be allocated.
    pub fn scrub(&self) -> Result<()> {
        let mut scratch: Vec<usize> = try_buffer(Buffer::Scratch, self.elements)?;
        // Explicit writes; a zeroed allocation could hand back untouched pages.
        scratch.resize(self.elements, 0);
        black_box(scratch.as_mut_slice());
        Ok(())
    }
}

impl Default for CacheScrubber {
    fn default() -> Self {
        Self::new(DEFAULT_SCRATCH_ELEMENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrub_small_region() {
        let s = CacheScrubber::new(1024);
        assert_eq!(s.elements(), 1024);
        s.scrub().unwrap();
        s.scrub().unwrap();
    }

    #[test]
    fn default_is_four_mebiwords() {
        assert_eq!(CacheScrubber::default().elements(), 4_194_304);
    }

    #[test]
    fn oversized_region_reports_scratch() {
        let err = CacheScrubber::new(usize::MAX).scrub().unwrap_err();
        assert_eq!(err.to_string(), format!("memory allocation failed for `scratch` ({} elements)", usize::MAX));
    }
}
