//! Fallible buffer allocation.
//!
//! Every buffer the benchmark owns is a plain `Vec` reserved up front with
//! [`Vec::try_reserve_exact`], so an out-of-memory condition surfaces as an
//! [`AllocError`] naming the buffer instead of an abort inside the allocator.

use core::fmt;

/// Identifies which buffer an allocation was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer {
    /// Outer array of neighbor-row pointers.
    AdjacencyRows,
    /// Outer array of value-row pointers.
    ValueRows,
    /// Neighbor row of a single vertex.
    AdjacencyRow(usize),
    /// Value row of a single vertex.
    ValueRow(usize),
    /// CSR row offsets (`IA`).
    RowOffsets,
    /// CSR column indices (`JA`).
    Columns,
    /// CSR values (`VA`).
    Values,
    /// Cache-scrub scratch region.
    Scratch,
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Buffer::AdjacencyRows => f.write_str("adj"),
            Buffer::ValueRows => f.write_str("values"),
            Buffer::AdjacencyRow(v) => write!(f, "adj[{v}]"),
            Buffer::ValueRow(v) => write!(f, "values[{v}]"),
            Buffer::RowOffsets => f.write_str("IA"),
            Buffer::Columns => f.write_str("JA"),
            Buffer::Values => f.write_str("VA"),
            Buffer::Scratch => f.write_str("scratch"),
        }
    }
}

/// The error type for allocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    /// Buffer whose allocation failed.
    pub buffer: Buffer,
    /// Requested length in elements.
    pub elements: usize,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "memory allocation failed for `{}` ({} elements)",
            self.buffer, self.elements
        )
    }
}

impl std::error::Error for AllocError {}

/// Returns an empty `Vec` with room for exactly `elements` items.
///
/// # Errors
/// Returns `AllocError` if the capacity overflows or the allocator refuses.
pub fn try_buffer<T>(buffer: Buffer, elements: usize) -> Result<Vec<T>, AllocError> {
    let mut v = Vec::new();
    if v.try_reserve_exact(elements).is_err() {
        tracing::error!(%buffer, elements, "allocation failed");
        return Err(AllocError { buffer, elements });
    }
    Ok(v)
}

/// Returns a `Vec` of `elements` copies of `value`.
///
/// # Errors
/// Returns `AllocError` if the capacity overflows or the allocator refuses.
pub fn try_filled<T: Clone>(buffer: Buffer, elements: usize, value: T) -> Result<Vec<T>, AllocError> {
    let mut v = try_buffer(buffer, elements)?;
    v.resize(elements, value);
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_names_match_csr_array_names() {
        assert_eq!(Buffer::RowOffsets.to_string(), "IA");
        assert_eq!(Buffer::Columns.to_string(), "JA");
        assert_eq!(Buffer::Values.to_string(), "VA");
        assert_eq!(Buffer::AdjacencyRow(7).to_string(), "adj[7]");
        assert_eq!(Buffer::ValueRow(3).to_string(), "values[3]");
    }

    #[test]
    fn try_buffer_reserves_exact_capacity() {
        let v: Vec<usize> = try_buffer(Buffer::Scratch, 17).unwrap();
        assert!(v.is_empty());
        assert!(v.capacity() >= 17);
    }

    #[test]
    fn try_filled_initializes_every_element() {
        let v = try_filled(Buffer::Values, 5, 1usize).unwrap();
        assert_eq!(v, vec![1; 5]);
    }

    #[test]
    fn capacity_overflow_names_the_buffer() {
        let err = try_buffer::<u64>(Buffer::Columns, usize::MAX).unwrap_err();
        assert_eq!(err.buffer, Buffer::Columns);
        assert_eq!(err.elements, usize::MAX);
        assert!(err.to_string().contains("`JA`"));
    }
}
