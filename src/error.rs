//! Crate-wide error type.

use core::fmt;
use std::io;

use crate::alloc::AllocError;

/// Errors produced while building layouts, running trials, or writing reports.
#[derive(Debug)]
pub enum BenchError {
    /// A buffer could not be allocated.
    Alloc(AllocError),
    /// The configuration cannot describe a runnable benchmark.
    InvalidConfig(String),
    /// CSR parts failed validation.
    InvalidCsr(String),
    /// Reading a config file or writing a report failed.
    Io(io::Error),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::Alloc(e) => fmt::Display::fmt(e, f),
            BenchError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            BenchError::InvalidCsr(msg) => write!(f, "invalid CSR parts: {msg}"),
            BenchError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for BenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchError::Alloc(e) => Some(e),
            BenchError::Io(e) => Some(e),
            BenchError::InvalidConfig(_) | BenchError::InvalidCsr(_) => None,
        }
    }
}

impl From<AllocError> for BenchError {
    fn from(e: AllocError) -> Self {
        BenchError::Alloc(e)
    }
}

impl From<io::Error> for BenchError {
    fn from(e: io::Error) -> Self {
        BenchError::Io(e)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, BenchError>;
