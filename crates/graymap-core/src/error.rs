//! Error types for graymap-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Graymap core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Max sample value outside the 8-bit range
    #[error("invalid max value: {0} (must be 1..=255)")]
    InvalidMaxValue(u32),

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Sample buffer length does not match the image dimensions
    #[error("buffer length mismatch: expected {expected} samples, got {actual}")]
    BufferLength { expected: usize, actual: usize },

    /// Sample buffer could not be allocated
    #[error("memory allocation failed")]
    AllocationFailed,
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
