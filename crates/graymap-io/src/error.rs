//! I/O error types
//!
//! Provides a unified error type for all graymap I/O operations so that
//! callers only need to handle one error type.

use thiserror::Error;

/// Error type for image I/O operations.
///
/// Wraps standard I/O failures, header and raster format errors, and
/// core-library errors raised while allocating the decoded image.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The magic number or max value is not a supported graymap variant
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The header or raster is malformed or truncated
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// An error from the core library (e.g. allocation failure)
    #[error("core error: {0}")]
    Core(#[from] graymap_core::Error),
}

impl IoError {
    /// Whether this error describes bad file contents rather than a
    /// failure to open, read or write the file.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_) | Self::InvalidData(_))
    }
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
