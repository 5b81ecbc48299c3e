//! Error types for bpx-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.
//!
//! Out-of-range pixel access is deliberately *not* an error: checked
//! accessors return a transparent color or skip the write instead.

use thiserror::Error;

/// bpx-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// A raw pixel region does not match `width * height * bytes_per_pixel`
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Pixel format not supported by this operation
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Memory allocation failed
    #[error("memory allocation failed")]
    AllocationFailed,
}

/// Result type alias for bpx-core operations
pub type Result<T> = std::result::Result<T, Error>;
