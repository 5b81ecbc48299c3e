//! Error types for bpx-transform

use thiserror::Error;

/// Errors that can occur during image transformations
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] bpx_core::Error),

    /// Invalid transformation parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Pixel format not supported by this operation
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A working buffer could not be allocated; the source is untouched
    #[error("allocation failed")]
    AllocationFailed,
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
