//! I/O error types
//!
//! Each format module maps the errors of its underlying library into
//! `IoError` variants so that callers only need to handle one error type.

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not supported or not enabled via features
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A decoded image has a channel count with no matching pixel format
    #[error("unsupported channel count: {0}")]
    UnsupportedChannels(u8),

    /// The image data is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// A format-specific decoder returned an error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// A format-specific encoder returned an error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// An error from the core library (e.g. buffer allocation)
    #[error("core error: {0}")]
    Core(#[from] bpx_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
