//! bpx - Software 2D pixel-buffer engine
//!
//! # Overview
//!
//! bpx stores images as flat pixel buffers in any of 24 binary layouts
//! and draws on them on the CPU:
//!
//! - Pixel formats from packed 16-bit to 32-bit float per channel
//! - Lines, circles and rectangles with blend modes, gradients and
//!   per-pixel callbacks
//! - Scaled blits between images of different formats
//! - Flips, rotations, canvas resizing, format conversion and resampling
//! - PNG, JPEG, BMP and TGA files
//!
//! # Example
//!
//! ```
//! use bpx::{BlendMode, Color, Image, PixelFormat};
//!
//! let mut img = Image::new(64, 48, Color::BLACK, PixelFormat::Rgb565).unwrap();
//! img.circle(32, 24, 10, Color::ORANGE, BlendMode::Replace);
//! bpx::transform::rotate_90(&mut img, true).unwrap();
//! assert_eq!(img.dimensions(), (48, 64));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use bpx_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use bpx_io as io;
pub use bpx_transform as transform;
