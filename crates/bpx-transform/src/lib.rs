//! bpx-transform - Whole-image operations for bpx
//!
//! This crate provides operations that touch every pixel of an image:
//!
//! - Flips and orthogonal rotations, in place
//! - Canvas resizing with a chosen anchor
//! - Pixel format conversion
//! - Bilinear resizing through a pluggable [`Resampler`]
//! - Brightness, contrast, saturation, inversion and grayscale

pub mod adjust;
pub mod canvas;
pub mod convert;
mod error;
pub mod rotate;
pub mod scale;

pub use adjust::{brightness, contrast, grayscale, invert, opacity, saturation};
pub use canvas::{CanvasAnchor, resize_canvas};
pub use convert::convert;
pub use error::{TransformError, TransformResult};
pub use rotate::{flip_horizontal, flip_vertical, rotate_90, rotate_180, rotate_orth};
pub use scale::{LinearResampler, Resampler, resize, resize_with};
