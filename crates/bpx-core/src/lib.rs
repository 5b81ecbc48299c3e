//! bpx Core - Pixel buffers, formats and rasterization
//!
//! This crate provides the data structures and algorithms of the bpx
//! pixel-buffer engine:
//!
//! - [`Image`] - A `width x height` pixel grid, owned or borrowed
//! - [`PixelFormat`] - The 24 supported binary pixel layouts
//! - [`Color`] - Canonical 8-bit RGBA color
//! - [`codec`] - Conversion between pixel bytes and [`Color`]
//! - [`BlendMode`] / [`blend`] - Color composition rules
//! - [`ColorRamp`] - Multi-stop color gradients
//! - [`graphics`] - Lines, circles, rectangles, region mapping and blits
//! - [`generate`] - Gradient and checkerboard image builders
//!
//! Transforms live in `bpx-transform`, file codecs in `bpx-io`.

pub mod blend;
pub mod codec;
pub mod color;
pub mod error;
pub mod format;
pub mod generate;
pub mod graphics;
pub mod image;
pub mod ramp;

pub use blend::{BlendMode, blend};
pub use color::Color;
pub use error::{Error, Result};
pub use format::{ChannelEncoding, ChannelOrder, FormatDescriptor, PixelFormat};
pub use generate::{
    generate_checkerboard, generate_gradient_linear_1d, generate_gradient_linear_2d,
    generate_gradient_radial_2d,
};
pub use graphics::{Rect, clip_line};
pub use image::Image;
pub use ramp::{ColorRamp, RampPoint};
