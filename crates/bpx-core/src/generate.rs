//! Procedural image generation
//!
//! Builders for gradient and checkerboard images. Every function allocates
//! a new owned [`Image`] in the requested format.

use crate::color::Color;
use crate::error::{Error, Result};
use crate::format::PixelFormat;
use crate::graphics::rect::{linear_t, radial_t};
use crate::image::Image;
use crate::ramp::ColorRamp;

/// One-pixel-high horizontal gradient: pixel `x` samples the ramp at
/// `x / (width - 1)`.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] if `width` is zero.
pub fn generate_gradient_linear_1d(
    width: u32,
    ramp: &ColorRamp,
    format: PixelFormat,
) -> Result<Image<'static>> {
    let mut image = Image::new(width, 1, Color::BLANK, format)?;
    let span = width.saturating_sub(1).max(1) as f32;
    for x in 0..width {
        image.set_unchecked(x, 0, ramp.get(x as f32 / span));
    }
    Ok(image)
}

/// Gradient along the `start -> end` vector.
///
/// Pixels are projected onto the vector; the projection parameter is
/// clamped to `[0, 1]`. `start == end` paints the first ramp color.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] if either dimension is zero.
pub fn generate_gradient_linear_2d(
    width: u32,
    height: u32,
    ramp: &ColorRamp,
    start: (i32, i32),
    end: (i32, i32),
    format: PixelFormat,
) -> Result<Image<'static>> {
    let mut image = Image::new(width, height, Color::BLANK, format)?;
    image.map(|x, y, _| ramp.get(linear_t(start, end, x, y)));
    Ok(image)
}

/// Radial gradient around `center`, reaching the last ramp color at the
/// distance of `edge`.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] if either dimension is zero.
pub fn generate_gradient_radial_2d(
    width: u32,
    height: u32,
    ramp: &ColorRamp,
    center: (i32, i32),
    edge: (i32, i32),
    format: PixelFormat,
) -> Result<Image<'static>> {
    let mut image = Image::new(width, height, Color::BLANK, format)?;
    image.map(|x, y, _| ramp.get(radial_t(center, edge, x, y)));
    Ok(image)
}

/// Checkerboard of `cell` x `cell` squares, `first` in the top-left.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if `cell` is zero and
/// [`Error::InvalidDimension`] if either dimension is zero.
pub fn generate_checkerboard(
    width: u32,
    height: u32,
    cell: u32,
    first: Color,
    second: Color,
    format: PixelFormat,
) -> Result<Image<'static>> {
    if cell == 0 {
        return Err(Error::InvalidParameter("checkerboard cell size must be > 0".into()));
    }
    let mut image = Image::new(width, height, first, format)?;
    let cell = cell as i64;
    image.map(|x, y, c| {
        if (x as i64 / cell + y as i64 / cell) % 2 == 0 {
            c
        } else {
            second
        }
    });
    Ok(image)
}
