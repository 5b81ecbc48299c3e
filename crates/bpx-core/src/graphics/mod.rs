//! Rasterization primitives
//!
//! Drawing operations are methods on [`Image`], split by shape:
//!
//! - [`map`]: per-pixel callbacks, fills and single points
//! - [`line`]: clipped lines, thick lines and gradient lines
//! - [`rect`]: filled, gradient and outlined rectangles
//! - [`circle`]: filled, gradient and outlined circles
//! - [`blit`]: scaled copies between images
//!
//! Every write that takes a [`BlendMode`] combines the existing pixel with
//! the new color through [`blend`]. Mapper callbacks receive the pixel
//! coordinates and its current color and return the color to store.
//!
//! Shapes are bounds-safe: anything outside the image is skipped.

pub mod blit;
pub mod circle;
pub mod line;
pub mod map;
pub mod rect;

pub use blit::Rect;
pub use line::clip_line;

use crate::blend::{BlendMode, blend};
use crate::color::Color;
use crate::image::Image;

/// Image extent as signed coordinates, saturating at `i32::MAX`.
#[inline]
pub(crate) fn extent(image: &Image<'_>) -> (i32, i32) {
    (
        i32::try_from(image.width()).unwrap_or(i32::MAX),
        i32::try_from(image.height()).unwrap_or(i32::MAX),
    )
}

impl Image<'_> {
    /// Blend `color` into the pixel at `(x, y)`, which must be in bounds.
    #[inline]
    pub(crate) fn blend_unchecked(&mut self, x: i32, y: i32, color: Color, mode: BlendMode) {
        let (x, y) = (x as u32, y as u32);
        let out = blend(self.get_unchecked(x, y), color, mode);
        self.set_unchecked(x, y, out);
    }

    /// Replace the pixel at `(x, y)`, which must be in bounds, with the
    /// mapper's output.
    #[inline]
    pub(crate) fn map_unchecked<F>(&mut self, x: i32, y: i32, mapper: &mut F)
    where
        F: FnMut(i32, i32, Color) -> Color,
    {
        let (ux, uy) = (x as u32, y as u32);
        let out = mapper(x, y, self.get_unchecked(ux, uy));
        self.set_unchecked(ux, uy, out);
    }
}
