//! Whole-image color adjustments
//!
//! Each function applies the matching [`Color`] operation to every pixel
//! in place. Formats without color or alpha store whatever the codec can
//! keep of the result.

use bpx_core::{Color, Image};

/// Brighten (`factor > 0`) or darken (`factor < 0`); `factor` is clamped
/// to `[-1.0, 1.0]`.
pub fn brightness(image: &mut Image<'_>, factor: f32) {
    image.map(|_, _, c| c.brightness(factor));
}

/// Scale contrast around mid-gray; `factor` is clamped to `[-1.0, 1.0]`.
pub fn contrast(image: &mut Image<'_>, factor: f32) {
    image.map(|_, _, c| c.contrast(factor));
}

/// Set the HSV saturation of every pixel to `factor`.
pub fn saturation(image: &mut Image<'_>, factor: f32) {
    image.map(|_, _, c| c.saturation(factor));
}

/// Set the alpha of every pixel to `alpha` in `[0.0, 1.0]`.
pub fn opacity(image: &mut Image<'_>, alpha: f32) {
    image.map(|_, _, c| c.with_alpha(alpha));
}

/// Invert the color channels.
pub fn invert(image: &mut Image<'_>) {
    image.map(|_, _, c| c.invert());
}

/// Replace every pixel with its channel average.
pub fn grayscale(image: &mut Image<'_>) {
    image.map(|_, _, c| c.grayscale());
}
