//! Region mapping, fills and points

use super::extent;
use crate::blend::{BlendMode, blend};
use crate::codec;
use crate::color::Color;
use crate::image::Image;

impl Image<'_> {
    /// Apply `mapper(x, y, current) -> new` to every pixel.
    ///
    /// Pixels are visited row by row, top to bottom.
    pub fn map<F>(&mut self, mut mapper: F)
    where
        F: FnMut(i32, i32, Color) -> Color,
    {
        let (w, h) = extent(self);
        for y in 0..h {
            for x in 0..w {
                self.map_unchecked(x, y, &mut mapper);
            }
        }
    }

    /// Apply `mapper` to the sub-rectangle at `(x, y)` of size `width` x
    /// `height`, clamped to the image.
    pub fn map_region<F>(&mut self, x: i32, y: i32, width: i32, height: i32, mut mapper: F)
    where
        F: FnMut(i32, i32, Color) -> Color,
    {
        let (w, h) = extent(self);
        let x_start = x.clamp(0, w);
        let y_start = y.clamp(0, h);
        let x_end = (x as i64 + width.max(0) as i64).clamp(0, w as i64) as i32;
        let y_end = (y as i64 + height.max(0) as i64).clamp(0, h as i64) as i32;

        for py in y_start..y_end {
            for px in x_start..x_end {
                self.map_unchecked(px, py, &mut mapper);
            }
        }
    }

    /// Set every pixel to `color`.
    ///
    /// The color is encoded once and the bytes are replicated.
    pub fn fill(&mut self, color: Color) {
        let format = self.format();
        let bpp = format.bytes_per_pixel();
        let encoded = codec::encode_pixel(format, color);
        for px in self.data_mut().chunks_exact_mut(bpp) {
            px.copy_from_slice(&encoded[..bpp]);
        }
    }

    /// Blend `color` into the pixel at `(x, y)`; no-op outside the image.
    pub fn point(&mut self, x: i32, y: i32, color: Color, mode: BlendMode) {
        if self.contains(x, y) {
            let out = blend(self.get(x, y), color, mode);
            self.set(x, y, out);
        }
    }
}
