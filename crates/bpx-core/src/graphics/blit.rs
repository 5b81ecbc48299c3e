//! Image-to-image copies

use super::extent;
use crate::blend::{BlendMode, blend};
use crate::image::Image;

/// Axis-aligned rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// The rectangle covering all of `image`.
    pub fn of(image: &Image<'_>) -> Self {
        let (w, h) = extent(image);
        Rect::new(0, 0, w, h)
    }

    /// True if the rectangle covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Intersection with `[0, width) x [0, height)`.
    ///
    /// An empty intersection has zero size.
    pub fn clamp_to(&self, width: u32, height: u32) -> Rect {
        let clamp_axis = |start: i32, len: i32, limit: u32| {
            let limit = limit as i64;
            let lo = (start as i64).clamp(0, limit);
            let hi = (start as i64 + len.max(0) as i64).clamp(0, limit);
            (lo as i32, (hi - lo).max(0) as i32)
        };
        let (x, w) = clamp_axis(self.x, self.w, width);
        let (y, h) = clamp_axis(self.y, self.h, height);
        Rect { x, y, w, h }
    }
}

impl Image<'_> {
    /// Copy `src_rect` of `src` into `dst_rect` of this image.
    ///
    /// Both rectangles are clamped to their own image first. When the
    /// sizes differ the source is sampled nearest-neighbour, and every
    /// pixel goes through [`blend`] with `mode`. Empty rectangles are a
    /// no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use bpx_core::{BlendMode, Color, Image, PixelFormat, Rect};
    ///
    /// let src = Image::new(2, 2, Color::RED, PixelFormat::RgbU8).unwrap();
    /// let mut dst = Image::new(8, 8, Color::BLACK, PixelFormat::RgbaU8).unwrap();
    /// dst.draw(Rect::new(4, 4, 4, 4), &src, Rect::of(&src), BlendMode::Replace);
    /// assert_eq!(dst.get(7, 7), Color::RED);
    /// assert_eq!(dst.get(3, 3), Color::BLACK);
    /// ```
    pub fn draw(&mut self, dst_rect: Rect, src: &Image<'_>, src_rect: Rect, mode: BlendMode) {
        let d = dst_rect.clamp_to(self.width(), self.height());
        let s = src_rect.clamp_to(src.width(), src.height());
        if d.is_empty() || s.is_empty() {
            return;
        }

        for y in 0..d.h {
            let src_y = s.y + (y as i64 * s.h as i64 / d.h as i64) as i32;
            let dst_y = d.y + y;
            for x in 0..d.w {
                let src_x = s.x + (x as i64 * s.w as i64 / d.w as i64) as i32;
                let dst_x = d.x + x;
                let color = src.get_unchecked(src_x as u32, src_y as u32);
                self.blend_unchecked(dst_x, dst_y, color, mode);
            }
        }
    }

    /// Copy all of `src` into the rectangle `(x, y, w, h)`.
    pub fn draw_image(&mut self, x: i32, y: i32, w: i32, h: i32, src: &Image<'_>, mode: BlendMode) {
        self.draw(Rect::new(x, y, w, h), src, Rect::of(src), mode);
    }
}
