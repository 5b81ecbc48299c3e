//! Pixel access functions
//!
//! Checked accessors take signed coordinates so that rasterizers can pass
//! raw geometry straight through: reads outside the image return
//! [`Color::BLANK`] and writes outside it are ignored.
//!
//! Unchecked accessors skip the coordinate test. A coordinate outside the
//! image is a caller bug; it either lands on a different pixel of the same
//! buffer or panics on the slice bound, but never touches foreign memory.

use super::Image;
use crate::codec;
use crate::color::Color;

impl Image<'_> {
    /// Get the color at pixel offset `offset` (`y * width + x`).
    ///
    /// Returns [`Color::BLANK`] if `offset >= size()`.
    #[inline]
    pub fn get_at(&self, offset: usize) -> Color {
        if offset < self.size() {
            self.get_at_unchecked(offset)
        } else {
            Color::BLANK
        }
    }

    /// Get the color at `(x, y)`.
    ///
    /// Returns [`Color::BLANK`] if the coordinates are out of bounds.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Color {
        if self.contains(x, y) {
            self.get_unchecked(x as u32, y as u32)
        } else {
            Color::BLANK
        }
    }

    /// Set the color at pixel offset `offset`.
    ///
    /// Does nothing if `offset >= size()`.
    #[inline]
    pub fn set_at(&mut self, offset: usize, color: Color) {
        if offset < self.size() {
            self.set_at_unchecked(offset, color);
        }
    }

    /// Set the color at `(x, y)`.
    ///
    /// Does nothing if the coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if self.contains(x, y) {
            self.set_unchecked(x as u32, y as u32, color);
        }
    }

    /// Get the color at pixel offset `offset` without the range test.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= size()`.
    #[inline]
    pub fn get_at_unchecked(&self, offset: usize) -> Color {
        let bpp = self.format.bytes_per_pixel();
        let start = offset * bpp;
        codec::decode(self.format, &self.data()[start..start + bpp])
    }

    /// Get the color at `(x, y)` without the bounds test.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset lies past the end of the buffer.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> Color {
        self.get_at_unchecked(y as usize * self.width as usize + x as usize)
    }

    /// Set the color at pixel offset `offset` without the range test.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= size()`.
    #[inline]
    pub fn set_at_unchecked(&mut self, offset: usize, color: Color) {
        let bpp = self.format.bytes_per_pixel();
        let start = offset * bpp;
        let format = self.format;
        codec::encode(format, &mut self.data_mut()[start..start + bpp], color);
    }

    /// Set the color at `(x, y)` without the bounds test.
    ///
    /// # Panics
    ///
    /// Panics if the computed offset lies past the end of the buffer.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, color: Color) {
        let offset = y as usize * self.width as usize + x as usize;
        self.set_at_unchecked(offset, color);
    }

    /// Swap the raw bytes of two pixels.
    ///
    /// Works below the codec, so swaps are exact for every format.
    ///
    /// # Panics
    ///
    /// Panics if either offset is out of range.
    #[inline]
    pub fn swap_pixels(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let bpp = self.format.bytes_per_pixel();
        let data = self.data_mut();
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = data.split_at_mut(hi * bpp);
        head[lo * bpp..(lo + 1) * bpp].swap_with_slice(&mut tail[..bpp]);
    }

    /// Raw bytes of the pixel at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= size()`.
    #[inline]
    pub fn pixel_bytes(&self, offset: usize) -> &[u8] {
        let bpp = self.format.bytes_per_pixel();
        &self.data()[offset * bpp..(offset + 1) * bpp]
    }

    /// Raw bytes of the pixel at `offset`, mutable.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= size()`.
    #[inline]
    pub fn pixel_bytes_mut(&mut self, offset: usize) -> &mut [u8] {
        let bpp = self.format.bytes_per_pixel();
        &mut self.data_mut()[offset * bpp..(offset + 1) * bpp]
    }
}

#[cfg(test)]
mod tests {
    use crate::{Color, Image, PixelFormat};

    #[test]
    fn test_checked_access_out_of_range() {
        let mut img = Image::new(3, 3, Color::BLACK, PixelFormat::RgbaU8).unwrap();
        assert_eq!(img.get(-1, 0), Color::BLANK);
        assert_eq!(img.get(3, 0), Color::BLANK);
        assert_eq!(img.get(0, 3), Color::BLANK);
        assert_eq!(img.get_at(9), Color::BLANK);

        let before = img.data().to_vec();
        img.set(3, 0, Color::RED);
        img.set(-1, 1, Color::RED);
        img.set(0, -1, Color::RED);
        img.set_at(9, Color::RED);
        assert_eq!(img.data(), &before[..]);
    }

    #[test]
    fn test_x_is_checked_independently() {
        // (3, 0) would alias (0, 1) if only the linear offset were tested
        let mut img = Image::new(3, 3, Color::BLACK, PixelFormat::LU8).unwrap();
        img.set(3, 0, Color::WHITE);
        assert_eq!(img.get(0, 1), Color::BLACK);
    }

    #[test]
    fn test_offset_and_xy_agree() {
        let mut img = Image::new(4, 3, Color::BLANK, PixelFormat::BgraF32).unwrap();
        img.set(2, 1, Color::GOLD);
        assert_eq!(img.get_at(6), Color::GOLD);
        img.set_at(11, Color::CYAN);
        assert_eq!(img.get(3, 2), Color::CYAN);
        assert_eq!(img.get_unchecked(3, 2), Color::CYAN);
    }

    #[test]
    fn test_swap_pixels() {
        let mut img = Image::new(3, 1, Color::BLACK, PixelFormat::Rgb565).unwrap();
        img.set(0, 0, Color::RED);
        img.set(2, 0, Color::BLUE);
        img.swap_pixels(2, 0);
        assert_eq!(img.get(0, 0), Color::BLUE);
        assert_eq!(img.get(2, 0), Color::RED);
        img.swap_pixels(1, 1);
        assert_eq!(img.get(1, 0), Color::BLACK);
    }

    #[test]
    #[should_panic]
    fn test_unchecked_panics_past_end() {
        let img = Image::new(2, 2, Color::BLACK, PixelFormat::RgbaU8).unwrap();
        let _ = img.get_at_unchecked(4);
    }
}
