//! Flips and orthogonal rotations
//!
//! All operations work in place on the raw pixel bytes, so they are exact
//! for every format and never touch the codec:
//!
//! - [`flip_horizontal`], [`flip_vertical`] and [`rotate_180`] swap pixel
//!   pairs
//! - [`rotate_90`] on a square image cycles pixels four at a time
//! - [`rotate_90`] on a non-square image stages the result in a temporary
//!   buffer, copies it back and swaps the dimensions
//!
//! The byte size never changes, so borrowed images can be rotated too.

use crate::error::{TransformError, TransformResult};
use bpx_core::Image;
use bpx_core::image::try_alloc_bytes;

/// Mirror the image left-right.
pub fn flip_horizontal(image: &mut Image<'_>) {
    let (w, h) = (image.width() as usize, image.height() as usize);
    for y in 0..h {
        let row = y * w;
        for x in 0..w / 2 {
            image.swap_pixels(row + x, row + w - 1 - x);
        }
    }
}

/// Mirror the image top-bottom.
pub fn flip_vertical(image: &mut Image<'_>) {
    let h = image.height() as usize;
    let pitch = image.pitch();
    let data = image.data_mut();
    for y in 0..h / 2 {
        let bottom = (h - 1 - y) * pitch;
        let (head, tail) = data.split_at_mut(bottom);
        head[y * pitch..(y + 1) * pitch].swap_with_slice(&mut tail[..pitch]);
    }
}

/// Rotate the image by 180 degrees.
pub fn rotate_180(image: &mut Image<'_>) {
    let n = image.size();
    for i in 0..n / 2 {
        image.swap_pixels(i, n - 1 - i);
    }
}

/// Rotate the image by 90 degrees, clockwise or counterclockwise.
///
/// Square images rotate in place with no extra memory. Other shapes need
/// a temporary buffer of the image's size; it is reserved before anything
/// is modified.
///
/// # Errors
///
/// Returns [`TransformError::AllocationFailed`] if the temporary buffer
/// cannot be reserved. The image is unchanged in that case.
pub fn rotate_90(image: &mut Image<'_>, clockwise: bool) -> TransformResult<()> {
    if image.width() == image.height() {
        rotate_90_square(image, clockwise);
        return Ok(());
    }

    let (w, h) = (image.width() as usize, image.height() as usize);
    let bpp = image.format().bytes_per_pixel();
    let mut rotated = try_alloc_bytes(image.data_size()).map_err(|_| {
        log::debug!("rotate_90: no staging buffer for {}x{}", w, h);
        TransformError::AllocationFailed
    })?;

    // The rotated image is h pixels wide.
    let src = image.data();
    for y in 0..h {
        for x in 0..w {
            let (nx, ny) = if clockwise { (h - 1 - y, x) } else { (y, w - 1 - x) };
            let from = (y * w + x) * bpp;
            let to = (ny * h + nx) * bpp;
            rotated[to..to + bpp].copy_from_slice(&src[from..from + bpp]);
        }
    }

    image.data_mut().copy_from_slice(&rotated);
    image.swap_dimensions();
    Ok(())
}

/// Rotate a square image in place, one ring at a time.
fn rotate_90_square(image: &mut Image<'_>, clockwise: bool) {
    let n = image.width() as usize;
    let at = |x: usize, y: usize| y * n + x;
    for i in 0..n / 2 {
        for j in i..n - 1 - i {
            let top = at(j, i);
            let right = at(n - 1 - i, j);
            let bottom = at(n - 1 - j, n - 1 - i);
            let left = at(i, n - 1 - j);
            if clockwise {
                // top -> right -> bottom -> left -> top
                image.swap_pixels(top, right);
                image.swap_pixels(top, bottom);
                image.swap_pixels(top, left);
            } else {
                image.swap_pixels(top, left);
                image.swap_pixels(top, bottom);
                image.swap_pixels(top, right);
            }
        }
    }
}

/// Rotate by `quads` quarter turns clockwise.
///
/// # Errors
///
/// See [`rotate_90`].
pub fn rotate_orth(image: &mut Image<'_>, quads: u32) -> TransformResult<()> {
    match quads % 4 {
        1 => rotate_90(image, true),
        2 => {
            rotate_180(image);
            Ok(())
        }
        3 => rotate_90(image, false),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpx_core::{Color, PixelFormat};

    /// Image whose pixel (x, y) has red = x and green = y.
    fn coords(w: u32, h: u32, format: PixelFormat) -> Image<'static> {
        let mut img = Image::new(w, h, Color::BLACK, format).unwrap();
        img.map(|x, y, _| Color::rgb(x as u8, y as u8, 0));
        img
    }

    fn at(img: &Image<'_>, x: i32, y: i32) -> (u8, u8) {
        let c = img.get(x, y);
        (c.r, c.g)
    }

    #[test]
    fn test_flip_horizontal() {
        let mut img = coords(3, 2, PixelFormat::RgbU8);
        flip_horizontal(&mut img);
        assert_eq!(at(&img, 0, 0), (2, 0));
        assert_eq!(at(&img, 1, 1), (1, 1));
        assert_eq!(at(&img, 2, 1), (0, 1));
    }

    #[test]
    fn test_flip_vertical() {
        let mut img = coords(2, 3, PixelFormat::RgbaF16);
        flip_vertical(&mut img);
        assert_eq!(at(&img, 0, 0), (0, 2));
        assert_eq!(at(&img, 1, 1), (1, 1));
        assert_eq!(at(&img, 1, 2), (1, 0));
    }

    #[test]
    fn test_rotate_180() {
        let mut img = coords(3, 2, PixelFormat::RgbaU8);
        rotate_180(&mut img);
        assert_eq!(at(&img, 0, 0), (2, 1));
        assert_eq!(at(&img, 2, 1), (0, 0));
        assert_eq!(at(&img, 1, 0), (1, 1));
    }

    #[test]
    fn test_rotate_square_clockwise() {
        for n in [1u32, 2, 3, 4, 5] {
            let mut img = coords(n, n, PixelFormat::RgbaU8);
            rotate_90(&mut img, true).unwrap();
            for y in 0..n as i32 {
                for x in 0..n as i32 {
                    // new (x, y) came from old (y, n - 1 - x)
                    assert_eq!(at(&img, x, y), (y as u8, (n as i32 - 1 - x) as u8));
                }
            }
        }
    }

    #[test]
    fn test_rotate_square_counterclockwise() {
        let n = 4;
        let mut img = coords(n, n, PixelFormat::BgrU8);
        rotate_90(&mut img, false).unwrap();
        for y in 0..n as i32 {
            for x in 0..n as i32 {
                // new (x, y) came from old (n - 1 - y, x)
                assert_eq!(at(&img, x, y), ((n as i32 - 1 - y) as u8, x as u8));
            }
        }
    }

    #[test]
    fn test_rotate_non_square() {
        let mut img = coords(3, 2, PixelFormat::RgbaU8);
        rotate_90(&mut img, true).unwrap();
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(at(&img, 0, 0), (0, 1));
        assert_eq!(at(&img, 1, 0), (0, 0));
        assert_eq!(at(&img, 0, 2), (2, 1));

        let mut img = coords(3, 2, PixelFormat::RgbaU8);
        rotate_90(&mut img, false).unwrap();
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(at(&img, 0, 0), (2, 0));
        assert_eq!(at(&img, 1, 2), (0, 1));
    }

    #[test]
    fn test_rotate_borrowed() {
        let mut buf = vec![0u8; 4 * 3];
        let mut img = Image::from_borrowed(&mut buf, 4, 3, PixelFormat::LU8).unwrap();
        img.set(3, 0, Color::WHITE);
        rotate_90(&mut img, true).unwrap();
        assert_eq!(img.dimensions(), (3, 4));
        assert_eq!(img.get(2, 3), Color::WHITE);
    }

    #[test]
    fn test_four_quarter_turns_restore() {
        let original = coords(5, 3, PixelFormat::Rgb565);
        let mut img = original.copy().unwrap();
        for _ in 0..4 {
            rotate_orth(&mut img, 1).unwrap();
        }
        assert_eq!(img.data(), original.data());
        assert_eq!(img.dimensions(), (5, 3));

        rotate_orth(&mut img, 3).unwrap();
        rotate_90(&mut img, true).unwrap();
        assert_eq!(img.data(), original.data());

        rotate_orth(&mut img, 2).unwrap();
        rotate_180(&mut img);
        assert_eq!(img.data(), original.data());
    }
}
