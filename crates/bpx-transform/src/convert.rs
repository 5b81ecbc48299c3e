//! Pixel format conversion

use crate::error::TransformResult;
use bpx_core::image::{required_bytes, try_alloc_bytes};
use bpx_core::{Image, PixelFormat, codec};

/// Re-encode every pixel of `image` into a new buffer of `format`.
///
/// Each pixel is decoded to a [`bpx_core::Color`] and encoded again, so the
/// conversion loses whatever the target layout cannot store. Converting to
/// the same format yields an exact copy.
///
/// # Errors
///
/// Returns a core error if the destination cannot be allocated.
pub fn convert(image: &Image<'_>, format: PixelFormat) -> TransformResult<Image<'static>> {
    if format == image.format() {
        return Ok(image.copy()?);
    }

    log::debug!(
        "convert: {}x{} {} -> {}",
        image.width(),
        image.height(),
        image.format().name(),
        format.name()
    );

    let src_bpp = image.format().bytes_per_pixel();
    let dst_bpp = format.bytes_per_pixel();
    let mut data = try_alloc_bytes(required_bytes(image.width(), image.height(), format)?)?;

    for (src, dst) in image
        .data()
        .chunks_exact(src_bpp)
        .zip(data.chunks_exact_mut(dst_bpp))
    {
        codec::encode(format, dst, codec::decode(image.format(), src));
    }

    Ok(Image::from_vec(data, image.width(), image.height(), format)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpx_core::Color;

    #[test]
    fn test_convert_rgba_to_bgr() {
        let img = Image::new(3, 2, Color::new(10, 20, 30, 40), PixelFormat::RgbaU8).unwrap();
        let out = convert(&img, PixelFormat::BgrU8).unwrap();
        assert_eq!(out.format(), PixelFormat::BgrU8);
        assert_eq!(out.data_size(), 18);
        assert_eq!(&out.data()[..3], &[30, 20, 10]);
        assert_eq!(out.get(2, 1), Color::new(10, 20, 30, 255));
    }

    #[test]
    fn test_convert_same_format_copies() {
        let mut img = Image::new(2, 2, Color::RED, PixelFormat::Rgba4444).unwrap();
        img.set(1, 1, Color::GREEN);
        let out = convert(&img, PixelFormat::Rgba4444).unwrap();
        assert_eq!(out.data(), img.data());
        assert!(out.is_owned());
    }

    #[test]
    fn test_convert_float_round_trip() {
        let mut img = Image::new(4, 1, Color::BLANK, PixelFormat::RgbaU8).unwrap();
        img.map(|x, _, _| Color::new(x as u8 * 60, 255 - x as u8 * 60, 7, 200));
        let float = convert(&img, PixelFormat::BgraF32).unwrap();
        let back = convert(&float, PixelFormat::RgbaU8).unwrap();
        assert_eq!(back.data(), img.data());
    }

    #[test]
    fn test_convert_to_luminance() {
        let img = Image::new(1, 1, Color::new(100, 100, 100, 255), PixelFormat::RgbU8).unwrap();
        let out = convert(&img, PixelFormat::LU8).unwrap();
        assert_eq!(out.data(), &[100]);
    }
}
