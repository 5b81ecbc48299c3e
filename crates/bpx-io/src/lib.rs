//! bpx-io - Image file reading and writing for bpx
//!
//! File codecs exchange a flat, interleaved 8-bit buffer ([`DecodedImage`])
//! with the core. Channel counts 1 to 4 map onto the pixel formats
//! `L_U8`, `LA_U8`, `RGB_U8` and `RGBA_U8`.
//!
//! # Supported formats
//!
//! | Format | Read | Write | Feature |
//! |---|---|---|---|
//! | PNG | yes | yes | `png-format` |
//! | JPEG | yes | yes | `jpeg` |
//! | BMP | 8-bit paletted, 24 and 32 bit | 8, 24 and 32 bit | `bmp` |
//! | TGA | uncompressed gray and truecolor | same | `tga` |
//!
//! All features are enabled by default. A disabled format reports
//! [`IoError::UnsupportedFormat`].
//!
//! # Example
//!
//! ```no_run
//! use bpx_core::{Color, Image, PixelFormat};
//! use bpx_io::{ImageFormat, ReadOptions, WriteOptions, read_image, write_image};
//!
//! let img = Image::new(16, 16, Color::SKYBLUE, PixelFormat::RgbU8).unwrap();
//! write_image(&img, "/tmp/sky.png", ImageFormat::Png, WriteOptions::default()).unwrap();
//! let back = read_image("/tmp/sky.png", ReadOptions::default()).unwrap();
//! assert_eq!(back.get(3, 3), Color::SKYBLUE);
//! ```

#[cfg(feature = "bmp")]
pub mod bmp;
mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "tga")]
pub mod tga;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use bpx_core::image::try_copy_bytes;
use bpx_core::{Image, PixelFormat};
use std::fs;
use std::path::Path;

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// An 8-bit interleaved image as produced and consumed by the file codecs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// `width * height * channels` samples, rows top to bottom
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// 1 = gray, 2 = gray + alpha, 3 = RGB, 4 = RGBA
    pub channels: u8,
}

impl DecodedImage {
    /// Wrap a sample buffer, checking its shape.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedChannels`] for a channel count outside
    /// `1..=4` and [`IoError::InvalidData`] for empty dimensions or a
    /// buffer of the wrong length.
    pub fn new(data: Vec<u8>, width: u32, height: u32, channels: u8) -> IoResult<Self> {
        if !(1..=4).contains(&channels) {
            return Err(IoError::UnsupportedChannels(channels));
        }
        if width == 0 || height == 0 {
            return Err(IoError::InvalidData(format!(
                "empty image: {}x{}",
                width, height
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(channels as usize));
        if expected != Some(data.len()) {
            return Err(IoError::InvalidData(format!(
                "{}x{}x{} image with {} bytes",
                width,
                height,
                channels,
                data.len()
            )));
        }
        Ok(DecodedImage {
            data,
            width,
            height,
            channels,
        })
    }

    /// Copy the samples out of an 8-bit image.
    ///
    /// `BGR_U8` and `BGRA_U8` are swizzled to RGB order.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFormat`] for packed, float and
    /// half-float formats; convert those first.
    pub fn from_image(image: &Image<'_>) -> IoResult<Self> {
        let format = image.format();
        let swizzle = match format {
            PixelFormat::LU8 | PixelFormat::LaU8 | PixelFormat::RgbU8 | PixelFormat::RgbaU8 => false,
            PixelFormat::BgrU8 | PixelFormat::BgraU8 => true,
            _ => {
                return Err(IoError::UnsupportedFormat(format!(
                    "cannot write {} images; convert to an 8-bit format first",
                    format.name()
                )));
            }
        };

        let mut data = try_copy_bytes(image.data())?;
        let channels = format.channel_count();
        if swizzle {
            for px in data.chunks_exact_mut(channels as usize) {
                px.swap(0, 2);
            }
        }
        Ok(DecodedImage {
            data,
            width: image.width(),
            height: image.height(),
            channels,
        })
    }

    /// Convert into an owned image of the matching 8-bit format.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedChannels`] if the channel count has no
    /// pixel format, or a core error if the buffer does not fit.
    pub fn into_image(self) -> IoResult<Image<'static>> {
        let format = PixelFormat::from_channels_u8(self.channels)
            .ok_or(IoError::UnsupportedChannels(self.channels))?;
        Ok(Image::from_vec(self.data, self.width, self.height, format)?)
    }

    /// Bytes per row.
    pub fn pitch(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Reverse the row order.
    pub fn flip_vertically(&mut self) {
        let pitch = self.pitch();
        let h = self.height as usize;
        for y in 0..h / 2 {
            let (head, tail) = self.data.split_at_mut((h - 1 - y) * pitch);
            head[y * pitch..(y + 1) * pitch].swap_with_slice(&mut tail[..pitch]);
        }
    }
}

/// Options for reading images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadOptions {
    /// Store the rows bottom to top
    pub flip_vertically: bool,
}

/// Options for writing images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// JPEG quality, clamped to `1..=100`; ignored by lossless formats
    pub quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

fn disabled(format: ImageFormat) -> IoError {
    IoError::UnsupportedFormat(format!(
        "{:?} support is not enabled in this build",
        format
    ))
}

/// Decode an in-memory file of the given format.
pub fn decode_mem_as(data: &[u8], format: ImageFormat) -> IoResult<DecodedImage> {
    #[allow(unused_imports)]
    use std::io::Cursor;

    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(Cursor::new(data)),
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(Cursor::new(data)),
        #[cfg(feature = "tga")]
        ImageFormat::Tga => tga::read_tga(Cursor::new(data)),
        #[allow(unreachable_patterns)]
        other => Err(disabled(other)),
    }
}

/// Decode an in-memory file, detecting its format from the magic number.
pub fn decode_mem(data: &[u8]) -> IoResult<DecodedImage> {
    decode_mem_as(data, detect_format_from_bytes(data)?)
}

/// Decode an image file.
///
/// The format comes from the file's magic number; a `.tga` extension is
/// trusted when the header is not recognised.
pub fn decode_file<P: AsRef<Path>>(path: P) -> IoResult<DecodedImage> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let format = detect_format_from_bytes(&data).or_else(|e| {
        ImageFormat::from_path(path)
            .filter(|f| *f == ImageFormat::Tga)
            .ok_or(e)
    })?;
    log::debug!("decode_file: {} as {:?}", path.display(), format);
    decode_mem_as(&data, format)
}

/// Encode an image into an in-memory file.
///
/// `quality` only affects JPEG.
#[cfg_attr(not(feature = "jpeg"), allow(unused_variables))]
pub fn encode_mem(image: &DecodedImage, format: ImageFormat, quality: u8) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(image, &mut out)?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(image, &mut out, quality)?,
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::write_bmp(image, &mut out)?,
        #[cfg(feature = "tga")]
        ImageFormat::Tga => tga::write_tga(image, &mut out)?,
        #[allow(unreachable_patterns)]
        other => return Err(disabled(other)),
    }
    Ok(out)
}

/// Encode an image file; the format comes from the path's extension.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for an unknown extension.
pub fn encode_file<P: AsRef<Path>>(path: P, image: &DecodedImage, quality: u8) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).ok_or_else(|| {
        IoError::UnsupportedFormat(format!("no image format for {}", path.display()))
    })?;
    write_encoded(path, image, format, quality)
}

fn write_encoded(path: &Path, image: &DecodedImage, format: ImageFormat, quality: u8) -> IoResult<()> {
    let bytes = encode_mem(image, format, quality)?;
    log::debug!(
        "write: {} ({:?}, {}x{}x{}, {} bytes)",
        path.display(),
        format,
        image.width,
        image.height,
        image.channels,
        bytes.len()
    );
    fs::write(path, bytes)?;
    Ok(())
}

/// Read an image file into an owned [`Image`].
pub fn read_image<P: AsRef<Path>>(path: P, options: ReadOptions) -> IoResult<Image<'static>> {
    let mut decoded = decode_file(path)?;
    if options.flip_vertically {
        decoded.flip_vertically();
    }
    decoded.into_image()
}

/// Decode an in-memory file into an owned [`Image`].
pub fn read_image_mem(data: &[u8], options: ReadOptions) -> IoResult<Image<'static>> {
    let mut decoded = decode_mem(data)?;
    if options.flip_vertically {
        decoded.flip_vertically();
    }
    decoded.into_image()
}

/// Write an 8-bit image to a file.
///
/// # Errors
///
/// See [`DecodedImage::from_image`] for the accepted pixel formats.
pub fn write_image<P: AsRef<Path>>(
    image: &Image<'_>,
    path: P,
    format: ImageFormat,
    options: WriteOptions,
) -> IoResult<()> {
    let decoded = DecodedImage::from_image(image)?;
    write_encoded(path.as_ref(), &decoded, format, options.quality)
}

/// Encode an 8-bit image into an in-memory file.
pub fn write_image_mem(
    image: &Image<'_>,
    format: ImageFormat,
    options: WriteOptions,
) -> IoResult<Vec<u8>> {
    let decoded = DecodedImage::from_image(image)?;
    encode_mem(&decoded, format, options.quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bpx_core::Color;

    #[test]
    fn test_decoded_image_shape() {
        assert!(DecodedImage::new(vec![0; 12], 2, 2, 3).is_ok());
        assert!(matches!(
            DecodedImage::new(vec![0; 10], 2, 1, 5),
            Err(IoError::UnsupportedChannels(5))
        ));
        assert!(DecodedImage::new(vec![0; 11], 2, 2, 3).is_err());
        assert!(DecodedImage::new(Vec::new(), 0, 2, 3).is_err());
    }

    #[test]
    fn test_from_image_swizzles_bgr() {
        let img = Image::new(2, 1, Color::new(1, 2, 3, 4), PixelFormat::BgraU8).unwrap();
        let decoded = DecodedImage::from_image(&img).unwrap();
        assert_eq!(decoded.channels, 4);
        assert_eq!(decoded.data, vec![1, 2, 3, 4, 1, 2, 3, 4]);

        let back = decoded.into_image().unwrap();
        assert_eq!(back.format(), PixelFormat::RgbaU8);
        assert_eq!(back.get(1, 0), Color::new(1, 2, 3, 4));
    }

    #[test]
    fn test_from_image_rejects_wide_formats() {
        for format in [PixelFormat::Rgb565, PixelFormat::LF16, PixelFormat::RgbaF32] {
            let img = Image::new(1, 1, Color::RED, format).unwrap();
            assert!(matches!(
                DecodedImage::from_image(&img),
                Err(IoError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn test_flip_vertically() {
        let mut decoded = DecodedImage::new(vec![1, 1, 2, 2, 3, 3], 1, 3, 2).unwrap();
        decoded.flip_vertically();
        assert_eq!(decoded.data, vec![3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn test_write_options_default() {
        assert_eq!(WriteOptions::default().quality, 90);
        assert!(!ReadOptions::default().flip_vertically);
    }

    #[test]
    fn test_encode_file_needs_extension() {
        let decoded = DecodedImage::new(vec![0; 3], 1, 1, 3).unwrap();
        assert!(matches!(
            encode_file("/tmp/bpx-io-no-extension", &decoded, 90),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
