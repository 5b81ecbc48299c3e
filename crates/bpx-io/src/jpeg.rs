//! JPEG image format support
//!
//! Reads with the `jpeg-decoder` crate and writes baseline JPEG with the
//! `jpeg-encoder` crate.
//!
//! - Grayscale decodes to 1 channel, color to 3 channels
//! - 16-bit grayscale keeps the high byte of each sample
//! - CMYK is folded to RGB
//! - Alpha is dropped on write, since JPEG cannot store it

use crate::{DecodedImage, IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat as JpegPixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use std::io::{Read, Write};

/// Read a JPEG image from a reader positioned at the SOI marker.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<DecodedImage> {
    let mut decoder = Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;
    let (width, height) = (info.width as u32, info.height as u32);

    let (data, channels) = match info.pixel_format {
        JpegPixelFormat::L8 => (pixels, 1),
        JpegPixelFormat::RGB24 => (pixels, 3),
        JpegPixelFormat::L16 => {
            // big-endian samples
            (pixels.chunks_exact(2).map(|s| s[0]).collect(), 1)
        }
        JpegPixelFormat::CMYK32 => {
            log::warn!("read_jpeg: folding CMYK to RGB");
            let rgb = pixels
                .chunks_exact(4)
                .flat_map(|p| {
                    let k = 255 - p[3] as u32;
                    let fold = |c: u8| ((255 - c as u32) * k / 255) as u8;
                    [fold(p[0]), fold(p[1]), fold(p[2])]
                })
                .collect();
            (rgb, 3)
        }
    };

    DecodedImage::new(data, width, height, channels)
}

/// Write a JPEG image at `quality` (clamped to `1..=100`).
pub fn write_jpeg<W: Write>(image: &DecodedImage, writer: W, quality: u8) -> IoResult<()> {
    let too_large = || {
        IoError::EncodeError(format!(
            "JPEG cannot store {}x{} images",
            image.width, image.height
        ))
    };
    let width = u16::try_from(image.width).map_err(|_| too_large())?;
    let height = u16::try_from(image.height).map_err(|_| too_large())?;

    let gray;
    let (data, color_type) = match image.channels {
        1 => (&image.data[..], ColorType::Luma),
        2 => {
            log::debug!("write_jpeg: dropping alpha from gray image");
            gray = image.data.chunks_exact(2).map(|p| p[0]).collect::<Vec<u8>>();
            (&gray[..], ColorType::Luma)
        }
        3 => (&image.data[..], ColorType::Rgb),
        4 => (&image.data[..], ColorType::Rgba),
        n => return Err(IoError::UnsupportedChannels(n)),
    };

    let encoder = Encoder::new(writer, quality.clamp(1, 100));
    encoder
        .encode(data, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}
