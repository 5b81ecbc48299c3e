//! PNG image format support
//!
//! Palettes, low bit depths and `tRNS` chunks are expanded and 16-bit
//! samples are stripped to 8 bits, so every PNG decodes to one of the four
//! 8-bit channel layouts.

use crate::{DecodedImage, IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

fn channels_of(color_type: ColorType) -> IoResult<u8> {
    match color_type {
        ColorType::Grayscale => Ok(1),
        ColorType::GrayscaleAlpha => Ok(2),
        ColorType::Rgb => Ok(3),
        ColorType::Rgba => Ok(4),
        ColorType::Indexed => Err(IoError::DecodeError(
            "indexed PNG was not expanded".to_string(),
        )),
    }
}

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<DecodedImage> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::DecodeError(format!(
            "unexpected PNG output depth: {:?}",
            output_info.bit_depth
        )));
    }
    let channels = channels_of(output_info.color_type)?;
    let (width, height) = (output_info.width, output_info.height);

    // Rows may carry padding beyond width * channels.
    let pitch = width as usize * channels as usize;
    let line_size = output_info.line_size;
    let data = if line_size == pitch {
        buf.truncate(pitch * height as usize);
        buf
    } else {
        let mut packed = Vec::with_capacity(pitch * height as usize);
        for row in buf.chunks(line_size).take(height as usize) {
            packed.extend_from_slice(&row[..pitch]);
        }
        packed
    };

    DecodedImage::new(data, width, height, channels)
}

/// Write a PNG image
pub fn write_png<W: Write>(image: &DecodedImage, writer: W) -> IoResult<()> {
    let color_type = match image.channels {
        1 => ColorType::Grayscale,
        2 => ColorType::GrayscaleAlpha,
        3 => ColorType::Rgb,
        4 => ColorType::Rgba,
        n => return Err(IoError::UnsupportedChannels(n)),
    };

    let mut encoder = Encoder::new(writer, image.width, image.height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(&image.data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
