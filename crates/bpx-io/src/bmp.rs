//! BMP image format support
//!
//! Reads and writes uncompressed Windows Bitmap (BMP) files.
//!
//! | Channels | Written as |
//! |---|---|
//! | 1 | 8-bit with a gray palette |
//! | 2 | 32-bit BGRA, gray expanded |
//! | 3 | 24-bit BGR |
//! | 4 | 32-bit BGRA |
//!
//! On read, an 8-bit file whose palette is entirely gray decodes to one
//! channel; any other palette expands to RGB.

use crate::{DecodedImage, IoError, IoResult};
use bpx_core::image::try_alloc_bytes;
use std::io::{Read, Write};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

/// BI_RGB and BI_BITFIELDS
const BMP_UNCOMPRESSED: [u32; 2] = [0, 3];

fn le_u32(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

fn le_i32(b: &[u8]) -> i32 {
    i32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

/// Rows are padded to a multiple of 4 bytes.
fn row_stride(width: u32, bits_per_pixel: u16) -> Option<usize> {
    (width as usize)
        .checked_mul(bits_per_pixel as usize)
        .map(|bits| bits.div_ceil(32))
        .and_then(|words| words.checked_mul(4))
}

fn skip<R: Read>(reader: &mut R, count: usize) -> IoResult<()> {
    let copied = std::io::copy(&mut reader.take(count as u64), &mut std::io::sink())?;
    if copied != count as u64 {
        return Err(IoError::InvalidData("truncated BMP header".to_string()));
    }
    Ok(())
}

/// Read a BMP image
pub fn read_bmp<R: Read>(mut reader: R) -> IoResult<DecodedImage> {
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }
    let pixel_offset = le_u32(&file_header[10..14]) as usize;

    let mut info_header = [0u8; BMP_INFO_HEADER_SIZE as usize];
    reader.read_exact(&mut info_header)?;

    let header_size = le_u32(&info_header[0..4]);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = le_i32(&info_header[4..8]);
    let height = le_i32(&info_header[8..12]);
    let planes = u16::from_le_bytes([info_header[12], info_header[13]]);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }
    let bits_per_pixel = u16::from_le_bytes([info_header[14], info_header[15]]);
    let compression = le_u32(&info_header[16..20]);
    if !BMP_UNCOMPRESSED.contains(&compression) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }
    let colors_used = le_u32(&info_header[32..36]) as usize;

    if width <= 0 || height == 0 {
        return Err(IoError::InvalidData(format!(
            "invalid BMP dimensions: {}x{}",
            width, height
        )));
    }
    let width = width.unsigned_abs();
    let top_down = height < 0;
    let height = height.unsigned_abs();

    skip(&mut reader, header_size as usize - BMP_INFO_HEADER_SIZE as usize)?;
    let mut consumed = BMP_FILE_HEADER_SIZE + header_size as usize;

    // (palette as RGB triples, whether every entry is gray)
    let palette = match bits_per_pixel {
        8 => {
            let num_colors = if colors_used == 0 || colors_used > 256 {
                256
            } else {
                colors_used
            };
            let mut raw = vec![0u8; num_colors * 4];
            reader.read_exact(&mut raw)?;
            consumed += raw.len();
            let mut rgb = [[0u8; 3]; 256];
            for (entry, bgra) in rgb.iter_mut().zip(raw.chunks_exact(4)) {
                *entry = [bgra[2], bgra[1], bgra[0]];
            }
            let gray = rgb.iter().all(|c| c[0] == c[1] && c[1] == c[2]);
            Some((rgb, gray))
        }
        24 | 32 => None,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported BMP bit depth: {}",
                bits_per_pixel
            )));
        }
    };

    if pixel_offset > consumed {
        skip(&mut reader, pixel_offset - consumed)?;
    }

    let channels: u8 = match (bits_per_pixel, &palette) {
        (8, Some((_, true))) => 1,
        (8, _) | (24, _) => 3,
        _ => 4,
    };
    let too_large = || {
        IoError::InvalidData(format!(
            "BMP dimensions too large: {}x{}",
            width, height
        ))
    };
    let pitch = (width as usize).checked_mul(channels as usize).ok_or_else(too_large)?;
    let data_len = pitch.checked_mul(height as usize).ok_or_else(too_large)?;
    let stride = row_stride(width, bits_per_pixel).ok_or_else(too_large)?;
    let mut data = try_alloc_bytes(data_len)?;
    let mut row_buffer = try_alloc_bytes(stride)?;

    for row in 0..height as usize {
        reader.read_exact(&mut row_buffer)?;

        let y = if top_down { row } else { height as usize - 1 - row };
        let out = &mut data[y * pitch..(y + 1) * pitch];

        match (bits_per_pixel, &palette) {
            (8, Some((rgb, gray))) => {
                for (x, &index) in row_buffer[..width as usize].iter().enumerate() {
                    let c = rgb[index as usize];
                    if *gray {
                        out[x] = c[0];
                    } else {
                        out[x * 3..x * 3 + 3].copy_from_slice(&c);
                    }
                }
            }
            (24, _) => {
                for (dst, bgr) in out.chunks_exact_mut(3).zip(row_buffer.chunks_exact(3)) {
                    dst.copy_from_slice(&[bgr[2], bgr[1], bgr[0]]);
                }
            }
            _ => {
                for (dst, bgra) in out.chunks_exact_mut(4).zip(row_buffer.chunks_exact(4)) {
                    dst.copy_from_slice(&[bgra[2], bgra[1], bgra[0], bgra[3]]);
                }
            }
        }
    }

    DecodedImage::new(data, width, height, channels)
}

/// Write a BMP image
pub fn write_bmp<W: Write>(image: &DecodedImage, mut writer: W) -> IoResult<()> {
    let width = image.width;
    let height = image.height;

    let bits_per_pixel: u16 = match image.channels {
        1 => 8,
        3 => 24,
        2 | 4 => 32,
        n => return Err(IoError::UnsupportedChannels(n)),
    };
    let has_palette = bits_per_pixel == 8;

    let stride = row_stride(width, bits_per_pixel)
        .ok_or_else(|| IoError::EncodeError("image too large for BMP".to_string()))?;
    let pixel_data_size = stride * height as usize;
    let palette_size = if has_palette { 256 * 4 } else { 0 };
    let pixel_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize + palette_size;
    let file_size = u32::try_from(pixel_offset + pixel_data_size)
        .map_err(|_| IoError::EncodeError("image too large for BMP".to_string()))?;

    let mut header = Vec::with_capacity(pixel_offset);
    // File header
    header.extend_from_slice(b"BM");
    header.extend_from_slice(&file_size.to_le_bytes());
    header.extend_from_slice(&[0u8; 4]);
    header.extend_from_slice(&(pixel_offset as u32).to_le_bytes());
    // Info header, bottom-up
    header.extend_from_slice(&BMP_INFO_HEADER_SIZE.to_le_bytes());
    header.extend_from_slice(&(width as i32).to_le_bytes());
    header.extend_from_slice(&(height as i32).to_le_bytes());
    header.extend_from_slice(&1u16.to_le_bytes());
    header.extend_from_slice(&bits_per_pixel.to_le_bytes());
    header.extend_from_slice(&0u32.to_le_bytes());
    header.extend_from_slice(&(pixel_data_size as u32).to_le_bytes());
    header.extend_from_slice(&[0u8; 16]);
    if has_palette {
        for i in 0..=255u8 {
            header.extend_from_slice(&[i, i, i, 0]);
        }
    }
    writer.write_all(&header)?;

    let pitch = image.pitch();
    let mut row_buffer = vec![0u8; stride];

    for row in 0..height as usize {
        let y = height as usize - 1 - row;
        let src = &image.data[y * pitch..(y + 1) * pitch];

        match image.channels {
            1 => row_buffer[..pitch].copy_from_slice(src),
            2 => {
                for (dst, la) in row_buffer.chunks_exact_mut(4).zip(src.chunks_exact(2)) {
                    dst.copy_from_slice(&[la[0], la[0], la[0], la[1]]);
                }
            }
            3 => {
                for (dst, rgb) in row_buffer.chunks_exact_mut(3).zip(src.chunks_exact(3)) {
                    dst.copy_from_slice(&[rgb[2], rgb[1], rgb[0]]);
                }
            }
            _ => {
                for (dst, rgba) in row_buffer.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
                    dst.copy_from_slice(&[rgba[2], rgba[1], rgba[0], rgba[3]]);
                }
            }
        }

        writer.write_all(&row_buffer)?;
    }

    Ok(())
}
