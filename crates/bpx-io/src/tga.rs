//! TGA image format support
//!
//! Uncompressed Truevision TGA: image type 2 (truecolor, 24 or 32 bit BGR)
//! and type 3 (gray, 8 bit or 16 bit with alpha). Files are written
//! top-down with the alpha depth recorded in the descriptor.

use crate::{DecodedImage, IoError, IoResult};
use bpx_core::image::try_reserve_bytes;
use std::io::{Read, Write};

const TGA_HEADER_SIZE: usize = 18;

const TYPE_TRUECOLOR: u8 = 2;
const TYPE_GRAY: u8 = 3;

/// Descriptor bit: rows are stored top to bottom
const DESC_TOP_DOWN: u8 = 0x20;
/// Descriptor bit: columns are stored right to left
const DESC_RIGHT_TO_LEFT: u8 = 0x10;

/// Read a TGA image
pub fn read_tga<R: Read>(mut reader: R) -> IoResult<DecodedImage> {
    let mut header = [0u8; TGA_HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let id_length = header[0] as usize;
    let colormap_type = header[1];
    let image_type = header[2];
    let width = u16::from_le_bytes([header[12], header[13]]) as u32;
    let height = u16::from_le_bytes([header[14], header[15]]) as u32;
    let depth = header[16];
    let descriptor = header[17];

    if colormap_type != 0 {
        return Err(IoError::UnsupportedFormat(
            "color-mapped TGA is not supported".to_string(),
        ));
    }
    let channels: u8 = match (image_type, depth) {
        (TYPE_GRAY, 8) => 1,
        (TYPE_GRAY, 16) => 2,
        (TYPE_TRUECOLOR, 24) => 3,
        (TYPE_TRUECOLOR, 32) => 4,
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported TGA image type {} at {} bits",
                image_type, depth
            )));
        }
    };
    if width == 0 || height == 0 {
        return Err(IoError::InvalidData("empty TGA image".to_string()));
    }

    let mut id = vec![0u8; id_length];
    reader.read_exact(&mut id)?;

    let pitch = width as usize * channels as usize;
    let len = pitch * height as usize;
    let mut data = try_reserve_bytes(len)?;
    reader.by_ref().take(len as u64).read_to_end(&mut data)?;
    if data.len() != len {
        return Err(IoError::InvalidData(format!(
            "truncated TGA pixel data: {} of {} bytes",
            data.len(),
            len
        )));
    }

    if channels >= 3 {
        for px in data.chunks_exact_mut(channels as usize) {
            px.swap(0, 2);
        }
    }

    let mut image = DecodedImage::new(data, width, height, channels)?;
    if descriptor & DESC_TOP_DOWN == 0 {
        image.flip_vertically();
    }
    if descriptor & DESC_RIGHT_TO_LEFT != 0 {
        let c = channels as usize;
        for row in image.data.chunks_exact_mut(pitch) {
            for x in 0..width as usize / 2 {
                let mirror = width as usize - 1 - x;
                for k in 0..c {
                    row.swap(x * c + k, mirror * c + k);
                }
            }
        }
    }
    Ok(image)
}

/// Write a TGA image
pub fn write_tga<W: Write>(image: &DecodedImage, mut writer: W) -> IoResult<()> {
    let too_large = || {
        IoError::EncodeError(format!(
            "TGA cannot store {}x{} images",
            image.width, image.height
        ))
    };
    let width = u16::try_from(image.width).map_err(|_| too_large())?;
    let height = u16::try_from(image.height).map_err(|_| too_large())?;

    let (image_type, depth, alpha_bits) = match image.channels {
        1 => (TYPE_GRAY, 8u8, 0u8),
        2 => (TYPE_GRAY, 16, 8),
        3 => (TYPE_TRUECOLOR, 24, 0),
        4 => (TYPE_TRUECOLOR, 32, 8),
        n => return Err(IoError::UnsupportedChannels(n)),
    };

    let mut header = [0u8; TGA_HEADER_SIZE];
    header[2] = image_type;
    header[12..14].copy_from_slice(&width.to_le_bytes());
    header[14..16].copy_from_slice(&height.to_le_bytes());
    header[16] = depth;
    header[17] = DESC_TOP_DOWN | alpha_bits;
    writer.write_all(&header)?;

    if image.channels >= 3 {
        let c = image.channels as usize;
        let mut row = vec![0u8; image.pitch()];
        for src in image.data.chunks_exact(image.pitch()) {
            row.copy_from_slice(src);
            for px in row.chunks_exact_mut(c) {
                px.swap(0, 2);
            }
            writer.write_all(&row)?;
        }
    } else {
        writer.write_all(&image.data)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn roundtrip(image: &DecodedImage) -> DecodedImage {
        let mut buffer = Vec::new();
        write_tga(image, &mut buffer).unwrap();
        read_tga(Cursor::new(buffer)).unwrap()
    }

    #[test]
    fn test_tga_roundtrip_all_channels() {
        for channels in 1..=4u8 {
            let len = 3 * 2 * channels as usize;
            let data = (0..len).map(|i| (i * 13) as u8).collect();
            let image = DecodedImage::new(data, 3, 2, channels).unwrap();
            assert_eq!(roundtrip(&image), image);
        }
    }

    #[test]
    fn test_tga_bottom_up() {
        // 1x2 gray, bottom-up: first stored row is the bottom one
        let mut file = vec![0u8; TGA_HEADER_SIZE];
        file[2] = TYPE_GRAY;
        file[12] = 1;
        file[14] = 2;
        file[16] = 8;
        file.extend_from_slice(&[10, 20]);
        let image = read_tga(Cursor::new(file)).unwrap();
        assert_eq!(image.data, vec![20, 10]);
    }

    #[test]
    fn test_tga_right_to_left() {
        let mut file = vec![0u8; TGA_HEADER_SIZE];
        file[2] = TYPE_TRUECOLOR;
        file[12] = 2;
        file[14] = 1;
        file[16] = 24;
        file[17] = DESC_TOP_DOWN | DESC_RIGHT_TO_LEFT;
        file.extend_from_slice(&[3, 2, 1, 6, 5, 4]);
        let image = read_tga(Cursor::new(file)).unwrap();
        assert_eq!(image.data, vec![4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_tga_large_header_truncated_data() {
        // 65535x65535 RGBA declares ~17 GB of pixels but carries four bytes
        let mut file = vec![0u8; TGA_HEADER_SIZE];
        file[2] = TYPE_TRUECOLOR;
        file[12..14].copy_from_slice(&u16::MAX.to_le_bytes());
        file[14..16].copy_from_slice(&u16::MAX.to_le_bytes());
        file[16] = 32;
        file.extend_from_slice(&[1, 2, 3, 4]);
        assert!(matches!(
            read_tga(Cursor::new(file)),
            Err(IoError::InvalidData(_)) | Err(IoError::Core(_))
        ));
    }

    #[test]
    fn test_tga_rejects_colormap_and_rle() {
        let mut file = vec![0u8; TGA_HEADER_SIZE + 4];
        file[1] = 1;
        assert!(read_tga(Cursor::new(file.clone())).is_err());
        file[1] = 0;
        file[2] = 10;
        file[16] = 24;
        assert!(matches!(
            read_tga(Cursor::new(file)),
            Err(IoError::UnsupportedFormat(_))
        ));
    }
}
