//! Image format detection
//!
//! Detects file formats by magic number, or by file extension when writing.
//! TGA has no magic number; it is recognised by extension only, and by a
//! plausible header when nothing else matches.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Supported file container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Tga,
}

impl ImageFormat {
    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tga => "tga",
        }
    }

    /// Format for a file extension, case-insensitive.
    pub fn from_extension(ext: &str) -> Option<ImageFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" | "jpe" => Some(ImageFormat::Jpeg),
            "bmp" | "dib" => Some(ImageFormat::Bmp),
            "tga" | "targa" => Some(ImageFormat::Tga),
            _ => None,
        }
    }

    /// Format named by the extension of `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<ImageFormat> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ImageFormat::from_extension)
    }
}

/// Magic numbers for image format detection
mod magic {
    /// BMP: "BM"
    pub const BMP: &[u8] = b"BM";

    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];
}

/// TGA image types this crate reads: uncompressed truecolor and gray.
const TGA_TYPES: [u8; 2] = [2, 3];

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut header = [0u8; 18];
    let bytes_read = file.read(&mut header)?;
    detect_format_from_bytes(&header[..bytes_read]).or_else(|e| {
        ImageFormat::from_path(path)
            .filter(|f| *f == ImageFormat::Tga)
            .ok_or(e)
    })
}

/// Detect image format from the leading bytes of a file
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }
    if data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }
    if data.starts_with(magic::BMP) {
        return Ok(ImageFormat::Bmp);
    }
    if looks_like_tga(data) {
        return Ok(ImageFormat::Tga);
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}

fn looks_like_tga(data: &[u8]) -> bool {
    if data.len() < 18 {
        return false;
    }
    let colormap_type = data[1];
    let image_type = data[2];
    let width = u16::from_le_bytes([data[12], data[13]]);
    let height = u16::from_le_bytes([data[14], data[15]]);
    let depth = data[16];
    colormap_type == 0
        && TGA_TYPES.contains(&image_type)
        && width > 0
        && height > 0
        && matches!(depth, 8 | 16 | 24 | 32)
}
