//! Image - The pixel buffer
//!
//! An [`Image`] is a rectangular grid of pixels stored in one
//! [`PixelFormat`]. Every read and write goes through the pixel codec, so
//! callers always see canonical [`Color`] values.
//!
//! # Ownership model
//!
//! The raw region is either owned (`Vec<u8>`, freed with the image) or
//! borrowed from the caller (`&'a mut [u8]`, never freed by the image).
//! Borrowing lets an image present directly into foreign memory such as a
//! window surface. Images are move-only; [`Image::copy`] makes an explicit
//! deep copy.
//!
//! # Memory layout
//!
//! Rows are tightly packed: `pitch = width * bytes_per_pixel` and there is
//! no padding between rows.

mod access;

use crate::codec;
use crate::color::Color;
use crate::error::{Error, Result};
use crate::format::PixelFormat;

/// Backing storage of an [`Image`].
#[derive(Debug)]
enum Storage<'a> {
    Owned(Vec<u8>),
    Borrowed(&'a mut [u8]),
}

impl Storage<'_> {
    #[inline]
    fn as_slice(&self) -> &[u8] {
        match self {
            Storage::Owned(v) => v,
            Storage::Borrowed(s) => s,
        }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Storage::Owned(v) => v,
            Storage::Borrowed(s) => s,
        }
    }
}

/// Rectangular pixel buffer.
///
/// # Examples
///
/// ```
/// use bpx_core::{Color, Image, PixelFormat};
///
/// let mut img = Image::new(4, 4, Color::BLACK, PixelFormat::RgbaU8).unwrap();
/// img.set(1, 2, Color::RED);
/// assert_eq!(img.get(1, 2), Color::RED);
/// assert_eq!(img.get(9, 9), Color::BLANK);
/// ```
#[derive(Debug)]
pub struct Image<'a> {
    width: u32,
    height: u32,
    format: PixelFormat,
    storage: Storage<'a>,
}

/// Allocate a zeroed byte buffer, reporting allocation failure.
///
/// # Errors
///
/// Returns [`Error::AllocationFailed`] if the memory cannot be reserved.
pub fn try_alloc_bytes(len: usize) -> Result<Vec<u8>> {
    let mut data = try_reserve_bytes(len)?;
    data.resize(len, 0);
    Ok(data)
}

/// Create an empty vector with room for `len` bytes, reporting allocation
/// failure.
///
/// # Errors
///
/// Returns [`Error::AllocationFailed`] if the memory cannot be reserved.
pub fn try_reserve_bytes(len: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|e| {
        log::debug!("allocation of {} bytes failed: {}", len, e);
        Error::AllocationFailed
    })?;
    Ok(data)
}

/// Copy a byte slice into a new vector, reporting allocation failure.
///
/// # Errors
///
/// Returns [`Error::AllocationFailed`] if the memory cannot be reserved.
pub fn try_copy_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut data = try_reserve_bytes(bytes.len())?;
    data.extend_from_slice(bytes);
    Ok(data)
}

/// Number of bytes needed for an image, validating the dimensions.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] if a dimension is zero or the byte
/// count overflows `usize`.
pub fn required_bytes(width: u32, height: u32, format: PixelFormat) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(format.bytes_per_pixel()))
        .ok_or(Error::InvalidDimension { width, height })
}

impl Image<'static> {
    /// Create an owned image filled with one color.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    /// * `color` - Initial color of every pixel
    /// * `format` - Pixel format
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or
    /// [`Error::AllocationFailed`] if the buffer cannot be allocated.
    pub fn new(width: u32, height: u32, color: Color, format: PixelFormat) -> Result<Self> {
        let len = required_bytes(width, height, format)?;
        let mut data = try_alloc_bytes(len)?;

        if color != Color::BLANK {
            let bpp = format.bytes_per_pixel();
            let px = codec::encode_pixel(format, color);
            for chunk in data.chunks_exact_mut(bpp) {
                chunk.copy_from_slice(&px[..bpp]);
            }
        }

        Ok(Image {
            width,
            height,
            format,
            storage: Storage::Owned(data),
        })
    }

    /// Create an owned image by copying raw pixel bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions,
    /// [`Error::BufferSizeMismatch`] if `bytes` is not exactly one image
    /// long, or [`Error::AllocationFailed`].
    pub fn from_bytes(bytes: &[u8], width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        check_len(bytes.len(), width, height, format)?;
        let data = try_copy_bytes(bytes)?;
        Ok(Image {
            width,
            height,
            format,
            storage: Storage::Owned(data),
        })
    }

    /// Create an owned image that takes over an existing byte vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] or [`Error::BufferSizeMismatch`].
    pub fn from_vec(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        check_len(data.len(), width, height, format)?;
        Ok(Image {
            width,
            height,
            format,
            storage: Storage::Owned(data),
        })
    }
}

impl<'a> Image<'a> {
    /// Wrap a caller-owned byte region without copying it.
    ///
    /// The image reads and writes `bytes` in place and never frees it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] or [`Error::BufferSizeMismatch`].
    pub fn from_borrowed(
        bytes: &'a mut [u8],
        width: u32,
        height: u32,
        format: PixelFormat,
    ) -> Result<Self> {
        check_len(bytes.len(), width, height, format)?;
        Ok(Image {
            width,
            height,
            format,
            storage: Storage::Borrowed(bytes),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes per row.
    #[inline]
    pub fn pitch(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Total bytes of pixel data (`height * pitch`).
    #[inline]
    pub fn data_size(&self) -> usize {
        self.height as usize * self.pitch()
    }

    /// Pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Whether the image owns its pixel region.
    #[inline]
    pub fn is_owned(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    /// Raw pixel bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.storage.as_slice()
    }

    /// Raw pixel bytes, mutable.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.storage.as_mut_slice()
    }

    /// Bytes of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let pitch = self.pitch();
        let start = y as usize * pitch;
        &self.data()[start..start + pitch]
    }

    /// Bytes of row `y`, mutable.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let pitch = self.pitch();
        let start = y as usize * pitch;
        &mut self.data_mut()[start..start + pitch]
    }

    /// Make an owned deep copy of this image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if the copy cannot be allocated.
    pub fn copy(&self) -> Result<Image<'static>> {
        Image::from_bytes(self.data(), self.width, self.height, self.format)
    }

    /// Consume the image and return its bytes as an owned vector.
    ///
    /// Borrowed regions are copied; owned regions are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AllocationFailed`] if a borrowed region cannot be
    /// copied.
    pub fn into_vec(self) -> Result<Vec<u8>> {
        match self.storage {
            Storage::Owned(v) => Ok(v),
            Storage::Borrowed(s) => try_copy_bytes(s),
        }
    }

    /// Whether `(x, y)` lies inside the image.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Replace the dimensions while keeping the same byte region.
    ///
    /// Used by in-place operations that transpose the grid. The caller
    /// guarantees `width * height` is unchanged.
    pub fn swap_dimensions(&mut self) {
        std::mem::swap(&mut self.width, &mut self.height);
    }
}

fn check_len(actual: usize, width: u32, height: u32, format: PixelFormat) -> Result<usize> {
    let expected = required_bytes(width, height, format)?;
    if actual != expected {
        return Err(Error::BufferSizeMismatch { expected, actual });
    }
    Ok(expected)
}
