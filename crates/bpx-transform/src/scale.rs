//! Image resampling
//!
//! [`resize`] hands the raw interleaved samples of an image to a
//! [`Resampler`] and wraps the result in a new image of the same format.
//! Only layouts with one whole byte or one `f32` per channel can be
//! resampled; packed and binary16 layouts must be converted first.
//!
//! | Encoding | Formats |
//! |---|---|
//! | u8 | `L_U8`, `LA_U8`, `RGB_U8`, `BGR_U8`, `RGBA_U8`, `BGRA_U8` |
//! | f32 | `L_F32`, `LA_F32`, `RGB_F32`, `BGR_F32`, `RGBA_F32`, `BGRA_F32` |

use crate::error::{TransformError, TransformResult};
use bpx_core::image::{required_bytes, try_alloc_bytes};
use bpx_core::{ChannelEncoding, Image};

/// Resampling of flat, interleaved sample buffers.
///
/// `src` holds `src_size.0 * src_size.1 * channels` samples and `dst`
/// holds `dst_size.0 * dst_size.1 * channels`; the caller allocates both.
pub trait Resampler {
    /// Resample 8-bit samples.
    fn resample_u8(
        &self,
        src: &[u8],
        src_size: (u32, u32),
        dst: &mut [u8],
        dst_size: (u32, u32),
        channels: usize,
    );

    /// Resample `f32` samples.
    fn resample_f32(
        &self,
        src: &[f32],
        src_size: (u32, u32),
        dst: &mut [f32],
        dst_size: (u32, u32),
        channels: usize,
    );
}

/// Bilinear interpolation with pixel centres aligned between the grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearResampler;

/// Source sample positions for one axis: lower index, upper index and
/// the weight of the upper one.
fn axis_taps(src: u32, dst: u32) -> Vec<(usize, usize, f32)> {
    let scale = src as f32 / dst as f32;
    let last = (src - 1) as f32;
    (0..dst)
        .map(|d| {
            let s = ((d as f32 + 0.5) * scale - 0.5).clamp(0.0, last);
            let lo = s.floor();
            let hi = (lo + 1.0).min(last);
            (lo as usize, hi as usize, s - lo)
        })
        .collect()
}

fn bilinear<T: Copy>(
    src: &[T],
    src_size: (u32, u32),
    dst: &mut [T],
    dst_size: (u32, u32),
    channels: usize,
    load: impl Fn(T) -> f32,
    store: impl Fn(f32) -> T,
) {
    let xs = axis_taps(src_size.0, dst_size.0);
    let ys = axis_taps(src_size.1, dst_size.1);
    let src_pitch = src_size.0 as usize * channels;
    let dst_pitch = dst_size.0 as usize * channels;

    for (dy, &(y0, y1, fy)) in ys.iter().enumerate() {
        let row0 = &src[y0 * src_pitch..(y0 + 1) * src_pitch];
        let row1 = &src[y1 * src_pitch..(y1 + 1) * src_pitch];
        let out = &mut dst[dy * dst_pitch..(dy + 1) * dst_pitch];
        for (dx, &(x0, x1, fx)) in xs.iter().enumerate() {
            for c in 0..channels {
                let a = load(row0[x0 * channels + c]);
                let b = load(row0[x1 * channels + c]);
                let p = load(row1[x0 * channels + c]);
                let q = load(row1[x1 * channels + c]);
                let top = a + (b - a) * fx;
                let bottom = p + (q - p) * fx;
                out[dx * channels + c] = store(top + (bottom - top) * fy);
            }
        }
    }
}

impl Resampler for LinearResampler {
    fn resample_u8(
        &self,
        src: &[u8],
        src_size: (u32, u32),
        dst: &mut [u8],
        dst_size: (u32, u32),
        channels: usize,
    ) {
        bilinear(
            src,
            src_size,
            dst,
            dst_size,
            channels,
            |v| v as f32,
            |v| v.round().clamp(0.0, 255.0) as u8,
        );
    }

    fn resample_f32(
        &self,
        src: &[f32],
        src_size: (u32, u32),
        dst: &mut [f32],
        dst_size: (u32, u32),
        channels: usize,
    ) {
        bilinear(src, src_size, dst, dst_size, channels, |v| v, |v| v);
    }
}

/// Resize with [`LinearResampler`].
///
/// # Errors
///
/// See [`resize_with`].
pub fn resize(image: &Image<'_>, width: u32, height: u32) -> TransformResult<Image<'static>> {
    resize_with(image, width, height, &LinearResampler)
}

/// Resize `image` to `width` x `height` through `resampler`.
///
/// The result keeps the source format; the source is not modified.
///
/// # Errors
///
/// - [`TransformError::InvalidParameter`] if a target dimension is zero
/// - [`TransformError::UnsupportedFormat`] for packed or binary16 formats
/// - [`TransformError::Core`] if the destination cannot be allocated
pub fn resize_with(
    image: &Image<'_>,
    width: u32,
    height: u32,
    resampler: &dyn Resampler,
) -> TransformResult<Image<'static>> {
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameter(format!(
            "resize target must be non-empty, got {}x{}",
            width, height
        )));
    }

    let format = image.format();
    let channels = format.channel_count() as usize;
    let src_size = image.dimensions();
    let dst_size = (width, height);
    let len = required_bytes(width, height, format)?;

    log::debug!(
        "resize: {}x{} -> {}x{} ({})",
        src_size.0,
        src_size.1,
        width,
        height,
        format.name()
    );

    let data = match format.encoding() {
        ChannelEncoding::U8 => {
            let mut dst = try_alloc_bytes(len)?;
            resampler.resample_u8(image.data(), src_size, &mut dst, dst_size, channels);
            dst
        }
        ChannelEncoding::F32 => {
            let src = f32_samples(image.data())?;
            let mut dst = Vec::new();
            dst.try_reserve_exact(len / 4)
                .map_err(|_| TransformError::AllocationFailed)?;
            dst.resize(len / 4, 0.0f32);
            resampler.resample_f32(&src, src_size, &mut dst, dst_size, channels);

            let mut bytes = try_alloc_bytes(len)?;
            for (out, v) in bytes.chunks_exact_mut(4).zip(&dst) {
                out.copy_from_slice(&v.to_ne_bytes());
            }
            bytes
        }
        _ => {
            return Err(TransformError::UnsupportedFormat(format!(
                "resize needs u8 or f32 channels, got {}",
                format.name()
            )));
        }
    };

    Ok(Image::from_vec(data, width, height, format)?)
}

fn f32_samples(bytes: &[u8]) -> TransformResult<Vec<f32>> {
    let mut samples = Vec::new();
    samples
        .try_reserve_exact(bytes.len() / 4)
        .map_err(|_| TransformError::AllocationFailed)?;
    samples.extend(
        bytes
            .chunks_exact(4)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]])),
    );
    Ok(samples)
}
