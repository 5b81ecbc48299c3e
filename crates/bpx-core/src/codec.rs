//! Pixel codec
//!
//! Converts between the bytes of one pixel and the canonical [`Color`].
//! Both directions are driven by the format's [`FormatDescriptor`], so
//! encoding and decoding can never disagree about a layout.
//!
//! # Channel mapping
//!
//! - Integer channels scale linearly between their native width and 8
//!   bits: decoding truncates (`v * 255 / max`), encoding rounds.
//! - Float channels map `[0.0, 1.0]` to `[0, 255]` with rounding on decode,
//!   so every 8-bit value survives an encode/decode cycle exactly.
//! - Luminance layouts decode to `(l, l, l, a)` and encode the perceptual
//!   luminance of the color.
//! - Layouts without alpha decode with alpha 255 and drop alpha on encode.
//!
//! [`FormatDescriptor`]: crate::FormatDescriptor

use crate::color::{Color, unit_to_u8};
use crate::format::{ChannelEncoding, ChannelOrder, PixelFormat};
use half::f16;

/// Threshold above which an 8-bit alpha sets the 1-bit alpha of 5551 layouts.
pub const ALPHA_BIT_THRESHOLD: u8 = 50;

// ============================================================================
// binary16 conversion
// ============================================================================

/// Convert an `f32` to IEEE-754 binary16 bits.
///
/// Normal values round to nearest (ties away from zero) on the 13 dropped
/// mantissa bits. Magnitudes below the smallest normal half flush to
/// (signed) zero, magnitudes at or above 65520 saturate to infinity, and
/// every NaN collapses to the canonical quiet NaN `0x7e00`.
pub fn f32_to_f16_bits(value: f32) -> u16 {
    let bits = value.to_bits();
    let sign = ((bits >> 16) & 0x8000) as u16;
    let em = bits & 0x7fff_ffff;

    let magnitude = if em > 0x7f80_0000 {
        0x7e00
    } else if em >= 143 << 23 {
        0x7c00
    } else if em < 113 << 23 {
        0
    } else {
        ((em - (112 << 23) + (1 << 12)) >> 13) as u16
    };

    sign | magnitude
}

/// Convert IEEE-754 binary16 bits to an `f32`.
#[inline]
pub fn f16_bits_to_f32(bits: u16) -> f32 {
    f16::from_bits(bits).to_f32()
}

// ============================================================================
// Decode / encode
// ============================================================================

/// Decode one pixel.
///
/// # Arguments
///
/// * `format` - Layout of `bytes`
/// * `bytes` - The pixel's bytes; at least `format.bytes_per_pixel()` long
///
/// # Panics
///
/// Panics if `bytes` is shorter than one pixel.
pub fn decode(format: PixelFormat, bytes: &[u8]) -> Color {
    let desc = format.descriptor();

    match desc.encoding {
        ChannelEncoding::Packed565 => {
            let v = read_u16(bytes, 0);
            let hi = expand(v >> 11, 31);
            let g = expand(v >> 5, 63);
            let lo = expand(v, 31);
            place(desc.order, hi, g, lo, 255)
        }
        ChannelEncoding::Packed5551 => {
            let v = read_u16(bytes, 0);
            let hi = expand(v >> 11, 31);
            let g = expand(v >> 6, 31);
            let lo = expand(v >> 1, 31);
            let a = if v & 1 != 0 { 255 } else { 0 };
            place(desc.order, hi, g, lo, a)
        }
        ChannelEncoding::Packed4444 => {
            let v = read_u16(bytes, 0);
            let hi = expand(v >> 12, 15);
            let g = expand(v >> 8, 15);
            let lo = expand(v >> 4, 15);
            let a = expand(v, 15);
            place(desc.order, hi, g, lo, a)
        }
        encoding => {
            let ch = |i: usize| read_channel(encoding, bytes, i);
            match desc.channels {
                1 => {
                    let l = ch(0);
                    Color::new(l, l, l, 255)
                }
                2 => {
                    let l = ch(0);
                    Color::new(l, l, l, ch(1))
                }
                3 => place(desc.order, ch(0), ch(1), ch(2), 255),
                _ => place(desc.order, ch(0), ch(1), ch(2), ch(3)),
            }
        }
    }
}

/// Encode one pixel.
///
/// # Arguments
///
/// * `format` - Layout of `bytes`
/// * `bytes` - Destination; at least `format.bytes_per_pixel()` long
/// * `color` - Color to store
///
/// # Panics
///
/// Panics if `bytes` is shorter than one pixel.
pub fn encode(format: PixelFormat, bytes: &mut [u8], color: Color) {
    let desc = format.descriptor();
    let (hi, lo) = match desc.order {
        ChannelOrder::Rgb => (color.r, color.b),
        ChannelOrder::Bgr => (color.b, color.r),
    };

    match desc.encoding {
        ChannelEncoding::Packed565 => {
            let v = (quantize(hi, 31) << 11) | (quantize(color.g, 63) << 5) | quantize(lo, 31);
            write_u16(bytes, 0, v);
        }
        ChannelEncoding::Packed5551 => {
            let a = u16::from(color.a > ALPHA_BIT_THRESHOLD);
            let v = (quantize(hi, 31) << 11)
                | (quantize(color.g, 31) << 6)
                | (quantize(lo, 31) << 1)
                | a;
            write_u16(bytes, 0, v);
        }
        ChannelEncoding::Packed4444 => {
            let v = (quantize(hi, 15) << 12)
                | (quantize(color.g, 15) << 8)
                | (quantize(lo, 15) << 4)
                | quantize(color.a, 15);
            write_u16(bytes, 0, v);
        }
        encoding => match desc.channels {
            1 => write_channel(encoding, bytes, 0, color.luminance_value()),
            2 => {
                write_channel(encoding, bytes, 0, color.luminance_value());
                write_channel(encoding, bytes, 1, color.a);
            }
            n => {
                write_channel(encoding, bytes, 0, hi);
                write_channel(encoding, bytes, 1, color.g);
                write_channel(encoding, bytes, 2, lo);
                if n == 4 {
                    write_channel(encoding, bytes, 3, color.a);
                }
            }
        },
    }
}

/// Encode a color into a freshly sized pixel.
///
/// Convenient for fills, where one encoded pixel is replicated.
pub fn encode_pixel(format: PixelFormat, color: Color) -> [u8; 16] {
    let mut px = [0u8; 16];
    encode(format, &mut px[..format.bytes_per_pixel()], color);
    px
}

// ============================================================================
// Helpers
// ============================================================================

#[inline]
fn place(order: ChannelOrder, first: u8, g: u8, last: u8, a: u8) -> Color {
    match order {
        ChannelOrder::Rgb => Color::new(first, g, last, a),
        ChannelOrder::Bgr => Color::new(last, g, first, a),
    }
}

/// Scale a `max`-limited field (masked here) up to 8 bits, truncating.
#[inline]
fn expand(v: u16, max: u16) -> u8 {
    ((u32::from(v & max) * 255) / u32::from(max)) as u8
}

/// Scale an 8-bit value down to `0..=max`, rounding to nearest.
#[inline]
fn quantize(c: u8, max: u16) -> u16 {
    ((u32::from(c) * u32::from(max) + 127) / 255) as u16
}

#[inline]
fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_ne_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
fn write_u16(bytes: &mut [u8], offset: usize, v: u16) {
    bytes[offset..offset + 2].copy_from_slice(&v.to_ne_bytes());
}

#[inline]
fn read_channel(encoding: ChannelEncoding, bytes: &[u8], index: usize) -> u8 {
    match encoding {
        ChannelEncoding::F16 => unit_to_u8(f16_bits_to_f32(read_u16(bytes, index * 2))),
        ChannelEncoding::F32 => {
            let o = index * 4;
            unit_to_u8(f32::from_ne_bytes([
                bytes[o],
                bytes[o + 1],
                bytes[o + 2],
                bytes[o + 3],
            ]))
        }
        _ => bytes[index],
    }
}

#[inline]
fn write_channel(encoding: ChannelEncoding, bytes: &mut [u8], index: usize, v: u8) {
    let unit = f32::from(v) / 255.0;
    match encoding {
        ChannelEncoding::F16 => write_u16(bytes, index * 2, f32_to_f16_bits(unit)),
        ChannelEncoding::F32 => {
            let o = index * 4;
            bytes[o..o + 4].copy_from_slice(&unit.to_ne_bytes());
        }
        _ => bytes[index] = v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(format: PixelFormat, c: Color) -> Color {
        let px = encode_pixel(format, c);
        decode(format, &px[..format.bytes_per_pixel()])
    }

    const SAMPLES: [Color; 6] = [
        Color::new(0, 0, 0, 0),
        Color::new(255, 255, 255, 255),
        Color::new(12, 200, 77, 130),
        Color::new(255, 0, 128, 1),
        Color::new(1, 254, 3, 254),
        Color::new(99, 98, 97, 96),
    ];

    #[test]
    fn test_full_precision_roundtrip() {
        for format in [
            PixelFormat::RgbaU8,
            PixelFormat::BgraU8,
            PixelFormat::RgbaF16,
            PixelFormat::BgraF16,
            PixelFormat::RgbaF32,
            PixelFormat::BgraF32,
        ] {
            for c in SAMPLES {
                assert_eq!(roundtrip(format, c), c, "{}", format);
            }
        }
    }

    #[test]
    fn test_every_byte_value_survives_float_formats() {
        for v in 0..=255u8 {
            let c = Color::new(v, 255 - v, v / 2, v);
            assert_eq!(roundtrip(PixelFormat::RgbaF16, c), c);
            assert_eq!(roundtrip(PixelFormat::RgbaF32, c), c);
        }
    }

    #[test]
    fn test_rgb_drops_alpha() {
        for format in [
            PixelFormat::RgbU8,
            PixelFormat::BgrU8,
            PixelFormat::RgbF16,
            PixelFormat::BgrF16,
            PixelFormat::RgbF32,
            PixelFormat::BgrF32,
        ] {
            for c in SAMPLES {
                assert_eq!(roundtrip(format, c), Color { a: 255, ..c }, "{}", format);
            }
        }
    }

    #[test]
    fn test_luminance_formats() {
        for format in [PixelFormat::LU8, PixelFormat::LF16, PixelFormat::LF32] {
            for v in [0u8, 1, 127, 128, 254, 255] {
                assert_eq!(roundtrip(format, Color::new(v, v, v, 3)), Color::rgb(v, v, v));
            }
            assert_eq!(roundtrip(format, Color::RED), Color::rgb(76, 76, 76));
        }
        for format in [PixelFormat::LaU8, PixelFormat::LaF16, PixelFormat::LaF32] {
            assert_eq!(
                roundtrip(format, Color::new(40, 40, 40, 90)),
                Color::new(40, 40, 40, 90)
            );
        }
    }

    #[test]
    fn test_byte_order() {
        let c = Color::new(1, 2, 3, 4);
        assert_eq!(&encode_pixel(PixelFormat::RgbaU8, c)[..4], &[1, 2, 3, 4]);
        assert_eq!(&encode_pixel(PixelFormat::BgraU8, c)[..4], &[3, 2, 1, 4]);
        assert_eq!(&encode_pixel(PixelFormat::BgrU8, c)[..3], &[3, 2, 1]);
        assert_eq!(&encode_pixel(PixelFormat::LaU8, Color::new(9, 9, 9, 8))[..2], &[9, 8]);
    }

    #[test]
    fn test_packed_565_layout() {
        let px = encode_pixel(PixelFormat::Rgb565, Color::RED);
        assert_eq!(u16::from_ne_bytes([px[0], px[1]]), 0xf800);
        let px = encode_pixel(PixelFormat::Bgr565, Color::RED);
        assert_eq!(u16::from_ne_bytes([px[0], px[1]]), 0x001f);
        let px = encode_pixel(PixelFormat::Rgb565, Color::GREEN);
        assert_eq!(u16::from_ne_bytes([px[0], px[1]]), 0x07e0);
    }

    #[test]
    fn test_packed_5551_alpha_bit() {
        let px = encode_pixel(PixelFormat::Rgba5551, Color::new(0, 0, 0, 51));
        assert_eq!(u16::from_ne_bytes([px[0], px[1]]), 0x0001);
        let px = encode_pixel(PixelFormat::Rgba5551, Color::new(0, 0, 0, 50));
        assert_eq!(u16::from_ne_bytes([px[0], px[1]]), 0x0000);
        let px = encode_pixel(PixelFormat::Bgra5551, Color::new(255, 0, 0, 255));
        assert_eq!(u16::from_ne_bytes([px[0], px[1]]), 0x003f);
    }

    #[test]
    fn test_packed_4444_layout() {
        let px = encode_pixel(PixelFormat::Rgba4444, Color::new(255, 0, 255, 0));
        assert_eq!(u16::from_ne_bytes([px[0], px[1]]), 0xf0f0);
        let px = encode_pixel(PixelFormat::Bgra4444, Color::new(255, 0, 0, 255));
        assert_eq!(u16::from_ne_bytes([px[0], px[1]]), 0x00ff);
    }

    #[test]
    fn test_packed_quantization_bound() {
        for v in 0..=255u8 {
            let c = Color::new(v, v, v, v);
            let d = roundtrip(PixelFormat::Rgb565, c);
            assert!(v.abs_diff(d.r) <= 255 / 31);
            assert!(v.abs_diff(d.g) <= 255 / 63);
            assert_eq!(d.a, 255);

            let d = roundtrip(PixelFormat::Bgra4444, c);
            assert!(v.abs_diff(d.r) <= 255 / 15);
            assert!(v.abs_diff(d.a) <= 255 / 15);

            let d = roundtrip(PixelFormat::Rgba5551, c);
            assert!(v.abs_diff(d.b) <= 255 / 31);
            assert_eq!(d.a, if v > 50 { 255 } else { 0 });
        }
    }

    #[test]
    fn test_packed_extremes_exact() {
        for format in [
            PixelFormat::Rgb565,
            PixelFormat::Bgr565,
            PixelFormat::Rgba4444,
            PixelFormat::Bgra4444,
            PixelFormat::Rgba5551,
            PixelFormat::Bgra5551,
        ] {
            assert_eq!(roundtrip(format, Color::WHITE), Color::WHITE, "{}", format);
            assert_eq!(roundtrip(format, Color::BLUE), Color::BLUE, "{}", format);
        }
    }

    #[test]
    fn test_half_special_values() {
        assert_eq!(f32_to_f16_bits(0.0), 0x0000);
        assert_eq!(f32_to_f16_bits(-0.0), 0x8000);
        assert_eq!(f32_to_f16_bits(1.0), 0x3c00);
        assert_eq!(f32_to_f16_bits(-2.0), 0xc000);
        assert_eq!(f32_to_f16_bits(65504.0), 0x7bff);
        assert_eq!(f32_to_f16_bits(1.0e6), 0x7c00);
        assert_eq!(f32_to_f16_bits(f32::INFINITY), 0x7c00);
        assert_eq!(f32_to_f16_bits(f32::NEG_INFINITY), 0xfc00);
        assert_eq!(f32_to_f16_bits(f32::NAN) & 0x7fff, 0x7e00);
        // below the smallest normal half
        assert_eq!(f32_to_f16_bits(1.0e-5), 0x0000);
        assert_eq!(f32_to_f16_bits(6.103_515_6e-5), 0x0400);
    }

    #[test]
    fn test_half_roundtrip_precision() {
        let mut x = 6.2e-5f32;
        while x < 65000.0 {
            let back = f16_bits_to_f32(f32_to_f16_bits(x));
            assert!(!back.is_nan());
            assert!(((back - x) / x).abs() <= 1.0 / 2048.0, "{x} -> {back}");
            x *= 1.37;
        }
        assert!(!f16_bits_to_f32(f32_to_f16_bits(f32::MIN_POSITIVE)).is_nan());
    }

    #[test]
    fn test_float_decode_clamps() {
        let mut px = [0u8; 16];
        px[..4].copy_from_slice(&2.0f32.to_ne_bytes());
        px[4..8].copy_from_slice(&(-1.0f32).to_ne_bytes());
        px[8..12].copy_from_slice(&f32::NAN.to_ne_bytes());
        px[12..16].copy_from_slice(&0.5f32.to_ne_bytes());
        assert_eq!(decode(PixelFormat::RgbaF32, &px), Color::new(255, 0, 0, 128));
    }
}
