//! Canonical RGBA color
//!
//! [`Color`] is the 8-bit-per-channel value that every [`PixelFormat`]
//! decodes to and encodes from. All arithmetic saturates at the channel
//! bounds instead of wrapping.
//!
//! # Packing
//!
//! `u32` conversions place red in the least significant byte:
//! `r | g << 8 | b << 16 | a << 24`.
//!
//! [`PixelFormat`]: crate::PixelFormat

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// 8-bit RGBA color.
///
/// The default value is [`Color::BLANK`] (fully transparent black).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const BLANK: Color = Color::new(0, 0, 0, 0);
    pub const LIGHTGRAY: Color = Color::new(211, 211, 211, 255);
    pub const SILVER: Color = Color::new(192, 192, 192, 255);
    pub const GRAY: Color = Color::new(127, 127, 127, 255);
    pub const DARKGRAY: Color = Color::new(80, 80, 80, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0, 255);
    pub const GOLD: Color = Color::new(255, 215, 0, 255);
    pub const ORANGE: Color = Color::new(255, 165, 0, 255);
    pub const PINK: Color = Color::new(255, 105, 180, 255);
    pub const RED: Color = Color::new(255, 0, 0, 255);
    pub const MAROON: Color = Color::new(128, 0, 0, 255);
    pub const GREEN: Color = Color::new(0, 255, 0, 255);
    pub const DARKGREEN: Color = Color::new(0, 100, 0, 255);
    pub const SKYBLUE: Color = Color::new(135, 206, 235, 255);
    pub const BLUE: Color = Color::new(0, 0, 255, 255);
    pub const DARKBLUE: Color = Color::new(0, 0, 100, 255);
    pub const PURPLE: Color = Color::new(127, 0, 127, 255);
    pub const VIOLET: Color = Color::new(238, 130, 238, 255);
    pub const DARKPURPLE: Color = Color::new(79, 0, 79, 255);
    pub const BEIGE: Color = Color::new(255, 198, 153, 255);
    pub const BROWN: Color = Color::new(139, 69, 19, 255);
    pub const DARKBROWN: Color = Color::new(92, 64, 51, 255);
    pub const MAGENTA: Color = Color::new(255, 0, 255, 255);
    pub const CYAN: Color = Color::new(0, 255, 255, 255);

    /// Create a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Create an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Unpack a color from `r | g << 8 | b << 16 | a << 24`.
    #[inline]
    pub const fn from_u32(value: u32) -> Self {
        Color {
            r: (value & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: ((value >> 16) & 0xff) as u8,
            a: ((value >> 24) & 0xff) as u8,
        }
    }

    /// Pack the color as `r | g << 8 | b << 16 | a << 24`.
    #[inline]
    pub const fn to_u32(self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16) | ((self.a as u32) << 24)
    }

    /// Create a color from normalized float channels in `[0.0, 1.0]`.
    ///
    /// Values outside the range are clamped.
    pub fn from_floats(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(a))
    }

    /// Create a gray color from a normalized gray level and alpha.
    pub fn from_gray(gray: f32, alpha: f32) -> Self {
        let g = unit_to_u8(gray);
        Color::new(g, g, g, unit_to_u8(alpha))
    }

    /// Create a color from HSV components.
    ///
    /// # Arguments
    ///
    /// * `hue` - Hue in degrees; wrapped into `[0, 360)`
    /// * `saturation` - Saturation in `[0.0, 1.0]`
    /// * `value` - Value in `[0.0, 1.0]`
    /// * `alpha` - Alpha in `[0.0, 1.0]`
    pub fn from_hsv(hue: f32, saturation: f32, value: f32, alpha: f32) -> Self {
        let hue = hue.rem_euclid(360.0);
        let c = value * saturation;
        let x = c * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
        let m = value - c;

        let (r, g, b) = match (hue / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Color::new(
            unit_to_u8(r + m),
            unit_to_u8(g + m),
            unit_to_u8(b + m),
            unit_to_u8(alpha),
        )
    }

    /// Convert to HSV.
    ///
    /// Returns `(hue, saturation, value)` with hue in degrees `[0, 360)`
    /// and saturation/value in `[0.0, 1.0]`. Alpha is ignored.
    pub fn to_hsv(self) -> (f32, f32, f32) {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;

        let cmax = r.max(g).max(b);
        let cmin = r.min(g).min(b);
        let delta = cmax - cmin;

        let h = if delta == 0.0 {
            0.0
        } else if cmax == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if cmax == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        let s = if cmax == 0.0 { 0.0 } else { delta / cmax };

        (h, s, cmax)
    }

    /// Linear interpolation `self + t * (other - self)` on all four channels.
    ///
    /// Channel results are truncated toward zero.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        let mix = |a: u8, b: u8| (a as f32 + t * (b as f32 - a as f32)) as u8;
        Color::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Mean of the RGB channels.
    #[inline]
    pub fn grayscale_value(self) -> u8 {
        ((self.r as u32 + self.g as u32 + self.b as u32) / 3) as u8
    }

    /// Gray color from the mean of the RGB channels, alpha kept.
    pub fn grayscale(self) -> Color {
        let v = self.grayscale_value();
        Color::new(v, v, v, self.a)
    }

    /// Perceptual luminance `0.299 r + 0.587 g + 0.114 b`, rounded.
    ///
    /// Computed in integer arithmetic so that gray inputs map to themselves.
    #[inline]
    pub fn luminance_value(self) -> u8 {
        ((299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32 + 500) / 1000) as u8
    }

    /// Gray color from the perceptual luminance, alpha kept.
    pub fn luminance(self) -> Color {
        let v = self.luminance_value();
        Color::new(v, v, v, self.a)
    }

    /// Invert the RGB channels, alpha kept.
    pub fn invert(self) -> Color {
        Color::new(255 - self.r, 255 - self.g, 255 - self.b, self.a)
    }

    /// Replace alpha with a normalized value in `[0.0, 1.0]`.
    pub fn with_alpha(self, alpha: f32) -> Color {
        Color { a: unit_to_u8(alpha), ..self }
    }

    /// Adjust brightness.
    ///
    /// `factor` is clamped to `[-1.0, 1.0]`. Negative values scale the RGB
    /// channels toward black, positive values move them toward white.
    pub fn brightness(self, factor: f32) -> Color {
        let factor = factor.clamp(-1.0, 1.0);
        let adjust = |c: u8| {
            let c = c as f32;
            if factor < 0.0 {
                (c * (1.0 + factor)) as u8
            } else {
                ((255.0 - c) * factor + c) as u8
            }
        };
        Color::new(adjust(self.r), adjust(self.g), adjust(self.b), self.a)
    }

    /// Adjust contrast around mid-gray.
    ///
    /// `factor` is clamped to `[-1.0, 1.0]` and mapped to a gain of
    /// `(1 + factor)^2`; each RGB channel becomes
    /// `((c / 255 - 0.5) * gain + 0.5) * 255`, clamped.
    pub fn contrast(self, factor: f32) -> Color {
        let gain = (1.0 + factor.clamp(-1.0, 1.0)).powi(2);
        let adjust = |c: u8| unit_to_u8((c as f32 / 255.0 - 0.5) * gain + 0.5);
        Color::new(adjust(self.r), adjust(self.g), adjust(self.b), self.a)
    }

    /// Replace the HSV saturation with `factor` (clamped to `[0.0, 1.0]`).
    ///
    /// Hue, value and alpha are kept.
    pub fn saturation(self, factor: f32) -> Color {
        let (h, _, v) = self.to_hsv();
        Color {
            a: self.a,
            ..Color::from_hsv(h, factor.clamp(0.0, 1.0), v, 1.0)
        }
    }
}

/// Map a normalized float to a byte, rounding; NaN maps to 0.
#[inline]
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color::from_u32(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.to_u32()
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Color::new(r, g, b, a)
    }
}

// ============================================================================
// Saturating arithmetic
// ============================================================================

impl Add for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color::new(
            self.r.saturating_add(other.r),
            self.g.saturating_add(other.g),
            self.b.saturating_add(other.b),
            self.a.saturating_add(other.a),
        )
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, other: Color) {
        *self = *self + other;
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Color {
        Color::new(
            self.r.saturating_sub(other.r),
            self.g.saturating_sub(other.g),
            self.b.saturating_sub(other.b),
            self.a.saturating_sub(other.a),
        )
    }
}

impl SubAssign for Color {
    fn sub_assign(&mut self, other: Color) {
        *self = *self - other;
    }
}

/// Channel-wise modulation: `(a * b) / 255`.
impl Mul for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Color {
        let m = |a: u8, b: u8| ((a as u32 * b as u32) / 255) as u8;
        Color::new(
            m(self.r, other.r),
            m(self.g, other.g),
            m(self.b, other.b),
            m(self.a, other.a),
        )
    }
}

impl MulAssign for Color {
    fn mul_assign(&mut self, other: Color) {
        *self = *self * other;
    }
}

/// Scalar scaling of all four channels, clamped to `[0, 255]`.
impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, value: f32) -> Color {
        let m = |c: u8| (c as f32 * value).clamp(0.0, 255.0) as u8;
        Color::new(m(self.r), m(self.g), m(self.b), m(self.a))
    }
}

impl MulAssign<f32> for Color {
    fn mul_assign(&mut self, value: f32) {
        *self = *self * value;
    }
}

/// Scalar division of all four channels, clamped to `[0, 255]`.
///
/// Dividing by zero yields 255 for non-zero channels and 0 for zero
/// channels, following IEEE float semantics before the clamp.
impl Div<f32> for Color {
    type Output = Color;

    fn div(self, value: f32) -> Color {
        let d = |c: u8| {
            let q = c as f32 / value;
            if q.is_nan() { 0 } else { q.clamp(0.0, 255.0) as u8 }
        };
        Color::new(d(self.r), d(self.g), d(self.b), d(self.a))
    }
}

impl DivAssign<f32> for Color {
    fn div_assign(&mut self, value: f32) {
        *self = *self / value;
    }
}
