//! Blend algebra
//!
//! [`blend`] combines a destination color with a source color under one
//! of twelve [`BlendMode`] rules. The function is pure and deterministic;
//! every rasterizer write that takes a mode goes through it.

use crate::color::Color;

/// Composition rule for [`blend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    /// Source overwrites destination, alpha included
    #[default]
    Replace,
    /// Source-over alpha compositing
    Alpha,
    /// `d + s`
    Add,
    /// `d - s`
    Sub,
    /// `d * s / 255`
    Mul,
    /// `255 - (255 - d)(255 - s) / 255`
    Screen,
    /// `min(d, s)`
    Darken,
    /// `max(d, s)`
    Lighten,
    /// `|d - s|`
    Difference,
    /// `d + s - 2ds / 255`
    Exclusion,
    /// Color dodge
    Dodge,
    /// Color burn
    Burn,
}

impl BlendMode {
    /// Every mode, in declaration order.
    pub const ALL: [BlendMode; 12] = [
        BlendMode::Replace,
        BlendMode::Alpha,
        BlendMode::Add,
        BlendMode::Sub,
        BlendMode::Mul,
        BlendMode::Screen,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Dodge,
        BlendMode::Burn,
    ];
}

/// Combine `dst` and `src` under `mode`.
///
/// `Replace` returns `src`. `Alpha` composites `src` over `dst`; when both
/// are fully transparent the result is `src`. All other modes work per RGB
/// channel in integer arithmetic, saturate to `[0, 255]` and keep `dst.a`.
///
/// # Examples
///
/// ```
/// use bpx_core::{BlendMode, Color, blend};
///
/// let d = Color::new(100, 100, 100, 255);
/// let s = Color::new(50, 200, 0, 255);
/// assert_eq!(blend(d, s, BlendMode::Add), Color::new(150, 255, 100, 255));
/// assert_eq!(blend(d, s, BlendMode::Replace), s);
/// ```
pub fn blend(dst: Color, src: Color, mode: BlendMode) -> Color {
    match mode {
        BlendMode::Replace => src,
        BlendMode::Alpha => alpha_over(dst, src),
        BlendMode::Add => per_channel(dst, src, |d, s| d + s),
        BlendMode::Sub => per_channel(dst, src, |d, s| d - s),
        BlendMode::Mul => per_channel(dst, src, |d, s| d * s / 255),
        BlendMode::Screen => per_channel(dst, src, |d, s| 255 - (255 - d) * (255 - s) / 255),
        BlendMode::Darken => per_channel(dst, src, i32::min),
        BlendMode::Lighten => per_channel(dst, src, i32::max),
        BlendMode::Difference => per_channel(dst, src, |d, s| (d - s).abs()),
        BlendMode::Exclusion => per_channel(dst, src, |d, s| d + s - 2 * d * s / 255),
        BlendMode::Dodge => per_channel(dst, src, |d, s| {
            if s == 255 { 255 } else { (d * 255 / (255 - s)).min(255) }
        }),
        BlendMode::Burn => per_channel(dst, src, |d, s| {
            if s == 0 { 0 } else { (255 - (255 - d) * 255 / s).max(0) }
        }),
    }
}

#[inline]
fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

#[inline]
fn per_channel(dst: Color, src: Color, f: impl Fn(i32, i32) -> i32) -> Color {
    Color::new(
        clamp_u8(f(dst.r as i32, src.r as i32)),
        clamp_u8(f(dst.g as i32, src.g as i32)),
        clamp_u8(f(dst.b as i32, src.b as i32)),
        dst.a,
    )
}

fn alpha_over(dst: Color, src: Color) -> Color {
    let sa = src.a as f32 / 255.0;
    let da = dst.a as f32 / 255.0 * (1.0 - sa);
    let out = sa + da;
    if out == 0.0 {
        return src;
    }

    let mix = |s: u8, d: u8| ((s as f32 * sa + d as f32 * da) / out) as i32;
    Color::new(
        clamp_u8(mix(src.r, dst.r)),
        clamp_u8(mix(src.g, dst.g)),
        clamp_u8(mix(src.b, dst.b)),
        clamp_u8((out * 255.0) as i32),
    )
}
