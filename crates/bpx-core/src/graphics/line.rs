//! Line rasterization
//!
//! Segments are first clipped to the image with the Cohen-Sutherland
//! region-code algorithm, then walked with a 16.16 fixed-point stepper:
//! the longer axis advances one pixel per step while the shorter axis
//! accumulates `(short << 16) / long`. The end point is not drawn, so
//! chained segments never touch a shared corner twice and a zero-length
//! line draws nothing.
//!
//! Thick lines are the core line plus parallel copies offset along the
//! minor axis. The number of copies on each side is
//! `(thick - 1) * length / (2 * |major delta|)`, truncated.

use super::{Rect, extent};
use crate::blend::{BlendMode, blend};
use crate::color::Color;
use crate::image::Image;
use crate::ramp::ColorRamp;

const CLIP_LEFT: u8 = 0x01;
const CLIP_RIGHT: u8 = 0x02;
const CLIP_BOTTOM: u8 = 0x04;
const CLIP_TOP: u8 = 0x08;

/// Upper bound on clipping passes; each pass moves one endpoint onto a
/// boundary, so a well-formed segment settles in at most four.
const MAX_CLIP_PASSES: usize = 16;

// =============================================================================
// Clipping and traversal
// =============================================================================

fn region_code(x: i64, y: i64, xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> u8 {
    let mut code = 0;
    if x < xmin {
        code |= CLIP_LEFT;
    }
    if x > xmax {
        code |= CLIP_RIGHT;
    }
    if y < ymin {
        code |= CLIP_TOP;
    }
    if y > ymax {
        code |= CLIP_BOTTOM;
    }
    code
}

/// Clip the segment `(x1, y1)-(x2, y2)` to the pixels covered by
/// `window`.
///
/// Returns the clipped endpoints, or `None` when no part of the segment
/// lies inside. Intersections are computed in 64-bit arithmetic.
///
/// # Examples
///
/// ```
/// use bpx_core::{Rect, clip_line};
///
/// let window = Rect::new(0, 0, 4, 4);
/// assert_eq!(clip_line(-5, 2, 5, 2, window), Some((0, 2, 3, 2)));
/// assert_eq!(clip_line(-5, -1, 5, -1, window), None);
/// ```
pub fn clip_line(x1: i32, y1: i32, x2: i32, y2: i32, window: Rect) -> Option<(i32, i32, i32, i32)> {
    if window.is_empty() {
        return None;
    }
    let (xmin, ymin) = (window.x as i64, window.y as i64);
    let xmax = (xmin + window.w as i64 - 1).min(i32::MAX as i64);
    let ymax = (ymin + window.h as i64 - 1).min(i32::MAX as i64);
    let (ox, oy) = (x1 as i64, y1 as i64);
    let dx = x2 as i64 - ox;
    let dy = y2 as i64 - oy;

    let (mut x1, mut y1, mut x2, mut y2) = (ox, oy, x2 as i64, y2 as i64);
    let mut code1 = region_code(x1, y1, xmin, ymin, xmax, ymax);
    let mut code2 = region_code(x2, y2, xmin, ymin, xmax, ymax);

    for _ in 0..MAX_CLIP_PASSES {
        if code1 | code2 == 0 {
            return Some((x1 as i32, y1 as i32, x2 as i32, y2 as i32));
        }
        if code1 & code2 != 0 {
            return None;
        }

        let code_out = if code1 != 0 { code1 } else { code2 };
        let (x, y) = if code_out & CLIP_LEFT != 0 {
            (xmin, if dx != 0 { oy + dy * (xmin - ox) / dx } else { oy })
        } else if code_out & CLIP_RIGHT != 0 {
            (xmax, if dx != 0 { oy + dy * (xmax - ox) / dx } else { oy })
        } else if code_out & CLIP_BOTTOM != 0 {
            (if dy != 0 { ox + dx * (ymax - oy) / dy } else { ox }, ymax)
        } else {
            (if dy != 0 { ox + dx * (ymin - oy) / dy } else { ox }, ymin)
        };

        if code_out == code1 {
            (x1, y1) = (x, y);
            code1 = region_code(x, y, xmin, ymin, xmax, ymax);
        } else {
            (x2, y2) = (x, y);
            code2 = region_code(x, y, xmin, ymin, xmax, ymax);
        }
    }

    log::trace!("clip_line: no convergence for ({x1}, {y1})-({x2}, {y2})");
    None
}

/// Walk the clipped segment, calling `plot(x, y, t)` for every pixel.
///
/// `t` is the fraction of the clipped segment covered so far, starting
/// at 0.0. The end point is excluded.
pub(crate) fn trace_line<F>(width: i32, height: i32, x1: i32, y1: i32, x2: i32, y2: i32, mut plot: F)
where
    F: FnMut(i32, i32, f32),
{
    let Some((x1, y1, x2, y2)) = clip_line(x1, y1, x2, y2, Rect::new(0, 0, width, height)) else {
        return;
    };

    let mut short_len = (y2 - y1) as i64;
    let mut long_len = (x2 - x1) as i64;
    let y_longer = short_len.abs() > long_len.abs();
    if y_longer {
        std::mem::swap(&mut short_len, &mut long_len);
    }

    let end = long_len;
    let sign = if long_len < 0 { -1 } else { 1 };
    let long_abs = long_len.abs();
    let dec = if long_abs == 0 { 0 } else { (short_len << 16) / long_abs };

    let (mut i, mut j) = (0i64, 0i64);
    while i != end {
        let along = i as i32;
        let across = (j >> 16) as i32;
        let (x, y) = if y_longer {
            (x1 + across, y1 + along)
        } else {
            (x1 + along, y1 + across)
        };
        plot(x, y, i as f32 / end as f32);
        i += sign;
        j += dec;
    }
}

/// Emit the core segment and its parallel offsets for a thick line.
pub(crate) fn trace_thick<F>(x1: i32, y1: i32, x2: i32, y2: i32, thick: i32, mut segment: F)
where
    F: FnMut(i32, i32, i32, i32),
{
    let dx = x2 as i64 - x1 as i64;
    let dy = y2 as i64 - y1 as i64;

    segment(x1, y1, x2, y2);

    // Squaring an i64 delta can overflow for far-apart i32 endpoints.
    let length = (dx as f64).hypot(dy as f64);
    let spread = (thick as f64 - 1.0) * length;

    if dx != 0 && (dy / dx).abs() < 1 {
        let wy = (spread / (2.0 * dx.abs() as f64)) as i32;
        for i in 1..=wy {
            segment(x1, y1.saturating_sub(i), x2, y2.saturating_sub(i));
            segment(x1, y1.saturating_add(i), x2, y2.saturating_add(i));
        }
    } else if dy != 0 {
        let wx = (spread / (2.0 * dy.abs() as f64)) as i32;
        for i in 1..=wx {
            segment(x1.saturating_sub(i), y1, x2.saturating_sub(i), y2);
            segment(x1.saturating_add(i), y1, x2.saturating_add(i), y2);
        }
    }
}

// =============================================================================
// Image drawing methods
// =============================================================================

impl Image<'_> {
    /// Draw a line from `(x1, y1)` up to, but excluding, `(x2, y2)`.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color, mode: BlendMode) {
        let (w, h) = extent(self);
        trace_line(w, h, x1, y1, x2, y2, |x, y, _| {
            self.blend_unchecked(x, y, color, mode)
        });
    }

    /// Draw a line whose pixels are produced by `mapper(x, y, current)`.
    pub fn line_map<F>(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mut mapper: F)
    where
        F: FnMut(i32, i32, Color) -> Color,
    {
        let (w, h) = extent(self);
        trace_line(w, h, x1, y1, x2, y2, |x, y, _| {
            self.map_unchecked(x, y, &mut mapper)
        });
    }

    /// Draw a line sampling `ramp` from 0.0 at the (clipped) start to 1.0
    /// at the end.
    pub fn line_gradient(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        ramp: &ColorRamp,
        mode: BlendMode,
    ) {
        let (w, h) = extent(self);
        trace_line(w, h, x1, y1, x2, y2, |x, y, t| {
            let (ux, uy) = (x as u32, y as u32);
            let out = blend(self.get_unchecked(ux, uy), ramp.get(t), mode);
            self.set_unchecked(ux, uy, out);
        });
    }

    /// Draw a line `thick` pixels wide.
    #[allow(clippy::too_many_arguments)]
    pub fn line_thick(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        thick: i32,
        color: Color,
        mode: BlendMode,
    ) {
        trace_thick(x1, y1, x2, y2, thick, |a, b, c, d| {
            self.line(a, b, c, d, color, mode)
        });
    }

    /// Draw a thick line through `mapper`.
    ///
    /// Offset copies may overlap, so a pixel can be mapped more than once.
    pub fn line_thick_map<F>(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, thick: i32, mut mapper: F)
    where
        F: FnMut(i32, i32, Color) -> Color,
    {
        trace_thick(x1, y1, x2, y2, thick, |a, b, c, d| {
            self.line_map(a, b, c, d, &mut mapper)
        });
    }

    /// Draw a thick gradient line; every offset copy samples the full ramp.
    #[allow(clippy::too_many_arguments)]
    pub fn line_thick_gradient(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        thick: i32,
        ramp: &ColorRamp,
        mode: BlendMode,
    ) {
        trace_thick(x1, y1, x2, y2, thick, |a, b, c, d| {
            self.line_gradient(a, b, c, d, ramp, mode)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixelFormat;

    fn lit(img: &Image<'_>) -> Vec<(i32, i32)> {
        let (w, h) = extent(img);
        let mut out = Vec::new();
        for y in 0..h {
            for x in 0..w {
                if img.get(x, y) != Color::BLACK {
                    out.push((x, y));
                }
            }
        }
        out
    }

    fn canvas(w: u32, h: u32) -> Image<'static> {
        Image::new(w, h, Color::BLACK, PixelFormat::RgbaU8).unwrap()
    }

    #[test]
    fn test_clip_inside_unchanged() {
        assert_eq!(clip_line(1, 1, 3, 2, Rect::new(0, 0, 4, 4)), Some((1, 1, 3, 2)));
    }

    #[test]
    fn test_clip_rejects_outside() {
        assert_eq!(clip_line(-3, -3, -1, 5, Rect::new(0, 0, 4, 4)), None);
        assert_eq!(clip_line(0, 7, 3, 9, Rect::new(0, 0, 4, 4)), None);
        assert_eq!(clip_line(0, 0, 1, 1, Rect::new(0, 0, 0, 4)), None);
    }

    #[test]
    fn test_clip_crossing_each_edge() {
        assert_eq!(clip_line(2, -4, 2, 2, Rect::new(0, 0, 4, 4)), Some((2, 0, 2, 2)));
        assert_eq!(clip_line(2, 2, 2, 40, Rect::new(0, 0, 4, 4)), Some((2, 2, 2, 3)));
        assert_eq!(clip_line(1, 1, 9, 1, Rect::new(0, 0, 4, 4)), Some((1, 1, 3, 1)));
        let (x1, y1, x2, y2) = clip_line(-10, -10, 10, 10, Rect::new(0, 0, 4, 4)).unwrap();
        for (x, y) in [(x1, y1), (x2, y2)] {
            assert!((0..=3).contains(&x) && (0..=3).contains(&y));
        }
    }

    #[test]
    fn test_clip_extreme_coordinates() {
        let clipped = clip_line(i32::MIN, 1, i32::MAX, 1, Rect::new(0, 0, 100, 100));
        assert_eq!(clipped, Some((0, 1, 99, 1)));
    }

    #[test]
    fn test_horizontal_excludes_end() {
        let mut img = canvas(5, 1);
        img.line(0, 0, 3, 0, Color::WHITE, BlendMode::Replace);
        assert_eq!(lit(&img), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_zero_length_draws_nothing() {
        let mut img = canvas(3, 3);
        img.line(1, 1, 1, 1, Color::WHITE, BlendMode::Replace);
        assert!(lit(&img).is_empty());
    }

    #[test]
    fn test_reverse_vertical() {
        let mut img = canvas(1, 4);
        img.line(0, 3, 0, 0, Color::WHITE, BlendMode::Replace);
        assert_eq!(lit(&img), vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_diagonal_and_steep() {
        let mut img = canvas(4, 4);
        img.line(0, 0, 3, 3, Color::WHITE, BlendMode::Replace);
        assert_eq!(lit(&img), vec![(0, 0), (1, 1), (2, 2)]);

        let mut img = canvas(4, 5);
        img.line(0, 0, 1, 4, Color::WHITE, BlendMode::Replace);
        // one pixel per row along the major axis
        let pts = lit(&img);
        assert_eq!(pts.len(), 4);
        assert!(pts.iter().all(|&(x, _)| x == 0 || x == 1));
    }

    #[test]
    fn test_outside_line_is_noop() {
        let mut img = canvas(4, 4);
        img.line(-5, -2, 10, -2, Color::WHITE, BlendMode::Replace);
        img.line(6, 0, 6, 3, Color::WHITE, BlendMode::Replace);
        assert!(lit(&img).is_empty());
    }

    #[test]
    fn test_line_map_coordinates() {
        let mut img = canvas(4, 1);
        let mut seen = Vec::new();
        img.line_map(0, 0, 3, 0, |x, y, c| {
            seen.push((x, y));
            c.invert()
        });
        assert_eq!(seen, vec![(0, 0), (1, 0), (2, 0)]);
        assert_eq!(img.get(1, 0), Color::WHITE);
    }

    #[test]
    fn test_gradient_samples_ramp() {
        let mut img = canvas(5, 1);
        let ramp = ColorRamp::new(Color::BLACK, Color::WHITE);
        img.line_gradient(0, 0, 4, 0, &ramp, BlendMode::Replace);
        assert_eq!(img.get(0, 0), Color::BLACK);
        assert_eq!(img.get(2, 0), Color::new(127, 127, 127, 255));
        assert_eq!(img.get(4, 0), Color::BLACK);
    }

    #[test]
    fn test_thick_horizontal() {
        let mut img = canvas(5, 5);
        img.line_thick(0, 2, 5, 2, 3, Color::WHITE, BlendMode::Replace);
        let pts = lit(&img);
        assert_eq!(pts.len(), 12);
        assert!(pts.iter().all(|&(x, y)| (1..=3).contains(&y) && x < 4));
    }

    #[test]
    fn test_thick_vertical() {
        let mut img = canvas(5, 5);
        img.line_thick(2, 0, 2, 4, 5, Color::WHITE, BlendMode::Replace);
        let pts = lit(&img);
        // wx = (5 - 1) * 4 / (2 * 4) = 2
        assert_eq!(pts.len(), 20);
        assert!(pts.iter().all(|&(_, y)| y < 4));
    }

    #[test]
    fn test_thickness_one_is_plain_line() {
        let mut a = canvas(6, 6);
        let mut b = canvas(6, 6);
        a.line(0, 1, 5, 4, Color::WHITE, BlendMode::Replace);
        b.line_thick(0, 1, 5, 4, 1, Color::WHITE, BlendMode::Replace);
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_thick_offsets_far_endpoints() {
        let mut segments = Vec::new();
        trace_thick(-2_000_000_000, 4, 2_000_000_000, 4, 3, |a, b, c, d| {
            segments.push((a, b, c, d))
        });
        assert_eq!(
            segments,
            vec![
                (-2_000_000_000, 4, 2_000_000_000, 4),
                (-2_000_000_000, 3, 2_000_000_000, 3),
                (-2_000_000_000, 5, 2_000_000_000, 5),
            ]
        );

        let mut segments = Vec::new();
        trace_thick(4, i32::MIN, 4, i32::MAX, 3, |a, b, c, d| segments.push((a, b, c, d)));
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1], (3, i32::MIN, 3, i32::MAX));
    }
}
