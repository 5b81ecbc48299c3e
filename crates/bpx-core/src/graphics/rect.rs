//! Rectangle rasterization
//!
//! Rectangles are given by two inclusive corners in any order. The box is
//! normalized, dropped when it lies entirely outside the image, and
//! clamped otherwise. Gradients are computed against the unclamped box so
//! a partly visible rectangle shows the matching slice of its gradient.
//!
//! Outlines are four chained lines. Line end points are exclusive, so the
//! chain covers each border pixel once.

use super::extent;
use crate::blend::{BlendMode, blend};
use crate::color::Color;
use crate::image::Image;
use crate::ramp::ColorRamp;

/// A normalized rectangle and its visible part.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    xmin: i32,
    ymin: i32,
    xmax: i32,
    ymax: i32,
}

impl Bounds {
    fn new(width: i32, height: i32, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<Self> {
        let (x1, x2) = if x1 > x2 { (x2, x1) } else { (x1, x2) };
        let (y1, y2) = if y1 > y2 { (y2, y1) } else { (y1, y2) };
        if x2 < 0 || y2 < 0 || x1 >= width || y1 >= height {
            return None;
        }
        Some(Bounds {
            x1,
            y1,
            x2,
            y2,
            xmin: x1.max(0),
            ymin: y1.max(0),
            xmax: x2.min(width - 1),
            ymax: y2.min(height - 1),
        })
    }

    /// Position of `(x, y)` inside the full box as fractions in `[0, 1]`.
    /// A zero-width or zero-height box yields 0 on that axis.
    fn fraction(&self, x: i32, y: i32) -> (f32, f32) {
        let w = self.x2 as i64 - self.x1 as i64;
        let h = self.y2 as i64 - self.y1 as i64;
        let tx = if w == 0 { 0.0 } else { (x as i64 - self.x1 as i64) as f32 / w as f32 };
        let ty = if h == 0 { 0.0 } else { (y as i64 - self.y1 as i64) as f32 / h as f32 };
        (tx, ty)
    }
}

fn trace_rect<F>(bounds: Option<Bounds>, mut plot: F)
where
    F: FnMut(&Bounds, i32, i32),
{
    let Some(b) = bounds else {
        return;
    };
    for y in b.ymin..=b.ymax {
        for x in b.xmin..=b.xmax {
            plot(&b, x, y);
        }
    }
}

impl Image<'_> {
    fn rect_bounds(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<Bounds> {
        let (w, h) = extent(self);
        Bounds::new(w, h, x1, y1, x2, y2)
    }

    /// Fill the rectangle with corners `(x1, y1)` and `(x2, y2)`, inclusive.
    ///
    /// # Examples
    ///
    /// ```
    /// use bpx_core::{BlendMode, Color, Image, PixelFormat};
    ///
    /// let mut img = Image::new(4, 4, Color::BLACK, PixelFormat::RgbaU8).unwrap();
    /// img.rectangle(1, 1, 2, 2, Color::RED, BlendMode::Replace);
    /// assert_eq!(img.get(2, 2), Color::RED);
    /// assert_eq!(img.get(3, 3), Color::BLACK);
    /// ```
    pub fn rectangle(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color, mode: BlendMode) {
        let bounds = self.rect_bounds(x1, y1, x2, y2);
        trace_rect(bounds, |_, x, y| self.blend_unchecked(x, y, color, mode));
    }

    /// Fill a rectangle through `mapper(x, y, current)`.
    pub fn rectangle_map<F>(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mut mapper: F)
    where
        F: FnMut(i32, i32, Color) -> Color,
    {
        let bounds = self.rect_bounds(x1, y1, x2, y2);
        trace_rect(bounds, |_, x, y| self.map_unchecked(x, y, &mut mapper));
    }

    /// Fill a rectangle with a bilinear blend of its corner colors.
    ///
    /// `corners` is `[top_left, top_right, bottom_right, bottom_left]`.
    pub fn rectangle_gradient(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        corners: [Color; 4],
        mode: BlendMode,
    ) {
        let [tl, tr, br, bl] = corners;
        let bounds = self.rect_bounds(x1, y1, x2, y2);
        trace_rect(bounds, |b, x, y| {
            let (tx, ty) = b.fraction(x, y);
            let top = tl.lerp(tr, tx);
            let bottom = bl.lerp(br, tx);
            self.blend_unchecked(x, y, top.lerp(bottom, ty), mode);
        });
    }

    /// Fill a rectangle with a linear ramp running from `start` to `end`.
    ///
    /// Each pixel samples the ramp at its projection onto the
    /// `start -> end` vector; `start == end` samples 0.
    #[allow(clippy::too_many_arguments)]
    pub fn rectangle_gradient_linear(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        start: (i32, i32),
        end: (i32, i32),
        ramp: &ColorRamp,
        mode: BlendMode,
    ) {
        let bounds = self.rect_bounds(x1, y1, x2, y2);
        trace_rect(bounds, |_, x, y| {
            let t = linear_t(start, end, x, y);
            let out = blend(self.get_unchecked(x as u32, y as u32), ramp.get(t), mode);
            self.set_unchecked(x as u32, y as u32, out);
        });
    }

    /// Fill a rectangle with a radial ramp centered on `center` that
    /// reaches 1.0 at the distance of `edge`.
    #[allow(clippy::too_many_arguments)]
    pub fn rectangle_gradient_radial(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        center: (i32, i32),
        edge: (i32, i32),
        ramp: &ColorRamp,
        mode: BlendMode,
    ) {
        let bounds = self.rect_bounds(x1, y1, x2, y2);
        trace_rect(bounds, |_, x, y| {
            let t = radial_t(center, edge, x, y);
            let out = blend(self.get_unchecked(x as u32, y as u32), ramp.get(t), mode);
            self.set_unchecked(x as u32, y as u32, out);
        });
    }

    /// Draw the rectangle border one pixel wide.
    pub fn rectangle_lines(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color, mode: BlendMode) {
        for (a, b, c, d) in border(x1, y1, x2, y2) {
            self.line(a, b, c, d, color, mode);
        }
    }

    /// Draw the rectangle border through `mapper`.
    pub fn rectangle_lines_map<F>(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, mut mapper: F)
    where
        F: FnMut(i32, i32, Color) -> Color,
    {
        for (a, b, c, d) in border(x1, y1, x2, y2) {
            self.line_map(a, b, c, d, &mut mapper);
        }
    }

    /// Draw the rectangle border with `thick`-wide lines.
    #[allow(clippy::too_many_arguments)]
    pub fn rectangle_lines_thick(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        thick: i32,
        color: Color,
        mode: BlendMode,
    ) {
        for (a, b, c, d) in border(x1, y1, x2, y2) {
            self.line_thick(a, b, c, d, thick, color, mode);
        }
    }

    /// Thick rectangle border through `mapper`.
    pub fn rectangle_lines_thick_map<F>(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        thick: i32,
        mut mapper: F,
    ) where
        F: FnMut(i32, i32, Color) -> Color,
    {
        for (a, b, c, d) in border(x1, y1, x2, y2) {
            self.line_thick_map(a, b, c, d, thick, &mut mapper);
        }
    }

    /// Draw the border with each edge fading between its two corners.
    ///
    /// `corners` is `[top_left, top_right, bottom_right, bottom_left]`.
    pub fn rectangle_lines_gradient(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        corners: [Color; 4],
        mode: BlendMode,
    ) {
        for ((a, b, c, d), ramp) in border(x1, y1, x2, y2).into_iter().zip(edge_ramps(corners)) {
            self.line_gradient(a, b, c, d, &ramp, mode);
        }
    }

    /// Thick variant of [`Image::rectangle_lines_gradient`].
    #[allow(clippy::too_many_arguments)]
    pub fn rectangle_lines_thick_gradient(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        thick: i32,
        corners: [Color; 4],
        mode: BlendMode,
    ) {
        for ((a, b, c, d), ramp) in border(x1, y1, x2, y2).into_iter().zip(edge_ramps(corners)) {
            self.line_thick_gradient(a, b, c, d, thick, &ramp, mode);
        }
    }
}

/// The four border segments, clockwise from the top-left corner.
fn border(x1: i32, y1: i32, x2: i32, y2: i32) -> [(i32, i32, i32, i32); 4] {
    [
        (x1, y1, x2, y1),
        (x2, y1, x2, y2),
        (x2, y2, x1, y2),
        (x1, y2, x1, y1),
    ]
}

fn edge_ramps(corners: [Color; 4]) -> [ColorRamp; 4] {
    let [tl, tr, br, bl] = corners;
    [
        ColorRamp::new(tl, tr),
        ColorRamp::new(tr, br),
        ColorRamp::new(br, bl),
        ColorRamp::new(bl, tl),
    ]
}

/// Projection parameter of `(x, y)` on the `start -> end` vector.
pub(crate) fn linear_t(start: (i32, i32), end: (i32, i32), x: i32, y: i32) -> f32 {
    let dx = (end.0 as i64 - start.0 as i64) as f32;
    let dy = (end.1 as i64 - start.1 as i64) as f32;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return 0.0;
    }
    let px = (x as i64 - start.0 as i64) as f32;
    let py = (y as i64 - start.1 as i64) as f32;
    ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
}

/// Distance of `(x, y)` from `center` relative to the distance of `edge`.
pub(crate) fn radial_t(center: (i32, i32), edge: (i32, i32), x: i32, y: i32) -> f32 {
    let ex = (edge.0 as i64 - center.0 as i64) as f32;
    let ey = (edge.1 as i64 - center.1 as i64) as f32;
    let radius = (ex * ex + ey * ey).sqrt();
    if radius == 0.0 {
        return 0.0;
    }
    let px = (x as i64 - center.0 as i64) as f32;
    let py = (y as i64 - center.1 as i64) as f32;
    ((px * px + py * py).sqrt() / radius).clamp(0.0, 1.0)
}
