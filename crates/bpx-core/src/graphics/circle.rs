//! Circle rasterization
//!
//! Midpoint circle algorithm with the decision variable starting at
//! `3 - 2r`. Each generated `(x, y)` pair is mirrored eight ways: fills
//! draw horizontal spans between the mirrored points, outlines plot the
//! eight points directly. Every pixel is bounds-checked on its own.
//!
//! Spans of consecutive steps overlap, so a fill can visit a pixel more
//! than once. `Replace` is unaffected; accumulating modes such as `Add`
//! compound on those pixels.

use super::extent;
use crate::blend::{BlendMode, blend};
use crate::color::Color;
use crate::image::Image;
use crate::ramp::ColorRamp;

/// Run the midpoint stepper, calling `step(x, y)` for every octant point.
fn midpoint<F: FnMut(i64, i64)>(radius: i32, mut step: F) {
    let (mut x, mut y) = (0i64, radius as i64);
    let mut d = 3 - 2 * y;
    while y >= x {
        step(x, y);
        x += 1;
        if d > 0 {
            y -= 1;
            d += 4 * (x - y) + 10;
        } else {
            d += 4 * x + 6;
        }
    }
}

/// Visit the pixels of a filled circle, bounds-checked.
fn trace_disc<F>(width: i32, height: i32, cx: i32, cy: i32, radius: i32, mut plot: F)
where
    F: FnMut(i32, i32),
{
    let (w, h) = (width as i64, height as i64);
    let (cx, cy) = (cx as i64, cy as i64);
    let span = |half: i64, row: i64, plot: &mut F| {
        if row < 0 || row >= h {
            return;
        }
        let from = (cx - half).max(0);
        let to = (cx + half).min(w - 1);
        for i in from..=to {
            plot(i as i32, row as i32);
        }
    };

    midpoint(radius, |x, y| {
        span(x, cy + y, &mut plot);
        span(x, cy - y, &mut plot);
        span(y, cy + x, &mut plot);
        span(y, cy - x, &mut plot);
    });
}

/// Visit the eight symmetric outline points of each step, bounds-checked.
fn trace_ring<F>(width: i32, height: i32, cx: i32, cy: i32, radius: i32, mut plot: F)
where
    F: FnMut(i32, i32),
{
    let (w, h) = (width as i64, height as i64);
    let (cx, cy) = (cx as i64, cy as i64);
    let mut emit = |px: i64, py: i64| {
        if (0..w).contains(&px) && (0..h).contains(&py) {
            plot(px as i32, py as i32);
        }
    };

    midpoint(radius, |x, y| {
        for (px, py1, py2) in [
            (cx + x, cy + y, cy - y),
            (cx - x, cy + y, cy - y),
            (cx + y, cy + x, cy - x),
            (cx - y, cy + x, cy - x),
        ] {
            emit(px, py1);
            emit(px, py2);
        }
    });
}

/// Radii drawn by a thick outline: `radius + i` for `i` in
/// `-thick/2..=thick/2`, skipping negative values.
fn thick_radii(radius: i32, thick: i32) -> impl Iterator<Item = i32> {
    let half = (thick / 2).max(0);
    (-half..=half)
        .map(move |i| radius.saturating_add(i))
        .filter(|r| *r >= 0)
}

impl Image<'_> {
    /// Fill a circle of `radius` centered on `(cx, cy)`.
    pub fn circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color, mode: BlendMode) {
        let (w, h) = extent(self);
        trace_disc(w, h, cx, cy, radius, |x, y| {
            self.blend_unchecked(x, y, color, mode)
        });
    }

    /// Fill a circle through `mapper(x, y, current)`.
    pub fn circle_map<F>(&mut self, cx: i32, cy: i32, radius: i32, mut mapper: F)
    where
        F: FnMut(i32, i32, Color) -> Color,
    {
        let (w, h) = extent(self);
        trace_disc(w, h, cx, cy, radius, |x, y| {
            self.map_unchecked(x, y, &mut mapper)
        });
    }

    /// Fill a circle sampling `ramp` by distance from the center:
    /// `t = distance / radius`. A zero radius samples `t = 0`.
    pub fn circle_gradient(
        &mut self,
        cx: i32,
        cy: i32,
        radius: i32,
        ramp: &ColorRamp,
        mode: BlendMode,
    ) {
        let (w, h) = extent(self);
        trace_disc(w, h, cx, cy, radius, |x, y| {
            let t = if radius > 0 {
                let dx = (x as i64 - cx as i64) as f32;
                let dy = (y as i64 - cy as i64) as f32;
                (dx * dx + dy * dy).sqrt() / radius as f32
            } else {
                0.0
            };
            let (ux, uy) = (x as u32, y as u32);
            let out = blend(self.get_unchecked(ux, uy), ramp.get(t), mode);
            self.set_unchecked(ux, uy, out);
        });
    }

    /// Draw a one-pixel circle outline.
    pub fn circle_lines(&mut self, cx: i32, cy: i32, radius: i32, color: Color, mode: BlendMode) {
        let (w, h) = extent(self);
        trace_ring(w, h, cx, cy, radius, |x, y| {
            self.blend_unchecked(x, y, color, mode)
        });
    }

    /// Draw a circle outline through `mapper(x, y, current)`.
    pub fn circle_lines_map<F>(&mut self, cx: i32, cy: i32, radius: i32, mut mapper: F)
    where
        F: FnMut(i32, i32, Color) -> Color,
    {
        let (w, h) = extent(self);
        trace_ring(w, h, cx, cy, radius, |x, y| {
            self.map_unchecked(x, y, &mut mapper)
        });
    }

    /// Draw concentric outlines covering `thick` pixels around `radius`.
    #[allow(clippy::too_many_arguments)]
    pub fn circle_lines_thick(
        &mut self,
        cx: i32,
        cy: i32,
        radius: i32,
        thick: i32,
        color: Color,
        mode: BlendMode,
    ) {
        for r in thick_radii(radius, thick) {
            self.circle_lines(cx, cy, r, color, mode);
        }
    }

    /// Thick outline through `mapper`.
    pub fn circle_lines_thick_map<F>(&mut self, cx: i32, cy: i32, radius: i32, thick: i32, mut mapper: F)
    where
        F: FnMut(i32, i32, Color) -> Color,
    {
        for r in thick_radii(radius, thick) {
            self.circle_lines_map(cx, cy, r, &mut mapper);
        }
    }
}
