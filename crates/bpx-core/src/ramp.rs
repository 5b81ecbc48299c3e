//! Color ramps
//!
//! A [`ColorRamp`] maps a position `t ∈ [0, 1]` to a color by linear
//! interpolation between sorted control points. Two-point ramps, by far
//! the most common, live inline without touching the heap; the storage is
//! promoted to a vector only when a third distinct position is added.

use crate::color::Color;
use crate::error::{Error, Result};

/// One control point of a [`ColorRamp`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampPoint {
    pub color: Color,
    pub position: f32,
}

#[derive(Debug, Clone, PartialEq)]
enum Points {
    /// Up to two points, stored inline. `len` is 1 or 2.
    Fixed { points: [RampPoint; 2], len: usize },
    Dynamic(Vec<RampPoint>),
}

/// Ordered set of `(position, color)` control points.
///
/// Positions are unique, sorted ascending and lie in `[0, 1]`. A ramp
/// always has at least one point.
///
/// # Examples
///
/// ```
/// use bpx_core::{Color, ColorRamp};
///
/// let ramp = ColorRamp::new(Color::WHITE, Color::BLACK);
/// assert_eq!(ramp.get(0.0), Color::WHITE);
/// assert_eq!(ramp.get(0.5), Color::new(127, 127, 127, 255));
/// assert_eq!(ramp.get(1.0), Color::BLACK);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    points: Points,
}

impl ColorRamp {
    /// Two-point ramp from `start` at 0.0 to `end` at 1.0.
    pub fn new(start: Color, end: Color) -> Self {
        ColorRamp {
            points: Points::Fixed {
                points: [
                    RampPoint {
                        color: start,
                        position: 0.0,
                    },
                    RampPoint {
                        color: end,
                        position: 1.0,
                    },
                ],
                len: 2,
            },
        }
    }

    /// Single-point ramp that returns `color` everywhere.
    pub fn single(color: Color) -> Self {
        let p = RampPoint {
            color,
            position: 0.0,
        };
        ColorRamp {
            points: Points::Fixed {
                points: [p, p],
                len: 1,
            },
        }
    }

    /// Build a ramp from `(color, position)` pairs.
    ///
    /// Pairs are inserted in order with [`ColorRamp::add`] semantics, so a
    /// later duplicate position replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the iterator is empty or a
    /// position is NaN.
    pub fn from_points<I>(points: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Color, f32)>,
    {
        let mut iter = points.into_iter();
        let (color, position) = iter
            .next()
            .ok_or_else(|| Error::InvalidParameter("a color ramp needs at least one point".into()))?;
        let position = checked_position(position)?;

        let mut ramp = ColorRamp::single(color);
        if let Points::Fixed { points, .. } = &mut ramp.points {
            points[0].position = position;
        }
        for (color, position) in iter {
            ramp.add(color, position)?;
        }
        Ok(ramp)
    }

    /// Insert a control point, or recolor the point at the same position.
    ///
    /// `position` is clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `position` is NaN.
    pub fn add(&mut self, color: Color, position: f32) -> Result<()> {
        let position = checked_position(position)?;

        if let Some(p) = self
            .points_mut()
            .iter_mut()
            .find(|p| p.position == position)
        {
            p.color = color;
            return Ok(());
        }

        let new_point = RampPoint { color, position };
        match &mut self.points {
            Points::Fixed { points, len } if *len < 2 => {
                points[1] = new_point;
                *len = 2;
                if points[1].position < points[0].position {
                    points.swap(0, 1);
                }
            }
            Points::Fixed { points, .. } => {
                let mut v = Vec::with_capacity(3);
                v.extend_from_slice(&points[..]);
                insert_sorted(&mut v, new_point);
                self.points = Points::Dynamic(v);
            }
            Points::Dynamic(v) => insert_sorted(v, new_point),
        }
        Ok(())
    }

    /// Color at position `t`.
    ///
    /// `t` is clamped to `[0, 1]`; NaN yields the first color. Positions
    /// before the first point or after the last return that point's color.
    pub fn get(&self, t: f32) -> Color {
        let points = self.points();
        let first = points[0];
        if t.is_nan() {
            return first.color;
        }
        let t = t.clamp(0.0, 1.0);
        if t <= first.position {
            return first.color;
        }
        let last = points[points.len() - 1];
        if t >= last.position {
            return last.color;
        }

        for pair in points.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);
            if t >= p1.position && t <= p2.position {
                let f = (t - p1.position) / (p2.position - p1.position);
                return p1.color.lerp(p2.color, f);
            }
        }
        last.color
    }

    /// Control points, sorted by position.
    pub fn points(&self) -> &[RampPoint] {
        match &self.points {
            Points::Fixed { points, len } => &points[..*len],
            Points::Dynamic(v) => v,
        }
    }

    fn points_mut(&mut self) -> &mut [RampPoint] {
        match &mut self.points {
            Points::Fixed { points, len } => &mut points[..*len],
            Points::Dynamic(v) => v,
        }
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points().len()
    }

    /// Always `false`: a ramp holds at least one point.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the points have moved to heap storage.
    pub fn is_dynamic(&self) -> bool {
        matches!(self.points, Points::Dynamic(_))
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        ColorRamp::new(Color::BLACK, Color::WHITE)
    }
}

fn checked_position(position: f32) -> Result<f32> {
    if position.is_nan() {
        return Err(Error::InvalidParameter("ramp position is NaN".into()));
    }
    Ok(position.clamp(0.0, 1.0))
}

fn insert_sorted(points: &mut Vec<RampPoint>, point: RampPoint) {
    let idx = points.partition_point(|p| p.position < point.position);
    points.insert(idx, point);
}
