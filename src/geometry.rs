//! Geometry primitives: points, sizes, rectangles and angle helpers.
//!
//! All coordinates live in the host's reference frame (the view the touches
//! were reported in). Angles are radians unless a function name says
//! otherwise.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::{PI, TAU};
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A point in the reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle of the vector from `self` to `other`, as returned by `atan2`.
    #[must_use]
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

/// A displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Vec2;

    fn sub(self, rhs: Point) -> Vec2 {
        Vec2 { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    fn add(self, rhs: Vec2) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

/// Width and height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions multiplied by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self { width: self.width * factor, height: self.height * factor }
    }
}

/// Axis-aligned rectangle stored as origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Whether `pt` lies inside the rectangle. The far edges are exclusive.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.min_x() && pt.x < self.max_x() && pt.y >= self.min_y() && pt.y < self.max_y()
    }

    /// Clamp the origin so the rectangle lies within `bounds` (anchored at 0,0).
    ///
    /// Each axis is clamped independently. A rectangle wider or taller than
    /// `bounds` ends up pinned to 0 on that axis.
    #[must_use]
    pub fn clamped_to(self, bounds: Size) -> Self {
        Self {
            x: clamp_axis(self.x, self.width, bounds.width),
            y: clamp_axis(self.y, self.height, bounds.height),
            ..self
        }
    }

    /// Shrink the rectangle to at most `bounds`, then clamp its origin.
    ///
    /// Unlike [`Rect::clamped_to`] the result always satisfies the viewport
    /// invariant, even for oversized input.
    #[must_use]
    pub fn confined_to(self, bounds: Size) -> Self {
        Self {
            width: self.width.min(bounds.width.max(0.0)),
            height: self.height.min(bounds.height.max(0.0)),
            ..self
        }
        .clamped_to(bounds)
    }

    /// Whether the rectangle lies entirely within `bounds`, with `eps` slack.
    #[must_use]
    pub fn is_within(&self, bounds: Size, eps: f64) -> bool {
        self.x >= -eps && self.y >= -eps && self.max_x() <= bounds.width + eps && self.max_y() <= bounds.height + eps
    }

    /// The rectangle moved by `delta`.
    #[must_use]
    pub fn translated(self, delta: Vec2) -> Self {
        Self { x: self.x + delta.x, y: self.y + delta.y, ..self }
    }
}

fn clamp_axis(origin: f64, extent: f64, bound: f64) -> f64 {
    // Not `f64::clamp`: that panics when the upper bound drops below zero.
    origin.min(bound - extent).max(0.0)
}

// ── Angles ──────────────────────────────────────────────────────

/// Wrap an angle in radians into `(-π, π]`.
#[must_use]
pub fn normalize_signed_radians(rad: f64) -> f64 {
    if !rad.is_finite() {
        return 0.0;
    }
    let wrapped = rad.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Wrap an angle in radians into `[0, 2π)`.
#[must_use]
pub fn normalize_radians(rad: f64) -> f64 {
    if !rad.is_finite() {
        return 0.0;
    }
    // rem_euclid can round tiny negative inputs up to exactly TAU.
    let wrapped = rad.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Wrap an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees_360(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}
