//! Points, vectors, boxes and the angle helpers shared by the physics engine
//! and the hit-tester.
//!
//! All coordinates are CSS pixels in viewport space: `x` grows to the right,
//! `y` grows downward, and angles are radians measured from +X toward +Y.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

/// A point in viewport space.
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

    /// Translate by `v`.
    #[must_use]
    pub fn offset(self, v: Vector) -> Self {
        Self { x: self.x + v.x, y: self.y + v.y }
    }
}

/// A displacement, velocity or acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector of length `magnitude` pointing along `angle`.
    #[must_use]
    pub fn from_polar(angle: f64, magnitude: f64) -> Self {
        Self { x: angle.cos() * magnitude, y: angle.sin() * magnitude }
    }

    /// Vector from `from` to `to`.
    #[must_use]
    pub fn between(from: Point, to: Point) -> Self {
        Self { x: to.x - from.x, y: to.y - from.y }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn scale(self, k: f64) -> Self {
        Self { x: self.x * k, y: self.y * k }
    }
}

/// Width and height of a box.
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

    #[must_use]
    pub fn half(self) -> Self {
        Self { width: self.width / 2.0, height: self.height / 2.0 }
    }
}

/// An axis-aligned box given by its four edges.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Box with its top-left corner at `origin`.
    #[must_use]
    pub fn from_origin(origin: Point, size: Size) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x + size.width,
            bottom: origin.y + size.height,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Wrap `angle` into `[0, 2π)`. Non-finite input maps to `0`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Smallest absolute angle between `a` and `b`, in `[0, π]`.
#[must_use]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let delta = (a - b).abs().rem_euclid(TAU);
    if !delta.is_finite() {
        return 0.0;
    }
    if delta > PI { TAU - delta } else { delta }
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(p: Point, q: Point) -> f64 {
    Vector::between(p, q).length()
}

/// Whether two boxes share a region of positive area.
///
/// All four comparisons are strict, so boxes that only touch along an edge or
/// at a corner do not overlap.
#[must_use]
pub fn boxes_overlap(a: &Rect, b: &Rect) -> bool {
    a.left < b.right && a.right > b.left && a.top < b.bottom && a.bottom > b.top
}
