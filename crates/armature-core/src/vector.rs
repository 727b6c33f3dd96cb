//! Minimal planar vector capability set.
//!
//! The solver's control flow (extraction, evaluation, descent) only needs a
//! handful of 2D operations, so it is written against this trait rather than
//! a concrete vector type. [`nalgebra::Vector2<f32>`] is the canonical
//! implementation used throughout the workspace; `[f32; 2]` is provided for
//! callers that don't want to pull in a linear algebra crate.

use std::fmt::Debug;

use nalgebra::Vector2;

/// A 2D vector usable by the kinematics core.
///
/// Only `new`, `x` and `y` are required; the arithmetic is provided on top
/// of them. Implementations may override the provided methods with faster
/// native operations.
pub trait PlanarVector: Copy + PartialEq + Debug {
    /// Construct from components.
    fn new(x: f32, y: f32) -> Self;

    /// Horizontal component.
    fn x(&self) -> f32;

    /// Vertical component.
    fn y(&self) -> f32;

    /// Component-wise sum.
    fn add(&self, rhs: &Self) -> Self {
        Self::new(self.x() + rhs.x(), self.y() + rhs.y())
    }

    /// Component-wise difference.
    fn sub(&self, rhs: &Self) -> Self {
        Self::new(self.x() - rhs.x(), self.y() - rhs.y())
    }

    /// Uniform scale.
    fn scale(&self, factor: f32) -> Self {
        Self::new(self.x() * factor, self.y() * factor)
    }

    /// Euclidean norm.
    fn norm(&self) -> f32 {
        self.x().hypot(self.y())
    }

    /// Unit vector in the same direction. The zero vector normalizes to
    /// itself.
    fn normalize(&self) -> Self {
        let n = self.norm();
        if n > 0.0 {
            self.scale(1.0 / n)
        } else {
            *self
        }
    }

    /// Euclidean distance to another point.
    fn distance(&self, other: &Self) -> f32 {
        self.sub(other).norm()
    }

    /// Direction angle in radians via `atan2(y, x)`.
    ///
    /// The zero vector yields 0 (Rust's `atan2(0, 0)` convention), which is
    /// the documented angle for zero-length segments.
    fn heading(&self) -> f32 {
        self.y().atan2(self.x())
    }

    /// Construct from a direction angle and a length.
    fn from_polar(angle: f32, len: f32) -> Self {
        Self::new(len * angle.cos(), len * angle.sin())
    }
}

impl PlanarVector for Vector2<f32> {
    fn new(x: f32, y: f32) -> Self {
        Vector2::new(x, y)
    }

    fn x(&self) -> f32 {
        self[0]
    }

    fn y(&self) -> f32 {
        self[1]
    }

    fn norm(&self) -> f32 {
        nalgebra::Vector2::norm(self)
    }

    fn distance(&self, other: &Self) -> f32 {
        (self - other).norm()
    }
}

impl PlanarVector for [f32; 2] {
    fn new(x: f32, y: f32) -> Self {
        [x, y]
    }

    fn x(&self) -> f32 {
        self[0]
    }

    fn y(&self) -> f32 {
        self[1]
    }
}
