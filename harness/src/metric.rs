//! Distance metrics over 2-D coordinates.
//!
//! Stateless helpers for building factors: grid cells, tile positions,
//! anything addressed by an `(x, y)` pair.

use std::ops::Add;

/// Scalar usable as a coordinate component.
pub trait Coordinate: Copy + PartialOrd + Add<Output = Self> {
    /// `|a - b|` without overflow for `a < b`.
    fn distance(a: Self, b: Self) -> Self;

    /// Widen to `f64` for Euclidean distance.
    fn to_f64(self) -> f64;
}

impl Coordinate for i32 {
    fn distance(a: Self, b: Self) -> Self {
        if a > b {
            a - b
        } else {
            b - a
        }
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Coordinate for i64 {
    fn distance(a: Self, b: Self) -> Self {
        if a > b {
            a - b
        } else {
            b - a
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Coordinate for f32 {
    fn distance(a: Self, b: Self) -> Self {
        (a - b).abs()
    }

    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl Coordinate for f64 {
    fn distance(a: Self, b: Self) -> Self {
        (a - b).abs()
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// Sum of axis distances (4-connected moves).
pub fn manhattan<T: Coordinate>(a: (T, T), b: (T, T)) -> T {
    T::distance(a.0, b.0) + T::distance(a.1, b.1)
}

/// Largest axis distance (8-connected moves).
pub fn chebyshev<T: Coordinate>(a: (T, T), b: (T, T)) -> T {
    let dx = T::distance(a.0, b.0);
    let dy = T::distance(a.1, b.1);
    if dx >= dy {
        dx
    } else {
        dy
    }
}

/// Straight-line distance.
pub fn euclidean<T: Coordinate>(a: (T, T), b: (T, T)) -> f64 {
    let dx = T::distance(a.0, b.0).to_f64();
    let dy = T::distance(a.1, b.1).to_f64();
    dx.hypot(dy)
}
