// Copyright 2026 the pathplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D point.

use std::fmt;
use std::ops::{Add, Sub};

use crate::Vec2;

/// A 2D point in absolute coordinates.
///
/// Coordinates are single precision, matching the precision the path-data
/// scanner produces.
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The x coordinate.
    pub x: f32,
    /// The y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new `Point` with the provided `x` and `y` coordinates.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Convert this point into a `Vec2`.
    #[inline]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns a copy of this point with the x coordinate replaced.
    #[inline]
    #[must_use]
    pub const fn with_x(self, x: f32) -> Point {
        Point::new(x, self.y)
    }

    /// Returns a copy of this point with the y coordinate replaced.
    #[inline]
    #[must_use]
    pub const fn with_y(self, y: f32) -> Point {
        Point::new(self.x, y)
    }

    /// Reflect `other` through this point.
    ///
    /// This is `self + (self - other)`, the implicit first control point of a
    /// smooth curve whose previous control point was `other`.
    ///
    /// ```
    /// use pathplay::Point;
    /// let reflected = Point::new(10., 10.).reflect(Point::new(10., 0.));
    /// assert_eq!(reflected, Point::new(10., 20.));
    /// ```
    #[inline]
    #[must_use]
    pub fn reflect(self, other: Point) -> Point {
        self + (self - other)
    }
}

impl From<(f32, f32)> for Point {
    #[inline]
    fn from(v: (f32, f32)) -> Point {
        Point { x: v.0, y: v.1 }
    }
}

impl From<Point> for (f32, f32) {
    #[inline]
    fn from(v: Point) -> (f32, f32) {
        (v.x, v.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Vec2) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub<Point> for Point {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "(")?;
        fmt::Display::fmt(&self.x, formatter)?;
        write!(formatter, ", ")?;
        fmt::Display::fmt(&self.y, formatter)?;
        write!(formatter, ")")
    }
}

#[cfg(feature = "mint")]
impl From<Point> for mint::Point2<f32> {
    #[inline]
    fn from(p: Point) -> mint::Point2<f32> {
        mint::Point2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Point2<f32>> for Point {
    #[inline]
    fn from(p: mint::Point2<f32>) -> Point {
        Point { x: p.x, y: p.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        assert_eq!(
            Point::new(0., 0.) - Point::new(-5., 101.),
            Vec2::new(5., -101.)
        );
        assert_eq!(Point::new(1., 1.) + Vec2::new(2., 2.), Point::new(3., 3.));
    }

    #[test]
    fn reflection() {
        let center = Point::new(10., 10.);
        assert_eq!(center.reflect(Point::new(10., 0.)), Point::new(10., 20.));
        assert_eq!(center.reflect(center), center);
        assert_eq!(
            Point::new(-1., 2.).reflect(Point::new(3., -4.)),
            Point::new(-5., 8.)
        );
    }

    #[test]
    fn replace_components() {
        let p = Point::new(1., 2.);
        assert_eq!(p.with_x(5.), Point::new(5., 2.));
        assert_eq!(p.with_y(-5.), Point::new(1., -5.));
    }

    #[test]
    fn display() {
        let p = Point::new(0.125, 9.5);
        assert_eq!(format!("{}", p), "(0.125, 9.5)");
        assert_eq!(format!("{:.1}", Point::new(0.14, 9.5)), "(0.1, 9.5)");
    }
}
