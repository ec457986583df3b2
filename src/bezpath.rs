// Copyright 2026 the pathplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bézier paths (up to cubic), recorded from replay.

use std::fmt;
use std::io::Read;
use std::ops::Deref;

use crate::{play, DrawSurface, PathData, PathDataError, Point, Tokenizer};

/// A path made of absolute Bézier elements, possibly with multiple subpaths.
///
/// `BezPath` is a [`DrawSurface`] that records every call, so replaying path data
/// into one captures the fully resolved drawing instructions.
///
/// ```
/// use pathplay::{BezPath, PathEl, Point};
/// let path = BezPath::from_path_data("m1,1 h2 z").unwrap();
/// assert_eq!(
///     path.elements(),
///     &[
///         PathEl::MoveTo(Point::new(1., 1.)),
///         PathEl::LineTo(Point::new(3., 1.)),
///         PathEl::ClosePath,
///     ]
/// );
/// ```
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezPath(Vec<PathEl>);

/// The element of a Bézier path.
///
/// A valid path has `MoveTo` at the beginning of each subpath.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Move directly to the point without drawing anything, starting a new
    /// subpath.
    MoveTo(Point),
    /// Draw a line from the current location to the point.
    LineTo(Point),
    /// Draw a quadratic bezier using the current location and the two points.
    QuadTo(Point, Point),
    /// Draw a cubic bezier using the current location and the three points.
    CurveTo(Point, Point, Point),
    /// Close off the path.
    ClosePath,
}

impl BezPath {
    /// Create a new path.
    pub fn new() -> BezPath {
        BezPath::default()
    }

    /// Replay path data read from `source` into a new path.
    ///
    /// Elements that fail to decode are logged and skipped.
    pub fn from_reader<R: Read>(source: R) -> BezPath {
        let mut path = BezPath::new();
        if let Err(err) = play(Tokenizer::new(source), &mut path) {
            log::warn!("replay stopped early: {err}");
        }
        path
    }

    /// Replay a path-data string into a new path.
    ///
    /// # Errors
    ///
    /// Unlike [`from_reader`](BezPath::from_reader), fails with the first decode
    /// error instead of skipping it.
    pub fn from_path_data(data: &str) -> Result<BezPath, PathDataError> {
        let elements: PathData = data.parse()?;
        if let Some(err) = elements.first_error() {
            return Err(err);
        }
        let mut path = BezPath::new();
        play(&elements, &mut path)?;
        Ok(path)
    }

    /// Push a generic path element onto the path.
    pub fn push(&mut self, el: PathEl) {
        self.0.push(el);
    }

    /// Get the path elements.
    pub fn elements(&self) -> &[PathEl] {
        &self.0
    }

    /// Consume the path, returning its elements.
    pub fn into_elements(self) -> Vec<PathEl> {
        self.0
    }

    /// Shorten the path, keeping the first `len` elements.
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    /// Convert the path to an SVG path string representation.
    ///
    /// Every element is written in its absolute form.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl Deref for BezPath {
    type Target = [PathEl];

    fn deref(&self) -> &[PathEl] {
        &self.0
    }
}

impl FromIterator<PathEl> for BezPath {
    fn from_iter<T: IntoIterator<Item = PathEl>>(iter: T) -> Self {
        BezPath(iter.into_iter().collect())
    }
}

impl Extend<PathEl> for BezPath {
    fn extend<I: IntoIterator<Item = PathEl>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl DrawSurface for BezPath {
    fn move_to(&mut self, p: Point) {
        self.push(PathEl::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(PathEl::LineTo(p));
    }

    fn quad_to(&mut self, ctrl: Point, p: Point) {
        self.push(PathEl::QuadTo(ctrl, p));
    }

    fn curve_to(&mut self, ctrl1: Point, ctrl2: Point, p: Point) {
        self.push(PathEl::CurveTo(ctrl1, ctrl2, p));
    }

    fn close_path(&mut self) {
        self.push(PathEl::ClosePath);
    }
}

impl fmt::Display for PathEl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathEl::MoveTo(p) => write!(f, "M{},{}", p.x, p.y),
            PathEl::LineTo(p) => write!(f, "L{},{}", p.x, p.y),
            PathEl::QuadTo(p1, p2) => write!(f, "Q{},{} {},{}", p1.x, p1.y, p2.x, p2.y),
            PathEl::CurveTo(p1, p2, p3) => write!(
                f,
                "C{},{} {},{} {},{}",
                p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
            ),
            PathEl::ClosePath => write!(f, "Z"),
        }
    }
}

impl fmt::Display for BezPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, el) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{el}")?;
        }
        Ok(())
    }
}
