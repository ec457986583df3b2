// Copyright 2026 the pathplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The typed elements a path-data stream decodes into.

use std::fmt;

use crate::{PathDataError, Point, Vec2};

/// One decoded path-data element.
///
/// Every variant apart from [`UnknownCommand`], [`DecodeError`] and
/// [`EndOfStream`] is a single drawing instruction. A command letter followed
/// by several argument groups decodes into several elements of the same kind,
/// so `l 1,1 2,2` and `l 1,1 l 2,2` produce the same two `LineToRel`s.
///
/// Relative variants carry their payload exactly as written; the points are
/// offsets from the current point and are only resolved during replay.
///
/// [`UnknownCommand`]: Command::UnknownCommand
/// [`DecodeError`]: Command::DecodeError
/// [`EndOfStream`]: Command::EndOfStream
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// `z`, `Z`: close the current subpath.
    ClosePath,
    /// `M`: start a new subpath at the given point.
    ///
    /// Further coordinate pairs after the same letter are also moves; they are
    /// not reinterpreted as line-tos.
    MoveTo(Point),
    /// `m`: start a new subpath, offset from the current point.
    MoveToRel(Point),
    /// `L`: draw a line to the given point.
    LineTo(Point),
    /// `l`: draw a line, offset from the current point.
    LineToRel(Point),
    /// `H`: draw a horizontal line to the given x.
    Horiz(f32),
    /// `h`: draw a horizontal line by the given distance.
    HorizRel(f32),
    /// `V`: draw a vertical line to the given y.
    Vert(f32),
    /// `v`: draw a vertical line by the given distance.
    VertRel(f32),
    /// `C`: draw a cubic Bézier curve.
    CubicTo(CubicTo),
    /// `c`: draw a cubic Bézier curve with every point offset from the current point.
    CubicToRel(CubicTo),
    /// `S`: draw a smooth cubic Bézier curve.
    ///
    /// The first control point is implied; see [`SmoothCubicTo`].
    SmoothCubicTo(SmoothCubicTo),
    /// `s`: draw a smooth cubic Bézier curve with offsets from the current point.
    SmoothCubicToRel(SmoothCubicTo),
    /// `Q`: draw a quadratic Bézier curve.
    QuadTo(QuadTo),
    /// `q`: draw a quadratic Bézier curve with offsets from the current point.
    QuadToRel(QuadTo),
    /// `T`: draw a smooth quadratic Bézier curve to the given point.
    ///
    /// The control point is the reflection of the previous quadratic control
    /// point, or the current point if the previous element was not a quadratic.
    SmoothQuadTo(Point),
    /// `t`: draw a smooth quadratic Bézier curve, offset from the current point.
    SmoothQuadToRel(Point),
    /// `A`: an elliptical arc.
    ///
    /// Arcs are decoded but never expanded into curves.
    EllipticArc(ArcTo),
    /// `a`: an elliptical arc whose endpoint is offset from the current point.
    EllipticArcRel(ArcTo),
    /// A command letter outside the path-data alphabet, with its raw arguments.
    UnknownCommand(String),
    /// A command whose arguments could not be decoded.
    DecodeError {
        /// The command letter followed by its raw argument text.
        raw: String,
        /// What went wrong.
        cause: PathDataError,
    },
    /// The byte source is exhausted. Not a real command.
    EndOfStream,
}

/// The parameters of a `CubicTo` or `CubicToRel` element.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicTo {
    /// The first control point (from the start)
    pub ctrl1: Point,
    /// The second control point (from the start)
    pub ctrl2: Point,
    /// The point that this curve ends at
    pub to: Point,
}

/// The parameters of a `SmoothCubicTo` or `SmoothCubicToRel` element.
///
/// The first control point is the reflection of the second control point of the
/// previous curve through the current point, or the current point itself if the
/// previous element was not a cubic Bézier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothCubicTo {
    /// The second control point (from the start)
    pub ctrl2: Point,
    /// The point that this curve ends at
    pub to: Point,
}

/// The parameters of a `QuadTo` or `QuadToRel` element.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadTo {
    /// The control point
    pub ctrl: Point,
    /// The point that this curve ends at
    pub to: Point,
}

/// The arguments of an elliptical arc, as written.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcTo {
    /// The arc's radii, before rotation.
    pub radii: Vec2,
    /// How much the ellipse's x axis is rotated, in degrees.
    pub x_rotation: f32,
    /// Does this arc sweep through more than π radians?
    pub large_arc: bool,
    /// Determines if the arc should begin moving at positive angles.
    pub sweep: bool,
    /// The arc's end point.
    pub to: Point,
}

impl Command {
    /// Is this a drawing instruction, rather than an error or the end sentinel?
    pub fn is_drawable(&self) -> bool {
        !matches!(
            self,
            Command::UnknownCommand(_) | Command::DecodeError { .. } | Command::EndOfStream
        )
    }

    /// Is this an [`UnknownCommand`](Command::UnknownCommand) or a
    /// [`DecodeError`](Command::DecodeError)?
    pub fn is_error(&self) -> bool {
        matches!(self, Command::UnknownCommand(_) | Command::DecodeError { .. })
    }

    /// The error this element stands for, if it is an error element.
    ///
    /// An `UnknownCommand` reports its first character as
    /// [`PathDataError::UnknownCommand`].
    pub fn cause(&self) -> Option<PathDataError> {
        match self {
            Command::DecodeError { cause, .. } => Some(cause.clone()),
            Command::UnknownCommand(raw) => {
                Some(PathDataError::UnknownCommand(raw.chars().next().unwrap_or('\0')))
            }
            _ => None,
        }
    }

    /// The path-data letter that produces this element, if there is one.
    pub fn letter(&self) -> Option<char> {
        let letter = match self {
            Command::ClosePath => 'Z',
            Command::MoveTo(_) => 'M',
            Command::MoveToRel(_) => 'm',
            Command::LineTo(_) => 'L',
            Command::LineToRel(_) => 'l',
            Command::Horiz(_) => 'H',
            Command::HorizRel(_) => 'h',
            Command::Vert(_) => 'V',
            Command::VertRel(_) => 'v',
            Command::CubicTo(_) => 'C',
            Command::CubicToRel(_) => 'c',
            Command::SmoothCubicTo(_) => 'S',
            Command::SmoothCubicToRel(_) => 's',
            Command::QuadTo(_) => 'Q',
            Command::QuadToRel(_) => 'q',
            Command::SmoothQuadTo(_) => 'T',
            Command::SmoothQuadToRel(_) => 't',
            Command::EllipticArc(_) => 'A',
            Command::EllipticArcRel(_) => 'a',
            Command::UnknownCommand(_) | Command::DecodeError { .. } | Command::EndOfStream => {
                return None
            }
        };
        Some(letter)
    }
}

// Stringify

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(letter) = self.letter() {
            write!(f, "{letter}")?;
        }
        match self {
            Command::ClosePath | Command::EndOfStream => Ok(()),
            Command::MoveTo(p)
            | Command::MoveToRel(p)
            | Command::LineTo(p)
            | Command::LineToRel(p)
            | Command::SmoothQuadTo(p)
            | Command::SmoothQuadToRel(p) => write_point(p, f),
            Command::Horiz(v) | Command::HorizRel(v) | Command::Vert(v) | Command::VertRel(v) => {
                write!(f, "{v}")
            }
            Command::CubicTo(c) | Command::CubicToRel(c) => c.write_vals(f),
            Command::SmoothCubicTo(c) | Command::SmoothCubicToRel(c) => c.write_vals(f),
            Command::QuadTo(q) | Command::QuadToRel(q) => q.write_vals(f),
            Command::EllipticArc(a) | Command::EllipticArcRel(a) => a.write_vals(f),
            Command::UnknownCommand(raw) | Command::DecodeError { raw, .. } => {
                write!(f, "{raw}")
            }
        }
    }
}

impl CubicTo {
    fn write_vals(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} {},{} {},{}",
            self.ctrl1.x, self.ctrl1.y, self.ctrl2.x, self.ctrl2.y, self.to.x, self.to.y
        )
    }
}

impl SmoothCubicTo {
    fn write_vals(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} {},{}",
            self.ctrl2.x, self.ctrl2.y, self.to.x, self.to.y
        )
    }
}

impl QuadTo {
    fn write_vals(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} {},{}",
            self.ctrl.x, self.ctrl.y, self.to.x, self.to.y
        )
    }
}

impl ArcTo {
    fn write_vals(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} {} {},{} {},{}",
            self.radii.x,
            self.radii.y,
            self.x_rotation,
            u8::from(self.large_arc),
            u8::from(self.sweep),
            self.to.x,
            self.to.y
        )
    }
}

fn write_point(Point { x, y }: &Point, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{x},{y}")
}
