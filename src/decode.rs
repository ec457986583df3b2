// Copyright 2026 the pathplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turning one command letter and its argument bytes into elements.

use smallvec::SmallVec;

use crate::scan::{check_arity, group_arcs, group_points, scan_numbers};
use crate::{Command, CubicTo, GroupShape, PathDataError, Point, QuadTo, SmoothCubicTo};

/// The elements decoded from one command letter and its arguments.
pub type Decoded = SmallVec<[Command; 4]>;

/// The twenty command letters of the path-data alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Verb {
    /// `Z`
    CloseAbs = b'Z',
    /// `z`
    CloseRel = b'z',
    /// `M`
    MoveAbs = b'M',
    /// `m`
    MoveRel = b'm',
    /// `L`
    LineAbs = b'L',
    /// `l`
    LineRel = b'l',
    /// `H`
    HorizAbs = b'H',
    /// `h`
    HorizRel = b'h',
    /// `V`
    VertAbs = b'V',
    /// `v`
    VertRel = b'v',
    /// `C`
    CubicAbs = b'C',
    /// `c`
    CubicRel = b'c',
    /// `S`
    SmoothCubicAbs = b'S',
    /// `s`
    SmoothCubicRel = b's',
    /// `Q`
    QuadAbs = b'Q',
    /// `q`
    QuadRel = b'q',
    /// `T`
    SmoothQuadAbs = b'T',
    /// `t`
    SmoothQuadRel = b't',
    /// `A`
    ArcAbs = b'A',
    /// `a`
    ArcRel = b'a',
}

impl Verb {
    /// Look up the verb for a byte, if it is a command letter.
    pub fn from_u8(c: u8) -> Option<Verb> {
        match c {
            b'Z' => Some(Verb::CloseAbs),
            b'z' => Some(Verb::CloseRel),
            b'M' => Some(Verb::MoveAbs),
            b'm' => Some(Verb::MoveRel),
            b'L' => Some(Verb::LineAbs),
            b'l' => Some(Verb::LineRel),
            b'H' => Some(Verb::HorizAbs),
            b'h' => Some(Verb::HorizRel),
            b'V' => Some(Verb::VertAbs),
            b'v' => Some(Verb::VertRel),
            b'C' => Some(Verb::CubicAbs),
            b'c' => Some(Verb::CubicRel),
            b'S' => Some(Verb::SmoothCubicAbs),
            b's' => Some(Verb::SmoothCubicRel),
            b'Q' => Some(Verb::QuadAbs),
            b'q' => Some(Verb::QuadRel),
            b'T' => Some(Verb::SmoothQuadAbs),
            b't' => Some(Verb::SmoothQuadRel),
            b'A' => Some(Verb::ArcAbs),
            b'a' => Some(Verb::ArcRel),
            _ => None,
        }
    }

    /// The letter this verb is written as.
    #[inline]
    pub fn letter(self) -> char {
        char::from(self as u8)
    }

    /// Is this the lower-case, relative form?
    #[inline]
    pub fn is_relative(self) -> bool {
        (self as u8).is_ascii_lowercase()
    }

    /// The argument group this verb repeats, or `None` for close-path.
    pub fn group_shape(self) -> Option<GroupShape> {
        match self {
            Verb::CloseAbs | Verb::CloseRel => None,
            Verb::MoveAbs
            | Verb::MoveRel
            | Verb::LineAbs
            | Verb::LineRel
            | Verb::SmoothQuadAbs
            | Verb::SmoothQuadRel => Some(GroupShape::Vectors(1)),
            Verb::HorizAbs | Verb::HorizRel | Verb::VertAbs | Verb::VertRel => {
                Some(GroupShape::Values(1))
            }
            Verb::CubicAbs | Verb::CubicRel => Some(GroupShape::Vectors(3)),
            Verb::SmoothCubicAbs | Verb::SmoothCubicRel | Verb::QuadAbs | Verb::QuadRel => {
                Some(GroupShape::Vectors(2))
            }
            Verb::ArcAbs | Verb::ArcRel => Some(GroupShape::Values(7)),
        }
    }
}

/// Returns true if `c` is one of the twenty command letters.
#[inline]
pub fn is_command_letter(c: u8) -> bool {
    Verb::from_u8(c).is_some()
}

/// Decode one command.
///
/// `letter` is the byte that opened the command and `args` everything up to the
/// next command letter. The result is never empty: it holds one element per
/// argument group, or a single [`Command::UnknownCommand`] or
/// [`Command::DecodeError`] if the command could not be decoded.
///
/// ```
/// use pathplay::{decode, Command, Point};
/// let decoded = decode(b'M', b" 0,0 1,1");
/// assert_eq!(
///     decoded.as_slice(),
///     &[
///         Command::MoveTo(Point::new(0., 0.)),
///         Command::MoveTo(Point::new(1., 1.)),
///     ]
/// );
/// ```
pub fn decode(letter: u8, args: &[u8]) -> Decoded {
    let Some(verb) = Verb::from_u8(letter) else {
        let raw = raw_text(letter, args);
        log::debug!("unknown command {raw:?}");
        return smallvec::smallvec![Command::UnknownCommand(raw)];
    };
    match decode_verb(verb, args) {
        Ok(decoded) => {
            log::trace!("decoded {} into {} elements", verb.letter(), decoded.len());
            decoded
        }
        Err(cause) => {
            let raw = raw_text(letter, args);
            log::debug!("failed to decode {raw:?}: {cause}");
            smallvec::smallvec![Command::DecodeError { raw, cause }]
        }
    }
}

fn raw_text(letter: u8, args: &[u8]) -> String {
    let mut raw = Vec::with_capacity(args.len() + 1);
    raw.push(letter);
    raw.extend_from_slice(args);
    String::from_utf8_lossy(&raw).into_owned()
}

fn decode_verb(verb: Verb, args: &[u8]) -> Result<Decoded, PathDataError> {
    let Some(shape) = verb.group_shape() else {
        // Anything trailing a close-path is ignored.
        return Ok(smallvec::smallvec![Command::ClosePath]);
    };
    let letter = verb.letter();
    let values = scan_numbers(args)?;
    check_arity(letter, shape, &values)?;
    let decoded = match verb {
        Verb::CloseAbs | Verb::CloseRel => smallvec::smallvec![Command::ClosePath],
        Verb::MoveAbs => points(letter, &values, Command::MoveTo)?,
        Verb::MoveRel => points(letter, &values, Command::MoveToRel)?,
        Verb::LineAbs => points(letter, &values, Command::LineTo)?,
        Verb::LineRel => points(letter, &values, Command::LineToRel)?,
        Verb::SmoothQuadAbs => points(letter, &values, Command::SmoothQuadTo)?,
        Verb::SmoothQuadRel => points(letter, &values, Command::SmoothQuadToRel)?,
        Verb::HorizAbs => values.iter().copied().map(Command::Horiz).collect(),
        Verb::HorizRel => values.iter().copied().map(Command::HorizRel).collect(),
        Verb::VertAbs => values.iter().copied().map(Command::Vert).collect(),
        Verb::VertRel => values.iter().copied().map(Command::VertRel).collect(),
        Verb::CubicAbs | Verb::CubicRel => group_points(letter, &values)?
            .chunks_exact(3)
            .map(|p| {
                let cubic = CubicTo {
                    ctrl1: p[0],
                    ctrl2: p[1],
                    to: p[2],
                };
                if verb.is_relative() {
                    Command::CubicToRel(cubic)
                } else {
                    Command::CubicTo(cubic)
                }
            })
            .collect(),
        Verb::SmoothCubicAbs | Verb::SmoothCubicRel => group_points(letter, &values)?
            .chunks_exact(2)
            .map(|p| {
                let smooth = SmoothCubicTo {
                    ctrl2: p[0],
                    to: p[1],
                };
                if verb.is_relative() {
                    Command::SmoothCubicToRel(smooth)
                } else {
                    Command::SmoothCubicTo(smooth)
                }
            })
            .collect(),
        Verb::QuadAbs | Verb::QuadRel => group_points(letter, &values)?
            .chunks_exact(2)
            .map(|p| {
                let quad = QuadTo {
                    ctrl: p[0],
                    to: p[1],
                };
                if verb.is_relative() {
                    Command::QuadToRel(quad)
                } else {
                    Command::QuadTo(quad)
                }
            })
            .collect(),
        Verb::ArcAbs => group_arcs(letter, &values)?
            .into_iter()
            .map(Command::EllipticArc)
            .collect(),
        Verb::ArcRel => group_arcs(letter, &values)?
            .into_iter()
            .map(Command::EllipticArcRel)
            .collect(),
    };
    Ok(decoded)
}

fn points(
    letter: char,
    values: &[f32],
    make: impl Fn(Point) -> Command,
) -> Result<Decoded, PathDataError> {
    Ok(group_points(letter, values)?.into_iter().map(make).collect())
}
