// Copyright 2026 the pathplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scanning numeric argument runs.
//!
//! Path data packs its numbers as tightly as it can: `1.5-2.3` is two numbers,
//! and so is `1.5,-2.3` or `1.5 , -2.3`. A sign always starts a new literal, a
//! run of whitespace holding at most one comma separates literals, and nothing
//! else does. Exponent notation is not part of this grammar.

use smallvec::SmallVec;

use crate::{ArcTo, GroupShape, NumericFault, PathDataError, Point, Vec2};

/// The scalars scanned out of one command's argument region.
pub type Scalars = SmallVec<[f32; 8]>;

/// Returns true for the whitespace bytes path data allows.
#[inline]
pub(crate) fn is_wsp(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | 0x0c | b'\r')
}

#[inline]
fn is_sign(c: u8) -> bool {
    c == b'+' || c == b'-'
}

#[inline]
fn ends_literal(c: u8) -> bool {
    is_wsp(c) || c == b',' || is_sign(c)
}

fn trim(mut bytes: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = bytes {
        if !is_wsp(*first) {
            break;
        }
        bytes = rest;
    }
    while let [rest @ .., last] = bytes {
        if !is_wsp(*last) {
            break;
        }
        bytes = rest;
    }
    bytes
}

fn numeric_error(literal: &[u8], fault: NumericFault) -> PathDataError {
    PathDataError::Numeric {
        literal: String::from_utf8_lossy(literal).into_owned(),
        fault,
    }
}

/// Split one command's argument bytes into single-precision values.
///
/// The input is trimmed first; an input that is empty after trimming is an
/// error, as is any literal that is not a plain decimal.
///
/// # Errors
///
/// Returns [`PathDataError::Numeric`] naming the offending literal.
///
/// ```
/// use pathplay::scan::scan_numbers;
/// let values = scan_numbers(b" 1.5-2.3,4 .5 ").unwrap();
/// assert_eq!(values.as_slice(), &[1.5, -2.3, 4., 0.5]);
/// ```
pub fn scan_numbers(bytes: &[u8]) -> Result<Scalars, PathDataError> {
    let bytes = trim(bytes);
    if bytes.is_empty() {
        return Err(numeric_error(bytes, NumericFault::NoLiteral));
    }
    let mut values = Scalars::new();
    let mut ix = 0;
    loop {
        let start = ix;
        if is_sign(bytes[ix]) {
            ix += 1;
        }
        while ix < bytes.len() && !ends_literal(bytes[ix]) {
            ix += 1;
        }
        let literal = &bytes[start..ix];
        if literal.is_empty() {
            return Err(numeric_error(literal, NumericFault::EmptyLiteral));
        }
        values.push(parse_literal(literal)?);
        if ix == bytes.len() {
            return Ok(values);
        }
        if is_sign(bytes[ix]) {
            continue;
        }
        while is_wsp(bytes[ix]) {
            ix += 1;
        }
        if bytes[ix] == b',' {
            ix += 1;
            // Trimming guarantees a non-separator byte ends the input, so only a
            // dangling comma can run out here.
            if ix == bytes.len() {
                return Err(numeric_error(&bytes[ix - 1..], NumericFault::EmptyLiteral));
            }
            while ix < bytes.len() && is_wsp(bytes[ix]) {
                ix += 1;
            }
        }
    }
}

/// Parse a single literal of the form `[+-]? digits? ( '.' digits? )?` holding
/// at least one digit.
fn parse_literal(literal: &[u8]) -> Result<f32, PathDataError> {
    let body = match literal {
        [b'+' | b'-', rest @ ..] => rest,
        _ => literal,
    };
    let mut digits = 0;
    let mut seen_period = false;
    for &c in body {
        match c {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_period => seen_period = true,
            _ => return Err(numeric_error(literal, NumericFault::Malformed)),
        }
    }
    if digits == 0 {
        return Err(numeric_error(literal, NumericFault::Malformed));
    }
    let value = std::str::from_utf8(literal)
        .ok()
        .and_then(|text| text.parse::<f32>().ok())
        .ok_or_else(|| numeric_error(literal, NumericFault::Malformed))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(numeric_error(literal, NumericFault::OutOfRange))
    }
}

/// Group scalars into points, two at a time.
///
/// # Errors
///
/// Returns [`PathDataError::Arity`] for an odd number of values; `command` is
/// the letter reported in the error.
pub fn group_points(command: char, values: &[f32]) -> Result<SmallVec<[Point; 4]>, PathDataError> {
    check_arity(command, GroupShape::Vectors(1), values)?;
    Ok(values
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

/// Group scalars into arc arguments, seven at a time.
///
/// Each group is `rx ry x-axis-rotation large-arc-flag sweep-flag x y`. A flag
/// is set when its value is exactly `1`; any other value clears it.
///
/// # Errors
///
/// Returns [`PathDataError::Arity`] if the count is not a multiple of 7.
pub fn group_arcs(command: char, values: &[f32]) -> Result<SmallVec<[ArcTo; 1]>, PathDataError> {
    check_arity(command, GroupShape::Values(7), values)?;
    Ok(values
        .chunks_exact(7)
        .map(|arc| ArcTo {
            radii: Vec2::new(arc[0], arc[1]),
            x_rotation: arc[2],
            large_arc: is_flag_set(arc[3]),
            sweep: is_flag_set(arc[4]),
            to: Point::new(arc[5], arc[6]),
        })
        .collect())
}

fn is_flag_set(value: f32) -> bool {
    value == 1.
}

/// Fail unless `values` splits evenly into groups of `shape`.
pub(crate) fn check_arity(
    command: char,
    shape: GroupShape,
    values: &[f32],
) -> Result<(), PathDataError> {
    if values.len() % shape.value_count() == 0 {
        Ok(())
    } else {
        Err(PathDataError::Arity {
            command,
            shape,
            found: values.len(),
        })
    }
}
