// Copyright 2026 the pathplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors produced while decoding path data.

use std::fmt;
use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Everything that can go wrong between the byte source and the replay engine.
///
/// Decode-level errors ([`Numeric`], [`Arity`], [`UnknownCommand`]) never stop
/// the tokenizer; they travel inside a [`Command::DecodeError`] or
/// [`Command::UnknownCommand`] element in place of the offending command.
/// [`SourceRead`] is terminal for the tokenizer that produced it.
///
/// [`Numeric`]: PathDataError::Numeric
/// [`Arity`]: PathDataError::Arity
/// [`UnknownCommand`]: PathDataError::UnknownCommand
/// [`SourceRead`]: PathDataError::SourceRead
/// [`Command::DecodeError`]: crate::Command::DecodeError
/// [`Command::UnknownCommand`]: crate::Command::UnknownCommand
#[derive(Clone, Debug, Error)]
pub enum PathDataError {
    /// A malformed or missing floating-point literal.
    #[error("{fault}: {literal:?}")]
    Numeric {
        /// The offending substring (empty when nothing was found).
        literal: String,
        /// What was wrong with it.
        fault: NumericFault,
    },
    /// The argument count is not a multiple of the command's group size.
    #[error("`{command}` needs a multiple of {shape}, found {found} values")]
    Arity {
        /// The command letter.
        command: char,
        /// The argument group the command repeats.
        shape: GroupShape,
        /// How many values were scanned.
        found: usize,
    },
    /// A command letter outside the path-data alphabet.
    #[error("unknown command {0:?}")]
    UnknownCommand(char),
    /// The byte source failed other than at a clean end of input.
    #[error("failed to read path data")]
    SourceRead(#[source] Arc<io::Error>),
}

/// Why a numeric literal was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericFault {
    /// The argument region held nothing but whitespace.
    NoLiteral,
    /// Two separators with nothing between them, or a dangling comma.
    EmptyLiteral,
    /// Bytes that do not form a decimal literal, including exponent notation.
    Malformed,
    /// The literal does not fit in single precision.
    OutOfRange,
}

/// The shape of one argument group, used in arity messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupShape {
    /// A group of `n` coordinate pairs.
    Vectors(usize),
    /// A group of `n` scalars.
    Values(usize),
}

impl GroupShape {
    /// The number of scalars in one group.
    pub fn value_count(self) -> usize {
        match self {
            GroupShape::Vectors(n) => n * 2,
            GroupShape::Values(n) => n,
        }
    }
}

impl fmt::Display for NumericFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericFault::NoLiteral => write!(f, "no numeric literal found"),
            NumericFault::EmptyLiteral => write!(f, "empty numeric literal"),
            NumericFault::Malformed => write!(f, "malformed numeric literal"),
            NumericFault::OutOfRange => write!(f, "numeric literal out of range"),
        }
    }
}

impl fmt::Display for GroupShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupShape::Vectors(1) => write!(f, "1 vector"),
            GroupShape::Vectors(n) => write!(f, "{n} vectors"),
            GroupShape::Values(1) => write!(f, "1 value"),
            GroupShape::Values(n) => write!(f, "{n} values"),
        }
    }
}

impl PartialEq for PathDataError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                PathDataError::Numeric { literal, fault },
                PathDataError::Numeric {
                    literal: other_literal,
                    fault: other_fault,
                },
            ) => literal == other_literal && fault == other_fault,
            (
                PathDataError::Arity {
                    command,
                    shape,
                    found,
                },
                PathDataError::Arity {
                    command: other_command,
                    shape: other_shape,
                    found: other_found,
                },
            ) => command == other_command && shape == other_shape && found == other_found,
            (PathDataError::UnknownCommand(a), PathDataError::UnknownCommand(b)) => a == b,
            // I/O errors have no equality of their own; the kind is what callers match on.
            (PathDataError::SourceRead(a), PathDataError::SourceRead(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

impl From<io::Error> for PathDataError {
    fn from(err: io::Error) -> Self {
        PathDataError::SourceRead(Arc::new(err))
    }
}
