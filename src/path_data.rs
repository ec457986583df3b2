// Copyright 2026 the pathplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A materialized sequence of path-data elements.

use std::fmt;
use std::io::Read;
use std::ops::Deref;
use std::str::FromStr;
use std::vec;

use crate::{
    inspect_errors, inspect_unknown, play, Command, DrawSurface, PathDataError, Playback,
    Tokenizer, TokenizerOptions,
};

/// Every element of some path data, held in memory.
///
/// Use a [`Tokenizer`] directly to stream; `PathData` is for input small enough
/// to keep around, so it can be inspected before it is replayed.
///
/// ```
/// use pathplay::{Command, PathData, Point};
/// let data: PathData = "M 0,0 1,1 2,2".parse().unwrap();
/// assert_eq!(data.len(), 3);
/// assert!(data.iter().all(|c| matches!(c, Command::MoveTo(_))));
/// assert_eq!(data.to_string(), "M0,0 M1,1 M2,2");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    elements: Vec<Command>,
}

impl PathData {
    /// Read all of `source`.
    ///
    /// Decode errors are kept as error elements; see [`first_error`].
    ///
    /// # Errors
    ///
    /// Returns [`PathDataError::SourceRead`] if the source fails. Elements read
    /// before the failure are lost.
    ///
    /// [`first_error`]: PathData::first_error
    pub fn from_reader<R: Read>(source: R) -> Result<PathData, PathDataError> {
        Self::from_reader_with_options(source, TokenizerOptions::default())
    }

    /// Read all of `source` with the given tokenizer options.
    ///
    /// # Errors
    ///
    /// See [`from_reader`](PathData::from_reader).
    pub fn from_reader_with_options<R: Read>(
        source: R,
        options: TokenizerOptions,
    ) -> Result<PathData, PathDataError> {
        let mut elements = Vec::new();
        for command in Tokenizer::with_options(source, options) {
            if let Command::DecodeError {
                cause: cause @ PathDataError::SourceRead(_),
                ..
            } = command
            {
                return Err(cause);
            }
            elements.push(command);
        }
        Ok(PathData { elements })
    }

    /// The elements, in source order.
    pub fn elements(&self) -> &[Command] {
        &self.elements
    }

    /// The first decode error or unknown command, if any.
    pub fn first_error(&self) -> Option<PathDataError> {
        self.elements.iter().find_map(Command::cause)
    }

    /// Does this contain any decode errors or unknown commands?
    pub fn has_errors(&self) -> bool {
        self.elements.iter().any(Command::is_error)
    }

    /// Call `f` for every decode error; see [`inspect_errors`].
    pub fn inspect_errors(&self, f: impl FnMut(&str, &PathDataError)) -> bool {
        inspect_errors(self, f)
    }

    /// Call `f` for every unknown command; see [`inspect_unknown`].
    pub fn inspect_unknown(&self, f: impl FnMut(&str)) -> bool {
        inspect_unknown(self, f)
    }

    /// Replay onto `surface` with a fresh engine and default options.
    ///
    /// # Errors
    ///
    /// See [`play`].
    pub fn play<S>(&self, surface: &mut S) -> Result<Playback, PathDataError>
    where
        S: DrawSurface + ?Sized,
    {
        play(self, surface)
    }
}

impl FromStr for PathData {
    type Err = PathDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathData::from_reader(s.as_bytes())
    }
}

impl From<Vec<Command>> for PathData {
    fn from(elements: Vec<Command>) -> Self {
        PathData { elements }
    }
}

impl FromIterator<Command> for PathData {
    fn from_iter<T: IntoIterator<Item = Command>>(iter: T) -> Self {
        PathData {
            elements: iter.into_iter().collect(),
        }
    }
}

impl Deref for PathData {
    type Target = [Command];

    fn deref(&self) -> &[Command] {
        &self.elements
    }
}

impl<'a> IntoIterator for &'a PathData {
    type Item = &'a Command;
    type IntoIter = std::slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for PathData {
    type Item = Command;
    type IntoIter = vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for command in &self.elements {
            if *command == Command::EndOfStream {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "{}", command.to_string().trim_end())?;
        }
        Ok(())
    }
}
