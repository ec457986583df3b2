// Copyright 2026 the pathplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only scans for problem elements.
//!
//! Both scans can run on a materialized [`PathData`](crate::PathData) or any
//! other sequence of elements, before or instead of replay. They never touch
//! replay state.

use std::borrow::Borrow;

use crate::{Command, PathDataError};

/// Call `f` with the raw text and cause of every [`Command::DecodeError`].
///
/// Returns true if there was at least one.
///
/// ```
/// use pathplay::{inspect_errors, Tokenizer};
/// let mut raws = Vec::new();
/// let found = inspect_errors(Tokenizer::new(&b"M0,0 C1,1 L2,2"[..]), |raw, _| {
///     raws.push(raw.to_string());
/// });
/// assert!(found);
/// assert_eq!(raws, ["C1,1 "]);
/// ```
pub fn inspect_errors<I, F>(commands: I, mut f: F) -> bool
where
    I: IntoIterator,
    I::Item: Borrow<Command>,
    F: FnMut(&str, &PathDataError),
{
    let mut found = false;
    for command in commands {
        if let Command::DecodeError { raw, cause } = command.borrow() {
            f(raw, cause);
            found = true;
        }
    }
    found
}

/// Call `f` with the raw text of every [`Command::UnknownCommand`].
///
/// Returns true if there was at least one.
pub fn inspect_unknown<I, F>(commands: I, mut f: F) -> bool
where
    I: IntoIterator,
    I::Item: Borrow<Command>,
    F: FnMut(&str),
{
    let mut found = false;
    for command in commands {
        if let Command::UnknownCommand(raw) = command.borrow() {
            f(raw);
            found = true;
        }
    }
    found
}
