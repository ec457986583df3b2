// Copyright 2026 the pathplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A streaming decoder and replay engine for vector path data.
//!
//! Path data is the compact command language used by the `d` attribute of SVG
//! `<path>` elements: `M10,10 l5-5 c1,1 2,2 3,3 z`. This crate reads it
//! incrementally from any [`std::io::Read`] source, decodes it into typed
//! [`Command`] elements, and replays those elements onto a [`DrawSurface`] as
//! absolute `move_to` / `line_to` / `quad_to` / `curve_to` / `close_path` calls.
//!
//! The pieces, leaves first:
//!
//! - [`scan`] splits one command's argument bytes into single-precision values.
//! - [`decode()`] turns a command letter and its arguments into elements, one per
//!   argument group.
//! - [`Tokenizer`] pulls chunks from a byte source and hands out one element per
//!   call, never holding more than a chunk and one command's arguments.
//! - [`Replay`] resolves relative coordinates and smooth-curve control points and
//!   drives a [`DrawSurface`].
//! - [`inspect_errors`] and [`inspect_unknown`] report problem elements without
//!   replaying anything.
//!
//! Malformed input never stops the tokenizer. Each command that fails to decode
//! becomes a single [`Command::DecodeError`] or [`Command::UnknownCommand`] in
//! place, and the caller decides whether that is fatal.
//!
//! Elliptical arcs are decoded but not drawn; see [`ReplayOptions::arcs_advance`].
//!
//! # Examples
//!
//! ```
//! use pathplay::{BezPath, PathEl, Point, Replay, Tokenizer};
//!
//! let source = "M 0,0 C 0,0 10,0 10,10 S 20,20 20,0".as_bytes();
//! let mut path = BezPath::new();
//! Replay::new().play(Tokenizer::new(source), &mut path).unwrap();
//! assert_eq!(
//!     path.elements()[2],
//!     PathEl::CurveTo(Point::new(10., 20.), Point::new(20., 20.), Point::new(20., 0.))
//! );
//! ```
//!
//! # Features
//!
//! This crate has no default features.
//!
//! - `mint`: conversions between [`Point`]/[`Vec2`] and `mint` types.
//! - `serde`: `Serialize` and `Deserialize` for geometry and argument types.
//! - `schemars`: `JsonSchema` for geometry and argument types.

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(unused_qualifications)]
// The following lints are part of the Linebender standard set,
// but resolving them has been deferred for now.
#![allow(
    elided_lifetimes_in_paths,
    single_use_lifetimes,
    unnameable_types,
    clippy::use_self,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation,
    clippy::wildcard_imports,
    clippy::shadow_unrelated,
    clippy::missing_assert_message,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::exhaustive_enums,
    clippy::match_same_arms,
    clippy::partial_pub_fields,
    clippy::unseparated_literal_suffix,
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason
)]

mod bezpath;
mod command;
mod decode;
mod error;
mod inspect;
mod path_data;
mod point;
mod replay;
pub mod scan;
mod tokenizer;
mod vec2;

pub use crate::bezpath::*;
pub use crate::command::*;
pub use crate::decode::*;
pub use crate::error::*;
pub use crate::inspect::*;
pub use crate::path_data::*;
pub use crate::point::*;
pub use crate::replay::*;
pub use crate::tokenizer::*;
pub use crate::vec2::*;
