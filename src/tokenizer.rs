// Copyright 2026 the pathplay Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Streaming path data into elements.

use std::collections::VecDeque;
use std::io::{self, Read};
use std::iter::FusedIterator;

use crate::decode::{decode, is_command_letter};
use crate::scan::is_wsp;
use crate::{Command, PathDataError};

/// The chunk size used when none is configured.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;

/// Options for a [`Tokenizer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenizerOptions {
    chunk_size: usize,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        TokenizerOptions {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl TokenizerOptions {
    /// Builder method for setting how many bytes are requested per read.
    ///
    /// A chunk size of zero is treated as one.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// The number of bytes requested per read.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

/// A pull-based tokenizer over a byte source.
///
/// Each call to [`next_command`] returns the next element in source order,
/// reading more of the source only when nothing decoded is waiting. At most one
/// chunk and the argument bytes of the command being accumulated are held at a
/// time, so arbitrarily long path data can be streamed.
///
/// Decode problems do not stop the tokenizer: the offending command comes out as
/// a single [`Command::DecodeError`] or [`Command::UnknownCommand`] and
/// tokenizing resumes at the next command letter. A failing source is reported
/// once, as a [`Command::DecodeError`] holding [`PathDataError::SourceRead`],
/// after which the tokenizer is exhausted.
///
/// The tokenizer is also an [`Iterator`] that yields every element and stops
/// at the end of the stream.
///
/// ```
/// use pathplay::{Command, Point, Tokenizer};
/// let mut tokens = Tokenizer::new("M1,2 l3,4".as_bytes());
/// assert_eq!(tokens.next_command(), Command::MoveTo(Point::new(1., 2.)));
/// assert_eq!(tokens.next_command(), Command::LineToRel(Point::new(3., 4.)));
/// assert_eq!(tokens.next_command(), Command::EndOfStream);
/// ```
///
/// [`next_command`]: Tokenizer::next_command
#[derive(Debug)]
pub struct Tokenizer<R> {
    source: R,
    chunk: Box<[u8]>,
    head: usize,
    tail: usize,
    /// Argument bytes of the active command, accumulated across chunks.
    carry: Vec<u8>,
    /// The byte that opened the command currently being accumulated.
    active: Option<u8>,
    queue: VecDeque<Command>,
    finished: bool,
}

impl<R: Read> Tokenizer<R> {
    /// Create a tokenizer with default options.
    pub fn new(source: R) -> Self {
        Self::with_options(source, TokenizerOptions::default())
    }

    /// Create a tokenizer with the given options.
    pub fn with_options(source: R, options: TokenizerOptions) -> Self {
        Tokenizer {
            source,
            chunk: vec![0; options.chunk_size.max(1)].into_boxed_slice(),
            head: 0,
            tail: 0,
            carry: Vec::new(),
            active: None,
            queue: VecDeque::new(),
            finished: false,
        }
    }

    /// Return the next element, or [`Command::EndOfStream`] once the source is
    /// exhausted.
    ///
    /// This blocks only as long as a read on the underlying source does. Once
    /// `EndOfStream` has been returned every further call returns it again.
    pub fn next_command(&mut self) -> Command {
        loop {
            if let Some(command) = self.queue.pop_front() {
                return command;
            }
            if self.finished {
                return Command::EndOfStream;
            }
            if self.head == self.tail {
                match self.fill() {
                    Ok(0) => self.finish(),
                    Ok(n) => {
                        log::trace!("read {n} bytes of path data");
                        self.head = 0;
                        self.tail = n;
                    }
                    Err(err) => self.fail(err),
                }
                continue;
            }
            self.scan_chunk();
        }
    }

    /// Consume the tokenizer, returning the byte source.
    ///
    /// Any buffered but undelivered bytes and elements are lost.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Read the next chunk, re-issuing reads that were interrupted.
    fn fill(&mut self) -> io::Result<usize> {
        loop {
            match self.source.read(&mut self.chunk) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                result => return result,
            }
        }
    }

    /// Consume the buffered chunk until it is empty or a command is complete.
    fn scan_chunk(&mut self) {
        while self.head < self.tail {
            let Some(letter) = self.active else {
                let c = self.chunk[self.head];
                self.head += 1;
                if !is_wsp(c) {
                    self.active = Some(c);
                }
                continue;
            };
            let pending = &self.chunk[self.head..self.tail];
            match pending.iter().position(|&c| is_command_letter(c)) {
                Some(offset) => {
                    self.carry.extend_from_slice(&pending[..offset]);
                    let next = pending[offset];
                    self.head += offset + 1;
                    self.queue.extend(decode(letter, &self.carry));
                    self.carry.clear();
                    self.active = Some(next);
                    return;
                }
                None => {
                    self.carry.extend_from_slice(pending);
                    self.head = self.tail;
                }
            }
        }
    }

    /// Decode whatever command is still open at the end of the source.
    fn finish(&mut self) {
        self.finished = true;
        if let Some(letter) = self.active.take() {
            self.queue.extend(decode(letter, &self.carry));
        }
        self.carry = Vec::new();
    }

    fn fail(&mut self, err: io::Error) {
        log::warn!("path data source failed: {err}");
        self.finished = true;
        let mut raw = Vec::with_capacity(self.carry.len() + 1);
        raw.extend(self.active.take());
        raw.append(&mut self.carry);
        self.queue.push_back(Command::DecodeError {
            raw: String::from_utf8_lossy(&raw).into_owned(),
            cause: PathDataError::from(err),
        });
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = Command;

    fn next(&mut self) -> Option<Command> {
        match self.next_command() {
            Command::EndOfStream => None,
            command => Some(command),
        }
    }
}

impl<R: Read> FusedIterator for Tokenizer<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CubicTo, NumericFault, Point};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const SAMPLE: &str = "M10,10 l5-5 h 2.5 v-2.5 C 0,0 10,0 10,10 s20,20 20,0 \
        Q5,5 10,0 t4,4 A5,5 30 1,0 10,10 z m 1 1 L 1e3,2 X 9 Z";

    fn collect(source: &[u8], chunk_size: usize) -> Vec<Command> {
        let options = TokenizerOptions::default().with_chunk_size(chunk_size);
        Tokenizer::with_options(source, options).collect()
    }

    /// Hands out the data in reads of random length.
    struct SplitReader {
        data: Vec<u8>,
        pos: usize,
        rng: StdRng,
    }

    impl Read for SplitReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let remaining = self.data.len() - self.pos;
            if remaining == 0 || buf.is_empty() {
                return Ok(0);
            }
            // Interrupt now and then; the tokenizer has to retry these.
            if self.rng.random_range(0..8) == 0 {
                return Err(io::ErrorKind::Interrupted.into());
            }
            let n = self.rng.random_range(1..=remaining.min(buf.len()));
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    /// Hands out its data, then fails.
    struct FailingReader<'a> {
        data: &'a [u8],
    }

    impl Read for FailingReader<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
            }
            let n = self.data.read(buf)?;
            Ok(n)
        }
    }

    #[test]
    fn sample_elements() {
        let commands = collect(SAMPLE.as_bytes(), DEFAULT_CHUNK_SIZE);
        let letters: String = commands
            .iter()
            .map(|c| c.letter().unwrap_or('!'))
            .collect();
        assert_eq!(letters, "MlhvCsQtAZm!Z");
        assert_eq!(commands[0], Command::MoveTo(Point::new(10., 10.)));
        assert_eq!(
            commands[4],
            Command::CubicTo(CubicTo {
                ctrl1: Point::new(0., 0.),
                ctrl2: Point::new(10., 0.),
                to: Point::new(10., 10.),
            })
        );
        match &commands[11] {
            Command::DecodeError { raw, cause } => {
                // `X` is not a command letter, so it stays in the arguments.
                assert_eq!(raw, "L 1e3,2 X 9 ");
                assert!(matches!(
                    cause,
                    PathDataError::Numeric {
                        fault: NumericFault::Malformed,
                        ..
                    }
                ));
            }
            other => panic!("expected a decode error, got {other:?}"),
        }
    }

    #[test]
    fn chunk_size_invariance() {
        let expected = collect(SAMPLE.as_bytes(), DEFAULT_CHUNK_SIZE);
        for chunk_size in 0..SAMPLE.len() + 2 {
            assert_eq!(
                collect(SAMPLE.as_bytes(), chunk_size),
                expected,
                "chunk size {chunk_size}"
            );
        }
    }

    #[test]
    fn random_splits() {
        const FRAGMENTS: &[&str] = &[
            "M 0,0 1,1 2,2",
            "m-1-1",
            "L10 10",
            "l 1.5,-2.5 ,3 4",
            "H 7",
            "h-.5",
            "V8",
            "v 1 2 3",
            "C0,0 10,0 10,10",
            "c 1,1 2,2 3,3 4,4 5,5 6,6",
            "S 20,20 20,0",
            "s1,1 2,2",
            "Q 5,5 10,0",
            "q1 1 2 2",
            "T 4,4",
            "t1,1",
            "A 5,5 30 1,0 10,10",
            "a1 1 0 0 1 2 2",
            "Z",
            "z",
            "C 0,0 1,1",
            "X 1,2",
            "L1,,2",
            "  \n\t",
        ];
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let mut text = String::new();
            for _ in 0..rng.random_range(1..12) {
                text.push_str(FRAGMENTS[rng.random_range(0..FRAGMENTS.len())]);
                if rng.random_bool(0.5) {
                    text.push(' ');
                }
            }
            let expected = collect(text.as_bytes(), DEFAULT_CHUNK_SIZE);
            let reader = SplitReader {
                data: text.clone().into_bytes(),
                pos: 0,
                rng: StdRng::seed_from_u64(rng.random()),
            };
            let chunk_size = rng.random_range(1..64);
            let options = TokenizerOptions::default().with_chunk_size(chunk_size);
            let actual: Vec<_> = Tokenizer::with_options(reader, options).collect();
            assert_eq!(actual, expected, "{text:?} with chunk size {chunk_size}");
        }
    }

    #[test]
    fn letter_on_chunk_boundary() {
        // Every split point of a short path lands a letter on a boundary at least once.
        let text = "M1,2L3,4Z";
        let expected = vec![
            Command::MoveTo(Point::new(1., 2.)),
            Command::LineTo(Point::new(3., 4.)),
            Command::ClosePath,
        ];
        for chunk_size in 1..=text.len() {
            assert_eq!(collect(text.as_bytes(), chunk_size), expected);
        }
    }

    #[test]
    fn empty_and_blank_sources() {
        assert!(collect(b"", 16).is_empty());
        assert!(collect(b" \t\r\n ", 2).is_empty());
        let mut tokens = Tokenizer::new(&b"   "[..]);
        assert_eq!(tokens.next_command(), Command::EndOfStream);
        assert_eq!(tokens.next_command(), Command::EndOfStream);
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            collect(b"X 1,2", 3),
            [Command::UnknownCommand("X 1,2".into())]
        );
        // The bad command does not swallow what follows it.
        assert_eq!(
            collect(b"X 1,2 M3,4", 3),
            [
                Command::UnknownCommand("X 1,2 ".into()),
                Command::MoveTo(Point::new(3., 4.)),
            ]
        );
    }

    #[test]
    fn source_failure_is_terminal() {
        let mut tokens = Tokenizer::new(FailingReader { data: b"M1,1 L2," });
        assert_eq!(tokens.next_command(), Command::MoveTo(Point::new(1., 1.)));
        match tokens.next_command() {
            Command::DecodeError { raw, cause } => {
                assert_eq!(raw, "L2,");
                assert_eq!(
                    cause,
                    PathDataError::from(io::Error::from(io::ErrorKind::BrokenPipe))
                );
            }
            other => panic!("expected the read failure, got {other:?}"),
        }
        assert_eq!(tokens.next_command(), Command::EndOfStream);
        assert_eq!(tokens.next_command(), Command::EndOfStream);
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        assert_eq!(TokenizerOptions::default().with_chunk_size(0).chunk_size(), 1);
        assert_eq!(TokenizerOptions::default().chunk_size(), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn into_inner_returns_source() {
        let mut tokens = Tokenizer::new(io::Cursor::new(b"M1,1".to_vec()));
        assert!(tokens.next().is_some());
        assert_eq!(tokens.into_inner().position(), 4);
    }
}
