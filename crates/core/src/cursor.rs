//! Position-tracked character input.
//!
//! [`InputCursor`] turns raw source text into a stream of [`PositionedChar`]s:
//!
//! - `\r`, `\n` and `\r\n` all collapse into a single `\n`.
//! - Any other character below U+0020 (tabs, form feeds, NULs, ...) is normalized to a space.
//! - Every character read from the input keeps the line/column it was read from, even when its
//!   value was normalized.
//!
//! The cursor also owns the single-character lookahead slot used by the comment stripper and
//! the literal scanners (see [`InputCursor::get`] and [`InputCursor::peek`]).

use std::{iter::Peekable, str::Chars};

use crate::{ParseError, ParseErrorKind};

/// A location in a text.
///
/// `line` is 1-based. `column` counts Unicode scalar values from the start of the line and
/// `utf16_column` counts UTF-16 code units (the JavaScript sourcemap convention). Both columns
/// start at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub utf16_column: u32,
}

impl Position {
    /// The first character of a text.
    pub const START: Position = Position {
        line: 1,
        column: 0,
        utf16_column: 0,
    };

    /// Step past `ch`, which is assumed to sit at `self`.
    ///
    /// `ch` must already be canonicalized: only `\n` starts a new line.
    pub fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
            self.utf16_column = 0;
        } else {
            self.column += 1;
            self.utf16_column += ch.len_utf16() as u32;
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

/// A character paired with where it came from.
///
/// `origin` is `None` only for characters the minifier synthesizes itself (the space that
/// replaces a block comment, the start-of-file sentinel). Characters read from the input always
/// carry an origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedChar {
    pub ch: char,
    pub origin: Option<Position>,
}

impl PositionedChar {
    /// A character with no source origin.
    pub const fn synthetic(ch: char) -> Self {
        Self { ch, origin: None }
    }

    /// A character read from the input at `origin`.
    pub const fn at(ch: char, origin: Position) -> Self {
        Self {
            ch,
            origin: Some(origin),
        }
    }

    /// Returns true for code points up to and including `\n`.
    ///
    /// Control characters are normalized to spaces when read, so in practice this is `\n`.
    pub fn is_terminator(self) -> bool {
        self.ch <= '\n'
    }
}

/// Raw input reader with line/column tracking and a one-slot lookahead buffer.
///
/// One cursor is created per [`minify`](crate::minify::minify) call and dropped with it; no
/// scanner state outlives an invocation.
#[derive(Debug)]
pub struct InputCursor<'a> {
    chars: Peekable<Chars<'a>>,
    /// Position of the next raw character.
    position: Position,
    /// At most one buffered character, filled by [`InputCursor::peek`].
    lookahead: Option<PositionedChar>,
    /// Recorded on every [`ParseError`] raised through this cursor.
    source_name: &'a str,
}

impl<'a> InputCursor<'a> {
    pub fn new(input: &'a str, source_name: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: Position::START,
            lookahead: None,
            source_name,
        }
    }

    /// Line of the next raw character.
    pub fn line(&self) -> u32 {
        self.position.line
    }

    /// Read the next character straight from the input, bypassing the lookahead slot.
    ///
    /// Returns `None` at end of input (repeatedly, if called again).
    pub fn read_raw(&mut self) -> Option<PositionedChar> {
        let raw = self.chars.next()?;
        let origin = self.position;

        let ch = match raw {
            '\r' => {
                self.chars.next_if_eq(&'\n');
                '\n'
            }
            '\n' => '\n',
            c if c < ' ' => ' ',
            c => c,
        };

        self.position.advance(ch);
        Some(PositionedChar::at(ch, origin))
    }

    /// Take the buffered lookahead character if there is one, otherwise read a fresh one.
    pub fn get(&mut self) -> Option<PositionedChar> {
        match self.lookahead.take() {
            Some(c) => Some(c),
            None => self.read_raw(),
        }
    }

    /// Return the next character without consuming it.
    ///
    /// The character is parked in the lookahead slot, so the following [`get`](Self::get)
    /// returns it. Peeking twice in a row is idempotent.
    pub fn peek(&mut self) -> Option<PositionedChar> {
        self.lookahead = self.get();
        self.lookahead
    }

    /// Build the [`ParseError`] for `kind`.
    ///
    /// The reported line is the line of `at` when the offending character is known, and the
    /// cursor's current line when the input ran out.
    pub fn fail(&self, kind: ParseErrorKind, at: Option<PositionedChar>) -> ParseError {
        let line = at
            .and_then(|c| c.origin)
            .map_or(self.position.line, |p| p.line);
        ParseError {
            kind,
            source_name: self.source_name.to_string(),
            line,
        }
    }
}
