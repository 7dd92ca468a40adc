//! Comment stripping.
//!
//! [`InputCursor::next_logical`] is the read primitive the rest of the minifier builds on: it
//! behaves like [`InputCursor::get`] except that comments never come out of it.
//!
//! - A `//` comment is dropped up to, but not including, its line terminator. The terminator is
//!   returned in its place, so the comment collapses to the newline that ended it.
//! - A `/* ... */` comment is replaced by a single synthetic space.
//! - A `/` followed by anything else (including end of input) is returned as-is, with the
//!   following character left in the lookahead slot.

use crate::{
    ParseError, ParseErrorKind,
    cursor::{InputCursor, PositionedChar},
};

impl InputCursor<'_> {
    /// Return the next character with comments removed.
    ///
    /// Returns `Ok(None)` at end of input. A block comment that is still open at end of input is
    /// a [`ParseErrorKind::UnterminatedComment`].
    pub fn next_logical(&mut self) -> Result<Option<PositionedChar>, ParseError> {
        let Some(c) = self.get() else {
            return Ok(None);
        };
        if c.ch != '/' {
            return Ok(Some(c));
        }

        match self.peek().map(|p| p.ch) {
            Some('/') => loop {
                match self.get() {
                    Some(t) if t.is_terminator() => return Ok(Some(t)),
                    Some(_) => {}
                    None => return Ok(None),
                }
            },
            Some('*') => {
                self.get();
                tracing::trace!(line = self.line(), "block comment");
                loop {
                    match self.get() {
                        Some(star) if star.ch == '*' => {
                            if self.peek().is_some_and(|p| p.ch == '/') {
                                self.get();
                                return Ok(Some(PositionedChar::synthetic(' ')));
                            }
                        }
                        Some(_) => {}
                        None => return Err(self.fail(ParseErrorKind::UnterminatedComment, None)),
                    }
                }
            }
            _ => Ok(Some(c)),
        }
    }
}
