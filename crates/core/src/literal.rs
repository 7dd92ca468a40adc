//! Regex/division disambiguation and verbatim literal scanning.
//!
//! String and regular-expression literals are opaque to the minifier: their bodies are copied to
//! the output character by character, bypassing comment stripping and whitespace collapsing.
//!
//! A `/` is ambiguous. It is treated as the start of a regex literal when the logical character
//! before it is a line break (or the start of input) or one of `( , = : [ ! & | ? { } ;`
//! (see [`collapse::is_regex_prefix`](crate::collapse::is_regex_prefix)). Anything else makes it
//! a division operator.
//!
//! Regex bodies honour `\` escapes and `[...]` classes, inside which an unescaped `/` does not
//! end the literal. A line break inside a string or regex literal is fatal.

use crate::{
    ParseError, ParseErrorKind,
    collapse::is_regex_prefix,
    cursor::{InputCursor, PositionedChar},
    sink::OutputSink,
};

/// Returns true if `b` is a `/` that opens a regex literal given the previous character `a`.
pub fn starts_regex(a: Option<PositionedChar>, b: Option<PositionedChar>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => b.ch == '/' && is_regex_prefix(a.ch),
        _ => false,
    }
}

/// Copy a regex literal body to `sink`.
///
/// The opening `/` must already have been emitted. Returns the closing `/`, which is *not*
/// emitted: it becomes the minifier's current character.
pub fn scan_regex(
    cursor: &mut InputCursor<'_>,
    sink: &mut OutputSink,
) -> Result<PositionedChar, ParseError> {
    tracing::trace!(line = cursor.line(), "regex literal");
    loop {
        let Some(c) = cursor.get() else {
            return Err(cursor.fail(ParseErrorKind::UnterminatedRegex, None));
        };
        match c.ch {
            '[' => {
                let mut c = c;
                loop {
                    sink.emit(c);
                    c = literal_char(cursor, ParseErrorKind::UnterminatedRegexClass)?;
                    match c.ch {
                        ']' => break,
                        '\\' => {
                            sink.emit(c);
                            c = literal_char(cursor, ParseErrorKind::UnterminatedRegexClass)?;
                        }
                        _ => {}
                    }
                }
                sink.emit(c);
            }
            '/' => return Ok(c),
            '\\' => {
                sink.emit(c);
                let escaped = literal_char(cursor, ParseErrorKind::UnterminatedRegex)?;
                sink.emit(escaped);
            }
            _ if c.is_terminator() => {
                return Err(cursor.fail(ParseErrorKind::UnterminatedRegex, Some(c)));
            }
            _ => sink.emit(c),
        }
    }
}

/// Copy a string literal opened by `quote` to `sink`.
///
/// Emits the opening quote and the body, escapes included. Returns the closing quote, which is
/// *not* emitted. A line break, escaped or not, or end of input before the closing quote is a
/// [`ParseErrorKind::UnterminatedString`].
pub fn scan_string(
    cursor: &mut InputCursor<'_>,
    sink: &mut OutputSink,
    quote: PositionedChar,
) -> Result<PositionedChar, ParseError> {
    let mut c = quote;
    loop {
        sink.emit(c);
        c = literal_char(cursor, ParseErrorKind::UnterminatedString)?;
        if c.ch == quote.ch {
            return Ok(c);
        }
        if c.ch == '\\' {
            sink.emit(c);
            c = literal_char(cursor, ParseErrorKind::UnterminatedString)?;
        }
    }
}

/// Read the next raw character of a literal body, failing with `kind` on a line break or at end
/// of input.
fn literal_char(
    cursor: &mut InputCursor<'_>,
    kind: ParseErrorKind,
) -> Result<PositionedChar, ParseError> {
    match cursor.get() {
        Some(c) if c.is_terminator() => Err(cursor.fail(kind, Some(c))),
        Some(c) => Ok(c),
        None => Err(cursor.fail(kind, None)),
    }
}
