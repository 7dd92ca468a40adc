//! Whitespace collapsing policy.
//!
//! The minifier looks at two logical characters at a time: `a`, the character it is about to
//! emit, and `b`, the one after it. [`decide`] maps that pair to one of three [`Action`]s.
//!
//! - A space survives only between two word characters (see [`is_alphanum`]).
//! - A newline survives only where dropping it could merge tokens or change automatic
//!   semicolon insertion: after one of `} ] ) \ " + -` or a word character, and before one of
//!   `{ [ ( + -` or a word character.
//! - Everything else that is whitespace is dropped.

/// What the minifier does with the current `(a, b)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit `a`, then [`Action::Copy`].
    Output,
    /// Drop `a` and make `b` the new `a`, then read a new `b`.
    Copy,
    /// Keep `a`, drop `b` and read a new `b`.
    Skip,
}

/// Decide what to do with `a` given the following character `b` (`None` at end of input).
pub fn decide(a: char, b: Option<char>) -> Action {
    let b_word = b.is_some_and(is_alphanum);
    match a {
        ' ' => {
            if b_word {
                Action::Output
            } else {
                Action::Copy
            }
        }
        '\n' => match b {
            Some(' ') => Action::Skip,
            Some('{' | '[' | '(' | '+' | '-') => Action::Output,
            _ if b_word => Action::Output,
            _ => Action::Copy,
        },
        _ => match b {
            Some(' ') => {
                if is_alphanum(a) {
                    Action::Output
                } else {
                    Action::Skip
                }
            }
            Some('\n') => {
                if matches!(a, '}' | ']' | ')' | '\\' | '"' | '+' | '-') || is_alphanum(a) {
                    Action::Output
                } else {
                    Action::Skip
                }
            }
            _ => Action::Output,
        },
    }
}

/// Returns true for characters that can be part of an identifier or number.
///
/// That is ASCII letters and digits, `_`, `$`, `\` (unicode escapes), and anything beyond `~`.
pub fn is_alphanum(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '\\') || c > '~'
}

/// Returns true if a `/` following `c` starts a regular-expression literal rather than a
/// division.
///
/// `c` is the previous logical character; `\n` covers both real line breaks and the start of
/// the input.
pub fn is_regex_prefix(c: char) -> bool {
    matches!(
        c,
        '\n' | '(' | ',' | '=' | ':' | '[' | '!' | '&' | '|' | '?' | '{' | '}' | ';'
    )
}

/// Returns true for the two string delimiters.
pub fn is_quote(c: char) -> bool {
    matches!(c, '\'' | '"')
}
