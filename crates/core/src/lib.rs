//! Streaming JavaScript minifier with sourcemap output.
//!
//! This crate implements the JSMin minification algorithm: a single pass over the source that
//! drops comments and any whitespace that is not needed to keep tokens apart, while leaving
//! string and regular-expression literals untouched. Every character it emits is recorded
//! together with the line/column it was copied from, so a sourcemap can be produced for the
//! minified output.
//!
//! Entry points:
//!
//! - [`mod@minify`] contains [`minify()`], [`minify_reader()`] and [`MinifyConfig`].
//!
//! Internals (leaf first):
//!
//! - [`cursor`] reads raw characters and tracks their positions.
//! - [`comment`] skips `//` and `/* */` comments.
//! - [`literal`] recognizes regex literals and copies regex and string literals verbatim.
//! - [`collapse`] holds the whitespace collapsing policy.
//! - [`sink`] accumulates the output and the mapping entries, and serializes the sourcemap.

pub mod collapse;
pub mod comment;
pub mod cursor;
pub mod literal;
pub mod minify;
pub mod sink;

pub use minify::{MinifyConfig, minify, minify_reader};
pub use sink::{MappingEntry, SourceMapResult};

/// Errors that can occur during minification.
#[derive(thiserror::Error, Debug)]
pub enum MinifyError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("input_filename is required")]
    MissingInputFilename,

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid sourcemap: {0}")]
    SourceMap(#[from] sourcemap::Error),
}

/// A fatal problem in the input text.
///
/// `line` is the 1-based line of the offending character, and `source_name` is the configured
/// input filename.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at line {line} of {source_name}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source_name: String,
    pub line: u32,
}

/// What went wrong in a [`ParseError`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated regular expression literal")]
    UnterminatedRegex,

    #[error("unterminated character class in regular expression literal")]
    UnterminatedRegexClass,

    #[error("unterminated comment")]
    UnterminatedComment,
}
