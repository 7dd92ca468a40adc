//! JSMin minification with sourcemap support.
//!
//! The minifier is a pull-driven pipeline. The whitespace state machine in this module keeps two
//! logical characters, `a` (current) and `b` (next), and asks the pipeline below it for a new
//! `b` whenever it consumes one:
//!
//! ```text
//! decide(a, b)  ->  regex check / literal scanners  ->  comment stripper  ->  cursor
//!      |
//!      +--> sink (code + mappings)
//! ```
//!
//! Every emitted character goes through the [`OutputSink`] before the next read happens.
//!
//! State starts as `a = '\n'` (a synthetic line break, so the start of the input behaves as if a
//! blank line preceded it) and `b = ` the first logical character. The loop ends when `a`
//! reaches end of input.

use std::io::Read;

use crate::{
    MinifyError, ParseError,
    collapse::{Action, decide, is_quote},
    cursor::{InputCursor, PositionedChar},
    literal::{scan_regex, scan_string, starts_regex},
    sink::{OutputSink, SourceMapResult},
};

/// Configuration options for minification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinifyConfig {
    /// Name of the input, recorded as the source of every mapping entry. Required.
    ///
    /// For the sourcemap to resolve in a browser, `source_root` + `input_filename` should point
    /// at a fetchable copy of the original file.
    pub input_filename: Option<String>,
    /// Name of the minified file, recorded as the sourcemap's `file`.
    pub output_filename: Option<String>,
    /// Recorded as the sourcemap's `sourceRoot`.
    pub source_root: Option<String>,
}

impl MinifyConfig {
    pub fn new(input_filename: impl Into<String>) -> Self {
        Self {
            input_filename: Some(input_filename.into()),
            ..Self::default()
        }
    }

    pub fn with_output_filename(mut self, output_filename: impl Into<String>) -> Self {
        self.output_filename = Some(output_filename.into());
        self
    }

    pub fn with_source_root(mut self, source_root: impl Into<String>) -> Self {
        self.source_root = Some(source_root.into());
        self
    }
}

/// Minify `input` and record where every output character came from.
///
/// Fails with [`MinifyError::MissingInputFilename`] before reading anything if
/// `config.input_filename` is unset, and with [`MinifyError::Parse`] on an unterminated string,
/// regex or comment. No partial output is returned on failure.
pub fn minify(input: &str, config: &MinifyConfig) -> Result<SourceMapResult, MinifyError> {
    let source_name = config
        .input_filename
        .as_deref()
        .ok_or(MinifyError::MissingInputFilename)?;

    tracing::debug!(source = source_name, input_len = input.len(), "minifying");

    let mut minifier = Minifier::new(input, source_name);
    minifier.run()?;

    let result = minifier.sink.finish(
        config.output_filename.clone(),
        config.source_root.clone(),
    );
    tracing::debug!(
        source = source_name,
        output_len = result.code().len(),
        mappings = result.mappings().len(),
        "minified"
    );
    Ok(result)
}

/// Read all of `reader` and [`minify`] it.
pub fn minify_reader<R: Read>(
    mut reader: R,
    config: &MinifyConfig,
) -> Result<SourceMapResult, MinifyError> {
    if config.input_filename.is_none() {
        return Err(MinifyError::MissingInputFilename);
    }

    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    minify(&input, config)
}

/// Per-invocation scanner state.
struct Minifier<'a> {
    cursor: InputCursor<'a>,
    sink: OutputSink,
    /// Current character; `None` once the input is exhausted.
    a: Option<PositionedChar>,
    /// Next character; `None` at end of input.
    b: Option<PositionedChar>,
}

impl<'a> Minifier<'a> {
    fn new(input: &'a str, source_name: &'a str) -> Self {
        Self {
            cursor: InputCursor::new(input, source_name),
            sink: OutputSink::new(source_name, input.len()),
            a: Some(PositionedChar::synthetic('\n')),
            b: None,
        }
    }

    fn run(&mut self) -> Result<(), ParseError> {
        self.refill()?;

        while let Some(a) = self.a {
            match decide(a.ch, self.b.map(|b| b.ch)) {
                Action::Output => self.output()?,
                Action::Copy => self.copy()?,
                Action::Skip => self.refill()?,
            }
        }
        Ok(())
    }

    /// Emit `a`, then [`copy`](Self::copy).
    fn output(&mut self) -> Result<(), ParseError> {
        if let Some(a) = self.a {
            self.sink.emit(a);
        }
        self.copy()
    }

    /// Make `b` the new `a` and read a new `b`.
    ///
    /// If the new `a` opens a string, the whole literal is copied out first and `a` ends up as
    /// its closing quote.
    fn copy(&mut self) -> Result<(), ParseError> {
        self.a = self.b;
        if let Some(quote) = self.a
            && is_quote(quote.ch)
        {
            self.a = Some(scan_string(&mut self.cursor, &mut self.sink, quote)?);
        }
        self.refill()
    }

    /// Read a new `b` through the comment stripper.
    ///
    /// If `b` turns out to open a regex literal, `a` and the opening `/` are emitted right away
    /// and the literal is copied out. `a` then becomes the closing `/` and `b` is read again.
    fn refill(&mut self) -> Result<(), ParseError> {
        self.b = self.cursor.next_logical()?;

        if starts_regex(self.a, self.b)
            && let (Some(a), Some(slash)) = (self.a, self.b)
        {
            self.sink.emit(a);
            self.sink.emit(slash);
            self.a = Some(scan_regex(&mut self.cursor, &mut self.sink)?);
            self.b = self.cursor.next_logical()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseErrorKind;

    /// Minifies with a default filename and returns only the code.
    fn min(src: &str) -> String {
        minify(src, &MinifyConfig::new("input.js"))
            .unwrap()
            .into_code()
    }

    fn parse_error(src: &str) -> ParseError {
        match minify(src, &MinifyConfig::new("input.js")) {
            Err(MinifyError::Parse(err)) => err,
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn collapses_spaces_and_blank_lines() {
        assert_eq!(min("a = 1;\n\nb = 2;\n"), "a=1;b=2;");
    }

    #[test]
    fn drops_leading_line_comment() {
        assert_eq!(min("// comment\nvar x = 1;\n"), "var x=1;");
    }

    #[test]
    fn drops_leading_block_comment() {
        assert_eq!(min("/* block\ncomment */\nx=1;"), "x=1;");
    }

    #[test]
    fn keeps_regex_literal_intact() {
        let out = min("function f(s) {\n  return /^[a-z]+$/.test(s);\n}\n");
        assert_eq!(out, "function f(s){return/^[a-z]+$/.test(s);}");
    }

    #[test]
    fn regex_after_operator_is_not_collapsed() {
        assert_eq!(min("var re = / a  b /g;"), "var re=/ a  b /g;");
    }

    #[test]
    fn regex_class_may_contain_slash() {
        assert_eq!(min("x = /[/]+/.exec(s);"), "x=/[/]+/.exec(s);");
    }

    #[test]
    fn regex_at_start_of_input() {
        assert_eq!(min("/ab/.test(s)"), "/ab/.test(s)");
    }

    #[test]
    fn division_is_an_operator() {
        assert_eq!(min("x = a / b / c;"), "x=a/b/c;");
    }

    /// A space is kept between two word characters and nowhere else.
    #[test]
    fn keeps_space_between_words() {
        assert_eq!(min("var  x  =  typeof  y ;"), "var x=typeof y;");
    }

    #[test]
    fn keeps_string_contents() {
        assert_eq!(
            min("var s = \"a  // b /* c */\" ;\nvar t = 'x  y';"),
            "var s=\"a  // b /* c */\";var t='x  y';"
        );
    }

    /// A newline between a word and an opener or sign could change meaning, so it stays.
    #[test]
    fn keeps_significant_newlines() {
        assert_eq!(min("a\n(b)"), "a\n(b)");
        assert_eq!(min("a\n+\n+b"), "a\n+\n+b");
        assert_eq!(min("x = 1\ny = 2"), "x=1\ny=2");
        assert_eq!(min("if (a) {\n  b()\n}\n"), "if(a){b()}");
    }

    #[test]
    fn block_comment_between_words_becomes_a_space() {
        assert_eq!(min("x/**/y"), "x y");
        assert_eq!(min("x /* c */ + y"), "x+y");
    }

    #[test]
    fn normalizes_crlf_and_tabs() {
        assert_eq!(min("a\r\nb\r\n"), "a\nb");
        assert_eq!(min("a\t=\tb;"), "a=b;");
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(min(""), "");
        assert_eq!(min(" \n\t\r\n"), "");
        assert_eq!(min("// only a comment"), "");
    }

    #[test]
    fn maps_each_character_to_its_origin() {
        let res = minify("a = 1;\n\nb = 2;\n", &MinifyConfig::new("input.js")).unwrap();
        let got: Vec<_> = res
            .mappings()
            .iter()
            .map(|m| (m.original.line, m.original.column))
            .collect();
        assert_eq!(
            got,
            vec![(1, 0), (1, 2), (1, 4), (1, 5), (3, 0), (3, 2), (3, 4), (3, 5)]
        );
        for (i, m) in res.mappings().iter().enumerate() {
            assert_eq!(m.generated.line, 1);
            assert_eq!(m.generated.column, i as u32);
            assert_eq!(&*m.source, "input.js");
        }
    }

    /// The space substituted for a block comment has no origin.
    #[test]
    fn synthetic_space_is_unmapped() {
        let res = minify("x/**/y", &MinifyConfig::new("input.js")).unwrap();
        assert_eq!(res.code(), "x y");
        let columns: Vec<_> = res.mappings().iter().map(|m| m.generated.column).collect();
        assert_eq!(columns, vec![0, 2]);
    }

    #[test]
    fn records_configured_names() {
        let config = MinifyConfig::new("foo.js")
            .with_output_filename("foo.min.js")
            .with_source_root("http://localhost:3000/javascripts/");
        let res = minify("var a = 1;", &config).unwrap();
        assert_eq!(res.file(), Some("foo.min.js"));
        assert_eq!(res.source_root(), Some("http://localhost:3000/javascripts/"));
    }

    #[test]
    fn unterminated_string_reports_line() {
        let err = parse_error("var s = \"abc\n");
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
        assert_eq!(err.line, 1);
        assert_eq!(err.source_name, "input.js");
        assert!(err.to_string().contains("unterminated string literal"));
    }

    #[test]
    fn unterminated_string_on_a_later_line() {
        let err = parse_error("a();\nb();\nvar s = 'abc\n");
        assert_eq!(err.line, 3);
    }

    #[test]
    fn unterminated_regex_is_fatal() {
        let err = parse_error("x = /abc\n/;");
        assert_eq!(err.kind, ParseErrorKind::UnterminatedRegex);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn unterminated_comment_is_fatal() {
        let err = parse_error("x = 1; /* no end");
        assert_eq!(err.kind, ParseErrorKind::UnterminatedComment);
    }

    #[test]
    fn missing_input_filename_is_a_config_error() {
        let err = minify("x = 1;", &MinifyConfig::default()).unwrap_err();
        assert!(matches!(err, MinifyError::MissingInputFilename));

        let err = minify_reader("x = 1;".as_bytes(), &MinifyConfig::default()).unwrap_err();
        assert!(matches!(err, MinifyError::MissingInputFilename));
    }

    #[test]
    fn reads_from_a_stream() {
        let res = minify_reader("var  a = 1;\n".as_bytes(), &MinifyConfig::new("in.js")).unwrap();
        assert_eq!(res.code(), "var a=1;");
    }

    #[test]
    fn invalid_utf8_stream_is_an_io_error() {
        let bytes: &[u8] = &[b'a', 0xff, b'b'];
        let err = minify_reader(bytes, &MinifyConfig::new("in.js")).unwrap_err();
        assert!(matches!(err, MinifyError::Io(_)));
    }
}
