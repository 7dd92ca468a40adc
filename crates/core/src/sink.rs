//! Output and mapping accumulation.
//!
//! [`OutputSink`] receives every character the minifier emits, appends it to the generated code
//! and, if the character came from the input, records a [`MappingEntry`] linking its generated
//! position to its original one. [`SourceMapResult`] is what a successful run hands back.
//!
//! Mapping model:
//!
//! - Entries are appended in emission order and never reordered or deduplicated, so they are
//!   sorted by generated position.
//! - Characters without an origin (synthesized spaces) produce output but no entry. Such gaps
//!   mean "no meaningful source position".
//! - Sourcemap lines are 0-based and columns are UTF-16 code units (JS sourcemap convention);
//!   [`Position`] keeps 1-based lines, so serialization shifts them by one.

use std::sync::Arc;

use crate::{
    MinifyError,
    cursor::{Position, PositionedChar},
};

/// One generated character and the input position it was copied from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Where the character sits in the minified code.
    pub generated: Position,
    /// Where the character was read from in the input.
    pub original: Position,
    /// The input filename.
    pub source: Arc<str>,
}

/// Append-only output buffer plus the mapping sequence.
#[derive(Debug)]
pub struct OutputSink {
    code: String,
    mappings: Vec<MappingEntry>,
    /// Position of the next generated character.
    position: Position,
    source: Arc<str>,
}

impl OutputSink {
    pub fn new(source: &str, capacity: usize) -> Self {
        Self {
            code: String::with_capacity(capacity),
            mappings: Vec::new(),
            position: Position::START,
            source: Arc::from(source),
        }
    }

    /// Append `c` to the output.
    ///
    /// Whitespace is never written before the first non-whitespace character: the minifier's
    /// start-of-input sentinel and any line breaks or spaces at the top of the file would
    /// otherwise leak into the output.
    pub fn emit(&mut self, c: PositionedChar) {
        if self.code.is_empty() && matches!(c.ch, ' ' | '\n') {
            return;
        }

        if let Some(original) = c.origin {
            self.mappings.push(MappingEntry {
                generated: self.position,
                original,
                source: Arc::clone(&self.source),
            });
        }
        self.code.push(c.ch);
        self.position.advance(c.ch);
    }

    /// The code generated so far.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Finish the run.
    pub fn finish(self, file: Option<String>, source_root: Option<String>) -> SourceMapResult {
        SourceMapResult {
            code: self.code,
            mappings: self.mappings,
            file,
            source_root,
        }
    }
}

/// The minified code and the mapping entries describing where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMapResult {
    code: String,
    mappings: Vec<MappingEntry>,
    file: Option<String>,
    source_root: Option<String>,
}

impl SourceMapResult {
    /// The minified code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Take the minified code, discarding the mappings.
    pub fn into_code(self) -> String {
        self.code
    }

    /// Mapping entries, in generated order.
    pub fn mappings(&self) -> &[MappingEntry] {
        &self.mappings
    }

    /// The configured output filename, recorded as the sourcemap's `file`.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// The configured `sourceRoot`.
    pub fn source_root(&self) -> Option<&str> {
        self.source_root.as_deref()
    }

    /// Build a Source Map v3 for the minified code.
    ///
    /// Each mapping entry becomes one point token.
    pub fn to_sourcemap(&self) -> sourcemap::SourceMap {
        let mut builder = sourcemap::SourceMapBuilder::new(self.file.as_deref());
        if let Some(root) = self.source_root.as_deref() {
            builder.set_source_root(Some(root));
        }

        for entry in &self.mappings {
            builder.add(
                entry.generated.line - 1,
                entry.generated.utf16_column,
                entry.original.line - 1,
                entry.original.utf16_column,
                Some(&*entry.source),
                None,
                false,
            );
        }

        builder.into_sourcemap()
    }

    /// Serialize [`to_sourcemap`](Self::to_sourcemap) as JSON.
    pub fn to_json(&self) -> Result<String, MinifyError> {
        let mut buf: Vec<u8> = Vec::new();
        self.to_sourcemap().to_writer(&mut buf)?;
        Ok(String::from_utf8(buf).expect("sourcemap JSON must be utf-8"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ch: char, line: u32, column: u32) -> PositionedChar {
        PositionedChar::at(
            ch,
            Position {
                line,
                column,
                utf16_column: column,
            },
        )
    }

    #[test]
    fn records_generated_and_original_positions() {
        let mut sink = OutputSink::new("input.js", 0);
        sink.emit(at('a', 3, 4));
        sink.emit(at('\n', 3, 5));
        sink.emit(at('b', 4, 0));

        assert_eq!(sink.code(), "a\nb");
        let res = sink.finish(None, None);
        let generated: Vec<_> = res
            .mappings()
            .iter()
            .map(|m| (m.generated.line, m.generated.column))
            .collect();
        assert_eq!(generated, vec![(1, 0), (1, 1), (2, 0)]);
        assert_eq!(res.mappings()[2].original.line, 4);
        assert_eq!(&*res.mappings()[0].source, "input.js");
    }

    /// Synthesized characters are written but leave a gap in the mappings.
    #[test]
    fn synthetic_characters_are_unmapped() {
        let mut sink = OutputSink::new("input.js", 0);
        sink.emit(at('a', 1, 0));
        sink.emit(PositionedChar::synthetic(' '));
        sink.emit(at('b', 1, 9));

        let res = sink.finish(None, None);
        assert_eq!(res.code(), "a b");
        assert_eq!(res.mappings().len(), 2);
        assert_eq!(res.mappings()[1].generated.column, 2);
    }

    #[test]
    fn leading_whitespace_is_not_written() {
        let mut sink = OutputSink::new("input.js", 0);
        sink.emit(PositionedChar::synthetic('\n'));
        sink.emit(at('\n', 1, 0));
        sink.emit(at(' ', 2, 0));
        sink.emit(at('x', 2, 1));
        sink.emit(at(' ', 2, 2));

        let res = sink.finish(None, None);
        assert_eq!(res.code(), "x ");
        assert_eq!(res.mappings().len(), 2);
        assert_eq!(res.mappings()[0].generated, Position::START);
    }

    #[test]
    fn sourcemap_uses_zero_based_lines() {
        let mut sink = OutputSink::new("input.js", 0);
        sink.emit(at('a', 2, 3));
        sink.emit(PositionedChar::synthetic(' '));
        sink.emit(at('b', 5, 1));
        let res = sink.finish(
            Some("out.min.js".to_string()),
            Some("https://example.com/js/".to_string()),
        );

        let sm = res.to_sourcemap();
        assert_eq!(sm.get_file(), Some("out.min.js"));
        assert_eq!(sm.get_source_root(), Some("https://example.com/js/"));
        assert!(sm.get_source(0).is_some_and(|s| s.ends_with("input.js")));

        let t = sm.lookup_token(0, 0).expect("token for 'a'");
        assert_eq!((t.get_src_line(), t.get_src_col()), (1, 3));
        let t = sm.lookup_token(0, 2).expect("token for 'b'");
        assert_eq!((t.get_src_line(), t.get_src_col()), (4, 1));
    }

    #[test]
    fn json_round_trips_through_the_sourcemap_parser() {
        let mut sink = OutputSink::new("input.js", 0);
        sink.emit(at('x', 1, 0));
        let json = sink.finish(None, None).to_json().unwrap();

        let sm = sourcemap::SourceMap::from_slice(json.as_bytes()).unwrap();
        assert_eq!(sm.get_source(0), Some("input.js"));
        assert_eq!(sm.get_token_count(), 1);
    }
}
