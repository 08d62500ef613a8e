//! Source location tracking for the tokenizer and cursor
//!
//! Positions count characters, not bytes: offsets are absolute character
//! indices, lines and columns are 0-based. A `\n` starts a new line; every
//! other character (including `\r` and `\t`) advances the column by one.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and character offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Character offset from start of input (0-based)
    pub offset: usize,
    /// Line number (0-based)
    pub line: usize,
    /// Column number (0-based)
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create the starting position (offset 0, line 0, column 0)
    pub fn start() -> Self {
        Self::default()
    }

    /// Advance position by one character
    pub fn advance(self, ch: char) -> Self {
        match ch {
            '\n' => Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 0,
            },
            _ => Self {
                offset: self.offset + 1,
                line: self.line,
                column: self.column + 1,
            },
        }
    }

    /// Advance position over every character of a string
    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Zero-width span at a single position
    pub fn point(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start.offset < other.start.offset {
            self.start
        } else {
            other.start
        };

        let end = if self.end.offset > other.end.offset {
            self.end
        } else {
            other.end
        };

        Self { start, end }
    }

    /// Character length of this span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Check if this span contains a position
    pub fn contains(&self, pos: Position) -> bool {
        pos.offset >= self.start.offset && pos.offset < self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Source text indexed by line for diagnostic excerpts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMap {
    source: String,
    /// Byte offsets of line starts
    line_starts: Vec<usize>,
}

impl SourceMap {
    /// Create a new source map from source text
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// The original source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of `\n`-delimited lines
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Get a line of text by line number (0-based), without its terminator.
    ///
    /// A single trailing `\r` is dropped so CRLF sources render cleanly.
    pub fn get_line(&self, line: usize) -> Option<&str> {
        let start = *self.line_starts.get(line)?;
        let end = match self.line_starts.get(line + 1) {
            Some(next) => next - 1,
            None => self.source.len(),
        };

        let text = &self.source[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    /// Line excerpt for diagnostics; lines past the end render empty
    pub fn excerpt(&self, line: usize) -> &str {
        self.get_line(line).unwrap_or("")
    }

    /// Render a caret diagram pointing at `line`/`column`
    pub fn format_diagram(&self, message: &str, line: usize, column: usize, filler: char) -> String {
        render_caret_diagram(message, self.excerpt(line), column, filler)
    }
}

/// Marker line of `column` filler characters followed by a caret
pub fn caret_marker(column: usize, filler: char) -> String {
    let mut marker: String = std::iter::repeat(filler).take(column).collect();
    marker.push('^');
    marker
}

/// Stack a message, the offending source line and a caret marker
pub fn render_caret_diagram(message: &str, excerpt: &str, column: usize, filler: char) -> String {
    format!("{}\n{}\n{}", message, excerpt, caret_marker(column, filler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance_tracks_newlines() {
        let pos = Position::start().advance_str("ab\ncd");
        assert_eq!(pos, Position::new(5, 1, 2));
    }

    #[test]
    fn test_carriage_return_is_an_ordinary_character() {
        let pos = Position::start().advance_str("a\rb");
        assert_eq!(pos, Position::new(3, 0, 3));

        let pos = Position::start().advance_str("a\r\nb");
        assert_eq!(pos, Position::new(4, 1, 1));
    }

    #[test]
    fn test_span_merge_and_len() {
        let a = Span::new(Position::new(2, 0, 2), Position::new(4, 0, 4));
        let b = Span::new(Position::new(6, 0, 6), Position::new(9, 0, 9));
        let merged = a.merge(b);
        assert_eq!(merged.start.offset, 2);
        assert_eq!(merged.end.offset, 9);
        assert_eq!(merged.len(), 7);
        assert!(merged.contains(Position::new(5, 0, 5)));
        assert!(!merged.contains(Position::new(9, 0, 9)));
        assert_eq!(merged.to_string(), "0:2-9");
    }

    #[test]
    fn test_source_map_lines() {
        let map = SourceMap::new("first\nsecond\r\nthird");
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.get_line(0), Some("first"));
        assert_eq!(map.get_line(1), Some("second"));
        assert_eq!(map.get_line(2), Some("third"));
        assert_eq!(map.get_line(3), None);
        assert_eq!(map.excerpt(7), "");
    }

    #[test]
    fn test_source_without_newline_is_one_line() {
        let map = SourceMap::new("a\rb\rc");
        assert_eq!(map.line_count(), 1);
        assert_eq!(map.get_line(0), Some("a\rb\rc"));
    }

    #[test]
    fn test_caret_diagram() {
        let map = SourceMap::new("let x = ;\nnext");
        let diagram = map.format_diagram("Expected expression", 0, 8, ' ');
        assert_eq!(diagram, "Expected expression\nlet x = ;\n        ^");

        assert_eq!(caret_marker(0, '-'), "^");
        assert_eq!(caret_marker(3, '-'), "---^");
    }
}
