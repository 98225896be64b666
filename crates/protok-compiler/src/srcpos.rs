//! Line/column source positions.
//!
//! The lexer and parser work with byte-offset [`TextRange`]s; error types
//! and the operation log expose structured positions instead, so callers
//! can annotate the source without recomputing line breaks.

use rowan::{TextRange, TextSize};
use serde::Serialize;

/// A position in source text: 1-based line and column, 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

/// A `[start, end)` range in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceSpan {
    pub start: Position,
    pub end: Position,
}

/// Precomputed line starts for offset → line/column conversion.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset as u32 + 1);
            }
        }
        Self { line_starts }
    }

    pub fn position(&self, offset: TextSize) -> Position {
        let offset = u32::from(offset);
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        Position {
            line: line as u32 + 1,
            column: offset - self.line_starts[line] + 1,
            offset,
        }
    }

    pub fn span(&self, range: TextRange) -> SourceSpan {
        SourceSpan {
            start: self.position(range.start()),
            end: self.position(range.end()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based_per_line() {
        let index = LineIndex::new("ab\ncd\n");
        assert_eq!(
            index.position(TextSize::from(0)),
            Position { line: 1, column: 1, offset: 0 }
        );
        assert_eq!(
            index.position(TextSize::from(1)),
            Position { line: 1, column: 2, offset: 1 }
        );
        assert_eq!(
            index.position(TextSize::from(3)),
            Position { line: 2, column: 1, offset: 3 }
        );
        assert_eq!(
            index.position(TextSize::from(6)),
            Position { line: 3, column: 1, offset: 6 }
        );
    }

    #[test]
    fn span_covers_both_endpoints() {
        let index = LineIndex::new("a = b\nc");
        let span = index.span(TextRange::new(4.into(), 7.into()));
        assert_eq!(span.start.line, 1);
        assert_eq!(span.start.column, 5);
        assert_eq!(span.end.line, 2);
        assert_eq!(span.end.column, 1);
    }
}
