//! Common types shared between the diagnostic and error modules.

use serde::{Deserialize, Serialize};

use crate::span::Span;
use crate::text::byte_offset_to_position;

/// Location in a source file.
///
/// - `file`: path of the analyzed document
/// - `line`: 1-indexed line number
/// - `col`: 1-indexed column, in chars
/// - `byte_start`/`byte_end`: the underlying byte span
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Location {
    /// File path.
    pub file: String,
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed).
    pub col: u32,
    /// Byte offset from file start.
    pub byte_start: usize,
    /// Byte offset end, exclusive.
    pub byte_end: usize,
}

impl Location {
    /// Resolve `span` against `content` into a line/column location.
    pub fn from_span(file: impl Into<String>, content: &str, span: Span) -> Self {
        let (line, col) = byte_offset_to_position(content, span.start);
        Location {
            file: file.into(),
            line,
            col,
            byte_start: span.start,
            byte_end: span.end,
        }
    }

    /// The byte span this location was resolved from.
    pub fn span(&self) -> Span {
        Span::new(self.byte_start, self.byte_end)
    }

    /// Comparison key for deterministic sorting: (file, byte_start, byte_end).
    fn sort_key(&self) -> (&str, usize, usize) {
        (&self.file, self.byte_start, self.byte_end)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.col)
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}
