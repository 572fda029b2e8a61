// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Trivia: the non-semantic text attached to tokens.
//!
//! Every byte of source that is not part of a token's text belongs to exactly
//! one trivia item, attached either as *leading* trivia of the token that
//! follows it or *trailing* trivia of the token that precedes it:
//!
//! - Trailing trivia is the same-line whitespace and comments after a token,
//!   up to and including the first end-of-line.
//! - Everything else before a token is its leading trivia, including whole
//!   comment lines and preprocessor directives.

use serde::{Deserialize, Serialize};

/// Kind of a trivia item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriviaKind {
    /// Spaces and tabs.
    Whitespace,
    /// `\n` or `\r\n`.
    EndOfLine,
    /// `// ...` up to (not including) the end of line.
    LineComment,
    /// `/* ... */`, possibly spanning lines.
    BlockComment,
    /// A `#...` line, up to (not including) the end of line.
    Directive,
}

/// A single trivia item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trivia {
    /// What kind of trivia this is.
    pub kind: TriviaKind,
    /// The exact source text.
    pub text: String,
}

impl Trivia {
    /// Create a trivia item.
    pub fn new(kind: TriviaKind, text: impl Into<String>) -> Self {
        Trivia {
            kind,
            text: text.into(),
        }
    }

    /// A single space.
    pub fn space() -> Self {
        Trivia::new(TriviaKind::Whitespace, " ")
    }

    /// A `\n` end of line.
    pub fn newline() -> Self {
        Trivia::new(TriviaKind::EndOfLine, "\n")
    }

    /// True for whitespace and end-of-line items.
    pub fn is_whitespace(&self) -> bool {
        matches!(self.kind, TriviaKind::Whitespace | TriviaKind::EndOfLine)
    }

    /// True for comments of either kind.
    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TriviaKind::LineComment | TriviaKind::BlockComment)
    }

    /// True for preprocessor directives.
    pub fn is_directive(&self) -> bool {
        self.kind == TriviaKind::Directive
    }

    /// True when the item must be followed by a line break to stay valid.
    pub fn needs_line_break(&self) -> bool {
        matches!(self.kind, TriviaKind::LineComment | TriviaKind::Directive)
    }
}

/// An ordered sequence of trivia items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TriviaList(pub Vec<Trivia>);

impl TriviaList {
    /// An empty list.
    pub fn new() -> Self {
        TriviaList(Vec::new())
    }

    /// A list holding a single space.
    pub fn space() -> Self {
        TriviaList(vec![Trivia::space()])
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, Trivia> {
        self.0.iter()
    }

    /// Append an item.
    pub fn push(&mut self, trivia: Trivia) {
        self.0.push(trivia);
    }

    /// Total byte width of the list.
    pub fn width(&self) -> usize {
        self.0.iter().map(|t| t.text.len()).sum()
    }

    /// True if any item is a preprocessor directive.
    pub fn contains_directive(&self) -> bool {
        self.0.iter().any(Trivia::is_directive)
    }

    /// True if any item is a comment.
    pub fn contains_comment(&self) -> bool {
        self.0.iter().any(Trivia::is_comment)
    }

    /// True if every item is whitespace or end of line (vacuously true when empty).
    pub fn is_whitespace_only(&self) -> bool {
        self.0.iter().all(Trivia::is_whitespace)
    }

    /// The exact source text of the list.
    pub fn text(&self) -> String {
        self.0.iter().map(|t| t.text.as_str()).collect()
    }
}

impl FromIterator<Trivia> for TriviaList {
    fn from_iter<I: IntoIterator<Item = Trivia>>(iter: I) -> Self {
        TriviaList(iter.into_iter().collect())
    }
}

impl<'t> IntoIterator for &'t TriviaList {
    type Item = &'t Trivia;
    type IntoIter = std::slice::Iter<'t, Trivia>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_detection() {
        let list: TriviaList = [Trivia::space(), Trivia::newline()].into_iter().collect();
        assert!(list.is_whitespace_only());
        assert!(!list.contains_comment());
        assert!(TriviaList::new().is_whitespace_only());
    }

    #[test]
    fn directive_and_comment_detection() {
        let list: TriviaList = [
            Trivia::new(TriviaKind::Directive, "#if DEBUG"),
            Trivia::newline(),
            Trivia::new(TriviaKind::LineComment, "// note"),
        ]
        .into_iter()
        .collect();
        assert!(list.contains_directive());
        assert!(list.contains_comment());
        assert!(!list.is_whitespace_only());
        assert_eq!(list.text(), "#if DEBUG\n// note");
        assert_eq!(list.width(), 17);
    }

    #[test]
    fn line_break_requirements() {
        assert!(Trivia::new(TriviaKind::LineComment, "// x").needs_line_break());
        assert!(Trivia::new(TriviaKind::Directive, "#endif").needs_line_break());
        assert!(!Trivia::new(TriviaKind::BlockComment, "/* x */").needs_line_break());
    }
}
