//! Text edits and unified diff generation.
//!
//! A fix replaces a whole module, but callers want to know what changed in
//! the text. [`TextEdit::between`] reduces two versions of a document to the
//! single byte range that differs, and [`generate_unified_diff`] renders a
//! set of edits in unified diff form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tugfold_core::text::byte_offset_to_position;
use tugfold_core::Span;

/// One contiguous replacement in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    /// File path.
    pub file: String,
    /// Replaced byte range in the old text.
    pub span: Span,
    /// Text removed.
    pub old_text: String,
    /// Text inserted.
    pub new_text: String,
    /// Line of `span.start` (1-indexed).
    pub line: u32,
    /// Column of `span.start` (1-indexed).
    pub col: u32,
}

impl TextEdit {
    /// The minimal edit turning `before` into `after`: everything except
    /// their common prefix and common suffix.
    pub fn between(file: impl Into<String>, before: &str, after: &str) -> TextEdit {
        let prefix = common_prefix_len(before, after);
        let suffix = common_suffix_len(&before[prefix..], &after[prefix..]);
        let old_end = before.len() - suffix;
        let new_end = after.len() - suffix;
        let (line, col) = byte_offset_to_position(before, prefix);
        TextEdit {
            file: file.into(),
            span: Span::new(prefix, old_end),
            old_text: before[prefix..old_end].to_string(),
            new_text: after[prefix..new_end].to_string(),
            line,
            col,
        }
    }

    /// True if applying the edit changes nothing.
    pub fn is_empty(&self) -> bool {
        self.old_text == self.new_text
    }

    /// Apply the edit to the text it was computed against.
    pub fn apply(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + self.new_text.len());
        out.push_str(&text[..self.span.start]);
        out.push_str(&self.new_text);
        out.push_str(&text[self.span.end..]);
        out
    }
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

fn common_suffix_len(a: &str, b: &str) -> usize {
    a.chars()
        .rev()
        .zip(b.chars().rev())
        .take_while(|(ca, cb)| ca == cb)
        .map(|(c, _)| c.len_utf8())
        .sum()
}

/// Generate a unified diff from edit information.
///
/// Groups edits by file (in path order) and shows each edit as one hunk of
/// its old and new lines.
pub fn generate_unified_diff(edits: &[TextEdit]) -> String {
    let mut by_file: BTreeMap<&str, Vec<&TextEdit>> = BTreeMap::new();
    for edit in edits {
        by_file.entry(&edit.file).or_default().push(edit);
    }

    let mut diff = String::new();
    for (file, file_edits) in by_file {
        diff.push_str(&format!("--- a/{}\n", file));
        diff.push_str(&format!("+++ b/{}\n", file));

        for edit in file_edits {
            let old_lines: Vec<&str> = edit.old_text.lines().collect();
            let new_lines: Vec<&str> = edit.new_text.lines().collect();
            diff.push_str(&format!(
                "@@ -{},{} +{},{} @@\n",
                edit.line,
                old_lines.len(),
                edit.line,
                new_lines.len()
            ));
            for line in old_lines {
                diff.push_str(&format!("-{}\n", line));
            }
            for line in new_lines {
                diff.push_str(&format!("+{}\n", line));
            }
        }
    }

    diff
}

// ============================================================================
// Tests
// ============================================================================
