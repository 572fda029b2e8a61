//! Text position utilities for byte offset and line:column conversions.
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - Byte offsets are **0-indexed**
//! - Columns count Unicode scalar values, not bytes
//! - Line/column values of 0 are treated as 1

use crate::span::Span;

/// Convert a byte offset to 1-indexed line and column.
///
/// If `offset` exceeds the content length, returns the position at the end
/// of the content. Offsets inside a multi-byte character resolve to the
/// column of that character.
pub fn byte_offset_to_position(content: &str, offset: usize) -> (u32, u32) {
    let mut line = 1u32;
    let mut col = 1u32;

    for (i, ch) in content.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }

    (line, col)
}

/// Convert 1-indexed line and column to a byte offset.
///
/// A column past the end of its line clamps to the line end; a line past the
/// end of the content returns the content length.
pub fn position_to_byte_offset(content: &str, line: u32, col: u32) -> usize {
    let line = line.max(1);
    let col = col.max(1);

    let Some(line_start) = line_start_offset(content, line) else {
        return content.len();
    };

    let mut current_col = 1u32;
    for (j, ch) in content[line_start..].char_indices() {
        if current_col == col || ch == '\n' {
            return line_start + j;
        }
        current_col += 1;
    }
    content.len()
}

/// Byte offset of the first character on a 1-indexed line.
///
/// Returns `None` when the content has fewer lines.
pub fn line_start_offset(content: &str, line: u32) -> Option<usize> {
    if line <= 1 {
        return Some(0);
    }
    content
        .match_indices('\n')
        .nth(line as usize - 2)
        .map(|(i, _)| i + 1)
}

/// Extract the text of a span.
///
/// Returns `None` if the span extends beyond the content or splits a
/// character.
pub fn extract_span<'a>(content: &'a str, span: &Span) -> Option<&'a str> {
    content.get(span.start..span.end)
}

/// Count the number of lines in the content.
pub fn line_count(content: &str) -> u32 {
    let newlines = content.bytes().filter(|&b| b == b'\n').count() as u32;
    if content.is_empty() || content.ends_with('\n') {
        newlines
    } else {
        newlines + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod position_tests {
        use super::*;

        #[test]
        fn offset_to_position_simple() {
            let content = "int x;\nx = 5;\n";
            assert_eq!(byte_offset_to_position(content, 0), (1, 1));
            assert_eq!(byte_offset_to_position(content, 4), (1, 5));
            assert_eq!(byte_offset_to_position(content, 6), (1, 7));
            assert_eq!(byte_offset_to_position(content, 7), (2, 1));
        }

        #[test]
        fn position_to_offset_simple() {
            let content = "int x;\nx = 5;\n";
            assert_eq!(position_to_byte_offset(content, 1, 1), 0);
            assert_eq!(position_to_byte_offset(content, 1, 5), 4);
            assert_eq!(position_to_byte_offset(content, 2, 1), 7);
        }

        #[test]
        fn roundtrip_every_offset() {
            let content = "{\n    int x = 0;\n    x = 5;\n}\n";
            for offset in 0..content.len() {
                let (line, col) = byte_offset_to_position(content, offset);
                assert_eq!(
                    position_to_byte_offset(content, line, col),
                    offset,
                    "roundtrip failed for offset {}",
                    offset
                );
            }
        }

        #[test]
        fn multibyte_columns_count_chars() {
            let content = "string s = \"héllo\"; s = \"x\";";
            let offset = content.find("; s").unwrap();
            let (line, col) = byte_offset_to_position(content, offset);
            assert_eq!(line, 1);
            assert_eq!(col, 19);
            assert_eq!(position_to_byte_offset(content, line, col), offset);
        }

        #[test]
        fn clamps_past_line_and_content_end() {
            let content = "ab\ncd";
            assert_eq!(position_to_byte_offset(content, 1, 99), 2);
            assert_eq!(position_to_byte_offset(content, 9, 1), content.len());
            assert_eq!(byte_offset_to_position(content, 99), (2, 3));
        }
    }

    mod line_tests {
        use super::*;

        #[test]
        fn line_start_offsets() {
            let content = "a\nbb\nccc";
            assert_eq!(line_start_offset(content, 1), Some(0));
            assert_eq!(line_start_offset(content, 2), Some(2));
            assert_eq!(line_start_offset(content, 3), Some(5));
            assert_eq!(line_start_offset(content, 4), None);
        }

        #[test]
        fn counts_lines() {
            assert_eq!(line_count(""), 0);
            assert_eq!(line_count("a"), 1);
            assert_eq!(line_count("a\n"), 1);
            assert_eq!(line_count("a\nb"), 2);
        }

        #[test]
        fn extracts_span_text() {
            let content = "int x = 0;";
            assert_eq!(extract_span(content, &Span::new(4, 5)), Some("x"));
            assert_eq!(extract_span(content, &Span::new(4, 50)), None);
        }
    }
}
