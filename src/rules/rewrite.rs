//! Rewrite helpers: trivia merging, site lookup, and sequence splicing.
//!
//! When a fix deletes tokens, the trivia attached to them must go somewhere.
//! [`merge_trivia`] drops gaps that are only whitespace and otherwise keeps
//! every comment and directive, each with the line break it needs, ahead of
//! the surviving trailing trivia.

use tracing::trace;
use tugfold_core::error::{FoldError, FoldResult};
use tugfold_cst::{
    Expression, Module, Node, SequenceCollector, SequenceReplacer, Statement, StatementSequence,
    Token, Trivia, TriviaKind, TriviaList,
};

/// All trivia attached to `tokens`, in source order.
pub fn trivia_of<'t>(tokens: impl IntoIterator<Item = &'t Token>) -> Vec<&'t Trivia> {
    tokens
        .into_iter()
        .flat_map(|token| token.leading.iter().chain(token.trailing.iter()))
        .collect()
}

/// Merge the trivia of a removed region into the trailing trivia that
/// survives it.
///
/// - a whitespace-only gap is dropped and `tail` is kept unchanged
/// - otherwise comments and directives are kept in order, a line comment or
///   directive followed by its line break, and `tail` follows them
pub fn merge_trivia(gap: &[&Trivia], tail: &TriviaList) -> TriviaList {
    if gap.iter().all(|trivia| trivia.is_whitespace()) {
        return tail.clone();
    }

    let mut merged = TriviaList::new();
    for (i, trivia) in gap.iter().enumerate() {
        if trivia.is_whitespace() {
            continue;
        }
        if trivia.is_directive() {
            if !ends_with_line_break(&merged) {
                merged.push(Trivia::newline());
            }
        } else if !ends_with_line_break(&merged) {
            merged.push(Trivia::space());
        }
        merged.push((*trivia).clone());
        if trivia.needs_line_break() {
            let line_break = gap[i + 1..]
                .iter()
                .find(|t| t.kind == TriviaKind::EndOfLine)
                .map(|t| (*t).clone())
                .unwrap_or_else(Trivia::newline);
            merged.push(line_break);
        }
    }

    let mut rest = tail.iter().peekable();
    if ends_with_line_break(&merged) {
        // The kept line break already ends this line.
        while rest.next_if(|t| t.is_whitespace()).is_some() {}
    } else if rest.peek().is_some_and(|t| t.is_comment()) {
        merged.push(Trivia::space());
    }
    for trivia in rest {
        merged.push(trivia.clone());
    }

    trace!(kept = merged.len(), "merged gap trivia");
    merged
}

fn ends_with_line_break(list: &TriviaList) -> bool {
    list.iter()
        .last()
        .is_some_and(|t| t.kind == TriviaKind::EndOfLine)
}

/// Replace the leading trivia of `expr`'s first token.
pub fn with_leading_trivia(mut expr: Expression, leading: TriviaList) -> Expression {
    expr.first_token_mut().leading = leading;
    expr
}

/// A statement found by [`find_statement`], with its sequence.
pub struct Site<'m> {
    pub sequence: StatementSequence<'m>,
    pub index: usize,
}

impl<'m> Site<'m> {
    pub fn statement(&self) -> &'m Statement {
        &self.sequence.statements[self.index]
    }

    pub fn next(&self) -> Option<&'m Statement> {
        self.sequence.next_after(self.index)
    }
}

/// The first statement in document order satisfying `predicate`.
pub fn find_statement<'m>(
    module: &'m Module,
    mut predicate: impl FnMut(&Statement) -> bool,
) -> Option<Site<'m>> {
    SequenceCollector::collect(module)
        .into_iter()
        .find_map(|sequence| {
            sequence
                .iter()
                .find(|(_, statement)| predicate(*statement))
                .map(|(index, _)| Site { sequence, index })
        })
}

/// Rebuild `module` with statements `[index, index + count)` of the site's
/// sequence replaced by `replacement`. Every other statement is kept as is.
pub fn splice(
    module: &Module,
    site: &Site<'_>,
    count: usize,
    replacement: Vec<Statement>,
) -> FoldResult<Module> {
    let statements = site.sequence.statements;
    let end = (site.index + count).min(statements.len());
    let mut spliced = Vec::with_capacity(statements.len());
    spliced.extend_from_slice(&statements[..site.index]);
    spliced.extend(replacement);
    spliced.extend_from_slice(&statements[end..]);

    SequenceReplacer::new(site.sequence.owner, site.sequence.kind, spliced)
        .apply(module.clone())
        .map_err(|e| FoldError::apply(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tugfold_cst::{parse_module, Codegen};

    fn list(items: &[(TriviaKind, &str)]) -> TriviaList {
        items
            .iter()
            .map(|(kind, text)| Trivia::new(*kind, *text))
            .collect()
    }

    fn merge(gap: &[(TriviaKind, &str)], tail: &[(TriviaKind, &str)]) -> String {
        let gap = list(gap);
        let refs: Vec<&Trivia> = gap.iter().collect();
        merge_trivia(&refs, &list(tail)).text()
    }

    use tugfold_cst::TriviaKind::{BlockComment, Directive, EndOfLine, LineComment, Whitespace};

    mod merge_trivia {
        use super::*;

        #[test]
        fn whitespace_gap_keeps_tail() {
            let text = merge(
                &[(Whitespace, " "), (EndOfLine, "\n"), (Whitespace, "    ")],
                &[(EndOfLine, "\n")],
            );
            assert_eq!(text, "\n");
        }

        #[test]
        fn line_comment_keeps_its_line_break() {
            let text = merge(
                &[(Whitespace, " "), (LineComment, "// zero"), (EndOfLine, "\n")],
                &[(EndOfLine, "\n")],
            );
            assert_eq!(text, " // zero\n");
        }

        #[test]
        fn tail_comment_moves_to_next_line() {
            let text = merge(
                &[(LineComment, "// a"), (EndOfLine, "\r\n")],
                &[(Whitespace, "  "), (LineComment, "// b"), (EndOfLine, "\r\n")],
            );
            assert_eq!(text, " // a\r\n// b\r\n");
        }

        #[test]
        fn block_comment_stays_inline() {
            let text = merge(
                &[(Whitespace, " "), (BlockComment, "/* c */"), (Whitespace, " ")],
                &[(LineComment, "// tail")],
            );
            assert_eq!(text, " /* c */ // tail");
        }

        #[test]
        fn directive_starts_its_own_line() {
            let text = merge(
                &[(BlockComment, "/* c */"), (Directive, "#pragma x")],
                &[],
            );
            assert_eq!(text, " /* c */\n#pragma x\n");
        }

        #[test]
        fn lone_directive_starts_its_own_line() {
            let text = merge(
                &[(EndOfLine, "\n"), (Directive, "#if DEBUG"), (EndOfLine, "\n")],
                &[(EndOfLine, "\n")],
            );
            assert_eq!(text, "\n#if DEBUG\n");
        }
    }

    mod splicing {
        use super::*;

        #[test]
        fn find_and_splice_in_block() {
            let source = "a = 1;\n{\n  b = 2;\n  c = 3;\n}\n";
            let module = parse_module(source).module;
            let site = find_statement(&module, |s| {
                s.as_expression()
                    .is_some_and(|stmt| stmt.to_source().contains("b = 2"))
            })
            .unwrap();
            assert_eq!(site.index, 0);
            assert!(site.next().is_some());
            let kept = site.next().cloned().into_iter().collect();
            let rebuilt = splice(&module, &site, 2, kept).unwrap();
            assert_eq!(rebuilt.to_source(), "a = 1;\n{\n  c = 3;\n}\n");
        }

        #[test]
        fn missing_site() {
            let module = parse_module("a = 1;").module;
            assert!(find_statement(&module, |s| s.as_local_declaration().is_some()).is_none());
        }
    }

    mod leading_trivia {
        use super::*;

        #[test]
        fn replaces_only_leading() {
            let module = parse_module("x =\n  f(z) /*b*/;").module;
            let value = module.body[0]
                .as_expression()
                .unwrap()
                .expression
                .as_assignment()
                .unwrap()
                .value
                .as_ref()
                .clone();
            let value = with_leading_trivia(value, TriviaList::space());
            assert_eq!(value.to_source(), " f(z) /*b*/");
        }
    }
}
