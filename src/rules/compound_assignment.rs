//! `FOLD002`: use a compound assignment operator.
//!
//! ```text
//! total = total + step;   =>   total += step;
//! ```
//!
//! The statement matches when the value is a binary `+ - * / %` expression
//! whose left operand is a bare identifier naming the same variable as the
//! bare identifier being assigned. Only the outermost operator is folded, so
//! `x = x - a - b` (parsed as `(x - a) - b`) is left alone.

use tracing::trace;
use tugfold_core::cancel::{self, CancellationToken, Cancelled};
use tugfold_core::diagnostic::{Diagnostic, DiagnosticDescriptor, DiagnosticSink, Severity};
use tugfold_core::error::FoldResult;
use tugfold_core::Span;
use tugfold_cst::semantic::Symbol;
use tugfold_cst::{
    Assignment, Binary, Expression, ExpressionStatement, NameExpr, Node, Statement,
    StatementSequence, Token, TokenKind, Trivia,
};

use super::rewrite::{find_statement, merge_trivia, splice, trivia_of};
use super::validate;
use crate::document::Document;
use crate::registry::{AnalysisContext, Rewrite, Rule};

pub static DESCRIPTOR: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "FOLD002",
    title: "Use compound assignment",
    message_format: "Assignment to '{0}' can use a compound operator",
    category: "Style",
    default_severity: Severity::Info,
};

/// A validated `x = x op rhs` statement.
#[derive(Debug, Clone, Copy)]
pub struct CompoundAssignmentMatch<'a> {
    pub statement: &'a ExpressionStatement,
    pub assignment: &'a Assignment,
    pub target: &'a NameExpr,
    pub binary: &'a Binary,
    /// The repeated operand on the right.
    pub left: &'a NameExpr,
    pub symbol: Symbol,
    /// The operator the rewrite will use, e.g. `+=`.
    pub compound: TokenKind,
}

/// The parts of `x = x op rhs`, by shape alone.
struct Shape<'a> {
    assignment: &'a Assignment,
    target: &'a NameExpr,
    binary: &'a Binary,
    left: &'a NameExpr,
    compound: TokenKind,
}

fn shape(statement: &ExpressionStatement) -> Option<Shape<'_>> {
    let assignment = statement.expression.as_assignment()?;
    if !assignment.is_simple() {
        return None;
    }
    let target = assignment.target.as_name()?;
    let Expression::Binary(binary) = assignment.value.as_ref() else {
        return None;
    };
    let compound = binary.op.kind.compound_assignment()?;
    let left = binary.left.as_name()?;
    Some(Shape {
        assignment,
        target,
        binary,
        left,
        compound,
    })
}

/// Match the statement at `index` of `sequence`.
pub fn match_site<'a>(
    context: &AnalysisContext<'_>,
    sequence: &StatementSequence<'a>,
    index: usize,
) -> Result<Option<CompoundAssignmentMatch<'a>>, Cancelled> {
    cancel::check(context.cancel)?;

    let Some(statement) = sequence.get(index) else {
        return Ok(None);
    };
    let Some(expression_statement) = statement.as_expression() else {
        return Ok(None);
    };
    let Some(shape) = shape(expression_statement) else {
        return Ok(None);
    };
    if shape.left.value() != shape.target.value() {
        return Ok(None);
    }
    if validate::has_diagnostics(context, statement) {
        trace!(rule = DESCRIPTOR.id, "statement has diagnostics");
        return Ok(None);
    }
    if validate::has_inner_directive(statement) {
        trace!(rule = DESCRIPTOR.id, "directive inside statement");
        return Ok(None);
    }

    let Some(symbol) = context.semantic.resolve_symbol(shape.target) else {
        trace!(rule = DESCRIPTOR.id, "target does not resolve");
        return Ok(None);
    };
    if context.semantic.resolve_symbol(shape.left) != Some(symbol) {
        trace!(rule = DESCRIPTOR.id, "operand names a different variable");
        return Ok(None);
    }

    Ok(Some(CompoundAssignmentMatch {
        statement: expression_statement,
        assignment: shape.assignment,
        target: shape.target,
        binary: shape.binary,
        left: shape.left,
        symbol,
        compound: shape.compound,
    }))
}

/// Build the diagnostic for a match.
pub fn report(context: &AnalysisContext<'_>, m: &CompoundAssignmentMatch<'_>) -> Diagnostic {
    let location = context.document.location(m.target.name.span);
    let message = DESCRIPTOR.format_message(&[m.target.value()]);
    let mut diagnostic =
        Diagnostic::new(&DESCRIPTOR, location, message).with_severity(context.severity);
    if context.fade_out {
        diagnostic = diagnostic
            .with_fade_out(m.left.span())
            .with_fade_out(m.binary.op.span);
    }
    diagnostic
}

/// Rewrite `x = x op rhs;` to `x op= rhs;`.
///
/// The new operator keeps the leading trivia of `=`; the trivia of `=`'s
/// trailing side, the repeated operand and the binary operator is merged
/// into its trailing trivia.
pub fn fold(
    statement: &ExpressionStatement,
    assignment: &Assignment,
    binary: &Binary,
    compound: TokenKind,
) -> ExpressionStatement {
    let mut gap: Vec<&Trivia> = assignment.op.trailing.iter().collect();
    gap.extend(trivia_of(binary.left.tokens()));
    gap.extend(binary.op.leading.iter());
    let trailing = merge_trivia(&gap, &binary.op.trailing);

    let op = Token::synthetic(compound, None)
        .with_leading(assignment.op.leading.clone())
        .with_trailing(trailing);
    let rewritten = Assignment {
        id: assignment.id,
        target: assignment.target.clone(),
        op,
        value: binary.right.clone(),
    };
    ExpressionStatement {
        id: statement.id,
        expression: Expression::Assignment(rewritten),
        semicolon: statement.semicolon.clone(),
    }
}

/// The `FOLD002` rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompoundAssignment;

impl Rule for CompoundAssignment {
    fn descriptor(&self) -> &'static DiagnosticDescriptor {
        &DESCRIPTOR
    }

    fn analyze_sequence(
        &self,
        context: &AnalysisContext<'_>,
        sequence: &StatementSequence<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), Cancelled> {
        for index in 0..sequence.len() {
            if let Some(m) = match_site(context, sequence, index)? {
                sink.report(report(context, &m));
            }
        }
        Ok(())
    }

    fn fix(
        &self,
        document: &Document,
        target: Span,
        cancel: &CancellationToken,
    ) -> FoldResult<Rewrite> {
        cancel::check(cancel)?;
        let module = document.module();
        let assigns_target = |statement: &Statement| {
            statement
                .as_expression()
                .and_then(|s| s.expression.as_assignment())
                .and_then(|a| a.target.as_name())
                .is_some_and(|name| name.name.span == target)
        };
        let Some(site) = find_statement(module, assigns_target) else {
            return Ok(Rewrite::not_applicable("no assignment at the target"));
        };
        let Some(statement) = site.statement().as_expression() else {
            return Ok(Rewrite::not_applicable("no assignment at the target"));
        };
        let Some(shape) = shape(statement) else {
            return Ok(Rewrite::not_applicable(
                "assignment no longer has the form 'x = x op value'",
            ));
        };
        if shape.left.value() != shape.target.value() {
            return Ok(Rewrite::not_applicable(format!(
                "operand no longer repeats '{}'",
                shape.target.value()
            )));
        }

        cancel::check(cancel)?;
        let folded = fold(statement, shape.assignment, shape.binary, shape.compound);
        let module = splice(module, &site, 1, vec![Statement::Expression(folded)])?;
        Ok(Rewrite::Module(module))
    }
}
