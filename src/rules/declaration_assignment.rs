//! `FOLD001`: merge a local declaration with the assignment that follows it.
//!
//! ```text
//! int x = 0;        int x = 5;
//! x = 5;       =>
//! ```
//!
//! A declaration matches when:
//!
//! 1. it is not `const`, carries no diagnostics, and has no directive
//!    inside it
//! 2. it declares at least one variable
//! 3. the next statement in the same sequence exists, carries no
//!    diagnostics, and has no directive before or inside it
//! 4. that statement is `name = value;` with a bare identifier target
//! 5. the target resolves to the symbol of one of the declarators
//! 6. the declarator has no initializer, or its initializer is the type's
//!    default value
//!
//! and the assigned value, like any later declarator's initializer, does not
//! read the variable.

use tracing::trace;
use tugfold_core::cancel::{self, CancellationToken, Cancelled};
use tugfold_core::diagnostic::{Diagnostic, DiagnosticDescriptor, DiagnosticSink, Severity};
use tugfold_core::error::FoldResult;
use tugfold_core::Span;
use tugfold_cst::semantic::Symbol;
use tugfold_cst::{
    Assignment, Declarator, Expression, ExpressionStatement, Initializer, LocalDeclaration,
    NameExpr, Node, NodeId, Statement, StatementSequence, Token, TokenKind, Trivia, TriviaList,
};

use super::rewrite::{find_statement, merge_trivia, splice, trivia_of, with_leading_trivia};
use super::validate;
use crate::document::Document;
use crate::registry::{AnalysisContext, Rewrite, Rule};

pub static DESCRIPTOR: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "FOLD001",
    title: "Use local declaration with initializer",
    message_format: "Declaration of '{0}' can be merged with the assignment that follows it",
    category: "Style",
    default_severity: Severity::Info,
};

/// A validated declaration/assignment pair.
#[derive(Debug, Clone, Copy)]
pub struct DeclarationAssignmentMatch<'a> {
    pub declaration: &'a LocalDeclaration,
    pub declarator: &'a Declarator,
    /// The statement folded into the declaration.
    pub assignment_statement: &'a ExpressionStatement,
    pub assignment: &'a Assignment,
    pub target: &'a NameExpr,
    pub symbol: Symbol,
    /// The value the declaration will be initialized with.
    pub value: &'a Expression,
}

macro_rules! reject {
    ($reason:expr) => {{
        trace!(rule = DESCRIPTOR.id, reason = $reason, "no match");
        return Ok(None);
    }};
}

/// The syntactic part of a match: steps 1 to 4 without the semantic checks.
struct Shape<'a> {
    declaration: &'a LocalDeclaration,
    next: &'a Statement,
    assignment_statement: &'a ExpressionStatement,
    assignment: &'a Assignment,
    target: &'a NameExpr,
}

fn shape<'a>(
    statement: &'a Statement,
    next: Option<&'a Statement>,
) -> Result<Shape<'a>, &'static str> {
    let declaration = statement
        .as_local_declaration()
        .ok_or("statement is not a local declaration")?;
    if declaration.is_const() {
        return Err("declaration is constant");
    }
    if validate::has_inner_directive(statement) {
        return Err("directive inside the declaration");
    }
    if declaration.declarators.is_empty() {
        return Err("declaration has no declarators");
    }

    let next = next.ok_or("declaration is not followed by a statement")?;
    if validate::has_leading_directive(next) || validate::has_inner_directive(next) {
        return Err("directive before or inside the following statement");
    }
    let assignment_statement = next
        .as_expression()
        .ok_or("declaration is not followed by an assignment")?;
    let assignment = assignment_statement
        .expression
        .as_assignment()
        .ok_or("declaration is not followed by an assignment")?;
    if !assignment.is_simple() {
        return Err("following assignment is compound");
    }
    let target = assignment
        .target
        .as_name()
        .ok_or("assignment target is not a bare identifier")?;

    Ok(Shape {
        declaration,
        next,
        assignment_statement,
        assignment,
        target,
    })
}

/// Match the statement at `index` of `sequence`.
pub fn match_site<'a>(
    context: &AnalysisContext<'_>,
    sequence: &StatementSequence<'a>,
    index: usize,
) -> Result<Option<DeclarationAssignmentMatch<'a>>, Cancelled> {
    cancel::check(context.cancel)?;

    let Some(statement) = sequence.get(index) else {
        return Ok(None);
    };
    if statement.as_local_declaration().is_none() {
        return Ok(None);
    }
    let Shape {
        declaration,
        next,
        assignment_statement,
        assignment,
        target,
    } = match shape(statement, sequence.next_after(index)) {
        Ok(shape) => shape,
        Err(reason) => reject!(reason),
    };
    if validate::has_diagnostics(context, statement) {
        reject!("declaration has diagnostics");
    }
    if validate::has_diagnostics(context, next) {
        reject!("following statement has diagnostics");
    }

    // Resolve the target once, on the first declarator with its name.
    let mut resolved: Option<Option<Symbol>> = None;
    let mut found = None;
    for (position, declarator) in declaration.declarators.iter().enumerate() {
        if declarator.name() != target.value() {
            continue;
        }
        let symbol = *resolved.get_or_insert_with(|| context.semantic.resolve_symbol(target));
        let Some(symbol) = symbol else {
            reject!("target does not resolve");
        };
        if context.semantic.declared_symbol(declarator) == Some(symbol) {
            found = Some((position, declarator, symbol));
            break;
        }
    }
    let Some((position, declarator, symbol)) = found else {
        reject!("target is not declared by this statement");
    };

    if let Some(initializer) = &declarator.initializer {
        if !context
            .semantic
            .is_default_value(&declaration.ty, &initializer.value)
        {
            reject!("initializer is not the default value");
        }
    }
    let value: &Expression = &assignment.value;
    if validate::references_symbol(value, symbol, context.semantic, context.cancel)? {
        reject!("assigned value reads the variable");
    }
    for later in &declaration.declarators[position + 1..] {
        if let Some(initializer) = &later.initializer {
            if validate::references_symbol(
                &initializer.value,
                symbol,
                context.semantic,
                context.cancel,
            )? {
                reject!("a later declarator reads the variable");
            }
        }
    }

    Ok(Some(DeclarationAssignmentMatch {
        declaration,
        declarator,
        assignment_statement,
        assignment,
        target,
        symbol,
        value,
    }))
}

/// Build the diagnostic for a match.
///
/// Fade-outs cover the default initializer, the assignment operator, the
/// declaration's `;`, and the assignment target; there are none when the
/// declarator had no initializer.
pub fn report(context: &AnalysisContext<'_>, m: &DeclarationAssignmentMatch<'_>) -> Diagnostic {
    let name = &m.declarator.name;
    let location = context.document.location(name.span);
    let message = DESCRIPTOR.format_message(&[m.declarator.name()]);
    let mut diagnostic =
        Diagnostic::new(&DESCRIPTOR, location, message).with_severity(context.severity);
    if context.fade_out {
        if let Some(initializer) = &m.declarator.initializer {
            diagnostic = diagnostic
                .with_fade_out(Span::new(name.span.end, initializer.value.span().end))
                .with_fade_out(m.assignment.op.span)
                .with_fade_out(m.declaration.semicolon.span)
                .with_fade_out(m.target.name.span);
        }
    }
    diagnostic
}

/// Fold `assignment_statement` into declarator `position` of `declaration`.
///
/// The assigned value replaces the initializer value (or becomes a new
/// ` = value` initializer) and takes over the leading trivia of the value it
/// replaces. Trivia of every removed token is merged into the
/// trailing trivia of the declaration's `;`.
pub fn fold(
    declaration: &LocalDeclaration,
    position: usize,
    assignment_statement: &ExpressionStatement,
    assignment: &Assignment,
) -> LocalDeclaration {
    let original = &declaration.declarators[position];
    let mut gap: Vec<&Trivia> = Vec::new();
    if let Some(initializer) = &original.initializer {
        for (i, token) in initializer.value.tokens().into_iter().enumerate() {
            if i > 0 {
                gap.extend(token.leading.iter());
            }
            gap.extend(token.trailing.iter());
        }
    }
    gap.extend(declaration.semicolon.trailing.iter());
    gap.extend(trivia_of(assignment.target.tokens()));
    gap.extend(trivia_of([&assignment.op]));
    if let Some(first) = assignment.value.first_token() {
        gap.extend(first.leading.iter());
    }
    gap.extend(assignment_statement.semicolon.leading.iter());
    let trailing = merge_trivia(&gap, &assignment_statement.semicolon.trailing);

    let mut folded = declaration.clone();
    folded.semicolon.trailing = trailing;
    let declarator = &mut folded.declarators[position];
    let leading = declarator
        .initializer
        .as_ref()
        .and_then(|initializer| initializer.value.first_token())
        .map_or_else(TriviaList::new, |token| token.leading.clone());
    let value = with_leading_trivia(assignment.value.as_ref().clone(), leading);
    match &mut declarator.initializer {
        Some(initializer) => initializer.value = value,
        None => {
            declarator.initializer = Some(Initializer {
                id: NodeId::SYNTHETIC,
                equals: Token::synthetic(TokenKind::Equals, None)
                    .with_leading(TriviaList::space())
                    .with_trailing(TriviaList::space()),
                value,
            });
        }
    }
    folded
}

/// The `FOLD001` rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationAssignment;

impl Rule for DeclarationAssignment {
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
        let declares_target = |statement: &Statement| {
            statement
                .as_local_declaration()
                .is_some_and(|d| d.declarators.iter().any(|v| v.name.span == target))
        };
        let Some(site) = find_statement(module, declares_target) else {
            return Ok(Rewrite::not_applicable("no declaration at the target"));
        };
        let Some(declaration) = site.statement().as_local_declaration() else {
            return Ok(Rewrite::not_applicable("no declaration at the target"));
        };
        let Some(position) = declaration
            .declarators
            .iter()
            .position(|v| v.name.span == target)
        else {
            return Ok(Rewrite::not_applicable("no declarator at the target"));
        };
        let name = declaration.declarators[position].name();

        let shape = match shape(site.statement(), site.next()) {
            Ok(shape) => shape,
            Err(reason) => return Ok(Rewrite::not_applicable(reason)),
        };
        if shape.target.value() != name {
            return Ok(Rewrite::not_applicable(format!(
                "following statement no longer assigns '{}'",
                name
            )));
        }
        let Shape {
            assignment_statement,
            assignment,
            ..
        } = shape;

        cancel::check(cancel)?;
        let folded = fold(declaration, position, assignment_statement, assignment);
        let module = splice(module, &site, 2, vec![Statement::LocalDeclaration(folded)])?;
        Ok(Rewrite::Module(module))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tugfold_cst::{parse_module, Codegen};

    fn folded(source: &str) -> String {
        let module = parse_module(source).module;
        let declaration = module.body[0].as_local_declaration().unwrap();
        let statement = module.body[1].as_expression().unwrap();
        let assignment = statement.expression.as_assignment().unwrap();
        let position = declaration
            .declarators
            .iter()
            .position(|d| Some(d.name()) == assignment.target.as_name().map(NameExpr::value))
            .unwrap();
        fold(declaration, position, statement, assignment).to_source()
    }

    mod folding {
        use super::*;

        #[test]
        fn replaces_default_initializer() {
            assert_eq!(folded("int x = 0; x = 5;"), "int x = 5;");
        }

        #[test]
        fn adds_missing_initializer() {
            assert_eq!(folded("int x; x = 5;"), "int x = 5;");
            assert_eq!(folded("string s;\ns = name + \"!\";\n"), "string s = name + \"!\";\n");
        }

        #[test]
        fn keeps_other_declarators() {
            assert_eq!(folded("int a = 1, x, b; x = f(a);"), "int a = 1, x = f(a), b;");
        }

        #[test]
        fn keeps_comments_from_removed_region() {
            assert_eq!(
                folded("int x = 0; // zero\nx = 5; // five\n"),
                "int x = 5; // zero\n// five\n"
            );
            assert_eq!(folded("int x;\nx = /* why */ 5;\n"), "int x = 5; /* why */\n");
        }

        #[test]
        fn keeps_comment_after_old_value() {
            assert_eq!(folded("int x = 0 /* zero */;\nx = 5;"), "int x = 5; /* zero */");
        }

        #[test]
        fn keeps_directive_on_its_own_line() {
            assert_eq!(
                folded("int x = 0;\n#if DEBUG\nx = 5;\n#endif\n"),
                "int x = 5;\n#if DEBUG\n"
            );
        }
    }

    mod shapes {
        use super::*;

        fn rejection(source: &str) -> Option<&'static str> {
            let module = parse_module(source).module;
            shape(&module.body[0], module.body.get(1)).err()
        }

        #[test]
        fn plain_pair_has_shape() {
            assert_eq!(rejection("int x = 0;\nx = 5;\n"), None);
            assert_eq!(rejection("int x;\ny = 5;\n"), None);
        }

        #[test]
        fn constant_declaration() {
            assert_eq!(
                rejection("const int x = 0;\nx = 5;\n"),
                Some("declaration is constant")
            );
        }

        #[test]
        fn directive_before_assignment() {
            assert_eq!(
                rejection("int x = 0;\n#if DEBUG\nx = 5;\n#endif\n"),
                Some("directive before or inside the following statement")
            );
        }

        #[test]
        fn directive_inside_declaration() {
            assert_eq!(
                rejection("int x =\n#if A\n0;\n#endif\nx = 5;\n"),
                Some("directive inside the declaration")
            );
        }

        #[test]
        fn non_assignments() {
            assert_eq!(
                rejection("int x = 0;\n"),
                Some("declaration is not followed by a statement")
            );
            assert_eq!(
                rejection("int x = 0;\nx += 5;\n"),
                Some("following assignment is compound")
            );
            assert_eq!(
                rejection("int x = 0;\na.x = 5;\n"),
                Some("assignment target is not a bare identifier")
            );
        }
    }
}
