//! Precondition validators shared by the rule families.
//!
//! Each check answers one safety question about a candidate site. All of
//! them fail closed: when in doubt, the site is not reported.

use tugfold_core::cancel::{self, CancellationToken, Cancelled};
use tugfold_cst::semantic::{SemanticModel, Symbol};
use tugfold_cst::{Expression, Node, ReferenceCollector};

use crate::registry::AnalysisContext;

/// True if `node` overlaps a parse or semantic diagnostic.
pub fn has_diagnostics(context: &AnalysisContext<'_>, node: &impl Node) -> bool {
    let span = node.span();
    context.document.has_parse_errors_in(span) || context.semantic.has_diagnostics(span)
}

/// True if a directive sits anywhere between the first and last token of
/// `node`, or in its trailing trivia.
///
/// The first token's leading trivia belongs to the gap before the node and
/// is checked by [`has_leading_directive`].
pub fn has_inner_directive(node: &impl Node) -> bool {
    node.tokens().iter().enumerate().any(|(i, token)| {
        (i > 0 && token.leading.contains_directive()) || token.trailing.contains_directive()
    })
}

/// True if a directive precedes `node` on the lines before it.
pub fn has_leading_directive(node: &impl Node) -> bool {
    node.first_token()
        .is_some_and(|token| token.leading.contains_directive())
}

/// True if any identifier in `expr` resolves to `symbol`.
pub fn references_symbol(
    expr: &Expression,
    symbol: Symbol,
    semantic: &dyn SemanticModel,
    cancel: &CancellationToken,
) -> Result<bool, Cancelled> {
    let references = ReferenceCollector::collect_expression(expr, cancel)?;
    for reference in &references {
        cancel::check(cancel)?;
        if semantic.resolve_symbol(reference.name) == Some(symbol) {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tugfold_cst::semantic::ScopeModel;
    use tugfold_cst::parse_module;

    mod directives {
        use super::*;

        #[test]
        fn leading_directive_is_not_inner() {
            let module = parse_module("#if DEBUG\nint x = 0;\n#endif\n").module;
            let decl = &module.body[0];
            assert!(has_leading_directive(decl));
            assert!(!has_inner_directive(decl));
        }

        #[test]
        fn directive_inside_statement() {
            let module = parse_module("int x =\n#if DEBUG\n 0;\n#endif\n").module;
            let decl = &module.body[0];
            assert!(!has_leading_directive(decl));
            assert!(has_inner_directive(decl));
        }

        #[test]
        fn plain_comments_are_not_directives() {
            let module = parse_module("// note\nint x = /* zero */ 0;").module;
            assert!(!has_leading_directive(&module.body[0]));
            assert!(!has_inner_directive(&module.body[0]));
        }
    }

    mod references {
        use super::*;

        fn symbol_and_value(source: &str) -> (bool, bool) {
            let module = parse_module(source).module;
            let model = ScopeModel::build(&module);
            let decl = module.body[0].as_local_declaration().unwrap();
            let symbol = model.declared_symbol(&decl.declarators[0]).unwrap();
            let assignment = module.body[1]
                .as_expression()
                .unwrap()
                .expression
                .as_assignment()
                .unwrap();
            let cancel = CancellationToken::new();
            let found = references_symbol(&assignment.value, symbol, &model, &cancel).unwrap();
            let cancelled = CancellationToken::new();
            cancelled.cancel();
            let aborted =
                references_symbol(&assignment.value, symbol, &model, &cancelled).is_err();
            (found, aborted)
        }

        #[test]
        fn finds_self_reference() {
            assert_eq!(symbol_and_value("int x = 0; x = x + 1;"), (true, true));
            assert_eq!(symbol_and_value("int x = 0; x = f(g(x));"), (true, true));
        }

        #[test]
        fn ignores_same_name_members() {
            let module = parse_module("int x = 0; x = other.x;").module;
            let model = ScopeModel::build(&module);
            let decl = module.body[0].as_local_declaration().unwrap();
            let symbol = model.declared_symbol(&decl.declarators[0]).unwrap();
            let value = &module.body[1]
                .as_expression()
                .unwrap()
                .expression
                .as_assignment()
                .unwrap()
                .value;
            let cancel = CancellationToken::new();
            assert!(!references_symbol(value, symbol, &model, &cancel).unwrap());
        }
    }
}
