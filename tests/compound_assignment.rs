//! End-to-end tests for `FOLD002`.

use tugfold::rules::CompoundAssignment;
use tugfold::{
    try_fix, Analyzer, AnalyzerConfig, CancellationToken, Diagnostic, Document, FixOutcome,
    RuleRegistry, Span,
};

const ID: &str = "FOLD002";

fn analyzer() -> Analyzer {
    let mut registry = RuleRegistry::new();
    registry.register(Box::new(CompoundAssignment));
    Analyzer::new(registry, AnalyzerConfig::default()).unwrap()
}

fn diagnose(document: &Document) -> Vec<Diagnostic> {
    let semantic = document.scope_model();
    analyzer()
        .analyze(document, &semantic, &CancellationToken::new())
        .unwrap()
}

fn diagnose_source(source: &str) -> Vec<Diagnostic> {
    diagnose(&Document::parse("test.cs", source))
}

fn fix_first(source: &str) -> String {
    let document = Document::parse("test.cs", source);
    let diagnostics = diagnose(&document);
    let first = diagnostics.first().expect("a diagnostic to fix");
    match try_fix(&document, first.span(), ID, &CancellationToken::new()).unwrap() {
        FixOutcome::Applied { document, .. } => document.source().to_string(),
        FixOutcome::NotApplicable { reason } => panic!("fix not applicable: {}", reason),
    }
}

mod reporting {
    use super::*;

    #[test]
    fn reports_target_with_fade_outs() {
        let diagnostics = diagnose_source("int x = 1;\nx = x + 2;\n");
        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert_eq!(diagnostic.descriptor_id, ID);
        assert_eq!(diagnostic.span(), Span::new(11, 12));
        assert_eq!(diagnostic.fade_outs, vec![Span::new(15, 16), Span::new(17, 18)]);
        assert_eq!(diagnostic.message, "Assignment to 'x' can use a compound operator");
    }

    #[test]
    fn different_variable_is_not_reported() {
        assert!(diagnose_source("int x = 1; int y = 2;\nx = y + 2;\n").is_empty());
    }

    #[test]
    fn outer_variable_in_nested_block() {
        let source = "int x = 1;\n{\n    int y = 2;\n    x = x * y;\n}\n";
        assert_eq!(diagnose_source(source).len(), 1);
    }

    #[test]
    fn unassigned_read_fails_closed() {
        assert!(diagnose_source("int x;\nx = x + 1;\n").is_empty());
    }

    #[test]
    fn directive_inside_statement_fails_closed() {
        let source = "int x = 1;\nx = x\n#if DEBUG\n + 1;\n#endif\n";
        assert!(diagnose_source(source).is_empty());
    }

    #[test]
    fn non_arithmetic_operators_are_skipped() {
        assert!(diagnose_source("bool b = true;\nb = b && false;\n").is_empty());
        assert!(diagnose_source("int x = 1;\nx = x - 1 - 2;\n").is_empty());
    }
}

mod fixing {
    use super::*;

    #[test]
    fn rewrites_each_operator() {
        for (op, compound) in [("+", "+="), ("-", "-="), ("*", "*="), ("/", "/="), ("%", "%=")] {
            let source = format!("int x = 7;\nx = x {} 3;\n", op);
            let expected = format!("int x = 7;\nx {} 3;\n", compound);
            assert_eq!(fix_first(&source), expected);
        }
    }

    #[test]
    fn keeps_comments_and_indentation() {
        let source = "int total = 0;\n{\n    total = total /* add */ + 5; // step\n}\n";
        assert_eq!(
            fix_first(source),
            "int total = 0;\n{\n    total += /* add */ 5; // step\n}\n"
        );
    }

    #[test]
    fn fix_is_idempotent() {
        let fixed = fix_first("int x = 1;\nx = x * (x + 1);\n");
        assert_eq!(fixed, "int x = 1;\nx *= (x + 1);\n");
        assert!(diagnose_source(&fixed).is_empty());
    }

    #[test]
    fn stale_target_is_not_applicable() {
        let reported = diagnose_source("int x = 1;\nx = x + 2;\n");
        let edited = Document::parse("test.cs", "int x = 1;\nx = 2 + x;\n");
        let outcome = try_fix(&edited, reported[0].span(), ID, &CancellationToken::new()).unwrap();
        let FixOutcome::NotApplicable { reason } = outcome else {
            panic!("expected not applicable");
        };
        assert!(reason.contains("'x = x op value'"));
    }
}
