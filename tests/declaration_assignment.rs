//! End-to-end tests for `FOLD001`: analyze a document, fix each reported
//! site, and check the rewritten text.

use tugfold::rules::DeclarationAssignment;
use tugfold::{
    try_fix, Analyzer, AnalyzerConfig, CancellationToken, Diagnostic, Document, FixOutcome,
    RuleRegistry, Span,
};
use tugfold_cst::semantic::ScopeModelBuilder;

// ============================================================================
// Test Infrastructure
// ============================================================================

const ID: &str = "FOLD001";

fn analyzer() -> Analyzer {
    let mut registry = RuleRegistry::new();
    registry.register(Box::new(DeclarationAssignment));
    Analyzer::new(registry, AnalyzerConfig::default()).unwrap()
}

fn globals() -> ScopeModelBuilder {
    ScopeModelBuilder::new()
        .with_global("f", "int")
        .with_global("g", "int")
        .with_global("name", "string")
}

fn diagnose(document: &Document) -> Vec<Diagnostic> {
    let semantic = document.scope_model_with(globals());
    analyzer()
        .analyze(document, &semantic, &CancellationToken::new())
        .unwrap()
}

fn diagnose_source(source: &str) -> Vec<Diagnostic> {
    diagnose(&Document::parse("test.cs", source))
}

/// Fix the first reported site until none are left.
fn fix_all(source: &str) -> String {
    let mut document = Document::parse("test.cs", source);
    for _ in 0..16 {
        let diagnostics = diagnose(&document);
        let Some(first) = diagnostics.first() else {
            return document.source().to_string();
        };
        match try_fix(&document, first.span(), ID, &CancellationToken::new()).unwrap() {
            FixOutcome::Applied { document: next, .. } => document = next,
            FixOutcome::NotApplicable { reason } => panic!("fix not applicable: {}", reason),
        }
    }
    panic!("fixes did not converge");
}

// ============================================================================
// Scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn default_initializer_reports_fade_outs() {
        let diagnostics = diagnose_source("int x = 0; x = 5;");
        assert_eq!(diagnostics.len(), 1);
        let diagnostic = &diagnostics[0];
        assert_eq!(diagnostic.descriptor_id, ID);
        assert_eq!(diagnostic.span(), Span::new(4, 5));
        assert_eq!(
            diagnostic.fade_outs,
            vec![
                Span::new(5, 9),
                Span::new(13, 14),
                Span::new(9, 10),
                Span::new(11, 12),
            ]
        );
        assert_eq!(fix_all("int x = 0; x = 5;"), "int x = 5;");
    }

    #[test]
    fn missing_initializer_reports_primary_only() {
        let diagnostics = diagnose_source("int x; x = 5;");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].span(), Span::new(4, 5));
        assert!(diagnostics[0].fade_outs.is_empty());
        assert_eq!(fix_all("int x; x = 5;"), "int x = 5;");
    }

    #[test]
    fn self_reference_is_not_reported() {
        assert!(diagnose_source("int x = 0; x = x + 1;").is_empty());
        assert!(diagnose_source("int x = 0; x = f(g(x));").is_empty());
        assert!(diagnose_source("int x; x = x + 1;").is_empty());
    }

    #[test]
    fn assignment_to_other_variable_is_not_reported() {
        assert_eq!(diagnose_source("int x = 0; int y; y = 5;").len(), 1);
        assert!(diagnose_source("int x = 0; f = 5;").is_empty());
    }

    #[test]
    fn directive_between_statements_is_not_reported() {
        let source = "int x = 0;\n#if DEBUG\nx = 5;\n#endif\n";
        assert!(diagnose_source(source).is_empty());
    }
}

// ============================================================================
// Preconditions
// ============================================================================

mod preconditions {
    use super::*;

    #[test]
    fn non_default_initializers() {
        assert!(diagnose_source("int x = 1; x = 5;").is_empty());
        assert!(diagnose_source("int x = f(); x = 5;").is_empty());
        assert!(diagnose_source("bool b = true; b = false;").is_empty());
        assert!(diagnose_source("double d = -0.0; d = 1.5;").is_empty());
        assert!(diagnose_source("var v = 0; v = 5;").is_empty());
        assert!(diagnose_source("char c = default(int); c = default;").is_empty());
    }

    #[test]
    fn default_initializers() {
        assert_eq!(diagnose_source("int x = -0; x = 5;").len(), 1);
        assert_eq!(diagnose_source("long n = 0x0; n = 5;").len(), 1);
        assert_eq!(diagnose_source("double d = 0; d = 1.5;").len(), 1);
        assert_eq!(diagnose_source("bool b = (false); b = true;").len(), 1);
        assert_eq!(diagnose_source("string s = null; s = name;").len(), 1);
        assert_eq!(diagnose_source("int? n = null; n = 3;").len(), 1);
        assert_eq!(diagnose_source("int x = default(int); x = 5;").len(), 1);
        assert_eq!(diagnose_source("char c = default; c = default;").len(), 1);
    }

    #[test]
    fn const_declarations_are_skipped() {
        assert!(diagnose_source("const int x = 0; x = 5;").is_empty());
    }

    #[test]
    fn compound_and_member_assignments_are_skipped() {
        assert!(diagnose_source("int x = 0; x += 5;").is_empty());
        assert!(diagnose_source("string s = null; s.length = 5;").is_empty());
    }

    #[test]
    fn later_declarator_reading_the_variable() {
        assert!(diagnose_source("int x = 0, y = x; x = 5;").is_empty());
        assert_eq!(diagnose_source("int y = 1, x = 0; x = y;").len(), 1);
    }

    #[test]
    fn parse_errors_fail_closed() {
        assert!(diagnose_source("int x = 0;\nx = 5 +;\n").is_empty());
        assert!(diagnose_source("int x = 0\nx = 5;\n").is_empty());
    }

    #[test]
    fn unresolved_target_fails_closed() {
        let document = Document::parse("test.cs", "int x = 0; x = 5;");
        // A model built for another module resolves nothing here.
        let other = Document::parse("other.cs", "int y;");
        let semantic = other.scope_model();
        let diagnostics = analyzer()
            .analyze(&document, &semantic, &CancellationToken::new())
            .unwrap();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn shadowed_declaration_in_nested_block() {
        let source = "int x = 0;\n{\n    int x;\n    x = 5;\n}\n";
        let diagnostics = diagnose_source(source);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.line, 3);
    }

    #[test]
    fn assignment_in_nested_block_is_a_different_sequence() {
        assert!(diagnose_source("int x;\n{\n    x = 5;\n}\n").is_empty());
    }
}

// ============================================================================
// Rewrites
// ============================================================================

mod rewrites {
    use super::*;

    #[test]
    fn nested_block_keeps_indentation() {
        let source = "bool c = true;\nif (c) {\n    int x;\n    x = 5;\n}\n";
        assert_eq!(
            fix_all(source),
            "bool c = true;\nif (c) {\n    int x = 5;\n}\n"
        );
    }

    #[test]
    fn other_declarators_are_kept() {
        assert_eq!(
            fix_all("int a = 1, x, b; x = f(a);"),
            "int a = 1, x = f(a), b;"
        );
    }

    #[test]
    fn comments_are_preserved() {
        assert_eq!(
            fix_all("int x = 0; // zero\nx = 5; // five\n"),
            "int x = 5; // zero\n// five\n"
        );
        assert_eq!(
            fix_all("string s;\ns = /* greeting */ name;\n"),
            "string s = name; /* greeting */\n"
        );
    }

    #[test]
    fn crlf_line_endings_survive() {
        assert_eq!(fix_all("int x = 0;\r\nx = 5;\r\n"), "int x = 5;\r\n");
    }

    #[test]
    fn surrounding_text_is_untouched() {
        let source = "// header\nint a = 1;\nint x = 0;\nx = a * 2;\nreturn x;\n";
        assert_eq!(
            fix_all(source),
            "// header\nint a = 1;\nint x = a * 2;\nreturn x;\n"
        );
    }

    #[test]
    fn fix_is_idempotent() {
        let once = fix_all("int x; x = 5;\nint y = 0;\ny = x;\n");
        assert_eq!(once, "int x = 5;\nint y = x;\n");
        assert!(diagnose_source(&once).is_empty());
        assert_eq!(fix_all(&once), once);
    }
}

// ============================================================================
// Two-phase protocol
// ============================================================================

mod protocol {
    use super::*;

    #[test]
    fn stale_target_is_not_applicable() {
        let reported = diagnose_source("int x = 0;\nx = 5;\n");
        let edited = Document::parse("test.cs", "int x = 0;\ny = 5;\n");
        let outcome = try_fix(&edited, reported[0].span(), ID, &CancellationToken::new()).unwrap();
        assert!(matches!(outcome, FixOutcome::NotApplicable { .. }));
    }

    #[test]
    fn moved_declarator_is_not_applicable() {
        let reported = diagnose_source("int x = 0;\nx = 5;\n");
        let edited = Document::parse("test.cs", "\n\nint x = 0;\nx = 5;\n");
        let outcome = try_fix(&edited, reported[0].span(), ID, &CancellationToken::new()).unwrap();
        assert!(!outcome.is_applied());
    }

    /// Fix the declarator named `name` without analyzing first.
    fn fix_unreported(source: &str, name: &str) -> FixOutcome {
        let document = Document::parse("test.cs", source);
        assert!(diagnose(&document).is_empty());
        let start = source.find(&format!(" {name} ")).unwrap() + 1;
        let target = Span::new(start, start + name.len());
        try_fix(&document, target, ID, &CancellationToken::new()).unwrap()
    }

    #[test]
    fn unreported_directive_site_is_not_applicable() {
        let outcome = fix_unreported("int x = 0;\n#if DEBUG\nx = 5;\n#endif\n", "x");
        let FixOutcome::NotApplicable { reason } = outcome else {
            panic!("expected not applicable");
        };
        assert!(reason.contains("directive"));
    }

    #[test]
    fn unreported_const_site_is_not_applicable() {
        let outcome = fix_unreported("const int x = 0;\nx = 5;\n", "x");
        let FixOutcome::NotApplicable { reason } = outcome else {
            panic!("expected not applicable");
        };
        assert!(reason.contains("constant"));
    }

    #[test]
    fn cancellation_aborts_analysis() {
        let document = Document::parse("test.cs", "int x = 0; x = 5;");
        let semantic = document.scope_model();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = analyzer()
            .analyze(&document, &semantic, &cancel)
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
