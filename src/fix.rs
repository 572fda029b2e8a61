//! Apply one fix to one document.
//!
//! A fix runs against the document the caller holds now, which may have
//! changed since the diagnostic was reported. The rule finds its site again
//! by shape; if the shape is gone the outcome is
//! [`FixOutcome::NotApplicable`], not an error.

use serde::Serialize;
use tracing::debug;
use tugfold_core::cancel::{self, CancellationToken};
use tugfold_core::error::{FoldError, FoldResult};
use tugfold_core::Span;

use crate::diff::{generate_unified_diff, TextEdit};
use crate::document::Document;
use crate::registry::{Rewrite, RuleRegistry};

/// Result of a fix request.
#[derive(Debug, Clone)]
pub enum FixOutcome {
    /// The rewrite was applied.
    Applied {
        /// The new document.
        document: Document,
        /// The changed text.
        edit: TextEdit,
    },
    /// The target no longer has the shape the rule expects.
    NotApplicable { reason: String },
}

/// Serializable summary of a [`FixOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixSummary {
    pub descriptor_id: String,
    /// `"applied"` or `"not_applicable"`.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit: Option<TextEdit>,
    /// Unified diff of the edit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl FixOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FixOutcome::Applied { .. })
    }

    /// The new document, if the fix was applied.
    pub fn document(&self) -> Option<&Document> {
        match self {
            FixOutcome::Applied { document, .. } => Some(document),
            FixOutcome::NotApplicable { .. } => None,
        }
    }

    pub fn summary(&self, descriptor_id: &str) -> FixSummary {
        match self {
            FixOutcome::Applied { edit, .. } => FixSummary {
                descriptor_id: descriptor_id.to_string(),
                status: "applied",
                reason: None,
                edit: Some(edit.clone()),
                diff: Some(generate_unified_diff(std::slice::from_ref(edit))),
            },
            FixOutcome::NotApplicable { reason } => FixSummary {
                descriptor_id: descriptor_id.to_string(),
                status: "not_applicable",
                reason: Some(reason.clone()),
                edit: None,
                diff: None,
            },
        }
    }
}

/// Apply the built-in rule `descriptor_id` at `target_span`.
///
/// `target_span` is the primary span of a diagnostic reported for that rule.
pub fn try_fix(
    document: &Document,
    target_span: Span,
    descriptor_id: &str,
    cancel: &CancellationToken,
) -> FoldResult<FixOutcome> {
    try_fix_with(
        &RuleRegistry::with_builtin_rules(),
        document,
        target_span,
        descriptor_id,
        cancel,
    )
}

/// Like [`try_fix`], with the rules of `registry`.
pub fn try_fix_with(
    registry: &RuleRegistry,
    document: &Document,
    target_span: Span,
    descriptor_id: &str,
    cancel: &CancellationToken,
) -> FoldResult<FixOutcome> {
    let rule = registry
        .get(descriptor_id)
        .ok_or_else(|| FoldError::UnknownRule {
            id: descriptor_id.to_string(),
        })?;
    cancel::check(cancel)?;
    debug!(
        file = document.path(),
        rule = descriptor_id,
        start = target_span.start,
        end = target_span.end,
        "applying fix"
    );

    let module = match rule.fix(document, target_span, cancel)? {
        Rewrite::Module(module) => module,
        Rewrite::NotApplicable(reason) => {
            debug!(rule = descriptor_id, %reason, "fix not applicable");
            return Ok(FixOutcome::NotApplicable { reason });
        }
    };
    cancel::check(cancel)?;

    let next = document.with_module(module)?;
    let edit = TextEdit::between(document.path(), document.source(), next.source());
    debug!(
        rule = descriptor_id,
        removed = edit.old_text.len(),
        inserted = edit.new_text.len(),
        "fix applied"
    );
    Ok(FixOutcome::Applied {
        document: next,
        edit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applied_edit_covers_the_change() {
        let document = Document::parse("t.cs", "int x = 0;\nx = 5;\n");
        let outcome = try_fix(&document, Span::new(4, 5), "FOLD001", &CancellationToken::new())
            .unwrap();
        let FixOutcome::Applied { document: next, edit } = &outcome else {
            panic!("expected applied, got {:?}", outcome);
        };
        assert_eq!(next.source(), "int x = 5;\n");
        assert_eq!(edit.apply(document.source()), next.source());
        assert_eq!((edit.line, edit.col), (1, 9));

        let summary = outcome.summary("FOLD001");
        assert_eq!(summary.status, "applied");
        assert!(summary.diff.unwrap().starts_with("--- a/t.cs\n+++ b/t.cs\n@@ -1,"));
    }

    #[test]
    fn stale_target_is_not_applicable() {
        let document = Document::parse("t.cs", "int x = 0;\ny = 5;\n");
        let outcome = try_fix(&document, Span::new(4, 5), "FOLD001", &CancellationToken::new())
            .unwrap();
        assert!(!outcome.is_applied());
        let summary = outcome.summary("FOLD001");
        assert_eq!(summary.status, "not_applicable");
        assert!(summary.reason.is_some());
        assert!(summary.edit.is_none());
    }

    #[test]
    fn unknown_rule_is_an_error() {
        let document = Document::parse("t.cs", "x = 1;");
        let err = try_fix(&document, Span::new(0, 1), "NOPE", &CancellationToken::new())
            .unwrap_err();
        assert!(matches!(err, FoldError::UnknownRule { ref id } if id == "NOPE"));
    }

    #[test]
    fn cancelled_fix_returns_cancelled() {
        let document = Document::parse("t.cs", "int x = 0;\nx = 5;\n");
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = try_fix(&document, Span::new(4, 5), "FOLD001", &cancel).unwrap_err();
        assert!(err.is_cancelled());
    }
}
