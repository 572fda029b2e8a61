//! Rule trait and registry.
//!
//! Every pattern family is a [`Rule`]: a descriptor, an analysis pass over
//! statement sequences, and a fix that re-matches structurally against a
//! fresh document. Rules are stateless and shared across threads; the
//! [`RuleRegistry`] looks them up by descriptor id.

use std::collections::BTreeMap;

use tugfold_core::cancel::{CancellationToken, Cancelled};
use tugfold_core::diagnostic::{DiagnosticDescriptor, DiagnosticSink, Severity};
use tugfold_core::error::FoldResult;
use tugfold_core::Span;
use tugfold_cst::semantic::SemanticModel;
use tugfold_cst::{Module, StatementSequence};

use crate::document::Document;
use crate::rules;

/// Everything a rule may consult while analyzing one document.
pub struct AnalysisContext<'d> {
    pub document: &'d Document,
    pub semantic: &'d dyn SemanticModel,
    pub cancel: &'d CancellationToken,
    /// Severity to report with.
    pub severity: Severity,
    /// Whether to attach fade-out spans.
    pub fade_out: bool,
}

/// Result of a rule's fix for one site.
#[derive(Debug, Clone)]
pub enum Rewrite {
    /// The rebuilt module.
    Module(Module),
    /// The site no longer has the expected shape.
    NotApplicable(String),
}

impl Rewrite {
    pub fn not_applicable(reason: impl Into<String>) -> Self {
        Rewrite::NotApplicable(reason.into())
    }
}

/// A pattern family: match, validate, report, rewrite.
pub trait Rule: Send + Sync {
    /// Static identity of the diagnostics this rule reports.
    fn descriptor(&self) -> &'static DiagnosticDescriptor;

    /// Report every validated match in `sequence`.
    ///
    /// A match is reported only after all of its checks passed, so a
    /// cancelled run never leaves a half-reported site behind.
    fn analyze_sequence(
        &self,
        context: &AnalysisContext<'_>,
        sequence: &StatementSequence<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<(), Cancelled>;

    /// Rewrite the site whose primary span is `target` in `document`.
    ///
    /// The site is found again by shape alone; semantic facts established
    /// during analysis are trusted, not recomputed.
    fn fix(
        &self,
        document: &Document,
        target: Span,
        cancel: &CancellationToken,
    ) -> FoldResult<Rewrite>;
}

/// Rules keyed by descriptor id.
#[derive(Default)]
pub struct RuleRegistry {
    rules: BTreeMap<&'static str, Box<dyn Rule>>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in rule.
    pub fn with_builtin_rules() -> Self {
        let mut registry = Self::new();
        for rule in rules::builtin_rules() {
            registry.register(rule);
        }
        registry
    }

    /// Add a rule, returning any rule previously registered under its id.
    pub fn register(&mut self, rule: Box<dyn Rule>) -> Option<Box<dyn Rule>> {
        self.rules.insert(rule.descriptor().id, rule)
    }

    pub fn get(&self, id: &str) -> Option<&dyn Rule> {
        self.rules.get(id).map(|rule| rule.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.keys().copied()
    }

    /// Registered rules in id order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> + '_ {
        self.rules.values().map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.rules.keys()).finish()
    }
}
