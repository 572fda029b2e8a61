//! Run the enabled rules over documents.
//!
//! An [`Analyzer`] owns a rule registry and a configuration. It holds no
//! per-document state, so one analyzer can serve many threads:
//! [`Analyzer::analyze_batch`] fans documents out over rayon, and each
//! document gets its own result.

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;
use tugfold_core::cancel::{self, CancellationToken};
use tugfold_core::diagnostic::{Diagnostic, DiagnosticSink};
use tugfold_core::error::FoldResult;
use tugfold_core::Span;
use tugfold_cst::semantic::SemanticModel;
use tugfold_cst::SequenceCollector;

use crate::config::AnalyzerConfig;
use crate::document::Document;
use crate::fix::{self, FixOutcome};
use crate::registry::{AnalysisContext, RuleRegistry};

/// Rules plus the configuration that selects and tunes them.
#[derive(Debug)]
pub struct Analyzer {
    registry: RuleRegistry,
    config: AnalyzerConfig,
}

/// Outcome of analyzing one document in a batch.
#[derive(Debug, Serialize)]
pub struct DocumentReport {
    pub path: String,
    #[serde(serialize_with = "serialize_outcome")]
    pub outcome: FoldResult<Vec<Diagnostic>>,
}

fn serialize_outcome<S: serde::Serializer>(
    outcome: &FoldResult<Vec<Diagnostic>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "snake_case")]
    enum Outcome<'a> {
        Diagnostics(&'a [Diagnostic]),
        Error { code: u8, message: String },
    }
    match outcome {
        Ok(diagnostics) => Outcome::Diagnostics(diagnostics).serialize(serializer),
        Err(err) => Outcome::Error {
            code: err.error_code().code(),
            message: err.to_string(),
        }
        .serialize(serializer),
    }
}

impl Analyzer {
    /// Create an analyzer, rejecting configuration for unknown rules.
    pub fn new(registry: RuleRegistry, config: AnalyzerConfig) -> FoldResult<Self> {
        config.validate(&registry)?;
        Ok(Analyzer { registry, config })
    }

    /// All built-in rules with default settings.
    pub fn with_defaults() -> Self {
        Analyzer {
            registry: RuleRegistry::with_builtin_rules(),
            config: AnalyzerConfig::default(),
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Report every match in `document`, sorted by location.
    ///
    /// On cancellation nothing is returned, not even matches found before
    /// the token fired.
    pub fn analyze(
        &self,
        document: &Document,
        semantic: &dyn SemanticModel,
        cancel: &CancellationToken,
    ) -> FoldResult<Vec<Diagnostic>> {
        let mut diagnostics = Vec::new();
        self.analyze_into(document, semantic, cancel, &mut diagnostics)?;
        diagnostics.sort_by(|a, b| {
            a.location
                .cmp(&b.location)
                .then_with(|| a.descriptor_id.cmp(&b.descriptor_id))
        });
        Ok(diagnostics)
    }

    /// Stream matches into `sink` as they are found.
    ///
    /// Each diagnostic reaches the sink only after its site was fully
    /// validated. If the run is cancelled, diagnostics already delivered
    /// stay delivered.
    pub fn analyze_into(
        &self,
        document: &Document,
        semantic: &dyn SemanticModel,
        cancel: &CancellationToken,
        sink: &mut dyn DiagnosticSink,
    ) -> FoldResult<()> {
        let sequences = SequenceCollector::collect(document.module());
        debug!(
            file = document.path(),
            sequences = sequences.len(),
            rules = self.registry.len(),
            "analyzing document"
        );

        let mut reported = CountingSink { inner: sink, count: 0 };
        for rule in self.registry.iter() {
            let descriptor = rule.descriptor();
            if !self.config.rule_enabled(descriptor.id) {
                debug!(rule = descriptor.id, "rule disabled");
                continue;
            }
            let context = AnalysisContext {
                document,
                semantic,
                cancel,
                severity: self.config.severity_for(descriptor),
                fade_out: self.config.analysis.fade_out,
            };
            for sequence in &sequences {
                cancel::check(cancel)?;
                rule.analyze_sequence(&context, sequence, &mut reported)?;
            }
        }

        debug!(file = document.path(), diagnostics = reported.count, "analysis done");
        Ok(())
    }

    /// Analyze `documents` in parallel, each with its own scope model.
    ///
    /// Results come back in input order. A failure in one document does not
    /// affect the others.
    pub fn analyze_batch(
        &self,
        documents: &[Document],
        cancel: &CancellationToken,
    ) -> Vec<DocumentReport> {
        documents
            .par_iter()
            .map(|document| {
                let semantic = document.scope_model();
                DocumentReport {
                    path: document.path().to_string(),
                    outcome: self.analyze(document, &semantic, cancel),
                }
            })
            .collect()
    }

    /// Apply the fix for `descriptor_id` at `target` in `document`.
    pub fn fix(
        &self,
        document: &Document,
        target: Span,
        descriptor_id: &str,
        cancel: &CancellationToken,
    ) -> FoldResult<FixOutcome> {
        fix::try_fix_with(&self.registry, document, target, descriptor_id, cancel)
    }
}

struct CountingSink<'s> {
    inner: &'s mut dyn DiagnosticSink,
    count: usize,
}

impl DiagnosticSink for CountingSink<'_> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.count += 1;
        self.inner.report(diagnostic);
    }
}
