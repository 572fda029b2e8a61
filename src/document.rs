//! Immutable source documents.
//!
//! A [`Document`] pairs source text with the module parsed from it. Both are
//! shared through `Arc`, so cloning a document is cheap and analysis threads
//! can hold snapshots without copying. Documents are never edited: a fix
//! hands [`Document::with_module`] a rebuilt tree and gets a new document
//! back, re-parsed from the printed text so spans and node ids match the new
//! source exactly.

use std::sync::Arc;

use tracing::{debug, warn};
use tugfold_core::error::{FoldError, FoldResult};
use tugfold_core::types::Location;
use tugfold_core::Span;
use tugfold_cst::semantic::{ScopeModel, ScopeModelBuilder};
use tugfold_cst::{parse_module, Codegen, Module, ParseDiagnostic};

/// An analyzed source file snapshot.
#[derive(Debug, Clone)]
pub struct Document {
    path: Arc<str>,
    source: Arc<str>,
    module: Arc<Module>,
    parse_errors: Arc<[ParseDiagnostic]>,
}

impl Document {
    /// Parse `source` into a document.
    pub fn parse(path: impl Into<String>, source: &str) -> Document {
        let parsed = parse_module(source);
        Document {
            path: Arc::from(path.into()),
            source: Arc::from(source),
            module: Arc::new(parsed.module),
            parse_errors: Arc::from(parsed.diagnostics),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Shared handle to the module.
    pub fn module_arc(&self) -> Arc<Module> {
        Arc::clone(&self.module)
    }

    pub fn parse_errors(&self) -> &[ParseDiagnostic] {
        &self.parse_errors
    }

    /// True if a parse diagnostic lies within or overlaps `span`.
    ///
    /// Zero-width diagnostics (missing tokens) count when they sit inside
    /// or at either edge of `span`.
    pub fn has_parse_errors_in(&self, span: Span) -> bool {
        self.parse_errors
            .iter()
            .any(|d| span.contains(&d.span) || span.overlaps(&d.span))
    }

    /// Resolve `span` to a reportable location in this document.
    pub fn location(&self, span: Span) -> Location {
        Location::from_span(self.path(), self.source(), span)
    }

    /// Build the reference semantic model for this document.
    pub fn scope_model(&self) -> ScopeModel {
        ScopeModel::build(&self.module)
    }

    /// Build the reference semantic model with predeclared globals.
    pub fn scope_model_with(&self, builder: ScopeModelBuilder) -> ScopeModel {
        builder.build(&self.module)
    }

    /// A new document holding `module`.
    ///
    /// The module is printed and the text re-parsed. The result is rejected
    /// with [`FoldError::VerificationFailed`] if it has more parse errors
    /// than this document.
    pub fn with_module(&self, module: Module) -> FoldResult<Document> {
        let source = module.to_source();
        let next = Document::parse(self.path(), &source);

        let before = self.parse_errors.len();
        let after = next.parse_errors.len();
        if after > before {
            warn!(
                file = self.path(),
                before, after, "rewritten document introduced parse errors"
            );
            return Err(FoldError::VerificationFailed {
                file: self.path().to_string(),
                before,
                after,
            });
        }

        debug!(
            file = self.path(),
            old_len = self.source.len(),
            new_len = source.len(),
            "replaced document module"
        );
        Ok(next)
    }
}
