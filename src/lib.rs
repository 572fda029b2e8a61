//! tugfold: trivia-preserving code fixes for a C-family statement language.
//!
//! The engine finds statement patterns that can be written more directly,
//! reports them with the spans a fix would remove, and applies fixes as new
//! documents whose untouched text is byte-for-byte identical to the input.
//!
//! ```
//! use tugfold::{try_fix, Analyzer, CancellationToken, Document, FixOutcome};
//!
//! let document = Document::parse("main.cs", "int x = 0;\nx = 5;\n");
//! let cancel = CancellationToken::new();
//! let semantic = document.scope_model();
//! let diagnostics = Analyzer::with_defaults()
//!     .analyze(&document, &semantic, &cancel)
//!     .unwrap();
//! assert_eq!(diagnostics[0].descriptor_id, "FOLD001");
//!
//! let outcome = try_fix(&document, diagnostics[0].span(), "FOLD001", &cancel).unwrap();
//! let FixOutcome::Applied { document, .. } = outcome else { panic!() };
//! assert_eq!(document.source(), "int x = 5;\n");
//! ```

// Core infrastructure - re-exported from tugfold-core
pub use tugfold_core::cancel;
pub use tugfold_core::diagnostic;
pub use tugfold_core::error;
pub use tugfold_core::span;
pub use tugfold_core::text;
pub use tugfold_core::types;

// Engine
pub mod analyzer;
pub mod config;
pub mod diff;
pub mod document;
pub mod fix;
pub mod registry;
pub mod rules;

pub use analyzer::{Analyzer, DocumentReport};
pub use config::{AnalyzerConfig, ConfigError};
pub use document::Document;
pub use fix::{try_fix, try_fix_with, FixOutcome, FixSummary};
pub use registry::{AnalysisContext, Rewrite, Rule, RuleRegistry};
pub use tugfold_core::cancel::{CancellationToken, Cancelled};
pub use tugfold_core::diagnostic::{Diagnostic, DiagnosticDescriptor, DiagnosticSink, Severity};
pub use tugfold_core::error::{FoldError, FoldResult};
pub use tugfold_core::Span;
