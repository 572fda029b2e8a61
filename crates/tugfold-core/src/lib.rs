//! Core infrastructure for tugfold.
//!
//! This crate provides the language-agnostic pieces shared by the syntax
//! layer and the rewrite engine:
//! - Byte spans and text position conversions
//! - Source locations for reporting
//! - Diagnostic descriptors, diagnostics, and sinks
//! - The unified error type and its output codes
//! - Cooperative cancellation

pub mod cancel;
pub mod diagnostic;
pub mod error;
pub mod span;
pub mod text;
pub mod types;

pub use cancel::{CancellationToken, Cancelled};
pub use span::Span;
