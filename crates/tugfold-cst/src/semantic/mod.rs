// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Symbol resolution facade.
//!
//! The rewrite engine asks semantic questions only through [`SemanticModel`]:
//! which declaration an identifier refers to, which symbol a declarator
//! introduces, whether a value is the type's default, and whether a region
//! carries semantic errors. [`ScopeModel`] is the reference implementation
//! for the language parsed by this crate; hosts with a real compiler behind
//! them implement the trait themselves.

pub mod defaults;
mod scope_model;

use serde::{Deserialize, Serialize};
use tugfold_core::Span;

use crate::nodes::{Declarator, Expression, NameExpr, TypeRef};

pub use defaults::{is_default_value, TypeCategory};
pub use scope_model::{
    ScopeModel, ScopeModelBuilder, SemanticDiagnostic, SemanticDiagnosticKind, SymbolInfo,
};

/// Identity of a declared entity. Symbols are compared, never inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(u64);

impl Symbol {
    pub fn new(raw: u64) -> Self {
        Symbol(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Semantic questions the engine may ask about one document.
///
/// Implementations answer for a fixed snapshot and must be safe to share
/// across analysis threads.
pub trait SemanticModel: Send + Sync {
    /// The symbol an identifier reference resolves to, if it resolves.
    fn resolve_symbol(&self, name: &NameExpr) -> Option<Symbol>;

    /// The symbol introduced by a declarator.
    fn declared_symbol(&self, declarator: &Declarator) -> Option<Symbol>;

    /// True if `value` provably equals `default(ty)`.
    fn is_default_value(&self, ty: &TypeRef, value: &Expression) -> bool;

    /// True if any semantic error lies within or overlaps `span`.
    fn has_diagnostics(&self, span: Span) -> bool {
        let _ = span;
        false
    }
}
