// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Scope-based semantic model.
//!
//! One pass over a module binds every identifier reference to the innermost
//! visible declaration. Bindings are keyed by the span of the name token, so
//! the model answers for the exact tree it was built from and for nothing
//! else.
//!
//! Scoping rules:
//! - the module body and each `{ }` block open a lexical scope
//! - a declarator becomes visible after its own initializer
//! - a later declaration of a name shadows earlier ones
//! - caller-supplied globals sit below the module scope and count as assigned
//!
//! Reading a local before any textual assignment to it, and referencing a
//! name that resolves to nothing, are reported as [`SemanticDiagnostic`]s.

use std::collections::{HashMap, HashSet};

use tracing::trace;
use tugfold_core::Span;

use super::{defaults, SemanticModel, Symbol};
use crate::nodes::{
    Assignment, Block, Declarator, Expression, LocalDeclaration, Module, NameExpr, TypeRef,
};
use crate::visitor::{walk_expression, walk_module, VisitResult, Visitor};

/// What is known about a declared symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: String,
    /// Declared type as written, including a trailing `?`.
    pub ty: String,
    /// Span of the declaring name token; empty for globals.
    pub declared_at: Span,
    pub is_global: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticDiagnosticKind {
    UnresolvedName,
    UnassignedRead,
}

/// A semantic error located at a name token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticDiagnostic {
    pub kind: SemanticDiagnosticKind,
    pub span: Span,
    pub message: String,
}

/// Resolved bindings for one module.
#[derive(Debug, Clone, Default)]
pub struct ScopeModel {
    symbols: Vec<SymbolInfo>,
    references: HashMap<Span, Symbol>,
    declarations: HashMap<Span, Symbol>,
    diagnostics: Vec<SemanticDiagnostic>,
}

impl ScopeModel {
    /// Build a model with no globals.
    pub fn build(module: &Module) -> ScopeModel {
        ScopeModelBuilder::new().build(module)
    }

    pub fn symbol_info(&self, symbol: Symbol) -> Option<&SymbolInfo> {
        usize::try_from(symbol.raw())
            .ok()
            .and_then(|index| self.symbols.get(index))
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn diagnostics(&self) -> &[SemanticDiagnostic] {
        &self.diagnostics
    }
}

impl SemanticModel for ScopeModel {
    fn resolve_symbol(&self, name: &NameExpr) -> Option<Symbol> {
        self.references.get(&name.name.span).copied()
    }

    fn declared_symbol(&self, declarator: &Declarator) -> Option<Symbol> {
        self.declarations.get(&declarator.name.span).copied()
    }

    fn is_default_value(&self, ty: &TypeRef, value: &Expression) -> bool {
        defaults::is_default_value(ty, value)
    }

    fn has_diagnostics(&self, span: Span) -> bool {
        self.diagnostics
            .iter()
            .any(|d| span.contains(&d.span) || span.overlaps(&d.span))
    }
}

/// Configures and runs the binding pass.
///
/// ```ignore
/// let model = ScopeModelBuilder::new()
///     .with_global("console", "Console")
///     .build(&parsed.module);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScopeModelBuilder {
    globals: Vec<(String, String)>,
}

impl ScopeModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predeclare a global visible everywhere in the module.
    pub fn with_global(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.globals.push((name.into(), ty.into()));
        self
    }

    pub fn build(self, module: &Module) -> ScopeModel {
        let mut binder = Binder::default();
        binder.scopes.push(HashMap::new());
        for (name, ty) in self.globals {
            let symbol = binder.declare(name, ty, Span::default(), true);
            binder.assigned.insert(symbol);
        }
        walk_module(&mut binder, module);

        let model = binder.model;
        trace!(
            symbols = model.symbols.len(),
            references = model.references.len(),
            diagnostics = model.diagnostics.len(),
            "built scope model"
        );
        model
    }
}

#[derive(Default)]
struct Binder {
    model: ScopeModel,
    scopes: Vec<HashMap<String, Symbol>>,
    assigned: HashSet<Symbol>,
    /// Type of the declaration whose declarators are being bound.
    declared_type: String,
}

impl Binder {
    fn declare(&mut self, name: String, ty: String, declared_at: Span, is_global: bool) -> Symbol {
        let symbol = Symbol::new(self.model.symbols.len() as u64);
        self.model.symbols.push(SymbolInfo {
            name: name.clone(),
            ty,
            declared_at,
            is_global,
        });
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, symbol);
        }
        symbol
    }

    fn lookup(&self, name: &str) -> Option<Symbol> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    fn report(&mut self, kind: SemanticDiagnosticKind, span: Span, message: String) {
        self.model.diagnostics.push(SemanticDiagnostic {
            kind,
            span,
            message,
        });
    }

    /// Bind `name`. Returns the symbol when it resolves.
    fn bind(&mut self, name: &NameExpr, reads: bool) -> Option<Symbol> {
        if name.name.is_missing() {
            return None;
        }
        let span = name.name.span;
        match self.lookup(name.value()) {
            Some(symbol) => {
                self.model.references.insert(span, symbol);
                if reads && !self.assigned.contains(&symbol) {
                    self.report(
                        SemanticDiagnosticKind::UnassignedRead,
                        span,
                        format!("use of unassigned local variable '{}'", name.value()),
                    );
                }
                Some(symbol)
            }
            None => {
                self.report(
                    SemanticDiagnosticKind::UnresolvedName,
                    span,
                    format!("the name '{}' does not exist in the current context", name.value()),
                );
                None
            }
        }
    }
}

impl<'a> Visitor<'a> for Binder {
    fn visit_block(&mut self, _node: &'a Block) -> VisitResult {
        self.scopes.push(HashMap::new());
        VisitResult::Continue
    }

    fn leave_block(&mut self, _node: &'a Block) {
        self.scopes.pop();
    }

    fn visit_local_declaration(&mut self, node: &'a LocalDeclaration) -> VisitResult {
        self.declared_type = node.ty.name().to_string();
        if node.ty.is_nullable() {
            self.declared_type.push('?');
        }
        VisitResult::Continue
    }

    fn leave_declarator(&mut self, node: &'a Declarator) {
        if node.name.is_missing() {
            return;
        }
        let symbol = self.declare(
            node.name().to_string(),
            self.declared_type.clone(),
            node.name.span,
            false,
        );
        self.model.declarations.insert(node.name.span, symbol);
        if node.initializer.is_some() {
            self.assigned.insert(symbol);
        }
    }

    fn visit_assignment(&mut self, node: &'a Assignment) -> VisitResult {
        // The value is evaluated before the target is written.
        walk_expression(self, &node.value);
        match node.target.as_name() {
            Some(target) => {
                if let Some(symbol) = self.bind(target, !node.is_simple()) {
                    self.assigned.insert(symbol);
                }
            }
            None => {
                walk_expression(self, &node.target);
            }
        }
        VisitResult::SkipChildren
    }

    fn visit_name(&mut self, node: &'a NameExpr) -> VisitResult {
        self.bind(node, true);
        VisitResult::Continue
    }
}
