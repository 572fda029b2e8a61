// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! ReferenceCollector visitor for identifier reference extraction.
//!
//! Collects every [`NameExpr`] in a subtree together with how it is used.
//! Member names (`obj.member`) are tokens, not `NameExpr`s, so they are never
//! reported. Collection checks a [`CancellationToken`] at every expression
//! and stops early when it fires.
//!
//! ```ignore
//! let refs = ReferenceCollector::collect_expression(&expr, &cancel)?;
//! for reference in &refs {
//!     println!("{} ({})", reference.name.value(), reference.kind);
//! }
//! ```

use std::fmt;

use tugfold_core::cancel::{self, CancellationToken, Cancelled};

use super::dispatch::{walk_expression, walk_statement};
use super::traits::{VisitResult, Visitor};
use crate::nodes::{Assignment, Expression, NameExpr, Statement};

/// How an identifier is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// The value is read.
    Read,
    /// The identifier is the target of a plain `=`.
    Write,
    /// The identifier is the target of a compound assignment.
    ReadWrite,
}

impl ReferenceKind {
    /// Returns the string representation used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceKind::Read => "read",
            ReferenceKind::Write => "write",
            ReferenceKind::ReadWrite => "read_write",
        }
    }

    /// True if the current value is observed.
    pub fn reads(&self) -> bool {
        matches!(self, ReferenceKind::Read | ReferenceKind::ReadWrite)
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One identifier occurrence.
#[derive(Debug, Clone, Copy)]
pub struct NameReference<'a> {
    pub name: &'a NameExpr,
    pub kind: ReferenceKind,
}

/// Visitor collecting [`NameReference`]s.
pub struct ReferenceCollector<'a, 'c> {
    references: Vec<NameReference<'a>>,
    /// Bare-identifier targets of the assignments seen so far.
    targets: Vec<(&'a NameExpr, ReferenceKind)>,
    cancel: &'c CancellationToken,
    cancelled: bool,
}

impl<'a, 'c> ReferenceCollector<'a, 'c> {
    fn new(cancel: &'c CancellationToken) -> Self {
        Self {
            references: Vec::new(),
            targets: Vec::new(),
            cancel,
            cancelled: false,
        }
    }

    fn finish(self) -> Result<Vec<NameReference<'a>>, Cancelled> {
        if self.cancelled {
            Err(Cancelled)
        } else {
            Ok(self.references)
        }
    }

    /// Collect the references in an expression subtree.
    pub fn collect_expression(
        expr: &'a Expression,
        cancel: &'c CancellationToken,
    ) -> Result<Vec<NameReference<'a>>, Cancelled> {
        cancel::check(cancel)?;
        let mut collector = Self::new(cancel);
        walk_expression(&mut collector, expr);
        collector.finish()
    }

    /// Collect the references in a statement subtree.
    pub fn collect_statement(
        statement: &'a Statement,
        cancel: &'c CancellationToken,
    ) -> Result<Vec<NameReference<'a>>, Cancelled> {
        cancel::check(cancel)?;
        let mut collector = Self::new(cancel);
        walk_statement(&mut collector, statement);
        collector.finish()
    }
}

impl<'a> Visitor<'a> for ReferenceCollector<'a, '_> {
    fn visit_expression(&mut self, _node: &'a Expression) -> VisitResult {
        if self.cancel.is_cancelled() {
            self.cancelled = true;
            return VisitResult::Stop;
        }
        VisitResult::Continue
    }

    fn visit_assignment(&mut self, node: &'a Assignment) -> VisitResult {
        if let Some(target) = node.target.as_name() {
            let kind = if node.is_simple() {
                ReferenceKind::Write
            } else {
                ReferenceKind::ReadWrite
            };
            self.targets.push((target, kind));
        }
        VisitResult::Continue
    }

    fn visit_name(&mut self, node: &'a NameExpr) -> VisitResult {
        let kind = self
            .targets
            .iter()
            .find(|(target, _)| std::ptr::eq(*target, node))
            .map(|(_, kind)| *kind)
            .unwrap_or(ReferenceKind::Read);
        self.references.push(NameReference { name: node, kind });
        VisitResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_module;

    fn names(refs: &[NameReference<'_>]) -> Vec<(String, ReferenceKind)> {
        refs.iter()
            .map(|r| (r.name.value().to_string(), r.kind))
            .collect()
    }

    #[test]
    fn collects_reads_and_writes() {
        let module = parse_module("x = y + f(z).w;").module;
        let refs = ReferenceCollector::collect_statement(&module.body[0], &CancellationToken::new())
            .unwrap();
        assert_eq!(
            names(&refs),
            vec![
                ("x".to_string(), ReferenceKind::Write),
                ("y".to_string(), ReferenceKind::Read),
                ("f".to_string(), ReferenceKind::Read),
                ("z".to_string(), ReferenceKind::Read),
            ]
        );
    }

    #[test]
    fn compound_assignment_reads_target() {
        let module = parse_module("total += 1;").module;
        let refs = ReferenceCollector::collect_statement(&module.body[0], &CancellationToken::new())
            .unwrap();
        assert_eq!(refs[0].kind, ReferenceKind::ReadWrite);
        assert!(refs[0].kind.reads());
    }

    #[test]
    fn cancelled_token_aborts() {
        let module = parse_module("x = a + b;").module;
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = ReferenceCollector::collect_statement(&module.body[0], &cancel);
        assert_eq!(result.unwrap_err(), Cancelled);
    }
}
