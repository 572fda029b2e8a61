// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Statement sequences: the ordered sibling lists that rewrites splice.
//!
//! A module body and every `{ }` block own a sequence. The body of `if`,
//! `else`, and `while` is exposed as a one-element *embedded* sequence
//! unless it is itself a block (whose own sequence is reported instead).
//!
//! [`SequenceCollector`] finds every sequence in a module in document order.
//! [`SequenceReplacer`] swaps the statements of one sequence, identified by
//! its owner's [`NodeId`], and rebuilds the module around it.

use thiserror::Error;

use super::dispatch::{rebuild_module, walk_module};
use super::traits::{Transformer, VisitResult, Visitor};
use crate::nodes::{Block, ElseClause, If, Module, NodeId, Statement, While};

/// What owns a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    /// The module body; the owner is the module.
    Module,
    /// A `{ }` block; the owner is the block.
    Block,
    /// The single body statement of `if` (owner: the `if`), `else` (owner:
    /// the else clause), or `while` (owner: the `while`).
    Embedded,
}

/// An ordered list of sibling statements.
#[derive(Debug, Clone, Copy)]
pub struct StatementSequence<'a> {
    pub owner: NodeId,
    pub kind: SequenceKind,
    pub statements: &'a [Statement],
}

impl<'a> StatementSequence<'a> {
    /// Number of statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// True if the sequence has no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// The statement at `index`.
    pub fn get(&self, index: usize) -> Option<&'a Statement> {
        self.statements.get(index)
    }

    /// The statement right after `index`, if any.
    pub fn next_after(&self, index: usize) -> Option<&'a Statement> {
        self.statements.get(index + 1)
    }

    /// Iterate statements with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a Statement)> + 'a {
        let statements = self.statements;
        statements.iter().enumerate()
    }
}

/// Visitor collecting every [`StatementSequence`] of a module.
#[derive(Default)]
pub struct SequenceCollector<'a> {
    sequences: Vec<StatementSequence<'a>>,
}

impl<'a> SequenceCollector<'a> {
    /// Collect all sequences of `module`, outermost first in document order.
    pub fn collect(module: &'a Module) -> Vec<StatementSequence<'a>> {
        let mut collector = SequenceCollector::default();
        walk_module(&mut collector, module);
        collector.sequences
    }

    fn push_embedded(&mut self, owner: NodeId, body: &'a Statement) {
        if matches!(body, Statement::Block(_)) {
            return;
        }
        self.sequences.push(StatementSequence {
            owner,
            kind: SequenceKind::Embedded,
            statements: std::slice::from_ref(body),
        });
    }
}

impl<'a> Visitor<'a> for SequenceCollector<'a> {
    fn visit_module(&mut self, node: &'a Module) -> VisitResult {
        self.sequences.push(StatementSequence {
            owner: node.id,
            kind: SequenceKind::Module,
            statements: &node.body,
        });
        VisitResult::Continue
    }

    fn visit_block(&mut self, node: &'a Block) -> VisitResult {
        self.sequences.push(StatementSequence {
            owner: node.id,
            kind: SequenceKind::Block,
            statements: &node.statements,
        });
        VisitResult::Continue
    }

    fn visit_if_stmt(&mut self, node: &'a If) -> VisitResult {
        self.push_embedded(node.id, &node.then_branch);
        VisitResult::Continue
    }

    fn visit_else_clause(&mut self, node: &'a ElseClause) -> VisitResult {
        self.push_embedded(node.id, &node.body);
        VisitResult::Continue
    }

    fn visit_while_stmt(&mut self, node: &'a While) -> VisitResult {
        self.push_embedded(node.id, &node.body);
        VisitResult::Continue
    }
}

/// Why a sequence replacement could not be applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReplaceError {
    #[error("no {kind:?} sequence owned by {owner}")]
    NotFound { owner: NodeId, kind: SequenceKind },
    #[error("an embedded sequence holds exactly one statement, got {0}")]
    EmbeddedArity(usize),
}

/// Transformer replacing the statements of one sequence.
pub struct SequenceReplacer {
    owner: NodeId,
    kind: SequenceKind,
    statements: Option<Vec<Statement>>,
}

impl SequenceReplacer {
    pub fn new(owner: NodeId, kind: SequenceKind, statements: Vec<Statement>) -> Self {
        Self {
            owner,
            kind,
            statements: Some(statements),
        }
    }

    /// Rebuild `module` with the sequence replaced.
    pub fn apply(mut self, module: Module) -> Result<Module, ReplaceError> {
        if self.kind == SequenceKind::Embedded {
            let count = self.statements.as_ref().map_or(0, Vec::len);
            if count != 1 {
                return Err(ReplaceError::EmbeddedArity(count));
            }
        }
        let module = rebuild_module(&mut self, module);
        if self.statements.is_some() {
            return Err(ReplaceError::NotFound {
                owner: self.owner,
                kind: self.kind,
            });
        }
        Ok(module)
    }

    fn take_for(&mut self, id: NodeId, kind: SequenceKind) -> Option<Vec<Statement>> {
        if id == self.owner && kind == self.kind {
            self.statements.take()
        } else {
            None
        }
    }

    fn take_embedded(&mut self, id: NodeId) -> Option<Statement> {
        self.take_for(id, SequenceKind::Embedded)
            .and_then(|statements| statements.into_iter().next())
    }
}

impl Transformer for SequenceReplacer {
    fn transform_module(&mut self, mut node: Module) -> Module {
        if let Some(statements) = self.take_for(node.id, SequenceKind::Module) {
            node.body = statements;
        }
        node
    }

    fn transform_block(&mut self, mut node: Block) -> Block {
        if let Some(statements) = self.take_for(node.id, SequenceKind::Block) {
            node.statements = statements;
        }
        node
    }

    fn transform_if_stmt(&mut self, mut node: If) -> If {
        if let Some(statement) = self.take_embedded(node.id) {
            node.then_branch = Box::new(statement);
        }
        node
    }

    fn transform_else_clause(&mut self, mut node: ElseClause) -> ElseClause {
        if let Some(statement) = self.take_embedded(node.id) {
            node.body = Box::new(statement);
        }
        node
    }

    fn transform_while_stmt(&mut self, mut node: While) -> While {
        if let Some(statement) = self.take_embedded(node.id) {
            node.body = Box::new(statement);
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Codegen;
    use crate::parse_module;

    #[test]
    fn collects_module_block_and_embedded_sequences() {
        let module =
            parse_module("int a; { b = 1; c = 2; } if (a) d = 3; else { } while (a) e = 4;").module;
        let sequences = SequenceCollector::collect(&module);
        let kinds: Vec<_> = sequences.iter().map(|s| (s.kind, s.len())).collect();
        assert_eq!(
            kinds,
            vec![
                (SequenceKind::Module, 4),
                (SequenceKind::Block, 2),
                (SequenceKind::Embedded, 1),
                (SequenceKind::Block, 0),
                (SequenceKind::Embedded, 1),
            ]
        );
    }

    #[test]
    fn replaces_block_statements() {
        let source = "{ a = 1;\n  b = 2; }\nc = 3;";
        let module = parse_module(source).module;
        let block = SequenceCollector::collect(&module)
            .into_iter()
            .find(|s| s.kind == SequenceKind::Block)
            .unwrap();
        let kept = vec![block.statements[1].clone()];
        let owner = block.owner;
        let rebuilt = SequenceReplacer::new(owner, SequenceKind::Block, kept)
            .apply(module.clone())
            .unwrap();
        assert_eq!(rebuilt.to_source(), "{   b = 2; }\nc = 3;");
    }

    #[test]
    fn embedded_requires_one_statement() {
        let module = parse_module("if (a) b = 1;").module;
        let seq = SequenceCollector::collect(&module)[1];
        let err = SequenceReplacer::new(seq.owner, SequenceKind::Embedded, vec![])
            .apply(module.clone())
            .unwrap_err();
        assert_eq!(err, ReplaceError::EmbeddedArity(0));
    }

    #[test]
    fn unknown_owner_is_an_error() {
        let module = parse_module("a = 1;").module;
        let err = SequenceReplacer::new(NodeId(999), SequenceKind::Block, vec![])
            .apply(module)
            .unwrap_err();
        assert!(matches!(err, ReplaceError::NotFound { .. }));
    }
}
