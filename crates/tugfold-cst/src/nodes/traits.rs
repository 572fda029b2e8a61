// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Core traits and types for CST nodes.
//!
//! # Node Identity
//!
//! [`NodeId`] provides stable identity for CST nodes. Ids are assigned after
//! parsing in pre-order traversal order (parent before children,
//! left-to-right), so the same source always produces the same ids:
//!
//! ```text
//! Given code: x = 1;
//! NodeId assignment order:
//!   NodeId(0) -> Module
//!   NodeId(1) -> ExpressionStatement
//!   NodeId(2) -> Assignment
//!   NodeId(3) -> NameExpr "x"
//!   NodeId(4) -> Literal "1"
//! ```
//!
//! Nodes built by a rewrite carry [`NodeId::SYNTHETIC`] until the rewritten
//! document is parsed again.
//!
//! # Tokens, Spans, and Codegen
//!
//! Every node owns its tokens, and every token owns its trivia. A node's
//! [`Node::span`] runs from the start of its first token's text to the end of
//! its last token's text; trivia on the outer edges is excluded. Printing a
//! node ([`Codegen`]) writes each token's leading trivia, text, and trailing
//! trivia in order.

use std::fmt;

use tugfold_core::Span;

use crate::tokenizer::Token;

// ============================================================================
// Node Identity
// ============================================================================

/// A stable, unique identifier for a CST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Id carried by nodes that were built rather than parsed.
    pub const SYNTHETIC: NodeId = NodeId(u32::MAX);

    /// Create a new NodeId with the given value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// True if the node was built by a rewrite.
    pub fn is_synthetic(&self) -> bool {
        *self == Self::SYNTHETIC
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::SYNTHETIC
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Generator for assigning sequential [`NodeId`]s.
#[derive(Debug, Default)]
pub struct NodeIdGenerator {
    next_id: u32,
}

impl NodeIdGenerator {
    /// Create a new generator starting from NodeId(0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the next NodeId.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Get the current count of generated NodeIds.
    pub fn count(&self) -> u32 {
        self.next_id
    }
}

// ============================================================================
// Codegen
// ============================================================================

/// Accumulates printed source text.
#[derive(Debug, Default)]
pub struct CodegenState {
    pub tokens: String,
}

impl CodegenState {
    pub fn add_token(&mut self, text: &str) {
        self.tokens.push_str(text);
    }
}

impl fmt::Display for CodegenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens)
    }
}

/// Print a node back to source text.
pub trait Codegen {
    fn codegen(&self, state: &mut CodegenState);

    /// Convenience: print into a fresh string.
    fn to_source(&self) -> String {
        let mut state = CodegenState::default();
        self.codegen(&mut state);
        state.tokens
    }
}

impl Codegen for Token {
    fn codegen(&self, state: &mut CodegenState) {
        for trivia in &self.leading {
            state.add_token(&trivia.text);
        }
        state.add_token(&self.text);
        for trivia in &self.trailing {
            state.add_token(&trivia.text);
        }
    }
}

impl<T: Node> Codegen for T {
    fn codegen(&self, state: &mut CodegenState) {
        for token in self.tokens() {
            token.codegen(state);
        }
    }
}

// ============================================================================
// Node
// ============================================================================

/// Behavior shared by every CST node.
pub trait Node {
    /// The node's id.
    fn node_id(&self) -> NodeId;

    /// All tokens of the node, in source order.
    fn tokens(&self) -> Vec<&Token>;

    /// Mutable access to the first token, used to move leading trivia.
    fn first_token_mut(&mut self) -> &mut Token;

    /// Mutable access to the last token, used to move trailing trivia.
    fn last_token_mut(&mut self) -> &mut Token;

    /// The first token.
    fn first_token(&self) -> Option<&Token> {
        self.tokens().into_iter().next()
    }

    /// The last token.
    fn last_token(&self) -> Option<&Token> {
        self.tokens().into_iter().last()
    }

    /// Span from the first token's text to the last token's text.
    fn span(&self) -> Span {
        let tokens = self.tokens();
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => first.span.cover(last.span),
            _ => Span::default(),
        }
    }

    /// Span including the outer leading and trailing trivia.
    fn full_span(&self) -> Span {
        let tokens = self.tokens();
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => first.full_span().cover(last.full_span()),
            _ => Span::default(),
        }
    }
}

/// Push the tokens of each node in `nodes` onto `out`.
pub(crate) fn extend_tokens<'a, N: Node + 'a>(
    out: &mut Vec<&'a Token>,
    nodes: impl IntoIterator<Item = &'a N>,
) {
    for node in nodes {
        out.extend(node.tokens());
    }
}
