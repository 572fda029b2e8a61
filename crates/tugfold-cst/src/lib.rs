// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A lossless parser and Concrete Syntax Tree (CST) for a small C-family
//! statement language.
//!
//! # Overview
//!
//! - **Parsing**: [`parse_module`] never fails. Malformed input is wrapped
//!   in error statements and reported as [`ParseDiagnostic`]s.
//! - **Code Generation**: [`Codegen::to_source`] reproduces the parsed text
//!   byte for byte, trivia included.
//! - **Traversal**: [`Visitor`] walks borrowed trees; [`Transformer`]
//!   rebuilds owned ones.
//! - **Semantics**: [`semantic::ScopeModel`] resolves identifiers through
//!   lexical scopes behind the [`semantic::SemanticModel`] trait.
//!
//! # Quick Start
//!
//! ```
//! use tugfold_cst::{parse_module, Codegen};
//!
//! let source = "int x = 0; // counter\nx = 5;\n";
//! let parsed = parse_module(source);
//! assert!(!parsed.has_errors());
//! assert_eq!(parsed.module.to_source(), source);
//! ```

// ============================================================================
// Public modules and re-exports
// ============================================================================

/// CST node types.
pub mod nodes;
pub use nodes::{
    Argument, Assignment, Binary, Block, Call, Codegen, CodegenState, Declarator, DefaultExpr,
    DefaultOperand, ElseClause, EmptyStatement, ErrorStatement, Expression, ExpressionStatement,
    If, Index, Initializer, Literal, LiteralKind, LocalDeclaration, Member, Module, NameExpr,
    Node, NodeId, NodeIdGenerator, Parenthesized, Return, Statement, TypeRef, Unary, While,
};

/// Recursive-descent parser with error recovery.
pub mod parser;
pub use parser::{parse_module, ParseDiagnostic, ParsedModule, ParserError};

/// Symbol resolution.
pub mod semantic;

/// Tokens and trivia.
pub mod tokenizer;
pub use tokenizer::{Token, TokenKind, Trivia, TriviaKind, TriviaList};

/// Visitor and transformer infrastructure for CST traversal.
pub mod visitor;
pub use visitor::{
    NameReference, ReferenceCollector, ReferenceKind, ReplaceError, SequenceCollector,
    SequenceKind, SequenceReplacer, StatementSequence, Transform, Transformer, VisitResult,
    Visitor,
};
