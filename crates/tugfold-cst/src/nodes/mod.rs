// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! CST node types.
//!
//! Nodes are plain owned values: a rewrite clones the parts it keeps and
//! builds a new tree, it never edits a parsed tree in place.

pub mod expression;
pub mod statement;
pub mod traits;

pub use expression::{
    Argument, Assignment, Binary, Call, DefaultExpr, DefaultOperand, Expression, Index, Literal,
    LiteralKind, Member, NameExpr, Parenthesized, Unary,
};
pub use statement::{
    Block, Declarator, ElseClause, EmptyStatement, ErrorStatement, ExpressionStatement, If,
    Initializer, LocalDeclaration, Module, Return, Statement, TypeRef, While,
};
pub use traits::{Codegen, CodegenState, Node, NodeId, NodeIdGenerator};
