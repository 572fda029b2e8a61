// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor and transformer trait definitions for CST traversal.

use crate::nodes::{
    // Module
    Module,
    // Statements
    Block, Declarator, ElseClause, EmptyStatement, ErrorStatement, ExpressionStatement, If,
    Initializer, LocalDeclaration, Return, Statement, TypeRef, While,
    // Expressions
    Argument, Assignment, Binary, Call, DefaultExpr, Expression, Index, Literal, Member,
    NameExpr, Parenthesized, Unary,
};

/// Result of visiting a node - controls traversal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Continue traversal into children.
    ///
    /// After visiting children, `leave_*` will be called for this node.
    #[default]
    Continue,

    /// Skip children, continue with siblings.
    ///
    /// `leave_*` is still called for this node.
    SkipChildren,

    /// Stop traversal entirely.
    ///
    /// No further `visit_*` or `leave_*` methods will be called.
    Stop,
}

/// Generic transform result for list-like contexts.
///
/// When transforming statements in a sequence, this enum allows removing
/// nodes or replacing one node with several.
#[derive(Debug, Clone)]
pub enum Transform<T> {
    /// Keep the transformed node.
    Keep(T),
    /// Remove the node from the list.
    Remove,
    /// Replace the node with multiple nodes.
    Flatten(Vec<T>),
}

impl<T> Transform<T> {
    /// Returns true if this is a `Keep` variant.
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep(_))
    }

    /// Returns true if this is a `Remove` variant.
    pub fn is_remove(&self) -> bool {
        matches!(self, Self::Remove)
    }

    /// Append the result to `out`.
    pub fn push_into(self, out: &mut Vec<T>) {
        match self {
            Transform::Keep(node) => out.push(node),
            Transform::Remove => {}
            Transform::Flatten(nodes) => out.extend(nodes),
        }
    }
}

impl<T> From<T> for Transform<T> {
    fn from(value: T) -> Self {
        Transform::Keep(value)
    }
}

/// Generates `visit_*`/`leave_*` pairs with default implementations.
macro_rules! visitor_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Visit a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called before descending into children. Return `VisitResult` to control traversal."]
                #[allow(unused_variables)]
                fn [<visit_ $base_name>](&mut self, node: &'a $node_type) -> VisitResult {
                    VisitResult::Continue
                }

                $(#[$meta])*
                #[doc = concat!("Leave a [`", stringify!($node_type), "`] node.")]
                #[doc = ""]
                #[doc = "Called after all children have been visited. Called even if `SkipChildren` was returned."]
                #[allow(unused_variables)]
                fn [<leave_ $base_name>](&mut self, node: &'a $node_type) {}
            )*
        }
    };
}

/// Generates `transform_*` methods that return the node unchanged.
macro_rules! transformer_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Transform a [`", stringify!($node_type), "`] node after its children.")]
                #[allow(unused_variables)]
                fn [<transform_ $base_name>](&mut self, node: $node_type) -> $node_type {
                    node
                }
            )*
        }
    };
}

/// Generates `transform_*` methods returning [`Transform`] for list contexts.
macro_rules! transformer_list_methods {
    (
        $(
            $(#[$meta:meta])*
            $base_name:ident : $node_type:ty
        ),* $(,)?
    ) => {
        paste::paste! {
            $(
                $(#[$meta])*
                #[doc = concat!("Transform a [`", stringify!($node_type), "`] node in a list context.")]
                #[doc = ""]
                #[doc = "Returns `Transform::Keep` by default. Can also return `Remove` or `Flatten`."]
                #[allow(unused_variables)]
                fn [<transform_ $base_name>](&mut self, node: $node_type) -> Transform<$node_type> {
                    Transform::Keep(node)
                }
            )*
        }
    };
}

/// Immutable visitor for CST traversal.
///
/// - `visit_*` is called in pre-order (before children)
/// - `leave_*` is called in post-order (after children)
/// - Children are visited in source order
///
/// The lifetime lets visitors keep references into the tree they walk.
///
/// ```ignore
/// struct NameCounter {
///     count: usize,
/// }
///
/// impl<'a> Visitor<'a> for NameCounter {
///     fn visit_name(&mut self, _node: &'a NameExpr) -> VisitResult {
///         self.count += 1;
///         VisitResult::Continue
///     }
/// }
/// ```
pub trait Visitor<'a> {
    // Module
    visitor_methods! {
        module: Module,
    }

    // Statements
    visitor_methods! {
        statement: Statement,
        local_declaration: LocalDeclaration,
        type_ref: TypeRef,
        declarator: Declarator,
        initializer: Initializer,
        expression_statement: ExpressionStatement,
        block: Block,
        if_stmt: If,
        else_clause: ElseClause,
        while_stmt: While,
        return_stmt: Return,
        empty_statement: EmptyStatement,
        error_statement: ErrorStatement,
    }

    // Expressions
    visitor_methods! {
        expression: Expression,
        name: NameExpr,
        literal: Literal,
        default_expr: DefaultExpr,
        parenthesized: Parenthesized,
        unary: Unary,
        binary: Binary,
        assignment: Assignment,
        member: Member,
        call: Call,
        argument: Argument,
        index: Index,
    }
}

/// Owning transformer for CST rewriting.
///
/// The `rebuild_*` functions in [`dispatch`](super::dispatch) rebuild each
/// node from its transformed children and then hand the node to the matching
/// `transform_*` hook, so hooks run in post-order.
pub trait Transformer {
    // Module
    transformer_methods! {
        module: Module,
    }

    // Statements (list context - can be removed/flattened)
    transformer_list_methods! {
        statement: Statement,
    }

    // Statements (non-list context)
    transformer_methods! {
        block: Block,
        if_stmt: If,
        else_clause: ElseClause,
        while_stmt: While,
        local_declaration: LocalDeclaration,
        declarator: Declarator,
        expression_statement: ExpressionStatement,
    }

    // Expressions
    transformer_methods! {
        expression: Expression,
    }
}
