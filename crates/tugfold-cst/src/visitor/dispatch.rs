// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk functions for [`Visitor`] and rebuild functions for [`Transformer`].

use super::traits::{Transform, Transformer, VisitResult, Visitor};
use crate::nodes::{
    Argument, Assignment, Binary, Block, Call, Declarator, DefaultExpr, ElseClause,
    EmptyStatement, ErrorStatement, Expression, ExpressionStatement, If, Index, Initializer,
    Literal, LocalDeclaration, Member, Module, NameExpr, NodeId, Parenthesized, Return, Statement,
    TypeRef, Unary, While,
};
use crate::tokenizer::{Token, TokenKind};

/// Visit `$node` with `$visit`, run `$children` unless skipped, then `$leave`.
macro_rules! walk_node {
    ($visitor:ident, $node:ident, $visit:ident, $leave:ident, $children:block) => {{
        match $visitor.$visit($node) {
            VisitResult::Stop => return VisitResult::Stop,
            VisitResult::SkipChildren => {}
            VisitResult::Continue => $children,
        }
        $visitor.$leave($node);
        VisitResult::Continue
    }};
}

/// Walk a child and propagate `Stop`.
macro_rules! descend {
    ($walk:expr) => {
        if $walk == VisitResult::Stop {
            return VisitResult::Stop;
        }
    };
}

// ============================================================================
// Visitor walks
// ============================================================================

pub fn walk_module<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Module) -> VisitResult {
    walk_node!(visitor, node, visit_module, leave_module, {
        descend!(walk_statements(visitor, &node.body));
    })
}

pub fn walk_statements<'a, V: Visitor<'a>>(visitor: &mut V, nodes: &'a [Statement]) -> VisitResult {
    for statement in nodes {
        descend!(walk_statement(visitor, statement));
    }
    VisitResult::Continue
}

pub fn walk_statement<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Statement) -> VisitResult {
    walk_node!(visitor, node, visit_statement, leave_statement, {
        descend!(match node {
            Statement::LocalDeclaration(decl) => walk_local_declaration(visitor, decl),
            Statement::Expression(stmt) => walk_expression_statement(visitor, stmt),
            Statement::Block(block) => walk_block(visitor, block),
            Statement::If(stmt) => walk_if(visitor, stmt),
            Statement::While(stmt) => walk_while(visitor, stmt),
            Statement::Return(stmt) => walk_return(visitor, stmt),
            Statement::Empty(stmt) => walk_empty_statement(visitor, stmt),
            Statement::Error(stmt) => walk_error_statement(visitor, stmt),
        });
    })
}

pub fn walk_local_declaration<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &'a LocalDeclaration,
) -> VisitResult {
    walk_node!(visitor, node, visit_local_declaration, leave_local_declaration, {
        descend!(walk_type_ref(visitor, &node.ty));
        for declarator in &node.declarators {
            descend!(walk_declarator(visitor, declarator));
        }
    })
}

pub fn walk_type_ref<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a TypeRef) -> VisitResult {
    walk_node!(visitor, node, visit_type_ref, leave_type_ref, {})
}

pub fn walk_declarator<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Declarator) -> VisitResult {
    walk_node!(visitor, node, visit_declarator, leave_declarator, {
        if let Some(initializer) = &node.initializer {
            descend!(walk_initializer(visitor, initializer));
        }
    })
}

pub fn walk_initializer<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &'a Initializer,
) -> VisitResult {
    walk_node!(visitor, node, visit_initializer, leave_initializer, {
        descend!(walk_expression(visitor, &node.value));
    })
}

pub fn walk_expression_statement<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &'a ExpressionStatement,
) -> VisitResult {
    walk_node!(visitor, node, visit_expression_statement, leave_expression_statement, {
        descend!(walk_expression(visitor, &node.expression));
    })
}

pub fn walk_block<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Block) -> VisitResult {
    walk_node!(visitor, node, visit_block, leave_block, {
        descend!(walk_statements(visitor, &node.statements));
    })
}

pub fn walk_if<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a If) -> VisitResult {
    walk_node!(visitor, node, visit_if_stmt, leave_if_stmt, {
        descend!(walk_expression(visitor, &node.condition));
        descend!(walk_statement(visitor, &node.then_branch));
        if let Some(else_clause) = &node.else_clause {
            descend!(walk_else_clause(visitor, else_clause));
        }
    })
}

pub fn walk_else_clause<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a ElseClause) -> VisitResult {
    walk_node!(visitor, node, visit_else_clause, leave_else_clause, {
        descend!(walk_statement(visitor, &node.body));
    })
}

pub fn walk_while<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a While) -> VisitResult {
    walk_node!(visitor, node, visit_while_stmt, leave_while_stmt, {
        descend!(walk_expression(visitor, &node.condition));
        descend!(walk_statement(visitor, &node.body));
    })
}

pub fn walk_return<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Return) -> VisitResult {
    walk_node!(visitor, node, visit_return_stmt, leave_return_stmt, {
        if let Some(value) = &node.value {
            descend!(walk_expression(visitor, value));
        }
    })
}

pub fn walk_empty_statement<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &'a EmptyStatement,
) -> VisitResult {
    walk_node!(visitor, node, visit_empty_statement, leave_empty_statement, {})
}

pub fn walk_error_statement<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &'a ErrorStatement,
) -> VisitResult {
    walk_node!(visitor, node, visit_error_statement, leave_error_statement, {})
}

pub fn walk_expression<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Expression) -> VisitResult {
    walk_node!(visitor, node, visit_expression, leave_expression, {
        descend!(match node {
            Expression::Name(expr) => walk_name(visitor, expr),
            Expression::Literal(expr) => walk_literal(visitor, expr),
            Expression::Default(expr) => walk_default_expr(visitor, expr),
            Expression::Parenthesized(expr) => walk_parenthesized(visitor, expr),
            Expression::Unary(expr) => walk_unary(visitor, expr),
            Expression::Binary(expr) => walk_binary(visitor, expr),
            Expression::Assignment(expr) => walk_assignment(visitor, expr),
            Expression::Member(expr) => walk_member(visitor, expr),
            Expression::Call(expr) => walk_call(visitor, expr),
            Expression::Index(expr) => walk_index(visitor, expr),
        });
    })
}

pub fn walk_name<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a NameExpr) -> VisitResult {
    walk_node!(visitor, node, visit_name, leave_name, {})
}

pub fn walk_literal<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Literal) -> VisitResult {
    walk_node!(visitor, node, visit_literal, leave_literal, {})
}

pub fn walk_default_expr<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a DefaultExpr) -> VisitResult {
    walk_node!(visitor, node, visit_default_expr, leave_default_expr, {
        if let Some(operand) = &node.operand {
            descend!(walk_type_ref(visitor, &operand.ty));
        }
    })
}

pub fn walk_parenthesized<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &'a Parenthesized,
) -> VisitResult {
    walk_node!(visitor, node, visit_parenthesized, leave_parenthesized, {
        descend!(walk_expression(visitor, &node.inner));
    })
}

pub fn walk_unary<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Unary) -> VisitResult {
    walk_node!(visitor, node, visit_unary, leave_unary, {
        descend!(walk_expression(visitor, &node.operand));
    })
}

pub fn walk_binary<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Binary) -> VisitResult {
    walk_node!(visitor, node, visit_binary, leave_binary, {
        descend!(walk_expression(visitor, &node.left));
        descend!(walk_expression(visitor, &node.right));
    })
}

pub fn walk_assignment<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Assignment) -> VisitResult {
    walk_node!(visitor, node, visit_assignment, leave_assignment, {
        descend!(walk_expression(visitor, &node.target));
        descend!(walk_expression(visitor, &node.value));
    })
}

pub fn walk_member<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Member) -> VisitResult {
    walk_node!(visitor, node, visit_member, leave_member, {
        descend!(walk_expression(visitor, &node.object));
    })
}

pub fn walk_call<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Call) -> VisitResult {
    walk_node!(visitor, node, visit_call, leave_call, {
        descend!(walk_expression(visitor, &node.callee));
        for arg in &node.args {
            descend!(walk_argument(visitor, arg));
        }
    })
}

pub fn walk_argument<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Argument) -> VisitResult {
    walk_node!(visitor, node, visit_argument, leave_argument, {
        descend!(walk_expression(visitor, &node.value));
    })
}

pub fn walk_index<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Index) -> VisitResult {
    walk_node!(visitor, node, visit_index, leave_index, {
        descend!(walk_expression(visitor, &node.object));
        descend!(walk_expression(visitor, &node.index));
    })
}

// ============================================================================
// Transformer rebuilds
// ============================================================================
//
// Expressions are only rebuilt at the top level: `transform_expression` sees
// every statement-level expression (conditions, initializers, statement
// expressions, return values), not their subexpressions.

pub fn rebuild_module<T: Transformer>(transformer: &mut T, mut node: Module) -> Module {
    node.body = rebuild_statements(transformer, node.body);
    transformer.transform_module(node)
}

pub fn rebuild_statements<T: Transformer>(
    transformer: &mut T,
    nodes: Vec<Statement>,
) -> Vec<Statement> {
    let mut out = Vec::with_capacity(nodes.len());
    for statement in nodes {
        let statement = rebuild_statement_children(transformer, statement);
        transformer.transform_statement(statement).push_into(&mut out);
    }
    out
}

/// Rebuild an embedded statement (the body of `if`, `else`, `while`).
///
/// Embedded positions hold exactly one statement, so `Remove` becomes an
/// empty statement and `Flatten` is wrapped in a block.
fn rebuild_embedded<T: Transformer>(transformer: &mut T, node: Statement) -> Statement {
    let statement = rebuild_statement_children(transformer, node);
    match transformer.transform_statement(statement) {
        Transform::Keep(statement) => statement,
        Transform::Remove => Statement::Empty(EmptyStatement {
            id: NodeId::SYNTHETIC,
            semicolon: Token::synthetic(TokenKind::Semicolon, None),
        }),
        Transform::Flatten(mut statements) if statements.len() == 1 => statements.remove(0),
        Transform::Flatten(statements) => Statement::Block(Block {
            id: NodeId::SYNTHETIC,
            open: Token::synthetic(TokenKind::OpenBrace, None),
            statements,
            close: Token::synthetic(TokenKind::CloseBrace, None),
        }),
    }
}

fn rebuild_statement_children<T: Transformer>(transformer: &mut T, node: Statement) -> Statement {
    match node {
        Statement::LocalDeclaration(mut decl) => {
            decl.declarators = decl
                .declarators
                .into_iter()
                .map(|mut declarator| {
                    declarator.initializer = declarator.initializer.map(|mut initializer| {
                        initializer.value = transformer.transform_expression(initializer.value);
                        initializer
                    });
                    transformer.transform_declarator(declarator)
                })
                .collect();
            Statement::LocalDeclaration(transformer.transform_local_declaration(decl))
        }
        Statement::Expression(mut stmt) => {
            stmt.expression = transformer.transform_expression(stmt.expression);
            Statement::Expression(transformer.transform_expression_statement(stmt))
        }
        Statement::Block(mut block) => {
            block.statements = rebuild_statements(transformer, block.statements);
            Statement::Block(transformer.transform_block(block))
        }
        Statement::If(mut stmt) => {
            stmt.condition = transformer.transform_expression(stmt.condition);
            stmt.then_branch = Box::new(rebuild_embedded(transformer, *stmt.then_branch));
            if let Some(mut else_clause) = stmt.else_clause.take() {
                else_clause.body = Box::new(rebuild_embedded(transformer, *else_clause.body));
                stmt.else_clause = Some(transformer.transform_else_clause(else_clause));
            }
            Statement::If(transformer.transform_if_stmt(stmt))
        }
        Statement::While(mut stmt) => {
            stmt.condition = transformer.transform_expression(stmt.condition);
            stmt.body = Box::new(rebuild_embedded(transformer, *stmt.body));
            Statement::While(transformer.transform_while_stmt(stmt))
        }
        Statement::Return(mut stmt) => {
            stmt.value = stmt.value.map(|value| transformer.transform_expression(value));
            Statement::Return(stmt)
        }
        other => other,
    }
}
