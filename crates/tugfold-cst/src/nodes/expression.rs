// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Expression nodes.

use super::statement::TypeRef;
use super::traits::{extend_tokens, Node, NodeId};
use crate::tokenizer::{Token, TokenKind};

/// Any expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Name(NameExpr),
    Literal(Literal),
    Default(DefaultExpr),
    Parenthesized(Parenthesized),
    Unary(Unary),
    Binary(Binary),
    Assignment(Assignment),
    Member(Member),
    Call(Call),
    Index(Index),
}

impl Expression {
    /// The bare identifier, if this expression is one.
    pub fn as_name(&self) -> Option<&NameExpr> {
        match self {
            Expression::Name(name) => Some(name),
            _ => None,
        }
    }

    /// The assignment, if this expression is one.
    pub fn as_assignment(&self) -> Option<&Assignment> {
        match self {
            Expression::Assignment(assignment) => Some(assignment),
            _ => None,
        }
    }

    /// The expression with any number of enclosing parentheses removed.
    pub fn strip_parens(&self) -> &Expression {
        let mut expr = self;
        while let Expression::Parenthesized(paren) = expr {
            expr = &paren.inner;
        }
        expr
    }
}

macro_rules! for_each_expression {
    ($value:expr, $node:ident => $body:expr) => {
        match $value {
            Expression::Name($node) => $body,
            Expression::Literal($node) => $body,
            Expression::Default($node) => $body,
            Expression::Parenthesized($node) => $body,
            Expression::Unary($node) => $body,
            Expression::Binary($node) => $body,
            Expression::Assignment($node) => $body,
            Expression::Member($node) => $body,
            Expression::Call($node) => $body,
            Expression::Index($node) => $body,
        }
    };
}

impl Node for Expression {
    fn node_id(&self) -> NodeId {
        for_each_expression!(self, node => node.node_id())
    }

    fn tokens(&self) -> Vec<&Token> {
        for_each_expression!(self, node => node.tokens())
    }

    fn first_token_mut(&mut self) -> &mut Token {
        for_each_expression!(self, node => node.first_token_mut())
    }

    fn last_token_mut(&mut self) -> &mut Token {
        for_each_expression!(self, node => node.last_token_mut())
    }
}

/// An identifier reference: `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameExpr {
    pub id: NodeId,
    pub name: Token,
}

impl NameExpr {
    /// Build an identifier that does not come from source.
    pub fn synthetic(name: &str) -> Self {
        NameExpr {
            id: NodeId::SYNTHETIC,
            name: Token::synthetic(TokenKind::Identifier, Some(name)),
        }
    }

    /// The identifier text.
    pub fn value(&self) -> &str {
        &self.name.text
    }
}

impl Node for NameExpr {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        vec![&self.name]
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.name
    }

    fn last_token_mut(&mut self) -> &mut Token {
        &mut self.name
    }
}

/// Kind of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Integer,
    Real,
    String,
    True,
    False,
    Null,
}

/// A literal: `0`, `1.5`, `"s"`, `true`, `false`, `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub id: NodeId,
    pub token: Token,
    pub kind: LiteralKind,
}

impl Node for Literal {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        vec![&self.token]
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.token
    }

    fn last_token_mut(&mut self) -> &mut Token {
        &mut self.token
    }
}

/// The parenthesized type operand of `default(T)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultOperand {
    pub open_paren: Token,
    pub ty: TypeRef,
    pub close_paren: Token,
}

/// `default` or `default(T)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultExpr {
    pub id: NodeId,
    pub default_kw: Token,
    pub operand: Option<DefaultOperand>,
}

impl Node for DefaultExpr {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = vec![&self.default_kw];
        if let Some(operand) = &self.operand {
            out.push(&operand.open_paren);
            out.extend(operand.ty.tokens());
            out.push(&operand.close_paren);
        }
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.default_kw
    }

    fn last_token_mut(&mut self) -> &mut Token {
        match &mut self.operand {
            Some(operand) => &mut operand.close_paren,
            None => &mut self.default_kw,
        }
    }
}

/// `( inner )`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parenthesized {
    pub id: NodeId,
    pub open_paren: Token,
    pub inner: Box<Expression>,
    pub close_paren: Token,
}

impl Node for Parenthesized {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = vec![&self.open_paren];
        out.extend(self.inner.tokens());
        out.push(&self.close_paren);
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.open_paren
    }

    fn last_token_mut(&mut self) -> &mut Token {
        &mut self.close_paren
    }
}

/// Prefix `-operand` or `!operand`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unary {
    pub id: NodeId,
    pub op: Token,
    pub operand: Box<Expression>,
}

impl Node for Unary {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = vec![&self.op];
        out.extend(self.operand.tokens());
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.op
    }

    fn last_token_mut(&mut self) -> &mut Token {
        self.operand.last_token_mut()
    }
}

/// `left op right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    pub id: NodeId,
    pub left: Box<Expression>,
    pub op: Token,
    pub right: Box<Expression>,
}

impl Node for Binary {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = self.left.tokens();
        out.push(&self.op);
        out.extend(self.right.tokens());
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        self.left.first_token_mut()
    }

    fn last_token_mut(&mut self) -> &mut Token {
        self.right.last_token_mut()
    }
}

/// `target op value`, where `op` is `=` or a compound assignment operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: NodeId,
    pub target: Box<Expression>,
    pub op: Token,
    pub value: Box<Expression>,
}

impl Assignment {
    /// True for plain `=`.
    pub fn is_simple(&self) -> bool {
        self.op.is(TokenKind::Equals)
    }
}

impl Node for Assignment {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = self.target.tokens();
        out.push(&self.op);
        out.extend(self.value.tokens());
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        self.target.first_token_mut()
    }

    fn last_token_mut(&mut self) -> &mut Token {
        self.value.last_token_mut()
    }
}

/// `object.member`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: NodeId,
    pub object: Box<Expression>,
    pub dot: Token,
    pub member: Token,
}

impl Node for Member {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = self.object.tokens();
        out.push(&self.dot);
        out.push(&self.member);
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        self.object.first_token_mut()
    }

    fn last_token_mut(&mut self) -> &mut Token {
        &mut self.member
    }
}

/// One call argument with its separating comma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub id: NodeId,
    pub value: Expression,
    pub comma: Option<Token>,
}

impl Node for Argument {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = self.value.tokens();
        out.extend(self.comma.as_ref());
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        self.value.first_token_mut()
    }

    fn last_token_mut(&mut self) -> &mut Token {
        match &mut self.comma {
            Some(comma) => comma,
            None => self.value.last_token_mut(),
        }
    }
}

/// `callee(args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub id: NodeId,
    pub callee: Box<Expression>,
    pub open_paren: Token,
    pub args: Vec<Argument>,
    pub close_paren: Token,
}

impl Node for Call {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = self.callee.tokens();
        out.push(&self.open_paren);
        extend_tokens(&mut out, &self.args);
        out.push(&self.close_paren);
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        self.callee.first_token_mut()
    }

    fn last_token_mut(&mut self) -> &mut Token {
        &mut self.close_paren
    }
}

/// `object[index]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub id: NodeId,
    pub object: Box<Expression>,
    pub open_bracket: Token,
    pub index: Box<Expression>,
    pub close_bracket: Token,
}

impl Node for Index {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = self.object.tokens();
        out.push(&self.open_bracket);
        out.extend(self.index.tokens());
        out.push(&self.close_bracket);
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        self.object.first_token_mut()
    }

    fn last_token_mut(&mut self) -> &mut Token {
        &mut self.close_bracket
    }
}
