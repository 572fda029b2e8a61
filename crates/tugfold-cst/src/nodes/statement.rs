// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Module and statement nodes.

use super::expression::Expression;
use super::traits::{extend_tokens, Node, NodeId};
use crate::tokenizer::Token;

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub id: NodeId,
    pub body: Vec<Statement>,
    /// Carries the trivia after the last statement.
    pub eof: Token,
}

impl Node for Module {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        extend_tokens(&mut out, &self.body);
        out.push(&self.eof);
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        match self.body.first_mut() {
            Some(statement) => statement.first_token_mut(),
            None => &mut self.eof,
        }
    }

    fn last_token_mut(&mut self) -> &mut Token {
        &mut self.eof
    }
}

/// Any statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    LocalDeclaration(LocalDeclaration),
    Expression(ExpressionStatement),
    Block(Block),
    If(If),
    While(While),
    Return(Return),
    Empty(EmptyStatement),
    Error(ErrorStatement),
}

impl Statement {
    /// The declaration, if this statement is one.
    pub fn as_local_declaration(&self) -> Option<&LocalDeclaration> {
        match self {
            Statement::LocalDeclaration(decl) => Some(decl),
            _ => None,
        }
    }

    /// The expression statement, if this statement is one.
    pub fn as_expression(&self) -> Option<&ExpressionStatement> {
        match self {
            Statement::Expression(stmt) => Some(stmt),
            _ => None,
        }
    }

    /// Short kind name for logging.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::LocalDeclaration(_) => "local_declaration",
            Statement::Expression(_) => "expression",
            Statement::Block(_) => "block",
            Statement::If(_) => "if",
            Statement::While(_) => "while",
            Statement::Return(_) => "return",
            Statement::Empty(_) => "empty",
            Statement::Error(_) => "error",
        }
    }
}

macro_rules! for_each_statement {
    ($value:expr, $node:ident => $body:expr) => {
        match $value {
            Statement::LocalDeclaration($node) => $body,
            Statement::Expression($node) => $body,
            Statement::Block($node) => $body,
            Statement::If($node) => $body,
            Statement::While($node) => $body,
            Statement::Return($node) => $body,
            Statement::Empty($node) => $body,
            Statement::Error($node) => $body,
        }
    };
}

impl Node for Statement {
    fn node_id(&self) -> NodeId {
        for_each_statement!(self, node => node.node_id())
    }

    fn tokens(&self) -> Vec<&Token> {
        for_each_statement!(self, node => node.tokens())
    }

    fn first_token_mut(&mut self) -> &mut Token {
        for_each_statement!(self, node => node.first_token_mut())
    }

    fn last_token_mut(&mut self) -> &mut Token {
        for_each_statement!(self, node => node.last_token_mut())
    }
}

/// A type reference: `int`, `string?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub id: NodeId,
    pub name: Token,
    pub question: Option<Token>,
}

impl TypeRef {
    /// True for `T?`.
    pub fn is_nullable(&self) -> bool {
        self.question.is_some()
    }

    /// The type name without the nullable marker.
    pub fn name(&self) -> &str {
        &self.name.text
    }

    /// Same named type and nullability, ignoring trivia.
    pub fn same_type(&self, other: &TypeRef) -> bool {
        self.name.text == other.name.text && self.is_nullable() == other.is_nullable()
    }
}

impl Node for TypeRef {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = vec![&self.name];
        out.extend(self.question.as_ref());
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.name
    }

    fn last_token_mut(&mut self) -> &mut Token {
        match &mut self.question {
            Some(question) => question,
            None => &mut self.name,
        }
    }
}

/// `const? T a = 1, b;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDeclaration {
    pub id: NodeId,
    pub const_kw: Option<Token>,
    pub ty: TypeRef,
    pub declarators: Vec<Declarator>,
    pub semicolon: Token,
}

impl LocalDeclaration {
    /// True for `const` declarations.
    pub fn is_const(&self) -> bool {
        self.const_kw.is_some()
    }
}

impl Node for LocalDeclaration {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out: Vec<&Token> = self.const_kw.iter().collect();
        out.extend(self.ty.tokens());
        extend_tokens(&mut out, &self.declarators);
        out.push(&self.semicolon);
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        match &mut self.const_kw {
            Some(const_kw) => const_kw,
            None => self.ty.first_token_mut(),
        }
    }

    fn last_token_mut(&mut self) -> &mut Token {
        &mut self.semicolon
    }
}

/// One declared variable: `a = 1,`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declarator {
    pub id: NodeId,
    pub name: Token,
    pub initializer: Option<Initializer>,
    pub comma: Option<Token>,
}

impl Declarator {
    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name.text
    }
}

impl Node for Declarator {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = vec![&self.name];
        if let Some(initializer) = &self.initializer {
            out.extend(initializer.tokens());
        }
        out.extend(self.comma.as_ref());
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.name
    }

    fn last_token_mut(&mut self) -> &mut Token {
        if let Some(comma) = &mut self.comma {
            return comma;
        }
        match &mut self.initializer {
            Some(initializer) => initializer.last_token_mut(),
            None => &mut self.name,
        }
    }
}

/// `= value` after a declarator name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initializer {
    pub id: NodeId,
    pub equals: Token,
    pub value: Expression,
}

impl Node for Initializer {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = vec![&self.equals];
        out.extend(self.value.tokens());
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.equals
    }

    fn last_token_mut(&mut self) -> &mut Token {
        self.value.last_token_mut()
    }
}

/// `expression;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionStatement {
    pub id: NodeId,
    pub expression: Expression,
    pub semicolon: Token,
}

impl Node for ExpressionStatement {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = self.expression.tokens();
        out.push(&self.semicolon);
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        self.expression.first_token_mut()
    }

    fn last_token_mut(&mut self) -> &mut Token {
        &mut self.semicolon
    }
}

/// `{ statements }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: NodeId,
    pub open: Token,
    pub statements: Vec<Statement>,
    pub close: Token,
}

impl Node for Block {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = vec![&self.open];
        extend_tokens(&mut out, &self.statements);
        out.push(&self.close);
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.open
    }

    fn last_token_mut(&mut self) -> &mut Token {
        &mut self.close
    }
}

/// `if (condition) then_branch else_clause?`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct If {
    pub id: NodeId,
    pub if_kw: Token,
    pub open_paren: Token,
    pub condition: Expression,
    pub close_paren: Token,
    pub then_branch: Box<Statement>,
    pub else_clause: Option<ElseClause>,
}

impl Node for If {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = vec![&self.if_kw, &self.open_paren];
        out.extend(self.condition.tokens());
        out.push(&self.close_paren);
        out.extend(self.then_branch.tokens());
        if let Some(else_clause) = &self.else_clause {
            out.extend(else_clause.tokens());
        }
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.if_kw
    }

    fn last_token_mut(&mut self) -> &mut Token {
        match &mut self.else_clause {
            Some(else_clause) => else_clause.last_token_mut(),
            None => self.then_branch.last_token_mut(),
        }
    }
}

/// `else body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElseClause {
    pub id: NodeId,
    pub else_kw: Token,
    pub body: Box<Statement>,
}

impl Node for ElseClause {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = vec![&self.else_kw];
        out.extend(self.body.tokens());
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.else_kw
    }

    fn last_token_mut(&mut self) -> &mut Token {
        self.body.last_token_mut()
    }
}

/// `while (condition) body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct While {
    pub id: NodeId,
    pub while_kw: Token,
    pub open_paren: Token,
    pub condition: Expression,
    pub close_paren: Token,
    pub body: Box<Statement>,
}

impl Node for While {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = vec![&self.while_kw, &self.open_paren];
        out.extend(self.condition.tokens());
        out.push(&self.close_paren);
        out.extend(self.body.tokens());
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.while_kw
    }

    fn last_token_mut(&mut self) -> &mut Token {
        self.body.last_token_mut()
    }
}

/// `return value?;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Return {
    pub id: NodeId,
    pub return_kw: Token,
    pub value: Option<Expression>,
    pub semicolon: Token,
}

impl Node for Return {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        let mut out = vec![&self.return_kw];
        if let Some(value) = &self.value {
            out.extend(value.tokens());
        }
        out.push(&self.semicolon);
        out
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.return_kw
    }

    fn last_token_mut(&mut self) -> &mut Token {
        &mut self.semicolon
    }
}

/// A lone `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyStatement {
    pub id: NodeId,
    pub semicolon: Token,
}

impl Node for EmptyStatement {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        vec![&self.semicolon]
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.semicolon
    }

    fn last_token_mut(&mut self) -> &mut Token {
        &mut self.semicolon
    }
}

/// Tokens the parser could not make sense of. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorStatement {
    pub id: NodeId,
    pub tokens: Vec<Token>,
}

impl Node for ErrorStatement {
    fn node_id(&self) -> NodeId {
        self.id
    }

    fn tokens(&self) -> Vec<&Token> {
        self.tokens.iter().collect()
    }

    fn first_token_mut(&mut self) -> &mut Token {
        &mut self.tokens[0]
    }

    fn last_token_mut(&mut self) -> &mut Token {
        let last = self.tokens.len().saturating_sub(1);
        &mut self.tokens[last]
    }
}
