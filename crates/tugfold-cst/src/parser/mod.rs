// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Recursive-descent parser producing a lossless CST.
//!
//! The parser never fails. Tokens it cannot place are kept in an
//! [`ErrorStatement`](crate::nodes::ErrorStatement) that runs to the next `;`
//! (inclusive) or up to the next `}`; a missing `;` or `}` becomes a
//! zero-width placeholder token. Either way a [`ParseDiagnostic`] is
//! recorded, and printing the module reproduces the source exactly.

mod errors;

pub use errors::{ParseDiagnostic, ParserError};

use tracing::trace;

use crate::nodes::{
    Argument, Assignment, Binary, Block, Call, DefaultExpr, DefaultOperand, Declarator,
    ElseClause, EmptyStatement, ErrorStatement, Expression, ExpressionStatement, If, Index,
    Initializer, Literal, LiteralKind, LocalDeclaration, Member, Module, NameExpr, NodeId,
    NodeIdGenerator, Parenthesized, Return, Statement, TypeRef, Unary, While,
};
use crate::tokenizer::{tokenize, Token, TokenKind};

/// A parsed module together with everything that went wrong parsing it.
#[derive(Debug, Clone)]
pub struct ParsedModule {
    pub module: Module,
    /// Tokenizer and parser diagnostics, ordered by position.
    pub diagnostics: Vec<ParseDiagnostic>,
}

impl ParsedModule {
    /// True if any diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Parse `source` into a module.
pub fn parse_module(source: &str) -> ParsedModule {
    let (tokens, mut diagnostics) = tokenize(source);
    let mut parser = Parser {
        tokens,
        pos: 0,
        diagnostics: Vec::new(),
    };
    let mut module = parser.module();
    diagnostics.append(&mut parser.diagnostics);
    diagnostics.sort_by_key(|d| d.span);

    let mut ids = NodeIdGenerator::new();
    number_module(&mut module, &mut ids);
    trace!(
        nodes = ids.count(),
        errors = diagnostics.len(),
        "parsed module"
    );

    ParsedModule {
        module,
        diagnostics,
    }
}

type PResult<T> = Result<T, ParserError>;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Vec<ParseDiagnostic>,
}

impl Parser {
    // ------------------------------------------------------------------------
    // Token access
    // ------------------------------------------------------------------------

    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn peek_kind_at(&self, offset: usize) -> TokenKind {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + offset).min(last)].kind
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::EndOfFile {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) {
            Some(self.bump())
        } else {
            None
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParserError {
        let token = self.peek();
        let found = if token.kind == TokenKind::EndOfFile {
            "end of file".to_string()
        } else {
            format!("'{}'", token.text)
        };
        ParserError::Expected { expected, found }
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> PResult<Token> {
        self.eat(kind).ok_or_else(|| self.unexpected(expected))
    }

    /// Take `kind` if present; otherwise record an error and return a
    /// zero-width placeholder.
    fn expect_or_missing(&mut self, kind: TokenKind, expected: &'static str) -> Token {
        if let Some(token) = self.eat(kind) {
            return token;
        }
        let error = self.unexpected(expected);
        let offset = self.missing_offset();
        self.diagnostics.push(ParseDiagnostic {
            error,
            span: tugfold_core::Span::empty_at(offset),
        });
        Token::missing(kind, offset)
    }

    /// Offset right after the previous token's text.
    fn missing_offset(&self) -> usize {
        match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(prev) => prev.span.end,
            None => self.peek().span.start,
        }
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    fn module(&mut self) -> Module {
        let mut body = Vec::new();
        while !self.at(TokenKind::EndOfFile) {
            body.push(self.statement());
        }
        Module {
            id: NodeId::SYNTHETIC,
            body,
            eof: self.bump(),
        }
    }

    /// Parse one statement, recovering into an [`ErrorStatement`].
    ///
    /// Must not be called at end of file.
    fn statement(&mut self) -> Statement {
        let start = self.pos;
        let mark = self.diagnostics.len();
        match self.try_statement() {
            Ok(statement) => statement,
            Err(error) => {
                let span = self.peek().span;
                self.pos = start;
                self.diagnostics.truncate(mark);
                self.diagnostics.push(ParseDiagnostic { error, span });
                self.error_statement()
            }
        }
    }

    /// A statement used as the body of `if`, `else`, or `while`.
    fn embedded_statement(&mut self) -> PResult<Statement> {
        if self.at(TokenKind::EndOfFile) || self.at(TokenKind::CloseBrace) {
            return Err(self.unexpected("statement"));
        }
        Ok(self.statement())
    }

    fn error_statement(&mut self) -> Statement {
        let mut tokens = vec![self.bump()];
        let first = tokens[0].kind;
        if first != TokenKind::Semicolon && first != TokenKind::CloseBrace {
            while !self.at(TokenKind::EndOfFile) && !self.at(TokenKind::CloseBrace) {
                let token = self.bump();
                let done = token.is(TokenKind::Semicolon);
                tokens.push(token);
                if done {
                    break;
                }
            }
        }
        Statement::Error(ErrorStatement {
            id: NodeId::SYNTHETIC,
            tokens,
        })
    }

    fn try_statement(&mut self) -> PResult<Statement> {
        match self.peek().kind {
            TokenKind::OpenBrace => Ok(Statement::Block(self.block())),
            TokenKind::Semicolon => Ok(Statement::Empty(EmptyStatement {
                id: NodeId::SYNTHETIC,
                semicolon: self.bump(),
            })),
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Return => self.return_statement(),
            _ if self.at_declaration() => self.local_declaration(),
            _ => {
                let expression = self.expression()?;
                let semicolon = self.expect_or_missing(TokenKind::Semicolon, "';'");
                Ok(Statement::Expression(ExpressionStatement {
                    id: NodeId::SYNTHETIC,
                    expression,
                    semicolon,
                }))
            }
        }
    }

    /// `const ...`, `T name ...`, or `T? name ...`.
    fn at_declaration(&self) -> bool {
        match self.peek().kind {
            TokenKind::Const => true,
            TokenKind::Identifier => match self.peek_kind_at(1) {
                TokenKind::Identifier => true,
                TokenKind::Question => self.peek_kind_at(2) == TokenKind::Identifier,
                _ => false,
            },
            _ => false,
        }
    }

    fn block(&mut self) -> Block {
        let open = self.bump();
        let mut statements = Vec::new();
        while !self.at(TokenKind::CloseBrace) && !self.at(TokenKind::EndOfFile) {
            statements.push(self.statement());
        }
        let close = self.expect_or_missing(TokenKind::CloseBrace, "'}'");
        Block {
            id: NodeId::SYNTHETIC,
            open,
            statements,
            close,
        }
    }

    fn if_statement(&mut self) -> PResult<Statement> {
        let if_kw = self.bump();
        let open_paren = self.expect(TokenKind::OpenParen, "'('")?;
        let condition = self.expression()?;
        let close_paren = self.expect(TokenKind::CloseParen, "')'")?;
        let then_branch = Box::new(self.embedded_statement()?);
        let else_clause = match self.eat(TokenKind::Else) {
            Some(else_kw) => Some(ElseClause {
                id: NodeId::SYNTHETIC,
                else_kw,
                body: Box::new(self.embedded_statement()?),
            }),
            None => None,
        };
        Ok(Statement::If(If {
            id: NodeId::SYNTHETIC,
            if_kw,
            open_paren,
            condition,
            close_paren,
            then_branch,
            else_clause,
        }))
    }

    fn while_statement(&mut self) -> PResult<Statement> {
        let while_kw = self.bump();
        let open_paren = self.expect(TokenKind::OpenParen, "'('")?;
        let condition = self.expression()?;
        let close_paren = self.expect(TokenKind::CloseParen, "')'")?;
        let body = Box::new(self.embedded_statement()?);
        Ok(Statement::While(While {
            id: NodeId::SYNTHETIC,
            while_kw,
            open_paren,
            condition,
            close_paren,
            body,
        }))
    }

    fn return_statement(&mut self) -> PResult<Statement> {
        let return_kw = self.bump();
        let value = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        let semicolon = self.expect_or_missing(TokenKind::Semicolon, "';'");
        Ok(Statement::Return(Return {
            id: NodeId::SYNTHETIC,
            return_kw,
            value,
            semicolon,
        }))
    }

    fn local_declaration(&mut self) -> PResult<Statement> {
        let const_kw = self.eat(TokenKind::Const);
        let ty = self.type_ref()?;
        let mut declarators = Vec::new();
        loop {
            let name = self.expect(TokenKind::Identifier, "variable name")?;
            let initializer = match self.eat(TokenKind::Equals) {
                Some(equals) => Some(Initializer {
                    id: NodeId::SYNTHETIC,
                    equals,
                    value: self.expression()?,
                }),
                None => None,
            };
            let comma = self.eat(TokenKind::Comma);
            let more = comma.is_some();
            declarators.push(Declarator {
                id: NodeId::SYNTHETIC,
                name,
                initializer,
                comma,
            });
            if !more {
                break;
            }
        }
        let semicolon = self.expect_or_missing(TokenKind::Semicolon, "';'");
        Ok(Statement::LocalDeclaration(LocalDeclaration {
            id: NodeId::SYNTHETIC,
            const_kw,
            ty,
            declarators,
            semicolon,
        }))
    }

    fn type_ref(&mut self) -> PResult<TypeRef> {
        let name = self.expect(TokenKind::Identifier, "type name")?;
        let question = self.eat(TokenKind::Question);
        Ok(TypeRef {
            id: NodeId::SYNTHETIC,
            name,
            question,
        })
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    fn expression(&mut self) -> PResult<Expression> {
        let target = self.binary(1)?;
        if !self.peek().kind.is_assignment_operator() {
            return Ok(target);
        }
        let op = self.bump();
        let value = self.expression()?;
        Ok(Expression::Assignment(Assignment {
            id: NodeId::SYNTHETIC,
            target: Box::new(target),
            op,
            value: Box::new(value),
        }))
    }

    fn binary(&mut self, min_precedence: u8) -> PResult<Expression> {
        let mut left = self.unary()?;
        while let Some(precedence) = binary_precedence(self.peek().kind) {
            if precedence < min_precedence {
                break;
            }
            let op = self.bump();
            let right = self.binary(precedence + 1)?;
            left = Expression::Binary(Binary {
                id: NodeId::SYNTHETIC,
                left: Box::new(left),
                op,
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn unary(&mut self) -> PResult<Expression> {
        if self.at(TokenKind::Minus) || self.at(TokenKind::Bang) {
            let op = self.bump();
            let operand = self.unary()?;
            return Ok(Expression::Unary(Unary {
                id: NodeId::SYNTHETIC,
                op,
                operand: Box::new(operand),
            }));
        }
        self.postfix()
    }

    fn postfix(&mut self) -> PResult<Expression> {
        let mut expr = self.primary()?;
        loop {
            expr = match self.peek().kind {
                TokenKind::Dot => {
                    let dot = self.bump();
                    let member = self.expect(TokenKind::Identifier, "member name")?;
                    Expression::Member(Member {
                        id: NodeId::SYNTHETIC,
                        object: Box::new(expr),
                        dot,
                        member,
                    })
                }
                TokenKind::OpenParen => {
                    let open_paren = self.bump();
                    let args = self.arguments()?;
                    let close_paren = self.expect(TokenKind::CloseParen, "')'")?;
                    Expression::Call(Call {
                        id: NodeId::SYNTHETIC,
                        callee: Box::new(expr),
                        open_paren,
                        args,
                        close_paren,
                    })
                }
                TokenKind::OpenBracket => {
                    let open_bracket = self.bump();
                    let index = self.expression()?;
                    let close_bracket = self.expect(TokenKind::CloseBracket, "']'")?;
                    Expression::Index(Index {
                        id: NodeId::SYNTHETIC,
                        object: Box::new(expr),
                        open_bracket,
                        index: Box::new(index),
                        close_bracket,
                    })
                }
                _ => return Ok(expr),
            };
        }
    }

    fn arguments(&mut self) -> PResult<Vec<Argument>> {
        let mut args = Vec::new();
        if self.at(TokenKind::CloseParen) {
            return Ok(args);
        }
        loop {
            let value = self.expression()?;
            let comma = self.eat(TokenKind::Comma);
            let more = comma.is_some();
            args.push(Argument {
                id: NodeId::SYNTHETIC,
                value,
                comma,
            });
            if !more {
                return Ok(args);
            }
        }
    }

    fn primary(&mut self) -> PResult<Expression> {
        let literal = match self.peek().kind {
            TokenKind::IntegerLiteral => Some(LiteralKind::Integer),
            TokenKind::RealLiteral => Some(LiteralKind::Real),
            TokenKind::StringLiteral => Some(LiteralKind::String),
            TokenKind::True => Some(LiteralKind::True),
            TokenKind::False => Some(LiteralKind::False),
            TokenKind::Null => Some(LiteralKind::Null),
            _ => None,
        };
        if let Some(kind) = literal {
            return Ok(Expression::Literal(Literal {
                id: NodeId::SYNTHETIC,
                token: self.bump(),
                kind,
            }));
        }

        match self.peek().kind {
            TokenKind::Identifier => Ok(Expression::Name(NameExpr {
                id: NodeId::SYNTHETIC,
                name: self.bump(),
            })),
            TokenKind::Default => {
                let default_kw = self.bump();
                let operand = match self.eat(TokenKind::OpenParen) {
                    Some(open_paren) => Some(DefaultOperand {
                        open_paren,
                        ty: self.type_ref()?,
                        close_paren: self.expect(TokenKind::CloseParen, "')'")?,
                    }),
                    None => None,
                };
                Ok(Expression::Default(DefaultExpr {
                    id: NodeId::SYNTHETIC,
                    default_kw,
                    operand,
                }))
            }
            TokenKind::OpenParen => {
                let open_paren = self.bump();
                let inner = self.expression()?;
                let close_paren = self.expect(TokenKind::CloseParen, "')'")?;
                Ok(Expression::Parenthesized(Parenthesized {
                    id: NodeId::SYNTHETIC,
                    open_paren,
                    inner: Box::new(inner),
                    close_paren,
                }))
            }
            _ => Err(self.unexpected("expression")),
        }
    }
}

fn binary_precedence(kind: TokenKind) -> Option<u8> {
    match kind {
        TokenKind::BarBar => Some(1),
        TokenKind::AmpAmp => Some(2),
        TokenKind::EqualsEquals | TokenKind::BangEquals => Some(3),
        TokenKind::Less | TokenKind::LessEquals | TokenKind::Greater | TokenKind::GreaterEquals => {
            Some(4)
        }
        TokenKind::Plus | TokenKind::Minus => Some(5),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(6),
        _ => None,
    }
}

// ============================================================================
// NodeId assignment
// ============================================================================

/// Assign pre-order ids to every node of `module`.
pub fn number_module(module: &mut Module, ids: &mut NodeIdGenerator) {
    module.id = ids.next_id();
    for statement in &mut module.body {
        number_statement(statement, ids);
    }
}

fn number_statement(statement: &mut Statement, ids: &mut NodeIdGenerator) {
    match statement {
        Statement::LocalDeclaration(decl) => {
            decl.id = ids.next_id();
            number_type_ref(&mut decl.ty, ids);
            for declarator in &mut decl.declarators {
                declarator.id = ids.next_id();
                if let Some(initializer) = &mut declarator.initializer {
                    initializer.id = ids.next_id();
                    number_expression(&mut initializer.value, ids);
                }
            }
        }
        Statement::Expression(stmt) => {
            stmt.id = ids.next_id();
            number_expression(&mut stmt.expression, ids);
        }
        Statement::Block(block) => {
            block.id = ids.next_id();
            for statement in &mut block.statements {
                number_statement(statement, ids);
            }
        }
        Statement::If(stmt) => {
            stmt.id = ids.next_id();
            number_expression(&mut stmt.condition, ids);
            number_statement(&mut stmt.then_branch, ids);
            if let Some(else_clause) = &mut stmt.else_clause {
                else_clause.id = ids.next_id();
                number_statement(&mut else_clause.body, ids);
            }
        }
        Statement::While(stmt) => {
            stmt.id = ids.next_id();
            number_expression(&mut stmt.condition, ids);
            number_statement(&mut stmt.body, ids);
        }
        Statement::Return(stmt) => {
            stmt.id = ids.next_id();
            if let Some(value) = &mut stmt.value {
                number_expression(value, ids);
            }
        }
        Statement::Empty(stmt) => stmt.id = ids.next_id(),
        Statement::Error(stmt) => stmt.id = ids.next_id(),
    }
}

fn number_type_ref(ty: &mut TypeRef, ids: &mut NodeIdGenerator) {
    ty.id = ids.next_id();
}

fn number_expression(expr: &mut Expression, ids: &mut NodeIdGenerator) {
    match expr {
        Expression::Name(node) => node.id = ids.next_id(),
        Expression::Literal(node) => node.id = ids.next_id(),
        Expression::Default(node) => {
            node.id = ids.next_id();
            if let Some(operand) = &mut node.operand {
                number_type_ref(&mut operand.ty, ids);
            }
        }
        Expression::Parenthesized(node) => {
            node.id = ids.next_id();
            number_expression(&mut node.inner, ids);
        }
        Expression::Unary(node) => {
            node.id = ids.next_id();
            number_expression(&mut node.operand, ids);
        }
        Expression::Binary(node) => {
            node.id = ids.next_id();
            number_expression(&mut node.left, ids);
            number_expression(&mut node.right, ids);
        }
        Expression::Assignment(node) => {
            node.id = ids.next_id();
            number_expression(&mut node.target, ids);
            number_expression(&mut node.value, ids);
        }
        Expression::Member(node) => {
            node.id = ids.next_id();
            number_expression(&mut node.object, ids);
        }
        Expression::Call(node) => {
            node.id = ids.next_id();
            number_expression(&mut node.callee, ids);
            for arg in &mut node.args {
                arg.id = ids.next_id();
                number_expression(&mut arg.value, ids);
            }
        }
        Expression::Index(node) => {
            node.id = ids.next_id();
            number_expression(&mut node.object, ids);
            number_expression(&mut node.index, ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::{Codegen, Node};

    fn parse_ok(source: &str) -> Module {
        let parsed = parse_module(source);
        assert!(
            parsed.diagnostics.is_empty(),
            "unexpected errors: {:?}",
            parsed.diagnostics
        );
        parsed.module
    }

    mod statements {
        use super::*;

        #[test]
        fn declaration_with_multiple_declarators() {
            let module = parse_ok("const int a = 1, b;");
            let decl = module.body[0].as_local_declaration().unwrap();
            assert!(decl.is_const());
            assert_eq!(decl.ty.name(), "int");
            assert_eq!(decl.declarators.len(), 2);
            assert_eq!(decl.declarators[0].name(), "a");
            assert!(decl.declarators[0].initializer.is_some());
            assert!(decl.declarators[0].comma.is_some());
            assert_eq!(decl.declarators[1].name(), "b");
            assert!(decl.declarators[1].initializer.is_none());
        }

        #[test]
        fn nullable_declaration() {
            let module = parse_ok("string? s = null;");
            let decl = module.body[0].as_local_declaration().unwrap();
            assert!(decl.ty.is_nullable());
        }

        #[test]
        fn assignment_statement() {
            let module = parse_ok("x = y + 1;");
            let stmt = module.body[0].as_expression().unwrap();
            let assignment = stmt.expression.as_assignment().unwrap();
            assert!(assignment.is_simple());
            assert_eq!(assignment.target.as_name().unwrap().value(), "x");
            assert!(matches!(*assignment.value, Expression::Binary(_)));
        }

        #[test]
        fn control_flow() {
            let module = parse_ok("if (a < b) { x = 1; } else y = 2; while (ok) f(1, 2); return;");
            assert_eq!(module.body.len(), 3);
            assert!(matches!(module.body[0], Statement::If(_)));
            assert!(matches!(module.body[1], Statement::While(_)));
            assert!(matches!(module.body[2], Statement::Return(_)));
        }

        #[test]
        fn precedence() {
            let module = parse_ok("x = a + b * c;");
            let assignment = module.body[0]
                .as_expression()
                .unwrap()
                .expression
                .as_assignment()
                .unwrap();
            let Expression::Binary(sum) = &*assignment.value else {
                panic!("expected binary");
            };
            assert_eq!(sum.op.kind, TokenKind::Plus);
            assert!(matches!(*sum.right, Expression::Binary(_)));
        }

        #[test]
        fn right_associative_assignment() {
            let module = parse_ok("a = b = 1;");
            let outer = module.body[0]
                .as_expression()
                .unwrap()
                .expression
                .as_assignment()
                .unwrap();
            assert!(outer.value.as_assignment().is_some());
        }
    }

    mod node_ids {
        use super::*;

        #[test]
        fn pre_order_assignment() {
            let module = parse_ok("x = 1;");
            assert_eq!(module.id, NodeId(0));
            let stmt = module.body[0].as_expression().unwrap();
            assert_eq!(stmt.id, NodeId(1));
            let assignment = stmt.expression.as_assignment().unwrap();
            assert_eq!(assignment.id, NodeId(2));
            assert_eq!(assignment.target.node_id(), NodeId(3));
            assert_eq!(assignment.value.node_id(), NodeId(4));
        }

        #[test]
        fn deterministic() {
            let a = parse_module("{ int x = 0; x = 5; }").module;
            let b = parse_module("{ int x = 0; x = 5; }").module;
            assert_eq!(a, b);
        }
    }

    mod recovery {
        use super::*;

        #[test]
        fn missing_semicolon_is_placeholder() {
            let source = "x = 1";
            let parsed = parse_module(source);
            assert_eq!(parsed.diagnostics.len(), 1);
            let stmt = parsed.module.body[0].as_expression().unwrap();
            assert!(stmt.semicolon.is_missing());
            assert_eq!(parsed.diagnostics[0].span.start, 5);
            assert_eq!(parsed.module.to_source(), source);
        }

        #[test]
        fn bad_expression_becomes_error_statement() {
            let source = "int a = 0;\nx = ;\ny = 2;\n";
            let parsed = parse_module(source);
            assert_eq!(parsed.diagnostics.len(), 1);
            assert!(matches!(parsed.module.body[1], Statement::Error(_)));
            assert!(matches!(parsed.module.body[2], Statement::Expression(_)));
            assert_eq!(parsed.module.to_source(), source);
        }

        #[test]
        fn unclosed_block() {
            let source = "{ int x = 0;\n";
            let parsed = parse_module(source);
            assert_eq!(parsed.diagnostics.len(), 1);
            let Statement::Block(block) = &parsed.module.body[0] else {
                panic!("expected block");
            };
            assert!(block.close.is_missing());
            assert_eq!(parsed.module.to_source(), source);
        }

        #[test]
        fn stray_close_brace() {
            let source = "x = 1; }\ny = 2;";
            let parsed = parse_module(source);
            assert_eq!(parsed.diagnostics.len(), 1);
            assert_eq!(parsed.module.body.len(), 3);
            assert_eq!(parsed.module.to_source(), source);
        }

        #[test]
        fn if_without_body() {
            let source = "if (a)";
            let parsed = parse_module(source);
            assert!(parsed.has_errors());
            assert!(matches!(parsed.module.body[0], Statement::Error(_)));
            assert_eq!(parsed.module.to_source(), source);
        }
    }

    mod spans {
        use super::*;

        #[test]
        fn statement_span_excludes_trivia() {
            let module = parse_ok("  int x = 0; // c\n");
            let span = module.body[0].span();
            assert_eq!(span.start, 2);
            assert_eq!(span.end, 12);
            assert_eq!(module.body[0].full_span().end, 18);
        }
    }
}
