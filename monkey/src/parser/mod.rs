//! Parser implementation: recursive descent for statements, precedence
//! climbing for expressions
//!
//! The parser keeps going after a diagnostic, dropping the statement that
//! failed. Callers must check [`Parser::errors`] before trusting the tree;
//! [`parse`] does that for them.

use crate::ast::{
    BlockExpression, Expression, FunctionLiteral, Identifier, InfixOp, PrefixOp, Program,
    Statement,
};
use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::{STACK_GROW_SIZE, STACK_RED_ZONE};
use std::rc::Rc;


/// Binding power, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>` `<=` `>=`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `!x` `-x`
    Prefix,
    /// `f(x)`
    Call,
}

impl Precedence {
    /// Infix binding power of a token; `Lowest` for anything that is not an
    /// infix operator
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
                Precedence::LessGreater
            }
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}

/// Parse a whole source string, failing if any diagnostic was recorded
pub fn parse(source: &str) -> Result<Program> {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();
    if parser.errors.is_empty() {
        Ok(program)
    } else {
        Err(parser.errors)
    }
}

/// Two-token lookahead parser over a [`Lexer`]
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::from_lexer(Lexer::new(source))
    }

    pub fn from_lexer(mut lexer: Lexer<'src>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Parser {
            lexer,
            current,
            peek,
            errors: Vec::new(),
        }
    }

    /// Diagnostics accumulated so far
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        while !self.current_is(TokenKind::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
            self.next_token();
        }
        program
    }

    // ============ Token cursor ============

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advance if the next token is `kind`, otherwise record a diagnostic
    fn expect_peek(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek_is(kind) {
            self.next_token();
            Some(())
        } else {
            let err = ParseError::unexpected_token(kind, self.peek.kind, self.peek.span);
            self.error(err);
            None
        }
    }

    fn peek_precedence(&self) -> Precedence {
        Precedence::of(self.peek.kind)
    }

    fn current_precedence(&self) -> Precedence {
        Precedence::of(self.current.kind)
    }

    fn error(&mut self, err: ParseError) {
        tracing::debug!(span = %err.span, "parse error: {err}");
        self.errors.push(err);
    }

    // ============ Statements ============

    /// Parse one statement with automatic stack growth for nested blocks
    fn parse_statement(&mut self) -> Option<Statement> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Option<Statement> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        self.expect_peek(TokenKind::Ident)?;
        let name = Identifier::new(self.current.literal.clone());
        self.expect_peek(TokenKind::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Some(Statement::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Some(Statement::Return(value))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();
        Some(Statement::Expression(expr))
    }

    fn skip_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    // ============ Expressions ============

    /// Parse an expression with automatic stack growth for deep nesting
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.parse_expression_inner(precedence)
        })
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            self.next_token();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    /// Dispatch on the current token to its prefix handler
    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.current.kind {
            TokenKind::Ident => Some(Expression::Identifier(Identifier::new(
                self.current.literal.clone(),
            ))),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::Str => Some(Expression::Str(self.current.literal.clone())),
            TokenKind::True => Some(Expression::Boolean(true)),
            TokenKind::False => Some(Expression::Boolean(false)),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            kind => {
                let err = ParseError::no_prefix_parse_fn(kind, self.current.span);
                self.error(err);
                None
            }
        }
    }

    /// Dispatch on the current token to its infix handler
    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        if self.current_is(TokenKind::LParen) {
            return self.parse_call_expression(left);
        }
        match InfixOp::from_token(self.current.kind) {
            Some(op) => self.parse_infix_expression(left, op),
            None => Some(left),
        }
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.current.literal.parse::<i64>() {
            Ok(n) => Some(Expression::Integer(n)),
            Err(_) => {
                let err = ParseError::invalid_integer(&self.current.literal, self.current.span);
                self.error(err);
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let op = PrefixOp::from_token(self.current.kind)?;
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::Prefix {
            op,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(&mut self, left: Expression, op: InfixOp) -> Option<Expression> {
        let precedence = self.current_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::Infix {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.next_token();
        let consequence = self.parse_branch()?;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            self.next_token();
            Some(Box::new(self.parse_branch()?))
        } else {
            None
        };

        Some(Expression::If {
            condition: Box::new(condition),
            consequence: Box::new(consequence),
            alternative,
        })
    }

    /// If-branch or function body: a block, or a single bare expression
    fn parse_branch(&mut self) -> Option<Expression> {
        if self.current_is(TokenKind::LBrace) {
            self.parse_block().map(Expression::Block)
        } else {
            self.parse_expression(Precedence::Lowest)
        }
    }

    /// Parse `{ ... }`; leaves the cursor on the closing brace
    fn parse_block(&mut self) -> Option<BlockExpression> {
        let mut block = BlockExpression::default();
        self.next_token();

        while !self.current_is(TokenKind::RBrace) {
            if self.current_is(TokenKind::Eof) {
                let err =
                    ParseError::unexpected_token(TokenKind::RBrace, TokenKind::Eof, self.current.span);
                self.error(err);
                return None;
            }
            if let Some(stmt) = self.parse_statement() {
                block.statements.push(stmt);
            }
            self.next_token();
        }

        Some(block)
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        self.expect_peek(TokenKind::LParen)?;
        let params = self.parse_function_params()?;
        self.next_token();
        let body = self.parse_branch()?;
        Some(Expression::Function(Rc::new(FunctionLiteral { params, body })))
    }

    fn parse_function_params(&mut self) -> Option<Vec<Identifier>> {
        let mut params = Vec::new();
        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(params);
        }

        self.expect_peek(TokenKind::Ident)?;
        params.push(Identifier::new(self.current.literal.clone()));
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.expect_peek(TokenKind::Ident)?;
            params.push(Identifier::new(self.current.literal.clone()));
        }

        self.expect_peek(TokenKind::RParen)?;
        Some(params)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let arguments = self.parse_call_arguments()?;
        Some(Expression::Call {
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut args = Vec::new();
        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(args);
        }

        self.next_token();
        args.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            args.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(TokenKind::RParen)?;
        Some(args)
    }
}
