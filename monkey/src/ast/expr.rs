//! Expression AST nodes

use super::{Identifier, Statement, write_statements};
use crate::lexer::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Variable reference
    Identifier(Identifier),
    /// Integer literal
    Integer(i64),
    /// String literal (decoded contents)
    Str(String),
    /// Boolean literal
    Boolean(bool),

    /// Unary operation: `!x`, `-x`
    Prefix {
        op: PrefixOp,
        right: Box<Expression>,
    },

    /// Binary operation
    Infix {
        left: Box<Expression>,
        op: InfixOp,
        right: Box<Expression>,
    },

    /// Conditional: `if (cond) consequence else alternative`
    ///
    /// Each branch is either a `Block` or a bare expression.
    If {
        condition: Box<Expression>,
        consequence: Box<Expression>,
        alternative: Option<Box<Expression>>,
    },

    /// Block: `{ stmt; stmt; ... }`
    Block(BlockExpression),

    /// Function literal, shared with every closure created from it
    Function(Rc<FunctionLiteral>),

    /// Function application
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

/// Prefix operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrefixOp {
    Not,
    Neg,
}

impl PrefixOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Bang => Some(PrefixOp::Not),
            TokenKind::Minus => Some(PrefixOp::Neg),
            _ => None,
        }
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixOp::Not => write!(f, "!"),
            PrefixOp::Neg => write!(f, "-"),
        }
    }
}

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl InfixOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => InfixOp::Add,
            TokenKind::Minus => InfixOp::Sub,
            TokenKind::Asterisk => InfixOp::Mul,
            TokenKind::Slash => InfixOp::Div,
            TokenKind::Eq => InfixOp::Eq,
            TokenKind::NotEq => InfixOp::Ne,
            TokenKind::Lt => InfixOp::Lt,
            TokenKind::Gt => InfixOp::Gt,
            TokenKind::LtEq => InfixOp::Le,
            TokenKind::GtEq => InfixOp::Ge,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Eq => "==",
            InfixOp::Ne => "!=",
            InfixOp::Lt => "<",
            InfixOp::Gt => ">",
            InfixOp::Le => "<=",
            InfixOp::Ge => ">=",
        };
        f.write_str(s)
    }
}

/// Brace-delimited statement sequence
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockExpression {
    pub statements: Vec<Statement>,
}

/// `fn(params) body`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionLiteral {
    pub params: Vec<Identifier>,
    pub body: Expression,
}

impl fmt::Display for BlockExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        write_statements(f, &self.statements, " ")?;
        write!(f, "}}")
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        write_comma_separated(f, &self.params)?;
        write!(f, ") {}", self.body)
    }
}

impl Expression {
    fn is_block(&self) -> bool {
        matches!(self, Expression::Block(_))
    }

    fn fmt_inner(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{ident}"),
            Expression::Integer(n) => write!(f, "{n}"),
            Expression::Str(s) => write_quoted(f, s),
            Expression::Boolean(b) => write!(f, "{b}"),
            Expression::Prefix { op, right } => write!(f, "({op}{right})"),
            Expression::Infix { left, op, right } => write!(f, "({left} {op} {right})"),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                // A bare branch has no closing token of its own
                let grouped =
                    !consequence.is_block() || alternative.as_ref().is_some_and(|alt| !alt.is_block());
                if grouped {
                    write!(f, "(")?;
                }
                match consequence.as_ref() {
                    // Keep a following `else` from binding to the inner `if`
                    Expression::If {
                        alternative: None, ..
                    } if alternative.is_some() => write!(f, "if ({condition}) ({consequence})")?,
                    _ => write!(f, "if ({condition}) {consequence}")?,
                }
                if let Some(alt) = alternative {
                    write!(f, " else {alt}")?;
                }
                if grouped {
                    write!(f, ")")?;
                }
                Ok(())
            }
            Expression::Block(block) => write!(f, "{block}"),
            Expression::Function(literal) if literal.body.is_block() => write!(f, "{literal}"),
            Expression::Function(literal) => write!(f, "({literal})"),
            Expression::Call {
                function,
                arguments,
            } => {
                write!(f, "{function}(")?;
                write_comma_separated(f, arguments)?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        stacker::maybe_grow(crate::STACK_RED_ZONE, crate::STACK_GROW_SIZE, || self.fmt_inner(f))
    }
}

fn write_comma_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Quote a string, escaping what the lexer would otherwise misread
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}
