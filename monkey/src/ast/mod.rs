//! Abstract Syntax Tree definitions
//!
//! Every node renders a canonical form through `Display`. Re-parsing that
//! form yields a tree with the same rendering.

mod expr;
mod span;

pub use expr::*;
pub use span::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// A program is an ordered sequence of statements
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// `let name = value;`
    Let { name: Identifier, value: Expression },
    /// `return value;`
    Return(Expression),
    /// Expression evaluated for its value
    Expression(Expression),
}

/// A name in binding or reference position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Identifier(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {name} = {value};"),
            Statement::Return(value) => write!(f, "return {value};"),
            Statement::Expression(expr) => write!(f, "{expr}"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statements(f, &self.statements, "")
    }
}

/// Write a statement sequence, each statement followed by `separator`
///
/// An expression statement that is not the last one gets a `;`, otherwise
/// it would run into the next statement when re-parsed.
fn write_statements(
    f: &mut fmt::Formatter<'_>,
    statements: &[Statement],
    separator: &str,
) -> fmt::Result {
    for (i, stmt) in statements.iter().enumerate() {
        write!(f, "{stmt}")?;
        if matches!(stmt, Statement::Expression(_)) && i + 1 < statements.len() {
            f.write_str(";")?;
        }
        f.write_str(separator)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_display() {
        let program = Program {
            statements: vec![
                Statement::Let {
                    name: Identifier::new("myVar"),
                    value: Expression::Identifier(Identifier::new("anotherVar")),
                },
                Statement::Return(Expression::Integer(5)),
            ],
        };
        assert_eq!(program.to_string(), "let myVar = anotherVar;return 5;");
    }

    #[test]
    fn test_expression_statement_has_no_semicolon() {
        let stmt = Statement::Expression(Expression::Boolean(true));
        assert_eq!(stmt.to_string(), "true");
    }

    #[test]
    fn test_expression_statements_are_separated() {
        let program = Program {
            statements: vec![
                Statement::Expression(Expression::Identifier(Identifier::new("a"))),
                Statement::Expression(Expression::Identifier(Identifier::new("b"))),
            ],
        };
        assert_eq!(program.to_string(), "a;b");
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(Program::default().to_string(), "");
    }

    #[test]
    fn test_ast_serializes() {
        let program = Program {
            statements: vec![Statement::Expression(Expression::Integer(1))],
        };
        let json = serde_json::to_string(&program).unwrap();
        assert!(json.contains("Integer"));
    }
}
