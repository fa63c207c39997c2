//! Runtime errors for the interpreter

use super::Value;
use std::fmt;

/// Runtime error during interpretation
#[derive(Debug, Clone)]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Kinds of runtime errors
#[derive(Debug, Clone)]
pub enum ErrorKind {
    /// Name bound in no scope and not a builtin
    UnknownIdentifier,
    /// Infix operands of different types
    TypeMismatch,
    /// Operator not defined for the operand type(s)
    UnknownOperator,
    /// Callee is not a function or builtin
    NotAFunction,
    /// Argument count mismatch
    ArityMismatch,
    /// Builtin received an argument of the wrong type
    UnsupportedArgument,
    /// Integer division by zero
    DivisionByZero,
    /// Control flow: `return` unwinding to the nearest call or the program
    Return(Box<Value>),
}

impl PartialEq for ErrorKind {
    fn eq(&self, other: &Self) -> bool {
        // Return carries a value but is compared like any other kind
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl RuntimeError {
    fn new(kind: ErrorKind, message: String) -> Self {
        RuntimeError { kind, message }
    }

    pub fn unknown_identifier(name: &str) -> Self {
        Self::new(ErrorKind::UnknownIdentifier, format!("identifier not found: {name}"))
    }

    pub fn type_mismatch(left: &str, op: impl fmt::Display, right: &str) -> Self {
        Self::new(ErrorKind::TypeMismatch, format!("type mismatch: {left} {op} {right}"))
    }

    pub fn unknown_prefix_operator(op: impl fmt::Display, operand: &str) -> Self {
        Self::new(ErrorKind::UnknownOperator, format!("unknown operator: {op}{operand}"))
    }

    pub fn unknown_infix_operator(left: &str, op: impl fmt::Display, right: &str) -> Self {
        Self::new(ErrorKind::UnknownOperator, format!("unknown operator: {left} {op} {right}"))
    }

    pub fn not_a_function(type_name: &str) -> Self {
        Self::new(ErrorKind::NotAFunction, format!("not a function: {type_name}"))
    }

    pub fn wrong_argument_count(got: usize, want: usize) -> Self {
        Self::new(
            ErrorKind::ArityMismatch,
            format!("wrong number of arguments. got={got} want={want}"),
        )
    }

    pub fn unsupported_argument(builtin: &str, type_name: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedArgument,
            format!("argument to `{builtin}` not supported, got={type_name}"),
        )
    }

    pub fn division_by_zero() -> Self {
        Self::new(ErrorKind::DivisionByZero, "division by zero".to_string())
    }

    /// Wrap a `return` value so it unwinds through `?`
    pub fn return_value(value: Value) -> Self {
        Self::new(ErrorKind::Return(Box::new(value)), "return outside of a function".to_string())
    }

    pub fn is_return(&self) -> bool {
        matches!(self.kind, ErrorKind::Return(_))
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RuntimeError {}

/// Result type for interpreter operations
pub type InterpResult<T> = Result<T, RuntimeError>;

/// Stop a `return` at a call or program boundary
pub fn unwrap_return(result: InterpResult<Value>) -> InterpResult<Value> {
    match result {
        Err(RuntimeError {
            kind: ErrorKind::Return(value),
            ..
        }) => Ok(*value),
        other => other,
    }
}
