//! Runtime values for the interpreter

use super::builtins::Builtin;
use super::env::EnvRef;
use crate::ast::FunctionLiteral;
use std::fmt;
use std::rc::Rc;

/// Canonical `true`
pub const TRUE: Value = Value::Boolean(true);
/// Canonical `false`
pub const FALSE: Value = Value::Boolean(false);
/// Canonical null
pub const NULL: Value = Value::Null;

/// Runtime value
///
/// `Boolean` and `Null` carry no heap identity: every `true` is [`TRUE`], every
/// `false` is [`FALSE`] and every null is [`NULL`], so comparing them by variant
/// is comparing by identity. Functions compare by pointer, builtins by
/// registry entry.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Str(Rc<str>),
    Null,
    /// User function together with the scope it was defined in
    Function(Rc<Closure>),
    Builtin(Builtin),
    /// Failed evaluation, as surfaced at the program boundary
    Error(String),
}

/// A function literal paired with its captured environment
pub struct Closure {
    pub literal: Rc<FunctionLiteral>,
    pub env: EnvRef,
}

impl fmt::Debug for Closure {
    // The captured scope may contain this closure; never print it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
            .field("literal", &self.literal.to_string())
            .finish_non_exhaustive()
    }
}

impl Value {
    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Str(_) => "STRING",
            Value::Null => "NULL",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN",
            Value::Error(_) => "ERROR",
        }
    }

    /// Only `false` and null are falsy
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Null => false,
            _ => true,
        }
    }

    /// Identity comparison used by `==` and `!=`
    pub fn same_as(&self, other: &Value) -> bool {
        self == other
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b { TRUE } else { FALSE }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Null => write!(f, "null"),
            Value::Function(closure) => write!(f, "{}", closure.literal),
            Value::Builtin(_) => write!(f, "builtin function"),
            Value::Error(message) => write!(f, "ERROR: {message}"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => false,
        }
    }
}
