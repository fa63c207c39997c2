//! Built-in functions
//!
//! The registry is a fixed static table. Identifier lookup consults it only
//! after the whole environment chain, so a local binding shadows a builtin.

use super::error::{InterpResult, RuntimeError};
use super::value::{NULL, Value};
use std::fmt;

/// Builtin function type
pub type BuiltinFn = fn(&[Value]) -> InterpResult<Value>;

/// A registry entry
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl Builtin {
    pub fn call(&self, args: &[Value]) -> InterpResult<Value> {
        (self.func)(args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

static BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        func: builtin_len,
    },
    Builtin {
        name: "puts",
        func: builtin_puts,
    },
];

/// Find a builtin by name
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|b| b.name == name).copied()
}

/// len(s: String) -> Integer
/// Byte length of a string.
fn builtin_len(args: &[Value]) -> InterpResult<Value> {
    if args.len() != 1 {
        return Err(RuntimeError::wrong_argument_count(args.len(), 1));
    }
    match &args[0] {
        Value::Str(s) => Ok(Value::Integer(s.len() as i64)),
        other => Err(RuntimeError::unsupported_argument("len", other.type_name())),
    }
}

/// puts(args...) -> Null
/// Prints each argument on its own line.
fn builtin_puts(args: &[Value]) -> InterpResult<Value> {
    for arg in args {
        println!("{arg}");
    }
    Ok(NULL)
}
