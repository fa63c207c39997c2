//! Tree-walking interpreter
//!
//! Programs evaluate against an [`Environment`] chain. Runtime failures and
//! `return` both travel as [`RuntimeError`] through `?` until a call or the
//! program boundary stops them.

pub mod builtins;
mod env;
mod error;
mod eval;
mod value;

pub use builtins::{Builtin, BuiltinFn};
pub use env::{EnvRef, Environment, child_env};
pub use error::{ErrorKind, InterpResult, RuntimeError, unwrap_return};
pub use eval::Interpreter;
pub use value::{Closure, FALSE, NULL, TRUE, Value};
