//! Tree-walking evaluator

use super::builtins;
use super::env::{EnvRef, Environment, child_env};
use super::error::{InterpResult, RuntimeError, unwrap_return};
use super::value::{Closure, FALSE, NULL, TRUE, Value};
use crate::ast::{Expression, InfixOp, PrefixOp, Program, Statement};
use crate::error::ParseError;
use crate::parser::parse;
use crate::{STACK_GROW_SIZE, STACK_RED_ZONE};
use std::rc::Rc;

/// The interpreter
pub struct Interpreter {
    /// Global environment, kept across programs
    global_env: EnvRef,
}

impl Interpreter {
    /// Create a new interpreter
    pub fn new() -> Self {
        Self::with_env(Environment::new().into_ref())
    }

    /// Create an interpreter rooted at an existing environment
    pub fn with_env(global_env: EnvRef) -> Self {
        Interpreter { global_env }
    }

    pub fn global_env(&self) -> &EnvRef {
        &self.global_env
    }

    /// Evaluate a program in the global environment
    pub fn eval_program(&self, program: &Program) -> Value {
        self.eval_program_in(program, &self.global_env)
    }

    /// Evaluate a program in `env`
    ///
    /// A top-level `return` stops the program with its value. Any runtime
    /// error becomes [`Value::Error`].
    pub fn eval_program_in(&self, program: &Program, env: &EnvRef) -> Value {
        match unwrap_return(self.eval_statements(&program.statements, env)) {
            Ok(value) => value,
            Err(err) => {
                tracing::debug!(kind = ?err.kind, "program finished with an error: {err}");
                Value::Error(err.message)
            }
        }
    }

    /// Parse and evaluate source text in the global environment
    ///
    /// Nothing is evaluated when parsing reports diagnostics.
    pub fn eval_source(&self, source: &str) -> Result<Value, Vec<ParseError>> {
        let program = parse(source)?;
        Ok(self.eval_program(&program))
    }

    fn eval_statements(&self, statements: &[Statement], env: &EnvRef) -> InterpResult<Value> {
        let mut result = NULL;
        for stmt in statements {
            result = self.eval_statement(stmt, env)?;
        }
        Ok(result)
    }

    fn eval_statement(&self, stmt: &Statement, env: &EnvRef) -> InterpResult<Value> {
        match stmt {
            Statement::Let { name, value } => {
                let value = self.eval(value, env)?;
                env.borrow_mut().define(name.name(), value.clone());
                Ok(value)
            }
            Statement::Return(value) => {
                let value = self.eval(value, env)?;
                Err(RuntimeError::return_value(value))
            }
            Statement::Expression(expr) => self.eval(expr, env),
        }
    }

    /// Evaluate an expression with automatic stack growth for deep recursion
    fn eval(&self, expr: &Expression, env: &EnvRef) -> InterpResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_inner(expr, env))
    }

    fn eval_inner(&self, expr: &Expression, env: &EnvRef) -> InterpResult<Value> {
        match expr {
            Expression::Integer(n) => Ok(Value::Integer(*n)),
            Expression::Boolean(b) => Ok(Value::from(*b)),
            Expression::Str(s) => Ok(Value::from(s.as_str())),

            Expression::Identifier(ident) => {
                let name = ident.name();
                if let Some(value) = env.borrow().get(name) {
                    return Ok(value);
                }
                builtins::lookup(name)
                    .map(Value::Builtin)
                    .ok_or_else(|| RuntimeError::unknown_identifier(name))
            }

            Expression::Prefix { op, right } => {
                let right = self.eval(right, env)?;
                eval_prefix(*op, right)
            }

            Expression::Infix { left, op, right } => {
                let left = self.eval(left, env)?;
                let right = self.eval(right, env)?;
                eval_infix(*op, left, right)
            }

            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                if self.eval(condition, env)?.is_truthy() {
                    self.eval(consequence, env)
                } else if let Some(alt) = alternative {
                    self.eval(alt, env)
                } else {
                    Ok(NULL)
                }
            }

            Expression::Block(block) => {
                let scope = child_env(env);
                self.eval_statements(&block.statements, &scope)
            }

            Expression::Function(literal) => Ok(Value::Function(Rc::new(Closure {
                literal: Rc::clone(literal),
                env: Rc::clone(env),
            }))),

            Expression::Call {
                function,
                arguments,
            } => {
                let callee = self.eval(function, env)?;
                let args = arguments
                    .iter()
                    .map(|arg| self.eval(arg, env))
                    .collect::<InterpResult<Vec<_>>>()?;
                self.apply_function(&callee, &args)
            }
        }
    }

    fn apply_function(&self, callee: &Value, args: &[Value]) -> InterpResult<Value> {
        match callee {
            Value::Function(closure) => {
                let params = &closure.literal.params;
                if params.len() != args.len() {
                    return Err(RuntimeError::wrong_argument_count(args.len(), params.len()));
                }

                let call_env = child_env(&closure.env);
                {
                    let mut scope = call_env.borrow_mut();
                    for (param, arg) in params.iter().zip(args) {
                        scope.define(param.name(), arg.clone());
                    }
                }

                tracing::trace!(function = %closure.literal, argc = args.len(), "apply");
                unwrap_return(self.eval(&closure.literal.body, &call_env))
            }
            Value::Builtin(builtin) => {
                tracing::trace!(builtin = builtin.name, argc = args.len(), "apply builtin");
                builtin.call(args)
            }
            other => Err(RuntimeError::not_a_function(other.type_name())),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn eval_prefix(op: PrefixOp, right: Value) -> InterpResult<Value> {
    match op {
        PrefixOp::Not => Ok(match right {
            Value::Boolean(b) => Value::from(!b),
            Value::Null => TRUE,
            _ => FALSE,
        }),
        PrefixOp::Neg => match right {
            Value::Integer(n) => Ok(Value::Integer(n.wrapping_neg())),
            other => Err(RuntimeError::unknown_prefix_operator(op, other.type_name())),
        },
    }
}

fn eval_infix(op: InfixOp, left: Value, right: Value) -> InterpResult<Value> {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(op, *l, *r),
        (Value::Str(l), Value::Str(r)) => match op {
            InfixOp::Add => Ok(Value::from(format!("{l}{r}"))),
            _ => Err(RuntimeError::unknown_infix_operator("STRING", op, "STRING")),
        },
        _ if left.type_name() != right.type_name() => Err(RuntimeError::type_mismatch(
            left.type_name(),
            op,
            right.type_name(),
        )),
        _ => match op {
            InfixOp::Eq => Ok(Value::from(left.same_as(&right))),
            InfixOp::Ne => Ok(Value::from(!left.same_as(&right))),
            _ => Err(RuntimeError::unknown_infix_operator(
                left.type_name(),
                op,
                right.type_name(),
            )),
        },
    }
}

fn eval_integer_infix(op: InfixOp, l: i64, r: i64) -> InterpResult<Value> {
    let value = match op {
        InfixOp::Add => Value::Integer(l.wrapping_add(r)),
        InfixOp::Sub => Value::Integer(l.wrapping_sub(r)),
        InfixOp::Mul => Value::Integer(l.wrapping_mul(r)),
        InfixOp::Div => {
            if r == 0 {
                return Err(RuntimeError::division_by_zero());
            }
            Value::Integer(l.wrapping_div(r))
        }
        InfixOp::Eq => Value::from(l == r),
        InfixOp::Ne => Value::from(l != r),
        InfixOp::Lt => Value::from(l < r),
        InfixOp::Gt => Value::from(l > r),
        InfixOp::Le => Value::from(l <= r),
        InfixOp::Ge => Value::from(l >= r),
    };
    Ok(value)
}
