//! Ordering, equality, and conditional: >, <, >=, <=, ==, !=, if
//!
//! Ordering operators require two `Integer` operands (the source's
//! `LASSERT_TYPE(op, a, 0, LVAL_NUM)` — `Decimal` is rejected, a
//! surprising restriction preserved exactly, not generalized). `==`/`!=`
//! work across any value kind via structural equality.

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Builtin, Function, Value};
use std::rc::Rc;

fn require_integer(func: &'static str, v: &Value, position: usize) -> Result<i64, LispError> {
    match v {
        Value::Integer(n) => Ok(*n),
        other => Err(LispError::type_mismatch(func, "Number", other.type_name(), position)),
    }
}

fn builtin_ord(_env: &Rc<Environment>, args: Vec<Value>, op: &'static str) -> Result<Value, LispError> {
    if args.len() != 2 {
        return Err(LispError::arity_mismatch(op, 2, args.len()));
    }
    let a = require_integer(op, &args[0], 0)?;
    let b = require_integer(op, &args[1], 1)?;
    let result = match op {
        ">" => a > b,
        "<" => a < b,
        ">=" => a >= b,
        "<=" => a <= b,
        _ => unreachable!("op set is fixed"),
    };
    Ok(Value::Boolean(result))
}

pub fn builtin_gt(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_ord(env, args, ">")
}
pub fn builtin_lt(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_ord(env, args, "<")
}
pub fn builtin_ge(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_ord(env, args, ">=")
}
pub fn builtin_le(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_ord(env, args, "<=")
}

/// `(== a b)` — structural equality across any value kind.
pub fn builtin_eq(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 2 {
        return Err(LispError::arity_mismatch("==", 2, args.len()));
    }
    Ok(Value::Boolean(args[0].deep_eq(&args[1])))
}

/// `(!= a b)` — the literal negation of `==`, not an independent comparison.
pub fn builtin_ne(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 2 {
        return Err(LispError::arity_mismatch("!=", 2, args.len()));
    }
    Ok(Value::Boolean(!args[0].deep_eq(&args[1])))
}

/// `(if cond {then} {else})` — `cond` is a truth value; the chosen branch
/// is reinterpreted as an `SExpr` and evaluated in the calling environment.
///
/// `cond` accepts both `Integer` (0/non-zero, the original C source's only
/// notion of truth) and `Boolean` (since `==`/`>` and friends yield
/// `Boolean`, and both spec.md's own `if (> 3 2) ...` scenario and the
/// stdlib's `map`/`filter` (`if (== l {}) ...`) rely on `if` accepting the
/// comparison operators' result directly).
pub fn builtin_if(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 3 {
        return Err(LispError::arity_mismatch("if", 3, args.len()));
    }
    let else_branch = args.pop().unwrap();
    let then_branch = args.pop().unwrap();
    let cond = args.pop().unwrap();

    let truthy = match cond {
        Value::Integer(n) => n != 0,
        Value::Boolean(b) => b,
        other => return Err(LispError::type_mismatch("if", "Number", other.type_name(), 0)),
    };
    let chosen = if truthy { then_branch } else { else_branch };
    let body = match chosen {
        Value::QExpr(items) => items,
        other => return Err(LispError::type_mismatch("if", "Q-Expression", other.type_name(), 1)),
    };

    Ok(crate::eval::eval(env, Value::SExpr(body)))
}

pub fn register(env: &Rc<Environment>) {
    let entries: &[(&'static str, crate::value::BuiltinFn)] = &[
        ("if", builtin_if),
        ("==", builtin_eq),
        ("!=", builtin_ne),
        (">", builtin_gt),
        ("<", builtin_lt),
        (">=", builtin_ge),
        ("<=", builtin_le),
    ];
    for (name, func) in entries {
        env.put(name, Value::Function(Function::Builtin(Builtin { name, func: *func })));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_requires_integer_not_decimal() {
        let env = Environment::new();
        let result = builtin_gt(&env, vec![Value::Decimal(1.0), Value::Integer(0)]);
        assert!(matches!(result, Err(LispError::TypeMismatch { .. })));
    }

    #[test]
    fn ordering_compares_integers() {
        let env = Environment::new();
        let result = builtin_gt(&env, vec![Value::Integer(3), Value::Integer(2)]).unwrap();
        assert!(matches!(result, Value::Boolean(true)));
    }

    #[test]
    fn eq_is_structural() {
        let env = Environment::new();
        let a = Value::QExpr(vec![Value::Integer(1)]);
        let b = Value::QExpr(vec![Value::Integer(1)]);
        let result = builtin_eq(&env, vec![a, b]).unwrap();
        assert!(matches!(result, Value::Boolean(true)));
    }

    #[test]
    fn ne_is_negation_of_eq() {
        let env = Environment::new();
        let result = builtin_ne(&env, vec![Value::Integer(1), Value::Integer(1)]).unwrap();
        assert!(matches!(result, Value::Boolean(false)));
    }

    #[test]
    fn if_picks_then_branch_on_nonzero() {
        let env = Environment::new();
        let result = builtin_if(
            &env,
            vec![
                Value::Integer(1),
                Value::QExpr(vec![Value::Integer(100)]),
                Value::QExpr(vec![Value::Integer(200)]),
            ],
        )
        .unwrap();
        assert!(matches!(result, Value::Integer(100)));
    }

    #[test]
    fn if_picks_else_branch_on_zero() {
        let env = Environment::new();
        let result = builtin_if(
            &env,
            vec![
                Value::Integer(0),
                Value::QExpr(vec![Value::Integer(100)]),
                Value::QExpr(vec![Value::Integer(200)]),
            ],
        )
        .unwrap();
        assert!(matches!(result, Value::Integer(200)));
    }

    #[test]
    fn if_accepts_boolean_condition_from_comparisons() {
        let env = Environment::new();
        let result = builtin_if(
            &env,
            vec![
                Value::Boolean(true),
                Value::QExpr(vec![Value::Integer(100)]),
                Value::QExpr(vec![Value::Integer(200)]),
            ],
        )
        .unwrap();
        assert!(matches!(result, Value::Integer(100)));
    }

    #[test]
    fn if_rejects_non_truthy_condition_type() {
        let env = Environment::new();
        let result = builtin_if(
            &env,
            vec![Value::String("x".into()), Value::QExpr(vec![]), Value::QExpr(vec![])],
        );
        assert!(matches!(result, Err(LispError::TypeMismatch { .. })));
    }
}
