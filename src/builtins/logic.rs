//! C-style integer logic: &&, ||, !
//!
//! These accept only `Integer` operands (0 is false, anything else true)
//! and return an `Integer` 0 or 1 — not `Boolean` (`lithpy.c`'s
//! `builtin_and`/`_or`/`_not` all assert `LVAL_NUM`). A surprising
//! asymmetry with `> < >= <=` returning `Boolean`, preserved exactly.

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

/// `(&& a b)` — non-short-circuiting: both arguments are already evaluated
/// by the time a builtin runs (spec.md §4.3's uniform reduction), so there
/// is nothing to short-circuit here, unlike a special-form `and`.
pub fn builtin_and(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 2 {
        return Err(LispError::arity_mismatch("&&", 2, args.len()));
    }
    let a = require_integer("&&", &args[0], 0)?;
    let b = require_integer("&&", &args[1], 1)?;
    Ok(Value::Integer((a != 0 && b != 0) as i64))
}

pub fn builtin_or(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 2 {
        return Err(LispError::arity_mismatch("||", 2, args.len()));
    }
    let a = require_integer("||", &args[0], 0)?;
    let b = require_integer("||", &args[1], 1)?;
    Ok(Value::Integer((a != 0 || b != 0) as i64))
}

pub fn builtin_not(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 1 {
        return Err(LispError::arity_mismatch("!", 1, args.len()));
    }
    let a = require_integer("!", &args[0], 0)?;
    Ok(Value::Integer(if a != 0 { 0 } else { 1 }))
}

pub fn register(env: &Rc<Environment>) {
    let entries: &[(&'static str, crate::value::BuiltinFn)] = &[
        ("||", builtin_or),
        ("&&", builtin_and),
        ("!", builtin_not),
    ];
    for (name, func) in entries {
        env.put(name, Value::Function(Function::Builtin(Builtin { name, func: *func })));
    }
}
