//! Numeric operations: +, -, *, /, %, ^ and their textual aliases, min, max
//!
//! Any operand keeps `Integer` status as long as every operand so far is
//! `Integer`; the moment a `Decimal` appears, the whole reduction step
//! promotes to `f64` and stays promoted (`lithpy.c`'s `builtin_op`: the
//! int/int fast path and the cast-to-double path are mutually exclusive
//! per pairwise step). The int/int branch has no `min`/`max` case in the
//! original, so on two `Integer` operands it just leaves the accumulator
//! unchanged — `(min 1 2)` returns the *left* operand `1`, not a computed
//! minimum. `min`/`max` only actually compare once a `Decimal` operand
//! forces promotion; a faithful quirk of the original, not a bug.

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Builtin, Function, Value};
use std::rc::Rc;

fn as_f64(v: &Value) -> f64 {
    match v {
        Value::Integer(n) => *n as f64,
        Value::Decimal(n) => *n,
        _ => unreachable!("checked by caller"),
    }
}

/// Reduces `args` left to right under `op`, matching `builtin_op`'s
/// pairwise int-or-double dispatch. Unary `-` negates.
fn builtin_op(_env: &Rc<Environment>, args: Vec<Value>, op: &'static str) -> Result<Value, LispError> {
    for arg in &args {
        if !arg.is_number() {
            return Err(LispError::NonNumberOperand);
        }
    }

    let mut iter = args.into_iter();
    let x = iter.next().unwrap_or(Value::Integer(0));
    let rest: Vec<Value> = iter.collect();

    if op == "-" && rest.is_empty() {
        return Ok(match x {
            Value::Integer(n) => Value::Integer(-n),
            Value::Decimal(n) => Value::Decimal(-n),
            other => other,
        });
    }

    let mut x = x;
    for y in rest {
        x = match (&x, &y) {
            (Value::Integer(a), Value::Integer(b)) => {
                let (a, b) = (*a, *b);
                match op {
                    "+" => Value::Integer(a + b),
                    "-" => Value::Integer(a - b),
                    "*" => Value::Integer(a * b),
                    "/" => {
                        if b == 0 {
                            return Err(LispError::DivisionByZeroInteger);
                        }
                        Value::Integer(a / b)
                    }
                    "%" => Value::Integer(a % b),
                    "^" => Value::Integer(((a as f64).powf(b as f64)) as i32 as i64),
                    // no int/int case in the original; the accumulator is left as-is
                    "min" | "max" => Value::Integer(a),
                    _ => unreachable!("op set is fixed"),
                }
            }
            _ => {
                let (b, c) = (as_f64(&x), as_f64(&y));
                let result = match op {
                    "+" => b + c,
                    "-" => b - c,
                    "*" => b * c,
                    "/" => {
                        if c == 0.0 {
                            return Err(LispError::DivisionByZeroDecimal);
                        }
                        b / c
                    }
                    "%" => b % c,
                    "^" => b.powf(c),
                    "min" => b.min(c),
                    "max" => b.max(c),
                    _ => unreachable!("op set is fixed"),
                };
                Value::Decimal(result)
            }
        };
    }

    Ok(x)
}

pub fn builtin_add(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_op(env, args, "+")
}
pub fn builtin_sub(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_op(env, args, "-")
}
pub fn builtin_mul(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_op(env, args, "*")
}
pub fn builtin_div(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_op(env, args, "/")
}
pub fn builtin_rem(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_op(env, args, "%")
}
pub fn builtin_pow(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_op(env, args, "^")
}
pub fn builtin_min(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_op(env, args, "min")
}
pub fn builtin_max(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_op(env, args, "max")
}

pub fn register(env: &Rc<Environment>) {
    let entries: &[(&'static str, crate::value::BuiltinFn)] = &[
        ("+", builtin_add),
        ("-", builtin_sub),
        ("*", builtin_mul),
        ("/", builtin_div),
        ("add", builtin_add),
        ("sub", builtin_sub),
        ("mul", builtin_mul),
        ("div", builtin_div),
        ("min", builtin_min),
        ("max", builtin_max),
        ("%", builtin_rem),
        ("rem", builtin_rem),
        ("^", builtin_pow),
        ("pow", builtin_pow),
    ];
    for (name, func) in entries {
        env.put(name, Value::Function(Function::Builtin(Builtin { name, func: *func })));
    }
}
