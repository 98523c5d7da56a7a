// ABOUTME: Evaluator implementing the s-expression reduction loop and call protocol

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Function, Lambda, Value};
use std::rc::Rc;

/// Evaluates one value in `env`. Symbols resolve to their bound value;
/// s-expressions reduce via [`eval_sexpr`]; everything else (numbers,
/// strings, booleans, q-expressions, functions) evaluates to itself.
pub fn eval(env: &Rc<Environment>, value: Value) -> Value {
    match value {
        Value::Symbol(name) => match env.get(&name) {
            Ok(v) => v,
            Err(e) => Value::Error(e.to_string()),
        },
        Value::SExpr(items) => eval_sexpr(env, items),
        other => other,
    }
}

/// Evaluates every child, short-circuits on the first `Error` among them,
/// then dispatches: an empty result is returned as-is, a single-element
/// result is evaluated a second time (matching the source's
/// `lval_eval(e, lval_take(v, 0))` — already-evaluated data like numbers
/// and strings re-evaluate to themselves, so this is only observable when
/// the sole element evaluates to a function or an unevaluated symbol);
/// otherwise the first child must be a `Function`, and the rest are its
/// arguments.
fn eval_sexpr(env: &Rc<Environment>, items: Vec<Value>) -> Value {
    let evaluated: Vec<Value> = items.into_iter().map(|v| eval(env, v)).collect();

    if let Some(err) = evaluated.iter().find(|v| v.is_error()) {
        return err.clone();
    }

    let mut evaluated = evaluated;
    match evaluated.len() {
        0 => Value::SExpr(evaluated),
        1 => eval(env, evaluated.pop().unwrap()),
        _ => {
            let head = evaluated.remove(0);
            match head {
                Value::Function(f) => call(env, f, evaluated),
                other => Value::Error(format!(
                    "S-Expression starts with incorrect type. Got {}, Expected Function.",
                    other.type_name()
                )),
            }
        }
    }
}

/// Applies a function to already-evaluated arguments (spec.md §4.4).
///
/// A `Builtin` just runs with direct access to the calling environment. A
/// `Lambda` binds formals one at a time into its own (already independent,
/// deep-copied) frame; `&rest` collects any remaining arguments into a
/// `QExpr`. Once every formal is bound, the lambda's frame parent is
/// rewired to the caller's environment and the body evaluates there;
/// otherwise the partially-applied lambda (with its now-shorter formals
/// list) is returned as a value, ready to be called again.
pub fn call(env: &Rc<Environment>, f: Function, args: Vec<Value>) -> Value {
    match f {
        Function::Builtin(b) => match (b.func)(env, args) {
            Ok(v) => v,
            Err(e) => Value::Error(e.to_string()),
        },
        Function::Lambda(lambda) => call_lambda(env, lambda, args),
    }
}

fn call_lambda(env: &Rc<Environment>, mut lambda: Lambda, mut args: Vec<Value>) -> Value {
    let given = args.len();
    let total = lambda.formals.len();

    while !args.is_empty() {
        if lambda.formals.is_empty() {
            return Value::Error(
                LispError::TooManyArguments { actual: given, expected: total }.to_string(),
            );
        }

        let formal = lambda.formals.remove(0);
        let formal_name = match &formal {
            Value::Symbol(s) => s.clone(),
            other => {
                return Value::Error(
                    LispError::NonSymbolLambdaFormal { actual: other.type_name() }.to_string(),
                )
            }
        };

        if formal_name == "&" {
            if lambda.formals.len() != 1 {
                return Value::Error(LispError::AmpersandMisuse.to_string());
            }
            let rest_name = match &lambda.formals[0] {
                Value::Symbol(s) => s.clone(),
                other => {
                    return Value::Error(
                        LispError::NonSymbolLambdaFormal { actual: other.type_name() }.to_string(),
                    )
                }
            };
            lambda.env.put(&rest_name, Value::QExpr(args));
            lambda.formals.clear();
            args = Vec::new();
            break;
        }

        let val = args.remove(0);
        lambda.env.put(&formal_name, val);
    }

    if let Some(Value::Symbol(s)) = lambda.formals.first() {
        if s == "&" {
            if lambda.formals.len() != 2 {
                return Value::Error(LispError::AmpersandMisuse.to_string());
            }
            lambda.formals.remove(0);
            let rest_name = match lambda.formals.remove(0) {
                Value::Symbol(s) => s,
                _ => unreachable!("checked above"),
            };
            lambda.env.put(&rest_name, Value::QExpr(Vec::new()));
        }
    }

    if lambda.formals.is_empty() {
        lambda.env.set_parent(Rc::clone(env));
        eval(&lambda.env, Value::SExpr(lambda.body.clone()))
    } else {
        Value::Function(Function::Lambda(lambda))
    }
}
