//! Binding forms: `\`, `def`, `=`, `fun`, `locals`
//!
//! These need the calling environment directly rather than just their
//! argument list, since they bind symbols into it (spec.md §4.4).

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Builtin, Function, Lambda, Value};
use std::rc::Rc;

/// `(\ {formals} {body})` — builds a lambda closing over the calling
/// environment. Every formal must be a bare `Symbol` (the `&` rest marker
/// included).
pub fn builtin_lambda(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 2 {
        return Err(LispError::arity_mismatch("\\", 2, args.len()));
    }
    let body = args.pop().unwrap();
    let formals = args.pop().unwrap();

    let (formals, body) = match (formals, body) {
        (Value::QExpr(f), Value::QExpr(b)) => (f, b),
        (Value::QExpr(_), other) => {
            return Err(LispError::type_mismatch("\\", "Q-Expression", other.type_name(), 1))
        }
        (other, _) => return Err(LispError::type_mismatch("\\", "Q-Expression", other.type_name(), 0)),
    };

    for formal in &formals {
        if !matches!(formal, Value::Symbol(_)) {
            return Err(LispError::NonSymbolLambdaFormal { actual: formal.type_name() });
        }
    }

    Ok(Value::Function(Function::Lambda(Lambda {
        formals,
        body,
        env: Environment::with_parent(Rc::clone(env)),
    })))
}

fn builtin_var(env: &Rc<Environment>, mut args: Vec<Value>, func: &'static str) -> Result<Value, LispError> {
    if args.is_empty() {
        return Err(LispError::type_mismatch(func, "Q-Expression", "nothing", 0));
    }
    let syms_val = args.remove(0);
    let syms = match syms_val {
        Value::QExpr(items) => items,
        other => return Err(LispError::type_mismatch(func, "Q-Expression", other.type_name(), 0)),
    };

    for sym in &syms {
        if !matches!(sym, Value::Symbol(_)) {
            return Err(LispError::non_symbol_formal(func, sym.type_name()));
        }
    }

    if syms.len() != args.len() {
        return Err(LispError::TooManySymbolArguments {
            function: func.to_string(),
            actual: syms.len(),
            expected: args.len(),
        });
    }

    for (sym, value) in syms.into_iter().zip(args.into_iter()) {
        if let Value::Symbol(name) = sym {
            if func == "def" {
                env.def(&name, value);
            } else {
                env.put(&name, value);
            }
        }
    }

    Ok(Value::SExpr(Vec::new()))
}

/// `(def {sym...} val...)` — binds at the root of the environment chain.
pub fn builtin_def(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_var(env, args, "def")
}

/// `(= {sym...} val...)` — binds in the current frame only.
pub fn builtin_put(env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    builtin_var(env, args, "=")
}

/// `(fun {name formals...} {body})` — sugar combining `\` and `def`.
pub fn builtin_fun(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 2 {
        return Err(LispError::arity_mismatch("fun", 2, args.len()));
    }
    let body = args.pop().unwrap();
    let header = args.pop().unwrap();

    let mut header = match header {
        Value::QExpr(items) => items,
        other => return Err(LispError::type_mismatch("fun", "Q-Expression", other.type_name(), 0)),
    };
    let body = match body {
        Value::QExpr(items) => items,
        other => return Err(LispError::type_mismatch("fun", "Q-Expression", other.type_name(), 1)),
    };
    if header.is_empty() {
        return Err(LispError::empty_argument("fun", 0));
    }

    let name = header.remove(0);
    let name = match name {
        Value::Symbol(s) => s,
        other => return Err(LispError::non_symbol_formal("fun", other.type_name())),
    };

    for formal in &header {
        if !matches!(formal, Value::Symbol(_)) {
            return Err(LispError::NonSymbolLambdaFormal { actual: formal.type_name() });
        }
    }

    let lambda = Value::Function(Function::Lambda(Lambda {
        formals: header,
        body,
        env: Environment::with_parent(Rc::clone(env)),
    }));
    env.def(&name, lambda);
    Ok(Value::SExpr(Vec::new()))
}

/// `(locals)` — a Q-Expression of `{symbol value}` pairs for the calling
/// frame's own bindings, in definition order.
pub fn builtin_locals(env: &Rc<Environment>, _args: Vec<Value>) -> Result<Value, LispError> {
    let pairs = env
        .own_bindings()
        .into_iter()
        .map(|(name, value)| Value::QExpr(vec![Value::Symbol(name), value]))
        .collect();
    Ok(Value::QExpr(pairs))
}

pub fn register(env: &Rc<Environment>) {
    let entries: &[(&'static str, crate::value::BuiltinFn)] = &[
        ("\\", builtin_lambda),
        ("def", builtin_def),
        ("=", builtin_put),
        ("fun", builtin_fun),
        ("locals", builtin_locals),
    ];
    for (name, func) in entries {
        env.put(name, Value::Function(Function::Builtin(Builtin { name, func: *func })));
    }
}
