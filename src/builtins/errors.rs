//! Error construction, file loading, and process exit: error, load, exit

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Builtin, Function, Value};
use std::rc::Rc;

/// `(error "message")` — always produces an `Error` value; the string is
/// used verbatim, never as a format string (spec.md §9's format-string
/// note).
pub fn builtin_error(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 1 {
        return Err(LispError::arity_mismatch("error", 1, args.len()));
    }
    match args.pop().unwrap() {
        Value::String(msg) => Ok(Value::Error(msg)),
        other => Err(LispError::type_mismatch("error", "String", other.type_name(), 0)),
    }
}

/// `(load "path.lspy")` — parses the named file, evaluates each top-level
/// form in `env` in turn, printing any `Error` result, and returns an
/// empty `SExpr`. A parse failure returns an `Error` wrapping the parser's
/// message instead of evaluating anything.
pub fn builtin_load(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 1 {
        return Err(LispError::arity_mismatch("load", 1, args.len()));
    }
    let path = match args.pop().unwrap() {
        Value::String(s) => s,
        other => return Err(LispError::type_mismatch("load", "String", other.type_name(), 0)),
    };

    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => return Err(LispError::LoadFailed(e.to_string())),
    };

    let forms = match crate::reader::read_source(&contents) {
        Ok(forms) => forms,
        Err(parse_err) => return Err(LispError::LoadFailed(parse_err)),
    };

    for form in forms {
        let result = crate::eval::eval(env, form);
        if let Value::Error(_) = &result {
            println!("{}", result);
        }
    }

    Ok(Value::SExpr(Vec::new()))
}

/// `(exit)` — terminates the process immediately with status 0.
pub fn builtin_exit(_env: &Rc<Environment>, _args: Vec<Value>) -> Result<Value, LispError> {
    std::process::exit(0);
}

pub fn register(env: &Rc<Environment>) {
    let entries: &[(&'static str, crate::value::BuiltinFn)] = &[
        ("error", builtin_error),
        ("load", builtin_load),
        ("exit", builtin_exit),
    ];
    for (name, func) in entries {
        env.put(name, Value::Function(Function::Builtin(Builtin { name, func: *func })));
    }
}
