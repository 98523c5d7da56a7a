//! Q-Expression operations: list, head, tail, eval, join, cons, len, init
//!
//! `QExpr` is lithpy's inert list type — these builtins are the only way
//! to inspect or rebuild one; `eval` is the sole bridge back into
//! evaluation.

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Builtin, Function, Value};
use std::rc::Rc;

/// `(list a b c)` — converts its own already-evaluated arguments into a
/// `QExpr` verbatim (the source's `a->type = LVAL_QEXPR` in-place retag).
pub fn builtin_list(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    Ok(Value::QExpr(args))
}

/// `(head {a b c})` — the `QExpr` containing only its first element.
pub fn builtin_head(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 1 {
        return Err(LispError::arity_mismatch("head", 1, args.len()));
    }
    match args.pop().unwrap() {
        Value::QExpr(items) if items.is_empty() => Err(LispError::empty_argument("head", 0)),
        Value::QExpr(mut items) => {
            items.truncate(1);
            Ok(Value::QExpr(items))
        }
        other => Err(LispError::type_mismatch("head", "Q-Expression", other.type_name(), 0)),
    }
}

/// `(tail {a b c})` — the `QExpr` with its first element removed.
pub fn builtin_tail(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 1 {
        return Err(LispError::arity_mismatch("tail", 1, args.len()));
    }
    match args.pop().unwrap() {
        Value::QExpr(items) if items.is_empty() => Err(LispError::empty_argument("tail", 0)),
        Value::QExpr(mut items) => {
            items.remove(0);
            Ok(Value::QExpr(items))
        }
        other => Err(LispError::type_mismatch("tail", "Q-Expression", other.type_name(), 0)),
    }
}

/// `(eval {+ 1 2})` — reinterprets a `QExpr` as an `SExpr` and evaluates it.
pub fn builtin_eval(env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 1 {
        return Err(LispError::arity_mismatch("eval", 1, args.len()));
    }
    match args.pop().unwrap() {
        Value::QExpr(items) => Ok(crate::eval::eval(env, Value::SExpr(items))),
        other => Err(LispError::type_mismatch("eval", "Q-Expression", other.type_name(), 0)),
    }
}

/// `(join {1 2} {3 4})` — concatenates any number of `QExpr`s in order.
pub fn builtin_join(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    let mut joined = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        match arg {
            Value::QExpr(items) => joined.extend(items),
            other => return Err(LispError::type_mismatch("join", "Q-Expression", other.type_name(), i)),
        }
    }
    Ok(Value::QExpr(joined))
}

/// `(cons 1 {2 3})` — prepends a value onto a `QExpr`.
pub fn builtin_cons(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 2 {
        return Err(LispError::arity_mismatch("cons", 2, args.len()));
    }
    let list = args.pop().unwrap();
    let value = args.pop().unwrap();
    match list {
        Value::QExpr(mut items) => {
            items.insert(0, value);
            Ok(Value::QExpr(items))
        }
        other => Err(LispError::type_mismatch("cons", "Q-Expression", other.type_name(), 1)),
    }
}

/// `(len {1 2 3})` — element count of a non-empty `QExpr`.
pub fn builtin_len(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 1 {
        return Err(LispError::arity_mismatch("len", 1, args.len()));
    }
    match args.pop().unwrap() {
        Value::QExpr(items) if items.is_empty() => Err(LispError::empty_argument("len", 0)),
        Value::QExpr(items) => Ok(Value::Integer(items.len() as i64)),
        other => Err(LispError::type_mismatch("len", "Q-Expression", other.type_name(), 0)),
    }
}

/// `(init {1 2 3})` — every element but the last.
pub fn builtin_init(_env: &Rc<Environment>, mut args: Vec<Value>) -> Result<Value, LispError> {
    if args.len() != 1 {
        return Err(LispError::arity_mismatch("init", 1, args.len()));
    }
    match args.pop().unwrap() {
        Value::QExpr(mut items) => {
            items.pop();
            Ok(Value::QExpr(items))
        }
        other => Err(LispError::type_mismatch("init", "Q-Expression", other.type_name(), 0)),
    }
}

pub fn register(env: &Rc<Environment>) {
    let entries: &[(&'static str, crate::value::BuiltinFn)] = &[
        ("list", builtin_list),
        ("head", builtin_head),
        ("tail", builtin_tail),
        ("eval", builtin_eval),
        ("join", builtin_join),
        ("cons", builtin_cons),
        ("len", builtin_len),
        ("init", builtin_init),
    ];
    for (name, func) in entries {
        env.put(name, Value::Function(Function::Builtin(Builtin { name, func: *func })));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_wraps_args_as_qexpr() {
        let env = Environment::new();
        let result = builtin_list(&env, vec![Value::Integer(1), Value::Integer(2)]).unwrap();
        assert!(matches!(result, Value::QExpr(items) if items.len() == 2));
    }

    #[test]
    fn head_keeps_only_first_element() {
        let env = Environment::new();
        let result = builtin_head(&env, vec![Value::QExpr(vec![Value::Integer(1), Value::Integer(2)])]).unwrap();
        assert!(matches!(result, Value::QExpr(items) if items.len() == 1));
    }

    #[test]
    fn head_of_empty_errors() {
        let env = Environment::new();
        let result = builtin_head(&env, vec![Value::QExpr(vec![])]);
        assert!(matches!(result, Err(LispError::EmptyArgument { .. })));
    }

    #[test]
    fn tail_drops_first_element() {
        let env = Environment::new();
        let result = builtin_tail(&env, vec![Value::QExpr(vec![Value::Integer(1), Value::Integer(2)])]).unwrap();
        match result {
            Value::QExpr(items) => assert!(matches!(items[0], Value::Integer(2))),
            other => panic!("expected QExpr, got {:?}", other),
        }
    }

    #[test]
    fn eval_reinterprets_qexpr_as_call() {
        let env = Environment::new();
        env.put(
            "+",
            Value::Function(Function::Builtin(Builtin {
                name: "+",
                func: |_e, args| {
                    let sum: i64 = args.iter().map(|v| if let Value::Integer(n) = v { *n } else { 0 }).sum();
                    Ok(Value::Integer(sum))
                },
            })),
        );
        let result = builtin_eval(
            &env,
            vec![Value::QExpr(vec![Value::Symbol("+".into()), Value::Integer(1), Value::Integer(2)])],
        )
        .unwrap();
        assert!(matches!(result, Value::Integer(3)));
    }

    #[test]
    fn join_concatenates_in_order() {
        let env = Environment::new();
        let result = builtin_join(
            &env,
            vec![Value::QExpr(vec![Value::Integer(1)]), Value::QExpr(vec![Value::Integer(2)])],
        )
        .unwrap();
        assert!(matches!(result, Value::QExpr(items) if items.len() == 2));
    }

    #[test]
    fn cons_prepends() {
        let env = Environment::new();
        let result = builtin_cons(&env, vec![Value::Integer(0), Value::QExpr(vec![Value::Integer(1)])]).unwrap();
        match result {
            Value::QExpr(items) => assert!(matches!(items[0], Value::Integer(0))),
            other => panic!("expected QExpr, got {:?}", other),
        }
    }

    #[test]
    fn len_counts_elements() {
        let env = Environment::new();
        let result = builtin_len(&env, vec![Value::QExpr(vec![Value::Integer(1), Value::Integer(2)])]).unwrap();
        assert!(matches!(result, Value::Integer(2)));
    }

    #[test]
    fn init_drops_last_element() {
        let env = Environment::new();
        let result = builtin_init(&env, vec![Value::QExpr(vec![Value::Integer(1), Value::Integer(2)])]).unwrap();
        assert!(matches!(result, Value::QExpr(items) if items.len() == 1));
    }
}
