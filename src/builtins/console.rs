//! Console output: print
//!
//! `(print a b c)` writes each argument followed by a space, then a
//! trailing newline, and returns an empty `SExpr` (`lithpy.c`'s
//! `builtin_print`).

use crate::env::Environment;
use crate::error::LispError;
use crate::value::{Builtin, Function, Value};
use std::rc::Rc;

pub fn builtin_print(_env: &Rc<Environment>, args: Vec<Value>) -> Result<Value, LispError> {
    for arg in &args {
        print!("{} ", arg);
    }
    println!();
    Ok(Value::SExpr(Vec::new()))
}

pub fn register(env: &Rc<Environment>) {
    env.put(
        "print",
        Value::Function(Function::Builtin(Builtin { name: "print", func: builtin_print })),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_returns_empty_sexpr() {
        let env = Environment::new();
        let result = builtin_print(&env, vec![Value::Integer(1)]).unwrap();
        assert!(matches!(result, Value::SExpr(items) if items.is_empty()));
    }
}
