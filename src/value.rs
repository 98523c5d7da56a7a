// ABOUTME: Value types representing lithpy data: atoms, expressions, and functions

use crate::env::Environment;
use std::fmt;
use std::rc::Rc;

/// A builtin's host handle. Two builtins are equal iff they share the same
/// function pointer (`lval_eq`'s `x->builtin == y->builtin` in the source).
pub type BuiltinFn = fn(&Rc<Environment>, Vec<Value>) -> Result<Value, crate::error::LispError>;

/// A lambda's formals and body, plus the environment it closes over.
///
/// `formals` holds the raw (possibly `&`-rest) symbol list exactly as typed;
/// the call protocol in `eval::call` interprets `&` while consuming it.
#[derive(Debug)]
pub struct Lambda {
    pub formals: Vec<Value>,
    pub body: Vec<Value>,
    pub env: Rc<Environment>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

#[derive(Debug)]
pub enum Function {
    Builtin(Builtin),
    Lambda(Lambda),
}

#[derive(Debug)]
pub enum Value {
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Symbol(String),
    String(String),
    Error(String),
    SExpr(Vec<Value>),
    QExpr(Vec<Value>),
    Function(Function),
}

impl Value {
    /// Name used in type-mismatch error messages (`ltype_name` in the source).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Number",
            Value::Decimal(_) => "Number",
            Value::Boolean(_) => "Boolean",
            Value::Symbol(_) => "Symbol",
            Value::String(_) => "String",
            Value::Error(_) => "Error",
            Value::SExpr(_) => "S-Expression",
            Value::QExpr(_) => "Q-Expression",
            Value::Function(_) => "Function",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Decimal(_))
    }

    /// Structural equality across all value kinds (`lval_eq` in the source).
    pub fn deep_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::SExpr(a), Value::SExpr(b)) | (Value::QExpr(a), Value::QExpr(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.deep_eq(y))
            }
            (Value::Function(Function::Builtin(a)), Value::Function(Function::Builtin(b))) => {
                a.func as usize == b.func as usize
            }
            (Value::Function(Function::Lambda(a)), Value::Function(Function::Lambda(b))) => {
                a.formals.len() == b.formals.len()
                    && a.formals
                        .iter()
                        .zip(b.formals.iter())
                        .all(|(x, y)| x.deep_eq(y))
                    && a.body.len() == b.body.len()
                    && a.body.iter().zip(b.body.iter()).all(|(x, y)| x.deep_eq(y))
            }
            _ => false,
        }
    }
}

impl Clone for Value {
    /// Every value owns its contents; cloning always performs a deep copy so
    /// no two live values share mutable substructure (invariant 1). The one
    /// exception is `Lambda::env`'s *parent* link, which is shared by design
    /// (global `def` must stay visible through every closure's parent chain)
    /// — only the frame's own bindings are freshly allocated.
    fn clone(&self) -> Self {
        match self {
            Value::Integer(n) => Value::Integer(*n),
            Value::Decimal(n) => Value::Decimal(*n),
            Value::Boolean(b) => Value::Boolean(*b),
            Value::Symbol(s) => Value::Symbol(s.clone()),
            Value::String(s) => Value::String(s.clone()),
            Value::Error(s) => Value::Error(s.clone()),
            Value::SExpr(items) => Value::SExpr(items.clone()),
            Value::QExpr(items) => Value::QExpr(items.clone()),
            Value::Function(Function::Builtin(b)) => Value::Function(Function::Builtin(*b)),
            Value::Function(Function::Lambda(l)) => Value::Function(Function::Lambda(Lambda {
                formals: l.formals.clone(),
                body: l.body.clone(),
                env: l.env.deep_copy(),
            })),
        }
    }
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

fn write_expr(f: &mut fmt::Formatter<'_>, items: &[Value], open: char, close: char) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Decimal(n) => write!(f, "{:.2}", n),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::String(s) => write!(f, "\"{}\"", escape_string(s)),
            Value::Error(msg) => write!(f, "Error: {}", msg),
            Value::SExpr(items) => write_expr(f, items, '(', ')'),
            Value::QExpr(items) => write_expr(f, items, '{', '}'),
            Value::Function(Function::Builtin(_)) => write!(f, "<builtin>"),
            Value::Function(Function::Lambda(l)) => {
                write!(f, "(\\ ")?;
                write_expr(f, &l.formals, '{', '}')?;
                write!(f, " ")?;
                write_expr(f, &l.body, '{', '}')?;
                write!(f, ")")
            }
        }
    }
}
