// ABOUTME: Reader turning parser AST nodes into Value trees (spec.md §4.1)

use crate::parser::AstNode;
use crate::value::Value;

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn read_number(contents: &str) -> Value {
    if contents.contains('.') {
        match contents.parse::<f64>() {
            Ok(n) => Value::Decimal(n),
            Err(_) => Value::Error("Invalid number".to_string()),
        }
    } else {
        match contents.parse::<i64>() {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::Error("Invalid number".to_string()),
        }
    }
}

fn read_string(contents: &str) -> Value {
    // contents is the raw text including surrounding quotes
    let inner = &contents[1..contents.len() - 1];
    Value::String(unescape(inner))
}

/// Converts one AST node into a `Value`, recursively, per spec.md §4.1's
/// tag-dispatch rules. `sexpr`/`qexpr`/`program` nodes fold their children
/// in order; a `program` node (the parser's root) folds into one `SExpr`
/// exactly like any other, so callers (REPL, `load`, the batch runner) are
/// responsible for unpacking and evaluating each top-level form themselves.
pub fn read(node: &AstNode) -> Value {
    match node.tag {
        "number" => read_number(&node.contents),
        "string" => read_string(&node.contents),
        "symbol" => Value::Symbol(node.contents.clone()),
        "bool" => Value::Boolean(node.contents == "true"),
        "sexpr" => Value::SExpr(node.children.iter().map(read).collect()),
        "qexpr" => Value::QExpr(node.children.iter().map(read).collect()),
        "program" => Value::SExpr(node.children.iter().map(read).collect()),
        other => Value::Error(format!("unrecognized AST node tag '{}'", other)),
    }
}

/// Parses and reads a whole source string into one top-level `SExpr` of
/// forms, ready for a caller to unpack and evaluate form by form.
pub fn read_source(src: &str) -> Result<Vec<Value>, String> {
    let ast = crate::parser::parse(src)?;
    match read(&ast) {
        Value::SExpr(items) => Ok(items),
        other => Ok(vec![other]),
    }
}
