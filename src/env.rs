// ABOUTME: Environment module managing symbol bindings and the lexical parent chain

use crate::error::LispError;
use crate::value::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// A single frame of the environment chain.
///
/// Bindings are a `Vec` rather than a `HashMap`: frames are small (a
/// handful of formals or globals), lookup is linear just as in the source's
/// `syms`/`vals` arrays, and `locals` needs definition order preserved.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<Vec<(String, Value)>>,
    parent: RefCell<Option<Rc<Environment>>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            parent: RefCell::new(None),
        })
    }

    /// Creates a new child environment with a parent already attached.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(Vec::new()),
            parent: RefCell::new(Some(parent)),
        })
    }

    /// Rewires this environment's parent link. Used by the call protocol to
    /// attach a lambda's own frame to the caller's environment for the
    /// duration of one call (spec invariant 3).
    pub fn set_parent(&self, parent: Rc<Environment>) {
        *self.parent.borrow_mut() = Some(parent);
    }

    /// Looks up `name` in this frame, then recursively in parents, returning
    /// a deep copy of the bound value. Fails with `UndefinedSymbol` once the
    /// chain is exhausted.
    pub fn get(&self, name: &str) -> Result<Value, LispError> {
        for (sym, val) in self.bindings.borrow().iter() {
            if sym == name {
                return Ok(val.clone());
            }
        }

        if let Some(parent) = self.parent.borrow().as_ref() {
            return parent.get(name);
        }

        Err(LispError::UndefinedSymbol(name.to_string()))
    }

    /// Binds `name` in *this* frame only, replacing any existing binding.
    /// The caller retains ownership of the value it passed in; a deep copy
    /// is stored.
    pub fn put(&self, name: &str, value: Value) {
        let mut bindings = self.bindings.borrow_mut();
        for (sym, existing) in bindings.iter_mut() {
            if sym == name {
                *existing = value;
                return;
            }
        }
        bindings.push((name.to_string(), value));
    }

    /// Walks to the root of the parent chain and binds there.
    pub fn def(self: &Rc<Self>, name: &str, value: Value) {
        let mut frame = Rc::clone(self);
        loop {
            let next = frame.parent.borrow().clone();
            match next {
                Some(p) => frame = p,
                None => break,
            }
        }
        frame.put(name, value);
    }

    /// Returns a snapshot of this frame's own bindings, in definition order
    /// (not including parents). Backs the `locals` builtin.
    pub fn own_bindings(&self) -> Vec<(String, Value)> {
        self.bindings.borrow().clone()
    }

    /// Deep-copies this environment: a fresh frame with independently cloned
    /// bindings, sharing the same parent link (a pointer copy, matching the
    /// source's `lenv_copy`, not a recursive copy of ancestors).
    pub fn deep_copy(self: &Rc<Self>) -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(self.bindings.borrow().clone()),
            parent: RefCell::new(self.parent.borrow().clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let env = Environment::new();
        env.put("x", Value::Integer(42));
        match env.get("x") {
            Ok(Value::Integer(n)) => assert_eq!(n, 42),
            other => panic!("expected Integer(42), got {:?}", other),
        }
    }

    #[test]
    fn undefined_symbol_errors() {
        let env = Environment::new();
        assert!(matches!(env.get("missing"), Err(LispError::UndefinedSymbol(_))));
    }

    #[test]
    fn child_shadows_parent() {
        let parent = Environment::new();
        parent.put("x", Value::Integer(1));
        let child = Environment::with_parent(Rc::clone(&parent));
        child.put("x", Value::Integer(2));

        match child.get("x") {
            Ok(Value::Integer(n)) => assert_eq!(n, 2),
            other => panic!("unexpected {:?}", other),
        }
        match parent.get("x") {
            Ok(Value::Integer(n)) => assert_eq!(n, 1),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn def_walks_to_root() {
        let root = Environment::new();
        let mid = Environment::with_parent(Rc::clone(&root));
        let leaf = Environment::with_parent(Rc::clone(&mid));

        leaf.def("g", Value::Integer(9));

        assert!(matches!(leaf.get("g"), Ok(Value::Integer(9))));
        assert!(matches!(mid.get("g"), Ok(Value::Integer(9))));
        assert!(matches!(root.get("g"), Ok(Value::Integer(9))));
        // only bound at the root frame itself
        assert_eq!(root.own_bindings().len(), 1);
        assert_eq!(leaf.own_bindings().len(), 0);
    }

    #[test]
    fn get_returns_independent_copies() {
        let env = Environment::new();
        env.put("q", Value::QExpr(vec![Value::Integer(1)]));

        let first = env.get("q").unwrap();
        env.put("q", Value::QExpr(vec![Value::Integer(2)]));
        // the earlier lookup is unaffected by the later rebinding
        assert!(first.deep_eq(&Value::QExpr(vec![Value::Integer(1)])));
    }

    #[test]
    fn deep_copy_has_independent_bindings_but_shared_parent() {
        let root = Environment::new();
        root.put("g", Value::Integer(1));
        let child = Environment::with_parent(Rc::clone(&root));
        child.put("x", Value::Integer(10));

        let copy = child.deep_copy();
        copy.put("x", Value::Integer(99));

        assert!(matches!(child.get("x"), Ok(Value::Integer(10))));
        assert!(matches!(copy.get("x"), Ok(Value::Integer(99))));
        // parent (global) is shared: redefining there is visible from both
        root.put("g", Value::Integer(2));
        assert!(matches!(child.get("g"), Ok(Value::Integer(2))));
        assert!(matches!(copy.get("g"), Ok(Value::Integer(2))));
    }
}
