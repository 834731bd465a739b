use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Value;

/// A lexical scope: a flat name→value map plus an optional link to the scope
/// it was opened inside. Environments are shared (`Rc<RefCell<_>>`) rather
/// than owned, because a closure keeps its captured environment alive and
/// must see mutations made to it after the closure was created — a plain
/// owned/copied environment would let a function observe a snapshot instead
/// of the live binding.
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// The root environment of a program or REPL session. No enclosing link.
    pub fn new_global() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    /// A fresh scope opened inside `enclosing`, e.g. entering a function call.
    pub fn new_enclosed(enclosing: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Binds `name` in *this* frame only, shadowing any outer binding of the
    /// same name. This is what a `let` statement always does, regardless of
    /// whether an outer binding with the same name exists.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Walks this scope and its enclosing chain, returning the first binding
    /// found.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }
        self.enclosing.as_ref()?.borrow().get(name)
    }

    /// Walk-to-outer-bind assignment: if `name` is not bound locally but is
    /// bound somewhere in the enclosing chain, that outermost existing
    /// binding is updated in place; otherwise the binding is created in this
    /// frame. This is the primitive a bare `x = v` assignment uses, and is
    /// what makes assignment inside a nested block mutate an outer variable
    /// rather than always shadowing it locally.
    pub fn set(&mut self, name: &str, value: Value) {
        if !self.values.contains_key(name) {
            if let Some(enclosing) = &self.enclosing {
                if enclosing.borrow().get(name).is_some() {
                    log::trace!("set: delegating {name:?} to enclosing scope");
                    enclosing.borrow_mut().set(name, value);
                    return;
                }
            }
        }
        log::trace!("set: binding {name:?} locally");
        self.values.insert(name.to_string(), value);
    }
}
