use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// A shared, mutable handle to a scope.
///
/// Scopes are shared because a function value keeps its defining scope alive
/// after the block that declared it has exited.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One lexical scope: its own bindings plus a link to the scope around it.
///
/// The global scope has no enclosing link. Every block entry and every
/// function call creates a fresh child.
#[derive(Debug, Default)]
pub struct Environment {
    values:    HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    /// Creates a top-level scope with no enclosing link.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a child scope of `enclosing`.
    #[must_use]
    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Self { values:    HashMap::new(),
               enclosing: Some(enclosing), }
    }

    /// Wraps the scope in a shared handle.
    #[must_use]
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Binds `name` in this exact scope. Redeclaring a name overwrites it.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Looks `name` up in this scope, then outward through the chain.
    ///
    /// # Example
    /// ```
    /// use treelox::interpreter::{environment::Environment, value::core::Value};
    ///
    /// let globals = Environment::new().into_ref();
    /// globals.borrow_mut().define("x", Value::Number(1.0));
    ///
    /// let inner = Environment::with_enclosing(globals);
    /// assert_eq!(inner.get("x", 1), Ok(Value::Number(1.0)));
    /// assert!(inner.get("y", 1).is_err());
    /// ```
    pub fn get(&self, name: &str, line: usize) -> EvalResult<Value> {
        if let Some(value) = self.values.get(name) {
            return Ok(value.clone());
        }
        self.enclosing
            .as_ref()
            .map_or_else(|| Err(undefined(name, line)),
                         |enclosing| enclosing.borrow().get(name, line))
    }

    /// Overwrites the nearest existing binding of `name`.
    ///
    /// Never creates a binding: assigning to a name no scope defines is an
    /// error.
    pub fn assign(&mut self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        self.enclosing
            .as_ref()
            .map_or_else(|| Err(undefined(name, line)),
                         |enclosing| enclosing.borrow_mut().assign(name, value, line))
    }
}

fn undefined(name: &str, line: usize) -> RuntimeError {
    RuntimeError::UndefinedVariable { name: name.to_string(),
                                      line }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_outward() {
        let globals = Environment::new().into_ref();
        globals.borrow_mut().define("a", Value::Number(1.0));

        let middle = Environment::with_enclosing(Rc::clone(&globals)).into_ref();
        middle.borrow_mut().define("b", Value::Bool(true));

        let inner = Environment::with_enclosing(middle);
        assert_eq!(inner.get("a", 3), Ok(Value::Number(1.0)));
        assert_eq!(inner.get("b", 3), Ok(Value::Bool(true)));
        assert_eq!(inner.get("c", 3),
                   Err(RuntimeError::UndefinedVariable { name: "c".to_string(),
                                                         line: 3, }));
    }

    #[test]
    fn inner_definitions_shadow_outer_ones() {
        let globals = Environment::new().into_ref();
        globals.borrow_mut().define("x", Value::Number(1.0));

        let mut inner = Environment::with_enclosing(Rc::clone(&globals));
        inner.define("x", Value::Number(2.0));

        assert_eq!(inner.get("x", 1), Ok(Value::Number(2.0)));
        assert_eq!(globals.borrow().get("x", 1), Ok(Value::Number(1.0)));
    }

    #[test]
    fn assignment_updates_the_nearest_binding() {
        let globals = Environment::new().into_ref();
        globals.borrow_mut().define("x", Value::Number(1.0));

        let mut inner = Environment::with_enclosing(Rc::clone(&globals));
        inner.assign("x", Value::Number(5.0), 1).unwrap();

        assert_eq!(globals.borrow().get("x", 1), Ok(Value::Number(5.0)));
        assert!(inner.values.is_empty());
    }

    #[test]
    fn assignment_never_declares() {
        let mut env = Environment::new();
        assert!(env.assign("ghost", Value::Nil, 7).is_err());
        assert!(env.get("ghost", 7).is_err());
    }

    #[test]
    fn redefinition_overwrites() {
        let mut env = Environment::new();
        env.define("x", Value::Number(1.0));
        env.define("x", Value::from("two"));
        assert_eq!(env.get("x", 1), Ok(Value::from("two")));
    }
}
