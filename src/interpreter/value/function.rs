use std::{fmt, rc::Rc};

use crate::{ast::FunctionDef, interpreter::environment::EnvRef};

/// A callable created by a `fun` declaration.
///
/// The declaration is shared with the syntax tree; `closure` is the scope the
/// declaration was executed in and becomes the parent of every call's scope.
pub struct LoxFunction {
    /// The parsed declaration: name, parameters and body.
    pub declaration: Rc<FunctionDef>,
    /// The defining scope.
    pub closure:     EnvRef,
}

impl LoxFunction {
    /// Creates a function value.
    ///
    /// # Parameters
    /// - `declaration`: The parsed `fun` declaration.
    /// - `closure`: The scope the declaration was executed in.
    #[must_use]
    pub const fn new(declaration: Rc<FunctionDef>, closure: EnvRef) -> Self {
        Self { declaration,
               closure }
    }

    /// The number of declared parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    /// The declared name, as written in the source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }
}

// The closure can reach this function again through its own bindings, so
// the scope is left out.
impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoxFunction")
         .field("name", &self.name())
         .field("arity", &self.arity())
         .finish_non_exhaustive()
    }
}

impl fmt::Display for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.name())
    }
}
