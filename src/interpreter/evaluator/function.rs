use std::{io::Write, rc::Rc};

use tracing::{debug, trace};

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Flow, Interpreter},
        lexer::Token,
        value::{core::Value, function::LoxFunction},
    },
};

impl<W: Write> Interpreter<W> {
    /// Evaluates a call expression.
    ///
    /// The callee and then every argument are evaluated left to right before
    /// anything is checked. Errors are attributed to the closing parenthesis.
    ///
    /// # Parameters
    /// - `callee`: Expression producing the function.
    /// - `paren`: The closing parenthesis of the call.
    /// - `arguments`: Argument expressions.
    ///
    /// # Returns
    /// The value the function returned, or `nil`.
    pub(super) fn eval_call(&mut self,
                            callee: &Expr,
                            paren: &Token,
                            arguments: &[Expr])
                            -> EvalResult<Value> {
        let callee = self.eval(callee)?;

        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval(argument)?);
        }

        let function = match callee {
            Value::Function(function) => function,
            other => {
                debug!(callee = other.type_name(), line = paren.line, "call of a non-function");
                return Err(RuntimeError::NotCallable { line: paren.line });
            },
        };

        if values.len() != function.arity() {
            return Err(RuntimeError::ArgumentCountMismatch { expected: function.arity(),
                                                             found:    values.len(),
                                                             line:     paren.line, });
        }

        self.call_function(&function, values, paren.line)
    }

    /// Invokes a function with already checked arguments.
    ///
    /// The call gets a fresh scope whose parent is the function's closure,
    /// with each parameter bound to its argument. A body that finishes
    /// without `return` yields `nil`.
    ///
    /// # Errors
    /// Fails with [`RuntimeError::StackOverflow`] when the call would nest
    /// deeper than `max_call_depth` or push host stack use past
    /// `stack_budget`, or with whatever error the body raises.
    pub fn call_function(&mut self,
                         function: &Rc<LoxFunction>,
                         arguments: Vec<Value>,
                         line: usize)
                         -> EvalResult<Value> {
        let here = stack_address();
        if self.call_depth == 0 {
            self.stack_base = here;
        }

        if self.call_depth >= self.config.max_call_depth
           || self.stack_base.abs_diff(here) > self.config.stack_budget
        {
            debug!(depth = self.call_depth,
                   stack_used = self.stack_base.abs_diff(here),
                   "call refused");
            return Err(RuntimeError::StackOverflow { line });
        }

        let mut scope = Environment::with_enclosing(Rc::clone(&function.closure));
        for (param, argument) in function.declaration.params.iter().zip(arguments) {
            scope.define(&param.lexeme, argument);
        }

        trace!(name = function.name(), depth = self.call_depth, "call");

        self.call_depth += 1;
        let result = self.execute_block(&function.declaration.body, scope.into_ref());
        self.call_depth -= 1;

        match result? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}

/// Approximate address of the caller's stack frame.
#[inline(never)]
fn stack_address() -> usize {
    let marker = 0u8;
    std::hint::black_box(std::ptr::from_ref(&marker)).addr()
}
