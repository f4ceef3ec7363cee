use std::{io::Write, rc::Rc};

use tracing::debug;

use crate::{
    ast::{Expr, FunctionDef, Statement},
    error::RuntimeError,
    interpreter::{
        environment::EnvRef,
        evaluator::core::{EvalResult, Flow, Interpreter},
        lexer::Token,
        value::{core::Value, function::LoxFunction},
    },
};

impl<W: Write> Interpreter<W> {
    /// Writes the rendered value followed by a newline.
    pub(super) fn execute_print(&mut self, keyword: &Token, expr: &Expr) -> EvalResult<Flow> {
        let value = self.eval(expr)?;
        writeln!(self.out, "{value}").map_err(|e| RuntimeError::Output { details: e.to_string(),
                                                                         line:    keyword.line, })?;
        Ok(Flow::Normal)
    }

    /// Declares `name` in the current scope; a missing initializer means
    /// `nil`.
    pub(super) fn execute_var(&mut self,
                              name: &Token,
                              initializer: Option<&Expr>)
                              -> EvalResult<Flow> {
        let value = match initializer {
            Some(expr) => self.eval(expr)?,
            None => Value::Nil,
        };
        self.environment.borrow_mut().define(&name.lexeme, value);
        Ok(Flow::Normal)
    }

    /// Runs `statements` with `scope` as the current environment.
    ///
    /// The previous environment is put back however the block ends: normally,
    /// through a `return`, or with a runtime error.
    pub(crate) fn execute_block(&mut self,
                                statements: &[Statement],
                                scope: EnvRef)
                                -> EvalResult<Flow> {
        let previous = std::mem::replace(&mut self.environment, scope);
        let result = self.execute_all(statements);
        self.environment = previous;
        result
    }

    fn execute_all(&mut self, statements: &[Statement]) -> EvalResult<Flow> {
        for statement in statements {
            if let flow @ Flow::Return(_) = self.execute(statement)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    pub(super) fn execute_if(&mut self,
                             condition: &Expr,
                             then_branch: &Statement,
                             else_branch: Option<&Statement>)
                             -> EvalResult<Flow> {
        if self.eval(condition)?.is_truthy() {
            self.execute(then_branch)
        } else if let Some(else_branch) = else_branch {
            self.execute(else_branch)
        } else {
            Ok(Flow::Normal)
        }
    }

    /// Re-evaluates `condition` before every pass; a `return` in the body
    /// leaves the loop.
    pub(super) fn execute_while(&mut self, condition: &Expr, body: &Statement) -> EvalResult<Flow> {
        while self.eval(condition)?.is_truthy() {
            if let flow @ Flow::Return(_) = self.execute(body)? {
                return Ok(flow);
            }
        }
        Ok(Flow::Normal)
    }

    /// Binds a new function value, closing over the current scope.
    pub(super) fn declare_function(&self, declaration: &Rc<FunctionDef>) {
        let function = LoxFunction::new(Rc::clone(declaration), Rc::clone(&self.environment));
        debug!(name = function.name(), arity = function.arity(), "function defined");
        self.environment
            .borrow_mut()
            .define(&declaration.name.lexeme, Value::Function(Rc::new(function)));
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::RuntimeError,
        interpreter::{
            evaluator::core::Interpreter, lexer::scan, parser::parse, value::core::Value,
        },
    };

    fn run(interpreter: &mut Interpreter<Vec<u8>>, source: &str) -> Result<(), RuntimeError> {
        let (tokens, errors) = scan(source);
        assert!(errors.is_empty());
        let program = parse(&tokens);
        assert!(program.is_valid(), "{:?}", program.errors);
        interpreter.interpret(&program.statements)
    }

    #[test]
    fn scope_is_restored_after_an_error_inside_a_block() {
        let mut interpreter = Interpreter::new(Vec::new());
        run(&mut interpreter, "var x = \"global\";").unwrap();

        let error = run(&mut interpreter, "{ var x = \"inner\"; -x; }").unwrap_err();
        assert!(matches!(error, RuntimeError::OperandMustBeNumber { .. }));

        assert_eq!(interpreter.environment.borrow().get("x", 1), Ok(Value::from("global")));
    }

    #[test]
    fn return_unwinds_through_loops_and_blocks() {
        let mut interpreter = Interpreter::new(Vec::new());
        run(&mut interpreter,
            "fun f() { while (true) { { for (;;) { return \"out\"; } } } } print f();").unwrap();
        assert_eq!(interpreter.output(), b"out\n");
        assert_eq!(interpreter.call_depth, 0);
    }

    #[test]
    fn top_level_return_stops_quietly() {
        let mut interpreter = Interpreter::new(Vec::new());
        run(&mut interpreter, "print 1; return; print 2;").unwrap();
        assert_eq!(interpreter.output(), b"1\n");
    }

    #[test]
    fn uninitialized_variables_are_nil() {
        let mut interpreter = Interpreter::new(Vec::new());
        run(&mut interpreter, "var a; print a;").unwrap();
        assert_eq!(interpreter.output(), b"nil\n");
    }
}
