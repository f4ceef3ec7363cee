use std::{io::Write, rc::Rc};

use tracing::{debug, trace};

use crate::{
    ast::{Expr, Statement},
    error::RuntimeError,
    interpreter::{
        environment::{EnvRef, Environment},
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Default limit on nested function calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Default host stack, in bytes, that nested calls may use.
///
/// Half of the 2 MiB a spawned std thread gets, so the default [`Config`]
/// fails with an error instead of overflowing on any ordinary thread.
pub const DEFAULT_STACK_BUDGET: usize = 1024 * 1024;

/// Interpreter settings.
///
/// A call fails with [`RuntimeError::StackOverflow`] as soon as either
/// limit would be exceeded, whichever comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// How deeply function calls may nest.
    pub max_call_depth: usize,
    /// How many bytes of host stack the outermost call and everything it
    /// calls may use. Must stay below the stack of the running thread.
    pub stack_budget:   usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { max_call_depth: DEFAULT_MAX_CALL_DEPTH,
               stack_budget:   DEFAULT_STACK_BUDGET, }
    }
}

/// How a statement finished.
///
/// `return` is not an error: it travels outward through blocks and loops as
/// [`Flow::Return`] until the enclosing call turns it back into a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// The statement ran to completion.
    Normal,
    /// A `return` is unwinding to the nearest call, carrying its value.
    Return(Value),
}

/// Stores the runtime evaluation state.
///
/// The interpreter owns the global scope and the output sink that `print`
/// writes to. It is created once and may run many programs: definitions made
/// by one call to [`Interpreter::interpret`] are visible to the next.
///
/// ## Usage
///
/// ```
/// use treelox::interpreter::{
///     evaluator::core::Interpreter, lexer::scan, parser::parse,
/// };
///
/// let mut interpreter = Interpreter::new(Vec::new());
///
/// let (tokens, _) = scan("var greeting = \"hi\";");
/// interpreter.interpret(&parse(&tokens).statements).unwrap();
///
/// let (tokens, _) = scan("print greeting + \"!\";");
/// interpreter.interpret(&parse(&tokens).statements).unwrap();
///
/// assert_eq!(interpreter.output(), b"hi!\n");
/// ```
pub struct Interpreter<W: Write> {
    /// The innermost scope of the code currently running.
    pub(super) environment: EnvRef,
    pub(super) out:         W,
    pub(super) config:      Config,
    /// Number of function calls currently on the stack.
    pub(super) call_depth:  usize,
    /// Stack address where the outermost running call started.
    pub(super) stack_base:  usize,
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter with an empty global scope and the default
    /// [`Config`].
    #[must_use]
    pub fn new(out: W) -> Self {
        Self::with_config(out, Config::default())
    }

    /// Creates an interpreter with an empty global scope and custom limits.
    ///
    /// # Parameters
    /// - `out`: Sink that `print` writes to.
    /// - `config`: Call depth and stack limits.
    ///
    /// # Returns
    /// An interpreter ready to run programs.
    #[must_use]
    pub fn with_config(out: W, config: Config) -> Self {
        Self { environment: Environment::new().into_ref(),
               out,
               config,
               call_depth: 0,
               stack_base: 0 }
    }

    /// The output sink.
    pub const fn output(&self) -> &W {
        &self.out
    }

    /// Consumes the interpreter and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Executes top-level statements in order.
    ///
    /// Stops at the first runtime error; output written before it is kept.
    /// A `return` outside of any function ends the remaining statements
    /// quietly.
    pub fn interpret(&mut self, statements: &[Statement]) -> EvalResult<()> {
        for statement in statements {
            trace!(%statement, "executing");
            if let Flow::Return(value) = self.execute(statement)? {
                debug!(%value, "top-level return, stopping");
                break;
            }
        }
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Operands are
    /// evaluated left to right, depth first.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value } => Ok(Value::from(value)),
            Expr::Grouping { expr } => self.eval(expr),
            Expr::Unary { operator, right } => self.eval_unary(operator, right),
            Expr::Binary { left,
                           operator,
                           right, } => self.eval_binary(left, operator, right),
            Expr::Logical { left,
                            operator,
                            right, } => self.eval_logical(left, operator, right),
            Expr::Variable { name } => self.environment.borrow().get(&name.lexeme, name.line),
            Expr::Assign { name, value } => {
                let value = self.eval(value)?;
                self.environment
                    .borrow_mut()
                    .assign(&name.lexeme, value.clone(), name.line)?;
                Ok(value)
            },
            Expr::Call { callee,
                         paren,
                         arguments, } => self.eval_call(callee, paren, arguments),
        }
    }

    /// Executes a single statement.
    ///
    /// Returns [`Flow::Return`] when a `return` inside it has to keep
    /// unwinding, [`Flow::Normal`] otherwise.
    pub fn execute(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::Expression { expr } => {
                self.eval(expr)?;
                Ok(Flow::Normal)
            },
            Statement::Print { keyword, expr } => self.execute_print(keyword, expr),
            Statement::Var { name, initializer } => {
                self.execute_var(name, initializer.as_ref())
            },
            Statement::Block { statements } => {
                let scope = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, scope.into_ref())
            },
            Statement::If { condition,
                            then_branch,
                            else_branch, } => {
                self.execute_if(condition, then_branch, else_branch.as_deref())
            },
            Statement::While { condition, body } => self.execute_while(condition, body),
            Statement::Function(declaration) => {
                self.declare_function(declaration);
                Ok(Flow::Normal)
            },
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(value))
            },
            Statement::Class { name, .. } => {
                Err(RuntimeError::ClassesUnsupported { name: name.lexeme.clone(),
                                                       line: name.line, })
            },
        }
    }
}
