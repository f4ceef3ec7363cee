use std::io::Write;

use crate::{
    ast::Expr,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        lexer::{Token, TokenKind},
        value::core::Value,
    },
};

impl<W: Write> Interpreter<W> {
    /// Evaluates `and` / `or` with short-circuiting.
    ///
    /// The right operand only runs when the left one does not settle the
    /// result. The result is whichever operand was evaluated last, not a
    /// coerced boolean: `nil or "x"` is `"x"`.
    pub(super) fn eval_logical(&mut self,
                               left: &Expr,
                               operator: &Token,
                               right: &Expr)
                               -> EvalResult<Value> {
        let left = self.eval(left)?;

        let settled = match operator.kind {
            TokenKind::Or => left.is_truthy(),
            _ => !left.is_truthy(),
        };

        if settled { Ok(left) } else { self.eval(right) }
    }
}
