use std::io::Write;

use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        lexer::{Token, TokenKind},
        value::core::Value,
    },
};

impl<W: Write> Interpreter<W> {
    /// Evaluates a unary operation.
    ///
    /// Supported operators:
    /// - `-`: numeric negation; any other operand is an error.
    /// - `!`: negated truthiness, defined for every value.
    pub(super) fn eval_unary(&mut self, operator: &Token, right: &Expr) -> EvalResult<Value> {
        let value = self.eval(right)?;

        match operator.kind {
            TokenKind::Bang => Ok(Value::Bool(!value.is_truthy())),
            TokenKind::Minus => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::OperandMustBeNumber { operator: operator.lexeme.clone(),
                                                             line:     operator.line, }),
            },
            _ => unreachable!("the parser only builds unary nodes from '!' and '-'"),
        }
    }
}
