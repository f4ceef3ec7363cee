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
    /// Evaluates both operands, left first, then applies the operator.
    pub(super) fn eval_binary(&mut self,
                              left: &Expr,
                              operator: &Token,
                              right: &Expr)
                              -> EvalResult<Value> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;
        apply_binary(operator, &left, &right)
    }
}

/// Applies a binary operator to two evaluated operands.
///
/// - `+` adds two numbers or concatenates two strings.
/// - `-`, `*`, `/` and the comparisons require two numbers.
/// - `==` and `!=` accept any pair of values and never coerce.
///
/// Division follows IEEE 754, so dividing by zero yields an infinity or
/// `NaN` rather than an error.
///
/// # Parameters
/// - `operator`: The operator token; its line is used for errors.
/// - `left`, `right`: The evaluated operands.
///
/// # Returns
/// The computed `Value` wrapped in `EvalResult`.
///
/// # Example
/// ```
/// use treelox::interpreter::{
///     evaluator::binary::apply_binary,
///     lexer::{Token, TokenKind},
///     value::core::Value,
/// };
///
/// let plus = Token::new(TokenKind::Plus, "+", 1);
/// let joined = apply_binary(&plus, &Value::from("x"), &Value::from("y")).unwrap();
/// assert_eq!(joined, Value::from("xy"));
///
/// assert!(apply_binary(&plus, &Value::Number(1.0), &Value::from("x")).is_err());
/// ```
pub fn apply_binary(operator: &Token, left: &Value, right: &Value) -> EvalResult<Value> {
    match operator.kind {
        TokenKind::Plus => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Str(b)) => Ok(Value::from(format!("{a}{b}"))),
            _ => Err(RuntimeError::OperandsMustBeNumbersOrStrings { line: operator.line }),
        },
        TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
        TokenKind::BangEqual => Ok(Value::Bool(left != right)),
        _ => {
            let (a, b) = number_operands(operator, left, right)?;
            Ok(match operator.kind {
                TokenKind::Minus => Value::Number(a - b),
                TokenKind::Star => Value::Number(a * b),
                TokenKind::Slash => Value::Number(a / b),
                TokenKind::Greater => Value::Bool(a > b),
                TokenKind::GreaterEqual => Value::Bool(a >= b),
                TokenKind::Less => Value::Bool(a < b),
                TokenKind::LessEqual => Value::Bool(a <= b),
                _ => unreachable!("the parser only builds binary nodes from binary operators"),
            })
        },
    }
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> EvalResult<(f64, f64)> {
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(RuntimeError::OperandsMustBeNumbers { operator: operator.lexeme.clone(),
                                                       line:     operator.line, }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, 2)
    }

    #[test]
    fn arithmetic_and_comparison() {
        let n = Value::Number;
        assert_eq!(apply_binary(&op(TokenKind::Minus, "-"), &n(1.0), &n(3.0)), Ok(n(-2.0)));
        assert_eq!(apply_binary(&op(TokenKind::Slash, "/"), &n(1.0), &n(4.0)), Ok(n(0.25)));
        assert_eq!(apply_binary(&op(TokenKind::LessEqual, "<="), &n(2.0), &n(2.0)),
                   Ok(Value::Bool(true)));
        assert_eq!(apply_binary(&op(TokenKind::Slash, "/"), &n(1.0), &n(0.0)),
                   Ok(n(f64::INFINITY)));
    }

    #[test]
    fn comparisons_reject_non_numbers() {
        let error = apply_binary(&op(TokenKind::Greater, ">"), &Value::from("a"), &Value::Nil);
        assert_eq!(error,
                   Err(RuntimeError::OperandsMustBeNumbers { operator: ">".to_string(),
                                                             line:     2, }));
    }

    #[test]
    fn plus_rejects_mixed_operands() {
        let error = apply_binary(&op(TokenKind::Plus, "+"), &Value::from("a"), &Value::Number(1.0));
        assert_eq!(error, Err(RuntimeError::OperandsMustBeNumbersOrStrings { line: 2 }));
    }

    #[test]
    fn equality_accepts_any_types() {
        let eq = op(TokenKind::EqualEqual, "==");
        assert_eq!(apply_binary(&eq, &Value::Nil, &Value::Nil), Ok(Value::Bool(true)));
        assert_eq!(apply_binary(&eq, &Value::Nil, &Value::Bool(false)), Ok(Value::Bool(false)));
        assert_eq!(apply_binary(&op(TokenKind::BangEqual, "!="), &Value::Number(1.0), &Value::from("1")),
                   Ok(Value::Bool(true)));
    }
}
