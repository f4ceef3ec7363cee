use crate::{
    ast::{Expr, LiteralValue},
    error::{ParseError, parse_error::lexeme_of},
    interpreter::{
        lexer::TokenKind,
        parser::core::{MAX_ARITY, ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a unary expression.
    ///
    /// Supports prefix operators:
    /// - `-`  (numeric negation)
    /// - `!`  (logical not)
    ///
    /// Unary operators are right-associative, so an input like `!-x` is
    /// parsed as `!( -x )`.
    ///
    /// Grammar:
    /// ```text
    ///     unary := ("!" | "-") unary
    ///            | call
    /// ```
    pub(super) fn parse_unary(&mut self) -> ParseResult<Expr> {
        if self.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous().clone();
            let right = self.parse_unary()?;
            return Ok(Expr::Unary { operator,
                                    right: Box::new(right) });
        }
        self.parse_call()
    }

    /// Parses a primary expression followed by any number of call suffixes.
    ///
    /// Grammar: `call := primary ( "(" arguments? ")" )*`
    fn parse_call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;
        while self.match_any(&[TokenKind::LeftParen]) {
            expr = self.finish_call(expr)?;
        }
        Ok(expr)
    }

    /// Parses the argument list of a call whose `(` was just consumed.
    ///
    /// More than [`MAX_ARITY`] arguments is reported once but does not stop
    /// the parse.
    ///
    /// # Parameters
    /// - `callee`: The expression being called.
    ///
    /// # Returns
    /// An `Expr::Call` holding the callee, the closing parenthesis and the
    /// arguments.
    ///
    /// Grammar: `arguments := expression ("," expression)*`
    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check(TokenKind::RightParen) {
            loop {
                if arguments.len() == MAX_ARITY {
                    let token = self.peek();
                    self.report(ParseError::TooManyArguments { token: lexeme_of(token),
                                                               line:  token.line, });
                }
                arguments.push(self.parse_expression()?);
                if !self.match_any(&[TokenKind::Comma]) {
                    break;
                }
            }
        }

        let paren = self.consume(TokenKind::RightParen, "Expect ')' after arguments.")?
                        .clone();

        Ok(Expr::Call { callee: Box::new(callee),
                        paren,
                        arguments })
    }

    /// Parses a primary (atomic) expression.
    ///
    /// Grammar:
    /// ```text
    ///     primary := "true" | "false" | "nil"
    ///              | NUMBER | STRING
    ///              | IDENTIFIER
    ///              | "(" expression ")"
    /// ```
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek();

        let expr = match token.kind {
            TokenKind::False => Expr::literal(false),
            TokenKind::True => Expr::literal(true),
            TokenKind::Nil => Expr::literal(LiteralValue::Nil),
            TokenKind::Number | TokenKind::String => match &token.literal {
                Some(value) => Expr::literal(value.clone()),
                None => return Err(ParseError::at(token, "Expect expression.")),
            },
            TokenKind::Identifier => Expr::Variable { name: token.clone() },
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Expr::Grouping { expr: Box::new(expr) });
            },
            _ => return Err(ParseError::at(token, "Expect expression.")),
        };

        self.advance();
        Ok(expr)
    }
}
