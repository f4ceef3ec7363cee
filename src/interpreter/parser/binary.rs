use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a full expression.
    ///
    /// This is the entry point for expression parsing. It begins at the
    /// lowest-precedence level, assignment, and descends through the
    /// precedence hierarchy.
    ///
    /// Grammar: `expression := assignment`
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_assignment()
    }

    /// Parses a right-associative assignment.
    ///
    /// The left-hand side is parsed as an ordinary expression first; only a
    /// plain variable may be assigned to. Any other target is reported as a
    /// syntax error, but the right-hand side is still parsed and the
    /// statement carries on, so one bad target does not hide later errors.
    ///
    /// Grammar: `assignment := IDENTIFIER "=" assignment | logic_or`
    fn parse_assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_logical_or()?;

        if self.match_any(&[TokenKind::Equal]) {
            let equals = self.previous();
            let value = self.parse_assignment()?;

            return match expr {
                Expr::Variable { name } => Ok(Expr::Assign { name,
                                                             value: Box::new(value) }),
                target => {
                    self.report(ParseError::InvalidAssignmentTarget { token: equals.lexeme
                                                                                   .clone(),
                                                                      line:  equals.line, });
                    Ok(target)
                },
            };
        }

        Ok(expr)
    }

    /// Parses a chain of `or` operators.
    ///
    /// Grammar: `logic_or := logic_and ("or" logic_and)*`
    fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_logical_and()?;
        while self.match_any(&[TokenKind::Or]) {
            let operator = self.previous().clone();
            let right = self.parse_logical_and()?;
            left = Expr::Logical { left: Box::new(left),
                                   operator,
                                   right: Box::new(right) };
        }
        Ok(left)
    }

    /// Parses a chain of `and` operators.
    ///
    /// Grammar: `logic_and := equality ("and" equality)*`
    fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_equality()?;
        while self.match_any(&[TokenKind::And]) {
            let operator = self.previous().clone();
            let right = self.parse_equality()?;
            left = Expr::Logical { left: Box::new(left),
                                   operator,
                                   right: Box::new(right) };
        }
        Ok(left)
    }

    /// Grammar: `equality := comparison (("!=" | "==") comparison)*`
    fn parse_equality(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(&[TokenKind::BangEqual, TokenKind::EqualEqual],
                                    Self::parse_comparison)
    }

    /// Grammar: `comparison := term ((">" | ">=" | "<" | "<=") term)*`
    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(&[TokenKind::Greater,
                                      TokenKind::GreaterEqual,
                                      TokenKind::Less,
                                      TokenKind::LessEqual],
                                    Self::parse_term)
    }

    /// Parses addition and subtraction.
    ///
    /// Grammar: `term := factor (("-" | "+") factor)*`
    fn parse_term(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(&[TokenKind::Minus, TokenKind::Plus], Self::parse_factor)
    }

    /// Parses multiplication and division.
    ///
    /// Grammar: `factor := unary (("/" | "*") unary)*`
    fn parse_factor(&mut self) -> ParseResult<Expr> {
        self.parse_left_associative(&[TokenKind::Slash, TokenKind::Star], Self::parse_unary)
    }

    /// Parses one left-associative binary level.
    ///
    /// Operands come from `operand`, the next-higher level; the loop folds
    /// every operator of this level into a left-leaning `Expr::Binary` tree,
    /// so `1 - 2 - 3` becomes `(1 - 2) - 3`.
    fn parse_left_associative(&mut self,
                              operators: &[TokenKind],
                              operand: fn(&mut Self) -> ParseResult<Expr>)
                              -> ParseResult<Expr> {
        let mut left = operand(self)?;
        while self.match_any(operators) {
            let operator = self.previous().clone();
            let right = operand(self)?;
            left = Expr::Binary { left: Box::new(left),
                                  operator,
                                  right: Box::new(right) };
        }
        Ok(left)
    }
}
