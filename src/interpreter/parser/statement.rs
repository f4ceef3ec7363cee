use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDef, Statement},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::{MAX_ARITY, ParseResult, Parser},
    },
};

impl Parser<'_> {
    /// Parses a single declaration, recovering from any syntax error in it.
    ///
    /// On failure the error is recorded, the parser skips ahead to the next
    /// statement boundary and `None` is returned, so the caller simply moves
    /// on to the next declaration.
    ///
    /// Grammar:
    /// ```text
    ///     declaration := classDecl | funDecl | varDecl | statement
    /// ```
    pub(super) fn parse_declaration(&mut self) -> Option<Statement> {
        let result = if self.match_any(&[TokenKind::Class]) {
            self.parse_class_declaration()
        } else if self.match_any(&[TokenKind::Fun]) {
            self.parse_function("function").map(Statement::Function)
        } else if self.match_any(&[TokenKind::Var]) {
            self.parse_var_declaration()
        } else {
            self.parse_statement()
        };

        match result {
            Ok(statement) => Some(statement),
            Err(error) => {
                self.report(error);
                self.synchronize();
                None
            },
        }
    }

    /// Grammar: `classDecl := "class" IDENTIFIER ("<" IDENTIFIER)? "{" function* "}"`
    fn parse_class_declaration(&mut self) -> ParseResult<Statement> {
        let name = self.consume(TokenKind::Identifier, "Expect class name.")?
                       .clone();

        let superclass = if self.match_any(&[TokenKind::Less]) {
            let name = self.consume(TokenKind::Identifier, "Expect superclass name.")?
                           .clone();
            Some(Expr::Variable { name })
        } else {
            None
        };

        self.consume(TokenKind::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            methods.push(self.parse_function("method")?);
        }

        self.consume(TokenKind::RightBrace, "Expect '}' after class body.")?;

        Ok(Statement::Class { name,
                              superclass,
                              methods })
    }

    /// Parses a named function: its name, parameter list and body.
    ///
    /// More than [`MAX_ARITY`] parameters is reported once without aborting.
    ///
    /// # Parameters
    /// - `kind`: `function` or `method`; only flavours the diagnostics.
    ///
    /// # Returns
    /// The shared declaration, ready to be stored in the tree.
    ///
    /// # Errors
    /// Returns a `ParseError` if the name, a parameter, a parenthesis or the
    /// body's braces are missing.
    ///
    /// Grammar:
    /// ```text
    ///     function   := IDENTIFIER "(" parameters? ")" block
    ///     parameters := IDENTIFIER ("," IDENTIFIER)*
    /// ```
    fn parse_function(&mut self, kind: &str) -> ParseResult<Rc<FunctionDef>> {
        let name = self.consume(TokenKind::Identifier, &format!("Expect {kind} name."))?
                       .clone();
        self.consume(TokenKind::LeftParen, &format!("Expect '(' after {kind} name."))?;

        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                if params.len() == MAX_ARITY {
                    let token = self.peek();
                    self.report(ParseError::TooManyParameters { token: token.lexeme.clone(),
                                                                line:  token.line, });
                }
                params.push(self.consume(TokenKind::Identifier, "Expect parameter name.")?
                                .clone());
                if !self.match_any(&[TokenKind::Comma]) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RightParen, "Expect ')' after parameters.")?;
        self.consume(TokenKind::LeftBrace, &format!("Expect '{{' before {kind} body."))?;
        let body = self.parse_block()?;

        Ok(Rc::new(FunctionDef { name, params, body }))
    }

    /// Grammar: `varDecl := "var" IDENTIFIER ("=" expression)? ";"`
    fn parse_var_declaration(&mut self) -> ParseResult<Statement> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?
                       .clone();

        let initializer = if self.match_any(&[TokenKind::Equal]) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Statement::Var { name, initializer })
    }

    /// Parses a non-declaration statement.
    ///
    /// Grammar:
    /// ```text
    ///     statement := exprStmt | forStmt | ifStmt | printStmt
    ///                | returnStmt | whileStmt | block
    /// ```
    fn parse_statement(&mut self) -> ParseResult<Statement> {
        if self.match_any(&[TokenKind::For]) {
            return self.parse_for();
        }
        if self.match_any(&[TokenKind::If]) {
            return self.parse_if();
        }
        if self.match_any(&[TokenKind::Print]) {
            return self.parse_print();
        }
        if self.match_any(&[TokenKind::Return]) {
            return self.parse_return();
        }
        if self.match_any(&[TokenKind::While]) {
            return self.parse_while();
        }
        if self.match_any(&[TokenKind::LeftBrace]) {
            return Ok(Statement::Block { statements: self.parse_block()? });
        }
        self.parse_expression_statement()
    }

    /// Parses a `for` loop and lowers it into a `while` loop.
    ///
    /// The increment is appended to the body, the condition defaults to
    /// `true`, and an initializer wraps the whole loop in its own block so
    /// the loop variable does not leak.
    ///
    /// Grammar:
    /// ```text
    ///     forStmt := "for" "(" (varDecl | exprStmt | ";")
    ///                expression? ";" expression? ")" statement
    /// ```
    fn parse_for(&mut self) -> ParseResult<Statement> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.match_any(&[TokenKind::Semicolon]) {
            None
        } else if self.match_any(&[TokenKind::Var]) {
            Some(self.parse_var_declaration()?)
        } else {
            Some(self.parse_expression_statement()?)
        };

        let condition = if self.check(TokenKind::Semicolon) {
            Expr::literal(true)
        } else {
            self.parse_expression()?
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.parse_statement()?;

        if let Some(increment) = increment {
            body = Statement::Block { statements: vec![body,
                                                       Statement::Expression { expr: increment }] };
        }

        body = Statement::While { condition,
                                  body: Box::new(body) };

        if let Some(initializer) = initializer {
            body = Statement::Block { statements: vec![initializer, body] };
        }

        Ok(body)
    }

    /// Grammar: `ifStmt := "if" "(" expression ")" statement ("else" statement)?`
    fn parse_if(&mut self) -> ParseResult<Statement> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.parse_statement()?);
        // A dangling `else` binds to the nearest `if`.
        let else_branch = if self.match_any(&[TokenKind::Else]) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Statement::If { condition,
                           then_branch,
                           else_branch })
    }

    /// Parses a `print` statement whose keyword was just consumed.
    ///
    /// Grammar: `printStmt := "print" expression ";"`
    fn parse_print(&mut self) -> ParseResult<Statement> {
        let keyword = self.previous().clone();
        let expr = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;
        Ok(Statement::Print { keyword, expr })
    }

    /// Grammar: `returnStmt := "return" expression? ";"`
    fn parse_return(&mut self) -> ParseResult<Statement> {
        let keyword = self.previous().clone();
        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(Statement::Return { keyword, value })
    }

    /// Grammar: `whileStmt := "while" "(" expression ")" statement`
    fn parse_while(&mut self) -> ParseResult<Statement> {
        self.consume(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RightParen, "Expect ')' after condition.")?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::While { condition, body })
    }

    /// Parses the declarations of a block whose `{` was just consumed.
    ///
    /// Errors inside the block are recovered from here, so one bad line
    /// does not discard the rest of the block.
    ///
    /// # Returns
    /// The statements that parsed, in order.
    ///
    /// # Errors
    /// Returns a `ParseError` if the closing `}` is missing.
    ///
    /// Grammar: `block := "{" declaration* "}"`
    fn parse_block(&mut self) -> ParseResult<Vec<Statement>> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            if let Some(statement) = self.parse_declaration() {
                statements.push(statement);
            }
        }
        self.consume(TokenKind::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement> {
        let expr = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Statement::Expression { expr })
    }
}
