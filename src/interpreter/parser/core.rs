use tracing::debug;

use crate::{
    ast::Statement,
    error::ParseError,
    interpreter::lexer::{Token, TokenKind},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// The largest number of parameters a function may declare, and of
/// arguments a call may pass.
pub const MAX_ARITY: usize = 255;

/// Stands in for the end-of-stream marker when a token slice lacks one.
static END_OF_INPUT: Token = Token { kind:    TokenKind::Eof,
                                     lexeme:  String::new(),
                                     literal: None,
                                     line:    0, };

/// The result of parsing a token stream.
///
/// Parsing never stops at the first syntax error: every malformed
/// declaration is reported and skipped, so `statements` holds everything
/// that could be recovered and `errors` every diagnostic in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The recovered top-level statements.
    pub statements: Vec<Statement>,
    /// The syntax errors, in the order they were found.
    pub errors:     Vec<ParseError>,
}

impl Program {
    /// Whether the program parsed without a single error.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the statements if parsing was clean, otherwise every error.
    pub fn into_result(self) -> Result<Vec<Statement>, Vec<ParseError>> {
        if self.errors.is_empty() {
            Ok(self.statements)
        } else {
            Err(self.errors)
        }
    }
}

/// A recursive-descent parser over a borrowed token stream.
///
/// The parser looks one token ahead and walks the stream once. It is
/// consumed by [`Parser::parse`], so no state survives between two parses of
/// the same tokens.
pub struct Parser<'a> {
    tokens:            &'a [Token],
    current:           usize,
    errors:            Vec<ParseError>,
}

impl<'a> Parser<'a> {
    /// Creates a parser positioned at the first token.
    #[must_use]
    pub const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens,
               current: 0,
               errors: Vec::new() }
    }

    /// Parses the whole stream into a [`Program`].
    ///
    /// Grammar: `program := declaration* EOF`
    #[must_use]
    pub fn parse(mut self) -> Program {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(statement) = self.parse_declaration() {
                statements.push(statement);
            }
        }
        Program { statements,
                  errors: self.errors }
    }

    /// The token under the cursor.
    pub(super) fn peek(&self) -> &'a Token {
        self.tokens.get(self.current).unwrap_or(&END_OF_INPUT)
    }

    /// The most recently consumed token.
    pub(super) fn previous(&self) -> &'a Token {
        self.current
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .unwrap_or(&END_OF_INPUT)
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Whether the current token has the given kind. Never true at the end.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Consumes the current token and returns it. Stays put at the end.
    pub(super) fn advance(&mut self) -> &'a Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Consumes the current token if it has any of the given kinds.
    pub(super) fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|kind| self.check(*kind)) {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes a token of the given kind or fails with `message`.
    ///
    /// # Parameters
    /// - `kind`: The token kind the grammar requires here.
    /// - `message`: The diagnostic to report when it is missing.
    ///
    /// # Returns
    /// The consumed token.
    ///
    /// # Errors
    /// Returns a `ParseError` located at the current token when its kind
    /// differs.
    pub(super) fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<&'a Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(ParseError::at(self.peek(), message))
    }

    /// Records a diagnostic that does not abort the current production.
    pub(super) fn report(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    /// Discards tokens until a likely statement boundary.
    ///
    /// Stops right after a `;` or right before a token that begins a
    /// statement. Always consumes at least one token unless already at the
    /// end, so recovery cannot loop.
    pub(super) fn synchronize(&mut self) {
        let start = self.peek().line;
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon || self.peek().kind.starts_statement()
            {
                break;
            }
            self.advance();
        }

        debug!(from_line = start, to_line = self.peek().line, "parser resynchronized");
    }
}

/// Parses a token stream into a [`Program`].
///
/// # Example
/// ```
/// use treelox::interpreter::{lexer::scan, parser::parse};
///
/// let (tokens, _) = scan("print 1 + 2 * 3;");
/// let program = parse(&tokens);
///
/// assert!(program.is_valid());
/// assert_eq!(program.statements[0].to_string(), "(print (+ 1 (* 2 3)))");
/// ```
#[must_use]
pub fn parse(tokens: &[Token]) -> Program {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::scan;

    fn parse_source(source: &str) -> Program {
        let (tokens, errors) = scan(source);
        assert!(errors.is_empty(), "unexpected scan errors: {errors:?}");
        parse(&tokens)
    }

    fn render(source: &str) -> Vec<String> {
        let program = parse_source(source);
        assert!(program.is_valid(), "unexpected parse errors: {:?}", program.errors);
        program.statements.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(render("2 + 3 * 4;"), ["(; (+ 2 (* 3 4)))"]);
        assert_eq!(render("(2 + 3) * 4;"), ["(; (* (group (+ 2 3)) 4))"]);
        assert_eq!(render("1 - 2 - 3;"), ["(; (- (- 1 2) 3))"]);
        assert_eq!(render("!!true;"), ["(; (! (! true)))"]);
        assert_eq!(render("a = b = 1;"), ["(; (= a (= b 1)))"]);
        assert_eq!(render("a or b and c == d < e + f * -g;"),
                   ["(; (or a (and b (== c (< d (+ e (* f (- g))))))))"]);
    }

    #[test]
    fn calls_chain_left_to_right() {
        assert_eq!(render("f(1)(2, 3)();"), ["(; (call (call (call f 1) 2 3)))"]);
    }

    #[test]
    fn for_loops_are_desugared() {
        assert_eq!(render("for (var i = 0; i < 3; i = i + 1) print i;"),
                   ["(block (var i 0) (while (< i 3) (block (print i) (; (= i (+ i 1))))))"]);
        assert_eq!(render("for (;;) print 1;"), ["(while true (print 1))"]);
    }

    #[test]
    fn declarations_render() {
        assert_eq!(render("fun add(a, b) { return a + b; }"),
                   ["(fun add (a b) (return (+ a b)))"]);
        assert_eq!(render("var x;"), ["(var x)"]);
        assert_eq!(render("if (x) print 1; else print 2;"),
                   ["(if x (print 1) (print 2))"]);
        assert_eq!(render("class B < A { m() { return; } }"),
                   ["(class B < A (fun m () (return)))"]);
    }

    #[test]
    fn invalid_assignment_target_does_not_abort_the_statement() {
        let program = parse_source("1 = 2; print 3;");
        assert_eq!(program.errors,
                   [ParseError::InvalidAssignmentTarget { token: "=".to_string(),
                                                          line:  1, }]);
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn recovery_reports_independent_errors() {
        let program = parse_source("var = 1;\nprint 2;\nprint (3;");
        assert_eq!(program.errors.len(), 2);
        assert_eq!(program.errors[0].line(), 1);
        assert_eq!(program.errors[1].line(), 3);
        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.statements[0].to_string(), "(print 2)");
    }

    #[test]
    fn missing_semicolon_at_end_is_reported_at_end() {
        let program = parse_source("print 1");
        assert_eq!(program.errors,
                   [ParseError::UnexpectedToken { token:   None,
                                                  message: "Expect ';' after value.".to_string(),
                                                  line:    1, }]);
    }

    #[test]
    fn too_many_parameters_is_not_fatal() {
        let params: Vec<String> = (0..=MAX_ARITY).map(|i| format!("p{i}")).collect();
        let source = format!("fun f({}) {{}} print 1;", params.join(", "));
        let program = parse_source(&source);
        assert!(matches!(program.errors.as_slice(), [ParseError::TooManyParameters { .. }]));
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn too_many_arguments_is_reported_once() {
        let arguments = vec!["1"; MAX_ARITY + 2].join(", ");
        let program = parse_source(&format!("f({arguments});"));
        assert!(matches!(program.errors.as_slice(),
                         [ParseError::TooManyArguments { token: Some(_), line: 1 }]));
        assert_eq!(program.statements.len(), 1);
    }

    #[test]
    fn reparsing_yields_identical_trees() {
        let (tokens, _) = scan("fun f(n) { if (n < 2) return n; return f(n - 1); } print f(3);");
        assert_eq!(parse(&tokens), parse(&tokens));
    }

    #[test]
    fn into_result_drops_partial_trees() {
        assert!(parse_source("print 1; print;").into_result().is_err());
        assert_eq!(parse_source("print 1;").into_result().map(|s| s.len()), Ok(1));
    }

    #[test]
    fn empty_slice_parses_to_nothing() {
        let program = parse(&[]);
        assert!(program.is_valid());
        assert!(program.statements.is_empty());
    }
}
