use logos::{FilterResult, Logos};

use crate::{ast::LiteralValue, error::ParseError};

/// The kind of a lexical token.
///
/// Punctuation, operators and keywords are matched as exact tokens; literals
/// and identifiers by pattern. Keywords win over the identifier pattern only
/// when the match lengths are equal, so `orchid` stays an identifier.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(extras = LexerExtras)]
#[logos(error = LexFault)]
pub enum TokenKind {
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `-`
    #[token("-")]
    Minus,
    /// `+`
    #[token("+")]
    Plus,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `/`
    #[token("/")]
    Slash,
    /// `*`
    #[token("*")]
    Star,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,
    /// String literals. They may span lines; there are no escape sequences.
    #[regex(r#""[^"]*""#, count_newlines, allow_greedy = true)]
    #[regex(r#""[^"]*"#, unterminated_string, allow_greedy = true)]
    String,
    /// Numeric literals such as `42` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    /// `and`
    #[token("and")]
    And,
    /// `class`
    #[token("class")]
    Class,
    /// `else`
    #[token("else")]
    Else,
    /// `false`
    #[token("false")]
    False,
    /// `fun`
    #[token("fun")]
    Fun,
    /// `for`
    #[token("for")]
    For,
    /// `if`
    #[token("if")]
    If,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `or`
    #[token("or")]
    Or,
    /// `print`
    #[token("print")]
    Print,
    /// `return`
    #[token("return")]
    Return,
    /// `super`
    #[token("super")]
    Super,
    /// `this`
    #[token("this")]
    This,
    /// `true`
    #[token("true")]
    True,
    /// `var`
    #[token("var")]
    Var,
    /// `while`
    #[token("while")]
    While,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// `/* Block comments, which may nest. */`
    #[token("/*", block_comment)]
    BlockComment,
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
    /// End of the token stream. Never produced by the automaton itself; the
    /// scanner appends exactly one after the last real token.
    Eof,
}

impl TokenKind {
    /// Whether this kind opens a statement, making it a safe place for the
    /// parser to resume after a syntax error.
    #[must_use]
    pub const fn starts_statement(self) -> bool {
        matches!(self,
                 Self::Class
                 | Self::Fun
                 | Self::Var
                 | Self::For
                 | Self::If
                 | Self::While
                 | Self::Print
                 | Self::Return)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Reasons the lexer automaton can reject a piece of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexFault {
    /// No token pattern matched.
    #[default]
    UnexpectedCharacter,
    /// A `"` without a closing quote before the end of input.
    UnterminatedString,
    /// A `/*` whose nesting never closed.
    UnterminatedComment,
}

/// A classified, located lexical unit.
///
/// Tokens are produced once by [`scan`] and never mutated. `literal` is only
/// present for number and string tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token's kind.
    pub kind:    TokenKind,
    /// The exact source text of the token.
    pub lexeme:  String,
    /// The literal value of a number or string token.
    pub literal: Option<LiteralValue>,
    /// The 1-based source line, used for diagnostics.
    pub line:    usize,
}

impl Token {
    /// Creates a token without a literal value.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self { kind,
               lexeme: lexeme.into(),
               literal: None,
               line }
    }
}

/// Scans source text into a token stream terminated by exactly one
/// [`TokenKind::Eof`] token.
///
/// Lexical errors do not stop the scan: every bad character, unterminated
/// string or unterminated block comment is collected and scanning resumes
/// right after it. A stream that comes back with errors must not be run.
///
/// # Example
/// ```
/// use treelox::interpreter::lexer::{TokenKind, scan};
///
/// let (tokens, errors) = scan("var answer = 42;");
/// assert!(errors.is_empty());
///
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds,
///            [TokenKind::Var,
///             TokenKind::Identifier,
///             TokenKind::Equal,
///             TokenKind::Number,
///             TokenKind::Semicolon,
///             TokenKind::Eof]);
/// ```
#[must_use]
pub fn scan(source: &str) -> (Vec<Token>, Vec<ParseError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = TokenKind::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(result) = lexer.next() {
        let line = lexer.extras.line;
        match result {
            Ok(kind) => {
                let lexeme = lexer.slice();
                let literal = match kind {
                    TokenKind::Number => lexeme.parse().ok().map(LiteralValue::Number),
                    TokenKind::String => {
                        Some(LiteralValue::Str(lexeme[1..lexeme.len() - 1].to_string()))
                    },
                    _ => None,
                };
                tokens.push(Token { kind,
                                    lexeme: lexeme.to_string(),
                                    literal,
                                    line });
            },
            Err(LexFault::UnexpectedCharacter) => {
                errors.push(ParseError::UnexpectedCharacter { character: lexer.slice()
                                                                              .to_string(),
                                                              line });
            },
            Err(LexFault::UnterminatedString) => {
                errors.push(ParseError::UnterminatedString { line });
            },
            Err(LexFault::UnterminatedComment) => {
                errors.push(ParseError::UnterminatedComment { line });
            },
        }
    }

    tokens.push(Token::new(TokenKind::Eof, "", lexer.extras.line));
    (tokens, errors)
}

/// Advances the line counter past a string literal that spans lines.
fn count_newlines(lex: &mut logos::Lexer<TokenKind>) {
    lex.extras.line += lex.slice().matches('\n').count();
}

/// Rejects a string literal that runs off the end of the input.
fn unterminated_string(lex: &mut logos::Lexer<TokenKind>) -> FilterResult<(), LexFault> {
    count_newlines(lex);
    FilterResult::Error(LexFault::UnterminatedString)
}

/// Skips a block comment, honouring nested `/* */` pairs.
///
/// The automaton only matches the opening `/*`; the rest of the comment is
/// consumed here by hand because nesting is not a regular language.
fn block_comment(lex: &mut logos::Lexer<TokenKind>) -> FilterResult<(), LexFault> {
    let rest = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut consumed = 0;
    let mut newlines = 0;

    while consumed < rest.len() && depth > 0 {
        match (rest[consumed], rest.get(consumed + 1)) {
            (b'*', Some(b'/')) => {
                depth -= 1;
                consumed += 2;
            },
            (b'/', Some(b'*')) => {
                depth += 1;
                consumed += 2;
            },
            (b'\n', _) => {
                newlines += 1;
                consumed += 1;
            },
            _ => consumed += 1,
        }
    }

    lex.bump(consumed);
    lex.extras.line += newlines;

    if depth == 0 {
        FilterResult::Skip
    } else {
        FilterResult::Error(LexFault::UnterminatedComment)
    }
}
