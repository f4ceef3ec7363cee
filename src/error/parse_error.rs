use crate::interpreter::lexer::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during scanning or parsing.
pub enum ParseError {
    /// A character that does not start any token.
    UnexpectedCharacter {
        /// The offending source text.
        character: String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A string literal that was never closed.
    UnterminatedString {
        /// The source line where the input ended.
        line: usize,
    },
    /// A block comment that was never closed.
    UnterminatedComment {
        /// The source line where the input ended.
        line: usize,
    },
    /// Found a token the grammar does not allow at this point.
    UnexpectedToken {
        /// The offending lexeme, or `None` at the end of input.
        token:   Option<String>,
        /// What the parser expected, e.g. `Expect ';' after value.`.
        message: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The left-hand side of `=` is not a variable.
    InvalidAssignmentTarget {
        /// The `=` token's lexeme.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A function declaration with more than 255 parameters.
    TooManyParameters {
        /// The first parameter past the limit.
        token: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A call with more than 255 arguments.
    TooManyArguments {
        /// The first token of the argument past the limit.
        token: Option<String>,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl ParseError {
    /// Builds an [`ParseError::UnexpectedToken`] located at `token`.
    #[must_use]
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        Self::UnexpectedToken { token:   lexeme_of(token),
                                message: message.into(),
                                line:    token.line, }
    }

    /// The source line the error is attributed to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::UnterminatedString { line }
            | Self::UnterminatedComment { line }
            | Self::UnexpectedToken { line, .. }
            | Self::InvalidAssignmentTarget { line, .. }
            | Self::TooManyParameters { line, .. }
            | Self::TooManyArguments { line, .. } => *line,
        }
    }
}

/// The lexeme to quote in a diagnostic; `None` marks the end of input.
pub(crate) fn lexeme_of(token: &Token) -> Option<String> {
    (token.kind != TokenKind::Eof).then(|| token.lexeme.clone())
}

/// Formats the ` at 'x'` / ` at end` part of a diagnostic.
fn location(token: Option<&String>) -> String {
    token.map_or_else(|| " at end".to_string(), |t| format!(" at '{t}'"))
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter { character, line } => {
                write!(f, "Error on line {line}: Unexpected character '{character}'.")
            },
            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string.")
            },
            Self::UnterminatedComment { line } => {
                write!(f, "Error on line {line}: Unterminated comment.")
            },
            Self::UnexpectedToken { token,
                                    message,
                                    line, } => {
                write!(f, "Error on line {line}{}: {message}", location(token.as_ref()))
            },
            Self::InvalidAssignmentTarget { token, line } => {
                write!(f, "Error on line {line} at '{token}': Invalid assignment target.")
            },
            Self::TooManyParameters { token, line } => write!(f,
                                                              "Error on line {line} at '{token}': Can't have more than 255 parameters."),
            Self::TooManyArguments { token, line } => write!(f,
                                                             "Error on line {line}{}: Can't have more than 255 arguments.",
                                                             location(token.as_ref())),
        }
    }
}

impl std::error::Error for ParseError {}
