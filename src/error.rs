/// Parsing errors.
///
/// Defines all error types that can occur during scanning and parsing of
/// source code: unexpected characters, unterminated literals, and grammar
/// violations. The parser collects these instead of stopping at the first
/// one.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: type
/// mismatches, undefined variables, bad calls and output failures.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Exit status for a program rejected by the scanner or parser.
pub const EXIT_SYNTAX_ERROR: u8 = 65;
/// Exit status for a program that failed while running.
pub const EXIT_RUNTIME_ERROR: u8 = 70;
/// Exit status for a script that could not be read.
pub const EXIT_IO_ERROR: u8 = 74;

#[derive(Debug, Clone, PartialEq, Eq)]
/// The outcome of a failed run: either the program never started because of
/// syntax errors, or it stopped at a runtime error.
pub enum LoxError {
    /// Every diagnostic collected while scanning and parsing.
    Syntax(Vec<ParseError>),
    /// The runtime error that stopped evaluation.
    Runtime(RuntimeError),
}

impl LoxError {
    /// The process exit status this failure maps to.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Syntax(_) => EXIT_SYNTAX_ERROR,
            Self::Runtime(_) => EXIT_RUNTIME_ERROR,
        }
    }
}

impl From<RuntimeError> for LoxError {
    fn from(error: RuntimeError) -> Self {
        Self::Runtime(error)
    }
}

impl std::fmt::Display for LoxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(errors) => {
                for (index, error) in errors.iter().enumerate() {
                    if index > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{error}")?;
                }
                Ok(())
            },
            Self::Runtime(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for LoxError {}
