#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur during evaluation.
///
/// Every variant carries the line of the token the failure is attributed to.
/// Evaluation stops at the first runtime error.
pub enum RuntimeError {
    /// A unary operator was applied to a non-number.
    OperandMustBeNumber {
        /// The operator's lexeme.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An arithmetic or comparison operator got a non-number operand.
    OperandsMustBeNumbers {
        /// The operator's lexeme.
        operator: String,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// `+` got something other than two numbers or two strings.
    OperandsMustBeNumbersOrStrings {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to read or assign a name that no enclosing scope defines.
    UndefinedVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// The callee of a call expression is not callable.
    NotCallable {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The wrong number of arguments was supplied to a function.
    ArgumentCountMismatch {
        /// The number of declared parameters.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Function calls nested deeper than the configured limit.
    StackOverflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A class declaration was executed.
    ClassesUnsupported {
        /// The name of the class.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Writing to the output sink failed.
    Output {
        /// The underlying I/O error, rendered.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl RuntimeError {
    /// The source line the error is attributed to.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::OperandMustBeNumber { line, .. }
            | Self::OperandsMustBeNumbers { line, .. }
            | Self::OperandsMustBeNumbersOrStrings { line }
            | Self::UndefinedVariable { line, .. }
            | Self::NotCallable { line }
            | Self::ArgumentCountMismatch { line, .. }
            | Self::StackOverflow { line }
            | Self::ClassesUnsupported { line, .. }
            | Self::Output { line, .. } => *line,
        }
    }

    /// The message without the line prefix.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::OperandMustBeNumber { operator, .. } => {
                format!("Operand of '{operator}' must be a number.")
            },
            Self::OperandsMustBeNumbers { operator, .. } => {
                format!("Operands of '{operator}' must be numbers.")
            },
            Self::OperandsMustBeNumbersOrStrings { .. } => {
                "Operands of '+' must be two numbers or two strings.".to_string()
            },
            Self::UndefinedVariable { name, .. } => format!("Undefined variable '{name}'."),
            Self::NotCallable { .. } => "Can only call functions and classes.".to_string(),
            Self::ArgumentCountMismatch { expected, found, .. } => {
                format!("Expected {expected} arguments but got {found}.")
            },
            Self::StackOverflow { .. } => "Stack overflow.".to_string(),
            Self::ClassesUnsupported { .. } => "Classes are not supported.".to_string(),
            Self::Output { details, .. } => format!("Failed to write output: {details}."),
        }
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error on line {}: {}", self.line(), self.message())
    }
}

impl std::error::Error for RuntimeError {}
