/// Parser state and shared helpers.
///
/// Holds the token cursor, the collected diagnostics and the panic-mode
/// recovery routine, and exposes [`parse`] as the entry point.
pub mod core;

/// Unary, call and primary expressions.
///
/// Parses prefix operators, postfix call chains and atoms such as literals,
/// identifiers and parenthesized expressions.
pub mod unary;

/// Binary-level expressions.
///
/// Parses assignment and every left-associative infix level, from logical
/// `or` down to multiplicative operators.
pub mod binary;

/// Declarations and statements.
///
/// Parses variable, function and class declarations plus every statement
/// form, lowering `for` loops into blocks and `while` loops.
pub mod statement;

pub use self::core::{MAX_ARITY, Parser, Program, parse};
