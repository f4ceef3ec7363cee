//! # treelox
//!
//! treelox is a tree-walking interpreter for Lox, a small dynamically typed
//! scripting language, written in Rust.
//! It scans source text into tokens, parses them into a syntax tree with
//! panic-mode error recovery, and evaluates that tree directly with lexical
//! scoping, control flow and first-class functions.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::Write;

use tracing::debug;

use crate::{
    error::LoxError,
    interpreter::{evaluator::core::Interpreter, lexer::scan, parser::parse},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums that represent the
/// syntactic structure of source code as a tree. The tree is built by the
/// parser and walked by the evaluator, and prints itself as an S-expression.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Keeps the tokens that evaluation errors are attributed to.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during scanning, parsing
/// or evaluating code, each carrying the source line it belongs to, plus the
/// process exit codes they map to.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (scanner, parser, evaluator).
/// - Distinguishes programs rejected before running from programs that
///   failed while running.
pub mod error;
/// Orchestrates the phases of execution.
///
/// This module ties together scanning, parsing, evaluation, scopes and value
/// representations.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, environment
///   and value types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General utilities.
///
/// Currently only the canonical number rendering shared by `print`, the
/// syntax tree printer and diagnostics.
pub mod util;

/// Scans, parses and runs `source` on an existing interpreter.
///
/// Scanner and parser diagnostics are collected together; if there are any,
/// nothing runs and all of them are returned. Otherwise the program runs
/// until it finishes or hits its first runtime error. Definitions stay in
/// the interpreter's global scope afterwards.
///
/// # Examples
/// ```
/// use treelox::{interpreter::evaluator::core::Interpreter, run_source};
///
/// let mut interpreter = Interpreter::new(Vec::new());
/// run_source("fun twice(n) { return n * 2; }", &mut interpreter).unwrap();
/// run_source("print twice(21);", &mut interpreter).unwrap();
///
/// assert_eq!(interpreter.output(), b"42\n");
/// ```
pub fn run_source<W: Write>(source: &str, interpreter: &mut Interpreter<W>) -> Result<(), LoxError> {
    let (tokens, mut errors) = scan(source);
    let program = parse(&tokens);
    errors.extend(program.errors);

    if !errors.is_empty() {
        debug!(count = errors.len(), "rejecting program with syntax errors");
        errors.sort_by_key(error::ParseError::line);
        return Err(LoxError::Syntax(errors));
    }

    interpreter.interpret(&program.statements)?;
    Ok(())
}

/// Runs `source` on a fresh interpreter and returns everything it printed.
///
/// # Errors
/// Returns the syntax errors if the program was rejected, or the runtime
/// error that stopped it. Output printed before a runtime error is lost;
/// use [`run_source`] with your own sink to keep it.
///
/// # Examples
/// ```
/// use treelox::get_output;
///
/// let output = get_output("for (var i = 0; i < 3; i = i + 1) print i;").unwrap();
/// assert_eq!(output, "0\n1\n2\n");
///
/// // 'x' is not defined
/// assert!(get_output("print x;").is_err());
/// ```
pub fn get_output(source: &str) -> Result<String, LoxError> {
    let mut interpreter = Interpreter::new(Vec::new());
    run_source(source, &mut interpreter)?;
    Ok(String::from_utf8_lossy(interpreter.output()).into_owned())
}
