/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, its `Config`, the `Flow` signal that carries
/// `return` out of nested statements, and the dispatch over node kinds.
pub mod core;

/// Statement execution.
///
/// Runs declarations, `print`, blocks, conditionals and loops, and restores
/// the previous scope on every exit from a block.
pub mod statement;

/// Binary operator evaluation logic.
///
/// Handles arithmetic, string concatenation, comparisons and equality.
pub mod binary;

/// Short-circuiting `and` / `or`.
pub mod logic;

/// Unary operator evaluation logic.
///
/// Implements numeric negation and logical not.
pub mod unary;

/// Function calls.
///
/// Evaluates callee and arguments, checks arity and call depth, and runs the
/// body in a fresh scope.
pub mod function;
