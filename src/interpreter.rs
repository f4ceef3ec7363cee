/// The environment module implements lexical scopes.
///
/// Each scope maps names to values and links to the scope enclosing it. The
/// chain is walked outward for lookups and assignments.
pub mod environment;
/// The evaluator module executes syntax trees.
///
/// The evaluator walks statements and expressions depth first, left to
/// right, producing a value for every expression and a side effect for every
/// statement.
///
/// # Responsibilities
/// - Evaluates operators, variable access, assignment and calls.
/// - Executes blocks, conditionals, loops, function declarations and
///   `return`.
/// - Reports runtime errors such as type mismatches or undefined names.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as numbers,
/// strings, identifiers, operators, punctuation and keywords. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with kind, lexeme,
///   literal value and source line.
/// - Skips whitespace and comments, including nested block comments.
/// - Reports lexical errors without stopping the scan.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// The parser processes the token stream produced by the lexer and constructs
/// the statements and expressions of a program by recursive descent.
///
/// # Responsibilities
/// - Encodes operator precedence and associativity.
/// - Lowers `for` loops into `while` loops.
/// - Recovers from syntax errors so one pass reports as many as possible.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Values are `nil`, booleans, numbers, strings and functions.
pub mod value;
