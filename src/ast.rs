use std::{fmt, rc::Rc};

use crate::{interpreter::lexer::Token, util::num::format_number};

/// Represents a literal value in the language.
///
/// `LiteralValue` covers all raw, constant values that can appear directly in
/// source code: numbers, strings, booleans and `nil`. It is used in the AST
/// to represent literal expressions and as the literal payload of number and
/// string tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// The absence of a value, written `nil`.
    Nil,
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A double-precision floating-point literal.
    Number(f64),
    /// A string literal, without its surrounding quotes.
    Str(String),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Operator and name tokens are kept whole so that evaluation errors can
/// point at the exact source line. Nodes are immutable once the parser has
/// built them and own their children outright.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant (number, string, boolean or `nil`).
    Literal {
        /// The constant value.
        value: LiteralValue,
    },
    /// A parenthesized sub-expression.
    Grouping {
        /// The inner expression.
        expr: Box<Self>,
    },
    /// A prefix `!` or `-`.
    Unary {
        /// The operator token.
        operator: Token,
        /// The operand.
        right:    Box<Self>,
    },
    /// Arithmetic, comparison and equality operators.
    Binary {
        /// Left operand.
        left:     Box<Self>,
        /// The operator token.
        operator: Token,
        /// Right operand.
        right:    Box<Self>,
    },
    /// Short-circuiting `and` / `or`.
    Logical {
        /// Left operand, always evaluated.
        left:     Box<Self>,
        /// The `and` or `or` token.
        operator: Token,
        /// Right operand, evaluated only when the left one does not decide.
        right:    Box<Self>,
    },
    /// A read of a named binding.
    Variable {
        /// The name being read.
        name: Token,
    },
    /// A write to an existing named binding. Yields the assigned value.
    Assign {
        /// The name being written.
        name:  Token,
        /// The new value.
        value: Box<Self>,
    },
    /// A function invocation.
    Call {
        /// The expression producing the callee.
        callee:    Box<Self>,
        /// The closing parenthesis, kept to attribute errors to a line.
        paren:     Token,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Self>,
    },
}

impl Expr {
    /// Builds a literal node.
    #[must_use]
    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        Self::Literal { value: value.into() }
    }
}

/// A user-defined function declaration.
///
/// Declarations are shared behind an `Rc` so that every function value
/// created from one can point at the same parameter list and body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   Token,
    /// The parameter names, in order.
    pub params: Vec<Token>,
    /// The statements of the body.
    pub body:   Vec<Statement>,
}

/// A statement node.
///
/// A `for` loop has no node of its own: the parser lowers it into a
/// [`Statement::Block`] holding the initializer and a [`Statement::While`].
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression evaluated for its side effects.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
    },
    /// Writes the rendered value of an expression to the output.
    Print {
        /// The `print` keyword, kept for its line.
        keyword: Token,
        /// The expression to print.
        expr:    Expr,
    },
    /// A variable declaration using `var`.
    Var {
        /// The name of the variable.
        name:        Token,
        /// The initial value; `nil` when absent.
        initializer: Option<Expr>,
    },
    /// A braced list of statements with its own scope.
    Block {
        /// Statements inside the block.
        statements: Vec<Self>,
    },
    /// A conditional with an optional `else`.
    If {
        /// The condition, tested for truthiness.
        condition:   Expr,
        /// Executed when the condition is truthy.
        then_branch: Box<Self>,
        /// Executed when the condition is falsey.
        else_branch: Option<Box<Self>>,
    },
    /// A pre-tested loop.
    While {
        /// The condition, re-evaluated before every iteration.
        condition: Expr,
        /// The loop body.
        body:      Box<Self>,
    },
    /// A function declaration.
    Function(Rc<FunctionDef>),
    /// Leaves the enclosing function, optionally carrying a value.
    Return {
        /// The `return` keyword, kept for its line.
        keyword: Token,
        /// The returned value; `nil` when absent.
        value:   Option<Expr>,
    },
    /// A class declaration. Accepted by the grammar but not executable.
    Class {
        /// The name of the class.
        name:       Token,
        /// The superclass reference, always an [`Expr::Variable`].
        superclass: Option<Expr>,
        /// Method declarations.
        methods:    Vec<Rc<FunctionDef>>,
    },
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{}", format_number(*n)),
            Self::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

/// Renders an expression as an S-expression, e.g. `(+ 1 (* 2 3))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal { value } => write!(f, "{value}"),
            Self::Grouping { expr } => write!(f, "(group {expr})"),
            Self::Unary { operator, right } => write!(f, "({} {right})", operator.lexeme),
            Self::Binary { left,
                           operator,
                           right, }
            | Self::Logical { left,
                              operator,
                              right, } => write!(f, "({} {left} {right})", operator.lexeme),
            Self::Variable { name } => write!(f, "{}", name.lexeme),
            Self::Assign { name, value } => write!(f, "(= {} {value})", name.lexeme),
            Self::Call { callee, arguments, .. } => {
                write!(f, "(call {callee}")?;
                for argument in arguments {
                    write!(f, " {argument}")?;
                }
                write!(f, ")")
            },
        }
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(fun {} (", self.name.lexeme)?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", param.lexeme)?;
        }
        write!(f, ")")?;
        for statement in &self.body {
            write!(f, " {statement}")?;
        }
        write!(f, ")")
    }
}

/// Renders a statement as an S-expression, e.g. `(var x 1)`.
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression { expr } => write!(f, "(; {expr})"),
            Self::Print { expr, .. } => write!(f, "(print {expr})"),
            Self::Var { name, initializer } => match initializer {
                Some(init) => write!(f, "(var {} {init})", name.lexeme),
                None => write!(f, "(var {})", name.lexeme),
            },
            Self::Block { statements } => {
                write!(f, "(block")?;
                for statement in statements {
                    write!(f, " {statement}")?;
                }
                write!(f, ")")
            },
            Self::If { condition,
                       then_branch,
                       else_branch, } => match else_branch {
                Some(else_branch) => write!(f, "(if {condition} {then_branch} {else_branch})"),
                None => write!(f, "(if {condition} {then_branch})"),
            },
            Self::While { condition, body } => write!(f, "(while {condition} {body})"),
            Self::Function(def) => write!(f, "{def}"),
            Self::Return { value, .. } => match value {
                Some(value) => write!(f, "(return {value})"),
                None => write!(f, "(return)"),
            },
            Self::Class { name,
                          superclass,
                          methods, } => {
                write!(f, "(class {}", name.lexeme)?;
                if let Some(superclass) = superclass {
                    write!(f, " < {superclass}")?;
                }
                for method in methods {
                    write!(f, " {method}")?;
                }
                write!(f, ")")
            },
        }
    }
}
