/// The dynamic value type.
///
/// Defines `Value`, the tagged union every expression evaluates to, along
/// with truthiness, equality and the canonical rendering used by `print`.
pub mod core;
/// User-defined function values.
///
/// A function value pairs a shared declaration with the scope it was
/// declared in.
pub mod function;
