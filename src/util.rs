/// Number rendering helpers.
///
/// Lox has a single numeric type, `f64`, but prints integral values without
/// a fractional part. The helpers here implement that canonical rendering so
/// that `print`, the S-expression printer and error messages agree.
pub mod num;
