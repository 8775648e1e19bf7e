//! Arithmetic expressions in one variable `x`.
//!
//! - `lexer`: source text to tokens
//! - `parser`: tokens to an `Expr` tree
//! - `eval`: `Expr` evaluated at sample points

pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;

pub use error::{ExprError, Span};
pub use eval::evaluate;
pub use parser::{Expr, parse};

/// Parse `source` and evaluate it at every x-value.
pub fn sample(source: &str, xs: &[f64]) -> Result<Vec<f64>, ExprError> {
    let expr = parse(source)?;
    evaluate(&expr, xs)
}
