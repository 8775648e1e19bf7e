//! Expression error types with span-based diagnostics.

use std::fmt;

use crate::error::AppError;

/// Byte span into the expression source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Errors produced while lexing, parsing, or evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Unexpected character or malformed number.
    LexError { message: String, span: Span },
    /// Unexpected token, unknown name, or missing construct.
    ParseError { message: String, span: Span },
    /// The expression is undefined at a sample point.
    EvalError { message: String, x: f64 },
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LexError { message, span } => {
                write!(f, "lex error at {}-{}: {message}", span.start, span.end)
            }
            Self::ParseError { message, span } => {
                write!(f, "parse error at {}-{}: {message}", span.start, span.end)
            }
            Self::EvalError { message, x } => write!(f, "cannot evaluate at x = {x}: {message}"),
        }
    }
}

impl std::error::Error for ExprError {}

impl From<ExprError> for AppError {
    fn from(e: ExprError) -> Self {
        match e {
            ExprError::EvalError { .. } => AppError::evaluation(e.to_string()),
            _ => AppError::invalid_input(format!("Invalid expression: {e}")),
        }
    }
}
