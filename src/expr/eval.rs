//! Expression evaluation.
//!
//! Every intermediate result must be a finite real number. Anything else
//! (division by zero, `log(0)`, `sqrt(-1)`, overflow to infinity) is an
//! `EvalError` for that x-value; no sentinel is ever returned.

use crate::expr::error::ExprError;
use crate::expr::parser::{BinOp, Expr, Func};

impl Expr {
    /// Evaluate at a single point.
    pub fn eval(&self, x: f64) -> Result<f64, ExprError> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Var => x,
            Expr::Neg(operand) => -operand.eval(x)?,
            Expr::Call(func, arg) => apply_func(*func, arg.eval(x)?),
            Expr::BinOp { op, lhs, rhs } => {
                let a = lhs.eval(x)?;
                let b = rhs.eval(x)?;
                match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => {
                        if b == 0.0 {
                            return Err(ExprError::EvalError {
                                message: "division by zero".into(),
                                x,
                            });
                        }
                        a / b
                    }
                    BinOp::Pow => pow(a, b),
                }
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ExprError::EvalError {
                message: describe_non_finite(self, value),
                x,
            })
        }
    }
}

/// Evaluate `expr` at every x-value, in order.
pub fn evaluate(expr: &Expr, xs: &[f64]) -> Result<Vec<f64>, ExprError> {
    xs.iter().map(|&x| expr.eval(x)).collect()
}

fn apply_func(func: Func, v: f64) -> f64 {
    match func {
        Func::Sin => v.sin(),
        Func::Cos => v.cos(),
        Func::Tan => v.tan(),
        Func::Asin => v.asin(),
        Func::Acos => v.acos(),
        Func::Atan => v.atan(),
        Func::Sinh => v.sinh(),
        Func::Cosh => v.cosh(),
        Func::Tanh => v.tanh(),
        Func::Exp => v.exp(),
        Func::Ln => {
            if v > 0.0 {
                v.ln()
            } else {
                f64::NAN
            }
        }
        Func::Sqrt => v.sqrt(),
        Func::Abs => v.abs(),
    }
}

/// Real power. Integer exponents use `powi` so negative bases stay exact.
fn pow(base: f64, exponent: f64) -> f64 {
    if base == 0.0 && exponent < 0.0 {
        return f64::NAN;
    }
    if exponent.fract() == 0.0 && exponent.abs() <= i32::MAX as f64 {
        return base.powi(exponent as i32);
    }
    base.powf(exponent)
}

fn describe_non_finite(expr: &Expr, value: f64) -> String {
    let what = match expr {
        Expr::Call(func, _) => format!("{}(...)", func.name()),
        Expr::BinOp { op: BinOp::Pow, .. } => "power".to_string(),
        _ => "expression".to_string(),
    };
    if value.is_nan() {
        format!("{what} is undefined")
    } else {
        format!("{what} overflows")
    }
}
