//! Recursive-descent parser producing an `Expr` tree.
//!
//! Grammar (lowest to highest precedence):
//!
//! ```text
//! expr     := additive
//! additive := term (('+' | '-') term)*
//! term     := unary (('*' | '/') unary)*
//! unary    := ('+' | '-') unary | power
//! power    := primary ('**' unary)?
//! primary  := number | 'x' | constant | func '(' expr ')' | '(' expr ')'
//! ```
//!
//! Power is right-associative and binds tighter than a leading minus, so
//! `-x**2` is `-(x**2)` and `2**-1` is `0.5`.

use crate::expr::error::{ExprError, Span};
use crate::expr::lexer::{Token, TokenKind, tokenize};

/// The single free variable.
pub const VARIABLE: &str = "x";

/// Supported unary functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Sqrt,
    Abs,
}

impl Func {
    fn from_name(name: &str) -> Option<Func> {
        Some(match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "asin" => Func::Asin,
            "acos" => Func::Acos,
            "atan" => Func::Atan,
            "sinh" => Func::Sinh,
            "cosh" => Func::Cosh,
            "tanh" => Func::Tanh,
            "exp" => Func::Exp,
            "log" | "ln" => Func::Ln,
            "sqrt" => Func::Sqrt,
            "abs" => Func::Abs,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Asin => "asin",
            Func::Acos => "acos",
            Func::Atan => "atan",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Exp => "exp",
            Func::Ln => "log",
            Func::Sqrt => "sqrt",
            Func::Abs => "abs",
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Parsed expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Var,
    Neg(Box<Expr>),
    Call(Func, Box<Expr>),
    BinOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

/// Maximum nesting of parentheses, unary operators, calls and powers, and
/// the maximum depth of the resulting tree. Keeps parsing, evaluation and
/// drop within a bounded stack.
pub const MAX_DEPTH: usize = 256;

/// An expression node together with the depth of its tree.
type Node = (Expr, usize);

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    source_len: usize,
    nesting: usize,
}

impl Parser {
    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .map(|t| t.span)
            .unwrap_or(Span::new(self.source_len, self.source_len))
    }

    fn expect(&mut self, expected: &TokenKind, what: &str) -> Result<(), ExprError> {
        if self.peek_kind() == Some(expected) {
            self.advance();
            return Ok(());
        }
        Err(ExprError::ParseError {
            message: format!("expected {what}"),
            span: self.current_span(),
        })
    }

    fn too_deep(&self) -> ExprError {
        ExprError::ParseError {
            message: "expression nested too deeply".into(),
            span: self.current_span(),
        }
    }

    fn enter(&mut self) -> Result<(), ExprError> {
        if self.nesting >= MAX_DEPTH {
            return Err(self.too_deep());
        }
        self.nesting += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.nesting -= 1;
    }

    /// Check the depth of a freshly built node.
    fn node(&self, expr: Expr, depth: usize) -> Result<Node, ExprError> {
        if depth > MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok((expr, depth))
    }

    fn binary(&self, op: BinOp, (lhs, ld): Node, (rhs, rd): Node) -> Result<Node, ExprError> {
        self.node(
            Expr::BinOp {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            ld.max(rd) + 1,
        )
    }
}

/// Parse an expression in terms of `x`.
pub fn parse(source: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ExprError::ParseError {
            message: "empty expression".into(),
            span: Span::new(0, source.len()),
        });
    }

    let mut p = Parser {
        tokens,
        pos: 0,
        source_len: source.len(),
        nesting: 0,
    };
    let (expr, _) = parse_additive(&mut p)?;

    if p.pos < p.tokens.len() {
        return Err(ExprError::ParseError {
            message: "unexpected trailing input".into(),
            span: p.current_span(),
        });
    }
    Ok(expr)
}

fn parse_additive(p: &mut Parser) -> Result<Node, ExprError> {
    let mut left = parse_term(p)?;
    loop {
        let op = match p.peek_kind() {
            Some(TokenKind::Plus) => BinOp::Add,
            Some(TokenKind::Minus) => BinOp::Sub,
            _ => break,
        };
        p.advance();
        let right = parse_term(p)?;
        left = p.binary(op, left, right)?;
    }
    Ok(left)
}

fn parse_term(p: &mut Parser) -> Result<Node, ExprError> {
    let mut left = parse_unary(p)?;
    loop {
        let op = match p.peek_kind() {
            Some(TokenKind::Star) => BinOp::Mul,
            Some(TokenKind::Slash) => BinOp::Div,
            _ => break,
        };
        p.advance();
        let right = parse_unary(p)?;
        left = p.binary(op, left, right)?;
    }
    Ok(left)
}

fn parse_unary(p: &mut Parser) -> Result<Node, ExprError> {
    match p.peek_kind() {
        Some(TokenKind::Minus) => {
            p.advance();
            p.enter()?;
            let (operand, depth) = parse_unary(p)?;
            p.leave();
            p.node(Expr::Neg(Box::new(operand)), depth + 1)
        }
        Some(TokenKind::Plus) => {
            p.advance();
            p.enter()?;
            let operand = parse_unary(p)?;
            p.leave();
            Ok(operand)
        }
        _ => parse_power(p),
    }
}

fn parse_power(p: &mut Parser) -> Result<Node, ExprError> {
    let base = parse_primary(p)?;
    if matches!(p.peek_kind(), Some(TokenKind::Pow)) {
        p.advance();
        p.enter()?;
        let exponent = parse_unary(p)?;
        p.leave();
        return p.binary(BinOp::Pow, base, exponent);
    }
    Ok(base)
}

fn parse_primary(p: &mut Parser) -> Result<Node, ExprError> {
    let span = p.current_span();
    match p.peek_kind().cloned() {
        Some(TokenKind::Number(n)) => {
            p.advance();
            Ok((Expr::Number(n), 1))
        }
        Some(TokenKind::LParen) => {
            p.advance();
            p.enter()?;
            let inner = parse_additive(p)?;
            p.leave();
            p.expect(&TokenKind::RParen, "')'")?;
            Ok(inner)
        }
        Some(TokenKind::Ident(name)) => {
            p.advance();
            if name == VARIABLE {
                return Ok((Expr::Var, 1));
            }
            match name.as_str() {
                "pi" => return Ok((Expr::Number(std::f64::consts::PI), 1)),
                "E" => return Ok((Expr::Number(std::f64::consts::E), 1)),
                _ => {}
            }
            let Some(func) = Func::from_name(&name) else {
                return Err(ExprError::ParseError {
                    message: format!("unknown name '{name}' (only '{VARIABLE}' is a variable)"),
                    span,
                });
            };
            p.expect(&TokenKind::LParen, &format!("'(' after {name}"))?;
            p.enter()?;
            let (arg, depth) = parse_additive(p)?;
            p.leave();
            p.expect(&TokenKind::RParen, "')'")?;
            p.node(Expr::Call(func, Box::new(arg)), depth + 1)
        }
        Some(other) => Err(ExprError::ParseError {
            message: format!("unexpected token {other:?}"),
            span,
        }),
        None => Err(ExprError::ParseError {
            message: "unexpected end of expression".into(),
            span,
        }),
    }
}
