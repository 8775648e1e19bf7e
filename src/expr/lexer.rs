//! Lexer for arithmetic expressions in one variable.

use crate::expr::error::{ExprError, Span};

/// Token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Token types.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),

    LParen,
    RParen,
    Plus,
    Minus,
    Star,
    Slash,
    /// `**` or `^`
    Pow,
}

/// Tokenize an expression string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let ch = bytes[pos];

        if ch.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let start = pos;

        if ch.is_ascii_digit() || (ch == b'.' && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit)) {
            let (value, end) = lex_number(source, pos)?;
            tokens.push(Token {
                kind: TokenKind::Number(value),
                span: Span::new(start, end),
            });
            pos = end;
            continue;
        }

        if ch.is_ascii_alphabetic() || ch == b'_' {
            while pos < bytes.len() && (bytes[pos].is_ascii_alphanumeric() || bytes[pos] == b'_') {
                pos += 1;
            }
            tokens.push(Token {
                kind: TokenKind::Ident(source[start..pos].to_string()),
                span: Span::new(start, pos),
            });
            continue;
        }

        let (kind, len) = match ch {
            b'(' => (TokenKind::LParen, 1),
            b')' => (TokenKind::RParen, 1),
            b'+' => (TokenKind::Plus, 1),
            b'-' => (TokenKind::Minus, 1),
            b'*' if bytes.get(pos + 1) == Some(&b'*') => (TokenKind::Pow, 2),
            b'*' => (TokenKind::Star, 1),
            b'/' => (TokenKind::Slash, 1),
            b'^' => (TokenKind::Pow, 1),
            _ => {
                let bad = source[pos..].chars().next().unwrap_or('?');
                return Err(ExprError::LexError {
                    message: format!("unexpected character '{bad}'"),
                    span: Span::new(start, start + bad.len_utf8()),
                });
            }
        };
        tokens.push(Token {
            kind,
            span: Span::new(start, start + len),
        });
        pos += len;
    }

    Ok(tokens)
}

/// Lex a decimal number with an optional exponent, returning the value and end offset.
fn lex_number(source: &str, start: usize) -> Result<(f64, usize), ExprError> {
    let bytes = source.as_bytes();
    let mut pos = start;

    while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
        pos += 1;
    }

    // Exponent only if digits follow; otherwise `e`/`E` starts the next token.
    if pos < bytes.len() && (bytes[pos] == b'e' || bytes[pos] == b'E') {
        let mut look = pos + 1;
        if look < bytes.len() && (bytes[look] == b'+' || bytes[look] == b'-') {
            look += 1;
        }
        if look < bytes.len() && bytes[look].is_ascii_digit() {
            pos = look;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
        }
    }

    let text = &source[start..pos];
    let value = text.parse::<f64>().map_err(|_| ExprError::LexError {
        message: format!("malformed number '{text}'"),
        span: Span::new(start, pos),
    })?;
    Ok((value, pos))
}
