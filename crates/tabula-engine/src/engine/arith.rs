//! Arithmetic expression evaluation.
//!
//! A small recursive-descent parser over a numeric grammar:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Nothing else is accepted: identifiers, commas, or any other symbol are an
//! error at their byte offset.

use crate::error::{EvalError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Token {
    kind: TokenKind,
    pos: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        let kind = match b {
            b' ' | b'\t' | b'\r' | b'\n' => {
                i += 1;
                continue;
            }
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'0'..=b'9' | b'.' => {
                let end = scan_number(bytes, i);
                let n = input[i..end]
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber { pos: i })?;
                tokens.push(Token {
                    kind: TokenKind::Number(n),
                    pos: i,
                });
                i = end;
                continue;
            }
            _ => {
                let ch = input[i..].chars().next().unwrap_or('\u{FFFD}');
                return Err(EvalError::UnexpectedChar { ch, pos: i });
            }
        };
        tokens.push(Token { kind, pos: i });
        i += 1;
    }

    Ok(tokens)
}

/// End offset of the numeric literal starting at `start`.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

struct Parser {
    tokens: Vec<Token>,
    idx: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.idx).copied()
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.peek();
        if tok.is_some() {
            self.idx += 1;
        }
        tok
    }

    fn expr(&mut self) -> Result<f64> {
        let mut acc = self.term()?;
        while let Some(tok) = self.peek() {
            match tok.kind {
                TokenKind::Plus => {
                    self.bump();
                    acc += self.term()?;
                }
                TokenKind::Minus => {
                    self.bump();
                    acc -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<f64> {
        let mut acc = self.unary()?;
        while let Some(tok) = self.peek() {
            match tok.kind {
                TokenKind::Star => {
                    self.bump();
                    acc *= self.unary()?;
                }
                TokenKind::Slash => {
                    self.bump();
                    acc /= self.unary()?;
                    if !acc.is_finite() {
                        return Err(EvalError::NonFinite);
                    }
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    fn unary(&mut self) -> Result<f64> {
        match self.peek().map(|t| t.kind) {
            Some(TokenKind::Minus) => {
                self.bump();
                Ok(-self.unary()?)
            }
            Some(TokenKind::Plus) => {
                self.bump();
                self.unary()
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64> {
        let tok = self.bump().ok_or(EvalError::UnexpectedEnd)?;
        match tok.kind {
            TokenKind::Number(n) => Ok(n),
            TokenKind::LParen => {
                let inner = self.expr()?;
                match self.bump() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(EvalError::TrailingInput { pos: other.pos }),
                    None => Err(EvalError::UnmatchedParen { pos: tok.pos }),
                }
            }
            TokenKind::RParen => Err(EvalError::UnmatchedParen { pos: tok.pos }),
            _ => Err(EvalError::TrailingInput { pos: tok.pos }),
        }
    }
}

/// Evaluate a purely numeric expression.
pub fn eval_arithmetic(input: &str) -> Result<f64> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, idx: 0 };
    let value = parser.expr()?;
    if let Some(tok) = parser.peek() {
        return Err(match tok.kind {
            TokenKind::RParen => EvalError::UnmatchedParen { pos: tok.pos },
            _ => EvalError::TrailingInput { pos: tok.pos },
        });
    }
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}
