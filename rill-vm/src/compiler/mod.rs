// rill-vm - Bytecode compiler and virtual machine for the Rill scripting language
// Copyright (c) 2025 The Rill Authors. MIT licensed.

//! Single-pass bytecode compiler.
//!
//! Parses Rill expressions with a Pratt parser and emits bytecode directly
//! into a chunk as it goes; there is no intermediate tree. Each token kind
//! maps to optional prefix/infix behaviour plus a precedence level, and
//! `parse_precedence` drives the climb.

pub mod scanner;

use thiserror::Error;

use crate::chunk::Chunk;
use crate::object::ObjString;
use crate::opcode::OpCode;
use crate::value::Value;

use scanner::{Scanner, Token, TokenKind};

/// Error during compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Source text that does not parse as an expression.
    #[error("[line {line}] error: {message}")]
    Syntax { line: u32, message: String },

    /// The chunk's constant pool is full.
    #[error("[line {line}] error: too many constants in one chunk")]
    TooManyConstants { line: u32 },
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Compile a single expression into a fresh chunk.
///
/// The chunk ends with a `Return` so the expression's value is handed back
/// to the engine's caller. On failure nothing is executed; the error
/// carries the offending source line.
pub fn compile(source: &str) -> Result<Chunk> {
    let mut parser = Parser::new(source);
    parser.advance()?;
    parser.expression()?;
    parser.consume(TokenKind::Eof, "expected end of expression")?;
    parser.emit_op(OpCode::Return);
    Ok(parser.chunk)
}

/// Operator precedence, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    None,
    Equality,   // == !=
    Comparison, // < > <= >=
    Term,       // + -
    Factor,     // * /
    Unary,      // ! -
    Primary,
}

impl Precedence {
    /// The next-tighter level, used for left-associative infix operators.
    fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Unary,
            Precedence::Unary | Precedence::Primary => Precedence::Primary,
        }
    }
}

/// Infix precedence of a token kind; `None` for non-operators.
fn infix_precedence(kind: TokenKind) -> Precedence {
    match kind {
        TokenKind::EqualEqual | TokenKind::BangEqual => Precedence::Equality,
        TokenKind::Greater
        | TokenKind::GreaterEqual
        | TokenKind::Less
        | TokenKind::LessEqual => Precedence::Comparison,
        TokenKind::Plus | TokenKind::Minus => Precedence::Term,
        TokenKind::Star | TokenKind::Slash => Precedence::Factor,
        _ => Precedence::None,
    }
}

struct Parser<'a> {
    scanner: Scanner<'a>,
    current: Token,
    previous: Token,
    chunk: Chunk,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        let placeholder = Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            line: 1,
        };
        Self {
            scanner: Scanner::new(source),
            current: placeholder.clone(),
            previous: placeholder,
            chunk: Chunk::new(),
        }
    }

    fn advance(&mut self) -> Result<()> {
        let next = self.scanner.scan_token();
        if next.kind == TokenKind::Error {
            return Err(CompileError::Syntax {
                line: next.line,
                message: next.lexeme,
            });
        }
        self.previous = std::mem::replace(&mut self.current, next);
        Ok(())
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<()> {
        if self.current.kind == kind {
            self.advance()
        } else {
            Err(self.error_at_current(message))
        }
    }

    fn error_at_current(&self, message: &str) -> CompileError {
        let message = if self.current.kind == TokenKind::Eof {
            format!("{} at end", message)
        } else {
            format!("{} at '{}'", message, self.current.lexeme)
        };
        CompileError::Syntax {
            line: self.current.line,
            message,
        }
    }

    fn expression(&mut self) -> Result<()> {
        self.parse_precedence(Precedence::Equality)
    }

    /// Parse everything at `precedence` or tighter, starting with a prefix
    /// form and folding infix operators while they bind at least as hard.
    fn parse_precedence(&mut self, precedence: Precedence) -> Result<()> {
        self.advance()?;
        self.prefix()?;

        while precedence <= infix_precedence(self.current.kind) {
            self.advance()?;
            self.binary()?;
        }
        Ok(())
    }

    fn prefix(&mut self) -> Result<()> {
        match self.previous.kind {
            TokenKind::LeftParen => self.grouping(),
            TokenKind::Minus | TokenKind::Bang => self.unary(),
            TokenKind::Number => self.number(),
            TokenKind::Str => self.string(),
            TokenKind::Nil | TokenKind::True | TokenKind::False => self.literal(),
            _ => {
                let message = if self.previous.kind == TokenKind::Eof {
                    "expected expression at end".to_string()
                } else {
                    format!("expected expression at '{}'", self.previous.lexeme)
                };
                Err(CompileError::Syntax {
                    line: self.previous.line,
                    message,
                })
            }
        }
    }

    fn grouping(&mut self) -> Result<()> {
        self.expression()?;
        self.consume(TokenKind::RightParen, "expected ')' after expression")
    }

    fn unary(&mut self) -> Result<()> {
        let op = self.previous.kind;
        let line = self.previous.line;

        // Compile the operand first; the operator applies to its result.
        self.parse_precedence(Precedence::Unary)?;

        match op {
            TokenKind::Minus => self.emit_at(OpCode::Negate, line),
            _ => self.emit_at(OpCode::Not, line),
        }
        Ok(())
    }

    fn binary(&mut self) -> Result<()> {
        let op = self.previous.kind;
        let line = self.previous.line;

        self.parse_precedence(infix_precedence(op).next())?;

        match op {
            TokenKind::EqualEqual => self.emit_at(OpCode::Equal, line),
            TokenKind::BangEqual => {
                self.emit_at(OpCode::Equal, line);
                self.emit_at(OpCode::Not, line);
            }
            TokenKind::Greater => self.emit_at(OpCode::Greater, line),
            TokenKind::GreaterEqual => {
                self.emit_at(OpCode::Less, line);
                self.emit_at(OpCode::Not, line);
            }
            TokenKind::Less => self.emit_at(OpCode::Less, line),
            TokenKind::LessEqual => {
                self.emit_at(OpCode::Greater, line);
                self.emit_at(OpCode::Not, line);
            }
            TokenKind::Plus => self.emit_at(OpCode::Add, line),
            TokenKind::Minus => self.emit_at(OpCode::Subtract, line),
            TokenKind::Star => self.emit_at(OpCode::Multiply, line),
            TokenKind::Slash => self.emit_at(OpCode::Divide, line),
            _ => {
                return Err(CompileError::Syntax {
                    line,
                    message: format!("expected operator at '{}'", self.previous.lexeme),
                });
            }
        }
        Ok(())
    }

    fn number(&mut self) -> Result<()> {
        let line = self.previous.line;
        let value: f64 = self.previous.lexeme.parse().map_err(|_| CompileError::Syntax {
            line,
            message: format!("invalid number '{}'", self.previous.lexeme),
        })?;
        self.emit_constant(Value::Number(value), line)
    }

    fn string(&mut self) -> Result<()> {
        let line = self.previous.line;
        // The lexeme is a view into the source; duplicate it.
        let string = ObjString::copy(&self.previous.lexeme);
        self.emit_constant(Value::string(string), line)
    }

    fn literal(&mut self) -> Result<()> {
        let line = self.previous.line;
        match self.previous.kind {
            TokenKind::Nil => self.emit_at(OpCode::Nil, line),
            TokenKind::True => self.emit_at(OpCode::True, line),
            _ => self.emit_at(OpCode::False, line),
        }
        Ok(())
    }

    fn emit_at(&mut self, op: OpCode, line: u32) {
        self.chunk.write_op(op, line);
    }

    fn emit_op(&mut self, op: OpCode) {
        let line = self.previous.line;
        self.chunk.write_op(op, line);
    }

    fn emit_constant(&mut self, value: Value, line: u32) -> Result<()> {
        let index = self
            .chunk
            .add_constant(value)
            .ok_or(CompileError::TooManyConstants { line })?;
        self.emit_at(OpCode::Constant, line);
        self.chunk.write(index, line);
        Ok(())
    }
}
