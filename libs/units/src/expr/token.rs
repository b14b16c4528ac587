//! Token types for the equation lexer

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum TokenType {
    Number,
    Variable, // x

    Plus,       // +
    Minus,      // -
    Multiply,   // *
    Divide,     // /
    OpenParen,  // (
    CloseParen, // )

    Eof,
    Error,
}

/// A token in an equation string. `position` is a byte offset.
#[derive(Debug, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub value: String,
    pub position: usize,
}

impl Token {
    pub fn new(token_type: TokenType, value: impl Into<String>, position: usize) -> Self {
        Self {
            token_type,
            value: value.into(),
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(TokenType::Eof, String::new(), position)
    }

    pub fn error(message: impl Into<String>, position: usize) -> Self {
        Self::new(TokenType::Error, message, position)
    }
}
