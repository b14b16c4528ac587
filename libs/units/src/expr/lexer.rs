//! Equation lexer
//!
//! Splits an equation string into numbers, the variable `x`, the four
//! arithmetic operators and parentheses. Anything else becomes an error token.

use super::token::{Token, TokenType};

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek(&self) -> Option<char> {
        let mut chars = self.input[self.position..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.current_char() {
            self.position += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_digits(&mut self) -> usize {
        let mut count = 0;
        while let Some(c) = self.current_char() {
            if c.is_ascii_digit() {
                self.advance();
                count += 1;
            } else {
                break;
            }
        }
        count
    }

    /// NUMBER: digits ('.' digits)? (('e'|'E') ('+'|'-')? digits)?, or '.' digits
    fn read_number(&mut self) -> Token {
        let start = self.position;
        let int_digits = self.read_digits();

        if self.current_char() == Some('.') {
            self.advance();
            let frac_digits = self.read_digits();
            if int_digits == 0 && frac_digits == 0 {
                return Token::error("expected digits around '.'", start);
            }
        }

        if matches!(self.current_char(), Some('e') | Some('E')) {
            let exp_start = self.position;
            self.advance();
            if matches!(self.current_char(), Some('+') | Some('-')) {
                self.advance();
            }
            if self.read_digits() == 0 {
                return Token::error("expected digits in exponent", exp_start);
            }
        }

        Token::new(TokenType::Number, &self.input[start..self.position], start)
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.position;
        while let Some(c) = self.current_char() {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let ident = &self.input[start..self.position];
        if ident == "x" {
            Token::new(TokenType::Variable, ident, start)
        } else {
            Token::error(format!("unknown identifier '{ident}'"), start)
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let Some(c) = self.current_char() else {
            return Token::eof(start);
        };

        if c.is_ascii_digit() || (c == '.' && self.peek().is_some_and(|n| n.is_ascii_digit())) {
            return self.read_number();
        }
        if c.is_alphabetic() || c == '_' {
            return self.read_identifier();
        }

        let token_type = match c {
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '*' => TokenType::Multiply,
            '/' => TokenType::Divide,
            '(' => TokenType::OpenParen,
            ')' => TokenType::CloseParen,
            other => return Token::error(format!("unexpected character '{other}'"), start),
        };
        self.advance();
        Token::new(token_type, c.to_string(), start)
    }

    /// Tokenize the whole input, stopping after the first `Eof` or `Error`.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = matches!(token.token_type, TokenType::Eof | TokenType::Error);
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }
}
