//! Equation parser - converts equation strings to [`Expr`]
//!
//! Recursive descent over the restricted grammar.
//! Precedence (lowest to highest):
//! 1. additive (+, -)
//! 2. multiplicative (*, /)
//! 3. polarity (unary +, -)
//! 4. term (number, `x`, parenthesized)

use super::ast::{BinaryOp, Expr};
use super::lexer::Lexer;
use super::token::{Token, TokenType};
use crate::error::ExprError;

/// Bounds the depth of the built tree: each nested group, unary sign and
/// chained binary operator counts one level.
const MAX_RECURSION_DEPTH: usize = 64;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    recursion_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token();
        Self {
            lexer,
            current_token,
            recursion_depth: 0,
        }
    }

    fn advance(&mut self) {
        self.current_token = self.lexer.next_token();
    }

    fn current_token_is(&self, token_type: TokenType) -> bool {
        self.current_token.token_type == token_type
    }

    fn syntax_error(&self, message: impl Into<String>) -> ExprError {
        ExprError::Syntax {
            pos: self.current_token.position,
            message: message.into(),
        }
    }

    /// Parse the entire input as one expression.
    pub fn parse(&mut self) -> Result<Expr, ExprError> {
        if self.current_token_is(TokenType::Eof) {
            return Err(ExprError::UnexpectedEnd);
        }

        let expr = self.parse_additive()?;

        if !self.current_token_is(TokenType::Eof) {
            return Err(self.unexpected());
        }
        Ok(expr)
    }

    fn unexpected(&self) -> ExprError {
        match self.current_token.token_type {
            TokenType::Error => self.syntax_error(self.current_token.value.clone()),
            TokenType::Eof => ExprError::UnexpectedEnd,
            _ => self.syntax_error(format!("unexpected token '{}'", self.current_token.value)),
        }
    }

    fn enter(&mut self) -> Result<(), ExprError> {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            return Err(ExprError::TooDeep(MAX_RECURSION_DEPTH));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.recursion_depth -= 1;
    }

    fn parse_additive(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_multiplicative()?;
        let mut chain = 0;

        loop {
            let op = match self.current_token.token_type {
                TokenType::Plus => BinaryOp::Add,
                TokenType::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.enter()?;
            chain += 1;
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }

        self.recursion_depth -= chain;
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.parse_unary()?;
        let mut chain = 0;

        loop {
            let op = match self.current_token.token_type {
                TokenType::Multiply => BinaryOp::Mul,
                TokenType::Divide => BinaryOp::Div,
                _ => break,
            };
            self.enter()?;
            chain += 1;
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::binary(op, left, right);
        }

        self.recursion_depth -= chain;
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        self.enter()?;
        let expr = match self.current_token.token_type {
            TokenType::Minus => {
                self.advance();
                Expr::Neg(Box::new(self.parse_unary()?))
            }
            TokenType::Plus => {
                self.advance();
                self.parse_unary()?
            }
            _ => self.parse_term()?,
        };
        self.leave();
        Ok(expr)
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        match self.current_token.token_type {
            TokenType::Number => {
                let text = std::mem::take(&mut self.current_token.value);
                let value: f64 = text
                    .parse()
                    .map_err(|_| self.syntax_error(format!("invalid number '{text}'")))?;
                self.advance();
                Ok(Expr::Number { value, text })
            }
            TokenType::Variable => {
                self.advance();
                Ok(Expr::Var)
            }
            TokenType::OpenParen => {
                self.advance();
                let inner = self.parse_additive()?;
                if !self.current_token_is(TokenType::CloseParen) {
                    return Err(match self.current_token.token_type {
                        TokenType::Eof => self.syntax_error("expected ')'"),
                        _ => self.unexpected(),
                    });
                }
                self.advance();
                Ok(inner)
            }
            _ => Err(self.unexpected()),
        }
    }
}

/// Parse an equation string.
pub fn parse(input: &str) -> Result<Expr, ExprError> {
    Parser::new(input).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        let expr = parse("1 + 2 * 3").unwrap();
        assert_eq!(expr.eval(0.0).unwrap(), 7.0);

        let expr = parse("(1 + 2) * 3").unwrap();
        assert_eq!(expr.eval(0.0).unwrap(), 9.0);
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(parse("10 - 4 - 3").unwrap().eval(0.0).unwrap(), 3.0);
        assert_eq!(parse("100 / 10 / 2").unwrap().eval(0.0).unwrap(), 5.0);
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(parse("-x").unwrap().eval(4.0).unwrap(), -4.0);
        assert_eq!(parse("x * -2").unwrap().eval(4.0).unwrap(), -8.0);
        assert_eq!(parse("--x").unwrap().eval(4.0).unwrap(), 4.0);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse(""), Err(ExprError::UnexpectedEnd));
        assert_eq!(parse("x *"), Err(ExprError::UnexpectedEnd));
        assert!(matches!(parse("(x + 1"), Err(ExprError::Syntax { .. })));
        assert!(matches!(parse("x + 1)"), Err(ExprError::Syntax { pos: 5, .. })));
        assert!(matches!(parse("2 x"), Err(ExprError::Syntax { pos: 2, .. })));
        assert!(matches!(parse("y * 2"), Err(ExprError::Syntax { pos: 0, .. })));
    }

    #[test]
    fn test_depth_limit() {
        let input = format!("{}x{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(parse(&input), Err(ExprError::TooDeep(MAX_RECURSION_DEPTH)));
    }

    #[test]
    fn test_long_operator_chains_are_bounded() {
        let sum = format!("x{}", " + 0".repeat(200_000));
        assert_eq!(parse(&sum), Err(ExprError::TooDeep(MAX_RECURSION_DEPTH)));

        let product = format!("x{}", " * 1".repeat(MAX_RECURSION_DEPTH + 1));
        assert_eq!(parse(&product), Err(ExprError::TooDeep(MAX_RECURSION_DEPTH)));

        let short = format!("x{}", " + 1".repeat(20));
        assert_eq!(parse(&short).unwrap().eval(0.0).unwrap(), 20.0);
    }
}
