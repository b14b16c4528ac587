//! Restricted arithmetic language for conversion equations
//!
//! Supported: real-number literals, `+ - * /`, unary minus, parentheses and
//! the single free variable `x`. No identifiers, no function calls.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('-' | '+') unary | primary
//! primary := NUMBER | 'x' | '(' expr ')'
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{BinaryOp, Expr};
pub use parser::parse;
