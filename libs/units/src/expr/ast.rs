//! Equation AST with evaluation, inversion and rendering

use crate::error::ExprError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal; `text` is the source spelling used when rendering.
    Number { value: f64, text: String },
    /// The free variable `x`.
    Var,
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Evaluate with `x` bound to `x`. The result is always finite.
    pub fn eval(&self, x: f64) -> Result<f64, ExprError> {
        let value = self.eval_inner(x)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ExprError::NonFinite)
        }
    }

    fn eval_inner(&self, x: f64) -> Result<f64, ExprError> {
        match self {
            Expr::Number { value, .. } => Ok(*value),
            Expr::Var => Ok(x),
            Expr::Neg(inner) => Ok(-inner.eval_inner(x)?),
            Expr::Binary { op, left, right } => {
                let l = left.eval_inner(x)?;
                let r = right.eval_inner(x)?;
                match op {
                    BinaryOp::Add => Ok(l + r),
                    BinaryOp::Sub => Ok(l - r),
                    BinaryOp::Mul => Ok(l * r),
                    BinaryOp::Div if r == 0.0 => Err(ExprError::DivisionByZero),
                    BinaryOp::Div => Ok(l / r),
                }
            }
        }
    }

    /// Number of occurrences of `x`.
    pub fn var_count(&self) -> usize {
        match self {
            Expr::Number { .. } => 0,
            Expr::Var => 1,
            Expr::Neg(inner) => inner.var_count(),
            Expr::Binary { left, right, .. } => left.var_count() + right.var_count(),
        }
    }

    pub fn contains_var(&self) -> bool {
        self.var_count() > 0
    }

    /// Value of an `x`-free subexpression.
    pub fn constant(&self) -> Option<f64> {
        if self.contains_var() {
            return None;
        }
        self.eval(0.0).ok()
    }

    /// `Some(k)` when the expression is a pure scaling `x * k`, `k * x` or `x / k`.
    pub fn scale_factor(&self) -> Option<f64> {
        let Expr::Binary { op, left, right } = self else {
            return None;
        };
        match (op, left.as_ref(), right.as_ref()) {
            (BinaryOp::Mul, Expr::Var, k) | (BinaryOp::Mul, k, Expr::Var) => k.constant(),
            (BinaryOp::Div, Expr::Var, k) => k.constant().filter(|k| *k != 0.0).map(|k| 1.0 / k),
            _ => None,
        }
    }

    /// Algebraic inverse: an expression in `x` that maps this expression's
    /// output back to its input.
    ///
    /// Requires `x` to occur exactly once. Each operator on the path from the
    /// root down to `x` is undone in turn.
    pub fn invert(&self) -> Result<Expr, ExprError> {
        match self.var_count() {
            0 => return Err(ExprError::NotInvertible("equation does not reference x")),
            1 => {}
            _ => return Err(ExprError::NotInvertible("x occurs more than once")),
        }

        let mut acc = Expr::Var;
        let mut node = self;
        loop {
            match node {
                Expr::Var => return Ok(acc),
                Expr::Number { .. } => {
                    return Err(ExprError::NotInvertible("equation does not reference x"))
                }
                Expr::Neg(inner) => {
                    acc = Expr::Neg(Box::new(acc));
                    node = inner;
                }
                Expr::Binary { op, left, right } => {
                    let x_on_left = left.contains_var();
                    let (var_side, constant) = if x_on_left {
                        (left.as_ref(), right.as_ref())
                    } else {
                        (right.as_ref(), left.as_ref())
                    };

                    if *op == BinaryOp::Mul && constant.constant() == Some(0.0) {
                        return Err(ExprError::NotInvertible("multiplication by zero"));
                    }

                    let c = constant.clone();
                    acc = match (op, x_on_left) {
                        (BinaryOp::Add, _) => Expr::binary(BinaryOp::Sub, acc, c),
                        (BinaryOp::Mul, _) => Expr::binary(BinaryOp::Div, acc, c),
                        (BinaryOp::Sub, true) => Expr::binary(BinaryOp::Add, acc, c),
                        (BinaryOp::Sub, false) => Expr::binary(BinaryOp::Sub, c, acc),
                        (BinaryOp::Div, true) => Expr::binary(BinaryOp::Mul, acc, c),
                        (BinaryOp::Div, false) => Expr::binary(BinaryOp::Div, c, acc),
                    };
                    node = var_side;
                }
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Neg(_) => 3,
            Expr::Number { .. } | Expr::Var => 4,
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number { text, .. } => f.write_str(text),
            Expr::Var => f.write_str("x"),
            Expr::Neg(inner) => {
                f.write_str("-")?;
                write_operand(f, inner, inner.precedence() < 3)
            }
            Expr::Binary { op, left, right } => {
                let prec = op.precedence();
                write_operand(f, left, left.precedence() < prec)?;
                write!(f, " {} ", op.symbol())?;
                // Subtraction and division do not associate to the right.
                let right_parens = right.precedence() < prec
                    || (right.precedence() == prec && matches!(op, BinaryOp::Sub | BinaryOp::Div));
                write_operand(f, right, right_parens)
            }
        }
    }
}
