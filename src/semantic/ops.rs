use std::fmt::Display;

use crate::lexer::token::TokenType;

use super::value::Number;
use super::SemanticErrorKind;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Plus,
    Minus,
    Mul,
    Div,

    Eq,
    NotEq,
    Greater,
    GreaterEq,
    Lesser,
    LesserEq,
}

impl BinaryOp {
    pub fn from_token_type(tt: TokenType) -> Option<Self> {
        match tt {
            TokenType::Plus => Some(BinaryOp::Plus),
            TokenType::Minus => Some(BinaryOp::Minus),
            TokenType::Star => Some(BinaryOp::Mul),
            TokenType::Slash => Some(BinaryOp::Div),
            TokenType::EqEqual => Some(BinaryOp::Eq),
            TokenType::BangEq => Some(BinaryOp::NotEq),
            TokenType::Greater => Some(BinaryOp::Greater),
            TokenType::GreaterEq => Some(BinaryOp::GreaterEq),
            TokenType::Lesser => Some(BinaryOp::Lesser),
            TokenType::LesserEq => Some(BinaryOp::LesserEq),
            _ => None,
        }
    }

    pub fn is_relational(&self) -> bool {
        !matches!(
            self,
            BinaryOp::Plus | BinaryOp::Minus | BinaryOp::Mul | BinaryOp::Div
        )
    }

    /// Evaluates `lhs op rhs`. Both operands must have the same type;
    /// comparisons always yield an `int` 0 or 1.
    pub fn apply(&self, lhs: Number, rhs: Number) -> Result<Number, SemanticErrorKind> {
        // a mismatched zero divisor is reported as a type error
        if *self == BinaryOp::Div && lhs.ty() == rhs.ty() && rhs.is_zero() {
            return Err(SemanticErrorKind::DivisionByZero);
        }

        match (lhs, rhs) {
            (Number::Int(l), Number::Int(r)) => Ok(self.apply_int(l, r)),
            (Number::Float(l), Number::Float(r)) => match self.apply_float(l, r) {
                Number::Float(res) if !res.is_finite() => Err(SemanticErrorKind::FloatOverflow {
                    op: self.to_string(),
                }),
                res => Ok(res),
            },
            _ => Err(SemanticErrorKind::TypeMismatch {
                op: self.to_string(),
                lhs: lhs.ty(),
                rhs: rhs.ty(),
            }),
        }
    }

    fn apply_int(&self, l: i64, r: i64) -> Number {
        match self {
            BinaryOp::Plus => Number::Int(l.wrapping_add(r)),
            BinaryOp::Minus => Number::Int(l.wrapping_sub(r)),
            BinaryOp::Mul => Number::Int(l.wrapping_mul(r)),
            BinaryOp::Div => Number::Int(l.wrapping_div(r)),
            _ => truth(self.compare(&l, &r)),
        }
    }

    fn apply_float(&self, l: f64, r: f64) -> Number {
        match self {
            BinaryOp::Plus => Number::Float(l + r),
            BinaryOp::Minus => Number::Float(l - r),
            BinaryOp::Mul => Number::Float(l * r),
            BinaryOp::Div => Number::Float(l / r),
            _ => truth(self.compare(&l, &r)),
        }
    }

    fn compare<T: PartialOrd>(&self, l: &T, r: &T) -> bool {
        match self {
            BinaryOp::Eq => l == r,
            BinaryOp::NotEq => l != r,
            BinaryOp::Greater => l > r,
            BinaryOp::GreaterEq => l >= r,
            BinaryOp::Lesser => l < r,
            BinaryOp::LesserEq => l <= r,
            _ => unreachable!("{} is not a comparison", self),
        }
    }
}

fn truth(b: bool) -> Number {
    Number::Int(b as i64)
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",

            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEq => ">=",
            BinaryOp::Lesser => "<",
            BinaryOp::LesserEq => "<=",
        };
        write!(f, "{}", op)
    }
}
