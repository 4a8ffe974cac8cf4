use std::fmt::Display;

use super::r#type::PrimitiveType;

/// A typed numeric value. Integers never silently become floats or back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn zero(ty: PrimitiveType) -> Self {
        match ty {
            PrimitiveType::Int => Number::Int(0),
            PrimitiveType::Float => Number::Float(0.0),
        }
    }

    /// Parses a number literal as produced by the lexer. A fractional part
    /// makes it a float literal.
    pub fn from_literal(lexeme: &str) -> Option<Self> {
        if lexeme.contains('.') {
            lexeme
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Number::Float)
        } else {
            lexeme.parse().ok().map(Number::Int)
        }
    }

    pub fn ty(&self) -> PrimitiveType {
        match self {
            Number::Int(_) => PrimitiveType::Int,
            Number::Float(_) => PrimitiveType::Float,
        }
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }

    /// Integer reading of the value, as used for array subscripts.
    pub fn as_index(&self) -> i64 {
        match *self {
            Number::Int(i) => i,
            Number::Float(f) => f.trunc() as i64,
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            // plain decimal notation, always with a fractional part
            Number::Float(fl) if fl.fract() == 0.0 => write!(f, "{}.0", fl),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// Where an assignment writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LValue {
    Scalar(String),
    Element(String, usize),
}

impl LValue {
    pub fn name(&self) -> &str {
        match self {
            LValue::Scalar(name) | LValue::Element(name, _) => name,
        }
    }
}

impl Display for LValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LValue::Scalar(name) => write!(f, "{}", name),
            LValue::Element(name, index) => write!(f, "{}[{}]", name, index),
        }
    }
}
