use std::fmt::Display;

use crate::lexer::token::TokenType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Int,
    Float,
}

impl PrimitiveType {
    pub fn from_keyword(tt: TokenType) -> Option<Self> {
        match tt {
            TokenType::KInt => Some(PrimitiveType::Int),
            TokenType::KFloat => Some(PrimitiveType::Float),
            _ => None,
        }
    }
}

impl Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrimitiveType::Int => write!(f, "int"),
            PrimitiveType::Float => write!(f, "float"),
        }
    }
}
