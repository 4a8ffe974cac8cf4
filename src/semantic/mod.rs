use thiserror::Error;

pub mod ops;
pub mod symbol_table;
pub mod r#type;
pub mod value;

#[cfg(test)]
mod test;

use r#type::PrimitiveType;

#[derive(Debug, Error, PartialEq)]
pub enum SemanticErrorKind {
    #[error("`{name}` is already declared (previous declaration on line {prev_line})")]
    DuplicateDeclaration { name: String, prev_line: usize },

    #[error("use of undeclared variable `{0}`")]
    UndeclaredVariable(String),

    #[error("type mismatch in {op}: `{lhs}` vs `{rhs}`")]
    TypeMismatch {
        op: String,
        lhs: PrimitiveType,
        rhs: PrimitiveType,
    },

    #[error("`{name}` is not an array (declared on line {decl_line})")]
    NotAnArray { name: String, decl_line: usize },

    #[error("array `{name}` used without an index")]
    ArrayWithoutIndex { name: String },

    #[error("index {index} is out of bounds for `{name}` of size {size}")]
    IndexOutOfBounds {
        name: String,
        index: i64,
        size: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    #[error("result of `{op}` is too large for a float")]
    FloatOverflow { op: String },

    #[error("invalid size `{size}` for array `{name}`; expected a positive int literal")]
    InvalidArraySize { name: String, size: String },
}

impl SemanticErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            SemanticErrorKind::DuplicateDeclaration { .. } => "duplicate declaration",
            SemanticErrorKind::UndeclaredVariable(_) => "undeclared variable",
            SemanticErrorKind::TypeMismatch { .. } => "type mismatch",
            SemanticErrorKind::NotAnArray { .. } => "not an array",
            SemanticErrorKind::ArrayWithoutIndex { .. } => "array without index",
            SemanticErrorKind::IndexOutOfBounds { .. } => "index out of bounds",
            SemanticErrorKind::DivisionByZero => "division by zero",
            SemanticErrorKind::FloatOverflow { .. } => "float overflow",
            SemanticErrorKind::InvalidArraySize { .. } => "invalid array size",
        }
    }
}
