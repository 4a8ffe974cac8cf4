use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    KProgram,
    KInt,
    KFloat,
    KIf,
    KElse,
    KWhile,
    KVoid,

    Identifier,
    Number,

    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Semicolon,
    Comma,
    Dot,
    Equal,

    Plus,
    Minus,
    Star,
    Slash,

    Lesser,
    LesserEq,
    Greater,
    GreaterEq,
    EqEqual,
    BangEq,

    Unknown,
    EOF,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::KProgram => "`Program`",
            TokenType::KInt => "`int`",
            TokenType::KFloat => "`float`",
            TokenType::KIf => "`if`",
            TokenType::KElse => "`else`",
            TokenType::KWhile => "`while`",
            TokenType::KVoid => "`void`",

            TokenType::Identifier => "<identifier>",
            TokenType::Number => "<number>",

            TokenType::LBrace => "`{`",
            TokenType::RBrace => "`}`",
            TokenType::LBracket => "`[`",
            TokenType::RBracket => "`]`",
            TokenType::LParen => "`(`",
            TokenType::RParen => "`)`",
            TokenType::Semicolon => "`;`",
            TokenType::Comma => "`,`",
            TokenType::Dot => "`.`",
            TokenType::Equal => "`=`",

            TokenType::Plus => "`+`",
            TokenType::Minus => "`-`",
            TokenType::Star => "`*`",
            TokenType::Slash => "`/`",

            TokenType::Lesser => "`<`",
            TokenType::LesserEq => "`<=`",
            TokenType::Greater => "`>`",
            TokenType::GreaterEq => "`>=`",
            TokenType::EqEqual => "`==`",
            TokenType::BangEq => "`!=`",

            TokenType::Unknown => "<unknown>",
            TokenType::EOF => "<eof>",
        }
    }
}

impl Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span(pub usize, pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub tok_type: TokenType,
    pub lexeme: String,
    pub line: usize,
    pub span: Span,
}
