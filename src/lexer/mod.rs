pub mod token;


use lazy_static::lazy_static;
use std::collections::HashMap;
use std::str::Chars;
use thiserror::Error;
use token::{Span, Token, TokenType};

macro_rules! hash_map {
    ( $( $key: expr => $value: expr ),* $(,)? ) => {{
        let mut m = HashMap::new();
        $(
            m.insert($key, $value);
        )*
        m
    }}
}

macro_rules! multi_char_tok {
    ( $self: ident, $orig: expr; $( $c: literal => $tt: expr ),+ $(,)? ) => {
        match $self.peek() {
            $(
                Some($c) => {
                    $self.advance();
                    Ok($self.make_token($tt))
                }
            )+
            _ => Ok($self.make_token($orig))
        }
    };
}

lazy_static! {
    static ref KEYWORDS: HashMap<&'static str, TokenType> = hash_map! {
        "Program" => TokenType::KProgram,
        "int"     => TokenType::KInt,
        "float"   => TokenType::KFloat,
        "if"      => TokenType::KIf,
        "else"    => TokenType::KElse,
        "while"   => TokenType::KWhile,
        "void"    => TokenType::KVoid,
    };
}

#[derive(Error, Debug, PartialEq)]
pub enum LexerErrorType {
    #[error("invalid digit in {lit_type} literal: {digit:?}")]
    InvalidDigit { lit_type: &'static str, digit: char },

    #[error("number literal `{0}` is out of range")]
    LiteralOutOfRange(String),
}

pub type LexerResult = Result<Token, LexerError>;

#[derive(Error, Debug)]
#[error("lexical error at line {}: {}", .token.line, .error)]
pub struct LexerError {
    pub token: Token,
    #[source]
    pub error: LexerErrorType,
}

/// Anything that hands out tokens one at a time. The parser pulls from it
/// on every successful match and never looks further than one token ahead.
pub trait TokenSource {
    fn next_token(&mut self) -> LexerResult;
}

pub struct Lexer<'a> {
    input_str: &'a str,
    input: Chars<'a>,
    line: usize,
    start: usize,
    current: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input_str: &'a str) -> Self {
        Self {
            input_str,
            input: input_str.chars(),
            line: 1,
            start: 0,
            current: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.clone().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.input.clone();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.input.next()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn make_token(&self, tok_type: TokenType) -> Token {
        Token {
            tok_type,
            lexeme: self.get_lexeme().to_string(),
            line: self.line,
            span: Span(self.start, self.current),
        }
    }

    fn make_error(&self, error: LexerErrorType) -> LexerError {
        LexerError {
            token: self.make_token(TokenType::Unknown),
            error,
        }
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some('\r' | '\t' | ' ') => {
                    self.advance();
                }
                Some('\n') => {
                    self.line += 1;
                    self.advance();
                }
                Some('/') => {
                    if let Some('/') = self.peek_next() {
                        self.advance();
                        self.advance();
                        while let Some(c) = self.advance() {
                            if c == '\n' {
                                self.line += 1;
                                break;
                            }
                        }
                    } else {
                        break;
                    }
                }
                _ => break,
            };
        }
    }

    fn get_lexeme(&self) -> &'a str {
        &self.input_str[self.start..self.current]
    }

    fn digits(&mut self) {
        while let Some('0'..='9') = self.peek() {
            self.advance();
        }
    }

    fn number(&mut self) -> LexerResult {
        self.digits();

        let is_float = matches!(
            (self.peek(), self.peek_next()),
            (Some('.'), Some('0'..='9'))
        );
        if is_float {
            self.advance();
            self.digits();
        }

        if let Some(c) = self.peek() {
            if c == '_' || c.is_ascii_alphanumeric() {
                self.advance();
                let lit_type = if is_float { "float" } else { "int" };
                return Err(self.make_error(LexerErrorType::InvalidDigit { lit_type, digit: c }));
            }
        }

        let in_range = if is_float {
            self.get_lexeme().parse::<f64>().is_ok_and(f64::is_finite)
        } else {
            self.get_lexeme().parse::<i64>().is_ok()
        };
        if !in_range {
            let lexeme = self.get_lexeme().to_string();
            return Err(self.make_error(LexerErrorType::LiteralOutOfRange(lexeme)));
        }

        Ok(self.make_token(TokenType::Number))
    }

    fn identifier(&mut self) -> LexerResult {
        loop {
            match self.peek() {
                Some(c) if c == '_' || c.is_ascii_alphanumeric() => self.advance(),
                _ => break,
            };
        }

        match KEYWORDS.get(self.get_lexeme()) {
            Some(ttype) => Ok(self.make_token(*ttype)),
            None => Ok(self.make_token(TokenType::Identifier)),
        }
    }
}

impl<'a> Lexer<'a> {
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token.tok_type == TokenType::EOF {
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }
}

impl<'a> TokenSource for Lexer<'a> {
    fn next_token(&mut self) -> LexerResult {
        self.skip_whitespace();

        self.start = self.current;
        let Some(c) = self.advance() else {
            return Ok(self.make_token(TokenType::EOF));
        };

        match c {
            '{' => Ok(self.make_token(TokenType::LBrace)),
            '}' => Ok(self.make_token(TokenType::RBrace)),
            '[' => Ok(self.make_token(TokenType::LBracket)),
            ']' => Ok(self.make_token(TokenType::RBracket)),
            '(' => Ok(self.make_token(TokenType::LParen)),
            ')' => Ok(self.make_token(TokenType::RParen)),
            ';' => Ok(self.make_token(TokenType::Semicolon)),
            ',' => Ok(self.make_token(TokenType::Comma)),
            '.' => Ok(self.make_token(TokenType::Dot)),
            '+' => Ok(self.make_token(TokenType::Plus)),
            '-' => Ok(self.make_token(TokenType::Minus)),
            '*' => Ok(self.make_token(TokenType::Star)),
            '/' => Ok(self.make_token(TokenType::Slash)),

            '=' => multi_char_tok!(self, TokenType::Equal; '=' => TokenType::EqEqual),
            '<' => multi_char_tok!(self, TokenType::Lesser; '=' => TokenType::LesserEq),
            '>' => multi_char_tok!(self, TokenType::Greater; '=' => TokenType::GreaterEq),
            '!' => multi_char_tok!(self, TokenType::Unknown; '=' => TokenType::BangEq),

            c if c.is_ascii_digit() => self.number(),
            c if c == '_' || c.is_ascii_alphabetic() => self.identifier(),
            _ => Ok(self.make_token(TokenType::Unknown)),
        }
    }
}
