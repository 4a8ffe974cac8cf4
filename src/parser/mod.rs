mod expr;


use colored::Colorize;
use thiserror::Error;

use crate::lexer::token::{Token, TokenType};
use crate::lexer::{LexerError, LexerErrorType, TokenSource};
use crate::semantic::r#type::PrimitiveType;
use crate::semantic::symbol_table::{SymbolTable, MAX_ARRAY_SIZE};
use crate::semantic::value::Number;
use crate::semantic::SemanticErrorKind;

// <program>               ::= "Program" <identifier> "{" <declaration-list> <statement-list> "}" "."
// <declaration-list>      ::= <declaration> <declaration>*
// <declaration>           ::= <var-declaration>
// <var-declaration>       ::= <type-specifier> <identifier> ( ";" | "[" <number> "]" ";" )
// <type-specifier>        ::= "int" | "float"
// <params>                ::= "void" | <param> ( "," <param> )*
// <param>                 ::= <type-specifier> <identifier> ( "[" "]" )?
// <statement-list>        ::= <statement>*
// <statement>             ::= <assignment-stmt> | <compound-stmt> | <selection-stmt> | <iteration-stmt>
// <compound-stmt>         ::= "{" <statement-list> "}"
// <assignment-stmt>       ::= <var> "=" <expression> ";"?
// <selection-stmt>        ::= "if" "(" <expression> ")" <statement> ( "else" <statement> )?
// <iteration-stmt>        ::= "while" "(" <expression> ")" <statement>
// <var>                   ::= <identifier> ( "[" <expression> "]" )?
// <expression>            ::= <additive-expression> ( <relop> <additive-expression> )*
// <additive-expression>   ::= <term> ( ( "+" | "-" ) <term> )*
// <term>                  ::= <factor> ( ( "*" | "/" ) <factor> )*
// <factor>                ::= "(" <expression> ")" | <var> | <number>
//
// Expressions are evaluated while they are parsed, so the symbol table holds
// the program's final state once `program` returns.

#[derive(Error, Debug)]
#[error("{} at line {}: {}", .error.category(), .token.line, .error)]
pub struct ParseError {
    pub token: Token,
    #[source]
    pub error: ParseErrorType,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseErrorType {
    #[error("expected {exp}, found {found}")]
    Expected { exp: &'static str, found: TokenType },

    #[error(transparent)]
    Lex(LexerErrorType),

    #[error(transparent)]
    Semantic(#[from] SemanticErrorKind),
}

impl ParseErrorType {
    pub fn category(&self) -> &'static str {
        match self {
            ParseErrorType::Expected { .. } => "syntax error",
            ParseErrorType::Lex(_) => "lexical error",
            ParseErrorType::Semantic(kind) => kind.name(),
        }
    }
}

impl ParseError {
    fn new(token: Token, error: ParseErrorType) -> Self {
        Self { token, error }
    }

    fn semantic(token: &Token, kind: SemanticErrorKind) -> Self {
        Self::new(token.clone(), ParseErrorType::Semantic(kind))
    }
}

impl From<LexerError> for ParseError {
    fn from(err: LexerError) -> Self {
        Self::new(err.token, ParseErrorType::Lex(err.error))
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Predictive parser with one token of lookahead. Every grammar rule is a
/// method; declarations fill the symbol table and statements update it as
/// soon as they are recognised.
pub struct Parser<S: TokenSource> {
    source: S,
    current: Token,
    symbols: SymbolTable,
    debug: bool,
}

impl<S: TokenSource> Parser<S> {
    /// Pulls the first token right away.
    pub fn new(source: S) -> ParseResult<Self> {
        Self::with_symbols(source, SymbolTable::new())
    }

    pub fn with_symbols(mut source: S, symbols: SymbolTable) -> ParseResult<Self> {
        let current = source.next_token()?;
        Ok(Self {
            source,
            current,
            symbols,
            debug: false,
        })
    }

    /// Traces every matched token and evaluated expression to stderr.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn into_symbols(self) -> SymbolTable {
        self.symbols
    }

    fn peek_token_type(&self) -> TokenType {
        self.current.tok_type
    }

    fn advance(&mut self) -> ParseResult<Token> {
        let next = self.source.next_token()?;
        let token = std::mem::replace(&mut self.current, next);
        if self.debug {
            self.trace(format!(
                "matched {} `{}` on line {}",
                token.tok_type, token.lexeme, token.line
            ));
        }
        Ok(token)
    }

    fn trace(&self, msg: String) {
        eprintln!("{}", msg.dimmed());
    }

    /// Consumes the current token if it has the expected type, fails otherwise.
    fn consume(&mut self, tok_type: TokenType) -> ParseResult<Token> {
        if self.current.tok_type == tok_type {
            self.advance()
        } else {
            Err(self.error_expected(tok_type.as_str()))
        }
    }

    fn error_expected(&self, exp: &'static str) -> ParseError {
        self.error_at_current(ParseErrorType::Expected {
            exp,
            found: self.current.tok_type,
        })
    }

    fn error_at_current(&self, error: ParseErrorType) -> ParseError {
        ParseError::new(self.current.clone(), error)
    }

    fn starts_statement(&self) -> bool {
        matches!(
            self.peek_token_type(),
            TokenType::Identifier | TokenType::LBrace | TokenType::KIf | TokenType::KWhile
        )
    }

    fn starts_declaration(&self) -> bool {
        matches!(self.peek_token_type(), TokenType::KInt | TokenType::KFloat)
    }
}

impl<S: TokenSource> Parser<S> {
    pub fn program(&mut self) -> ParseResult<()> {
        self.consume(TokenType::KProgram)?;
        self.consume(TokenType::Identifier)?;
        self.consume(TokenType::LBrace)?;

        self.declaration_list()?;
        self.statement_list()?;

        self.consume(TokenType::RBrace)?;
        self.consume(TokenType::Dot)?;
        Ok(())
    }

    fn declaration_list(&mut self) -> ParseResult<()> {
        self.declaration()?;
        self.declaration_list_tail()
    }

    fn declaration_list_tail(&mut self) -> ParseResult<()> {
        while self.starts_declaration() {
            self.declaration()?;
        }
        Ok(())
    }

    fn declaration(&mut self) -> ParseResult<()> {
        self.var_declaration()
    }

    fn var_declaration(&mut self) -> ParseResult<()> {
        let ty = self.type_specifier()?;
        let name = self.consume(TokenType::Identifier)?;
        self.declare(&name, ty)?;
        self.var_declaration_tail(&name)
    }

    fn var_declaration_tail(&mut self, name: &Token) -> ParseResult<()> {
        match self.peek_token_type() {
            TokenType::Semicolon => {
                self.advance()?;
                Ok(())
            }
            TokenType::LBracket => {
                self.advance()?;
                let size = self.consume(TokenType::Number)?;
                let len = match Number::from_literal(&size.lexeme) {
                    Some(Number::Int(n)) if n > 0 && n <= MAX_ARRAY_SIZE => n as usize,
                    _ => {
                        return Err(ParseError::semantic(
                            &size,
                            SemanticErrorKind::InvalidArraySize {
                                name: name.lexeme.clone(),
                                size: size.lexeme.clone(),
                            },
                        ))
                    }
                };
                self.consume(TokenType::RBracket)?;
                self.consume(TokenType::Semicolon)?;
                self.make_array(name, len)
            }
            _ => Err(self.error_expected("`;` or `[`")),
        }
    }

    fn type_specifier(&mut self) -> ParseResult<PrimitiveType> {
        match PrimitiveType::from_keyword(self.peek_token_type()) {
            Some(ty) => {
                self.advance()?;
                Ok(ty)
            }
            None => Err(self.error_expected("`int` or `float`")),
        }
    }

    /// Parses a parameter list, declaring each parameter like a variable.
    /// No rule reachable from `program` uses it yet.
    pub fn params(&mut self) -> ParseResult<()> {
        if self.peek_token_type() == TokenType::KVoid {
            self.advance()?;
            Ok(())
        } else {
            self.param_list()
        }
    }

    fn param_list(&mut self) -> ParseResult<()> {
        self.param()?;
        self.param_list_tail()
    }

    fn param_list_tail(&mut self) -> ParseResult<()> {
        while self.peek_token_type() == TokenType::Comma {
            self.advance()?;
            self.param()?;
        }
        Ok(())
    }

    fn param(&mut self) -> ParseResult<()> {
        let ty = self.type_specifier()?;
        let name = self.consume(TokenType::Identifier)?;
        self.declare(&name, ty)?;
        self.param_tail(&name)
    }

    fn param_tail(&mut self, name: &Token) -> ParseResult<()> {
        if self.peek_token_type() == TokenType::LBracket {
            self.advance()?;
            self.consume(TokenType::RBracket)?;
            // unsized array parameter
            self.make_array(name, 0)?;
        }
        Ok(())
    }

    fn declare(&mut self, name: &Token, ty: PrimitiveType) -> ParseResult<()> {
        self.symbols
            .declare(&name.lexeme, ty, name.line)
            .map(|_| ())
            .map_err(|kind| ParseError::semantic(name, kind))
    }

    fn make_array(&mut self, name: &Token, len: usize) -> ParseResult<()> {
        self.symbols
            .get_mut(&name.lexeme)
            .map(|symbol| symbol.make_array(len))
            .map_err(|kind| ParseError::semantic(name, kind))
    }
}

impl<S: TokenSource> Parser<S> {
    fn compound_stmt(&mut self) -> ParseResult<()> {
        self.consume(TokenType::LBrace)?;
        self.statement_list()?;
        self.consume(TokenType::RBrace)?;
        Ok(())
    }

    fn statement_list(&mut self) -> ParseResult<()> {
        if self.starts_statement() {
            self.statement_list_tail()?;
        }
        Ok(())
    }

    fn statement_list_tail(&mut self) -> ParseResult<()> {
        while self.starts_statement() {
            self.statement()?;
        }
        Ok(())
    }

    fn statement(&mut self) -> ParseResult<()> {
        match self.peek_token_type() {
            TokenType::Identifier => self.assignment_stmt(),
            TokenType::LBrace => self.compound_stmt(),
            TokenType::KIf => self.selection_stmt(),
            TokenType::KWhile => self.iteration_stmt(),
            _ => Err(self.error_expected("statement")),
        }
    }

    fn assignment_stmt(&mut self) -> ParseResult<()> {
        let (place, _) = self.var()?;
        let eq_sign = self.consume(TokenType::Equal)?;
        let rhs = self.expression()?;

        self.symbols
            .store(&place, rhs)
            .map_err(|kind| ParseError::semantic(&eq_sign, kind))?;

        if self.debug {
            self.trace(format!("{} = {} on line {}", place, rhs, eq_sign.line));
        }

        // a trailing `;` is optional
        if self.peek_token_type() == TokenType::Semicolon {
            self.advance()?;
        }
        Ok(())
    }

    fn selection_stmt(&mut self) -> ParseResult<()> {
        self.consume(TokenType::KIf)?;
        self.condition()?;
        self.statement()?;
        self.selection_stmt_tail()
    }

    fn selection_stmt_tail(&mut self) -> ParseResult<()> {
        if self.peek_token_type() == TokenType::KElse {
            self.advance()?;
            self.statement()?;
        }
        Ok(())
    }

    fn iteration_stmt(&mut self) -> ParseResult<()> {
        self.consume(TokenType::KWhile)?;
        self.condition()?;
        self.statement()
    }

    /// `( expression )` of an `if` or `while`. The value is computed once and
    /// does not decide which statements run: bodies are parsed, and thus
    /// evaluated, exactly once.
    fn condition(&mut self) -> ParseResult<()> {
        let lparen = self.consume(TokenType::LParen)?;
        let cond = self.expression()?;
        self.consume(TokenType::RParen)?;

        if self.debug {
            self.trace(format!(
                "condition on line {} evaluated to {}",
                lparen.line, cond
            ));
        }
        Ok(())
    }
}
