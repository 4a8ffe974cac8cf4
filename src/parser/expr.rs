use paste::paste;

use crate::lexer::token::{Token, TokenType};
use crate::lexer::{LexerErrorType, TokenSource};
use crate::semantic::ops::BinaryOp;
use crate::semantic::value::{LValue, Number};

use super::{ParseError, ParseErrorType, ParseResult, Parser};

// Generates `<rule>_tail(lhs)`: folds `op <next>` pairs into `lhs` from the
// left for as long as the lookahead is one of the rule's operators.
macro_rules! eval_binary_tail {
    ( $( $rule: ident: $ops: pat => $opp: ident, $nextp: ident; )+ ) => {
        paste! {
            $(
                fn [<$rule _tail>](&mut self, mut lhs: Number) -> ParseResult<Number> {
                    while let $ops = self.peek_token_type() {
                        let (op, op_token) = self.$opp()?;
                        let rhs = self.$nextp()?;
                        lhs = self.eval_binary(op, &op_token, lhs, rhs)?;
                    }
                    Ok(lhs)
                }
            )+
        }
    };
}

impl<S: TokenSource> Parser<S> {
    /// Resolves a variable reference to the place it names and its current
    /// contents. Assignments write back through the place.
    pub(super) fn var(&mut self) -> ParseResult<(LValue, Number)> {
        let name = self.consume(TokenType::Identifier)?;
        self.symbols
            .get(&name.lexeme)
            .map_err(|kind| ParseError::semantic(&name, kind))?;
        self.var_tail(name)
    }

    fn var_tail(&mut self, name: Token) -> ParseResult<(LValue, Number)> {
        let place = if self.peek_token_type() == TokenType::LBracket {
            self.advance()?;
            let index = self.expression()?;
            self.consume(TokenType::RBracket)?;

            self.symbols
                .get(&name.lexeme)
                .and_then(|symbol| symbol.element_place(index.as_index()))
                .map_err(|kind| ParseError::semantic(&name, kind))?
        } else {
            LValue::Scalar(name.lexeme.clone())
        };

        let num = self
            .symbols
            .load(&place)
            .map_err(|kind| ParseError::semantic(&name, kind))?;
        Ok((place, num))
    }

    pub(super) fn expression(&mut self) -> ParseResult<Number> {
        let lhs = self.additive_expression()?;
        self.expression_tail(lhs)
    }

    fn additive_expression(&mut self) -> ParseResult<Number> {
        let lhs = self.term()?;
        self.additive_expression_tail(lhs)
    }

    fn term(&mut self) -> ParseResult<Number> {
        let lhs = self.factor()?;
        self.term_tail(lhs)
    }

    eval_binary_tail! {
        expression: TokenType::Lesser
            | TokenType::LesserEq
            | TokenType::Greater
            | TokenType::GreaterEq
            | TokenType::EqEqual
            | TokenType::BangEq => relop, additive_expression;
        additive_expression: TokenType::Plus | TokenType::Minus => addop, term;
        term: TokenType::Star | TokenType::Slash => mulop, factor;
    }

    fn relop(&mut self) -> ParseResult<(BinaryOp, Token)> {
        self.operator(|op| op.is_relational(), "relational operator")
    }

    fn addop(&mut self) -> ParseResult<(BinaryOp, Token)> {
        self.operator(|op| matches!(op, BinaryOp::Plus | BinaryOp::Minus), "`+` or `-`")
    }

    fn mulop(&mut self) -> ParseResult<(BinaryOp, Token)> {
        self.operator(|op| matches!(op, BinaryOp::Mul | BinaryOp::Div), "`*` or `/`")
    }

    fn operator<F>(&mut self, pred: F, exp: &'static str) -> ParseResult<(BinaryOp, Token)>
    where
        F: Fn(&BinaryOp) -> bool,
    {
        match BinaryOp::from_token_type(self.peek_token_type()) {
            Some(op) if pred(&op) => Ok((op, self.advance()?)),
            _ => Err(self.error_expected(exp)),
        }
    }

    fn factor(&mut self) -> ParseResult<Number> {
        match self.peek_token_type() {
            TokenType::LParen => {
                self.advance()?;
                let inner = self.expression()?;
                self.consume(TokenType::RParen)?;
                Ok(inner)
            }
            TokenType::Identifier => self.var().map(|(_, num)| num),
            TokenType::Number => {
                let token = self.advance()?;
                match Number::from_literal(&token.lexeme) {
                    Some(num) => Ok(num),
                    None => {
                        let lexeme = token.lexeme.clone();
                        Err(ParseError::new(
                            token,
                            ParseErrorType::Lex(LexerErrorType::LiteralOutOfRange(lexeme)),
                        ))
                    }
                }
            }
            _ => Err(self.error_expected("`(`, <identifier> or <number>")),
        }
    }

    fn eval_binary(
        &self,
        op: BinaryOp,
        op_token: &Token,
        lhs: Number,
        rhs: Number,
    ) -> ParseResult<Number> {
        let result = op
            .apply(lhs, rhs)
            .map_err(|kind| ParseError::semantic(op_token, kind))?;

        if self.debug {
            self.trace(format!(
                "{} {} {} => {} on line {}",
                lhs, op, rhs, result, op_token.line
            ));
        }
        Ok(result)
    }
}
