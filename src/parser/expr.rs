use super::postfix::Instruction;
use super::{ParseErrorType, ParseResult, Parser};
use crate::context::value::Value;
use crate::lexer::token::TokenKind;

/// Left-associative binary level: operands from `$nextp`, operator emitted after the
/// right operand.
macro_rules! parse_binary_expr {
    ( $self: ident, $kind: expr, $nextp: ident ) => {{
        $self.$nextp()?;
        while $self.check_kind($kind) {
            let op = $self.advance()?;
            $self.$nextp()?;
            $self.emit(Instruction::from(&op));
        }
        Ok(())
    }};
}

impl<'a> Parser<'a> {
    /// Tries a boolean expression first and falls back to an arithmetic one.
    pub(super) fn expression(&mut self) -> ParseResult<()> {
        if self.attempt(Self::bool_expr).is_ok() {
            return Ok(());
        }
        self.attempt(Self::arith_expr)
            .map_err(|_| self.error(ParseErrorType::NoValidExpression))
    }

    pub(super) fn bool_expr(&mut self) -> ParseResult<()> {
        if self.check_kind(TokenKind::BoolVal) {
            let value = self.advance()?;
            self.emit(Instruction::from(&value));
            return Ok(());
        }
        if self.check("(", TokenKind::ParOp) && self.attempt(Self::parenthesized_relation).is_ok()
        {
            return Ok(());
        }
        self.relation()
    }

    fn parenthesized_relation(&mut self) -> ParseResult<()> {
        self.bracket('(')?;
        self.relation()?;
        self.bracket(')')?;
        Ok(())
    }

    fn relation(&mut self) -> ParseResult<()> {
        self.arith_expr()?;
        let op = self.expect_kind(TokenKind::RelOp)?;
        self.arith_expr()?;
        self.emit(Instruction::from(&op));
        Ok(())
    }

    pub(super) fn arith_expr(&mut self) -> ParseResult<()> {
        // a leading minus becomes `0 <term> -`
        let negate = if self.check_kind(TokenKind::AddOp) {
            self.advance()?.lexeme == "-"
        } else {
            false
        };
        if negate {
            let zero = self.context.intern_value(Value::Int(0));
            self.emit(Instruction::new(zero, TokenKind::Int));
        }

        self.term()?;
        if negate {
            self.emit(Instruction::new("-", TokenKind::AddOp));
        }

        while self.check_kind(TokenKind::AddOp) {
            let op = self.advance()?;
            self.term()?;
            self.emit(Instruction::from(&op));
        }
        Ok(())
    }

    fn term(&mut self) -> ParseResult<()> {
        parse_binary_expr!(self, TokenKind::MultOp, chunk)
    }

    fn chunk(&mut self) -> ParseResult<()> {
        parse_binary_expr!(self, TokenKind::PowOp, factor)
    }

    fn factor(&mut self) -> ParseResult<()> {
        let record = self.current()?;
        if record.kind.is_operand() {
            let operand = self.advance()?;
            self.emit(Instruction::from(&operand));
            Ok(())
        } else if record.is("(", TokenKind::ParOp) {
            self.bracket('(')?;
            self.arith_expr()?;
            self.bracket(')')?;
            Ok(())
        } else {
            Err(self.unexpected("<expression>"))
        }
    }
}
