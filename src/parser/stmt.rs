use super::postfix::{self, Instruction};
use super::{ParseError, ParseErrorType, ParseResult, Parser};
use crate::context::value::Type;
use crate::lexer::token::TokenKind;

impl<'a> Parser<'a> {
    pub(super) fn declarations(&mut self) -> ParseResult<()> {
        while let Some(ty) = self.peek_type() {
            self.advance()?;
            loop {
                let name = self.expect_kind(TokenKind::Ident)?;
                self.declare(&name.lexeme, ty, name.line)?;
                if !self.check(",", TokenKind::Punct) {
                    break;
                }
                self.advance()?;
            }
            self.expect(";", TokenKind::Punct)?;
        }
        Ok(())
    }

    fn peek_type(&self) -> Option<Type> {
        self.peek()
            .filter(|r| r.kind == TokenKind::Keyword)
            .and_then(|r| Type::from_keyword(&r.lexeme))
    }

    fn declare(&mut self, name: &str, ty: Type, line: usize) -> ParseResult<()> {
        let duplicate = || ParseError {
            line,
            error: ParseErrorType::DuplicateDeclaration(name.to_string()),
        };
        match self.context.ident_mut(name) {
            Some(entry) if entry.declared_type.is_some() => Err(duplicate()),
            Some(entry) => {
                entry.declared_type = Some(ty);
                Ok(())
            }
            None => {
                self.context.register_ident(name);
                if let Some(entry) = self.context.ident_mut(name) {
                    entry.declared_type = Some(ty);
                }
                Ok(())
            }
        }
    }

    pub(super) fn statement_block(&mut self) -> ParseResult<()> {
        self.bracket('{')?;
        self.statements()?;
        self.bracket('}')?;
        Ok(())
    }

    /// Parses statements up to, not including, the closing `}`.
    fn statements(&mut self) -> ParseResult<()> {
        while self.peek().is_some() && !self.check("}", TokenKind::ParOp) {
            self.statement()?;
        }
        Ok(())
    }

    fn statement(&mut self) -> ParseResult<()> {
        let record = self.current()?.clone();
        match (record.kind, record.lexeme.as_str()) {
            (TokenKind::Ident, _) => self.assign_stmt(),
            (TokenKind::Keyword, "input") => self.io_stmt("input"),
            (TokenKind::Keyword, "print") => self.io_stmt("print"),
            (TokenKind::Keyword, "if") => self.if_stmt(),
            (TokenKind::Keyword, "do") => self.do_while_stmt(),
            (_, lexeme) => {
                Err(self.error(ParseErrorType::UnexpectedStatement(lexeme.to_string())))
            }
        }
    }

    fn assign_stmt(&mut self) -> ParseResult<()> {
        let target = self.expect_kind(TokenKind::Ident)?;
        self.emit(Instruction::from(&target));

        if !self.current()?.is("=", TokenKind::AssignOp) {
            return Err(self.error(ParseErrorType::ExpectedAssign));
        }
        let assign = self.advance()?;

        self.expression()?;
        self.expect(";", TokenKind::Punct)?;
        self.emit(Instruction::from(&assign));
        Ok(())
    }

    /// `input(...)` and `print(...)`: each listed identifier is followed by the keyword.
    fn io_stmt(&mut self, keyword: &'static str) -> ParseResult<()> {
        let op = self.expect(keyword, TokenKind::Keyword)?;
        self.bracket('(')?;
        loop {
            let name = self.expect_kind(TokenKind::Ident)?;
            self.emit(Instruction::from(&name));
            self.emit(Instruction::from(&op));
            if !self.check(",", TokenKind::Punct) {
                break;
            }
            self.advance()?;
        }
        self.bracket(')')?;
        self.expect(";", TokenKind::Punct)?;
        Ok(())
    }

    fn if_stmt(&mut self) -> ParseResult<()> {
        self.expect("if", TokenKind::Keyword)?;
        self.bracket('(')?;
        self.bool_expr()?;
        self.bracket(')')?;

        self.statement_block()?;
        self.emit(Instruction::marker(postfix::IF));
        Ok(())
    }

    fn do_while_stmt(&mut self) -> ParseResult<()> {
        self.expect("do", TokenKind::Keyword)?;
        self.emit(Instruction::marker(postfix::WHILE));

        self.statement_block()?;

        self.expect("while", TokenKind::Keyword)?;
        self.bracket('(')?;
        self.bool_expr()?;
        self.bracket(')')?;
        self.emit(Instruction::marker(postfix::DO));
        Ok(())
    }
}
