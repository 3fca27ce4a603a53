pub mod brackets;
mod expr;
pub mod postfix;
mod stmt;

#[cfg(test)]
mod test;

use thiserror::Error;
use tracing::debug;

use crate::context::AnalysisContext;
use crate::diagnostics::{Diagnostic, Sink};
use crate::lexer::token::{SymbolRecord, TokenKind};
use brackets::{BracketError, BracketTracker};
use postfix::{Instruction, Postfix};

// <program>         ::= "program" <ident> "{" <declaration>* <statement-block> "}"
// <declaration>     ::= <type> <ident-list> ";"
// <type>            ::= "int" | "float" | "boolean"
// <ident-list>      ::= <ident> ( "," <ident> )*
// <statement-block> ::= "{" <statement>* "}"
// <statement>       ::= <assign> | <input> | <print> | <if> | <do-while>
// <assign>          ::= <ident> "=" <expression> ";"
// <input>           ::= "input" "(" <ident-list> ")" ";"
// <print>           ::= "print" "(" <ident-list> ")" ";"
// <if>              ::= "if" "(" <bool-expr> ")" "{" <statement>* "}"
// <do-while>        ::= "do" "{" <statement>* "}" "while" "(" <bool-expr> ")"
// <expression>      ::= <bool-expr> | <arith-expr>
// <bool-expr>       ::= "true" | "false" | <relation> | "(" <relation> ")"
// <relation>        ::= <arith-expr> <rel-op> <arith-expr>
// <arith-expr>      ::= ( "+" | "-" )? <term> ( ( "+" | "-" ) <term> )*
// <term>            ::= <chunk> ( ( "*" | "/" ) <chunk> )*
// <chunk>           ::= <factor> ( "^" <factor> )*
// <factor>          ::= <constant> | <ident> | "(" <arith-expr> ")"

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Parser Error:\n\tLine {line} {error}")]
pub struct ParseError {
    pub line: usize,
    #[source]
    pub error: ParseErrorType,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("has unexpected elements - ('{got}' '{got_kind}'). Expected - ('{exp}' '{exp_kind}')")]
    UnexpectedElements {
        got: String,
        got_kind: TokenKind,
        exp: &'static str,
        exp_kind: TokenKind,
    },

    #[error("has unexpected token - '{got}' ({got_kind}). Expected - '{exp}'")]
    UnexpectedToken {
        got: String,
        got_kind: TokenKind,
        exp: String,
    },

    #[error("expected assign statement")]
    ExpectedAssign,

    #[error("cannot start a statement with '{0}'")]
    UnexpectedStatement(String),

    #[error("has duplicate declaration of '{0}'")]
    DuplicateDeclaration(String),

    #[error("has no valid expression")]
    NoValidExpression,

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("{0}")]
    Bracket(#[from] BracketError),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Output of a successful parse: the refined tables and the postfix stream.
#[derive(Debug, Clone)]
pub struct Translation {
    pub context: AnalysisContext,
    pub postfix: Postfix,
}

/// Position the parser can roll back to.
struct Checkpoint {
    cursor: usize,
    emitted: usize,
    traced: usize,
    brackets: BracketTracker,
}

pub struct Parser<'a> {
    context: AnalysisContext,
    cursor: usize,
    brackets: BracketTracker,
    postfix: Postfix,
    // trace lines held back until the outermost attempt succeeds
    deferred: Vec<String>,
    attempts: usize,
    sink: &'a mut dyn Sink,
}

impl<'a> Parser<'a> {
    pub fn new(context: AnalysisContext, sink: &'a mut dyn Sink) -> Self {
        Self {
            context,
            cursor: 0,
            brackets: BracketTracker::new(),
            postfix: Postfix::new(),
            deferred: Vec::new(),
            attempts: 0,
            sink,
        }
    }

    /// Parses the whole program and hands the tables over together with the postfix code.
    pub fn parse(mut self) -> ParseResult<Translation> {
        self.program()?;
        Ok(Translation {
            context: self.context,
            postfix: self.postfix,
        })
    }

    fn peek(&self) -> Option<&SymbolRecord> {
        self.context.records.get(self.cursor)
    }

    fn check(&self, lexeme: &str, kind: TokenKind) -> bool {
        matches!(self.peek(), Some(r) if r.is(lexeme, kind))
    }

    fn check_kind(&self, kind: TokenKind) -> bool {
        matches!(self.peek(), Some(r) if r.kind == kind)
    }

    fn current(&self) -> ParseResult<&SymbolRecord> {
        match self.peek() {
            Some(record) => Ok(record),
            None => Err(self.error(ParseErrorType::UnexpectedEof)),
        }
    }

    fn current_line(&self) -> usize {
        self.peek()
            .or_else(|| self.context.records.last())
            .map(|r| r.line)
            .unwrap_or(1)
    }

    fn advance(&mut self) -> ParseResult<SymbolRecord> {
        let record = self.current()?.clone();
        self.cursor += 1;
        self.trace(format!(
            "ParseToken: in row {} lexeme - '{}'|token - '{}'",
            record.line, record.lexeme, record.kind
        ));
        Ok(record)
    }

    fn trace(&mut self, line: String) {
        if self.attempts > 0 {
            self.deferred.push(line);
        } else {
            self.sink.emit(Diagnostic::Trace(line));
        }
    }

    fn error(&self, error: ParseErrorType) -> ParseError {
        ParseError {
            line: self.current_line(),
            error,
        }
    }

    /// Asserts the current record is exactly `(lexeme, kind)` and consumes it.
    fn expect(&mut self, lexeme: &'static str, kind: TokenKind) -> ParseResult<SymbolRecord> {
        let record = self.current()?;
        if record.is(lexeme, kind) {
            self.advance()
        } else {
            Err(self.error(ParseErrorType::UnexpectedElements {
                got: record.lexeme.clone(),
                got_kind: record.kind,
                exp: lexeme,
                exp_kind: kind,
            }))
        }
    }

    /// Asserts the current record has `kind` and consumes it.
    fn expect_kind(&mut self, kind: TokenKind) -> ParseResult<SymbolRecord> {
        let record = self.current()?;
        if record.kind == kind {
            self.advance()
        } else {
            Err(self.unexpected(kind.as_str()))
        }
    }

    fn unexpected(&self, exp: &str) -> ParseError {
        match self.peek() {
            Some(record) => self.error(ParseErrorType::UnexpectedToken {
                got: record.lexeme.clone(),
                got_kind: record.kind,
                exp: exp.to_string(),
            }),
            None => self.error(ParseErrorType::UnexpectedEof),
        }
    }

    /// Consumes the `expected` bracket through the balance tracker.
    fn bracket(&mut self, expected: char) -> ParseResult<SymbolRecord> {
        let lexeme = match self.peek() {
            Some(record) => record.lexeme.clone(),
            None => {
                return Err(match self.brackets.check_fully_closed() {
                    Err(unclosed) => self.error(unclosed.into()),
                    Ok(()) => self.error(ParseErrorType::UnexpectedEof),
                })
            }
        };
        if let Err(err) = self.brackets.control(&lexeme, expected) {
            return Err(self.error(err.into()));
        }
        self.advance()
    }

    fn emit(&mut self, instruction: Instruction) {
        self.postfix.push(instruction);
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            cursor: self.cursor,
            emitted: self.postfix.len(),
            traced: self.deferred.len(),
            brackets: self.brackets.clone(),
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        debug!(
            from = self.cursor,
            to = checkpoint.cursor,
            "rolling back parser"
        );
        self.cursor = checkpoint.cursor;
        self.postfix.truncate(checkpoint.emitted);
        self.deferred.truncate(checkpoint.traced);
        self.brackets = checkpoint.brackets;
    }

    /// Runs `production`, restoring cursor, output, trace and bracket state if it fails.
    fn attempt<T>(&mut self, production: fn(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let checkpoint = self.checkpoint();
        self.attempts += 1;
        let result = production(self);
        self.attempts -= 1;
        if result.is_err() {
            self.rollback(checkpoint);
        }
        if self.attempts == 0 {
            for line in std::mem::take(&mut self.deferred) {
                self.sink.emit(Diagnostic::Trace(line));
            }
        }
        result
    }

    fn program(&mut self) -> ParseResult<()> {
        self.expect("program", TokenKind::Keyword)?;
        self.expect_kind(TokenKind::Ident)?;
        self.bracket('{')?;

        self.declarations()?;
        self.statement_block()?;

        self.bracket('}')?;
        self.brackets
            .check_fully_closed()
            .map_err(|err| self.error(err.into()))?;

        if self.peek().is_some() {
            return Err(self.unexpected("<end of program>"));
        }
        Ok(())
    }
}
