pub mod dfa;
pub mod symbol_class;
pub mod token;


use thiserror::Error;
use tracing::trace;

use crate::context::value::Value;
use crate::context::AnalysisContext;
use dfa::{Disposition, State, KEYWORDS, STATE_KINDS};
use symbol_class::classify;
use token::{SymbolRecord, TokenKind};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerErrorType {
    #[error("unexpected symbol")]
    UnexpectedSymbol,

    #[error("'=' was expected")]
    ExpectedEq,

    #[error("Digit was expected")]
    ExpectedDigit,

    #[error("'-' or Digit were expected")]
    ExpectedSignOrDigit,

    #[error("no transition out of state {0}")]
    NoTransition(State),

    #[error("lexeme could not be classified")]
    Unclassified,

    #[error("numeric literal out of range")]
    LiteralOutOfRange,
}

impl LexerErrorType {
    /// Status code reported for the failure class.
    pub fn code(&self) -> u16 {
        match self {
            LexerErrorType::UnexpectedSymbol => dfa::UNEXPECTED_SYMBOL,
            LexerErrorType::ExpectedEq => dfa::EXPECTED_EQ,
            LexerErrorType::ExpectedDigit => dfa::EXPECTED_DIGIT,
            LexerErrorType::ExpectedSignOrDigit => dfa::EXPECTED_SIGN_OR_DIGIT,
            _ => 100,
        }
    }

    fn from_state(state: State) -> Option<Self> {
        match state {
            dfa::UNEXPECTED_SYMBOL => Some(LexerErrorType::UnexpectedSymbol),
            dfa::EXPECTED_EQ => Some(LexerErrorType::ExpectedEq),
            dfa::EXPECTED_DIGIT => Some(LexerErrorType::ExpectedDigit),
            dfa::EXPECTED_SIGN_OR_DIGIT => Some(LexerErrorType::ExpectedSignOrDigit),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} Lexer: in line {line} {error}, received - {symbol:?}", .error.code())]
pub struct LexerError {
    pub line: usize,
    pub symbol: char,
    #[source]
    pub error: LexerErrorType,
}

impl LexerError {
    pub fn code(&self) -> u16 {
        self.error.code()
    }
}

pub type LexerResult<T> = Result<T, LexerError>;

pub struct Lexer {
    state: State,
    lexeme: String,
    line: usize,
    context: AnalysisContext,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self {
            state: dfa::INIT,
            lexeme: String::new(),
            line: 1,
            context: AnalysisContext::new(),
        }
    }

    /// Lexes every line and hands over the populated context.
    pub fn analyze<I, S>(lines: I) -> LexerResult<AnalysisContext>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexer = Lexer::new();
        for line in lines {
            lexer.feed_line(line.as_ref())?;
        }
        Ok(lexer.finish())
    }

    /// Feeds one source line. The line terminator is supplied here, so `line` must not
    /// carry its own.
    pub fn feed_line(&mut self, line: &str) -> LexerResult<()> {
        for c in line.chars().chain(std::iter::once('\n')) {
            self.step(c)?;
        }
        Ok(())
    }

    pub fn finish(self) -> AnalysisContext {
        self.context
    }

    fn step(&mut self, c: char) -> LexerResult<()> {
        loop {
            let class = classify(c);
            let next = dfa::next_state(self.state, class)
                .ok_or_else(|| self.make_error(c, LexerErrorType::NoTransition(self.state)))?;

            match dfa::disposition(next) {
                Disposition::Error => {
                    let error = LexerErrorType::from_state(next).unwrap_or(LexerErrorType::Unclassified);
                    return Err(self.make_error(c, error));
                }
                Disposition::Continue => {
                    self.lexeme.push(c);
                    self.state = next;
                }
                Disposition::Skip => {
                    self.lexeme.clear();
                    self.state = dfa::INIT;
                }
                Disposition::Newline => {
                    self.lexeme.clear();
                    self.line += 1;
                    self.state = dfa::INIT;
                }
                Disposition::Include => {
                    self.lexeme.push(c);
                    self.finalize(next, c)?;
                }
                Disposition::Retract => {
                    self.finalize(next, c)?;
                    // the boundary character starts the next lexeme
                    continue;
                }
            }
            return Ok(());
        }
    }

    fn finalize(&mut self, state: State, c: char) -> LexerResult<()> {
        let lexeme = std::mem::take(&mut self.lexeme);
        self.state = dfa::INIT;

        let kind = KEYWORDS
            .get(lexeme.as_str())
            .or_else(|| STATE_KINDS.get(&state))
            .copied()
            .ok_or_else(|| self.make_error(c, LexerErrorType::Unclassified))?;

        let index = match kind {
            TokenKind::Ident => Some(self.context.register_ident(&lexeme)),
            k if k.is_constant() => {
                let value = literal_value(&lexeme, kind)
                    .ok_or_else(|| self.make_error(c, LexerErrorType::LiteralOutOfRange))?;
                Some(self.context.intern_const(&lexeme, value))
            }
            _ => None,
        };

        trace!(line = self.line, %lexeme, %kind, "lexeme finalized");

        self.context.records.push(SymbolRecord {
            line: self.line,
            lexeme,
            kind,
            index,
        });
        Ok(())
    }

    fn make_error(&self, symbol: char, error: LexerErrorType) -> LexerError {
        LexerError {
            line: self.line,
            symbol,
            error,
        }
    }
}

fn literal_value(lexeme: &str, kind: TokenKind) -> Option<Value> {
    match kind {
        TokenKind::Int => lexeme.parse::<i64>().ok().map(Value::Int),
        TokenKind::Float | TokenKind::Exp => lexeme
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float),
        TokenKind::BoolVal => Some(Value::Bool(lexeme == "true")),
        _ => None,
    }
}
