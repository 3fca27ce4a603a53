use std::fmt::Display;

use crate::lexer::token::{SymbolRecord, TokenKind};

/// Kind tag of a postfix instruction: a token kind or a control-flow marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstrKind {
    Token(TokenKind),
    Marker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub lexeme: String,
    pub kind: InstrKind,
}

pub const IF: &str = "IF";
pub const DO: &str = "DO";
pub const WHILE: &str = "WHILE";

impl Instruction {
    pub fn new(lexeme: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind: InstrKind::Token(kind),
        }
    }

    pub fn marker(name: &'static str) -> Self {
        Self {
            lexeme: name.to_string(),
            kind: InstrKind::Marker,
        }
    }

    pub fn token_kind(&self) -> Option<TokenKind> {
        match self.kind {
            InstrKind::Token(kind) => Some(kind),
            InstrKind::Marker => None,
        }
    }
}

impl From<&SymbolRecord> for Instruction {
    fn from(record: &SymbolRecord) -> Self {
        Instruction::new(record.lexeme.clone(), record.kind)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

pub type Postfix = Vec<Instruction>;

/// Renders a postfix stream as space separated lexemes.
pub fn render(postfix: &[Instruction]) -> String {
    postfix
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
