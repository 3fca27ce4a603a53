use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Ident,
    Int,
    Float,
    Exp,
    BoolVal,

    AssignOp,
    RelOp,
    AddOp,
    MultOp,
    PowOp,
    ParOp,
    Punct,
}

impl TokenKind {
    pub fn is_constant(&self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Float | TokenKind::Exp | TokenKind::BoolVal
        )
    }

    pub fn is_operand(&self) -> bool {
        *self == TokenKind::Ident || self.is_constant()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Ident => "ident",
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::Exp => "exp",
            TokenKind::BoolVal => "boolval",
            TokenKind::AssignOp => "assign_op",
            TokenKind::RelOp => "rel_op",
            TokenKind::AddOp => "add_op",
            TokenKind::MultOp => "mult_op",
            TokenKind::PowOp => "pow_op",
            TokenKind::ParOp => "par_op",
            TokenKind::Punct => "punct",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One finalized lexeme, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolRecord {
    pub line: usize,
    pub lexeme: String,
    pub kind: TokenKind,
    pub index: Option<usize>,
}

impl SymbolRecord {
    pub fn is(&self, lexeme: &str, kind: TokenKind) -> bool {
        self.kind == kind && self.lexeme == lexeme
    }
}
