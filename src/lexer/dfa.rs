use lazy_static::lazy_static;
use std::collections::HashMap;

use super::symbol_class::SymbolClass;
use super::token::TokenKind;

pub type State = u16;

pub const INIT: State = 0;

pub const UNEXPECTED_SYMBOL: State = 101;
pub const EXPECTED_EQ: State = 102;
pub const EXPECTED_DIGIT: State = 103;
pub const EXPECTED_SIGN_OR_DIGIT: State = 104;

/// What happens to the accumulated lexeme when a transition lands on a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// More characters expected; the character joins the lexeme.
    Continue,
    /// Whitespace consumed, nothing accumulated.
    Skip,
    /// Lexeme complete; the character starts the next lexeme.
    Retract,
    /// Lexeme complete including the character.
    Include,
    Newline,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    Class(SymbolClass),
    Other,
}

macro_rules! hash_map {
    ( $( $key: expr => $value: expr ),* $(,)? ) => {{
        let mut m = HashMap::new();
        $(
            m.insert($key, $value);
        )*
        m
    }}
}

macro_rules! transitions {
    ( $( $from: expr, [ $( $input: expr ),+ ] => $to: expr );* $(;)? ) => {{
        let mut m: HashMap<(State, Input), State> = HashMap::new();
        $(
            $( m.insert(($from, $input), $to); )+
        )*
        m
    }}
}

const fn ch(c: char) -> Input {
    Input::Class(SymbolClass::Char(c))
}

const LETTER: Input = Input::Class(SymbolClass::Letter);
const DIGIT: Input = Input::Class(SymbolClass::Digit);
const WS: Input = Input::Class(SymbolClass::Whitespace);
const NL: Input = Input::Class(SymbolClass::Newline);
const OTHER: Input = Input::Other;

lazy_static! {
    pub static ref TRANSITIONS: HashMap<(State, Input), State> = transitions! {
        0, [LETTER] => 1;
        0, [NL] => 5;
        0, [WS] => 0;
        0, [ch('+'), ch('-'), ch('*'), ch('/'), ch('^')] => 4;
        0, [ch('('), ch(')'), ch('{'), ch('}')] => 4;
        0, [ch(';'), ch(','), ch(':')] => 4;
        0, [ch('='), ch('<'), ch('>')] => 6;
        0, [ch('!')] => 9;
        0, [DIGIT] => 10;
        0, [OTHER] => UNEXPECTED_SYMBOL;

        1, [LETTER, DIGIT] => 1;
        1, [OTHER] => 3;

        6, [ch('=')] => 8;
        6, [OTHER] => 7;

        9, [ch('=')] => 8;
        9, [OTHER] => EXPECTED_EQ;

        10, [DIGIT] => 10;
        10, [ch('.')] => 11;
        10, [OTHER] => 12;

        11, [DIGIT] => 14;
        11, [OTHER] => EXPECTED_DIGIT;

        14, [DIGIT] => 14;
        14, [ch('E')] => 15;
        14, [OTHER] => 16;

        15, [ch('-')] => 17;
        15, [DIGIT] => 13;
        15, [OTHER] => EXPECTED_SIGN_OR_DIGIT;

        17, [DIGIT] => 13;
        17, [OTHER] => EXPECTED_SIGN_OR_DIGIT;

        13, [DIGIT] => 13;
        13, [OTHER] => 18;
    };

    pub static ref KEYWORDS: HashMap<&'static str, TokenKind> = hash_map! {
        "program" => TokenKind::Keyword,
        "int"     => TokenKind::Keyword,
        "float"   => TokenKind::Keyword,
        "boolean" => TokenKind::Keyword,
        "while"   => TokenKind::Keyword,
        "do"      => TokenKind::Keyword,
        "if"      => TokenKind::Keyword,
        "then"    => TokenKind::Keyword,
        "input"   => TokenKind::Keyword,
        "print"   => TokenKind::Keyword,
        "true"    => TokenKind::BoolVal,
        "false"   => TokenKind::BoolVal,
        "="       => TokenKind::AssignOp,
        "<="      => TokenKind::RelOp,
        ">="      => TokenKind::RelOp,
        "<"       => TokenKind::RelOp,
        ">"       => TokenKind::RelOp,
        "=="      => TokenKind::RelOp,
        "!="      => TokenKind::RelOp,
        "."       => TokenKind::Punct,
        ","       => TokenKind::Punct,
        ":"       => TokenKind::Punct,
        ";"       => TokenKind::Punct,
        "E"       => TokenKind::Punct,
        "+"       => TokenKind::AddOp,
        "-"       => TokenKind::AddOp,
        "*"       => TokenKind::MultOp,
        "/"       => TokenKind::MultOp,
        "^"       => TokenKind::PowOp,
        "("       => TokenKind::ParOp,
        ")"       => TokenKind::ParOp,
        "{"       => TokenKind::ParOp,
        "}"       => TokenKind::ParOp,
    };

    /// Token kinds of the states that finish identifiers and numbers.
    pub static ref STATE_KINDS: HashMap<State, TokenKind> = hash_map! {
        3  => TokenKind::Ident,
        12 => TokenKind::Int,
        16 => TokenKind::Float,
        18 => TokenKind::Exp,
    };
}

/// Looks up `(state, class)`, falling back to `(state, other)`.
pub fn next_state(state: State, class: SymbolClass) -> Option<State> {
    TRANSITIONS
        .get(&(state, Input::Class(class)))
        .or_else(|| TRANSITIONS.get(&(state, Input::Other)))
        .copied()
}

pub fn disposition(state: State) -> Disposition {
    match state {
        INIT => Disposition::Skip,
        3 | 7 | 12 | 16 | 18 => Disposition::Retract,
        4 | 8 => Disposition::Include,
        5 => Disposition::Newline,
        UNEXPECTED_SYMBOL | EXPECTED_EQ | EXPECTED_DIGIT | EXPECTED_SIGN_OR_DIGIT => {
            Disposition::Error
        }
        _ => Disposition::Continue,
    }
}
