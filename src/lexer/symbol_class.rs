/// Characters that are their own symbol class.
const SIGNIFICANT: [char; 19] = [
    '+', '-', '*', '/', '^', '(', ')', '{', '}', ':', ';', ',', '.', '<', '>', '=', '!', '"', 'E',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolClass {
    Letter,
    Digit,
    Whitespace,
    Newline,
    Char(char),
    Unknown,
}

pub fn classify(c: char) -> SymbolClass {
    match c {
        'a'..='z' => SymbolClass::Letter,
        '0'..='9' => SymbolClass::Digit,
        ' ' | '\t' => SymbolClass::Whitespace,
        '\n' => SymbolClass::Newline,
        c if SIGNIFICANT.contains(&c) => SymbolClass::Char(c),
        _ => SymbolClass::Unknown,
    }
}
