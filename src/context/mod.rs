pub mod symbol_table;
pub mod value;

use crate::lexer::token::SymbolRecord;
use symbol_table::{ConstEntry, ConstTable, IdentEntry, IdentTable};
use value::Value;

/// State shared by the translation stages.
///
/// The lexer builds it, the parser takes it over to refine declared types and the
/// interpreter finally owns it while mutating identifier values and interning
/// intermediate results.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AnalysisContext {
    pub records: Vec<SymbolRecord>,
    pub idents: IdentTable,
    pub constants: ConstTable,
}

impl AnalysisContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the 1-based index of `name`, adding an untyped entry on first sight.
    pub fn register_ident(&mut self, name: &str) -> usize {
        if let Some(entry) = self.idents.get(name) {
            return entry.index;
        }
        let index = self.idents.len() + 1;
        self.idents.insert(
            name.to_string(),
            IdentEntry {
                index,
                declared_type: None,
                value: None,
            },
        );
        index
    }

    /// Interns a constant under its textual form. Existing entries win.
    pub fn intern_const(&mut self, key: &str, value: Value) -> usize {
        if let Some(entry) = self.constants.get(key) {
            return entry.index;
        }
        let index = self.constants.len() + 1;
        self.constants
            .insert(key.to_string(), ConstEntry { index, value });
        index
    }

    /// Interns a computed value under its rendered text and returns that key.
    pub fn intern_value(&mut self, value: Value) -> String {
        let key = value.to_string();
        self.intern_const(&key, value);
        key
    }

    pub fn ident(&self, name: &str) -> Option<&IdentEntry> {
        self.idents.get(name)
    }

    pub fn ident_mut(&mut self, name: &str) -> Option<&mut IdentEntry> {
        self.idents.get_mut(name)
    }

    pub fn constant(&self, key: &str) -> Option<&ConstEntry> {
        self.constants.get(key)
    }
}
