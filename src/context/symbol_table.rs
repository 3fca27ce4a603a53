use ordermap::OrderMap;

use super::value::{Type, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct IdentEntry {
    pub index: usize,
    pub declared_type: Option<Type>,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstEntry {
    pub index: usize,
    pub value: Value,
}

impl ConstEntry {
    pub fn ty(&self) -> Type {
        self.value.ty()
    }
}

pub type IdentTable = OrderMap<String, IdentEntry>;
pub type ConstTable = OrderMap<String, ConstEntry>;
