use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Int,
    Float,
    Bool,
}

impl Type {
    /// Maps a declaration keyword (`int`, `float`, `boolean`) to its type.
    pub fn from_keyword(keyword: &str) -> Option<Type> {
        match keyword {
            "int" => Some(Type::Int),
            "float" => Some(Type::Float),
            "boolean" => Some(Type::Bool),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "Int"),
            Type::Float => write!(f, "Float"),
            Type::Bool => write!(f, "Bool"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    pub fn ty(&self) -> Type {
        match self {
            Value::Int(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::Bool(_) => Type::Bool,
        }
    }

    /// Numeric view of the value; booleans widen to `0.0`/`1.0`.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::Int(i) => i as f64,
            Value::Float(f) => f,
            Value::Bool(b) => {
                if b {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        match *self {
            Value::Int(i) => i == 0,
            Value::Float(f) => f == 0.0,
            Value::Bool(_) => false,
        }
    }

    /// Parses an interactive input line according to the expected type.
    pub fn parse_as(text: &str, ty: Type) -> Option<Value> {
        let text = text.trim();
        match ty {
            Type::Int => text.parse::<i64>().ok().map(Value::Int),
            Type::Float => text
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float),
            Type::Bool => match text.to_ascii_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
        }
    }
}

// Floats always carry a decimal point so `3.0` and `3` intern as different constants.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(Value::Int(3).to_string(), "3");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(Value::parse_as("42", Type::Int), Some(Value::Int(42)));
        assert_eq!(Value::parse_as("4.5", Type::Int), None);
        assert_eq!(Value::parse_as("4.5", Type::Float), Some(Value::Float(4.5)));
        assert_eq!(Value::parse_as("True", Type::Bool), Some(Value::Bool(true)));
        assert_eq!(Value::parse_as("1", Type::Bool), None);
    }

    #[test]
    fn test_parse_input_rejects_non_finite() {
        assert_eq!(Value::parse_as("inf", Type::Float), None);
        assert_eq!(Value::parse_as("-infinity", Type::Float), None);
        assert_eq!(Value::parse_as("NaN", Type::Float), None);
        assert_eq!(Value::parse_as("1e400", Type::Float), None);
    }
}
