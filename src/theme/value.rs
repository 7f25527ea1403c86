use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Number(Number),
    Bool(bool),
}

/// Value stored against a path in the flattened table.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeValue {
    String(String),
    Number(Number),
    Bool(bool),
    /// Array leaf, kept whole and never indexed into.
    List(Vec<Value>),
    /// Function-valued leaf under the callable key.
    Function { params: Vec<String> },
}

impl ThemeValue {
    /// String, number or boolean; the only values worth an inline annotation.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ThemeValue::String(_) | ThemeValue::Number(_) | ThemeValue::Bool(_)
        )
    }

    pub fn to_json(&self) -> Value {
        match self {
            ThemeValue::String(value) => Value::String(value.clone()),
            ThemeValue::Number(value) => Value::Number(value.clone()),
            ThemeValue::Bool(value) => Value::Bool(*value),
            ThemeValue::List(items) => Value::Array(items.clone()),
            ThemeValue::Function { .. } => Value::String(self.to_string()),
        }
    }
}

impl From<Scalar> for ThemeValue {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::String(value) => ThemeValue::String(value),
            Scalar::Number(value) => ThemeValue::Number(value),
            Scalar::Bool(value) => ThemeValue::Bool(value),
        }
    }
}

impl From<&str> for ThemeValue {
    fn from(value: &str) -> Self {
        ThemeValue::String(value.to_string())
    }
}

impl From<i64> for ThemeValue {
    fn from(value: i64) -> Self {
        ThemeValue::Number(value.into())
    }
}

impl From<i32> for ThemeValue {
    fn from(value: i32) -> Self {
        ThemeValue::Number(value.into())
    }
}

impl From<bool> for ThemeValue {
    fn from(value: bool) -> Self {
        ThemeValue::Bool(value)
    }
}

impl fmt::Display for ThemeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeValue::String(value) => f.write_str(value),
            ThemeValue::Number(value) => write!(f, "{value}"),
            ThemeValue::Bool(value) => write!(f, "{value}"),
            ThemeValue::List(items) => write!(f, "{}", Value::Array(items.clone())),
            ThemeValue::Function { params } => {
                if params.is_empty() {
                    f.write_str("function(arg) -> value")
                } else {
                    write!(f, "function({}) -> value", params.join(", "))
                }
            }
        }
    }
}

impl Serialize for ThemeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
