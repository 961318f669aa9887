//! Printable variable bindings
//!
//! Each procedure describes its state as a list of [`Binding`]s, rendered the
//! way a reversible program prints its variables:
//!
//! ```text
//! n: int = 5
//! a: array[3] = [1, 2, 3]
//! l: list = [4, 5]
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of one program variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    /// Integer scalar
    Int(i64),
    /// Fixed-length array
    Array(Vec<i64>),
    /// Variable-length list
    List(Vec<i64>),
}

impl Value {
    /// Type name as printed before `=`
    pub fn type_name(&self) -> String {
        match self {
            Value::Int(_) => "int".to_string(),
            Value::Array(items) => format!("array[{}]", items.len()),
            Value::List(_) => "list".to_string(),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Array(items) | Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A named variable and its value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Variable name
    pub name: String,
    /// Current value
    pub value: Value,
}

impl Binding {
    /// Integer binding
    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Binding {
            name: name.into(),
            value: Value::Int(value),
        }
    }

    /// Array binding
    pub fn array<'a>(name: impl Into<String>, items: impl IntoIterator<Item = &'a i64>) -> Self {
        Binding {
            name: name.into(),
            value: Value::Array(items.into_iter().copied().collect()),
        }
    }

    /// List binding
    pub fn list<'a>(name: impl Into<String>, items: impl IntoIterator<Item = &'a i64>) -> Self {
        Binding {
            name: name.into(),
            value: Value::List(items.into_iter().copied().collect()),
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} = {}", self.name, self.value.type_name(), self.value)
    }
}
