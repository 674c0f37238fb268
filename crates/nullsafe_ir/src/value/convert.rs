//! Conversions between Rust values and chain [`Value`]s.
//!
//! `IntoValue` lets member reads return plain Rust types; `FromValue` lets
//! the typed entry points hand the final value back as the caller's type.

use std::any::Any;
use std::sync::Arc;

use super::{ObjectRef, Value};

/// Conversion from a present chain value into a Rust type.
pub trait FromValue: Sized {
    /// Human-readable name of the target type, used in mismatch errors.
    fn expected() -> &'static str;

    /// Convert, handing the original value back when it has the wrong type.
    fn from_value(value: Value) -> Result<Self, Value>;
}

/// Conversion from a Rust type into a present chain value.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl FromValue for Value {
    fn expected() -> &'static str {
        "value"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        Ok(value)
    }
}

impl FromValue for String {
    fn expected() -> &'static str {
        "str"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Str(s) => Ok(s.to_string()),
            other => Err(other),
        }
    }
}

impl FromValue for i64 {
    fn expected() -> &'static str {
        "int"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(n) => Ok(n),
            other => Err(other),
        }
    }
}

impl FromValue for i32 {
    fn expected() -> &'static str {
        "int"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(n) => i32::try_from(n).map_err(|_| Value::Int(n)),
            other => Err(other),
        }
    }
}

impl FromValue for f64 {
    fn expected() -> &'static str {
        "float"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Float(n) => Ok(n),
            other => Err(other),
        }
    }
}

impl FromValue for bool {
    fn expected() -> &'static str {
        "bool"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl FromValue for char {
    fn expected() -> &'static str {
        "char"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Char(c) => Ok(c),
            other => Err(other),
        }
    }
}

impl FromValue for Vec<Value> {
    fn expected() -> &'static str {
        "list"
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::List(items) => Ok(items.to_vec()),
            other => Err(other),
        }
    }
}

impl<T: Any + Send + Sync> FromValue for Arc<T> {
    fn expected() -> &'static str {
        std::any::type_name::<T>()
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        let object = match &value {
            Value::Object(obj) => obj.downcast(),
            _ => None,
        };
        object.ok_or(value)
    }
}

/// `Option<T>` keeps absence visible: the typed entry points return `None`
/// as the default and `Some` for every present value.
impl<T: FromValue> FromValue for Option<T> {
    fn expected() -> &'static str {
        T::expected()
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        T::from_value(value).map(Some)
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl IntoValue for i32 {
    fn into_value(self) -> Value {
        Value::Int(i64::from(self))
    }
}

impl IntoValue for usize {
    fn into_value(self) -> Value {
        // Saturate: lengths beyond i64::MAX cannot occur in practice.
        Value::Int(i64::try_from(self).unwrap_or(i64::MAX))
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl IntoValue for char {
    fn into_value(self) -> Value {
        Value::Char(self)
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::string(self)
    }
}

impl IntoValue for Vec<Value> {
    fn into_value(self) -> Value {
        Value::list(self)
    }
}

impl IntoValue for ObjectRef {
    fn into_value(self) -> Value {
        Value::Object(self)
    }
}

impl<T: Any + Send + Sync> IntoValue for Arc<T> {
    fn into_value(self) -> Value {
        Value::shared(self)
    }
}
