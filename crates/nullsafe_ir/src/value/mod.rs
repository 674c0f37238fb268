//! Runtime values flowing through an access chain.
//!
//! A `Value` is always *present*. Absence ("no object") is modelled as
//! `Option<Value>::None` at every step boundary, so a present `0`, `""`,
//! `false` or `'\0'` can never be confused with a missing object.
//!
//! Host objects enter the chain as [`ObjectRef`], a type-erased shared
//! pointer that member reads and method calls downcast back to the concrete
//! type they expect:
//!
//! ```text
//! let node = Value::object(Node::default());
//! let inner: Arc<Node> = node.downcast::<Node>()?;
//! ```

mod convert;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

pub use convert::{FromValue, IntoValue};

/// A present runtime value.
#[derive(Clone)]
pub enum Value {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Character value.
    Char(char),
    /// String value.
    Str(Arc<str>),
    /// List of present values.
    List(Arc<[Value]>),
    /// Shared host object.
    Object(ObjectRef),
}

// Factory Methods

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::Str(s.into())
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: impl Into<Arc<[Value]>>) -> Self {
        Value::List(items.into())
    }

    /// Wrap a host object.
    #[inline]
    pub fn object<T: Any + Send + Sync>(value: T) -> Self {
        Value::Object(ObjectRef::new(value))
    }

    /// Wrap an already shared host object without copying it.
    #[inline]
    pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Value::Object(ObjectRef::from_arc(value))
    }
}

// Accessors

impl Value {
    /// Name of the value's type, as used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Object(obj) => obj.type_name(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the host object as `T`, if this value is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Object(obj) => obj.downcast_ref(),
            _ => None,
        }
    }

    /// Get a shared handle to the host object as `T`.
    ///
    /// This is the usual first line of a member read or method call closure:
    /// a receiver of the wrong type is a failure of the read itself.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>, ReceiverMismatch> {
        let object = match self {
            Value::Object(obj) => obj.downcast(),
            _ => None,
        };
        object.ok_or_else(|| ReceiverMismatch {
            expected: std::any::type_name::<T>(),
            found: self.type_name(),
        })
    }

    /// Render the value as a literal, quoting strings and characters.
    pub fn literal(&self) -> String {
        match self {
            Value::Str(s) => format!("{:?}", &**s),
            Value::Char(c) => format!("{c:?}"),
            other => other.to_string(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            #[allow(clippy::float_cmp, reason = "values compare by exact identity")]
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Char(c) => write!(f, "Char({c:?})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Object(obj) => write!(f, "Object({obj:?})"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&item.literal())?;
                }
                f.write_str("]")
            }
            Value::Object(obj) => write!(f, "<{}>", obj.short_type_name()),
        }
    }
}

/// Type-erased shared host object.
#[derive(Clone)]
pub struct ObjectRef {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ObjectRef {
    /// Move `value` into a new shared object.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Share an existing `Arc` without copying the object.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        ObjectRef {
            inner: value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name of the wrapped object.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name without its module path.
    pub fn short_type_name(&self) -> &'static str {
        let base = self.type_name.split('<').next().unwrap_or(self.type_name);
        base.rsplit("::").next().unwrap_or(base)
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast().ok()
    }

    /// Whether both handles point at the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:p}", self.short_type_name(), Arc::as_ptr(&self.inner))
    }
}

/// A member read or method call received a value of the wrong type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("expected receiver of type {expected}, found {found}")]
pub struct ReceiverMismatch {
    pub expected: &'static str,
    pub found: &'static str,
}
