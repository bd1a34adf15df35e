//! Boxed value type for linked callables
//!
//! This module provides the `Value` enum passed to and returned from every
//! callable, whatever the native shape of the function behind it.
//! All variants are `Send + Sync` so values can cross worker threads.

use std::fmt;
use std::sync::Arc;

use crate::error::RuntimeResult;

/// A function that can be invoked through the boxed calling convention.
///
/// Implemented by the linker's callables so they can travel as
/// first-class values (`Value::Function`).
pub trait Invocable: fmt::Debug + Send + Sync {
    /// External name of the wrapped function
    fn name(&self) -> &str;

    /// Number of arguments the callable is invoked with
    fn arity(&self) -> usize;

    /// Invoke with positional boxed arguments
    fn invoke(&self, args: &[Value]) -> RuntimeResult<Value>;
}

/// Dynamic value type
///
/// Used for every argument and result crossing a callable boundary.
#[derive(Debug, Clone)]
pub enum Value {
    // ========== Primitive Types ==========
    /// 64-bit signed integer
    I64(i64),
    /// 64-bit floating point
    F64(f64),
    /// Boolean
    Bool(bool),
    /// Character
    Char(char),
    /// Nothing (unit type, like void)
    Nothing,

    // ========== Heap-Allocated Types ==========
    /// String
    Str(String),
    /// Ordered sequence, shared and immutable once built
    List(Arc<Vec<Value>>),
    /// Tuple
    Tuple(Vec<Value>),

    // ========== Functions ==========
    /// First-class function reference
    Function(Arc<dyn Invocable>),
}

impl Value {
    /// Get the type name of this value
    pub fn type_name(&self) -> &str {
        match self {
            Value::I64(_) => "Int64",
            Value::F64(_) => "Float64",
            Value::Bool(_) => "Bool",
            Value::Char(_) => "Char",
            Value::Nothing => "Nothing",
            Value::Str(_) => "String",
            Value::List(_) => "List",
            Value::Tuple(_) => "Tuple",
            Value::Function(_) => "Function",
        }
    }

    /// Build a list from an iterator of values
    pub fn list<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::List(Arc::new(items.into_iter().collect()))
    }

    /// Check if this value is nothing
    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    /// Try to extract as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to extract as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(v) => Some(*v),
            Value::I64(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Try to extract as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to extract as string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to view as an ordered sequence (lists and tuples)
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            Value::Tuple(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Try to extract as a function reference
    pub fn as_function(&self) -> Option<&Arc<dyn Invocable>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }
}

// ========== From implementations ==========

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::I64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Value::Char(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v.into_iter().map(Into::into))
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Nothing
    }
}

// ========== Display implementation ==========

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, v) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", v)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I64(v) => write!(f, "{}", v),
            Value::F64(v) => {
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{}.0", v)
                } else {
                    write!(f, "{}", v)
                }
            }
            Value::Bool(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "'{}'", v),
            Value::Nothing => write!(f, "nothing"),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::List(items) => {
                write!(f, "[")?;
                write_seq(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_seq(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Function(func) => write!(f, "{}/{}", func.name(), func.arity()),
        }
    }
}

// ========== PartialEq implementation ==========

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Nothing, Value::Nothing) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            // Functions are compared by identity
            (Value::Function(a), Value::Function(b)) => {
                std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
            }
            _ => false,
        }
    }
}
