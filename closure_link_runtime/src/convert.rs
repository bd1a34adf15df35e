//! Argument conversion helpers for function bodies
//!
//! Bodies receive boxed arguments; these helpers unbox them with a
//! `TypeError` on mismatch instead of panicking.

use std::sync::Arc;

use crate::error::{RuntimeError, RuntimeResult};
use crate::value::{Invocable, Value};

/// Convert a Value to i64
pub fn to_i64(value: &Value) -> RuntimeResult<i64> {
    match value {
        Value::I64(v) => Ok(*v),
        Value::F64(v) => {
            if v.fract() != 0.0 {
                Err(RuntimeError::type_error(format!(
                    "cannot convert {} to Int64",
                    v
                )))
            } else {
                Ok(*v as i64)
            }
        }
        Value::Bool(v) => Ok(if *v { 1 } else { 0 }),
        Value::Char(c) => Ok(*c as i64),
        _ => Err(RuntimeError::type_error(format!(
            "cannot convert {} to Int64",
            value.type_name()
        ))),
    }
}

/// Convert a Value to f64
pub fn to_f64(value: &Value) -> RuntimeResult<f64> {
    match value {
        Value::F64(v) => Ok(*v),
        Value::I64(v) => Ok(*v as f64),
        Value::Bool(v) => Ok(if *v { 1.0 } else { 0.0 }),
        _ => Err(RuntimeError::type_error(format!(
            "cannot convert {} to Float64",
            value.type_name()
        ))),
    }
}

/// Borrow a Value as a string slice
pub fn to_str(value: &Value) -> RuntimeResult<&str> {
    value.as_str().ok_or_else(|| {
        RuntimeError::type_error(format!("expected String, got {}", value.type_name()))
    })
}

/// Borrow a Value as a function reference
pub fn to_function(value: &Value) -> RuntimeResult<&Arc<dyn Invocable>> {
    value.as_function().ok_or_else(|| {
        RuntimeError::type_error(format!("expected Function, got {}", value.type_name()))
    })
}
