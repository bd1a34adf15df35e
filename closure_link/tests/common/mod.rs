//! Shared helpers for integration tests
// Each test target uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use closure_link::{FunctionSpace, Linker, LinkerConfig};
use closure_link_runtime::{to_i64, to_str, RuntimeError, Value};

/// Function space used across the integration tests:
///
/// - `lists`: `to_list/2`, `to_list/1`, private `walk/1`
/// - `math`: `add/2`, `div/2`, `sum/1` (variadic)
/// - `text`: `upper/1`, `add/2` (clashes with `math::add/2`)
/// - `main`: imports `lists` and `math`, defines private `helper/0`
/// - `mixed`: imports `math` and `text`
pub fn sample_space() -> FunctionSpace {
    FunctionSpace::builder()
        .unit("lists", |u| {
            u.function("to_list", 2, |args| Ok(Value::list(args.iter().cloned())))
                .function("to_list", 1, |args| Ok(Value::list(args.iter().cloned())))
                .private_function("walk", 1, |args| Ok(args[0].clone()))
        })
        .unit("math", |u| {
            u.function("add", 2, |args| {
                Ok(Value::I64(to_i64(&args[0])? + to_i64(&args[1])?))
            })
            .function("div", 2, |args| {
                let (a, b) = (to_i64(&args[0])?, to_i64(&args[1])?);
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero);
                }
                Ok(Value::I64(a / b))
            })
            .variadic_function("sum", 1, |args| {
                let rest = args[0].as_slice().unwrap_or_default();
                let mut total = 0;
                for v in rest {
                    total += to_i64(v)?;
                }
                Ok(Value::I64(total))
            })
        })
        .unit("text", |u| {
            u.function("upper", 1, |args| {
                Ok(Value::from(to_str(&args[0])?.to_uppercase()))
            })
            .function("add", 2, |args| {
                Ok(Value::from(format!("{}{}", to_str(&args[0])?, to_str(&args[1])?)))
            })
        })
        .unit("main", |u| {
            u.import("lists")
                .import("math")
                .private_function("helper", 0, |_| Ok(Value::from("help")))
        })
        .unit("mixed", |u| u.import("math").import("text"))
        .build()
        .expect("sample space is well formed")
}

pub fn sample_linker() -> Linker {
    Linker::new(Arc::new(sample_space()))
}

pub fn sample_linker_with(config: LinkerConfig) -> Linker {
    Linker::with_config(Arc::new(sample_space()), config)
}

pub fn strs(items: &[&str]) -> Vec<Value> {
    items.iter().map(|s| Value::from(*s)).collect()
}
