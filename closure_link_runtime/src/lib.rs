//! closure_link runtime support
//!
//! This crate holds the pieces shared between linked callables and the
//! function bodies they wrap:
//!
//! - `Value` enum for the boxed calling convention
//! - `Invocable` trait implemented by first-class function references
//! - `RuntimeError` raised by function bodies
//! - Argument conversion utilities

pub mod convert;
pub mod error;
pub mod value;

/// Prelude module for convenient imports
///
/// # Example
/// ```
/// use closure_link_runtime::prelude::*;
/// ```
pub mod prelude {
    pub use super::convert::{to_f64, to_function, to_i64, to_str};
    pub use super::error::{RuntimeError, RuntimeResult};
    pub use super::value::{Invocable, Value};
}

pub use prelude::*;
