//! Link-time error types
//!
//! `LinkError` is surfaced once, when an invocation site is bootstrapped, and
//! leaves that site permanently unusable. Failures raised later by a linked
//! function body are `closure_link_runtime::RuntimeError` and never pass
//! through here.

use std::path::PathBuf;

use thiserror::Error;

use crate::bootstrap::CallShape;

/// Errors raised while turning a symbolic reference into a callable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    /// Reference with an empty function name
    #[error("invalid function reference: name must not be empty")]
    InvalidReference,

    /// Requesting scope is not a unit of the function space
    #[error("unknown scope '{scope}'")]
    UnknownScope { scope: String },

    /// A visible unit imports a unit the loader never provided
    #[error("unit '{unit}' imports unknown unit '{import}'")]
    UnknownImport { unit: String, import: String },

    /// Nothing visible matches name and arity
    #[error(
        "no function {name}/{arity} visible from '{scope}'{}",
        arity_hint(.other_arities)
    )]
    NoSuchFunction {
        name: String,
        arity: usize,
        scope: String,
        /// Arities at which `name` does exist, for diagnostics
        other_arities: Vec<usize>,
    },

    /// More than one distinct definition matches
    #[error(
        "ambiguous reference {name}/{arity} from '{scope}': candidates {}",
        .candidates.join(", ")
    )]
    AmbiguousFunction {
        name: String,
        arity: usize,
        scope: String,
        /// `unit::name/arity` of every match, sorted
        candidates: Vec<String>,
    },

    /// A fixed-arity definition adapted at a different arity
    #[error("cannot adapt {name}/{expected} to arity {requested}")]
    ArityMismatch {
        name: String,
        expected: usize,
        requested: usize,
    },

    /// The engine asked for a shape the reference cannot satisfy
    #[error("call shape {shape} does not fit {name}/{arity}")]
    ShapeMismatch {
        name: String,
        arity: usize,
        shape: CallShape,
    },
}

fn arity_hint(other_arities: &[usize]) -> String {
    if other_arities.is_empty() {
        return String::new();
    }
    let listed: Vec<String> = other_arities.iter().map(|a| a.to_string()).collect();
    format!(" (defined with arity {})", listed.join(", "))
}

/// Result type alias for linking
pub type LinkResult<T> = Result<T, LinkError>;

/// Errors raised while assembling a function space.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpaceError {
    #[error("compilation unit '{0}' is defined more than once")]
    DuplicateUnit(String),

    #[error("invalid definition {unit}::{name}: {reason}")]
    InvalidDefinition {
        unit: String,
        name: String,
        reason: String,
    },
}

/// Errors raised while reading linker configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    #[error("cannot read config {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("malformed linker config: {0}")]
    Parse(String),
}
