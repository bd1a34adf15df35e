//! Invocation error types
//!
//! Errors raised by function bodies when a linked callable is invoked.
//! The linker never interprets these; callables forward them unchanged.

use thiserror::Error;

/// Runtime error type
///
/// Represents failures of a function body or of the boxed calling convention.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Type mismatch error
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Callable invoked with the wrong number of arguments
    #[error("ArgumentCountError: {name} expects {expected} argument(s), got {got}")]
    ArgumentCount {
        /// Function name
        name: String,
        /// Accepted argument count (minimum for variadic callables)
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// Index out of bounds error
    #[error("BoundsError: attempt to access index {index} of sequence with length {length}")]
    BoundsError {
        /// Attempted index
        index: usize,
        /// Sequence length
        length: usize,
    },

    /// Division by zero error
    #[error("DivideError: integer division error")]
    DivisionByZero,

    /// Invalid argument error
    #[error("ArgumentError: {0}")]
    ArgumentError(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

impl RuntimeError {
    /// Create a type error
    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        RuntimeError::TypeError(msg.into())
    }

    /// Create an argument count error
    pub fn argument_count<S: Into<String>>(name: S, expected: usize, got: usize) -> Self {
        RuntimeError::ArgumentCount {
            name: name.into(),
            expected,
            got,
        }
    }

    /// Create a bounds error
    pub fn bounds_error(index: usize, length: usize) -> Self {
        RuntimeError::BoundsError { index, length }
    }

    /// Create an argument error
    pub fn argument_error<S: Into<String>>(msg: S) -> Self {
        RuntimeError::ArgumentError(msg.into())
    }

    /// Create a custom error
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        RuntimeError::Custom(msg.into())
    }
}

/// Result type alias for invocation
pub type RuntimeResult<T> = Result<T, RuntimeError>;
