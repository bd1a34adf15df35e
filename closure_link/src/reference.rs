use std::fmt;

use crate::error::{LinkError, LinkResult};

/// A function named by external name and call arity, as captured at an invocation site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolicRef {
    name: String,
    arity: usize,
}

impl SymbolicRef {
    pub fn new(name: impl Into<String>, arity: usize) -> LinkResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(LinkError::InvalidReference);
        }
        Ok(Self { name, arity })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Display for SymbolicRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(SymbolicRef::new("", 1), Err(LinkError::InvalidReference));
    }

    #[test]
    fn zero_arity_is_valid() {
        let r = SymbolicRef::new("now", 0).unwrap();
        assert_eq!(r.to_string(), "now/0");
    }
}
