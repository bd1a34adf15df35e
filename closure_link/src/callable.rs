//! Callable factory
//!
//! `adapt` wraps a resolved `FunctionDef` into a `Callable`: fixed arity,
//! boxed arguments, boxed result. A callable is immutable; cloning it shares
//! the same allocation, and identity (`Callable::ptr_eq`) is what a bound
//! invocation site hands out on every execution.
//!
//! Variadic definitions are adapted with a collector: the arguments from the
//! rest position onward are packed into a `Value::Tuple` before the body runs.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::sync::Arc;

use closure_link_runtime::{Invocable, RuntimeError, RuntimeResult, Value};

use crate::error::{LinkError, LinkResult};
use crate::space::FunctionDef;

#[derive(Debug)]
enum Target {
    /// A function definition from the candidate space
    Definition(Arc<FunctionDef>),
    /// Partial application of the first argument
    Bound { inner: Callable, first: Value },
    /// `then(first(args...))`
    Composed { first: Callable, then: Callable },
}

#[derive(Debug)]
struct CallableInner {
    name: String,
    arity: usize,
    variadic: bool,
    target: Target,
}

impl CallableInner {
    fn min_args(&self) -> usize {
        if self.variadic {
            self.arity.saturating_sub(1)
        } else {
            self.arity
        }
    }

    fn check_count(&self, got: usize) -> RuntimeResult<()> {
        let accepted = if self.variadic {
            got >= self.min_args()
        } else {
            got == self.arity
        };
        if accepted {
            Ok(())
        } else {
            Err(RuntimeError::argument_count(
                self.name.as_str(),
                self.min_args(),
                got,
            ))
        }
    }
}

impl Invocable for CallableInner {
    fn name(&self) -> &str {
        &self.name
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn invoke(&self, args: &[Value]) -> RuntimeResult<Value> {
        self.check_count(args.len())?;
        match &self.target {
            Target::Definition(def) if def.is_variadic() => {
                let fixed = def.arity() - 1;
                let mut packed = Vec::with_capacity(def.arity());
                packed.extend_from_slice(&args[..fixed]);
                packed.push(Value::Tuple(args[fixed..].to_vec()));
                def.call(&packed)
            }
            Target::Definition(def) => def.call(args),
            Target::Bound { inner, first } => {
                let mut full = Vec::with_capacity(args.len() + 1);
                full.push(first.clone());
                full.extend_from_slice(args);
                inner.invoke(&full)
            }
            Target::Composed { first, then } => {
                let intermediate = first.invoke(args)?;
                then.invoke(std::slice::from_ref(&intermediate))
            }
        }
    }
}

/// A uniform, boxed-calling-convention function value.
#[derive(Clone)]
pub struct Callable {
    inner: Arc<CallableInner>,
}

/// Wrap `def` as a callable invoked with `arity` arguments.
///
/// Fixed-arity definitions must declare exactly `arity` parameters.
/// Variadic definitions are matched on their declared width as well.
pub fn adapt(def: Arc<FunctionDef>, arity: usize) -> LinkResult<Callable> {
    if def.arity() != arity {
        return Err(LinkError::ArityMismatch {
            name: def.name().to_string(),
            expected: def.arity(),
            requested: arity,
        });
    }
    Ok(Callable::from_inner(CallableInner {
        name: def.name().to_string(),
        arity,
        variadic: def.is_variadic(),
        target: Target::Definition(def),
    }))
}

impl Callable {
    fn from_inner(inner: CallableInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn arity(&self) -> usize {
        self.inner.arity
    }

    pub fn is_variadic(&self) -> bool {
        self.inner.variadic
    }

    /// Invoke with positional boxed arguments. Failures of the wrapped body
    /// are returned unchanged.
    pub fn invoke(&self, args: &[Value]) -> RuntimeResult<Value> {
        self.inner.invoke(args)
    }

    pub fn ptr_eq(a: &Callable, b: &Callable) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// This callable as a first-class `Value::Function`.
    pub fn to_value(&self) -> Value {
        let inner: Arc<dyn Invocable> = self.inner.clone();
        Value::Function(inner)
    }

    /// Whether `value` is a function reference to this very callable.
    pub fn is_same_as(&self, value: &Value) -> bool {
        match value {
            Value::Function(f) => std::ptr::eq(
                Arc::as_ptr(f) as *const (),
                Arc::as_ptr(&self.inner) as *const (),
            ),
            _ => false,
        }
    }

    /// Fix the first argument, yielding a callable of one lower arity.
    pub fn bind_first(&self, value: Value) -> RuntimeResult<Callable> {
        if self.arity() == 0 {
            return Err(RuntimeError::argument_error(format!(
                "cannot bind an argument of {}/0",
                self.name()
            )));
        }
        Ok(Callable::from_inner(CallableInner {
            name: self.name().to_string(),
            arity: self.arity() - 1,
            variadic: self.is_variadic(),
            target: Target::Bound {
                inner: self.clone(),
                first: value,
            },
        }))
    }

    /// Feed this callable's result into `next`, which must take one argument.
    pub fn and_then(&self, next: &Callable) -> RuntimeResult<Callable> {
        if next.arity() != 1 || next.is_variadic() {
            return Err(RuntimeError::argument_error(format!(
                "{}/{} cannot receive a single result",
                next.name(),
                next.arity()
            )));
        }
        Ok(Callable::from_inner(CallableInner {
            name: format!("{}>>{}", self.name(), next.name()),
            arity: self.arity(),
            variadic: self.is_variadic(),
            target: Target::Composed {
                first: self.clone(),
                then: next.clone(),
            },
        }))
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.inner.name)
            .field("arity", &self.inner.arity)
            .field("variadic", &self.inner.variadic)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::space::FunctionSpace;
    use closure_link_runtime::{to_i64, to_str};
    use pretty_assertions::assert_eq;

    fn def(space: &FunctionSpace, name: &str) -> Arc<FunctionDef> {
        space
            .unit("m")
            .and_then(|u| u.named(name).next().cloned())
            .unwrap()
    }

    fn sample() -> FunctionSpace {
        FunctionSpace::builder()
            .unit("m", |u| {
                u.function("to_list", 2, |args| Ok(Value::list(args.iter().cloned())))
                    .function("sub", 2, |args| Ok(Value::I64(to_i64(&args[0])? - to_i64(&args[1])?)))
                    .function("inc", 1, |args| Ok(Value::I64(to_i64(&args[0])? + 1)))
                    .function("fail", 1, |args| {
                        Err(RuntimeError::custom(format!("fail: {}", to_str(&args[0])?)))
                    })
                    .variadic_function("join", 2, |args| {
                        let sep = to_str(&args[0])?;
                        let rest = args[1].as_slice().unwrap_or_default();
                        let parts: Vec<&str> = rest.iter().filter_map(Value::as_str).collect();
                        Ok(Value::from(parts.join(sep)))
                    })
            })
            .build()
            .unwrap()
    }

    #[test]
    fn adapted_callable_matches_direct_invocation() {
        let space = sample();
        let to_list = def(&space, "to_list");
        let callable = adapt(Arc::clone(&to_list), 2).unwrap();
        let args = [Value::from("foo"), Value::from("bar")];

        assert_eq!(callable.invoke(&args).unwrap(), to_list.call(&args).unwrap());
        assert_eq!(callable.invoke(&args).unwrap(), Value::from(vec!["foo", "bar"]));
    }

    #[test]
    fn adapt_rejects_other_arity() {
        let space = sample();
        let err = adapt(def(&space, "to_list"), 3).unwrap_err();
        assert_eq!(
            err,
            LinkError::ArityMismatch {
                name: "to_list".to_string(),
                expected: 2,
                requested: 3
            }
        );
    }

    #[test]
    fn wrong_argument_count_does_not_run_body() {
        let space = sample();
        let callable = adapt(def(&space, "to_list"), 2).unwrap();
        assert_eq!(
            callable.invoke(&[Value::I64(1)]).unwrap_err(),
            RuntimeError::argument_count("to_list", 2, 1)
        );
    }

    #[test]
    fn body_failures_pass_through_unchanged() {
        let space = sample();
        let callable = adapt(def(&space, "fail"), 1).unwrap();
        assert_eq!(
            callable.invoke(&[Value::from("boom")]).unwrap_err(),
            RuntimeError::custom("fail: boom")
        );
        assert_eq!(
            callable.invoke(&[Value::I64(3)]).unwrap_err(),
            RuntimeError::type_error("expected String, got Int64")
        );
    }

    #[test]
    fn variadic_callable_collects_rest_arguments() {
        let space = sample();
        let join = adapt(def(&space, "join"), 2).unwrap();
        assert!(join.is_variadic());

        let joined = join
            .invoke(&[Value::from("-"), Value::from("a"), Value::from("b"), Value::from("c")])
            .unwrap();
        assert_eq!(joined, Value::from("a-b-c"));
        assert_eq!(join.invoke(&[Value::from("-")]).unwrap(), Value::from(""));
        assert_eq!(
            join.invoke(&[]).unwrap_err(),
            RuntimeError::argument_count("join", 1, 0)
        );
    }

    #[test]
    fn bind_first_partially_applies() {
        let space = sample();
        let sub = adapt(def(&space, "sub"), 2).unwrap();
        let ten_minus = sub.bind_first(Value::I64(10)).unwrap();
        assert_eq!(ten_minus.arity(), 1);
        assert_eq!(ten_minus.invoke(&[Value::I64(3)]).unwrap(), Value::I64(7));

        let constant = ten_minus.bind_first(Value::I64(4)).unwrap();
        assert_eq!(constant.invoke(&[]).unwrap(), Value::I64(6));
        assert!(constant.bind_first(Value::Nothing).is_err());
    }

    #[test]
    fn and_then_composes_left_to_right() {
        let space = sample();
        let sub = adapt(def(&space, "sub"), 2).unwrap();
        let inc = adapt(def(&space, "inc"), 1).unwrap();
        let composed = sub.and_then(&inc).unwrap();
        assert_eq!(composed.name(), "sub>>inc");
        assert_eq!(composed.arity(), 2);
        assert_eq!(
            composed.invoke(&[Value::I64(5), Value::I64(2)]).unwrap(),
            Value::I64(4)
        );
        assert!(inc.and_then(&sub).is_err());
    }

    #[test]
    fn function_value_keeps_identity() {
        let space = sample();
        let callable = adapt(def(&space, "inc"), 1).unwrap();
        let value = callable.to_value();
        assert!(callable.is_same_as(&value));
        assert!(Callable::ptr_eq(&callable, &callable.clone()));

        let other = adapt(def(&space, "inc"), 1).unwrap();
        assert!(!other.is_same_as(&value));
        assert_eq!(format!("{}", value), "inc/1");

        let Value::Function(f) = value else {
            panic!("expected a function value");
        };
        assert_eq!(f.invoke(&[Value::I64(1)]).unwrap(), Value::I64(2));
    }
}
