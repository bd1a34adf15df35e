//! Call-site bootstrap and closure-reference resolution.
//!
//! Compiled code refers to some functions by `(name, arity)` instead of by
//! address. The first time such an invocation site is prepared, the engine
//! asks the [`Linker`] to bootstrap it: the [`Resolver`] finds exactly one
//! visible [`FunctionDef`], [`adapt`] wraps it into a uniform [`Callable`],
//! and the site's [`SiteCache`] keeps that binding for every later execution.
//!
//! ```
//! use std::sync::Arc;
//! use closure_link::{CallShape, FunctionSpace, Linker};
//! use closure_link_runtime::Value;
//!
//! let space = FunctionSpace::builder()
//!     .unit("main", |u| {
//!         u.function("to_list", 2, |args| Ok(Value::list(args.iter().cloned())))
//!     })
//!     .build()
//!     .unwrap();
//! let linker = Linker::new(Arc::new(space));
//!
//! let binding = linker
//!     .bootstrap("main", "to_list", CallShape::reference(), 2)
//!     .unwrap();
//! let result = binding
//!     .callable()
//!     .invoke(&[Value::from("foo"), Value::from("bar")])
//!     .unwrap();
//! assert_eq!(result, Value::from(vec!["foo", "bar"]));
//! ```

// Library code reports through `tracing`, never directly to stderr.
#![deny(clippy::print_stderr)]

pub mod bootstrap;
pub mod callable;
pub mod config;
pub mod error;
pub mod reference;
pub mod resolve;
pub mod site;
pub mod space;
pub mod stats;

pub use bootstrap::{CallShape, Linker, SiteBinding};
pub use callable::{adapt, Callable};
pub use config::{LinkerConfig, ShadowPolicy};
pub use error::{ConfigError, LinkError, LinkResult, SpaceError};
pub use reference::SymbolicRef;
pub use resolve::Resolver;
pub use site::{InvocationSite, SiteCache};
pub use space::{CompilationUnit, FunctionDef, FunctionSpace, UnitBuilder, Visibility};
pub use stats::LinkStatsSnapshot;
