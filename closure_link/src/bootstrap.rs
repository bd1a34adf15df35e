//! Bootstrap entry point
//!
//! The execution engine calls `Linker::bootstrap` once per compiled
//! invocation site, with the symbolic reference and the call shape it
//! expects back. Bootstrapping resolves the reference, adapts the
//! definition, and returns a `SiteBinding` the engine invokes from then on.
//! Engines that keep an `InvocationSite` per compiled site use
//! `Linker::link_site`, which goes through the site's own cache so that
//! concurrent first executions link exactly once.
//!
//! Link failures are returned to the engine and recorded on the site; no
//! fallback binding is ever installed.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::sync::Arc;

use closure_link_runtime::{RuntimeError, RuntimeResult, Value};

use crate::callable::{adapt, Callable};
use crate::config::LinkerConfig;
use crate::error::{LinkError, LinkResult};
use crate::reference::SymbolicRef;
use crate::resolve::Resolver;
use crate::site::InvocationSite;
use crate::space::FunctionSpace;
use crate::stats::{LinkStats, LinkStatsSnapshot};

/// The invocation shape an engine expects from a bootstrapped site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallShape {
    /// No inputs; the site yields the callable itself as a function value.
    Reference,
    /// `n` boxed inputs, one boxed result; the site calls the function.
    Direct(usize),
}

impl CallShape {
    pub const fn reference() -> Self {
        CallShape::Reference
    }

    pub const fn direct(params: usize) -> Self {
        CallShape::Direct(params)
    }

    /// Number of inputs the engine passes when invoking the site.
    pub fn params(&self) -> usize {
        match self {
            CallShape::Reference => 0,
            CallShape::Direct(n) => *n,
        }
    }

    pub fn returns_callable(&self) -> bool {
        matches!(self, CallShape::Reference)
    }

    fn fits(&self, reference: &SymbolicRef) -> bool {
        match self {
            CallShape::Reference => true,
            CallShape::Direct(n) => *n == reference.arity(),
        }
    }
}

impl fmt::Display for CallShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = vec!["Any"; self.params()].join(", ");
        let ret = if self.returns_callable() {
            "Function"
        } else {
            "Any"
        };
        write!(f, "({}) -> {}", params, ret)
    }
}

/// What the engine holds for a linked site.
#[derive(Debug, Clone)]
pub struct SiteBinding {
    shape: CallShape,
    callable: Callable,
}

impl SiteBinding {
    pub fn shape(&self) -> CallShape {
        self.shape
    }

    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    /// Invoke the site according to its shape.
    pub fn invoke(&self, args: &[Value]) -> RuntimeResult<Value> {
        match self.shape {
            CallShape::Reference if args.is_empty() => Ok(self.callable.to_value()),
            CallShape::Reference => Err(RuntimeError::argument_count(
                self.callable.name(),
                0,
                args.len(),
            )),
            CallShape::Direct(_) => self.callable.invoke(args),
        }
    }
}

/// Links invocation sites against one candidate function space.
#[derive(Debug)]
pub struct Linker {
    space: Arc<FunctionSpace>,
    config: LinkerConfig,
    stats: LinkStats,
}

impl Linker {
    pub fn new(space: Arc<FunctionSpace>) -> Self {
        Self::with_config(space, LinkerConfig::default())
    }

    pub fn with_config(space: Arc<FunctionSpace>, config: LinkerConfig) -> Self {
        Self {
            space,
            config,
            stats: LinkStats::default(),
        }
    }

    pub fn space(&self) -> &Arc<FunctionSpace> {
        &self.space
    }

    pub fn config(&self) -> &LinkerConfig {
        &self.config
    }

    pub fn stats(&self) -> LinkStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.space, &self.config)
    }

    /// Turn `name`/`arity` seen from `scope` into a binding of `shape`.
    pub fn bootstrap(
        &self,
        scope: &str,
        name: &str,
        shape: CallShape,
        arity: usize,
    ) -> LinkResult<SiteBinding> {
        let result = self.bootstrap_inner(scope, name, shape, arity);
        if let Err(err) = &result {
            self.stats.record_failure();
            tracing::warn!(
                target: "closure_link::bootstrap",
                scope,
                name,
                arity,
                %shape,
                error = %err,
                "failed to link invocation site"
            );
        }
        result
    }

    fn bootstrap_inner(
        &self,
        scope: &str,
        name: &str,
        shape: CallShape,
        arity: usize,
    ) -> LinkResult<SiteBinding> {
        let reference = SymbolicRef::new(name, arity)?;
        if !shape.fits(&reference) {
            return Err(LinkError::ShapeMismatch {
                name: name.to_string(),
                arity,
                shape,
            });
        }

        self.stats.record_resolution();
        let def = self.resolver().resolve(&reference, scope)?;
        let callable = adapt(def, arity)?;
        Ok(SiteBinding { shape, callable })
    }

    /// Link `site` through its own cache; the outcome is computed once.
    pub fn link_site<'s>(&self, site: &'s InvocationSite) -> LinkResult<&'s SiteBinding> {
        let cache = site.link_cache();
        if cache.is_bound() {
            self.stats.record_cache_hit();
        }
        let outcome = cache.get_or_create(|| {
            let reference = site.reference();
            self.bootstrap(site.scope(), reference.name(), site.shape(), reference.arity())
        });
        outcome.as_ref().map_err(Clone::clone)
    }
}
