//! Per-site caching
//!
//! Each invocation site owns its own single-entry cache. The first caller
//! runs the producer; concurrent first callers block on that one entry until
//! the value is committed and then observe it. There is no table shared
//! between sites.

use once_cell::sync::OnceCell;

use crate::bootstrap::{CallShape, SiteBinding};
use crate::callable::Callable;
use crate::error::LinkResult;
use crate::reference::SymbolicRef;

/// Write-once storage for the value bound to one site.
#[derive(Debug)]
pub struct SiteCache<T = Callable> {
    cell: OnceCell<T>,
}

impl<T> Default for SiteCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SiteCache<T> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_bound(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Return the bound value, running `produce` only if nothing is bound yet.
    pub fn get_or_create<F>(&self, produce: F) -> &T
    where
        F: FnOnce() -> T,
    {
        if let Some(bound) = self.cell.get() {
            tracing::trace!(target: "closure_link::site", "site cache hit");
            return bound;
        }
        self.cell.get_or_init(|| {
            let value = produce();
            tracing::debug!(target: "closure_link::site", "site bound");
            value
        })
    }

    /// Like `get_or_create`, but a failed `produce` leaves the site unbound.
    pub fn get_or_try_create<F, E>(&self, produce: F) -> Result<&T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        self.cell.get_or_try_init(produce)
    }
}

/// Engine-side representation of one compiled invocation site.
///
/// Holds the symbolic reference captured at compile time and the outcome of
/// linking it. The outcome is recorded whether it succeeds or fails, so a
/// site is linked at most once and a failed site stays failed.
#[derive(Debug)]
pub struct InvocationSite {
    scope: String,
    reference: SymbolicRef,
    shape: CallShape,
    link: SiteCache<LinkResult<SiteBinding>>,
}

impl InvocationSite {
    pub fn new(scope: impl Into<String>, reference: SymbolicRef, shape: CallShape) -> Self {
        Self {
            scope: scope.into(),
            reference,
            shape,
            link: SiteCache::new(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn reference(&self) -> &SymbolicRef {
        &self.reference
    }

    pub fn shape(&self) -> CallShape {
        self.shape
    }

    pub fn is_linked(&self) -> bool {
        self.link.is_bound()
    }

    /// Outcome of linking, if the site has been linked.
    pub fn outcome(&self) -> Option<&LinkResult<SiteBinding>> {
        self.link.get()
    }

    pub(crate) fn link_cache(&self) -> &SiteCache<LinkResult<SiteBinding>> {
        &self.link
    }
}
