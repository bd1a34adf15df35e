use std::sync::atomic::{AtomicU64, Ordering};

/// Link counters, updated lock-free from any thread.
#[derive(Debug, Default)]
pub struct LinkStats {
    resolutions: AtomicU64,
    failures: AtomicU64,
    cache_hits: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkStatsSnapshot {
    /// Bootstrap attempts that reached the resolver
    pub resolutions: u64,
    /// Bootstrap attempts that ended in a `LinkError`
    pub failures: u64,
    /// `link_site` calls answered from an already linked site
    pub cache_hits: u64,
}

impl LinkStats {
    pub(crate) fn record_resolution(&self) {
        self.resolutions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> LinkStatsSnapshot {
        LinkStatsSnapshot {
            resolutions: self.resolutions.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
        }
    }
}
