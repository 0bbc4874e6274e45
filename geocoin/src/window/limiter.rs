//! Cap on concurrently materialized caches.
//!
//! Eviction is FIFO by insertion into the visible set, not LRU by access:
//! opening a cache's popup does not refresh its position in the eviction
//! order. Evicted caches lose only their marker; the cache object stays in
//! the store.

use tracing::debug;

use super::VisibleSet;
use crate::view::WorldView;

/// Enforces the maximum number of simultaneously visible caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheLimiter {
    max_visible: usize,
}

impl CacheLimiter {
    /// Create a limiter allowing at most `max_visible` materialized caches.
    pub fn new(max_visible: usize) -> Self {
        Self { max_visible }
    }

    /// The configured cap.
    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Whether the set has no room for another cache.
    pub fn at_capacity(&self, visible: &VisibleSet) -> bool {
        visible.len() >= self.max_visible
    }

    /// Evict oldest-added entries until the set fits under the cap.
    ///
    /// Retraction is view-only: each victim's marker is removed but its
    /// cache survives in the store. Returns the number of evictions.
    pub fn enforce<V: WorldView>(&self, visible: &mut VisibleSet, view: &mut V) -> usize {
        let mut evicted = 0;
        while visible.len() > self.max_visible {
            let Some(entry) = visible.pop_oldest() else {
                break;
            };
            view.remove_marker(entry.marker);
            debug!(cell = %entry.cell, "evicted cache marker over visibility cap");
            evicted += 1;
        }
        evicted
    }
}
