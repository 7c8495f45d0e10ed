//! Precompute cache for candidate enumeration.
//!
//! Enumerating candidates walks every category query and runs the visibility
//! predicate over each element, so the runtime schedules it ahead of activation
//! (on idle signals and after surface-mutation bursts). The cache holds the
//! resulting unlabeled enumeration together with its capture timestamp.
//!
//! The cache is a pure performance optimization with no correctness dependency:
//! a stale or absent cache always falls back to a fresh enumeration, only
//! slower. Writers fully replace the stored enumeration; there is no partial
//! update to observe.

use crate::index::ElementSnapshot;

/// A stored enumeration with its capture time.
#[derive(Debug, Clone)]
struct CachedEnumeration {
    elements: Vec<ElementSnapshot>,
    captured_at_ms: i64,
}

/// Timestamped cache of one precomputed enumeration.
#[derive(Debug, Default)]
pub struct PrecomputeCache {
    entry: Option<CachedEnumeration>,
}

impl PrecomputeCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached enumeration atomically.
    pub fn store(&mut self, elements: Vec<ElementSnapshot>, now_ms: i64) {
        tracing::debug!(element_count = elements.len(), captured_at_ms = now_ms, "precompute cache replaced");
        self.entry = Some(CachedEnumeration {
            elements,
            captured_at_ms: now_ms,
        });
    }

    /// Takes the cached enumeration if it is younger than `max_age_ms`,
    /// invalidating the cache either way.
    ///
    /// Activation start consumes the cache through this: a hit hands over the
    /// precomputed enumeration, a miss (stale or absent) clears the entry so
    /// the caller enumerates fresh.
    pub fn take_if_fresh(&mut self, now_ms: i64, max_age_ms: i64) -> Option<Vec<ElementSnapshot>> {
        let entry = self.entry.take()?;
        let age_ms = now_ms - entry.captured_at_ms;
        if age_ms < max_age_ms {
            tracing::debug!(age_ms = age_ms, element_count = entry.elements.len(), "precompute cache hit");
            Some(entry.elements)
        } else {
            tracing::debug!(age_ms = age_ms, max_age_ms = max_age_ms, "precompute cache expired");
            None
        }
    }

    /// Whether a cached enumeration is currently stored, fresh or not.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        self.entry.is_some()
    }
}
