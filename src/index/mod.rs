//! Candidate enumeration and working-set construction.
//!
//! [`CandidateIndex`] turns the raw surface into the labeled working set an
//! activation filters against. Enumeration walks the semantic categories in a
//! fixed order (links, buttons, text entry, selection controls), keeps only
//! elements the visibility predicate accepts, and deduplicates by target so an
//! element matching several category selectors is counted once under the
//! earliest category.
//!
//! Enumeration order is load-bearing: the candidate at position `k` receives
//! the label for index `k`, so links always claim the shortest labels and
//! surface-native document order is preserved within each category.
//!
//! The index also owns the precompute cache ([`cache`]). Activation consumes a
//! fresh cache entry instead of re-querying the surface; stale or absent
//! entries fall back to a fresh enumeration transparently.
//!
//! # Organization
//!
//! - [`labels`]: bijective base-26 label generation
//! - [`cache`]: timestamped storage for precomputed enumerations

pub mod cache;
pub mod labels;

use std::collections::HashSet;

use crate::domain::{Candidate, TargetId, TargetKind, WorkingSet};
use crate::index::cache::PrecomputeCache;
use crate::surface::{visibility, Category, Surface};

/// One enumerated element before labeling.
///
/// This is what the precompute cache stores: target identity, dispatch-relevant
/// facts, and the lower-cased text snapshot, but no label; labels are assigned
/// at activation time from the final enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSnapshot {
    /// Opaque handle to the surface element.
    pub target: TargetId,
    /// Semantic kind from the category the element was first accepted under.
    pub kind: TargetKind,
    /// Navigable destination, for link targets that have one.
    pub href: Option<String>,
    /// Lower-cased text content captured at enumeration time.
    pub text: String,
}

/// Enumerates actionable targets and builds labeled working sets.
///
/// Owns the precompute cache; see the module docs for the enumeration rules.
#[derive(Debug)]
pub struct CandidateIndex {
    cache: PrecomputeCache,
    cache_expiry_ms: i64,
}

impl CandidateIndex {
    /// Creates an index whose cached enumerations expire after `cache_expiry_ms`.
    #[must_use]
    pub fn new(cache_expiry_ms: u64) -> Self {
        Self {
            cache: PrecomputeCache::new(),
            cache_expiry_ms: cache_expiry_ms as i64,
        }
    }

    /// Enumerates all currently visible actionable elements.
    ///
    /// Queries the surface once per category in [`Category::ORDER`], preserving
    /// surface-native document order within each category, filtering through
    /// the visibility predicate, and deduplicating by target id. Visibility is
    /// evaluated against the surface's current state on every call; results
    /// are never reused across surface mutations except through the explicit
    /// precompute cache.
    #[must_use]
    pub fn enumerate(surface: &dyn Surface) -> Vec<ElementSnapshot> {
        let _span = tracing::debug_span!("enumerate_candidates").entered();

        let viewport = surface.viewport();
        let mut seen: HashSet<TargetId> = HashSet::new();
        let mut snapshots = Vec::new();

        for category in Category::ORDER {
            for element in surface.elements(category) {
                if !visibility::is_visible(&element, viewport) {
                    continue;
                }
                if !seen.insert(element.target) {
                    continue;
                }
                snapshots.push(ElementSnapshot {
                    target: element.target,
                    kind: category.kind(),
                    href: element.href,
                    text: element.text.to_lowercase(),
                });
            }
        }

        tracing::debug!(candidate_count = snapshots.len(), "enumeration complete");
        snapshots
    }

    /// Re-enumerates and replaces the cache with the result.
    pub fn refresh_cache(&mut self, surface: &dyn Surface, now_ms: i64) {
        let snapshots = Self::enumerate(surface);
        self.cache.store(snapshots, now_ms);
    }

    /// Builds the labeled working set for a new activation.
    ///
    /// Consumes a fresh cache entry if one exists, otherwise enumerates fresh;
    /// either way the cache is invalidated, so a later activation re-enumerates
    /// unless a precompute lands in between. Labels are assigned in enumeration
    /// order: position `k` gets `labels::label_for_index(k)`.
    #[must_use]
    pub fn build_working_set(&mut self, surface: &dyn Surface, now_ms: i64) -> WorkingSet {
        let snapshots = match self.cache.take_if_fresh(now_ms, self.cache_expiry_ms) {
            Some(cached) => cached,
            None => Self::enumerate(surface),
        };

        snapshots
            .into_iter()
            .enumerate()
            .map(|(id, snapshot)| Candidate {
                id,
                target: snapshot.target,
                kind: snapshot.kind,
                href: snapshot.href,
                label: labels::label_for_index(id),
                text_snapshot: snapshot.text,
            })
            .collect()
    }

    /// Whether a precomputed enumeration is currently stored.
    #[must_use]
    pub fn has_cached_enumeration(&self) -> bool {
        self.cache.is_populated()
    }
}
