//! Candidate domain model.
//!
//! This module defines the core record types produced by candidate enumeration:
//! an opaque [`TargetId`] handle referencing a surface element, the semantic
//! [`TargetKind`] driving dispatch behavior, and the labeled [`Candidate`] record
//! that the match engine filters against. A [`WorkingSet`] is the full labeled
//! candidate list for one activation.
//!
//! Candidates are snapshots: the label and the lower-cased text content are
//! captured at index time and never re-read from the surface. If the surface
//! mutates during a live session, the working set does not reflect it until the
//! next activation.

use serde::{Deserialize, Serialize};

/// Opaque, stable handle to a surface element.
///
/// The engine never dereferences a `TargetId`; only the `Surface` implementation
/// that produced it can resolve it back to an element. Stability is only required
/// within one activation cycle; a surface is free to reuse ids across reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TargetId(pub u64);

/// Semantic category of an actionable element.
///
/// The kind decides both enumeration order (labels are assigned link-first) and
/// dispatch behavior (text entry is focused, everything else is activated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// Links and link-role elements. May carry a navigable destination.
    Link,

    /// Buttons, button-role elements, and button-typed inputs.
    Button,

    /// Single/multi-line text inputs, search inputs, and free-text editable
    /// regions. Dispatch gives these input focus instead of activating them.
    TextEntry,

    /// Selection controls (dropdowns and list selectors).
    Selection,
}

impl TargetKind {
    /// Whether dispatch should focus this target rather than activate it.
    #[must_use]
    pub fn takes_focus(self) -> bool {
        matches!(self, Self::TextEntry)
    }
}

/// One actionable target eligible for labeling, as captured at index time.
///
/// # Fields
///
/// - `id`: position in enumeration order, stable for the life of one activation
/// - `target`: opaque reference to the surface element
/// - `kind`: semantic category driving dispatch
/// - `href`: navigable destination, present only for some links
/// - `label`: assigned hint label (A–Z, one or more chars), unique per working set
/// - `text_snapshot`: lower-cased text content captured at index time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: usize,
    pub target: TargetId,
    pub kind: TargetKind,
    pub href: Option<String>,
    pub label: String,
    pub text_snapshot: String,
}

impl Candidate {
    /// Whether the candidate's label starts with the given (already upper-cased)
    /// partial input.
    #[must_use]
    pub fn label_matches(&self, partial: &str) -> bool {
        self.label.starts_with(partial)
    }

    /// Whether the candidate's text snapshot contains the given (already
    /// lower-cased) query as a substring.
    #[must_use]
    pub fn text_matches(&self, query: &str) -> bool {
        self.text_snapshot.contains(query)
    }
}

/// The full labeled candidate list for one activation.
///
/// Order is the enumeration order from the candidate index and determines label
/// assignment: the candidate at position `k` always carries the label for index
/// `k`. The set is immutable once created for an activation and is never
/// re-ordered during filtering; filtering is an index projection over it.
pub type WorkingSet = Vec<Candidate>;
