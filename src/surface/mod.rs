//! Surface abstraction: the seam between the engine and the host's element tree.
//!
//! This module defines the [`Surface`] trait that abstracts over whatever visual
//! surface hosts the actionable elements: a browser document, a canvas scene
//! graph, or the [`scripted::ScriptedSurface`] used in tests and demos. The
//! engine only ever sees [`SurfaceElement`] descriptors and opaque
//! [`TargetId`](crate::domain::TargetId) handles; resolving a handle back to a
//! live element is the implementation's business.
//!
//! # Design Philosophy
//!
//! The trait is minimal and use-case driven, not a generic DOM: one query per
//! enumeration category, plus the two effects dispatch needs (click and focus).
//! Queries return current layout and style state on every call; visibility is
//! decided by the engine per enumeration and never cached across mutations.
//!
//! # Organization
//!
//! - [`visibility`]: the pure visibility predicate over element descriptors
//! - [`scripted`]: in-memory implementation with recorded effects

pub mod scripted;
pub mod visibility;

use kurbo::Rect;

use crate::domain::error::Result;
use crate::domain::{TargetId, TargetKind};

/// Enumeration category, in label-assignment order.
///
/// Candidate enumeration queries the surface once per category, in the order
/// listed here. The order is load-bearing: it decides which elements get the
/// shortest labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Links and link-role elements.
    Links,
    /// Buttons, button-role elements, and button-typed inputs.
    Buttons,
    /// Text-entry fields and free-text editable regions.
    TextEntry,
    /// Selection controls.
    Selection,
}

impl Category {
    /// All categories in enumeration (and therefore label-assignment) order.
    pub const ORDER: [Self; 4] = [Self::Links, Self::Buttons, Self::TextEntry, Self::Selection];

    /// The target kind produced by elements found under this category.
    #[must_use]
    pub fn kind(self) -> TargetKind {
        match self {
            Self::Links => TargetKind::Link,
            Self::Buttons => TargetKind::Button,
            Self::TextEntry => TargetKind::TextEntry,
            Self::Selection => TargetKind::Selection,
        }
    }
}

/// Computed style facts the visibility predicate needs.
///
/// These mirror what a layout engine reports for an element at query time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementStyle {
    /// Computed `visibility: hidden`.
    pub visibility_hidden: bool,
    /// Computed `display: none`.
    pub display_none: bool,
    /// Computed opacity in `0.0..=1.0`.
    pub opacity: f64,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            visibility_hidden: false,
            display_none: false,
            opacity: 1.0,
        }
    }
}

/// One element as reported by a surface query.
///
/// Geometry is in viewport coordinates: the viewport origin is `(0, 0)` and
/// `bounds` may extend past any edge for partially or fully off-screen elements.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceElement {
    /// Opaque handle the surface can resolve back to the live element.
    pub target: TargetId,
    /// Semantic kind, matching the category it was queried under.
    pub kind: TargetKind,
    /// Raw text content. The index lower-cases it when snapshotting.
    pub text: String,
    /// Navigable destination, for link targets that have one.
    pub href: Option<String>,
    /// Rendered box in viewport coordinates.
    pub bounds: Rect,
    /// Computed style facts.
    pub style: ElementStyle,
}

/// Abstraction over the visual surface hosting actionable elements.
///
/// Implementations must report current layout/style state on every query; the
/// engine re-evaluates visibility per enumeration. Effects (`click`, `focus`)
/// may fail if the target has detached since enumeration; dispatch catches
/// and logs those failures rather than propagating them.
pub trait Surface {
    /// Current viewport rectangle, origin at `(0, 0)`.
    fn viewport(&self) -> Rect;

    /// All elements matching one semantic category, in surface-native document
    /// order. Visibility filtering is the caller's job.
    fn elements(&self, category: Category) -> Vec<SurfaceElement>;

    /// Performs the element's plain default activation (primary click).
    ///
    /// # Errors
    ///
    /// Returns an error if the target no longer resolves to a live element.
    fn click(&mut self, target: TargetId) -> Result<()>;

    /// Gives the element input focus.
    ///
    /// # Errors
    ///
    /// Returns an error if the target no longer resolves to a live element.
    fn focus(&mut self, target: TargetId) -> Result<()>;
}
