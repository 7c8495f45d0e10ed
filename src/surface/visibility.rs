//! Visibility predicate for candidate eligibility.
//!
//! An element only counts as an actionable candidate if a user could plausibly
//! see and interact with it right now. The predicate here is a pure function of
//! the element's current layout box and computed style: it must be re-evaluated
//! on every enumeration and never cached across surface mutations.

use kurbo::Rect;

use crate::surface::{ElementStyle, SurfaceElement};

/// Opacity at or below this threshold counts as fully transparent.
const OPACITY_EPSILON: f64 = 1e-6;

/// Decides whether a surface element is visible enough to be a candidate.
///
/// An element is visible iff all of the following hold:
/// - its rendered box has non-zero width and height;
/// - its box is not entirely above or left of the viewport origin, nor entirely
///   below or right of the far viewport edge (partial overlap counts as
///   visible);
/// - its computed style is not `visibility: hidden`, not `display: none`, and
///   not effectively transparent.
///
/// No side effects; pure function of the descriptor and viewport passed in.
#[must_use]
pub fn is_visible(element: &SurfaceElement, viewport: Rect) -> bool {
    has_size(element.bounds) && overlaps_viewport(element.bounds, viewport) && style_shows(&element.style)
}

fn has_size(bounds: Rect) -> bool {
    bounds.width() > 0.0 && bounds.height() > 0.0
}

fn overlaps_viewport(bounds: Rect, viewport: Rect) -> bool {
    // Entirely above/left of the origin, or entirely past the far edge.
    if bounds.y1 < viewport.y0 || bounds.x1 < viewport.x0 {
        return false;
    }
    if bounds.y0 > viewport.y1 || bounds.x0 > viewport.x1 {
        return false;
    }
    true
}

fn style_shows(style: &ElementStyle) -> bool {
    !style.visibility_hidden && !style.display_none && style.opacity > OPACITY_EPSILON
}
