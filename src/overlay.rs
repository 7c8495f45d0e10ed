//! Overlay view-model projection and the rendering boundary.
//!
//! Marker rendering is out of scope for this crate; what the engine computes
//! is the projection a renderer needs: one marker per working-set candidate,
//! with the label text and a visibility flag tracking the current filter.
//! Narrowed-out markers are hidden rather than destroyed, so a label-mode
//! reset brings them all back without rebuilding anything.
//!
//! The [`OverlayHost`] trait is the outbound seam: the runtime pushes a fresh
//! model whenever the projection changes and calls `clear` on session end.

use crate::domain::TargetId;

/// One hint marker as the renderer should show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerView {
    /// The candidate element this marker is anchored to.
    pub target: TargetId,
    /// Label text to draw.
    pub label: String,
    /// Whether the marker passes the current filter.
    pub visible: bool,
}

/// The full overlay projection for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayModel {
    /// Markers for every working-set candidate, in enumeration order.
    pub markers: Vec<MarkerView>,
    /// The current input buffer, for renderers that echo it.
    pub partial_input: String,
}

/// Rendering boundary for overlay markers.
///
/// Implementations draw and remove markers however the host surface renders
/// things; the engine only guarantees it will `clear` before the session ends
/// and after every resolution.
pub trait OverlayHost {
    /// Renders (or re-renders) the overlay to match the model.
    fn render(&mut self, model: &OverlayModel);

    /// Removes all markers.
    fn clear(&mut self);
}

/// An overlay host that drops every model on the floor.
///
/// For embedders that drive the engine headless (tests, precompute-only
/// setups) and for the same reason the message sink has a null variant: the
/// renderer is allowed to be absent.
#[derive(Debug, Default)]
pub struct NullOverlayHost;

impl OverlayHost for NullOverlayHost {
    fn render(&mut self, _model: &OverlayModel) {}

    fn clear(&mut self) {}
}
