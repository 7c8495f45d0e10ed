//! Default-action dispatch for resolved candidates.
//!
//! Once a session narrows to a single candidate, this module performs the
//! appropriate default action: text-entry targets get input focus, navigable
//! links under an open-in-tab activation mode become outbound
//! `RequestOpenTab` events for the orchestration layer, and everything else
//! gets a plain primary-click activation on the surface.
//!
//! Dispatch is fire-and-forget from the session's point of view: any failure
//! (most likely a target detached between labeling and resolution) is caught
//! and logged here, never propagated, so session teardown always completes
//! and the user gets back a clean surface.

use crate::domain::Candidate;
use crate::engine::ActivationMode;
use crate::runtime::messages::{MessageSink, OutboundEvent};
use crate::surface::Surface;

/// Performs the resolved candidate's default action.
///
/// # Behavior
///
/// - Text-entry targets are focused; the activation mode is irrelevant for
///   them.
/// - Link targets with a navigable destination, under `OpenBackground` or
///   `OpenForeground`, emit one `RequestOpenTab` event through the sink (the
///   privileged tab creation happens across the boundary) and touch nothing
///   in the current context. A link without a destination falls back to a
///   plain activation.
/// - Everything else gets the element's plain default activation.
///
/// Errors from the surface or the sink are logged at debug level and
/// swallowed.
pub fn dispatch(
    surface: &mut dyn Surface,
    sink: &mut dyn MessageSink,
    candidate: &Candidate,
    mode: ActivationMode,
) {
    let _span = tracing::debug_span!(
        "dispatch",
        label = %candidate.label,
        kind = ?candidate.kind,
        mode = ?mode
    )
    .entered();

    if candidate.kind.takes_focus() {
        if let Err(e) = surface.focus(candidate.target) {
            tracing::debug!(error = %e, "focus failed");
        }
        return;
    }

    if mode.opens_new_context() {
        if let Some(url) = candidate.href.as_deref() {
            let event = OutboundEvent::RequestOpenTab {
                url: url.to_string(),
                switch_to_it: mode == ActivationMode::OpenForeground,
            };
            if let Err(e) = sink.send(&event) {
                tracing::debug!(error = %e, "open-tab request not delivered");
            }
            return;
        }
        tracing::debug!("no navigable destination, falling back to plain activation");
    }

    if let Err(e) = surface.click(candidate.target) {
        tracing::debug!(error = %e, "activation failed");
    }
}
