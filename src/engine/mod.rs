//! The hint-matching engine: session lifecycle and keystroke state machine.
//!
//! This module coordinates one activation cycle at a time. [`HintEngine`] owns
//! the optional live [`ActivationSession`]; [`handler`] folds key events into
//! it; [`actions`] describes the side effects transitions produce; [`modes`]
//! holds the mode enums.
//!
//! # Architecture
//!
//! The engine follows a unidirectional flow:
//!
//! ```text
//! Inbound command / key event → transition → state mutation → actions → runtime
//! ```
//!
//! Transitions never perform I/O. Building the working set is the candidate
//! index's job; executing dispatches, clearing overlay markers, and scheduling
//! precomputes is the runtime's. The engine decides, the runtime acts, which
//! keeps every transition independently testable.
//!
//! # Session Lifecycle
//!
//! - `activate` from idle starts a session in label mode with the full set
//!   visible.
//! - `activate` while a session is live is a toggle: the live session is
//!   cancelled and no new one starts.
//! - A session ends by resolution (a keystroke narrowed the set to one),
//!   cancellation (Escape or toggle), each returning the engine to idle.

pub mod actions;
pub mod handler;
pub mod modes;
pub mod session;

pub use actions::Action;
pub use handler::{handle_key_press, handle_key_release, KeyCode, KeyPress};
pub use modes::{ActivationMode, MatchMode};
pub use session::{ActivationSession, FilterOutcome};

use crate::domain::{Candidate, WorkingSet};
use crate::overlay::{MarkerView, OverlayModel};

/// Owner of the at-most-one live activation session.
///
/// The engine is the only holder of session state; everything else observes it
/// through [`session`](Self::session) or the overlay projection.
#[derive(Debug)]
pub struct HintEngine {
    /// The live session, if any. `pub(crate)` so the handler can transition it.
    pub(crate) session: Option<ActivationSession>,

    /// Delay for the post-resolution precompute, from configuration.
    pub(crate) settle_delay_ms: u64,
}

impl HintEngine {
    /// Creates an idle engine.
    ///
    /// `settle_delay_ms` is the fixed delay scheduled after each resolution so
    /// the surface can settle before the next precompute (reference 500 ms).
    #[must_use]
    pub fn new(settle_delay_ms: u64) -> Self {
        Self {
            session: None,
            settle_delay_ms,
        }
    }

    /// Whether a session is currently live.
    ///
    /// While this returns true the embedder must suppress the surface's
    /// default handling for delivered keys (except modifier chords).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The live session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&ActivationSession> {
        self.session.as_ref()
    }

    /// Starts a session over a freshly built working set, or toggles off.
    ///
    /// From idle: records the activation mode, assigns the full set visible,
    /// and returns `(true, [])`, meaning the overlay should be rendered. While a
    /// session is live: cancels it and starts nothing, which makes a repeated
    /// activation shortcut behave as an off switch.
    pub fn activate(&mut self, working_set: WorkingSet, mode: ActivationMode) -> (bool, Vec<Action>) {
        if self.session.is_some() {
            tracing::debug!("activation while live session, toggling off");
            return self.cancel();
        }

        tracing::debug!(candidate_count = working_set.len(), mode = ?mode, "session activated");
        self.session = Some(ActivationSession::new(working_set, mode));
        (true, vec![])
    }

    /// Cancels the live session, if any. Performs no dispatch.
    pub fn cancel(&mut self) -> (bool, Vec<Action>) {
        if self.session.take().is_some() {
            tracing::debug!("session cancelled");
            (false, vec![Action::ClearOverlay])
        } else {
            (false, vec![])
        }
    }

    /// Ends the live session by resolution.
    ///
    /// Emits the dispatch for the resolved candidate with the session's
    /// activation mode, then the teardown and the post-resolution precompute.
    pub(crate) fn resolve(&mut self, candidate: Candidate) -> (bool, Vec<Action>) {
        let Some(session) = self.session.take() else {
            return (false, vec![]);
        };

        let actions = vec![
            Action::Dispatch {
                candidate,
                mode: session.activation_mode(),
            },
            Action::ClearOverlay,
            Action::SchedulePrecompute {
                delay_ms: self.settle_delay_ms,
            },
        ];
        (false, actions)
    }

    /// Computes the overlay projection for the live session.
    ///
    /// Every working-set candidate gets a marker; `visible` reflects the
    /// current filter so narrowed-out markers can be hidden without being
    /// destroyed. Returns `None` when idle.
    #[must_use]
    pub fn overlay_model(&self) -> Option<OverlayModel> {
        let session = self.session.as_ref()?;
        let markers = session
            .working_set()
            .iter()
            .map(|candidate| MarkerView {
                target: candidate.target,
                label: candidate.label.clone(),
                visible: session.visible_indices().contains(&candidate.id),
            })
            .collect();
        Some(OverlayModel {
            markers,
            partial_input: session.partial_input().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TargetId, TargetKind};
    use crate::index::labels::label_for_index;

    fn working_set(n: usize) -> WorkingSet {
        (0..n)
            .map(|id| Candidate {
                id,
                target: TargetId(id as u64 + 1),
                kind: TargetKind::Link,
                href: None,
                label: label_for_index(id),
                text_snapshot: format!("item {id}"),
            })
            .collect()
    }

    #[test]
    fn overlay_model_tracks_the_visible_subset() {
        let mut engine = HintEngine::new(500);
        let _ = engine.activate(working_set(30), ActivationMode::Normal);

        let model = engine.overlay_model().unwrap();
        assert_eq!(model.markers.len(), 30);
        assert!(model.markers.iter().all(|m| m.visible));

        let _ = handle_key_press(&mut engine, &KeyPress::char('A')).unwrap();
        let model = engine.overlay_model().unwrap();
        assert_eq!(model.partial_input, "A");
        let visible: Vec<&str> = model
            .markers
            .iter()
            .filter(|m| m.visible)
            .map(|m| m.label.as_str())
            .collect();
        assert_eq!(visible, vec!["A", "AA", "AB", "AC", "AD"]);
    }

    #[test]
    fn overlay_model_is_absent_while_idle() {
        let engine = HintEngine::new(500);
        assert!(engine.overlay_model().is_none());
    }

    #[test]
    fn cancel_while_idle_is_a_no_op() {
        let mut engine = HintEngine::new(500);
        let (render, actions) = engine.cancel();
        assert!(!render);
        assert!(actions.is_empty());
    }
}
