//! Activation session state and filter recomputation.
//!
//! This module defines [`ActivationSession`], the state container for one
//! activation cycle: the immutable labeled working set, the match-mode state
//! machine, the accumulated partial input, and the visible-subset projection.
//! It is the single source of truth between activation and
//! resolution/cancellation.
//!
//! # State Components
//!
//! - **Working set**: full labeled candidate list, fixed at activation time
//! - **Match mode**: label-prefix vs. free-text interpretation of keystrokes
//! - **Partial input**: the accumulated keystroke buffer for the current run
//! - **Visible subset**: indices into the working set, recomputed per keystroke
//! - **Shift latch**: whether shift is currently held (gates text-mode entry)
//!
//! The visible subset is a projection, never a copy: filtering narrows a list
//! of indices while the working set itself stays untouched and unordered
//! exactly as enumerated. Surface mutations during a live session are not
//! reflected until the next activation.

use crate::domain::{Candidate, WorkingSet};
use crate::engine::modes::{ActivationMode, MatchMode};

/// Result of folding one keystroke into the session's filter state.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// Exactly one candidate remains; the session should resolve with it.
    Resolved(Candidate),

    /// More than one candidate remains (or, in text mode, possibly none);
    /// the session stays active with a narrowed visible subset.
    Narrowed,

    /// Label-mode dead end: the keystroke matched nothing, the buffer was
    /// cleared and the full working set restored.
    Reset,
}

/// State for one activation cycle.
///
/// Created on activation start, mutated on every accepted keystroke, destroyed
/// on resolution, explicit cancellation, or re-activation toggle. Exactly one
/// session is live at a time; the engine enforces that.
#[derive(Debug, Clone)]
pub struct ActivationSession {
    /// Labeled candidates in enumeration order. Immutable for the session.
    working_set: WorkingSet,

    /// Default-action variant recorded at activation time.
    activation_mode: ActivationMode,

    /// Current keystroke interpretation mode.
    mode: MatchMode,

    /// Accumulated input buffer. Grows monotonically within a mode run; label
    /// mode may clear it on a dead end. Carried across the label→text switch.
    partial_input: String,

    /// Indices into `working_set` passing the current filter.
    visible: Vec<usize>,

    /// Whether shift is held right now. Set/cleared by key events; gates the
    /// switch into text mode.
    shift_held: bool,
}

impl ActivationSession {
    /// Creates a session over a freshly built working set.
    ///
    /// Starts in label mode with an empty buffer, the full set visible, and
    /// the shift latch clear.
    #[must_use]
    pub fn new(working_set: WorkingSet, activation_mode: ActivationMode) -> Self {
        let visible = (0..working_set.len()).collect();
        Self {
            working_set,
            activation_mode,
            mode: MatchMode::Label,
            partial_input: String::new(),
            visible,
            shift_held: false,
        }
    }

    /// The session's activation mode.
    #[must_use]
    pub fn activation_mode(&self) -> ActivationMode {
        self.activation_mode
    }

    /// Current match mode.
    #[must_use]
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Current accumulated input buffer.
    #[must_use]
    pub fn partial_input(&self) -> &str {
        &self.partial_input
    }

    /// Whether the shift latch is currently set.
    #[must_use]
    pub fn shift_held(&self) -> bool {
        self.shift_held
    }

    /// Sets or clears the shift latch. Does not change mode by itself.
    pub fn set_shift_held(&mut self, held: bool) {
        self.shift_held = held;
    }

    /// The full labeled working set, in enumeration order.
    #[must_use]
    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    /// Indices of the candidates passing the current filter.
    #[must_use]
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// The candidates passing the current filter, in enumeration order.
    pub fn visible_candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.visible.iter().map(|&i| &self.working_set[i])
    }

    /// Folds a label-mode keystroke into the filter state.
    ///
    /// The caller has already upper-cased the key and checked it is A–Z.
    /// Appends it to the buffer and recomputes the visible subset as the
    /// candidates whose label starts with the buffer. Zero matches is a
    /// forgiven dead end: the buffer clears and the full set comes back.
    pub fn push_label_key(&mut self, key: char) -> FilterOutcome {
        self.partial_input.push(key);

        let matches: Vec<usize> = self
            .working_set
            .iter()
            .enumerate()
            .filter(|(_, c)| c.label_matches(&self.partial_input))
            .map(|(i, _)| i)
            .collect();

        tracing::debug!(
            partial = %self.partial_input,
            match_count = matches.len(),
            "label filter applied"
        );

        match matches.len() {
            1 => {
                let candidate = self.working_set[matches[0]].clone();
                self.visible = matches;
                FilterOutcome::Resolved(candidate)
            }
            0 => {
                self.partial_input.clear();
                self.visible = (0..self.working_set.len()).collect();
                FilterOutcome::Reset
            }
            _ => {
                self.visible = matches;
                FilterOutcome::Narrowed
            }
        }
    }

    /// Folds a text-mode keystroke into the filter state, switching to text
    /// mode if the session was still in label mode.
    ///
    /// Appends the lower-cased key and recomputes the visible subset as the
    /// candidates whose text snapshot contains the buffer as a substring.
    /// Comparison lower-cases the whole buffer so input carried over from
    /// label mode still matches case-insensitively. Zero matches is a dead
    /// end the session stays in: the buffer keeps growing and the subset
    /// stays empty.
    pub fn push_text_key(&mut self, key: char) -> FilterOutcome {
        self.mode = MatchMode::Text;
        self.partial_input.extend(key.to_lowercase());

        let query = self.partial_input.to_lowercase();
        let matches: Vec<usize> = self
            .working_set
            .iter()
            .enumerate()
            .filter(|(_, c)| c.text_matches(&query))
            .map(|(i, _)| i)
            .collect();

        tracing::debug!(
            query = %query,
            match_count = matches.len(),
            "text filter applied"
        );

        if matches.len() == 1 {
            let candidate = self.working_set[matches[0]].clone();
            self.visible = matches;
            FilterOutcome::Resolved(candidate)
        } else {
            self.visible = matches;
            FilterOutcome::Narrowed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Candidate, TargetId, TargetKind};
    use crate::index::labels::label_for_index;

    fn candidate(id: usize, kind: TargetKind, text: &str) -> Candidate {
        Candidate {
            id,
            target: TargetId(id as u64 + 1),
            kind,
            href: None,
            label: label_for_index(id),
            text_snapshot: text.to_lowercase(),
        }
    }

    fn three_candidates() -> WorkingSet {
        vec![
            candidate(0, TargetKind::Link, "Home"),
            candidate(1, TargetKind::Link, "Docs"),
            candidate(2, TargetKind::Button, "Submit"),
        ]
    }

    #[test]
    fn starts_with_full_set_visible_in_label_mode() {
        let session = ActivationSession::new(three_candidates(), ActivationMode::Normal);
        assert_eq!(session.mode(), MatchMode::Label);
        assert_eq!(session.partial_input(), "");
        assert_eq!(session.visible_indices(), &[0, 1, 2]);
    }

    #[test]
    fn unique_label_prefix_resolves() {
        let mut session = ActivationSession::new(three_candidates(), ActivationMode::Normal);
        let outcome = session.push_label_key('B');
        match outcome {
            FilterOutcome::Resolved(c) => assert_eq!(c.text_snapshot, "docs"),
            other => panic!("expected resolution, got {other:?}"),
        }
    }

    fn thirty_candidates() -> WorkingSet {
        // Labels A..Z then AA..AD, so "A" narrows without resolving.
        let mut working_set = three_candidates();
        for id in 3..30 {
            working_set.push(candidate(id, TargetKind::Link, &format!("link {id}")));
        }
        working_set
    }

    #[test]
    fn ambiguous_label_prefix_narrows() {
        let mut session = ActivationSession::new(thirty_candidates(), ActivationMode::Normal);
        assert_eq!(session.push_label_key('A'), FilterOutcome::Narrowed);
        // "A" keeps A itself plus AA..AD.
        assert_eq!(session.visible_indices(), &[0, 26, 27, 28, 29]);
        assert_eq!(session.partial_input(), "A");
    }

    #[test]
    fn label_dead_end_resets_to_full_set() {
        let mut session = ActivationSession::new(thirty_candidates(), ActivationMode::Normal);
        assert_eq!(session.push_label_key('A'), FilterOutcome::Narrowed);
        // No label starts with "AZ", so the keystroke is forgiven.
        assert_eq!(session.push_label_key('Z'), FilterOutcome::Reset);
        assert_eq!(session.partial_input(), "");
        assert_eq!(session.visible_indices().len(), 30);
    }

    #[test]
    fn text_keystroke_switches_mode_and_filters_substrings() {
        let mut session = ActivationSession::new(three_candidates(), ActivationMode::Normal);
        let outcome = session.push_text_key('O');
        assert_eq!(session.mode(), MatchMode::Text);
        assert_eq!(session.partial_input(), "o");
        // "o" appears in "home" and "docs".
        assert_eq!(outcome, FilterOutcome::Narrowed);
        assert_eq!(session.visible_indices(), &[0, 1]);
    }

    #[test]
    fn text_dead_end_keeps_buffer_and_empty_subset() {
        let mut session = ActivationSession::new(three_candidates(), ActivationMode::Normal);
        assert_eq!(session.push_text_key('z'), FilterOutcome::Narrowed);
        assert!(session.visible_indices().is_empty());
        assert_eq!(session.push_text_key('q'), FilterOutcome::Narrowed);
        assert_eq!(session.partial_input(), "zq");
        assert!(session.visible_indices().is_empty());
    }

    #[test]
    fn carried_over_label_input_is_compared_lower_cased() {
        let mut session = ActivationSession::new(thirty_candidates(), ActivationMode::Normal);
        assert_eq!(session.push_label_key('A'), FilterOutcome::Narrowed);

        // The buffer survives the label→text switch; the stored "A" is
        // lower-cased for the substring comparison, so the query is "ao".
        let _ = session.push_text_key('o');
        assert_eq!(session.partial_input(), "Ao");
        assert_eq!(session.mode(), MatchMode::Text);
        assert!(session.visible_indices().is_empty());
    }
}
