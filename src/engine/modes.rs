//! Mode state types for the hint-matching engine.
//!
//! This module defines the small enums that control keystroke interpretation
//! and resolution behavior. [`MatchMode`] decides how a keystroke narrows the
//! candidate set; [`ActivationMode`] is chosen at the moment of activation and
//! decides what the default action does once a candidate resolves.
//!
//! # State Machine
//!
//! A session always starts in label mode. It switches to text mode when a
//! character key arrives while the shift latch is held, and never switches
//! back within the same session. At most one mode is active at any instant.

use serde::{Deserialize, Serialize};

/// Keystroke interpretation mode within an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Keystrokes are hint-label prefix input.
    ///
    /// Input is upper-cased and matched against label prefixes. A dead-end
    /// keystroke (zero matches) is forgiven: the buffer clears and the full
    /// working set comes back.
    Label,

    /// Keystrokes are free-text content input.
    ///
    /// Input is lower-cased and matched as a substring of candidate text
    /// snapshots. A dead end narrows to the empty set and stays there; the
    /// buffer keeps growing since there is no backspace support.
    Text,
}

/// The default-action variant chosen at session start.
///
/// Carried on the session from activation to resolution; the two open-in-tab
/// variants only change behavior for navigable link targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationMode {
    /// Activate the target in place (plain default action).
    Normal,

    /// Open navigable links in a new background execution context.
    OpenBackground,

    /// Open navigable links in a new execution context and switch to it.
    OpenForeground,
}

impl ActivationMode {
    /// Whether this mode requests a new execution context for link targets.
    #[must_use]
    pub fn opens_new_context(self) -> bool {
        matches!(self, Self::OpenBackground | Self::OpenForeground)
    }
}
