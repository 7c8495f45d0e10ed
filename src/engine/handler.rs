//! Keystroke handling and state transition logic.
//!
//! This module implements the transition function of the hint-matching state
//! machine. Key events arrive from the embedder, [`handle_key_press`] folds
//! them into the live session (if any), and the caller receives a render flag
//! plus the actions to execute. Decision logic lives here; side effects
//! (dispatch, marker teardown, precompute scheduling) are described by
//! [`Action`](crate::engine::Action) values and executed by the runtime.
//!
//! # Keystroke Policy
//!
//! - `Escape` cancels the session from any active state.
//! - `Shift` down/up sets/clears the latch and changes nothing else.
//! - A character while the latch is held (or once the session is already in
//!   text mode) is free-text input: lower-cased, appended, substring-matched.
//! - A letter in label mode is upper-cased, appended, and prefix-matched
//!   against labels; non-letters are ignored.
//! - Any chord carrying control/alt/meta is ignored outright.
//! - Everything else is consumed without a transition. While a session is
//!   active the embedder must suppress the surface's default handling for
//!   consumed keys (see [`HintEngine::is_active`]).

use crate::domain::error::Result;
use crate::engine::session::FilterOutcome;
use crate::engine::{Action, HintEngine};

/// A key-down event as delivered by the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key itself.
    pub key: KeyCode,
    /// Control modifier held.
    pub ctrl: bool,
    /// Alt modifier held.
    pub alt: bool,
    /// Meta/command modifier held.
    pub meta: bool,
}

impl KeyPress {
    /// A bare character key with no modifiers.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self {
            key: KeyCode::Char(c),
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    /// A bare non-character key with no modifiers.
    #[must_use]
    pub fn bare(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    fn has_chord_modifier(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Key identity, reduced to what the state machine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    /// A printable character key.
    Char(char),
    /// The Escape key.
    Escape,
    /// Either shift key.
    Shift,
    /// Any other key (arrows, function keys, …).
    Other,
}

/// Processes one key-down event against the engine.
///
/// Returns `(render, actions)`: `render` is true when the overlay projection
/// changed and markers should be re-rendered; `actions` are the side effects
/// to execute in order. With no live session every key is a no-op.
#[allow(clippy::unnecessary_wraps)]
pub fn handle_key_press(engine: &mut HintEngine, press: &KeyPress) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_key_press", key = ?press.key).entered();

    if engine.session.is_none() {
        return Ok((false, vec![]));
    }

    match press.key {
        KeyCode::Escape => {
            tracing::debug!("escape pressed, cancelling session");
            Ok(engine.cancel())
        }
        KeyCode::Shift => {
            if let Some(session) = engine.session.as_mut() {
                session.set_shift_held(true);
            }
            Ok((false, vec![]))
        }
        _ if press.has_chord_modifier() => {
            tracing::debug!("modifier chord ignored");
            Ok((false, vec![]))
        }
        KeyCode::Char(c) => Ok(handle_character(engine, c)),
        KeyCode::Other => Ok((false, vec![])),
    }
}

/// Processes one key-up event against the engine.
///
/// Only the shift release matters: it clears the latch so later characters go
/// back to being interpreted by the current mode's rules.
#[allow(clippy::unnecessary_wraps)]
pub fn handle_key_release(engine: &mut HintEngine, key: KeyCode) -> Result<(bool, Vec<Action>)> {
    if key == KeyCode::Shift {
        if let Some(session) = engine.session.as_mut() {
            session.set_shift_held(false);
        }
    }
    Ok((false, vec![]))
}

fn handle_character(engine: &mut HintEngine, c: char) -> (bool, Vec<Action>) {
    use crate::engine::modes::MatchMode;

    let Some(session) = engine.session.as_mut() else {
        return (false, vec![]);
    };

    let text_input = session.shift_held() || session.mode() == MatchMode::Text;
    let outcome = if text_input {
        session.push_text_key(c)
    } else {
        if !c.is_ascii_alphabetic() {
            return (false, vec![]);
        }
        session.push_label_key(c.to_ascii_uppercase())
    };

    match outcome {
        FilterOutcome::Resolved(candidate) => {
            tracing::debug!(label = %candidate.label, "session resolved");
            engine.resolve(candidate)
        }
        FilterOutcome::Narrowed | FilterOutcome::Reset => (true, vec![]),
    }
}
