//! Actions representing side effects to be executed by the runtime.
//!
//! This module defines the [`Action`] type, the imperative commands produced by
//! the engine's transition logic. Actions bridge the pure state machine and the
//! effectful world: dispatching the resolved target, tearing down overlay
//! markers, and scheduling precompute work. The runtime executes them in the
//! order returned.

use crate::domain::Candidate;
use crate::engine::modes::ActivationMode;

/// Commands emitted by engine transitions for the runtime to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Perform the resolved candidate's default action.
    ///
    /// Emitted exactly once per resolved session, before teardown actions.
    /// The activation mode is the one recorded at session start.
    Dispatch {
        /// The single candidate the session narrowed down to.
        candidate: Candidate,
        /// The session's activation mode.
        mode: ActivationMode,
    },

    /// Tear down all overlay markers for the ended session.
    ///
    /// Emitted on both resolution and cancellation; the user always gets back
    /// a clean, de-labeled surface.
    ClearOverlay,

    /// Schedule a precompute after a fixed delay.
    ///
    /// Emitted after resolution so the next activation finds a warm cache once
    /// the surface has settled from the triggered action.
    SchedulePrecompute {
        /// Delay before the precompute runs, in milliseconds.
        delay_ms: u64,
    },
}
