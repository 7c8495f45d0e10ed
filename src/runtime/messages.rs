//! Boundary protocol with the external orchestration layer.
//!
//! This module defines the request/response protocol between the engine side
//! and whatever orchestration layer hosts it (shortcut registration, idle
//! detection, privileged tab creation). Both directions are fire-and-forget
//! JSON payloads: commands arrive, events leave, and neither side assumes the
//! other exists.
//!
//! Delivery tolerance is the rule at this boundary: malformed inbound payloads
//! are logged at debug level and dropped, and a [`MessageSink`] whose receiver
//! is gone reports an error that callers log and swallow. Nothing here ever
//! propagates a failure into session handling.

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::engine::ActivationMode;

/// Reference idle threshold for orchestration layers, in seconds.
///
/// The orchestrator, not this crate, watches for user inactivity; after this
/// long idle it is expected to send [`InboundCommand::PrecomputeHints`] so the
/// next activation finds a warm cache.
pub const IDLE_DETECTION_THRESHOLD_SECS: u64 = 15;

/// Commands sent from the orchestration layer to the engine side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboundCommand {
    /// Start an activation cycle (or toggle a live one off).
    ///
    /// The orchestrator maps its three shortcut bindings onto the three
    /// activation modes; the mode is recorded on the session it starts.
    ActivateHints {
        /// Default-action variant for the session.
        mode: ActivationMode,
    },

    /// Refresh the precompute cache ahead of the next activation.
    ///
    /// Sent on idle detection and any other moment the orchestrator considers
    /// cheap.
    PrecomputeHints,
}

/// Events sent from the engine side to the orchestration layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutboundEvent {
    /// Ask the orchestrator to open a URL in a new execution context.
    ///
    /// Emitted by dispatch for navigable link targets under an open-in-tab
    /// activation mode. The tab creation itself is a privileged operation the
    /// engine side has no authority to perform.
    RequestOpenTab {
        /// Destination to open.
        url: String,
        /// Whether the new context should be switched to immediately.
        switch_to_it: bool,
    },
}

/// Decodes an inbound JSON payload, tolerating garbage.
///
/// Returns `None` (after a debug log) for payloads that do not parse; the
/// boundary never errors on bad input.
#[must_use]
pub fn decode_command(payload: &str) -> Option<InboundCommand> {
    match serde_json::from_str(payload) {
        Ok(command) => Some(command),
        Err(e) => {
            tracing::debug!(error = %e, "failed to deserialize inbound command");
            None
        }
    }
}

/// Encodes an outbound event as a JSON payload.
///
/// Returns `None` (after a debug log) if serialization fails.
#[must_use]
pub fn encode_event(event: &OutboundEvent) -> Option<String> {
    match serde_json::to_string(event) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::debug!(error = %e, "failed to serialize outbound event");
            None
        }
    }
}

/// Outbound delivery seam.
///
/// Implementations forward events to the orchestration layer however the host
/// communicates (extension messaging, IPC, a channel). Senders treat every
/// error as transient: logged and dropped, because the receiving side is
/// allowed to be absent.
pub trait MessageSink {
    /// Delivers one event.
    ///
    /// # Errors
    ///
    /// Returns an error when the receiving side is unreachable. Callers log
    /// and swallow it.
    fn send(&mut self, event: &OutboundEvent) -> Result<()>;
}

/// A sink with no receiver.
///
/// Logs each event at debug level and reports success, modeling the
/// fire-and-forget boundary when no orchestration layer is attached.
#[derive(Debug, Default)]
pub struct NullSink;

impl MessageSink for NullSink {
    fn send(&mut self, event: &OutboundEvent) -> Result<()> {
        tracing::debug!(event = ?event, "no receiver attached, dropping outbound event");
        Ok(())
    }
}

/// A sink that records every event it is handed.
///
/// Used by the crate's own tests and useful to embedders for verifying
/// boundary wiring.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<OutboundEvent>,
}

impl RecordingSink {
    /// All events delivered so far, in order.
    #[must_use]
    pub fn events(&self) -> &[OutboundEvent] {
        &self.events
    }
}

impl MessageSink for RecordingSink {
    fn send(&mut self, event: &OutboundEvent) -> Result<()> {
        self.events.push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_round_trip_through_json() {
        let command = InboundCommand::ActivateHints {
            mode: ActivationMode::OpenBackground,
        };
        let payload = serde_json::to_string(&command).unwrap();
        assert_eq!(decode_command(&payload), Some(command));

        let payload = serde_json::to_string(&InboundCommand::PrecomputeHints).unwrap();
        assert_eq!(decode_command(&payload), Some(InboundCommand::PrecomputeHints));
    }

    #[test]
    fn malformed_payloads_are_dropped() {
        assert_eq!(decode_command("not json"), None);
        assert_eq!(decode_command("{\"Unknown\":{}}"), None);
    }

    #[test]
    fn events_encode_with_their_fields() {
        let event = OutboundEvent::RequestOpenTab {
            url: "https://example.com".to_string(),
            switch_to_it: false,
        };
        let payload = encode_event(&event).unwrap();
        let decoded: OutboundEvent = serde_json::from_str(&payload).unwrap();
        assert_eq!(decoded, event);
    }
}
