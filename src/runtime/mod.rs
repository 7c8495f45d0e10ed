//! Engine-side runtime: command routing, action execution, and scheduling.
//!
//! [`HintRuntime`] is the coordinator that the embedder drives. It owns the
//! engine, the candidate index, and the three boundary seams (the surface,
//! the outbound message sink, and the overlay host), and it wires them
//! together the way one activation cycle flows:
//!
//! ```text
//! InboundCommand ──► activate / precompute
//! key events ──────► engine transition ──► actions ──► dispatch / overlay / slot
//! surface mutation ► debounced precompute slot
//! tick(now) ───────► fire due precompute
//! ```
//!
//! Everything is synchronous and single-threaded; entry points take an
//! explicit `now_ms` (see [`crate::infrastructure::clock`]) so scheduling is
//! deterministic and the embedder's event loop stays in control of time.
//!
//! # Organization
//!
//! - [`messages`]: the serde protocol and delivery seams
//! - [`scheduler`]: the single pending-precompute slot

pub mod messages;
pub mod scheduler;

pub use messages::{InboundCommand, MessageSink, NullSink, OutboundEvent, RecordingSink};
pub use scheduler::PrecomputeSlot;

use crate::dispatch;
use crate::engine::{handle_key_press, handle_key_release, Action, HintEngine, KeyCode, KeyPress};
use crate::index::CandidateIndex;
use crate::overlay::OverlayHost;
use crate::surface::Surface;
use crate::Config;

/// Coordinator owning the engine and its boundary seams.
///
/// Generic over the concrete surface, sink, and overlay host so embedders
/// (and tests) keep typed access to their implementations through the
/// accessor methods.
#[derive(Debug)]
pub struct HintRuntime<S, M, H>
where
    S: Surface,
    M: MessageSink,
    H: OverlayHost,
{
    engine: HintEngine,
    index: CandidateIndex,
    precompute: PrecomputeSlot,
    mutation_debounce_ms: u64,
    surface: S,
    sink: M,
    overlay: H,
}

impl<S, M, H> HintRuntime<S, M, H>
where
    S: Surface,
    M: MessageSink,
    H: OverlayHost,
{
    /// Creates a runtime over the given seams with the given configuration.
    pub fn new(config: &Config, surface: S, sink: M, overlay: H) -> Self {
        Self {
            engine: HintEngine::new(config.settle_delay_ms),
            index: CandidateIndex::new(config.cache_expiry_ms),
            precompute: PrecomputeSlot::new(),
            mutation_debounce_ms: config.mutation_debounce_ms,
            surface,
            sink,
            overlay,
        }
    }

    /// Routes one inbound command from the orchestration layer.
    pub fn handle_command(&mut self, command: &InboundCommand, now_ms: i64) {
        let _span = tracing::debug_span!("handle_command", command = ?command).entered();

        match command {
            InboundCommand::ActivateHints { mode } => {
                if self.engine.is_active() {
                    // Toggle off: no working set is built for a cancel.
                    let (render, actions) = self.engine.cancel();
                    self.finish(render, actions, now_ms);
                } else {
                    let working_set = self.index.build_working_set(&self.surface, now_ms);
                    let (render, actions) = self.engine.activate(working_set, *mode);
                    self.finish(render, actions, now_ms);
                }
            }
            InboundCommand::PrecomputeHints => {
                self.index.refresh_cache(&self.surface, now_ms);
            }
        }
    }

    /// Decodes and routes one inbound JSON payload, tolerating garbage.
    pub fn handle_payload(&mut self, payload: &str, now_ms: i64) {
        if let Some(command) = messages::decode_command(payload) {
            self.handle_command(&command, now_ms);
        }
    }

    /// Feeds one key-down event to the engine.
    pub fn key_pressed(&mut self, press: &KeyPress, now_ms: i64) {
        match handle_key_press(&mut self.engine, press) {
            Ok((render, actions)) => self.finish(render, actions, now_ms),
            Err(e) => tracing::debug!(error = %e, "key press not handled"),
        }
    }

    /// Feeds one key-up event to the engine.
    pub fn key_released(&mut self, key: KeyCode, now_ms: i64) {
        match handle_key_release(&mut self.engine, key) {
            Ok((render, actions)) => self.finish(render, actions, now_ms),
            Err(e) => tracing::debug!(error = %e, "key release not handled"),
        }
    }

    /// Notes a surface mutation burst.
    ///
    /// Arms (or re-arms) the precompute slot with the debounce delay, so a
    /// burst of mutations collapses into one precompute after a quiet period.
    pub fn surface_mutated(&mut self, now_ms: i64) {
        self.precompute.schedule(now_ms, self.mutation_debounce_ms);
    }

    /// Advances scheduled work to `now_ms`.
    ///
    /// Fires the precompute slot if its deadline has passed. Embedders call
    /// this from their event loop; the cadence only affects precompute
    /// latency, never correctness.
    pub fn tick(&mut self, now_ms: i64) {
        if self.precompute.fire_if_due(now_ms) {
            tracing::debug!("pending precompute fired");
            self.index.refresh_cache(&self.surface, now_ms);
        }
    }

    /// Whether an activation session is live.
    ///
    /// While true, the embedder must suppress the surface's default key
    /// handling for keys it forwards here (except modifier chords).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.engine.is_active()
    }

    /// The engine, for state inspection.
    #[must_use]
    pub fn engine(&self) -> &HintEngine {
        &self.engine
    }

    /// Whether a precompute is currently pending in the slot.
    #[must_use]
    pub fn precompute_pending(&self) -> bool {
        self.precompute.is_pending()
    }

    /// The owned surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The owned surface, mutably (for scripting test surfaces).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The owned outbound sink.
    #[must_use]
    pub fn sink(&self) -> &M {
        &self.sink
    }

    /// The owned overlay host.
    #[must_use]
    pub fn overlay(&self) -> &H {
        &self.overlay
    }

    fn finish(&mut self, render: bool, actions: Vec<Action>, now_ms: i64) {
        for action in actions {
            match action {
                Action::Dispatch { candidate, mode } => {
                    dispatch::dispatch(&mut self.surface, &mut self.sink, &candidate, mode);
                }
                Action::ClearOverlay => self.overlay.clear(),
                Action::SchedulePrecompute { delay_ms } => {
                    self.precompute.schedule(now_ms, delay_ms);
                }
            }
        }

        if render {
            if let Some(model) = self.engine.overlay_model() {
                self.overlay.render(&model);
            }
        }
    }
}
