//! The single pending-precompute slot.
//!
//! All precompute triggers funnel into one cancellable scheduled task: the
//! debounced surface-mutation path reschedules it on every burst, and the
//! post-resolution path arms it with a short settle delay. Keying everything
//! by one slot means "does a newer event supersede this one" is the whole
//! cancellation model; there are no timer handles to leak.
//!
//! The slot is deadline-based and polled: callers pass `now_ms` explicitly,
//! which keeps scheduling deterministic under test and leaves the actual
//! timer source to the embedder's event loop.

/// One cancellable scheduled precompute.
#[derive(Debug, Default)]
pub struct PrecomputeSlot {
    deadline_ms: Option<i64>,
}

impl PrecomputeSlot {
    /// Creates an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the slot to fire `delay_ms` from `now_ms`.
    ///
    /// Any pending deadline is replaced, which is what collapses a mutation
    /// burst into a single precompute after the quiet period.
    pub fn schedule(&mut self, now_ms: i64, delay_ms: u64) {
        let deadline = now_ms + delay_ms as i64;
        if let Some(previous) = self.deadline_ms.replace(deadline) {
            tracing::debug!(previous_deadline_ms = previous, deadline_ms = deadline, "pending precompute rescheduled");
        } else {
            tracing::debug!(deadline_ms = deadline, "precompute scheduled");
        }
    }

    /// Disarms the slot.
    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    /// Whether a precompute is currently pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// The pending deadline, if any.
    #[must_use]
    pub fn deadline_ms(&self) -> Option<i64> {
        self.deadline_ms
    }

    /// Fires the slot if its deadline has passed.
    ///
    /// Returns true exactly once per armed deadline; the slot disarms on fire.
    pub fn fire_if_due(&mut self, now_ms: i64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
