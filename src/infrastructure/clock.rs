//! Wall-clock source for runtime entry points.
//!
//! Every time-dependent runtime API takes an explicit `now_ms` so scheduling
//! and cache freshness stay deterministic under test. Embedders that just want
//! real time stamp their calls with [`now_ms`].

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_monotone_enough_for_scheduling() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
        // Sanity: later than 2020-01-01 in epoch millis.
        assert!(a > 1_577_836_800_000);
    }
}
