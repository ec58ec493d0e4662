use std::time::Instant;

use crate::core::Round;

// ---------------------------------------------------------------------------
// Round timer — poll-based, recomputed on every observation
// ---------------------------------------------------------------------------

/// Whole seconds left before `limit_secs` elapses since `started_at`,
/// clamped to `[0, limit_secs]`. Partial seconds are not counted as elapsed.
pub fn remaining_secs(started_at: Instant, limit_secs: u64, now: Instant) -> u64 {
    let elapsed = now.saturating_duration_since(started_at).as_secs();
    limit_secs.saturating_sub(elapsed)
}

pub fn remaining(round: &Round, limit_secs: u64, now: Instant) -> u64 {
    remaining_secs(round.started_at(), limit_secs, now)
}

pub fn is_expired(round: &Round, limit_secs: u64, now: Instant) -> bool {
    remaining(round, limit_secs, now) == 0
}

/// Observes the timer and reports expiry exactly once per round.
///
/// Returns `true` on the first observation at or after the deadline of an
/// unresolved round; every later call for the same round returns `false`.
pub(crate) fn observe_expiry(round: &mut Round, limit_secs: u64, now: Instant) -> bool {
    is_expired(round, limit_secs, now) && round.take_time_up()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
