//! Credit refill policy.
//!
//! The policy is a pure function of ledger state and wall-clock time; it
//! never mutates anything itself. The broker asks for a [`RefillDecision`]
//! and applies it through the ledger repository before checking balance.

use crate::types::Timestamp;

/// Credits granted to every user per refill window.
pub const DAILY_ALLOWANCE: i32 = 30;

/// Hours between credit refills.
pub const REFILL_INTERVAL_HOURS: i64 = 24;

/// Outcome of evaluating the refill policy for one ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefillDecision {
    /// Whether the balance should be reset before checking it.
    pub should_refill: bool,
    /// Balance to set when `should_refill` is true.
    pub new_balance: i32,
    /// Refill timestamp to record when `should_refill` is true.
    pub new_refill_at: Timestamp,
}

/// Decide whether a ledger's balance is due for a reset.
///
/// A refill is due once `now - last_refill_at` reaches
/// [`REFILL_INTERVAL_HOURS`]. Negative elapsed time (clock skew, a
/// `last_refill_at` in the future) is treated as zero elapsed and never
/// triggers a refill.
pub fn evaluate_refill(last_refill_at: Timestamp, now: Timestamp) -> RefillDecision {
    let elapsed_hours = (now - last_refill_at).num_hours().max(0);
    RefillDecision {
        should_refill: elapsed_hours >= REFILL_INTERVAL_HOURS,
        new_balance: DAILY_ALLOWANCE,
        new_refill_at: now,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn refill_not_due_within_window() {
        let now = Utc::now();
        let decision = evaluate_refill(now - Duration::hours(23), now);
        assert!(!decision.should_refill);
    }

    #[test]
    fn refill_due_at_exactly_24_hours() {
        let now = Utc::now();
        let decision = evaluate_refill(now - Duration::hours(24), now);
        assert!(decision.should_refill);
        assert_eq!(decision.new_balance, DAILY_ALLOWANCE);
        assert_eq!(decision.new_refill_at, now);
    }

    #[test]
    fn refill_due_well_past_window() {
        let now = Utc::now();
        let decision = evaluate_refill(now - Duration::days(30), now);
        assert!(decision.should_refill);
    }

    #[test]
    fn clock_skew_never_refills() {
        // last_refill_at in the future must read as zero elapsed, not as a
        // huge negative interval that wraps into "due".
        let now = Utc::now();
        let decision = evaluate_refill(now + Duration::hours(48), now);
        assert!(!decision.should_refill);
    }

    #[test]
    fn just_under_window_does_not_refill() {
        let now = Utc::now();
        let decision = evaluate_refill(now - Duration::hours(24) + Duration::minutes(1), now);
        assert!(!decision.should_refill);
    }
}
