//! Wait-time priority calculation
//!
//! An item's creation timestamp is the "fire time" surrogate; the derived
//! tier drives visual triage on the screens and never gates a transition.

use std::cmp::Ordering;

use shared::kitchen::{DishGroup, PriorityTier};

/// Waiting minutes above this are Critical
pub const CRITICAL_THRESHOLD_MINUTES: i64 = 15;
/// Waiting minutes from this up to the critical threshold are Warning
pub const WARNING_THRESHOLD_MINUTES: i64 = 10;
/// Dishes with a cook estimate above this sort before everything else
pub const LONG_COOK_THRESHOLD_MINUTES: i32 = 15;

/// Whole minutes elapsed since the reference timestamp, floored.
///
/// A reference timestamp in the future (clock skew between writer and
/// reader) clamps to zero rather than going negative.
pub fn waiting_minutes(now_millis: i64, reference_millis: i64) -> i64 {
    (now_millis - reference_millis).max(0) / 60_000
}

/// Map waiting minutes to an urgency tier
pub fn tier_for(waiting_minutes: i64) -> PriorityTier {
    if waiting_minutes > CRITICAL_THRESHOLD_MINUTES {
        PriorityTier::Critical
    } else if waiting_minutes >= WARNING_THRESHOLD_MINUTES {
        PriorityTier::Warning
    } else {
        PriorityTier::Normal
    }
}

/// Composite sort rule for the by-dish view.
///
/// Long-cook dishes (estimate > 15 min) go before all others, among
/// themselves by descending estimate then descending max-observed wait;
/// everything else by descending max-observed wait, tie-broken by
/// case-insensitive dish name.
pub fn compare_dish_groups(a: &DishGroup, b: &DishGroup) -> Ordering {
    let a_long = a.estimated_cook_minutes > LONG_COOK_THRESHOLD_MINUTES;
    let b_long = b.estimated_cook_minutes > LONG_COOK_THRESHOLD_MINUTES;

    match (a_long, b_long) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => b
            .estimated_cook_minutes
            .cmp(&a.estimated_cook_minutes)
            .then(b.max_waiting_minutes.cmp(&a.max_waiting_minutes))
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        (false, false) => b
            .max_waiting_minutes
            .cmp(&a.max_waiting_minutes)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
    }
}
