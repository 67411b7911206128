//! Initial percentages for a freshly opened session.
//!
//! If any of the session's causes has a saved percentage, the saved split is
//! used: each cause takes its saved value, or 0 when it has none, clamped into
//! `[floor, 100]`. Otherwise every cause gets an equal share raised to the
//! floor. Either way the result is normalized.

use crwd_calculator::{MinimumFloor, equal_split, normalize_in_place};
use crwd_types::{BoxCause, Cause, CauseId, CollectiveId, PercentageMap};
use std::collections::BTreeMap;
use tracing::debug;

pub fn seed_percentages(causes: &[Cause], saved: &[BoxCause], floor: MinimumFloor) -> PercentageMap {
    let saved_values: BTreeMap<CauseId, f64> = saved
        .iter()
        .filter_map(|entry| entry.percentage.map(|percentage| (entry.cause_id(), percentage)))
        .collect();

    let uses_saved = causes.iter().any(|cause| saved_values.contains_key(&cause.id));
    if !uses_saved {
        debug!(cause_count = causes.len(), "Seeding with an equal split");
        return equal_split(causes.iter().map(|cause| cause.id), floor);
    }

    debug!(
        cause_count = causes.len(),
        saved_count = saved_values.len(),
        "Seeding from saved percentages"
    );
    let mut seeded: PercentageMap = causes
        .iter()
        .map(|cause| {
            let saved = saved_values.get(&cause.id).copied().unwrap_or(0.0);
            (cause.id, floor.clamp(saved))
        })
        .collect();
    normalize_in_place(&mut seeded);
    seeded
}

/// Referral attributions carried from saved entries into the save payload.
/// Entries for causes outside `causes` are dropped.
pub fn attributions(causes: &[Cause], saved: &[BoxCause]) -> BTreeMap<CauseId, CollectiveId> {
    saved
        .iter()
        .filter(|entry| causes.iter().any(|cause| cause.id == entry.cause_id()))
        .filter_map(|entry| entry.attributed_collective.map(|collective| (entry.cause_id(), collective)))
        .collect()
}
