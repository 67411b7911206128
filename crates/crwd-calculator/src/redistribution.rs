//! Redistribution Engine
//!
//! Applies an edit to one cause and rescales every other cause so the map
//! still sums to 100:
//!
//! value = min(clamp(requested, floor, 100), 100 - others * floor)
//! remaining = 100 - value
//! other = max(floor, other * remaining / Σ others)
//!
//! When the other causes hold (almost) nothing, `remaining` is split equally
//! between them instead. The result always goes through the sum normalizer.

use crate::TOTAL_PERCENTAGE;
use crate::floor::MinimumFloor;
use crate::normalizer::normalize_in_place;
use crwd_types::{CauseId, PercentageMap};

/// At or below this, the other causes are treated as holding nothing.
pub const DEGENERATE_TOTAL: f64 = 0.01;

/// Sets `changed` to `requested` and rescales the others around it.
///
/// A single-cause map, or a `changed` id absent from `current`, comes back
/// unchanged.
pub fn redistribute(
    current: &PercentageMap,
    changed: CauseId,
    requested: f64,
    floor: MinimumFloor,
) -> PercentageMap {
    if !current.contains(changed) {
        return current.clone();
    }

    let other_count = current.len() - 1;
    if other_count == 0 {
        return current.clone();
    }

    let value = floor.clamp(requested).min(floor.max_allowed(other_count));
    let remaining = TOTAL_PERCENTAGE - value;
    let others_total: f64 = current.iter().filter(|(id, _)| *id != changed).map(|(_, p)| p).sum();

    let mut next = PercentageMap::new();
    next.insert(changed, value);

    if others_total <= DEGENERATE_TOTAL {
        let share = remaining / other_count as f64;
        for id in current.ids().filter(|id| *id != changed) {
            next.insert(id, share);
        }
    } else {
        let scale = remaining / others_total;
        for (id, percentage) in current.iter().filter(|(id, _)| *id != changed) {
            next.insert(id, (percentage * scale).max(floor.percentage()));
        }
    }

    normalize_in_place(&mut next);
    next
}

/// Equal split across `ids`, each raised to the floor, normalized.
pub fn equal_split<I>(ids: I, floor: MinimumFloor) -> PercentageMap
where
    I: IntoIterator<Item = CauseId>,
{
    let ids: Vec<CauseId> = ids.into_iter().collect();
    if ids.is_empty() {
        return PercentageMap::new();
    }

    let share = (TOTAL_PERCENTAGE / ids.len() as f64).max(floor.percentage());
    let mut split: PercentageMap = ids.into_iter().map(|id| (id, share)).collect();
    normalize_in_place(&mut split);
    split
}
