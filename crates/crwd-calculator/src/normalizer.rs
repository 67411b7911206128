//! Sum Normalizer
//!
//! Forces a percentage map to sum to exactly 100.00 by rounding every entry
//! except the largest to cents and letting the largest absorb the remainder:
//!
//! largest = round2(100 - Σ round2(others))
//!
//! The largest entry is found by scanning in ascending id order and keeping
//! the latest entry that is `>=` everything seen so far, so among equal values
//! the last one absorbs. If absorbing would make it negative it keeps its
//! previous value and the map is left off 100.

use crate::TOTAL_PERCENTAGE;
use crate::rounding::round2;
use crwd_types::{CauseId, PercentageMap};

/// Returns a normalized copy of `map`.
pub fn normalize(map: &PercentageMap) -> PercentageMap {
    let mut normalized = map.clone();
    normalize_in_place(&mut normalized);
    normalized
}

pub fn normalize_in_place(map: &mut PercentageMap) {
    let Some(largest) = largest_entry(map) else {
        return;
    };

    let mut sum_of_others = 0.0;
    for (id, value) in map.values_mut() {
        if id == largest {
            continue;
        }
        *value = round2(*value);
        sum_of_others += *value;
    }

    let absorbed = round2(TOTAL_PERCENTAGE - sum_of_others);
    if absorbed >= 0.0 {
        map.insert(largest, absorbed);
    }
}

fn largest_entry(map: &PercentageMap) -> Option<CauseId> {
    let mut largest: Option<(CauseId, f64)> = None;
    for (id, value) in map.iter() {
        match largest {
            Some((_, max)) if value < max => {}
            _ => largest = Some((id, value)),
        }
    }
    largest.map(|(id, _)| id)
}
