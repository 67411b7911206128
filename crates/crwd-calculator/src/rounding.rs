//! Two-decimal rounding helpers shared by the normalizer and the input buffers.

use crate::TOTAL_PERCENTAGE;
use crwd_types::PercentageMap;

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Display form used by the input buffers, e.g. `"33.33"`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}")
}

/// Whether the map sums to exactly 100.00 at two decimal places.
pub fn sums_to_hundred(map: &PercentageMap) -> bool {
    round2(map.total()) == TOTAL_PERCENTAGE
}
