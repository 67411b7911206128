//! Minimum-Floor Calculator
//!
//! Derives the smallest percentage any single cause may hold.
//!
//! net_amount = monthly_amount * net_factor
//! floor_percentage = (min_absolute_donation / net_amount) * 100
//!
//! With the default policy every cause receives at least 20 cents after the
//! 10% platform fee.

use crate::TOTAL_PERCENTAGE;
use crate::types::{CalculatorError, ErrorCode};
use serde::{Deserialize, Serialize};

/// Smallest absolute monthly donation a cause may receive, in dollars.
pub const MIN_ABSOLUTE_DONATION: f64 = 0.20;

/// Share of the monthly amount left after the platform fee.
pub const NET_FACTOR: f64 = 0.9;

/// The two constants the floor formula depends on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorPolicy {
    pub min_absolute_donation: f64,
    pub net_factor: f64,
}

impl Default for FloorPolicy {
    fn default() -> Self {
        Self { min_absolute_donation: MIN_ABSOLUTE_DONATION, net_factor: NET_FACTOR }
    }
}

impl FloorPolicy {
    /// Raw floor formula. Undefined for non-positive amounts; use
    /// [`MinimumFloor::try_new`] when the amount is not already known to be valid.
    pub fn floor_for(&self, monthly_amount: f64) -> f64 {
        let net_amount = monthly_amount * self.net_factor;
        (self.min_absolute_donation / net_amount) * TOTAL_PERCENTAGE
    }

    pub fn validate(&self) -> Result<(), CalculatorError> {
        if !(self.min_absolute_donation.is_finite() && self.min_absolute_donation > 0.0) {
            return Err(CalculatorError::new(
                ErrorCode::InvalidPolicy,
                format!(
                    "min_absolute_donation must be a positive number, got {}",
                    self.min_absolute_donation
                ),
            ));
        }
        if !(self.net_factor > 0.0 && self.net_factor <= 1.0) {
            return Err(CalculatorError::new(
                ErrorCode::InvalidPolicy,
                format!("net_factor must be in (0, 1], got {}", self.net_factor),
            ));
        }
        Ok(())
    }
}

/// Floor formula with the default policy.
pub fn compute_floor(monthly_amount: f64) -> f64 {
    FloorPolicy::default().floor_for(monthly_amount)
}

/// A floor percentage derived from a valid monthly amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimumFloor(f64);

impl MinimumFloor {
    pub fn try_new(policy: &FloorPolicy, monthly_amount: f64) -> Result<Self, CalculatorError> {
        if !(monthly_amount.is_finite() && monthly_amount > 0.0) {
            return Err(CalculatorError::new(
                ErrorCode::InvalidMonthlyAmount,
                format!("monthly amount must be positive, got {monthly_amount}"),
            ));
        }
        Ok(Self(policy.floor_for(monthly_amount)))
    }

    /// Wraps an already computed floor percentage.
    pub fn from_percentage(percentage: f64) -> Self {
        Self(percentage)
    }

    pub fn percentage(self) -> f64 {
        self.0
    }

    /// Clamps `value` into `[floor, 100]`. Non-numeric input lands on the floor.
    pub fn clamp(self, value: f64) -> f64 {
        // f64::clamp panics when floor > 100, which a tiny amount can produce.
        value.max(self.0).min(TOTAL_PERCENTAGE)
    }

    /// Largest value one cause may take while every one of `other_count`
    /// causes keeps at least the floor.
    pub fn max_allowed(self, other_count: usize) -> f64 {
        TOTAL_PERCENTAGE - other_count as f64 * self.0
    }

    /// Whether `cause_count` causes can all sit at or above the floor.
    pub fn is_feasible_for(self, cause_count: usize) -> bool {
        cause_count as f64 * self.0 <= TOTAL_PERCENTAGE
    }
}
