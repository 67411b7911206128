#![deny(warnings)]
//! The split arithmetic for the CRWD donation allocator.
//!
//! This crate holds the three pure pieces of the allocator: the minimum-floor
//! calculator, the redistribution engine and the sum normalizer. Every function
//! here is total over finite inputs and returns a map whose values sum to
//! exactly 100.00 at two decimal places.

pub mod floor;
pub mod normalizer;
pub mod redistribution;
pub mod rounding;
pub mod types;

pub use floor::{FloorPolicy, MinimumFloor, compute_floor};
pub use normalizer::{normalize, normalize_in_place};
pub use redistribution::{equal_split, redistribute};
pub use rounding::{format_percentage, round2, sums_to_hundred};
pub use types::{CalculatorError, ErrorCode};

/// The total every normalized map sums to.
pub const TOTAL_PERCENTAGE: f64 = 100.0;
