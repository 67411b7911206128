//! CRWD Types
//!
//! This crate defines the records shared across the CRWD allocator crates
//! (`crwd-calculator`, `crwd-core` and the `crwd-split` binary). Keeping them
//! here lets the arithmetic crate stay free of any session or gateway concerns.

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(missing_docs)]

mod percentage_map;
mod request;
mod types;

pub use percentage_map::PercentageMap;
pub use request::{CauseAllocation, SaveReceipt, UpdateDonationBoxRequest};
pub use types::{BoxCause, Cause, CauseId, CauseRef, CollectiveId};
