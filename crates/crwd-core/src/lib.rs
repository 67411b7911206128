#![deny(warnings)]
#![allow(missing_docs)]
//! Core functionality for the CRWD donation-split allocator.
//!
//! This crate owns the editing session that sits between a donation-box
//! surface and the split arithmetic in `crwd-calculator`: it seeds the
//! percentages, keeps the text inputs in step with them, applies slider,
//! stepper, text and reset edits, and hands a normalized payload to the
//! persistence gateway on save.

/// Allocator configuration loaded from TOML with environment overrides
pub mod config;
/// Session-level constants
pub mod constants;
/// Structured error types for session operations
pub mod error;
/// Persistence gateway seam and the in-memory implementation
pub mod gateway;
/// Per-cause text input buffers and their focus state machine
pub mod input_buffer;
/// Initial percentage map from saved entries or an equal split
pub mod seed;
/// The editing session itself
pub mod session;

pub use config::{AllocatorConfig, SessionConfig};
pub use error::{SplitError, SplitResult};
pub use gateway::{DonationBoxGateway, GatewayError, InMemoryDonationBoxGateway};
pub use input_buffer::{FocusState, InputBuffer, Key, parse_percentage};
pub use session::{SaveOutcome, SplitSession};

pub use crwd_calculator::{FloorPolicy, MinimumFloor};
pub use crwd_types::{
    BoxCause, Cause, CauseAllocation, CauseId, CollectiveId, PercentageMap, SaveReceipt,
    UpdateDonationBoxRequest,
};
