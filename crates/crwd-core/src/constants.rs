//! Constants used by the donation-split session.
//!
//! The floor constants live with the floor formula in `crwd_calculator::floor`.

/// Editing session defaults
pub mod session {
    /// A cause must move by more than this many points for a save to go out
    pub const CHANGE_THRESHOLD: f64 = 0.1;

    /// Points added or removed by one stepper click
    pub const STEPPER_INCREMENT: f64 = 1.0;

    /// Slider granularity
    pub const SLIDER_STEP: f64 = 0.01;

    /// Decimal places used for the monthly amount in save payloads
    pub const AMOUNT_DECIMALS: usize = 2;
}

/// Configuration file discovery
pub mod config {
    /// Environment variable naming the configuration file
    pub const CONFIG_PATH_ENV: &str = "CRWD_CONFIG_PATH";

    /// Configuration file used when the variable is unset
    pub const DEFAULT_CONFIG_PATH: &str = "crwd.toml";
}
