use crate::constants::{config as paths, session as defaults};
use crate::error::{SplitError, SplitResult};
use crwd_calculator::FloorPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SessionConfig {
    #[serde(default = "default_change_threshold")]
    pub change_threshold: f64,
    #[serde(default = "default_stepper_increment")]
    pub stepper_increment: f64,
    #[serde(default = "default_slider_step")]
    pub slider_step: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            change_threshold: default_change_threshold(),
            stepper_increment: default_stepper_increment(),
            slider_step: default_slider_step(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AllocatorConfig {
    #[serde(default)]
    pub floor: FloorPolicy,
    #[serde(default)]
    pub session: SessionConfig,
}

impl AllocatorConfig {
    /// Loads the file named by `CRWD_CONFIG_PATH`, or `crwd.toml`.
    pub fn load() -> SplitResult<Self> {
        let config_path = std::env::var(paths::CONFIG_PATH_ENV)
            .unwrap_or_else(|_| paths::DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(config_path)
    }

    /// Loads a TOML file. A missing file yields the built-in defaults.
    pub fn load_from(path: impl AsRef<Path>) -> SplitResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(
                    "Configuration file '{}' not found. Using default configuration.",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(err) => Err(SplitError::configuration(
                format!("failed to read '{}': {err}", path.display()),
                None,
            )),
        }
    }

    pub fn from_toml_str(contents: &str) -> SplitResult<Self> {
        toml::from_str(contents)
            .map_err(|err| SplitError::configuration(format!("invalid TOML: {err}"), None))
    }

    /// Applies `CRWD_*` environment overrides.
    pub fn apply_profile(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`. Values that do not parse are ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |key: &str| lookup(key).and_then(|value| value.trim().parse::<f64>().ok());

        if let Some(minimum) = number("CRWD_MIN_ABSOLUTE_DONATION") {
            self.floor.min_absolute_donation = minimum;
        }
        if let Some(net_factor) = number("CRWD_NET_FACTOR") {
            self.floor.net_factor = net_factor;
        }
        if let Some(threshold) = number("CRWD_CHANGE_THRESHOLD") {
            self.session.change_threshold = threshold;
        }
        if let Some(increment) = number("CRWD_STEPPER_INCREMENT") {
            self.session.stepper_increment = increment;
        }

        info!(
            min_absolute_donation = self.floor.min_absolute_donation,
            net_factor = self.floor.net_factor,
            "Applied allocator configuration profile"
        );
        self
    }

    pub fn validate(&self) -> SplitResult<()> {
        self.floor
            .validate()
            .map_err(|err| SplitError::configuration(err.message, Some("floor")))?;

        if !(self.session.change_threshold.is_finite() && self.session.change_threshold >= 0.0) {
            return Err(SplitError::configuration(
                format!("change_threshold must be >= 0, got {}", self.session.change_threshold),
                Some("session.change_threshold"),
            ));
        }
        if !(self.session.stepper_increment.is_finite() && self.session.stepper_increment > 0.0) {
            return Err(SplitError::configuration(
                format!("stepper_increment must be > 0, got {}", self.session.stepper_increment),
                Some("session.stepper_increment"),
            ));
        }
        if !(self.session.slider_step.is_finite() && self.session.slider_step > 0.0) {
            return Err(SplitError::configuration(
                format!("slider_step must be > 0, got {}", self.session.slider_step),
                Some("session.slider_step"),
            ));
        }
        Ok(())
    }
}

fn default_change_threshold() -> f64 {
    defaults::CHANGE_THRESHOLD
}
fn default_stepper_increment() -> f64 {
    defaults::STEPPER_INCREMENT
}
fn default_slider_step() -> f64 {
    defaults::SLIDER_STEP
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_platform_constants() {
        let config = AllocatorConfig::default();
        assert_eq!(config.floor.min_absolute_donation, 0.20);
        assert_eq!(config.floor.net_factor, 0.9);
        assert_eq!(config.session.change_threshold, 0.1);
        assert_eq!(config.session.stepper_increment, 1.0);
        assert_eq!(config.session.slider_step, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AllocatorConfig::from_toml_str(
            r#"
[floor]
net_factor = 0.85

[session]
stepper_increment = 5.0
"#,
        )
        .unwrap();

        assert_eq!(config.floor.net_factor, 0.85);
        assert_eq!(config.floor.min_absolute_donation, 0.20);
        assert_eq!(config.session.stepper_increment, 5.0);
        assert_eq!(config.session.change_threshold, 0.1);
    }

    #[test]
    fn invalid_toml_is_a_configuration_error() {
        let err = AllocatorConfig::from_toml_str("floor = [").unwrap_err();
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AllocatorConfig::load_from("/nonexistent/crwd.toml").unwrap();
        assert_eq!(config, AllocatorConfig::default());
    }

    #[test]
    fn overrides_replace_parsed_values_only() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CRWD_NET_FACTOR", "0.95"),
            ("CRWD_STEPPER_INCREMENT", "not-a-number"),
            ("CRWD_CHANGE_THRESHOLD", " 0.5 "),
        ]);

        let config = AllocatorConfig::default()
            .apply_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.floor.net_factor, 0.95);
        assert_eq!(config.session.stepper_increment, 1.0);
        assert_eq!(config.session.change_threshold, 0.5);
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut config = AllocatorConfig::default();
        config.floor.net_factor = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SplitError::Configuration { setting: Some(ref s), .. }) if s == "floor"
        ));

        let mut config = AllocatorConfig::default();
        config.session.slider_step = -0.01;
        assert!(config.validate().is_err());

        let mut config = AllocatorConfig::default();
        config.session.change_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }
}
