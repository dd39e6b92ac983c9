//! Manager configuration.
//!
//! [`ManagerConfig`] can be built in code or loaded from JSON. Every field is
//! optional in JSON and falls back to its default:
//!
//! ```rust
//! use cssvars::{ManagerConfig, UpdateMode};
//!
//! let config = ManagerConfig::from_json(r#"{ "update_mode": "shades_only" }"#).unwrap();
//! assert_eq!(config.update_mode, UpdateMode::ShadesOnly);
//! assert_eq!(config.shade_step, 2);
//! ```

use serde::{Deserialize, Serialize};

/// Prefix attached to import failure logs.
pub const DEFAULT_LOG_PREFIX: &str = "[css-vars-management]";

/// Power applied per shade level unless configured otherwise.
pub const DEFAULT_SHADE_STEP: u8 = 2;

/// What `update_variable` does to the base binding of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Rebind the base tag, then regenerate its shades if it is tracked.
    #[default]
    RebindBase,
    /// Leave the base tag alone and only regenerate derived shades.
    ShadesOnly,
}

/// Settings for a [`VariableManager`](crate::VariableManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    pub update_mode: UpdateMode,
    /// Power per shade level: level `i` is shaded by `shade_step * i`.
    pub shade_step: u8,
    pub log_prefix: String,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            update_mode: UpdateMode::default(),
            shade_step: DEFAULT_SHADE_STEP,
            log_prefix: DEFAULT_LOG_PREFIX.to_string(),
        }
    }
}

impl ManagerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON object.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn update_mode(mut self, mode: UpdateMode) -> Self {
        self.update_mode = mode;
        self
    }

    pub fn shade_step(mut self, step: u8) -> Self {
        self.shade_step = step;
        self
    }

    pub fn log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_prefix = prefix.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ManagerConfig::default();
        assert_eq!(config.update_mode, UpdateMode::RebindBase);
        assert_eq!(config.shade_step, 2);
        assert_eq!(config.log_prefix, "[css-vars-management]");
    }

    #[test]
    fn test_from_empty_json() {
        assert_eq!(ManagerConfig::from_json("{}").unwrap(), ManagerConfig::default());
    }

    #[test]
    fn test_from_json_all_fields() {
        let config = ManagerConfig::from_json(
            r#"{"update_mode": "shades_only", "shade_step": 3, "log_prefix": "[theme]"}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            ManagerConfig::new()
                .update_mode(UpdateMode::ShadesOnly)
                .shade_step(3)
                .log_prefix("[theme]")
        );
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(ManagerConfig::from_json(r#"{"update_mode": "sometimes"}"#).is_err());
    }
}
