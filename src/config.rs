//! Controller configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::constraint::Constraints;
use crate::consts::DEFAULT_LOCK_MODIFIER;
use crate::error::ConfigError;

/// Tunables for a [`crate::controller::Controller`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerConfig {
    /// Bounds used for elements registered without their own.
    pub default_constraints: Constraints,
    /// Key name (as in `KeyboardEvent.key`) that inverts the aspect lock.
    pub lock_modifier: String,
    /// Coalesce pointer-moves into one preview per animation frame.
    pub throttle_previews: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_constraints: Constraints::default(),
            lock_modifier: DEFAULT_LOCK_MODIFIER.to_owned(),
            throttle_previews: false,
        }
    }
}

impl ControllerConfig {
    /// Parse from a JSON object; absent fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }
}
