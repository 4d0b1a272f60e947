//! Pipeline configuration
//!
//! Every field has a default, so a JSON document only needs the values it
//! overrides:
//!
//! ```json
//! { "hold": { "threshold_ms": 700 }, "stabilizer": { "window": 15 } }
//! ```

use serde::{Deserialize, Serialize};

use crate::classifier::Thresholds;
use crate::error::ConfigError;
use crate::stabilizer::StabilizerConfig;
use crate::text::HoldConfig;

/// Hands the tracker is less sure of than this are ignored
pub const DEFAULT_MIN_DETECTION_CONFIDENCE: f32 = 0.5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub thresholds: Thresholds,
    pub stabilizer: StabilizerConfig,
    pub hold: HoldConfig,
    pub min_detection_confidence: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            stabilizer: StabilizerConfig::default(),
            hold: HoldConfig::default(),
            min_detection_confidence: DEFAULT_MIN_DETECTION_CONFIDENCE,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds.validate()?;
        self.stabilizer.validate()?;
        let min = self.min_detection_confidence;
        if !(0.0..=1.0).contains(&min) {
            return Err(ConfigError::InvalidThreshold {
                name: "min_detection_confidence",
                value: min,
            });
        }
        Ok(())
    }
}
