//! Error types
//!
//! Per-frame problems (a malformed hand) are absorbed by the pipeline and
//! never reach the caller; configuration commands return `ConfigError`.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    #[error("Invalid hand shape: expected {expected} landmarks, got {actual}")]
    InvalidHandShape { expected: usize, actual: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Stabilizer window must hold at least 2 frames, got {0}")]
    WindowTooSmall(usize),

    #[error("Stabilizer quorum must be in (0.5, 1.0], got {0}")]
    QuorumOutOfRange(f32),

    #[error("Threshold `{name}` must be finite and non-negative, got {value}")]
    InvalidThreshold { name: &'static str, value: f32 },

    #[error("Duration must be finite and non-negative, got {0} ms")]
    NegativeDuration(f64),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
