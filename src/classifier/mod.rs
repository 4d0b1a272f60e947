//! Classifier module - rule-based static sign classification
//!
//! Re-exports only. All logic in submodules.

mod rules;
mod symbol;
mod thresholds;

pub use rules::{Classification, SignClassifier};
pub use symbol::{Symbol, SYMBOLS};
pub use thresholds::Thresholds;
