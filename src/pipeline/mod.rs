//! Pipeline module - per-frame landmarks -> classification -> stabilization -> commit
//!
//! Re-exports only. All logic in submodules.

mod frame;
mod settings;

pub use frame::{DetectedHand, FrameOutput, FrameStatus, SignPipeline, MAX_HANDS};
pub use settings::Settings;
