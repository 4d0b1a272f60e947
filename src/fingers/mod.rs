//! Fingers module - per-frame finger state extraction
//!
//! Re-exports only. All logic in submodules.

mod state;

pub use state::{FingerState, INDEX, MIDDLE, RING, PINKY};
