//! Stabilizer module - sliding-window vote over per-frame classifications
//!
//! Re-exports only. All logic in submodules.

mod window;

pub use window::{Stabilized, Stabilizer, StabilizerConfig};
