//! Text module - hold-to-commit engine and transcript buffer
//!
//! Re-exports only. All logic in submodules.

mod hold;
mod transcript;

pub use hold::{CommitEvent, HoldConfig, HoldEngine, HoldState};
pub use transcript::Transcript;
