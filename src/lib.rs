//! SignBridge - fingerspelling recognition over hand landmarks
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - Public re-exports for Rust callers
//! - wasm_bindgen entry points that delegate to submodules

mod bridge;
pub mod classifier;
pub mod error;
pub mod fingers;
pub mod geometry;
pub mod pipeline;
pub mod stabilizer;
pub mod text;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    clear_transcript, configure, get_pending_word, get_sentence, get_transcript, hand_skeleton,
    process_hand_frame, set_hold_threshold, set_stabilizer_window, settings_json,
    supported_symbols, FrameReport,
};

pub use classifier::{Classification, SignClassifier, Symbol, Thresholds};
pub use error::{ConfigError, HandError};
pub use geometry::{Hand, Handedness, Landmark};
pub use pipeline::{DetectedHand, FrameOutput, FrameStatus, Settings, SignPipeline};
pub use stabilizer::{Stabilized, Stabilizer, StabilizerConfig};
pub use text::{CommitEvent, HoldConfig, HoldEngine, HoldState, Transcript};

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    console_log!("✅ SignBridge ready ({} signs)", classifier::SYMBOLS.len());
}
