//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod report;
mod session;

pub use report::FrameReport;

pub use session::{
    // WASM entry points
    process_hand_frame,
    clear_transcript,
    set_hold_threshold,
    set_stabilizer_window,
    configure,
    settings_json,
    get_transcript,
    get_sentence,
    get_pending_word,
    supported_symbols,
    hand_skeleton,
};
