//! Translator session - one pipeline per page
//!
//! JS calls `process_hand_frame` from its requestAnimationFrame loop with the
//! tracker output flattened to 63 floats per hand. Configuration commands
//! come from the settings panel and are applied between frames.

use std::cell::RefCell;
use std::time::Duration;

use wasm_bindgen::prelude::*;

use super::report::FrameReport;
use crate::classifier::SYMBOLS;
use crate::geometry::{Handedness, Landmark, FLAT_HAND_LEN, HAND_SKELETON};
use crate::pipeline::{DetectedHand, SignPipeline, Settings, MAX_HANDS};

thread_local! {
    static PIPELINE: RefCell<SignPipeline> = RefCell::new(SignPipeline::default());
}

// ============================================================================
// INPUT DECODING
// ============================================================================

/// Split the flat tracker buffer into hands.
///
/// `handedness` carries one code per hand ("LR", "R", ...). A missing code
/// means Right and a missing score means the tracker was certain. A hand
/// whose slice is short keeps whatever points it has and is rejected later
/// as malformed.
pub fn parse_hands(flat_data: &[f32], num_hands: usize, handedness: &str, scores: &[f32]) -> Vec<DetectedHand> {
    let mut codes = handedness.chars();

    (0..num_hands.min(MAX_HANDS))
        .map(|h| {
            let start = (h * FLAT_HAND_LEN).min(flat_data.len());
            let end = ((h + 1) * FLAT_HAND_LEN).min(flat_data.len());
            let landmarks = flat_data[start..end]
                .chunks_exact(3)
                .map(|xyz| Landmark::new(xyz[0], xyz[1], xyz[2]))
                .collect();

            DetectedHand {
                landmarks,
                handedness: codes.next().and_then(Handedness::from_code),
                score: scores.get(h).copied().unwrap_or(1.0),
            }
        })
        .collect()
}

fn timestamp(now_ms: f64) -> Duration {
    Duration::try_from_secs_f64(now_ms / 1000.0).unwrap_or_default()
}

// ============================================================================
// WASM API
// ============================================================================

/// Process one video frame. `now_ms` should come from `performance.now()`.
#[wasm_bindgen]
pub fn process_hand_frame(
    flat_data: &[f32],
    num_hands: usize,
    handedness: &str,
    scores: &[f32],
    now_ms: f64,
) -> FrameReport {
    let hands = parse_hands(flat_data, num_hands, handedness, scores);

    PIPELINE.with(|cell| {
        let mut pipeline = cell.borrow_mut();
        let output = pipeline.process(&hands, timestamp(now_ms));
        FrameReport::new(&output, pipeline.transcript())
    })
}

#[wasm_bindgen]
pub fn clear_transcript() {
    PIPELINE.with(|cell| cell.borrow_mut().clear_transcript());
    web_sys::console::log_1(&"🧹 Transcript cleared".into());
}

#[wasm_bindgen]
pub fn set_hold_threshold(ms: f64) -> Result<(), JsValue> {
    PIPELINE.with(|cell| cell.borrow_mut().set_hold_threshold_ms(ms))?;
    web_sys::console::log_1(&format!("⏱️ Hold threshold set to {ms} ms").into());
    Ok(())
}

#[wasm_bindgen]
pub fn set_stabilizer_window(window: usize, quorum: f32) -> Result<(), JsValue> {
    PIPELINE.with(|cell| cell.borrow_mut().set_stabilizer_window(window, quorum))?;
    web_sys::console::log_1(&format!("🪟 Stabilizer window {window} frames, quorum {quorum}").into());
    Ok(())
}

/// Apply a JSON settings document; missing fields take their defaults
#[wasm_bindgen]
pub fn configure(json: &str) -> Result<(), JsValue> {
    let settings = Settings::from_json(json)?;
    PIPELINE.with(|cell| cell.borrow_mut().apply_settings(settings))?;
    web_sys::console::log_1(&"✅ Settings applied".into());
    Ok(())
}

#[wasm_bindgen]
pub fn settings_json() -> Result<String, JsValue> {
    let json = PIPELINE.with(|cell| cell.borrow().settings().to_json())?;
    Ok(json)
}

/// Committed sentence followed by the word in progress
#[wasm_bindgen]
pub fn get_transcript() -> String {
    PIPELINE.with(|cell| cell.borrow().transcript().text())
}

#[wasm_bindgen]
pub fn get_sentence() -> String {
    PIPELINE.with(|cell| cell.borrow().transcript().sentence().to_string())
}

#[wasm_bindgen]
pub fn get_pending_word() -> String {
    PIPELINE.with(|cell| cell.borrow().transcript().pending_word().to_string())
}

/// Labels the classifier can produce, for the help overlay
#[wasm_bindgen]
pub fn supported_symbols() -> js_sys::Array {
    SYMBOLS
        .iter()
        .map(|symbol| JsValue::from_str(symbol.as_str()))
        .collect()
}

/// Skeleton as flat (from, to) index pairs for the landmark overlay
#[wasm_bindgen]
pub fn hand_skeleton() -> Vec<u32> {
    HAND_SKELETON
        .iter()
        .flat_map(|&(a, b)| [a as u32, b as u32])
        .collect()
}
