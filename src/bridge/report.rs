//! Per-frame result handed back to JS

use wasm_bindgen::prelude::*;

use crate::pipeline::FrameOutput;
use crate::text::{CommitEvent, Transcript};

/// Snapshot of one processed frame, read through getters on the JS side
#[wasm_bindgen]
#[derive(Clone, Debug)]
pub struct FrameReport {
    status: String,
    label: String,
    confirmed: bool,
    confidence: u32,
    hold_progress: f32,
    handedness: String,
    committed: String,
    sentence: String,
    pending_word: String,
}

impl FrameReport {
    pub fn new(output: &FrameOutput, transcript: &Transcript) -> Self {
        let committed = match &output.commit {
            Some(CommitEvent::Letter(letter)) => letter.to_string(),
            Some(CommitEvent::WordBreak { .. }) => " ".to_string(),
            None => String::new(),
        };

        Self {
            status: output.status.as_str().to_string(),
            label: output.label().to_string(),
            confirmed: output.status == crate::pipeline::FrameStatus::Confirmed,
            confidence: output.confidence_percent(),
            hold_progress: output.hold_progress,
            handedness: output
                .handedness
                .map(|h| h.as_str().to_string())
                .unwrap_or_default(),
            committed,
            sentence: transcript.sentence().to_string(),
            pending_word: transcript.pending_word().to_string(),
        }
    }
}

#[wasm_bindgen]
impl FrameReport {
    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        self.status.clone()
    }

    /// Symbol to display, or the status text
    #[wasm_bindgen(getter)]
    pub fn label(&self) -> String {
        self.label.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn confirmed(&self) -> bool {
        self.confirmed
    }

    /// Stabilized confidence as a whole percentage
    #[wasm_bindgen(getter)]
    pub fn confidence(&self) -> u32 {
        self.confidence
    }

    #[wasm_bindgen(getter, js_name = holdProgress)]
    pub fn hold_progress(&self) -> f32 {
        self.hold_progress
    }

    /// "Left", "Right" or empty
    #[wasm_bindgen(getter)]
    pub fn handedness(&self) -> String {
        self.handedness.clone()
    }

    /// Text appended this frame: a letter, a space, or empty
    #[wasm_bindgen(getter)]
    pub fn committed(&self) -> String {
        self.committed.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn sentence(&self) -> String {
        self.sentence.clone()
    }

    #[wasm_bindgen(getter, js_name = pendingWord)]
    pub fn pending_word(&self) -> String {
        self.pending_word.clone()
    }
}
