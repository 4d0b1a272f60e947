//! Finger state extraction
//!
//! Converts 21 landmarks + handedness into the compact feature vector the
//! classifier branches on. Recomputed every frame, never stored.
//!
//! - Extension: wrist-relative distance test (tip vs. PIP), roll-invariant
//! - Bend: PIP joint angle in degrees (180 = straight)
//! - Thumb: signed lateral offset from the index knuckle, mirrored by
//!   handedness so positive always points to the thumb side

use crate::classifier::Thresholds;
use crate::geometry::{
    angle, distance, Hand, Handedness, Landmark, FINGER_JOINTS, INDEX_MCP, MIDDLE_MCP,
    THUMB_TIP, WRIST,
};

pub const INDEX: usize = 0;
pub const MIDDLE: usize = 1;
pub const RING: usize = 2;
pub const PINKY: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FingerState {
    /// Extended flags for index, middle, ring, pinky
    pub extended: [bool; 4],

    /// PIP joint angle per finger in degrees
    pub bend: [f32; 4],

    /// Thumb tip pulled away from the palm
    pub thumb_abducted: bool,

    /// Thumb tip lateral offset from the index MCP, in palm lengths
    pub thumb_offset: f32,

    /// Raw thumb tip, for thumb-dependent disambiguation
    pub thumb_tip: Landmark,

    /// Wrist to middle MCP distance; the unit for all scaled tests
    pub palm_size: f32,

    pub handedness: Handedness,
}

impl FingerState {
    /// Extract finger state, or `None` when the palm is too small to measure
    pub fn extract(hand: &Hand, handedness: Handedness, thresholds: &Thresholds) -> Option<Self> {
        let wrist = hand.point(WRIST);
        let palm_size = distance(wrist, hand.point(MIDDLE_MCP));
        // NaN fails this comparison too
        if !(palm_size >= thresholds.min_palm_size) {
            return None;
        }

        let mut extended = [false; 4];
        let mut bend = [180.0; 4];
        for (finger, [mcp, pip, dip, tip]) in FINGER_JOINTS.iter().copied().enumerate() {
            let tip_reach = distance(hand.point(tip), wrist);
            let pip_reach = distance(hand.point(pip), wrist);
            extended[finger] = tip_reach > pip_reach * thresholds.extension_ratio;
            bend[finger] = angle(hand.point(mcp), hand.point(pip), hand.point(dip));
        }

        let thumb_tip = hand.point(THUMB_TIP);
        let thumb_offset = lateral(hand.point(INDEX_MCP), thumb_tip, handedness, palm_size);

        Some(Self {
            extended,
            bend,
            thumb_abducted: thumb_offset > thresholds.thumb_abduction,
            thumb_offset,
            thumb_tip,
            palm_size,
            handedness,
        })
    }

    pub fn extended_count(&self) -> usize {
        self.extended.iter().filter(|e| **e).count()
    }

    /// Extension pattern as (index, middle, ring, pinky)
    pub fn pattern(&self) -> (bool, bool, bool, bool) {
        let [i, m, r, p] = self.extended;
        (i, m, r, p)
    }

    /// Lateral position of `point` relative to the index knuckle of `hand`,
    /// in palm lengths, positive toward the thumb side
    pub fn lateral_of(&self, hand: &Hand, point: Landmark) -> f32 {
        lateral(hand.point(INDEX_MCP), point, self.handedness, self.palm_size)
    }

    /// Distance between two landmarks in palm lengths
    pub fn scaled(&self, a: Landmark, b: Landmark) -> f32 {
        distance(a, b) / self.palm_size
    }
}

fn lateral(reference: Landmark, point: Landmark, handedness: Handedness, palm_size: f32) -> f32 {
    (point.x - reference.x) * handedness.sign() / palm_size
}
