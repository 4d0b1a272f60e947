//! Tunable classifier constants
//!
//! Distances are in palm lengths (wrist to middle knuckle) so one table
//! works across hand sizes and camera framing. Angles are PIP joint angles
//! in degrees, 180 = straight.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Palm length below this (normalized units) is unmeasurable
    pub min_palm_size: f32,
    /// Finger extended when tip reach > PIP reach * ratio
    pub extension_ratio: f32,
    /// Bend at or above this counts as a straight finger
    pub straight_min_bend: f32,
    /// Bend below this counts as fully curled
    pub curl_max_bend: f32,
    /// Index bend below this is a hook (X)
    pub hook_max_bend: f32,
    /// Finger points sideways when |dx| > |dy| * ratio, knuckle to tip (G, H)
    pub sideways_ratio: f32,
    /// Thumb lateral offset above this is abducted (L, Y, open palm)
    pub thumb_abduction: f32,
    /// Thumb tip within this of a fingertip is touching (O, F)
    pub touch_distance: f32,
    /// Widest thumb-to-index gap still read as a C arc
    pub c_max_gap: f32,
    /// Fist thumb lateral offset at or above this sits beside the index (A)
    pub fist_thumb_side: f32,
    /// Fingertips within this of the thumb tip rest on it (E)
    pub fist_tip_rest: f32,
    /// Thumb tip within this of the middle finger centroid overlaps it (S)
    pub fist_thumb_overlap: f32,
    /// Half width of a finger column or inter-finger gap (S, T, N, M)
    pub fist_column_half_width: f32,
    /// Index tip must sit this far past the middle tip to read as crossed (R)
    pub cross_margin: f32,
    /// Thumb tip within this of the middle PIP (K)
    pub k_thumb_pip: f32,
    /// Index and middle tips closer than this are together (U)
    pub tips_together: f32,
    /// Mean adjacent fingertip gap at or above this is a spread hand
    pub spread_gap: f32,
    /// Confidence reported when a bucket falls through to its default
    pub fallback_confidence: f32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_palm_size: 0.01,
            extension_ratio: 0.9,
            straight_min_bend: 160.0,
            curl_max_bend: 90.0,
            hook_max_bend: 140.0,
            sideways_ratio: 1.0,
            thumb_abduction: 0.5,
            touch_distance: 0.25,
            c_max_gap: 0.8,
            fist_thumb_side: 0.1,
            fist_tip_rest: 0.3,
            fist_thumb_overlap: 0.35,
            fist_column_half_width: 0.1,
            cross_margin: 0.05,
            k_thumb_pip: 0.25,
            tips_together: 0.2,
            spread_gap: 0.4,
            fallback_confidence: 0.6,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("min_palm_size", self.min_palm_size),
            ("extension_ratio", self.extension_ratio),
            ("straight_min_bend", self.straight_min_bend),
            ("curl_max_bend", self.curl_max_bend),
            ("hook_max_bend", self.hook_max_bend),
            ("sideways_ratio", self.sideways_ratio),
            ("thumb_abduction", self.thumb_abduction),
            ("touch_distance", self.touch_distance),
            ("c_max_gap", self.c_max_gap),
            ("fist_thumb_side", self.fist_thumb_side),
            ("fist_tip_rest", self.fist_tip_rest),
            ("fist_thumb_overlap", self.fist_thumb_overlap),
            ("fist_column_half_width", self.fist_column_half_width),
            ("cross_margin", self.cross_margin),
            ("k_thumb_pip", self.k_thumb_pip),
            ("tips_together", self.tips_together),
            ("spread_gap", self.spread_gap),
            ("fallback_confidence", self.fallback_confidence),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        if self.fallback_confidence > 1.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "fallback_confidence",
                value: self.fallback_confidence,
            });
        }
        Ok(())
    }
}
