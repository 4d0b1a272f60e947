//! Geometry module - landmark model and distance/angle kernel
//!
//! Re-exports only. All logic in submodules.

mod angles;
mod landmark;

#[cfg(test)]
pub(crate) mod fixtures;

pub use angles::{angle, distance, planar_distance};
pub use landmark::{
    Hand, Handedness, Landmark,
    FINGER_JOINTS, FLAT_HAND_LEN, HAND_SKELETON, LANDMARK_COUNT,
    WRIST, THUMB_CMC, THUMB_MCP, THUMB_IP, THUMB_TIP,
    INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP,
    MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP,
    RING_MCP, RING_PIP, RING_DIP, RING_TIP,
    PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP,
};
