//! Hand landmark model
//!
//! A hand is exactly 21 MediaPipe-ordered points: the wrist, then four
//! joints per finger from thumb to pinky. Coordinates are normalized to the
//! frame (0-1 in x/y, relative depth in z).

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::HandError;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of landmarks in a valid hand
pub const LANDMARK_COUNT: usize = 21;

/// Floats per hand in the flat (x, y, z) layout the tracker delivers
pub const FLAT_HAND_LEN: usize = LANDMARK_COUNT * 3;

/// Joints of the four non-thumb fingers: [MCP, PIP, DIP, TIP]
pub const FINGER_JOINTS: [[usize; 4]; 4] = [
    [INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
    [MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
    [RING_MCP, RING_PIP, RING_DIP, RING_TIP],
    [PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
];

/// Hand skeleton connections (parent -> child), for overlays drawn by the host
pub const HAND_SKELETON: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (INDEX_MCP, MIDDLE_MCP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single 3D landmark point (normalized coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized
    pub z: f32, // Relative depth
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn to_vector(self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_vector(v: Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Which physical hand a landmark set belongs to.
///
/// Only used to mirror x-axis comparisons; thumb geometry is chirally
/// asymmetric. A hand with unknown handedness is treated as `Right`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

impl Handedness {
    /// Multiplier that maps a raw x offset into the hand's own frame, where
    /// positive points toward the thumb side of the palm.
    pub fn sign(self) -> f32 {
        match self {
            Handedness::Right => 1.0,
            Handedness::Left => -1.0,
        }
    }

    /// Parse a one-character code; anything unrecognised is `None`
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'L' | 'l' => Some(Handedness::Left),
            'R' | 'r' => Some(Handedness::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }
}

/// Exactly 21 landmarks in anatomical order
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hand {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl Hand {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { landmarks }
    }

    /// Build a hand from a tracker slice; anything but 21 points is rejected
    pub fn from_landmarks(points: &[Landmark]) -> Result<Self, HandError> {
        let landmarks: [Landmark; LANDMARK_COUNT] =
            points.try_into().map_err(|_| HandError::InvalidHandShape {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            })?;
        Ok(Self { landmarks })
    }

    /// Build a hand from 63 floats laid out as x, y, z per landmark
    pub fn from_flat(data: &[f32]) -> Result<Self, HandError> {
        if data.len() != FLAT_HAND_LEN {
            return Err(HandError::InvalidHandShape {
                expected: LANDMARK_COUNT,
                actual: data.len() / 3,
            });
        }

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (point, xyz) in landmarks.iter_mut().zip(data.chunks_exact(3)) {
            *point = Landmark::new(xyz[0], xyz[1], xyz[2]);
        }
        Ok(Self { landmarks })
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    /// Landmark by index constant (`WRIST`, `INDEX_TIP`, ...)
    pub fn point(&self, index: usize) -> Landmark {
        self.landmarks[index]
    }

    /// Horizontal mirror (x -> 1 - x), as seen through a flipped camera
    pub fn mirrored(&self) -> Self {
        let mut landmarks = self.landmarks;
        for p in landmarks.iter_mut() {
            p.x = 1.0 - p.x;
        }
        Self { landmarks }
    }
}
