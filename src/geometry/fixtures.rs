//! Synthetic right-hand poses for tests
//!
//! Palm faces the camera with fingers pointing up (y decreases upward) and
//! the thumb side toward +x. Wrist (0.50, 0.80), middle MCP (0.50, 0.60),
//! so one palm length is 0.20 in normalized units.

use super::landmark::*;

#[derive(Clone, Copy)]
pub enum Shape {
    /// Straight finger pointing up from its knuckle
    Extended,
    /// Straight finger ending at the given tip (x, y)
    ExtendedTo(f32, f32),
    /// Folded into the palm (fist)
    Curled,
    /// Partly bent, as in C or O
    Curved,
    /// Straight proximal segment with the last two segments folded (X)
    Hooked,
}

const FINGER_MCPS: [(f32, f32); 4] = [(0.56, 0.61), (0.50, 0.60), (0.44, 0.61), (0.38, 0.63)];

pub const THUMB_OUT: (f32, f32, f32) = (0.72, 0.62, 0.0);
pub const THUMB_TUCKED: (f32, f32, f32) = (0.57, 0.64, -0.02);

fn base() -> [Landmark; LANDMARK_COUNT] {
    let mut p = [Landmark::default(); LANDMARK_COUNT];
    p[WRIST] = Landmark::new(0.50, 0.80, 0.0);
    p[THUMB_CMC] = Landmark::new(0.57, 0.76, 0.0);
    p[THUMB_MCP] = Landmark::new(0.62, 0.71, 0.0);
    p[THUMB_IP] = Landmark::new(0.65, 0.66, 0.0);
    for (joints, (x, y)) in FINGER_JOINTS.iter().zip(FINGER_MCPS) {
        p[joints[0]] = Landmark::new(x, y, 0.0);
    }
    p
}

fn set_finger(p: &mut [Landmark; LANDMARK_COUNT], finger: usize, shape: Shape) {
    let [mcp, pip, dip, tip] = FINGER_JOINTS[finger];
    let (mx, my) = (p[mcp].x, p[mcp].y);
    let (pp, dp, tp) = match shape {
        Shape::Extended => ((mx, my - 0.08, 0.0), (mx, my - 0.13, 0.0), (mx, my - 0.17, 0.0)),
        Shape::ExtendedTo(tx, ty) => {
            let at = |f: f32| (mx + (tx - mx) * f, my + (ty - my) * f, 0.0);
            (at(0.47), at(0.76), (tx, ty, 0.0))
        }
        Shape::Curled => ((mx, my - 0.02, -0.06), (mx, my + 0.03, -0.06), (mx, my + 0.05, -0.03)),
        Shape::Curved => ((mx, my - 0.06, -0.03), (mx, my - 0.08, -0.07), (mx, my - 0.07, -0.11)),
        Shape::Hooked => ((mx, my - 0.08, 0.0), (mx, my - 0.10, -0.04), (mx, my - 0.08, -0.07)),
    };
    p[pip] = Landmark::new(pp.0, pp.1, pp.2);
    p[dip] = Landmark::new(dp.0, dp.1, dp.2);
    p[tip] = Landmark::new(tp.0, tp.1, tp.2);
}

/// Build a right hand from four finger shapes (index..pinky) and a thumb tip
pub fn hand(fingers: [Shape; 4], thumb_tip: (f32, f32, f32)) -> Hand {
    let mut p = base();
    for (finger, shape) in fingers.into_iter().enumerate() {
        set_finger(&mut p, finger, shape);
    }
    p[THUMB_TIP] = Landmark::new(thumb_tip.0, thumb_tip.1, thumb_tip.2);
    Hand::new(p)
}

pub fn fist(thumb_tip: (f32, f32, f32)) -> Hand {
    hand([Shape::Curled; 4], thumb_tip)
}

/// Fist with the thumb resting beside the index knuckle
pub fn fist_a() -> Hand {
    fist((0.60, 0.60, -0.03))
}

/// Fist with the thumb across the front of the middle finger
pub fn fist_s() -> Hand {
    fist((0.50, 0.60, -0.08))
}

pub fn open_palm() -> Hand {
    hand(
        [
            Shape::ExtendedTo(0.64, 0.45),
            Shape::ExtendedTo(0.52, 0.42),
            Shape::ExtendedTo(0.41, 0.45),
            Shape::ExtendedTo(0.30, 0.50),
        ],
        THUMB_OUT,
    )
}

pub fn flat_b() -> Hand {
    hand([Shape::Extended; 4], THUMB_TUCKED)
}
