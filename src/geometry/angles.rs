//! Distance and joint-angle kernel
//!
//! Pure functions over landmarks. Distances are 3D Euclidean; NaN inputs
//! propagate as NaN rather than failing.

use super::landmark::Landmark;

/// Rays shorter than this are treated as degenerate
const MIN_RAY_LENGTH: f32 = 1e-6;

/// Euclidean distance in 3D (canonical for all classifier tests)
pub fn distance(p1: Landmark, p2: Landmark) -> f32 {
    (p1.to_vector() - p2.to_vector()).norm()
}

/// Euclidean distance ignoring depth, for trackers that report z = 0
pub fn planar_distance(p1: Landmark, p2: Landmark) -> f32 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    (dx * dx + dy * dy).sqrt()
}

/// Angle at vertex `p2` between rays to `p1` and `p3`, in degrees [0, 180]
///
/// Uses dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// - 180° = straight joint
/// - 90° = right-angle bend
pub fn angle(p1: Landmark, p2: Landmark, p3: Landmark) -> f32 {
    let v1 = p1.to_vector() - p2.to_vector();
    let v2 = p3.to_vector() - p2.to_vector();

    let mag1 = v1.norm();
    let mag2 = v2.norm();

    // Degenerate joint: report straight
    if mag1 < MIN_RAY_LENGTH || mag2 < MIN_RAY_LENGTH {
        return 180.0;
    }

    let cos_angle = (v1.dot(&v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}
