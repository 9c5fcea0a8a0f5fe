//! Symmetry-aware rotation comparison.

use super::angle::angular_distance;

/// True if `user` and `target` rotations look identical for a shape whose
/// appearance repeats every `period` degrees.
///
/// The shortest angular distance `d ∈ [0,180]` must be within `tolerance` of some
/// multiple `k·period` with `0 ≤ k·period ≤ 360`. For a 180° period the candidates
/// are 0°, 180° and 360° only, so a 90° delta never matches.
pub fn rotations_equivalent(user: f64, target: f64, period: f64, tolerance: f64) -> bool {
    if !(user.is_finite() && target.is_finite() && period.is_finite()) || period <= 0.0 {
        return false;
    }
    let d = angular_distance(user, target);
    if d <= tolerance {
        return true;
    }
    // nearest multiple is the only candidate worth checking
    let k = (d / period).round();
    k * period <= 360.0 && (d - k * period).abs() <= tolerance
}
