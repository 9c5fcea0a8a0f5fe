//! Rotation normalization and 45° classification.

use nalgebra::{Matrix2, Vector2};

use crate::cfg::CLASSIFY_EPS_DEG;

/// Normalize degrees into [0, 360).
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Shortest angular distance between two rotations, in [0, 180].
#[inline]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = (normalize_deg(a) - normalize_deg(b)).abs();
    d.min(360.0 - d)
}

/// True if `deg` lies within `eps` of an integer multiple of `step`.
#[inline]
pub fn is_multiple_of(deg: f64, step: f64, eps: f64) -> bool {
    let r = normalize_deg(deg).rem_euclid(step);
    r <= eps || step - r <= eps
}

/// Rotation matrix in board coordinates (y grows downward, positive angles turn clockwise on screen).
#[inline]
pub fn rotation_matrix(deg: f64) -> Matrix2<f64> {
    let (s, c) = deg.to_radians().sin_cos();
    Matrix2::new(c, -s, s, c)
}

/// Rotate `p` about the origin by `deg`.
#[inline]
pub fn rotate(p: Vector2<f64>, deg: f64) -> Vector2<f64> {
    rotation_matrix(deg) * p
}

/// 45° rotation class of a normalized rotation: index `k` stands for `45·k` degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Octant(u8);

impl Octant {
    pub const ALL: [Octant; 8] = [
        Octant(0),
        Octant(1),
        Octant(2),
        Octant(3),
        Octant(4),
        Octant(5),
        Octant(6),
        Octant(7),
    ];

    /// Classify a rotation; `None` if it is further than 1° from the 45° grid.
    pub fn classify(deg: f64) -> Option<Octant> {
        if !deg.is_finite() || !is_multiple_of(deg, 45.0, CLASSIFY_EPS_DEG) {
            return None;
        }
        let k = (normalize_deg(deg) / 45.0).round() as u8 % 8;
        Some(Octant(k))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0 as f64 * 45.0
    }

    /// Axis-aligned (multiple of 90°) as opposed to diagonal.
    #[inline]
    pub fn is_axis_aligned(self) -> bool {
        self.0 % 2 == 0
    }

    /// Number of whole quarter turns contained in this class.
    #[inline]
    pub fn quarter_turns(self) -> u8 {
        self.0 / 2
    }
}
