//! Tolerances and fixed board geometry.
//!
//! Policy
//! - Numeric policy constants (classification epsilon, hint penalty, board
//!   geometry) are fixed. Match tolerances trade precision against player
//!   frustration, so they live in `MatchCfg` and are passed explicitly.

use nalgebra::Vector2;

/// Epsilon (degrees) used when deciding whether a rotation sits on a 45° grid line.
pub const CLASSIFY_EPS_DEG: f64 = 1.0;
/// Seconds added to the play clock each time a hint is applied.
pub const HINT_PENALTY_SECS: u64 = 30;
/// Rotation step applied by a single rotate action.
pub const ROTATION_STEP_DEG: f64 = 45.0;
/// Logical board size in board units.
pub const BOARD_WIDTH: f64 = 1000.0;
pub const BOARD_HEIGHT: f64 = 650.0;

/// Match tolerances for position (board units, per axis) and rotation (degrees).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchCfg {
    pub position_tolerance: f64,
    pub rotation_tolerance: f64,
}

impl Default for MatchCfg {
    fn default() -> Self {
        Self {
            position_tolerance: 30.0,
            rotation_tolerance: 15.0,
        }
    }
}

impl MatchCfg {
    /// Tight tolerances: 10 units and 1°.
    pub fn strict() -> Self {
        Self {
            position_tolerance: 10.0,
            rotation_tolerance: 1.0,
        }
    }
}

/// On-screen reference frame onto which silhouette-local coordinates are re-centered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardFrame {
    pub center: Vector2<f64>,
}

impl Default for BoardFrame {
    fn default() -> Self {
        Self {
            center: Vector2::new(BOARD_WIDTH / 2.0, BOARD_HEIGHT / 2.0),
        }
    }
}

impl BoardFrame {
    #[inline]
    pub fn new(center: Vector2<f64>) -> Self {
        Self { center }
    }
}
