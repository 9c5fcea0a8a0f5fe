//! Curated surface for front ends (CLI, host applications).
//!
//! Groups the entry points a host needs per event: load data once, start a
//! session per level, feed it actions, check completion, save progress.

// Data boundary
pub use crate::error::DataError;
pub use crate::level::{initial_layout, Difficulty, Level, LevelSet};
pub use crate::session::{Completion, LevelSession, LevelStats, PlayClock, Progress, SavedBoard};
// Matching core
pub use crate::board::{
    apply_hint, assign, expected_anchor, is_board_solved, pieces_match, Assignment, Hint,
    PieceInstance, TargetShape, TargetSlot,
};
pub use crate::cfg::{BoardFrame, MatchCfg, HINT_PENALTY_SECS};
pub use crate::geom::{anchor_offset, resolve_anchor, rotations_equivalent, Octant, Shape};
