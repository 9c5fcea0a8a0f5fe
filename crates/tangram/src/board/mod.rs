//! Board state, assignment matching, and hints.
//!
//! Purpose
//! - Decide whether a user's arrangement of pieces fills a level's silhouette,
//!   slot for slot, and pick hints from what is still unsolved.
//!
//! Why this design
//! - The matcher is a pure function of its arguments (pieces, target, board
//!   frame, tolerances). Sessions and persisted progress sit on top of it.
//! - Hints take an injected RNG so tests can assert exact outcomes.
//!
//! Code cross-refs: `geom`, `session::LevelSession`.

mod hint;
pub mod matcher;
mod types;

pub use hint::{apply_hint, Hint};
pub use matcher::{assign, expected_anchor, is_board_solved, pieces_match, Assignment};
pub use types::{PieceInstance, TargetShape, TargetSlot};

#[cfg(test)]
mod tests;
