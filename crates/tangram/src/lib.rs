//! Placement validator and hint engine for the seven-piece tangram puzzle.
//!
//! Layout
//! - `geom`: shape catalogue, rotation classes, anchor compensation, symmetry.
//! - `board`: piece/slot types, the assignment matcher, hints.
//! - `level`: level files and the initial layout.
//! - `session`: one level attempt (clock, idempotent completion) and saved progress.
//! - `cfg`: tolerances and fixed board geometry.
//!
//! The matcher is pure: it depends only on its arguments. Everything stateful
//! (clock, progress, randomness) is owned by the caller and passed in.

pub mod api;
pub mod board;
pub mod cfg;
pub mod error;
pub mod geom;
pub mod level;
pub mod session;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{BoardFrame, MatchCfg};
pub use error::DataError;
pub use geom::Shape;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::board::{
        apply_hint, assign, is_board_solved, pieces_match, Assignment, Hint, PieceInstance,
        TargetShape, TargetSlot,
    };
    pub use crate::cfg::{BoardFrame, MatchCfg};
    pub use crate::geom::{resolve_anchor, rotations_equivalent, Shape};
    pub use crate::level::{Difficulty, Level, LevelSet};
    pub use crate::session::{Completion, LevelSession, Progress};
    pub use nalgebra::Vector2;
}
