//! Level session: the pieces, clock and completion state of one level attempt.
//!
//! Purpose
//! - Own the mutable piece state for the active level, route drag/rotate/hint
//!   actions to it, and turn the matcher's verdict into completion side effects
//!   exactly once.
//!
//! Why this design
//! - Progress is passed in by reference at the calls that change it, so the
//!   session never reaches for ambient state and the matcher stays pure.
//! - Completion is sticky: after the first solved check the clock is stopped and
//!   later checks report `AlreadyCompleted` without touching progress again.
//!
//! Code cross-refs: `board::{is_board_solved, apply_hint}`, `progress::Progress`.

mod clock;
mod progress;

pub use clock::PlayClock;
pub use progress::{LevelStats, Progress, SavedBoard};

use nalgebra::Vector2;
use rand::Rng;

use crate::board::{apply_hint, is_board_solved, Hint, PieceInstance};
use crate::cfg::{BoardFrame, MatchCfg};
use crate::level::{initial_layout, Level};

/// Result of a completion check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    NotYet,
    /// First solved check of this attempt; side effects were applied now.
    JustCompleted { elapsed: u64, new_best: bool },
    /// Solved earlier; nothing was recorded again.
    AlreadyCompleted,
}

pub struct LevelSession<'a> {
    level: &'a Level,
    pieces: Vec<PieceInstance>,
    clock: PlayClock,
    completed: bool,
    hints_used: u32,
    frame: BoardFrame,
    cfg: MatchCfg,
}

impl<'a> LevelSession<'a> {
    /// Lay out fresh pieces for `level` and count an attempt.
    pub fn start<R: Rng + ?Sized>(
        level: &'a Level,
        progress: &mut Progress,
        cfg: MatchCfg,
        rng: &mut R,
    ) -> Self {
        progress.record_attempt(level.id);
        tracing::info!(level = level.id, pieces = level.target_shape.slots.len(), "level started");
        Self {
            level,
            pieces: initial_layout(&level.target_shape, rng),
            clock: PlayClock::new(),
            completed: false,
            hints_used: 0,
            frame: BoardFrame::default(),
            cfg,
        }
    }

    /// Continue the board saved in `progress` for `level`, or start fresh if
    /// there is none. A resumed board is the same attempt, so nothing is counted.
    pub fn resume<R: Rng + ?Sized>(
        level: &'a Level,
        progress: &mut Progress,
        cfg: MatchCfg,
        rng: &mut R,
    ) -> Self {
        let saved = progress.saved_board(level.id).map(<[PieceInstance]>::to_vec);
        match saved {
            Some(pieces) => {
                tracing::info!(level = level.id, pieces = pieces.len(), "level resumed");
                Self {
                    level,
                    pieces,
                    clock: PlayClock::new(),
                    completed: false,
                    hints_used: 0,
                    frame: BoardFrame::default(),
                    cfg,
                }
            }
            None => Self::start(level, progress, cfg, rng),
        }
    }

    pub fn with_frame(mut self, frame: BoardFrame) -> Self {
        self.frame = frame;
        self
    }

    /// Replace the current piece state, e.g. when resuming a saved board.
    pub fn with_pieces(mut self, pieces: Vec<PieceInstance>) -> Self {
        self.pieces = pieces;
        self
    }

    pub fn level(&self) -> &Level {
        self.level
    }

    pub fn pieces(&self) -> &[PieceInstance] {
        &self.pieces
    }

    pub fn elapsed(&self) -> u64 {
        self.clock.elapsed()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    fn piece_mut(&mut self, id: &str) -> Option<&mut PieceInstance> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    /// Returns false for an unknown piece id.
    pub fn move_piece(&mut self, id: &str, position: Vector2<f64>) -> bool {
        match self.piece_mut(id) {
            Some(p) => {
                p.move_to(position);
                true
            }
            None => false,
        }
    }

    /// Returns false for an unknown piece id.
    pub fn rotate_piece(&mut self, id: &str) -> bool {
        match self.piece_mut(id) {
            Some(p) => {
                p.rotate();
                true
            }
            None => false,
        }
    }

    /// One second of play; ignored once the level is completed.
    pub fn tick(&mut self) -> bool {
        self.clock.tick()
    }

    /// Snap one unsolved piece into place and charge the hint penalty.
    pub fn hint<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Hint> {
        if self.completed {
            return None;
        }
        let hint = apply_hint(
            &mut self.pieces,
            Some(&self.level.target_shape),
            &self.frame,
            &self.cfg,
            rng,
        )?;
        self.clock.add_penalty(hint.penalty_secs);
        self.hints_used += 1;
        tracing::info!(
            level = self.level.id,
            piece = %hint.piece_id,
            penalty = hint.penalty_secs,
            "hint applied"
        );
        Some(hint)
    }

    pub fn is_solved(&self) -> bool {
        is_board_solved(
            &self.pieces,
            Some(&self.level.target_shape),
            &self.frame,
            &self.cfg,
        )
    }

    /// Check the board and, on the first success, stop the clock and record the result.
    pub fn check_completion(&mut self, progress: &mut Progress) -> Completion {
        if self.completed {
            return Completion::AlreadyCompleted;
        }
        if !self.is_solved() {
            return Completion::NotYet;
        }
        self.completed = true;
        self.clock.stop();
        let elapsed = self.clock.elapsed();
        let new_best = progress.record_completion(self.level.id, elapsed);
        tracing::info!(level = self.level.id, elapsed, new_best, hints = self.hints_used, "level completed");
        Completion::JustCompleted { elapsed, new_best }
    }

    /// Start over: new layout, fresh clock, another attempt.
    pub fn reset<R: Rng + ?Sized>(&mut self, progress: &mut Progress, rng: &mut R) {
        progress.record_attempt(self.level.id);
        self.pieces = initial_layout(&self.level.target_shape, rng);
        self.clock = PlayClock::new();
        self.completed = false;
        self.hints_used = 0;
        tracing::debug!(level = self.level.id, "level reset");
    }

    /// Leave the level, keeping an unfinished board in `progress` for `resume`.
    pub fn suspend(self, progress: &mut Progress) -> u64 {
        if !self.completed {
            progress.save_board(self.level.id, self.pieces.clone());
        }
        self.leave()
    }

    /// Leave the level; the clock stops and the final elapsed time is returned.
    pub fn leave(mut self) -> u64 {
        self.clock.stop();
        tracing::debug!(level = self.level.id, elapsed = self.clock.elapsed(), "level left");
        self.clock.elapsed()
    }
}
