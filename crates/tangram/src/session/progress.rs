//! Persisted progress: completed levels, per-level statistics, and the board
//! of a level left unfinished.
//!
//! Loaded and saved explicitly at session boundaries; nothing in the matching
//! core reads it.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::PieceInstance;
use crate::error::DataError;
use crate::level::{Difficulty, LevelSet};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelStats {
    pub best_time: Option<u64>,
    pub attempts: u32,
}

/// Pieces of the level that was active when play was suspended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedBoard {
    pub level: u32,
    pub pieces: Vec<PieceInstance>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(default)]
    pub completed_levels: BTreeSet<u32>,
    #[serde(default)]
    pub stats: BTreeMap<u32, LevelStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<SavedBoard>,
}

impl Progress {
    /// Read saved progress; a missing file yields fresh progress.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no saved progress");
                return Ok(Self::default());
            }
            Err(e) => return Err(DataError::io(path, e)),
        };
        let progress: Progress = serde_json::from_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            completed = progress.completed_levels.len(),
            "progress loaded"
        );
        Ok(progress)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DataError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| DataError::io(parent, e))?;
            }
        }
        let bytes = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, bytes).map_err(|e| DataError::io(path, e))?;
        tracing::debug!(path = %path.display(), "progress saved");
        Ok(())
    }

    pub fn is_completed(&self, level: u32) -> bool {
        self.completed_levels.contains(&level)
    }

    pub fn stats(&self, level: u32) -> LevelStats {
        self.stats.get(&level).copied().unwrap_or_default()
    }

    pub fn record_attempt(&mut self, level: u32) {
        self.stats.entry(level).or_default().attempts += 1;
    }

    /// Mark `level` completed in `secs`; returns true if this is a new best time.
    pub fn record_completion(&mut self, level: u32, secs: u64) -> bool {
        self.completed_levels.insert(level);
        if self.current.as_ref().is_some_and(|b| b.level == level) {
            self.current = None;
        }
        let entry = self.stats.entry(level).or_default();
        let improved = entry.best_time.map_or(true, |best| secs < best);
        if improved {
            entry.best_time = Some(secs);
        }
        improved
    }

    /// Remember `pieces` as the unfinished board; replaces any earlier one.
    pub fn save_board(&mut self, level: u32, pieces: Vec<PieceInstance>) {
        self.current = Some(SavedBoard { level, pieces });
    }

    /// The saved board, if it belongs to `level`.
    pub fn saved_board(&self, level: u32) -> Option<&[PieceInstance]> {
        self.current
            .as_ref()
            .filter(|b| b.level == level)
            .map(|b| b.pieces.as_slice())
    }

    /// A tier opens once every level of its prerequisite tier is completed.
    pub fn is_unlocked(&self, levels: &LevelSet, difficulty: Difficulty) -> bool {
        match difficulty.prerequisite() {
            None => true,
            Some(prev) => {
                self.is_unlocked(levels, prev)
                    && levels.by_difficulty(prev).all(|l| self.is_completed(l.id))
            }
        }
    }

    pub fn unlocked_difficulties(&self, levels: &LevelSet) -> Vec<Difficulty> {
        Difficulty::ALL
            .into_iter()
            .filter(|&d| self.is_unlocked(levels, d))
            .collect()
    }

    /// A random not-yet-completed level of `difficulty`, if any remain.
    pub fn pick_level<R: Rng + ?Sized>(
        &self,
        levels: &LevelSet,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<u32> {
        let open: Vec<u32> = levels
            .by_difficulty(difficulty)
            .filter(|l| !self.is_completed(l.id))
            .map(|l| l.id)
            .collect();
        open.choose(rng).copied()
    }
}
