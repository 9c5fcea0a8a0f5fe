//! Scripted play: a JSON list of host events replayed through a level session.
//!
//! Example: `[{"action":"rotate","id":"square"},{"action":"tick","secs":5},
//! {"action":"hint"},{"action":"check"}]`

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tangram::api::{Completion, LevelSession, Progress};
use tangram::prelude::Vector2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    Move { id: String, x: f64, y: f64 },
    Rotate { id: String },
    Tick {
        #[serde(default = "one")]
        secs: u64,
    },
    Hint,
    Check,
    Reset,
}

fn one() -> u64 {
    1
}

pub fn load(path: &Path) -> Result<Vec<Action>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
}

/// What happened while replaying a script.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub actions: usize,
    pub unknown_pieces: usize,
    pub hints: u32,
    pub completed: bool,
    pub elapsed: u64,
    pub new_best: bool,
}

/// Feed `actions` to `session`. Completion is checked after every action, the
/// way a host re-runs the matcher on each piece-state change.
pub fn replay<R: Rng + ?Sized>(
    session: &mut LevelSession<'_>,
    actions: &[Action],
    progress: &mut Progress,
    rng: &mut R,
) -> Summary {
    let mut summary = Summary::default();
    for action in actions {
        summary.actions += 1;
        let known = match action {
            Action::Move { id, x, y } => session.move_piece(id, Vector2::new(*x, *y)),
            Action::Rotate { id } => session.rotate_piece(id),
            Action::Tick { secs } => {
                for _ in 0..*secs {
                    session.tick();
                }
                true
            }
            Action::Hint => {
                if session.hint(rng).is_some() {
                    summary.hints += 1;
                }
                true
            }
            Action::Check => true,
            Action::Reset => {
                session.reset(progress, rng);
                summary.completed = false;
                true
            }
        };
        if !known {
            summary.unknown_pieces += 1;
            tracing::warn!(?action, "no piece with that id");
        }
        if let Completion::JustCompleted { new_best, .. } = session.check_completion(progress) {
            summary.completed = true;
            summary.new_best = new_best;
        }
    }
    summary.elapsed = session.elapsed();
    summary
}
