//! Hint selector: snap one unsolved piece onto a free compatible slot.

use rand::seq::SliceRandom;
use rand::Rng;

use super::matcher::assign;
use super::types::{PieceInstance, TargetShape};
use crate::cfg::{BoardFrame, MatchCfg, HINT_PENALTY_SECS};
use crate::geom::normalize_deg;

/// What a hint changed, plus the time penalty the caller must apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hint {
    pub piece_index: usize,
    pub piece_id: String,
    pub slot_index: usize,
    pub penalty_secs: u64,
}

/// Place one randomly chosen unmatched piece exactly onto a random unclaimed
/// slot of its shape. Matched pieces are never touched.
///
/// Returns `None` without mutating anything when there is no target or no
/// unmatched piece has a free slot of its shape.
pub fn apply_hint<R: Rng + ?Sized>(
    pieces: &mut [PieceInstance],
    target: Option<&TargetShape>,
    frame: &BoardFrame,
    cfg: &MatchCfg,
    rng: &mut R,
) -> Option<Hint> {
    let target = target?;
    let assignment = assign(pieces, target, frame, cfg);
    let free_slots = assignment.unclaimed_slots();

    let mut unmatched = assignment.unmatched_pieces();
    unmatched.shuffle(rng);
    for i in unmatched {
        let candidates: Vec<usize> = free_slots
            .iter()
            .copied()
            .filter(|&j| target.slots[j].shape == pieces[i].shape)
            .collect();
        let Some(&j) = candidates.choose(rng) else {
            continue;
        };
        let slot = &target.slots[j];
        let piece = &mut pieces[i];
        piece.position = target.board_anchor(slot, frame);
        piece.rotation = normalize_deg(slot.rotation);
        tracing::debug!(piece = %piece.id, slot = j, "hint placed piece");
        return Some(Hint {
            piece_index: i,
            piece_id: piece.id.clone(),
            slot_index: j,
            penalty_secs: HINT_PENALTY_SECS,
        });
    }
    None
}
