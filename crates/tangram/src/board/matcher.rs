//! Assignment matcher: per-piece matching and one-to-one board assignment.
//!
//! Model
//! - `pieces_match` decides whether one user piece occupies one target slot:
//!   same shape, rotations equivalent under the shape's symmetry, and the
//!   anchor within tolerance (per axis) of the slot's anchor resolved to the
//!   user's rotation.
//! - `assign` builds a maximum one-to-one assignment between pieces and slots
//!   using augmenting paths over the same-shape compatibility lists. Pieces are
//!   visited in order and slots in ascending index, so on unambiguous boards
//!   the result equals a greedy first-fit.
//!
//! Code cross-refs: `geom::{rotations_equivalent, resolve_anchor}`, `hint::apply_hint`.

use nalgebra::Vector2;

use super::types::{PieceInstance, TargetShape, TargetSlot};
use crate::cfg::{BoardFrame, MatchCfg};
use crate::geom::{resolve_anchor, rotations_equivalent};

/// Where `slot` expects the anchor of a piece drawn at `rotation`.
#[inline]
pub fn expected_anchor(
    slot: &TargetSlot,
    target: &TargetShape,
    frame: &BoardFrame,
    rotation: f64,
) -> Vector2<f64> {
    resolve_anchor(
        target.board_anchor(slot, frame),
        slot.shape,
        slot.rotation,
        rotation,
    )
}

/// True if `piece` correctly fills `slot`.
pub fn pieces_match(
    piece: &PieceInstance,
    slot: &TargetSlot,
    target: &TargetShape,
    frame: &BoardFrame,
    cfg: &MatchCfg,
) -> bool {
    if piece.shape != slot.shape {
        return false;
    }
    let period = piece.shape.symmetry_period();
    if !rotations_equivalent(piece.rotation, slot.rotation, period, cfg.rotation_tolerance) {
        return false;
    }
    let expected = expected_anchor(slot, target, frame, piece.rotation);
    let tol = cfg.position_tolerance;
    (piece.position.x - expected.x).abs() <= tol && (piece.position.y - expected.y).abs() <= tol
}

/// One-to-one pairing of pieces and slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    /// Slot claimed by each piece (indexed like the piece list).
    pub piece_slot: Vec<Option<usize>>,
    /// Piece claiming each slot (indexed like `TargetShape::slots`).
    pub slot_piece: Vec<Option<usize>>,
}

impl Assignment {
    fn empty(pieces: usize, slots: usize) -> Self {
        Self {
            piece_slot: vec![None; pieces],
            slot_piece: vec![None; slots],
        }
    }

    /// Every piece matched and every slot claimed.
    pub fn is_complete(&self) -> bool {
        self.piece_slot.len() == self.slot_piece.len()
            && self.piece_slot.iter().all(Option::is_some)
            && self.slot_piece.iter().all(Option::is_some)
    }

    pub fn matched_count(&self) -> usize {
        self.piece_slot.iter().filter(|s| s.is_some()).count()
    }

    pub fn unmatched_pieces(&self) -> Vec<usize> {
        self.piece_slot
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.is_none().then_some(i))
            .collect()
    }

    pub fn unclaimed_slots(&self) -> Vec<usize> {
        self.slot_piece
            .iter()
            .enumerate()
            .filter_map(|(j, p)| p.is_none().then_some(j))
            .collect()
    }
}

/// Maximum one-to-one assignment of `pieces` onto `target` slots.
pub fn assign(
    pieces: &[PieceInstance],
    target: &TargetShape,
    frame: &BoardFrame,
    cfg: &MatchCfg,
) -> Assignment {
    let compat: Vec<Vec<usize>> = pieces
        .iter()
        .map(|p| {
            target
                .slots
                .iter()
                .enumerate()
                .filter_map(|(j, s)| pieces_match(p, s, target, frame, cfg).then_some(j))
                .collect()
        })
        .collect();

    let mut out = Assignment::empty(pieces.len(), target.slots.len());
    for i in 0..pieces.len() {
        if compat[i].is_empty() {
            continue;
        }
        let mut visited = vec![false; target.slots.len()];
        augment(i, &compat, &mut visited, &mut out);
    }
    out
}

/// Try to give piece `i` a slot, re-seating earlier claimants if needed.
fn augment(i: usize, compat: &[Vec<usize>], visited: &mut [bool], out: &mut Assignment) -> bool {
    for &j in &compat[i] {
        if visited[j] {
            continue;
        }
        visited[j] = true;
        let free = match out.slot_piece[j] {
            None => true,
            Some(other) => augment(other, compat, visited, out),
        };
        if free {
            out.slot_piece[j] = Some(i);
            out.piece_slot[i] = Some(j);
            return true;
        }
    }
    false
}

/// True once every piece sits in a distinct slot and every slot is filled.
///
/// A missing target or a piece/slot count mismatch is reported as unsolved.
pub fn is_board_solved(
    pieces: &[PieceInstance],
    target: Option<&TargetShape>,
    frame: &BoardFrame,
    cfg: &MatchCfg,
) -> bool {
    let Some(target) = target else {
        return false;
    };
    if pieces.len() != target.slots.len() || target.slots.is_empty() {
        return false;
    }
    let mut shapes: Vec<_> = pieces.iter().map(|p| p.shape).collect();
    shapes.sort();
    if shapes != target.shape_multiset() {
        tracing::debug!(pieces = pieces.len(), "piece shapes differ from target slots");
        return false;
    }
    assign(pieces, target, frame, cfg).is_complete()
}
