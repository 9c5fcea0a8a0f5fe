use super::*;
use crate::cfg::{BoardFrame, MatchCfg};
use crate::geom::Shape;
use nalgebra::vector;
use rand::{rngs::StdRng, SeedableRng};

fn frame() -> BoardFrame {
    BoardFrame::new(vector![500.0, 325.0])
}

fn single_square_target() -> TargetShape {
    TargetShape {
        width: 150.0,
        height: 150.0,
        slots: vec![TargetSlot::new("sq", Shape::Square, vector![0.0, 0.0], 0.0)],
    }
}

/// Large triangle, square and parallelogram on a 300×300 silhouette.
fn three_piece_target() -> TargetShape {
    TargetShape {
        width: 300.0,
        height: 300.0,
        slots: vec![
            TargetSlot::new("lt", Shape::LargeTriangle, vector![0.0, 0.0], 0.0),
            TargetSlot::new("sq", Shape::Square, vector![150.0, 0.0], 0.0),
            TargetSlot::new("pg", Shape::Parallelogram, vector![0.0, 150.0], 45.0),
        ],
    }
}

fn pieces_on_targets(target: &TargetShape) -> Vec<PieceInstance> {
    target
        .slots
        .iter()
        .map(|s| {
            PieceInstance::new(
                s.id.clone(),
                s.shape,
                target.board_anchor(s, &frame()),
                s.rotation,
            )
        })
        .collect()
}

#[test]
fn square_at_quarter_turn_needs_compensated_anchor() {
    let target = single_square_target();
    let slot = &target.slots[0];
    let cfg = MatchCfg::default();
    // silhouette-local (0,0) lands at (425,250); at 90° the anchor shifts by (75,0)
    assert_eq!(target.board_anchor(slot, &frame()), vector![425.0, 250.0]);
    let good = PieceInstance::new("p", Shape::Square, vector![500.0, 250.0], 90.0);
    assert!(pieces_match(&good, slot, &target, &frame(), &cfg));
    let naive = PieceInstance::new("p", Shape::Square, vector![425.0, 250.0], 90.0);
    assert!(!pieces_match(&naive, slot, &target, &frame(), &cfg));
    assert!(!pieces_match(&naive, slot, &target, &frame(), &MatchCfg::strict()));
}

#[test]
fn square_accepts_all_quarter_turns_at_their_own_anchor() {
    let target = single_square_target();
    let slot = &target.slots[0];
    let cfg = MatchCfg::strict();
    for r in [0.0, 90.0, 180.0, 270.0] {
        let at = expected_anchor(slot, &target, &frame(), r);
        let p = PieceInstance::new("p", Shape::Square, at, r);
        assert!(pieces_match(&p, slot, &target, &frame(), &cfg), "r={r}");
    }
    let at = expected_anchor(slot, &target, &frame(), 45.0);
    let p = PieceInstance::new("p", Shape::Square, at, 45.0);
    assert!(!pieces_match(&p, slot, &target, &frame(), &cfg));
}

#[test]
fn parallelogram_rejects_quarter_turn() {
    let target = three_piece_target();
    let slot = &target.slots[2];
    let cfg = MatchCfg::default();
    for (r, ok) in [(45.0, true), (225.0, true), (135.0, false), (315.0, false)] {
        let at = expected_anchor(slot, &target, &frame(), r);
        let p = PieceInstance::new("p", Shape::Parallelogram, at, r);
        assert_eq!(pieces_match(&p, slot, &target, &frame(), &cfg), ok, "r={r}");
    }
}

#[test]
fn shape_mismatch_never_matches() {
    let target = single_square_target();
    let p = PieceInstance::new("p", Shape::SmallTriangle, vector![425.0, 250.0], 0.0);
    assert!(!pieces_match(&p, &target.slots[0], &target, &frame(), &MatchCfg::default()));
}

#[test]
fn position_tolerance_is_per_axis() {
    let target = single_square_target();
    let slot = &target.slots[0];
    let cfg = MatchCfg::default();
    // 29 units off on both axes: Euclidean ~41, still inside the per-axis box
    let p = PieceInstance::new("p", Shape::Square, vector![454.0, 279.0], 0.0);
    assert!(pieces_match(&p, slot, &target, &frame(), &cfg));
    let p = PieceInstance::new("p", Shape::Square, vector![456.0, 250.0], 0.0);
    assert!(!pieces_match(&p, slot, &target, &frame(), &cfg));
}

#[test]
fn solved_board_and_moved_piece() {
    let target = three_piece_target();
    let cfg = MatchCfg::default();
    let mut pieces = pieces_on_targets(&target);
    assert!(is_board_solved(&pieces, Some(&target), &frame(), &cfg));
    // the same answer twice in a row
    assert!(is_board_solved(&pieces, Some(&target), &frame(), &cfg));

    pieces[1].position.x += cfg.position_tolerance + 1.0;
    assert!(!is_board_solved(&pieces, Some(&target), &frame(), &cfg));
    pieces[1].position.x -= 2.0;
    assert!(is_board_solved(&pieces, Some(&target), &frame(), &cfg));
}

#[test]
fn rotated_symmetric_pieces_still_solve() {
    let target = three_piece_target();
    let cfg = MatchCfg::default();
    let mut pieces = pieces_on_targets(&target);
    for (i, r) in [(1usize, 270.0), (2, 225.0)] {
        pieces[i].position = expected_anchor(&target.slots[i], &target, &frame(), r);
        pieces[i].rotation = r;
    }
    assert!(is_board_solved(&pieces, Some(&target), &frame(), &cfg));
}

#[test]
fn missing_target_and_count_mismatch_are_unsolved() {
    let target = three_piece_target();
    let cfg = MatchCfg::default();
    let pieces = pieces_on_targets(&target);
    assert!(!is_board_solved(&pieces, None, &frame(), &cfg));
    assert!(!is_board_solved(&pieces[..2], Some(&target), &frame(), &cfg));
    assert!(!is_board_solved(&[], Some(&target), &frame(), &cfg));
}

#[test]
fn two_pieces_cannot_share_one_slot() {
    let target = TargetShape {
        width: 300.0,
        height: 300.0,
        slots: vec![
            TargetSlot::new("a", Shape::SmallTriangle, vector![0.0, 0.0], 0.0),
            TargetSlot::new("b", Shape::SmallTriangle, vector![200.0, 200.0], 0.0),
        ],
    };
    let cfg = MatchCfg::default();
    let at = target.board_anchor(&target.slots[0], &frame());
    let pieces = vec![
        PieceInstance::new("p", Shape::SmallTriangle, at, 0.0),
        PieceInstance::new("q", Shape::SmallTriangle, at + vector![5.0, 5.0], 0.0),
    ];
    let a = assign(&pieces, &target, &frame(), &cfg);
    assert_eq!(a.matched_count(), 1);
    assert_eq!(a.unclaimed_slots(), vec![1]);
    assert!(!is_board_solved(&pieces, Some(&target), &frame(), &cfg));
}

#[test]
fn assignment_reseats_an_ambiguous_piece() {
    // slots 40 apart; piece 0 sits between them, piece 1 only fits slot 0
    let target = TargetShape {
        width: 200.0,
        height: 200.0,
        slots: vec![
            TargetSlot::new("a", Shape::SmallTriangle, vector![0.0, 0.0], 0.0),
            TargetSlot::new("b", Shape::SmallTriangle, vector![40.0, 0.0], 0.0),
        ],
    };
    let cfg = MatchCfg::default();
    let a0 = target.board_anchor(&target.slots[0], &frame());
    let pieces = vec![
        PieceInstance::new("mid", Shape::SmallTriangle, a0 + vector![20.0, 0.0], 0.0),
        PieceInstance::new("left", Shape::SmallTriangle, a0 - vector![5.0, 0.0], 0.0),
    ];
    let a = assign(&pieces, &target, &frame(), &cfg);
    assert_eq!(a.piece_slot, vec![Some(1), Some(0)]);
    assert!(a.is_complete());
    assert!(is_board_solved(&pieces, Some(&target), &frame(), &cfg));
}

#[test]
fn piece_without_any_slot_of_its_shape_blocks_completion() {
    let target = single_square_target();
    let pieces = vec![PieceInstance::new("p", Shape::Parallelogram, vector![425.0, 250.0], 0.0)];
    assert!(!is_board_solved(&pieces, Some(&target), &frame(), &MatchCfg::default()));
}

#[test]
fn hint_only_moves_the_unmatched_piece() {
    let target = three_piece_target();
    let cfg = MatchCfg::default();
    for seed in 0..32u64 {
        let mut pieces = pieces_on_targets(&target);
        pieces[0].position = vector![80.0, 100.0];
        pieces[0].rotation = 135.0;
        let before = pieces.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        let hint = apply_hint(&mut pieces, Some(&target), &frame(), &cfg, &mut rng).unwrap();
        assert_eq!(hint.piece_index, 0);
        assert_eq!(hint.piece_id, "lt");
        assert_eq!(hint.slot_index, 0);
        assert_eq!(hint.penalty_secs, crate::cfg::HINT_PENALTY_SECS);
        assert_eq!(pieces[1..], before[1..]);
        assert_eq!(pieces[0].position, vector![350.0, 175.0]);
        assert_eq!(pieces[0].rotation, 0.0);
        assert!(is_board_solved(&pieces, Some(&target), &frame(), &cfg));
    }
}

#[test]
fn hint_picks_among_free_slots_of_the_same_shape() {
    let target = TargetShape {
        width: 300.0,
        height: 300.0,
        slots: vec![
            TargetSlot::new("a", Shape::SmallTriangle, vector![0.0, 0.0], 90.0),
            TargetSlot::new("b", Shape::SmallTriangle, vector![200.0, 200.0], 180.0),
        ],
    };
    let cfg = MatchCfg::default();
    let mut seen = [false; 2];
    for seed in 0..64u64 {
        let mut pieces = vec![
            PieceInstance::new("p", Shape::SmallTriangle, vector![0.0, 0.0], 0.0),
            PieceInstance::new("q", Shape::SmallTriangle, vector![900.0, 600.0], 0.0),
        ];
        let mut rng = StdRng::seed_from_u64(seed);
        let hint = apply_hint(&mut pieces, Some(&target), &frame(), &cfg, &mut rng).unwrap();
        seen[hint.slot_index] = true;
        let slot = &target.slots[hint.slot_index];
        let moved = &pieces[hint.piece_index];
        assert!(pieces_match(moved, slot, &target, &frame(), &MatchCfg::strict()));
    }
    assert_eq!(seen, [true, true]);
}

#[test]
fn hint_is_same_for_same_seed() {
    let target = three_piece_target();
    let cfg = MatchCfg::default();
    let scrambled = || {
        let mut p = pieces_on_targets(&target);
        for (k, piece) in p.iter_mut().enumerate() {
            piece.position = vector![80.0, 100.0 + 150.0 * k as f64];
        }
        p
    };
    let (mut a, mut b) = (scrambled(), scrambled());
    let ha = apply_hint(&mut a, Some(&target), &frame(), &cfg, &mut StdRng::seed_from_u64(7));
    let hb = apply_hint(&mut b, Some(&target), &frame(), &cfg, &mut StdRng::seed_from_u64(7));
    assert_eq!(ha, hb);
    assert_eq!(a, b);
}

#[test]
fn hint_is_a_no_op_when_nothing_is_eligible() {
    let target = three_piece_target();
    let cfg = MatchCfg::default();
    let mut rng = StdRng::seed_from_u64(1);

    let mut solved = pieces_on_targets(&target);
    let before = solved.clone();
    assert!(apply_hint(&mut solved, Some(&target), &frame(), &cfg, &mut rng).is_none());
    assert_eq!(solved, before);

    assert!(apply_hint(&mut solved, None, &frame(), &cfg, &mut rng).is_none());

    // second square has no free square slot left
    let corrupt = TargetShape {
        width: 150.0,
        height: 150.0,
        slots: vec![
            TargetSlot::new("sq", Shape::Square, vector![0.0, 0.0], 0.0),
            TargetSlot::new("st", Shape::SmallTriangle, vector![75.0, 75.0], 0.0),
        ],
    };
    let at = corrupt.board_anchor(&corrupt.slots[0], &frame());
    let mut pieces = vec![
        PieceInstance::new("a", Shape::Square, at, 0.0),
        PieceInstance::new("b", Shape::Square, vector![0.0, 0.0], 0.0),
    ];
    let before = pieces.clone();
    assert!(apply_hint(&mut pieces, Some(&corrupt), &frame(), &cfg, &mut rng).is_none());
    assert_eq!(pieces, before);
}

#[test]
fn hint_skips_a_starved_piece_and_places_the_next_one() {
    // two squares compete for the only square slot; the triangle is still loose
    let target = TargetShape {
        width: 150.0,
        height: 150.0,
        slots: vec![
            TargetSlot::new("sq", Shape::Square, vector![0.0, 0.0], 0.0),
            TargetSlot::new("st", Shape::SmallTriangle, vector![75.0, 75.0], 0.0),
        ],
    };
    let cfg = MatchCfg::default();
    let seated = target.board_anchor(&target.slots[0], &frame());
    for seed in 0..32u64 {
        let mut pieces = vec![
            PieceInstance::new("a", Shape::Square, seated, 0.0),
            PieceInstance::new("b", Shape::Square, vector![80.0, 100.0], 45.0),
            PieceInstance::new("c", Shape::SmallTriangle, vector![780.0, 400.0], 90.0),
        ];
        let before = pieces.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        let hint = apply_hint(&mut pieces, Some(&target), &frame(), &cfg, &mut rng).unwrap();
        assert_eq!((hint.piece_index, hint.slot_index), (2, 1), "seed {seed}");
        assert_eq!(hint.piece_id, "c");
        assert_eq!(pieces[..2], before[..2]);
        assert_eq!(pieces[2].position, vector![500.0, 325.0]);
        assert_eq!(pieces[2].rotation, 0.0);
    }
}

#[test]
fn rotate_wraps_in_45_degree_steps() {
    let mut p = PieceInstance::new("p", Shape::Square, vector![0.0, 0.0], 315.0);
    p.rotate();
    assert_eq!(p.rotation, 0.0);
    p.rotate();
    assert_eq!(p.rotation, 45.0);
    let q = PieceInstance::new("q", Shape::Square, vector![0.0, 0.0], -90.0);
    assert_eq!(q.rotation, 270.0);
}

#[test]
fn piece_json_uses_level_file_names() {
    let json = r##"{"id":"sq","type":"square","position":{"x":1.5,"y":2.0},"rotation":45,"color":"#BA68C8"}"##;
    let p: PieceInstance = serde_json::from_str(json).unwrap();
    assert_eq!(p.shape, Shape::Square);
    assert_eq!(p.position, vector![1.5, 2.0]);
    assert_eq!(p.rotation, 45.0);
    let back = serde_json::to_value(&p).unwrap();
    assert_eq!(back["position"]["x"], 1.5);
    assert_eq!(back["type"], "square");
}
