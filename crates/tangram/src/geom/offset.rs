//! Rotation-offset resolver.
//!
//! Purpose
//! - Pieces are stored and drawn with their anchor at a fixed corner, but a
//!   rotation must visually pivot around the shape's true center. Given an
//!   anchor authored at `base` rotation, compute the anchor that keeps the
//!   center in place at `actual` rotation.
//!
//! Model
//! - Rotating about the anchor moves the center to `R(θ)·c`. Keeping the center
//!   fixed from `base` to `actual` needs the translation `R(base)·c − R(actual)·c`.
//! - Square and parallelogram offsets for on-grid rotations come from a table
//!   keyed by `(shape, base octant, actual octant)`, built once. Off-grid
//!   rotations fall back to the formula. Triangles never compensate.

use std::sync::OnceLock;

use nalgebra::Vector2;

use super::angle::{normalize_deg, rotate, Octant};
use super::shape::Shape;

type OctantTable = [[Vector2<f64>; 8]; 8];

struct OffsetTables {
    square: OctantTable,
    parallelogram: OctantTable,
}

fn tables() -> &'static OffsetTables {
    static TABLES: OnceLock<OffsetTables> = OnceLock::new();
    TABLES.get_or_init(|| OffsetTables {
        square: build_table(Shape::Square),
        parallelogram: build_table(Shape::Parallelogram),
    })
}

fn build_table(shape: Shape) -> OctantTable {
    let mut t = [[Vector2::zeros(); 8]; 8];
    for base in Octant::ALL {
        for actual in Octant::ALL {
            t[base.index()][actual.index()] =
                pivot_offset(shape.center(), base.degrees(), actual.degrees());
        }
    }
    t
}

#[inline]
fn pivot_offset(center: Vector2<f64>, base_deg: f64, actual_deg: f64) -> Vector2<f64> {
    rotate(center, base_deg) - rotate(center, actual_deg)
}

/// Anchor translation for `shape` when moving from `base_rotation` to `actual_rotation`.
pub fn anchor_offset(shape: Shape, base_rotation: f64, actual_rotation: f64) -> Vector2<f64> {
    let table = match shape {
        Shape::Square => &tables().square,
        Shape::Parallelogram => &tables().parallelogram,
        Shape::LargeTriangle | Shape::MediumTriangle | Shape::SmallTriangle => {
            return Vector2::zeros();
        }
    };
    match (Octant::classify(base_rotation), Octant::classify(actual_rotation)) {
        (Some(b), Some(a)) => table[b.index()][a.index()],
        _ => pivot_offset(
            shape.center(),
            normalize_deg(base_rotation),
            normalize_deg(actual_rotation),
        ),
    }
}

/// Anchor that keeps the piece's center fixed when rotated from `base_rotation`
/// to `actual_rotation`.
#[inline]
pub fn resolve_anchor(
    base_anchor: Vector2<f64>,
    shape: Shape,
    base_rotation: f64,
    actual_rotation: f64,
) -> Vector2<f64> {
    base_anchor + anchor_offset(shape, base_rotation, actual_rotation)
}

/// Board position of the piece's true center for an anchor drawn at `rotation`.
#[inline]
pub fn center_on_board(anchor: Vector2<f64>, shape: Shape, rotation: f64) -> Vector2<f64> {
    anchor + rotate(shape.center(), normalize_deg(rotation))
}
