//! Piece geometry: catalogue, rotation classes, anchor compensation, symmetry.
//!
//! Purpose
//! - Describe the five tangram shapes as constant data and answer the two
//!   geometric questions the matcher needs: "do these rotations look the same
//!   for this shape?" and "where must the anchor be at this rotation?".
//!
//! Why this design
//! - Shapes are a closed enum selected by exhaustive `match`, so adding a shape
//!   forces every table and predicate to be revisited.
//! - Anchor offsets are a table built once, which makes the 8×8 octant cases
//!   enumerable in tests.
//!
//! Code cross-refs: `board::matcher::pieces_match`, `cfg::CLASSIFY_EPS_DEG`.

pub mod angle;
mod offset;
mod shape;
mod symmetry;

pub use angle::{angular_distance, normalize_deg, Octant};
pub use offset::{anchor_offset, center_on_board, resolve_anchor};
pub use shape::Shape;
pub use symmetry::rotations_equivalent;
