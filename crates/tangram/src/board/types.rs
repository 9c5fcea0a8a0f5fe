//! Board state: user pieces, target slots, and the target silhouette.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::cfg::{BoardFrame, ROTATION_STEP_DEG};
use crate::geom::{normalize_deg, Shape};

/// Serde adapter writing a `Vector2<f64>` as `{ "x": .., "y": .. }`.
pub(crate) mod xy {
    use nalgebra::Vector2;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Xy {
        x: f64,
        y: f64,
    }

    pub fn serialize<S: Serializer>(v: &Vector2<f64>, s: S) -> Result<S::Ok, S::Error> {
        Xy { x: v.x, y: v.y }.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vector2<f64>, D::Error> {
        let p = Xy::deserialize(d)?;
        Ok(Vector2::new(p.x, p.y))
    }
}

/// A user-controlled piece. `position` is the anchor in board units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PieceInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub shape: Shape,
    #[serde(with = "xy")]
    pub position: Vector2<f64>,
    pub rotation: f64,
    #[serde(default)]
    pub color: String,
}

impl PieceInstance {
    pub fn new(id: impl Into<String>, shape: Shape, position: Vector2<f64>, rotation: f64) -> Self {
        Self {
            id: id.into(),
            shape,
            position,
            rotation: normalize_deg(rotation),
            color: String::new(),
        }
    }

    /// Drag to a new anchor position.
    #[inline]
    pub fn move_to(&mut self, position: Vector2<f64>) {
        self.position = position;
    }

    /// One rotate action: +45°, wrapping into [0, 360).
    #[inline]
    pub fn rotate(&mut self) {
        self.rotation = normalize_deg(self.rotation + ROTATION_STEP_DEG);
    }
}

/// One required final placement inside a silhouette, in silhouette-local coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetSlot {
    pub id: String,
    #[serde(rename = "type")]
    pub shape: Shape,
    #[serde(with = "xy")]
    pub position: Vector2<f64>,
    pub rotation: f64,
    #[serde(default)]
    pub color: String,
}

impl TargetSlot {
    pub fn new(id: impl Into<String>, shape: Shape, position: Vector2<f64>, rotation: f64) -> Self {
        Self {
            id: id.into(),
            shape,
            position,
            rotation,
            color: String::new(),
        }
    }
}

/// The silhouette of one level. Level files name the slot list `pieces`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetShape {
    pub width: f64,
    pub height: f64,
    #[serde(rename = "pieces")]
    pub slots: Vec<TargetSlot>,
}

impl TargetShape {
    #[inline]
    pub fn half_extents(&self) -> Vector2<f64> {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Anchor of `slot` after re-centering the silhouette onto the board.
    #[inline]
    pub fn board_anchor(&self, slot: &TargetSlot, frame: &BoardFrame) -> Vector2<f64> {
        frame.center + (slot.position - self.half_extents())
    }

    /// Slot shapes as a sorted multiset.
    pub fn shape_multiset(&self) -> Vec<Shape> {
        let mut v: Vec<Shape> = self.slots.iter().map(|s| s.shape).collect();
        v.sort();
        v
    }
}
