//! Piece catalogue: the five tangram shapes as constant data.
//!
//! Each shape carries its outline in the unrotated local frame (origin at the
//! authored anchor), its rotational symmetry period, and a nominal size. The
//! rotational center is the vertex mean of the outline, which for the square
//! and the parallelogram is also the point of symmetry.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Leg of the medium triangle and long side of the parallelogram: `75·√2`.
const MID: f64 = 106.066;
/// Half of `MID`.
const HALF_MID: f64 = 53.033;

/// One of the five fixed tangram outlines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    LargeTriangle,
    MediumTriangle,
    SmallTriangle,
    Square,
    Parallelogram,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::LargeTriangle,
        Shape::MediumTriangle,
        Shape::SmallTriangle,
        Shape::Square,
        Shape::Parallelogram,
    ];

    /// Outline points in the local frame, in drawing order.
    pub fn outline(self) -> &'static [[f64; 2]] {
        match self {
            Shape::LargeTriangle => &[[0.0, 0.0], [150.0, 0.0], [0.0, 150.0]],
            Shape::MediumTriangle => &[[0.0, 0.0], [0.0, MID], [MID, 0.0]],
            Shape::SmallTriangle => &[[0.0, 0.0], [75.0, 0.0], [0.0, 75.0]],
            Shape::Square => &[[0.0, 0.0], [75.0, 0.0], [75.0, 75.0], [0.0, 75.0]],
            Shape::Parallelogram => &[
                [0.0, 0.0],
                [MID, 0.0],
                [MID + HALF_MID, HALF_MID],
                [HALF_MID, HALF_MID],
            ],
        }
    }

    /// Smallest rotation (degrees) after which the shape looks unchanged.
    pub fn symmetry_period(self) -> f64 {
        match self {
            Shape::Square => 90.0,
            Shape::Parallelogram => 180.0,
            Shape::LargeTriangle | Shape::MediumTriangle | Shape::SmallTriangle => 360.0,
        }
    }

    /// Nominal bounding dimension.
    pub fn size(self) -> f64 {
        match self {
            Shape::LargeTriangle => 150.0,
            Shape::MediumTriangle => 107.0,
            Shape::SmallTriangle | Shape::Square => 75.0,
            Shape::Parallelogram => 160.0,
        }
    }

    /// Rotational center in the local frame.
    pub fn center(self) -> Vector2<f64> {
        let pts = self.outline();
        let sum = pts
            .iter()
            .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + Vector2::new(p[0], p[1]));
        sum / pts.len() as f64
    }

    /// Whether the anchor has to be compensated when the piece is compared
    /// at a rotation other than its authored one.
    ///
    /// Only shapes with a symmetry period below 360° can match at a different
    /// rotation, so the triangles never need compensation.
    pub fn pivots_about_center(self) -> bool {
        match self {
            Shape::Square | Shape::Parallelogram => true,
            Shape::LargeTriangle | Shape::MediumTriangle | Shape::SmallTriangle => false,
        }
    }

    /// Outline as vectors.
    pub fn outline_points(self) -> Vec<Vector2<f64>> {
        self.outline().iter().map(|p| Vector2::new(p[0], p[1])).collect()
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::LargeTriangle => "large-triangle",
            Shape::MediumTriangle => "medium-triangle",
            Shape::SmallTriangle => "small-triangle",
            Shape::Square => "square",
            Shape::Parallelogram => "parallelogram",
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
