//! Level definitions, loading, and the initial piece layout.
//!
//! Level files are authored externally and read once:
//! `{ "levels": [ { "id", "name", "difficulty", "targetShape": { "width",
//! "height", "pieces": [..] } } ] }`.

use std::collections::HashSet;
use std::path::Path;

use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{PieceInstance, TargetShape};
use crate::error::DataError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The tier that has to be fully completed before this one opens.
    pub fn prerequisite(self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(Difficulty::Easy),
            Difficulty::Hard => Some(Difficulty::Medium),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub difficulty: Difficulty,
    pub target_shape: TargetShape,
}

/// All levels of the game, validated on load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    pub levels: Vec<Level>,
}

impl LevelSet {
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        let set: LevelSet = serde_json::from_str(text)?;
        set.validate()?;
        Ok(set)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DataError::io(path, e))?;
        let set = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), levels = set.levels.len(), "levels loaded");
        Ok(set)
    }

    pub fn get(&self, id: u32) -> Result<&Level, DataError> {
        self.levels
            .iter()
            .find(|l| l.id == id)
            .ok_or(DataError::UnknownLevel(id))
    }

    pub fn by_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &Level> {
        self.levels.iter().filter(move |l| l.difficulty == difficulty)
    }

    fn validate(&self) -> Result<(), DataError> {
        let mut ids = HashSet::new();
        for level in &self.levels {
            if !ids.insert(level.id) {
                return Err(DataError::invalid(level.id, "duplicate level id"));
            }
            let t = &level.target_shape;
            if !(t.width > 0.0 && t.height > 0.0) {
                return Err(DataError::invalid(level.id, "target shape has no area"));
            }
            if t.slots.is_empty() {
                return Err(DataError::invalid(level.id, "target shape has no pieces"));
            }
            let mut slot_ids = HashSet::new();
            for slot in &t.slots {
                if !slot_ids.insert(slot.id.as_str()) {
                    return Err(DataError::invalid(
                        level.id,
                        format!("duplicate piece id {:?}", slot.id),
                    ));
                }
                if !(slot.position.x.is_finite()
                    && slot.position.y.is_finite()
                    && slot.rotation.is_finite())
                {
                    return Err(DataError::invalid(
                        level.id,
                        format!("piece {:?} has a non-finite placement", slot.id),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Parking spots around the silhouette where fresh pieces are laid out.
const PARKING: [[f64; 2]; 7] = [
    [80.0, 100.0],
    [80.0, 250.0],
    [80.0, 400.0],
    [780.0, 100.0],
    [780.0, 250.0],
    [780.0, 400.0],
    [330.0, 530.0],
];

/// One piece per slot, parked off the silhouette with a random 45° rotation.
pub fn initial_layout<R: Rng + ?Sized>(target: &TargetShape, rng: &mut R) -> Vec<PieceInstance> {
    target
        .slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let position = match PARKING.get(i) {
                Some(p) => Vector2::new(p[0], p[1]),
                None => Vector2::new(100.0 + 80.0 * i as f64, 500.0),
            };
            let rotation = rng.gen_range(0..8) as f64 * 45.0;
            let mut piece = PieceInstance::new(slot.id.clone(), slot.shape, position, rotation);
            piece.color = slot.color.clone();
            piece
        })
        .collect()
}
