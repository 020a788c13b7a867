//! Map generation parameters

use serde::{Deserialize, Serialize};

use crate::consts::{MAP_HEIGHT, MAP_WIDTH, MAX_PLACEMENT_ATTEMPTS};
use crate::data::TileKind;
use crate::errors::MapError;

/// One row of the biome table: `patches` random-walk patches of `kind`,
/// each with a size rolled in `min_size..=max_size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomeSpec {
    pub kind: TileKind,
    pub patches: u32,
    pub min_size: u32,
    pub max_size: u32,
}

impl BiomeSpec {
    pub const fn new(kind: TileKind, patches: u32, min_size: u32, max_size: u32) -> Self {
        Self {
            kind,
            patches,
            min_size,
            max_size,
        }
    }
}

/// `count` structures of `kind`, each placed on a cell holding `on`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureSpec {
    pub kind: TileKind,
    pub count: u32,
    pub on: TileKind,
}

impl StructureSpec {
    pub const fn new(kind: TileKind, count: u32, on: TileKind) -> Self {
        Self { kind, count, on }
    }
}

/// Everything the generator needs besides the random stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub width: usize,
    pub height: usize,
    pub biomes: Vec<BiomeSpec>,
    pub rivers: u32,
    pub river_min_len: u32,
    pub river_max_len: u32,
    pub structures: Vec<StructureSpec>,
    /// Rejection-sampling budget for a single placement
    pub max_placement_attempts: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            biomes: vec![
                BiomeSpec::new(TileKind::Plains, 20, 5, 15),
                BiomeSpec::new(TileKind::Forest, 15, 3, 12),
                BiomeSpec::new(TileKind::Mountain, 10, 4, 10),
                BiomeSpec::new(TileKind::Lake, 7, 4, 8),
                BiomeSpec::new(TileKind::Brush, 12, 3, 10),
                BiomeSpec::new(TileKind::Desert, 10, 4, 12),
                BiomeSpec::new(TileKind::Swamp, 8, 3, 10),
                BiomeSpec::new(TileKind::Snow, 5, 4, 10),
                BiomeSpec::new(TileKind::Hill, 10, 3, 10),
            ],
            rivers: 3,
            river_min_len: 10,
            river_max_len: 20,
            structures: vec![
                StructureSpec::new(TileKind::Village, 2, TileKind::Default),
                StructureSpec::new(TileKind::Cave, 3, TileKind::Mountain),
                StructureSpec::new(TileKind::Ruins, 2, TileKind::Plains),
            ],
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl MapConfig {
    /// Default tables with custom dimensions
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// A map needs at least one interior cell inside its frame and at least
    /// one attempt per placement
    pub fn validate(&self) -> Result<(), MapError> {
        if self.width < 3 || self.height < 3 {
            return Err(MapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_placement_attempts == 0 {
            return Err(MapError::NoPlacementAttempts);
        }
        Ok(())
    }
}
