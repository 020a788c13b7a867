//! Terrain generation
//!
//! Builds the overworld in phases: wall frame, default fill, biome
//! patches, rivers, structures. Every draw comes from the caller's random
//! stream, so the same seed always yields the same grid.

use super::{Map, Position};
use crate::data::{Tile, TileKind};
use crate::errors::MapError;
use crate::map::Direction;
use crate::rng::RandomSource;

/// Run every generation phase
pub fn generate_terrain<R: RandomSource + ?Sized>(
    map: &mut Map,
    rng: &mut R,
    with_rivers: bool,
) -> Result<(), MapError> {
    create_frame(map);
    fill_default(map);
    generate_patches(map, rng);
    if with_rivers {
        generate_rivers(map, rng)?;
    }
    place_structures(map, rng)?;
    log::debug!(
        "terrain ready: {}x{} seed {} ({} rivers)",
        map.width(),
        map.height(),
        map.seed(),
        if with_rivers { map.config.rivers } else { 0 }
    );
    Ok(())
}

/// One-cell wall border: `=` on the top and bottom rows, `|` on the sides
fn create_frame(map: &mut Map) {
    let (height, width) = (map.height(), map.width());
    let horizontal = map.registry.get(TileKind::HorizontalWall);
    let vertical = map.registry.get(TileKind::VerticalWall);
    for row in 0..height {
        for col in 0..width {
            if row == 0 || row == height - 1 {
                map.grid[row][col] = horizontal.clone();
            } else if col == 0 || col == width - 1 {
                map.grid[row][col] = vertical.clone();
            }
        }
    }
}

fn fill_default(map: &mut Map) {
    let default = map.registry.get(TileKind::Default);
    for row in 1..map.height() - 1 {
        for col in 1..map.width() - 1 {
            map.grid[row][col] = default.clone();
        }
    }
}

/// Uniform interior cell
pub(super) fn random_interior<R: RandomSource + ?Sized>(map: &Map, rng: &mut R) -> Position {
    let row = rng.range_inclusive(1, map.height() as i32 - 2) as usize;
    let col = rng.range_inclusive(1, map.width() as i32 - 2) as usize;
    Position::new(row, col)
}

/// One cardinal step, clamped to the interior
fn walk<R: RandomSource + ?Sized>(map: &Map, pos: Position, rng: &mut R) -> Position {
    let direction = Direction::ALL[rng.pick_index(Direction::ALL.len())];
    let (dr, dc) = direction.delta();
    Position::new(
        pos.row.saturating_add_signed(dr).clamp(1, map.height() - 2),
        pos.col.saturating_add_signed(dc).clamp(1, map.width() - 2),
    )
}

/// Rejection-sample an interior cell whose tile passes `accept`
pub(super) fn find_cell<R, F>(
    map: &Map,
    rng: &mut R,
    target: &str,
    accept: F,
) -> Result<Position, MapError>
where
    R: RandomSource + ?Sized,
    F: Fn(&Tile) -> bool,
{
    let attempts = map.config.max_placement_attempts;
    for _ in 0..attempts {
        let pos = random_interior(map, rng);
        if accept(map.grid[pos.row][pos.col].as_ref()) {
            return Ok(pos);
        }
    }
    log::warn!("no cell for {target} after {attempts} attempts");
    Err(MapError::PlacementFailed {
        target: target.to_string(),
        attempts,
    })
}

/// Stamp each biome's patches.
///
/// A patch of size `s` does `s` walks of `s` steps, every walk starting
/// again from the patch origin. Only cells still holding the default fill
/// are overwritten, so earlier biomes win.
fn generate_patches<R: RandomSource + ?Sized>(map: &mut Map, rng: &mut R) {
    let biomes = map.config.biomes.clone();
    for biome in biomes {
        let tile = map.registry.stamp(biome.kind);
        for _ in 0..biome.patches {
            let size = rng.range_inclusive(biome.min_size as i32, biome.max_size as i32);
            let origin = random_interior(map, rng);
            for _ in 0..size {
                let mut pos = origin;
                for _ in 0..size {
                    pos = walk(map, pos, rng);
                    if map.grid[pos.row][pos.col].kind() == TileKind::Default {
                        map.grid[pos.row][pos.col] = tile.clone();
                    }
                }
            }
        }
        log::debug!("biome {} stamped ({} patches)", biome.kind, biome.patches);
    }
}

/// Carve rivers, each springing from a mountain cell
fn generate_rivers<R: RandomSource + ?Sized>(map: &mut Map, rng: &mut R) -> Result<(), MapError> {
    let river = map.registry.get(TileKind::River);
    for _ in 0..map.config.rivers {
        let mut pos = find_cell(map, rng, "river source", |tile| {
            tile.kind() == TileKind::Mountain
        })?;
        let length = rng.range_inclusive(
            map.config.river_min_len as i32,
            map.config.river_max_len as i32,
        );
        for _ in 0..length {
            map.grid[pos.row][pos.col] = river.clone();
            pos = walk(map, pos, rng);
        }
    }
    Ok(())
}

/// Villages, caves and ruins, each on its required terrain
fn place_structures<R: RandomSource + ?Sized>(map: &mut Map, rng: &mut R) -> Result<(), MapError> {
    let structures = map.config.structures.clone();
    for spec in structures {
        for _ in 0..spec.count {
            let pos = find_cell(map, rng, spec.kind.name(), |tile| tile.kind() == spec.on)?;
            map.grid[pos.row][pos.col] = map.registry.stamp(spec.kind);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapConfig;
    use crate::rng::GameRng;

    fn bare_map(width: usize, height: usize) -> Map {
        let config = MapConfig {
            biomes: Vec::new(),
            rivers: 0,
            structures: Vec::new(),
            ..MapConfig::with_size(width, height)
        };
        Map::blank(config, 0)
    }

    #[test]
    fn test_frame_and_fill() {
        let mut map = bare_map(6, 4);
        create_frame(&mut map);
        fill_default(&mut map);
        assert_eq!(map.render_plain(), "======\n|####|\n|####|\n======");
    }

    #[test]
    fn test_walk_stays_inside() {
        let map = bare_map(5, 5);
        let mut rng = GameRng::new(8);
        let mut pos = Position::new(1, 1);
        for _ in 0..500 {
            pos = walk(&map, pos, &mut rng);
            assert!((1..=3).contains(&pos.row));
            assert!((1..=3).contains(&pos.col));
        }
    }

    #[test]
    fn test_find_cell_gives_up() {
        let mut map = bare_map(5, 5);
        map.config.max_placement_attempts = 50;
        create_frame(&mut map);
        fill_default(&mut map);
        let mut rng = GameRng::new(1);
        let err = find_cell(&map, &mut rng, "cave", |tile| tile.kind() == TileKind::Mountain)
            .unwrap_err();
        assert_eq!(
            err,
            MapError::PlacementFailed {
                target: "cave".to_string(),
                attempts: 50
            }
        );
    }

    #[test]
    fn test_structures_land_on_required_terrain() {
        let mut map = bare_map(12, 12);
        map.config.structures = vec![crate::map::StructureSpec::new(
            TileKind::Village,
            5,
            TileKind::Default,
        )];
        let mut rng = GameRng::new(3);
        generate_terrain(&mut map, &mut rng, false).unwrap();
        assert_eq!(map.count_kind(TileKind::Village), 5);
    }

    #[test]
    fn test_rivers_need_mountains() {
        let mut map = bare_map(8, 8);
        map.config.rivers = 1;
        map.config.max_placement_attempts = 100;
        let mut rng = GameRng::new(3);
        assert!(matches!(
            generate_terrain(&mut map, &mut rng, true),
            Err(MapError::PlacementFailed { .. })
        ));
    }
}
