//! Overworld map: generation, tile bookkeeping and entity placement
//!
//! The grid is `height` rows of `width` shared tile handles, addressed as
//! `grid[row][col]`. Markers (player, enemies) replace the terrain they
//! stand on; the terrain is remembered so it can be put back.

mod config;
mod generation;
mod population;
mod position;

use std::rc::Rc;

use crate::consts::PLAYER_START;
use crate::data::{ANSI_RESET, Tile, TileKind, TileRegistry};
use crate::entity::Character;
use crate::errors::MapError;
use crate::rng::{GameRng, RandomSource};

pub use config::{BiomeSpec, MapConfig, StructureSpec};
pub use population::{select_enemies, wave_multiplier_percent};
pub use position::{Direction, Position};

/// The overworld
#[derive(Debug, Clone)]
pub struct Map {
    config: MapConfig,
    registry: TileRegistry,
    seed: u64,
    grid: Vec<Vec<Rc<Tile>>>,
    enemies: Vec<Character>,
    boss_spawned: bool,
    player_pos: Position,
    /// Terrain hidden under the player marker
    player_previous_tile: Rc<Tile>,
}

impl Map {
    /// Grid of default fill, no generation
    fn blank(config: MapConfig, seed: u64) -> Self {
        let registry = TileRegistry::new();
        let default = registry.get(TileKind::Default);
        let grid = vec![vec![default.clone(); config.width]; config.height];
        let (row, col) = PLAYER_START;
        Self {
            config,
            registry,
            seed,
            grid,
            enemies: Vec::new(),
            boss_spawned: false,
            player_pos: Position::new(row, col),
            player_previous_tile: default,
        }
    }

    /// Generate a map from `config`, drawing from `rng`.
    ///
    /// `seed` is recorded for display; determinism comes from `rng`, which
    /// should have been seeded with it.
    pub fn generate<R: RandomSource + ?Sized>(
        config: MapConfig,
        seed: u64,
        rng: &mut R,
    ) -> Result<Map, MapError> {
        config.validate()?;
        let mut map = Map::blank(config, seed);
        generation::generate_terrain(&mut map, rng, true)?;
        log::info!(
            "generated {}x{} map from seed {}",
            map.width(),
            map.height(),
            seed
        );
        Ok(map)
    }

    /// Default tables at `width` x `height`, seeded from `seed`. Returns the
    /// stream so later draws continue where generation stopped.
    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<(Map, GameRng), MapError> {
        let mut rng = GameRng::new(seed);
        let map = Map::generate(MapConfig::with_size(width, height), seed, &mut rng)?;
        Ok((map, rng))
    }

    /// Regenerate terrain on the continuing stream (no rivers) and forget
    /// enemies, the shrine and the player
    pub fn clear<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<(), MapError> {
        generation::generate_terrain(self, rng, false)?;
        self.enemies.clear();
        self.boss_spawned = false;
        let (row, col) = PLAYER_START;
        self.player_pos = Position::new(row, col);
        self.player_previous_tile = self.registry.get(TileKind::Default);
        log::info!("map cleared");
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    pub fn player_pos(&self) -> Position {
        self.player_pos
    }

    pub fn player_previous_tile(&self) -> &Rc<Tile> {
        &self.player_previous_tile
    }

    pub fn enemies(&self) -> &[Character] {
        &self.enemies
    }

    pub fn boss_spawned(&self) -> bool {
        self.boss_spawned
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row < self.height() && pos.col < self.width()
    }

    fn check_bounds(&self, pos: Position) -> Result<(), MapError> {
        if self.in_bounds(pos) {
            Ok(())
        } else {
            Err(MapError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            })
        }
    }

    pub fn tile_at(&self, pos: Position) -> Option<&Rc<Tile>> {
        self.grid.get(pos.row)?.get(pos.col)
    }

    /// Status-line name of whatever is drawn at `pos`
    pub fn tile_name_at(&self, pos: Position) -> &'static str {
        self.tile_at(pos).map_or("Unknown", |tile| tile.name())
    }

    /// Status-line name of a tile
    pub fn tile_name(tile: &Tile) -> &'static str {
        tile.name()
    }

    /// Stamp `kind` at `pos`
    pub fn set_tile(&mut self, pos: Position, kind: TileKind) -> Result<(), MapError> {
        self.check_bounds(pos)?;
        self.grid[pos.row][pos.col] = self.registry.stamp(kind);
        Ok(())
    }

    /// Free for an enemy or shrine: walkable and not a marker
    pub fn is_empty(&self, pos: Position) -> bool {
        self.tile_at(pos)
            .is_some_and(|tile| tile.is_walkable() && !tile.kind().is_marker())
    }

    /// Put the player marker on the start cell, remembering the terrain there
    pub fn place_player(&mut self) {
        let (row, col) = PLAYER_START;
        let start = Position::new(row, col);
        let player = self.registry.get(TileKind::Player);
        let current = &self.grid[start.row][start.col];
        if !Rc::ptr_eq(current, &player) {
            self.player_previous_tile = current.clone();
        }
        self.grid[start.row][start.col] = player;
        self.player_pos = start;
    }

    /// Move the player marker from `old` to `new`.
    ///
    /// Restores the remembered terrain at `old` and remembers what was at
    /// `new`. Walkability is the caller's business.
    pub fn update_player_position(&mut self, old: Position, new: Position) -> Result<(), MapError> {
        self.check_bounds(old)?;
        self.check_bounds(new)?;
        self.grid[old.row][old.col] = self.player_previous_tile.clone();
        self.player_previous_tile = self.grid[new.row][new.col].clone();
        self.grid[new.row][new.col] = self.registry.get(TileKind::Player);
        self.player_pos = new;
        Ok(())
    }

    /// Place each enemy on a random empty interior cell
    pub fn place_enemies<R: RandomSource + ?Sized>(
        &mut self,
        enemies: Vec<Character>,
        rng: &mut R,
    ) -> Result<(), MapError> {
        let marker = self.registry.get(TileKind::Enemy);
        for mut enemy in enemies {
            let pos = generation::find_cell(self, rng, &enemy.name, |tile| {
                tile.is_walkable() && !tile.kind().is_marker()
            })?;
            if let Some(state) = enemy.enemy_state_mut() {
                state.pos = Some(pos);
                state.underlying_tile = Some(self.grid[pos.row][pos.col].clone());
            }
            self.grid[pos.row][pos.col] = marker.clone();
            log::debug!("placed {} at {}", enemy.name, pos);
            self.enemies.push(enemy);
        }
        Ok(())
    }

    pub fn enemy_at(&self, pos: Position) -> Option<&Character> {
        self.enemies.iter().find(|e| e.position() == Some(pos))
    }

    pub fn enemy_at_mut(&mut self, pos: Position) -> Option<&mut Character> {
        self.enemies.iter_mut().find(|e| e.position() == Some(pos))
    }

    /// Lift the enemy at `pos` out of the live list. Its marker stays on
    /// the grid until [`Map::clear_enemy_marker`] or [`Map::return_enemy`].
    pub fn take_enemy_at(&mut self, pos: Position) -> Option<Character> {
        let index = self
            .enemies
            .iter()
            .position(|e| e.position() == Some(pos))?;
        Some(self.enemies.remove(index))
    }

    /// Put an enemy taken with [`Map::take_enemy_at`] back in the live list
    pub fn return_enemy(&mut self, enemy: Character) {
        self.enemies.push(enemy);
    }

    /// Replace an enemy's marker with the terrain it was hiding
    pub fn clear_enemy_marker(&mut self, enemy: &Character) {
        let Some(state) = enemy.enemy_state() else {
            return;
        };
        if let (Some(pos), Some(tile)) = (state.pos, &state.underlying_tile) {
            if self.in_bounds(pos) {
                self.grid[pos.row][pos.col] = tile.clone();
            }
        }
    }

    /// Remove a defeated enemy: drop it from the live list and restore its
    /// terrain
    pub fn remove_enemy(&mut self, pos: Position) -> Option<Character> {
        let enemy = self.take_enemy_at(pos)?;
        self.clear_enemy_marker(&enemy);
        Some(enemy)
    }

    /// Raise the boss shrine on a random empty cell
    pub fn spawn_shrine<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Position, MapError> {
        let pos = generation::find_cell(self, rng, "shrine", |tile| {
            tile.is_walkable() && !tile.kind().is_marker()
        })?;
        self.grid[pos.row][pos.col] = self.registry.get(TileKind::Shrine);
        self.boss_spawned = true;
        log::info!("a shrine appeared at {pos}");
        Ok(pos)
    }

    /// Mark the village at `pos` visited. Returns false if there is none.
    pub fn visit_village(&mut self, pos: Position) -> bool {
        match self.tile_at(pos) {
            Some(tile) if tile.kind() == TileKind::Village => {
                tile.mark_visited();
                true
            }
            _ => false,
        }
    }

    /// Number of cells holding `kind`
    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|tile| tile.kind() == kind)
            .count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rc<Tile>]> {
        self.grid.iter().map(|row| row.as_slice())
    }

    /// One line per row of display glyphs
    pub fn render_plain(&self) -> String {
        self.grid
            .iter()
            .map(|row| row.iter().map(|tile| tile.display_symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Like [`Map::render_plain`] with ANSI colors
    pub fn render_ansi(&self) -> String {
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|tile| {
                        format!(
                            "{}{}{}",
                            tile.color().ansi(),
                            tile.display_symbol(),
                            ANSI_RESET
                        )
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
