//! dg-core: Core game logic for Desgoblin
//!
//! This crate contains all game logic with no terminal I/O: the tile
//! registry, characters and their catalogs, seeded map generation, combat
//! and the session that ties them together. Every random draw goes through
//! a [`RandomSource`], so a seed reproduces a world exactly.

pub mod combat;
pub mod data;
pub mod entity;
pub mod errors;
pub mod map;
pub mod session;
pub mod shop;

mod consts;
mod rng;

pub use consts::*;
pub use errors::{CombatError, ConfigError, EntityError, MapError, SessionError};
pub use rng::{FixedRolls, GameRng, RandomSource};
pub use session::{
    BattleResolution, BattleTurn, Encounter, GameStatus, MoveOutcome, SeedChoice, Session,
    SessionConfig,
};
