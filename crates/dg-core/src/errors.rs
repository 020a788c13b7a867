//! Error types for the map, entity, combat and session layers

use thiserror::Error;

/// Map generation and grid bookkeeping failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("could not place {target} after {attempts} attempts")]
    PlacementFailed { target: String, attempts: u32 },

    #[error("map of {width}x{height} has no interior (minimum is 3x3)")]
    InvalidDimensions { width: usize, height: usize },

    #[error("placement attempt cap must be at least 1")]
    NoPlacementAttempts,

    #[error("position ({row}, {col}) is outside the map")]
    OutOfBounds { row: usize, col: usize },
}

/// Entity catalog and progression failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    #[error("invalid tier for enemy generation: {0}")]
    InvalidTier(String),

    #[error("character is not the hero")]
    NotAHero,

    #[error("no boss at catalog index {0}")]
    UnknownBoss(usize),
}

/// Battle and item-use failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("invalid selection {index} (have {len})")]
    InvalidSelection { index: usize, len: usize },

    #[error("{name} cannot be used here")]
    ItemNotUsable { name: String },

    #[error("the battle is already over")]
    BattleOver,

    #[error(transparent)]
    Entity(#[from] EntityError),
}

/// Game-session failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("seed {0} is out of range (0 - {max})", max = crate::MAX_SEED)]
    InvalidSeed(u64),

    #[error("retry limit exceeded for seed {seed} ({deaths} deaths)")]
    RetryLimitExceeded { seed: u64, deaths: u32 },

    #[error("no battle in progress")]
    NoActiveBattle,

    #[error("a battle is in progress")]
    BattleInProgress,

    #[error("nothing to loot")]
    NoPendingLoot,

    #[error("a looted weapon must be picked up or scrapped first")]
    LootPending,

    #[error("not enough gold: costs {price}, have {cashpile}")]
    InsufficientFunds { price: u32, cashpile: u32 },

    #[error("the hero is not in a village")]
    NotInVillage,

    #[error("the game is over")]
    GameOver,

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Combat(#[from] CombatError),
}

/// Loading a session configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] MapError),
}
