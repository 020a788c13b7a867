//! Core game constants

/// Default map dimensions
pub const MAP_WIDTH: usize = 35;
pub const MAP_HEIGHT: usize = 25;

/// Largest seed a player may choose
pub const MAX_SEED: u64 = 1_000_000;

/// Where the player appears on every new map (row, col)
pub const PLAYER_START: (usize, usize) = (1, 1);

/// Rejection-sampling budget for any single placement
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 10_000;

/// Counter-attack chance shared by every character (percent)
pub const COUNTER_CHANCE: i32 = 20;

/// Hero starting stats
pub const HERO_NAME: &str = "Hero";
pub const HERO_HEALTH: i32 = 150;
pub const HERO_EVADE: i32 = 10;
pub const HERO_CRIT: i32 = 15;
pub const HERO_ARMOR: i32 = 5;
pub const HERO_FIRST_THRESHOLD: u32 = 100;

/// Level-up gains
pub const LEVEL_UP_HEALTH: i32 = 10;
pub const LEVEL_UP_STAT: i32 = 1;

/// Enemy batch composition per map (low, mid, high)
pub const LOW_TIER_BATCH: usize = 6;
pub const MID_TIER_BATCH: usize = 4;
pub const HIGH_TIER_BATCH: usize = 2;

/// Bosses to defeat before the game is won
pub const TOTAL_BOSSES: u32 = 10;

/// Deaths allowed on one seed before a new seed is forced
pub const MAX_RETRIES_PER_SEED: u32 = 5;

/// Loot rolls (percent)
pub const ITEM_DROP_CHANCE: i32 = 50;
pub const CURE_DROP_SHARE: i32 = 50;

/// Gold in a treasure chest
pub const TREASURE_GOLD: u32 = 100;

/// Lines of battle log shown at once
pub const BATTLE_LOG_LINES: usize = 5;
