//! Characters, weapons and items

mod character;
mod enemy;
mod hero;
mod item;
mod tier;
mod weapon;

pub use character::{BossTraits, Character, Combatant, EnemyState, HeroState, Role};
pub use enemy::{boss_count, boss_for_round, generate_boss, generate_enemy, generate_enemy_named};
pub use hero::LevelUp;
pub use item::{Item, ItemEffect, generate_cure, generate_throwable, item_from_name};
pub use tier::{ItemTier, Tier, escape_chance_for_tier_name, experience_for_tier_name};
pub use weapon::{Weapon, generate_weapon};
