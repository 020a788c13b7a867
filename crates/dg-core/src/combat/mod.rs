//! Combat system
//!
//! Attack resolution with evasion, critical hits and counter-attacks, item
//! use, escape attempts, victory rewards and the battle state machine that
//! ties them together.

mod attack;
mod battle;
mod escape;
mod items;
mod reward;

pub use attack::{
    AttackOutcome, AttackReport, AttackType, critical_damage, mitigate, resolve_attack,
};
pub use battle::{Battle, BattleAction, BattleOutcome, BattlePhase, RoundReport};
pub use escape::{EscapePolicy, attempt_escape, attempt_escape_named};
pub use items::{ItemUse, apply_item, use_item};
pub use reward::{LootChoice, VictoryRewards, claim_weapon, grant_victory_rewards, roll_item_drop};
