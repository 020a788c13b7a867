//! Character representation shared by the hero, enemies and bosses
//!
//! A single [`Character`] carries the combat stats every fighter has. The
//! [`Role`] tag holds what only one kind of character needs: the hero's
//! purse, inventory and progression, or an enemy's tier and the terrain it
//! hides. Combat code works against the [`Combatant`] capability, which is
//! implemented once for `Character`.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::{Item, Tier, Weapon};
use crate::consts::COUNTER_CHANCE;
use crate::data::Tile;
use crate::map::Position;

/// Hero-only state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroState {
    pub cashpile: u32,
    /// Consumables, in pickup order
    pub items: Vec<Item>,
    /// Reserved for armor and accessories; nothing fills it yet
    pub equipment: Vec<String>,
    pub pos: Position,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
}

/// Enemy-only state
#[derive(Debug, Clone)]
pub struct EnemyState {
    pub tier: Tier,
    /// Set once the enemy is placed on a map
    pub pos: Option<Position>,
    /// Terrain the enemy marker covers, restored when the enemy leaves
    pub underlying_tile: Option<Rc<Tile>>,
}

impl EnemyState {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            pos: None,
            underlying_tile: None,
        }
    }
}

/// Boss extras. Skills are flavour only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossTraits {
    pub skills: Vec<String>,
    /// Item names handed to the hero on defeat
    pub drops: Vec<String>,
}

/// Which kind of character this is
#[derive(Debug, Clone)]
pub enum Role {
    Hero(HeroState),
    Enemy(EnemyState),
    Boss(EnemyState, BossTraits),
}

/// A fighter
#[derive(Debug, Clone)]
pub struct Character {
    pub name: String,
    pub health: i32,
    pub health_max: i32,
    pub evade_ch: i32,
    pub crit_ch: i32,
    pub counter_ch: i32,
    pub armor: i32,
    pub weapon: Weapon,
    pub role: Role,
}

impl Character {
    pub fn new(
        name: &str,
        health: i32,
        weapon: Weapon,
        evade_ch: i32,
        crit_ch: i32,
        armor: i32,
        role: Role,
    ) -> Self {
        let health = health.max(0);
        Self {
            name: name.to_string(),
            health,
            health_max: health,
            evade_ch,
            crit_ch,
            counter_ch: COUNTER_CHANCE,
            armor,
            weapon,
            role,
        }
    }

    pub fn is_hero(&self) -> bool {
        matches!(self.role, Role::Hero(_))
    }

    pub fn is_boss(&self) -> bool {
        matches!(self.role, Role::Boss(..))
    }

    pub fn hero_state(&self) -> Option<&HeroState> {
        match &self.role {
            Role::Hero(state) => Some(state),
            _ => None,
        }
    }

    pub fn hero_state_mut(&mut self) -> Option<&mut HeroState> {
        match &mut self.role {
            Role::Hero(state) => Some(state),
            _ => None,
        }
    }

    /// Enemy state for both regular enemies and bosses
    pub fn enemy_state(&self) -> Option<&EnemyState> {
        match &self.role {
            Role::Enemy(state) | Role::Boss(state, _) => Some(state),
            Role::Hero(_) => None,
        }
    }

    pub fn enemy_state_mut(&mut self) -> Option<&mut EnemyState> {
        match &mut self.role {
            Role::Enemy(state) | Role::Boss(state, _) => Some(state),
            Role::Hero(_) => None,
        }
    }

    pub fn boss_traits(&self) -> Option<&BossTraits> {
        match &self.role {
            Role::Boss(_, traits) => Some(traits),
            _ => None,
        }
    }

    /// Tier of an enemy or boss; the hero has none
    pub fn tier(&self) -> Option<Tier> {
        self.enemy_state().map(|state| state.tier)
    }

    /// Map position, if the character has one
    pub fn position(&self) -> Option<Position> {
        match &self.role {
            Role::Hero(state) => Some(state.pos),
            Role::Enemy(state) | Role::Boss(state, _) => state.pos,
        }
    }

    /// "Name: 42/150 HP"
    pub fn status_line(&self) -> String {
        format!("{}: {}/{} HP", self.name, self.health, self.health_max)
    }
}

/// What combat needs from a fighter
pub trait Combatant {
    fn name(&self) -> &str;
    fn weapon(&self) -> &Weapon;
    fn health(&self) -> i32;
    fn health_max(&self) -> i32;
    fn set_health(&mut self, health: i32);
    fn evade_chance(&self) -> i32;
    fn crit_chance(&self) -> i32;
    fn counter_chance(&self) -> i32;
    fn armor(&self) -> i32;

    fn alive(&self) -> bool {
        self.health() > 0
    }

    /// Lose `damage` health, never dropping below zero
    fn take_damage(&mut self, damage: i32) {
        let health = (self.health() - damage.max(0)).clamp(0, self.health_max());
        self.set_health(health);
    }

    /// Restore up to `amount` health, capped at max. Returns what was restored.
    fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health();
        let health = (before + amount.max(0)).min(self.health_max());
        self.set_health(health);
        health - before
    }
}

impl Combatant for Character {
    fn name(&self) -> &str {
        &self.name
    }

    fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn health_max(&self) -> i32 {
        self.health_max
    }

    fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.health_max);
    }

    fn evade_chance(&self) -> i32 {
        self.evade_ch
    }

    fn crit_chance(&self) -> i32 {
        self.crit_ch
    }

    fn counter_chance(&self) -> i32 {
        self.counter_ch
    }

    fn armor(&self) -> i32 {
        self.armor
    }
}
