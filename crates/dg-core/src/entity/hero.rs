//! Hero construction, purse, inventory and progression

use super::{Character, HeroState, Item, Role, Weapon};
use crate::consts::{
    HERO_ARMOR, HERO_CRIT, HERO_EVADE, HERO_FIRST_THRESHOLD, LEVEL_UP_HEALTH, LEVEL_UP_STAT,
    PLAYER_START,
};
use crate::errors::EntityError;
use crate::map::Position;

/// One level gained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    pub health_max: i32,
    /// Experience needed for the following level
    pub next_threshold: u32,
}

impl Character {
    /// A fresh hero at the start position, fighting bare-handed
    pub fn new_hero(name: &str, health: i32) -> Character {
        let (row, col) = PLAYER_START;
        Character::new(
            name,
            health,
            Weapon::fists(),
            HERO_EVADE,
            HERO_CRIT,
            HERO_ARMOR,
            Role::Hero(HeroState {
                cashpile: 0,
                items: Vec::new(),
                equipment: Vec::new(),
                pos: Position::new(row, col),
                level: 1,
                experience: 0,
                experience_to_next_level: HERO_FIRST_THRESHOLD,
            }),
        )
    }

    fn require_hero(&mut self) -> Result<&mut HeroState, EntityError> {
        self.hero_state_mut().ok_or(EntityError::NotAHero)
    }

    /// Add experience and level up as many times as it pays for.
    ///
    /// Each level costs the current threshold, grows the next threshold by
    /// half, adds max health (fully healing) and one point of evade, crit and
    /// armor.
    pub fn gain_experience(&mut self, amount: u32) -> Result<Vec<LevelUp>, EntityError> {
        self.require_hero()?.experience += amount;

        let mut gained = Vec::new();
        loop {
            let state = self.require_hero()?;
            if state.experience < state.experience_to_next_level {
                break;
            }
            state.experience -= state.experience_to_next_level;
            state.level += 1;
            state.experience_to_next_level = state.experience_to_next_level * 3 / 2;
            let level = state.level;
            let next_threshold = state.experience_to_next_level;

            self.health_max += LEVEL_UP_HEALTH;
            self.health = self.health_max;
            self.evade_ch += LEVEL_UP_STAT;
            self.crit_ch += LEVEL_UP_STAT;
            self.armor += LEVEL_UP_STAT;

            log::info!("{} reached level {}", self.name, level);
            gained.push(LevelUp {
                level,
                health_max: self.health_max,
                next_threshold,
            });
        }
        Ok(gained)
    }

    /// Equip `weapon`, scrapping the old one. Returns the gold received.
    pub fn equip_weapon(&mut self, weapon: Weapon) -> Result<u32, EntityError> {
        let scrap = self.weapon.value;
        self.require_hero()?.cashpile += scrap;
        self.weapon = weapon;
        Ok(scrap)
    }

    pub fn add_gold(&mut self, amount: u32) -> Result<u32, EntityError> {
        let state = self.require_hero()?;
        state.cashpile += amount;
        Ok(state.cashpile)
    }

    /// Take `amount` from the purse if there is enough
    pub fn spend_gold(&mut self, amount: u32) -> Result<bool, EntityError> {
        let state = self.require_hero()?;
        if state.cashpile < amount {
            return Ok(false);
        }
        state.cashpile -= amount;
        Ok(true)
    }

    pub fn add_item(&mut self, item: Item) -> Result<(), EntityError> {
        self.require_hero()?.items.push(item);
        Ok(())
    }

    /// Hero's purse, 0 for anyone else
    pub fn cashpile(&self) -> u32 {
        self.hero_state().map_or(0, |state| state.cashpile)
    }

    pub fn items(&self) -> &[Item] {
        self.hero_state()
            .map(|state| state.items.as_slice())
            .unwrap_or_default()
    }

    pub fn full_heal(&mut self) {
        self.health = self.health_max;
    }
}
