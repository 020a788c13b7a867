//! Village services: resting, the weapon smith and the item shop

use crate::entity::{
    Character, Item, ItemTier, Tier, Weapon, generate_cure, generate_throwable, generate_weapon,
};
use crate::errors::{CombatError, EntityError, SessionError};
use crate::rng::RandomSource;

/// Weapons stocked per tier (low, mid, high)
const WEAPON_STOCK: [(Tier, usize); 3] = [(Tier::Low, 5), (Tier::Mid, 4), (Tier::High, 2)];

/// Heal the hero to full
pub fn rest(hero: &mut Character) {
    hero.full_heal();
    log::debug!("{} rested", hero.name);
}

/// A village's wares, rolled when the hero walks in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shop {
    weapons: Vec<Weapon>,
    items: Vec<Item>,
}

impl Shop {
    pub fn stock<R: RandomSource + ?Sized>(rng: &mut R) -> Result<Shop, EntityError> {
        let mut weapons = Vec::new();
        for (tier, count) in WEAPON_STOCK {
            for _ in 0..count {
                weapons.push(generate_weapon(tier, 0, rng)?);
            }
        }
        let items = vec![
            generate_cure(ItemTier::Small),
            generate_cure(ItemTier::Mids),
            generate_cure(ItemTier::Midh),
            generate_throwable(ItemTier::Small),
            generate_throwable(ItemTier::Mids),
        ];
        Ok(Shop { weapons, items })
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    fn charge(hero: &mut Character, price: u32) -> Result<(), SessionError> {
        if !hero.spend_gold(price)? {
            return Err(SessionError::InsufficientFunds {
                price,
                cashpile: hero.cashpile(),
            });
        }
        Ok(())
    }

    /// Buy and equip weapon `index`, scrapping the old one. The weapon
    /// leaves the stock.
    pub fn buy_weapon(
        &mut self,
        hero: &mut Character,
        index: usize,
    ) -> Result<Weapon, SessionError> {
        let len = self.weapons.len();
        let price = self
            .weapons
            .get(index)
            .ok_or(CombatError::InvalidSelection { index, len })?
            .value;
        Self::charge(hero, price)?;
        let weapon = self.weapons.remove(index);
        hero.equip_weapon(weapon.clone())?;
        log::info!("{} bought {} for {} gold", hero.name, weapon.name, price);
        Ok(weapon)
    }

    /// Buy item `index` into the inventory. Items never run out.
    pub fn buy_item(&self, hero: &mut Character, index: usize) -> Result<Item, SessionError> {
        let item = self.items.get(index).ok_or(CombatError::InvalidSelection {
            index,
            len: self.items.len(),
        })?;
        Self::charge(hero, item.value)?;
        hero.add_item(item.clone())?;
        Ok(item.clone())
    }
}
