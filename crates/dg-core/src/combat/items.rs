//! Using consumables

use crate::entity::{Character, Combatant, Item, ItemEffect};
use crate::errors::{CombatError, EntityError};

/// Effect of one used item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemUse {
    Healed { item: String, amount: i32 },
    Damaged { item: String, target: String, damage: i32 },
}

impl ItemUse {
    pub fn message(&self, user: &str) -> String {
        match self {
            ItemUse::Healed { item, amount } => {
                format!("{user} used {item} and healed {amount} HP!")
            }
            ItemUse::Damaged {
                item,
                target,
                damage,
            } => format!("{target} took {damage} damage from {item}!"),
        }
    }
}

/// Apply an item's effect.
///
/// Cures restore `floor(health_max * percent / 100)` capped at max health.
/// Throwables go straight through `take_damage`; armor does not apply.
pub fn apply_item<T: Combatant + ?Sized>(item: &Item, target: &mut T) -> ItemUse {
    match item.effect {
        ItemEffect::Cure { heal_percent } => {
            let amount = target.health_max() * heal_percent / 100;
            target.heal(amount);
            ItemUse::Healed {
                item: item.name.clone(),
                amount,
            }
        }
        ItemEffect::Throwable { damage } => {
            target.take_damage(damage);
            ItemUse::Damaged {
                item: item.name.clone(),
                target: target.name().to_string(),
                damage,
            }
        }
    }
}

/// Use inventory item `index`. Cures target the hero, throwables the
/// opponent. The item is consumed on use; a throwable with no opponent is
/// refused and stays in the inventory.
pub fn use_item(
    hero: &mut Character,
    index: usize,
    opponent: Option<&mut Character>,
) -> Result<ItemUse, CombatError> {
    let items = &hero.hero_state().ok_or(EntityError::NotAHero)?.items;
    let len = items.len();
    let item = items
        .get(index)
        .ok_or(CombatError::InvalidSelection { index, len })?;

    if item.is_throwable() && opponent.is_none() {
        return Err(CombatError::ItemNotUsable {
            name: item.name.clone(),
        });
    }

    let item = hero
        .hero_state_mut()
        .ok_or(EntityError::NotAHero)?
        .items
        .remove(index);

    let outcome = match (item.effect, opponent) {
        (ItemEffect::Throwable { .. }, Some(target)) => apply_item(&item, target),
        _ => apply_item(&item, hero),
    };
    log::debug!("{}", outcome.message(&hero.name));
    Ok(outcome)
}
