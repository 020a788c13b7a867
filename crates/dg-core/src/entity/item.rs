//! Consumable items: cures and throwables

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use super::ItemTier;

/// What an item does when used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// Restores a percentage of the target's max health
    Cure { heal_percent: i32 },
    /// Flat damage to the target, ignoring armor
    Throwable { damage: i32 },
}

/// A consumable carried in the hero's inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub tier: ItemTier,
    /// Shop price in gold
    pub value: u32,
    pub effect: ItemEffect,
}

impl Item {
    pub fn is_cure(&self) -> bool {
        matches!(self.effect, ItemEffect::Cure { .. })
    }

    pub fn is_throwable(&self) -> bool {
        matches!(self.effect, ItemEffect::Throwable { .. })
    }
}

fn cure_name(tier: ItemTier) -> &'static str {
    match tier {
        ItemTier::Small => "Small Health Potion",
        ItemTier::Mids => "Medium Health Potion",
        ItemTier::Midh => "Strong Health Potion",
        ItemTier::Large => "Large Health Potion",
        ItemTier::Superior => "Superior Health Potion",
    }
}

fn throwable_name(tier: ItemTier) -> &'static str {
    match tier {
        ItemTier::Small => "Throwing Knife",
        ItemTier::Mids => "Bomb",
        ItemTier::Midh => "Fire Flask",
        ItemTier::Large => "Poison Dart",
        ItemTier::Superior => "Explosive Charge",
    }
}

pub fn generate_cure(tier: ItemTier) -> Item {
    let heal_percent = tier.heal_percent();
    Item {
        name: cure_name(tier).to_string(),
        description: format!("Heals {heal_percent}% of max health."),
        tier,
        value: tier.cure_value(),
        effect: ItemEffect::Cure { heal_percent },
    }
}

pub fn generate_throwable(tier: ItemTier) -> Item {
    let damage = tier.throwable_damage();
    Item {
        name: throwable_name(tier).to_string(),
        description: "Deals damage to an enemy.".to_string(),
        tier,
        value: damage as u32,
        effect: ItemEffect::Throwable { damage },
    }
}

/// Materialize an item from its display name
pub fn item_from_name(name: &str) -> Option<Item> {
    ItemTier::iter().find_map(|tier| {
        if cure_name(tier) == name {
            Some(generate_cure(tier))
        } else if throwable_name(tier) == name {
            Some(generate_throwable(tier))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cure_table() {
        let cure = generate_cure(ItemTier::Midh);
        assert_eq!(cure.name, "Strong Health Potion");
        assert_eq!(cure.value, 35);
        assert_eq!(cure.effect, ItemEffect::Cure { heal_percent: 50 });
        assert_eq!(cure.description, "Heals 50% of max health.");
        assert!(cure.is_cure());
    }

    #[test]
    fn test_throwable_value_equals_damage() {
        for tier in ItemTier::iter() {
            let item = generate_throwable(tier);
            match item.effect {
                ItemEffect::Throwable { damage } => assert_eq!(item.value, damage as u32),
                ItemEffect::Cure { .. } => panic!("expected throwable"),
            }
        }
    }

    #[test]
    fn test_item_from_name() {
        let bomb = item_from_name("Bomb").unwrap();
        assert_eq!(bomb.tier, ItemTier::Mids);
        assert!(bomb.is_throwable());

        let potion = item_from_name("Superior Health Potion").unwrap();
        assert_eq!(potion.effect, ItemEffect::Cure { heal_percent: 100 });

        assert!(item_from_name("Legendary Sword").is_none());
        assert!(item_from_name("").is_none());
    }
}
