//! Victory payout: experience, item drops and weapon loot

use crate::consts::{CURE_DROP_SHARE, ITEM_DROP_CHANCE};
use crate::entity::{
    Character, Item, LevelUp, Tier, Weapon, generate_cure, generate_throwable, item_from_name,
};
use crate::errors::EntityError;
use crate::rng::RandomSource;

/// What to do with a defeated enemy's weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootChoice {
    /// Equip it, scrapping the current weapon
    PickUp,
    /// Sell it on the spot
    Scrap,
}

/// Everything a victory paid out
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VictoryRewards {
    pub experience: u32,
    pub level_ups: Vec<LevelUp>,
    /// Random drop, already added to the inventory
    pub item: Option<Item>,
    /// Boss drops, already added to the inventory
    pub boss_drops: Vec<Item>,
    /// Weapon offered to the hero, awaiting [`claim_weapon`]
    pub weapon: Option<Weapon>,
}

/// Roll for a consumable: 50% nothing drops; otherwise cure or throwable
/// evenly, its quality following the enemy tier
pub fn roll_item_drop<R: RandomSource + ?Sized>(tier: Tier, rng: &mut R) -> Option<Item> {
    if !rng.roll_under(ITEM_DROP_CHANCE) {
        return None;
    }
    let cure = rng.roll_under(CURE_DROP_SHARE);
    let quality = tier.drop_item_tier(rng);
    Some(if cure {
        generate_cure(quality)
    } else {
        generate_throwable(quality)
    })
}

/// Pay the hero for defeating `enemy`.
///
/// Regular enemies give experience by tier, a drop roll and their weapon as
/// loot. Bosses give their named drops instead; names with no matching item
/// are skipped.
pub fn grant_victory_rewards<R: RandomSource + ?Sized>(
    hero: &mut Character,
    enemy: &Character,
    rng: &mut R,
) -> Result<VictoryRewards, EntityError> {
    if !hero.is_hero() {
        return Err(EntityError::NotAHero);
    }
    let tier = enemy.tier().unwrap_or(Tier::Boss);
    let mut rewards = VictoryRewards {
        experience: tier.experience_reward(),
        ..VictoryRewards::default()
    };
    rewards.level_ups = hero.gain_experience(rewards.experience)?;

    if let Some(traits) = enemy.boss_traits() {
        for name in &traits.drops {
            match item_from_name(name) {
                Some(item) => {
                    hero.add_item(item.clone())?;
                    rewards.boss_drops.push(item);
                }
                None => log::warn!("{} dropped unknown item {:?}, skipped", enemy.name, name),
            }
        }
    } else {
        rewards.item = roll_item_drop(tier, rng);
        if let Some(item) = &rewards.item {
            hero.add_item(item.clone())?;
        }
        rewards.weapon = Some(enemy.weapon.clone());
    }

    log::info!(
        "{} defeated {} (+{} xp)",
        hero.name,
        enemy.name,
        rewards.experience
    );
    Ok(rewards)
}

/// Settle weapon loot. Returns the gold gained.
pub fn claim_weapon(
    hero: &mut Character,
    weapon: Weapon,
    choice: LootChoice,
) -> Result<u32, EntityError> {
    match choice {
        LootChoice::PickUp => hero.equip_weapon(weapon),
        LootChoice::Scrap => {
            hero.add_gold(weapon.value)?;
            Ok(weapon.value)
        }
    }
}
