//! Power brackets for enemies, weapons and items

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::rng::RandomSource;

/// Difficulty bracket driving stats, loot quality and experience
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Tier {
    Low,
    Mid,
    High,
    Boss,
}

impl Tier {
    /// Experience for defeating an enemy of this tier
    pub const fn experience_reward(&self) -> u32 {
        match self {
            Tier::Low => 50,
            Tier::Mid => 100,
            Tier::High => 200,
            Tier::Boss => 0,
        }
    }

    /// Percent chance to flee from an enemy of this tier
    pub const fn escape_chance(&self) -> i32 {
        match self {
            Tier::Low => 60,
            Tier::Mid => 40,
            Tier::High => 20,
            Tier::Boss => 0,
        }
    }

    /// Quality of an item dropped by an enemy of this tier
    pub fn drop_item_tier<R: RandomSource + ?Sized>(&self, rng: &mut R) -> ItemTier {
        match self {
            Tier::Low => ItemTier::Small,
            Tier::Mid => {
                if rng.pick_index(2) == 0 {
                    ItemTier::Mids
                } else {
                    ItemTier::Midh
                }
            }
            Tier::High => ItemTier::Large,
            Tier::Boss => ItemTier::Superior,
        }
    }

    /// Title-cased label for display
    pub const fn label(&self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Mid => "Mid",
            Tier::High => "High",
            Tier::Boss => "Boss",
        }
    }
}

/// Experience for a tier given by name; unknown names are worth nothing
pub fn experience_for_tier_name(name: &str) -> u32 {
    name.parse::<Tier>().map_or(0, |tier| tier.experience_reward())
}

/// Escape chance for a tier given by name; unknown names cannot be fled
pub fn escape_chance_for_tier_name(name: &str) -> i32 {
    name.parse::<Tier>().map_or(0, |tier| tier.escape_chance())
}

/// Consumable quality ladder
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ItemTier {
    Small,
    Mids,
    Midh,
    Large,
    Superior,
}

impl ItemTier {
    /// Percent of max health restored by a cure
    pub const fn heal_percent(&self) -> i32 {
        match self {
            ItemTier::Small => 15,
            ItemTier::Mids => 30,
            ItemTier::Midh => 50,
            ItemTier::Large => 70,
            ItemTier::Superior => 100,
        }
    }

    /// Shop price of a cure
    pub const fn cure_value(&self) -> u32 {
        match self {
            ItemTier::Small => 10,
            ItemTier::Mids => 20,
            ItemTier::Midh => 35,
            ItemTier::Large => 50,
            ItemTier::Superior => 75,
        }
    }

    /// Flat damage of a throwable (also its price)
    pub const fn throwable_damage(&self) -> i32 {
        match self {
            ItemTier::Small => 10,
            ItemTier::Mids => 20,
            ItemTier::Midh => 35,
            ItemTier::Large => 50,
            ItemTier::Superior => 75,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::FixedRolls;

    #[test]
    fn test_experience_by_tier() {
        assert_eq!(Tier::Low.experience_reward(), 50);
        assert_eq!(Tier::Mid.experience_reward(), 100);
        assert_eq!(Tier::High.experience_reward(), 200);
        assert_eq!(Tier::Boss.experience_reward(), 0);
    }

    #[test]
    fn test_experience_by_name() {
        assert_eq!(experience_for_tier_name("high"), 200);
        assert_eq!(experience_for_tier_name("mid"), 100);
        assert_eq!(experience_for_tier_name("low"), 50);
        assert_eq!(experience_for_tier_name("legendary"), 0);
        assert_eq!(experience_for_tier_name(""), 0);
    }

    #[test]
    fn test_escape_chance_by_name() {
        assert_eq!(escape_chance_for_tier_name("low"), 60);
        assert_eq!(escape_chance_for_tier_name("MID"), 40);
        assert_eq!(escape_chance_for_tier_name("high"), 20);
        assert_eq!(escape_chance_for_tier_name("boss"), 0);
        assert_eq!(escape_chance_for_tier_name("dragon"), 0);
    }

    #[test]
    fn test_drop_tier_mapping() {
        let mut rolls = FixedRolls::new([0, 1]);
        assert_eq!(Tier::Low.drop_item_tier(&mut rolls), ItemTier::Small);
        assert_eq!(Tier::High.drop_item_tier(&mut rolls), ItemTier::Large);
        assert_eq!(Tier::Boss.drop_item_tier(&mut rolls), ItemTier::Superior);
        assert_eq!(Tier::Mid.drop_item_tier(&mut rolls), ItemTier::Mids);
        assert_eq!(Tier::Mid.drop_item_tier(&mut rolls), ItemTier::Midh);
    }

    #[test]
    fn test_tier_strings() {
        assert_eq!(Tier::High.to_string(), "high");
        assert_eq!("Boss".parse::<Tier>(), Ok(Tier::Boss));
        assert_eq!("midh".parse::<ItemTier>(), Ok(ItemTier::Midh));
    }
}
