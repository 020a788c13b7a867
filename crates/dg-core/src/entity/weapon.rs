//! Weapons and the per-tier weapon catalogs

use serde::{Deserialize, Serialize};

use super::Tier;
use crate::errors::EntityError;
use crate::rng::RandomSource;

/// An equippable weapon. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    /// Free-form category ("blade", "blunt", "natural", ...)
    pub kind: String,
    pub damage: i32,
    /// Scrap value in gold
    pub value: u32,
    pub tier: Tier,
}

impl Weapon {
    pub fn new(name: &str, kind: &str, damage: i32, value: u32, tier: Tier) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            damage,
            value,
            tier,
        }
    }

    /// The hero's starting weapon
    pub fn fists() -> Self {
        Self::new("Fists", "blunt", 2, 0, Tier::Low)
    }

    /// Copy with damage multiplied by `percent / 100`, truncated
    pub fn scaled(&self, percent: u32) -> Weapon {
        Weapon {
            damage: super::enemy::scale_percent(self.damage, percent),
            ..self.clone()
        }
    }

    /// "Longsword (Mid)"
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.tier.label())
    }
}

/// Catalog row
#[derive(Debug, Clone, Copy)]
struct WeaponTemplate {
    name: &'static str,
    kind: &'static str,
    damage: i32,
    value: u32,
}

const fn w(name: &'static str, kind: &'static str, damage: i32, value: u32) -> WeaponTemplate {
    WeaponTemplate {
        name,
        kind,
        damage,
        value,
    }
}

const LOW_WEAPONS: &[WeaponTemplate] = &[
    w("Rusty Dagger", "blade", 5, 10),
    w("Wooden Club", "blunt", 6, 8),
    w("Short Sword", "blade", 7, 15),
    w("Hand Axe", "axe", 7, 14),
    w("Sling", "ranged", 5, 9),
    w("Spear", "polearm", 8, 16),
];

const MID_WEAPONS: &[WeaponTemplate] = &[
    w("Longsword", "blade", 12, 40),
    w("Mace", "blunt", 13, 38),
    w("Battle Axe", "axe", 14, 45),
    w("War Pick", "blunt", 12, 36),
    w("Crossbow", "ranged", 13, 42),
    w("Halberd", "polearm", 15, 50),
];

const HIGH_WEAPONS: &[WeaponTemplate] = &[
    w("Greatsword", "blade", 20, 90),
    w("War Hammer", "blunt", 22, 95),
    w("Dragon Glaive", "polearm", 24, 110),
    w("Runed Axe", "axe", 21, 100),
    w("Elven Longbow", "ranged", 19, 85),
];

fn catalog(tier: Tier) -> Result<&'static [WeaponTemplate], EntityError> {
    match tier {
        Tier::Low => Ok(LOW_WEAPONS),
        Tier::Mid => Ok(MID_WEAPONS),
        Tier::High => Ok(HIGH_WEAPONS),
        Tier::Boss => Err(EntityError::InvalidTier(tier.to_string())),
    }
}

/// Pick a weapon from the tier's catalog, damage scaled by `1 + 0.1 * cycle`
pub fn generate_weapon<R: RandomSource + ?Sized>(
    tier: Tier,
    cycle: u32,
    rng: &mut R,
) -> Result<Weapon, EntityError> {
    let table = catalog(tier)?;
    let template = table[rng.pick_index(table.len())];
    Ok(Weapon {
        name: template.name.to_string(),
        kind: template.kind.to_string(),
        damage: super::enemy::scale_percent(template.damage, 100 + 10 * cycle),
        value: template.value,
        tier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedRolls, GameRng};

    #[test]
    fn test_fists() {
        let fists = Weapon::fists();
        assert_eq!(fists.name, "Fists");
        assert_eq!(fists.kind, "blunt");
        assert_eq!(fists.damage, 2);
        assert_eq!(fists.value, 0);
    }

    #[test]
    fn test_generate_weapon_from_catalog() {
        let mut rolls = FixedRolls::new([0]);
        let weapon = generate_weapon(Tier::Mid, 0, &mut rolls).unwrap();
        assert_eq!(weapon.name, "Longsword");
        assert_eq!(weapon.damage, 12);
        assert_eq!(weapon.tier, Tier::Mid);
    }

    #[test]
    fn test_cycle_scaling_truncates() {
        let mut rolls = FixedRolls::new([0]);
        // 5 * 1.3 = 6.5
        let weapon = generate_weapon(Tier::Low, 3, &mut rolls).unwrap();
        assert_eq!(weapon.damage, 6);
    }

    #[test]
    fn test_boss_tier_rejected() {
        let mut rng = GameRng::new(1);
        assert_eq!(
            generate_weapon(Tier::Boss, 0, &mut rng),
            Err(EntityError::InvalidTier("boss".to_string()))
        );
    }

    #[test]
    fn test_scaled_and_display() {
        let weapon = Weapon::new("Mace", "blunt", 13, 38, Tier::Mid);
        assert_eq!(weapon.scaled(140).damage, 18);
        assert_eq!(weapon.scaled(140).value, 38);
        assert_eq!(weapon.display_name(), "Mace (Mid)");
    }

    #[test]
    fn test_all_tiers_generate() {
        let mut rng = GameRng::new(11);
        for tier in [Tier::Low, Tier::Mid, Tier::High] {
            for _ in 0..20 {
                let weapon = generate_weapon(tier, 0, &mut rng).unwrap();
                assert!(weapon.damage > 0);
                assert_eq!(weapon.tier, tier);
            }
        }
    }
}
