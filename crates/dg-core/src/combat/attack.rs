//! Attack resolution: evasion, damage roll, critical hits, armor and
//! counter-attacks

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::entity::Combatant;
use crate::rng::RandomSource;

/// How the attacker swings
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
pub enum AttackType {
    /// 0.8x to 1.2x weapon damage
    #[default]
    Normal,
    /// 0.6x to 1.2x weapon damage
    Quick,
    /// 0.8x to 1.5x weapon damage
    Heavy,
}

impl AttackType {
    /// Inclusive damage range for a weapon of `damage`.
    ///
    /// Bounds are truncated; a range that collapses is widened to
    /// `min..=min + 1`.
    pub fn damage_range(&self, damage: i32) -> (i32, i32) {
        let min = match self {
            AttackType::Quick => damage * 6 / 10,
            AttackType::Normal | AttackType::Heavy => damage * 8 / 10,
        };
        let max = match self {
            AttackType::Heavy => damage * 15 / 10,
            AttackType::Normal | AttackType::Quick => damage * 12 / 10,
        };
        if max <= min { (min, min + 1) } else { (min, max) }
    }
}

/// What happened to a single swing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The attacker was already down
    CannotAttack,
    Evaded,
    Hit { damage: i32, critical: bool },
}

/// Result of one attack, including the counter-attack it provoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackReport {
    pub outcome: AttackOutcome,
    /// Present when the defender struck back
    pub counter: Option<Box<AttackReport>>,
    /// Battle-log lines, counter-attack lines included
    pub messages: Vec<String>,
}

impl AttackReport {
    fn new(outcome: AttackOutcome, messages: Vec<String>) -> Self {
        Self {
            outcome,
            counter: None,
            messages,
        }
    }

    /// Damage dealt to the defender by this swing (not the counter)
    pub fn damage(&self) -> i32 {
        match self.outcome {
            AttackOutcome::Hit { damage, .. } => damage,
            AttackOutcome::CannotAttack | AttackOutcome::Evaded => 0,
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self.outcome, AttackOutcome::Hit { critical: true, .. })
    }
}

/// Critical hits deal half again, truncated
pub fn critical_damage(damage: i32) -> i32 {
    damage * 3 / 2
}

/// Armor soaks damage but every hit does at least 1
pub fn mitigate(damage: i32, armor: i32) -> i32 {
    (damage - armor).max(1)
}

/// Resolve `attacker` hitting `defender`.
///
/// Rolls, in order: evasion (d100 against the defender's evade chance),
/// damage, critical (d100 against the attacker's crit chance) and, if the
/// defender survives, a counter (d100 against the defender's counter
/// chance). A counter is a normal attack that cannot itself be countered.
pub fn resolve_attack<A, D, R>(
    attacker: &mut A,
    defender: &mut D,
    attack_type: AttackType,
    rng: &mut R,
) -> AttackReport
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
    R: RandomSource + ?Sized,
{
    strike(attacker, defender, attack_type, false, rng)
}

fn strike<A, D, R>(
    attacker: &mut A,
    defender: &mut D,
    attack_type: AttackType,
    is_counter: bool,
    rng: &mut R,
) -> AttackReport
where
    A: Combatant + ?Sized,
    D: Combatant + ?Sized,
    R: RandomSource + ?Sized,
{
    if !attacker.alive() {
        return AttackReport::new(
            AttackOutcome::CannotAttack,
            vec![format!(
                "{} cannot attack because they are defeated.",
                attacker.name()
            )],
        );
    }

    if rng.roll_under(defender.evade_chance()) {
        return AttackReport::new(
            AttackOutcome::Evaded,
            vec![format!("{} evaded the attack!", defender.name())],
        );
    }

    let mut messages = Vec::new();
    let (min, max) = attack_type.damage_range(attacker.weapon().damage);
    let mut damage = rng.range_inclusive(min, max);

    let critical = rng.roll_under(attacker.crit_chance());
    if critical {
        damage = critical_damage(damage);
        messages.push(format!(
            "Critical hit! {} deals {} damage!",
            attacker.name(),
            damage
        ));
    }

    let damage = mitigate(damage, defender.armor());
    defender.take_damage(damage);
    messages.push(format!(
        "{} attacked {} with {} for {} damage.",
        attacker.name(),
        defender.name(),
        attacker.weapon().name,
        damage
    ));

    let mut report = AttackReport::new(AttackOutcome::Hit { damage, critical }, messages);

    if !is_counter && defender.alive() && rng.roll_under(defender.counter_chance()) {
        report
            .messages
            .push(format!("{} initiated a counter-attack!", defender.name()));
        let counter = strike(defender, attacker, AttackType::Normal, true, rng);
        report.messages.extend(counter.messages.iter().cloned());
        report.counter = Some(Box::new(counter));
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Character, EnemyState, Role, Tier, Weapon};
    use crate::rng::{FixedRolls, GameRng};

    fn test_hero(damage: i32) -> Character {
        let mut hero = Character::new_hero("Hero", 150);
        hero.weapon = Weapon::new("Short Sword", "blade", damage, 15, Tier::Low);
        hero
    }

    fn test_enemy(health: i32, armor: i32, evade: i32) -> Character {
        Character::new(
            "Goblin",
            health,
            Weapon::new("Rusty Dagger", "blade", 5, 10, Tier::Low),
            evade,
            5,
            armor,
            Role::Enemy(EnemyState::new(Tier::Low)),
        )
    }

    #[test]
    fn test_damage_ranges() {
        assert_eq!(AttackType::Normal.damage_range(10), (8, 12));
        assert_eq!(AttackType::Quick.damage_range(10), (6, 12));
        assert_eq!(AttackType::Heavy.damage_range(10), (8, 15));
        // 2 * 0.8 = 1, 2 * 1.2 = 2
        assert_eq!(AttackType::Normal.damage_range(2), (1, 2));
        // collapsed range is widened
        assert_eq!(AttackType::Normal.damage_range(1), (0, 1));
        assert_eq!(AttackType::Normal.damage_range(0), (0, 1));
    }

    #[test]
    fn test_plain_hit() {
        let mut hero = test_hero(10);
        let mut enemy = test_enemy(20, 0, 0);
        // evade fails, damage 11, crit fails, counter fails
        let mut rolls = FixedRolls::new([100, 11, 100, 100]);
        let report = resolve_attack(&mut hero, &mut enemy, AttackType::Normal, &mut rolls);
        assert_eq!(
            report.outcome,
            AttackOutcome::Hit {
                damage: 11,
                critical: false
            }
        );
        assert_eq!(enemy.health, 9);
        assert!(report.counter.is_none());
        assert_eq!(
            report.messages,
            vec!["Hero attacked Goblin with Short Sword for 11 damage."]
        );
    }

    #[test]
    fn test_critical_hit() {
        let mut hero = test_hero(10);
        let mut enemy = test_enemy(50, 2, 0);
        let mut rolls = FixedRolls::new([100, 12, 1, 100]);
        let report = resolve_attack(&mut hero, &mut enemy, AttackType::Normal, &mut rolls);
        // 12 * 1.5 = 18, minus 2 armor
        assert_eq!(report.damage(), 16);
        assert!(report.is_critical());
        assert_eq!(report.messages[0], "Critical hit! Hero deals 18 damage!");
        assert_eq!(enemy.health, 34);
    }

    #[test]
    fn test_evasion_boundaries() {
        let mut hero = test_hero(10);
        let mut enemy = test_enemy(20, 0, 100);
        let mut rng = GameRng::new(1);
        for _ in 0..50 {
            let report = resolve_attack(&mut hero, &mut enemy, AttackType::Normal, &mut rng);
            assert_eq!(report.outcome, AttackOutcome::Evaded);
            assert_eq!(report.messages, vec!["Goblin evaded the attack!"]);
        }
        assert_eq!(enemy.health, 20);

        let mut enemy = test_enemy(10_000, 0, 0);
        for _ in 0..50 {
            let report = resolve_attack(&mut hero, &mut enemy, AttackType::Normal, &mut rng);
            assert_ne!(report.outcome, AttackOutcome::Evaded);
        }
    }

    #[test]
    fn test_armor_floor() {
        let mut hero = test_hero(10);
        let mut enemy = test_enemy(20, 500, 0);
        let mut rolls = FixedRolls::new([100, 8, 100, 100]);
        let report = resolve_attack(&mut hero, &mut enemy, AttackType::Heavy, &mut rolls);
        assert_eq!(report.damage(), 1);
        assert_eq!(enemy.health, 19);
    }

    #[test]
    fn test_counter_attack() {
        let mut hero = test_hero(10);
        let mut enemy = test_enemy(50, 0, 0);
        // hero hits for 10; counter roll 20 succeeds; counter: hero evade
        // roll 100 fails, damage 4, crit fails; no second counter roll
        let mut rolls = FixedRolls::new([100, 10, 100, 20, 100, 4, 100, 1]);
        let report = resolve_attack(&mut hero, &mut enemy, AttackType::Normal, &mut rolls);
        assert_eq!(enemy.health, 40);
        let counter = report.counter.as_ref().unwrap();
        // 4 - 5 armor floors at 1
        assert_eq!(counter.damage(), 1);
        assert!(counter.counter.is_none());
        assert_eq!(hero.health, 149);
        assert_eq!(rolls.remaining(), 1);
        assert_eq!(report.messages[1], "Goblin initiated a counter-attack!");
        assert_eq!(
            report.messages[2],
            "Goblin attacked Hero with Rusty Dagger for 1 damage."
        );
    }

    #[test]
    fn test_no_counter_from_the_dead() {
        let mut hero = test_hero(10);
        let mut enemy = test_enemy(5, 0, 0);
        let mut rolls = FixedRolls::new([100, 12, 100, 1]);
        let report = resolve_attack(&mut hero, &mut enemy, AttackType::Normal, &mut rolls);
        assert_eq!(enemy.health, 0);
        assert!(report.counter.is_none());
        assert_eq!(rolls.remaining(), 1);
    }

    #[test]
    fn test_defeated_cannot_attack() {
        let mut hero = test_hero(10);
        let mut enemy = test_enemy(20, 0, 0);
        hero.take_damage(1000);
        let report = resolve_attack(
            &mut hero,
            &mut enemy,
            AttackType::Normal,
            &mut GameRng::new(1),
        );
        assert_eq!(report.outcome, AttackOutcome::CannotAttack);
        assert_eq!(
            report.messages,
            vec!["Hero cannot attack because they are defeated."]
        );
        assert_eq!(enemy.health, 20);
    }

    #[test]
    fn test_attack_type_parse() {
        assert_eq!("heavy".parse::<AttackType>(), Ok(AttackType::Heavy));
        assert_eq!(AttackType::Quick.to_string(), "quick");
        assert_eq!(AttackType::default(), AttackType::Normal);
    }
}
