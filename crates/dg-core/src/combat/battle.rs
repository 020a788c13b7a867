//! Turn-based battle between the hero and one opponent
//!
//! A battle starts on the player's turn. Each call to [`Battle::act`]
//! resolves the player's action, gives the opponent its turn if it is still
//! standing, then checks whether either side is down.

use super::{AttackType, EscapePolicy, attempt_escape, resolve_attack, use_item};
use crate::consts::BATTLE_LOG_LINES;
use crate::entity::{Character, Combatant, Tier};
use crate::errors::CombatError;
use crate::rng::RandomSource;

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Victory,
    Defeat,
    Escaped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattlePhase {
    PlayerTurn,
    Ended(BattleOutcome),
}

/// The player's choice for a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleAction {
    Attack(AttackType),
    /// Inventory index
    UseItem(usize),
    Escape,
}

/// Result of one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub messages: Vec<String>,
    pub phase: BattlePhase,
}

#[derive(Debug, Clone)]
pub struct Battle {
    opponent: Character,
    phase: BattlePhase,
    policy: EscapePolicy,
    log: Vec<String>,
    rounds: u32,
}

impl Battle {
    pub fn new(opponent: Character, policy: EscapePolicy) -> Self {
        let log = vec![format!("{} appears!", opponent.name)];
        Self {
            opponent,
            phase: BattlePhase::PlayerTurn,
            policy,
            log,
            rounds: 0,
        }
    }

    pub fn opponent(&self) -> &Character {
        &self.opponent
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.phase {
            BattlePhase::Ended(outcome) => Some(outcome),
            BattlePhase::PlayerTurn => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn policy(&self) -> EscapePolicy {
        self.policy
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// The whole battle log
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// The last few log lines, oldest first
    pub fn recent_log(&self) -> &[String] {
        let start = self.log.len().saturating_sub(BATTLE_LOG_LINES);
        &self.log[start..]
    }

    /// Hand the opponent back, e.g. to return it to the map
    pub fn into_opponent(self) -> Character {
        self.opponent
    }

    /// Play one round.
    ///
    /// An invalid item choice is rejected without using up the turn.
    pub fn act<R: RandomSource + ?Sized>(
        &mut self,
        hero: &mut Character,
        action: BattleAction,
        rng: &mut R,
    ) -> Result<RoundReport, CombatError> {
        if self.is_over() {
            return Err(CombatError::BattleOver);
        }

        let mut messages = Vec::new();
        let mut opponent_acts = true;

        match action {
            BattleAction::Attack(attack_type) => {
                let report = resolve_attack(hero, &mut self.opponent, attack_type, rng);
                messages.extend(report.messages);
            }
            BattleAction::UseItem(index) => {
                let used = use_item(hero, index, Some(&mut self.opponent))?;
                messages.push(used.message(&hero.name));
            }
            BattleAction::Escape => {
                let tier = self.opponent.tier().unwrap_or(Tier::Boss);
                if attempt_escape(tier, rng) {
                    messages.push("Escape successful!".to_string());
                    return Ok(self.finish(messages, BattleOutcome::Escaped));
                }
                messages.push("Escape failed!".to_string());
                opponent_acts = self.policy == EscapePolicy::OpponentStrikes;
            }
        }

        if opponent_acts && self.opponent.alive() && hero.alive() {
            let report = resolve_attack(&mut self.opponent, hero, AttackType::Normal, rng);
            messages.extend(report.messages);
        }

        self.rounds += 1;
        if !hero.alive() {
            messages.push("You have been defeated!".to_string());
            return Ok(self.finish(messages, BattleOutcome::Defeat));
        }
        if !self.opponent.alive() {
            messages.push(format!("{} has been defeated!", self.opponent.name));
            return Ok(self.finish(messages, BattleOutcome::Victory));
        }

        self.log.extend(messages.iter().cloned());
        Ok(RoundReport {
            messages,
            phase: self.phase,
        })
    }

    fn finish(&mut self, messages: Vec<String>, outcome: BattleOutcome) -> RoundReport {
        self.phase = BattlePhase::Ended(outcome);
        self.log.extend(messages.iter().cloned());
        log::info!("battle with {} ended: {:?}", self.opponent.name, outcome);
        RoundReport {
            messages,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EnemyState, ItemTier, Role, Weapon, generate_boss, generate_throwable};
    use crate::rng::{FixedRolls, GameRng};

    fn test_enemy(health: i32, tier: Tier) -> Character {
        Character::new(
            "Goblin",
            health,
            Weapon::new("Rusty Dagger", "blade", 5, 10, Tier::Low),
            0,
            0,
            0,
            Role::Enemy(EnemyState::new(tier)),
        )
    }

    fn test_hero() -> Character {
        let mut hero = Character::new_hero("Hero", 150);
        hero.weapon = Weapon::new("Longsword", "blade", 10, 40, Tier::Mid);
        hero
    }

    #[test]
    fn test_round_with_enemy_turn() {
        let mut hero = test_hero();
        let mut battle = Battle::new(test_enemy(30, Tier::Low), EscapePolicy::default());
        // hero: evade, dmg 10, crit, counter; enemy: evade, dmg 6, crit, counter
        let mut rolls = FixedRolls::new([100, 10, 100, 100, 100, 6, 100, 100]);
        let report = battle
            .act(&mut hero, BattleAction::Attack(AttackType::Normal), &mut rolls)
            .unwrap();
        assert_eq!(report.phase, BattlePhase::PlayerTurn);
        assert_eq!(battle.opponent().health, 20);
        // 6 - 5 armor
        assert_eq!(hero.health, 149);
        assert_eq!(report.messages.len(), 2);
        assert_eq!(battle.rounds(), 1);
    }

    #[test]
    fn test_victory_skips_enemy_turn() {
        let mut hero = test_hero();
        let mut battle = Battle::new(test_enemy(5, Tier::Low), EscapePolicy::default());
        let mut rolls = FixedRolls::new([100, 10, 100]);
        let report = battle
            .act(&mut hero, BattleAction::Attack(AttackType::Heavy), &mut rolls)
            .unwrap();
        assert_eq!(report.phase, BattlePhase::Ended(BattleOutcome::Victory));
        assert_eq!(report.messages.last().unwrap(), "Goblin has been defeated!");
        assert_eq!(hero.health, 150);
        assert_eq!(
            battle.act(&mut hero, BattleAction::Escape, &mut rolls),
            Err(CombatError::BattleOver)
        );
    }

    #[test]
    fn test_defeat() {
        let mut hero = test_hero();
        hero.health = 1;
        let mut battle = Battle::new(test_enemy(500, Tier::Low), EscapePolicy::default());
        let mut rolls = FixedRolls::new([100, 10, 100, 100, 100, 6, 100, 100]);
        let report = battle
            .act(&mut hero, BattleAction::Attack(AttackType::Normal), &mut rolls)
            .unwrap();
        assert_eq!(report.phase, BattlePhase::Ended(BattleOutcome::Defeat));
        assert_eq!(battle.outcome(), Some(BattleOutcome::Defeat));
    }

    #[test]
    fn test_escape_success() {
        let mut hero = test_hero();
        let mut battle = Battle::new(test_enemy(30, Tier::Low), EscapePolicy::default());
        let report = battle
            .act(&mut hero, BattleAction::Escape, &mut FixedRolls::new([60]))
            .unwrap();
        assert_eq!(report.phase, BattlePhase::Ended(BattleOutcome::Escaped));
        assert_eq!(battle.opponent().health, 30);
    }

    #[test]
    fn test_failed_escape_opponent_strikes() {
        let mut hero = test_hero();
        let mut battle = Battle::new(test_enemy(30, Tier::Low), EscapePolicy::OpponentStrikes);
        let mut rolls = FixedRolls::new([61, 100, 6, 100, 100]);
        let report = battle.act(&mut hero, BattleAction::Escape, &mut rolls).unwrap();
        assert_eq!(report.phase, BattlePhase::PlayerTurn);
        assert_eq!(report.messages[0], "Escape failed!");
        assert_eq!(hero.health, 149);
    }

    #[test]
    fn test_failed_escape_turn_passes() {
        let mut hero = test_hero();
        let mut battle = Battle::new(test_enemy(30, Tier::Low), EscapePolicy::TurnPasses);
        let mut rolls = FixedRolls::new([61, 100, 6, 100, 100]);
        let report = battle.act(&mut hero, BattleAction::Escape, &mut rolls).unwrap();
        assert_eq!(report.messages, vec!["Escape failed!"]);
        assert_eq!(hero.health, 150);
        assert_eq!(rolls.remaining(), 4);
    }

    #[test]
    fn test_boss_cannot_be_fled() {
        let mut hero = test_hero();
        let mut battle = Battle::new(generate_boss(0).unwrap(), EscapePolicy::TurnPasses);
        let mut rng = GameRng::new(6);
        for _ in 0..20 {
            let report = battle.act(&mut hero, BattleAction::Escape, &mut rng).unwrap();
            assert_eq!(report.phase, BattlePhase::PlayerTurn);
        }
    }

    #[test]
    fn test_throwable_in_battle() {
        let mut hero = test_hero();
        hero.add_item(generate_throwable(ItemTier::Mids)).unwrap();
        let mut battle = Battle::new(test_enemy(20, Tier::Low), EscapePolicy::default());
        let report = battle
            .act(&mut hero, BattleAction::UseItem(0), &mut FixedRolls::default())
            .unwrap();
        assert_eq!(report.phase, BattlePhase::Ended(BattleOutcome::Victory));
        assert!(hero.items().is_empty());
    }

    #[test]
    fn test_bad_item_keeps_turn() {
        let mut hero = test_hero();
        let mut battle = Battle::new(test_enemy(20, Tier::Low), EscapePolicy::default());
        assert_eq!(
            battle.act(&mut hero, BattleAction::UseItem(3), &mut FixedRolls::default()),
            Err(CombatError::InvalidSelection { index: 3, len: 0 })
        );
        assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
        assert_eq!(battle.rounds(), 0);
    }

    #[test]
    fn test_recent_log_window() {
        let mut hero = test_hero();
        let mut battle = Battle::new(test_enemy(10_000, Tier::High), EscapePolicy::TurnPasses);
        let mut rolls = FixedRolls::new([100; 10]);
        for _ in 0..10 {
            battle.act(&mut hero, BattleAction::Escape, &mut rolls).unwrap();
        }
        assert_eq!(battle.log().len(), 11);
        assert_eq!(battle.recent_log().len(), 5);
    }
}
