//! Game session
//!
//! A [`Session`] owns the hero, the current map, the random stream and the
//! progress counters. The front-end feeds it moves and battle actions and
//! renders whatever state comes back; nothing here touches the terminal.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::{
    Battle, BattleAction, BattleOutcome, BattlePhase, EscapePolicy, ItemUse, LootChoice,
    VictoryRewards, claim_weapon, grant_victory_rewards, use_item,
};
use crate::consts::{
    HERO_HEALTH, HERO_NAME, MAX_RETRIES_PER_SEED, MAX_SEED, TOTAL_BOSSES, TREASURE_GOLD,
};
use crate::data::TileKind;
use crate::entity::{Character, Item, Weapon, boss_for_round};
use crate::errors::{ConfigError, SessionError};
use crate::map::{Direction, Map, MapConfig, Position, select_enemies};
use crate::rng::GameRng;
use crate::shop::{self, Shop};

/// Session settings, loadable from JSON. Missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub map: MapConfig,
    pub hero_name: String,
    pub hero_health: i32,
    /// Bosses to defeat to win
    pub total_bosses: u32,
    /// Deaths allowed on one seed before it must be abandoned
    pub max_retries_per_seed: u32,
    pub escape_policy: EscapePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            hero_name: HERO_NAME.to_string(),
            hero_health: HERO_HEALTH,
            total_bosses: TOTAL_BOSSES,
            max_retries_per_seed: MAX_RETRIES_PER_SEED,
            escape_policy: EscapePolicy::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.map.validate()?;
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("loading session config from {}", path.display());
        Self::from_json_str(&json)
    }
}

/// Seed for a restarted game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedChoice {
    /// Retry the current seed, if the death count allows it
    Same,
    New(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encounter {
    /// A battle has started; the player stays put until it is won
    Enemy { name: String },
    Boss { name: String },
    /// Moved into an unvisited village; its shop is open
    Village,
    Treasure { gold: u32 },
}

/// Result of [`Session::step`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Blocked,
    Moved,
    Encounter(Encounter),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Defeated { deaths: u32, retry_allowed: bool },
    Won,
}

/// How a battle round left things
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleResolution {
    Ongoing,
    Escaped,
    Victory(VictoryRewards),
    /// `next_seed` is the new level's seed, or `None` when that was the
    /// last boss
    BossDefeated {
        rewards: VictoryRewards,
        next_seed: Option<u64>,
    },
    Defeat { retry_allowed: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleTurn {
    pub messages: Vec<String>,
    pub resolution: BattleResolution,
}

#[derive(Debug, Clone)]
struct ActiveBattle {
    battle: Battle,
    /// Cell the opponent was met on
    pos: Position,
}

/// A level generated ahead of a boss kill. `stream` is the session stream
/// after the seed draw.
#[derive(Debug)]
struct NextLevel {
    map: Map,
    rng: GameRng,
    seed: u64,
    cycle: u32,
    stream: GameRng,
}

#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    hero: Character,
    map: Map,
    seed: u64,
    rng: GameRng,
    /// Bumped on every new game and every boss defeated
    cycle: u32,
    bosses_defeated: u32,
    deaths: HashMap<u64, u32>,
    battle: Option<ActiveBattle>,
    pending_loot: Option<Weapon>,
    /// Open while the player stands in a village
    shop: Option<Shop>,
    status: GameStatus,
    messages: Vec<String>,
}

fn check_seed(seed: u64) -> Result<(), SessionError> {
    if seed > MAX_SEED {
        return Err(SessionError::InvalidSeed(seed));
    }
    Ok(())
}

/// Generate a level and populate it. The returned stream continues from the
/// generator's last draw.
fn build_level(
    config: &MapConfig,
    seed: u64,
    bosses_defeated: u32,
    cycle: u32,
) -> Result<(Map, GameRng), SessionError> {
    let mut rng = GameRng::new(seed);
    let mut map = Map::generate(config.clone(), seed, &mut rng)?;
    map.place_player();
    let enemies = select_enemies(bosses_defeated, cycle, &mut rng)?;
    map.place_enemies(enemies, &mut rng)?;
    Ok((map, rng))
}

impl Session {
    /// Start a new game on `seed`
    pub fn new(config: SessionConfig, seed: u64) -> Result<Session, SessionError> {
        check_seed(seed)?;
        let cycle = 1;
        let (map, rng) = build_level(&config.map, seed, 0, cycle)?;
        let hero = Character::new_hero(&config.hero_name, config.hero_health);
        let mut session = Session {
            config,
            hero,
            map,
            seed,
            rng,
            cycle,
            bosses_defeated: 0,
            deaths: HashMap::new(),
            battle: None,
            pending_loot: None,
            shop: None,
            status: GameStatus::Playing,
            messages: Vec::new(),
        };
        session.sync_hero_pos();
        session.message(format!("Using seed: {seed}"));
        log::info!("new game on seed {seed}");
        Ok(session)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn hero(&self) -> &Character {
        &self.hero
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    pub fn bosses_defeated(&self) -> u32 {
        self.bosses_defeated
    }

    /// Deaths recorded on `seed`
    pub fn deaths_on(&self, seed: u64) -> u32 {
        self.deaths.get(&seed).copied().unwrap_or(0)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref().map(|active| &active.battle)
    }

    pub fn pending_loot(&self) -> Option<&Weapon> {
        self.pending_loot.as_ref()
    }

    pub fn shop(&self) -> Option<&Shop> {
        self.shop.as_ref()
    }

    pub fn in_village(&self) -> bool {
        self.shop.is_some()
    }

    pub fn player_pos(&self) -> Position {
        self.map.player_pos()
    }

    /// Name of the terrain under the player
    pub fn current_tile_name(&self) -> &'static str {
        Map::tile_name(self.map.player_previous_tile())
    }

    /// Drain the session messages (shrine sightings, level changes and so on)
    pub fn take_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }

    fn message(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        log::debug!("{msg}");
        self.messages.push(msg);
    }

    fn ensure_playing(&self) -> Result<(), SessionError> {
        match self.status {
            GameStatus::Playing => Ok(()),
            _ => Err(SessionError::GameOver),
        }
    }

    fn sync_hero_pos(&mut self) {
        let pos = self.map.player_pos();
        if let Some(state) = self.hero.hero_state_mut() {
            state.pos = pos;
        }
    }

    fn move_player(&mut self, from: Position, to: Position) -> Result<(), SessionError> {
        self.map.update_player_position(from, to)?;
        self.sync_hero_pos();
        Ok(())
    }

    /// Once the last enemy is gone a shrine leads to the boss
    fn spawn_shrine_if_cleared(&mut self) -> Result<(), SessionError> {
        if self.map.enemies().is_empty() && !self.map.boss_spawned() {
            self.map.spawn_shrine(&mut self.rng)?;
            self.message("A mysterious shrine has appeared on the map!");
        }
        Ok(())
    }

    fn start_battle(&mut self, opponent: Character, pos: Position) {
        let battle = Battle::new(opponent, self.config.escape_policy);
        self.battle = Some(ActiveBattle { battle, pos });
    }

    /// Try to move one cell
    pub fn step(&mut self, direction: Direction) -> Result<MoveOutcome, SessionError> {
        self.ensure_playing()?;
        if self.battle.is_some() {
            return Err(SessionError::BattleInProgress);
        }
        if self.pending_loot.is_some() {
            return Err(SessionError::LootPending);
        }

        let from = self.map.player_pos();
        let Some(target) = from.step(direction).filter(|pos| self.map.in_bounds(*pos)) else {
            return Ok(MoveOutcome::Blocked);
        };
        let Some(tile) = self.map.tile_at(target) else {
            return Ok(MoveOutcome::Blocked);
        };
        let (kind, walkable, visited) = (tile.kind(), tile.is_walkable(), tile.visited());
        self.shop = None;

        let outcome = match kind {
            TileKind::Enemy => {
                let Some(enemy) = self.map.take_enemy_at(target) else {
                    return Ok(MoveOutcome::Blocked);
                };
                let name = enemy.name.clone();
                self.start_battle(enemy, target);
                return Ok(MoveOutcome::Encounter(Encounter::Enemy { name }));
            }
            TileKind::Shrine => {
                let boss = boss_for_round(self.bosses_defeated)?;
                let name = boss.name.clone();
                self.message("You have discovered the shrine!");
                self.start_battle(boss, target);
                return Ok(MoveOutcome::Encounter(Encounter::Boss { name }));
            }
            TileKind::Village if visited => return Ok(MoveOutcome::Blocked),
            TileKind::Village => {
                self.map.visit_village(target);
                self.move_player(from, target)?;
                self.shop = Some(Shop::stock(&mut self.rng)?);
                self.message("You entered a village.");
                MoveOutcome::Encounter(Encounter::Village)
            }
            TileKind::Treasure => {
                self.map.set_tile(target, TileKind::Default)?;
                self.hero.add_gold(TREASURE_GOLD)?;
                self.move_player(from, target)?;
                self.message(format!("You received {TREASURE_GOLD} gold!"));
                MoveOutcome::Encounter(Encounter::Treasure {
                    gold: TREASURE_GOLD,
                })
            }
            _ if walkable => {
                self.move_player(from, target)?;
                MoveOutcome::Moved
            }
            _ => return Ok(MoveOutcome::Blocked),
        };

        self.spawn_shrine_if_cleared()?;
        Ok(outcome)
    }

    /// Play one round of the active battle
    pub fn battle_action(&mut self, action: BattleAction) -> Result<BattleTurn, SessionError> {
        self.ensure_playing()?;
        let active = self.battle.as_mut().ok_or(SessionError::NoActiveBattle)?;
        let report = active.battle.act(&mut self.hero, action, &mut self.rng)?;
        let BattlePhase::Ended(outcome) = report.phase else {
            return Ok(BattleTurn {
                messages: report.messages,
                resolution: BattleResolution::Ongoing,
            });
        };
        // The next level is built before the boss battle is consumed so a
        // failed build leaves the session untouched
        let boss_won = outcome == BattleOutcome::Victory && active.battle.opponent().is_boss();
        let next_level = if boss_won {
            self.prepare_next_level()?
        } else {
            None
        };

        let ActiveBattle { battle, pos } = self.battle.take().ok_or(SessionError::NoActiveBattle)?;
        let opponent = battle.into_opponent();

        let resolution = match outcome {
            BattleOutcome::Escaped => {
                if !opponent.is_boss() {
                    self.map.return_enemy(opponent);
                }
                BattleResolution::Escaped
            }
            BattleOutcome::Victory if opponent.is_boss() => {
                self.finish_boss(&opponent, next_level)?
            }
            BattleOutcome::Victory => {
                self.map.clear_enemy_marker(&opponent);
                let from = self.map.player_pos();
                self.move_player(from, pos)?;
                let rewards = grant_victory_rewards(&mut self.hero, &opponent, &mut self.rng)?;
                self.pending_loot = rewards.weapon.clone();
                self.spawn_shrine_if_cleared()?;
                BattleResolution::Victory(rewards)
            }
            BattleOutcome::Defeat => {
                if !opponent.is_boss() {
                    self.map.return_enemy(opponent);
                }
                BattleResolution::Defeat {
                    retry_allowed: self.record_death(),
                }
            }
        };

        Ok(BattleTurn {
            messages: report.messages,
            resolution,
        })
    }

    /// Generate the level that follows a boss kill, or `None` when that
    /// boss was the last one. Mutates nothing.
    fn prepare_next_level(&self) -> Result<Option<NextLevel>, SessionError> {
        if self.bosses_defeated + 1 >= self.config.total_bosses {
            return Ok(None);
        }
        let mut stream = self.rng.clone();
        let seed = stream.next_seed();
        let cycle = self.cycle + 1;
        let (map, rng) = build_level(&self.config.map, seed, self.bosses_defeated + 1, cycle)?;
        Ok(Some(NextLevel {
            map,
            rng,
            seed,
            cycle,
            stream,
        }))
    }

    fn finish_boss(
        &mut self,
        boss: &Character,
        next_level: Option<NextLevel>,
    ) -> Result<BattleResolution, SessionError> {
        if let Some(next) = &next_level {
            self.rng = next.stream.clone();
        }
        let rewards = grant_victory_rewards(&mut self.hero, boss, &mut self.rng)?;
        self.bosses_defeated += 1;
        self.message(format!(
            "You have defeated {} out of {} bosses.",
            self.bosses_defeated, self.config.total_bosses
        ));

        let Some(NextLevel {
            map,
            rng,
            seed,
            cycle,
            ..
        }) = next_level
        else {
            self.status = GameStatus::Won;
            self.message("Congratulations! You have defeated all the bosses!");
            log::info!("all {} bosses defeated", self.bosses_defeated);
            return Ok(BattleResolution::BossDefeated {
                rewards,
                next_seed: None,
            });
        };

        self.cycle = cycle;
        self.enter_level(map, rng, seed);
        self.message(format!("Starting New Game+{cycle} on seed {seed}"));
        Ok(BattleResolution::BossDefeated {
            rewards,
            next_seed: Some(seed),
        })
    }

    fn enter_level(&mut self, map: Map, rng: GameRng, seed: u64) {
        self.map = map;
        self.rng = rng;
        self.seed = seed;
        self.shop = None;
        self.pending_loot = None;
        self.sync_hero_pos();
    }

    /// Count a death on the current seed. Returns whether the seed may be
    /// retried.
    fn record_death(&mut self) -> bool {
        let deaths = self.deaths.entry(self.seed).or_insert(0);
        *deaths += 1;
        let deaths = *deaths;
        let retry_allowed = deaths <= self.config.max_retries_per_seed;
        if !retry_allowed {
            log::warn!("retry limit exceeded for seed {} ({deaths} deaths)", self.seed);
        }
        self.status = GameStatus::Defeated {
            deaths,
            retry_allowed,
        };
        retry_allowed
    }

    /// Start over with a fresh hero. Death counts carry across games.
    pub fn restart(&mut self, choice: SeedChoice) -> Result<(), SessionError> {
        let seed = match choice {
            SeedChoice::Same => {
                let deaths = self.deaths_on(self.seed);
                if deaths > self.config.max_retries_per_seed {
                    return Err(SessionError::RetryLimitExceeded {
                        seed: self.seed,
                        deaths,
                    });
                }
                self.seed
            }
            SeedChoice::New(seed) => {
                check_seed(seed)?;
                seed
            }
        };

        let cycle = self.cycle + 1;
        let (map, rng) = build_level(&self.config.map, seed, 0, cycle)?;
        self.cycle = cycle;
        self.bosses_defeated = 0;
        self.hero = Character::new_hero(&self.config.hero_name, self.config.hero_health);
        self.battle = None;
        self.status = GameStatus::Playing;
        self.enter_level(map, rng, seed);
        self.message(format!("Using seed: {seed}"));
        log::info!("restarted on seed {seed} (cycle {cycle})");
        Ok(())
    }

    /// Use a cure from the inventory outside battle
    pub fn use_item(&mut self, index: usize) -> Result<ItemUse, SessionError> {
        self.ensure_playing()?;
        if self.battle.is_some() {
            return Err(SessionError::BattleInProgress);
        }
        Ok(use_item(&mut self.hero, index, None)?)
    }

    /// Settle the weapon left by the last enemy. Returns the gold gained.
    pub fn resolve_loot(&mut self, choice: LootChoice) -> Result<u32, SessionError> {
        let weapon = self.pending_loot.take().ok_or(SessionError::NoPendingLoot)?;
        log::debug!("{:?} {}", choice, weapon.name);
        Ok(claim_weapon(&mut self.hero, weapon, choice)?)
    }

    /// Rest at the village inn
    pub fn rest(&mut self) -> Result<(), SessionError> {
        self.ensure_playing()?;
        if self.shop.is_none() {
            return Err(SessionError::NotInVillage);
        }
        shop::rest(&mut self.hero);
        Ok(())
    }

    pub fn buy_weapon(&mut self, index: usize) -> Result<Weapon, SessionError> {
        self.ensure_playing()?;
        let shop = self.shop.as_mut().ok_or(SessionError::NotInVillage)?;
        shop.buy_weapon(&mut self.hero, index)
    }

    pub fn buy_item(&mut self, index: usize) -> Result<Item, SessionError> {
        self.ensure_playing()?;
        let shop = self.shop.as_ref().ok_or(SessionError::NotInVillage)?;
        shop.buy_item(&mut self.hero, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::AttackType;
    use crate::entity::{
        Combatant, EnemyState, ItemTier, Role, Tier, generate_cure, generate_throwable,
    };
    use crate::errors::{CombatError, MapError};
    use crate::rng::FixedRolls;

    fn test_session() -> Session {
        Session::new(SessionConfig::default(), 42).unwrap()
    }

    fn clear_enemies(session: &mut Session) {
        let positions: Vec<Position> = session
            .map
            .enemies()
            .iter()
            .filter_map(|enemy| enemy.position())
            .collect();
        for pos in positions {
            session.map.remove_enemy(pos);
        }
    }

    fn weakling() -> Character {
        Character::new(
            "Slime",
            1,
            Weapon::new("Goo", "blunt", 1, 7, Tier::Low),
            0,
            0,
            0,
            Role::Enemy(EnemyState::new(Tier::Low)),
        )
    }

    /// Put `enemy` at `pos` on a default cell, evicting whoever was there
    fn plant_enemy(session: &mut Session, enemy: Character, pos: Position) {
        session.map.remove_enemy(pos);
        session.map.set_tile(pos, TileKind::Default).unwrap();
        let mut rolls = FixedRolls::new([pos.row as i32, pos.col as i32]);
        session.map.place_enemies(vec![enemy], &mut rolls).unwrap();
    }

    #[test]
    fn test_new_session() {
        let session = test_session();
        assert_eq!(session.seed(), 42);
        assert_eq!(session.cycle(), 1);
        assert_eq!(session.bosses_defeated(), 0);
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.player_pos(), Position::new(1, 1));
        assert_eq!(session.hero().hero_state().unwrap().pos, Position::new(1, 1));
        assert_eq!(session.map().enemies().len(), 12);
        assert!(!session.map().boss_spawned());
    }

    #[test]
    fn test_seed_out_of_range() {
        assert_eq!(
            Session::new(SessionConfig::default(), 1_000_001).unwrap_err(),
            SessionError::InvalidSeed(1_000_001)
        );
        assert!(Session::new(SessionConfig::default(), 1_000_000).is_ok());
    }

    #[test]
    fn test_walls_block() {
        let mut session = test_session();
        assert_eq!(session.step(Direction::North).unwrap(), MoveOutcome::Blocked);
        assert_eq!(session.step(Direction::West).unwrap(), MoveOutcome::Blocked);
        assert_eq!(session.player_pos(), Position::new(1, 1));
    }

    #[test]
    fn test_plain_move() {
        let mut session = test_session();
        session.map.set_tile(Position::new(1, 2), TileKind::Forest).unwrap();
        assert_eq!(session.step(Direction::East).unwrap(), MoveOutcome::Moved);
        assert_eq!(session.player_pos(), Position::new(1, 2));
        assert_eq!(session.current_tile_name(), "Forest");
    }

    #[test]
    fn test_treasure() {
        let mut session = test_session();
        session.map.set_tile(Position::new(1, 2), TileKind::Treasure).unwrap();
        assert_eq!(
            session.step(Direction::East).unwrap(),
            MoveOutcome::Encounter(Encounter::Treasure { gold: 100 })
        );
        assert_eq!(session.hero().cashpile(), 100);
        assert_eq!(session.player_pos(), Position::new(1, 2));
        assert_eq!(session.current_tile_name(), "Plains");
    }

    #[test]
    fn test_village_visit_once() {
        let mut session = test_session();
        session.map.set_tile(Position::new(2, 1), TileKind::Village).unwrap();
        session.map.set_tile(Position::new(2, 2), TileKind::Default).unwrap();

        assert_eq!(
            session.step(Direction::South).unwrap(),
            MoveOutcome::Encounter(Encounter::Village)
        );
        assert!(session.in_village());
        assert_eq!(session.shop().unwrap().weapons().len(), 11);

        assert_eq!(session.step(Direction::East).unwrap(), MoveOutcome::Moved);
        assert!(!session.in_village());
        assert_eq!(session.rest(), Err(SessionError::NotInVillage));
        // the village is drawn as visited and blocks from now on
        assert_eq!(session.map().tile_name_at(Position::new(2, 1)), "Visited Village");
        assert_eq!(session.step(Direction::West).unwrap(), MoveOutcome::Blocked);
    }

    #[test]
    fn test_village_services() {
        let mut session = test_session();
        session.map.set_tile(Position::new(2, 1), TileKind::Village).unwrap();
        session.step(Direction::South).unwrap();

        session.hero.take_damage(100);
        session.rest().unwrap();
        assert_eq!(session.hero().health, 150);

        assert!(matches!(
            session.buy_item(0),
            Err(SessionError::InsufficientFunds { price: 10, cashpile: 0 })
        ));
        session.hero.add_gold(10).unwrap();
        assert_eq!(session.buy_item(0).unwrap().name, "Small Health Potion");
        assert_eq!(session.hero().cashpile(), 0);
    }

    #[test]
    fn test_enemy_encounter_and_victory() {
        let mut session = test_session();
        clear_enemies(&mut session);
        let target = Position::new(1, 2);
        plant_enemy(&mut session, weakling(), target);

        let outcome = session.step(Direction::East).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Encounter(Encounter::Enemy {
                name: "Slime".to_string()
            })
        );
        assert_eq!(session.player_pos(), Position::new(1, 1));
        assert_eq!(session.step(Direction::East), Err(SessionError::BattleInProgress));

        let turn = session
            .battle_action(BattleAction::Attack(AttackType::Normal))
            .unwrap();
        let BattleResolution::Victory(rewards) = turn.resolution else {
            panic!("expected victory, got {:?}", turn.resolution);
        };
        assert_eq!(rewards.experience, 50);
        assert_eq!(session.player_pos(), target);
        assert_eq!(session.current_tile_name(), "Plains");
        assert_eq!(session.pending_loot().map(|w| w.name.as_str()), Some("Goo"));

        assert_eq!(session.step(Direction::South), Err(SessionError::LootPending));
        assert_eq!(session.resolve_loot(LootChoice::Scrap).unwrap(), 7);
        assert_eq!(session.resolve_loot(LootChoice::Scrap), Err(SessionError::NoPendingLoot));
    }

    #[test]
    fn test_last_enemy_raises_shrine() {
        let mut session = test_session();
        clear_enemies(&mut session);
        plant_enemy(&mut session, weakling(), Position::new(1, 2));
        session.step(Direction::East).unwrap();
        session
            .battle_action(BattleAction::Attack(AttackType::Normal))
            .unwrap();
        assert!(session.map().boss_spawned());
        assert_eq!(session.map().count_kind(TileKind::Shrine), 1);
        assert!(
            session
                .take_messages()
                .iter()
                .any(|m| m.contains("shrine has appeared"))
        );
    }

    #[test]
    fn test_escape_returns_enemy() {
        let mut config = SessionConfig::default();
        config.escape_policy = EscapePolicy::TurnPasses;
        let mut session = Session::new(config, 42).unwrap();
        let target = Position::new(1, 2);
        plant_enemy(&mut session, weakling(), target);
        session.step(Direction::East).unwrap();

        // low tier escape is 60%, keep trying
        let mut escaped = false;
        for _ in 0..100 {
            let turn = session.battle_action(BattleAction::Escape).unwrap();
            if turn.resolution == BattleResolution::Escaped {
                escaped = true;
                break;
            }
        }
        assert!(escaped);
        assert!(session.battle().is_none());
        assert_eq!(session.map().enemy_at(target).map(|e| e.name.as_str()), Some("Slime"));
        assert_eq!(session.map().tile_at(target).unwrap().kind(), TileKind::Enemy);
        assert_eq!(session.player_pos(), Position::new(1, 1));
    }

    #[test]
    fn test_defeat_and_retry_limit() {
        let mut config = SessionConfig::default();
        config.max_retries_per_seed = 1;
        let mut session = Session::new(config, 42).unwrap();

        for round in 1..=2 {
            let brute = Character::new(
                "Brute",
                100_000,
                Weapon::new("Maul", "blunt", 10_000, 0, Tier::High),
                0,
                0,
                0,
                Role::Enemy(EnemyState::new(Tier::High)),
            );
            plant_enemy(&mut session, brute, Position::new(1, 2));
            session.step(Direction::East).unwrap();
            let resolution = loop {
                let turn = session
                    .battle_action(BattleAction::Attack(AttackType::Quick))
                    .unwrap();
                if turn.resolution != BattleResolution::Ongoing {
                    break turn.resolution;
                }
            };
            let allowed = round == 1;
            assert_eq!(resolution, BattleResolution::Defeat { retry_allowed: allowed });
            assert_eq!(
                session.status(),
                GameStatus::Defeated {
                    deaths: round,
                    retry_allowed: allowed
                }
            );
            assert_eq!(session.step(Direction::East), Err(SessionError::GameOver));
            if allowed {
                session.restart(SeedChoice::Same).unwrap();
            }
        }

        assert_eq!(
            session.restart(SeedChoice::Same),
            Err(SessionError::RetryLimitExceeded { seed: 42, deaths: 2 })
        );
        session.restart(SeedChoice::New(7)).unwrap();
        assert_eq!(session.seed(), 7);
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.hero().health, 150);
    }

    #[test]
    fn test_restart_bumps_cycle() {
        let mut session = test_session();
        session.restart(SeedChoice::New(100)).unwrap();
        assert_eq!(session.cycle(), 2);
        assert_eq!(session.bosses_defeated(), 0);
        assert_eq!(
            session.restart(SeedChoice::New(MAX_SEED + 1)),
            Err(SessionError::InvalidSeed(MAX_SEED + 1))
        );
        assert_eq!(session.cycle(), 2);
    }

    fn overpower_hero(session: &mut Session) {
        session.hero.health_max = 100_000;
        session.hero.health = 100_000;
        session.hero.weapon = Weapon::new("Test Blade", "blade", 10_000, 0, Tier::High);
    }

    fn fight_boss(session: &mut Session) -> BattleResolution {
        session.map.set_tile(Position::new(1, 2), TileKind::Shrine).unwrap();
        assert_eq!(
            session.step(Direction::East).unwrap(),
            MoveOutcome::Encounter(Encounter::Boss {
                name: "Dragon Lord".to_string()
            })
        );
        loop {
            let turn = session
                .battle_action(BattleAction::Attack(AttackType::Normal))
                .unwrap();
            if turn.resolution != BattleResolution::Ongoing {
                return turn.resolution;
            }
        }
    }

    #[test]
    fn test_boss_victory_starts_next_level() {
        let mut session = test_session();
        overpower_hero(&mut session);
        let resolution = fight_boss(&mut session);
        let BattleResolution::BossDefeated { rewards, next_seed } = resolution else {
            panic!("expected boss victory, got {resolution:?}");
        };
        assert_eq!(rewards.boss_drops.len(), 2);
        let next_seed = next_seed.unwrap();
        assert_eq!(session.seed(), next_seed);
        assert_eq!(session.bosses_defeated(), 1);
        assert_eq!(session.cycle(), 2);
        assert_eq!(session.player_pos(), Position::new(1, 1));
        assert_eq!(session.map().enemies().len(), 12);
        // the hero carries over
        assert_eq!(session.hero().weapon.name, "Test Blade");
        assert_eq!(session.hero().items().len(), 2);
    }

    #[test]
    fn test_failed_level_build_keeps_boss_battle() {
        let mut session = test_session();
        overpower_hero(&mut session);
        session.map.set_tile(Position::new(1, 2), TileKind::Shrine).unwrap();
        session.step(Direction::East).unwrap();
        // no mountains, so no river can find a source
        session.config.map.biomes.clear();

        let mut result = session.battle_action(BattleAction::Attack(AttackType::Normal));
        while matches!(
            result,
            Ok(BattleTurn {
                resolution: BattleResolution::Ongoing,
                ..
            })
        ) {
            result = session.battle_action(BattleAction::Attack(AttackType::Normal));
        }

        assert_eq!(
            result,
            Err(SessionError::Map(MapError::PlacementFailed {
                target: "river source".to_string(),
                attempts: 10_000
            }))
        );
        assert_eq!(session.bosses_defeated(), 0);
        assert_eq!(session.cycle(), 1);
        assert_eq!(session.seed(), 42);
        assert!(session.hero().items().is_empty());
        assert!(session.battle().is_some());
        assert_eq!(session.map().count_kind(TileKind::Shrine), 1);
        assert_eq!(session.status(), GameStatus::Playing);
    }

    #[test]
    fn test_last_boss_wins() {
        let mut config = SessionConfig::default();
        config.total_bosses = 1;
        let mut session = Session::new(config, 42).unwrap();
        overpower_hero(&mut session);
        assert_eq!(
            fight_boss(&mut session),
            BattleResolution::BossDefeated {
                rewards: VictoryRewards {
                    boss_drops: vec![
                        generate_cure(ItemTier::Superior),
                        generate_throwable(ItemTier::Superior)
                    ],
                    ..VictoryRewards::default()
                },
                next_seed: None,
            }
        );
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.step(Direction::South), Err(SessionError::GameOver));
    }

    #[test]
    fn test_use_item_outside_battle() {
        let mut session = test_session();
        session.hero.add_item(generate_throwable(ItemTier::Small)).unwrap();
        session.hero.add_item(generate_cure(ItemTier::Small)).unwrap();
        session.hero.take_damage(50);

        assert!(matches!(
            session.use_item(0),
            Err(SessionError::Combat(CombatError::ItemNotUsable { .. }))
        ));
        assert_eq!(session.hero().items().len(), 2);
        assert_eq!(
            session.use_item(1).unwrap(),
            ItemUse::Healed {
                item: "Small Health Potion".to_string(),
                amount: 22
            }
        );
        assert_eq!(session.hero().health, 122);
    }

    #[test]
    fn test_no_battle() {
        let mut session = test_session();
        assert_eq!(
            session.battle_action(BattleAction::Escape),
            Err(SessionError::NoActiveBattle)
        );
    }

    #[test]
    fn test_config_json() {
        let config = SessionConfig::from_json_str(
            r#"{"hero_name": "Ayla", "escape_policy": "turn-passes", "map": {"width": 20}}"#,
        )
        .unwrap();
        assert_eq!(config.hero_name, "Ayla");
        assert_eq!(config.escape_policy, EscapePolicy::TurnPasses);
        assert_eq!(config.map.width, 20);
        assert_eq!(config.map.height, 25);
        assert_eq!(config.total_bosses, 10);

        assert!(matches!(
            SessionConfig::from_json_str(r#"{"map": {"width": 2}}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"map": {"max_placement_attempts": 0}}"#),
            Err(ConfigError::Invalid(MapError::NoPlacementAttempts))
        ));
        assert!(matches!(
            SessionConfig::load_from_file("/nonexistent/desgoblin.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
