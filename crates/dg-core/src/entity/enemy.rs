//! Enemy and boss generation

use super::{BossTraits, Character, EnemyState, Role, Tier, Weapon, generate_weapon};
use crate::errors::EntityError;
use crate::rng::RandomSource;

const LOW_NAMES: &[&str] = &[
    "Slime", "Rat", "Goblin", "Spider", "Bat", "Snake", "Kobold", "Imp", "Bandit",
    "Skeleton", "Zombie", "Giant Rat", "Cave Beetle", "Mud Crab", "Shadow Cat", "Wild Dog",
    "Giant Centipede", "Boggart", "Pixie", "Dust Mephit", "Giant Spider", "Stirge", "Ghoul",
    "Wisp", "Carrion Beetle", "Giant Ant", "Fire Beetle", "Feral Boar", "Dire Rabbit",
    "Wood Sprite", "Giant Snail", "Frost Beetle", "Shade", "Cursed Doll", "Thornling",
    "Scarecrow", "Gutter Rat", "Giant Leech", "Dark Fairy", "Ash Crawler", "Dire Mole",
    "Fungal Sprite", "Rusted Automaton", "Rotten Hound", "Grave Mite", "Hedge Gremlin",
    "Black Cat", "Bog Imp", "Plague Rat", "Dire Toad", "Sewer Slime", "Lost Soul",
];

const MID_NAMES: &[&str] = &[
    "Big Goblin", "Hobgoblin", "Orc", "Gnoll", "Wight", "Troll", "Ogre", "Minotaur", "Centaur",
    "Werewolf", "Harpy", "Griffon", "Cyclops", "Gargoyle", "Rakshasa", "Sea Hag", "Doppelganger",
    "Dark Knight", "Redcap", "Chimera", "Banshee", "Dire Wolf", "Revenant", "Barghest",
    "Manticore", "Gorgon", "Siren", "Basilisk", "Cursed Armor", "Bone Naga", "Kelpie", "Wendigo",
    "Werebear", "Wyrmling", "Phantom Knight", "Headless Horseman", "Sand Wraith",
    "Storm Elemental", "Night Hag", "Stone Golem", "Hellhound", "Fire Djinn", "Bog Witch",
    "Frost Troll", "Cave Troll", "Giant Scorpion", "Draugr", "Hill Giant", "Bugbear",
    "Black Knight",
];

const HIGH_NAMES: &[&str] = &[
    "Wyvern", "Drake", "Titan", "Lich", "Vampire", "Dragon", "Behemoth", "Balor", "Kraken",
    "Nightmare", "Elder Brain", "Shoggoth", "Demon Lord", "Pit Fiend", "Hydra", "Aboleth",
    "Phoenix", "Archdemon", "Leviathan", "Bone Dragon", "Storm Giant", "Sphinx", "Charybdis",
    "Scylla", "Tarrasque", "Frost Wyrm", "Fenrir", "Jormungandr", "Nemean Lion", "Ifrit",
    "Archlich", "Death Knight", "Demogorgon", "Typhon", "Echidna", "Kronos", "Celestial Dragon",
    "The Devourer",
];

/// Stat ranges for one tier
struct StatRanges {
    health: (i32, i32),
    evade: (i32, i32),
    crit: (i32, i32),
    armor: (i32, i32),
}

fn tier_profile(tier: Tier) -> Result<(&'static [&'static str], StatRanges), EntityError> {
    match tier {
        Tier::Low => Ok((
            LOW_NAMES,
            StatRanges {
                health: (10, 30),
                evade: (0, 5),
                crit: (5, 8),
                armor: (0, 2),
            },
        )),
        Tier::Mid => Ok((
            MID_NAMES,
            StatRanges {
                health: (40, 80),
                evade: (5, 10),
                crit: (8, 12),
                armor: (2, 6),
            },
        )),
        Tier::High => Ok((
            HIGH_NAMES,
            StatRanges {
                health: (80, 120),
                evade: (10, 15),
                crit: (12, 20),
                armor: (6, 12),
            },
        )),
        Tier::Boss => Err(EntityError::InvalidTier(tier.to_string())),
    }
}

/// `value * percent / 100`, truncated
pub(crate) fn scale_percent(value: i32, percent: u32) -> i32 {
    (i64::from(value) * i64::from(percent) / 100) as i32
}

/// Roll a regular enemy of `tier`.
///
/// Health is scaled by `1 + 0.2 * cycle`; evade, crit and armor by
/// `1 + 0.1 * cycle`, truncating. Bosses come from [`generate_boss`] instead.
pub fn generate_enemy<R: RandomSource + ?Sized>(
    tier: Tier,
    cycle: u32,
    rng: &mut R,
) -> Result<Character, EntityError> {
    let (names, ranges) = tier_profile(tier)?;
    let name = names[rng.pick_index(names.len())];
    let health = rng.range_inclusive(ranges.health.0, ranges.health.1);
    let evade = rng.range_inclusive(ranges.evade.0, ranges.evade.1);
    let crit = rng.range_inclusive(ranges.crit.0, ranges.crit.1);
    let armor = rng.range_inclusive(ranges.armor.0, ranges.armor.1);

    let health_percent = 100 + 20 * cycle;
    let stat_percent = 100 + 10 * cycle;
    let weapon = generate_weapon(tier, cycle, rng)?;

    Ok(Character::new(
        name,
        scale_percent(health, health_percent),
        weapon,
        scale_percent(evade, stat_percent),
        scale_percent(crit, stat_percent),
        scale_percent(armor, stat_percent),
        Role::Enemy(EnemyState::new(tier)),
    ))
}

/// Roll an enemy from a tier name such as "mid"
pub fn generate_enemy_named<R: RandomSource + ?Sized>(
    tier: &str,
    cycle: u32,
    rng: &mut R,
) -> Result<Character, EntityError> {
    let tier = tier
        .parse::<Tier>()
        .map_err(|_| EntityError::InvalidTier(tier.to_string()))?;
    generate_enemy(tier, cycle, rng)
}

impl Character {
    /// Multiply health (resetting max health), weapon damage and armor by
    /// `percent / 100`
    pub fn scale_stats(&mut self, percent: u32) {
        self.health = scale_percent(self.health, percent).max(0);
        self.health_max = self.health;
        self.weapon = self.weapon.scaled(percent);
        self.armor = scale_percent(self.armor, percent);
    }
}

/// Boss catalog row
struct BossTemplate {
    name: &'static str,
    health: i32,
    weapon: (&'static str, &'static str, i32),
    evade: i32,
    crit: i32,
    armor: i32,
    skills: &'static [&'static str],
    drops: &'static [&'static str],
}

const BOSSES: &[BossTemplate] = &[BossTemplate {
    name: "Dragon Lord",
    health: 200,
    weapon: ("Flame Breath", "natural", 30),
    evade: 10,
    crit: 15,
    armor: 15,
    skills: &["Firestorm", "Tail Swipe"],
    drops: &["Superior Health Potion", "Explosive Charge"],
}];

/// Number of distinct bosses in the catalog
pub fn boss_count() -> usize {
    BOSSES.len()
}

/// Build the boss at catalog `index`
pub fn generate_boss(index: usize) -> Result<Character, EntityError> {
    let data = BOSSES.get(index).ok_or(EntityError::UnknownBoss(index))?;
    let (weapon_name, weapon_kind, damage) = data.weapon;
    Ok(Character::new(
        data.name,
        data.health,
        Weapon::new(weapon_name, weapon_kind, damage, 0, Tier::Boss),
        data.evade,
        data.crit,
        data.armor,
        Role::Boss(
            EnemyState::new(Tier::Boss),
            BossTraits {
                skills: data.skills.iter().map(|s| s.to_string()).collect(),
                drops: data.drops.iter().map(|s| s.to_string()).collect(),
            },
        ),
    ))
}

/// Boss for the given count of bosses already defeated, wrapping around
/// the catalog
pub fn boss_for_round(bosses_defeated: u32) -> Result<Character, EntityError> {
    generate_boss(bosses_defeated as usize % BOSSES.len())
}
