//! Enemy batches for a fresh map

use crate::consts::{HIGH_TIER_BATCH, LOW_TIER_BATCH, MID_TIER_BATCH};
use crate::entity::{Character, Tier, generate_enemy};
use crate::errors::EntityError;
use crate::rng::RandomSource;

/// Difficulty multiplier as a percentage: `1 + 0.2·bosses + 0.2·cycle`
pub fn wave_multiplier_percent(bosses_defeated: u32, cycle: u32) -> u32 {
    100 + 20 * bosses_defeated + 20 * cycle
}

/// Roll the standard batch (6 low, 4 mid, 2 high), every enemy scaled by
/// [`wave_multiplier_percent`] on top of its own cycle scaling
pub fn select_enemies<R: RandomSource + ?Sized>(
    bosses_defeated: u32,
    cycle: u32,
    rng: &mut R,
) -> Result<Vec<Character>, EntityError> {
    let percent = wave_multiplier_percent(bosses_defeated, cycle);
    let batch = [
        (Tier::Low, LOW_TIER_BATCH),
        (Tier::Mid, MID_TIER_BATCH),
        (Tier::High, HIGH_TIER_BATCH),
    ];

    let mut enemies = Vec::with_capacity(LOW_TIER_BATCH + MID_TIER_BATCH + HIGH_TIER_BATCH);
    for (tier, count) in batch {
        for _ in 0..count {
            let mut enemy = generate_enemy(tier, cycle, rng)?;
            enemy.scale_stats(percent);
            enemies.push(enemy);
        }
    }
    log::debug!(
        "selected {} enemies (bosses {}, cycle {}, x{}%)",
        enemies.len(),
        bosses_defeated,
        cycle,
        percent
    );
    Ok(enemies)
}
