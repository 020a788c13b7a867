//! Fleeing from battle

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::entity::{Tier, escape_chance_for_tier_name};
use crate::rng::RandomSource;

/// What a failed escape costs
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
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum EscapePolicy {
    /// The opponent gets a free attack, which is its turn
    #[default]
    OpponentStrikes,
    /// The round simply ends
    TurnPasses,
}

/// Roll to flee an opponent of `tier`: low 60%, mid 40%, high 20%, boss never
pub fn attempt_escape<R: RandomSource + ?Sized>(tier: Tier, rng: &mut R) -> bool {
    let escaped = rng.roll_under(tier.escape_chance());
    log::debug!("escape from {tier} tier: {}", if escaped { "ok" } else { "failed" });
    escaped
}

/// Same as [`attempt_escape`] for a tier given by name; unknown names never
/// let the hero go
pub fn attempt_escape_named<R: RandomSource + ?Sized>(tier: &str, rng: &mut R) -> bool {
    rng.roll_under(escape_chance_for_tier_name(tier))
}
