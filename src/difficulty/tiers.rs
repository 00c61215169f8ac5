//! Difficulty tiers and the per-tier configuration table.
//!
//! Difficulty only changes how many enemies may be alive at once and how fast
//! they move. Attack cadence is left to the AI and never scaled here.

use bevy::prelude::*;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::enemies::Enemy;

/// Coarse difficulty as chosen by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Insane,
}

/// A difficulty name that matches none of the known settings.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown difficulty '{0}'")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "insane" => Ok(Difficulty::Insane),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// Internal difficulty bucket. Ordered from easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
pub enum DifficultyTier {
    Easy,
    #[default]
    Normal,
    Hard,
    Elite,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Easy,
        DifficultyTier::Normal,
        DifficultyTier::Hard,
        DifficultyTier::Elite,
    ];
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Normal => "normal",
            DifficultyTier::Hard => "hard",
            DifficultyTier::Elite => "elite",
        };
        f.write_str(name)
    }
}

impl From<Difficulty> for DifficultyTier {
    fn from(diff: Difficulty) -> Self {
        tier_from_difficulty(diff)
    }
}

/// Tuning for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TierConfig {
    /// Multiplier applied to enemy speed at spawn.
    pub speed_mod: f32,
    /// Upper bound on concurrently alive enemies.
    pub max_enemies: u32,
}

/// Tier to config mapping. Built once at startup, read-only afterwards.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
pub struct TierTable {
    pub easy: TierConfig,
    pub normal: TierConfig,
    pub hard: TierConfig,
    pub elite: TierConfig,
}

impl TierTable {
    /// Built-in tuning, used when no data file overrides it.
    pub const DEFAULT: TierTable = TierTable {
        easy: TierConfig { speed_mod: 0.8, max_enemies: 3 },
        normal: TierConfig { speed_mod: 1.0, max_enemies: 5 },
        hard: TierConfig { speed_mod: 1.25, max_enemies: 8 },
        elite: TierConfig { speed_mod: 1.5, max_enemies: 12 },
    };

    pub const fn config(&self, tier: DifficultyTier) -> &TierConfig {
        match tier {
            DifficultyTier::Easy => &self.easy,
            DifficultyTier::Normal => &self.normal,
            DifficultyTier::Hard => &self.hard,
            DifficultyTier::Elite => &self.elite,
        }
    }

    pub const fn max_enemies(&self, tier: DifficultyTier) -> u32 {
        self.config(tier).max_enemies
    }

    pub const fn speed_multiplier(&self, tier: DifficultyTier) -> f32 {
        self.config(tier).speed_mod
    }

    /// Multiply `enemy.speed` by the tier's speed modifier.
    ///
    /// Enemies without a speed are left untouched. Not idempotent: calling
    /// this twice compounds the multiplier, so the spawn path calls it once.
    pub fn scale_enemy(&self, enemy: &mut Enemy, tier: DifficultyTier) {
        let config = self.config(tier);
        if let Some(speed) = enemy.speed.as_mut() {
            *speed *= config.speed_mod;
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Map the player's difficulty choice to an internal tier.
pub const fn tier_from_difficulty(diff: Difficulty) -> DifficultyTier {
    match diff {
        Difficulty::Easy => DifficultyTier::Easy,
        Difficulty::Medium => DifficultyTier::Normal,
        Difficulty::Hard => DifficultyTier::Hard,
        Difficulty::Insane => DifficultyTier::Elite,
    }
}

/// Resolve a difficulty setting string to a tier. Unrecognized values play as
/// `Normal`.
pub fn resolve_tier(setting: &str) -> DifficultyTier {
    setting
        .parse::<Difficulty>()
        .map(tier_from_difficulty)
        .unwrap_or(DifficultyTier::Normal)
}

// The free functions below always read the built-in tuning. A running game
// may load a different `TierTable` from `difficulty.ron`; gameplay code goes
// through that resource's methods instead.

/// Maximum concurrent enemies for `tier` under the built-in table, ignoring
/// any `difficulty.ron` override.
pub const fn max_enemies(tier: DifficultyTier) -> u32 {
    TierTable::DEFAULT.max_enemies(tier)
}

/// Speed multiplier for `tier` under the built-in table, ignoring any
/// `difficulty.ron` override.
pub const fn speed_multiplier(tier: DifficultyTier) -> f32 {
    TierTable::DEFAULT.speed_multiplier(tier)
}

/// Scale an enemy using the built-in table, ignoring any `difficulty.ron`
/// override. Systems use [`TierTable::scale_enemy`] on the loaded resource.
pub fn scale_enemy(enemy: &mut Enemy, tier: DifficultyTier) {
    TierTable::DEFAULT.scale_enemy(enemy, tier);
}
