//! Difficulty module - tier lookup and spawn-time enemy scaling.

mod plugin;
mod tiers;

pub use plugin::{
    load_tier_table, scale_spawned_enemies, select_active_tier, ActiveTier, DifficultyPlugin,
    SpeedScaled, TIER_TABLE_PATH,
};
pub use tiers::{
    max_enemies, resolve_tier, scale_enemy, speed_multiplier, tier_from_difficulty, Difficulty,
    DifficultyTier, TierConfig, TierTable, UnknownDifficulty,
};
