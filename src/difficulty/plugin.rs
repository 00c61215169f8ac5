//! Difficulty plugin - tier selection and spawn-time scaling.

use bevy::prelude::*;

use super::tiers::{resolve_tier, Difficulty, DifficultyTier, TierTable};
use crate::core::{load_or_default, GameSettings};
use crate::enemies::Enemy;

/// Location of the optional tier table override.
pub const TIER_TABLE_PATH: &str = "assets/data/difficulty.ron";

/// Difficulty plugin - loads the tier table and scales newly spawned enemies.
pub struct DifficultyPlugin;

impl Plugin for DifficultyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveTier>()
            .init_resource::<TierTable>()
            .add_systems(Startup, (load_tier_table, select_active_tier))
            .add_systems(Update, scale_spawned_enemies);
    }
}

/// Tier the current run is played at.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveTier(pub DifficultyTier);

/// Marks an enemy whose speed has already been scaled for the active tier.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SpeedScaled;

/// Load the tier table at startup.
pub fn load_tier_table(mut commands: Commands) {
    let table: TierTable = load_or_default(TIER_TABLE_PATH);
    commands.insert_resource(table);
}

/// Resolve the tier from the difficulty setting.
pub fn select_active_tier(settings: Res<GameSettings>, mut active: ResMut<ActiveTier>) {
    if let Err(e) = settings.difficulty.parse::<Difficulty>() {
        warn!("{}, playing at normal tier", e);
    }
    active.0 = resolve_tier(&settings.difficulty);
    info!("Difficulty tier: {}", active.0);
}

/// Apply the active tier's speed modifier to each enemy exactly once.
pub fn scale_spawned_enemies(
    mut commands: Commands,
    table: Res<TierTable>,
    active: Res<ActiveTier>,
    mut query: Query<(Entity, &mut Enemy), Without<SpeedScaled>>,
) {
    for (entity, mut enemy) in query.iter_mut() {
        table.scale_enemy(&mut enemy, active.0);
        commands.entity(entity).insert(SpeedScaled);
        debug!("Scaled {:?} speed to {:?}", enemy.kind, enemy.speed);
    }
}
