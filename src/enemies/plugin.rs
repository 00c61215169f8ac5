//! Enemy plugin - registers enemy data and spawning systems.

use bevy::prelude::*;

use super::data::{load_enemy_definitions, EnemyRegistry};
use super::spawning::{spawn_enemies, EnemySpawner};
use crate::core::GameState;

/// Enemy plugin - handles enemy definitions and spawning.
///
/// Movement and attack behaviour belong to the simulation, not to this plugin.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyRegistry>()
            .init_resource::<EnemySpawner>()
            .add_systems(Startup, load_enemy_definitions)
            .add_systems(Update, spawn_enemies.run_if(in_state(GameState::InGame)));
    }
}
