//! Game settings loaded from external RON file.
//!
//! Difficulty, accessibility and arena layout can be changed without
//! recompilation.

use bevy::prelude::*;
use serde::Deserialize;

use super::data::load_or_default;

/// Location of the settings file, relative to the working directory.
pub const SETTINGS_PATH: &str = "assets/data/settings.ron";

/// Player-facing settings loaded from `assets/data/settings.ron`.
#[derive(Resource, Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameSettings {
    /// Coarse difficulty name (`easy`, `medium`, `hard`, `insane`).
    /// Anything else plays as the normal tier.
    pub difficulty: String,
    /// Accessibility override that suppresses hit-flash feedback.
    pub reduce_flashing: bool,
    /// Size of one arena cell in pixels.
    pub grid_size: f32,
    /// Camera tilt used by the pseudo-3D compositor (0.0 = straight down).
    pub camera_tilt: f32,
    /// Arena size in pixels (width, height).
    pub arena: (f32, f32),
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            difficulty: "medium".to_string(),
            reduce_flashing: false,
            grid_size: 24.0,
            camera_tilt: 0.0,
            arena: (960.0, 720.0),
        }
    }
}

impl GameSettings {
    /// Load settings from RON file.
    pub fn load() -> Self {
        load_or_default(SETTINGS_PATH)
    }

    /// Arena size as a vector.
    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.arena.0, self.arena.1)
    }
}

/// System to load settings at startup.
///
/// Settings already inserted by the app builder are kept as they are.
pub fn load_game_settings(mut commands: Commands, existing: Option<Res<GameSettings>>) {
    let settings = match existing {
        Some(settings) => (*settings).clone(),
        None => GameSettings::load(),
    };
    info!(
        "Settings: difficulty '{}', grid {}, tilt {}, reduce flashing {}",
        settings.difficulty, settings.grid_size, settings.camera_tilt, settings.reduce_flashing
    );
    commands.insert_resource(settings);
}
