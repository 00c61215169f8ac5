//! Serpent Strike - Entry Point
//!
//! Controls:
//! - Escape: Pause/Unpause

use bevy::prelude::*;

fn main() {
    let settings = serpent_strike::core::GameSettings::load();

    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Serpent Strike".to_string(),
                resolution: (settings.arena.0, settings.arena.1).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))

        .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.04)))

        // Read once here; the core plugin keeps this copy
        .insert_resource(settings)

        // Our game plugin
        .add_plugins(serpent_strike::SerpentStrikePlugin)

        .run();
}
