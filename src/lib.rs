//! Serpent Strike - enemy rendering and difficulty scaling for a top-down
//! arcade snake game, built on Bevy.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, settings and data loading
//! - **Difficulty**: Tier selection, population caps, spawn-time speed scaling
//! - **Enemies**: Enemy records, definitions, spawning
//! - **Rendering**: Procedural enemy visuals through a pseudo-3D compositor
//! - **UI**: Health bar overlay

pub mod core;
pub mod difficulty;
pub mod enemies;
pub mod rendering;
pub mod ui;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct SerpentStrikePlugin;

impl Plugin for SerpentStrikePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Difficulty tiers and scaling
            .add_plugins(difficulty::DifficultyPlugin)

            // Enemy data and spawning
            .add_plugins(enemies::EnemyPlugin)

            // Enemy drawing
            .add_plugins(rendering::RenderingPlugin)

            // Overlay
            .add_plugins(ui::UiPlugin);
    }
}
