//! Enemies module - enemy records, data, and spawning.

mod components;
pub mod data;
mod plugin;
pub mod spawning;

pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry};
pub use plugin::EnemyPlugin;
pub use spawning::EnemySpawner;
