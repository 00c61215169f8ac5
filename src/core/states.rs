//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Enemy spawning only
//! runs in the InGame state, while drawing keeps going while paused so the
//! arena stays visible.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while data files are read
/// - Move to `InGame` once startup data is in place
/// - `Paused` freezes spawning but keeps the arena visible
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
}
