//! Core plugin that sets up game states, events, and settings.

use bevy::prelude::*;

use super::events::*;
use super::settings::load_game_settings;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused)
/// - Global events (UiRequest)
/// - Settings loaded from `assets/data/settings.ron`
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<UiRequest>()

            // Settings are needed by every other plugin's startup systems
            .add_systems(PreStartup, load_game_settings)

            // Data files are read synchronously at startup, so loading is done
            // by the time the state machine first runs
            .add_systems(OnEnter(GameState::Loading), transition_to_in_game)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input
                    .run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            );
    }
}

/// Immediately transition from Loading to InGame.
fn transition_to_in_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            GameState::Loading => {}
        }
    }
}
