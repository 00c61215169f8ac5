//! UI plugin - overlay drawn on top of the arena.

use bevy::prelude::*;

use super::overlay::draw_ui_requests;
use crate::rendering::draw_enemies;

/// UI plugin - consumes `UiRequest` events after the world has been drawn.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, draw_ui_requests.after(draw_enemies));
    }
}
