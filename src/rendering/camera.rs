//! Camera helpers: canvas-local to screen mapping and the 2D view camera.

use bevy::prelude::*;

use super::canvas::Canvas;

/// Map a point in the canvas's current local space to absolute screen
/// coordinates (origin top-left, y down).
pub fn local_to_screen<C: Canvas + ?Sized>(canvas: &C, x: f32, y: f32) -> Vec2 {
    canvas.transform().transform_point2(Vec2::new(x, y))
}

/// Map absolute screen coordinates to 2D world space for a camera centered on
/// an arena of size `arena` (world origin at the arena center, y up).
pub fn screen_to_world(point: Vec2, arena: Vec2) -> Vec2 {
    Vec2::new(point.x - arena.x * 0.5, arena.y * 0.5 - point.y)
}

/// Marker for the arena camera.
#[derive(Component)]
pub struct ArenaCamera;

/// Spawn the 2D camera the arena is drawn through.
pub fn spawn_arena_camera(mut commands: Commands) {
    commands.spawn((Camera2d, ArenaCamera));
}
