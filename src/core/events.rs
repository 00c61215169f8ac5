//! Global events and shared markers used for cross-system communication.

use bevy::prelude::*;

/// Deferred draw instruction for the UI overlay.
///
/// Produced by the enemy renderer at most once per enemy per frame and
/// consumed by the overlay in the same frame. Never stored.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum UiRequest {
    /// A small bar floating above an entity, in absolute canvas coordinates.
    HealthBar {
        x: f32,
        y: f32,
        value: f32,
        max: f32,
        color: Color,
        width: f32,
        height: f32,
    },
}

/// The snake's head, which enemies turn to face.
///
/// Owned by the snake simulation; this crate only reads it.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SnakeHead {
    /// Position in arena pixels.
    pub position: Vec2,
}
