//! Enemy-related components.

use bevy::prelude::*;
use serde::Deserialize;

/// Enemy archetype. Closed set; drives both visuals and spawn data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum EnemyKind {
    /// Basic chaser. Also the fallback for unknown kind names.
    #[default]
    Hunter,
    /// Fast flyer with twin engines.
    Interceptor,
    /// Slow gun platform that telegraphs its shots.
    Shooter,
    /// Charges up, then dashes in a straight line.
    Dasher,
}

impl EnemyKind {
    /// All kinds, in declaration order.
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Hunter,
        EnemyKind::Interceptor,
        EnemyKind::Shooter,
        EnemyKind::Dasher,
    ];

    /// Parse a kind name from data files, case-insensitively.
    ///
    /// Unknown names yield `Hunter` rather than an error.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "interceptor" => EnemyKind::Interceptor,
            "shooter" => EnemyKind::Shooter,
            "dasher" => EnemyKind::Dasher,
            _ => EnemyKind::Hunter,
        }
    }
}

/// Dasher attack phases. Other kinds stay `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashState {
    #[default]
    Idle,
    /// Winding up before a dash.
    Charge,
    /// Dashing.
    Dash,
}

/// An enemy in the arena.
///
/// Owned by the game state; the renderer only reads it and the difficulty
/// scaler only writes `speed`.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Position in arena pixels.
    pub position: Vec2,
    /// Velocity in pixels per tick.
    pub velocity: Vec2,
    /// Movement speed. Enemies without one are not affected by scaling.
    pub speed: Option<f32>,
    pub hp: f32,
    pub max_hp: f32,
    /// Milliseconds since the last attack; shooters charge past 2000.
    pub attack_timer: f32,
    pub dash_state: DashState,
    /// Remaining stun time; positive while stunned.
    pub stun_timer: f32,
    /// Remaining hit-flash time; positive right after taking damage.
    pub flash: f32,
}

impl Enemy {
    /// A full-health enemy of `kind` at rest at `position`.
    pub fn new(kind: EnemyKind, position: Vec2, max_hp: f32) -> Self {
        Self {
            kind,
            position,
            velocity: Vec2::ZERO,
            speed: None,
            hp: max_hp,
            max_hp,
            attack_timer: 0.0,
            dash_state: DashState::Idle,
            stun_timer: 0.0,
            flash: 0.0,
        }
    }

    /// Builder-style speed setter.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn is_damaged(&self) -> bool {
        self.hp < self.max_hp
    }
}
