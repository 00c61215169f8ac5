//! Rendering plugin - draws the arena's enemies every frame.

use bevy::prelude::*;
use rand::Rng;

use super::camera::spawn_arena_camera;
use super::canvas::Canvas;
use super::display_list::DisplayList;
use super::enemy::{render_enemy, RenderContext};
use super::gizmo_backend::replay_with_gizmos;
use crate::core::{GameSettings, SnakeHead, UiRequest};
use crate::enemies::Enemy;

/// Rendering plugin - camera setup and per-frame enemy drawing.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_arena_camera)
            .add_systems(Update, draw_enemies);
    }
}

/// Draw `enemies` into a fresh display list, each at its own position.
///
/// Enemies further down the screen are drawn last so they overlap the ones
/// behind them. Returns the list and the health bar requests in draw order.
pub fn build_enemy_frame<'a, R: Rng + ?Sized>(
    enemies: impl IntoIterator<Item = &'a Enemy>,
    ctx: &RenderContext,
    rng: &mut R,
) -> (DisplayList, Vec<UiRequest>) {
    let mut sorted: Vec<&Enemy> = enemies.into_iter().collect();
    sorted.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));

    let mut list = DisplayList::new();
    let mut requests = Vec::new();

    for enemy in sorted {
        list.save();
        list.translate(enemy.position.x, enemy.position.y);
        if let Some(request) = render_enemy(&mut list, enemy, ctx, rng) {
            requests.push(request);
        }
        list.restore();
    }

    (list, requests)
}

/// Animation clock in ms.
///
/// Uses the wrapped elapsed time so phases keep their precision in long
/// sessions; the clock jumps back once per wrap period (an hour by default).
pub fn animation_clock(time: &Time) -> f32 {
    (time.elapsed_secs_wrapped_f64() * 1000.0) as f32
}

/// Draw all enemies and hand their health bars to the UI.
pub fn draw_enemies(
    mut gizmos: Gizmos,
    time: Res<Time>,
    settings: Res<GameSettings>,
    enemies: Query<&Enemy>,
    snake: Query<&SnakeHead>,
    mut requests: EventWriter<UiRequest>,
) {
    let ctx = RenderContext {
        grid_size: settings.grid_size,
        snake_head: snake.get_single().ok().map(|head| head.position),
        now: animation_clock(&time),
        reduce_flashing: settings.reduce_flashing,
        tilt: settings.camera_tilt,
    };

    let mut rng = rand::thread_rng();
    let (list, bars) = build_enemy_frame(enemies.iter(), &ctx, &mut rng);

    replay_with_gizmos(&list, &mut gizmos, settings.arena_size());
    requests.send_batch(bars);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::EnemyKind;
    use rand::rngs::StdRng;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use std::time::Duration;

    fn ctx() -> RenderContext {
        RenderContext {
            grid_size: 24.0,
            snake_head: Some(Vec2::new(400.0, 300.0)),
            now: 1234.0,
            reduce_flashing: false,
            tilt: 0.35,
        }
    }

    #[test]
    fn only_damaged_enemies_produce_bars() {
        let mut hurt = Enemy::new(EnemyKind::Shooter, Vec2::new(100.0, 100.0), 5.0);
        hurt.hp = 2.0;
        let healthy = Enemy::new(EnemyKind::Dasher, Vec2::new(200.0, 50.0), 5.0);

        let mut rng = StdRng::seed_from_u64(5);
        let (list, bars) = build_enemy_frame([&hurt, &healthy], &ctx(), &mut rng);

        assert_eq!(bars.len(), 1);
        assert!(matches!(
            bars[0],
            UiRequest::HealthBar { value, max, .. } if value == 2.0 && max == 5.0
        ));
        assert!(!list.is_empty());
        assert_eq!(list.save_depth(), 0);
    }

    #[test]
    fn health_bars_sit_near_their_enemy() {
        let mut hurt = Enemy::new(EnemyKind::Hunter, Vec2::new(320.0, 240.0), 5.0);
        hurt.hp = 1.0;

        let mut rng = StdRng::seed_from_u64(5);
        let (_, bars) = build_enemy_frame([&hurt], &ctx(), &mut rng);

        let UiRequest::HealthBar { x, y, .. } = bars[0];
        assert!((x - 320.0).abs() < 0.01);
        assert!(y < 240.0 && y > 240.0 - 40.0);
    }

    #[test]
    fn enemies_are_drawn_back_to_front() {
        let mut front = Enemy::new(EnemyKind::Hunter, Vec2::new(0.0, 500.0), 5.0);
        front.hp = 1.0;
        let mut back = Enemy::new(EnemyKind::Hunter, Vec2::new(0.0, 10.0), 5.0);
        back.hp = 2.0;

        let mut rng = StdRng::seed_from_u64(5);
        let (_, bars) = build_enemy_frame([&front, &back], &ctx(), &mut rng);

        let values: Vec<f32> = bars
            .iter()
            .map(|UiRequest::HealthBar { value, .. }| *value)
            .collect();
        assert_eq!(values, vec![2.0, 1.0]);
    }

    #[test]
    fn animation_clock_stays_precise_after_hours() {
        let mut time = Time::<()>::default();
        time.advance_by(Duration::from_secs(5 * 3600) + Duration::from_millis(1250));
        assert_relative_eq!(animation_clock(&time), 1250.0, epsilon = 1e-3);

        time.advance_by(Duration::from_millis(16));
        assert_relative_eq!(animation_clock(&time), 1266.0, epsilon = 1e-3);
    }
}
