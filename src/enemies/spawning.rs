//! Enemy spawning system.
//!
//! A repeating timer tops the arena up one enemy at a time until the active
//! tier's population cap is reached.

use bevy::prelude::*;
use rand::Rng;

use super::components::Enemy;
use super::data::EnemyRegistry;
use crate::core::GameSettings;
use crate::difficulty::{ActiveTier, SpeedScaled, TierTable};

/// Spawn cadence.
#[derive(Resource)]
pub struct EnemySpawner {
    pub timer: Timer,
}

impl Default for EnemySpawner {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.5, TimerMode::Repeating),
        }
    }
}

/// Pick a point one cell inside a random edge of the arena.
pub fn edge_position<R: Rng + ?Sized>(arena: Vec2, inset: f32, rng: &mut R) -> Vec2 {
    let inset = inset.min(arena.x * 0.5).min(arena.y * 0.5).max(0.0);
    let along_x = rng.gen_range(inset..=(arena.x - inset));
    let along_y = rng.gen_range(inset..=(arena.y - inset));

    match rng.gen_range(0..4) {
        0 => Vec2::new(along_x, inset),
        1 => Vec2::new(arena.x - inset, along_y),
        2 => Vec2::new(along_x, arena.y - inset),
        _ => Vec2::new(inset, along_y),
    }
}

/// Spawn one enemy per timer tick while below the tier's cap.
///
/// Speed is scaled for the active tier before the enemy enters the world.
pub fn spawn_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut spawner: ResMut<EnemySpawner>,
    registry: Res<EnemyRegistry>,
    table: Res<TierTable>,
    active: Res<ActiveTier>,
    settings: Res<GameSettings>,
    enemies: Query<(), With<Enemy>>,
) {
    spawner.timer.tick(time.delta());
    if !spawner.timer.just_finished() {
        return;
    }

    let alive = enemies.iter().count();
    let cap = table.max_enemies(active.0) as usize;
    if alive >= cap {
        return;
    }

    let mut rng = rand::thread_rng();
    let Some((kind, definition)) = registry.choose(&mut rng) else {
        warn!("No spawnable enemy definitions");
        return;
    };

    let position = edge_position(settings.arena_size(), settings.grid_size, &mut rng);
    let mut enemy = definition.instantiate(kind, position);
    table.scale_enemy(&mut enemy, active.0);
    let speed = enemy.speed;
    commands.spawn((enemy, SpeedScaled));

    info!(
        "Spawned {:?} at ({:.0}, {:.0}) with speed {:?}, {}/{} alive",
        kind,
        position.x,
        position.y,
        speed,
        alive + 1,
        cap
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::{scale_spawned_enemies, DifficultyTier};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn spawner_app(tier: DifficultyTier) -> App {
        let mut app = App::new();
        app.insert_resource(Time::<()>::default())
            .insert_resource(EnemySpawner {
                timer: Timer::from_seconds(0.1, TimerMode::Repeating),
            })
            .insert_resource(EnemyRegistry::default())
            .insert_resource(TierTable::default())
            .insert_resource(ActiveTier(tier))
            .insert_resource(GameSettings::default())
            .add_systems(Update, spawn_enemies);
        app
    }

    fn step(app: &mut App) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(100));
        app.update();
    }

    fn alive(app: &mut App) -> usize {
        app.world_mut()
            .query::<&Enemy>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn population_stops_at_tier_cap() {
        let mut app = spawner_app(DifficultyTier::Easy);
        for _ in 0..10 {
            step(&mut app);
        }
        assert_eq!(alive(&mut app), 3);
    }

    #[test]
    fn higher_tiers_allow_more_enemies() {
        let mut app = spawner_app(DifficultyTier::Elite);
        for _ in 0..20 {
            step(&mut app);
        }
        assert_eq!(alive(&mut app), 12);
    }

    #[test]
    fn enemies_leave_their_spawn_frame_already_scaled() {
        let mut app = spawner_app(DifficultyTier::Hard);
        app.add_systems(Update, scale_spawned_enemies);

        // Registry speeds differ per kind, so check each spawn as it lands
        for _ in 0..4 {
            step(&mut app);
            let registry = app.world().resource::<EnemyRegistry>().clone();
            let mut query = app.world_mut().query::<(&Enemy, Option<&SpeedScaled>)>();
            for (enemy, marker) in query.iter(app.world()) {
                assert!(marker.is_some());
                let base = registry.get(enemy.kind).and_then(|def| def.speed);
                match (base, enemy.speed) {
                    (Some(base), Some(speed)) => assert_relative_eq!(speed, base * 1.25),
                    (None, speed) => assert_eq!(speed, None),
                    (Some(_), None) => panic!("{:?} lost its speed", enemy.kind),
                }
            }
        }
        assert_eq!(alive(&mut app), 4);
    }

    #[test]
    fn nothing_spawns_before_the_timer_fires() {
        let mut app = spawner_app(DifficultyTier::Normal);
        app.update();
        assert_eq!(alive(&mut app), 0);
    }

    #[test]
    fn edge_positions_stay_inside_the_arena() {
        let arena = Vec2::new(320.0, 240.0);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let p = edge_position(arena, 16.0, &mut rng);
            assert!(p.x >= 16.0 && p.x <= arena.x - 16.0);
            assert!(p.y >= 16.0 && p.y <= arena.y - 16.0);
            let on_edge = p.x == 16.0
                || p.y == 16.0
                || p.x == arena.x - 16.0
                || p.y == arena.y - 16.0;
            assert!(on_edge);
        }
    }
}
