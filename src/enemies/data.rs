//! Enemy data loading from RON files.

use bevy::prelude::*;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;

use super::components::{Enemy, EnemyKind};
use crate::core::{load_ron, DataLoadError};

/// Location of the enemy definitions file.
pub const ENEMY_DATA_PATH: &str = "assets/data/enemies.ron";

fn default_spawn_weight() -> f32 {
    1.0
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct EnemyDefinition {
    pub max_hp: f32,
    /// Base speed before difficulty scaling. Stationary kinds omit it.
    #[serde(default)]
    pub speed: Option<f32>,
    /// Relative chance of this kind being picked by the spawner.
    #[serde(default = "default_spawn_weight")]
    pub spawn_weight: f32,
}

impl EnemyDefinition {
    /// Build a fresh enemy from this definition.
    pub fn instantiate(&self, kind: EnemyKind, position: Vec2) -> Enemy {
        Enemy {
            speed: self.speed,
            ..Enemy::new(kind, position, self.max_hp)
        }
    }
}

/// On-disk layout of `enemies.ron`, keyed by kind name.
#[derive(Deserialize, Debug)]
struct EnemyDefinitionsFile {
    enemies: HashMap<String, EnemyDefinition>,
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Debug, Clone)]
pub struct EnemyRegistry {
    pub definitions: HashMap<EnemyKind, EnemyDefinition>,
}

impl Default for EnemyRegistry {
    fn default() -> Self {
        let definitions = [
            (EnemyKind::Hunter, 3.0, Some(2.0), 4.0),
            (EnemyKind::Interceptor, 2.0, Some(3.5), 2.0),
            (EnemyKind::Shooter, 5.0, Some(1.0), 2.0),
            (EnemyKind::Dasher, 3.0, Some(1.5), 2.0),
        ]
        .into_iter()
        .map(|(kind, max_hp, speed, spawn_weight)| {
            (kind, EnemyDefinition { max_hp, speed, spawn_weight })
        })
        .collect();

        Self { definitions }
    }
}

impl EnemyRegistry {
    /// Build a registry from raw `(name, definition)` pairs.
    ///
    /// Unknown names are treated as Hunter, but never replace an explicit
    /// Hunter entry.
    fn from_named(entries: HashMap<String, EnemyDefinition>) -> Self {
        let mut definitions = HashMap::new();
        let mut unknown = Vec::new();

        for (name, definition) in entries {
            let kind = EnemyKind::from_name(&name);
            let is_hunter_name = name.trim().eq_ignore_ascii_case("hunter");
            if kind == EnemyKind::Hunter && !is_hunter_name {
                unknown.push((name, definition));
            } else {
                definitions.insert(kind, definition);
            }
        }

        for (name, definition) in unknown {
            warn!("Unknown enemy kind '{}', treating it as hunter", name);
            definitions.entry(EnemyKind::Hunter).or_insert(definition);
        }

        Self { definitions }
    }

    /// Parse a registry from RON text.
    pub fn from_ron(origin: &str, contents: &str) -> Result<Self, DataLoadError> {
        let file: EnemyDefinitionsFile = crate::core::parse_ron(origin, contents)?;
        Ok(Self::from_named(file.enemies))
    }

    /// Get an enemy definition by kind.
    pub fn get(&self, kind: EnemyKind) -> Option<&EnemyDefinition> {
        self.definitions.get(&kind)
    }

    /// Pick a kind at random, weighted by `spawn_weight`.
    ///
    /// Returns `None` if nothing is registered or every weight is zero.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(EnemyKind, &EnemyDefinition)> {
        let candidates: Vec<(EnemyKind, &EnemyDefinition)> = EnemyKind::ALL
            .iter()
            .filter_map(|kind| self.get(*kind).map(|def| (*kind, def)))
            .collect();

        let weights = candidates.iter().map(|(_, def)| def.spawn_weight.max(0.0));
        let index = WeightedIndex::new(weights).ok()?;
        candidates.get(index.sample(rng)).copied()
    }
}

/// Load all enemy definitions at startup.
pub fn load_enemy_definitions(mut commands: Commands) {
    let registry = match load_ron::<EnemyDefinitionsFile>(ENEMY_DATA_PATH) {
        Ok(file) => EnemyRegistry::from_named(file.enemies),
        Err(e @ DataLoadError::FileNotFound(_)) => {
            warn!("{}. Using built-in enemy definitions.", e);
            EnemyRegistry::default()
        }
        Err(e) => {
            error!("{}. Using built-in enemy definitions.", e);
            EnemyRegistry::default()
        }
    };

    info!("Loaded {} enemy definitions", registry.definitions.len());
    commands.insert_resource(registry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn parses_definitions_keyed_by_name() {
        let registry = EnemyRegistry::from_ron(
            "inline",
            r#"(enemies: {
                "shooter": (max_hp: 6.0),
                "dasher": (max_hp: 2.0, speed: Some(4.0), spawn_weight: 3.0),
            })"#,
        )
        .unwrap();

        let shooter = registry.get(EnemyKind::Shooter).unwrap();
        assert_eq!(shooter.speed, None);
        assert_eq!(shooter.spawn_weight, 1.0);
        assert_eq!(registry.get(EnemyKind::Dasher).unwrap().speed, Some(4.0));
        assert!(registry.get(EnemyKind::Hunter).is_none());
    }

    #[test]
    fn unknown_names_fill_in_for_hunter() {
        let registry = EnemyRegistry::from_ron(
            "inline",
            r#"(enemies: { "bomber": (max_hp: 9.0) })"#,
        )
        .unwrap();
        assert_eq!(registry.get(EnemyKind::Hunter).unwrap().max_hp, 9.0);
    }

    #[test]
    fn explicit_hunter_wins_over_unknown_names() {
        let registry = EnemyRegistry::from_ron(
            "inline",
            r#"(enemies: { "bomber": (max_hp: 9.0), "hunter": (max_hp: 1.0) })"#,
        )
        .unwrap();
        assert_eq!(registry.get(EnemyKind::Hunter).unwrap().max_hp, 1.0);
    }

    #[test]
    fn choose_skips_zero_weight_kinds() {
        let mut registry = EnemyRegistry::default();
        for (kind, def) in registry.definitions.iter_mut() {
            def.spawn_weight = if *kind == EnemyKind::Interceptor { 1.0 } else { 0.0 };
        }

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let (kind, _) = registry.choose(&mut rng).unwrap();
            assert_eq!(kind, EnemyKind::Interceptor);
        }
    }

    #[test]
    fn choose_on_empty_registry_is_none() {
        let registry = EnemyRegistry { definitions: HashMap::new() };
        let mut rng = StdRng::seed_from_u64(1);
        assert!(registry.choose(&mut rng).is_none());
    }

    #[test]
    fn instantiate_copies_definition() {
        let def = EnemyDefinition { max_hp: 4.0, speed: Some(2.5), spawn_weight: 1.0 };
        let enemy = def.instantiate(EnemyKind::Dasher, Vec2::new(10.0, 20.0));
        assert_eq!(enemy.hp, 4.0);
        assert_eq!(enemy.max_hp, 4.0);
        assert_eq!(enemy.speed, Some(2.5));
        assert_eq!(enemy.position, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn shipped_enemy_file_parses() {
        let contents = std::fs::read_to_string(ENEMY_DATA_PATH).unwrap();
        let registry = EnemyRegistry::from_ron(ENEMY_DATA_PATH, &contents).unwrap();
        for kind in EnemyKind::ALL {
            assert!(registry.get(kind).is_some(), "missing {:?}", kind);
        }
    }
}
