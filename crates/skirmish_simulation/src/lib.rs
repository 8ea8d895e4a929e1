//! SKIRMISH Simulation Core
//!
//! ECS-симуляция melee-боя на Bevy 0.16 (headless)
//!
//! Слои:
//! - ECS = game state + combat rules (Character, hit resolution, damage, death)
//! - Host (engine / client) = rendering, animation playback, asset spawning;
//!   общается с ECS только через events (`SpawnVfx`, `AnimationTrigger`) и `GameSession`

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod combat;
pub mod components;
pub mod config;
pub mod error;
pub mod layers;
pub mod logger;
pub mod session;
pub mod skirmish;
pub mod spawn;

// Re-export для удобства
pub use combat::{
    AttackCheckHit, AttackIntent, CharacterDied, CombatPlugin, DamageDealt, DamageRequest, Dead, DeathHook,
    SpawnVfx, VfxJournal, VfxKind,
};
pub use components::*;
pub use config::Roster;
pub use error::{CombatError, ConfigError};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use session::{GameSession, MatchResult};
pub use skirmish::{SkirmishDriver, SkirmishPlugin};
pub use spawn::{spawn_character, spawn_roster};

/// Simulation tick rate (Hz)
pub const TICK_RATE: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick
        app.insert_resource(Time::<Fixed>::from_hz(TICK_RATE));

        // Детерминистичный RNG (seed по умолчанию, если хост не положил свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app.add_plugins((CombatPlugin, SkirmishPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время ручное: каждый `app.update()` (кроме первого) = ровно один FixedUpdate тик.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_RATE,
        )))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
