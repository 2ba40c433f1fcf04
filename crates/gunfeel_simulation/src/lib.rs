//! GUNFEEL Simulation Core
//!
//! First-person locomotion + procedural анимация оружия на Bevy 0.16
//!
//! Слои:
//! - Чистые модели (Locomotion, WeaponAnimator) — plain structs, без App
//! - ECS интеграция (LocomotionPlugin) — компоненты, системы, spawn
//! - Client (отдельный crate) — устройства ввода, рендер, Rapier мир

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod animation;
pub mod config;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod player;
pub mod weapon;

// Re-export базовых типов для удобства
pub use animation::{Keyframe, ResponseCurve};
pub use config::{ConfigError, GameConfig};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use movement::{AgentConfig, CollisionMover, Locomotion, LocomotionAgent, LocomotionState};
pub use physics::{GroundPlane, GroundPlaneMover, RapierShapeMover};
pub use player::{
    spawn_player, AgentController, ControlConfig, HeldWeapon, InputSource, InputState, LocomotionPlugin,
    LocomotionSet, MoverBackend, PlayerController, PlayerEntities, PlayerView, WeaponPart,
};
pub use weapon::{RecoilEvent, RecoilStack, WeaponAnimator, WeaponDefinition, WeaponOffset};

/// Seed по умолчанию, если приложение не задало свой
pub const DEFAULT_SEED: u64 = 42;

/// Шаг симуляции headless режима (секунды)
pub const HEADLESS_FRAME_TIME: f64 = 1.0 / 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
#[derive(Default)]
pub struct SimulationPlugin {
    pub backend: MoverBackend,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Детерминистичный RNG (seed по умолчанию, если не задан снаружи)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(DEFAULT_SEED));
        }

        app.add_plugins(LocomotionPlugin {
            backend: self.backend,
        });
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

    /// Seed для noise слоя очередного оружия
    pub fn next_weapon_seed(&mut self) -> u32 {
        self.rng.gen()
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время идёт фиксированными шагами HEADLESS_FRAME_TIME на каждый `app.update()`
/// (первый update имеет dt = 0). Агенты стоят на GroundPlane (y = 0).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            HEADLESS_FRAME_TIME,
        )))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin::default());

    app
}

/// Spawn игрока с seed оружия из DeterministicRng мира
pub fn spawn_player_in_world(world: &mut World, config: &GameConfig, position: Vec3, yaw: f32) -> PlayerEntities {
    let seed = world
        .get_resource_mut::<DeterministicRng>()
        .map(|mut rng| rng.next_weapon_seed())
        .unwrap_or_default();

    let mut commands = world.commands();
    let entities = spawn_player(&mut commands, config, position, yaw, seed);
    world.flush();
    entities
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

    // Debug формат достаточен: сравниваем только прогоны одной сборки
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
