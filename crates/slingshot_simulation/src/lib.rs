//! Slingshot Simulation Core
//!
//! ECS-симуляция на Bevy 0.16 + Rapier (fixed timestep 60Hz)
//!
//! Домены (порядок внутри тика):
//! 1. ground: shape-cast сенсор земли
//! 2. locomotion: разгон, jump buffering, coyote time
//! 3. targeting: реестр целей, cone scan + line-of-sight
//! 4. slingshot: dual-hold capture/release, pairing, launch impulse
//! 5. recovery: suspend → stabilize → navigate

use bevy::app::FixedMain;
use bevy::ecs::schedule::ExecutorKind;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod error;
pub mod ground;
pub mod locomotion;
pub mod logger;
pub mod physics;
pub mod recovery;
pub mod shared;
pub mod slingshot;
pub mod targeting;

// Re-export для удобства
pub use components::*;
pub use config::SlingshotTunables;
pub use error::{ConfigError, SlingshotError};
pub use ground::{GroundContactChanged, GroundContactEdge, GroundProbe, GroundSensor};
pub use locomotion::{JumpIntent, Jumped, LocomotionConfig, LocomotionPlugin, LocomotionState, MovementInput};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use physics::SlingshotPhysicsPlugin;
pub use recovery::{NavigationAgent, RecoveryConfig, RecoveryPlugin, RecoveryState};
pub use slingshot::{CaptureReleaseCoordinator, HoldChannel, HoldSlot, LaunchEvent, SlingshotConfig, SlingshotPlugin};
pub use targeting::{AimConfig, MostLikelyTarget, Target, TargetRegistry, TargetingPlugin};

/// Порядок доменов внутри FixedUpdate тика
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Sensing,
    Locomotion,
    Acquisition,
    CaptureRelease,
    Recovery,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Physics backend (SlingshotPhysicsPlugin) подключается отдельно: headless
/// тесты гоняют state machines без Rapier world.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Tunables: если не вставлены заранее, defaults
            .init_resource::<SlingshotTunables>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Sensing,
                    SimulationSet::Locomotion,
                    SimulationSet::Acquisition,
                    SimulationSet::CaptureRelease,
                    SimulationSet::Recovery,
                )
                    .chain(),
            )
            // Один поток: каналы и реестр обрабатываются в фиксированном порядке
            .edit_schedule(FixedUpdate, |schedule| {
                schedule.set_executor_kind(ExecutorKind::SingleThreaded);
            })
            .add_plugins((LocomotionPlugin, TargetingPlugin, SlingshotPlugin, RecoveryPlugin))
            .add_systems(FixedUpdate, clear_player_action_edges.after(SimulationSet::Recovery));
    }
}

/// Edges (just_pressed / just_released / look delta) живут ровно один тик
pub fn clear_player_action_edges(mut actions: Query<&mut PlayerActions>) {
    for mut actions in actions.iter_mut() {
        actions.clear_edges();
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

    /// Случайная точка в горизонтальном кольце вокруг `center`
    pub fn scatter_around(&mut self, center: Vec3, min_radius: f32, max_radius: f32) -> Vec3 {
        let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
        let radius = if max_radius > min_radius {
            self.rng.gen_range(min_radius..max_radius)
        } else {
            min_radius
        };
        center + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
    }
}

/// Создаёт minimal Bevy App для headless симуляции (без Rapier)
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin)
        .insert_resource(DeterministicRng::new(seed));

    app
}

/// Один fixed tick вручную: Time<Fixed> += timestep, затем весь FixedMain
///
/// Не зависит от wall clock: тесты получают точные timestamps (n / 60).
/// Generic `Time` на время тика показывает fixed clock (Rapier читает его).
///
/// First (и event_update_system в нём) здесь не запускается, поэтому буферы
/// событий симуляции свопаются в начале каждого тика: после тика
/// `iter_current_update_events` видит ровно события этого тика.
pub fn advance_fixed_tick(app: &mut App) {
    let world = app.world_mut();
    update_simulation_events(world);

    let Some(mut fixed) = world.get_resource_mut::<Time<Fixed>>() else {
        log_warning("advance_fixed_tick: no Time<Fixed> resource, tick skipped");
        return;
    };
    let timestep = fixed.timestep();
    fixed.advance_by(timestep);
    let fixed_as_generic = fixed.as_generic();

    let previous = world.get_resource::<Time>().copied();
    world.insert_resource(fixed_as_generic);
    world.run_schedule(FixedMain);
    if let Some(previous) = previous {
        world.insert_resource(previous);
    }
}

/// Double-buffer swap для всех событий симуляции
///
/// Событие живёт два свопа: читатели следующего тика его ещё видят,
/// дальше оно отбрасывается.
pub fn update_simulation_events(world: &mut World) {
    update_events::<GroundContactChanged>(world);
    update_events::<JumpIntent>(world);
    update_events::<Jumped>(world);
    update_events::<slingshot::TargetCaptured>(world);
    update_events::<slingshot::TargetReleased>(world);
    update_events::<LaunchEvent>(world);
}

fn update_events<T: Event>(world: &mut World) {
    if let Some(mut events) = world.get_resource_mut::<Events<T>>() {
        events.update();
    }
}

/// Snapshot компонента `T` по всем entities (для сравнения детерминизма)
///
/// Entities сортируются по index, компонент сериализуется через Debug.
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
