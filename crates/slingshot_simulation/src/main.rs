//! Headless slingshot demo
//!
//! Rapier world + scripted input: захват двух целей, синхронный release,
//! launch и recovery arc. Рендера нет, только лог.

use bevy::prelude::*;
use slingshot_simulation::config::DEFAULT_TUNABLES_PATH;
use slingshot_simulation::physics::{spawn_ground, spawn_player, spawn_static_target, spawn_target};
use slingshot_simulation::{
    advance_fixed_tick, create_headless_app, log_info, AimRig, ButtonState, DeterministicRng, HoldChannel,
    PlayerActions, RecoveryState, SlingshotPhysicsPlugin, SlingshotTunables,
};

const SEED: u64 = 42;
const DECOY_COUNT: usize = 6;
const TOTAL_TICKS: u32 = 600;

/// Scripted input: (тик, действие)
#[derive(Debug, Clone, Copy)]
enum Cue {
    Aim(usize),
    Press(HoldChannel),
    Release(HoldChannel),
}

const SCRIPT: &[(u32, Cue)] = &[
    (60, Cue::Aim(0)),
    (60, Cue::Press(HoldChannel::Primary)),
    (90, Cue::Release(HoldChannel::Primary)),
    (96, Cue::Aim(1)),
    (96, Cue::Press(HoldChannel::Secondary)),
    (99, Cue::Release(HoldChannel::Secondary)),
];

fn main() {
    println!("Starting slingshot headless demo (seed: {})", SEED);

    let tunables = SlingshotTunables::load_or_default(DEFAULT_TUNABLES_PATH);

    let mut app = create_headless_app(SEED);
    app.insert_resource(tunables.clone())
        .add_plugins(TransformPlugin)
        .add_plugins(SlingshotPhysicsPlugin);
    app.finish();
    app.cleanup();
    // Startup: Rapier context
    app.update();

    let (player, targets) = {
        let world = app.world_mut();

        // Decoys за спиной игрока: в конус не попадают
        let mut decoys = Vec::with_capacity(DECOY_COUNT);
        if let Some(mut rng) = world.get_resource_mut::<DeterministicRng>() {
            for _ in 0..DECOY_COUNT {
                decoys.push(rng.scatter_around(Vec3::new(0.0, 0.7, 15.0), 3.0, 8.0));
            }
        }

        let mut commands = world.commands();
        spawn_ground(&mut commands, 50.0);
        let player = spawn_player(&mut commands, &tunables, Vec3::new(0.0, 1.0, 0.0));
        let targets = [
            spawn_target(&mut commands, &tunables, Vec3::new(-3.0, 0.7, -10.0)),
            spawn_target(&mut commands, &tunables, Vec3::new(3.0, 0.7, -10.0)),
        ];
        spawn_static_target(&mut commands, Vec3::new(0.0, 0.5, -25.0));
        for position in decoys {
            spawn_target(&mut commands, &tunables, position);
        }

        (player, targets)
    };
    app.world_mut().flush();

    let mut last_states = [RecoveryState::default(); 2];

    for tick in 1..=TOTAL_TICKS {
        for (_, cue) in SCRIPT.iter().filter(|(at, _)| *at == tick) {
            apply_cue(&mut app, player, &targets, *cue);
        }

        advance_fixed_tick(&mut app);

        for (index, target) in targets.iter().enumerate() {
            let Some(state) = app.world().get::<RecoveryState>(*target).copied() else {
                continue;
            };
            if std::mem::discriminant(&state) != std::mem::discriminant(&last_states[index]) {
                log_info(&format!("Tick {}: target {} → {:?}", tick, index, state));
            }
            last_states[index] = state;
        }

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            println!("Tick {}: {} entities", tick, entity_count);
        }
    }

    println!("Simulation complete!");
}

fn apply_cue(app: &mut App, player: Entity, targets: &[Entity; 2], cue: Cue) {
    let world = app.world_mut();

    match cue {
        Cue::Aim(index) => {
            let Some(point) = world.get::<Transform>(targets[index]).map(|t| t.translation) else {
                return;
            };
            let Some(body) = world.get::<Transform>(player).map(|t| t.translation) else {
                return;
            };
            if let Some(mut rig) = world.get_mut::<AimRig>(player) {
                let eye = rig.origin(body);
                rig.look_at(eye, point);
            }
        }
        Cue::Press(channel) => {
            if let Some(mut actions) = world.get_mut::<PlayerActions>(player) {
                actions.hold[channel.index()] = ButtonState::press();
            }
        }
        Cue::Release(channel) => {
            if let Some(mut actions) = world.get_mut::<PlayerActions>(player) {
                actions.hold[channel.index()] = ButtonState::release();
            }
        }
    }
}
