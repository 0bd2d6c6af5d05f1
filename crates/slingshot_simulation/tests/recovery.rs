//! Recovery arc integration tests
//!
//! LaunchEvent пишется напрямую; Velocity задаётся вручную вместо Rapier.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Friction, LockedAxes, Velocity};
use slingshot_simulation::*;

fn spawn_agent(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_rotation(Quat::from_rotation_z(1.3)),
            Target,
            NavigationAgent::default(),
            RecoveryState::default(),
            RecoveryConfig::default(),
            Velocity::default(),
            Friction::coefficient(0.5),
        ))
        .id()
}

fn launch(app: &mut App, target: Entity) {
    app.world_mut().send_event(LaunchEvent {
        shooter: Entity::PLACEHOLDER,
        first: target,
        second: Entity::PLACEHOLDER,
        direction: Vec3::X,
        impulse: 15.0,
    });
}

fn set_speed(app: &mut App, target: Entity, speed: f32) {
    app.world_mut().get_mut::<Velocity>(target).unwrap().linvel = Vec3::new(speed, 0.0, 0.0);
}

fn state(app: &App, target: Entity) -> RecoveryState {
    *app.world().get::<RecoveryState>(target).unwrap()
}

#[test]
fn test_launch_suspends_navigation() {
    let mut app = create_headless_app(42);
    let agent = spawn_agent(&mut app);

    launch(&mut app, agent);
    advance_fixed_tick(&mut app);

    assert_eq!(state(&app, agent), RecoveryState::Suspended);
    assert!(!app.world().get::<NavigationAgent>(agent).unwrap().steering_enabled);
    assert_eq!(
        app.world().get::<Friction>(agent).unwrap().coefficient,
        RecoveryConfig::default().launch_friction
    );
    assert!(app
        .world()
        .get::<LockedAxes>(agent)
        .unwrap()
        .contains(LockedAxes::ROTATION_LOCKED));
}

#[test]
fn test_fast_body_stays_suspended() {
    let mut app = create_headless_app(42);
    let agent = spawn_agent(&mut app);

    launch(&mut app, agent);
    set_speed(&mut app, agent, 8.0);
    for _ in 0..300 {
        advance_fixed_tick(&mut app);
    }
    assert_eq!(state(&app, agent), RecoveryState::Suspended);

    // Скорость упала: со следующего тика Stabilizing с текущей позой
    set_speed(&mut app, agent, 0.2);
    advance_fixed_tick(&mut app);
    assert_eq!(
        state(&app, agent),
        RecoveryState::Stabilizing {
            start_pose: Quat::from_rotation_z(1.3),
            elapsed: 0.0
        }
    );
}

#[test]
fn test_full_arc_restores_navigation() {
    let mut app = create_headless_app(42);
    let agent = spawn_agent(&mut app);

    launch(&mut app, agent);
    advance_fixed_tick(&mut app); // Suspended
    advance_fixed_tick(&mut app); // скорость 0 → Stabilizing

    for _ in 0..70 {
        advance_fixed_tick(&mut app);
    }

    assert_eq!(state(&app, agent), RecoveryState::Navigating);
    assert_eq!(app.world().get::<Transform>(agent).unwrap().rotation, Quat::IDENTITY);
    assert!(app.world().get::<NavigationAgent>(agent).unwrap().steering_enabled);
    assert_eq!(
        app.world().get::<Friction>(agent).unwrap().coefficient,
        RecoveryConfig::default().default_friction
    );
    assert!(!app
        .world()
        .get::<LockedAxes>(agent)
        .unwrap()
        .contains(LockedAxes::ROTATION_LOCKED));
}

#[test]
fn test_relaunch_mid_stabilizing_restarts_from_current_pose() {
    let mut app = create_headless_app(42);
    let agent = spawn_agent(&mut app);

    launch(&mut app, agent);
    advance_fixed_tick(&mut app);
    advance_fixed_tick(&mut app);

    // Половина duration (30 тиков из 60)
    for _ in 0..30 {
        advance_fixed_tick(&mut app);
    }
    let RecoveryState::Stabilizing { elapsed, .. } = state(&app, agent) else {
        panic!("expected Stabilizing");
    };
    assert!((elapsed - 0.5).abs() < 1e-3);

    launch(&mut app, agent);
    advance_fixed_tick(&mut app);
    assert_eq!(state(&app, agent), RecoveryState::Suspended);
    assert!(!app.world().get::<NavigationAgent>(agent).unwrap().steering_enabled);

    // Интерполяция брошена на полпути, без snap в upright
    let partial = app.world().get::<Transform>(agent).unwrap().rotation;
    assert!(partial.angle_between(Quat::IDENTITY) > 0.01);
    assert!(partial.angle_between(Quat::IDENTITY) < 1.3);

    advance_fixed_tick(&mut app);
    assert_eq!(
        state(&app, agent),
        RecoveryState::Stabilizing {
            start_pose: partial,
            elapsed: 0.0
        }
    );
}

#[test]
fn test_agent_steers_toward_path() {
    let mut app = create_headless_app(42);
    let agent = spawn_agent(&mut app);
    app.world_mut().get_mut::<NavigationAgent>(agent).unwrap().next_path_position = Some(Vec3::new(0.0, 0.0, -20.0));

    // 1 секунда при acceleration 1 m/s² → 1 m/s к цели
    for _ in 0..60 {
        advance_fixed_tick(&mut app);
    }

    let linvel = app.world().get::<Velocity>(agent).unwrap().linvel;
    assert!((linvel.z + 1.0).abs() < 1e-3, "linvel = {:?}", linvel);
}

#[test]
fn test_bare_recovery_body_completes_arc() {
    let mut app = create_headless_app(42);
    // Только RecoveryState: Velocity и RecoveryConfig добавляются как required
    let body = app.world_mut().spawn((Transform::default(), RecoveryState::default())).id();
    assert_eq!(app.world().get::<Velocity>(body).unwrap().linvel, Vec3::ZERO);
    assert!(app.world().get::<RecoveryConfig>(body).is_some());

    launch(&mut app, body);
    advance_fixed_tick(&mut app);
    assert_eq!(state(&app, body), RecoveryState::Suspended);

    for _ in 0..70 {
        advance_fixed_tick(&mut app);
    }
    assert_eq!(state(&app, body), RecoveryState::Navigating);
}
