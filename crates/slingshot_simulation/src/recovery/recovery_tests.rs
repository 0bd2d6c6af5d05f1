//! Tests for recovery arc state machine and navigation steering.

use bevy::prelude::*;

use super::components::{stabilization_pose, NavigationAgent, RecoveryConfig, RecoveryState, RecoveryStep};

const DT: f32 = 1.0 / 60.0;

fn config() -> RecoveryConfig {
    RecoveryConfig {
        settle_speed_threshold: 0.5,
        stabilization_duration: 1.0,
        ..default()
    }
}

fn tilted() -> Quat {
    Quat::from_rotation_x(1.2) * Quat::from_rotation_z(0.4)
}

#[test]
fn test_navigating_is_idle() {
    let mut state = RecoveryState::default();
    assert_eq!(state.step(0.0, tilted(), DT, &config()), RecoveryStep::Idle);
    assert_eq!(state, RecoveryState::Navigating);
}

#[test]
fn test_fast_body_stays_suspended() {
    // Скорость выше threshold: Stabilizing не наступает сколько угодно долго
    let mut state = RecoveryState::default();
    state.launch();

    for _ in 0..600 {
        assert_eq!(state.step(3.0, tilted(), DT, &config()), RecoveryStep::Idle);
    }
    assert_eq!(state, RecoveryState::Suspended);

    // Скорость упала до threshold (включительно): переход
    assert_eq!(state.step(0.5, tilted(), DT, &config()), RecoveryStep::BeganStabilizing);
    assert_eq!(
        state,
        RecoveryState::Stabilizing {
            start_pose: tilted(),
            elapsed: 0.0
        }
    );
}

#[test]
fn test_full_arc_returns_to_navigating() {
    let config = config();
    let mut state = RecoveryState::default();
    state.launch();
    state.step(0.0, tilted(), DT, &config);

    let mut ticks = 0;
    loop {
        ticks += 1;
        match state.step(0.0, Quat::IDENTITY, DT, &config) {
            RecoveryStep::Orient(_) => {}
            RecoveryStep::Completed => break,
            other => panic!("unexpected step {:?}", other),
        }
        assert!(ticks < 100, "stabilization never completed");
    }

    // 1.0 / (1/60) ≈ 60 тиков интерполяции, завершение на следующем
    assert!((60..=62).contains(&ticks), "completed after {} ticks", ticks);
    assert_eq!(state, RecoveryState::Navigating);
}

#[test]
fn test_relaunch_mid_stabilizing_restarts() {
    let config = config();
    let mut state = RecoveryState::default();
    state.launch();
    state.step(0.0, tilted(), DT, &config);

    // Ровно половина duration
    let mut current = tilted();
    for _ in 0..30 {
        if let RecoveryStep::Orient(rotation) = state.step(0.0, current, DT, &config) {
            current = rotation;
        }
    }
    let RecoveryState::Stabilizing { elapsed, .. } = state else {
        panic!("expected Stabilizing, got {:?}", state);
    };
    assert!((elapsed - 0.5).abs() < 1e-3);

    // Новый launch: обратно в Suspended, без blending
    state.launch();
    assert_eq!(state, RecoveryState::Suspended);

    // Новая start pose = текущая (частично интерполированная) ориентация
    assert_eq!(state.step(0.1, current, DT, &config), RecoveryStep::BeganStabilizing);
    assert_eq!(
        state,
        RecoveryState::Stabilizing {
            start_pose: current,
            elapsed: 0.0
        }
    );
    assert!(current.angle_between(Quat::IDENTITY) < tilted().angle_between(Quat::IDENTITY));
    assert!(current.angle_between(Quat::IDENTITY) > 0.01);
}

#[test]
fn test_pose_endpoints() {
    let start = tilted();
    assert!(stabilization_pose(start, 0.0, 1.0).angle_between(start) < 1e-4);
    assert_eq!(stabilization_pose(start, 1.0, 1.0), Quat::IDENTITY);
    assert_eq!(stabilization_pose(start, 7.0, 1.0), Quat::IDENTITY);
}

#[test]
fn test_pose_is_monotonic() {
    let start = tilted();
    let mut previous = start.angle_between(Quat::IDENTITY);

    for step in 1..=100 {
        let pose = stabilization_pose(start, step as f32 / 100.0, 1.0);
        let remaining = pose.angle_between(Quat::IDENTITY);
        assert!(remaining <= previous + 1e-5, "overshoot at step {}", step);
        previous = remaining;
    }
}

#[test]
fn test_zero_duration_completes_next_tick() {
    let config = RecoveryConfig {
        stabilization_duration: 0.0,
        ..config()
    };
    let mut state = RecoveryState::default();
    state.launch();
    state.step(0.0, tilted(), DT, &config);

    assert_eq!(state.step(0.0, tilted(), DT, &config), RecoveryStep::Completed);
}

#[test]
fn test_agent_desired_velocity() {
    let mut agent = NavigationAgent {
        next_path_position: Some(Vec3::new(10.0, 0.0, 0.0)),
        ..default()
    };

    assert_eq!(agent.desired_velocity(Vec3::ZERO), Some(Vec3::new(3.0, 0.0, 0.0)));

    agent.set_steering(false);
    assert_eq!(agent.desired_velocity(Vec3::ZERO), None);
}

#[test]
fn test_agent_without_path_does_not_steer() {
    let agent = NavigationAgent::default();
    assert!(agent.steering_enabled);
    assert_eq!(agent.desired_velocity(Vec3::ZERO), None);
}
