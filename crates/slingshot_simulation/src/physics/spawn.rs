//! Spawn helpers: игрок, цели, пол
//!
//! Config компоненты копируются из SlingshotTunables; системы читают только
//! компоненты.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{AimRig, Player, PlayerActions};
use crate::config::SlingshotTunables;
use crate::ground::{GroundProbe, GroundSensor};
use crate::locomotion::{LocomotionState, MovementInput};
use crate::recovery::{NavigationAgent, RecoveryState};
use crate::slingshot::CaptureReleaseCoordinator;
use crate::targeting::{MostLikelyTarget, Target};

/// Игрок: dynamic capsule, вращение заблокировано, трение управляется локомоцией
pub fn spawn_player(commands: &mut Commands, tunables: &SlingshotTunables, position: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            Player,
            (
                PlayerActions::default(),
                AimRig::default(),
                tunables.aim,
                MostLikelyTarget::default(),
                CaptureReleaseCoordinator::default(),
                tunables.slingshot,
            ),
            (
                MovementInput::default(),
                LocomotionState::default(),
                tunables.locomotion,
                GroundProbe::default(),
                tunables.ground_probe,
                GroundSensor::default(),
            ),
            (
                RigidBody::Dynamic,
                Collider::capsule_y(0.5, 0.4), // Высота 1.8m, радиус 0.4m
                Velocity::default(),
                Friction::coefficient(tunables.locomotion.idle_friction),
                LockedAxes::ROTATION_LOCKED,
            ),
        ))
        .id()
}

/// Навигирующая цель: dynamic body + NavigationAgent + recovery arc
///
/// Масса задаётся явно (navigation.body_mass): скорость после launch не
/// зависит от размера collider.
pub fn spawn_target(commands: &mut Commands, tunables: &SlingshotTunables, position: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            Target,
            NavigationAgent::from_tuning(&tunables.navigation),
            RecoveryState::default(),
            tunables.recovery,
            (
                RigidBody::Dynamic,
                Collider::capsule_y(0.4, 0.3),
                ColliderMassProperties::Mass(tunables.navigation.body_mass),
                Velocity::default(),
                ExternalImpulse::default(),
                Friction::coefficient(tunables.recovery.default_friction),
            ),
        ))
        .id()
}

/// Static цель: захватывается, но launch для неё no-op
pub fn spawn_static_target(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            Target,
            RigidBody::Fixed,
            Collider::cuboid(0.5, 0.5, 0.5),
        ))
        .id()
}

/// Плоский пол (half-extent в метрах), верхняя грань на y = 0
pub fn spawn_ground(commands: &mut Commands, half_extent: f32) -> Entity {
    commands
        .spawn((
            Transform::from_xyz(0.0, -0.5, 0.0),
            RigidBody::Fixed,
            Collider::cuboid(half_extent, 0.5, half_extent),
        ))
        .id()
}
