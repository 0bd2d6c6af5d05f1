//! Recovery systems (launch → suspend → stabilize → navigate)

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Friction, LockedAxes, Velocity};

use crate::shared::vector::move_toward;
use crate::slingshot::LaunchEvent;

use super::components::{NavigationAgent, RecoveryConfig, RecoveryState, RecoveryStep};

/// Система: LaunchEvent → Suspended
///
/// Steering выключен, трение = launch_friction, вращение заблокировано на весь
/// Suspended + Stabilizing (kinematic override ориентации).
/// Цели без RecoveryState получают только impulse.
pub fn begin_recovery_on_launch(
    mut commands: Commands,
    mut launch_events: EventReader<LaunchEvent>,
    mut bodies: Query<(
        &mut RecoveryState,
        &RecoveryConfig,
        Option<&mut NavigationAgent>,
        Option<&mut Friction>,
        Option<&mut LockedAxes>,
    )>,
) {
    for event in launch_events.read() {
        for target in event.targets() {
            let Ok((mut state, config, agent, friction, locked)) = bodies.get_mut(target) else {
                continue;
            };

            if state.is_recovering() {
                crate::log(&format!("Recovery: {:?} relaunched mid-arc ({:?}), restarting", target, *state));
            }
            state.launch();

            if let Some(mut agent) = agent {
                agent.set_steering(false);
            }

            match friction {
                Some(mut friction) => friction.coefficient = config.launch_friction,
                None => {
                    commands.entity(target).insert(Friction::coefficient(config.launch_friction));
                }
            }

            match locked {
                Some(mut locked) => locked.insert(LockedAxes::ROTATION_LOCKED),
                None => {
                    commands.entity(target).insert(LockedAxes::ROTATION_LOCKED);
                }
            }

            crate::log(&format!("Recovery: {:?} suspended", target));
        }
    }
}

/// Система: тик recovery arc для каждого тела не в Navigating
pub fn tick_recovery(
    time: Res<Time<Fixed>>,
    mut bodies: Query<(
        Entity,
        &mut RecoveryState,
        &RecoveryConfig,
        &Velocity,
        &mut Transform,
        Option<&mut NavigationAgent>,
        Option<&mut Friction>,
        Option<&mut LockedAxes>,
    )>,
) {
    let delta = time.delta_secs();

    for (entity, mut state, config, velocity, mut transform, agent, friction, locked) in bodies.iter_mut() {
        if !state.is_recovering() {
            continue;
        }

        match state.step(velocity.linvel.length(), transform.rotation, delta, config) {
            RecoveryStep::Idle => {}
            RecoveryStep::BeganStabilizing => {
                crate::log(&format!("Recovery: {:?} settled, stabilizing", entity));
            }
            RecoveryStep::Orient(rotation) => {
                transform.rotation = rotation;
            }
            RecoveryStep::Completed => {
                transform.rotation = Quat::IDENTITY;

                if let Some(mut friction) = friction {
                    friction.coefficient = config.default_friction;
                }
                if let Some(mut locked) = locked {
                    locked.remove(LockedAxes::ROTATION_LOCKED);
                }
                if let Some(mut agent) = agent {
                    agent.set_steering(true);
                }

                crate::log_info(&format!("Recovery: {:?} back to navigating", entity));
            }
        }
    }
}

/// Система: path-following для агентов со включённым steering
pub fn steer_navigation_agents(
    time: Res<Time<Fixed>>,
    mut agents: Query<(&NavigationAgent, &Transform, &mut Velocity)>,
) {
    let delta = time.delta_secs();

    for (agent, transform, mut velocity) in agents.iter_mut() {
        let Some(desired) = agent.desired_velocity(transform.translation) else {
            continue;
        };
        velocity.linvel = move_toward(velocity.linvel, desired, agent.acceleration * delta);
    }
}
