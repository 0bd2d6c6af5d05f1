//! Locomotion systems (player actions → velocity)

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Friction, Velocity};

use crate::components::{AimRig, Player, PlayerActions};
use crate::ground::GroundSensor;
use crate::targeting::AimConfig;

use super::components::{jump_velocity, steer_velocity, LocomotionConfig, LocomotionState, MovementInput};
use super::events::{JumpIntent, Jumped};

/// Система: PlayerActions → AimRig (look) + MovementInput + JumpIntent
///
/// Движение относительно yaw прицела, спроецировано на горизонталь.
pub fn process_player_actions(
    mut players: Query<(Entity, &PlayerActions, &AimConfig, &mut AimRig, &mut MovementInput), With<Player>>,
    mut jump_events: EventWriter<JumpIntent>,
) {
    for (entity, actions, aim_config, mut rig, mut input) in players.iter_mut() {
        rig.apply_look(
            actions.look_delta,
            aim_config.look_sensitivity,
            aim_config.min_pitch_deg,
            aim_config.max_pitch_deg,
        );

        input.direction = rig.horizontal_direction(actions.move_axes());

        if actions.jump.just_pressed {
            jump_events.write(JumpIntent { entity });
        }
    }
}

/// Система: locomotion state machine + горизонтальный разгон + прыжок
///
/// Порядок внутри тика:
/// 1. observe_ground: grounded флаг и last_grounded из GroundSensor
/// 2. JumpIntent → request timestamp
/// 3. Горизонталь: ground/air acceleration, трение steering/idle
/// 4. Buffered jump (sticky window + coyote time)
pub fn apply_locomotion(
    time: Res<Time<Fixed>>,
    mut jump_events: EventReader<JumpIntent>,
    mut jumped_events: EventWriter<Jumped>,
    mut actors: Query<(
        Entity,
        &Transform,
        &MovementInput,
        &GroundSensor,
        &LocomotionConfig,
        &mut LocomotionState,
        &mut Velocity,
        Option<&mut Friction>,
    )>,
) {
    let now = time.elapsed_secs();
    let delta = time.delta_secs();

    let jump_requests: Vec<Entity> = jump_events.read().map(|event| event.entity).collect();

    for (entity, transform, input, sensor, config, mut state, mut velocity, friction) in actors.iter_mut() {
        state.observe_ground(sensor.is_grounded(), now);

        if jump_requests.contains(&entity) {
            state.request_jump(now);
        }

        let up = transform.up().as_vec3();
        let desired = input.direction * config.speed;
        let steering = desired.length_squared() > 0.0;

        if let Some(mut friction) = friction {
            friction.coefficient = if steering {
                config.steering_friction
            } else {
                config.idle_friction
            };
        }

        // Без input скорость не трогаем: idle friction гасит скольжение
        if steering {
            let acceleration = if state.is_grounded() {
                config.ground_acceleration
            } else {
                config.air_acceleration
            };
            velocity.linvel = steer_velocity(velocity.linvel, up, desired, acceleration * delta);
        }

        if state.try_consume_jump(now, config) {
            velocity.linvel = jump_velocity(velocity.linvel, up, config.jump_speed);
            crate::log(&format!("Locomotion: {:?} jumped at {:.3}s", entity, now));
            jumped_events.write(Jumped { entity, at: now });
        }
    }
}
