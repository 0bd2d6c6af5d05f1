//! Locomotion domain: движение игрока
//!
//! Содержит:
//! - LocomotionConfig / LocomotionState (jump buffering + coyote time)
//! - MovementInput (желаемое горизонтальное направление)
//! - JumpIntent / Jumped (events)
//!
//! Ground sensing тоже регистрируется здесь: сенсор нужен только локомоции.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;


pub use components::*;
pub use events::*;
pub use systems::*;

use crate::ground::{update_ground_sensors, GroundContactChanged};
use crate::SimulationSet;

/// Locomotion Plugin
///
/// Порядок выполнения (FixedUpdate):
/// 1. probe_ground_contacts: shape-cast земли (Rapier backend)
/// 2. update_ground_sensors: GroundSensor + Gained/Lost events
/// 3. process_player_actions: look, направление, JumpIntent
/// 4. apply_locomotion: разгон, трение, buffered jump
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<GroundContactChanged>()
            .add_event::<JumpIntent>()
            .add_event::<Jumped>();

        app.add_systems(
            FixedUpdate,
            (crate::physics::probe_ground_contacts, update_ground_sensors)
                .chain()
                .in_set(SimulationSet::Sensing),
        );

        app.add_systems(
            FixedUpdate,
            (process_player_actions, apply_locomotion)
                .chain()
                .in_set(SimulationSet::Locomotion),
        );
    }
}
