//! Ground contact events

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum GroundContactEdge {
    /// Опора появилась (airborne → grounded)
    Gained,
    /// Опора пропала (grounded → airborne)
    Lost,
}

/// Event: смена контакта с землёй
///
/// Генерируется: update_ground_sensors (ровно один раз на переход)
#[derive(Event, Debug, Clone, Copy)]
pub struct GroundContactChanged {
    pub entity: Entity,
    pub edge: GroundContactEdge,
}
