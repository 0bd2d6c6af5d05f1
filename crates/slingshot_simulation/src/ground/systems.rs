//! Ground sensing systems

use bevy::prelude::*;

use super::components::{GroundProbe, GroundSensor};
use super::events::GroundContactChanged;

/// Система: GroundProbe → GroundSensor (+ edge events)
///
/// Работает в FixedUpdate, после physics backend probe.
pub fn update_ground_sensors(
    mut sensors: Query<(Entity, &GroundProbe, &mut GroundSensor)>,
    mut contact_events: EventWriter<GroundContactChanged>,
) {
    for (entity, probe, mut sensor) in sensors.iter_mut() {
        if let Some(edge) = sensor.apply_probe(probe.hit_normal) {
            crate::log(&format!("Ground: {:?} contact {:?}", entity, edge));
            contact_events.write(GroundContactChanged { entity, edge });
        }
    }
}
