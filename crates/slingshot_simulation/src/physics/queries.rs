//! Rapier queries: ground shape-cast и line-of-sight ray

use bevy::prelude::*;
use bevy_rapier3d::parry::shape::Ball;
use bevy_rapier3d::prelude::*;

use crate::ground::{GroundProbe, GroundProbeConfig};

/// Система: shape-cast шаром вниз → GroundProbe
///
/// Без Rapier context (headless тесты) probe не трогается: тесты пишут
/// GroundProbe напрямую.
pub fn probe_ground_contacts(
    rapier_context: ReadRapierContext,
    mut probes: Query<(Entity, &Transform, &GroundProbeConfig, &mut GroundProbe)>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (entity, transform, config, mut probe) in probes.iter_mut() {
        let up = transform.up().as_vec3();
        let origin = transform.translation + up * config.origin_offset;
        let shape = Ball::new(config.radius);

        let filter = QueryFilter::default().exclude_rigid_body(entity).exclude_sensors();

        probe.hit_normal = context
            .cast_shape(
                origin,
                Quat::IDENTITY,
                -up,
                &shape,
                ShapeCastOptions {
                    max_time_of_impact: config.cast_distance,
                    stop_at_penetration: false,
                    ..default()
                },
                filter,
            )
            .map(|(_, hit)| hit.details.map(|details| details.normal1).unwrap_or(up));
    }
}

/// Line-of-sight: true если луч `from → to` упирается во что-то кроме `target`
///
/// Луч ограничен `max_distance`; стрелок исключён. Ничего не задето → видно.
pub fn line_of_sight_blocked(
    context: &RapierContext,
    from: Vec3,
    to: Vec3,
    max_distance: f32,
    target: Entity,
    shooter: Entity,
) -> bool {
    let delta = to - from;
    let distance = delta.length();
    if distance <= f32::EPSILON {
        return false;
    }

    let filter = QueryFilter::default().exclude_rigid_body(shooter).exclude_sensors();

    match context.cast_ray(from, delta / distance, distance.min(max_distance), true, filter) {
        Some((hit, _)) => hit != target,
        None => false,
    }
}
