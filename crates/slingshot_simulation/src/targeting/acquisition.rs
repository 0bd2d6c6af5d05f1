//! Target acquisition: выбор "most likely target" по углу от прицела

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::ReadRapierContext;

use crate::components::{AimRig, Player};
use crate::slingshot::CaptureReleaseCoordinator;

use super::components::{AimConfig, MostLikelyTarget, Target};
use super::registry::TargetRegistry;

/// Конус прицеливания на текущий тик
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimCone {
    pub origin: Vec3,
    pub forward: Vec3,
    /// Радианы
    pub half_angle: f32,
    /// Длина LOS луча (не фильтр кандидатов)
    pub max_distance: f32,
}

impl AimCone {
    pub fn from_rig(body: &Transform, rig: &AimRig, config: &AimConfig) -> Self {
        Self {
            origin: rig.origin(body.translation),
            forward: rig.forward(),
            half_angle: config.cone_half_angle_deg.to_radians(),
            max_distance: config.max_distance,
        }
    }
}

/// Single best-angle sweep по кандидатам
///
/// - `excluded`: цели, удерживаемые любым каналом
/// - угол > half_angle → кандидат отброшен (distance не проверяется)
/// - лучший = минимальный угол; при равенстве остаётся более ранний
/// - `is_obstructed` вызывается ТОЛЬКО для кандидата, который вот-вот станет
///   лидером; заслонённый кандидат отбрасывается, прежний лидер сохраняется
pub fn select_most_likely_target<I, F>(
    cone: &AimCone,
    candidates: I,
    excluded: &[Entity],
    mut is_obstructed: F,
) -> Option<Entity>
where
    I: IntoIterator<Item = (Entity, Vec3)>,
    F: FnMut(Entity, Vec3) -> bool,
{
    let forward = cone.forward.normalize_or_zero();
    if forward == Vec3::ZERO {
        return None;
    }

    let mut best: Option<Entity> = None;
    let mut best_angle = f32::INFINITY;

    for (entity, position) in candidates {
        if excluded.contains(&entity) {
            continue;
        }

        let to_target = position - cone.origin;
        if to_target.length_squared() <= f32::EPSILON {
            continue;
        }

        let angle = forward.angle_between(to_target);
        if angle > cone.half_angle || angle >= best_angle {
            continue;
        }

        if is_obstructed(entity, position) {
            continue;
        }

        best = Some(entity);
        best_angle = angle;
    }

    best
}

/// SystemParam: всё что нужно для scan (реестр, позиции целей, LOS)
///
/// Используется acquisition и capture системами: второй press в том же тике
/// пересчитывает кандидата, исключая только что захваченную цель.
#[derive(SystemParam)]
pub struct TargetScan<'w, 's> {
    registry: Res<'w, TargetRegistry>,
    targets: Query<'w, 's, &'static Transform, With<Target>>,
    rapier: ReadRapierContext<'w, 's>,
}

impl TargetScan<'_, '_> {
    /// Лучший незаслонённый кандидат в конусе для `shooter`
    ///
    /// Без physics world (headless без Rapier) заслонять нечему.
    pub fn most_likely(&self, shooter: Entity, cone: &AimCone, excluded: &[Entity]) -> Option<Entity> {
        let context = self.rapier.single().ok();

        let candidates = self.registry.iter().filter_map(|entity| {
            // Weak handle: entity мог быть despawned до следующего sync
            self.targets.get(entity).ok().map(|transform| (entity, transform.translation))
        });

        select_most_likely_target(cone, candidates, excluded, |target, position| {
            context.as_ref().is_some_and(|context| {
                crate::physics::line_of_sight_blocked(
                    context,
                    cone.origin,
                    position,
                    cone.max_distance,
                    target,
                    shooter,
                )
            })
        })
    }
}

/// Система: пересчёт MostLikelyTarget для каждого игрока
///
/// Цели, удерживаемые любым каналом игрока, исключаются (mutual exclusion).
pub fn acquire_targets(
    scan: TargetScan,
    mut players: Query<
        (
            Entity,
            &Transform,
            &AimRig,
            &AimConfig,
            &CaptureReleaseCoordinator,
            &mut MostLikelyTarget,
        ),
        With<Player>,
    >,
) {
    for (entity, transform, rig, config, coordinator, mut most_likely) in players.iter_mut() {
        let cone = AimCone::from_rig(transform, rig, config);
        let held: Vec<Entity> = coordinator.held_targets().collect();

        let selected = scan.most_likely(entity, &cone, &held);
        if most_likely.0 != selected {
            crate::log(&format!("Aim: {:?} most likely target {:?} → {:?}", entity, most_likely.0, selected));
            most_likely.0 = selected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cone() -> AimCone {
        AimCone {
            origin: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            half_angle: 15f32.to_radians(),
            max_distance: 100.0,
        }
    }

    fn entity(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    #[test]
    fn test_picks_smallest_angle() {
        let candidates = [
            (entity(1), Vec3::new(2.0, 0.0, -10.0)),
            (entity(2), Vec3::new(0.5, 0.0, -10.0)),
            (entity(3), Vec3::new(-1.0, 0.0, -10.0)),
        ];

        let selected = select_most_likely_target(&cone(), candidates, &[], |_, _| false);
        assert_eq!(selected, Some(entity(2)));
    }

    #[test]
    fn test_outside_cone_discarded() {
        let candidates = [(entity(1), Vec3::new(10.0, 0.0, -1.0))];
        assert_eq!(select_most_likely_target(&cone(), candidates, &[], |_, _| false), None);
    }

    #[test]
    fn test_angle_only_no_distance_cutoff() {
        // Далеко за max_distance, но в конусе: кандидат валиден
        let candidates = [(entity(1), Vec3::new(0.0, 0.0, -5000.0))];
        assert_eq!(
            select_most_likely_target(&cone(), candidates, &[], |_, _| false),
            Some(entity(1))
        );
    }

    #[test]
    fn test_held_targets_excluded() {
        let candidates = [
            (entity(1), Vec3::new(0.0, 0.0, -10.0)),
            (entity(2), Vec3::new(1.0, 0.0, -10.0)),
        ];

        let selected = select_most_likely_target(&cone(), candidates, &[entity(1)], |_, _| false);
        assert_eq!(selected, Some(entity(2)));
    }

    #[test]
    fn test_obstructed_leader_falls_back() {
        let candidates = [
            (entity(1), Vec3::new(1.0, 0.0, -10.0)),
            (entity(2), Vec3::new(0.0, 0.0, -10.0)), // лучше по углу, но заслонён
        ];

        let selected = select_most_likely_target(&cone(), candidates, &[], |target, _| target == entity(2));
        assert_eq!(selected, Some(entity(1)));
    }

    #[test]
    fn test_los_checked_only_for_prospective_leaders() {
        let candidates = [
            (entity(1), Vec3::new(0.0, 0.0, -10.0)), // лидер сразу
            (entity(2), Vec3::new(1.0, 0.0, -10.0)), // хуже: LOS не нужен
            (entity(3), Vec3::new(2.0, 0.0, -10.0)), // хуже: LOS не нужен
            (entity(4), Vec3::new(30.0, 0.0, -10.0)), // вне конуса
        ];

        let mut checked = Vec::new();
        let selected = select_most_likely_target(&cone(), candidates, &[], |target, _| {
            checked.push(target);
            false
        });

        assert_eq!(selected, Some(entity(1)));
        assert_eq!(checked, vec![entity(1)]);
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        let candidates = [
            (entity(1), Vec3::new(1.0, 0.0, -10.0)),
            (entity(2), Vec3::new(-1.0, 0.0, -10.0)), // тот же угол
        ];

        let mut checked = Vec::new();
        let selected = select_most_likely_target(&cone(), candidates, &[], |target, _| {
            checked.push(target);
            false
        });

        assert_eq!(selected, Some(entity(1)));
        assert_eq!(checked, vec![entity(1)]);
    }

    #[test]
    fn test_target_at_origin_ignored() {
        let candidates = [(entity(1), Vec3::ZERO)];
        assert_eq!(select_most_likely_target(&cone(), candidates, &[], |_, _| false), None);
    }

    #[test]
    fn test_no_candidates() {
        let candidates: [(Entity, Vec3); 0] = [];
        assert_eq!(select_most_likely_target(&cone(), candidates, &[], |_, _| false), None);
    }
}
