//! Targeting компоненты: Target marker, aim config, most-likely target

use bevy::prelude::*;
use bevy_rapier3d::prelude::RigidBody;
use serde::{Deserialize, Serialize};

/// Цель для захвата (mobile или static)
///
/// Опциональные компоненты на том же entity:
/// - `RigidBody::Dynamic` + `ExternalImpulse`: цель можно запустить
/// - `NavigationAgent` + `RecoveryState`: цель проходит recovery arc после запуска
///
/// Регистрируется в TargetRegistry автоматически (sync_target_registry).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Target;

/// Только dynamic тела принимают impulse (static/kinematic цели: валидная категория)
pub fn is_launchable(body: Option<&RigidBody>) -> bool {
    matches!(body, Some(RigidBody::Dynamic))
}

/// Параметры прицеливания игрока
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AimConfig {
    /// Половина угла конуса захвата (градусы)
    pub cone_half_angle_deg: f32,
    /// Длина LOS луча (м). Отбор кандидатов: только по углу, без distance cutoff
    pub max_distance: f32,
    /// Mouse look: градусов на единицу смещения
    pub look_sensitivity: f32,
    pub min_pitch_deg: f32,
    pub max_pitch_deg: f32,
}

impl Default for AimConfig {
    fn default() -> Self {
        Self {
            cone_half_angle_deg: 15.0,
            max_distance: 100.0,
            look_sensitivity: 0.3,
            min_pitch_deg: -90.0,
            max_pitch_deg: 90.0,
        }
    }
}

/// Лучший кандидат на захват в этом тике (или None)
///
/// Пересчитывается acquire_targets каждый тик.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MostLikelyTarget(pub Option<Entity>);
