//! Ground sensor компоненты

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::events::GroundContactEdge;

/// Сырой результат shape-based contact query за текущий тик
///
/// Пишется physics backend'ом (`physics::probe_ground_contacts`).
/// `Some(normal)`: опора найдена; `None`: под ногами пусто.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GroundProbe {
    pub hit_normal: Option<Vec3>,
}

/// Параметры shape-cast'а земли (шар, кастуемый вниз от центра актора)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct GroundProbeConfig {
    /// Радиус шара (м)
    pub radius: f32,
    /// Смещение начала каста от центра актора вдоль up (м, обычно отрицательное)
    pub origin_offset: f32,
    /// Дальность каста вниз (м)
    pub cast_distance: f32,
}

impl Default for GroundProbeConfig {
    fn default() -> Self {
        Self {
            radius: 0.3,
            origin_offset: -0.7, // низ шара на 0.1 под подошвой capsule (half-height 0.5 + radius 0.4)
            cast_distance: 0.15,
        }
    }
}

/// Сенсор земли: пересчитывается каждый physics тик
///
/// Инварианты:
/// - До первого query: not grounded
/// - Переходы чередуются: никогда два Gained (или два Lost) подряд
/// - `ground_normal` обновляется только пока grounded (в воздухе: последняя известная)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct GroundSensor {
    is_grounded: bool,
    ground_normal: Vec3,
}

impl Default for GroundSensor {
    fn default() -> Self {
        Self {
            is_grounded: false,
            ground_normal: Vec3::Y,
        }
    }
}

impl GroundSensor {
    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn ground_normal(&self) -> Vec3 {
        self.ground_normal
    }

    /// Применяет результат query; возвращает edge только при смене состояния
    pub fn apply_probe(&mut self, hit_normal: Option<Vec3>) -> Option<GroundContactEdge> {
        let was_grounded = self.is_grounded;
        self.is_grounded = hit_normal.is_some();

        if let Some(normal) = hit_normal {
            self.ground_normal = normal.normalize_or(Vec3::Y);
        }

        match (was_grounded, self.is_grounded) {
            (false, true) => Some(GroundContactEdge::Gained),
            (true, false) => Some(GroundContactEdge::Lost),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_defaults_to_airborne() {
        let sensor = GroundSensor::default();
        assert!(!sensor.is_grounded());
        assert_eq!(sensor.ground_normal(), Vec3::Y);
    }

    #[test]
    fn test_edges_fire_once_per_transition() {
        let mut sensor = GroundSensor::default();

        assert_eq!(sensor.apply_probe(Some(Vec3::Y)), Some(GroundContactEdge::Gained));
        assert_eq!(sensor.apply_probe(Some(Vec3::Y)), None);
        assert_eq!(sensor.apply_probe(None), Some(GroundContactEdge::Lost));
        assert_eq!(sensor.apply_probe(None), None);
        assert_eq!(sensor.apply_probe(Some(Vec3::Y)), Some(GroundContactEdge::Gained));
    }

    #[test]
    fn test_normal_retained_while_airborne() {
        let mut sensor = GroundSensor::default();
        let slope = Vec3::new(0.0, 1.0, 1.0).normalize();

        sensor.apply_probe(Some(slope));
        sensor.apply_probe(None);

        assert!(!sensor.is_grounded());
        assert!((sensor.ground_normal() - slope).length() < 1e-5);
    }
}
