//! Aim rig: камера/прицел игрока (yaw + pitch + высота глаз)

use bevy::prelude::*;

/// Ориентация прицела игрока
///
/// Yaw/pitch в радианах. Yaw = 0 смотрит вдоль -Z (forward), pitch > 0: вверх.
/// Origin прицела = позиция игрока + up * eye_height.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AimRig {
    pub yaw: f32,
    pub pitch: f32,
    pub eye_height: f32,
}

impl Default for AimRig {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            eye_height: 1.6, // 1.6m: уровень глаз
        }
    }
}

impl AimRig {
    /// Поворот только по yaw (для движения по горизонтали)
    pub fn yaw_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Полный поворот прицела (yaw, затем pitch)
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    pub fn origin(&self, body_position: Vec3) -> Vec3 {
        body_position + Vec3::Y * self.eye_height
    }

    /// Mouse look: delta в "единицах мыши", sensitivity в градусах на единицу
    ///
    /// Мышь вправо (x > 0) поворачивает направо (yaw уменьшается),
    /// вниз (y > 0) опускает взгляд. Pitch клампится.
    pub fn apply_look(&mut self, delta: Vec2, sensitivity_deg: f32, min_pitch_deg: f32, max_pitch_deg: f32) {
        if delta == Vec2::ZERO {
            return;
        }

        self.yaw -= (delta.x * sensitivity_deg).to_radians();
        self.yaw = self.yaw.rem_euclid(std::f32::consts::TAU);

        let pitch_deg = self.pitch.to_degrees() - delta.y * sensitivity_deg;
        self.pitch = pitch_deg.clamp(min_pitch_deg, max_pitch_deg).to_radians();
    }

    /// Навести прицел из точки `eye` на `point` (scripted aim, без sensitivity)
    ///
    /// Совпадающие точки: no-op. Pitch не клампится.
    pub fn look_at(&mut self, eye: Vec3, point: Vec3) {
        let direction = (point - eye).normalize_or_zero();
        if direction == Vec3::ZERO {
            return;
        }

        self.yaw = (-direction.x).atan2(-direction.z).rem_euclid(std::f32::consts::TAU);
        self.pitch = direction.y.clamp(-1.0, 1.0).asin();
    }

    /// Горизонтальное направление движения из локальных осей (x = вправо, y = вперёд)
    ///
    /// Forward прицела проецируется на горизонтальную плоскость (pitch игнорируется).
    /// Результат нормализован или нулевой.
    pub fn horizontal_direction(&self, axes: Vec2) -> Vec3 {
        let yaw = self.yaw_rotation();
        let forward = yaw * Vec3::NEG_Z;
        let right = yaw * Vec3::X;
        (forward * axes.y + right * axes.x).normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_forward_is_neg_z() {
        let rig = AimRig::default();
        assert!((rig.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut rig = AimRig::default();
        rig.apply_look(Vec2::new(0.0, -1000.0), 0.3, -90.0, 90.0);
        assert!((rig.pitch.to_degrees() - 90.0).abs() < 1e-3);

        rig.apply_look(Vec2::new(0.0, 10000.0), 0.3, -90.0, 90.0);
        assert!((rig.pitch.to_degrees() + 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_horizontal_direction_ignores_pitch() {
        let rig = AimRig {
            pitch: 0.8,
            ..default()
        };
        let direction = rig.horizontal_direction(Vec2::new(0.0, 1.0));
        assert!((direction - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_diagonal_direction_normalized() {
        let rig = AimRig::default();
        let direction = rig.horizontal_direction(Vec2::new(1.0, 1.0));
        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert!(direction.y.abs() < 1e-6);
    }

    #[test]
    fn test_look_at_points_forward_at_target() {
        let mut rig = AimRig::default();
        let eye = Vec3::new(0.0, 1.6, 0.0);
        let point = Vec3::new(3.0, 0.7, -10.0);

        rig.look_at(eye, point);

        let expected = (point - eye).normalize();
        assert!((rig.forward() - expected).length() < 1e-4);
    }

    #[test]
    fn test_no_axes_gives_zero() {
        assert_eq!(AimRig::default().horizontal_direction(Vec2::ZERO), Vec3::ZERO);
    }
}
