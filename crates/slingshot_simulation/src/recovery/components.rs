//! Recovery компоненты: recovery arc state machine + navigating agent

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;
use serde::{Deserialize, Serialize};

use crate::shared::vector::ease_in_out;

/// Параметры recovery arc (на цели)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Suspended → Stabilizing когда |linvel| ≤ threshold (m/s)
    pub settle_speed_threshold: f32,
    /// Длительность интерполяции к upright (сек)
    pub stabilization_duration: f32,
    /// Трение на время Suspended + Stabilizing
    pub launch_friction: f32,
    /// Трение после возврата в Navigating
    pub default_friction: f32,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            settle_speed_threshold: 0.5,
            stabilization_duration: 1.0,
            launch_friction: 2.0,
            default_friction: 0.5,
        }
    }
}

/// Recovery arc: Navigating → Suspended → Stabilizing → Navigating
///
/// Циклический: новый launch из любого состояния перезапускает с Suspended
/// (незавершённая интерполяция отбрасывается, без blending).
///
/// Suspended завершается только по |linvel|, поэтому Velocity обязателен.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
#[require(RecoveryConfig, Velocity)]
pub enum RecoveryState {
    #[default]
    Navigating,
    /// Ждём пока скорость упадёт до threshold
    Suspended,
    Stabilizing { start_pose: Quat, elapsed: f32 },
}

/// Результат одного тика recovery
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecoveryStep {
    /// Ничего не изменилось
    Idle,
    /// Suspended → Stabilizing (start pose захвачена, поворот не трогаем)
    BeganStabilizing,
    /// Kinematic override ориентации
    Orient(Quat),
    /// Stabilizing → Navigating (snap в upright, steering обратно)
    Completed,
}

impl RecoveryState {
    pub fn is_recovering(&self) -> bool {
        !matches!(self, RecoveryState::Navigating)
    }

    pub fn launch(&mut self) {
        *self = RecoveryState::Suspended;
    }

    /// Один тик recovery arc
    ///
    /// `speed`: |linvel|; `rotation`: текущая ориентация тела; `delta`: fixed dt.
    pub fn step(&mut self, speed: f32, rotation: Quat, delta: f32, config: &RecoveryConfig) -> RecoveryStep {
        match *self {
            RecoveryState::Navigating => RecoveryStep::Idle,
            RecoveryState::Suspended => {
                if speed > config.settle_speed_threshold {
                    return RecoveryStep::Idle;
                }
                *self = RecoveryState::Stabilizing {
                    start_pose: rotation,
                    elapsed: 0.0,
                };
                RecoveryStep::BeganStabilizing
            }
            RecoveryState::Stabilizing { start_pose, elapsed } => {
                let elapsed = elapsed + delta;
                if elapsed > config.stabilization_duration {
                    *self = RecoveryState::Navigating;
                    return RecoveryStep::Completed;
                }

                *self = RecoveryState::Stabilizing { start_pose, elapsed };
                RecoveryStep::Orient(stabilization_pose(
                    start_pose,
                    elapsed,
                    config.stabilization_duration,
                ))
            }
        }
    }
}

/// Ориентация на момент `elapsed`: start pose → upright по ease-in-ease-out
///
/// elapsed = 0 → start_pose, elapsed ≥ duration → IDENTITY.
pub fn stabilization_pose(start_pose: Quat, elapsed: f32, duration: f32) -> Quat {
    if duration <= 0.0 || elapsed >= duration {
        return Quat::IDENTITY;
    }
    let t = ease_in_out(elapsed / duration);
    start_pose.slerp(Quat::IDENTITY, t)
}

/// Navigation tuning из конфига (агенты + их тела)
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationTuning {
    pub speed: f32,
    pub acceleration: f32,
    /// Масса тела цели (кг). launch speed = launch_impulse / body_mass
    pub body_mass: f32,
}

impl Default for NavigationTuning {
    fn default() -> Self {
        Self {
            speed: 3.0,
            acceleration: 1.0,
            body_mass: 5.0,
        }
    }
}

/// Навигирующее тело (autonomous path-following)
///
/// `next_path_position` поставляет внешний pathfinder. Пока `steering_enabled`,
/// linvel линейно тянется к `normalize(next - position) * speed`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NavigationAgent {
    pub speed: f32,
    pub acceleration: f32,
    pub steering_enabled: bool,
    pub next_path_position: Option<Vec3>,
}

impl Default for NavigationAgent {
    fn default() -> Self {
        Self::from_tuning(&NavigationTuning::default())
    }
}

impl NavigationAgent {
    pub fn from_tuning(tuning: &NavigationTuning) -> Self {
        Self {
            speed: tuning.speed,
            acceleration: tuning.acceleration,
            steering_enabled: true,
            next_path_position: None,
        }
    }

    /// Steering toggle (recovery выключает на время arc)
    pub fn set_steering(&mut self, enabled: bool) {
        self.steering_enabled = enabled;
    }

    /// Желаемая скорость или None (steering выключен / нет пути)
    pub fn desired_velocity(&self, position: Vec3) -> Option<Vec3> {
        if !self.steering_enabled {
            return None;
        }
        let next = self.next_path_position?;
        Some((next - position).normalize_or_zero() * self.speed)
    }
}
