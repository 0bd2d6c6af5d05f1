//! Locomotion компоненты: config, state machine, movement input

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::vector::{move_toward, split_along_axis};

/// Параметры контроллера игрока
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Целевая горизонтальная скорость (m/s)
    pub speed: f32,
    /// Ускорение к целевой скорости на земле (m/s²)
    pub ground_acceleration: f32,
    /// Ускорение к целевой скорости в воздухе (m/s²)
    pub air_acceleration: f32,
    /// Вертикальная скорость прыжка (m/s)
    pub jump_speed: f32,
    /// Сколько живёт буферизованный jump request (сек)
    pub jump_input_sticky_time: f32,
    /// Grace period после потери земли (сек)
    pub coyote_time: f32,
    /// Трение пока игрок рулит (низкое: не мешает разгону)
    pub steering_friction: f32,
    /// Трение без input (высокое: физика гасит скольжение сама)
    pub idle_friction: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            speed: 20.0,
            ground_acceleration: 10.0,
            air_acceleration: 10.0,
            jump_speed: 7.0,
            jump_input_sticky_time: 0.12,
            coyote_time: 0.1,
            steering_friction: 0.5,
            idle_friction: 1.0,
        }
    }
}

/// Желаемое горизонтальное направление (normalized, ZERO если нет input)
///
/// Для headless тестов: mock input через этот компонент.
/// Для игры: заполняется из PlayerActions + AimRig.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    pub direction: Vec3,
}

/// Locomotion state machine игрока (jump buffering + coyote time)
///
/// Timestamps: секунды fixed clock (`Time<Fixed>::elapsed_secs`).
///
/// Инварианты:
/// - Прыжок только если request жив (now - request ≤ sticky) И
///   actor eligible (grounded ИЛИ now - last_grounded ≤ coyote)
/// - Прыжок очищает оба timestamp (нет double jump в одном grace окне)
/// - Истёкший request удаляется и больше никогда не срабатывает
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LocomotionState {
    last_jump_request: Option<f32>,
    last_grounded: Option<f32>,
    grounded: bool,
}

impl LocomotionState {
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn last_jump_request(&self) -> Option<f32> {
        self.last_jump_request
    }

    pub fn last_grounded(&self) -> Option<f32> {
        self.last_grounded
    }

    /// Синхронизация с ground sensor (каждый тик, до обработки прыжка)
    pub fn observe_ground(&mut self, grounded: bool, now: f32) {
        self.grounded = grounded;
        if grounded {
            self.last_grounded = Some(now);
        }
    }

    /// Jump edge: запоминаем время (новый request заменяет старый)
    pub fn request_jump(&mut self, now: f32) {
        self.last_jump_request = Some(now);
    }

    /// Grounded или в пределах coyote time
    pub fn is_jump_eligible(&self, now: f32, coyote_time: f32) -> bool {
        self.grounded
            || self
                .last_grounded
                .is_some_and(|grounded_at| now - grounded_at <= coyote_time)
    }

    /// Пытается выполнить буферизованный прыжок
    ///
    /// Возвращает true если прыжок выполнен (вызывающий ставит jump velocity).
    pub fn try_consume_jump(&mut self, now: f32, config: &LocomotionConfig) -> bool {
        let Some(requested_at) = self.last_jump_request else {
            return false;
        };

        if now - requested_at > config.jump_input_sticky_time {
            // Request протух: выбрасываем навсегда
            self.last_jump_request = None;
            return false;
        }

        if !self.is_jump_eligible(now, config.coyote_time) {
            return false;
        }

        self.last_jump_request = None;
        self.last_grounded = None;
        self.grounded = false; // Не ждём следующий contact query
        true
    }
}

/// Горизонтальный шаг скорости: компонент вдоль `up` не трогаем,
/// остаток линейно двигаем к `desired` не дальше `max_delta`
pub fn steer_velocity(velocity: Vec3, up: Vec3, desired: Vec3, max_delta: f32) -> Vec3 {
    let (vertical, horizontal) = split_along_axis(velocity, up);
    move_toward(horizontal, desired, max_delta) + vertical
}

/// Скорость после прыжка: горизонталь сохраняется, вдоль `up` ровно jump_speed
pub fn jump_velocity(velocity: Vec3, up: Vec3, jump_speed: f32) -> Vec3 {
    let (_, horizontal) = split_along_axis(velocity, up);
    horizontal + up.normalize_or(Vec3::Y) * jump_speed
}
