//! Logical player actions (пишет input collaborator каждый тик)
//!
//! Какие физические клавиши маппятся на какие actions: не наша забота.
//! Здесь только логические actions с edge-флагами текущего тика.

use bevy::prelude::*;

/// Состояние одной кнопки за тик
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct ButtonState {
    /// Удерживается сейчас
    pub pressed: bool,
    /// Нажата в этом тике
    pub just_pressed: bool,
    /// Отпущена в этом тике
    pub just_released: bool,
}

impl ButtonState {
    /// Edge "нажата" (pressed + just_pressed)
    pub fn press() -> Self {
        Self {
            pressed: true,
            just_pressed: true,
            just_released: false,
        }
    }

    /// Удерживается без edge
    pub fn held() -> Self {
        Self {
            pressed: true,
            ..default()
        }
    }

    /// Edge "отпущена"
    pub fn release() -> Self {
        Self {
            just_released: true,
            ..default()
        }
    }
}

/// Logical actions игрока за текущий тик
///
/// # Fields
/// - move_*: удерживаемые направления (WASD-like)
/// - jump: edge для jump buffering
/// - hold: два канала захвата (index 0 = Primary, 1 = Secondary)
/// - look_delta: смещение взгляда (x = yaw, y = pitch, в "единицах мыши")
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerActions {
    pub move_forward: bool,
    pub move_back: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub jump: ButtonState,
    pub hold: [ButtonState; 2],
    pub look_delta: Vec2,
}

impl PlayerActions {
    /// Локальное направление движения: x = вправо, y = вперёд (не нормализовано)
    pub fn move_axes(&self) -> Vec2 {
        let mut axes = Vec2::ZERO;
        if self.move_forward {
            axes.y += 1.0;
        }
        if self.move_back {
            axes.y -= 1.0;
        }
        if self.move_right {
            axes.x += 1.0;
        }
        if self.move_left {
            axes.x -= 1.0;
        }
        axes
    }

    /// Сбросить edge-флаги (pressed сохраняется): вызывается после тика
    pub fn clear_edges(&mut self) {
        self.jump.just_pressed = false;
        self.jump.just_released = false;
        for button in self.hold.iter_mut() {
            button.just_pressed = false;
            button.just_released = false;
        }
        self.look_delta = Vec2::ZERO;
    }
}
