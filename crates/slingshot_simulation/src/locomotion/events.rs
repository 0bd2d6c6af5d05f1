//! Locomotion events

use bevy::prelude::*;

/// Event: намерение прыгнуть (jump edge)
///
/// Генерируется:
/// - process_player_actions (jump just_pressed)
///
/// Обрабатывается:
/// - apply_locomotion: записывает request timestamp, прыжок сработает
///   как только actor станет eligible (в пределах sticky window)
#[derive(Event, Debug, Clone)]
pub struct JumpIntent {
    pub entity: Entity,
}

/// Event: прыжок выполнен
#[derive(Event, Debug, Clone)]
pub struct Jumped {
    pub entity: Entity,
    /// Fixed clock время прыжка
    pub at: f32,
}
