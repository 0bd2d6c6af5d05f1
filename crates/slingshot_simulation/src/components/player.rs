//! Player control marker component
//!
//! Отмечает entity которым управляет игрок через input.

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Системы локомоции, acquisition и capture/release используют `With<Player>`.
/// Цели (Target) и навигирующие агенты этот компонент не получают.
///
/// # Single-player
/// Обычно только один entity имеет этот компонент, но системы
/// итерируют всех игроков (у каждого свой coordinator и AimRig).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;
