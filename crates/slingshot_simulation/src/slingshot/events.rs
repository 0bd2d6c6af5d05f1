//! Slingshot events

use bevy::prelude::*;

use super::components::HoldChannel;

/// Цель захвачена каналом
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetCaptured {
    pub shooter: Entity,
    pub channel: HoldChannel,
    pub target: Entity,
    pub at: f32,
}

/// Канал отпустил цель (release record pending)
#[derive(Event, Debug, Clone, Copy)]
pub struct TargetReleased {
    pub shooter: Entity,
    pub channel: HoldChannel,
    pub target: Entity,
    pub at: f32,
}

/// Успешный pairing двух releases (immutable)
///
/// `first` получает `-direction * impulse`, `second`: `+direction * impulse`:
/// цели расталкиваются друг от друга вдоль оси first → second.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LaunchEvent {
    pub shooter: Entity,
    pub first: Entity,
    pub second: Entity,
    pub direction: Vec3,
    pub impulse: f32,
}

impl LaunchEvent {
    pub fn impulse_for(&self, target: Entity) -> Vec3 {
        if target == self.first {
            -self.direction * self.impulse
        } else if target == self.second {
            self.direction * self.impulse
        } else {
            Vec3::ZERO
        }
    }

    pub fn targets(&self) -> [Entity; 2] {
        [self.first, self.second]
    }
}
