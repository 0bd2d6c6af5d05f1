//! Slingshot компоненты: hold channels, slots, release records, coordinator

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SlingshotError;

/// Канал удержания (одна "рука" / один input)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub enum HoldChannel {
    Primary,
    Secondary,
}

impl HoldChannel {
    /// Фиксированный порядок обработки внутри тика: 0, затем 1
    pub const ALL: [HoldChannel; 2] = [HoldChannel::Primary, HoldChannel::Secondary];

    pub fn index(self) -> usize {
        match self {
            HoldChannel::Primary => 0,
            HoldChannel::Secondary => 1,
        }
    }

    pub fn other(self) -> HoldChannel {
        match self {
            HoldChannel::Primary => HoldChannel::Secondary,
            HoldChannel::Secondary => HoldChannel::Primary,
        }
    }
}

/// Snapshot слота в момент release
///
/// Живёт в слоте до pairing (consume) или до нового capture на этом канале.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ReleaseRecord {
    pub target: Entity,
    pub captured_at: f32,
    pub released_at: f32,
}

/// Состояние одного канала: Empty → Held → Released → Empty
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub enum HoldSlot {
    #[default]
    Empty,
    Held { target: Entity, captured_at: f32 },
    /// Неспаренный release (pending, без expiry)
    Released(ReleaseRecord),
}

impl HoldSlot {
    pub fn held_target(&self) -> Option<Entity> {
        match self {
            HoldSlot::Held { target, .. } => Some(*target),
            _ => None,
        }
    }

    pub fn pending_release(&self) -> Option<&ReleaseRecord> {
        match self {
            HoldSlot::Released(record) => Some(record),
            _ => None,
        }
    }
}

/// Параметры slingshot (на игроке)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct SlingshotConfig {
    /// Максимальная разница release timestamps для pairing (сек)
    pub sync_window: f32,
    /// Величина impulse на каждую цель (N·s)
    pub launch_impulse: f32,
}

impl Default for SlingshotConfig {
    fn default() -> Self {
        Self {
            sync_window: 0.2,
            launch_impulse: 15.0,
        }
    }
}

/// Dual-hold coordinator игрока
///
/// Инварианты:
/// - Цель, Held в одном канале, не может быть захвачена другим
/// - Capture очищает pending release своего канала
/// - Pairing потребляет оба release атомарно (нет double fire)
/// - Любой отказ (Err) оставляет состояние без изменений
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CaptureReleaseCoordinator {
    slots: [HoldSlot; 2],
}

impl CaptureReleaseCoordinator {
    pub fn slot(&self, channel: HoldChannel) -> &HoldSlot {
        &self.slots[channel.index()]
    }

    /// Цели в состоянии Held (по всем каналам, в порядке каналов)
    pub fn held_targets(&self) -> impl Iterator<Item = Entity> + '_ {
        self.slots.iter().filter_map(HoldSlot::held_target)
    }

    pub fn holder_of(&self, target: Entity) -> Option<HoldChannel> {
        HoldChannel::ALL
            .into_iter()
            .find(|channel| self.slot(*channel).held_target() == Some(target))
    }

    /// Press edge: Empty/Released + кандидат → Held
    pub fn press(&mut self, channel: HoldChannel, candidate: Option<Entity>, now: f32) -> Result<Entity, SlingshotError> {
        if let Some(held) = self.slot(channel).held_target() {
            return Err(SlingshotError::ChannelBusy { channel, held });
        }

        let target = candidate.ok_or(SlingshotError::NoTarget { channel })?;

        if let Some(holder) = self.holder_of(target) {
            return Err(SlingshotError::TargetAlreadyHeld { target, holder });
        }

        // Свежий capture инвалидирует неспаренный release этого канала
        self.slots[channel.index()] = HoldSlot::Held {
            target,
            captured_at: now,
        };
        Ok(target)
    }

    /// Release edge: Held → Released (заменяет прежний pending record)
    pub fn release(&mut self, channel: HoldChannel, now: f32) -> Result<ReleaseRecord, SlingshotError> {
        let HoldSlot::Held { target, captured_at } = *self.slot(channel) else {
            return Err(SlingshotError::NothingHeld { channel });
        };

        let record = ReleaseRecord {
            target,
            captured_at,
            released_at: now,
        };
        self.slots[channel.index()] = HoldSlot::Released(record);
        Ok(record)
    }

    /// Pairing: оба канала pending и |t0 - t1| ≤ window → оба records consumed
    ///
    /// Возвращает (record канала 0, record канала 1). Вне окна: None,
    /// оба records остаются pending.
    pub fn try_pair(&mut self, sync_window: f32) -> Option<(ReleaseRecord, ReleaseRecord)> {
        let first = *self.slots[0].pending_release()?;
        let second = *self.slots[1].pending_release()?;

        if (first.released_at - second.released_at).abs() > sync_window {
            return None;
        }

        self.slots = [HoldSlot::Empty, HoldSlot::Empty];
        Some((first, second))
    }
}

/// Направление launch: нормализованный вектор от первой цели ко второй
///
/// Совпадающие позиции → ZERO (impulse не прикладывается).
pub fn launch_direction(first: Vec3, second: Vec3) -> Vec3 {
    (second - first).normalize_or_zero()
}
