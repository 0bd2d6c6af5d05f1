//! Ошибки симуляции
//!
//! Все отказы state machine = "no state change"; вызывающая система
//! логирует ошибку и продолжает тик.

use bevy::prelude::Entity;
use thiserror::Error;

use crate::slingshot::HoldChannel;

/// Отказ capture/release операции (состояние coordinator не изменилось)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlingshotError {
    /// Press без most-likely target
    #[error("channel {channel:?}: no target to capture")]
    NoTarget { channel: HoldChannel },

    /// Press на канале, который уже держит цель (пропущенный release edge)
    #[error("channel {channel:?} already holds {held:?}")]
    ChannelBusy { channel: HoldChannel, held: Entity },

    /// Цель уже удерживается другим каналом
    #[error("target {target:?} is already held by channel {holder:?}")]
    TargetAlreadyHeld { target: Entity, holder: HoldChannel },

    /// Release без соответствующего capture (stale/duplicate edge)
    #[error("channel {channel:?}: release without a held target")]
    NothingHeld { channel: HoldChannel },
}

/// Ошибка загрузки/валидации tunables
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tunables: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("tunable `{name}` = {value} is out of range ({expected})")]
    OutOfRange {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },
}
