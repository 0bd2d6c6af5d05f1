//! Runtime tunables (speeds, accelerations, timing windows, impulses)
//!
//! [`SlingshotTunables`] собирает per-entity config компоненты всех доменов.
//! Значения по умолчанию: в `Default` каждой секции; TOML может
//! переопределить любое подмножество ключей:
//!
//! ```toml
//! [slingshot]
//! sync_window = 0.25
//!
//! [locomotion]
//! coyote_time = 0.15
//! ```
//!
//! Spawn helpers копируют секции в компоненты (LocomotionConfig на игрока,
//! RecoveryConfig на цель и т.д.), системы читают только компоненты.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ground::GroundProbeConfig;
use crate::locomotion::LocomotionConfig;
use crate::recovery::{NavigationTuning, RecoveryConfig};
use crate::slingshot::SlingshotConfig;
use crate::targeting::AimConfig;

/// Путь по умолчанию для headless demo
pub const DEFAULT_TUNABLES_PATH: &str = "assets/slingshot.toml";

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlingshotTunables {
    pub locomotion: LocomotionConfig,
    pub ground_probe: GroundProbeConfig,
    pub aim: AimConfig,
    pub slingshot: SlingshotConfig,
    pub recovery: RecoveryConfig,
    pub navigation: NavigationTuning,
}

impl SlingshotTunables {
    /// Парсит TOML; отсутствующие ключи берутся из defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let tunables: Self = toml::from_str(contents)?;
        tunables.validate()?;
        Ok(tunables)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Файл отсутствует → defaults (не ошибка); битый файл → warning + defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            crate::log_info(&format!("No {} found; using compiled defaults", path.display()));
            return Self::default();
        }

        match Self::load_from_path(path) {
            Ok(tunables) => {
                crate::log_info(&format!("Loaded tunables from {}", path.display()));
                tunables
            }
            Err(err) => {
                crate::log_warning(&format!("{err}; using compiled defaults"));
                Self::default()
            }
        }
    }

    /// Все окна/длительности/скорости должны быть неотрицательными
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks: [(&'static str, f32); 16] = [
            ("locomotion.speed", self.locomotion.speed),
            ("locomotion.ground_acceleration", self.locomotion.ground_acceleration),
            ("locomotion.air_acceleration", self.locomotion.air_acceleration),
            ("locomotion.jump_input_sticky_time", self.locomotion.jump_input_sticky_time),
            ("locomotion.coyote_time", self.locomotion.coyote_time),
            ("ground_probe.radius", self.ground_probe.radius),
            ("ground_probe.cast_distance", self.ground_probe.cast_distance),
            ("aim.max_distance", self.aim.max_distance),
            ("slingshot.sync_window", self.slingshot.sync_window),
            ("slingshot.launch_impulse", self.slingshot.launch_impulse),
            ("recovery.settle_speed_threshold", self.recovery.settle_speed_threshold),
            ("recovery.stabilization_duration", self.recovery.stabilization_duration),
            ("recovery.launch_friction", self.recovery.launch_friction),
            ("recovery.default_friction", self.recovery.default_friction),
            ("navigation.speed", self.navigation.speed),
            ("navigation.acceleration", self.navigation.acceleration),
        ];

        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange {
                    name,
                    value,
                    expected: ">= 0",
                });
            }
        }

        let half_angle = self.aim.cone_half_angle_deg;
        if !(0.0..=180.0).contains(&half_angle) {
            return Err(ConfigError::OutOfRange {
                name: "aim.cone_half_angle_deg",
                value: half_angle,
                expected: "0..=180",
            });
        }

        let mass = self.navigation.body_mass;
        if !mass.is_finite() || mass <= 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "navigation.body_mass",
                value: mass,
                expected: "> 0",
            });
        }

        if self.aim.min_pitch_deg > self.aim.max_pitch_deg {
            return Err(ConfigError::OutOfRange {
                name: "aim.min_pitch_deg",
                value: self.aim.min_pitch_deg,
                expected: "<= aim.max_pitch_deg",
            });
        }

        Ok(())
    }
}
