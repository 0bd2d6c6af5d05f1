//! Recovery domain: launched body recovery arc и navigation steering
//!
//! Содержит:
//! - RecoveryState (Navigating / Suspended / Stabilizing)
//! - RecoveryConfig
//! - NavigationAgent (steering toggle + path-following)

use bevy::prelude::*;

pub mod components;
pub mod systems;

#[cfg(test)]
mod recovery_tests;

pub use components::*;
pub use systems::*;

use crate::SimulationSet;

/// Recovery Plugin
///
/// Порядок выполнения (FixedUpdate, SimulationSet::Recovery):
/// 1. tick_recovery: arc для уже запущенных тел
/// 2. begin_recovery_on_launch: LaunchEvent этого тика → Suspended
/// 3. steer_navigation_agents: path-following (только steering_enabled)
///
/// tick идёт раньше launch: impulse применяется physics step'ом после
/// FixedUpdate, поэтому скорость запущенного тела проверяется со следующего тика.
pub struct RecoveryPlugin;

impl Plugin for RecoveryPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<RecoveryState>()
            .register_type::<RecoveryConfig>()
            .register_type::<NavigationAgent>();

        app.add_systems(
            FixedUpdate,
            (tick_recovery, begin_recovery_on_launch, steer_navigation_agents)
                .chain()
                .in_set(SimulationSet::Recovery),
        );
    }
}
