//! Targeting domain: реестр целей и выбор most likely target
//!
//! Содержит:
//! - Target marker + TargetRegistry (process-wide, non-owning)
//! - AimConfig / MostLikelyTarget
//! - TargetScan: cone scan + lazy line-of-sight

use bevy::prelude::*;

pub mod acquisition;
pub mod components;
pub mod registry;

pub use acquisition::*;
pub use components::*;
pub use registry::*;

use crate::SimulationSet;

/// Targeting Plugin
///
/// Порядок выполнения (FixedUpdate, SimulationSet::Acquisition):
/// 1. sync_target_registry: Added/Removed<Target> → TargetRegistry
/// 2. acquire_targets: MostLikelyTarget для каждого игрока
pub struct TargetingPlugin;

impl Plugin for TargetingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TargetRegistry>()
            .register_type::<Target>()
            .register_type::<AimConfig>()
            .register_type::<MostLikelyTarget>();

        app.add_systems(
            FixedUpdate,
            (sync_target_registry, acquire_targets)
                .chain()
                .in_set(SimulationSet::Acquisition),
        );
    }
}
