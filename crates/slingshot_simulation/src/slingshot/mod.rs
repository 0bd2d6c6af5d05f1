//! Slingshot domain: dual-hold capture, release pairing, launch
//!
//! Содержит:
//! - HoldChannel / HoldSlot / ReleaseRecord
//! - CaptureReleaseCoordinator (per player)
//! - TargetCaptured / TargetReleased / LaunchEvent

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;


pub use components::*;
pub use events::*;
pub use systems::*;

use crate::SimulationSet;

/// Slingshot Plugin
///
/// Порядок выполнения (FixedUpdate, SimulationSet::CaptureRelease):
/// 1. handle_hold_input: press/release edges (канал 0, затем 1)
/// 2. pair_releases: sync window → LaunchEvent
/// 3. apply_launch_impulses: ExternalImpulse на dynamic целях
pub struct SlingshotPlugin;

impl Plugin for SlingshotPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TargetCaptured>()
            .add_event::<TargetReleased>()
            .add_event::<LaunchEvent>()
            .register_type::<CaptureReleaseCoordinator>()
            .register_type::<SlingshotConfig>();

        app.add_systems(
            FixedUpdate,
            (handle_hold_input, pair_releases, apply_launch_impulses)
                .chain()
                .in_set(SimulationSet::CaptureRelease),
        );
    }
}
