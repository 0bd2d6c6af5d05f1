//! Physics backend (Rapier)
//!
//! - queries: ground shape-cast, line-of-sight ray
//! - spawn: игрок, цели, пол с rapier компонентами
//! - SlingshotPhysicsPlugin: Rapier в fixed schedule

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

pub mod queries;
pub mod spawn;

pub use queries::*;
pub use spawn::*;

/// Rapier step в FixedPostUpdate: после всех SimulationSet систем тика
///
/// Impulses и velocity, выставленные в FixedUpdate, применяются этим же тиком.
pub struct SlingshotPhysicsPlugin;

impl Plugin for SlingshotPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
    }
}
