//! ECS компоненты игрока
//!
//! Организация:
//! - player: player control marker (Player)
//! - actions: logical input за тик (PlayerActions, ButtonState)
//! - aim: прицел/камера (AimRig)
//!
//! Доменные компоненты (GroundSensor, LocomotionState, Target,
//! CaptureReleaseCoordinator, RecoveryState) живут в своих модулях.

pub mod actions;
pub mod aim;
pub mod player;

pub use actions::*;
pub use aim::*;
pub use player::*;
