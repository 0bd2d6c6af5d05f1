//! Ground domain: сенсор контакта с землёй
//!
//! Содержит:
//! - GroundProbe (сырой результат shape-cast, пишет physics backend)
//! - GroundSensor (is_grounded + normal, edge detection)
//! - GroundContactChanged (event: Gained/Lost, ровно один на переход)

pub mod components;
pub mod events;
pub mod systems;

pub use components::*;
pub use events::*;
pub use systems::*;
