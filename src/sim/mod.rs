//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per display frame
//! - Seeded RNG only
//! - Stable iteration order (platforms in generation order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod world_gen;

pub use autopilot::autopilot_input;
pub use camera::camera_offset;
pub use collision::{Aabb, lands_on};
pub use spawner::{SpawnContext, SpawnProducer, SpawnQueue, Spawner, spawn_queue, spawn_x};
pub use state::{
    Enemy, EnemyKind, GameEvent, GameOverCause, GamePhase, GameState, Platform, Player,
};
pub use tick::{TickInput, tick};
pub use world_gen::generate_platforms;
