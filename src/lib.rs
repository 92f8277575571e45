//! Gap Runner - An endless side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, spawning, physics, game state)
//! - `renderer`: Draw list and WebGPU rendering pipeline
//! - `session`: Per-frame game loop glue between input, sim, storage and renderer
//! - `platform`: Browser/native input abstraction
//! - `persistence`: Key-value storage (LocalStorage on web)
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use session::{FrameReport, Session};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants that are not data-driven
pub mod consts {
    /// Widest canvas the game will size itself to
    pub const MAX_VIEWPORT_WIDTH: u32 = 480;
    /// Horizontal padding subtracted from the window width
    pub const VIEWPORT_PADDING: u32 = 20;

    /// Walker enemies patrol at ground level, this far above the viewport bottom
    pub const WALKER_GROUND_OFFSET: f32 = 48.0;
    /// Walker horizontal speed (sign chosen at spawn)
    pub const WALKER_SPEED: f32 = 1.2;
    pub const WALKER_SIZE: f32 = 18.0;

    /// Fallers start this far above the viewport top, risers this far below the bottom
    pub const FLYER_EDGE_OFFSET: f32 = 20.0;
    /// Vertical speed of fallers (down) and risers (up)
    pub const FLYER_SPEED: f32 = 3.0;
    pub const FLYER_SIZE: f32 = 16.0;

    /// Spawn x is drawn from [0, world_width - SPAWN_X_INSET)
    pub const SPAWN_X_INSET: f32 = 40.0;
}

/// Width of the canvas for a given browser window width
#[inline]
pub fn viewport_width_for_window(inner_width: u32) -> u32 {
    use consts::*;
    inner_width
        .saturating_sub(VIEWPORT_PADDING)
        .min(MAX_VIEWPORT_WIDTH)
}
