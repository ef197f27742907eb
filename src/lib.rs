//! Wizard Platformer - a side-scrolling pixel-art platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, levels, AI, game state)
//! - `renderer`: Sprite cache, scene drawing and the WebGPU quad pipeline
//! - `platform`: Browser/native platform abstraction (keyboard input)
//! - `tuning`: Data-driven game balance
//! - `settings`: Persisted player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per display frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical view (canvas) size in pixels
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 600.0;
    /// Height of the playable world; falling this far past it loses a life
    pub const WORLD_HEIGHT: f32 = VIEW_HEIGHT;
    pub const FALL_OFF_MARGIN: f32 = 100.0;
    /// Horizontal extent of every level
    pub const WORLD_WIDTH: f32 = 1600.0;

    /// Top of the ground strip every level starts with
    pub const GROUND_Y: f32 = 550.0;
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Where the player (re)spawns at level start and after falling off
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 400.0;
    pub const PLAYER_SIZE: f32 = 32.0;

    /// Final level; it hosts the boss and has no door
    pub const BOSS_LEVEL: u32 = 100;

    /// Camera clamp on the vertical axis
    pub const CAMERA_MIN_Y: f32 = -200.0;
    pub const CAMERA_MAX_Y: f32 = 0.0;
}
