//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per frame)
//! - Seeded RNG only, and only for visual particles
//! - Stable iteration order (entity list order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod debug;
pub mod entities;
pub mod events;
pub mod level;
pub mod particles;
pub mod player;
pub mod state;
pub mod tick;

pub use collision::{Bounds, Rect, Resolution, collides_with, resolve_platform_collision};
pub use entities::{
    Axis, Boss, BossState, Collectible, Door, Enemy, EnemyKind, Mover, Platform, PlatformKind,
    PowerUp, PowerUpKind,
};
pub use events::{GameEvent, SoundCue};
pub use level::{DifficultyBand, Level, generate_level};
pub use particles::{Particle, ParticleSystem};
pub use player::{AnimState, Player};
pub use state::{Camera, GamePhase, GameState, Hud};
pub use tick::{TickInput, tick};
