//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard state, snapshotted into `TickInput` once per tick)

pub mod input;

pub use input::{Command, KeyboardState};
