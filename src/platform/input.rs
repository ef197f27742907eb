//! Keyboard state
//!
//! Key listeners only record which keys are held. The frame loop reads a
//! snapshot each tick, so gameplay never sees a key change mid-tick.

use std::collections::HashSet;

use crate::sim::TickInput;

const LEFT_KEYS: [&str; 2] = ["ArrowLeft", "KeyA"];
const RIGHT_KEYS: [&str; 2] = ["ArrowRight", "KeyD"];
const JUMP_KEYS: [&str; 3] = ["ArrowUp", "Space", "KeyW"];

/// One-shot actions triggered on key press rather than held state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Toggle background music
    ToggleMusic,
    /// Continue from level complete, or restart after game over / victory
    Confirm,
    /// Debug: jump to the level-complete screen
    DebugNextLevel,
    /// Debug: one extra life
    DebugAddLife,
    /// Debug: skip ahead ten levels
    DebugSkipLevels,
    /// Debug: permanent invulnerability
    DebugGodMode,
}

impl Command {
    /// Map a `KeyboardEvent.code` to a command. Debug keys are only mapped
    /// when `debug` is set.
    pub fn from_code(code: &str, debug: bool) -> Option<Self> {
        match code {
            "KeyM" => Some(Command::ToggleMusic),
            "Enter" => Some(Command::Confirm),
            "KeyN" if debug => Some(Command::DebugNextLevel),
            "KeyL" if debug => Some(Command::DebugAddLife),
            "KeyK" if debug => Some(Command::DebugSkipLevels),
            "KeyG" if debug => Some(Command::DebugGodMode),
            _ => None,
        }
    }
}

/// Set of currently held key codes
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<String>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Returns true if the key was not already held
    /// (auto-repeat events return false).
    pub fn key_down(&mut self, code: &str) -> bool {
        self.pressed.insert(code.to_string())
    }

    pub fn key_up(&mut self, code: &str) {
        self.pressed.remove(code);
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.contains(code)
    }

    fn any(&self, codes: &[&str]) -> bool {
        codes.iter().any(|code| self.is_pressed(code))
    }

    /// Release everything (window lost focus)
    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Held movement keys as a tick input
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.any(&LEFT_KEYS),
            right: self.any(&RIGHT_KEYS),
            jump: self.any(&JUMP_KEYS),
        }
    }
}

/// Keys whose browser default (scrolling) should be suppressed
pub fn is_game_key(code: &str) -> bool {
    LEFT_KEYS.contains(&code) || RIGHT_KEYS.contains(&code) || JUMP_KEYS.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_tracks_held_keys() {
        let mut keys = KeyboardState::new();
        assert_eq!(keys.snapshot(), TickInput::default());

        keys.key_down("KeyA");
        keys.key_down("Space");
        let input = keys.snapshot();
        assert!(input.left);
        assert!(input.jump);
        assert!(!input.right);

        keys.key_up("KeyA");
        assert!(!keys.snapshot().left);
    }

    #[test]
    fn test_alternate_bindings() {
        for code in ["ArrowUp", "Space", "KeyW"] {
            let mut keys = KeyboardState::new();
            keys.key_down(code);
            assert!(keys.snapshot().jump, "{code} should jump");
        }
        let mut keys = KeyboardState::new();
        keys.key_down("ArrowRight");
        keys.key_down("KeyD");
        keys.key_up("ArrowRight");
        assert!(keys.snapshot().right);
    }

    #[test]
    fn test_auto_repeat_is_reported() {
        let mut keys = KeyboardState::new();
        assert!(keys.key_down("KeyM"));
        assert!(!keys.key_down("KeyM"));
        keys.clear();
        assert!(!keys.is_pressed("KeyM"));
    }

    #[test]
    fn test_commands() {
        assert_eq!(Command::from_code("KeyM", false), Some(Command::ToggleMusic));
        assert_eq!(Command::from_code("Enter", false), Some(Command::Confirm));
        assert_eq!(Command::from_code("KeyG", false), None);
        assert_eq!(Command::from_code("KeyG", true), Some(Command::DebugGodMode));
        assert!(is_game_key("ArrowLeft"));
        assert!(!is_game_key("KeyM"));
    }
}
