//! Console debug hooks
//!
//! Direct state setters that bypass the normal phase transitions.

use super::state::{GamePhase, GameState};

/// Ticks of god-mode invulnerability (effectively forever)
const GOD_MODE_TICKS: u32 = 999_999;

/// Jump straight to the level-complete screen
pub fn force_level_complete(state: &mut GameState) {
    log::warn!("debug: forcing level {} complete", state.level);
    state.show_level_complete();
}

pub fn add_life(state: &mut GameState) {
    state.lives = state.lives.saturating_add(1);
    log::warn!("debug: lives = {}", state.lives);
}

/// Load any level, leaving terminal phases
pub fn skip_to_level(state: &mut GameState, level: u32) {
    log::warn!("debug: skipping to level {}", level);
    state.phase = GamePhase::Playing;
    state.level = level;
    state.load_level(level);
}

pub fn god_mode(state: &mut GameState) {
    log::warn!("debug: god mode");
    state.player.make_invulnerable(GOD_MODE_TICKS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_to_level() {
        let mut state = GameState::new(5);
        state.game_over();
        skip_to_level(&mut state, 60);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 60);
        assert_eq!(state.enemies.len(), 5);

        skip_to_level(&mut state, 150);
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_add_life_ignores_cap() {
        let mut state = GameState::new(5);
        state.lives = 9;
        add_life(&mut state);
        assert_eq!(state.lives, 10);
    }

    #[test]
    fn test_god_mode_and_force_complete() {
        let mut state = GameState::new(5);
        god_mode(&mut state);
        assert!(state.player.invulnerable);
        force_level_complete(&mut state);
        assert_eq!(state.phase, GamePhase::LevelComplete);
    }
}
