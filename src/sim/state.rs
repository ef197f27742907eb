//! Game state and session-level transitions
//!
//! `GameState` is the session context: it owns every entity list, the camera
//! and the score/lives/level counters. Nothing else mutates them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::{Boss, Collectible, Door, Enemy, Platform, PowerUp};
use super::events::GameEvent;
use super::level::generate_level;
use super::particles::ParticleSystem;
use super::player::Player;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Door reached; waiting for the player to continue
    LevelComplete,
    /// Out of lives (terminal until restart)
    GameOver,
    /// Boss defeated or the last level finished (terminal until restart)
    Victory,
}

/// Smoothed follow camera (top-left of the view in world space)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub pos: Vec2,
}

impl Camera {
    /// Ease toward centering `target`, then clamp to the level
    pub fn follow(&mut self, target: Vec2, smoothing: f32) {
        let goal = target - Vec2::new(VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0);
        self.pos += (goal - self.pos) * smoothing;
        self.pos.x = self.pos.x.clamp(0.0, WORLD_WIDTH - VIEW_WIDTH);
        self.pos.y = self.pos.y.clamp(CAMERA_MIN_Y, CAMERA_MAX_Y);
    }
}

/// Numbers the HUD displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub lives: u8,
    pub level: u32,
    pub collected: u32,
    pub needed: u32,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed for visual randomness
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Current level number (1-based)
    pub level: u32,
    pub score: u32,
    pub lives: u8,
    /// Collectibles picked up on the current level
    pub collectibles_collected: u32,
    /// Simulation tick counter
    pub time_ticks: u64,

    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub power_ups: Vec<PowerUp>,
    pub door: Option<Door>,
    pub boss: Option<Boss>,
    pub camera: Camera,

    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: ParticleSystem,
    /// Events raised since the frontend last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Start a new session on level 1 with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Playing,
            level: 1,
            score: 0,
            lives: tuning.starting_lives,
            collectibles_collected: 0,
            time_ticks: 0,
            player: Player::new(PLAYER_START_X, PLAYER_START_Y, &tuning),
            platforms: Vec::new(),
            enemies: Vec::new(),
            collectibles: Vec::new(),
            power_ups: Vec::new(),
            door: None,
            boss: None,
            camera: Camera::default(),
            particles: ParticleSystem::new(seed),
            events: Vec::new(),
            tuning,
        };
        log::info!("New session (seed {})", seed);
        state.load_level(1);
        state
    }

    /// Replace every level entity with a fresh copy of `level`.
    /// Levels past the boss level end the run in victory.
    pub fn load_level(&mut self, level: u32) {
        self.platforms.clear();
        self.enemies.clear();
        self.collectibles.clear();
        self.power_ups.clear();
        self.door = None;
        self.boss = None;
        self.collectibles_collected = 0;
        self.player.reset_position();

        let Some(generated) = generate_level(level) else {
            log::info!("Level {} is past the final level", level);
            self.victory();
            return;
        };

        self.level = generated.number;
        self.platforms = generated.platforms;
        self.enemies = generated.enemies;
        self.collectibles = generated.collectibles;
        self.power_ups = generated.power_ups;
        self.door = generated.door;
        self.boss = generated.boss;

        log::info!("Loaded level {} ({:?})", self.level, generated.band);
        self.emit(GameEvent::LevelLoaded { level: self.level });
    }

    /// Leave the level-complete screen for the next level
    pub fn continue_to_next_level(&mut self) {
        if self.phase != GamePhase::LevelComplete {
            log::warn!("continue requested while {:?}", self.phase);
            return;
        }

        self.phase = GamePhase::Playing;
        let next = self.level + 1;
        if next > BOSS_LEVEL {
            self.level = next;
            self.victory();
        } else {
            self.load_level(next);
        }
    }

    /// Reset score, lives and level and start over on level 1
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.level = 1;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.player = Player::new(PLAYER_START_X, PLAYER_START_Y, &self.tuning);
        self.camera = Camera::default();
        self.particles.clear();
        log::info!("Restarting session");
        self.load_level(1);
    }

    /// Count a collectible; opens the door once enough are in
    pub fn collect_item(&mut self) {
        self.score += 1;
        self.collectibles_collected += 1;
        self.emit(GameEvent::ItemCollected {
            collected: self.collectibles_collected,
        });

        if self.collectibles_collected >= self.tuning.collectibles_needed
            && let Some(door) = &mut self.door
            && door.open()
        {
            log::debug!("Door opened on level {}", self.level);
            self.emit(GameEvent::DoorOpened);
        }
    }

    /// Lose a life and start the grace window
    pub fn player_hit(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.player.make_invulnerable(self.tuning.grace_ticks);
        self.emit(GameEvent::PlayerHit { lives: self.lives });

        if self.lives == 0 {
            self.game_over();
        }
    }

    pub fn show_level_complete(&mut self) {
        self.phase = GamePhase::LevelComplete;
        log::info!("Level {} complete (score {})", self.level, self.score);
        self.emit(GameEvent::LevelComplete { level: self.level });
        let center = self.camera.pos + Vec2::new(VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0);
        self.particles.add_explosion(center, 15, 0x32CD32);
    }

    pub fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        log::info!("Game over on level {} (score {})", self.level, self.score);
        self.emit(GameEvent::GameOver);
    }

    pub fn victory(&mut self) {
        self.phase = GamePhase::Victory;
        log::info!("Victory! Final score {}", self.score);
        self.emit(GameEvent::Victory);
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            lives: self.lives,
            level: self.level,
            collected: self.collectibles_collected,
            needed: self.tuning.collectibles_needed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_loads_level_one() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.collectibles.len(), 12);
        assert!(state.door.is_some());
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(state.drain_events(), vec![GameEvent::LevelLoaded { level: 1 }]);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_door_opens_exactly_once() {
        let mut state = GameState::new(1);
        state.drain_events();

        for _ in 0..4 {
            state.collect_item();
        }
        assert!(!state.door.as_ref().unwrap().is_open);

        state.collect_item();
        assert!(state.door.as_ref().unwrap().is_open);
        state.collect_item();
        state.collect_item();

        let opened = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::DoorOpened)
            .count();
        assert_eq!(opened, 1);
        assert_eq!(state.score, 7);
    }

    #[test]
    fn test_hits_until_game_over() {
        let mut state = GameState::new(1);
        state.player_hit();
        assert_eq!(state.lives, 2);
        assert!(state.player.invulnerable);
        assert_eq!(state.player.invulnerability_timer, 120);
        state.player_hit();
        state.player_hit();
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Lives never underflow
        state.player_hit();
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_continue_requires_level_complete() {
        let mut state = GameState::new(1);
        state.continue_to_next_level();
        assert_eq!(state.level, 1);

        state.show_level_complete();
        state.continue_to_next_level();
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_continue_past_final_level_is_victory() {
        let mut state = GameState::new(1);
        state.load_level(BOSS_LEVEL);
        state.show_level_complete();
        state.continue_to_next_level();
        assert_eq!(state.phase, GamePhase::Victory);
    }

    #[test]
    fn test_loading_beyond_final_level_is_victory() {
        let mut state = GameState::new(1);
        state.load_level(250);
        assert_eq!(state.phase, GamePhase::Victory);
        assert!(state.platforms.is_empty());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(1);
        state.load_level(40);
        state.score = 30;
        state.lives = 1;
        state.collectibles_collected = 4;
        state.player.speed_boost = 100;
        state.game_over();

        state.restart();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.level, 1);
        assert_eq!(state.collectibles_collected, 0);
        assert_eq!(state.player.speed_boost, 0);
        assert_eq!(state.collectibles.len(), 12);
    }

    #[test]
    fn test_camera_clamps() {
        let mut camera = Camera::default();
        camera.follow(Vec2::new(100.0, 400.0), 1.0);
        assert_eq!(camera.pos, Vec2::new(0.0, 0.0));
        camera.follow(Vec2::new(1590.0, -500.0), 1.0);
        assert_eq!(camera.pos, Vec2::new(WORLD_WIDTH - VIEW_WIDTH, CAMERA_MIN_Y));
    }

    #[test]
    fn test_camera_smoothing() {
        let mut camera = Camera::default();
        camera.follow(Vec2::new(1000.0, 300.0), 0.1);
        // Goal x is 600; a tenth of the way there
        assert!((camera.pos.x - 60.0).abs() < 1e-4);
        assert_eq!(camera.pos.y, 0.0);
    }
}
