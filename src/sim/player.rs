//! Player controller
//!
//! Input → velocity → Euler integration → animation state → timers, once per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect, Resolution};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;

/// Animation state, derived every tick from `on_ground` and horizontal speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimState {
    Idle,
    Walking,
    Jump,
}

/// Horizontal speed below which the player counts as standing still
const WALK_THRESHOLD: f32 = 0.5;
/// Ticks per walk-cycle frame
const WALK_FRAME_TICKS: u32 = 8;

/// The player-controlled wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub jump_power: f32,
    pub on_ground: bool,
    /// +1 facing right, -1 facing left
    pub facing: f32,

    anim_state: AnimState,
    pub anim_frame: u8,
    anim_timer: u32,

    pub invulnerable: bool,
    pub invulnerability_timer: u32,

    /// Remaining ticks of each power-up
    pub speed_boost: u32,
    pub jump_boost: u32,
    pub star_power: bool,
}

impl Player {
    pub fn new(x: f32, y: f32, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            speed: tuning.player_speed,
            jump_power: tuning.player_jump_power,
            on_ground: false,
            facing: 1.0,
            anim_state: AnimState::Idle,
            anim_frame: 0,
            anim_timer: 0,
            invulnerable: false,
            invulnerability_timer: 0,
            speed_boost: 0,
            jump_boost: 0,
            star_power: false,
        }
    }

    pub fn anim_state(&self) -> AnimState {
        self.anim_state
    }

    /// Lowest y the player may reach when the ground fallback is on
    pub fn floor_y(&self) -> f32 {
        WORLD_HEIGHT - self.size.y - GROUND_HEIGHT
    }

    /// Advance one tick. Returns true if the player jumped this tick.
    pub fn update(&mut self, input: &TickInput, tuning: &Tuning) -> bool {
        let jumped = self.handle_input(input, tuning);
        self.apply_physics(tuning);
        self.update_animation();
        self.update_timers(tuning);
        jumped
    }

    fn handle_input(&mut self, input: &TickInput, tuning: &Tuning) -> bool {
        if input.left {
            self.vel.x = -self.speed;
            self.facing = -1.0;
        } else if input.right {
            self.vel.x = self.speed;
            self.facing = 1.0;
        } else {
            self.vel.x *= tuning.friction;
        }

        if input.jump && self.on_ground {
            self.vel.y = -self.jump_power;
            self.on_ground = false;
            return true;
        }
        false
    }

    fn apply_physics(&mut self, tuning: &Tuning) {
        self.vel.y += tuning.gravity;
        self.pos += self.vel;

        // Resting contact zeroes vy every tick, so falling faster than one
        // gravity step means nothing is holding us up any more
        if self.vel.y > tuning.gravity {
            self.on_ground = false;
        }

        if tuning.ground_fallback {
            let floor = self.floor_y();
            if self.pos.y > floor {
                self.pos.y = floor;
                self.vel.y = 0.0;
                self.on_ground = true;
            }
        }

        self.pos.x = self.pos.x.clamp(0.0, WORLD_WIDTH - self.size.x);
    }

    fn update_animation(&mut self) {
        self.anim_state = if !self.on_ground {
            AnimState::Jump
        } else if self.vel.x.abs() > WALK_THRESHOLD {
            AnimState::Walking
        } else {
            AnimState::Idle
        };

        if self.anim_state == AnimState::Walking {
            self.anim_timer += 1;
            if self.anim_timer >= WALK_FRAME_TICKS {
                self.anim_frame = (self.anim_frame + 1) % 2;
                self.anim_timer = 0;
            }
        } else {
            self.anim_frame = 0;
            self.anim_timer = 0;
        }
    }

    fn update_timers(&mut self, tuning: &Tuning) {
        if self.invulnerable {
            self.invulnerability_timer = self.invulnerability_timer.saturating_sub(1);
            if self.invulnerability_timer == 0 {
                self.invulnerable = false;
                self.star_power = false;
            }
        }

        if self.speed_boost > 0 {
            self.speed_boost -= 1;
            if self.speed_boost == 0 {
                self.speed = tuning.player_speed;
            }
        }

        if self.jump_boost > 0 {
            self.jump_boost -= 1;
            if self.jump_boost == 0 {
                self.jump_power = tuning.player_jump_power;
            }
        }
    }

    /// Start a grace window during which enemy and boss contact is ignored
    pub fn make_invulnerable(&mut self, ticks: u32) {
        self.invulnerable = true;
        self.invulnerability_timer = ticks;
    }

    /// Apply the outcome of a platform collision
    pub fn apply_resolution(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Horizontal { x } => {
                self.pos.x = x;
                self.vel.x = 0.0;
            }
            Resolution::Landed { y } => {
                self.pos.y = y;
                self.vel.y = 0.0;
                self.on_ground = true;
            }
            Resolution::Ceiling { y } => {
                self.pos.y = y;
                self.vel.y = 0.0;
            }
        }
    }

    /// Move to a level's start point, keeping power-ups
    pub fn reset_position(&mut self) {
        self.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
        self.vel = Vec2::ZERO;
    }
}

impl Bounds for Player {
    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grounded(tuning: &Tuning) -> Player {
        let mut player = Player::new(PLAYER_START_X, 0.0, tuning);
        player.pos.y = player.floor_y();
        player.on_ground = true;
        player
    }

    #[test]
    fn test_walk_and_face() {
        let tuning = Tuning::default();
        let mut player = grounded(&tuning);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        player.update(&left, &tuning);
        assert_eq!(player.vel.x, -5.0);
        assert_eq!(player.facing, -1.0);
        assert_eq!(player.anim_state(), AnimState::Walking);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let tuning = Tuning::default();
        let mut player = grounded(&tuning);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        assert!(player.update(&jump, &tuning));
        assert_eq!(player.vel.y, -15.0 + 0.8);
        assert!(!player.on_ground);
        assert_eq!(player.anim_state(), AnimState::Jump);

        // Mid-air jump is ignored
        assert!(!player.update(&jump, &tuning));
    }

    #[test]
    fn test_walk_cycle_advances_every_eight_ticks() {
        let tuning = Tuning::default();
        let mut player = grounded(&tuning);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..7 {
            player.update(&right, &tuning);
        }
        assert_eq!(player.anim_frame, 0);
        player.update(&right, &tuning);
        assert_eq!(player.anim_frame, 1);
    }

    #[test]
    fn test_world_bounds() {
        let tuning = Tuning::default();
        let mut player = grounded(&tuning);
        player.pos.x = 2.0;
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        player.update(&left, &tuning);
        assert_eq!(player.pos.x, 0.0);

        player.pos.x = WORLD_WIDTH - 33.0;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        player.update(&right, &tuning);
        assert_eq!(player.pos.x, WORLD_WIDTH - PLAYER_SIZE);
    }

    #[test]
    fn test_power_up_timers_revert() {
        let tuning = Tuning::default();
        let mut player = grounded(&tuning);
        player.speed = tuning.boosted_speed;
        player.speed_boost = 2;
        player.jump_power = tuning.boosted_jump_power;
        player.jump_boost = 1;
        player.make_invulnerable(2);
        player.star_power = true;

        let idle = TickInput::default();
        player.update(&idle, &tuning);
        assert_eq!(player.jump_power, 15.0);
        assert_eq!(player.speed, 8.0);
        assert!(player.star_power);

        player.update(&idle, &tuning);
        assert_eq!(player.speed, 5.0);
        assert!(!player.invulnerable);
        assert!(!player.star_power);
    }

    #[test]
    fn test_walking_off_a_ledge_clears_ground() {
        let tuning = Tuning {
            ground_fallback: false,
            ..Default::default()
        };
        let mut player = Player::new(0.0, 100.0, &tuning);
        player.on_ground = true;
        let idle = TickInput::default();
        player.update(&idle, &tuning);
        // One tick of grace while resting contact would normally re-zero vy
        assert!(player.on_ground);
        player.update(&idle, &tuning);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_apply_resolution() {
        let tuning = Tuning::default();
        let mut player = Player::new(0.0, 0.0, &tuning);
        player.vel = Vec2::new(3.0, 4.0);
        player.apply_resolution(Resolution::Landed { y: 418.0 });
        assert_eq!(player.pos.y, 418.0);
        assert_eq!(player.vel, Vec2::new(3.0, 0.0));
        assert!(player.on_ground);

        player.apply_resolution(Resolution::Horizontal { x: 168.0 });
        assert_eq!(player.pos.x, 168.0);
        assert_eq!(player.vel.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_idle_grounded_player_decays_and_stays_above_floor(
            vx in -8.0f32..8.0,
            ticks in 1usize..200,
        ) {
            let tuning = Tuning::default();
            let mut player = grounded(&tuning);
            player.pos.x = 800.0;
            player.vel.x = vx;
            let idle = TickInput::default();
            for _ in 0..ticks {
                let before = player.vel.x;
                player.update(&idle, &tuning);
                prop_assert_eq!(player.vel.x, before * 0.85);
                prop_assert!(player.pos.y <= player.floor_y());
                prop_assert!(player.on_ground);
            }
        }
    }
}
