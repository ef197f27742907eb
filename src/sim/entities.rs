//! Level entities
//!
//! Each entity owns its own state and per-tick update. None of them looks at
//! another entity; interactions go through the collision pass in `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, Rect};
use super::player::Player;
use crate::consts::GROUND_Y;
use crate::tuning::Tuning;

/// Axis a moving platform travels along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Back-and-forth motion for a moving platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub start: Vec2,
    /// Maximum displacement from `start` on `axis`
    pub distance: f32,
    /// Pixels per tick
    pub speed: f32,
    /// +1 or -1
    pub direction: f32,
    pub axis: Axis,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlatformKind {
    Normal,
    Moving(Mover),
}

/// A solid rectangle the player can stand on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            kind: PlatformKind::Normal,
        }
    }

    /// A horizontally moving platform with the default 100px swing at 1px/tick
    pub fn moving(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            kind: PlatformKind::Moving(Mover {
                start: Vec2::new(x, y),
                distance: 100.0,
                speed: 1.0,
                direction: 1.0,
                axis: Axis::X,
            }),
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        if let PlatformKind::Moving(mover) = &mut self.kind {
            mover.axis = axis;
        }
        self
    }

    pub fn with_distance(mut self, distance: f32) -> Self {
        if let PlatformKind::Moving(mover) = &mut self.kind {
            mover.distance = distance;
        }
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        if let PlatformKind::Moving(mover) = &mut self.kind {
            mover.speed = speed;
        }
        self
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.kind, PlatformKind::Moving(_))
    }

    pub fn update(&mut self) {
        let PlatformKind::Moving(mover) = &mut self.kind else {
            return;
        };

        let (pos, start) = match mover.axis {
            Axis::X => (&mut self.rect.pos.x, mover.start.x),
            Axis::Y => (&mut self.rect.pos.y, mover.start.y),
        };
        let (min, max) = (start - mover.distance, start + mover.distance);

        *pos += mover.direction * mover.speed;

        // Only flip when heading further out, so a boundary flips exactly once
        if mover.direction < 0.0 && *pos <= min {
            *pos = min;
            mover.direction = 1.0;
        } else if mover.direction > 0.0 && *pos >= max {
            *pos = max;
            mover.direction = -1.0;
        }
    }
}

impl Bounds for Platform {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

/// Size of a collectible gem
pub const COLLECTIBLE_SIZE: f32 = 20.0;

/// A gem; picking enough of them opens the door
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub pos: Vec2,
    pub collected: bool,
    pub anim_timer: f32,
    /// Visual bob only; collision uses `pos`
    pub bob_offset: f32,
}

impl Collectible {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            collected: false,
            anim_timer: 0.0,
            bob_offset: 0.0,
        }
    }

    pub fn update(&mut self) {
        self.anim_timer += 0.1;
        self.bob_offset = self.anim_timer.sin() * 3.0;
    }
}

impl Bounds for Collectible {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, COLLECTIBLE_SIZE, COLLECTIBLE_SIZE)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Invincibility,
    Jump,
    Life,
}

impl PowerUpKind {
    /// Glow / pickup burst color (0xRRGGBB)
    pub fn glow_color(self) -> u32 {
        match self {
            PowerUpKind::Speed => 0x0080FF,
            PowerUpKind::Invincibility => 0xFFD700,
            PowerUpKind::Jump => 0x32CD32,
            PowerUpKind::Life => 0xFF0000,
        }
    }

    /// One-shot effect applied on pickup
    pub fn apply(self, player: &mut Player, lives: &mut u8, tuning: &Tuning) {
        match self {
            PowerUpKind::Speed => {
                player.speed_boost = tuning.boost_ticks;
                player.speed = tuning.boosted_speed;
            }
            PowerUpKind::Invincibility => {
                player.make_invulnerable(tuning.star_ticks);
                player.star_power = true;
            }
            PowerUpKind::Jump => {
                player.jump_boost = tuning.boost_ticks;
                player.jump_power = tuning.boosted_jump_power;
            }
            PowerUpKind::Life => {
                *lives = lives.saturating_add(1).min(tuning.max_lives);
            }
        }
    }
}

pub const POWER_UP_SIZE: f32 = 24.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub anim_timer: f32,
    pub bob_offset: f32,
    /// 0-1 pulse for the glow halo
    pub glow: f32,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind) -> Self {
        Self {
            pos: Vec2::new(x, y),
            kind,
            anim_timer: 0.0,
            bob_offset: 0.0,
            glow: 0.0,
        }
    }

    pub fn update(&mut self) {
        self.anim_timer += 0.15;
        self.bob_offset = self.anim_timer.sin() * 4.0;
        self.glow = ((self.anim_timer * 2.0).sin() + 1.0) * 0.5;
    }
}

impl Bounds for PowerUp {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, POWER_UP_SIZE, POWER_UP_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Goomba,
    Koopa,
}

pub const ENEMY_SIZE: f32 = 24.0;
pub const ENEMY_PATROL_DISTANCE: f32 = 100.0;

/// A patrolling walker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: EnemyKind,
    pub direction: f32,
    pub speed: f32,
    pub start_x: f32,
    pub patrol_distance: f32,
    pub on_ground: bool,
    pub anim_frame: u8,
    anim_timer: u32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, kind: EnemyKind) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(-1.0, 0.0),
            kind,
            direction: -1.0,
            speed: 1.0,
            start_x: x,
            patrol_distance: ENEMY_PATROL_DISTANCE,
            on_ground: false,
            anim_frame: 0,
            anim_timer: 0,
        }
    }

    pub fn goomba(x: f32, y: f32) -> Self {
        Self::new(x, y, EnemyKind::Goomba)
    }

    pub fn koopa(x: f32, y: f32) -> Self {
        Self::new(x, y, EnemyKind::Koopa)
    }

    pub fn update(&mut self, gravity: f32) {
        self.patrol();
        self.apply_physics(gravity);

        self.anim_timer += 1;
        if self.anim_timer > 30 {
            self.anim_frame = (self.anim_frame + 1) % 2;
            self.anim_timer = 0;
        }
    }

    fn patrol(&mut self) {
        let min = self.start_x - self.patrol_distance;
        let max = self.start_x + self.patrol_distance;

        self.vel.x = self.direction * self.speed;
        self.pos.x += self.vel.x;

        if self.direction < 0.0 && self.pos.x <= min {
            self.pos.x = min;
            self.direction = 1.0;
        } else if self.direction > 0.0 && self.pos.x >= max {
            self.pos.x = max;
            self.direction = -1.0;
        }
    }

    fn apply_physics(&mut self, gravity: f32) {
        self.vel.y += gravity;
        self.pos.y += self.vel.y;

        let floor = GROUND_Y - ENEMY_SIZE;
        if self.pos.y > floor {
            self.pos.y = floor;
            self.vel.y = 0.0;
            self.on_ground = true;
        }
    }
}

impl Bounds for Enemy {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ENEMY_SIZE, ENEMY_SIZE)
    }
}

/// Boss AI state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossState {
    Patrol,
    Charge,
    Stunned,
}

pub const BOSS_SIZE: f32 = 64.0;
pub const BOSS_MAX_HEALTH: u32 = 5;
pub const BOSS_PATROL_SPEED: f32 = 2.0;
pub const BOSS_CHARGE_SPEED: f32 = 6.0;
/// Ticks spent in each state before transitioning
pub const BOSS_PATROL_TICKS: u32 = 120;
pub const BOSS_CHARGE_TICKS: u32 = 90;
pub const BOSS_STUN_TICKS: u32 = 60;
/// The boss turns around outside this x range
pub const BOSS_ARENA_LEFT: f32 = 1200.0;
pub const BOSS_ARENA_RIGHT: f32 = 1500.0;
const BOSS_HIT_FLASH_TICKS: u32 = 30;

/// Final-level boss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub vel: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub state: BossState,
    pub state_timer: u32,
    pub direction: f32,
    pub speed: f32,
    pub on_ground: bool,
    pub hit_flash: u32,
    pub anim_frame: u8,
    anim_timer: u32,
}

impl Boss {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            health: BOSS_MAX_HEALTH,
            max_health: BOSS_MAX_HEALTH,
            state: BossState::Patrol,
            state_timer: 0,
            direction: -1.0,
            speed: BOSS_PATROL_SPEED,
            on_ground: false,
            hit_flash: 0,
            anim_frame: 0,
            anim_timer: 0,
        }
    }

    pub fn update(&mut self, gravity: f32) {
        self.update_ai();

        self.vel.y += gravity;
        self.pos += self.vel;
        let floor = GROUND_Y - BOSS_SIZE;
        if self.pos.y > floor {
            self.pos.y = floor;
            self.vel.y = 0.0;
            self.on_ground = true;
        }

        self.anim_timer += 1;
        if self.anim_timer > 20 {
            self.anim_frame = (self.anim_frame + 1) % 2;
            self.anim_timer = 0;
        }
        self.hit_flash = self.hit_flash.saturating_sub(1);
    }

    fn update_ai(&mut self) {
        self.state_timer += 1;

        match self.state {
            BossState::Patrol => {
                if self.state_timer >= BOSS_PATROL_TICKS {
                    self.enter(BossState::Charge);
                }
            }
            BossState::Charge => {
                if self.state_timer >= BOSS_CHARGE_TICKS {
                    self.enter(BossState::Patrol);
                    self.direction = -self.direction;
                }
            }
            BossState::Stunned => {
                if self.state_timer >= BOSS_STUN_TICKS {
                    self.enter(BossState::Patrol);
                }
            }
        }

        // Arena walls apply regardless of state
        if self.pos.x < BOSS_ARENA_LEFT && self.direction < 0.0 {
            self.direction = 1.0;
        } else if self.pos.x > BOSS_ARENA_RIGHT && self.direction > 0.0 {
            self.direction = -1.0;
        }

        self.vel.x = match self.state {
            BossState::Patrol => self.direction * self.speed,
            BossState::Charge => self.direction * BOSS_CHARGE_SPEED,
            BossState::Stunned => 0.0,
        };
    }

    fn enter(&mut self, state: BossState) {
        self.state = state;
        self.state_timer = 0;
    }

    /// Take a stomp. Health floors at 0; returns true only on the hit that
    /// brings health to 0.
    pub fn hit(&mut self) -> bool {
        let was_alive = self.health > 0;
        self.health = self.health.saturating_sub(1);
        self.enter(BossState::Stunned);
        self.hit_flash = BOSS_HIT_FLASH_TICKS;
        was_alive && self.health == 0
    }
}

impl Bounds for Boss {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BOSS_SIZE, BOSS_SIZE)
    }
}

pub const DOOR_WIDTH: f32 = 40.0;
pub const DOOR_HEIGHT: f32 = 60.0;

/// Level exit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub pos: Vec2,
    pub is_open: bool,
}

impl Door {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            is_open: false,
        }
    }

    /// Open the door; returns true only if it was closed
    pub fn open(&mut self) -> bool {
        let opened = !self.is_open;
        self.is_open = true;
        opened
    }
}

impl Bounds for Door {
    fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, DOOR_WIDTH, DOOR_HEIGHT)
    }
}
