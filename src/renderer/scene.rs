//! Scene drawing
//!
//! Draw order: platforms, collectibles, power-ups, enemies, door, boss,
//! player, particles, then the screen-space overlay for the current phase.
//! World positions are shifted by the camera; everything else is view pixels.

use glam::Vec2;

use super::Surface;
use super::sprites::{PlayerPose, SpriteCache, SpriteKey};
use super::vertex::{colors, hsl, rgba, with_alpha};
use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::sim::entities::{BOSS_SIZE, POWER_UP_SIZE};
use crate::sim::{AnimState, Boss, GamePhase, GameState, Platform, Player};

/// Milliseconds per simulation tick, for wall-clock style animation
const MS_PER_TICK: f32 = 1000.0 / 60.0;
/// Power-up indicator bars are this full at the start of a boost
const BOOST_BAR_TICKS: f32 = 300.0;
const HEALTH_BAR_WIDTH: f32 = 60.0;
const HEALTH_BAR_HEIGHT: f32 = 6.0;

/// Stateful renderer: owns the sprite cache
#[derive(Debug, Default)]
pub struct Scene {
    sprites: SpriteCache,
    reduced_motion: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable blinking and celebration dots
    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.reduced_motion = reduced_motion;
    }

    pub fn render(&mut self, state: &GameState, surface: &mut impl Surface) {
        let cam = state.camera.pos;
        let millis = state.time_ticks as f32 * MS_PER_TICK;

        for platform in &state.platforms {
            draw_platform(surface, platform, cam);
        }

        for collectible in &state.collectibles {
            let pos = collectible.pos + Vec2::new(0.0, collectible.bob_offset) - cam;
            self.sprites.get(SpriteKey::Gem).draw(surface, pos, false, 1.0);
        }

        for power_up in &state.power_ups {
            let pos = power_up.pos + Vec2::new(0.0, power_up.bob_offset) - cam;
            let halo = rgba(power_up.kind.glow_color(), 0.25 + 0.25 * power_up.glow);
            surface.fill_circle(
                pos + Vec2::splat(POWER_UP_SIZE / 2.0),
                12.0 + 6.0 * power_up.glow,
                halo,
            );
            self.sprites
                .get(SpriteKey::PowerUp(power_up.kind))
                .draw(surface, pos, false, 1.0);
        }

        for enemy in &state.enemies {
            // Sprites face left; two-frame waddle
            let pos = enemy.pos + Vec2::new(0.0, enemy.anim_frame as f32) - cam;
            self.sprites
                .get(SpriteKey::Enemy(enemy.kind))
                .draw(surface, pos, enemy.direction > 0.0, 1.0);
        }

        if let Some(door) = &state.door {
            let key = if door.is_open {
                SpriteKey::DoorOpen
            } else {
                SpriteKey::DoorClosed
            };
            self.sprites.get(key).draw(surface, door.pos - cam, false, 1.0);
        }

        if let Some(boss) = &state.boss {
            self.draw_boss(surface, boss, cam);
        }

        self.draw_player(surface, &state.player, cam, millis);

        for particle in state.particles.iter() {
            surface.fill_circle(
                particle.pos - cam,
                particle.size,
                rgba(particle.color, particle.alpha()),
            );
        }

        match state.phase {
            GamePhase::LevelComplete if !self.reduced_motion => {
                level_complete_overlay(surface, millis)
            }
            GamePhase::Victory if !self.reduced_motion => victory_overlay(surface, millis),
            _ => {}
        }
    }

    fn draw_boss(&mut self, surface: &mut impl Surface, boss: &Boss, cam: Vec2) {
        let pos = boss.pos - cam;

        if boss.hit_flash > 0 && (boss.hit_flash / 5) % 2 == 1 {
            surface.fill_rect(pos, Vec2::splat(BOSS_SIZE), colors::HIT_FLASH);
        }
        self.sprites
            .get(SpriteKey::Boss)
            .draw(surface, pos, boss.direction > 0.0, 1.0);

        let bar = pos + Vec2::new((BOSS_SIZE - HEALTH_BAR_WIDTH) / 2.0, -15.0);
        let fraction = boss.health as f32 / boss.max_health.max(1) as f32;
        surface.fill_rect(
            bar,
            Vec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
            colors::HEALTH_BACK,
        );
        surface.fill_rect(
            bar,
            Vec2::new(HEALTH_BAR_WIDTH * fraction, HEALTH_BAR_HEIGHT),
            colors::HEALTH_FILL,
        );
        outline(surface, bar, Vec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT));
    }

    fn draw_player(&mut self, surface: &mut impl Surface, player: &Player, cam: Vec2, millis: f32) {
        let pos = player.pos - cam;
        let center = pos + player.size / 2.0;

        if player.star_power {
            let rainbow = hsl((millis * 0.5) % 360.0, 0.7, 0.6, 0.5);
            surface.fill_circle(center, player.size.x * 0.75, rainbow);
        } else if player.speed_boost > 0 {
            surface.fill_circle(center, player.size.x * 0.6, with_alpha(colors::SPEED_BAR, 0.3));
        }

        let blinking = player.invulnerable && (player.invulnerability_timer / 5) % 2 == 1;
        let alpha = if blinking && !self.reduced_motion {
            0.5
        } else {
            1.0
        };

        let pose = match (player.anim_state(), player.anim_frame) {
            (AnimState::Jump, _) => PlayerPose::Jump,
            (AnimState::Walking, 0) => PlayerPose::Walk1,
            (AnimState::Walking, _) => PlayerPose::Walk2,
            (AnimState::Idle, _) => PlayerPose::Idle,
        };
        self.sprites
            .get(SpriteKey::Player(pose))
            .draw(surface, pos, player.facing < 0.0, alpha);

        // Remaining boost time, stacked above the head
        let mut bar_y = pos.y - 10.0;
        for (ticks, color) in [
            (player.speed_boost, colors::SPEED_BAR),
            (player.jump_boost, colors::JUMP_BAR),
        ] {
            if ticks > 0 {
                let width = ticks as f32 / BOOST_BAR_TICKS * player.size.x;
                surface.fill_rect(Vec2::new(pos.x, bar_y), Vec2::new(width, 3.0), color);
                bar_y -= 5.0;
            }
        }
    }
}

fn draw_platform(surface: &mut impl Surface, platform: &Platform, cam: Vec2) {
    let (edge, fill) = if platform.is_moving() {
        (colors::MOVING_EDGE, colors::MOVING_FILL)
    } else {
        (colors::PLATFORM_EDGE, colors::PLATFORM_FILL)
    };
    let pos = platform.rect.pos - cam;
    surface.fill_rect(pos, platform.rect.size, edge);
    surface.fill_rect(pos + Vec2::splat(2.0), platform.rect.size - Vec2::splat(4.0), fill);
}

/// One-pixel border
fn outline(surface: &mut impl Surface, pos: Vec2, size: Vec2) {
    surface.fill_rect(pos, Vec2::new(size.x, 1.0), colors::OUTLINE);
    surface.fill_rect(pos + Vec2::new(0.0, size.y - 1.0), Vec2::new(size.x, 1.0), colors::OUTLINE);
    surface.fill_rect(pos, Vec2::new(1.0, size.y), colors::OUTLINE);
    surface.fill_rect(pos + Vec2::new(size.x - 1.0, 0.0), Vec2::new(1.0, size.y), colors::OUTLINE);
}

/// Green dots circling the middle of the view
fn level_complete_overlay(surface: &mut impl Surface, millis: f32) {
    let t = millis * 0.008;
    let mid = Vec2::new(VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0);
    for i in 0..10 {
        let i = i as f32;
        let pos = mid + Vec2::new((t + i * 0.8).sin() * 150.0, (t + i * 0.6).cos() * 80.0);
        let hue = 120.0 + (t * 30.0 + i * 20.0) % 60.0;
        surface.fill_circle(pos, 4.0, hsl(hue, 0.7, 0.6, 1.0));
    }
}

/// Rainbow fireworks
fn victory_overlay(surface: &mut impl Surface, millis: f32) {
    let t = millis * 0.005;
    let mid = Vec2::new(VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0);
    for i in 0..20 {
        let i = i as f32;
        let pos = mid + Vec2::new((t + i).sin() * 200.0, (t + i * 0.5).cos() * 100.0);
        let hue = (t * 50.0 + i * 30.0) % 360.0;
        surface.fill_circle(pos, 5.0, hsl(hue, 0.7, 0.6, 1.0));
    }
}
