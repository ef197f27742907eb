//! Pixel-art sprites
//!
//! Each sprite is a list of solid rectangles in its own pixel grid. Sprites
//! are built the first time they are drawn and cached by key.

use std::collections::HashMap;

use glam::Vec2;

use super::Surface;
use super::vertex::{rgb, with_alpha};
use crate::sim::{EnemyKind, PowerUpKind};

/// Wizard animation frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerPose {
    Idle,
    Walk1,
    Walk2,
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Player(PlayerPose),
    Enemy(EnemyKind),
    Boss,
    Gem,
    PowerUp(PowerUpKind),
    DoorClosed,
    DoorOpen,
}

/// One solid rectangle of a sprite, in sprite pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixel {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub color: [f32; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub width: f32,
    pub height: f32,
    pub pixels: Vec<Pixel>,
}

impl Sprite {
    fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixels: Vec::new(),
        }
    }

    /// Paint a rectangle; later rectangles draw over earlier ones
    fn fill(&mut self, hex: u32, x: f32, y: f32, w: f32, h: f32) -> &mut Self {
        self.pixels.push(Pixel {
            x,
            y,
            w,
            h,
            color: rgb(hex),
        });
        self
    }

    /// Draw at `pos` (top-left, screen space). `flip` mirrors horizontally.
    pub fn draw(&self, surface: &mut impl Surface, pos: Vec2, flip: bool, alpha: f32) {
        for p in &self.pixels {
            let x = if flip { self.width - p.x - p.w } else { p.x };
            surface.fill_rect(
                pos + Vec2::new(x, p.y),
                Vec2::new(p.w, p.h),
                with_alpha(p.color, alpha),
            );
        }
    }
}

/// Lazily built sprites
#[derive(Debug, Default)]
pub struct SpriteCache {
    sprites: HashMap<SpriteKey, Sprite>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: SpriteKey) -> &Sprite {
        self.sprites.entry(key).or_insert_with(|| build(key))
    }

    /// Number of sprites built so far
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }
}

fn build(key: SpriteKey) -> Sprite {
    log::debug!("Building sprite {:?}", key);
    match key {
        SpriteKey::Player(pose) => wizard(pose),
        SpriteKey::Enemy(EnemyKind::Goomba) => goomba(),
        SpriteKey::Enemy(EnemyKind::Koopa) => koopa(),
        SpriteKey::Boss => boss(),
        SpriteKey::Gem => gem(),
        SpriteKey::PowerUp(kind) => power_up(kind),
        SpriteKey::DoorClosed => door_closed(),
        SpriteKey::DoorOpen => door_open(),
    }
}

fn wizard(pose: PlayerPose) -> Sprite {
    let mut s = Sprite::new(32.0, 32.0);

    // Hat outline, fill, highlights, band
    s.fill(0x1A3B3A, 7.0, 0.0, 18.0, 1.0)
        .fill(0x1A3B3A, 5.0, 1.0, 22.0, 1.0)
        .fill(0x1A3B3A, 3.0, 2.0, 26.0, 1.0)
        .fill(0x1A3B3A, 1.0, 3.0, 30.0, 1.0)
        .fill(0x1A3B3A, 0.0, 4.0, 32.0, 3.0)
        .fill(0x2E5266, 8.0, 1.0, 16.0, 1.0)
        .fill(0x2E5266, 6.0, 2.0, 20.0, 1.0)
        .fill(0x2E5266, 4.0, 3.0, 24.0, 1.0)
        .fill(0x2E5266, 2.0, 4.0, 28.0, 1.0)
        .fill(0x2E5266, 1.0, 5.0, 30.0, 1.0)
        .fill(0x4A8B8D, 9.0, 1.0, 14.0, 1.0)
        .fill(0x4A8B8D, 7.0, 2.0, 18.0, 1.0)
        .fill(0x4A8B8D, 5.0, 3.0, 22.0, 1.0)
        .fill(0xB8860B, 3.0, 4.0, 26.0, 1.0)
        .fill(0x0F2027, 2.0, 6.0, 28.0, 2.0);

    // Face
    s.fill(0xF5DEB3, 10.0, 8.0, 12.0, 8.0)
        .fill(0xDEB887, 9.0, 8.0, 1.0, 8.0)
        .fill(0xDEB887, 22.0, 8.0, 1.0, 8.0)
        .fill(0xDEB887, 10.0, 16.0, 12.0, 1.0)
        .fill(0x000000, 12.0, 10.0, 2.0, 2.0)
        .fill(0x000000, 18.0, 10.0, 2.0, 2.0)
        .fill(0xCD853F, 15.0, 13.0, 2.0, 1.0)
        .fill(0x8B4513, 14.0, 14.0, 4.0, 1.0);

    // Robe and belt
    s.fill(0x2E5266, 6.0, 16.0, 20.0, 12.0)
        .fill(0x4A8B8D, 7.0, 17.0, 18.0, 1.0)
        .fill(0x4A8B8D, 8.0, 18.0, 16.0, 7.0)
        .fill(0x1A3B3A, 5.0, 16.0, 1.0, 12.0)
        .fill(0x1A3B3A, 26.0, 16.0, 1.0, 12.0)
        .fill(0x1A3B3A, 6.0, 28.0, 20.0, 1.0)
        .fill(0xFF8C00, 8.0, 21.0, 16.0, 2.0)
        .fill(0xFFD700, 15.0, 21.0, 2.0, 2.0);

    // Arms raise while jumping
    let arm_y = if pose == PlayerPose::Jump { 14.0 } else { 16.0 };
    s.fill(0x4A8B8D, 2.0, arm_y, 4.0, 8.0)
        .fill(0x4A8B8D, 26.0, arm_y, 4.0, 8.0)
        .fill(0x2E5266, 2.0, arm_y, 1.0, 8.0)
        .fill(0x2E5266, 29.0, arm_y, 1.0, 8.0)
        .fill(0xF5DEB3, 2.0, arm_y + 6.0, 4.0, 2.0)
        .fill(0xF5DEB3, 26.0, arm_y + 6.0, 4.0, 2.0)
        .fill(0xDEB887, 2.0, arm_y + 8.0, 4.0, 1.0)
        .fill(0xDEB887, 26.0, arm_y + 8.0, 4.0, 1.0);

    // Boots step apart on alternating walk frames
    let (left_x, right_x) = match pose {
        PlayerPose::Walk1 => (8.0, 18.0),
        PlayerPose::Walk2 => (10.0, 20.0),
        PlayerPose::Idle | PlayerPose::Jump => (10.0, 18.0),
    };
    s.fill(0x1A3B3A, left_x, 28.0, 4.0, 4.0)
        .fill(0x1A3B3A, right_x, 28.0, 4.0, 4.0)
        .fill(0x2E5266, left_x + 1.0, 28.0, 2.0, 3.0)
        .fill(0x2E5266, right_x + 1.0, 28.0, 2.0, 3.0);

    // Wand
    s.fill(0x4A8B8D, 30.0, 12.0, 2.0, 8.0)
        .fill(0xFFD700, 30.0, 10.0, 2.0, 2.0)
        .fill(0xFFD700, 29.0, 11.0, 3.0, 1.0)
        .fill(0xFFD700, 31.0, 9.0, 1.0, 4.0);

    s
}

fn goomba() -> Sprite {
    let mut s = Sprite::new(24.0, 24.0);
    s.fill(0x8B4513, 4.0, 8.0, 16.0, 12.0)
        .fill(0xFFFFFF, 6.0, 10.0, 4.0, 4.0)
        .fill(0xFFFFFF, 14.0, 10.0, 4.0, 4.0)
        .fill(0x000000, 7.0, 11.0, 2.0, 2.0)
        .fill(0x000000, 15.0, 11.0, 2.0, 2.0)
        .fill(0x654321, 2.0, 20.0, 6.0, 4.0)
        .fill(0x654321, 16.0, 20.0, 6.0, 4.0);
    s
}

fn koopa() -> Sprite {
    let mut s = Sprite::new(24.0, 24.0);
    s.fill(0x00AA00, 2.0, 6.0, 20.0, 14.0)
        .fill(0x008800, 4.0, 8.0, 16.0, 2.0)
        .fill(0x008800, 4.0, 12.0, 16.0, 2.0)
        .fill(0x008800, 4.0, 16.0, 16.0, 2.0)
        .fill(0xFFFF00, 8.0, 2.0, 8.0, 6.0)
        .fill(0x000000, 9.0, 3.0, 2.0, 2.0)
        .fill(0x000000, 13.0, 3.0, 2.0, 2.0)
        .fill(0xFFFF00, 4.0, 20.0, 4.0, 4.0)
        .fill(0xFFFF00, 16.0, 20.0, 4.0, 4.0);
    s
}

fn boss() -> Sprite {
    let mut s = Sprite::new(64.0, 64.0);
    s.fill(0xFF4500, 8.0, 16.0, 48.0, 32.0)
        .fill(0x228B22, 12.0, 20.0, 40.0, 24.0);
    // Shell spikes
    for i in 0..6 {
        s.fill(0xFFFF00, 14.0 + i as f32 * 8.0, 16.0, 4.0, 8.0);
    }
    s.fill(0xFF6347, 16.0, 4.0, 32.0, 20.0)
        .fill(0xFFFFFF, 20.0, 8.0, 8.0, 6.0)
        .fill(0xFFFFFF, 36.0, 8.0, 8.0, 6.0)
        .fill(0xFF0000, 22.0, 10.0, 4.0, 2.0)
        .fill(0xFF0000, 38.0, 10.0, 4.0, 2.0)
        .fill(0xFFFF00, 18.0, 2.0, 4.0, 6.0)
        .fill(0xFFFF00, 42.0, 2.0, 4.0, 6.0)
        .fill(0x8B4513, 4.0, 48.0, 12.0, 16.0)
        .fill(0x8B4513, 48.0, 48.0, 12.0, 16.0);
    s
}

fn gem() -> Sprite {
    let mut s = Sprite::new(20.0, 20.0);
    s.fill(0x00FF00, 4.0, 4.0, 12.0, 12.0)
        .fill(0x90EE90, 6.0, 6.0, 4.0, 4.0);
    s
}

fn power_up(kind: PowerUpKind) -> Sprite {
    let mut s = Sprite::new(24.0, 24.0);
    match kind {
        PowerUpKind::Speed => {
            s.fill(0x0080FF, 4.0, 4.0, 16.0, 16.0)
                .fill(0x87CEEB, 6.0, 6.0, 12.0, 12.0)
                .fill(0xFFFF00, 10.0, 8.0, 2.0, 8.0)
                .fill(0xFFFF00, 8.0, 10.0, 6.0, 2.0);
        }
        PowerUpKind::Invincibility => {
            // Blocky five-point star
            s.fill(0xFFD700, 10.0, 3.0, 4.0, 6.0)
                .fill(0xFFD700, 4.0, 9.0, 16.0, 4.0)
                .fill(0xFFD700, 7.0, 13.0, 10.0, 3.0)
                .fill(0xFFD700, 5.0, 16.0, 4.0, 5.0)
                .fill(0xFFD700, 15.0, 16.0, 4.0, 5.0)
                .fill(0xFFA500, 10.0, 9.0, 4.0, 5.0);
        }
        PowerUpKind::Jump => {
            s.fill(0x32CD32, 4.0, 4.0, 16.0, 16.0)
                .fill(0x90EE90, 6.0, 6.0, 12.0, 12.0)
                .fill(0xFFFFFF, 11.0, 8.0, 2.0, 8.0)
                .fill(0xFFFFFF, 9.0, 8.0, 6.0, 2.0)
                .fill(0xFFFFFF, 10.0, 6.0, 4.0, 2.0);
        }
        PowerUpKind::Life => {
            s.fill(0xFF0000, 5.0, 7.0, 6.0, 4.0)
                .fill(0xFF0000, 13.0, 7.0, 6.0, 4.0)
                .fill(0xFF0000, 4.0, 9.0, 16.0, 4.0)
                .fill(0xFF0000, 6.0, 13.0, 12.0, 3.0)
                .fill(0xFF0000, 8.0, 16.0, 8.0, 2.0)
                .fill(0xFF0000, 10.0, 18.0, 4.0, 2.0);
        }
    }
    s
}

fn door_closed() -> Sprite {
    let mut s = Sprite::new(40.0, 60.0);
    s.fill(0x8B4513, 0.0, 0.0, 40.0, 60.0)
        .fill(0x654321, 2.0, 2.0, 36.0, 56.0)
        .fill(0xFFD700, 30.0, 28.0, 5.0, 5.0);
    s
}

fn door_open() -> Sprite {
    let mut s = Sprite::new(40.0, 60.0);
    s.fill(0x8B4513, 2.0, 0.0, 4.0, 60.0)
        .fill(0xFF0000, 6.0, 5.0, 30.0, 20.0)
        .fill(0xFFFFFF, 6.0, 15.0, 30.0, 10.0);
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::tests::RecordingSurface;

    #[test]
    fn test_cache_builds_each_sprite_once() {
        let mut cache = SpriteCache::new();
        assert!(cache.is_empty());
        cache.get(SpriteKey::Gem);
        cache.get(SpriteKey::Gem);
        cache.get(SpriteKey::Player(PlayerPose::Idle));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_sprites_stay_inside_their_grid() {
        let keys = [
            SpriteKey::Player(PlayerPose::Idle),
            SpriteKey::Player(PlayerPose::Walk1),
            SpriteKey::Player(PlayerPose::Walk2),
            SpriteKey::Player(PlayerPose::Jump),
            SpriteKey::Enemy(EnemyKind::Goomba),
            SpriteKey::Enemy(EnemyKind::Koopa),
            SpriteKey::Boss,
            SpriteKey::Gem,
            SpriteKey::PowerUp(PowerUpKind::Speed),
            SpriteKey::PowerUp(PowerUpKind::Invincibility),
            SpriteKey::PowerUp(PowerUpKind::Jump),
            SpriteKey::PowerUp(PowerUpKind::Life),
            SpriteKey::DoorClosed,
            SpriteKey::DoorOpen,
        ];
        let mut cache = SpriteCache::new();
        for key in keys {
            let sprite = cache.get(key);
            assert!(!sprite.pixels.is_empty(), "{key:?} is empty");
            for p in &sprite.pixels {
                assert!(p.x >= 0.0 && p.x + p.w <= sprite.width, "{key:?} overflows x");
                assert!(p.y >= 0.0 && p.y + p.h <= sprite.height, "{key:?} overflows y");
            }
        }
        assert_eq!(cache.len(), keys.len());
    }

    #[test]
    fn test_flip_mirrors_horizontally() {
        let mut cache = SpriteCache::new();
        let sprite = cache.get(SpriteKey::Gem);

        let mut normal = RecordingSurface::default();
        sprite.draw(&mut normal, Vec2::new(100.0, 0.0), false, 1.0);
        let mut flipped = RecordingSurface::default();
        sprite.draw(&mut flipped, Vec2::new(100.0, 0.0), true, 1.0);

        // Highlight sits at x 6..10 in a 20-wide grid; mirrored it is 10..14
        assert_eq!(normal.rects[1].0.x, 106.0);
        assert_eq!(flipped.rects[1].0.x, 110.0);
    }

    #[test]
    fn test_alpha_applies_to_every_pixel() {
        let mut cache = SpriteCache::new();
        let mut surface = RecordingSurface::default();
        cache
            .get(SpriteKey::DoorClosed)
            .draw(&mut surface, Vec2::ZERO, false, 0.5);
        assert!(surface.rects.iter().all(|r| r.2[3] == 0.5));
    }
}
