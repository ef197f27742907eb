//! Level generation
//!
//! A pure function of the level number. Layouts come from fixed recipes per
//! difficulty band; the only "variation" is trigonometric offsets, so the same
//! level number always yields the same entities.

use serde::{Deserialize, Serialize};

use super::entities::{Axis, Boss, Collectible, Door, Enemy, Platform, PowerUp, PowerUpKind};
use crate::consts::{BOSS_LEVEL, GROUND_HEIGHT, GROUND_Y, WORLD_WIDTH};

/// A contiguous range of levels sharing one recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DifficultyBand {
    /// Levels 1-10
    Easy,
    /// Levels 11-50
    Medium,
    /// Levels 51-90
    Hard,
    /// Levels 91-99
    VeryHard,
    /// Level 100
    Boss,
}

impl DifficultyBand {
    /// Band for a level; `None` past the boss level. Level 0 counts as level 1.
    pub fn for_level(level: u32) -> Option<Self> {
        match level {
            0..=10 => Some(DifficultyBand::Easy),
            11..=50 => Some(DifficultyBand::Medium),
            51..=90 => Some(DifficultyBand::Hard),
            91..=99 => Some(DifficultyBand::VeryHard),
            BOSS_LEVEL => Some(DifficultyBand::Boss),
            _ => None,
        }
    }
}

/// Every entity a level starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    pub band: DifficultyBand,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub collectibles: Vec<Collectible>,
    pub power_ups: Vec<PowerUp>,
    pub door: Option<Door>,
    pub boss: Option<Boss>,
}

impl Level {
    fn empty(number: u32, band: DifficultyBand) -> Self {
        Self {
            number,
            band,
            // Every level sits on the same ground strip
            platforms: vec![Platform::new(0.0, GROUND_Y, WORLD_WIDTH, GROUND_HEIGHT)],
            enemies: Vec::new(),
            collectibles: Vec::new(),
            power_ups: Vec::new(),
            door: None,
            boss: None,
        }
    }
}

/// Build the entities for `level`. Returns `None` past the boss level.
pub fn generate_level(level: u32) -> Option<Level> {
    let number = level.max(1);
    let band = DifficultyBand::for_level(number)?;
    let mut out = Level::empty(number, band);

    match band {
        DifficultyBand::Easy => easy(&mut out),
        DifficultyBand::Medium => medium(&mut out),
        DifficultyBand::Hard => hard(&mut out),
        DifficultyBand::VeryHard => very_hard(&mut out),
        DifficultyBand::Boss => boss_arena(&mut out),
    }

    log::debug!(
        "Generated level {} ({:?}): {} platforms, {} enemies, {} collectibles, {} power-ups",
        number,
        band,
        out.platforms.len(),
        out.enemies.len(),
        out.collectibles.len(),
        out.power_ups.len()
    );

    Some(out)
}

/// A wave of collectibles: x steps linearly, y follows a sine
fn collectible_wave(count: u32, x0: f32, dx: f32, y0: f32, freq: f32, amp: f32) -> Vec<Collectible> {
    (0..count)
        .map(|i| {
            let i = i as f32;
            Collectible::new(x0 + i * dx, y0 + (i * freq).sin() * amp)
        })
        .collect()
}

fn easy(level: &mut Level) {
    let n = level.number;

    for (x, y) in [(200.0, 450.0), (400.0, 350.0), (600.0, 450.0), (800.0, 350.0)] {
        level.platforms.push(Platform::new(x, y, 100.0, 20.0));
    }

    level.collectibles = collectible_wave(12, 150.0, 120.0, 300.0, 1.0, 50.0);

    if n > 2 {
        level.power_ups.push(PowerUp::new(500.0, 300.0, PowerUpKind::Speed));
        if n > 5 {
            level.power_ups.push(PowerUp::new(900.0, 300.0, PowerUpKind::Jump));
        }
    }

    if n > 3 {
        level.enemies.push(Enemy::goomba(300.0, 500.0));
        if n > 6 {
            level.enemies.push(Enemy::goomba(700.0, 500.0));
        }
    }

    level.door = Some(Door::new(1400.0, 490.0));
}

fn medium(level: &mut Level) {
    let n = level.number;

    for (x, y) in [
        (150.0, 450.0),
        (300.0, 380.0),
        (450.0, 320.0),
        (600.0, 380.0),
        (750.0, 450.0),
        (900.0, 350.0),
        (1050.0, 280.0),
        (1200.0, 380.0),
    ] {
        level.platforms.push(Platform::new(x, y, 80.0, 20.0));
    }

    level.collectibles = collectible_wave(15, 100.0, 90.0, 200.0, 0.5, 80.0);

    for x in [200.0, 500.0, 800.0] {
        level.enemies.push(Enemy::goomba(x, 500.0));
    }
    if n > 30 {
        level.enemies.push(Enemy::koopa(1100.0, 500.0));
    }

    level.door = Some(Door::new(1450.0, 490.0));
}

fn hard(level: &mut Level) {
    for (x, y) in [
        (200.0, 400.0),
        (400.0, 300.0),
        (600.0, 450.0),
        (800.0, 250.0),
        (1000.0, 400.0),
    ] {
        level.platforms.push(Platform::moving(x, y, 60.0, 15.0));
    }

    // Static footholds
    level.platforms.push(Platform::new(100.0, 500.0, 60.0, 15.0));
    level.platforms.push(Platform::new(1300.0, 450.0, 100.0, 20.0));

    level.platforms.push(
        Platform::moving(500.0, 200.0, 80.0, 15.0)
            .with_axis(Axis::Y)
            .with_distance(150.0),
    );

    level.collectibles = collectible_wave(18, 80.0, 80.0, 150.0, 0.3, 100.0);

    level.enemies = vec![
        Enemy::goomba(150.0, 500.0),
        Enemy::koopa(350.0, 500.0),
        Enemy::goomba(650.0, 500.0),
        Enemy::koopa(950.0, 500.0),
        Enemy::goomba(1250.0, 500.0),
    ];

    level.door = Some(Door::new(1500.0, 490.0));
}

fn very_hard(level: &mut Level) {
    for i in 0..8 {
        let f = i as f32;
        let axis = if i % 2 == 0 { Axis::Y } else { Axis::X };
        level.platforms.push(
            Platform::moving(100.0 + f * 180.0, 200.0 + f.sin() * 150.0, 50.0, 15.0)
                .with_speed(1.5)
                .with_distance(80.0)
                .with_axis(axis),
        );
    }

    // Small fast "trap" platforms skimming the ground
    for i in 0..5 {
        level.platforms.push(
            Platform::moving(200.0 + i as f32 * 250.0, 480.0, 30.0, 10.0)
                .with_speed(3.0)
                .with_distance(60.0),
        );
    }

    level.collectibles = collectible_wave(20, 50.0, 75.0, 100.0, 0.4, 120.0);

    level.enemies = (0..6)
        .map(|i| {
            let x = 200.0 + i as f32 * 200.0;
            if i % 2 == 0 {
                Enemy::goomba(x, 500.0)
            } else {
                Enemy::koopa(x, 500.0)
            }
        })
        .collect();

    level.door = Some(Door::new(1550.0, 490.0));
}

fn boss_arena(level: &mut Level) {
    level.platforms.push(Platform::new(1200.0, 500.0, 400.0, 20.0));
    level.platforms.push(Platform::new(1100.0, 400.0, 100.0, 20.0));
    level.platforms.push(Platform::new(1500.0, 400.0, 100.0, 20.0));
    level.platforms.push(Platform::new(1300.0, 300.0, 100.0, 20.0));

    level.collectibles = collectible_wave(15, 50.0, 100.0, 200.0, 0.2, 80.0);

    // No door: the level ends when the boss falls
    level.boss = Some(Boss::new(1400.0, 436.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{EnemyKind, PlatformKind};
    use glam::Vec2;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(DifficultyBand::for_level(1), Some(DifficultyBand::Easy));
        assert_eq!(DifficultyBand::for_level(10), Some(DifficultyBand::Easy));
        assert_eq!(DifficultyBand::for_level(11), Some(DifficultyBand::Medium));
        assert_eq!(DifficultyBand::for_level(50), Some(DifficultyBand::Medium));
        assert_eq!(DifficultyBand::for_level(51), Some(DifficultyBand::Hard));
        assert_eq!(DifficultyBand::for_level(90), Some(DifficultyBand::Hard));
        assert_eq!(DifficultyBand::for_level(91), Some(DifficultyBand::VeryHard));
        assert_eq!(DifficultyBand::for_level(99), Some(DifficultyBand::VeryHard));
        assert_eq!(DifficultyBand::for_level(100), Some(DifficultyBand::Boss));
        assert_eq!(DifficultyBand::for_level(101), None);
    }

    #[test]
    fn test_level_five() {
        let level = generate_level(5).unwrap();
        assert_eq!(level.band, DifficultyBand::Easy);
        assert_eq!(level.power_ups.len(), 1);
        assert_eq!(level.power_ups[0].kind, PowerUpKind::Speed);
        assert_eq!(level.enemies.len(), 1);
        assert_eq!(level.enemies[0].pos, Vec2::new(300.0, 500.0));
        assert_eq!(level.collectibles.len(), 12);
        let door = level.door.unwrap();
        assert!(!door.is_open);
        assert!(level.boss.is_none());
        // Ground plus four steps
        assert_eq!(level.platforms.len(), 5);
    }

    #[test]
    fn test_easy_thresholds() {
        let one = generate_level(1).unwrap();
        assert!(one.power_ups.is_empty());
        assert!(one.enemies.is_empty());

        let seven = generate_level(7).unwrap();
        assert_eq!(seven.power_ups.len(), 2);
        assert_eq!(seven.power_ups[1].kind, PowerUpKind::Jump);
        assert_eq!(seven.enemies.len(), 2);
    }

    #[test]
    fn test_medium_koopa_after_thirty() {
        let thirty = generate_level(30).unwrap();
        assert_eq!(thirty.enemies.len(), 3);
        let thirty_one = generate_level(31).unwrap();
        assert_eq!(thirty_one.enemies.len(), 4);
        assert_eq!(thirty_one.enemies[3].kind, EnemyKind::Koopa);
        assert_eq!(thirty_one.collectibles.len(), 15);
        assert_eq!(thirty_one.platforms.len(), 9);
    }

    #[test]
    fn test_hard_layout() {
        let level = generate_level(60).unwrap();
        let moving: Vec<_> = level.platforms.iter().filter(|p| p.is_moving()).collect();
        assert_eq!(moving.len(), 6);
        assert_eq!(level.platforms.len() - moving.len(), 3);
        let vertical = moving
            .iter()
            .filter(|p| matches!(p.kind, PlatformKind::Moving(m) if m.axis == Axis::Y))
            .count();
        assert_eq!(vertical, 1);
        assert_eq!(level.collectibles.len(), 18);
        assert_eq!(level.enemies.len(), 5);
    }

    #[test]
    fn test_very_hard_layout() {
        let level = generate_level(95).unwrap();
        assert_eq!(level.platforms.len(), 1 + 8 + 5);
        let vertical = level
            .platforms
            .iter()
            .filter(|p| matches!(p.kind, PlatformKind::Moving(m) if m.axis == Axis::Y))
            .count();
        assert_eq!(vertical, 4);
        assert_eq!(level.collectibles.len(), 20);
        assert_eq!(level.enemies.len(), 6);
        assert!(level.door.is_some());
    }

    #[test]
    fn test_boss_level_has_no_door() {
        let level = generate_level(100).unwrap();
        assert!(level.door.is_none());
        let boss = level.boss.unwrap();
        assert_eq!(boss.health, 5);
        assert_eq!(level.collectibles.len(), 15);
        assert!(level.enemies.is_empty());
    }

    #[test]
    fn test_out_of_range() {
        assert!(generate_level(101).is_none());
        assert!(generate_level(u32::MAX).is_none());
        assert_eq!(generate_level(0).unwrap().number, 1);
    }

    #[test]
    fn test_generation_is_deterministic() {
        for n in [1, 5, 12, 31, 77, 93, 100] {
            assert_eq!(generate_level(n), generate_level(n));
        }
    }

    #[test]
    fn test_every_door_near_right_edge() {
        for n in 1..BOSS_LEVEL {
            let door = generate_level(n).unwrap().door.unwrap();
            assert!(door.pos.x >= 1400.0 && door.pos.x < WORLD_WIDTH);
        }
    }
}
