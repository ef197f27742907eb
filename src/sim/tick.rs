//! Fixed timestep simulation tick
//!
//! One call advances the world by one display frame: entity updates, collision
//! dispatch in a fixed order, camera, then the fall-off check.

use glam::Vec2;

use super::collision::{Bounds, resolve_platform_collision};
use super::entities::{COLLECTIBLE_SIZE, POWER_UP_SIZE};
use super::events::GameEvent;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Collected-gem burst
const COLLECT_BURST: u32 = 5;
const COLLECT_COLOR: u32 = 0x00FF00;
const POWER_UP_BURST: u32 = 8;
/// How far above the boss's top the player's top must be to count as a stomp
const STOMP_MARGIN: f32 = 20.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left arrow / A
    pub left: bool,
    /// Right arrow / D
    pub right: bool,
    /// Up arrow / W / Space
    pub jump: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    // Overlays freeze the world; only celebration particles keep moving
    if state.phase != GamePhase::Playing {
        state.particles.update();
        return;
    }

    if state.player.update(input, &state.tuning) {
        state.emit(GameEvent::Jumped);
    }

    for platform in &mut state.platforms {
        platform.update();
    }
    let gravity = state.tuning.gravity;
    for enemy in &mut state.enemies {
        enemy.update(gravity);
    }
    for collectible in &mut state.collectibles {
        collectible.update();
    }
    for power_up in &mut state.power_ups {
        power_up.update();
    }
    state.particles.update();
    if let Some(boss) = &mut state.boss {
        boss.update(gravity);
    }

    check_collisions(state);

    let target = state.player.pos;
    state.camera.follow(target, state.tuning.camera_smoothing);

    if state.phase == GamePhase::Playing {
        check_fall_off(state);
    }
}

/// Player against every other entity: collectibles, power-ups, enemies,
/// platforms, door, boss
fn check_collisions(state: &mut GameState) {
    collect_items(state);
    collect_power_ups(state);

    for i in 0..state.enemies.len() {
        if !state.player.invulnerable && state.player.collides_with(&state.enemies[i]) {
            log::debug!("Player touched {:?}", state.enemies[i].kind);
            state.player_hit();
        }
    }

    // Bounds are re-read per platform since each resolution moves the player
    for platform in &state.platforms {
        let body = state.player.bounds();
        let rect = platform.bounds();
        if body.collides_with(&rect) {
            let resolution = resolve_platform_collision(&body, &rect);
            state.player.apply_resolution(resolution);
        }
    }

    let at_open_door = state
        .door
        .as_ref()
        .is_some_and(|door| door.is_open && state.player.collides_with(door));
    if state.phase == GamePhase::Playing && at_open_door {
        state.show_level_complete();
    }

    check_boss(state);
}

fn collect_items(state: &mut GameState) {
    let mut picked = 0;
    for collectible in &mut state.collectibles {
        if state.player.collides_with(&*collectible) {
            collectible.collected = true;
            picked += 1;
            let center = collectible.pos + Vec2::splat(COLLECTIBLE_SIZE / 2.0);
            state.particles.add_explosion(center, COLLECT_BURST, COLLECT_COLOR);
        }
    }
    if picked == 0 {
        return;
    }

    state.collectibles.retain(|c| !c.collected);
    for _ in 0..picked {
        state.collect_item();
    }
    log::debug!(
        "Collected {} ({}/{})",
        picked,
        state.collectibles_collected,
        state.tuning.collectibles_needed
    );
}

fn collect_power_ups(state: &mut GameState) {
    let player_bounds = state.player.bounds();
    let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut state.power_ups)
        .into_iter()
        .partition(|p| player_bounds.collides_with(p));
    state.power_ups = kept;

    for power_up in taken {
        power_up
            .kind
            .apply(&mut state.player, &mut state.lives, &state.tuning);
        let center = power_up.pos + Vec2::splat(POWER_UP_SIZE / 2.0);
        state
            .particles
            .add_explosion(center, POWER_UP_BURST, power_up.kind.glow_color());
        log::debug!("Picked up {:?}", power_up.kind);
        state.emit(GameEvent::PowerUpCollected(power_up.kind));
    }
}

/// Landing on the boss from above while falling is a stomp; any other
/// contact hurts the player
fn check_boss(state: &mut GameState) {
    let Some(boss) = &mut state.boss else {
        return;
    };
    if state.player.invulnerable || !state.player.collides_with(&*boss) {
        return;
    }

    let stomped = state.player.pos.y < boss.pos.y - STOMP_MARGIN && state.player.vel.y > 0.0;
    if !stomped {
        state.player_hit();
        return;
    }

    let defeated = boss.hit();
    let health = boss.health;
    state.player.vel.y = -state.tuning.stomp_bounce;
    log::debug!("Boss stomped ({} health left)", health);
    state.emit(GameEvent::BossHit { health });

    if defeated {
        state.victory();
    }
}

/// Falling below the world costs a life and puts the player back at the
/// level start without reloading the level
fn check_fall_off(state: &mut GameState) {
    if state.player.pos.y <= WORLD_HEIGHT + FALL_OFF_MARGIN {
        return;
    }

    log::debug!("Player fell off level {}", state.level);
    state.player_hit();
    state.player.pos = Vec2::new(PLAYER_START_X, PLAYER_START_Y);
    state.player.vel.y = 0.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Enemy, PowerUp, PowerUpKind};
    use crate::sim::level::generate_level;
    use crate::tuning::Tuning;

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_collecting_five_opens_door_once() {
        let mut state = GameState::new(1);
        state.drain_events();

        for _ in 0..7 {
            let gem = state.collectibles[0].pos;
            state.player.pos = gem;
            state.player.vel = Vec2::ZERO;
            tick(&mut state, &idle());
        }

        assert_eq!(state.collectibles_collected, 7);
        assert_eq!(state.collectibles.len(), 5);
        assert!(state.door.as_ref().unwrap().is_open);
        let opened = state
            .drain_events()
            .iter()
            .filter(|e| **e == GameEvent::DoorOpened)
            .count();
        assert_eq!(opened, 1);
    }

    #[test]
    fn test_power_up_applies_and_is_removed() {
        let mut state = GameState::new(1);
        state.power_ups.push(PowerUp::new(100.0, 418.0, PowerUpKind::Speed));
        state.player.pos = Vec2::new(100.0, 418.0);
        tick(&mut state, &idle());

        assert!(state.power_ups.is_empty());
        assert_eq!(state.player.speed, 8.0);
        // Timer starts counting down next tick
        assert_eq!(state.player.speed_boost, 300);
        assert!(!state.particles.is_empty());
    }

    #[test]
    fn test_enemy_contact_costs_one_life() {
        let mut state = GameState::new(1);
        state.enemies.push(Enemy::goomba(100.0, 500.0));
        state.enemies.push(Enemy::goomba(110.0, 500.0));
        state.player.pos = Vec2::new(100.0, 500.0);
        tick(&mut state, &idle());

        // Second enemy lands inside the grace window
        assert_eq!(state.lives, 2);
        assert!(state.player.invulnerable);

        tick(&mut state, &idle());
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_fall_off_respawns_without_reload() {
        let tuning = Tuning {
            ground_fallback: false,
            ..Default::default()
        };
        let mut state = GameState::with_tuning(1, tuning);
        state.platforms.clear();
        state.collect_item();
        let gems = state.collectibles.len();

        let mut ticks = 0;
        while state.lives == 3 && ticks < 100 {
            tick(&mut state, &idle());
            ticks += 1;
        }

        assert_eq!(state.lives, 2);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.collectibles_collected, 1);
        assert_eq!(state.collectibles.len(), gems);
        assert!(state.platforms.is_empty());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_collect_five_then_walk_into_door() {
        let mut state = GameState::new(1);
        state.enemies.clear();
        state.drain_events();

        // Pick up five gems through the normal tick path
        for _ in 0..5 {
            state.player.pos = state.collectibles[0].pos;
            state.player.vel = Vec2::ZERO;
            tick(&mut state, &idle());
        }
        assert_eq!(state.collectibles_collected, 5);
        assert!(state.door.as_ref().unwrap().is_open);

        // Walk right along the ground until the door is reached
        let walk = TickInput { right: true, ..idle() };
        let mut ticks = 0;
        while state.phase == GamePhase::Playing && ticks < 600 {
            tick(&mut state, &walk);
            ticks += 1;
        }
        assert_eq!(state.phase, GamePhase::LevelComplete);
        let door = state.door.as_ref().unwrap().pos;
        assert!(state.player.pos.x + state.player.size.x > door.x);
        let events = state.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::DoorOpened).count(), 1);
        assert!(events.contains(&GameEvent::LevelComplete { level: 1 }));

        // World is frozen while the overlay is up
        let frozen = state.player.pos;
        tick(&mut state, &TickInput { right: true, ..idle() });
        assert_eq!(state.player.pos, frozen);

        state.continue_to_next_level();
        let expected = generate_level(2).unwrap();
        assert_eq!(state.level, 2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.platforms, expected.platforms);
        assert_eq!(state.enemies, expected.enemies);
        assert_eq!(state.collectibles, expected.collectibles);
        assert_eq!(state.collectibles_collected, 0);
        assert!(!state.door.as_ref().unwrap().is_open);
        assert_eq!(state.player.pos, Vec2::new(PLAYER_START_X, PLAYER_START_Y));
    }

    #[test]
    fn test_closed_door_does_nothing() {
        let mut state = GameState::new(1);
        let door = state.door.as_ref().unwrap().pos;
        state.player.pos = Vec2::new(door.x, 500.0);
        tick(&mut state, &idle());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    fn place_for_stomp(state: &mut GameState) {
        let boss = state.boss.as_ref().unwrap().pos;
        state.player.pos = Vec2::new(boss.x + 16.0, boss.y - 30.0);
        state.player.vel = Vec2::new(0.0, 5.0);
    }

    #[test]
    fn test_five_stomps_defeat_boss() {
        let mut state = GameState::new(1);
        state.load_level(BOSS_LEVEL);
        state.collectibles.clear();
        if let Some(boss) = &mut state.boss {
            boss.pos = Vec2::new(1300.0, GROUND_Y - 64.0);
        }

        for stomp in 1..=5u32 {
            place_for_stomp(&mut state);
            tick(&mut state, &idle());
            assert_eq!(state.boss.as_ref().unwrap().health, 5 - stomp);
            assert_eq!(state.player.vel.y, -15.0);
        }

        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.lives, 3);
        let events = state.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::Victory));
    }

    #[test]
    fn test_boss_side_contact_hurts_player() {
        let mut state = GameState::new(1);
        state.load_level(BOSS_LEVEL);
        let boss = state.boss.as_ref().unwrap().pos;
        state.player.pos = Vec2::new(boss.x - 20.0, boss.y + 20.0);
        tick(&mut state, &idle());

        assert_eq!(state.lives, 2);
        assert_eq!(state.boss.as_ref().unwrap().health, 5);
    }

    #[test]
    fn test_god_mode_ignores_enemies() {
        let mut state = GameState::new(1);
        state.player.make_invulnerable(1000);
        state.enemies.push(Enemy::goomba(100.0, 500.0));
        for _ in 0..10 {
            state.player.pos = Vec2::new(100.0, 500.0);
            tick(&mut state, &idle());
        }
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_camera_follows_player() {
        let mut state = GameState::new(1);
        state.player.pos.x = 1200.0;
        for _ in 0..200 {
            tick(&mut state, &idle());
        }
        assert!(state.camera.pos.x > 700.0);
        assert!(state.camera.pos.x <= WORLD_WIDTH - VIEW_WIDTH);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs end up identical
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.load_level(60);
        state2.load_level(60);

        let script = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                left: true,
                ..Default::default()
            },
        ];

        for i in 0..400 {
            let input = script[(i / 25) % script.len()];
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
        assert_eq!(state1.particles.len(), state2.particles.len());
    }
}
