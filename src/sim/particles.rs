//! Visual feedback particles
//!
//! Not gameplay-affecting. Randomness comes from a seeded PCG stream so two
//! sessions with the same seed emit identical bursts.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Lifetime of every particle (ticks)
pub const PARTICLE_LIFE: u32 = 60;
/// Maximum live particles
pub const MAX_PARTICLES: usize = 256;

const EXPLOSION_GRAVITY: f32 = 0.1;
const EXPLOSION_DAMPING: f32 = 0.98;

/// Explosion fragment; falls and slows down
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0xRRGGBB
    pub color: u32,
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    pub gravity: f32,
}

impl Particle {
    fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += self.gravity;
        self.vel *= EXPLOSION_DAMPING;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Fade factor, 1.0 when spawned down to 0.0 at death
    pub fn alpha(&self) -> f32 {
        self.life as f32 / self.max_life as f32
    }
}

/// Owns every live particle and prunes dead ones each tick
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ParticleSystem {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() < MAX_PARTICLES {
            self.particles.push(particle);
        }
    }

    /// `count` particles spraying outward at evenly spaced angles
    pub fn add_explosion(&mut self, pos: Vec2, count: u32, color: u32) {
        for i in 0..count {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            let speed = 2.0 + self.rng.random::<f32>() * 3.0;
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            let particle = self.spawn(pos, vel, color);
            self.push(particle);
        }
    }

    fn spawn(&mut self, pos: Vec2, vel: Vec2, color: u32) -> Particle {
        Particle {
            pos,
            vel,
            color,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            size: 2.0 + self.rng.random::<f32>() * 3.0,
            gravity: EXPLOSION_GRAVITY,
        }
    }

    pub fn update(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explosion_spawns_and_expires() {
        let mut system = ParticleSystem::new(7);
        system.add_explosion(Vec2::new(100.0, 100.0), 5, 0x00FF00);
        assert_eq!(system.len(), 5);
        assert!(system.iter().all(|p| p.gravity == EXPLOSION_GRAVITY));

        for _ in 0..PARTICLE_LIFE - 1 {
            system.update();
        }
        assert_eq!(system.len(), 5);
        system.update();
        assert!(system.is_empty());
    }

    #[test]
    fn test_explosion_slows_and_fades() {
        let mut system = ParticleSystem::new(1);
        system.add_explosion(Vec2::ZERO, 1, 0x0080FF);
        let before = system.iter().next().unwrap().clone();
        assert_eq!(before.alpha(), 1.0);
        system.update();
        let after = system.iter().next().unwrap();
        assert!(after.vel.x.abs() < before.vel.x.abs());
        assert!(after.alpha() < 1.0);
    }

    #[test]
    fn test_same_seed_same_burst() {
        let mut a = ParticleSystem::new(42);
        let mut b = ParticleSystem::new(42);
        a.add_explosion(Vec2::ZERO, 8, 0xFFD700);
        b.add_explosion(Vec2::ZERO, 8, 0xFFD700);
        assert!(a.iter().zip(b.iter()).all(|(x, y)| x == y));
    }

    #[test]
    fn test_capacity_is_bounded() {
        let mut system = ParticleSystem::new(3);
        for _ in 0..100 {
            system.add_explosion(Vec2::ZERO, 10, 0xFFFFFF);
        }
        assert_eq!(system.len(), MAX_PARTICLES);
    }
}
