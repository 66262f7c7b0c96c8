//! Particle store: sole owner of the simulated particle set.
//!
//! The set is created once per mount and replaced wholesale only by a fresh
//! mount. Steps and renderers borrow it for one frame at a time.

use crate::motion::MotionModel;
use crate::particle::{Particle, ALPHA_MAX, FADE_STEP};
use crate::spawn::SpawnContext;

/// Smallest seeded particle radius in pixels.
pub const MIN_SIZE: f32 = 0.2;
/// Largest seeded particle radius in pixels.
pub const MAX_SIZE: f32 = 2.2;
/// Lowest seeded opacity before clamping.
pub const MIN_ALPHA: f32 = 0.05;
/// Highest seeded opacity before clamping to [`ALPHA_MAX`].
pub const MAX_ALPHA: f32 = 0.55;

/// Owned collection of particles.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// Seed `count` particles over a `width × height` surface.
    pub fn create(model: &MotionModel, count: usize, width: u32, height: u32, ctx: &mut SpawnContext) -> Self {
        let (w, h) = (width as f32, height as f32);
        let particles = (0..count).map(|_| spawn_particle(model, ctx, w, h)).collect();
        Self { particles }
    }

    /// Seed using the model's width-dependent particle count.
    pub fn seed(model: &MotionModel, width: u32, height: u32, ctx: &mut SpawnContext) -> Self {
        Self::create(model, model.particle_count(width), width, height, ctx)
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the store holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Read access for rendering.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Write access for the simulation step.
    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

fn spawn_particle(model: &MotionModel, ctx: &mut SpawnContext, width: f32, height: f32) -> Particle {
    let position = ctx.random_in_rect(width, height);
    let size = ctx.random_range(MIN_SIZE, MAX_SIZE);

    match model {
        MotionModel::Wander(wander) => {
            let velocity = ctx.random_velocity(wander.max_speed);
            let alpha = ctx.random_range(MIN_ALPHA, MAX_ALPHA).min(ALPHA_MAX);
            let fade_direction = FADE_STEP * ctx.random_sign();
            Particle::wander(position, velocity, size, alpha, fade_direction)
        }
        MotionModel::Gravity(gravity) => {
            let velocity = ctx.random_velocity(gravity.max_speed);
            Particle::gravity(position, velocity, size)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::MotionTraits;

    #[test]
    fn test_seed_counts() {
        let mut ctx = SpawnContext::new(Some(5));
        assert_eq!(ParticleStore::seed(&MotionModel::wander(), 500, 400, &mut ctx).len(), 40);
        assert_eq!(ParticleStore::seed(&MotionModel::wander(), 1024, 768, &mut ctx).len(), 100);
        assert_eq!(ParticleStore::seed(&MotionModel::gravity(), 500, 400, &mut ctx).len(), 50);
        assert_eq!(ParticleStore::seed(&MotionModel::gravity(), 2560, 1440, &mut ctx).len(), 50);
    }

    #[test]
    fn test_wander_seed_ranges() {
        let mut ctx = SpawnContext::new(Some(11));
        let store = ParticleStore::create(&MotionModel::wander(), 500, 640, 480, &mut ctx);

        for p in store.particles() {
            assert!((0.0..640.0).contains(&p.position.x));
            assert!((0.0..480.0).contains(&p.position.y));
            assert!(p.velocity.x.abs() <= 0.1 && p.velocity.y.abs() <= 0.1);
            assert!((MIN_SIZE..MAX_SIZE).contains(&p.size()));
            match p.traits {
                MotionTraits::Wander { alpha, fade_direction } => {
                    assert!((MIN_ALPHA..=ALPHA_MAX).contains(&alpha));
                    assert_eq!(fade_direction.abs(), FADE_STEP);
                }
                MotionTraits::Gravity { .. } => panic!("wander store seeded a gravity particle"),
            }
        }
    }

    #[test]
    fn test_gravity_seed_ranges() {
        let mut ctx = SpawnContext::new(Some(12));
        let store = ParticleStore::seed(&MotionModel::gravity(), 300, 200, &mut ctx);

        for p in store.particles() {
            assert!(p.velocity.x.abs() <= 1.0 && p.velocity.y.abs() <= 1.0);
            assert_eq!(p.acceleration(), Some(glam::Vec2::ZERO));
        }
    }

    #[test]
    fn test_same_seed_same_particles() {
        let a = ParticleStore::seed(&MotionModel::wander(), 800, 600, &mut SpawnContext::new(Some(3)));
        let b = ParticleStore::seed(&MotionModel::wander(), 800, 600, &mut SpawnContext::new(Some(3)));
        assert_eq!(a.particles(), b.particles());
    }
}
