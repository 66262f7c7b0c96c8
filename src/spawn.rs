//! Spawn context for particle initialization.
//!
//! Provides the random sampling helpers the particle store needs when seeding
//! a surface.

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Random source with helpers for common spawn patterns.
///
/// ```ignore
/// let mut ctx = SpawnContext::new(Some(7));
/// let position = ctx.random_in_rect(800.0, 600.0);
/// let velocity = ctx.random_velocity(0.1);
/// ```
pub struct SpawnContext {
    rng: SmallRng,
}

impl SpawnContext {
    /// Create a spawn context.
    ///
    /// With `Some(seed)` the sequence is reproducible; with `None` it differs
    /// on each program execution.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42)
        });

        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    // ========== Random primitives ==========

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..max)
    }

    /// `1.0` or `-1.0` with equal probability.
    #[inline]
    pub fn random_sign(&mut self) -> f32 {
        if self.rng.gen_bool(0.5) {
            1.0
        } else {
            -1.0
        }
    }

    // ========== Position helpers ==========

    /// Random point uniformly distributed over `[0, width) × [0, height)`.
    pub fn random_in_rect(&mut self, width: f32, height: f32) -> Vec2 {
        Vec2::new(self.random_range(0.0, width), self.random_range(0.0, height))
    }

    // ========== Velocity helpers ==========

    /// Random velocity with each component uniform in `[-max, max)`.
    pub fn random_velocity(&mut self, max: f32) -> Vec2 {
        Vec2::new(self.random_range(-max, max), self.random_range(-max, max))
    }
}
