//! Ambient-wander model: constant-velocity drift on a torus.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::particle::{MotionTraits, Particle, ALPHA_MAX};

/// Ambient-wander parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wander {
    /// Scale each tick by `delta_ms / reference_tick_ms` so apparent speed
    /// does not depend on the host's refresh rate.
    pub time_scaled: bool,
    /// Duration of one nominal tick in milliseconds.
    pub reference_tick_ms: f32,
    /// Per-component bound of the initial velocity, in pixels per tick.
    pub max_speed: f32,
    /// Surfaces narrower than this get `compact_count` particles.
    pub compact_width: u32,
    /// Particle count on narrow surfaces.
    pub compact_count: usize,
    /// Particle count on wide surfaces.
    pub full_count: usize,
}

impl Default for Wander {
    fn default() -> Self {
        Self {
            time_scaled: false,
            reference_tick_ms: 16.66,
            max_speed: 0.1,
            compact_width: 768,
            compact_count: 40,
            full_count: 100,
        }
    }
}

impl Wander {
    /// Width-dependent seed count.
    pub fn particle_count(&self, surface_width: u32) -> usize {
        if surface_width < self.compact_width {
            self.compact_count
        } else {
            self.full_count
        }
    }

    /// Tick multiplier for an elapsed time.
    #[inline]
    pub fn tick_scale(&self, delta_ms: f32) -> f32 {
        if self.time_scaled && self.reference_tick_ms > 0.0 {
            delta_ms / self.reference_tick_ms
        } else {
            1.0
        }
    }

    pub(crate) fn step(&self, particles: &mut [Particle], delta_ms: f32, bounds: Vec2) {
        let scale = self.tick_scale(delta_ms);
        for p in particles.iter_mut() {
            self.advance(p, scale, bounds);
        }
    }

    /// Advance one particle by `scale` nominal ticks.
    pub fn advance(&self, p: &mut Particle, scale: f32, bounds: Vec2) {
        let MotionTraits::Wander { alpha, fade_direction } = &mut p.traits else {
            return;
        };

        p.position += p.velocity * scale;

        *alpha += *fade_direction * scale;
        if *alpha <= 0.0 || *alpha >= ALPHA_MAX {
            *fade_direction = -*fade_direction;
            *alpha = alpha.clamp(0.0, ALPHA_MAX);
        }

        p.position.x = wrap(p.position.x, bounds.x);
        p.position.y = wrap(p.position.y, bounds.y);
    }
}

/// Re-enter at the opposite edge.
#[inline]
fn wrap(value: f32, max: f32) -> f32 {
    if value < 0.0 {
        max
    } else if value > max {
        0.0
    } else {
        value
    }
}
