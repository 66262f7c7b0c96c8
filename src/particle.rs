//! Particle state shared by both motion models.
//!
//! Every particle has a position, a velocity and a fixed radius. What else it
//! carries depends on the model that owns it: wandering particles breathe in
//! and out of view through `alpha`, falling particles carry an acceleration.
//! A particle is never migrated between models.

use glam::Vec2;

/// Upper bound of a wandering particle's opacity.
pub const ALPHA_MAX: f32 = 0.5;

/// Magnitude of the per-tick opacity change for wandering particles.
pub const FADE_STEP: f32 = 0.003;

/// Model-specific particle state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionTraits {
    /// Ambient-wander state: oscillating opacity.
    Wander {
        /// Current opacity, always within `[0, ALPHA_MAX]`.
        alpha: f32,
        /// Signed opacity increment applied each tick (`±FADE_STEP`).
        fade_direction: f32,
    },
    /// Gravity-collision state.
    Gravity {
        /// Current acceleration in pixels per second squared.
        acceleration: Vec2,
    },
}

/// A single simulated particle in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in pixels, origin at the top-left of the surface.
    pub position: Vec2,
    /// Velocity in pixels per simulated time unit.
    pub velocity: Vec2,
    /// Radius in pixels. Fixed at creation.
    size: f32,
    /// State owned by the particle's motion model.
    pub traits: MotionTraits,
}

impl Particle {
    /// Create a wandering particle. `alpha` is clamped into `[0, ALPHA_MAX]`.
    pub fn wander(position: Vec2, velocity: Vec2, size: f32, alpha: f32, fade_direction: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            traits: MotionTraits::Wander {
                alpha: alpha.clamp(0.0, ALPHA_MAX),
                fade_direction,
            },
        }
    }

    /// Create a falling particle at rest acceleration.
    pub fn gravity(position: Vec2, velocity: Vec2, size: f32) -> Self {
        Self {
            position,
            velocity,
            size,
            traits: MotionTraits::Gravity {
                acceleration: Vec2::ZERO,
            },
        }
    }

    /// Radius of the particle in pixels.
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Current opacity for wandering particles, `None` for falling ones.
    #[inline]
    pub fn alpha(&self) -> Option<f32> {
        match self.traits {
            MotionTraits::Wander { alpha, .. } => Some(alpha),
            MotionTraits::Gravity { .. } => None,
        }
    }

    /// Current acceleration for falling particles, `None` for wandering ones.
    #[inline]
    pub fn acceleration(&self) -> Option<Vec2> {
        match self.traits {
            MotionTraits::Gravity { acceleration } => Some(acceleration),
            MotionTraits::Wander { .. } => None,
        }
    }
}
