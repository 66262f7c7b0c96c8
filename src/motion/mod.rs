//! Motion models.
//!
//! A motion model decides how particles are seeded and how they advance by
//! one tick. Two models exist and they are deliberately kept apart:
//!
//! | Model | Motion | Boundary | Extra state |
//! |-------|--------|----------|-------------|
//! | [`MotionModel::Wander`] | Constant-velocity drift | Wraparound (torus) | Oscillating alpha |
//! | [`MotionModel::Gravity`] | Gravity + horizontal damping | Inelastic bounce | Acceleration |
//!
//! # Example
//!
//! ```ignore
//! let model = MotionModel::Wander(Wander { time_scaled: true, ..Default::default() });
//! model.step(store.particles_mut(), delta_ms, viewport.bounds());
//! ```

mod gravity;
mod wander;

pub use gravity::{DampingMode, Gravity};
pub use wander::Wander;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;

/// Selects one of the two step functions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionModel {
    /// Ambient drift with wraparound and twinkling opacity.
    Wander(Wander),
    /// Falling particles bouncing off every edge.
    Gravity(Gravity),
}

impl MotionModel {
    /// Ambient-wander model with default parameters.
    pub fn wander() -> Self {
        MotionModel::Wander(Wander::default())
    }

    /// Gravity-collision model with default parameters.
    pub fn gravity() -> Self {
        MotionModel::Gravity(Gravity::default())
    }

    /// Short human-readable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            MotionModel::Wander(_) => "wander",
            MotionModel::Gravity(_) => "gravity",
        }
    }

    /// Number of particles to seed for a surface of the given width.
    ///
    /// Evaluated once at creation; resizing never changes the count.
    pub fn particle_count(&self, surface_width: u32) -> usize {
        match self {
            MotionModel::Wander(w) => w.particle_count(surface_width),
            MotionModel::Gravity(g) => g.particle_count,
        }
    }

    /// Advance every particle by one tick.
    ///
    /// `delta_ms` is the time since the previous tick in milliseconds and
    /// `bounds` the current surface size in pixels.
    pub fn step(&self, particles: &mut [Particle], delta_ms: f32, bounds: Vec2) {
        match self {
            MotionModel::Wander(w) => w.step(particles, delta_ms, bounds),
            MotionModel::Gravity(g) => g.step(particles, delta_ms, bounds),
        }
    }
}

impl Default for MotionModel {
    fn default() -> Self {
        Self::wander()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_counts() {
        let wander = MotionModel::wander();
        assert_eq!(wander.particle_count(500), 40);
        assert_eq!(wander.particle_count(767), 40);
        assert_eq!(wander.particle_count(768), 100);
        assert_eq!(wander.particle_count(1024), 100);

        let gravity = MotionModel::gravity();
        assert_eq!(gravity.particle_count(500), 50);
        assert_eq!(gravity.particle_count(4096), 50);
    }

    #[test]
    fn test_model_serializes_with_kind_tag() {
        let json = serde_json::to_string(&MotionModel::gravity()).unwrap();
        assert!(json.contains("\"kind\":\"gravity\""));

        let back: MotionModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MotionModel::gravity());
    }

    #[test]
    fn test_model_fields_default_when_omitted() {
        let model: MotionModel = serde_json::from_str(r#"{"kind":"wander","time_scaled":true}"#).unwrap();
        match model {
            MotionModel::Wander(w) => {
                assert!(w.time_scaled);
                assert_eq!(w.compact_count, 40);
            }
            MotionModel::Gravity(_) => panic!("expected wander"),
        }
    }
}
