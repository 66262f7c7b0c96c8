//! Gravity-collision model: falling particles with inelastic walls.
//!
//! Integration is semi-implicit Euler on the vertical axis. Horizontal
//! velocity decays once per tick by default, which makes horizontal drift
//! depend on the refresh rate; [`DampingMode::TimeScaled`] removes that.
//! There is no rest state: a particle lying on the floor keeps picking up
//! gravity and micro-bouncing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::particle::{MotionTraits, Particle};

/// How horizontal damping relates to elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DampingMode {
    /// `vx *= damping` once per tick, regardless of elapsed time.
    #[default]
    PerFrame,
    /// `vx *= damping^(dt / reference_tick_secs)`.
    TimeScaled {
        /// Tick length at which one full damping factor applies.
        reference_tick_secs: f32,
    },
}

/// Gravity-collision parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gravity {
    /// Downward acceleration in pixels per second squared.
    pub acceleration: f32,
    /// Upper bound on the integration step in seconds.
    pub max_delta_secs: f32,
    /// Horizontal velocity factor per tick.
    pub horizontal_damping: f32,
    /// How `horizontal_damping` is applied.
    pub damping_mode: DampingMode,
    /// Fraction of speed kept (with reversed sign) after hitting an edge.
    pub restitution: f32,
    /// Per-component bound of the initial velocity.
    pub max_speed: f32,
    /// Number of particles to seed, independent of surface width.
    pub particle_count: usize,
}

impl Default for Gravity {
    fn default() -> Self {
        Self {
            acceleration: 0.1,
            max_delta_secs: 0.016,
            horizontal_damping: 0.99,
            damping_mode: DampingMode::PerFrame,
            restitution: 0.8,
            max_speed: 1.0,
            particle_count: 50,
        }
    }
}

impl Gravity {
    /// Convert a frame delta in milliseconds to a clamped step in seconds.
    ///
    /// A negative or NaN `max_delta_secs` freezes the model rather than
    /// integrating backwards.
    #[inline]
    pub fn clamp_delta(&self, delta_ms: f32) -> f32 {
        (delta_ms / 1000.0).max(0.0).min(self.max_delta_secs.max(0.0))
    }

    pub(crate) fn step(&self, particles: &mut [Particle], delta_ms: f32, bounds: Vec2) {
        let dt = self.clamp_delta(delta_ms);
        for p in particles.iter_mut() {
            self.integrate(p, dt, bounds);
        }
    }

    /// Integrate one particle over `dt` seconds, then resolve edge contacts.
    ///
    /// `dt` is used as given; [`Gravity::clamp_delta`] is applied by the
    /// per-frame step only.
    pub fn integrate(&self, p: &mut Particle, dt: f32, bounds: Vec2) {
        let MotionTraits::Gravity { acceleration } = &mut p.traits else {
            return;
        };

        acceleration.y = self.acceleration;

        p.velocity.y += acceleration.y * dt;
        p.position.y += p.velocity.y * dt;

        p.velocity.x *= self.damping_factor(dt);
        p.position.x += p.velocity.x * dt;

        bounce(&mut p.position.y, &mut p.velocity.y, bounds.y, self.restitution);
        bounce(&mut p.position.x, &mut p.velocity.x, bounds.x, self.restitution);
    }

    fn damping_factor(&self, dt: f32) -> f32 {
        match self.damping_mode {
            DampingMode::PerFrame => self.horizontal_damping,
            DampingMode::TimeScaled { reference_tick_secs } if reference_tick_secs > 0.0 => {
                self.horizontal_damping.powf(dt / reference_tick_secs)
            }
            DampingMode::TimeScaled { .. } => 1.0,
        }
    }
}

/// Clamp to `[0, max]` and reflect the velocity with energy loss.
#[inline]
fn bounce(position: &mut f32, velocity: &mut f32, max: f32, restitution: f32) {
    if *position > max {
        *position = max;
        *velocity = -*velocity * restitution;
    } else if *position < 0.0 {
        *position = 0.0;
        *velocity = -*velocity * restitution;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_floor_bounce_scenario() {
        let gravity = Gravity::default();
        let mut p = Particle::gravity(Vec2::new(50.0, 99.0), Vec2::new(0.0, 1.0), 1.0);
        gravity.integrate(&mut p, 1.0, Vec2::new(100.0, 100.0));

        assert_eq!(p.position.y, 100.0);
        assert!((p.velocity.y - (-0.88)).abs() < EPS);
        assert_eq!(p.acceleration(), Some(Vec2::new(0.0, 0.1)));
    }

    #[test]
    fn test_bounce_on_every_edge() {
        let gravity = Gravity {
            acceleration: 0.0,
            ..Default::default()
        };
        let bounds = Vec2::new(100.0, 100.0);

        // Ceiling and left wall in the same tick.
        let mut p = Particle::gravity(Vec2::new(0.5, 0.5), Vec2::new(-2.0, -2.0), 1.0);
        gravity.integrate(&mut p, 1.0, bounds);
        assert_eq!(p.position, Vec2::ZERO);
        assert!(p.velocity.y > 0.0);
        assert!((p.velocity.y - 1.6).abs() < EPS);
        // Horizontal damping applies before the bounce.
        assert!((p.velocity.x - 2.0 * 0.99 * 0.8).abs() < EPS);

        // Right wall.
        let mut p = Particle::gravity(Vec2::new(99.5, 50.0), Vec2::new(3.0, 0.0), 1.0);
        gravity.integrate(&mut p, 1.0, bounds);
        assert_eq!(p.position.x, 100.0);
        assert!((p.velocity.x + 3.0 * 0.99 * 0.8).abs() < EPS);
    }

    #[test]
    fn test_restitution_magnitude() {
        let gravity = Gravity::default();
        let bounds = Vec2::new(200.0, 200.0);
        for vy in [0.5_f32, 5.0, 50.0, 500.0] {
            let mut p = Particle::gravity(Vec2::new(100.0, 199.99), Vec2::new(0.0, vy), 1.0);
            gravity.integrate(&mut p, 0.016, bounds);
            let incoming = vy + 0.1 * 0.016;
            if p.position.y == 200.0 && p.velocity.y < 0.0 {
                assert!((p.velocity.y.abs() - incoming * 0.8).abs() < 1e-3);
            }
            assert!(p.position.y <= 200.0);
        }
    }

    #[test]
    fn test_step_clamps_delta() {
        let gravity = Gravity::default();
        assert_eq!(gravity.clamp_delta(1000.0), 0.016);
        assert_eq!(gravity.clamp_delta(8.0), 0.008);
        assert_eq!(gravity.clamp_delta(0.0), 0.0);
        assert_eq!(gravity.clamp_delta(-20.0), 0.0);

        let mut p = Particle::gravity(Vec2::new(50.0, 50.0), Vec2::new(0.0, 10.0), 1.0);
        gravity.step(std::slice::from_mut(&mut p), 5000.0, Vec2::splat(100.0));
        let expected_vy = 10.0 + 0.1 * 0.016;
        assert!((p.velocity.y - expected_vy).abs() < EPS);
        assert!((p.position.y - (50.0 + expected_vy * 0.016)).abs() < EPS);
    }

    #[test]
    fn test_out_of_range_parameters_do_not_panic() {
        let bounds = Vec2::splat(100.0);
        for gravity in [
            Gravity {
                max_delta_secs: -1.0,
                ..Default::default()
            },
            Gravity {
                max_delta_secs: f32::NAN,
                ..Default::default()
            },
            Gravity {
                damping_mode: DampingMode::TimeScaled {
                    reference_tick_secs: -0.5,
                },
                ..Default::default()
            },
        ] {
            let mut p = Particle::gravity(Vec2::splat(50.0), Vec2::new(1.0, 1.0), 1.0);
            gravity.step(std::slice::from_mut(&mut p), 16.0, bounds);
            assert!(p.position.x.is_finite() && p.position.y.is_finite());
            assert!((0.0..=100.0).contains(&p.position.x));
            assert!((0.0..=100.0).contains(&p.position.y));
        }
        assert_eq!(
            Gravity {
                max_delta_secs: -1.0,
                ..Default::default()
            }
            .clamp_delta(16.0),
            0.0
        );
    }

    #[test]
    fn test_per_frame_damping_ignores_delta() {
        let gravity = Gravity::default();
        let mut a = Particle::gravity(Vec2::splat(50.0), Vec2::new(1.0, 0.0), 1.0);
        let mut b = a;
        gravity.integrate(&mut a, 0.001, Vec2::splat(100.0));
        gravity.integrate(&mut b, 0.016, Vec2::splat(100.0));
        assert_eq!(a.velocity.x, b.velocity.x);
        assert!((a.velocity.x - 0.99).abs() < EPS);
    }

    #[test]
    fn test_time_scaled_damping() {
        let gravity = Gravity {
            damping_mode: DampingMode::TimeScaled {
                reference_tick_secs: 0.008,
            },
            ..Default::default()
        };
        let mut p = Particle::gravity(Vec2::splat(50.0), Vec2::new(1.0, 0.0), 1.0);
        gravity.integrate(&mut p, 0.016, Vec2::splat(100.0));
        assert!((p.velocity.x - 0.99 * 0.99).abs() < EPS);
    }

    #[test]
    fn test_resting_particle_keeps_micro_bouncing() {
        let gravity = Gravity::default();
        let mut p = Particle::gravity(Vec2::new(50.0, 100.0), Vec2::ZERO, 1.0);
        let bounds = Vec2::splat(100.0);
        for _ in 0..100 {
            gravity.integrate(&mut p, 0.016, bounds);
            assert!(p.position.y <= 100.0 && p.position.y >= 0.0);
        }
        assert!(p.velocity.y.abs() < 0.01);
    }
}
