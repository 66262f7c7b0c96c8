//! # driftlight - animated particle backdrops
//!
//! A small field of particles drifting or falling behind your content, drawn
//! on a 2D canvas once per display refresh.
//!
//! driftlight owns the particle state, the per-frame physics and the render
//! loop. You pick a motion model and a look; it handles seeding, timing,
//! boundaries, resizing and teardown.
//!
//! ## Quick Start
//!
//! ```ignore
//! use driftlight::prelude::*;
//!
//! fn main() -> Result<(), BackdropError> {
//!     Backdrop::from_preset(Preset::Neon)
//!         .with_seed(7)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Motion models
//!
//! A [`MotionModel`] decides how particles move each tick:
//!
//! - [`Wander`]: slow drift with wraparound at the edges and an alpha that
//!   pulses between zero and [`particle::ALPHA_MAX`].
//! - [`Gravity`]: constant downward acceleration, horizontal damping and
//!   inelastic bounces off all four walls.
//!
//! ### Mounting
//!
//! Any [`Canvas2d`] can host a backdrop. [`Backdrop::mount`] seeds the
//! particles for the surface width and asks the [`FrameScheduler`] for the
//! first refresh callback. Each accepted callback runs one step and one
//! render, then asks for the next.
//!
//! ```ignore
//! let mut scheduler = ManualScheduler::new();
//! let mut mounted = Backdrop::new()
//!     .mount(Some(PixelCanvas::new(800, 600)), 800, 600, &mut scheduler)
//!     .expect("surface available");
//!
//! while let Some(handle) = scheduler.take_pending() {
//!     mounted.frame(handle, now_ms(), &mut scheduler);
//! }
//! ```
//!
//! ### Visuals
//!
//! [`VisualConfig`] controls how frames are cleared, the optional gradient
//! wash, particle fill, radius and glow:
//!
//! ```ignore
//! Backdrop::new()
//!     .with_model(MotionModel::gravity())
//!     .with_visuals(|v| {
//!         v.trails(Color::rgba(15, 23, 42, 0.1))
//!             .solid_fill(Color::rgba(147, 51, 234, 0.8))
//!             .fixed_radius(3.0);
//!     })
//! ```
//!
//! ## Presets
//!
//! | Preset | Model | Clear | Look |
//! |--------|-------|-------|------|
//! | [`Preset::Classic`] | frame-locked wander | hard | violet, layer at 30% |
//! | [`Preset::Neon`] | time-scaled wander | hard + gradient | cyan with glow, layer at 50% |
//! | [`Preset::Physics`] | gravity | trails | solid violet discs, layer at 80% |

pub mod backdrop;
pub mod canvas;
pub mod config;
pub mod driver;
pub mod error;
mod gpu;
pub mod motion;
pub mod particle;
pub mod renderer;
pub mod spawn;
pub mod store;
pub mod time;
pub mod viewport;
pub mod visuals;
mod window;

pub use backdrop::{Backdrop, MountedBackdrop};
pub use canvas::{Canvas2d, PixelCanvas};
pub use config::{BackdropConfig, Preset};
pub use driver::{FrameHandle, FrameScheduler, LoopState, ManualScheduler, RenderLoop};
pub use error::{BackdropError, ConfigError, GpuError};
pub use glam::Vec2;
pub use motion::{DampingMode, Gravity, MotionModel, Wander};
pub use particle::{MotionTraits, Particle};
pub use renderer::Renderer;
pub use spawn::SpawnContext;
pub use store::ParticleStore;
pub use time::Time;
pub use viewport::Viewport;
pub use visuals::{Color, FrameClear, Glow, Gradient, ParticleFill, ParticleRadius, VisualConfig};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use driftlight::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backdrop::{Backdrop, MountedBackdrop};
    pub use crate::canvas::{Canvas2d, PixelCanvas};
    pub use crate::config::{BackdropConfig, Preset};
    pub use crate::driver::{FrameHandle, FrameScheduler, ManualScheduler};
    pub use crate::error::BackdropError;
    pub use crate::motion::{DampingMode, Gravity, MotionModel, Wander};
    pub use crate::particle::Particle;
    pub use crate::visuals::{Color, VisualConfig};
    pub use crate::Vec2;
}
