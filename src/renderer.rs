//! Draws the current particle state onto a [`Canvas2d`].
//!
//! The renderer never keeps particle data between calls; every frame it is
//! handed the store's current slice.

use crate::canvas::Canvas2d;
use crate::particle::Particle;
use crate::visuals::{FrameClear, ParticleRadius, VisualConfig};

/// Paints particles according to a [`VisualConfig`].
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    visuals: VisualConfig,
}

impl Renderer {
    /// Create a renderer for the given visuals.
    pub fn new(visuals: VisualConfig) -> Self {
        Self { visuals }
    }

    /// Visual settings in use.
    pub fn visuals(&self) -> &VisualConfig {
        &self.visuals
    }

    /// Draw one frame.
    ///
    /// With [`FrameClear::Clear`] the output depends only on the particles
    /// and the surface size. With [`FrameClear::Fade`] earlier frames show
    /// through, so repeated calls accumulate.
    pub fn render<C: Canvas2d>(&self, canvas: &mut C, particles: &[Particle]) {
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);

        match self.visuals.clear {
            FrameClear::Clear => canvas.clear_rect(0.0, 0.0, w, h),
            FrameClear::Fade { color } => canvas.fill_rect(0.0, 0.0, w, h, color),
        }

        if let Some(gradient) = &self.visuals.gradient {
            canvas.fill_rect_gradient(0.0, 0.0, w, h, gradient);
        }

        canvas.set_shadow(self.visuals.glow);
        for p in particles {
            let radius = match self.visuals.radius {
                ParticleRadius::Size => p.size(),
                ParticleRadius::Fixed(r) => r,
            };
            let color = self.visuals.fill.resolve(p.alpha());
            canvas.fill_circle(p.position.x, p.position.y, radius, color);
        }
        canvas.set_shadow(None);
    }
}
