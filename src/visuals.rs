//! Visual configuration for backdrop rendering.
//!
//! These options control how particles appear, separate from the motion
//! model that controls how they move.
//!
//! # Usage
//!
//! ```ignore
//! Backdrop::new()
//!     .with_model(MotionModel::gravity())
//!     .with_visuals(|v| {
//!         v.trails(Color::rgba(15, 23, 42, 0.1));
//!         v.solid_fill(Color::rgba(147, 51, 234, 0.8));
//!         v.fixed_radius(3.0);
//!     })
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Straight-alpha colour. Channels are sRGB-encoded in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Opacity.
    pub a: f32,
}

impl Color {
    /// Build a colour from 8-bit channels and an opacity, like CSS `rgba()`.
    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Opaque colour from 8-bit channels.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Same hue with a different opacity.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Component-wise linear interpolation, `t` in `0.0..=1.0`.
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Linear-light RGBA, as expected by sRGB render targets.
    pub fn to_linear(self) -> [f32; 4] {
        fn decode(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [decode(self.r), decode(self.g), decode(self.b), self.a]
    }
}

/// How the previous frame is removed before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FrameClear {
    /// Wipe the surface to transparent. Re-rendering is idempotent.
    #[default]
    Clear,
    /// Cover the surface with a translucent colour so earlier frames fade
    /// out gradually, leaving motion trails.
    Fade {
        /// Overlay colour; its alpha sets how fast trails fade.
        color: Color,
    },
}

/// Two-stop vertical gradient painted under the particles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    /// Colour at the top edge.
    pub top: Color,
    /// Colour at the bottom edge.
    pub bottom: Color,
}

impl Gradient {
    /// Colour at a normalized height (`0.0` = top, `1.0` = bottom).
    pub fn sample(&self, t: f32) -> Color {
        self.top.lerp(self.bottom, t)
    }
}

/// Soft halo drawn around each particle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Glow {
    /// Extent of the halo beyond the particle edge, in pixels.
    pub blur: f32,
    /// Halo tint.
    pub color: Color,
}

/// Particle fill colour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "color", rename_all = "snake_case")]
pub enum ParticleFill {
    /// Fixed hue; opacity taken from each particle's alpha. Particles
    /// without an alpha use the colour's own opacity.
    ParticleAlpha(Color),
    /// Fixed colour for every particle.
    Solid(Color),
}

impl ParticleFill {
    /// Resolve the fill for a particle with the given alpha.
    pub fn resolve(&self, particle_alpha: Option<f32>) -> Color {
        match (*self, particle_alpha) {
            (ParticleFill::ParticleAlpha(color), Some(alpha)) => color.with_alpha(alpha),
            (ParticleFill::ParticleAlpha(color), None) => color,
            (ParticleFill::Solid(color), _) => color,
        }
    }
}

/// Drawn particle radius.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "radius", rename_all = "snake_case")]
pub enum ParticleRadius {
    /// Use each particle's own size.
    #[default]
    Size,
    /// Same radius for every particle.
    Fixed(f32),
}

/// Rendering options for a backdrop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    /// Frame clear mode (hard clear or trail fade).
    pub clear: FrameClear,
    /// Optional gradient painted before particles.
    pub gradient: Option<Gradient>,
    /// Particle colour.
    pub fill: ParticleFill,
    /// Particle radius.
    pub radius: ParticleRadius,
    /// Optional per-particle glow.
    pub glow: Option<Glow>,
    /// Opacity of the whole backdrop layer over the page.
    pub layer_opacity: f32,
    /// Page colour behind the backdrop layer.
    pub page_color: Color,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            clear: FrameClear::Clear,
            gradient: None,
            fill: ParticleFill::ParticleAlpha(Color::rgb(168, 85, 247)),
            radius: ParticleRadius::Size,
            glow: None,
            layer_opacity: 1.0,
            page_color: Color::rgb(5, 5, 5),
        }
    }
}

impl VisualConfig {
    /// Create a new visual config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wipe the surface every frame.
    pub fn hard_clear(&mut self) -> &mut Self {
        self.clear = FrameClear::Clear;
        self
    }

    /// Leave motion trails by fading the previous frame with `color`.
    ///
    /// # Example
    ///
    /// ```ignore
    /// .with_visuals(|v| {
    ///     v.trails(Color::rgba(15, 23, 42, 0.1));
    /// })
    /// ```
    pub fn trails(&mut self, color: Color) -> &mut Self {
        self.clear = FrameClear::Fade { color };
        self
    }

    /// Paint a vertical gradient under the particles.
    pub fn gradient(&mut self, top: Color, bottom: Color) -> &mut Self {
        self.gradient = Some(Gradient { top, bottom });
        self
    }

    /// Fill particles with `color` at their own opacity.
    pub fn particle_color(&mut self, color: Color) -> &mut Self {
        self.fill = ParticleFill::ParticleAlpha(color);
        self
    }

    /// Fill every particle with the same colour.
    pub fn solid_fill(&mut self, color: Color) -> &mut Self {
        self.fill = ParticleFill::Solid(color);
        self
    }

    /// Draw every particle with the same radius.
    pub fn fixed_radius(&mut self, radius: f32) -> &mut Self {
        self.radius = ParticleRadius::Fixed(radius);
        self
    }

    /// Add a soft glow around particles.
    ///
    /// # Example
    ///
    /// ```ignore
    /// .with_visuals(|v| {
    ///     v.glow(8.0, Color::rgba(34, 211, 238, 0.4));
    /// })
    /// ```
    pub fn glow(&mut self, blur: f32, color: Color) -> &mut Self {
        self.glow = Some(Glow { blur, color });
        self
    }

    /// Set the backdrop layer opacity (`0.0..=1.0`).
    pub fn layer_opacity(&mut self, opacity: f32) -> &mut Self {
        self.layer_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set the page colour shown behind the backdrop.
    pub fn page_color(&mut self, color: Color) -> &mut Self {
        self.page_color = color;
        self
    }
}
