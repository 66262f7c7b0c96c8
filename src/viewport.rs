//! Viewport adapter: tracks the drawing surface size.
//!
//! Resizing only changes dimensions. Particles are never reseeded or
//! rescaled; anything left outside the new bounds is brought back by the
//! motion model's own boundary policy.

use glam::Vec2;

use crate::canvas::Canvas2d;

/// Current surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Start tracking the host's current size and size the canvas to match.
    pub fn attach<C: Canvas2d + ?Sized>(width: u32, height: u32, canvas: &mut C) -> Self {
        canvas.set_size(width, height);
        Self { width, height }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as a vector, the upper bound for particle positions.
    #[inline]
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Apply a host resize. The canvas is resized, which clears it.
    ///
    /// Zero-area sizes (a minimised window) are ignored so the motion
    /// models never see empty bounds.
    pub fn resize<C: Canvas2d + ?Sized>(&mut self, width: u32, height: u32, canvas: &mut C) {
        if width == 0 || height == 0 {
            log::debug!("ignoring zero-area resize {}x{}", width, height);
            return;
        }
        log::debug!("viewport resized {}x{} -> {}x{}", self.width, self.height, width, height);
        self.width = width;
        self.height = height;
        canvas.set_size(width, height);
    }
}
