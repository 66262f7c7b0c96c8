//! 2D drawing surface.
//!
//! [`Canvas2d`] is the small set of immediate-mode primitives the renderer
//! needs. [`PixelCanvas`] implements it in software over an
//! [`image::RgbaImage`], which the window host uploads to the GPU and the
//! snapshot path writes to disk.

use image::{Rgba, RgbaImage};

use crate::visuals::{Color, Glow, Gradient};

/// Immediate-mode 2D drawing surface.
///
/// Coordinates are in pixels with the origin at the top-left corner.
pub trait Canvas2d {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// Resize the surface. Always discards the current pixel contents.
    fn set_size(&mut self, width: u32, height: u32);

    /// Reset a rectangle to transparent.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Blend a solid colour over a rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Blend a vertical gradient over a rectangle; the gradient spans the
    /// rectangle from its top edge to its bottom edge.
    fn fill_rect_gradient(&mut self, x: f32, y: f32, width: f32, height: f32, gradient: &Gradient);

    /// Blend a filled circle, with the current shadow underneath.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color);

    /// Set or remove the shadow applied to subsequent circles.
    fn set_shadow(&mut self, glow: Option<Glow>);
}

/// Software canvas backed by an RGBA8 image with straight alpha.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    image: RgbaImage,
    shadow: Option<Glow>,
}

impl PixelCanvas {
    /// Create a transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            shadow: None,
        }
    }

    /// Current pixel contents.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consume the canvas, returning its pixels.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Read a single pixel, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Integer pixel span covering `[start, start + len)`, clipped to `max`.
    fn span(start: f32, len: f32, max: u32) -> std::ops::Range<u32> {
        let lo = start.floor().clamp(0.0, max as f32) as u32;
        let hi = (start + len).ceil().clamp(0.0, max as f32) as u32;
        lo..hi.max(lo)
    }

    fn draw_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        // Sub-pixel discs are spread over a half-pixel footprint and dimmed
        // by their area so they stay visible.
        let footprint = radius.max(0.5);
        let weight = (radius / footprint).powi(2);
        let xs = Self::span(cx - radius - 1.0, 2.0 * radius + 2.0, self.image.width());
        let ys = Self::span(cy - radius - 1.0, 2.0 * radius + 2.0, self.image.height());
        for py in ys {
            for px in xs.clone() {
                let d = distance(px, py, cx, cy);
                let coverage = (footprint + 0.5 - d).clamp(0.0, 1.0) * weight;
                if coverage > 0.0 {
                    blend(self.image.get_pixel_mut(px, py), color, coverage);
                }
            }
        }
    }

    fn draw_halo(&mut self, cx: f32, cy: f32, radius: f32, glow: Glow) {
        if glow.blur <= 0.0 || glow.color.a <= 0.0 {
            return;
        }
        let outer = radius + glow.blur;
        let xs = Self::span(cx - outer, 2.0 * outer, self.image.width());
        let ys = Self::span(cy - outer, 2.0 * outer, self.image.height());
        for py in ys {
            for px in xs.clone() {
                let d = distance(px, py, cx, cy);
                if d >= outer {
                    continue;
                }
                let falloff = if d <= radius {
                    1.0
                } else {
                    1.0 - (d - radius) / glow.blur
                };
                blend(self.image.get_pixel_mut(px, py), glow.color, falloff);
            }
        }
    }
}

impl Canvas2d for PixelCanvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let xs = Self::span(x, width, self.image.width());
        for py in Self::span(y, height, self.image.height()) {
            for px in xs.clone() {
                self.image.put_pixel(px, py, Rgba([0, 0, 0, 0]));
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let xs = Self::span(x, width, self.image.width());
        for py in Self::span(y, height, self.image.height()) {
            for px in xs.clone() {
                blend(self.image.get_pixel_mut(px, py), color, 1.0);
            }
        }
    }

    fn fill_rect_gradient(&mut self, x: f32, y: f32, width: f32, height: f32, gradient: &Gradient) {
        if height <= 0.0 {
            return;
        }
        let xs = Self::span(x, width, self.image.width());
        for py in Self::span(y, height, self.image.height()) {
            let color = gradient.sample((py as f32 + 0.5 - y) / height);
            for px in xs.clone() {
                blend(self.image.get_pixel_mut(px, py), color, 1.0);
            }
        }
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        if radius.is_nan() || radius <= 0.0 || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        if let Some(glow) = self.shadow {
            self.draw_halo(cx, cy, radius, glow);
        }
        self.draw_disc(cx, cy, radius, color);
    }

    fn set_shadow(&mut self, glow: Option<Glow>) {
        self.shadow = glow;
    }
}

/// Distance from the centre of pixel `(px, py)` to `(cx, cy)`.
#[inline]
fn distance(px: u32, py: u32, cx: f32, cy: f32) -> f32 {
    let dx = px as f32 + 0.5 - cx;
    let dy = py as f32 + 0.5 - cy;
    (dx * dx + dy * dy).sqrt()
}

/// Source-over compositing in straight alpha.
fn blend(dst: &mut Rgba<u8>, src: Color, coverage: f32) {
    let sa = src.a * coverage;
    if sa <= 0.0 {
        return;
    }
    let [dr, dg, db, da] = dst.0.map(|c| c as f32 / 255.0);
    let out_a = sa + da * (1.0 - sa);
    let mix = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;
    dst.0 = [
        to_u8(mix(src.r, dr)),
        to_u8(mix(src.g, dg)),
        to_u8(mix(src.b, db)),
        to_u8(out_a),
    ];
}

#[inline]
fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = PixelCanvas::new(4, 3);
        assert_eq!(canvas.width(), 4);
        assert_eq!(canvas.height(), 3);
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_set_size_discards_pixels() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.fill_rect(0.0, 0.0, 8.0, 8.0, Color::rgb(255, 0, 0));
        canvas.set_size(8, 8);
        assert_eq!(canvas.pixel(3, 3), Some([0, 0, 0, 0]));

        canvas.set_size(16, 2);
        assert_eq!((canvas.width(), canvas.height()), (16, 2));
    }

    #[test]
    fn test_opaque_fill_and_clear() {
        let mut canvas = PixelCanvas::new(10, 10);
        canvas.fill_rect(0.0, 0.0, 10.0, 10.0, Color::rgb(10, 20, 30));
        assert_eq!(canvas.pixel(9, 9), Some([10, 20, 30, 255]));

        canvas.clear_rect(0.0, 0.0, 5.0, 10.0);
        assert_eq!(canvas.pixel(4, 0), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(5, 0), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_translucent_fill_accumulates() {
        let mut canvas = PixelCanvas::new(2, 2);
        let veil = Color::rgba(15, 23, 42, 0.1);
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0, veil);
        let first = canvas.pixel(0, 0).unwrap()[3];
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0, veil);
        let second = canvas.pixel(0, 0).unwrap()[3];
        assert!(second > first);
    }

    #[test]
    fn test_circle_covers_centre_not_far_pixels() {
        let mut canvas = PixelCanvas::new(20, 20);
        canvas.fill_circle(10.0, 10.0, 3.0, Color::rgb(255, 255, 255));
        assert_eq!(canvas.pixel(10, 10), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(canvas.pixel(10, 16), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_sub_pixel_circle_is_partial() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_circle(2.0, 2.0, 0.2, Color::rgb(255, 255, 255));
        let alpha = canvas.pixel(1, 1).unwrap()[3];
        assert!(alpha > 0 && alpha < 255);
    }

    #[test]
    fn test_circle_off_surface_is_clipped() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.fill_circle(-50.0, -50.0, 3.0, Color::rgb(255, 0, 0));
        canvas.fill_circle(0.0, 0.0, 2.0, Color::rgb(255, 0, 0));
        assert_eq!(canvas.pixel(0, 0).unwrap()[0], 255);
    }

    #[test]
    fn test_shadow_extends_beyond_radius() {
        let mut plain = PixelCanvas::new(30, 30);
        plain.fill_circle(15.0, 15.0, 2.0, Color::rgb(34, 211, 238));

        let mut glowing = PixelCanvas::new(30, 30);
        glowing.set_shadow(Some(Glow {
            blur: 8.0,
            color: Color::rgba(34, 211, 238, 0.4),
        }));
        glowing.fill_circle(15.0, 15.0, 2.0, Color::rgb(34, 211, 238));

        assert_eq!(plain.pixel(20, 15).unwrap()[3], 0);
        assert!(glowing.pixel(20, 15).unwrap()[3] > 0);
    }

    #[test]
    fn test_gradient_rows_differ() {
        let mut canvas = PixelCanvas::new(2, 10);
        let gradient = Gradient {
            top: Color::rgb(0, 0, 0),
            bottom: Color::rgb(255, 255, 255),
        };
        canvas.fill_rect_gradient(0.0, 0.0, 2.0, 10.0, &gradient);
        let top = canvas.pixel(0, 0).unwrap()[0];
        let bottom = canvas.pixel(0, 9).unwrap()[0];
        assert!(top < 20);
        assert!(bottom > 235);
    }
}
