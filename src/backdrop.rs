//! Backdrop builder, mount lifecycle and runners.

use image::RgbaImage;

use crate::canvas::{Canvas2d, PixelCanvas};
use crate::config::{BackdropConfig, Preset};
use crate::driver::{FrameHandle, FrameScheduler, ManualScheduler, RenderLoop};
use crate::error::BackdropError;
use crate::motion::MotionModel;
use crate::particle::Particle;
use crate::renderer::Renderer;
use crate::spawn::SpawnContext;
use crate::store::ParticleStore;
use crate::viewport::Viewport;
use crate::visuals::VisualConfig;

/// An animated particle backdrop.
///
/// Use method chaining to configure, then either [`run`](Self::run) it in a
/// window, [`mount`](Self::mount) it on your own canvas and scheduler, or
/// [`render_snapshot`](Self::render_snapshot) it headlessly.
///
/// ```ignore
/// Backdrop::new()
///     .with_model(MotionModel::gravity())
///     .with_visuals(|v| {
///         v.trails(Color::rgba(15, 23, 42, 0.1));
///     })
///     .run()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    config: BackdropConfig,
}

impl Backdrop {
    /// Create a backdrop with the default preset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backdrop from a preset.
    pub fn from_preset(preset: Preset) -> Self {
        Self::from_config(BackdropConfig::from_preset(preset))
    }

    /// Create a backdrop from a full configuration.
    pub fn from_config(config: BackdropConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    /// Set the motion model.
    pub fn with_model(mut self, model: MotionModel) -> Self {
        self.config.model = model;
        self
    }

    /// Adjust visual settings.
    pub fn with_visuals<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&mut VisualConfig),
    {
        configure(&mut self.config.visuals);
        self
    }

    /// Seed a fixed number of particles instead of the model's default.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.config.particle_count = Some(count);
        self
    }

    /// Use a fixed RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the window title used by [`run`](Self::run).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = title.into();
        self
    }

    /// Set the initial window size used by [`run`](Self::run).
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.config.window_width = width;
        self.config.window_height = height;
        self
    }

    /// Attach to a drawing surface and start the render loop.
    ///
    /// `surface` is `None` when the host has no surface or no 2D context;
    /// the backdrop is then silently skipped: no particles, no callback.
    pub fn mount<C, S>(&self, surface: Option<C>, width: u32, height: u32, scheduler: &mut S) -> Option<MountedBackdrop<C>>
    where
        C: Canvas2d,
        S: FrameScheduler + ?Sized,
    {
        let Some(mut canvas) = surface else {
            log::debug!("no drawing surface available; backdrop disabled");
            return None;
        };

        let viewport = Viewport::attach(width, height, &mut canvas);
        let model = self.config.model;
        let mut spawn = SpawnContext::new(self.config.seed);
        let store = match self.config.particle_count {
            Some(count) => ParticleStore::create(&model, count, width, height, &mut spawn),
            None => ParticleStore::seed(&model, width, height, &mut spawn),
        };
        log::debug!(
            "mounted {} backdrop: {} particles on {}x{}",
            model.name(),
            store.len(),
            width,
            height
        );

        let mut mounted = MountedBackdrop {
            store,
            model,
            renderer: Renderer::new(self.config.visuals.clone()),
            viewport,
            canvas,
            render_loop: RenderLoop::new(),
        };
        mounted.render_loop.start(scheduler);
        Some(mounted)
    }

    /// Render `frames` frames headlessly and return the final image.
    ///
    /// Callbacks are delivered `frame_interval_ms` apart, starting at zero.
    pub fn render_snapshot(&self, width: u32, height: u32, frames: u32, frame_interval_ms: f64) -> Option<RgbaImage> {
        let mut scheduler = ManualScheduler::new();
        let mut mounted = self.mount(Some(PixelCanvas::new(width, height)), width, height, &mut scheduler)?;

        for i in 0..frames {
            let Some(handle) = scheduler.take_pending() else {
                break;
            };
            mounted.frame(handle, i as f64 * frame_interval_ms, &mut scheduler);
        }

        Some(mounted.unmount(&mut scheduler).into_image())
    }

    /// Open a window and animate until it is closed.
    pub fn run(self) -> Result<(), BackdropError> {
        crate::window::run(self.config)
    }
}

/// A backdrop attached to a surface with its loop running.
///
/// Owns the particle store exclusively; each accepted frame callback borrows
/// it once for the step and once for the render, in that order.
#[derive(Debug)]
pub struct MountedBackdrop<C: Canvas2d> {
    store: ParticleStore,
    model: MotionModel,
    renderer: Renderer,
    viewport: Viewport,
    canvas: C,
    render_loop: RenderLoop,
}

impl<C: Canvas2d> MountedBackdrop<C> {
    /// Deliver a refresh callback. Returns whether a frame was produced.
    pub fn frame<S: FrameScheduler + ?Sized>(&mut self, handle: FrameHandle, timestamp_ms: f64, scheduler: &mut S) -> bool {
        let Self {
            store,
            model,
            renderer,
            viewport,
            canvas,
            render_loop,
        } = self;

        render_loop.on_frame(handle, timestamp_ms, scheduler, |delta_ms| {
            model.step(store.particles_mut(), delta_ms, viewport.bounds());
            renderer.render(canvas, store.particles());
        })
    }

    /// Apply a host resize. Particles are left where they are.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height, &mut self.canvas);
    }

    /// Stop the loop and hand the surface back.
    pub fn unmount<S: FrameScheduler + ?Sized>(mut self, scheduler: &mut S) -> C {
        self.render_loop.stop(scheduler);
        log::debug!("unmounted {} backdrop", self.model.name());
        self.canvas
    }

    /// Current particle state.
    pub fn particles(&self) -> &[Particle] {
        self.store.particles()
    }

    /// The drawing surface.
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Tracked surface size.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The render loop driving this backdrop.
    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_without_surface_is_noop() {
        let mut scheduler = ManualScheduler::new();
        let mounted = Backdrop::new().mount::<PixelCanvas, _>(None, 800, 600, &mut scheduler);
        assert!(mounted.is_none());
        assert_eq!(scheduler.requested(), 0);
    }

    #[test]
    fn test_mount_seeds_and_schedules() {
        let mut scheduler = ManualScheduler::new();
        let mounted = Backdrop::new()
            .with_seed(1)
            .mount(Some(PixelCanvas::new(1, 1)), 1024, 768, &mut scheduler)
            .unwrap();

        assert_eq!(mounted.particles().len(), 100);
        assert_eq!(mounted.canvas().width(), 1024);
        assert!(mounted.render_loop().is_running());
        assert_eq!(scheduler.requested(), 1);
    }

    #[test]
    fn test_particle_count_override() {
        let mut scheduler = ManualScheduler::new();
        let mounted = Backdrop::from_preset(Preset::Physics)
            .with_particle_count(7)
            .mount(Some(PixelCanvas::new(1, 1)), 200, 200, &mut scheduler)
            .unwrap();
        assert_eq!(mounted.particles().len(), 7);
    }

    #[test]
    fn test_snapshot_dimensions() {
        let image = Backdrop::from_preset(Preset::Neon)
            .with_seed(9)
            .render_snapshot(64, 48, 3, 16.66)
            .unwrap();
        assert_eq!(image.dimensions(), (64, 48));
    }

    #[test]
    fn test_snapshot_is_reproducible_with_seed() {
        let backdrop = Backdrop::from_preset(Preset::Classic).with_seed(21);
        let a = backdrop.render_snapshot(80, 60, 5, 16.0).unwrap();
        let b = backdrop.render_snapshot(80, 60, 5, 16.0).unwrap();
        assert_eq!(a, b);
    }
}
