//! Desktop host: a winit window whose redraw requests drive the render loop.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::backdrop::{Backdrop, MountedBackdrop};
use crate::canvas::PixelCanvas;
use crate::config::BackdropConfig;
use crate::driver::{FrameHandle, FrameScheduler};
use crate::error::BackdropError;
use crate::gpu::GpuState;

/// Refresh callbacks backed by window redraw requests.
///
/// A redraw cannot be withdrawn once requested, so cancelling only forgets
/// the handle; the render loop ignores the late callback.
#[derive(Default)]
struct WindowScheduler {
    window: Option<Arc<Window>>,
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

struct App {
    backdrop: Backdrop,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    mounted: Option<MountedBackdrop<PixelCanvas>>,
    scheduler: WindowScheduler,
    clock: Instant,
    error: Option<BackdropError>,
}

impl App {
    fn new(config: BackdropConfig) -> Self {
        Self {
            backdrop: Backdrop::from_config(config),
            window: None,
            gpu_state: None,
            mounted: None,
            scheduler: WindowScheduler::default(),
            clock: Instant::now(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), BackdropError> {
        let config = self.backdrop.config();
        let window_attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(config.window_width, config.window_height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone(), &config.visuals))?;

        let size = window.inner_size();
        self.scheduler.window = Some(window.clone());
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        self.mounted = self.backdrop.mount(
            Some(PixelCanvas::new(size.width, size.height)),
            size.width,
            size.height,
            &mut self.scheduler,
        );
        Ok(())
    }

    fn timestamp_ms(&self) -> f64 {
        self.clock.elapsed().as_secs_f64() * 1000.0
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mounted) = self.mounted.take() {
            mounted.unmount(&mut self.scheduler);
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
                if let Some(mounted) = &mut self.mounted {
                    mounted.resize(physical_size.width, physical_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let timestamp_ms = self.timestamp_ms();
                let Some(handle) = self.scheduler.pending.take() else {
                    return;
                };
                let (Some(mounted), Some(gpu_state)) = (&mut self.mounted, &mut self.gpu_state) else {
                    return;
                };

                if !mounted.frame(handle, timestamp_ms, &mut self.scheduler) {
                    return;
                }

                gpu_state.upload(mounted.canvas().image());
                match gpu_state.render() {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => gpu_state.resize(winit::dpi::PhysicalSize {
                        width: gpu_state.config.width,
                        height: gpu_state.config.height,
                    }),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("GPU out of memory, closing");
                        self.shutdown(event_loop);
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
            _ => {}
        }
    }
}

/// Open a window and animate the backdrop until it is closed.
pub(crate) fn run(config: BackdropConfig) -> Result<(), BackdropError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
