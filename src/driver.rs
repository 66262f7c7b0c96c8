//! Render loop driver.
//!
//! The loop is a two-state machine bound to a host's refresh-synchronised
//! callback facility:
//!
//! ```text
//!   Idle ──start──▶ Running(handle) ──callback(handle)──▶ Running(next)
//!    ▲                    │
//!    └───────stop─────────┘   (pending handle cancelled)
//! ```
//!
//! Each accepted callback runs exactly one simulation step followed by one
//! render and then requests the next callback. There is no pause and no
//! frame budget.

use crate::time::Time;

/// Identifies one requested refresh callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host facility that delivers a callback before the next display refresh.
pub trait FrameScheduler {
    /// Request a callback; the host later reports it with the returned handle.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a previously requested callback.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// No callback pending.
    #[default]
    Idle,
    /// Exactly one callback pending.
    Running(FrameHandle),
}

/// Schedules step + render passes, one per refresh callback.
#[derive(Debug, Default)]
pub struct RenderLoop {
    state: LoopState,
    time: Time,
}

impl RenderLoop {
    /// Create an idle loop.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Whether a callback is pending.
    pub fn is_running(&self) -> bool {
        matches!(self.state, LoopState::Running(_))
    }

    /// Frame timing.
    pub fn time(&self) -> &Time {
        &self.time
    }

    /// Idle → Running. Does nothing if already running.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let LoopState::Idle = self.state {
            self.time.reset();
            let handle = scheduler.request_frame();
            log::debug!("render loop started (frame {:?})", handle);
            self.state = LoopState::Running(handle);
        }
    }

    /// Cancel the pending callback and go idle.
    pub fn stop<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let LoopState::Running(handle) = self.state {
            scheduler.cancel_frame(handle);
            log::debug!(
                "render loop stopped after {} frames ({:.1}s)",
                self.time.frame(),
                self.time.elapsed_ms() / 1000.0
            );
        }
        self.state = LoopState::Idle;
    }

    /// Handle a refresh callback.
    ///
    /// Runs `frame` with the elapsed milliseconds since the previous accepted
    /// callback (zero for the first), then requests the next callback.
    /// Callbacks for handles other than the pending one are ignored, so
    /// nothing runs after [`stop`](Self::stop). Returns whether `frame` ran.
    pub fn on_frame<S, F>(&mut self, handle: FrameHandle, timestamp_ms: f64, scheduler: &mut S, frame: F) -> bool
    where
        S: FrameScheduler + ?Sized,
        F: FnOnce(f32),
    {
        match self.state {
            LoopState::Running(pending) if pending == handle => {}
            _ => {
                log::trace!("ignoring stale frame callback {:?}", handle);
                return false;
            }
        }

        let delta_ms = self.time.tick(timestamp_ms);
        log::trace!(
            "frame {} after {:.2}ms ({:.1} fps)",
            self.time.frame(),
            self.time.delta_ms(),
            self.time.fps()
        );
        frame(delta_ms);

        self.state = LoopState::Running(scheduler.request_frame());
        true
    }
}

/// Scheduler driven by hand: headless rendering and tests pump callbacks
/// explicitly.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl ManualScheduler {
    /// Create a scheduler with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending callback, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Remove and return the pending callback so it can be delivered.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Total callbacks requested.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total callbacks cancelled.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_schedules_one_frame() {
        let mut scheduler = ManualScheduler::new();
        let mut render_loop = RenderLoop::new();
        assert_eq!(render_loop.state(), LoopState::Idle);

        render_loop.start(&mut scheduler);
        render_loop.start(&mut scheduler);
        assert!(render_loop.is_running());
        assert_eq!(scheduler.requested(), 1);
        assert!(scheduler.pending().is_some());
    }

    #[test]
    fn test_each_callback_reschedules() {
        let mut scheduler = ManualScheduler::new();
        let mut render_loop = RenderLoop::new();
        render_loop.start(&mut scheduler);

        let mut deltas = Vec::new();
        for ts in [100.0, 116.0, 133.0] {
            let handle = scheduler.take_pending().unwrap();
            assert!(render_loop.on_frame(handle, ts, &mut scheduler, |d| deltas.push(d)));
            assert!(scheduler.pending().is_some());
        }
        assert_eq!(deltas, vec![0.0, 16.0, 17.0]);
        assert_eq!(scheduler.requested(), 4);
    }

    #[test]
    fn test_stop_cancels_and_blocks_late_callbacks() {
        let mut scheduler = ManualScheduler::new();
        let mut render_loop = RenderLoop::new();
        render_loop.start(&mut scheduler);
        let handle = scheduler.pending().unwrap();

        render_loop.stop(&mut scheduler);
        assert_eq!(render_loop.state(), LoopState::Idle);
        assert_eq!(scheduler.pending(), None);
        assert_eq!(scheduler.cancelled(), 1);

        let mut ran = false;
        assert!(!render_loop.on_frame(handle, 10.0, &mut scheduler, |_| ran = true));
        assert!(!ran);
        assert_eq!(scheduler.pending(), None);
    }

    #[test]
    fn test_stale_handle_ignored_while_running() {
        let mut scheduler = ManualScheduler::new();
        let mut render_loop = RenderLoop::new();
        render_loop.start(&mut scheduler);

        let mut ran = false;
        assert!(!render_loop.on_frame(FrameHandle(999), 0.0, &mut scheduler, |_| ran = true));
        assert!(!ran);
        assert_eq!(scheduler.requested(), 1);
    }

    #[test]
    fn test_accepted_callbacks_drive_frame_timing() {
        let mut scheduler = ManualScheduler::new();
        let mut render_loop = RenderLoop::new();
        render_loop.start(&mut scheduler);

        for i in 0..=30 {
            let handle = scheduler.take_pending().unwrap();
            render_loop.on_frame(handle, 1000.0 + i as f64 * 20.0, &mut scheduler, |_| {});
        }
        render_loop.on_frame(FrameHandle(0), 5000.0, &mut scheduler, |_| {});

        let time = render_loop.time();
        assert_eq!(time.frame(), 31);
        assert_eq!(time.delta_ms(), 20.0);
        assert_eq!(time.elapsed_ms(), 600.0);
        assert!((time.fps() - 50.0).abs() < 0.5);
    }

    #[test]
    fn test_restart_resets_timing_baseline() {
        let mut scheduler = ManualScheduler::new();
        let mut render_loop = RenderLoop::new();
        render_loop.start(&mut scheduler);
        let h = scheduler.take_pending().unwrap();
        render_loop.on_frame(h, 50.0, &mut scheduler, |_| {});
        render_loop.stop(&mut scheduler);

        render_loop.start(&mut scheduler);
        let h = scheduler.take_pending().unwrap();
        let mut delta = -1.0;
        render_loop.on_frame(h, 5000.0, &mut scheduler, |d| delta = d);
        assert_eq!(delta, 0.0);
    }
}
