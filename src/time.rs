//! Frame timing from host timestamps.
//!
//! Refresh callbacks carry a high-resolution timestamp in milliseconds. The
//! [`Time`] tracker turns those into per-frame deltas, a frame counter and a
//! periodically refreshed FPS figure.
//!
//! # Example
//!
//! ```ignore
//! use driftlight::time::Time;
//!
//! let mut time = Time::new();
//!
//! // In a refresh callback:
//! let delta_ms = time.tick(timestamp_ms);
//!
//! log::trace!("frame {} after {:.2}ms ({:.1} fps)", time.frame(), delta_ms, time.fps());
//! ```

/// Time tracking for the render loop.
///
/// The first tick only establishes the baseline and reports a delta of zero.
#[derive(Debug, Clone)]
pub struct Time {
    /// Timestamp of the first tick.
    start: Option<f64>,
    /// Timestamp of the most recent tick.
    last_frame: Option<f64>,
    /// Milliseconds since the first tick.
    elapsed_ms: f64,
    /// Milliseconds since the previous tick.
    delta_ms: f32,
    /// Total ticks since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Timestamp of last FPS calculation.
    fps_update_time: f64,
    /// How often to update the FPS figure, in milliseconds.
    fps_update_interval_ms: f64,
}

impl Time {
    /// Create a tracker with no baseline.
    pub fn new() -> Self {
        Self {
            start: None,
            last_frame: None,
            elapsed_ms: 0.0,
            delta_ms: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: 0.0,
            fps_update_interval_ms: 500.0,
        }
    }

    /// Record a refresh callback and return the delta in milliseconds.
    ///
    /// Timestamps that go backwards yield a zero delta.
    pub fn tick(&mut self, timestamp_ms: f64) -> f32 {
        let start = *self.start.get_or_insert(timestamp_ms);
        if self.frame_count == 0 {
            // The baseline tick opens the first FPS window.
            self.fps_update_time = timestamp_ms;
            self.fps_frame_count = 1;
        }

        self.delta_ms = match self.last_frame {
            Some(last) => (timestamp_ms - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_frame = Some(timestamp_ms);
        self.elapsed_ms = (timestamp_ms - start).max(0.0);
        self.frame_count += 1;

        let fps_elapsed = timestamp_ms - self.fps_update_time;
        if fps_elapsed >= self.fps_update_interval_ms {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = (frames_since as f64 * 1000.0 / fps_elapsed) as f32;
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = timestamp_ms;
        }

        self.delta_ms
    }

    /// Milliseconds since the first tick.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Milliseconds between the two most recent ticks.
    #[inline]
    pub fn delta_ms(&self) -> f32 {
        self.delta_ms
    }

    /// Total ticks since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Forget the baseline; the next tick reports a zero delta again.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.delta_ms(), 0.0);
    }

    #[test]
    fn test_first_tick_is_baseline() {
        let mut time = Time::new();
        assert_eq!(time.tick(12_345.0), 0.0);
        assert_eq!(time.frame(), 1);
        assert_eq!(time.elapsed_ms(), 0.0);
    }

    #[test]
    fn test_tick_delta() {
        let mut time = Time::new();
        time.tick(1000.0);
        let delta = time.tick(1016.5);
        assert!((delta - 16.5).abs() < 1e-4);
        assert_eq!(time.elapsed_ms(), 16.5);
        assert_eq!(time.frame(), 2);
    }

    #[test]
    fn test_backwards_timestamp_is_zero_delta() {
        let mut time = Time::new();
        time.tick(100.0);
        assert_eq!(time.tick(90.0), 0.0);
    }

    #[test]
    fn test_fps_estimate() {
        let mut time = Time::new();
        for i in 0..=60 {
            time.tick(i as f64 * 1000.0 / 60.0);
        }
        assert!((time.fps() - 60.0).abs() < 2.0);
    }

    #[test]
    fn test_reset() {
        let mut time = Time::new();
        time.tick(0.0);
        time.tick(16.0);
        time.reset();
        assert_eq!(time.frame(), 0);
        assert_eq!(time.tick(500.0), 0.0);
    }
}
