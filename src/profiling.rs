//! Profiling metrics for the scheduler loop.
//!
//! Tracks how long composing and presenting a gauge frame takes, and how the
//! loop's passes split between drawn frames, idle passes (interval not yet
//! elapsed) and faulted passes (sensor out of range).
//!
//! # Usage
//!
//! ```ignore
//! let mut metrics = ProfilingMetrics::new();
//!
//! // In main loop:
//! let pass_start = Instant::now();
//! match scheduler.run_pass(now_ms, &mut composer)? {
//!     Poll::Frame(_) => metrics.record_frame(pass_start.elapsed()),
//!     Poll::Idle => metrics.record_idle(),
//!     Poll::Fault(_) => metrics.record_fault(),
//! }
//! ```

use std::time::{Duration, Instant};

use boost_gauge_common::Poll;
use boost_gauge_common::profiling::format_clock;
use heapless::String;

/// Frame timing and pass counters.
pub struct ProfilingMetrics {
    /// Compose + present time of the last drawn frame.
    pub frame_time_us: u32,
    /// Fastest frame observed.
    pub frame_time_min_us: u32,
    /// Slowest frame observed.
    pub frame_time_max_us: u32,
    /// Exponential moving average of the frame time.
    frame_time_avg_us: f32,

    /// Passes that drew a frame.
    pub total_frames: u64,
    /// Passes where the update interval had not elapsed.
    pub idle_passes: u64,
    /// Passes skipped because the sensor read out of range.
    pub fault_passes: u64,

    start_time: Instant,
}

impl ProfilingMetrics {
    /// Exponential moving average alpha.
    const EMA_ALPHA: f32 = 0.1;

    /// Create new profiling metrics, starting the uptime timer.
    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            idle_passes: 0,
            fault_passes: 0,
            start_time: Instant::now(),
        }
    }

    /// Record a drawn frame and how long it took.
    pub fn record_frame(
        &mut self,
        frame_time: Duration,
    ) {
        let us = u32::try_from(frame_time.as_micros()).unwrap_or(u32::MAX);

        self.frame_time_us = us;
        self.frame_time_min_us = self.frame_time_min_us.min(us);
        self.frame_time_max_us = self.frame_time_max_us.max(us);

        if self.total_frames == 0 {
            self.frame_time_avg_us = us as f32;
        } else {
            self.frame_time_avg_us = Self::EMA_ALPHA.mul_add(us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us);
        }

        self.total_frames += 1;
    }

    #[inline]
    pub const fn record_idle(&mut self) { self.idle_passes += 1; }

    #[inline]
    pub const fn record_fault(&mut self) { self.fault_passes += 1; }

    /// Record the outcome of one scheduler pass.
    pub fn record_pass(
        &mut self,
        poll: &Poll,
        pass_time: Duration,
    ) {
        match poll {
            Poll::Idle => self.record_idle(),
            Poll::Fault(_) => self.record_fault(),
            Poll::Frame(_) => self.record_frame(pass_time),
        }
    }

    /// Fastest frame in microseconds, 0 before the first frame.
    #[inline]
    pub const fn frame_time_min_or_zero_us(&self) -> u32 {
        if self.frame_time_min_us == u32::MAX { 0 } else { self.frame_time_min_us }
    }

    /// Average frame time in microseconds.
    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 { self.frame_time_avg_us as u32 }

    /// Uptime since metrics were created.
    #[inline]
    pub fn uptime(&self) -> Duration { self.start_time.elapsed() }

    /// Uptime as `HH:MM:SS`.
    pub fn uptime_string(&self) -> String<12> { format_clock(self.uptime().as_secs()) }
}

impl Default for ProfilingMetrics {
    fn default() -> Self { Self::new() }
}
