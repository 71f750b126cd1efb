//! Host time sources: a millisecond clock for the scheduler and a blocking
//! delay for the calibration sampler.

use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;

/// Milliseconds since program start.
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self { Self { start: Instant::now() } }

    #[inline]
    pub fn now_ms(&self) -> u64 { u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX) }
}

impl Default for MonotonicClock {
    fn default() -> Self { Self::new() }
}

/// `DelayNs` backed by `thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}
