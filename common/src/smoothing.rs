//! Exponential smoothing of the displayed pressure and adaptive update rate.
//!
//! The needle follows `smoothed = 0.90 * smoothed + 0.10 * psi`. When the
//! smoothed value moved by more than [`FAST_UPDATE_THRESHOLD_PSI`] in the last
//! update, the scheduler switches to the fast interval so the needle keeps up
//! with transients; otherwise it stays at the steady-state rate.

use crate::config::{FAST_UPDATE_INTERVAL_MS, FAST_UPDATE_THRESHOLD_PSI, SMOOTHING_RETAIN, UPDATE_INTERVAL_MS};

/// Exponential moving average over psi, starting at 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Smoother {
    smoothed: f32,
    previous: f32,
}

impl Smoother {
    pub const fn new() -> Self {
        Self {
            smoothed: 0.0,
            previous: 0.0,
        }
    }

    /// Fold a new psi reading into the average and return the new value.
    pub fn update(
        &mut self,
        psi: f32,
    ) -> f32 {
        self.previous = self.smoothed;
        self.smoothed = SMOOTHING_RETAIN * self.smoothed + (1.0 - SMOOTHING_RETAIN) * psi;
        self.smoothed
    }

    /// Current smoothed psi.
    #[inline]
    pub const fn value(&self) -> f32 { self.smoothed }

    /// How far the smoothed value moved in the last update.
    #[inline]
    pub fn change_magnitude(&self) -> f32 { (self.smoothed - self.previous).abs() }

    /// Update interval to use given the last change.
    #[inline]
    pub fn interval_ms(&self) -> u64 { select_interval(self.change_magnitude()) }
}

/// Pick the update interval for a given smoothed-psi change.
///
/// The threshold itself stays on the slow side.
#[inline]
pub fn select_interval(change: f32) -> u64 {
    if change > FAST_UPDATE_THRESHOLD_PSI {
        FAST_UPDATE_INTERVAL_MS
    } else {
        UPDATE_INTERVAL_MS
    }
}
