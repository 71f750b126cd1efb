//! Update scheduling: the single owner of all per-pass gauge state.
//!
//! # Pass Lifecycle
//!
//! The host calls [`GaugeScheduler::run_pass`] in a loop and yields between
//! calls. Each pass either:
//!
//! - does nothing, because the adaptive interval has not elapsed yet
//! - acquires a sample that turns out to be out of range: the frame is
//!   skipped and the last update time is left alone, so the very next pass
//!   retries immediately
//! - acquires a valid sample: clamp, convert, smooth, stamp the update time,
//!   then compose and present a frame
//!
//! # Fault Logging
//!
//! A permanently disconnected sensor fails on every pass. Only the transition
//! into the fault state is logged at warn level (and recovery at info level),
//! so the log is not flooded at loop speed. Every failed pass still increments
//! the fault counter.

use log::{info, warn};

use crate::composer::{FrameComposer, FramePresenter, GaugeReadout};
use crate::geometry::GaugeGeometry;
use crate::signal::{SensorRangeError, SignalSource};
use crate::smoothing::Smoother;
use crate::units::{bar_to_psi, clamp_bar};

/// Outcome of one scheduler poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Poll {
    /// Interval not yet elapsed; nothing was done.
    Idle,
    /// Acquisition failed; the frame is skipped.
    Fault(SensorRangeError),
    /// A new frame should be drawn for this readout.
    Frame(GaugeReadout),
}

/// Owns the signal source, smoother, geometry cache and timing state.
pub struct GaugeScheduler<S: SignalSource> {
    source: S,
    smoother: Smoother,
    geometry: GaugeGeometry,
    last_update_ms: u64,
    last_readout: Option<GaugeReadout>,
    in_fault: bool,
    fault_count: u32,
    frame_count: u32,
}

impl<S: SignalSource> GaugeScheduler<S> {
    /// Build the scheduler and its geometry cache.
    ///
    /// `start_ms` is the current time; the first frame is due one interval
    /// after it.
    pub fn new(
        source: S,
        start_ms: u64,
    ) -> Self {
        Self {
            source,
            smoother: Smoother::new(),
            geometry: GaugeGeometry::new(),
            last_update_ms: start_ms,
            last_readout: None,
            in_fault: false,
            fault_count: 0,
            frame_count: 0,
        }
    }

    /// Interval currently in effect.
    #[inline]
    pub fn interval_ms(&self) -> u64 { self.smoother.interval_ms() }

    /// Whether enough time has passed since the last successful update.
    #[inline]
    pub fn is_ready(
        &self,
        now_ms: u64,
    ) -> bool {
        now_ms.saturating_sub(self.last_update_ms) >= self.interval_ms()
    }

    /// Run the acquisition half of a pass without drawing.
    pub fn poll(
        &mut self,
        now_ms: u64,
    ) -> Poll {
        if !self.is_ready(now_ms) {
            return Poll::Idle;
        }

        let sample = match self.source.acquire() {
            Ok(sample) => sample,
            Err(err) => {
                self.fault_count = self.fault_count.saturating_add(1);
                if !self.in_fault {
                    self.in_fault = true;
                    warn!("Sensor error detected: {err}");
                }
                return Poll::Fault(err);
            },
        };

        if self.in_fault {
            self.in_fault = false;
            info!("Sensor recovered after {} failed reads", self.fault_count);
        }

        let bar = clamp_bar(sample.bar);
        let psi = self.smoother.update(bar_to_psi(bar));
        self.last_update_ms = now_ms;
        self.frame_count = self.frame_count.wrapping_add(1);

        let readout = GaugeReadout {
            psi,
            bar,
            volts: sample.volts,
            mode: self.source.mode(),
        };
        self.last_readout = Some(readout);
        Poll::Frame(readout)
    }

    /// Run one full pass: poll, and on a new readout compose and present.
    ///
    /// # Errors
    ///
    /// Propagates the presenter's error. Sensor faults are not errors here;
    /// they are reported through the returned [`Poll`].
    pub fn run_pass<P: FramePresenter>(
        &mut self,
        now_ms: u64,
        composer: &mut FrameComposer<P>,
    ) -> Result<Poll, P::Error> {
        let poll = self.poll(now_ms);
        if let Poll::Frame(readout) = &poll {
            composer.compose(&self.geometry, readout);
            composer.present()?;
        }
        Ok(poll)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub const fn geometry(&self) -> &GaugeGeometry { &self.geometry }

    #[inline]
    pub const fn smoother(&self) -> &Smoother { &self.smoother }

    #[inline]
    pub const fn source(&self) -> &S { &self.source }

    #[inline]
    pub fn source_mut(&mut self) -> &mut S { &mut self.source }

    /// Time of the last successful update.
    #[inline]
    pub const fn last_update_ms(&self) -> u64 { self.last_update_ms }

    /// Most recent successful readout.
    #[inline]
    pub const fn last_readout(&self) -> Option<&GaugeReadout> { self.last_readout.as_ref() }

    /// Whether the last acquisition failed.
    #[inline]
    pub const fn in_fault(&self) -> bool { self.in_fault }

    /// Total failed acquisitions since boot.
    #[inline]
    pub const fn fault_count(&self) -> u32 { self.fault_count }

    /// Total successful updates since boot.
    #[inline]
    pub const fn frame_count(&self) -> u32 { self.frame_count }
}
