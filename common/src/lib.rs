//! Core logic for the boost/vacuum gauge.
//!
//! This crate contains the platform-agnostic measurement-to-geometry pipeline
//! shared by the desktop simulator and any hardware target:
//!
//! - [`units`]: voltage, bar, psi and gauge-angle conversions
//! - [`calibration`]: startup auto-zero against the resting sensor reading
//! - [`signal`]: simulated and ADC-backed pressure sources
//! - [`smoothing`]: exponential moving average and adaptive update interval
//! - [`geometry`]: precomputed tick endpoints, label anchors and color ramps
//! - [`framebuffer`]: 240x240 RGB565 off-screen raster
//! - [`composer`]: draws the gauge face into the frame buffer and presents it
//! - [`scheduler`]: the single owning context that drives one update pass
//! - [`profiling`]: debug log ring buffer (no time dependencies)
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` outside of tests. Time is passed in as plain
//! milliseconds, so nothing here depends on `std::time`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod calibration;
pub mod colors;
pub mod composer;
pub mod config;
pub mod framebuffer;
pub mod geometry;
pub mod pages;
pub mod profiling;
pub mod scheduler;
pub mod signal;
pub mod smoothing;
pub mod styles;
pub mod thresholds;
pub mod units;

// Re-export commonly used items
pub use calibration::{Calibration, CalibrationOffset, auto_zero};
pub use composer::{FrameComposer, FramePresenter, GaugeReadout};
pub use framebuffer::FrameBuffer;
pub use geometry::GaugeGeometry;
pub use pages::Page;
pub use scheduler::{GaugeScheduler, Poll};
pub use signal::{AcquisitionMode, AdcSource, Sample, SensorRangeError, SensorSignal, SignalSource, SimulatedSignal};
pub use smoothing::Smoother;
