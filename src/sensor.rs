//! Virtual MAP sensor behind the ADC trait.
//!
//! Produces the raw counts a 12-bit ADC would read from a pressure sensor
//! exposed to `target_bar` of manifold pressure. The transfer function is the
//! inverse of the calibrated pipeline: after auto-zero at rest, the gauge
//! reads back the target pressure.
//!
//! ```text
//! volts = rest_voltage + bar / 2
//! raw   = volts / VREF * ADC_MAX  (+/- noise counts)
//! ```
//!
//! A disconnected sensor reads 0 V, which the signal path reports as a range
//! fault.

use boost_gauge_common::AdcSource;
use boost_gauge_common::config::{ADC_MAX, VREF};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sensor output at atmospheric pressure.
pub const DEFAULT_REST_VOLTAGE: f32 = 1.0;

/// Range the Up/Down keys can push the virtual pressure through. Slightly wider
/// than the gauge scale so clamping is visible.
pub const TARGET_BAR_MIN: f32 = -1.2;
pub const TARGET_BAR_MAX: f32 = 1.3;

pub struct VirtualSensor {
    target_bar: f32,
    rest_voltage: f32,
    noise: u16,
    disconnected: bool,
    rng: StdRng,
}

impl VirtualSensor {
    /// Sensor at rest with OS-seeded noise.
    pub fn new(
        rest_voltage: f32,
        noise: u16,
    ) -> Self {
        Self::with_rng(rest_voltage, noise, StdRng::from_entropy())
    }

    /// Sensor at rest with a deterministic noise sequence.
    pub fn seeded(
        rest_voltage: f32,
        noise: u16,
        seed: u64,
    ) -> Self {
        Self::with_rng(rest_voltage, noise, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        rest_voltage: f32,
        noise: u16,
        rng: StdRng,
    ) -> Self {
        Self {
            target_bar: 0.0,
            rest_voltage,
            noise,
            disconnected: false,
            rng,
        }
    }

    /// Manifold pressure the sensor is exposed to.
    #[inline]
    pub const fn target_bar(&self) -> f32 { self.target_bar }

    /// Move the manifold pressure by `delta` bar, within the simulated range.
    pub fn nudge(
        &mut self,
        delta: f32,
    ) -> f32 {
        self.target_bar = (self.target_bar + delta).clamp(TARGET_BAR_MIN, TARGET_BAR_MAX);
        self.target_bar
    }

    /// Pull or reconnect the sensor plug. Returns the new disconnected state.
    pub fn toggle_disconnect(&mut self) -> bool {
        self.disconnected = !self.disconnected;
        self.disconnected
    }

    #[inline]
    pub const fn is_disconnected(&self) -> bool { self.disconnected }

    /// Noise-free sensor output voltage.
    pub fn output_voltage(&self) -> f32 {
        if self.disconnected {
            0.0
        } else {
            self.rest_voltage + self.target_bar / 2.0
        }
    }

    /// Noise-free ADC count for the current output voltage.
    pub fn ideal_raw(&self) -> u16 {
        let counts = (self.output_voltage() / VREF * f32::from(ADC_MAX)).round();
        counts.clamp(0.0, f32::from(ADC_MAX)) as u16
    }
}

impl AdcSource for VirtualSensor {
    fn read_raw(&mut self) -> u16 {
        let ideal = i32::from(self.ideal_raw());
        if self.disconnected || self.noise == 0 {
            return ideal as u16;
        }

        let noise = i32::from(self.noise);
        let jitter = self.rng.gen_range(-noise..=noise);
        (ideal + jitter).clamp(0, i32::from(ADC_MAX)) as u16
    }
}
