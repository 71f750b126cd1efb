//! Pressure signal sources.
//!
//! A [`SignalSource`] produces one [`Sample`] per scheduler pass. Two sources
//! exist and one is chosen at boot:
//!
//! | Source              | Mode   | Behavior                                 |
//! |---------------------|--------|------------------------------------------|
//! | [`SimulatedSignal`] | `SIM`  | 16 psi sine sweep, never fails           |
//! | [`SensorSignal`]    | `REAL` | 16x averaged ADC read, range-checked     |
//!
//! Samples carry the *unclamped* bar value; clamping to the display range is
//! the scheduler's job.

use thiserror::Error;

use crate::calibration::CalibrationOffset;
use crate::config::{CAL_SCALE, SAMPLE_AVG, SIM_AMPLITUDE_PSI, SIM_PHASE_STEP, SIM_VOLTAGE};
use crate::thresholds::is_sensor_voltage_valid;
use crate::units::{psi_to_bar, raw_to_voltage, voltage_to_bar};

// =============================================================================
// External Interfaces
// =============================================================================

/// A source of raw 12-bit ADC counts.
///
/// `embedded-hal` 1.0 has no ADC trait, so hardware targets and the desktop
/// simulator implement this directly.
pub trait AdcSource {
    /// Read one raw conversion in `0..=ADC_MAX`.
    fn read_raw(&mut self) -> u16;
}

impl<T: AdcSource + ?Sized> AdcSource for &mut T {
    fn read_raw(&mut self) -> u16 { (**self).read_raw() }
}

// =============================================================================
// Samples and Errors
// =============================================================================

/// Where readings come from. Fixed for the lifetime of the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionMode {
    Simulated,
    Real,
}

impl AcquisitionMode {
    /// Short label shown on the gauge face.
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Simulated => "SIM",
            Self::Real => "REAL",
        }
    }
}

/// One acquired reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Pressure in bar, not yet clamped.
    pub bar: f32,
    /// Sensor voltage (placeholder in simulated mode).
    pub volts: f32,
}

/// Sensor voltage outside the plausible window: disconnected or shorted.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("sensor voltage {volts:.2}V out of range")]
pub struct SensorRangeError {
    pub volts: f32,
}

/// Produces one pressure sample per update pass.
pub trait SignalSource {
    /// Acquisition mode reported on the gauge face.
    fn mode(&self) -> AcquisitionMode;

    /// Acquire the next sample.
    ///
    /// # Errors
    ///
    /// Returns [`SensorRangeError`] when the measured voltage is implausible.
    /// The caller should skip the frame and retry on the next pass.
    fn acquire(&mut self) -> Result<Sample, SensorRangeError>;
}

// =============================================================================
// Simulated Source
// =============================================================================

/// Synthetic sine sweep across the full scale.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedSignal {
    phase: f32,
}

impl SimulatedSignal {
    pub const fn new() -> Self { Self { phase: 0.0 } }

    /// Current phase in radians.
    #[inline]
    pub const fn phase(&self) -> f32 { self.phase }
}

impl SignalSource for SimulatedSignal {
    fn mode(&self) -> AcquisitionMode { AcquisitionMode::Simulated }

    fn acquire(&mut self) -> Result<Sample, SensorRangeError> {
        self.phase += SIM_PHASE_STEP;
        let psi = SIM_AMPLITUDE_PSI * libm::sinf(self.phase);

        Ok(Sample {
            bar: psi_to_bar(psi),
            volts: SIM_VOLTAGE,
        })
    }
}

// =============================================================================
// ADC-backed Source
// =============================================================================

/// Real sensor read through an [`AdcSource`] and corrected by the startup
/// calibration offset.
pub struct SensorSignal<A: AdcSource> {
    adc: A,
    offset: CalibrationOffset,
}

impl<A: AdcSource> SensorSignal<A> {
    pub const fn new(
        adc: A,
        offset: CalibrationOffset,
    ) -> Self {
        Self { adc, offset }
    }

    #[inline]
    pub const fn adc(&self) -> &A { &self.adc }

    /// Access the underlying ADC (the simulator drives its virtual sensor
    /// through this).
    #[inline]
    pub fn adc_mut(&mut self) -> &mut A { &mut self.adc }

    /// Average `SAMPLE_AVG` consecutive conversions.
    fn read_averaged(&mut self) -> f32 {
        let mut sum: u32 = 0;
        for _ in 0..SAMPLE_AVG {
            sum += u32::from(self.adc.read_raw());
        }
        sum as f32 / SAMPLE_AVG as f32
    }
}

impl<A: AdcSource> SignalSource for SensorSignal<A> {
    fn mode(&self) -> AcquisitionMode { AcquisitionMode::Real }

    fn acquire(&mut self) -> Result<Sample, SensorRangeError> {
        let volts = raw_to_voltage(self.read_averaged());
        if !is_sensor_voltage_valid(volts) {
            return Err(SensorRangeError { volts });
        }

        let bar = (voltage_to_bar(volts) + self.offset.bar()) * CAL_SCALE;
        Ok(Sample { bar, volts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstAdc(u16);

    impl AdcSource for ConstAdc {
        fn read_raw(&mut self) -> u16 { self.0 }
    }

    /// Cycles through a fixed pattern of counts.
    struct PatternAdc {
        pattern: &'static [u16],
        next: usize,
    }

    impl AdcSource for PatternAdc {
        fn read_raw(&mut self) -> u16 {
            let value = self.pattern[self.next % self.pattern.len()];
            self.next += 1;
            value
        }
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(AcquisitionMode::Simulated.label(), "SIM");
        assert_eq!(AcquisitionMode::Real.label(), "REAL");
    }

    #[test]
    fn test_simulated_advances_phase() {
        let mut sim = SimulatedSignal::new();
        assert_eq!(sim.mode(), AcquisitionMode::Simulated);

        let first = sim.acquire().unwrap();
        assert!((sim.phase() - 0.02).abs() < 1e-6);
        assert!((first.volts - 1.65).abs() < 1e-6, "simulated voltage is a placeholder");

        // sin(0.02) * 16 psi ~= 0.32 psi
        assert!((first.bar * 14.5038 - 0.32).abs() < 0.01);
    }

    #[test]
    fn test_simulated_peak_exceeds_bar_max() {
        let mut sim = SimulatedSignal::new();
        let mut peak = f32::MIN;
        // A quarter period is ~79 steps of 0.02 rad
        for _ in 0..100 {
            peak = peak.max(sim.acquire().unwrap().bar);
        }
        assert!(peak > 1.1, "unclamped peak should reach ~1.103 bar, got {peak}");
        assert!(peak < 1.11);
    }

    #[test]
    fn test_simulated_follows_exact_sine() {
        let mut sim = SimulatedSignal::new();
        for _ in 0..2000 {
            let sample = sim.acquire().unwrap();
            let expected = 16.0 * libm::sinf(sim.phase());
            assert!(
                (psi_to_bar(expected) - sample.bar).abs() < 1e-6,
                "phase {} should give {expected} psi",
                sim.phase()
            );
        }

        // Phase pi/2 lands on the full 16 psi amplitude
        let mut at_peak = SimulatedSignal { phase: core::f32::consts::FRAC_PI_2 - SIM_PHASE_STEP };
        let psi = at_peak.acquire().unwrap().bar * 14.5038;
        assert!((psi - 16.0).abs() < 1e-3, "peak should be 16 psi, got {psi}");
    }

    #[test]
    fn test_sensor_mid_scale_reading() {
        let mut signal = SensorSignal::new(ConstAdc(2048), CalibrationOffset::ZERO);
        assert_eq!(signal.mode(), AcquisitionMode::Real);

        let sample = signal.acquire().unwrap();
        assert!((sample.volts - 1.6504).abs() < 1e-3);
        // (-0.4248) * 4, unclamped
        assert!((sample.bar - -1.699).abs() < 0.01, "got {}", sample.bar);
    }

    #[test]
    fn test_sensor_offset_applied_before_scale() {
        let rest_bar = voltage_to_bar(raw_to_voltage(2048.0));
        let mut signal = SensorSignal::new(ConstAdc(2048), CalibrationOffset::from_rest_bar(rest_bar));

        let sample = signal.acquire().unwrap();
        assert!(sample.bar.abs() < 1e-5, "reading at rest should be zero after calibration");
    }

    #[test]
    fn test_sensor_averages_samples() {
        let adc = PatternAdc {
            pattern: &[2000, 2096],
            next: 0,
        };
        let mut signal = SensorSignal::new(adc, CalibrationOffset::ZERO);

        let sample = signal.acquire().unwrap();
        assert!((sample.volts - raw_to_voltage(2048.0)).abs() < 1e-5);
        assert_eq!(signal.adc_mut().next, 16, "one acquisition reads 16 samples");
    }

    #[test]
    fn test_sensor_disconnected_is_range_error() {
        // 62 counts ~= 0.05V
        let mut signal = SensorSignal::new(ConstAdc(62), CalibrationOffset::ZERO);
        let err = signal.acquire().unwrap_err();
        assert!((err.volts - 0.05).abs() < 0.001);
    }

    #[test]
    fn test_sensor_low_window_edge() {
        // 124 counts ~= 0.0999V, 125 counts ~= 0.1007V
        let mut below = SensorSignal::new(ConstAdc(124), CalibrationOffset::ZERO);
        let mut above = SensorSignal::new(ConstAdc(125), CalibrationOffset::ZERO);
        assert!(below.acquire().is_err());
        assert!(above.acquire().is_ok());
    }
}
