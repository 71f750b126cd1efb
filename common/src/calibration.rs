//! Startup auto-zero against the sensor reading at rest.
//!
//! The engine is assumed to be off (atmospheric pressure) while the gauge
//! boots. Whatever bar value the sensor reports at that moment becomes the
//! zero point: the negated reading is stored as a [`CalibrationOffset`] and
//! added to every later real-mode reading.
//!
//! There is no plausibility check. A disconnected or pressurized sensor at
//! boot produces a wrong offset without any error.

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::{CAL_SAMPLE_DELAY_MS, CAL_SAMPLES};
use crate::signal::AdcSource;
use crate::units::{raw_to_voltage, voltage_to_bar};

/// Additive bar correction produced once by [`auto_zero`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationOffset(f32);

impl CalibrationOffset {
    /// No correction. Used by simulated mode.
    pub const ZERO: Self = Self(0.0);

    /// Offset that cancels the given bar reading at rest.
    #[inline]
    pub const fn from_rest_bar(bar_at_rest: f32) -> Self { Self(-bar_at_rest) }

    /// Offset value in bar.
    #[inline]
    pub const fn bar(self) -> f32 { self.0 }
}

impl Default for CalibrationOffset {
    fn default() -> Self { Self::ZERO }
}

/// Summary of one auto-zero run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Average raw ADC count over all calibration samples.
    pub avg_raw: f32,
    /// Sensor voltage at rest.
    pub volts: f32,
    /// Uncorrected bar reading at rest.
    pub bar_at_rest: f32,
    /// Resulting correction.
    pub offset: CalibrationOffset,
}

impl Calibration {
    /// Calibration summary for a source that never needs correcting.
    pub const NONE: Self = Self {
        avg_raw: 0.0,
        volts: 0.0,
        bar_at_rest: 0.0,
        offset: CalibrationOffset::ZERO,
    };
}

/// Sample the sensor at rest and derive the zero offset.
///
/// Blocks for roughly `CAL_SAMPLES * CAL_SAMPLE_DELAY_MS` (about one second).
pub fn auto_zero<A: AdcSource, D: DelayNs>(
    adc: &mut A,
    delay: &mut D,
) -> Calibration {
    let mut sum: u32 = 0;
    for _ in 0..CAL_SAMPLES {
        sum += u32::from(adc.read_raw());
        delay.delay_ms(CAL_SAMPLE_DELAY_MS);
    }

    let avg_raw = sum as f32 / CAL_SAMPLES as f32;
    let volts = raw_to_voltage(avg_raw);
    let bar_at_rest = voltage_to_bar(volts);
    let offset = CalibrationOffset::from_rest_bar(bar_at_rest);

    info!(
        "Auto-zero: ADC avg={avg_raw:.1} V={volts:.3} bar={bar_at_rest:.4} offset={:.4}",
        offset.bar()
    );

    Calibration {
        avg_raw,
        volts,
        bar_at_rest,
        offset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstAdc(u16);

    impl AdcSource for ConstAdc {
        fn read_raw(&mut self) -> u16 { self.0 }
    }

    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(
            &mut self,
            ns: u32,
        ) {
            self.total_ns += u64::from(ns);
        }
    }

    #[test]
    fn test_auto_zero_cancels_rest_reading() {
        let mut adc = ConstAdc(2048);
        let mut delay = CountingDelay::default();
        let cal = auto_zero(&mut adc, &mut delay);

        assert!((cal.avg_raw - 2048.0).abs() < 1e-3);
        assert!((cal.volts - 1.6504).abs() < 1e-3);
        assert!((cal.bar_at_rest + cal.offset.bar()).abs() < 1e-6, "offset should negate the rest reading");
    }

    #[test]
    fn test_auto_zero_sampling_cadence() {
        let mut adc = ConstAdc(1000);
        let mut delay = CountingDelay::default();
        auto_zero(&mut adc, &mut delay);

        assert_eq!(delay.total_ns, 512 * 2 * 1_000_000, "should wait 2ms after each of 512 samples");
    }

    #[test]
    fn test_disconnected_sensor_is_not_detected() {
        let mut adc = ConstAdc(0);
        let mut delay = CountingDelay::default();
        let cal = auto_zero(&mut adc, &mut delay);

        // 0V reads as -1.25 bar; the offset silently absorbs it
        assert!((cal.bar_at_rest - -1.25).abs() < 1e-6);
        assert!((cal.offset.bar() - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_zero_offset() {
        assert_eq!(CalibrationOffset::ZERO.bar(), 0.0);
        assert_eq!(CalibrationOffset::default(), CalibrationOffset::ZERO);
        assert_eq!(Calibration::NONE.offset, CalibrationOffset::ZERO);
    }
}
