//! Unit conversions between ADC counts, sensor voltage, bar, psi and the
//! gauge's angular scale.
//!
//! # Gauge Scale
//!
//! The scale is split at 0 psi (pointing left, 180°):
//!
//! - Vacuum, -15..=0 psi, sweeps the bottom-left quadrant from 270° to 180°.
//! - Boost, 0..=16 psi, sweeps the top half from 180° to 0°.
//!
//! Angles are measured counter-clockwise from the positive X axis, so larger
//! pressures always produce smaller angles.

use crate::config::{ADC_MAX, VREF};
use crate::thresholds::{BAR_MAX, BAR_MIN, BAR_TO_PSI};

/// Convert an averaged ADC count to sensor voltage.
#[inline]
pub fn raw_to_voltage(avg_raw: f32) -> f32 { avg_raw * VREF / f32::from(ADC_MAX) }

/// Linear sensor transfer function: 0.5V is -1.0 bar, 2V per bar.
#[inline]
pub fn voltage_to_bar(volts: f32) -> f32 { (volts - 0.5) * 0.5 - 1.0 }

/// Convert bar to PSI.
#[inline]
pub fn bar_to_psi(bar: f32) -> f32 { bar * BAR_TO_PSI }

/// Convert PSI to bar.
#[inline]
pub fn psi_to_bar(psi: f32) -> f32 { psi / BAR_TO_PSI }

/// Clamp bar into the displayable range.
#[inline]
pub fn clamp_bar(bar: f32) -> f32 { bar.clamp(BAR_MIN, BAR_MAX) }

/// Map psi onto the gauge angle in degrees.
///
/// Total over all inputs; values outside -15..=16 extrapolate linearly past
/// the scale endpoints.
#[inline]
pub fn psi_to_angle(psi: f32) -> f32 {
    if psi <= 0.0 {
        let frac = (psi + 15.0) / 15.0;
        270.0 + frac * -90.0
    } else {
        let frac = psi / 16.0;
        180.0 + frac * -180.0
    }
}
