//! Centralized pressure and sensor threshold configuration.
//!
//! All thresholds are compile-time constants with validation assertions. If
//! they are reordered incorrectly (e.g. `BAR_MAX < BAR_MIN`), compilation
//! fails.

// =============================================================================
// Pressure Range
// =============================================================================

/// Lowest displayable pressure in bar (full vacuum side of the scale).
pub const BAR_MIN: f32 = -1.0;

/// Highest displayable pressure in bar (just past the +16 psi endpoint).
pub const BAR_MAX: f32 = 1.1;

const _: () = assert!(BAR_MIN < 0.0);
const _: () = assert!(BAR_MIN < BAR_MAX);

/// Bar to PSI conversion factor.
/// 1 bar = 14.5038 PSI.
pub const BAR_TO_PSI: f32 = 14.5038;

/// Smoothed psi at or above which the status line reads "MAX BOOST".
pub const MAX_BOOST_PSI: f32 = 15.5;

// =============================================================================
// Sensor Fault Window
// =============================================================================

/// Below this voltage the sensor is treated as disconnected.
pub const SENSOR_VOLTAGE_MIN: f32 = 0.1;

/// Above this voltage the sensor is treated as shorted to supply.
///
/// With a 3.3V ADC reference this bound cannot be reached; it is kept for
/// 5V-referenced converters.
pub const SENSOR_VOLTAGE_MAX: f32 = 4.9;

const _: () = assert!(SENSOR_VOLTAGE_MIN < SENSOR_VOLTAGE_MAX);

/// Check if a measured sensor voltage is inside the valid window.
#[inline]
pub fn is_sensor_voltage_valid(volts: f32) -> bool { (SENSOR_VOLTAGE_MIN..=SENSOR_VOLTAGE_MAX).contains(&volts) }
