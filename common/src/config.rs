//! Display, gauge layout, sensor and timing configuration constants.
//!
//! Layout values are `const` so the geometry cache and composer never do
//! per-frame arithmetic on them. Integer radii are in pixels, times in
//! milliseconds.

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (square 240x240 panel).
pub const SCREEN_WIDTH: u32 = 240;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Gauge center X coordinate.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Gauge center Y coordinate.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

// =============================================================================
// Gauge Layout
// =============================================================================

/// Outer radius of the colored scale arc.
pub const R_OUT: i32 = 104;

/// Radial thickness of the colored scale arc.
pub const ARC_THICK: i32 = 14;

/// Needle length from the center.
pub const R_NEEDLE: i32 = 90;

/// Radius the scale labels are centered on.
pub const R_LABEL: i32 = 78;

/// Major ticks stick out past the arc by this much.
pub const MAJOR_TICK_OVERHANG: i32 = 2;

/// Gap below the arc for major ticks.
pub const MAJOR_TICK_GAP: i32 = 6;

/// Gap below the arc for minor ticks.
pub const MINOR_TICK_GAP: i32 = 3;

/// Hub dot radius at the needle pivot.
pub const HUB_RADIUS: u32 = 4;

/// Lowest labeled scale position in psi.
pub const SCALE_MIN_PSI: i32 = -15;

/// Highest labeled scale position in psi.
pub const SCALE_MAX_PSI: i32 = 16;

/// Number of ticks on the scale (every integer psi from -15 to 16).
pub const TICK_COUNT: usize = (SCALE_MAX_PSI - SCALE_MIN_PSI + 1) as usize;

/// Every Nth psi value gets a major tick.
pub const MAJOR_TICK_EVERY: i32 = 5;

/// Highest index of the boost gradient ramp (91 entries, 0..=90).
pub const GRADIENT_STEPS: usize = 90;

// =============================================================================
// Sensor / ADC Configuration
// =============================================================================

/// ADC reference voltage.
pub const VREF: f32 = 3.3;

/// Full-scale ADC count (12-bit converter).
pub const ADC_MAX: u16 = 4095;

/// Raw samples averaged per acquisition in real mode.
pub const SAMPLE_AVG: usize = 16;

/// Raw samples averaged by the startup auto-zero.
pub const CAL_SAMPLES: usize = 512;

/// Delay between auto-zero samples.
pub const CAL_SAMPLE_DELAY_MS: u32 = 2;

/// Fixed gain mapping the sensor's usable voltage swing onto the bar range.
pub const CAL_SCALE: f32 = 4.0;

/// Placeholder voltage reported by the simulated source.
pub const SIM_VOLTAGE: f32 = 1.65;

/// Peak psi of the simulated sine wave.
pub const SIM_AMPLITUDE_PSI: f32 = 16.0;

/// Phase advance of the simulated sine wave per acquisition (radians).
pub const SIM_PHASE_STEP: f32 = 0.02;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Steady-state update interval.
pub const UPDATE_INTERVAL_MS: u64 = 30;

/// Update interval while the smoothed value is moving quickly.
pub const FAST_UPDATE_INTERVAL_MS: u64 = 16;

/// Smoothed-psi change per update above which the fast interval is used.
pub const FAST_UPDATE_THRESHOLD_PSI: f32 = 0.5;

/// Weight kept from the previous smoothed value on each update.
pub const SMOOTHING_RETAIN: f32 = 0.90;

const _: () = assert!(FAST_UPDATE_INTERVAL_MS < UPDATE_INTERVAL_MS);
const _: () = assert!(R_NEEDLE <= R_OUT - ARC_THICK);
const _: () = assert!(R_LABEL < R_OUT - ARC_THICK - MAJOR_TICK_GAP);
const _: () = assert!(TICK_COUNT == 32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needle_reaches_inner_arc_edge() {
        assert_eq!(R_NEEDLE, R_OUT - ARC_THICK, "needle tip should touch the inner edge of the band");
    }

    #[test]
    fn test_labels_sit_inside_major_ticks() {
        assert!(R_LABEL < R_OUT - ARC_THICK - MAJOR_TICK_GAP);
    }
}
