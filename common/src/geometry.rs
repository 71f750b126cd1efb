//! Precomputed gauge geometry: tick endpoints, label anchors and color ramps.
//!
//! Everything here is built once by [`GaugeGeometry::new`] and then read by
//! the composer every frame. Trig goes through `libm` so the integer pixel
//! coordinates come out the same on every target.
//!
//! # Screen Coordinates
//!
//! Angles are in degrees, counter-clockwise from the positive X axis. Screen Y
//! grows downward, so the sine term is subtracted:
//!
//! ```text
//! x = CX + trunc(cos(a) * r)
//! y = CY - trunc(sin(a) * r)
//! ```

use embedded_graphics::{pixelcolor::Rgb565, prelude::Point};

use crate::colors::color565;
use crate::config::{
    ARC_THICK, CENTER_X, CENTER_Y, GRADIENT_STEPS, MAJOR_TICK_EVERY, MAJOR_TICK_GAP, MAJOR_TICK_OVERHANG,
    MINOR_TICK_GAP, R_LABEL, R_NEEDLE, R_OUT, SCALE_MAX_PSI, SCALE_MIN_PSI, TICK_COUNT,
};
use crate::units::psi_to_angle;

const DEG_TO_RAD: f32 = 0.017_453_292;

/// Fixed scale labels and the psi value each one sits on.
const LABELS: [(&str, f32); LABEL_COUNT] = [
    ("-15", -15.0),
    ("-10", -10.0),
    ("-5", -5.0),
    ("0", 0.0),
    ("+5", 5.0),
    ("+10", 10.0),
    ("+15", 15.0),
    ("+16", 16.0),
];

/// Number of scale labels.
pub const LABEL_COUNT: usize = 8;

/// Outer and inner endpoints of one scale tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickPoint {
    pub outer: Point,
    pub inner: Point,
    pub major: bool,
}

/// A scale label and the point its middle-center is anchored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelAnchor {
    pub text: &'static str,
    pub position: Point,
}

/// Screen point at `deg` degrees and radius `r` around the gauge center.
#[inline]
pub fn point_on_circle(
    deg: f32,
    r: i32,
) -> Point {
    let rad = deg * DEG_TO_RAD;
    let r = r as f32;
    Point::new(
        CENTER_X + (libm::cosf(rad) * r) as i32,
        CENTER_Y - (libm::sinf(rad) * r) as i32,
    )
}

/// Needle tip for a smoothed psi value.
#[inline]
pub fn needle_tip(psi: f32) -> Point { point_on_circle(psi_to_angle(psi), R_NEEDLE) }

/// Blue ramp for the vacuum band, `frac` in `0.0..=1.0`.
#[inline]
pub fn vacuum_color(frac: f32) -> Rgb565 {
    let frac = frac.clamp(0.0, 1.0);
    color565(0, 0, 50 + (frac * 205.0) as u8)
}

/// Geometry cache built once at startup.
#[derive(Debug, Clone)]
pub struct GaugeGeometry {
    ticks: [TickPoint; TICK_COUNT],
    gradient: [Rgb565; GRADIENT_STEPS + 1],
    labels: [LabelAnchor; LABEL_COUNT],
}

impl GaugeGeometry {
    pub fn new() -> Self {
        let mut ticks = [TickPoint {
            outer: Point::zero(),
            inner: Point::zero(),
            major: false,
        }; TICK_COUNT];

        for (slot, psi) in ticks.iter_mut().zip(SCALE_MIN_PSI..=SCALE_MAX_PSI) {
            let angle = psi_to_angle(psi as f32);
            let major = psi % MAJOR_TICK_EVERY == 0;
            let (r_outer, r_inner) = if major {
                (R_OUT + MAJOR_TICK_OVERHANG, R_OUT - ARC_THICK - MAJOR_TICK_GAP)
            } else {
                (R_OUT, R_OUT - ARC_THICK - MINOR_TICK_GAP)
            };
            *slot = TickPoint {
                outer: point_on_circle(angle, r_outer),
                inner: point_on_circle(angle, r_inner),
                major,
            };
        }

        let mut gradient = [Rgb565::new(0, 0, 0); GRADIENT_STEPS + 1];
        for (i, color) in gradient.iter_mut().enumerate() {
            let frac = i as f32 / GRADIENT_STEPS as f32;
            *color = color565(50 + (frac * 205.0) as u8, 0, 0);
        }

        let labels = LABELS.map(|(text, psi)| LabelAnchor {
            text,
            position: point_on_circle(psi_to_angle(psi), R_LABEL),
        });

        Self {
            ticks,
            gradient,
            labels,
        }
    }

    /// Tick for an integer psi on the scale, `None` outside -15..=16.
    #[inline]
    pub fn tick(
        &self,
        psi: i32,
    ) -> Option<&TickPoint> {
        let index = usize::try_from(psi - SCALE_MIN_PSI).ok()?;
        self.ticks.get(index)
    }

    /// All ticks, lowest psi first.
    #[inline]
    pub const fn ticks(&self) -> &[TickPoint; TICK_COUNT] { &self.ticks }

    /// Red ramp for the boost band, `frac` in `0.0..=1.0`.
    #[inline]
    pub fn boost_color(
        &self,
        frac: f32,
    ) -> Rgb565 {
        let index = ((frac * GRADIENT_STEPS as f32) as usize).min(GRADIENT_STEPS);
        self.gradient[index]
    }

    /// Label anchors in scale order.
    #[inline]
    pub const fn labels(&self) -> &[LabelAnchor; LABEL_COUNT] { &self.labels }
}

impl Default for GaugeGeometry {
    fn default() -> Self { Self::new() }
}
