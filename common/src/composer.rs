//! Gauge face composition and frame presentation.
//!
//! # Draw Order
//!
//! Each frame is drawn from scratch into the off-screen [`FrameBuffer`]:
//!
//! 1. Clear to black
//! 2. Vacuum band (blue ramp, 180° to 270°) and boost band (red ramp, 180° to 0°)
//! 3. Scale labels
//! 4. Scale ticks
//! 5. Needle and hub
//! 6. Status word, PSI / BAR readouts, voltage and mode line
//!
//! Then [`FrameComposer::present`] hands the finished buffer to the
//! [`FramePresenter`] in one call.
//!
//! The drawing functions are generic over `DrawTarget<Color = Rgb565>` so
//! they also work against a simulator display or a test target.

use core::fmt::Write;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle},
    text::Text,
};
use heapless::String;

use crate::colors::{BLACK, WHITE};
use crate::config::{ARC_THICK, CENTER_X, CENTER_Y, HUB_RADIUS, R_OUT};
use crate::framebuffer::FrameBuffer;
use crate::geometry::{GaugeGeometry, needle_tip, point_on_circle, vacuum_color};
use crate::signal::AcquisitionMode;
use crate::styles::{
    DEBUG_LINE_STYLE, LABEL_STYLE, MIDDLE_CENTER, READOUT_STYLE, STATUS_STYLE, STATUS_WARNING_STYLE, TOP_LEFT,
};
use crate::thresholds::MAX_BOOST_PSI;

// =============================================================================
// Layout
// =============================================================================

const CENTER: Point = Point::new(CENTER_X, CENTER_Y);

/// Anchor of the "VACUUM" / "BOOST" status word.
const STATUS_POS: Point = Point::new(180, 150);

/// Anchor of the "MAX BOOST" warning (shifted left to fit the longer text).
const WARNING_POS: Point = Point::new(165, 150);

/// Top-left of the PSI readout.
const PSI_POS: Point = Point::new(142, 165);

/// Top-left of the BAR readout.
const BAR_POS: Point = Point::new(142, 182);

/// Center of the voltage / mode line.
const DEBUG_LINE_POS: Point = Point::new(CENTER_X, CENTER_Y - 30);

const WHITE_STROKE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(WHITE, 1);
const HUB_FILL: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(WHITE);

// =============================================================================
// Frame Data
// =============================================================================

/// Values drawn for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeReadout {
    /// Smoothed pressure driving the needle and status.
    pub psi: f32,
    /// Clamped instantaneous pressure.
    pub bar: f32,
    /// Sensor voltage (placeholder in simulated mode).
    pub volts: f32,
    pub mode: AcquisitionMode,
}

/// Status line state derived from the smoothed pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeStatus {
    Vacuum,
    Boost,
    MaxBoost,
}

impl GaugeStatus {
    pub fn from_psi(psi: f32) -> Self {
        if psi >= MAX_BOOST_PSI {
            Self::MaxBoost
        } else if psi < 0.0 {
            Self::Vacuum
        } else {
            Self::Boost
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Vacuum => "VACUUM",
            Self::Boost => "BOOST",
            Self::MaxBoost => "MAX BOOST",
        }
    }
}

// =============================================================================
// Presentation
// =============================================================================

/// Receives a finished frame and pushes it to the physical display.
pub trait FramePresenter {
    type Error;

    /// Present the complete frame in one operation.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the transfer fails.
    fn present(
        &mut self,
        frame: &FrameBuffer,
    ) -> Result<(), Self::Error>;
}

impl<T: FramePresenter + ?Sized> FramePresenter for &mut T {
    type Error = T::Error;

    fn present(
        &mut self,
        frame: &FrameBuffer,
    ) -> Result<(), Self::Error> {
        (**self).present(frame)
    }
}

/// Owns the frame buffer and the presenter it is flushed to.
pub struct FrameComposer<P: FramePresenter> {
    frame: FrameBuffer,
    presenter: P,
}

impl<P: FramePresenter> FrameComposer<P> {
    pub const fn new(presenter: P) -> Self {
        Self {
            frame: FrameBuffer::new(),
            presenter,
        }
    }

    /// Draw the gauge face for `readout` into the frame buffer.
    pub fn compose(
        &mut self,
        geometry: &GaugeGeometry,
        readout: &GaugeReadout,
    ) {
        draw_gauge_face(&mut self.frame, geometry, readout);
    }

    /// Draw an alternative page into the frame buffer.
    pub fn render_with<F>(
        &mut self,
        draw: F,
    ) where
        F: FnOnce(&mut FrameBuffer),
    {
        draw(&mut self.frame);
    }

    /// Push the current frame buffer to the display.
    ///
    /// # Errors
    ///
    /// Propagates the presenter's error.
    pub fn present(&mut self) -> Result<(), P::Error> { self.presenter.present(&self.frame) }

    /// Last composed frame.
    #[inline]
    pub const fn frame(&self) -> &FrameBuffer { &self.frame }

    #[inline]
    pub const fn presenter(&self) -> &P { &self.presenter }

    #[inline]
    pub fn presenter_mut(&mut self) -> &mut P { &mut self.presenter }
}

// =============================================================================
// Drawing
// =============================================================================

/// Draw a complete gauge face, starting from a black background.
pub fn draw_gauge_face<D>(
    display: &mut D,
    geometry: &GaugeGeometry,
    readout: &GaugeReadout,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();

    draw_arc_band_gradient(display, geometry, R_OUT, ARC_THICK, 180, 270, false);
    draw_arc_band_gradient(display, geometry, R_OUT, ARC_THICK, 180, 0, true);

    draw_labels(display, geometry);
    draw_ticks(display, geometry);
    draw_needle(display, readout.psi);
    draw_readouts(display, readout);
}

/// Draw a colored band as one radial line per integer degree, from
/// `deg_start` to `deg_end` inclusive.
pub fn draw_arc_band_gradient<D>(
    display: &mut D,
    geometry: &GaugeGeometry,
    r_outer: i32,
    thickness: i32,
    deg_start: i32,
    deg_end: i32,
    boost: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let dir = if deg_end >= deg_start { 1 } else { -1 };
    let count = (deg_end - deg_start).abs();
    if count == 0 {
        return;
    }

    for i in 0..=count {
        let deg = (deg_start + dir * i) as f32;
        let frac = i as f32 / count as f32;
        let color = if boost {
            geometry.boost_color(frac)
        } else {
            vacuum_color(frac)
        };
        let outer = point_on_circle(deg, r_outer);
        let inner = point_on_circle(deg, r_outer - thickness);
        Line::new(outer, inner)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(display)
            .ok();
    }
}

fn draw_labels<D>(
    display: &mut D,
    geometry: &GaugeGeometry,
) where
    D: DrawTarget<Color = Rgb565>,
{
    for label in geometry.labels() {
        Text::with_text_style(label.text, label.position, LABEL_STYLE, MIDDLE_CENTER)
            .draw(display)
            .ok();
    }
}

fn draw_ticks<D>(
    display: &mut D,
    geometry: &GaugeGeometry,
) where
    D: DrawTarget<Color = Rgb565>,
{
    for tick in geometry.ticks() {
        Line::new(tick.outer, tick.inner).into_styled(WHITE_STROKE).draw(display).ok();
    }
}

fn draw_needle<D>(
    display: &mut D,
    psi: f32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(CENTER, needle_tip(psi)).into_styled(WHITE_STROKE).draw(display).ok();
    Circle::with_center(CENTER, HUB_RADIUS * 2 + 1)
        .into_styled(HUB_FILL)
        .draw(display)
        .ok();
}

fn draw_readouts<D>(
    display: &mut D,
    readout: &GaugeReadout,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let status = GaugeStatus::from_psi(readout.psi);
    let (style, pos) = if status == GaugeStatus::MaxBoost {
        (STATUS_WARNING_STYLE, WARNING_POS)
    } else {
        (STATUS_STYLE, STATUS_POS)
    };
    Text::with_text_style(status.label(), pos, style, MIDDLE_CENTER)
        .draw(display)
        .ok();

    let mut buf: String<32> = String::new();
    let _ = write!(buf, "PSI {:5.1}", readout.psi);
    Text::with_text_style(&buf, PSI_POS, READOUT_STYLE, TOP_LEFT).draw(display).ok();

    buf.clear();
    let _ = write!(buf, "BAR {:5.2}", readout.bar);
    Text::with_text_style(&buf, BAR_POS, READOUT_STYLE, TOP_LEFT).draw(display).ok();

    buf.clear();
    let _ = write!(buf, "V:{:.2} {}", readout.volts, readout.mode.label());
    Text::with_text_style(&buf, DEBUG_LINE_POS, DEBUG_LINE_STYLE, MIDDLE_CENTER)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::RED;
    use embedded_graphics::pixelcolor::RgbColor;
    use core::convert::Infallible;

    /// Counts presented frames.
    #[derive(Default)]
    struct RecordingPresenter {
        frames: u32,
    }

    impl FramePresenter for RecordingPresenter {
        type Error = Infallible;

        fn present(
            &mut self,
            _frame: &FrameBuffer,
        ) -> Result<(), Self::Error> {
            self.frames += 1;
            Ok(())
        }
    }

    fn readout(psi: f32) -> GaugeReadout {
        GaugeReadout {
            psi,
            bar: psi / 14.5038,
            volts: 1.65,
            mode: AcquisitionMode::Simulated,
        }
    }

    fn compose(psi: f32) -> FrameComposer<RecordingPresenter> {
        let geometry = GaugeGeometry::new();
        let mut composer = FrameComposer::new(RecordingPresenter::default());
        composer.compose(&geometry, &readout(psi));
        composer
    }

    #[test]
    fn test_status_thresholds() {
        assert_eq!(GaugeStatus::from_psi(-0.1), GaugeStatus::Vacuum);
        assert_eq!(GaugeStatus::from_psi(0.0), GaugeStatus::Boost);
        assert_eq!(GaugeStatus::from_psi(15.49), GaugeStatus::Boost);
        assert_eq!(GaugeStatus::from_psi(15.5), GaugeStatus::MaxBoost);
        assert_eq!(GaugeStatus::MaxBoost.label(), "MAX BOOST");
    }

    #[test]
    fn test_corners_are_black() {
        let composer = compose(3.0);
        let frame = composer.frame();
        for corner in [Point::new(0, 0), Point::new(239, 0), Point::new(0, 239), Point::new(239, 239)] {
            assert_eq!(frame.pixel(corner), Some(BLACK), "corner {corner:?} should stay background");
        }
    }

    #[test]
    fn test_needle_and_hub_are_white() {
        let composer = compose(8.0);
        let frame = composer.frame();
        assert_eq!(frame.pixel(CENTER), Some(WHITE), "hub");
        assert_eq!(frame.pixel(Point::new(123, 120)), Some(WHITE), "hub radius 4");
        // 8 psi points straight up
        assert_eq!(frame.pixel(Point::new(120, 30)), Some(WHITE), "needle tip");
        assert_eq!(frame.pixel(Point::new(120, 60)), Some(WHITE), "needle shaft");
    }

    #[test]
    fn test_debug_line_masks_needle() {
        // 8 psi points straight up, through the voltage line at (120, 90)
        let composer = compose(8.0);
        let frame = composer.frame();
        let masked = (85..95)
            .filter(|&y| frame.pixel(Point::new(CENTER_X, y)) == Some(BLACK))
            .count();
        assert!(masked > 0, "text background should hide the needle behind the voltage line");

        // Above the text the needle is drawn as usual
        assert_eq!(frame.pixel(Point::new(CENTER_X, 80)), Some(WHITE));
    }

    #[test]
    fn test_arc_bands_use_ramps() {
        let composer = compose(0.0);
        let frame = composer.frame();

        // Mid-band, away from ticks and labels
        let vacuum = frame.pixel(point_on_circle(225.0, R_OUT - 7)).unwrap();
        assert!(vacuum.b() > 0 && vacuum.r() == 0 && vacuum.g() == 0, "vacuum band should be blue, got {vacuum:?}");

        let boost = frame.pixel(point_on_circle(50.0, R_OUT - 7)).unwrap();
        assert!(boost.r() > 0 && boost.g() == 0 && boost.b() == 0, "boost band should be red, got {boost:?}");

        // The vacuum ramp brightens toward full vacuum
        let dim = frame.pixel(point_on_circle(183.0, R_OUT - 7)).unwrap();
        assert!(dim.b() < vacuum.b());
    }

    #[test]
    fn test_arc_band_skips_empty_range() {
        let geometry = GaugeGeometry::new();
        let mut fb = FrameBuffer::new();
        draw_arc_band_gradient(&mut fb, &geometry, R_OUT, ARC_THICK, 90, 90, true);
        assert!(fb.pixels().iter().all(|&p| p == BLACK));
    }

    #[test]
    fn test_max_boost_warning_is_red() {
        // The boost ramp also ends in pure red, so only look below the arc
        let red_in_status_area = |composer: &FrameComposer<RecordingPresenter>| {
            let mut count = 0;
            for y in 130..175 {
                for x in 90..240 {
                    if composer.frame().pixel(Point::new(x, y)) == Some(RED) {
                        count += 1;
                    }
                }
            }
            count
        };

        assert!(red_in_status_area(&compose(15.8)) > 0, "MAX BOOST should be drawn in red");
        assert_eq!(red_in_status_area(&compose(10.0)), 0, "no red text below the warning threshold");
    }

    #[test]
    fn test_present_hands_over_once() {
        let mut composer = compose(0.0);
        assert_eq!(composer.presenter().frames, 0, "compose alone should not present");
        composer.present().unwrap();
        assert_eq!(composer.presenter().frames, 1);
    }

    #[test]
    fn test_render_with_draws_into_same_buffer() {
        let mut composer = compose(0.0);
        composer.render_with(|fb| {
            fb.clear(RED).ok();
        });
        assert!(composer.frame().pixels().iter().all(|&p| p == RED));
    }
}
