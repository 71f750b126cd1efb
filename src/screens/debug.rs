//! Debug/profiling page rendering.
//!
//! Shows update timing, sensor state, the calibration summary and the debug
//! log terminal. Toggle from the gauge face with `Y`.
//!
//! # Layout
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │ DEBUG VIEW          UP 00:12:34        │
//! ├────────────────────────────────────────┤
//! │ TIMING              │ SENSOR           │
//! │ Intv:  30ms         │ Mode: REAL       │
//! │ Frame: 0.4ms        │ PSI: -14.2       │
//! │ Min:   0.3ms        │ BAR: -0.98       │
//! │ Max:   1.9ms        │ V: 0.510         │
//! │ Avg:   0.4ms        │ Faults: 0        │
//! │ Frames:12847        │ Plug: OK         │
//! │ Idle:  388201       │ Target: -1.00    │
//! │ Cal: raw 1241.0 offset +0.7500         │
//! ├────────────────────────────────────────┤
//! │ > System started                       │
//! │ > _                                    │
//! └────────────────────────────────────────┘
//! ```

use core::fmt::Write;

use boost_gauge_common::colors::{BLACK, GRAY, GREEN, WHITE, YELLOW};
use boost_gauge_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use boost_gauge_common::profiling::DebugLog;
use boost_gauge_common::styles::{CONSOLE_FONT, HEADING_STYLE, LOG_STYLE};
use boost_gauge_common::{AcquisitionMode, Calibration, GaugeReadout};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;

use crate::profiling::ProfilingMetrics;

// =============================================================================
// Layout Constants
// =============================================================================

const HEADER_Y: i32 = 12;
const HEADER_DIVIDER_Y: i32 = 18;
const SECTION_HEADER_Y: i32 = 30;
const STATS_Y: i32 = 43;
const STAT_LINE_HEIGHT: i32 = 11;
const CAL_Y: i32 = 125;
const LOG_DIVIDER_Y: i32 = 132;
const LOG_Y: i32 = 146;
const LOG_LINE_HEIGHT: i32 = 12;

const COL1_X: i32 = 4;
const COL2_X: i32 = 124;

// =============================================================================
// Styles
// =============================================================================

const SECTION_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(CONSOLE_FONT, GRAY);
const VALUE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(CONSOLE_FONT, WHITE);
const HIGHLIGHT_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(CONSOLE_FONT, YELLOW);
const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(GRAY, 1);
const TERMINAL_BG: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_fill(Rgb565::new(1, 2, 1));

/// Everything the debug page shows, gathered by the main loop.
pub struct DebugView<'a> {
    pub metrics: &'a ProfilingMetrics,
    pub log: &'a DebugLog,
    pub calibration: &'a Calibration,
    pub mode: AcquisitionMode,
    pub interval_ms: u64,
    pub fault_count: u32,
    pub in_fault: bool,
    pub readout: Option<&'a GaugeReadout>,
    /// Virtual sensor target pressure and plug state (real mode only).
    pub sensor: Option<(f32, bool)>,
}

// =============================================================================
// Debug Page Drawing
// =============================================================================

/// Draw the debug/profiling page.
pub fn draw_debug_page<D>(
    display: &mut D,
    view: &DebugView<'_>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();

    draw_header(display, view.metrics);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);

    Text::new("TIMING", Point::new(COL1_X, SECTION_HEADER_Y), SECTION_STYLE)
        .draw(display)
        .ok();
    Text::new("SENSOR", Point::new(COL2_X, SECTION_HEADER_Y), SECTION_STYLE)
        .draw(display)
        .ok();

    draw_timing_column(display, view);
    draw_sensor_column(display, view);
    draw_calibration_line(display, view);

    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log_terminal(display, view.log);
}

fn draw_header<D>(
    display: &mut D,
    metrics: &ProfilingMetrics,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Text::new("DEBUG VIEW", Point::new(COL1_X, HEADER_Y), HEADING_STYLE)
        .draw(display)
        .ok();

    let mut s: String<24> = String::new();
    let _ = write!(s, "UP {}", metrics.uptime_string());
    Text::new(&s, Point::new(COL2_X + 16, HEADER_Y), VALUE_STYLE)
        .draw(display)
        .ok();
}

/// Draw a list of stat lines starting at `STATS_Y`.
fn draw_stat_lines<D>(
    display: &mut D,
    x: i32,
    lines: &[(String<20>, MonoTextStyle<'static, Rgb565>)],
) where
    D: DrawTarget<Color = Rgb565>,
{
    for (i, (text, style)) in lines.iter().enumerate() {
        let y = STATS_Y + i as i32 * STAT_LINE_HEIGHT;
        Text::new(text, Point::new(x, y), *style).draw(display).ok();
    }
}

fn stat(args: core::fmt::Arguments<'_>) -> String<20> {
    let mut s = String::new();
    let _ = s.write_fmt(args);
    s
}

fn draw_timing_column<D>(
    display: &mut D,
    view: &DebugView<'_>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let m = view.metrics;
    let ms = |us: u32| us as f32 / 1000.0;

    let lines = [
        (stat(format_args!("Intv:  {}ms", view.interval_ms)), VALUE_STYLE),
        (stat(format_args!("Frame: {:.1}ms", ms(m.frame_time_us))), VALUE_STYLE),
        (stat(format_args!("Min:   {:.1}ms", ms(m.frame_time_min_or_zero_us()))), HIGHLIGHT_STYLE),
        (stat(format_args!("Max:   {:.1}ms", ms(m.frame_time_max_us))), HIGHLIGHT_STYLE),
        (stat(format_args!("Avg:   {:.1}ms", ms(m.frame_time_avg_us()))), HIGHLIGHT_STYLE),
        (stat(format_args!("Frames:{}", m.total_frames)), VALUE_STYLE),
        (stat(format_args!("Idle:  {}", m.idle_passes)), VALUE_STYLE),
    ];
    draw_stat_lines(display, COL1_X, &lines);
}

fn draw_sensor_column<D>(
    display: &mut D,
    view: &DebugView<'_>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let mut lines: heapless::Vec<(String<20>, MonoTextStyle<'static, Rgb565>), 7> = heapless::Vec::new();

    let _ = lines.push((stat(format_args!("Mode: {}", view.mode.label())), VALUE_STYLE));
    if let Some(r) = view.readout {
        let _ = lines.push((stat(format_args!("PSI: {:.1}", r.psi)), VALUE_STYLE));
        let _ = lines.push((stat(format_args!("BAR: {:.2}", r.bar)), VALUE_STYLE));
        let _ = lines.push((stat(format_args!("V: {:.3}", r.volts)), VALUE_STYLE));
    } else {
        let _ = lines.push((stat(format_args!("No reading yet")), VALUE_STYLE));
    }

    let fault_style = if view.in_fault { HIGHLIGHT_STYLE } else { VALUE_STYLE };
    let _ = lines.push((stat(format_args!("Faults: {}", view.fault_count)), fault_style));

    if let Some((target_bar, disconnected)) = view.sensor {
        let plug = if disconnected { "OPEN" } else { "OK" };
        let _ = lines.push((stat(format_args!("Plug: {plug}")), fault_style));
        let _ = lines.push((stat(format_args!("Target: {target_bar:.2}")), VALUE_STYLE));
    }

    draw_stat_lines(display, COL2_X, &lines);
}

fn draw_calibration_line<D>(
    display: &mut D,
    view: &DebugView<'_>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let mut s: String<40> = String::new();
    let _ = write!(
        s,
        "Cal: raw {:.1} offset {:+.4}",
        view.calibration.avg_raw,
        view.calibration.offset.bar()
    );
    if view.mode == AcquisitionMode::Simulated {
        let _ = s.push_str(" (off)");
    }
    Text::new(&s, Point::new(COL1_X, CAL_Y), SECTION_STYLE)
        .draw(display)
        .ok();
}

/// Draw the debug log terminal section.
fn draw_log_terminal<D>(
    display: &mut D,
    log: &DebugLog,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let prompt_style = MonoTextStyle::new(CONSOLE_FONT, GREEN);

    Rectangle::new(
        Point::new(0, LOG_DIVIDER_Y + 2),
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - LOG_DIVIDER_Y as u32 - 2),
    )
    .into_styled(TERMINAL_BG)
    .draw(display)
    .ok();

    let mut y = LOG_Y;
    for line in log.iter() {
        Text::new(">", Point::new(COL1_X, y), prompt_style).draw(display).ok();
        Text::new(line, Point::new(COL1_X + 10, y), LOG_STYLE).draw(display).ok();
        y += LOG_LINE_HEIGHT;
    }

    Text::new("> _", Point::new(COL1_X, y), prompt_style).draw(display).ok();
}

fn draw_horizontal_line<D>(
    display: &mut D,
    y: i32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(Point::new(2, y), Point::new(SCREEN_WIDTH as i32 - 2, y))
        .into_styled(DIVIDER_STYLE)
        .draw(display)
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use boost_gauge_common::FrameBuffer;
    use boost_gauge_common::colors::ORANGE;

    #[test]
    fn test_debug_page_draws_log_and_dividers() {
        let metrics = ProfilingMetrics::new();
        let mut log = DebugLog::new();
        log.push("System started");
        let readout = GaugeReadout {
            psi: -3.0,
            bar: -0.2,
            volts: 0.9,
            mode: AcquisitionMode::Real,
        };
        let view = DebugView {
            metrics: &metrics,
            log: &log,
            calibration: &Calibration::NONE,
            mode: AcquisitionMode::Real,
            interval_ms: 30,
            fault_count: 2,
            in_fault: true,
            readout: Some(&readout),
            sensor: Some((-0.2, true)),
        };

        let mut fb = FrameBuffer::new();
        draw_debug_page(&mut fb, &view);

        assert_eq!(fb.pixel(Point::new(120, HEADER_DIVIDER_Y)), Some(GRAY));
        assert_eq!(fb.pixel(Point::new(120, LOG_DIVIDER_Y)), Some(GRAY));
        assert!(fb.pixels().iter().any(|&p| p == ORANGE), "log text should be drawn");
        assert!(fb.pixels().iter().any(|&p| p == YELLOW), "fault counter highlighted");
    }

    #[test]
    fn test_stat_truncates_to_capacity() {
        let s = stat(format_args!("{}", "a very long statistic line"));
        assert!(s.len() <= 20);
    }
}
