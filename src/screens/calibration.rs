//! Calibration boot screen with console-style progress messages.
//!
//! Shown at boot while the sensor is auto-zeroed at rest, then holds the
//! summary for a moment before the gauge starts.
//!
//! # Visual Layout
//!
//! ```text
//! ┌──────────────────────────────┐
//! │     |  Auto-zero  /          │  Title with spinner
//! │──────────────────────────────│  Divider line
//! │   Boost gauge v0.1.0         │
//! │   Mode: REAL                 │  Console output
//! │   Sampling sensor at rest... │
//! │   ADC avg: 1241.0            │
//! │   V: 1.000  bar: -0.7500     │
//! │ > Offset: +0.7500 bar        │
//! └──────────────────────────────┘
//! ```

use core::fmt::Write;
use std::thread;
use std::time::Instant;

use boost_gauge_common::colors::{BLACK, RED, WHITE};
use boost_gauge_common::config::{CAL_SAMPLE_DELAY_MS, CAL_SAMPLES};
use boost_gauge_common::styles::{CONSOLE_FONT, LEFT_ALIGNED, MIDDLE_CENTER};
use boost_gauge_common::{AcquisitionMode, Calibration, FrameComposer, auto_zero};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use embedded_graphics_simulator::SimulatorEvent;
use heapless::String;
use log::info;

use crate::clock::StdDelay;
use crate::config::{CALIBRATION_HOLD, SCREEN_REFRESH};
use crate::display::WindowPresenter;
use crate::sensor::VirtualSensor;

// =============================================================================
// Layout Constants
// =============================================================================

const TITLE_POS: Point = Point::new(120, 20);
const LINE_START: Point = Point::new(8, 35);
const LINE_END: Point = Point::new(232, 35);
const CONSOLE_X: i32 = 8;
const CONSOLE_START_Y: i32 = 52;
const CONSOLE_LINE_HEIGHT: i32 = 14;

/// Console lines that fit below the divider.
const MAX_CONSOLE_LINES: usize = 12;

const TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, RED);
const CONSOLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(CONSOLE_FONT, BLACK);
const DIVIDER_STYLE: PrimitiveStyle<Rgb565> = PrimitiveStyle::with_stroke(RED, 1);

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

/// One console line.
pub type ConsoleLine = String<40>;

// =============================================================================
// Drawing
// =============================================================================

/// Draw the boot console. The last line is marked as current.
pub fn draw_calibration_screen<D>(
    display: &mut D,
    lines: &[ConsoleLine],
    spinner_idx: usize,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(WHITE).ok();

    let left = SPINNER[spinner_idx % SPINNER.len()];
    let right = SPINNER[(spinner_idx + 2) % SPINNER.len()];
    let mut title: String<24> = String::new();
    let _ = write!(title, "{left}  Auto-zero  {right}");
    Text::with_text_style(&title, TITLE_POS, TITLE_STYLE, MIDDLE_CENTER)
        .draw(display)
        .ok();

    Line::new(LINE_START, LINE_END).into_styled(DIVIDER_STYLE).draw(display).ok();

    let visible = &lines[lines.len().saturating_sub(MAX_CONSOLE_LINES)..];
    for (i, line) in visible.iter().enumerate() {
        let y = CONSOLE_START_Y + i as i32 * CONSOLE_LINE_HEIGHT;
        let prefix = if i + 1 == visible.len() { "> " } else { "  " };
        let mut full: String<48> = String::new();
        let _ = write!(full, "{prefix}{line}");
        Text::with_text_style(&full, Point::new(CONSOLE_X, y), CONSOLE_STYLE, LEFT_ALIGNED)
            .draw(display)
            .ok();
    }
}

/// Console lines summarizing a finished calibration.
pub fn summary_lines(cal: &Calibration) -> [ConsoleLine; 3] {
    let mut avg = ConsoleLine::new();
    let _ = write!(avg, "ADC avg: {:.1}", cal.avg_raw);
    let mut rest = ConsoleLine::new();
    let _ = write!(rest, "V: {:.3}  bar: {:.4}", cal.volts, cal.bar_at_rest);
    let mut offset = ConsoleLine::new();
    let _ = write!(offset, "Offset: {:+.4} bar", cal.offset.bar());
    [avg, rest, offset]
}

fn line(text: &str) -> ConsoleLine {
    let mut s = ConsoleLine::new();
    let _ = s.push_str(text);
    s
}

// =============================================================================
// Boot Sequence
// =============================================================================

/// Run the auto-zero with the boot console on screen.
///
/// Returns `None` if the window is closed, otherwise the calibration.
pub fn run_calibration_screen(
    composer: &mut FrameComposer<WindowPresenter>,
    sensor: &mut VirtualSensor,
    mode: AcquisitionMode,
) -> anyhow::Result<Option<Calibration>> {
    let mut lines: Vec<ConsoleLine> = Vec::new();
    let mut version = ConsoleLine::new();
    let _ = write!(version, "Boost gauge v{}", env!("CARGO_PKG_VERSION"));
    lines.push(version);
    let mut mode_line = ConsoleLine::new();
    let _ = write!(mode_line, "Mode: {}", mode.label());
    lines.push(mode_line);
    let mut sampling = ConsoleLine::new();
    let _ = write!(sampling, "Sampling {CAL_SAMPLES} @ {CAL_SAMPLE_DELAY_MS}ms...");
    lines.push(sampling);

    composer.render_with(|fb| draw_calibration_screen(fb, &lines, 0));
    composer.present()?;
    if quit_requested(composer) {
        return Ok(None);
    }

    info!("Sampling sensor at rest");
    let cal = auto_zero(sensor, &mut StdDelay);
    lines.extend(summary_lines(&cal));
    lines.push(line("Ready."));

    let hold_start = Instant::now();
    let mut spinner_idx = 0;
    while hold_start.elapsed() < CALIBRATION_HOLD {
        if quit_requested(composer) {
            return Ok(None);
        }
        spinner_idx += 1;
        composer.render_with(|fb| draw_calibration_screen(fb, &lines, spinner_idx / 8));
        composer.present()?;
        thread::sleep(SCREEN_REFRESH);
    }

    Ok(Some(cal))
}

fn quit_requested(composer: &mut FrameComposer<WindowPresenter>) -> bool {
    composer
        .presenter_mut()
        .events()
        .any(|ev| matches!(ev, SimulatorEvent::Quit))
}
