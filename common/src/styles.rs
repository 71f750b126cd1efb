//! Pre-computed static text styles for the gauge face.
//!
//! Every style is `const`, so drawing a frame never constructs a style object.
//!
//! # Anchoring
//!
//! Scale labels, the status word and the debug line are anchored on their
//! middle-center point ([`MIDDLE_CENTER`]). The PSI / BAR readouts are anchored
//! on their top-left corner ([`TOP_LEFT`]) so the numeric columns line up.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle, MonoTextStyleBuilder,
        ascii::{FONT_6X10, FONT_7X13},
    },
    pixelcolor::Rgb565,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_12_POINT, PROFONT_18_POINT};

use crate::colors::{BLACK, GREEN, ORANGE, RED, WHITE};

// =============================================================================
// Text Alignment Styles (const - zero runtime cost)
// =============================================================================

/// Centered horizontally and vertically on the anchor point.
pub const MIDDLE_CENTER: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Anchor point is the top-left corner of the text box.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Left-aligned on the baseline. Used for console lines and the debug page.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

// =============================================================================
// Font References
// =============================================================================

/// Small console font (6x10 pixels) for the debug page and boot screen.
pub const CONSOLE_FONT: &MonoFont = &FONT_6X10;

// =============================================================================
// Gauge Face Styles
// =============================================================================

/// Scale label text.
pub const LABEL_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_7X13, WHITE);

/// "VACUUM" / "BOOST" status word.
pub const STATUS_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, WHITE);

/// "MAX BOOST" warning.
pub const STATUS_WARNING_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_18_POINT, RED);

/// PSI / BAR numeric readouts.
pub const READOUT_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_12_POINT, WHITE);

/// Voltage and acquisition mode line under the scale. The black cell
/// background hides the needle behind the text.
pub const DEBUG_LINE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyleBuilder::new()
    .font(&FONT_6X10)
    .text_color(WHITE)
    .background_color(BLACK)
    .build();

// =============================================================================
// Console Styles (debug page, calibration screen)
// =============================================================================

/// Section headings.
pub const HEADING_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, GREEN);

/// Log terminal lines.
pub const LOG_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, ORANGE);
