//! Color constants for the gauge face.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! This format is native to ST7789/GC9A01-class panels and requires no
//! conversion when the frame buffer is flushed.
//!
//! Standard colors come from the `RgbColor` trait constants. Ramp colors are
//! built from 8-bit channels with [`color565`], which drops the low bits the
//! same way the panel controllers do.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed optimal values)
// =============================================================================

/// Pure black (0, 0, 0). Frame background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Ticks, labels, needle and readouts.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). "MAX BOOST" warning text.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). Debug page headings.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow (31, 63, 0). Highlighted debug values.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Orange accent for the debug log terminal.
/// RGB565: (31, 32, 0) - slightly darker than yellow.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Dark gray for divider lines and section headings.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

// =============================================================================
// Conversion
// =============================================================================

/// Pack 8-bit channels into Rgb565 by truncating to 5/6/5 bits.
#[inline]
pub const fn color565(
    r: u8,
    g: u8,
    b: u8,
) -> Rgb565 {
    Rgb565::new(r >> 3, g >> 2, b >> 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color565_extremes() {
        assert_eq!(color565(0, 0, 0), BLACK);
        assert_eq!(color565(255, 255, 255), WHITE);
        assert_eq!(color565(255, 0, 0), RED);
    }

    #[test]
    fn test_color565_truncates_low_bits() {
        // 50 = 0b0011_0010 -> 5-bit 6, 55 -> 6 as well
        assert_eq!(color565(50, 0, 0), color565(55, 0, 0));
        assert_eq!(color565(50, 0, 0).r(), 6);
        assert_eq!(color565(0, 0, 50).b(), 6);
    }
}
