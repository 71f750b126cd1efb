//! 240x240 RGB565 off-screen frame buffer.
//!
//! The composer draws the whole gauge face here, then hands the finished
//! buffer to a [`FramePresenter`](crate::composer::FramePresenter) in one
//! call, so the panel never shows a partially drawn frame.
//!
//! Pixels are stored row-major as `Rgb565` values. Presenters that stream to
//! SPI panels can convert with [`FrameBuffer::be_bytes`].

use embedded_graphics::{
    pixelcolor::{Rgb565, raw::RawU16},
    prelude::*,
    primitives::Rectangle,
};

use crate::colors::BLACK;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;

/// Total pixel count.
pub const PIXEL_COUNT: usize = WIDTH * HEIGHT;

/// Off-screen raster implementing [`DrawTarget`].
pub struct FrameBuffer {
    pixels: [Rgb565; PIXEL_COUNT],
}

impl FrameBuffer {
    /// Create a buffer cleared to black.
    pub const fn new() -> Self {
        Self {
            pixels: [BLACK; PIXEL_COUNT],
        }
    }

    /// Fill the whole buffer with one color.
    pub fn clear_buffer(
        &mut self,
        color: Rgb565,
    ) {
        self.pixels.fill(color);
    }

    /// Color at `point`, `None` outside the screen.
    #[inline]
    pub fn pixel(
        &self,
        point: Point,
    ) -> Option<Rgb565> {
        Self::index(point.x, point.y).map(|idx| self.pixels[idx])
    }

    /// All pixels, row-major.
    #[inline]
    pub const fn pixels(&self) -> &[Rgb565; PIXEL_COUNT] { &self.pixels }

    /// Pixels as big-endian RGB565 byte pairs, the wire order of SPI panels.
    pub fn be_bytes(&self) -> impl Iterator<Item = [u8; 2]> + '_ {
        self.pixels.iter().map(|&color| RawU16::from(color).into_inner().to_be_bytes())
    }

    #[inline]
    fn index(
        x: i32,
        y: i32,
    ) -> Option<usize> {
        if x >= 0 && x < WIDTH as i32 && y >= 0 && y < HEIGHT as i32 {
            Some(y as usize * WIDTH + x as usize)
        } else {
            None
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self { Self::new() }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = Self::index(point.x, point.y) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(
        &mut self,
        area: &Rectangle,
        colors: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Colors are laid out over the full area, so clipped pixels still
        // consume an entry.
        for (point, color) in area.points().zip(colors) {
            if let Some(idx) = Self::index(point.x, point.y) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let drawable_area = area.intersection(&self.bounding_box());
        if drawable_area.size == Size::zero() {
            return Ok(());
        }

        let x_start = drawable_area.top_left.x as usize;
        let width = drawable_area.size.width as usize;
        for y in drawable_area.rows() {
            let row_start = y as usize * WIDTH + x_start;
            self.pixels[row_start..row_start + width].fill(color);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.clear_buffer(color);
        Ok(())
    }
}
