//! Simulator window as the frame presenter.
//!
//! The composer draws into its own off-screen buffer; presenting copies the
//! finished buffer into the `SimulatorDisplay` in one `fill_contiguous` call
//! and refreshes the SDL window, the same single-transfer shape a DMA flush
//! to a real panel has.

use core::convert::Infallible;

use boost_gauge_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use boost_gauge_common::{FrameBuffer, FramePresenter};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

pub struct WindowPresenter {
    display: SimulatorDisplay<Rgb565>,
    window: Window,
}

impl WindowPresenter {
    pub fn new(
        title: &str,
        scale: u32,
    ) -> Self {
        let display = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        let output_settings = OutputSettingsBuilder::new().scale(scale).build();
        Self {
            display,
            window: Window::new(title, &output_settings),
        }
    }

    /// Pending window events. Only valid after the first present.
    pub fn events(&mut self) -> impl Iterator<Item = SimulatorEvent> + '_ { self.window.events() }
}

impl FramePresenter for WindowPresenter {
    type Error = Infallible;

    fn present(
        &mut self,
        frame: &FrameBuffer,
    ) -> Result<(), Self::Error> {
        let area = self.display.bounding_box();
        self.display.fill_contiguous(&area, frame.pixels().iter().copied())?;
        self.window.update(&self.display);
        Ok(())
    }
}
