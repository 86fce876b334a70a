//! SDL window standing in for the OLED panel.
//!
//! Drawing goes to an off-screen [`SimulatorDisplay`]; [`FrameSink::flush`]
//! copies it to the window, like the I2C transfer on hardware.

use std::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use gamepad_display_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use gamepad_display_common::render::FrameSink;

use crate::timing::WINDOW_SCALE;

pub struct SimulatorSink {
    display: SimulatorDisplay<BinaryColor>,
    window: Window,
}

impl SimulatorSink {
    pub fn new(title: &str) -> Self {
        let output_settings = OutputSettingsBuilder::new()
            .scale(WINDOW_SCALE)
            .theme(BinaryColorTheme::OledBlue)
            .build();
        Self {
            display: SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
            window: Window::new(title, &output_settings),
        }
    }

    /// Pending window events. Only valid after the first flush.
    pub fn events(&mut self) -> impl Iterator<Item = SimulatorEvent> + '_ { self.window.events() }
}

impl OriginDimensions for SimulatorSink {
    fn size(&self) -> Size { self.display.size() }
}

impl DrawTarget for SimulatorSink {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.display.draw_iter(pixels)
    }
}

impl FrameSink for SimulatorSink {
    fn clear_buffer(
        &mut self,
        render_immediately: bool,
    ) {
        self.display.clear(BinaryColor::Off).ok();
        if render_immediately {
            self.window.update(&self.display);
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.window.update(&self.display);
        Ok(())
    }
}
