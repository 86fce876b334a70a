//! In-memory 1-bpp framebuffer in SSD1306 page order.
//!
//! The buffer is split into 8-pixel-tall pages; byte `page * 128 + x` holds
//! column `x` of that page with the top row in bit 0. This is the layout the
//! OLED controller expects, so a hardware sink can stream [`as_bytes`]
//! straight to the panel.
//!
//! [`as_bytes`]: MonoFrameBuffer::as_bytes

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::render::FrameSink;

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;

/// Bytes in one frame.
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT / 8;

/// 128x64 monochrome framebuffer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct MonoFrameBuffer {
    buffer: [u8; BUFFER_SIZE],
}

impl MonoFrameBuffer {
    /// All pixels off.
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUFFER_SIZE],
        }
    }

    /// Raw page-ordered bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; BUFFER_SIZE] { &self.buffer }

    /// Whether the pixel at `(x, y)` is on. Out-of-range pixels read as off.
    pub fn pixel(
        &self,
        x: i32,
        y: i32,
    ) -> bool {
        match Self::locate(x, y) {
            Some((idx, mask)) => self.buffer[idx] & mask != 0,
            None => false,
        }
    }

    /// Number of lit pixels.
    pub fn lit_count(&self) -> u32 { self.buffer.iter().map(|byte| byte.count_ones()).sum() }

    /// Whether every pixel is off.
    pub fn is_blank(&self) -> bool { self.buffer.iter().all(|&byte| byte == 0) }

    /// Turn every pixel off.
    pub fn fill_off(&mut self) { self.buffer.fill(0); }

    #[inline]
    fn locate(
        x: i32,
        y: i32,
    ) -> Option<(usize, u8)> {
        if x >= 0 && x < WIDTH as i32 && y >= 0 && y < HEIGHT as i32 {
            let idx = (y as usize / 8) * WIDTH + x as usize;
            Some((idx, 1 << (y as usize % 8)))
        } else {
            None
        }
    }

    #[inline]
    fn set_pixel(
        &mut self,
        x: i32,
        y: i32,
        color: BinaryColor,
    ) {
        if let Some((idx, mask)) = Self::locate(x, y) {
            match color {
                BinaryColor::On => self.buffer[idx] |= mask,
                BinaryColor::Off => self.buffer[idx] &= !mask,
            }
        }
    }
}

impl Default for MonoFrameBuffer {
    fn default() -> Self { Self::new() }
}

impl OriginDimensions for MonoFrameBuffer {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for MonoFrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        self.buffer.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}

/// Off-screen buffer with nothing behind it: flushing is a no-op.
impl FrameSink for MonoFrameBuffer {
    fn clear_buffer(
        &mut self,
        _render_immediately: bool,
    ) {
        self.fill_off();
    }

    fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
}
