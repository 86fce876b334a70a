//! Command execution onto an `embedded-graphics` target.
//!
//! [`execute`] replays a [`CommandList`] onto any `DrawTarget<Color =
//! BinaryColor>`. Individual draw failures are dropped with `.ok()` so one bad
//! primitive never aborts the rest of the frame.
//!
//! [`FrameSink`] adds the buffer lifecycle the scheduler needs on top of
//! `DrawTarget`: clear at the start of a tick, flush at the end.

use embedded_graphics::image::{Image, ImageRaw};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X9;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::commands::{CommandList, DrawCommand};

/// Status font: 6 px advance, drawn from the top of its text row.
pub const TEXT_STYLE: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_6X9, BinaryColor::On);

const LINE_STYLE: PrimitiveStyle<BinaryColor> = PrimitiveStyle::with_stroke(BinaryColor::On, 1);

/// Display buffer the scheduler renders into once per tick.
pub trait FrameSink: DrawTarget<Color = BinaryColor> {
    /// Blank the off-screen buffer. With `render_immediately` the blank
    /// buffer is also pushed to the panel.
    fn clear_buffer(
        &mut self,
        render_immediately: bool,
    );

    /// Push the buffer to the panel.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Draw every command in order.
pub fn execute<D>(
    commands: &CommandList<'_>,
    display: &mut D,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    for command in commands.iter() {
        draw_command(command, display);
    }
}

/// Draw a single command.
pub fn draw_command<D>(
    command: &DrawCommand<'_>,
    display: &mut D,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    match *command {
        DrawCommand::Ellipse { center, radius, filled } => {
            Circle::with_center(center, radius * 2 + 1)
                .into_styled(shape_style(filled, BinaryColor::On))
                .draw(display)
                .ok();
        }
        DrawCommand::Rect {
            corner_a,
            corner_b,
            filled,
            color,
        } => {
            Rectangle::with_corners(corner_a, corner_b)
                .into_styled(shape_style(filled, color))
                .draw(display)
                .ok();
        }
        DrawCommand::Line { from, to } => {
            Line::new(from, to).into_styled(LINE_STYLE).draw(display).ok();
        }
        DrawCommand::Sprite {
            image, width, origin, ..
        } => {
            let raw = ImageRaw::<BinaryColor>::new(image, width);
            Image::new(&raw, origin).draw(display).ok();
        }
        DrawCommand::Text {
            text,
            origin,
            scroll_px,
        } => {
            let position = Point::new(origin.x - scroll_px, origin.y);
            Text::with_baseline(text, position, TEXT_STYLE, Baseline::Top)
                .draw(display)
                .ok();
        }
    }
}

#[inline]
const fn shape_style(
    filled: bool,
    color: BinaryColor,
) -> PrimitiveStyle<BinaryColor> {
    if filled {
        PrimitiveStyle::with_fill(color)
    } else {
        PrimitiveStyle::with_stroke(color, 1)
    }
}
