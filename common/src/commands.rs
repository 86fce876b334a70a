//! Primitive draw commands produced by the composers.
//!
//! Composers never touch the display. They append [`DrawCommand`]s to a
//! fixed-capacity [`CommandList`], which [`render::execute`](crate::render::execute)
//! replays onto any `DrawTarget`. Keeping the frame as data makes every
//! composer a pure function that tests can inspect directly.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Point;
use heapless::Vec;

/// Maximum commands in one frame. The busiest frame (two diamond clusters
/// plus status text) needs well under half of this.
pub const COMMAND_CAPACITY: usize = 128;

/// One primitive the display driver knows how to draw.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DrawCommand<'a> {
    /// Circle centred on `center`. Filled when `filled`, otherwise a 1px outline.
    Ellipse { center: Point, radius: u32, filled: bool },
    /// Axis-aligned rectangle spanning two inclusive corners.
    Rect {
        corner_a: Point,
        corner_b: Point,
        filled: bool,
        color: BinaryColor,
    },
    /// 1px line segment, both ends inclusive.
    Line { from: Point, to: Point },
    /// 1-bpp bitmap, rows padded to whole bytes, MSB first.
    Sprite {
        image: &'a [u8],
        width: u32,
        height: u32,
        origin: Point,
    },
    /// Text with its top-left corner at `origin`, shifted left by `scroll_px`.
    Text { text: &'a str, origin: Point, scroll_px: i32 },
}

impl DrawCommand<'_> {
    /// Fill state of shape commands, `None` for lines, sprites and text.
    pub const fn filled(&self) -> Option<bool> {
        match self {
            Self::Ellipse { filled, .. } | Self::Rect { filled, .. } => Some(*filled),
            Self::Line { .. } | Self::Sprite { .. } | Self::Text { .. } => None,
        }
    }
}

/// Fixed-capacity command buffer for one frame.
///
/// Commands pushed past [`COMMAND_CAPACITY`] are dropped and counted rather
/// than panicking mid-frame.
pub struct CommandList<'a> {
    commands: Vec<DrawCommand<'a>, COMMAND_CAPACITY>,
    dropped: usize,
}

impl<'a> CommandList<'a> {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
            dropped: 0,
        }
    }

    /// Append a command, dropping it if the list is full.
    pub fn push(
        &mut self,
        command: DrawCommand<'a>,
    ) {
        if self.commands.push(command).is_err() {
            self.dropped += 1;
            #[cfg(feature = "defmt")]
            defmt::warn!("draw command list full, dropped {}", self.dropped);
        }
    }

    /// Commands in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand<'a>> { self.commands.iter() }

    /// Commands as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[DrawCommand<'a>] { &self.commands }

    /// Number of queued commands.
    #[inline]
    pub fn len(&self) -> usize { self.commands.len() }

    /// Whether nothing is queued.
    #[inline]
    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    /// Commands discarded because the list was full.
    #[inline]
    pub const fn dropped(&self) -> usize { self.dropped }

    /// Remove all commands and reset the drop counter.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.dropped = 0;
    }
}

impl Default for CommandList<'_> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x: i32) -> DrawCommand<'static> {
        DrawCommand::Line {
            from: Point::new(x, 0),
            to: Point::new(x, 1),
        }
    }

    #[test]
    fn test_push_preserves_order() {
        let mut list = CommandList::new();
        list.push(line(1));
        list.push(line(2));
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_slice(), &[line(1), line(2)]);
    }

    #[test]
    fn test_overflow_drops_instead_of_panicking() {
        let mut list = CommandList::new();
        for x in 0..(COMMAND_CAPACITY as i32 + 5) {
            list.push(line(x));
        }
        assert_eq!(list.len(), COMMAND_CAPACITY);
        assert_eq!(list.dropped(), 5);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.dropped(), 0);
    }

    #[test]
    fn test_filled_only_for_shapes() {
        let ellipse = DrawCommand::Ellipse {
            center: Point::zero(),
            radius: 3,
            filled: true,
        };
        assert_eq!(ellipse.filled(), Some(true));
        assert_eq!(line(0).filled(), None);
    }
}
