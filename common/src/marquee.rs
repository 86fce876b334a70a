//! Status marquee: the scrolling mode line at the top of the display.
//!
//! # Update Cadence
//!
//! The text is rebuilt and the scroll advanced at most once per
//! [`SCROLL_UPDATE_PERIOD_MS`], independent of the render rate. Between
//! updates the cached text and offset are drawn unchanged. Gating compares
//! absolute timestamps, so long gaps between ticks never queue up steps.
//!
//! # Scrolling
//!
//! ```text
//! display_delta = len(text) - SCREEN_MAX_CHARS
//! max_offset    = display_delta * FONT_WIDTH
//! step          = SCROLL_RATE * FONT_WIDTH
//! ```
//!
//! The offset walks `0 -> max_offset` in `step` increments (the last step
//! clamped), turns around on the tick it lands on a bound, and walks back.
//! One full cycle takes `2 * ceil(max_offset / step)` updates. Text that
//! fits on screen never scrolls.

use core::fmt::Write;

use embedded_graphics::prelude::Point;
use heapless::String;

use crate::commands::{CommandList, DrawCommand};
use crate::config::{
    FONT_WIDTH,
    SCREEN_MAX_CHARS,
    SCROLL_RATE,
    SCROLL_UPDATE_PERIOD_MS,
    STATUS_ROW,
    TEXT_ROW_HEIGHT,
    TURBO_ROW,
    TurboIndicator,
};
use crate::input::{DpadMode, GamepadOptions, InputMode, socd_acronym};

/// Capacity of the status text buffer.
pub const STATUS_TEXT_CAPACITY: usize = 32;

/// Capacity of the turbo text buffer (`"T 255"`).
pub const TURBO_TEXT_CAPACITY: usize = 8;

// =============================================================================
// Scroll State
// =============================================================================

/// Direction the marquee is currently moving.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScrollDirection {
    /// Revealing the right-hand end of the text.
    #[default]
    Forward,
    /// Returning to the start of the text.
    Backward,
}

impl ScrollDirection {
    /// `+1` or `-1`.
    pub const fn sign(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// Ping-pong scroll offset of the status line.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScrollState {
    offset_px: i32,
    direction: ScrollDirection,
}

impl ScrollState {
    /// Start of the text, moving forward.
    pub const fn new() -> Self {
        Self {
            offset_px: 0,
            direction: ScrollDirection::Forward,
        }
    }

    /// Current horizontal offset in pixels.
    #[inline]
    pub const fn offset_px(&self) -> i32 { self.offset_px }

    /// Current direction.
    #[inline]
    pub const fn direction(&self) -> ScrollDirection { self.direction }

    /// Advance one scroll step for text that overflows by `display_delta`
    /// characters. A delta of zero or less parks the text at offset 0.
    pub fn advance(
        &mut self,
        display_delta: i32,
    ) {
        if display_delta <= 0 {
            *self = Self::new();
            return;
        }

        let max_offset = display_delta * FONT_WIDTH;
        let step = SCROLL_RATE * FONT_WIDTH;

        // Clamping also covers text that shrank since the last step.
        self.offset_px = (self.offset_px + self.direction.sign() * step).clamp(0, max_offset);

        self.direction = match self.direction {
            ScrollDirection::Forward if self.offset_px >= max_offset => ScrollDirection::Backward,
            ScrollDirection::Backward if self.offset_px <= 0 => ScrollDirection::Forward,
            unchanged => unchanged,
        };
    }
}

// =============================================================================
// Text Builders
// =============================================================================

/// Build the status line, e.g. `XIN(DP)  SOCD NTL,NTL`.
///
/// Unknown input or d-pad codes are left out; unknown SOCD codes show as
/// three spaces.
pub fn build_status_text(options: &GamepadOptions) -> String<STATUS_TEXT_CAPACITY> {
    let mut text = String::new();

    if let Some(mode) = InputMode::from_raw(options.input_mode) {
        text.push_str(mode.acronym()).ok();
    }
    if let Some(dpad) = DpadMode::from_raw(options.dpad_mode) {
        text.push_str(dpad.tag()).ok();
    }

    text.push_str("  SOCD ").ok();
    text.push_str(socd_acronym(options.socd_x)).ok();
    text.push(',').ok();
    text.push_str(socd_acronym(options.socd_y)).ok();

    text
}

/// Format the turbo indicator: `"T "` and three zero-padded digits.
pub fn format_turbo(shot_count: u8) -> String<TURBO_TEXT_CAPACITY> {
    let mut text = String::new();
    write!(text, "T {shot_count:03}").ok();
    text
}

// =============================================================================
// Status Marquee
// =============================================================================

/// What the marquee wants drawn this tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MarqueeView<'a> {
    /// Status text.
    pub text: &'a str,
    /// Horizontal scroll offset in pixels.
    pub offset_px: i32,
    /// Turbo text, when a turbo indicator is configured.
    pub turbo: Option<&'a str>,
}

impl<'a> MarqueeView<'a> {
    /// Queue the status line and, if present, the turbo line.
    pub fn compose(
        &self,
        list: &mut CommandList<'a>,
    ) {
        list.push(DrawCommand::Text {
            text: self.text,
            origin: Point::new(0, STATUS_ROW * TEXT_ROW_HEIGHT),
            scroll_px: self.offset_px,
        });
        if let Some(turbo) = self.turbo {
            list.push(DrawCommand::Text {
                text: turbo,
                origin: Point::new(0, TURBO_ROW * TEXT_ROW_HEIGHT),
                scroll_px: 0,
            });
        }
    }
}

/// Status line state owned by the frame scheduler for the whole run.
pub struct StatusMarquee {
    scroll: ScrollState,
    last_update_ms: Option<u64>,
    text: String<STATUS_TEXT_CAPACITY>,
    turbo_text: String<TURBO_TEXT_CAPACITY>,
}

impl StatusMarquee {
    /// Empty marquee. The first [`tick`](Self::tick) always updates.
    pub const fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
            last_update_ms: None,
            text: String::new(),
            turbo_text: String::new(),
        }
    }

    /// Whether an update is due at `now_ms`.
    pub fn is_due(
        &self,
        now_ms: u64,
    ) -> bool {
        match self.last_update_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > SCROLL_UPDATE_PERIOD_MS,
        }
    }

    /// Rebuild text and advance the scroll if the update period has elapsed.
    ///
    /// Returns `true` when an update happened.
    pub fn tick(
        &mut self,
        now_ms: u64,
        options: &GamepadOptions,
        turbo: Option<TurboIndicator>,
    ) -> bool {
        if !self.is_due(now_ms) {
            return false;
        }
        self.last_update_ms = Some(self.last_update_ms.map_or(now_ms, |last| last.max(now_ms)));

        self.text = build_status_text(options);
        let display_delta = self.text.len() as i32 - SCREEN_MAX_CHARS as i32;
        self.scroll.advance(display_delta);

        match turbo {
            Some(indicator) => self.turbo_text = format_turbo(indicator.shot_count),
            None => self.turbo_text.clear(),
        }

        true
    }

    /// Cached text and offset.
    pub fn view(&self) -> MarqueeView<'_> {
        MarqueeView {
            text: self.text.as_str(),
            offset_px: self.scroll.offset_px(),
            turbo: if self.turbo_text.is_empty() {
                None
            } else {
                Some(self.turbo_text.as_str())
            },
        }
    }

    /// [`tick`](Self::tick) followed by [`view`](Self::view).
    pub fn update(
        &mut self,
        now_ms: u64,
        options: &GamepadOptions,
        turbo: Option<TurboIndicator>,
    ) -> MarqueeView<'_> {
        self.tick(now_ms, options, turbo);
        self.view()
    }

    /// Scroll state, for diagnostics.
    #[inline]
    pub const fn scroll(&self) -> &ScrollState { &self.scroll }

    /// Timestamp of the last update.
    #[inline]
    pub const fn last_update_ms(&self) -> Option<u64> { self.last_update_ms }
}

impl Default for StatusMarquee {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: i32 = SCROLL_RATE * FONT_WIDTH;

    // -------------------------------------------------------------------------
    // Text Builder Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_status_text_default_options() {
        let text = build_status_text(&GamepadOptions::new());
        assert_eq!(text.as_str(), "XIN(DP)  SOCD NTL,NTL");
        assert_eq!(text.len(), SCREEN_MAX_CHARS, "default line exactly fills the row");
    }

    #[test]
    fn test_status_text_every_mode() {
        let options = GamepadOptions {
            input_mode: InputMode::Hid.raw(),
            dpad_mode: 2,
            socd_x: 0,
            socd_y: 5,
        };
        assert_eq!(build_status_text(&options).as_str(), "DIN(RS)  SOCD OFF,MAX");

        let options = GamepadOptions {
            input_mode: InputMode::Config.raw(),
            dpad_mode: 1,
            socd_x: 3,
            socd_y: 4,
        };
        assert_eq!(build_status_text(&options).as_str(), "CFG(LS)  SOCD FIP,MIN");
    }

    #[test]
    fn test_status_text_unknown_codes_degrade() {
        let options = GamepadOptions {
            input_mode: 42,
            dpad_mode: 9,
            socd_x: 200,
            socd_y: 2,
        };
        assert_eq!(build_status_text(&options).as_str(), "  SOCD    ,LIP");
    }

    #[test]
    fn test_turbo_text_zero_padded() {
        assert_eq!(format_turbo(0).as_str(), "T 000");
        assert_eq!(format_turbo(7).as_str(), "T 007");
        assert_eq!(format_turbo(42).as_str(), "T 042");
        assert_eq!(format_turbo(255).as_str(), "T 255");
    }

    // -------------------------------------------------------------------------
    // Scroll State Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_scroll_disabled_when_text_fits() {
        let mut scroll = ScrollState::new();
        for _ in 0..10 {
            scroll.advance(0);
            assert_eq!(scroll.offset_px(), 0);
            scroll.advance(-4);
            assert_eq!(scroll.offset_px(), 0);
        }
    }

    #[test]
    fn test_scroll_reverses_exactly_at_bounds() {
        // max = 5 * 6 = 30, step = 18: 18, 30 (flip), 12, 0 (flip), 18 ...
        let mut scroll = ScrollState::new();
        let mut trace = [(0, ScrollDirection::Forward); 5];
        for entry in &mut trace {
            scroll.advance(5);
            *entry = (scroll.offset_px(), scroll.direction());
        }
        assert_eq!(
            trace,
            [
                (18, ScrollDirection::Forward),
                (30, ScrollDirection::Backward),
                (12, ScrollDirection::Backward),
                (0, ScrollDirection::Forward),
                (18, ScrollDirection::Forward),
            ]
        );
    }

    #[test]
    fn test_scroll_reclamps_when_text_shrinks() {
        let mut scroll = ScrollState::new();
        for _ in 0..3 {
            scroll.advance(20);
        }
        assert_eq!(scroll.offset_px(), 3 * STEP);

        scroll.advance(2);
        assert_eq!(scroll.offset_px(), 2 * FONT_WIDTH);
        assert_eq!(scroll.direction(), ScrollDirection::Backward);
    }

    // -------------------------------------------------------------------------
    // Marquee Gating Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_first_tick_always_updates() {
        let mut marquee = StatusMarquee::new();
        assert!(marquee.tick(0, &GamepadOptions::new(), None));
        assert_eq!(marquee.view().text, "XIN(DP)  SOCD NTL,NTL");
        assert_eq!(marquee.last_update_ms(), Some(0));
    }

    #[test]
    fn test_updates_gated_by_period() {
        let mut marquee = StatusMarquee::new();
        let mut options = GamepadOptions::new();
        marquee.tick(100, &options, None);

        options.input_mode = InputMode::Switch.raw();
        assert!(!marquee.tick(100 + SCROLL_UPDATE_PERIOD_MS, &options, None));
        assert_eq!(marquee.view().text, "XIN(DP)  SOCD NTL,NTL", "cached text until the period elapses");

        assert!(marquee.tick(101 + SCROLL_UPDATE_PERIOD_MS, &options, None));
        assert_eq!(marquee.view().text, "NSW(DP)  SOCD NTL,NTL");
    }

    #[test]
    fn test_clock_going_backwards_never_updates() {
        let mut marquee = StatusMarquee::new();
        marquee.tick(5_000, &GamepadOptions::new(), None);
        assert!(!marquee.tick(10, &GamepadOptions::new(), None));
        assert_eq!(marquee.last_update_ms(), Some(5_000));
    }

    #[test]
    fn test_turbo_rebuilt_on_update() {
        let mut marquee = StatusMarquee::new();
        let view = marquee.update(0, &GamepadOptions::new(), Some(TurboIndicator { shot_count: 9 }));
        assert_eq!(view.turbo, Some("T 009"));

        let view = marquee.update(5_000, &GamepadOptions::new(), None);
        assert_eq!(view.turbo, None);
    }

    #[test]
    fn test_view_compose_places_rows() {
        let mut marquee = StatusMarquee::new();
        let view = marquee.update(0, &GamepadOptions::new(), Some(TurboIndicator { shot_count: 120 }));
        let mut list = CommandList::new();
        view.compose(&mut list);

        assert_eq!(
            list.as_slice(),
            &[
                DrawCommand::Text {
                    text: "XIN(DP)  SOCD NTL,NTL",
                    origin: Point::new(0, 0),
                    scroll_px: 0,
                },
                DrawCommand::Text {
                    text: "T 120",
                    origin: Point::new(0, 56),
                    scroll_px: 0,
                },
            ]
        );
    }
}
