//! Display geometry, timing policy and the options captured at setup.
//!
//! Geometry and timing are compile-time constants, in the same spirit as the
//! pre-computed layout constants used everywhere else in the rendering code.
//! The runtime part is [`DisplayOptions`]: board options read once from
//! storage when the display is brought up and then owned by the
//! [`FrameScheduler`](crate::scheduler::FrameScheduler).

use crate::layout::{ButtonLayout, StickLayout};
use crate::splash::SplashMode;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (SSD1306/SH1106 class 128x64 OLED).
pub const SCREEN_WIDTH: u32 = 128;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 64;

/// Glyph advance of the status font in pixels.
pub const FONT_WIDTH: i32 = 6;

/// Height of one text row. Rows map onto the controller's 8-pixel pages.
pub const TEXT_ROW_HEIGHT: i32 = 8;

/// Characters that fit on one text row.
pub const SCREEN_MAX_CHARS: usize = 21;

const _: () = assert!(SCREEN_MAX_CHARS as u32 * FONT_WIDTH as u32 <= SCREEN_WIDTH);

// =============================================================================
// Status Marquee Timing
// =============================================================================

/// Characters the status line moves per scroll step.
pub const SCROLL_RATE: i32 = 3;

/// Minimum time between two status rebuilds / scroll steps.
pub const SCROLL_UPDATE_PERIOD_MS: u64 = 1000;

/// Text row of the status marquee.
pub const STATUS_ROW: i32 = 0;

/// Text row of the turbo indicator.
pub const TURBO_ROW: i32 = 7;

// =============================================================================
// Splash Timing
// =============================================================================

/// Time after boot during which the splash view has priority.
pub const SPLASH_WINDOW_MS: u64 = 7500;

/// Default splash animation speed (milliseconds per pixel of travel).
pub const SPLASH_SPEED_MS: u32 = 90;

/// Delay before the close-in effect starts over a custom image.
pub const CLOSE_IN_DELAY_MS: u32 = 2500;

// =============================================================================
// Config-Mode View
// =============================================================================

/// Text row of the config-mode banner.
pub const CONFIG_BANNER_ROW: i32 = 3;

/// Text row of the firmware label in config mode.
pub const CONFIG_LABEL_ROW: i32 = 4;

/// Banner shown while the web configurator is active.
pub const CONFIG_BANNER: &str = "[Web Config Mode]";

/// Firmware label shown below the config banner unless overridden.
pub const DEFAULT_FIRMWARE_LABEL: &str = concat!("GP2040-CE : ", env!("CARGO_PKG_VERSION"));

// =============================================================================
// Runtime Options
// =============================================================================

/// Turbo indicator settings. Present only when a turbo button pin is bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TurboIndicator {
    /// Turbo shots per second shown as `T NNN`.
    pub shot_count: u8,
}

/// Display options captured once at setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayOptions {
    /// Layout of the left (directional) cluster.
    pub stick_layout: StickLayout,
    /// Layout of the right (action button) cluster.
    pub button_layout: ButtonLayout,
    /// Boot splash variant.
    pub splash_mode: SplashMode,
    /// Splash animation speed in milliseconds per pixel. Zero is treated as one.
    pub splash_speed_ms: u32,
    /// Turbo indicator, `None` when no turbo pin is bound.
    pub turbo: Option<TurboIndicator>,
    /// Second line of the config-mode view.
    pub firmware_label: &'static str,
}

impl DisplayOptions {
    /// Options used when storage holds nothing else.
    pub const fn new() -> Self {
        Self {
            stick_layout: StickLayout::ArcadeStick,
            button_layout: ButtonLayout::Arcade,
            splash_mode: SplashMode::Static,
            splash_speed_ms: SPLASH_SPEED_MS,
            turbo: None,
            firmware_label: DEFAULT_FIRMWARE_LABEL,
        }
    }

    /// Whether a turbo indicator is drawn under the status line.
    #[inline]
    pub const fn has_turbo(&self) -> bool { self.turbo.is_some() }
}

impl Default for DisplayOptions {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_row_fits_screen() {
        assert_eq!(SCREEN_MAX_CHARS as i32 * FONT_WIDTH, 126);
        assert!(TURBO_ROW * TEXT_ROW_HEIGHT < SCREEN_HEIGHT as i32);
    }

    #[test]
    fn test_default_options() {
        let options = DisplayOptions::default();
        assert_eq!(options.stick_layout, StickLayout::ArcadeStick);
        assert_eq!(options.button_layout, ButtonLayout::Arcade);
        assert_eq!(options.splash_mode, SplashMode::Static);
        assert_eq!(options.splash_speed_ms, 90);
        assert!(!options.has_turbo());
        assert!(options.firmware_label.starts_with("GP2040-CE : "));
    }
}
