//! Frame scheduler: the per-tick display policy.
//!
//! Each tick picks exactly one view, in strict priority order:
//!
//! 1. **Config mode**: status bar, `[Web Config Mode]` banner and firmware label.
//! 2. **Splash**: while the splash is enabled and the boot window is open.
//! 3. **Normal**: status bar, stick cluster, button cluster.
//!
//! The buffer is cleared before composing and flushed exactly once at the
//! end, whatever view was chosen. A failed flush is logged and the next tick
//! proceeds normally.

use embedded_graphics::prelude::Point;

use crate::commands::{CommandList, DrawCommand};
use crate::config::{
    CONFIG_BANNER,
    CONFIG_BANNER_ROW,
    CONFIG_LABEL_ROW,
    DisplayOptions,
    SPLASH_WINDOW_MS,
    TEXT_ROW_HEIGHT,
};
use crate::input::{GamepadOptions, InputSnapshot};
use crate::layout::{compose_buttons, compose_stick};
use crate::marquee::StatusMarquee;
use crate::render::{FrameSink, execute};
use crate::splash::{SplashAssets, compose_splash};

/// View drawn on a tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    ConfigMode,
    Splash,
    Normal,
}

/// Owns all display state between ticks.
pub struct FrameScheduler {
    options: DisplayOptions,
    assets: SplashAssets,
    boot_ms: u64,
    marquee: StatusMarquee,
    splash_finished: bool,
}

impl FrameScheduler {
    /// Scheduler for a display brought up at `boot_ms`.
    pub const fn new(
        options: DisplayOptions,
        assets: SplashAssets,
        boot_ms: u64,
    ) -> Self {
        Self {
            options,
            assets,
            boot_ms,
            marquee: StatusMarquee::new(),
            splash_finished: false,
        }
    }

    /// Blank the panel once before the first tick.
    pub fn setup<S: FrameSink>(
        &mut self,
        sink: &mut S,
    ) {
        sink.clear_buffer(true);
    }

    /// Options captured at construction.
    #[inline]
    pub const fn options(&self) -> &DisplayOptions { &self.options }

    /// Replace the display options, e.g. after a layout change.
    pub fn set_options(
        &mut self,
        options: DisplayOptions,
    ) {
        self.options = options;
    }

    /// Start the boot window again from `now_ms`.
    pub fn restart_boot(
        &mut self,
        now_ms: u64,
    ) {
        self.boot_ms = now_ms;
        self.splash_finished = false;
    }

    /// Time since boot. A clock behind the boot stamp counts as zero.
    #[inline]
    pub const fn elapsed_ms(
        &self,
        now_ms: u64,
    ) -> u64 {
        now_ms.saturating_sub(self.boot_ms)
    }

    /// View for a tick at `now_ms`. Does not change any state.
    pub const fn select_mode(
        &self,
        now_ms: u64,
        config_mode: bool,
    ) -> DisplayMode {
        if config_mode {
            DisplayMode::ConfigMode
        } else if self.options.splash_mode.is_enabled()
            && !self.splash_finished
            && self.elapsed_ms(now_ms) < SPLASH_WINDOW_MS
        {
            DisplayMode::Splash
        } else {
            DisplayMode::Normal
        }
    }

    /// Queue the commands for one tick without touching a display.
    pub fn compose_frame<'a>(
        &'a mut self,
        list: &mut CommandList<'a>,
        now_ms: u64,
        config_mode: bool,
        gamepad: &GamepadOptions,
        snapshot: &InputSnapshot,
    ) -> DisplayMode {
        let mode = self.select_mode(now_ms, config_mode);

        match mode {
            DisplayMode::ConfigMode => {
                self.marquee.update(now_ms, gamepad, self.options.turbo).compose(list);
                list.push(DrawCommand::Text {
                    text: CONFIG_BANNER,
                    origin: Point::new(0, CONFIG_BANNER_ROW * TEXT_ROW_HEIGHT),
                    scroll_px: 0,
                });
                list.push(DrawCommand::Text {
                    text: self.options.firmware_label,
                    origin: Point::new(0, CONFIG_LABEL_ROW * TEXT_ROW_HEIGHT),
                    scroll_px: 0,
                });
            }
            DisplayMode::Splash => {
                compose_splash(
                    list,
                    self.options.splash_mode,
                    self.elapsed_ms(now_ms),
                    self.options.splash_speed_ms,
                    &self.assets,
                );
            }
            DisplayMode::Normal => {
                if !self.splash_finished && self.options.splash_mode.is_enabled() {
                    self.splash_finished = true;
                    #[cfg(feature = "defmt")]
                    defmt::debug!("splash window closed at {} ms", self.elapsed_ms(now_ms));
                }
                self.marquee.update(now_ms, gamepad, self.options.turbo).compose(list);
                compose_stick(list, self.options.stick_layout, snapshot);
                compose_buttons(list, self.options.button_layout, snapshot);
            }
        }

        mode
    }

    /// Render and flush one tick.
    pub fn render_tick<S: FrameSink>(
        &mut self,
        sink: &mut S,
        now_ms: u64,
        config_mode: bool,
        gamepad: &GamepadOptions,
        snapshot: &InputSnapshot,
    ) -> DisplayMode {
        sink.clear_buffer(false);

        let mut list = CommandList::new();
        let mode = self.compose_frame(&mut list, now_ms, config_mode, gamepad, snapshot);
        execute(&list, sink);

        if sink.flush().is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("display flush failed");
        }

        mode
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
