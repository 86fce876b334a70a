//! Boot splash sequencer.
//!
//! Pure function of elapsed time: [`compose_splash`] queues the sprites and
//! bars for one frame and keeps no state. The scheduler decides when the
//! splash window is open.
//!
//! # Close-In Animation
//!
//! ```text
//! top half    (43x39 at x=43): y = min(elapsed / speed - 39, 0)
//! bottom half (80x21 at x=24): y = max(64 - elapsed / (2 * speed), 44)
//! ```
//!
//! The top half slides down from above the screen and rests at row 0, the
//! bottom half slides up from below and rests at row 44.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Point;

use crate::commands::{CommandList, DrawCommand};
use crate::config::{CLOSE_IN_DELAY_MS, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Splash image width.
pub const SPLASH_WIDTH: u32 = SCREEN_WIDTH;

/// Splash image height.
pub const SPLASH_HEIGHT: u32 = SCREEN_HEIGHT;

/// Bytes in a full-screen 1-bpp image.
pub const SPLASH_BYTES: usize = (SPLASH_WIDTH as usize).div_ceil(8) * SPLASH_HEIGHT as usize;

pub const LOGO_TOP_WIDTH: u32 = 43;
pub const LOGO_TOP_HEIGHT: u32 = 39;
pub const LOGO_TOP_X: i32 = 43;

pub const LOGO_BOTTOM_WIDTH: u32 = 80;
pub const LOGO_BOTTOM_HEIGHT: u32 = 21;
pub const LOGO_BOTTOM_X: i32 = 24;

/// Resting row of the bottom logo half.
pub const LOGO_BOTTOM_REST_Y: i32 = 44;

const SPLASH_DATA: &[u8] = include_bytes!("../assets/splash.bin");
const LOGO_TOP_DATA: &[u8] = include_bytes!("../assets/logo_top.bin");
const LOGO_BOTTOM_DATA: &[u8] = include_bytes!("../assets/logo_bottom.bin");

const _: () = assert!(SPLASH_DATA.len() == SPLASH_BYTES);
const _: () = assert!(LOGO_TOP_DATA.len() == (LOGO_TOP_WIDTH as usize).div_ceil(8) * LOGO_TOP_HEIGHT as usize);
const _: () = assert!(LOGO_BOTTOM_DATA.len() == (LOGO_BOTTOM_WIDTH as usize).div_ceil(8) * LOGO_BOTTOM_HEIGHT as usize);

// =============================================================================
// Splash Mode
// =============================================================================

/// Boot splash variant.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SplashMode {
    /// No splash; the normal view shows from the first tick.
    None,
    /// Full-screen image for the whole window.
    Static,
    /// Logo halves closing in on an empty screen.
    CloseIn,
    /// Image first, then black bars and the logo close in over it.
    CloseInCustom,
}

impl SplashMode {
    /// Every mode, in storage code order.
    pub const ALL: [Self; 4] = [Self::None, Self::Static, Self::CloseIn, Self::CloseInCustom];

    /// Whether the splash window is used at all.
    #[inline]
    pub const fn is_enabled(self) -> bool { !matches!(self, Self::None) }

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Static => "static",
            Self::CloseIn => "closein",
            Self::CloseInCustom => "closein-custom",
        }
    }

    /// Look a mode up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> { Self::ALL.into_iter().find(|mode| mode.name() == name) }
}

// =============================================================================
// Assets
// =============================================================================

/// Bitmaps used by the splash.
///
/// All images are 1 bpp, rows padded to whole bytes, MSB first.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SplashAssets {
    /// Built-in full-screen image.
    pub default_image: &'static [u8],
    /// Integrator image. Used instead of the default when it is exactly one
    /// full screen.
    pub custom_image: &'static [u8],
    pub logo_top: &'static [u8],
    pub logo_bottom: &'static [u8],
}

impl SplashAssets {
    /// Packaged images, no custom image.
    pub const fn builtin() -> Self {
        Self {
            default_image: SPLASH_DATA,
            custom_image: &[],
            logo_top: LOGO_TOP_DATA,
            logo_bottom: LOGO_BOTTOM_DATA,
        }
    }

    /// Same assets with a custom full-screen image.
    #[must_use]
    pub const fn with_custom(
        mut self,
        image: &'static [u8],
    ) -> Self {
        self.custom_image = image;
        self
    }

    /// Whether a usable custom image is present.
    #[inline]
    pub const fn has_custom(&self) -> bool { self.custom_image.len() == SPLASH_BYTES }

    /// Image drawn as the splash background.
    pub const fn base_image(&self) -> &'static [u8] {
        if self.has_custom() { self.custom_image } else { self.default_image }
    }
}

impl Default for SplashAssets {
    fn default() -> Self { Self::builtin() }
}

// =============================================================================
// Composer
// =============================================================================

/// Rows of the top and bottom logo halves after `elapsed_ms`.
pub fn close_in_offsets(
    elapsed_ms: u64,
    speed_ms: u32,
) -> (i32, i32) {
    let speed = u64::from(speed_ms.max(1));
    let top_travel = to_rows(elapsed_ms / speed);
    let bottom_travel = to_rows(elapsed_ms / (2 * speed));

    let top = (top_travel - LOGO_TOP_HEIGHT as i32).min(0);
    let bottom = (SCREEN_HEIGHT as i32 - bottom_travel).max(LOGO_BOTTOM_REST_Y);
    (top, bottom)
}

/// Pixel travel, saturated past anything visible.
fn to_rows(travel: u64) -> i32 { travel.min(u64::from(SCREEN_HEIGHT)) as i32 }

/// Queue one splash frame for `elapsed_ms` since boot.
pub fn compose_splash(
    list: &mut CommandList<'_>,
    mode: SplashMode,
    elapsed_ms: u64,
    speed_ms: u32,
    assets: &SplashAssets,
) {
    match mode {
        SplashMode::None => {}
        SplashMode::Static => push_base(list, assets),
        SplashMode::CloseIn => push_logo(list, assets, elapsed_ms, speed_ms),
        SplashMode::CloseInCustom => {
            push_base(list, assets);

            let delay = u64::from(CLOSE_IN_DELAY_MS);
            if elapsed_ms > delay {
                let since = elapsed_ms - delay;
                let speed = u64::from(speed_ms.max(1));
                let right = SCREEN_WIDTH as i32 - 1;
                let bottom = SCREEN_HEIGHT as i32 - 1;

                list.push(DrawCommand::Rect {
                    corner_a: Point::zero(),
                    corner_b: Point::new(right, 1 + to_rows(since / speed)),
                    filled: true,
                    color: BinaryColor::Off,
                });
                list.push(DrawCommand::Rect {
                    corner_a: Point::new(0, bottom),
                    corner_b: Point::new(right, bottom - 1 - to_rows(since / (2 * speed))),
                    filled: true,
                    color: BinaryColor::Off,
                });
                push_logo(list, assets, since, speed_ms);
            }
        }
    }
}

fn push_base(
    list: &mut CommandList<'_>,
    assets: &SplashAssets,
) {
    list.push(DrawCommand::Sprite {
        image: assets.base_image(),
        width: SPLASH_WIDTH,
        height: SPLASH_HEIGHT,
        origin: Point::zero(),
    });
}

fn push_logo(
    list: &mut CommandList<'_>,
    assets: &SplashAssets,
    elapsed_ms: u64,
    speed_ms: u32,
) {
    let (top, bottom) = close_in_offsets(elapsed_ms, speed_ms);
    list.push(DrawCommand::Sprite {
        image: assets.logo_top,
        width: LOGO_TOP_WIDTH,
        height: LOGO_TOP_HEIGHT,
        origin: Point::new(LOGO_TOP_X, top),
    });
    list.push(DrawCommand::Sprite {
        image: assets.logo_bottom,
        width: LOGO_BOTTOM_WIDTH,
        height: LOGO_BOTTOM_HEIGHT,
        origin: Point::new(LOGO_BOTTOM_X, bottom),
    });
}

// =============================================================================
// Unit Tests
// =============================================================================
