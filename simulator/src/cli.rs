//! Command-line options for the initial display configuration.
//!
//! ```text
//! simulator [--stick NAME] [--buttons NAME] [--splash MODE] [--speed MS]
//!           [--turbo N] [--custom-splash FILE]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use gamepad_display_common::config::{DisplayOptions, SPLASH_SPEED_MS, TurboIndicator};
use gamepad_display_common::layout::{ButtonLayout, StickLayout};
use gamepad_display_common::splash::{SPLASH_BYTES, SplashMode};

#[derive(Debug, thiserror::Error)]
pub enum SplashError {
    #[error("failed to read splash image: {0}")]
    Read(#[from] std::io::Error),

    #[error("splash image must be {expected} bytes, got {0}", expected = SPLASH_BYTES)]
    Size(usize),
}

#[derive(Parser, Debug)]
#[command(name = "simulator")]
#[command(about = "Gamepad OLED status display on the desktop", long_about = None)]
pub struct Args {
    /// Stick-side layout [default: stick]
    #[arg(long, value_name = "NAME", value_parser = parse_stick)]
    pub stick: Option<StickLayout>,

    /// Button-side layout [default: arcade]
    #[arg(long, value_name = "NAME", value_parser = parse_buttons)]
    pub buttons: Option<ButtonLayout>,

    /// Boot splash mode [default: static]
    #[arg(long, value_name = "MODE", value_parser = parse_splash)]
    pub splash: Option<SplashMode>,

    /// Splash animation speed in milliseconds per pixel
    #[arg(long, value_name = "MS", default_value_t = SPLASH_SPEED_MS)]
    pub speed: u32,

    /// Show the turbo indicator with this shot count
    #[arg(long, value_name = "N")]
    pub turbo: Option<u8>,

    /// Raw 128x64 1-bpp image replacing the built-in splash
    #[arg(long, value_name = "FILE")]
    pub custom_splash: Option<PathBuf>,
}

impl Args {
    /// Display options selected on the command line.
    pub fn options(&self) -> DisplayOptions {
        let mut options = DisplayOptions::new();
        if let Some(stick) = self.stick {
            options.stick_layout = stick;
        }
        if let Some(buttons) = self.buttons {
            options.button_layout = buttons;
        }
        if let Some(splash) = self.splash {
            options.splash_mode = splash;
        }
        options.splash_speed_ms = self.speed;
        options.turbo = self.turbo.map(|shot_count| TurboIndicator { shot_count });
        options
    }

    /// Load `--custom-splash`, if given.
    pub fn custom_splash(&self) -> Result<Option<&'static [u8]>, SplashError> {
        self.custom_splash.as_deref().map(load_splash).transpose()
    }
}

fn parse_stick(name: &str) -> Result<StickLayout, String> {
    StickLayout::from_name(name).ok_or_else(|| unknown(name, StickLayout::ALL.map(StickLayout::name)))
}

fn parse_buttons(name: &str) -> Result<ButtonLayout, String> {
    ButtonLayout::from_name(name).ok_or_else(|| unknown(name, ButtonLayout::ALL.map(ButtonLayout::name)))
}

fn parse_splash(name: &str) -> Result<SplashMode, String> {
    SplashMode::from_name(name).ok_or_else(|| unknown(name, SplashMode::ALL.map(SplashMode::name)))
}

fn unknown<const N: usize>(
    name: &str,
    known: [&str; N],
) -> String {
    format!("unknown name '{name}', expected one of: {}", known.join(", "))
}

/// Read a raw splash image. It lives for the rest of the process.
pub fn load_splash(path: &Path) -> Result<&'static [u8], SplashError> {
    let data = fs::read(path)?;
    if data.len() != SPLASH_BYTES {
        return Err(SplashError::Size(data.len()));
    }
    Ok(Box::leak(data.into_boxed_slice()))
}
