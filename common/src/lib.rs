//! Status display engine for a gamepad's 128x64 monochrome OLED.
//!
//! This crate contains the platform-agnostic display logic shared between
//! the desktop simulator and controller firmware:
//!
//! - [`config`]: Screen geometry, timing constants and runtime display options
//! - [`input`]: Pressed-button snapshot and gamepad mode codes
//! - [`commands`]: Draw command list produced by the composers
//! - [`marquee`]: Scrolling status line and turbo indicator
//! - [`splash`]: Boot splash animations
//! - [`layout`]: Button cluster layouts as data tables
//! - [`render`]: Command execution onto an `embedded-graphics` target
//! - [`framebuffer`]: Page-ordered in-memory framebuffer
//! - [`scheduler`]: Per-tick view selection, render and flush
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` outside of tests. Time is passed in as plain
//! milliseconds, so nothing depends on `std::time` or a particular HAL.
//! Enable the `defmt` feature for firmware logging.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod commands;
pub mod config;
pub mod framebuffer;
pub mod input;
pub mod layout;
pub mod marquee;
pub mod render;
pub mod scheduler;
pub mod splash;

// Re-export commonly used items
pub use commands::{CommandList, DrawCommand};
pub use config::{DisplayOptions, TurboIndicator};
pub use framebuffer::MonoFrameBuffer;
pub use input::{GamepadOptions, InputSnapshot, Signal};
pub use layout::{ButtonLayout, StickLayout};
pub use marquee::StatusMarquee;
pub use render::FrameSink;
pub use scheduler::{DisplayMode, FrameScheduler};
pub use splash::{SplashAssets, SplashMode};
