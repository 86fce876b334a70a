//! Gamepad OLED display simulator for desktop.
//!
//! Runs the display engine against an SDL window. Keyboard keys stand in
//! for gamepad buttons:
//!
//! | Key              | Action                         |
//! |------------------|--------------------------------|
//! | Arrows           | Directions                     |
//! | Z X C V          | B1 B2 B3 B4                    |
//! | A S / Q W        | L1 R1 / L2 R2                  |
//! | Tab              | Toggle web-config mode         |
//! | F1 / F2          | Next stick / button layout     |
//! | F3 / F4          | Next input mode / SOCD mode    |
//! | R                | Restart the boot splash        |

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod cli;
mod sink;
mod state;
mod timing;

use std::process::ExitCode;
use std::thread;
use std::time::Instant;

use clap::Parser;
use embedded_graphics_simulator::SimulatorEvent;
use gamepad_display_common::{FrameScheduler, SplashAssets};
use log::{debug, error, info};

use crate::cli::Args;
use crate::sink::SimulatorSink;
use crate::state::{Control, GamepadState, control_for};
use crate::timing::FRAME_TIME;

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let options = args.options();

    let mut assets = SplashAssets::builtin();
    match args.custom_splash() {
        Ok(Some(image)) => assets = assets.with_custom(image),
        Ok(None) => {}
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    }

    info!(
        "stick={} buttons={} splash={} speed={}ms",
        options.stick_layout.name(),
        options.button_layout.name(),
        options.splash_mode.name(),
        options.splash_speed_ms
    );

    let start = Instant::now();
    let mut scheduler = FrameScheduler::new(options, assets, 0);
    let mut sink = SimulatorSink::new("Gamepad Display Sim");
    let mut state = GamepadState::new();

    scheduler.setup(&mut sink);

    loop {
        let frame_start = Instant::now();
        let now_ms = start.elapsed().as_millis() as u64;

        // Handle events
        for ev in sink.events() {
            match ev {
                SimulatorEvent::Quit => return ExitCode::SUCCESS,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    let key = keycode.name();
                    match control_for(&key) {
                        Some(control) => apply_control(control, &mut scheduler, &mut state, now_ms),
                        None => state.key(&key, true),
                    }
                }
                SimulatorEvent::KeyUp { keycode, .. } => state.key(&keycode.name(), false),
                _ => {}
            }
        }

        let mode = scheduler.render_tick(&mut sink, now_ms, state.config_mode, &state.options, &state.snapshot);
        debug!("{now_ms} ms: {mode:?}");

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}

fn apply_control(
    control: Control,
    scheduler: &mut FrameScheduler,
    state: &mut GamepadState,
    now_ms: u64,
) {
    let mut options = *scheduler.options();
    match control {
        Control::ToggleConfigMode => {
            state.config_mode = !state.config_mode;
            info!("config mode {}", if state.config_mode { "on" } else { "off" });
        }
        Control::NextStickLayout => {
            options.stick_layout = options.stick_layout.next();
            scheduler.set_options(options);
            info!("stick layout: {}", options.stick_layout.name());
        }
        Control::NextButtonLayout => {
            options.button_layout = options.button_layout.next();
            scheduler.set_options(options);
            info!("button layout: {}", options.button_layout.name());
        }
        Control::NextInputMode => info!("input mode: {:?}", state.next_input_mode()),
        Control::NextSocdMode => info!("SOCD mode: {:?}", state.next_socd_mode()),
        Control::RestartBoot => {
            scheduler.restart_boot(now_ms);
            info!("boot restarted at {now_ms} ms");
        }
    }
}
