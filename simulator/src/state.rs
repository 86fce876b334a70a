//! Gamepad state driven by the keyboard.
//!
//! Holds what the firmware would read from its input pipeline and option
//! storage each tick: the pressed-button snapshot, the mode codes shown on
//! the status line and whether the web configurator is active.

use gamepad_display_common::input::{GamepadOptions, InputMode, InputSnapshot, Signal, SocdMode};

// =============================================================================
// Key Bindings
// =============================================================================
//
// Keys are matched by their SDL key name ("Up", "Z", "F1", ...).

/// Keyboard key held down as a gamepad input.
pub fn signal_for(key: &str) -> Option<Signal> {
    let signal = match key {
        "Up" => Signal::Up,
        "Down" => Signal::Down,
        "Left" => Signal::Left,
        "Right" => Signal::Right,
        "Z" => Signal::B1,
        "X" => Signal::B2,
        "C" => Signal::B3,
        "V" => Signal::B4,
        "A" => Signal::L1,
        "S" => Signal::R1,
        "Q" => Signal::L2,
        "W" => Signal::R2,
        _ => return None,
    };
    Some(signal)
}

/// Simulator controls outside the gamepad itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Control {
    ToggleConfigMode,
    NextStickLayout,
    NextButtonLayout,
    NextInputMode,
    NextSocdMode,
    RestartBoot,
}

/// Keyboard key mapped to a simulator control.
pub fn control_for(key: &str) -> Option<Control> {
    let control = match key {
        "Tab" => Control::ToggleConfigMode,
        "F1" => Control::NextStickLayout,
        "F2" => Control::NextButtonLayout,
        "F3" => Control::NextInputMode,
        "F4" => Control::NextSocdMode,
        "R" => Control::RestartBoot,
        _ => return None,
    };
    Some(control)
}

// =============================================================================
// Gamepad State
// =============================================================================

/// Input modes the simulator cycles through. Config is entered with Tab.
const INPUT_MODES: [InputMode; 3] = [InputMode::XInput, InputMode::Switch, InputMode::Hid];

pub struct GamepadState {
    pub snapshot: InputSnapshot,
    pub options: GamepadOptions,
    pub config_mode: bool,
}

impl GamepadState {
    pub const fn new() -> Self {
        Self {
            snapshot: InputSnapshot::new(),
            options: GamepadOptions::new(),
            config_mode: false,
        }
    }

    /// Track a key press or release.
    pub fn key(
        &mut self,
        key: &str,
        pressed: bool,
    ) {
        if let Some(signal) = signal_for(key) {
            self.snapshot.set(signal, pressed);
        }
    }

    /// Step the input mode to the next protocol.
    pub fn next_input_mode(&mut self) -> InputMode {
        let current = INPUT_MODES
            .iter()
            .position(|mode| mode.raw() == self.options.input_mode)
            .unwrap_or(INPUT_MODES.len() - 1);
        let next = INPUT_MODES[(current + 1) % INPUT_MODES.len()];
        self.options.input_mode = next.raw();
        next
    }

    /// Step both SOCD axes to the next resolution mode.
    pub fn next_socd_mode(&mut self) -> SocdMode {
        let next = (usize::from(self.options.socd_x) + 1) % SocdMode::ALL.len();
        self.options.socd_x = next as u8;
        self.options.socd_y = next as u8;
        SocdMode::ALL[next]
    }
}

impl Default for GamepadState {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_track_snapshot() {
        let mut state = GamepadState::new();
        state.key("Z", true);
        state.key("Left", true);
        state.key("Return", true);
        assert!(state.snapshot.pressed(Signal::B1));
        assert!(state.snapshot.pressed(Signal::Left));

        state.key("Z", false);
        assert!(!state.snapshot.pressed(Signal::B1));
        assert!(state.snapshot.pressed(Signal::Left));
    }

    #[test]
    fn test_input_mode_cycle() {
        let mut state = GamepadState::new();
        assert_eq!(state.next_input_mode(), InputMode::Switch);
        assert_eq!(state.next_input_mode(), InputMode::Hid);
        assert_eq!(state.next_input_mode(), InputMode::XInput);
        assert_eq!(state.options.input_mode, 0);
    }

    #[test]
    fn test_socd_cycle_wraps() {
        let mut state = GamepadState::new();
        let modes: Vec<_> = (0..6).map(|_| state.next_socd_mode()).collect();
        assert_eq!(modes.first(), Some(&SocdMode::LastInputPriority));
        assert_eq!(modes.last(), Some(&SocdMode::NeutralPriority));
        assert_eq!(state.options.socd_x, state.options.socd_y);
    }

    #[test]
    fn test_controls_do_not_overlap_inputs() {
        for key in ["Tab", "F1", "F2", "F3", "F4", "R"] {
            assert!(control_for(key).is_some());
            assert!(signal_for(key).is_none());
        }
    }
}
