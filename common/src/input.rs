//! Input model consumed by the display: pressed-button snapshot and the
//! gamepad mode options shown on the status line.
//!
//! Mode options arrive as raw codes from option storage. Unknown codes are
//! not errors: [`InputMode::from_raw`] and friends return `None` and the
//! status line degrades to a placeholder.

// =============================================================================
// Signals and Snapshot
// =============================================================================

/// Physical input signals the layouts can bind to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Signal {
    Up,
    Down,
    Left,
    Right,
    B1,
    B2,
    B3,
    B4,
    L1,
    R1,
    L2,
    R2,
    S1,
    S2,
    A1,
}

impl Signal {
    /// Every signal, in bit order.
    pub const ALL: [Self; 15] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::B1,
        Self::B2,
        Self::B3,
        Self::B4,
        Self::L1,
        Self::R1,
        Self::L2,
        Self::R2,
        Self::S1,
        Self::S2,
        Self::A1,
    ];

    #[inline]
    const fn mask(self) -> u16 { 1 << self as u8 }
}

/// Pressed state of every input for one tick.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputSnapshot {
    bits: u16,
}

impl InputSnapshot {
    /// Snapshot with nothing pressed.
    pub const fn new() -> Self { Self { bits: 0 } }

    /// Snapshot from a raw bitmask in [`Signal`] bit order.
    pub const fn from_bits(bits: u16) -> Self { Self { bits } }

    /// Raw bitmask in [`Signal`] bit order.
    #[inline]
    pub const fn bits(&self) -> u16 { self.bits }

    /// Copy of this snapshot with `signal` pressed.
    #[must_use]
    pub const fn with(self, signal: Signal) -> Self { Self { bits: self.bits | signal.mask() } }

    /// Set or clear one signal.
    pub fn set(
        &mut self,
        signal: Signal,
        pressed: bool,
    ) {
        if pressed {
            self.bits |= signal.mask();
        } else {
            self.bits &= !signal.mask();
        }
    }

    /// Whether `signal` is held this tick.
    #[inline]
    pub const fn pressed(&self, signal: Signal) -> bool { self.bits & signal.mask() != 0 }
}

// =============================================================================
// Mode Options
// =============================================================================

/// USB protocol the gamepad presents.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputMode {
    XInput,
    Switch,
    Hid,
    Config,
}

impl InputMode {
    /// Decode a stored mode code.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::XInput),
            1 => Some(Self::Switch),
            2 => Some(Self::Hid),
            255 => Some(Self::Config),
            _ => None,
        }
    }

    /// Stored code of this mode.
    pub const fn raw(self) -> u8 {
        match self {
            Self::XInput => 0,
            Self::Switch => 1,
            Self::Hid => 2,
            Self::Config => 255,
        }
    }

    /// Status-line acronym.
    pub const fn acronym(self) -> &'static str {
        match self {
            Self::Hid => "DIN",
            Self::Switch => "NSW",
            Self::XInput => "XIN",
            Self::Config => "CFG",
        }
    }
}

/// What the directional inputs are reported as.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DpadMode {
    Digital,
    LeftAnalog,
    RightAnalog,
}

impl DpadMode {
    /// Decode a stored d-pad mode code.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Digital),
            1 => Some(Self::LeftAnalog),
            2 => Some(Self::RightAnalog),
            _ => None,
        }
    }

    /// Status-line tag, parentheses included.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Digital => "(DP)",
            Self::LeftAnalog => "(LS)",
            Self::RightAnalog => "(RS)",
        }
    }
}

/// Resolution policy for simultaneous opposing cardinal directions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SocdMode {
    None,
    NeutralPriority,
    LastInputPriority,
    FirstInputPriority,
    CardinalMinPriority,
    CardinalMaxPriority,
}

/// Shown for SOCD codes this build does not know.
pub const SOCD_PLACEHOLDER: &str = "   ";

impl SocdMode {
    /// Every mode, in code order.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::NeutralPriority,
        Self::LastInputPriority,
        Self::FirstInputPriority,
        Self::CardinalMinPriority,
        Self::CardinalMaxPriority,
    ];

    /// Decode a stored SOCD code.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::None),
            1 => Some(Self::NeutralPriority),
            2 => Some(Self::LastInputPriority),
            3 => Some(Self::FirstInputPriority),
            4 => Some(Self::CardinalMinPriority),
            5 => Some(Self::CardinalMaxPriority),
            _ => None,
        }
    }

    /// Three-letter acronym.
    pub const fn acronym(self) -> &'static str {
        match self {
            Self::None => "OFF",
            Self::NeutralPriority => "NTL",
            Self::LastInputPriority => "LIP",
            Self::FirstInputPriority => "FIP",
            Self::CardinalMinPriority => "MIN",
            Self::CardinalMaxPriority => "MAX",
        }
    }
}

/// Acronym for a raw SOCD code, [`SOCD_PLACEHOLDER`] when unknown.
pub const fn socd_acronym(raw: u8) -> &'static str {
    match SocdMode::from_raw(raw) {
        Some(mode) => mode.acronym(),
        None => SOCD_PLACEHOLDER,
    }
}

/// Raw mode codes read from option storage for the status line.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadOptions {
    pub input_mode: u8,
    pub dpad_mode: u8,
    pub socd_x: u8,
    pub socd_y: u8,
}

impl GamepadOptions {
    /// XInput, digital d-pad, neutral SOCD on both axes.
    pub const fn new() -> Self {
        Self {
            input_mode: 0,
            dpad_mode: 0,
            socd_x: 1,
            socd_y: 1,
        }
    }
}

impl Default for GamepadOptions {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_set_and_clear() {
        let mut snapshot = InputSnapshot::new();
        assert!(!snapshot.pressed(Signal::B1));

        snapshot.set(Signal::B1, true);
        snapshot.set(Signal::Left, true);
        assert!(snapshot.pressed(Signal::B1));
        assert!(snapshot.pressed(Signal::Left));
        assert!(!snapshot.pressed(Signal::Right));

        snapshot.set(Signal::B1, false);
        assert!(!snapshot.pressed(Signal::B1));
        assert!(snapshot.pressed(Signal::Left));
    }

    #[test]
    fn test_snapshot_signals_are_independent() {
        for signal in Signal::ALL {
            let snapshot = InputSnapshot::new().with(signal);
            for other in Signal::ALL {
                assert_eq!(snapshot.pressed(other), other == signal, "{signal:?} leaked into {other:?}");
            }
        }
    }

    #[test]
    fn test_socd_acronyms() {
        let expected = ["OFF", "NTL", "LIP", "FIP", "MIN", "MAX"];
        for (raw, acronym) in expected.iter().enumerate() {
            assert_eq!(socd_acronym(raw as u8), *acronym);
        }
        assert_eq!(socd_acronym(6), SOCD_PLACEHOLDER);
        assert_eq!(socd_acronym(255), "   ");
    }

    #[test]
    fn test_input_mode_round_trip_codes() {
        for mode in [InputMode::XInput, InputMode::Switch, InputMode::Hid, InputMode::Config] {
            assert_eq!(InputMode::from_raw(mode.raw()), Some(mode));
        }
        assert_eq!(InputMode::from_raw(7), None);
        assert_eq!(InputMode::Hid.acronym(), "DIN");
    }

    #[test]
    fn test_dpad_tags() {
        assert_eq!(DpadMode::from_raw(0).map(DpadMode::tag), Some("(DP)"));
        assert_eq!(DpadMode::from_raw(1).map(DpadMode::tag), Some("(LS)"));
        assert_eq!(DpadMode::from_raw(2).map(DpadMode::tag), Some("(RS)"));
        assert_eq!(DpadMode::from_raw(3), None);
    }
}
