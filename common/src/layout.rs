//! Layout registry: button clusters as data.
//!
//! Every stick-side and button-side layout is a static [`LayoutTable`]: an
//! anchor, a unit (radius or side length), a padding and a list of shapes
//! positioned by [`Offset`]s from the anchor. One generic composer,
//! [`compose`], turns a table plus an [`InputSnapshot`] into draw commands,
//! so adding a layout means adding a table, not a function.
//!
//! # Geometry
//!
//! ```text
//! circle/diamond margin = unit * 2 + padding
//! square margin         = unit + padding
//! coordinate            = trunc(anchor + stepped + scaled)
//!   stepped = k * (margin / d)      whole-pixel step, divided first
//!   scaled  = margin * num / den    exact, truncated with the sum
//! ```
//!
//! The two terms keep positions pixel-exact for offsets such as
//! `margin - margin / 4` (a stepped quarter) next to `margin * 0.875`
//! (a scaled fraction).
//!
//! The arcade stick is the one layout that is not a plain table: its ball
//! position depends on the combination of pressed directions, resolved by
//! [`StickDirection::resolve`].

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Point;

use crate::commands::{CommandList, DrawCommand};
use crate::input::{InputSnapshot, Signal};

// =============================================================================
// Table Model
// =============================================================================

/// Rational coefficient `num / den`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frac {
    num: i32,
    den: i32,
}

impl Frac {
    /// `num / den`. `den` must be positive.
    pub const fn new(
        num: i32,
        den: i32,
    ) -> Self {
        Self { num, den }
    }

    /// Whole multiple.
    pub const fn whole(num: i32) -> Self { Self { num, den: 1 } }

    /// `num * (margin / den)`, dividing first.
    #[inline]
    pub const fn step(
        self,
        margin: i32,
    ) -> i32 {
        self.num * (margin / self.den)
    }
}

/// Offset of one coordinate from the anchor, in terms of the margin.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Offset {
    /// Exact multiple, truncated together with the rest of the sum.
    pub scaled: Frac,
    /// Whole-pixel step, truncated on its own.
    pub stepped: Frac,
}

impl Offset {
    pub const ZERO: Self = exact(0, 1);

    /// Same offset with a stepped term `num * (margin / den)` added.
    #[must_use]
    pub const fn and_step(
        self,
        num: i32,
        den: i32,
    ) -> Self {
        Self {
            scaled: self.scaled,
            stepped: Frac::new(num, den),
        }
    }

    /// Screen coordinate for an anchor coordinate and margin, truncated
    /// toward zero.
    #[inline]
    pub const fn resolve(
        self,
        origin: i32,
        margin: i32,
    ) -> i32 {
        let base = origin + self.stepped.step(margin);
        (base * self.scaled.den + margin * self.scaled.num) / self.scaled.den
    }
}

/// Outline of one button.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shape {
    /// Circle of radius `unit` centred on the position.
    Circle,
    /// Square of side `unit` with its top-left corner on the position.
    Square,
    /// Diamond with half-diagonal `unit` centred on the position.
    Diamond,
    /// Stick gate: circle of radius `unit * 5 / 4`.
    Gate,
}

/// What decides whether a shape is filled.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fill {
    /// Filled while the signal is pressed.
    Signal(Signal),
    /// Always an outline.
    Never,
    /// Always filled.
    Always,
}

impl Fill {
    #[inline]
    const fn resolve(
        self,
        snapshot: &InputSnapshot,
    ) -> bool {
        match self {
            Self::Signal(signal) => snapshot.pressed(signal),
            Self::Never => false,
            Self::Always => true,
        }
    }
}

/// One button of a layout.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShapeSpec {
    pub shape: Shape,
    pub dx: Offset,
    pub dy: Offset,
    pub fill: Fill,
}

/// How the margin between buttons follows from unit and padding.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Margin {
    /// `unit * 2 + padding`, for radius-sized shapes.
    Diameter,
    /// `unit + padding`, for side-sized shapes.
    Side,
}

impl Margin {
    /// Margin for the given unit and padding.
    pub const fn compute(
        self,
        unit: i32,
        padding: i32,
    ) -> i32 {
        match self {
            Self::Diameter => unit * 2 + padding,
            Self::Side => unit + padding,
        }
    }
}

/// Static description of one cluster.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LayoutTable {
    /// Default anchor.
    pub anchor: Point,
    /// Default radius or side length.
    pub unit: i32,
    /// Default gap between buttons.
    pub padding: i32,
    pub margin: Margin,
    pub shapes: &'static [ShapeSpec],
}

/// A shape resolved to screen coordinates for one snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Placement {
    pub shape: Shape,
    pub position: Point,
    pub filled: bool,
    /// Signal driving the fill, if any.
    pub signal: Option<Signal>,
}

/// Exact multiple `num / den` of the margin.
const fn exact(
    num: i32,
    den: i32,
) -> Offset {
    Offset {
        scaled: Frac::new(num, den),
        stepped: Frac::whole(0),
    }
}

/// Stepped multiple `num * (margin / den)`.
const fn step(
    num: i32,
    den: i32,
) -> Offset {
    Offset::ZERO.and_step(num, den)
}

const fn circle(
    dx: Offset,
    dy: Offset,
    signal: Signal,
) -> ShapeSpec {
    ShapeSpec {
        shape: Shape::Circle,
        dx,
        dy,
        fill: Fill::Signal(signal),
    }
}

const fn square(
    dx: i32,
    dy: i32,
    signal: Signal,
) -> ShapeSpec {
    ShapeSpec {
        shape: Shape::Square,
        dx: exact(dx, 1),
        dy: exact(dy, 1),
        fill: Fill::Signal(signal),
    }
}

const fn diamond(
    dx: Offset,
    dy: Offset,
    signal: Signal,
) -> ShapeSpec {
    ShapeSpec {
        shape: Shape::Diamond,
        dx,
        dy,
        fill: Fill::Signal(signal),
    }
}

const ZERO: Offset = Offset::ZERO;
const ONE: Offset = exact(1, 1);
const MID: Offset = step(1, 2);
/// Raised a quarter margin.
const UP_QUARTER: Offset = step(-1, 4);
/// One row down, raised a quarter margin.
const DOWN_LESS_QUARTER: Offset = ONE.and_step(-1, 4);

// =============================================================================
// Stick-Side Tables
// =============================================================================

const STICK_GATE: LayoutTable = LayoutTable {
    anchor: Point::new(8, 28),
    unit: 8,
    padding: 2,
    margin: Margin::Diameter,
    shapes: &[ShapeSpec {
        shape: Shape::Gate,
        dx: MID,
        dy: MID,
        fill: Fill::Never,
    }],
};

const STICKLESS: LayoutTable = LayoutTable {
    anchor: Point::new(8, 20),
    unit: 8,
    padding: 2,
    margin: Margin::Diameter,
    shapes: &[
        circle(ZERO, ZERO, Signal::Left),
        circle(ONE, ZERO, Signal::Down),
        circle(exact(15, 8), MID, Signal::Right),
        circle(exact(9, 4), exact(15, 8), Signal::Up),
    ],
};

const WASD_BOX: LayoutTable = LayoutTable {
    anchor: Point::new(8, 28),
    unit: 7,
    padding: 3,
    margin: Margin::Diameter,
    shapes: &[
        circle(ZERO, exact(1, 2), Signal::Left),
        circle(ONE, exact(7, 8), Signal::Down),
        circle(exact(3, 2), exact(-1, 8), Signal::Up),
        circle(exact(2, 1), exact(5, 4), Signal::Right),
    ],
};

const UDLR: LayoutTable = LayoutTable {
    anchor: Point::new(8, 28),
    unit: 8,
    padding: 2,
    margin: Margin::Diameter,
    shapes: &[
        circle(ZERO, MID, Signal::Left),
        circle(exact(7, 8), UP_QUARTER, Signal::Up),
        circle(exact(7, 8), exact(5, 4), Signal::Down),
        circle(exact(13, 8), MID, Signal::Right),
    ],
};

const KEYBOARD_ANGLED: LayoutTable = LayoutTable {
    anchor: Point::new(18, 28),
    unit: 5,
    padding: 2,
    margin: Margin::Diameter,
    shapes: &[
        diamond(ZERO, ZERO, Signal::Left),
        diamond(MID, MID, Signal::Down),
        diamond(ONE, ZERO, Signal::Up),
        diamond(ONE, ONE, Signal::Right),
    ],
};

const MAME_A: LayoutTable = LayoutTable {
    anchor: Point::new(8, 28),
    unit: 10,
    padding: 1,
    margin: Margin::Side,
    shapes: &[
        square(0, 1, Signal::Left),
        square(1, 1, Signal::Down),
        square(1, 0, Signal::Up),
        square(2, 1, Signal::Right),
    ],
};

const DANCEPAD_A: LayoutTable = LayoutTable {
    anchor: Point::new(39, 12),
    unit: 15,
    padding: 2,
    margin: Margin::Side,
    shapes: &[
        square(0, 1, Signal::Left),
        square(1, 2, Signal::Down),
        square(1, 0, Signal::Up),
        square(2, 1, Signal::Right),
    ],
};

// =============================================================================
// Button-Side Tables
// =============================================================================

const ARCADE: LayoutTable = LayoutTable {
    anchor: Point::new(8, 28),
    unit: 8,
    padding: 2,
    margin: Margin::Diameter,
    shapes: &[
        circle(exact(25, 8), ZERO, Signal::B3),
        circle(exact(33, 8), UP_QUARTER, Signal::B4),
        circle(exact(41, 8), UP_QUARTER, Signal::R1),
        circle(exact(49, 8), ZERO, Signal::L1),
        circle(exact(23, 8), ONE, Signal::B1),
        circle(exact(31, 8), DOWN_LESS_QUARTER, Signal::B2),
        circle(exact(39, 8), DOWN_LESS_QUARTER, Signal::R2),
        circle(exact(47, 8), ONE, Signal::L2),
    ],
};

const STICKLESS_BUTTONS: LayoutTable = LayoutTable {
    anchor: Point::new(8, 20),
    unit: 8,
    padding: 2,
    margin: Margin::Diameter,
    shapes: &[
        circle(exact(11, 4), ZERO, Signal::B3),
        circle(exact(15, 4), UP_QUARTER, Signal::B4),
        circle(exact(19, 4), UP_QUARTER, Signal::R1),
        circle(exact(23, 4), ZERO, Signal::L1),
        circle(exact(11, 4), ONE, Signal::B1),
        circle(exact(15, 4), DOWN_LESS_QUARTER, Signal::B2),
        circle(exact(19, 4), DOWN_LESS_QUARTER, Signal::R2),
        circle(exact(23, 4), ONE, Signal::L2),
    ],
};

const WASD_BUTTONS: LayoutTable = LayoutTable {
    anchor: Point::new(8, 28),
    unit: 7,
    padding: 3,
    margin: Margin::Diameter,
    shapes: &[
        circle(exact(29, 8), ZERO, Signal::B3),
        circle(exact(37, 8), UP_QUARTER, Signal::B4),
        circle(exact(45, 8), UP_QUARTER, Signal::R1),
        circle(exact(53, 8), ZERO, Signal::L1),
        circle(exact(13, 4), ONE, Signal::B1),
        circle(exact(17, 4), DOWN_LESS_QUARTER, Signal::B2),
        circle(exact(21, 4), DOWN_LESS_QUARTER, Signal::R2),
        circle(exact(25, 4), ONE, Signal::L2),
    ],
};

/// Vewlix bottom row: shifted left a stepped third of a margin.
const fn vewlix_low(
    num: i32,
    dy: Offset,
    signal: Signal,
) -> ShapeSpec {
    circle(exact(num, 4).and_step(-1, 3), dy, signal)
}

const VEWLIX: LayoutTable = LayoutTable {
    anchor: Point::new(8, 28),
    unit: 8,
    padding: 2,
    margin: Margin::Diameter,
    shapes: &[
        circle(exact(11, 4), exact(1, 5), Signal::B3),
        circle(exact(15, 4), UP_QUARTER, Signal::B4),
        circle(exact(19, 4), UP_QUARTER, Signal::R1),
        circle(exact(23, 4), UP_QUARTER, Signal::L1),
        vewlix_low(11, exact(6, 5), Signal::B1),
        vewlix_low(15, DOWN_LESS_QUARTER, Signal::B2),
        vewlix_low(19, DOWN_LESS_QUARTER, Signal::R2),
        vewlix_low(23, DOWN_LESS_QUARTER, Signal::L2),
    ],
};

const VEWLIX7: LayoutTable = LayoutTable {
    anchor: Point::new(8, 28),
    unit: 8,
    padding: 2,
    margin: Margin::Diameter,
    shapes: &[
        circle(exact(11, 4), exact(1, 5), Signal::B3),
        circle(exact(15, 4), UP_QUARTER, Signal::B4),
        circle(exact(19, 4), UP_QUARTER, Signal::R1),
        circle(exact(23, 4), UP_QUARTER, Signal::L1),
        vewlix_low(11, exact(6, 5), Signal::B1),
        vewlix_low(15, DOWN_LESS_QUARTER, Signal::B2),
        vewlix_low(19, DOWN_LESS_QUARTER, Signal::R2),
    ],
};

const CAPCOM: LayoutTable = LayoutTable {
    anchor: Point::new(6, 28),
    unit: 8,
    padding: 2,
    margin: Margin::Diameter,
    shapes: &[
        circle(exact(13, 4), ZERO, Signal::B3),
        circle(exact(17, 4), ZERO, Signal::B4),
        circle(exact(21, 4), ZERO, Signal::R1),
        circle(exact(25, 4), ZERO, Signal::L1),
        circle(exact(13, 4), ONE, Signal::B1),
        circle(exact(17, 4), ONE, Signal::B2),
        circle(exact(21, 4), ONE, Signal::R2),
        circle(exact(25, 4), ONE, Signal::L2),
    ],
};

const CAPCOM6: LayoutTable = LayoutTable {
    anchor: Point::new(16, 28),
    unit: 8,
    padding: 2,
    margin: Margin::Diameter,
    shapes: &[
        circle(exact(13, 4), ZERO, Signal::B3),
        circle(exact(17, 4), ZERO, Signal::B4),
        circle(exact(21, 4), ZERO, Signal::R1),
        circle(exact(13, 4), ONE, Signal::B1),
        circle(exact(17, 4), ONE, Signal::B2),
        circle(exact(21, 4), ONE, Signal::R2),
    ],
};

const SEGA_2P: LayoutTable = LayoutTable {
    anchor: Point::new(8, 28),
    unit: 8,
    padding: 2,
    margin: Margin::Diameter,
    shapes: &[
        circle(exact(11, 4), step(1, 3), Signal::B3),
        circle(exact(15, 4), UP_QUARTER, Signal::B4),
        circle(exact(19, 4), UP_QUARTER, Signal::R1),
        circle(exact(23, 4), ZERO, Signal::L1),
        circle(exact(11, 4), ONE.and_step(1, 3), Signal::B1),
        circle(exact(15, 4), DOWN_LESS_QUARTER, Signal::B2),
        circle(exact(19, 4), DOWN_LESS_QUARTER, Signal::R2),
        circle(exact(23, 4), ONE, Signal::L2),
    ],
};

const NOIR_8: LayoutTable = LayoutTable {
    anchor: Point::new(8, 28),
    unit: 8,
    padding: 2,
    margin: Margin::Diameter,
    shapes: &[
        circle(exact(11, 4), exact(2, 7), Signal::B3),
        circle(exact(15, 4), UP_QUARTER, Signal::B4),
        circle(exact(19, 4), UP_QUARTER, Signal::R1),
        circle(exact(23, 4), ZERO, Signal::L1),
        circle(exact(11, 4), exact(9, 7), Signal::B1),
        circle(exact(15, 4), DOWN_LESS_QUARTER, Signal::B2),
        circle(exact(19, 4), DOWN_LESS_QUARTER, Signal::R2),
        circle(exact(23, 4), ONE, Signal::L2),
    ],
};

const MAME_B: LayoutTable = LayoutTable {
    anchor: Point::new(68, 28),
    unit: 10,
    padding: 1,
    margin: Margin::Side,
    shapes: &[
        square(0, 0, Signal::B3),
        square(1, 0, Signal::B4),
        square(2, 0, Signal::R1),
        square(0, 1, Signal::B1),
        square(1, 1, Signal::B2),
        square(2, 1, Signal::R2),
    ],
};

const DANCEPAD_B: LayoutTable = LayoutTable {
    anchor: Point::new(39, 12),
    unit: 15,
    padding: 2,
    margin: Margin::Side,
    shapes: &[
        square(0, 0, Signal::B2),
        square(0, 2, Signal::B4),
        square(2, 0, Signal::B1),
        square(2, 2, Signal::B3),
    ],
};

// =============================================================================
// Layout Identifiers
// =============================================================================

/// Left-hand (directional) cluster.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StickLayout {
    /// Lever with gate and ball.
    ArcadeStick,
    /// Hitbox-style buttons.
    Stickless,
    /// Angled WASD buttons.
    WasdBox,
    /// Basic up/down/left/right buttons.
    Udlr,
    /// MixBox diamonds.
    KeyboardAngled,
    /// MAME keyboard, directional half.
    MameA,
    /// Dance pad arrows.
    DancepadA,
}

impl StickLayout {
    /// Every layout, in storage code order.
    pub const ALL: [Self; 7] = [
        Self::ArcadeStick,
        Self::Stickless,
        Self::WasdBox,
        Self::Udlr,
        Self::KeyboardAngled,
        Self::MameA,
        Self::DancepadA,
    ];

    /// Decode a stored layout code.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        if (raw as usize) < Self::ALL.len() {
            Some(Self::ALL[raw as usize])
        } else {
            None
        }
    }

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ArcadeStick => "stick",
            Self::Stickless => "stickless",
            Self::WasdBox => "wasd",
            Self::Udlr => "udlr",
            Self::KeyboardAngled => "mixbox",
            Self::MameA => "mame",
            Self::DancepadA => "dancepad",
        }
    }

    /// Look a layout up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> { Self::ALL.into_iter().find(|layout| layout.name() == name) }

    /// Following layout, wrapping around.
    #[must_use]
    pub fn next(self) -> Self { Self::ALL[(self as usize + 1) % Self::ALL.len()] }

    /// Table drawn for this layout. For the arcade stick this is the gate only.
    pub const fn table(self) -> &'static LayoutTable {
        match self {
            Self::ArcadeStick => &STICK_GATE,
            Self::Stickless => &STICKLESS,
            Self::WasdBox => &WASD_BOX,
            Self::Udlr => &UDLR,
            Self::KeyboardAngled => &KEYBOARD_ANGLED,
            Self::MameA => &MAME_A,
            Self::DancepadA => &DANCEPAD_A,
        }
    }
}

/// Right-hand (action button) cluster.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonLayout {
    Arcade,
    Stickless,
    /// Angled buttons matching [`StickLayout::WasdBox`].
    Wasd,
    Vewlix,
    /// Vewlix without L2.
    Vewlix7,
    Capcom,
    /// Capcom without the L column.
    Capcom6,
    Sega2p,
    Noir8,
    /// MAME keyboard, button half.
    MameB,
    /// Dance pad corners.
    DancepadB,
}

impl ButtonLayout {
    /// Every layout, in storage code order.
    pub const ALL: [Self; 11] = [
        Self::Arcade,
        Self::Stickless,
        Self::Wasd,
        Self::Vewlix,
        Self::Vewlix7,
        Self::Capcom,
        Self::Capcom6,
        Self::Sega2p,
        Self::Noir8,
        Self::MameB,
        Self::DancepadB,
    ];

    /// Decode a stored layout code.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        if (raw as usize) < Self::ALL.len() {
            Some(Self::ALL[raw as usize])
        } else {
            None
        }
    }

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Arcade => "arcade",
            Self::Stickless => "stickless",
            Self::Wasd => "wasd",
            Self::Vewlix => "vewlix",
            Self::Vewlix7 => "vewlix7",
            Self::Capcom => "capcom",
            Self::Capcom6 => "capcom6",
            Self::Sega2p => "sega2p",
            Self::Noir8 => "noir8",
            Self::MameB => "mame",
            Self::DancepadB => "dancepad",
        }
    }

    /// Look a layout up by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> { Self::ALL.into_iter().find(|layout| layout.name() == name) }

    /// Following layout, wrapping around.
    #[must_use]
    pub fn next(self) -> Self { Self::ALL[(self as usize + 1) % Self::ALL.len()] }

    /// Table drawn for this layout.
    pub const fn table(self) -> &'static LayoutTable {
        match self {
            Self::Arcade => &ARCADE,
            Self::Stickless => &STICKLESS_BUTTONS,
            Self::Wasd => &WASD_BUTTONS,
            Self::Vewlix => &VEWLIX,
            Self::Vewlix7 => &VEWLIX7,
            Self::Capcom => &CAPCOM,
            Self::Capcom6 => &CAPCOM6,
            Self::Sega2p => &SEGA_2P,
            Self::Noir8 => &NOIR_8,
            Self::MameB => &MAME_B,
            Self::DancepadB => &DANCEPAD_B,
        }
    }
}

// =============================================================================
// Arcade Stick Ball
// =============================================================================

/// Resolved lever direction of the arcade stick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StickDirection {
    UpLeft,
    UpRight,
    Up,
    DownLeft,
    DownRight,
    Down,
    Left,
    Right,
    Neutral,
}

impl StickDirection {
    /// Collapse the pressed directions into one lever position.
    /// Up wins over down, left wins over right.
    pub const fn resolve(snapshot: &InputSnapshot) -> Self {
        let left = snapshot.pressed(Signal::Left);
        let right = snapshot.pressed(Signal::Right);

        if snapshot.pressed(Signal::Up) {
            if left {
                Self::UpLeft
            } else if right {
                Self::UpRight
            } else {
                Self::Up
            }
        } else if snapshot.pressed(Signal::Down) {
            if left {
                Self::DownLeft
            } else if right {
                Self::DownRight
            } else {
                Self::Down
            }
        } else if left {
            Self::Left
        } else if right {
            Self::Right
        } else {
            Self::Neutral
        }
    }

    /// Ball centre relative to the anchor.
    pub const fn offset(self) -> (Offset, Offset) {
        const NEAR: Offset = step(1, 5);
        const FAR: Offset = exact(7, 8);
        match self {
            Self::UpLeft => (NEAR, NEAR),
            Self::UpRight => (FAR, NEAR),
            Self::Up => (MID, ZERO),
            Self::DownLeft => (NEAR, FAR),
            Self::DownRight => (FAR, FAR),
            Self::Down => (MID, ONE),
            Self::Left => (ZERO, MID),
            Self::Right => (ONE, MID),
            Self::Neutral => (MID, MID),
        }
    }

    /// Always-filled ball for this direction.
    pub const fn ball(self) -> ShapeSpec {
        let (dx, dy) = self.offset();
        ShapeSpec {
            shape: Shape::Circle,
            dx,
            dy,
            fill: Fill::Always,
        }
    }
}

// =============================================================================
// Composer
// =============================================================================

/// Resolve every shape of `table` against `snapshot`.
pub fn placements<'t>(
    table: &'t LayoutTable,
    anchor: Point,
    unit: i32,
    padding: i32,
    snapshot: &'t InputSnapshot,
) -> impl Iterator<Item = Placement> + 't {
    let margin = table.margin.compute(unit, padding);
    table.shapes.iter().map(move |spec| place(spec, anchor, margin, snapshot))
}

fn place(
    spec: &ShapeSpec,
    anchor: Point,
    margin: i32,
    snapshot: &InputSnapshot,
) -> Placement {
    Placement {
        shape: spec.shape,
        position: Point::new(spec.dx.resolve(anchor.x, margin), spec.dy.resolve(anchor.y, margin)),
        filled: spec.fill.resolve(snapshot),
        signal: match spec.fill {
            Fill::Signal(signal) => Some(signal),
            Fill::Never | Fill::Always => None,
        },
    }
}

/// Queue the commands for `table` drawn at `anchor` with the given sizes.
pub fn compose(
    list: &mut CommandList<'_>,
    table: &LayoutTable,
    anchor: Point,
    unit: i32,
    padding: i32,
    snapshot: &InputSnapshot,
) {
    for placement in placements(table, anchor, unit, padding, snapshot) {
        draw_shape(list, placement, unit);
    }
}

/// Queue the stick-side cluster at its default position.
pub fn compose_stick(
    list: &mut CommandList<'_>,
    layout: StickLayout,
    snapshot: &InputSnapshot,
) {
    let table = layout.table();
    compose(list, table, table.anchor, table.unit, table.padding, snapshot);

    if layout == StickLayout::ArcadeStick {
        let margin = table.margin.compute(table.unit, table.padding);
        let ball = StickDirection::resolve(snapshot).ball();
        draw_shape(list, place(&ball, table.anchor, margin, snapshot), table.unit);
    }
}

/// Queue the button-side cluster at its default position.
pub fn compose_buttons(
    list: &mut CommandList<'_>,
    layout: ButtonLayout,
    snapshot: &InputSnapshot,
) {
    let table = layout.table();
    compose(list, table, table.anchor, table.unit, table.padding, snapshot);
}

fn draw_shape(
    list: &mut CommandList<'_>,
    placement: Placement,
    unit: i32,
) {
    let Placement {
        shape,
        position,
        filled,
        ..
    } = placement;

    match shape {
        Shape::Circle => list.push(DrawCommand::Ellipse {
            center: position,
            radius: unit.unsigned_abs(),
            filled,
        }),
        Shape::Gate => list.push(DrawCommand::Ellipse {
            center: position,
            radius: (unit * 5 / 4).unsigned_abs(),
            filled,
        }),
        Shape::Square => list.push(DrawCommand::Rect {
            corner_a: position,
            corner_b: position + Point::new(unit, unit),
            filled,
            color: BinaryColor::On,
        }),
        Shape::Diamond => draw_diamond(list, position, unit, filled),
    }
}

/// Diamond as line segments: scan lines when filled, then the four edges.
pub fn draw_diamond(
    list: &mut CommandList<'_>,
    center: Point,
    size: i32,
    filled: bool,
) {
    let Point { x: cx, y: cy } = center;

    if filled {
        for i in 0..size {
            list.push(DrawCommand::Line {
                from: Point::new(cx - i, cy - size + i),
                to: Point::new(cx + i, cy - size + i),
            });
            list.push(DrawCommand::Line {
                from: Point::new(cx - i, cy + size - i),
                to: Point::new(cx + i, cy + size - i),
            });
        }
        list.push(DrawCommand::Line {
            from: Point::new(cx - size, cy),
            to: Point::new(cx + size, cy),
        });
    }

    let left = Point::new(cx - size, cy);
    let top = Point::new(cx, cy - size);
    let right = Point::new(cx + size, cy);
    let bottom = Point::new(cx, cy + size);
    for (from, to) in [(left, top), (top, right), (right, bottom), (bottom, left)] {
        list.push(DrawCommand::Line { from, to });
    }
}

/// Line count of one diamond.
pub const fn diamond_line_count(
    size: i32,
    filled: bool,
) -> usize {
    if filled { 4 + 2 * size.unsigned_abs() as usize + 1 } else { 4 }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ellipses<'a>(list: &'a CommandList<'a>) -> impl Iterator<Item = (Point, u32, bool)> + 'a {
        list.iter().filter_map(|command| match *command {
            DrawCommand::Ellipse { center, radius, filled } => Some((center, radius, filled)),
            _ => None,
        })
    }

    #[test]
    fn test_margin_rules() {
        assert_eq!(Margin::Diameter.compute(8, 2), 18);
        assert_eq!(Margin::Side.compute(10, 1), 11);
    }

    #[test]
    fn test_offset_steps_before_scaling() {
        // 28 + 18 - 18 / 4
        assert_eq!(ONE.and_step(-1, 4).resolve(28, 18), 42);
        // 28 - 17 / 8, truncated toward zero
        assert_eq!(exact(-1, 8).resolve(28, 17), 25);
        // 8 - 18 / 3 + 18 * 11 / 4
        assert_eq!(exact(11, 4).and_step(-1, 3).resolve(8, 18), 51);
        assert_eq!(step(1, 5).resolve(8, 18), 11);
        assert_eq!(exact(7, 8).resolve(28, 18), 43);
    }

    #[test]
    fn test_arcade_stick_neutral() {
        let mut list = CommandList::new();
        compose_stick(&mut list, StickLayout::ArcadeStick, &InputSnapshot::new());

        let drawn: heapless::Vec<_, 4> = ellipses(&list).collect();
        assert_eq!(
            drawn.as_slice(),
            &[(Point::new(17, 37), 10, false), (Point::new(17, 37), 8, true)],
            "gate ring plus centred ball"
        );
    }

    #[test]
    fn test_arcade_stick_direction_priority() {
        let up_down = InputSnapshot::new().with(Signal::Up).with(Signal::Down);
        assert_eq!(StickDirection::resolve(&up_down), StickDirection::Up);

        let all = up_down.with(Signal::Left).with(Signal::Right);
        assert_eq!(StickDirection::resolve(&all), StickDirection::UpLeft);

        let down_right = InputSnapshot::new().with(Signal::Down).with(Signal::Right);
        assert_eq!(StickDirection::resolve(&down_right), StickDirection::DownRight);

        let left_right = InputSnapshot::new().with(Signal::Left).with(Signal::Right);
        assert_eq!(StickDirection::resolve(&left_right), StickDirection::Left);
    }

    #[test]
    fn test_arcade_stick_ball_positions() {
        let cases = [
            (InputSnapshot::new().with(Signal::Up), Point::new(17, 28)),
            (InputSnapshot::new().with(Signal::Down), Point::new(17, 46)),
            (InputSnapshot::new().with(Signal::Left), Point::new(8, 37)),
            (InputSnapshot::new().with(Signal::Right), Point::new(26, 37)),
            (InputSnapshot::new().with(Signal::Up).with(Signal::Left), Point::new(11, 31)),
            (InputSnapshot::new().with(Signal::Down).with(Signal::Right), Point::new(23, 43)),
        ];
        for (snapshot, expected) in cases {
            let mut list = CommandList::new();
            compose_stick(&mut list, StickLayout::ArcadeStick, &snapshot);
            let ball = ellipses(&list).last().map(|(center, _, _)| center);
            assert_eq!(ball, Some(expected), "{snapshot:?}");
        }
    }

    #[test]
    fn test_arcade_buttons_follow_snapshot() {
        let snapshot = InputSnapshot::new().with(Signal::B1).with(Signal::R2);
        let mut list = CommandList::new();
        compose_buttons(&mut list, ButtonLayout::Arcade, &snapshot);

        assert_eq!(list.len(), 8);
        let filled: heapless::Vec<Point, 8> =
            ellipses(&list).filter(|(_, _, filled)| *filled).map(|(center, _, _)| center).collect();
        // B1 at (8 + 18*23/8, 28 + 18), R2 at (8 + 18*39/8, 28 + 18 - 18/4)
        assert_eq!(filled.as_slice(), &[Point::new(59, 46), Point::new(95, 42)]);
    }

    #[test]
    fn test_lowered_row_uses_whole_quarter_step() {
        let b2 = |layout: ButtonLayout| {
            let snapshot = InputSnapshot::new().with(Signal::B2);
            let mut list = CommandList::new();
            compose_buttons(&mut list, layout, &snapshot);
            let center = ellipses(&list).find(|(_, _, filled)| *filled).map(|(center, _, _)| center);
            center
        };
        assert_eq!(b2(ButtonLayout::Arcade), Some(Point::new(77, 42)));
        assert_eq!(b2(ButtonLayout::Stickless), Some(Point::new(75, 34)));
    }

    #[test]
    fn test_wasd_up_truncates_negative_offset() {
        let snapshot = InputSnapshot::new().with(Signal::Up);
        let mut list = CommandList::new();
        compose_stick(&mut list, StickLayout::WasdBox, &snapshot);
        let up = ellipses(&list).find(|(_, _, filled)| *filled);
        // 8 + 17 * 3/2, 28 - 17/8
        assert_eq!(up, Some((Point::new(33, 25), 7, true)));
    }

    #[test]
    fn test_mame_squares() {
        let snapshot = InputSnapshot::new().with(Signal::Up);
        let mut list = CommandList::new();
        compose_stick(&mut list, StickLayout::MameA, &snapshot);

        assert_eq!(list.len(), 4);
        assert_eq!(
            list.as_slice()[2],
            DrawCommand::Rect {
                corner_a: Point::new(19, 28),
                corner_b: Point::new(29, 38),
                filled: true,
                color: BinaryColor::On,
            }
        );
        assert_eq!(list.as_slice()[0].filled(), Some(false));
    }

    #[test]
    fn test_diamond_outline_and_fill() {
        let mut list = CommandList::new();
        draw_diamond(&mut list, Point::new(20, 20), 5, false);
        assert_eq!(list.len(), diamond_line_count(5, false));
        assert_eq!(
            list.as_slice()[0],
            DrawCommand::Line {
                from: Point::new(15, 20),
                to: Point::new(20, 15),
            }
        );

        list.clear();
        draw_diamond(&mut list, Point::new(20, 20), 5, true);
        assert_eq!(list.len(), 15);
        assert_eq!(list.len(), diamond_line_count(5, true));
        assert_eq!(diamond_line_count(-5, true), diamond_line_count(5, true));
        assert_eq!(
            list.as_slice()[10],
            DrawCommand::Line {
                from: Point::new(15, 20),
                to: Point::new(25, 20),
            },
            "middle line closes the fill"
        );
    }

    #[test]
    fn test_mixbox_uses_diamonds() {
        let snapshot = InputSnapshot::new().with(Signal::Down);
        let mut list = CommandList::new();
        compose_stick(&mut list, StickLayout::KeyboardAngled, &snapshot);
        assert_eq!(list.len(), 3 * diamond_line_count(5, false) + diamond_line_count(5, true));
    }

    #[test]
    fn test_vewlix7_drops_l2() {
        assert_eq!(ButtonLayout::Vewlix.table().shapes.len(), 8);
        let shapes = ButtonLayout::Vewlix7.table().shapes;
        assert_eq!(shapes.len(), 7);
        assert!(shapes.iter().all(|spec| spec.fill != Fill::Signal(Signal::L2)));
    }

    #[test]
    fn test_compose_with_custom_anchor() {
        let table = ButtonLayout::Capcom.table();
        let mut list = CommandList::new();
        compose(&mut list, table, Point::new(0, 0), 4, 0, &InputSnapshot::new());

        // margin = 8, B3 at 8 * 13/4
        assert_eq!(ellipses(&list).next(), Some((Point::new(26, 0), 4, false)));
    }

    #[test]
    fn test_names_round_trip_and_cycle() {
        for layout in StickLayout::ALL {
            assert_eq!(StickLayout::from_name(layout.name()), Some(layout));
        }
        for layout in ButtonLayout::ALL {
            assert_eq!(ButtonLayout::from_name(layout.name()), Some(layout));
        }
        assert_eq!(StickLayout::DancepadA.next(), StickLayout::ArcadeStick);
        assert_eq!(ButtonLayout::Arcade.next(), ButtonLayout::Stickless);
        assert_eq!(ButtonLayout::from_raw(10), Some(ButtonLayout::DancepadB));
        assert_eq!(StickLayout::from_raw(7), None);
    }
}
