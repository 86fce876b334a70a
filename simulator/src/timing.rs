//! Desktop loop pacing and window size.
//!
//! The engine itself only sees a millisecond counter; the simulator derives it
//! from `Instant` and paces ticks with [`FRAME_TIME`].

use std::time::Duration;

/// One display tick (~50 Hz), roughly the firmware's display task rate.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Window pixels per OLED pixel.
pub const WINDOW_SCALE: u32 = 4;
