//! Digital-button bitmasks and edge detection.
//!
//! The standard-state packet carries the buttons as a 16-bit mask of
//! what is currently held down. Edge detection turns two consecutive
//! samples of that mask into pushed / held / released transition sets.

/// Select button.
pub const SELECT: u16 = 1 << 0;
/// The trigger's digital contact (the analog value travels separately).
pub const TRIGGER: u16 = 1 << 1;
/// Move button (the big one under the sphere).
pub const MOVE: u16 = 1 << 2;
/// Start button.
pub const START: u16 = 1 << 3;
/// Triangle button.
pub const TRIANGLE: u16 = 1 << 4;
/// Circle button.
pub const CIRCLE: u16 = 1 << 5;
/// Cross button.
pub const CROSS: u16 = 1 << 6;
/// Square button.
pub const SQUARE: u16 = 1 << 7;

/// Button transitions derived from two consecutive down-masks.
///
/// Per bit: `pushed` went down this tick, `held` was already down and
/// still is, `released` went up this tick. A bit is never both pushed
/// and released in the same sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonEdges {
    /// Buttons pushed down this tick.
    pub pushed: u16,
    /// Buttons still held from before.
    pub held: u16,
    /// Buttons released this tick.
    pub released: u16,
}

impl ButtonEdges {
    /// Derive the transition sets between the previous and current
    /// down-masks.
    ///
    /// Pure function; the caller owns and persists the previous mask.
    /// This must run exactly once per accepted standard-state packet,
    /// in arrival order: it is a discrete edge detector over a sampled
    /// signal, so skipped or reordered samples corrupt the pushed /
    /// released sets.
    pub fn between(previous_down: u16, current_down: u16) -> Self {
        let diff = previous_down ^ current_down;
        ButtonEdges {
            pushed: diff & current_down,
            held: previous_down & current_down,
            released: diff & previous_down,
        }
    }
}
