//! The consumer-facing update interface.

use crate::buttons::ButtonEdges;

/// Receives high-level controller events, one call per accepted
/// standard-state packet.
///
/// Implementations are driven from the connection's receive task, so
/// they should return promptly; long work belongs on a channel to the
/// application.
pub trait UpdateListener: Send {
    /// Button-only update, sent while no pointer position is known
    /// (neither the laser pointer nor the position pointer is valid
    /// yet). Most buttons are digital; the trigger is analog and
    /// ranges 0 (off) to 255 (fully down).
    fn button_update(&mut self, edges: ButtonEdges, trigger: u16);

    /// Positioned update. `x` and `y` are normalized to [-1, 1] with 0
    /// at the center of the screen, taken from the laser pointer when
    /// it is valid and the position pointer otherwise.
    fn position_update(&mut self, x: f32, y: f32, edges: ButtonEdges, trigger: u16);

    /// Called when no controller is connected in slot 0. May arrive in
    /// the same tick as one of the updates above.
    fn no_controller(&mut self);
}
