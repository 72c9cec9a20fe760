//! The decoded telemetry snapshot.

use crate::status::ControllerStatus;

/// The fields this client consumes from one standard-state packet,
/// for the first controller slot only.
///
/// Ephemeral: produced by the decoder, consumed by edge detection and
/// listener dispatch, then discarded. The full wire record also carries
/// kinematic vectors, per-controller image state and nav-pad state;
/// those are skipped over, not decoded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryFrame {
    /// Whether a controller is connected in slot 0.
    pub controller_connected: bool,

    /// Tracking status of slot 0.
    pub status: ControllerStatus,

    /// Calibration / fail / warn flag mask (see [`crate::status::flags`]).
    pub flags: u64,

    /// Currently-down digital buttons (see [`crate::buttons`]).
    pub digital_buttons: u16,

    /// Analog trigger value; meaningful range 0 (off) to 255 (fully down).
    pub trigger: u16,

    /// Whether the sphere is visible to the camera.
    pub sphere_visible: bool,

    /// Whether the laser-pointer block carries a valid position.
    pub pointer_valid: bool,
    /// Laser-pointer x, normalized to [-1, 1], 0 = screen center.
    pub pointer_x: f32,
    /// Laser-pointer y, normalized to [-1, 1], 0 = screen center.
    pub pointer_y: f32,

    /// Whether sphere tracking is enabled for slot 0.
    pub tracking_enabled: bool,

    /// Whether the position-pointer block carries a valid position.
    pub position_pointer_valid: bool,
    /// Position-pointer x, normalized to [-1, 1].
    pub position_x: f32,
    /// Position-pointer y, normalized to [-1, 1].
    pub position_y: f32,
}
