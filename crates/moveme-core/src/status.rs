//! Controller status codes and status flags.
//!
//! Each controller slot in the standard-state packet reports a status
//! code (what the tracker is doing with that controller) and a 64-bit
//! flag mask with calibration / failure / warning detail.

/// Tracking status of one controller slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerStatus {
    /// Sphere is calibrated and being tracked.
    Tracking = 0,

    /// No controller is connected in this slot.
    NotConnected = 1,

    /// Controller connected but not yet calibrated.
    NotCalibrated = 2,

    /// Calibration in progress.
    Calibrating = 3,

    /// The server is working out which sphere colors are usable.
    ComputingAvailableColors = 4,

    /// No tracking hue has been assigned yet.
    HueNotSet = 5,
}

impl ControllerStatus {
    /// Map a wire status code to its variant.
    ///
    /// Returns `None` for codes protocol version 1 does not define.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(ControllerStatus::Tracking),
            1 => Some(ControllerStatus::NotConnected),
            2 => Some(ControllerStatus::NotCalibrated),
            3 => Some(ControllerStatus::Calibrating),
            4 => Some(ControllerStatus::ComputingAvailableColors),
            5 => Some(ControllerStatus::HueNotSet),
            _ => None,
        }
    }
}

/// Status flag constants for the per-controller 64-bit flag mask.
pub mod flags {
    /// A calibration run has happened for this controller.
    pub const CALIBRATION_OCCURRED: u64 = 0x1;
    /// The most recent calibration run succeeded.
    pub const CALIBRATION_SUCCEEDED: u64 = 0x2;
    /// Calibration failed: the sphere could not be found in the image.
    pub const FAIL_CANT_FIND_SPHERE: u64 = 0x4;
    /// Calibration failed: the controller moved during calibration.
    pub const FAIL_MOTION_DETECTED: u64 = 0x8;
    /// Calibration warning: motion detected but calibration completed.
    pub const WARN_MOTION_DETECTED: u64 = 0x20;
}
