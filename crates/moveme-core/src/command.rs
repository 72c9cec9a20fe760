//! Logical command types for the reliable (TCP) channel.
//!
//! These are **transport-agnostic** requests: what the client asks the
//! tracking server to do. The binary frame encoder lives in the
//! `moveme-protocol` crate; this module only defines the request kinds,
//! their wire codes and their ordered payload fields.
//!
//! Every command carries 0, 1, 2 or 4 fixed-width payload fields, each
//! a 32-bit signed integer or a 32-bit IEEE-754 float. The set of valid
//! `(code, arity, type-sequence)` combinations is fixed by protocol
//! version 1 and encoded in [`Command::fields`].

/// Hue sentinel: let the server pick a tracking color for this slot.
pub const PICK_FOR_ME: u32 = 4 << 24;

/// Hue sentinel: do not track this controller slot at all.
pub const DONT_TRACK: u32 = 2 << 24;

/// One payload field of a command frame.
///
/// Fields are always 4 bytes on the wire, big-endian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandField {
    Int(i32),
    Float(f32),
}

/// A request sent to the tracking server over the reliable channel.
///
/// Controller indices range over the server's four slots (0-3). Values
/// outside documented ranges are passed through unvalidated; the server
/// owns the semantics of each parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Handshake: tell the server which local UDP port telemetry
    /// datagrams should be sent to. Must be the first command after
    /// connecting; no telemetry arrives until it is.
    Init { udp_port: u32 },

    /// Pause standard-state packet delivery.
    Pause,

    /// Resume standard-state packet delivery after a pause.
    Resume,

    /// Delay between standard-state packets, in milliseconds.
    /// 2ms is a reasonable value.
    DelayChange { ms: u32 },

    /// Configure the camera.
    ///
    /// `max_exposure` is in image rows (40-511); longer exposure means
    /// less noise but more motion blur. `image_quality` ranges 0.0-1.0.
    ConfigureCamera { max_exposure: u32, image_quality: f32 },

    /// Calibrate a controller. It should be pointed at the camera and
    /// held still.
    CalibrateController { controller: u32 },

    /// Record the left edge of the laser pointer box for a controller.
    LaserSetLeft { controller: u32 },
    /// Record the right edge of the laser pointer box for a controller.
    LaserSetRight { controller: u32 },
    /// Record the bottom edge of the laser pointer box for a controller.
    LaserSetBottom { controller: u32 },
    /// Record the top edge of the laser pointer box for a controller.
    LaserSetTop { controller: u32 },

    /// Enable laser-pointer tracking for a controller.
    LaserEnable { controller: u32 },
    /// Disable laser-pointer tracking for a controller.
    LaserDisable { controller: u32 },

    /// Reset a controller.
    ControllerReset { controller: u32 },

    /// Record the left edge of the position pointer box for a controller.
    PositionSetLeft { controller: u32 },
    /// Record the right edge of the position pointer box for a controller.
    PositionSetRight { controller: u32 },
    /// Record the bottom edge of the position pointer box for a controller.
    PositionSetBottom { controller: u32 },
    /// Record the top edge of the position pointer box for a controller.
    PositionSetTop { controller: u32 },

    /// Enable position tracking for a controller.
    PositionEnable { controller: u32 },
    /// Disable position tracking for a controller.
    PositionDisable { controller: u32 },

    /// Force the controller sphere to a fixed RGB color (components
    /// 0.0-1.0). Disables sphere tracking for that controller.
    ForceRgb { controller: u32, r: f32, g: f32, b: f32 },

    /// Set controller rumble, 0 (off) to 255 (full).
    SetRumble { controller: u32, rumble: u32 },

    /// Request tracking hues for all four controller slots at once.
    ///
    /// Each hue is 0-359, or one of [`PICK_FOR_ME`] / [`DONT_TRACK`].
    /// The server may move requested hues to keep tracking stable.
    TrackHues { hue0: u32, hue1: u32, hue2: u32, hue3: u32 },

    /// Delay between camera frame packets, in milliseconds (16-255).
    CameraFrameDelay { ms: u32 },

    /// Number of horizontal slices each camera frame is split into
    /// (1-7; more than 2 is rarely needed).
    CameraFrameSlices { count: u32 },

    /// Pause camera frame packet delivery.
    CameraFramePause,

    /// Resume camera frame packet delivery.
    CameraFrameResume,
}

impl Command {
    /// Wire request code for this command.
    ///
    /// These are the protocol-version-1 constants; note the gap at 0x6
    /// and that the values are hex (0x10 follows 0x9).
    pub fn code(&self) -> u32 {
        match self {
            Command::Init { .. } => 0x00,
            Command::Pause => 0x01,
            Command::Resume => 0x02,
            Command::DelayChange { .. } => 0x03,
            Command::ConfigureCamera { .. } => 0x04,
            Command::CalibrateController { .. } => 0x05,
            Command::LaserSetLeft { .. } => 0x07,
            Command::LaserSetRight { .. } => 0x08,
            Command::LaserSetBottom { .. } => 0x09,
            Command::LaserSetTop { .. } => 0x10,
            Command::LaserEnable { .. } => 0x11,
            Command::LaserDisable { .. } => 0x12,
            Command::ControllerReset { .. } => 0x13,
            Command::PositionSetLeft { .. } => 0x14,
            Command::PositionSetRight { .. } => 0x15,
            Command::PositionSetBottom { .. } => 0x16,
            Command::PositionSetTop { .. } => 0x17,
            Command::PositionEnable { .. } => 0x18,
            Command::PositionDisable { .. } => 0x19,
            Command::ForceRgb { .. } => 0x20,
            Command::SetRumble { .. } => 0x21,
            Command::TrackHues { .. } => 0x22,
            Command::CameraFrameDelay { .. } => 0x23,
            Command::CameraFrameSlices { .. } => 0x24,
            Command::CameraFramePause => 0x25,
            Command::CameraFrameResume => 0x26,
        }
    }

    /// Ordered payload fields for this command.
    ///
    /// The frame's `length` field is `4 * fields().len()`.
    pub fn fields(&self) -> Vec<CommandField> {
        use CommandField::{Float, Int};

        match *self {
            Command::Init { udp_port } => vec![Int(udp_port as i32)],
            Command::Pause => vec![],
            Command::Resume => vec![],
            Command::DelayChange { ms } => vec![Int(ms as i32)],
            Command::ConfigureCamera {
                max_exposure,
                image_quality,
            } => vec![Int(max_exposure as i32), Float(image_quality)],
            Command::CalibrateController { controller }
            | Command::LaserSetLeft { controller }
            | Command::LaserSetRight { controller }
            | Command::LaserSetBottom { controller }
            | Command::LaserSetTop { controller }
            | Command::LaserEnable { controller }
            | Command::LaserDisable { controller }
            | Command::ControllerReset { controller }
            | Command::PositionSetLeft { controller }
            | Command::PositionSetRight { controller }
            | Command::PositionSetBottom { controller }
            | Command::PositionSetTop { controller }
            | Command::PositionEnable { controller }
            | Command::PositionDisable { controller } => vec![Int(controller as i32)],
            Command::ForceRgb { controller, r, g, b } => {
                vec![Int(controller as i32), Float(r), Float(g), Float(b)]
            }
            Command::SetRumble { controller, rumble } => {
                vec![Int(controller as i32), Int(rumble as i32)]
            }
            Command::TrackHues {
                hue0,
                hue1,
                hue2,
                hue3,
            } => vec![
                Int(hue0 as i32),
                Int(hue1 as i32),
                Int(hue2 as i32),
                Int(hue3 as i32),
            ],
            Command::CameraFrameDelay { ms } => vec![Int(ms as i32)],
            Command::CameraFrameSlices { count } => vec![Int(count as i32)],
            Command::CameraFramePause => vec![],
            Command::CameraFrameResume => vec![],
        }
    }
}
