//! moveme-core
//!
//! Pure client-side logic for the Move.Me motion-controller protocol:
//! - commands (logical request types)
//! - controller status codes and flags
//! - telemetry frame (decoded standard-state snapshot)
//! - digital-button edge detection
//! - the update listener interface

pub mod buttons;
pub mod command;
pub mod listener;
pub mod status;
pub mod telemetry;

pub use buttons::ButtonEdges;
pub use command::{Command, CommandField, DONT_TRACK, PICK_FOR_ME};
pub use listener::UpdateListener;
pub use status::ControllerStatus;
pub use telemetry::TelemetryFrame;
