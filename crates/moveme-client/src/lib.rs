//! moveme-client
//!
//! Async binding to a Move.Me tracking server: a reliable TCP channel
//! for typed commands paired with an unreliable, high-rate UDP channel
//! carrying telemetry snapshots.
//!
//! [`MoveClient::connect`] opens both channels, spawns the telemetry
//! receive task and performs the init handshake; commands are then
//! available from any task, and decoded controller events are
//! delivered to a registered [`UpdateListener`].

pub mod client;
pub mod error;

// these are internal modules, not re-exported
mod commands;
mod receive;

pub use client::MoveClient;
pub use error::ClientError;

// Re-export the logical types consumers interact with.
pub use moveme_core::{
    buttons, status, ButtonEdges, Command, ControllerStatus, TelemetryFrame, UpdateListener,
    DONT_TRACK, PICK_FOR_ME,
};
