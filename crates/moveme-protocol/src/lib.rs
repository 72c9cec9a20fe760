//! moveme-protocol
//!
//! Wire-level encoding/decoding for the Move.Me tracking server.
//!
//! This crate is responsible for turning logical client messages
//! (`moveme_core::Command`) into bytes and raw telemetry datagrams
//! back into `moveme_core::TelemetryFrame`.
//!
//! - [`wire`]            : fixed-width big-endian primitives + constants
//! - [`command_codec`]   : command frames for the reliable TCP channel
//! - [`telemetry_codec`] : standard-state datagrams from the UDP channel

pub mod command_codec;
pub mod telemetry_codec;
pub mod wire;

pub use command_codec::{decode_frame_header, encode_command};
pub use telemetry_codec::{decode_standard_state, Rejected, SequenceState};
pub use wire::OutOfBounds;
