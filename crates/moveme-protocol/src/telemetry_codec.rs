//! Standard-state telemetry datagrams from the UDP channel.
//!
//! Datagram framing:
//!
//! ```text
//! [0..4]   magic        (u32 BE, PACKET_MAGIC)
//! [4..8]   version      (u32 BE, must be 1)
//! [8..12]  payload code (u32 BE; 1 = standard state)
//! [12..16] packet index (i32 BE, monotonically increasing)
//! [16..]   payload
//! ```
//!
//! Standard-state payload (datagram-absolute offsets). The record is
//! the server's packed struct dump, so two alignment pads appear where
//! 8-byte members force them:
//!
//! ```text
//! [16..24]     server config: image slices, slice format (i32 × 2)
//! [24..36]     client config: standard delay ms, camera frame delay
//!              ms, camera frames paused (i32 × 3)
//! [36..40]     pad (status entries hold an i64)
//! [40..104]    controller status × 4, 16 bytes each:
//!                connected i32, status code i32, flags i64
//! [104..808]   controller state × 4, 176 bytes each:
//!                pos/vel/accel/quat/angvel/angaccel/handle-pos/
//!                handle-vel/handle-accel vec4 f32 (144),
//!                digital buttons u16, trigger u16, pad 4,
//!                timestamp i64, temperature f32, camera pitch f32,
//!                tracking flags i32, pad 4
//! [808..1000]  image state × 4, 48 bytes each:
//!                frame timestamp i64, timestamp i64, u/v/r/
//!                projection x/projection y/distance f32 (24),
//!                visible i32, radius valid i32
//! [1000..1048] laser pointer × 4: valid i32, x f32, y f32
//! [1048..1076] nav port status × 7 (i32)
//! [1076..2000] nav pad data × 7, 132 bytes each:
//!                length i32, 64 × u16 button codes
//! [2000..2080] sphere state × 4, 20 bytes each:
//!                tracking i32, hue i32, r/g/b f32
//! [2080..2100] camera state: exposure i32, exposure time f32,
//!                gain f32, pitch angle f32, pitch estimate f32
//! [2100..2148] position pointer × 4: valid i32, x f32, y f32
//! ```
//!
//! The decoder walks this record sequentially and projects out the
//! slot-0 fields the client consumes; everything else is skipped, not
//! decoded. Every read is bounds-checked.

use std::fmt;

use moveme_core::{ControllerStatus, TelemetryFrame};

use crate::wire::{
    self, OutOfBounds, DATAGRAM_HEADER_LEN, PACKET_MAGIC, PAYLOAD_STANDARD_STATE, PROTOCOL_VERSION,
};

/// Controller slots in every record.
pub const MAX_CONTROLLERS: usize = 4;

/// Nav pad slots in every record.
pub const MAX_NAV_PADS: usize = 7;

/// Button code slots per nav pad entry.
const NAV_PAD_MAX_CODES: usize = 64;

// Block sizes of the standard-state record, in bytes.
const SERVER_CONFIG_LEN: usize = 8;
const CLIENT_CONFIG_LEN: usize = 12;
const STATUS_ALIGN_PAD: usize = 4;
const CONTROLLER_STATUS_LEN: usize = 16;
const KINEMATICS_LEN: usize = 9 * 16; // nine vec4 float blocks
const CONTROLLER_STATE_LEN: usize = 176;
const IMAGE_STATE_LEN: usize = 48;
const IMAGE_PRE_VISIBLE_LEN: usize = 40; // two i64 timestamps + six f32s
const POINTER_LEN: usize = 12;
const NAV_PAD_LEN: usize = 4 + 2 * NAV_PAD_MAX_CODES;
const SPHERE_STATE_LEN: usize = 20;
const CAMERA_STATE_LEN: usize = 20;

/// Why a datagram was not turned into a frame.
///
/// Everything here is drop-and-continue for the receive loop: stale,
/// malformed and mismatched datagrams are expected noise on an
/// unreliable transport (including stray packets from an earlier
/// connection). Only `UnsupportedPayload` is worth reporting, as a
/// forward-compatibility signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    /// Shorter than the fixed header, or a field holds a value the
    /// protocol does not define.
    Malformed,
    /// The magic constant did not match.
    BadMagic,
    /// Protocol version other than 1.
    BadVersion,
    /// Packet index below the last accepted one (out-of-order or
    /// duplicate delivery).
    Stale,
    /// A payload kind this client does not decode (e.g. camera frames).
    UnsupportedPayload(u32),
    /// Header checks passed but the record was truncated.
    OutOfBounds,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejected::Malformed => write!(f, "malformed datagram"),
            Rejected::BadMagic => write!(f, "bad magic constant"),
            Rejected::BadVersion => write!(f, "unsupported protocol version"),
            Rejected::Stale => write!(f, "stale packet index"),
            Rejected::UnsupportedPayload(code) => write!(f, "unimplemented payload code {}", code),
            Rejected::OutOfBounds => write!(f, "truncated record"),
        }
    }
}

impl std::error::Error for Rejected {}

impl From<OutOfBounds> for Rejected {
    fn from(_: OutOfBounds) -> Self {
        Rejected::OutOfBounds
    }
}

/// Last accepted packet index for one connection.
///
/// Owned by the connection's receive loop and advanced only after a
/// datagram fully decodes, so a rejected datagram never moves it. The
/// index is monotonically non-decreasing for the connection's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceState {
    last_accepted: i32,
}

impl SequenceState {
    /// Fresh state; starts at the minimum index so the first packet of
    /// a connection is always accepted.
    pub fn new() -> Self {
        SequenceState {
            last_accepted: i32::MIN,
        }
    }

    /// The most recently accepted packet index.
    pub fn last_accepted(&self) -> i32 {
        self.last_accepted
    }
}

impl Default for SequenceState {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate one datagram and extract the slot-0 telemetry frame.
///
/// Validation order: header length, magic, version, staleness, payload
/// code, then field extraction. Each failure returns [`Rejected`]
/// without touching `sequence`; on success `sequence` advances to the
/// datagram's packet index.
pub fn decode_standard_state(
    datagram: &[u8],
    sequence: &mut SequenceState,
) -> Result<TelemetryFrame, Rejected> {
    if datagram.len() < DATAGRAM_HEADER_LEN {
        return Err(Rejected::Malformed);
    }

    let magic = wire::read_u32(datagram, 0)?;
    let version = wire::read_u32(datagram, 4)?;
    let payload_code = wire::read_u32(datagram, 8)?;
    let packet_index = wire::read_i32(datagram, 12)?;

    if magic != PACKET_MAGIC {
        return Err(Rejected::BadMagic);
    }
    if version != PROTOCOL_VERSION {
        return Err(Rejected::BadVersion);
    }
    if packet_index < sequence.last_accepted {
        return Err(Rejected::Stale);
    }
    if payload_code != PAYLOAD_STANDARD_STATE {
        return Err(Rejected::UnsupportedPayload(payload_code));
    }

    let frame = read_slot0_fields(datagram)?;
    sequence.last_accepted = packet_index;
    Ok(frame)
}

/// Walk the record sequentially, reading the slot-0 fields and
/// skipping the rest.
fn read_slot0_fields(datagram: &[u8]) -> Result<TelemetryFrame, Rejected> {
    let mut r = RecordReader::new(datagram);
    r.skip(DATAGRAM_HEADER_LEN)?;

    // Server + client config, plus the pad before the status block.
    r.skip(SERVER_CONFIG_LEN + CLIENT_CONFIG_LEN + STATUS_ALIGN_PAD)?;

    // Controller status, slot 0.
    let controller_connected = r.read_i32()? != 0;
    let status_code = r.read_i32()?;
    let flags = r.read_i64()? as u64;
    let status = ControllerStatus::from_code(status_code).ok_or(Rejected::Malformed)?;
    r.skip(CONTROLLER_STATUS_LEN * (MAX_CONTROLLERS - 1))?;

    // Controller state, slot 0: skip the kinematics, take the pad data.
    let state_block = r.offset();
    r.skip(KINEMATICS_LEN)?;
    let digital_buttons = r.read_u16()?;
    let trigger = r.read_u16()?;
    r.skip_to(state_block + CONTROLLER_STATE_LEN * MAX_CONTROLLERS)?;

    // Image state, slot 0: only the visibility flag.
    let image_block = r.offset();
    r.skip(IMAGE_PRE_VISIBLE_LEN)?;
    let sphere_visible = r.read_i32()? != 0;
    r.skip_to(image_block + IMAGE_STATE_LEN * MAX_CONTROLLERS)?;

    // Laser pointer, slot 0.
    let pointer_valid = r.read_i32()? != 0;
    let pointer_x = r.read_f32()?;
    let pointer_y = r.read_f32()?;
    r.skip(POINTER_LEN * (MAX_CONTROLLERS - 1))?;

    // Nav pad ports and data: nothing consumed.
    r.skip(4 * MAX_NAV_PADS + NAV_PAD_LEN * MAX_NAV_PADS)?;

    // Sphere state, slot 0: only the tracking flag.
    let sphere_block = r.offset();
    let tracking_enabled = r.read_i32()? != 0;
    r.skip_to(sphere_block + SPHERE_STATE_LEN * MAX_CONTROLLERS)?;

    r.skip(CAMERA_STATE_LEN)?;

    // Position pointer, slot 0.
    let position_pointer_valid = r.read_i32()? != 0;
    let position_x = r.read_f32()?;
    let position_y = r.read_f32()?;

    Ok(TelemetryFrame {
        controller_connected,
        status,
        flags,
        digital_buttons,
        trigger,
        sphere_visible,
        pointer_valid,
        pointer_x,
        pointer_y,
        tracking_enabled,
        position_pointer_valid,
        position_x,
        position_y,
    })
}

/// Sequential, bounds-checked reader over one record.
struct RecordReader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> RecordReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        RecordReader { buf, offset: 0 }
    }

    fn offset(&self) -> usize {
        self.offset
    }

    fn skip(&mut self, n: usize) -> Result<(), OutOfBounds> {
        let end = self.offset.checked_add(n).ok_or(OutOfBounds)?;
        if end > self.buf.len() {
            return Err(OutOfBounds);
        }
        self.offset = end;
        Ok(())
    }

    /// Skip forward to an absolute offset recorded earlier.
    fn skip_to(&mut self, offset: usize) -> Result<(), OutOfBounds> {
        if offset < self.offset || offset > self.buf.len() {
            return Err(OutOfBounds);
        }
        self.offset = offset;
        Ok(())
    }

    fn read_u16(&mut self) -> Result<u16, OutOfBounds> {
        let v = wire::read_u16(self.buf, self.offset)?;
        self.offset += 2;
        Ok(v)
    }

    fn read_i32(&mut self) -> Result<i32, OutOfBounds> {
        let v = wire::read_i32(self.buf, self.offset)?;
        self.offset += 4;
        Ok(v)
    }

    fn read_i64(&mut self) -> Result<i64, OutOfBounds> {
        let v = wire::read_i64(self.buf, self.offset)?;
        self.offset += 8;
        Ok(v)
    }

    fn read_f32(&mut self) -> Result<f32, OutOfBounds> {
        let v = wire::read_f32(self.buf, self.offset)?;
        self.offset += 4;
        Ok(v)
    }
}
