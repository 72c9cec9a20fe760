//! Low-level wire primitives and protocol constants.
//!
//! Everything on the wire is fixed-width big-endian, in both
//! directions. That is a compatibility contract with the server, not a
//! preference; there is no padding or alignment implied by these
//! helpers — offsets and widths are plain byte counts.
//!
//! The actual frame/record logic lives in `command_codec` and
//! `telemetry_codec`.

use std::fmt;

/// Magic constant opening every telemetry datagram.
pub const PACKET_MAGIC: u32 = 0xff00_00dd;

/// Protocol version this client speaks; datagrams carrying any other
/// version are rejected.
pub const PROTOCOL_VERSION: u32 = 1;

/// Payload code of the standard-state packet, the only payload this
/// client decodes.
pub const PAYLOAD_STANDARD_STATE: u32 = 0x1;

/// Payload code of a camera frame slice packet (not decoded).
pub const PAYLOAD_CAMERA_FRAME_SLICE: u32 = 0x2;

/// Payload code of a camera frame state packet (not decoded).
pub const PAYLOAD_CAMERA_FRAME_STATE: u32 = 0x3;

/// Byte length of the datagram header:
/// `[magic: u32][version: u32][payload code: u32][packet index: i32]`.
pub const DATAGRAM_HEADER_LEN: usize = 16;

/// A read past the end of the buffer.
///
/// Raised by the bounds-checked readers below; a datagram that passes
/// the header checks but is too short for the fields actually accessed
/// fails with this instead of reading adjacent memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds;

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "read past end of buffer")
    }
}

impl std::error::Error for OutOfBounds {}

/// Append an i32 as 4 bytes big-endian.
pub fn put_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_be_bytes());
}

/// Append a u32 as 4 bytes big-endian.
pub fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}

/// Append an f32 as 4 bytes big-endian IEEE-754.
pub fn put_f32(out: &mut Vec<u8>, v: f32) {
    out.extend_from_slice(&v.to_be_bytes());
}

/// Read a big-endian u16 at `offset`.
pub fn read_u16(buf: &[u8], offset: usize) -> Result<u16, OutOfBounds> {
    Ok(u16::from_be_bytes(fixed::<2>(buf, offset)?))
}

/// Read a big-endian i32 at `offset`.
pub fn read_i32(buf: &[u8], offset: usize) -> Result<i32, OutOfBounds> {
    Ok(i32::from_be_bytes(fixed::<4>(buf, offset)?))
}

/// Read a big-endian u32 at `offset`.
pub fn read_u32(buf: &[u8], offset: usize) -> Result<u32, OutOfBounds> {
    Ok(u32::from_be_bytes(fixed::<4>(buf, offset)?))
}

/// Read a big-endian i64 at `offset`.
pub fn read_i64(buf: &[u8], offset: usize) -> Result<i64, OutOfBounds> {
    Ok(i64::from_be_bytes(fixed::<8>(buf, offset)?))
}

/// Read a big-endian IEEE-754 f32 at `offset`.
pub fn read_f32(buf: &[u8], offset: usize) -> Result<f32, OutOfBounds> {
    Ok(f32::from_be_bytes(fixed::<4>(buf, offset)?))
}

fn fixed<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N], OutOfBounds> {
    let end = offset.checked_add(N).ok_or(OutOfBounds)?;
    let slice = buf.get(offset..end).ok_or(OutOfBounds)?;
    Ok(slice.try_into().expect("slice length checked above"))
}
