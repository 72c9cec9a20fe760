//! Command frames for the reliable TCP channel.
//!
//! Framing model (one frame per logical command):
//!
//! ```text
//! [0..4]  code    (u32 BE, request kind)
//! [4..8]  length  (u32 BE, payload byte length = 4 × field count)
//! [8..]   payload (each field 4 bytes BE, i32 or f32, in order)
//! ```
//!
//! `length` is redundant with the per-code schema but is always
//! transmitted; the server may use it to skip commands it does not
//! know. Frames must be written onto the stream atomically with
//! respect to each other — the encoder itself is stateless and safe
//! to call concurrently, the caller serializes the actual writes.

use moveme_core::{Command, CommandField};

use crate::wire::{self, OutOfBounds};

/// Encode one command as a wire frame, appended to `out`.
pub fn encode_command(cmd: &Command, out: &mut Vec<u8>) {
    let fields = cmd.fields();

    out.reserve(8 + 4 * fields.len());
    wire::put_u32(out, cmd.code());
    wire::put_u32(out, 4 * fields.len() as u32);

    for field in fields {
        match field {
            CommandField::Int(v) => wire::put_i32(out, v),
            CommandField::Float(v) => wire::put_f32(out, v),
        }
    }
}

/// Decode the `(code, length)` header of a command frame.
///
/// The payload fields themselves are opaque without the per-code
/// schema; this is enough to audit a frame or skip an unknown one.
pub fn decode_frame_header(buf: &[u8]) -> Result<(u32, u32), OutOfBounds> {
    let code = wire::read_u32(buf, 0)?;
    let length = wire::read_u32(buf, 4)?;

    // The declared payload must actually be present.
    if buf.len() < 8 + length as usize {
        return Err(OutOfBounds);
    }

    Ok((code, length))
}
