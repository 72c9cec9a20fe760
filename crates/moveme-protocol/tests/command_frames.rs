// crates/moveme-protocol/tests/command_frames.rs

use moveme_core::{Command, DONT_TRACK, PICK_FOR_ME};
use moveme_protocol::{decode_frame_header, encode_command};

/// Every command schema of protocol version 1, with its wire code and
/// payload arity.
fn all_schemas() -> Vec<(Command, u32, u32)> {
    vec![
        (Command::Init { udp_port: 54321 }, 0x00, 1),
        (Command::Pause, 0x01, 0),
        (Command::Resume, 0x02, 0),
        (Command::DelayChange { ms: 2 }, 0x03, 1),
        (
            Command::ConfigureCamera {
                max_exposure: 511,
                image_quality: 0.75,
            },
            0x04,
            2,
        ),
        (Command::CalibrateController { controller: 0 }, 0x05, 1),
        (Command::LaserSetLeft { controller: 1 }, 0x07, 1),
        (Command::LaserSetRight { controller: 1 }, 0x08, 1),
        (Command::LaserSetBottom { controller: 1 }, 0x09, 1),
        (Command::LaserSetTop { controller: 1 }, 0x10, 1),
        (Command::LaserEnable { controller: 2 }, 0x11, 1),
        (Command::LaserDisable { controller: 2 }, 0x12, 1),
        (Command::ControllerReset { controller: 3 }, 0x13, 1),
        (Command::PositionSetLeft { controller: 0 }, 0x14, 1),
        (Command::PositionSetRight { controller: 0 }, 0x15, 1),
        (Command::PositionSetBottom { controller: 0 }, 0x16, 1),
        (Command::PositionSetTop { controller: 0 }, 0x17, 1),
        (Command::PositionEnable { controller: 0 }, 0x18, 1),
        (Command::PositionDisable { controller: 0 }, 0x19, 1),
        (
            Command::ForceRgb {
                controller: 0,
                r: 1.0,
                g: 0.5,
                b: 0.0,
            },
            0x20,
            4,
        ),
        (
            Command::SetRumble {
                controller: 0,
                rumble: 255,
            },
            0x21,
            2,
        ),
        (
            Command::TrackHues {
                hue0: 0,
                hue1: 180,
                hue2: PICK_FOR_ME,
                hue3: DONT_TRACK,
            },
            0x22,
            4,
        ),
        (Command::CameraFrameDelay { ms: 16 }, 0x23, 1),
        (Command::CameraFrameSlices { count: 7 }, 0x24, 1),
        (Command::CameraFramePause, 0x25, 0),
        (Command::CameraFrameResume, 0x26, 0),
    ]
}

#[test]
fn every_schema_round_trips_its_header() {
    for (cmd, code, arity) in all_schemas() {
        let mut frame = Vec::new();
        encode_command(&cmd, &mut frame);

        let (decoded_code, decoded_len) =
            decode_frame_header(&frame).expect("encoded frame must carry a valid header");

        assert_eq!(decoded_code, code, "code for {cmd:?}");
        assert_eq!(decoded_len, 4 * arity, "length for {cmd:?}");
        assert_eq!(frame.len(), 8 + 4 * arity as usize, "frame size for {cmd:?}");
    }
}

#[test]
fn init_frame_bytes_are_exact() {
    let mut frame = Vec::new();
    encode_command(&Command::Init { udp_port: 0x1234 }, &mut frame);

    assert_eq!(
        frame,
        [
            0x00, 0x00, 0x00, 0x00, // code 0
            0x00, 0x00, 0x00, 0x04, // length 4
            0x00, 0x00, 0x12, 0x34, // port
        ]
    );
}

#[test]
fn force_rgb_encodes_floats_big_endian() {
    let mut frame = Vec::new();
    encode_command(
        &Command::ForceRgb {
            controller: 1,
            r: 1.0,
            g: 0.5,
            b: 0.25,
        },
        &mut frame,
    );

    assert_eq!(&frame[0..4], 0x20u32.to_be_bytes());
    assert_eq!(&frame[4..8], 16u32.to_be_bytes());
    assert_eq!(&frame[8..12], 1i32.to_be_bytes());
    assert_eq!(&frame[12..16], 1.0f32.to_be_bytes());
    assert_eq!(&frame[16..20], 0.5f32.to_be_bytes());
    assert_eq!(&frame[20..24], 0.25f32.to_be_bytes());
}

#[test]
fn zero_field_commands_declare_empty_payload() {
    let mut frame = Vec::new();
    encode_command(&Command::Pause, &mut frame);

    assert_eq!(frame.len(), 8);
    assert_eq!(decode_frame_header(&frame), Ok((0x01, 0)));
}

#[test]
fn truncated_frames_are_rejected() {
    let mut frame = Vec::new();
    encode_command(&Command::DelayChange { ms: 2 }, &mut frame);

    // Header cut short.
    assert!(decode_frame_header(&frame[..6]).is_err());
    // Declared payload missing.
    assert!(decode_frame_header(&frame[..10]).is_err());
}
