// Byte values on the wire.
//
// Commands come from the host and have the top bit clear, replies go back to the
// host and have it set. These never change, the host side firmware has them
// burned in.

// Imports

use crate::event::event_struct::EventKind;

use super::link_struct::InboundState;

// Constants

/// What we answer to a protocol version query.
pub const PROTOCOL_VERSION: u8 = 1;

// Host -> controller

pub const PROTO_GET_VERSION: u8 = 0x01;
pub const PROTO_PING: u8 = 0x05;
pub const PROTO_GET_CLOCK: u8 = 0x07;
pub const PROTO_SET_CLOCK: u8 = 0x08;
pub const PROTO_GET_DIR: u8 = 0x10;
pub const PROTO_GET_MOUNTED: u8 = 0x11;
pub const PROTO_MOUNT: u8 = 0x12;
pub const PROTO_UNMOUNT: u8 = 0x13;
pub const PROTO_GET_STATUS: u8 = 0x14;
/// Also used as abort.
pub const PROTO_DONE: u8 = 0x15;
pub const PROTO_READ_FILE: u8 = 0x16;
pub const PROTO_READ_BYTES: u8 = 0x17;
pub const PROTO_READ_SECTOR: u8 = 0x18;
pub const PROTO_WRITE_SECTOR: u8 = 0x19;
pub const PROTO_WRITE_FILE: u8 = 0x1b;
pub const PROTO_WRITE_BYTES: u8 = 0x1c;
pub const PROTO_SAVE_CONFIG: u8 = 0x1d;
pub const PROTO_SET_TIMER: u8 = 0x1e;
pub const PROTO_READ_SECTOR_LONG: u8 = 0x1f;
pub const PROTO_WRITE_SECTOR_LONG: u8 = 0x20;

// Controller -> host

/// Doubles as the protocol version query from the host.
pub const PROTO_VERSION_INFO: u8 = 0x81;
pub const PROTO_ACK: u8 = 0x82;
pub const PROTO_NAK: u8 = 0x83;
pub const PROTO_PONG: u8 = 0x85;
pub const PROTO_CLOCK_DATA: u8 = 0x87;
pub const PROTO_DIR: u8 = 0x90;
pub const PROTO_DIR_END: u8 = 0x91;
pub const PROTO_FILE_DATA: u8 = 0x92;
pub const PROTO_STATUS: u8 = 0x93;
pub const PROTO_SECTOR_DATA: u8 = 0x94;
pub const PROTO_MOUNT_INFO: u8 = 0x95;

/// Header bytes on the short sector commands: drive, size code, track, sector, sectors per track.
pub const SHORT_SECTOR_HEADER: u8 = 5;
/// Header bytes on the long sector commands: drive, size code, then a 4 byte sector number.
pub const LONG_SECTOR_HEADER: u8 = 6;

// Functions

/// How many bytes a sector size code means.
///
/// Unknown codes get the normal 256.
pub fn sector_size(code: u8) -> usize {
    match code {
        1 => 128,
        2 => 256,
        3 => 512,
        4 => 1024,
        _ => 256,
    }
}

/// What a command byte turns into, and what the parser has to collect after it.
///
/// `InboundState::Command` as the next state means the command has no arguments
/// and is complete already. Commands answered on the spot (ping, protocol
/// version, done) and unknown commands return `None`.
pub fn command_grammar(code: u8) -> Option<(EventKind, InboundState)> {
    let grammar = match code {
        PROTO_GET_VERSION => (EventKind::GetVersion, InboundState::Command),
        PROTO_GET_CLOCK => (EventKind::GetClock, InboundState::Command),
        PROTO_SET_CLOCK => (EventKind::SetClock, InboundState::Payload { remaining: 8 }),
        PROTO_GET_DIR => (EventKind::GetDirectory, InboundState::Command),
        PROTO_GET_MOUNTED => (EventKind::GetMounted, InboundState::Command),
        PROTO_MOUNT => (EventKind::Mount, InboundState::MountDrive),
        PROTO_UNMOUNT => (EventKind::Unmount, InboundState::Header { remaining: 1 }),
        PROTO_GET_STATUS => (EventKind::GetStatus, InboundState::Header { remaining: 1 }),
        PROTO_READ_FILE => (EventKind::ReadFile, InboundState::UntilTerminator),
        PROTO_READ_BYTES => (EventKind::ReadBytes, InboundState::Header { remaining: 1 }),
        PROTO_READ_SECTOR => (
            EventKind::ReadSector,
            InboundState::Header {
                remaining: SHORT_SECTOR_HEADER,
            },
        ),
        PROTO_WRITE_SECTOR => (
            EventKind::WriteSector,
            InboundState::Header {
                remaining: SHORT_SECTOR_HEADER,
            },
        ),
        PROTO_WRITE_FILE => (EventKind::WriteFile, InboundState::UntilTerminator),
        PROTO_WRITE_BYTES => (EventKind::WriteBytes, InboundState::Length),
        PROTO_SAVE_CONFIG => (EventKind::SaveConfig, InboundState::Command),
        PROTO_SET_TIMER => (EventKind::SetTimer, InboundState::Header { remaining: 1 }),
        PROTO_READ_SECTOR_LONG => (
            EventKind::ReadSectorLong,
            InboundState::Header {
                remaining: LONG_SECTOR_HEADER,
            },
        ),
        PROTO_WRITE_SECTOR_LONG => (
            EventKind::WriteSectorLong,
            InboundState::Header {
                remaining: LONG_SECTOR_HEADER,
            },
        ),
        _ => return None,
    };
    Some(grammar)
}
