// Flattening replies into bytes for the host.

// Imports

use log::warn;

use super::protocol::{
    sector_size, PROTO_ACK, PROTO_CLOCK_DATA, PROTO_DIR, PROTO_DIR_END, PROTO_FILE_DATA, PROTO_MOUNT_INFO,
    PROTO_NAK, PROTO_SECTOR_DATA, PROTO_STATUS, PROTO_VERSION_INFO,
};
use crate::event::event_struct::{Event, EventKind};
use crate::peripherals::clock::CLOCK_RECORD_SIZE;

// Functions

/// The exact bytes a reply puts on the wire.
///
/// Anything the event doesn't have goes out as zeros. Kinds that only ever come
/// from the host encode to nothing.
pub(super) fn encode_event(event: &Event) -> Vec<u8> {
    let mut wire: Vec<u8> = Vec::new();
    match event.kind() {
        EventKind::Ack => wire.push(PROTO_ACK),
        EventKind::Nak => {
            // Always followed by the reason.
            wire.push(PROTO_NAK);
            wire.push(event.byte(0));
        }
        EventKind::FileData => {
            // Length, then that many bytes. Zero length is end of file.
            let length = event.byte(0);
            wire.push(PROTO_FILE_DATA);
            wire.push(length);
            push_padded(&mut wire, event, 1, usize::from(length));
        }
        EventKind::DirInfo => {
            wire.push(PROTO_DIR);
            wire.extend_from_slice(event.terminated_at(0));
            wire.push(0);
        }
        EventKind::DirEnd => wire.push(PROTO_DIR_END),
        EventKind::ReadSector => {
            // The size code leads the event but doesn't go over the wire.
            wire.push(PROTO_SECTOR_DATA);
            push_padded(&mut wire, event, 1, sector_size(event.byte(0)));
        }
        EventKind::DiskStatus => {
            wire.push(PROTO_STATUS);
            wire.push(event.byte(0));
        }
        EventKind::Mounted => {
            wire.push(PROTO_MOUNT_INFO);
            wire.push(event.byte(0)); // drive
            wire.push(event.byte(1)); // read-only flag
            wire.extend_from_slice(event.terminated_at(2));
            wire.push(0);
        }
        EventKind::ClockData => {
            wire.push(PROTO_CLOCK_DATA);
            push_padded(&mut wire, event, 0, CLOCK_RECORD_SIZE);
        }
        EventKind::VersionInfo => {
            wire.push(PROTO_VERSION_INFO);
            wire.extend_from_slice(event.data());
        }
        other => {
            warn!("Don't know how to send a {other:?} to the host, sending nothing.");
        }
    }
    wire
}

/// `count` bytes of the event starting at `start`, zeros past the end.
fn push_padded(wire: &mut Vec<u8>, event: &Event, start: usize, count: usize) {
    wire.extend((start..start + count).map(|position| event.byte(position)));
}
