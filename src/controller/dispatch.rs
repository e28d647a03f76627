// Turning a command from the host into work, and the work into a reply.
//
// The reply reuses the command's event. The host never sends another command
// until it has its answer, so the single event is always free again by then.

// Imports

use log::{debug, error, warn};

use super::controller_struct::Controller;
use crate::disk::disk_struct::SECTOR_SIZE;
use crate::error_types::disk::DiskError;
use crate::error_types::link::LinkError;
use crate::event::event_struct::{Event, EventKind};
use crate::link::handshake::LinkPins;
use crate::link::protocol::{LONG_SECTOR_HEADER, SHORT_SECTOR_HEADER};
use crate::peripherals::clock::{Clock, ClockRecord};
use crate::storage::storage_trait::Storage;

// Functions

/// Handle one finished command from the host.
pub(super) fn dispatch<P, S, C>(controller: &mut Controller<P, S, C>, mut event: Event) -> Result<(), LinkError>
where
    P: LinkPins,
    S: Storage,
    C: Clock,
{
    debug!("Dispatching {event:?}");
    match event.kind() {
        EventKind::GetVersion => {
            let (major, minor) = controller.options.firmware_version;
            event.clean(EventKind::VersionInfo);
            event.add_byte(major);
            event.add_byte(minor);
            controller.link.send_event(event)
        }
        EventKind::GetMounted => send_mounted_list(controller, event),
        EventKind::Mount => {
            let drive = event.byte(0);
            let read_only = event.byte(1) != 0;
            let name = String::from_utf8_lossy(event.terminated_at(2)).into_owned();
            let result = controller.disks.mount(drive, &name, read_only);
            reply(controller, event, result)
        }
        EventKind::Unmount => {
            let result = controller.disks.unmount(event.byte(0));
            reply(controller, event, result)
        }
        EventKind::GetStatus => match controller.disks.status(event.byte(0)) {
            Ok(status) => {
                event.clean(EventKind::DiskStatus);
                event.add_byte(status.bits());
                controller.link.send_event(event)
            }
            Err(error) => reply(controller, event, Err(error)),
        },
        EventKind::ReadSector | EventKind::ReadSectorLong => read_sector(controller, event),
        EventKind::WriteSector | EventKind::WriteSectorLong => {
            let (drive, offset, header) = sector_address(&event);
            let mut sector = [0u8; SECTOR_SIZE];
            for (position, byte) in sector.iter_mut().enumerate() {
                *byte = event.byte(header + position);
            }
            let result = controller.disks.write_sector(drive, offset, &sector);
            reply(controller, event, result)
        }
        EventKind::GetClock => match controller.clock.get_clock() {
            Ok(record) => {
                event.clean(EventKind::ClockData);
                event.add_bytes(record.as_bytes());
                controller.link.send_event(event)
            }
            Err(error) => {
                warn!("Couldn't read the clock: {error}");
                reply(controller, event, Err(DiskError::from(error)))
            }
        },
        EventKind::SetClock => {
            let record = ClockRecord::from_bytes(event.data());
            let result = controller.clock.set_clock(&record).map_err(|error| {
                warn!("Couldn't set the clock: {error}");
                DiskError::from(error)
            });
            reply(controller, event, result)
        }
        EventKind::SaveConfig => {
            let result = controller.disks.save_config().map_err(|error| {
                error!("Saving the config failed: {error}");
                DiskError::from(error)
            });
            reply(controller, event, result)
        }
        EventKind::GetDirectory
        | EventKind::ReadFile
        | EventKind::ReadBytes
        | EventKind::WriteFile
        | EventKind::WriteBytes
        | EventKind::SetTimer => {
            warn!("Host asked for {:?}, which we don't do.", event.kind());
            reply(controller, event, Err(DiskError::NotImplemented))
        }
        other => {
            // Replies and such never come out of the link, someone made this by hand.
            error!("Can't dispatch a {other:?}, dropping it.");
            controller.link.release_event(event);
            Ok(())
        }
    }
}

/// Ack on success, otherwise Nak with the reason.
fn reply<P, S, C>(
    controller: &mut Controller<P, S, C>,
    mut event: Event,
    result: Result<(), DiskError>,
) -> Result<(), LinkError>
where
    P: LinkPins,
    S: Storage,
    C: Clock,
{
    match result {
        Ok(()) => event.clean(EventKind::Ack),
        Err(reason) => {
            debug!("Replying NAK: {reason}");
            event.clean(EventKind::Nak);
            event.add_byte(reason.code());
        }
    }
    controller.link.send_event(event)
}

fn read_sector<P, S, C>(controller: &mut Controller<P, S, C>, mut event: Event) -> Result<(), LinkError>
where
    P: LinkPins,
    S: Storage,
    C: Clock,
{
    let (drive, offset, _) = sector_address(&event);
    // Goes back out in front of the data, it decides how much gets sent.
    let size_code = event.byte(1);
    let mut sector = [0u8; SECTOR_SIZE];
    match controller.disks.read_sector(drive, offset, &mut sector) {
        Ok(()) => {
            event.clean(EventKind::ReadSector);
            event.add_byte(size_code);
            event.add_bytes(&sector);
            controller.link.send_event(event)
        }
        Err(error) => reply(controller, event, Err(error)),
    }
}

/// One Mounted per mounted drive, then a DirEnd to close the list.
fn send_mounted_list<P, S, C>(controller: &mut Controller<P, S, C>, mut event: Event) -> Result<(), LinkError>
where
    P: LinkPins,
    S: Storage,
    C: Clock,
{
    for entry in controller.disks.mounted_list() {
        event.clean(EventKind::Mounted);
        event.add_byte(entry.drive);
        event.add_byte(u8::from(entry.read_only));
        event.add_bytes(entry.filename.as_bytes());
        event.add_byte(0);
        controller.link.send_event(event)?;
        // Sending put it back in the pool.
        event = controller.link.acquire_event()?;
    }
    event.clean(EventKind::DirEnd);
    controller.link.send_event(event)
}

/// Drive, byte offset into the image, and how long the header was.
///
/// Short form is drive, size code, track, sector, sectors per track.
/// Long form is drive, size code, then a big endian sector number.
fn sector_address(event: &Event) -> (u8, u64, usize) {
    let drive = event.byte(0);
    let sector_bytes = SECTOR_SIZE as u64;
    match event.kind() {
        EventKind::ReadSectorLong | EventKind::WriteSectorLong => {
            let number = u32::from_be_bytes([event.byte(2), event.byte(3), event.byte(4), event.byte(5)]);
            (drive, u64::from(number) * sector_bytes, usize::from(LONG_SECTOR_HEADER))
        }
        _ => {
            let track = u64::from(event.byte(2));
            let sector = u64::from(event.byte(3));
            let per_track = u64::from(event.byte(4));
            (
                drive,
                (track * per_track + sector) * sector_bytes,
                usize::from(SHORT_SECTOR_HEADER),
            )
        }
    }
}
