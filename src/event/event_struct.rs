// Everything that goes over the wire passes through an Event first.

// Structs, Enums, Flags

/// One sector plus a little header room.
/// Don't grow this without a reason, there is only ever one of these but it is the
/// biggest thing the controller keeps around.
pub const EVENT_CAPACITY: usize = 256 + 10;

/// What an event means.
///
/// Some kinds only ever come from the host, some only ever go to it, and a few
/// (like `ReadSector`) go both ways, so the names don't say which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventKind {
    #[default]
    None,
    GetVersion,
    VersionInfo,
    /// Host wants to read a raw file: null terminated name.
    ReadFile,
    Ack,
    /// Reason byte.
    Nak,
    /// Length byte, then that many bytes.
    FileData,
    /// Host wants the next block of the open file: one max-length byte.
    ReadBytes,
    GetDirectory,
    /// Null terminated name.
    DirInfo,
    DirEnd,
    GetMounted,
    /// Drive, read-only flag, null terminated name.
    Mounted,
    /// Drive, read-only flag, null terminated name.
    Mount,
    /// Drive.
    Unmount,
    /// Inbound: drive, size code, track, sector, sectors per track.
    /// Outbound: size code, then the sector.
    ReadSector,
    /// Drive, size code, four byte sector number (big endian).
    ReadSectorLong,
    /// Same header as `ReadSector`, then 256 bytes of sector.
    WriteSector,
    /// Same header as `ReadSectorLong`, then 256 bytes of sector.
    WriteSectorLong,
    /// Drive.
    GetStatus,
    /// Status byte.
    DiskStatus,
    GetClock,
    /// Eight byte clock record.
    ClockData,
    /// Eight byte clock record.
    SetClock,
    /// Null terminated name.
    WriteFile,
    /// Length byte (0 means 256), then the bytes.
    WriteBytes,
    SaveConfig,
    /// One byte.
    SetTimer,
}

/// A typed, fixed size buffer.
///
/// Appends past [`EVENT_CAPACITY`] are dropped on the floor. Callers that care
/// about the exact length track it themselves.
#[derive(Clone, PartialEq, Eq)]
pub struct Event {
    pub(super) kind: EventKind,
    pub(super) buffer: [u8; EVENT_CAPACITY],
    /// Next free spot in the buffer.
    pub(super) index: usize,
}
