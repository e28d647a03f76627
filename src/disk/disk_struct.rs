// One virtual drive, backed by a disk image file on the card.

// Imports

use bitflags::bitflags;

use crate::error_types::disk::DiskError;

// Structs, Enums, Flags

/// Every sector is this big. The host does send a sector size code, but nothing
/// ever asks for anything else.
pub const SECTOR_SIZE: usize = 256;

/// The card only does 8.3 names, `xxxxxxxx.xxx`.
pub const FILENAME_SIZE: usize = 12;

/// A drive slot.
///
/// `F` is whatever file type the storage driver hands out.
pub struct Disk<F> {
    /// Is there an image in this drive?
    pub(super) mounted: bool,
    /// Writes get refused if set.
    pub(super) read_only: bool,
    /// Name of the mounted image, empty if nothing was ever mounted.
    pub(super) filename: String,
    /// The open image. `None` after unmounting, or after the card was pulled.
    pub(super) file: Option<F>,
    /// Whatever went wrong last.
    pub(super) last_error: Option<DiskError>,
}

bitflags! {
    /// Drive status byte as the host sees it.
    #[derive(Debug, PartialEq, Eq, Clone, Copy)]
    pub struct DiskStatus: u8 {
        /// Something is mounted.
        const MOUNTED = 0b00000001;
        /// Mounted, and writes are allowed.
        const WRITABLE = 0b00000010;
    }
}
