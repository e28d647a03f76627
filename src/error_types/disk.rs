// Errors the host actually gets to see.
// These values are part of the wire protocol, do not renumber them.
use thiserror::Error;

/// Wire value for "no error". There is no `DiskError` for it, a clean result is just `Ok`.
pub const ERR_NONE: u8 = 0;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
/// The flat error taxonomy shared by the drives and the host.
///
/// Every variant maps onto exactly one protocol error code, see [`DiskError::code`].
/// These get sent back to the host as the reason byte of a NAK.
pub enum DiskError {
    #[error("No disk is mounted on that drive.")]
    NotMounted,
    #[error("That drive already has a disk mounted.")]
    AlreadyMounted,
    #[error("The requested disk image does not exist.")]
    FileNotFound,
    #[error("The drive is mounted read-only.")]
    ReadOnly,
    #[error("Drive number is out of range.")]
    BadDrive,
    #[error("Track number is out of range.")]
    BadTrack,
    #[error("Sector number is out of range.")]
    BadSector,
    #[error("Could not read a full sector from the disk image.")]
    ReadError,
    #[error("Could not write a full sector to the disk image.")]
    WriteError,
    #[error("The storage card (or the device asked for) is not present.")]
    DeviceNotPresent,
    #[error("The host asked for something we don't do.")]
    NotImplemented,
}

impl DiskError {
    /// Protocol code for this error.
    pub fn code(self) -> u8 {
        match self {
            DiskError::NotMounted => 10,
            DiskError::AlreadyMounted => 11,
            DiskError::FileNotFound => 12,
            DiskError::ReadOnly => 13,
            DiskError::BadDrive => 14,
            DiskError::BadTrack => 15,
            DiskError::BadSector => 16,
            DiskError::ReadError => 17,
            DiskError::WriteError => 18,
            DiskError::DeviceNotPresent => 19,
            DiskError::NotImplemented => 20,
        }
    }
}

/// Last-error fields hold an `Option<DiskError>`, this flattens that into the wire byte.
pub fn error_code(error: Option<DiskError>) -> u8 {
    match error {
        Some(error) => error.code(),
        None => ERR_NONE,
    }
}
