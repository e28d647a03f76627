// Conversions between all of the lower types.

//
// Imports
//

use log::warn;

use crate::error_types::clock::ClockError;
use crate::error_types::config::ConfigError;
use crate::error_types::disk::DiskError;
use crate::error_types::storage::StorageError;

// Not every error type can just be converted upwards willy-nilly. Storage errors only
// become DiskErrors where the drive code decides what they mean (read vs write), so
// there is deliberately no From<StorageError> for DiskError.

//
// std::io::Error into StorageError
//

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        extract_io_error(value)
    }
}

fn extract_io_error(error: std::io::Error) -> StorageError {
    warn!("Got an error when doing io:");
    warn!("{error:#?}");
    // What happened?
    match error.kind() {
        std::io::ErrorKind::NotFound => StorageError::NotFound,
        std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied,
        std::io::ErrorKind::ReadOnlyFilesystem => StorageError::PermissionDenied,
        std::io::ErrorKind::InvalidInput => StorageError::Invalid,
        std::io::ErrorKind::InvalidData => StorageError::Invalid,
        std::io::ErrorKind::WriteZero => StorageError::WriteFailure,
        std::io::ErrorKind::StorageFull => StorageError::WriteFailure,
        std::io::ErrorKind::ResourceBusy => StorageError::DeviceBusy,
        std::io::ErrorKind::WouldBlock => StorageError::DeviceBusy,
        std::io::ErrorKind::Interrupted => StorageError::Interrupted,
        // Anything else is not something a card driver would tell us about.
        _ => StorageError::Unknown(error.to_string()),
    }
}

//
// Errors that end up as a NAK reason byte
//

impl From<ClockError> for DiskError {
    fn from(value: ClockError) -> Self {
        match value {
            // Both of these mean the host can't use the clock.
            ClockError::NotPresent | ClockError::Rejected => DiskError::DeviceNotPresent,
        }
    }
}

impl From<ConfigError> for DiskError {
    fn from(value: ConfigError) -> Self {
        match value {
            ConfigError::NoCard => DiskError::DeviceNotPresent,
            // Anything else means the file did not get written.
            ConfigError::BackupFailed(_) | ConfigError::OpenFailed(_) | ConfigError::Storage(_) => {
                DiskError::WriteError
            }
        }
    }
}
