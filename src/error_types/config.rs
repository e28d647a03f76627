// Errors while loading or saving the default mounts file.
use thiserror::Error;

use crate::error_types::storage::StorageError;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("No storage card is inserted.")]
    NoCard,
    #[error("Couldn't make a backup of the config file, nothing was changed.")]
    BackupFailed(StorageError),
    #[error("Couldn't open the config file for updating.")]
    OpenFailed(StorageError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
