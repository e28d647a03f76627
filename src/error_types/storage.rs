// Errors from the storage card driver.
// We do not allow string errors, except for the catch-all.
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
/// Things that can go wrong while talking to the storage medium.
pub enum StorageError {
    #[error("The file we are attempting to access is not there.")]
    NotFound,
    #[error("The storage driver denied the operation.")]
    PermissionDenied,
    #[error("Operation was deemed invalid by the driver, either due to methods or arguments.")]
    Invalid,
    #[error("A write operation failed or otherwise did not write all of the requested data.")]
    WriteFailure,
    #[error("The storage device is busy.")]
    DeviceBusy,
    #[error("Operation was interrupted. Can typically be retried.")]
    Interrupted,
    #[error("No storage card is inserted.")]
    NoCard,
    #[error("That name does not fit on the card (8.3 names only).")]
    BadName,
    // This is our catch all case.
    #[error("The driver returned an unknown error: {0}")]
    Unknown(String),
}
