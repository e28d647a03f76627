// The storage driver interface.
//
// This is shaped after what the little SD card libraries give you: open a file by
// name, seek, read and write some bytes, ask how much is left. No directories, no
// renames. Closing a file is just dropping it.

// Imports

use crate::error_types::storage::StorageError;

// Structs, Enums, Flags

/// How to open a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read only, file must exist.
    Read,
    /// Read and write, file must exist, contents are kept.
    ReadWrite,
    /// Read and write, file is created if needed and emptied.
    Create,
}

/// An open file on the card.
pub trait StorageFile {
    /// Move to an absolute byte offset.
    fn seek(&mut self, offset: u64) -> Result<(), StorageError>;

    /// Total length of the file.
    fn size(&mut self) -> Result<u64, StorageError>;

    /// Bytes left between the current position and the end of the file.
    fn available(&mut self) -> Result<u64, StorageError>;

    /// Read up to `buffer.len()` bytes. Returns how many were read, zero at the end.
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StorageError>;

    /// Write some bytes at the current position. Returns how many made it.
    fn write(&mut self, buffer: &[u8]) -> Result<usize, StorageError>;

    /// Push anything buffered down to the card.
    fn flush(&mut self) -> Result<(), StorageError>;
}

/// The card itself.
pub trait Storage {
    type File: StorageFile;

    /// (Re)start the driver, called after a card is inserted.
    fn begin(&mut self) -> Result<(), StorageError>;

    /// Does a file with this name exist?
    fn exists(&mut self, name: &str) -> bool;

    fn open(&mut self, name: &str, mode: OpenMode) -> Result<Self::File, StorageError>;

    /// Delete a file. Deleting something that isn't there is not an error.
    fn remove(&mut self, name: &str) -> Result<(), StorageError>;
}
