// Mounting, unmounting, and moving sectors in and out of disk images.
//
// There's no caching here. Writes go straight to the card and get flushed, reads
// always come straight off the card.

// Imports

use log::{debug, error, log_enabled, trace, warn, Level};

use super::disk_struct::{Disk, DiskStatus, FILENAME_SIZE, SECTOR_SIZE};
use crate::error_types::disk::{error_code, DiskError};
use crate::error_types::storage::StorageError;
use crate::helpers::hex_view::hex_view;
use crate::storage::storage_trait::{OpenMode, Storage, StorageFile};

// Implementations

impl<F: StorageFile> Disk<F> {
    /// An empty drive.
    pub fn new() -> Self {
        Disk {
            mounted: false,
            read_only: false,
            filename: String::new(),
            file: None,
            last_error: None,
        }
    }

    /// Put a disk image in this drive.
    ///
    /// If something is already mounted it gets swapped out, but only once the new
    /// image has opened. A failed mount leaves the old one alone.
    pub fn mount<S>(&mut self, storage: &mut S, name: &str, read_only: bool) -> Result<(), DiskError>
    where
        S: Storage<File = F>,
    {
        mount(self, storage, name, read_only)
    }

    /// Take the disk out. Fine to call on an empty drive.
    ///
    /// Always leaves the last error as `NotMounted`, status requests after this see it.
    pub fn unmount(&mut self) {
        if self.mounted {
            debug!("Unmounting {}", self.filename);
            // Dropping the file closes it.
            self.file = None;
            self.mounted = false;
        }
        self.last_error = Some(DiskError::NotMounted);
    }

    /// Close the image without forgetting it was mounted.
    /// Used when the card is about to vanish.
    pub fn close(&mut self) {
        if self.file.take().is_some() {
            debug!("Closed {}", self.filename);
        }
    }

    /// Read one sector starting at a byte offset into the image.
    pub fn read_sector(&mut self, offset: u64, buffer: &mut [u8; SECTOR_SIZE]) -> Result<(), DiskError> {
        let result = read_sector(self, offset, buffer);
        self.last_error = result.err();
        result
    }

    /// Write one sector starting at a byte offset into the image.
    /// The image never grows, writing past the end is an error.
    pub fn write_sector(&mut self, offset: u64, buffer: &[u8; SECTOR_SIZE]) -> Result<(), DiskError> {
        let result = write_sector(self, offset, buffer);
        self.last_error = result.err();
        result
    }

    pub fn status(&self) -> DiskStatus {
        let mut status = DiskStatus::empty();
        if self.mounted {
            status |= DiskStatus::MOUNTED;
            if !self.read_only {
                status |= DiskStatus::WRITABLE;
            }
        }
        status
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn last_error(&self) -> Option<DiskError> {
        self.last_error
    }

    /// Last error as a wire byte.
    pub fn error_code(&self) -> u8 {
        error_code(self.last_error)
    }
}

impl<F: StorageFile> Default for Disk<F> {
    fn default() -> Self {
        Disk::new()
    }
}

// Make sure nothing is left open.
impl<F> Drop for Disk<F> {
    fn drop(&mut self) {
        if self.mounted {
            debug!("Dropping drive with {} still mounted, closing it.", self.filename);
        }
        self.file = None;
        self.mounted = false;
    }
}

// Functions

fn mount<F, S>(disk: &mut Disk<F>, storage: &mut S, name: &str, read_only: bool) -> Result<(), DiskError>
where
    F: StorageFile,
    S: Storage<File = F>,
{
    debug!("Mounting {name} (read only: {read_only})...");

    // The card can't hold names like that, so it can't be there.
    if name.is_empty() || name.len() > FILENAME_SIZE {
        warn!("Refusing to mount `{name}`, not an 8.3 name.");
        disk.last_error = Some(DiskError::FileNotFound);
        return Err(DiskError::FileNotFound);
    }

    if !storage.exists(name) {
        debug!("{name} does not exist.");
        disk.last_error = Some(DiskError::FileNotFound);
        return Err(DiskError::FileNotFound);
    }

    let mode = if read_only { OpenMode::Read } else { OpenMode::ReadWrite };
    let file = match storage.open(name, mode) {
        Ok(ok) => ok,
        Err(error) => {
            error!("Failed to open {name}: {error}");
            disk.last_error = Some(DiskError::FileNotFound);
            return Err(DiskError::FileNotFound);
        }
    };

    if disk.mounted {
        debug!("Swapping out {} for {name}.", disk.filename);
    }

    // The old file (if any) gets dropped, and thus closed, right here.
    disk.file = Some(file);
    disk.mounted = true;
    disk.read_only = read_only;
    disk.filename = name.to_string();
    disk.last_error = None;
    debug!("Mounted {name}.");
    Ok(())
}

fn read_sector<F: StorageFile>(disk: &mut Disk<F>, offset: u64, buffer: &mut [u8; SECTOR_SIZE]) -> Result<(), DiskError> {
    let file = match disk.file.as_mut() {
        Some(file) => file,
        // Mounted but closed, the card went away.
        None => return Err(DiskError::DeviceNotPresent),
    };

    let sector = SECTOR_SIZE as u64;

    // Make sure a whole sector is actually there before reading anything.
    let size = file.size().map_err(|error| storage_failure("size", error, DiskError::ReadError))?;
    file.seek(offset)
        .map_err(|error| storage_failure("seek", error, DiskError::ReadError))?;
    let available = file
        .available()
        .map_err(|error| storage_failure("available", error, DiskError::ReadError))?;
    if available < sector || offset.saturating_add(sector) > size {
        warn!("Not enough bytes to read a sector at {offset:#x}, only {available} left.");
        return Err(DiskError::ReadError);
    }

    let read = file
        .read(buffer)
        .map_err(|error| storage_failure("read", error, DiskError::ReadError))?;
    if read != SECTOR_SIZE {
        warn!("Short read at {offset:#x}, got {read} bytes.");
        return Err(DiskError::ReadError);
    }

    if log_enabled!(Level::Trace) {
        trace!("Sector at {offset:#x}:\n{}", hex_view(&buffer[..]));
    }
    Ok(())
}

fn write_sector<F: StorageFile>(disk: &mut Disk<F>, offset: u64, buffer: &[u8; SECTOR_SIZE]) -> Result<(), DiskError> {
    if disk.read_only {
        debug!("Refusing to write to read only {}.", disk.filename);
        return Err(DiskError::ReadOnly);
    }

    let file = match disk.file.as_mut() {
        Some(file) => file,
        None => return Err(DiskError::DeviceNotPresent),
    };

    file.seek(offset)
        .map_err(|error| storage_failure("seek", error, DiskError::WriteError))?;
    let available = file
        .available()
        .map_err(|error| storage_failure("available", error, DiskError::WriteError))?;
    if available < SECTOR_SIZE as u64 {
        warn!("Not enough room to write a sector at {offset:#x}, only {available} left.");
        return Err(DiskError::WriteError);
    }

    // Write it, then flush it so it's really on the card.
    let wrote = file
        .write(buffer)
        .map_err(|error| storage_failure("write", error, DiskError::WriteError))?;
    file.flush()
        .map_err(|error| storage_failure("flush", error, DiskError::WriteError))?;

    if wrote != SECTOR_SIZE {
        warn!("Didn't write enough bytes at {offset:#x}, only {wrote}.");
        return Err(DiskError::WriteError);
    }
    Ok(())
}

/// Log a storage error and swap it for the drive level error the host will see.
fn storage_failure(what: &str, error: StorageError, becomes: DiskError) -> DiskError {
    error!("Storage {what} failed: {error}");
    becomes
}
