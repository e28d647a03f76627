// A storage "card" that is really just a folder.
//
// Lets the whole controller run on a normal computer, and it's what the tests use.

// Imports

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use log::debug;

use super::storage_trait::{OpenMode, Storage, StorageFile};
use crate::error_types::storage::StorageError;

// Structs, Enums, Flags

/// Every file lives directly inside `root`, there are no subdirectories on the card.
#[derive(Debug, Clone)]
pub struct DirectoryStorage {
    root: PathBuf,
}

/// A file opened through [`DirectoryStorage`].
#[derive(Debug)]
pub struct DirectoryFile {
    file: File,
}

/// Longest name the card understands, `xxxxxxxx.xxx`.
const MAX_NAME_LENGTH: usize = 12;

// Implementations

impl DirectoryStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryStorage { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Turn a card file name into a real path, refusing anything that could escape the folder.
    fn resolve(&self, name: &str) -> Result<PathBuf, StorageError> {
        if name.is_empty()
            || name.len() > MAX_NAME_LENGTH
            || name.contains(['/', '\\'])
            || name == "."
            || name == ".."
        {
            return Err(StorageError::BadName);
        }
        Ok(self.root.join(name))
    }
}

impl Storage for DirectoryStorage {
    type File = DirectoryFile;

    fn begin(&mut self) -> Result<(), StorageError> {
        debug!("Starting directory storage at {}", self.root.display());
        if !self.root.is_dir() {
            // No folder, no card.
            return Err(StorageError::NoCard);
        }
        Ok(())
    }

    fn exists(&mut self, name: &str) -> bool {
        match self.resolve(name) {
            Ok(path) => path.is_file(),
            Err(_) => false,
        }
    }

    fn open(&mut self, name: &str, mode: OpenMode) -> Result<DirectoryFile, StorageError> {
        let path = self.resolve(name)?;
        debug!("Opening {} as {mode:?}", path.display());
        let file = match mode {
            OpenMode::Read => OpenOptions::new().read(true).open(path)?,
            OpenMode::ReadWrite => OpenOptions::new().read(true).write(true).open(path)?,
            OpenMode::Create => OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)?,
        };
        Ok(DirectoryFile { file })
    }

    fn remove(&mut self, name: &str) -> Result<(), StorageError> {
        let path = self.resolve(name)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            // Already gone, fine by us.
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

impl StorageFile for DirectoryFile {
    fn seek(&mut self, offset: u64) -> Result<(), StorageError> {
        let _ = self.file.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn size(&mut self) -> Result<u64, StorageError> {
        Ok(self.file.metadata()?.len())
    }

    fn available(&mut self) -> Result<u64, StorageError> {
        let position = self.file.stream_position()?;
        let size = self.size()?;
        Ok(size.saturating_sub(position))
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize, StorageError> {
        // A single read can come up short, so keep going until full or out of file.
        let mut filled: usize = 0;
        while filled < buffer.len() {
            let got = self.file.read(&mut buffer[filled..])?;
            if got == 0 {
                break;
            }
            filled += got;
        }
        Ok(filled)
    }

    fn write(&mut self, buffer: &[u8]) -> Result<usize, StorageError> {
        self.file.write_all(buffer)?;
        Ok(buffer.len())
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        self.file.flush()?;
        self.file.sync_data()?;
        Ok(())
    }
}
