// Directory storage tests.
// Unwrapping is okay here, since we want unexpected outcomes to fail tests.
#![allow(clippy::unwrap_used)]

// Imports

use super::directory_storage::DirectoryStorage;
use super::storage_trait::{OpenMode, Storage, StorageFile};
use crate::error_types::storage::StorageError;
use tempfile::tempdir;
use test_log::test; // We want to see logs while testing.

// Tests

#[test]
fn create_write_read_back() {
    let dir = tempdir().unwrap();
    let mut storage = DirectoryStorage::new(dir.path());
    storage.begin().unwrap();

    let mut file = storage.open("TEST.DSK", OpenMode::Create).unwrap();
    assert_eq!(file.write(&[1, 2, 3, 4]).unwrap(), 4);
    file.flush().unwrap();
    drop(file);

    assert!(storage.exists("TEST.DSK"));
    let mut file = storage.open("TEST.DSK", OpenMode::Read).unwrap();
    file.seek(1).unwrap();
    assert_eq!(file.available().unwrap(), 3);
    let mut buffer = [0u8; 8];
    assert_eq!(file.read(&mut buffer).unwrap(), 3);
    assert_eq!(&buffer[..3], &[2, 3, 4]);
    assert_eq!(file.size().unwrap(), 4);
}

#[test]
fn missing_files() {
    let dir = tempdir().unwrap();
    let mut storage = DirectoryStorage::new(dir.path());
    assert!(!storage.exists("NOPE.DSK"));
    assert_eq!(
        storage.open("NOPE.DSK", OpenMode::Read).unwrap_err(),
        StorageError::NotFound
    );
    // Removing nothing is fine.
    storage.remove("NOPE.DSK").unwrap();
}

#[test]
fn names_cannot_escape_the_card() {
    let dir = tempdir().unwrap();
    let mut storage = DirectoryStorage::new(dir.path());
    for name in ["", "..", "../ETC", "A/B", "WAYTOOLONGNAME.DSK"] {
        assert!(!storage.exists(name));
        assert_eq!(
            storage.open(name, OpenMode::Create).unwrap_err(),
            StorageError::BadName
        );
    }
}

#[test]
fn no_folder_means_no_card() {
    let dir = tempdir().unwrap();
    let mut storage = DirectoryStorage::new(dir.path().join("gone"));
    assert_eq!(storage.begin().unwrap_err(), StorageError::NoCard);
}
