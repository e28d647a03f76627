// Single drive tests, against disk images in a temp folder.
// Unwrapping is okay here, since we want unexpected outcomes to fail tests.
#![allow(clippy::unwrap_used)]

// Imports

use super::disk_struct::{Disk, DiskStatus, SECTOR_SIZE};
use crate::error_types::disk::DiskError;
use crate::storage::directory_storage::{DirectoryFile, DirectoryStorage};
use rand::RngCore;
use tempfile::{tempdir, TempDir};
use test_log::test; // We want to see logs while testing.

// Helpers

/// A card with one image on it, `sectors` sectors long, sector n filled with n.
fn card_with_image(name: &str, sectors: usize) -> (TempDir, DirectoryStorage) {
    let dir = tempdir().unwrap();
    let mut image = Vec::with_capacity(sectors * SECTOR_SIZE);
    for sector in 0..sectors {
        image.extend(std::iter::repeat_n(sector as u8, SECTOR_SIZE));
    }
    std::fs::write(dir.path().join(name), image).unwrap();
    let storage = DirectoryStorage::new(dir.path());
    (dir, storage)
}

// Tests

#[test]
fn mount_missing_file() {
    let (_dir, mut storage) = card_with_image("A.DSK", 4);
    let mut disk: Disk<DirectoryFile> = Disk::new();
    assert_eq!(disk.mount(&mut storage, "NOPE.DSK", false), Err(DiskError::FileNotFound));
    assert!(!disk.is_mounted());
    assert_eq!(disk.error_code(), 12);
}

#[test]
fn mount_rejects_long_names() {
    let (_dir, mut storage) = card_with_image("A.DSK", 4);
    let mut disk: Disk<DirectoryFile> = Disk::new();
    assert_eq!(
        disk.mount(&mut storage, "THISISTOOLONG.DSK", false),
        Err(DiskError::FileNotFound)
    );
}

#[test]
fn read_write_read() {
    let (_dir, mut storage) = card_with_image("A.DSK", 4);
    let mut disk: Disk<DirectoryFile> = Disk::new();
    disk.mount(&mut storage, "A.DSK", false).unwrap();

    let mut buffer = [0u8; SECTOR_SIZE];
    disk.read_sector(2 * SECTOR_SIZE as u64, &mut buffer).unwrap();
    assert!(buffer.iter().all(|byte| *byte == 2));

    let mut new_data = [0u8; SECTOR_SIZE];
    rand::rng().fill_bytes(&mut new_data);
    disk.write_sector(2 * SECTOR_SIZE as u64, &new_data).unwrap();

    disk.read_sector(2 * SECTOR_SIZE as u64, &mut buffer).unwrap();
    assert_eq!(buffer, new_data);

    // Neighbors are untouched.
    disk.read_sector(3 * SECTOR_SIZE as u64, &mut buffer).unwrap();
    assert!(buffer.iter().all(|byte| *byte == 3));
    assert_eq!(disk.last_error(), None);
}

#[test]
fn read_only_refuses_writes() {
    let (dir, mut storage) = card_with_image("A.DSK", 2);
    let before = std::fs::read(dir.path().join("A.DSK")).unwrap();

    let mut disk: Disk<DirectoryFile> = Disk::new();
    disk.mount(&mut storage, "A.DSK", true).unwrap();
    assert_eq!(disk.write_sector(0, &[0xAA; SECTOR_SIZE]), Err(DiskError::ReadOnly));
    assert_eq!(disk.error_code(), 13);

    drop(disk);
    let after = std::fs::read(dir.path().join("A.DSK")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn reading_past_the_end() {
    let (_dir, mut storage) = card_with_image("A.DSK", 2);
    let mut disk: Disk<DirectoryFile> = Disk::new();
    disk.mount(&mut storage, "A.DSK", false).unwrap();
    let mut buffer = [0x55u8; SECTOR_SIZE];

    // Last sector is fine.
    disk.read_sector(SECTOR_SIZE as u64, &mut buffer).unwrap();
    // Half a sector is not.
    assert_eq!(disk.read_sector(SECTOR_SIZE as u64 + 128, &mut buffer), Err(DiskError::ReadError));
    // Nothing at all is not either.
    assert_eq!(disk.read_sector(100 * SECTOR_SIZE as u64, &mut buffer), Err(DiskError::ReadError));
    assert_eq!(disk.error_code(), 17);
}

#[test]
fn writing_past_the_end_does_not_grow_the_image() {
    let (dir, mut storage) = card_with_image("A.DSK", 2);
    let mut disk: Disk<DirectoryFile> = Disk::new();
    disk.mount(&mut storage, "A.DSK", false).unwrap();
    assert_eq!(
        disk.write_sector(2 * SECTOR_SIZE as u64, &[1; SECTOR_SIZE]),
        Err(DiskError::WriteError)
    );
    drop(disk);
    let length = std::fs::metadata(dir.path().join("A.DSK")).unwrap().len();
    assert_eq!(length, 2 * SECTOR_SIZE as u64);
}

#[test]
fn unmount_twice_is_fine() {
    let (_dir, mut storage) = card_with_image("A.DSK", 1);
    let mut disk: Disk<DirectoryFile> = Disk::new();
    disk.mount(&mut storage, "A.DSK", false).unwrap();
    disk.unmount();
    disk.unmount();
    assert!(!disk.is_mounted());
    assert!(!disk.is_open());
    assert_eq!(disk.status(), DiskStatus::empty());
    assert_eq!(disk.last_error(), Some(DiskError::NotMounted));

    // Even a drive that never had anything in it.
    let mut empty: Disk<DirectoryFile> = Disk::new();
    empty.unmount();
    assert_eq!(empty.last_error(), Some(DiskError::NotMounted));
}

#[test]
fn status_bits() {
    let (_dir, mut storage) = card_with_image("A.DSK", 1);
    let mut disk: Disk<DirectoryFile> = Disk::new();
    assert_eq!(disk.status().bits(), 0);
    disk.mount(&mut storage, "A.DSK", false).unwrap();
    assert_eq!(disk.status().bits(), 0b11);
    disk.mount(&mut storage, "A.DSK", true).unwrap();
    assert_eq!(disk.status().bits(), 0b01);
}

#[test]
fn remount_swaps_the_image() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("A.DSK"), [0xAAu8; SECTOR_SIZE]).unwrap();
    std::fs::write(dir.path().join("B.DSK"), [0xBBu8; SECTOR_SIZE]).unwrap();
    let mut storage = DirectoryStorage::new(dir.path());

    let mut disk: Disk<DirectoryFile> = Disk::new();
    disk.mount(&mut storage, "A.DSK", false).unwrap();
    disk.mount(&mut storage, "B.DSK", true).unwrap();
    assert_eq!(disk.filename(), "B.DSK");
    assert!(disk.is_read_only());

    let mut buffer = [0u8; SECTOR_SIZE];
    disk.read_sector(0, &mut buffer).unwrap();
    assert_eq!(buffer, [0xBBu8; SECTOR_SIZE]);

    // A failed swap keeps what was there.
    assert_eq!(disk.mount(&mut storage, "C.DSK", false), Err(DiskError::FileNotFound));
    assert_eq!(disk.filename(), "B.DSK");
    assert!(disk.is_mounted());
}

#[test]
fn closed_but_mounted() {
    let (_dir, mut storage) = card_with_image("A.DSK", 1);
    let mut disk: Disk<DirectoryFile> = Disk::new();
    disk.mount(&mut storage, "A.DSK", false).unwrap();
    disk.close();
    assert!(disk.is_mounted());
    assert!(!disk.is_open());
    let mut buffer = [0u8; SECTOR_SIZE];
    assert_eq!(disk.read_sector(0, &mut buffer), Err(DiskError::DeviceNotPresent));
    assert_eq!(disk.write_sector(0, &buffer), Err(DiskError::DeviceNotPresent));
}
