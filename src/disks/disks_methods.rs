// Requests for a particular drive, card detect, and the config file plumbing.

// Imports

use log::{debug, error, info, warn};

use super::config::{parse_config, rewrite_config, ConfigEntry};
use super::disks_struct::{ConfigFile, Disks, CONFIG_BACKUP_FILE, MAX_DISKS};
use crate::disk::disk_struct::{Disk, DiskStatus, SECTOR_SIZE};
use crate::error_types::config::ConfigError;
use crate::error_types::disk::{error_code, DiskError};
use crate::error_types::storage::StorageError;
use crate::peripherals::indicator::{IndicatorEvent, IndicatorHandle};
use crate::peripherals::presence::PresenceSensor;
use crate::storage::storage_trait::{OpenMode, Storage, StorageFile};

// Implementations

impl<S: Storage> Disks<S> {
    /// Set up four empty drives on a card.
    ///
    /// Nothing gets mounted yet, call [`Disks::mount_defaults`] for that.
    pub fn new(mut storage: S, presence: Box<dyn PresenceSensor>, indicator: IndicatorHandle) -> Self {
        if let Err(error) = storage.begin() {
            // Not the end of the world, the card might just not be in yet.
            warn!("Storage driver didn't start: {error}");
        }
        Disks {
            storage,
            disks: std::array::from_fn(|_| Disk::new()),
            config_file: ConfigFile::Primary,
            // Assume a card is there until told otherwise.
            card_present: true,
            last_error: None,
            presence,
            indicator,
        }
    }

    /// Mount an image on a drive.
    pub fn mount(&mut self, drive: u8, name: &str, read_only: bool) -> Result<(), DiskError> {
        mount(self, drive, name, read_only)
    }

    /// Empty a drive. Emptying an empty drive is fine.
    pub fn unmount(&mut self, drive: u8) -> Result<(), DiskError> {
        let index = self.check_drive(drive)?;
        debug!("Unmounting drive {drive}.");
        self.disks[index].unmount();
        Ok(())
    }

    /// Read a sector from a drive, `offset` is in bytes from the start of the image.
    pub fn read_sector(&mut self, drive: u8, offset: u64, buffer: &mut [u8; SECTOR_SIZE]) -> Result<(), DiskError> {
        let result = match self.mounted_drive(drive) {
            Ok(index) => self.disks[index].read_sector(offset, buffer),
            Err(error) => Err(error),
        };
        if let Err(error) = result {
            warn!("Read on drive {drive} at {offset:#x} failed: {error}");
        }
        self.last_error = result.err();
        result
    }

    /// Write a sector to a drive, `offset` is in bytes from the start of the image.
    pub fn write_sector(&mut self, drive: u8, offset: u64, buffer: &[u8; SECTOR_SIZE]) -> Result<(), DiskError> {
        let result = match self.mounted_drive(drive) {
            Ok(index) => self.disks[index].write_sector(offset, buffer),
            Err(error) => Err(error),
        };
        if let Err(error) = result {
            warn!("Write on drive {drive} at {offset:#x} failed: {error}");
        }
        self.last_error = result.err();
        result
    }

    /// Status bits for a drive. An empty drive is just all zeros, not an error.
    pub fn status(&mut self, drive: u8) -> Result<DiskStatus, DiskError> {
        let index = self.check_drive(drive)?;
        Ok(self.disks[index].status())
    }

    /// Look at a drive without touching it.
    pub fn disk(&self, drive: u8) -> Option<&Disk<S::File>> {
        self.disks.get(usize::from(drive))
    }

    /// Close every open image. The mounts are remembered, but nothing is held open.
    /// For when the card is about to vanish.
    pub fn close_all(&mut self) {
        for disk in self.disks.iter_mut().filter(|disk| disk.is_open()) {
            disk.close();
        }
    }

    /// Every mounted drive, lowest first.
    pub fn mounted_list(&self) -> Vec<ConfigEntry> {
        self.disks
            .iter()
            .enumerate()
            .filter(|(_, disk)| disk.is_mounted())
            .map(|(drive, disk)| ConfigEntry::new(drive as u8, disk.is_read_only(), disk.filename()))
            .collect()
    }

    /// Check the card detect, and deal with the card coming or going.
    /// Call this every so often, how often is up to you.
    pub fn poll(&mut self) {
        poll(self)
    }

    /// Pick a config file and mount everything it lists.
    /// Returns how many drives got mounted.
    pub fn mount_defaults(&mut self, which: ConfigFile) -> usize {
        mount_defaults(self, which)
    }

    /// Write the current mounts back into the active config file.
    pub fn save_config(&mut self) -> Result<(), ConfigError> {
        save_config(self)
    }

    pub fn config_file(&self) -> ConfigFile {
        self.config_file
    }

    pub fn card_present(&self) -> bool {
        self.card_present
    }

    pub fn last_error(&self) -> Option<DiskError> {
        self.last_error
    }

    /// Last error as a wire byte.
    pub fn error_code(&self) -> u8 {
        error_code(self.last_error)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Is this a drive we have? Out of range drives never touch any slot.
    fn check_drive(&mut self, drive: u8) -> Result<usize, DiskError> {
        let index = usize::from(drive);
        if index >= MAX_DISKS {
            warn!("Drive {drive} doesn't exist.");
            self.last_error = Some(DiskError::BadDrive);
            return Err(DiskError::BadDrive);
        }
        Ok(index)
    }

    /// Like `check_drive`, but the drive also has to have something in it.
    fn mounted_drive(&mut self, drive: u8) -> Result<usize, DiskError> {
        let index = self.check_drive(drive)?;
        if !self.disks[index].is_mounted() {
            return Err(DiskError::NotMounted);
        }
        Ok(index)
    }
}

// Functions

fn mount<S: Storage>(disks: &mut Disks<S>, drive: u8, name: &str, read_only: bool) -> Result<(), DiskError> {
    let index = disks.check_drive(drive)?;
    debug!("Got mount request for drive {drive}: `{name}` (read only: {read_only})");
    let disk = &mut disks.disks[index];
    match disk.mount(&mut disks.storage, name, read_only) {
        Ok(()) => {
            info!("Mounted {name} on drive {drive}.");
            Ok(())
        }
        Err(error) => {
            // Move their error into ours.
            disks.last_error = disk.last_error();
            warn!("Mounting {name} on drive {drive} failed: {error}");
            Err(error)
        }
    }
}

fn poll<S: Storage>(disks: &mut Disks<S>) {
    let present = disks.presence.card_present();
    if present == disks.card_present {
        // Nothing changed.
        return;
    }
    disks.card_present = present;

    if !present {
        info!("Detected card removal.");
        disks.indicator.notify(IndicatorEvent::CardRemoved);
        // Nothing can stay open on a card that isn't there.
        disks.close_all();
        return;
    }

    info!("Detected card insertion.");
    disks.indicator.notify(IndicatorEvent::CardInserted);
    if let Err(error) = disks.storage.begin() {
        error!("Storage driver didn't restart after card insertion: {error}");
        return;
    }
    let which = disks.config_file;
    let mounted = mount_defaults(disks, which);
    debug!("Remounted {mounted} drives after card insertion.");

    // Anything the config didn't bring back is gone for good.
    for (drive, disk) in disks.disks.iter_mut().enumerate() {
        if disk.is_mounted() && !disk.is_open() {
            info!("Drive {drive} wasn't in the config, unmounting it.");
            disk.unmount();
        }
    }
}

fn mount_defaults<S: Storage>(disks: &mut Disks<S>, which: ConfigFile) -> usize {
    disks.config_file = which;
    let name = which.file_name();

    if !disks.presence.card_present() {
        info!("No card inserted, not mounting defaults.");
        return 0;
    }

    info!("Reading configuration file {name}");
    if !disks.storage.exists(name) {
        info!("Config file not found: {name}");
        return 0;
    }

    let contents = match read_whole_file(&mut disks.storage, name) {
        Ok(ok) => ok,
        Err(error) => {
            error!("Failed to read config file {name}: {error}");
            return 0;
        }
    };

    let mut mounted: usize = 0;
    for entry in parse_config(&contents) {
        // Failures are already logged by mount, keep going with the rest.
        if mount(disks, entry.drive, &entry.filename, entry.read_only).is_ok() {
            mounted += 1;
        }
    }
    mounted
}

fn save_config<S: Storage>(disks: &mut Disks<S>) -> Result<(), ConfigError> {
    let name = disks.config_file.file_name();
    info!("Writing configuration file {name}");

    if !disks.card_present {
        return Err(ConfigError::NoCard);
    }

    // Only drives with an open image get saved.
    let mut mounted: [Option<ConfigEntry>; MAX_DISKS] = Default::default();
    for entry in disks.mounted_list() {
        let drive = usize::from(entry.drive);
        if disks.disks[drive].is_open() {
            mounted[drive] = Some(entry);
        }
    }

    let storage = &mut disks.storage;

    if !storage.exists(name) {
        // Nothing to preserve, just write out what we have.
        debug!("No {name} yet, creating it.");
        let contents = rewrite_config(&[], &mounted);
        write_whole_file(storage, name, &contents)?;
        return Ok(());
    }

    // There's no rename on the card, so the backup is a copy.
    debug!("Backing up {name} to {CONFIG_BACKUP_FILE}...");
    storage.remove(CONFIG_BACKUP_FILE).map_err(ConfigError::BackupFailed)?;
    let original = read_whole_file(storage, name).map_err(ConfigError::BackupFailed)?;
    write_whole_file(storage, CONFIG_BACKUP_FILE, &original).map_err(ConfigError::BackupFailed)?;

    // Now rebuild the real one from the backup.
    let backup = read_whole_file(storage, CONFIG_BACKUP_FILE).map_err(ConfigError::OpenFailed)?;
    let contents = rewrite_config(&backup, &mounted);
    let mut file = storage.open(name, OpenMode::Create).map_err(ConfigError::OpenFailed)?;
    let wrote = file.write(&contents)?;
    file.flush()?;
    if wrote != contents.len() {
        error!("Only wrote {wrote} of {} bytes to {name}.", contents.len());
        return Err(ConfigError::Storage(StorageError::WriteFailure));
    }

    info!("Saved configuration to {name}.");
    Ok(())
}

/// Slurp a file off the card.
fn read_whole_file<S: Storage>(storage: &mut S, name: &str) -> Result<Vec<u8>, StorageError> {
    let mut file = storage.open(name, OpenMode::Read)?;
    let mut contents: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 64];
    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        contents.extend_from_slice(&chunk[..read]);
    }
    Ok(contents)
}

/// Replace a file on the card with new contents.
fn write_whole_file<S: Storage>(storage: &mut S, name: &str, contents: &[u8]) -> Result<(), StorageError> {
    let mut file = storage.open(name, OpenMode::Create)?;
    let wrote = file.write(contents)?;
    file.flush()?;
    if wrote != contents.len() {
        return Err(StorageError::WriteFailure);
    }
    Ok(())
}
