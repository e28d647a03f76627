// All of the drives, as one thing.
//
// A drive emulator with one drive isn't much use. This keeps the set of them, plus
// the bits that are about the card as a whole: which config file is in use and
// whether the card is even there.

// Imports

use crate::disk::disk_struct::Disk;
use crate::error_types::disk::DiskError;
use crate::peripherals::indicator::IndicatorHandle;
use crate::peripherals::presence::PresenceSensor;
use crate::storage::storage_trait::Storage;

// Structs, Enums, Flags

/// How many drives the host can see. The host OS only knows about four.
pub const MAX_DISKS: usize = 4;

/// The default mounts, read at startup and whenever a card goes in.
pub const CONFIG_FILE: &str = "SD.CFG";
/// The other default mounts file, picked by the embedder.
pub const CONFIG_FILE_ALT: &str = "SD2.CFG";
/// Where the old config goes when we save a new one.
pub const CONFIG_BACKUP_FILE: &str = "SD.OLD";

/// Which config file is in charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFile {
    #[default]
    Primary,
    Alternate,
}

/// The set of drives.
pub struct Disks<S: Storage> {
    /// The card everything lives on.
    pub(super) storage: S,
    /// Drive slots, drive 0 first.
    pub(super) disks: [Disk<S::File>; MAX_DISKS],
    /// Config file to read defaults from, and to save into.
    pub(super) config_file: ConfigFile,
    /// What the card detect said last poll.
    pub(super) card_present: bool,
    /// Last failed request, for status.
    pub(super) last_error: Option<DiskError>,
    pub(super) presence: Box<dyn PresenceSensor>,
    pub(super) indicator: IndicatorHandle,
}

impl ConfigFile {
    /// Name of the file on the card.
    pub fn file_name(self) -> &'static str {
        match self {
            ConfigFile::Primary => CONFIG_FILE,
            ConfigFile::Alternate => CONFIG_FILE_ALT,
        }
    }
}
