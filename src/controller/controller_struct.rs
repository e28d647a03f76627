// The whole controller, minus the hardware drivers.

// Imports

use crate::disks::disks_struct::{ConfigFile, Disks};
use crate::link::handshake::LinkPins;
use crate::link::link_struct::{Link, LinkOptions};
use crate::peripherals::clock::Clock;
use crate::storage::storage_trait::Storage;

// Structs, Enums, Flags

/// Firmware version reported to the host, major then minor.
pub const FIRMWARE_VERSION: (u8, u8) = (0, 3);

/// Everything the embedder gets to pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Which config file the default mounts come from.
    pub config_file: ConfigFile,
    pub link: LinkOptions,
    /// Sent in reply to a get version command.
    pub firmware_version: (u8, u8),
}

/// The link, the drives, and the clock, tied together.
///
/// Single threaded. Call [`Controller::tick`] forever.
pub struct Controller<P: LinkPins, S: Storage, C: Clock> {
    pub(super) link: Link<P>,
    pub(super) disks: Disks<S>,
    pub(super) clock: C,
    pub(super) options: ControllerOptions,
}

// Implementations

impl Default for ControllerOptions {
    fn default() -> Self {
        ControllerOptions {
            config_file: ConfigFile::Primary,
            link: LinkOptions::default(),
            firmware_version: FIRMWARE_VERSION,
        }
    }
}
