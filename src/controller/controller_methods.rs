// Running the controller.

// Imports

use log::{debug, info};

use super::controller_struct::{Controller, ControllerOptions};
use super::dispatch::dispatch;
use crate::disks::disks_struct::Disks;
use crate::error_types::link::LinkError;
use crate::link::handshake::LinkPins;
use crate::link::link_struct::Link;
use crate::peripherals::clock::Clock;
use crate::peripherals::indicator::IndicatorHandle;
use crate::peripherals::presence::PresenceSensor;
use crate::storage::storage_trait::Storage;

// Implementations

impl<P: LinkPins, S: Storage, C: Clock> Controller<P, S, C> {
    /// Bring everything up, and mount whatever the config file says to.
    pub fn new(
        pins: P,
        storage: S,
        clock: C,
        presence: Box<dyn PresenceSensor>,
        indicator: IndicatorHandle,
        options: ControllerOptions,
    ) -> Self {
        info!("Starting controller, firmware {:?}", options.firmware_version);
        let link = Link::with_options(pins, options.link, indicator.clone());
        let mut disks = Disks::new(storage, presence, indicator);
        let mounted = disks.mount_defaults(options.config_file);
        info!("Mounted {mounted} drives from {}.", options.config_file.file_name());
        Controller {
            link,
            disks,
            clock,
            options,
        }
    }

    /// One trip around the main loop.
    ///
    /// Moves at most one byte off the link, answers the host if that finished a
    /// command, then checks on the card.
    pub fn tick(&mut self) -> Result<(), LinkError> {
        let result = match self.link.poll() {
            Ok(true) => match self.link.take_event() {
                Some(event) => dispatch(self, event),
                None => Ok(()),
            },
            Ok(false) => Ok(()),
            Err(error) => Err(error),
        };
        if let Err(error) = &result {
            debug!("Link trouble this tick: {error}");
        }
        // The card gets checked no matter what the host is up to.
        self.disks.poll();
        result
    }

    pub fn link(&self) -> &Link<P> {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut Link<P> {
        &mut self.link
    }

    pub fn disks(&self) -> &Disks<S> {
        &self.disks
    }

    pub fn disks_mut(&mut self) -> &mut Disks<S> {
        &mut self.disks
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn options(&self) -> ControllerOptions {
        self.options
    }
}
