use std::{cell::Cell, rc::Rc, time::Duration};

use log::{debug, info};
use remdisk::{
    controller::controller_struct::{Controller, ControllerOptions},
    disk::disk_struct::SECTOR_SIZE,
    disks::disks_struct::ConfigFile,
    link::{link_struct::LinkOptions, scripted_host::ScriptedHost},
    peripherals::{clock::AbsentClock, indicator::RecordingIndicator},
    storage::directory_storage::DirectoryStorage,
};
use tempfile::{TempDir, tempdir};

pub type TestController = Controller<ScriptedHost, DirectoryStorage, AbsentClock>;

// Everything a test needs to poke at.
pub struct TestRig {
    pub controller: TestController,
    // Flip this to pull the card out or put it back.
    pub card: Rc<Cell<bool>>,
    pub indicator: Rc<RecordingIndicator>,
}

//
// Helper functions
//

// Temporary directory standing in for the card.
pub fn get_actually_temp_dir() -> TempDir {
    info!("Getting a non-persistent temp dir for testing...");
    tempdir().unwrap()
}

// Put a disk image on the card. Sector n is filled with the byte n.
pub fn make_image(card: &TempDir, name: &str, sectors: usize) {
    let mut image: Vec<u8> = Vec::with_capacity(sectors * SECTOR_SIZE);
    for sector in 0..sectors {
        image.extend(std::iter::repeat_n(sector as u8, SECTOR_SIZE));
    }
    std::fs::write(card.path().join(name), image).unwrap();
    debug!("Made {name} with {sectors} sectors.");
}

// Write a text file onto the card.
pub fn write_text(card: &TempDir, name: &str, contents: &str) {
    std::fs::write(card.path().join(name), contents).unwrap();
}

pub fn read_text(card: &TempDir, name: &str) -> String {
    std::fs::read_to_string(card.path().join(name)).unwrap()
}

// Start a controller on the card, talking to a scripted host.
pub fn start_controller(card: &TempDir, config_file: ConfigFile) -> TestRig {
    info!("Starting test controller...");
    let present = Rc::new(Cell::new(true));
    let sensor = present.clone();
    let indicator = Rc::new(RecordingIndicator::new());
    let options = ControllerOptions {
        config_file,
        // Don't hang forever if something goes wrong.
        link: LinkOptions {
            handshake_timeout: Some(Duration::from_secs(1)),
        },
        ..ControllerOptions::default()
    };
    let controller = Controller::new(
        ScriptedHost::new(),
        DirectoryStorage::new(card.path()),
        AbsentClock,
        Box::new(move || sensor.get()),
        indicator.clone(),
        options,
    );
    TestRig {
        controller,
        card: present,
        indicator,
    }
}

// Have the host send a command, run the controller until the host is out of
// bytes, and return whatever the host got back.
pub fn exchange(controller: &mut TestController, bytes: &[u8]) -> Vec<u8> {
    controller.link_mut().pins_mut().send(bytes);
    while controller.link().pins().pending() > 0 {
        controller.tick().unwrap();
    }
    controller.link_mut().pins_mut().take_received()
}

// Build a mount command.
pub fn mount_command(drive: u8, read_only: bool, name: &str) -> Vec<u8> {
    let mut command = vec![0x12, drive, u8::from(read_only)];
    command.extend_from_slice(name.as_bytes());
    command.push(0);
    command
}

// Build a long form sector read.
pub fn read_long_command(drive: u8, sector: u32) -> Vec<u8> {
    let mut command = vec![0x1f, drive, 2];
    command.extend_from_slice(&sector.to_be_bytes());
    command
}

// Build a long form sector write.
pub fn write_long_command(drive: u8, sector: u32, data: &[u8; SECTOR_SIZE]) -> Vec<u8> {
    let mut command = vec![0x20, drive, 2];
    command.extend_from_slice(&sector.to_be_bytes());
    command.extend_from_slice(data);
    command
}
