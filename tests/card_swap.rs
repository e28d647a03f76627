// Pulling the card out and putting it back.
use remdisk::{
    disks::disks_struct::{CONFIG_FILE, ConfigFile, MAX_DISKS},
    peripherals::indicator::IndicatorEvent,
};
// We want to see logs while testing.
use test_log::test;

use crate::test_common::{
    exchange, get_actually_temp_dir, make_image, mount_command, read_text, start_controller, write_text,
};
pub mod test_common;

#[test]
// Removal closes everything, insertion brings back exactly what the config says.
fn remove_and_reinsert() {
    let card = get_actually_temp_dir();
    for name in ["A.DSK", "B.DSK", "C.DSK"] {
        make_image(&card, name, 4);
    }
    write_text(&card, CONFIG_FILE, "0:A.DSK\n2R:B.DSK\n");
    let mut rig = start_controller(&card, ConfigFile::Primary);

    // Something mounted by hand, not in the config.
    assert_eq!(exchange(&mut rig.controller, &mount_command(3, false, "C.DSK")), vec![0x82]);

    rig.card.set(false);
    rig.controller.tick().unwrap();
    for drive in 0..MAX_DISKS as u8 {
        assert!(!rig.controller.disks().disk(drive).unwrap().is_open());
    }
    assert_eq!(rig.indicator.count(IndicatorEvent::CardRemoved), 1);
    // Reads fail while it's out.
    assert_eq!(exchange(&mut rig.controller, &[0x18, 0, 2, 0, 0, 4]), vec![0x83, 19]);

    rig.card.set(true);
    rig.controller.tick().unwrap();
    assert_eq!(rig.indicator.count(IndicatorEvent::CardInserted), 1);
    let open: Vec<u8> = (0..MAX_DISKS as u8)
        .filter(|drive| rig.controller.disks().disk(*drive).unwrap().is_open())
        .collect();
    assert_eq!(open, vec![0, 2]);

    let reply = exchange(&mut rig.controller, &[0x18, 2, 2, 0, 3, 4]);
    assert_eq!(reply[0], 0x94);
    assert!(reply[1..].iter().all(|byte| *byte == 3));
}

#[test]
// Ticks with no change don't keep firing the indicator.
fn quiet_ticks() {
    let card = get_actually_temp_dir();
    let mut rig = start_controller(&card, ConfigFile::Primary);
    for _ in 0..20 {
        rig.controller.tick().unwrap();
    }
    assert!(rig.indicator.events().is_empty());

    rig.card.set(false);
    for _ in 0..20 {
        rig.controller.tick().unwrap();
    }
    assert_eq!(rig.indicator.events(), vec![IndicatorEvent::CardRemoved]);
    // Can't save with no card.
    assert_eq!(exchange(&mut rig.controller, &[0x1d]), vec![0x83, 19]);
}

#[test]
// A drive mounted by hand doesn't survive a card swap, and doesn't get saved.
fn hand_mount_is_forgotten_after_swap() {
    let card = get_actually_temp_dir();
    for name in ["A.DSK", "C.DSK"] {
        make_image(&card, name, 4);
    }
    write_text(&card, CONFIG_FILE, "0:A.DSK\n");
    let mut rig = start_controller(&card, ConfigFile::Primary);
    assert_eq!(exchange(&mut rig.controller, &mount_command(3, false, "C.DSK")), vec![0x82]);
    assert_eq!(exchange(&mut rig.controller, &[0x14, 3]), vec![0x93, 0b11]);

    rig.card.set(false);
    rig.controller.tick().unwrap();
    rig.card.set(true);
    rig.controller.tick().unwrap();

    // Empty now, so reads say not mounted instead of no card.
    assert_eq!(exchange(&mut rig.controller, &[0x14, 3]), vec![0x93, 0]);
    assert_eq!(exchange(&mut rig.controller, &[0x18, 3, 2, 0, 0, 4]), vec![0x83, 10]);
    // The configured one is fine.
    assert_eq!(exchange(&mut rig.controller, &[0x14, 0]), vec![0x93, 0b11]);

    assert_eq!(exchange(&mut rig.controller, &[0x1d]), vec![0x82]);
    assert_eq!(read_text(&card, CONFIG_FILE), "0:A.DSK\n");
}
