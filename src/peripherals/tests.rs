// Unwrapping is okay here, since we want unexpected outcomes to fail tests.
#![allow(clippy::unwrap_used)]

// Imports

use super::clock::{AbsentClock, Clock, ClockRecord};
use super::indicator::{Indicator, IndicatorEvent, IndicatorHandle, LogIndicator, RecordingIndicator};
use super::presence::{AlwaysPresent, PresenceSensor};
use crate::error_types::clock::ClockError;
use crate::error_types::disk::DiskError;
use test_log::test; // We want to see logs while testing.

// Tests

#[test]
fn absent_clock_fallback() {
    let mut clock = AbsentClock;
    let record = clock.get_clock().unwrap();
    assert_eq!(record.month(), 1);
    assert_eq!(record.day(), 1);
    assert_eq!(record.hour(), 0);
    assert_eq!(record.day_of_week(), 1);
    assert_eq!(clock.set_clock(&record), Err(ClockError::NotPresent));
    // Which the host hears about as a missing device.
    assert_eq!(DiskError::from(ClockError::NotPresent).code(), 19);
}

#[test]
fn clock_record_from_loose_bytes() {
    let short = ClockRecord::from_bytes(&[10, 16]);
    assert_eq!(short.as_bytes(), &[10, 16, 0, 0, 0, 0, 0, 0]);
    let long = ClockRecord::from_bytes(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    assert_eq!(long.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(long.year(), 4);
    assert_eq!(long.minute(), 6);
    assert_eq!(long.second(), 7);
}

#[test]
fn presence_from_a_closure() {
    let mut flips = [true, false, true].into_iter();
    let mut sensor = move || flips.next().unwrap_or(false);
    assert!(sensor.card_present());
    assert!(!sensor.card_present());
    assert!(sensor.card_present());
    assert!(!sensor.card_present());
    assert!(AlwaysPresent.card_present());
}

#[test]
fn recording_indicator() {
    let indicator = RecordingIndicator::new();
    indicator.notify(IndicatorEvent::TransactionStart);
    indicator.notify(IndicatorEvent::TransactionStop);
    indicator.notify(IndicatorEvent::TransactionStart);
    assert_eq!(indicator.count(IndicatorEvent::TransactionStart), 2);
    assert_eq!(indicator.events().len(), 3);
    indicator.clear();
    assert!(indicator.events().is_empty());
}

#[test]
fn indicators_share_a_handle() {
    let recorder = std::rc::Rc::new(RecordingIndicator::new());
    let first: IndicatorHandle = recorder.clone();
    let second: IndicatorHandle = recorder.clone();
    let logger: IndicatorHandle = std::rc::Rc::new(LogIndicator);
    let handles = [first, second, logger];
    for handle in &handles {
        handle.notify(IndicatorEvent::CardInserted);
    }
    // Both clones land in the same place.
    assert_eq!(recorder.count(IndicatorEvent::CardInserted), 2);
}
