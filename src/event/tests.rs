// Event buffer tests.
// Unwrapping is okay here, since we want unexpected outcomes to fail tests.
#![allow(clippy::unwrap_used)]

// Imports

use super::event_struct::{Event, EventKind, EVENT_CAPACITY};
use super::pool::EventPool;
use test_log::test; // We want to see logs while testing.

// Tests

#[test]
fn overfilling_never_grows_past_capacity() {
    let mut event = Event::new();
    event.clean(EventKind::WriteBytes);
    for i in 0..(EVENT_CAPACITY * 2) {
        event.add_byte(i as u8);
    }
    assert_eq!(event.len(), EVENT_CAPACITY);
    // The first bytes are the ones that stuck.
    assert_eq!(event.byte(0), 0);
    assert_eq!(event.byte(EVENT_CAPACITY - 1), (EVENT_CAPACITY - 1) as u8);
}

#[test]
fn clean_resets_length_and_kind() {
    let mut event = Event::new();
    event.clean(EventKind::Mount);
    event.add_bytes(&[1, 2, 3]);
    event.clean(EventKind::Ack);
    assert_eq!(event.kind(), EventKind::Ack);
    assert!(event.is_empty());
    assert_eq!(event.data(), &[] as &[u8]);
}

#[test]
fn terminated_name_stops_at_null() {
    let mut event = Event::new();
    event.clean(EventKind::Mount);
    event.add_bytes(&[2, 1]);
    event.add_bytes(b"GAMES.DSK\0");
    assert_eq!(event.terminated_at(2), b"GAMES.DSK");
    // No null at all just gives back the rest.
    event.clean(EventKind::Mount);
    event.add_bytes(b"AB");
    assert_eq!(event.terminated_at(0), b"AB");
    assert_eq!(event.terminated_at(5), b"");
}

#[test]
fn pool_hands_out_one_event() {
    let mut pool = EventPool::new();
    let event = pool.acquire().unwrap();
    assert!(pool.acquire().is_none());
    assert!(!pool.is_available());
    pool.release(event);
    assert!(pool.is_available());
    assert!(pool.acquire().is_some());
}

#[test]
fn pool_ignores_extra_events() {
    let mut pool = EventPool::new();
    pool.release(Event::new());
    let _first = pool.acquire().unwrap();
    assert!(pool.acquire().is_none());
}
