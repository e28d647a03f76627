// Poking at events.

// Imports

use std::fmt;

use super::event_struct::{Event, EventKind, EVENT_CAPACITY};

// Implementations

impl Event {
    /// A fresh, empty event with no kind.
    pub fn new() -> Self {
        Event {
            kind: EventKind::None,
            buffer: [0u8; EVENT_CAPACITY],
            index: 0,
        }
    }

    /// Forget everything and become a new kind of event.
    pub fn clean(&mut self, kind: EventKind) {
        self.kind = kind;
        self.index = 0;
    }

    /// Add one byte to the end. Does nothing once the buffer is full.
    pub fn add_byte(&mut self, data: u8) {
        if self.index == EVENT_CAPACITY {
            // Full, drop it.
            return;
        }
        self.buffer[self.index] = data;
        self.index += 1;
    }

    /// Add a run of bytes, same truncation rules as `add_byte`.
    pub fn add_bytes(&mut self, data: &[u8]) {
        for byte in data {
            self.add_byte(*byte);
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.index
    }

    pub fn is_empty(&self) -> bool {
        self.index == 0
    }

    /// Only the bytes that have actually been added.
    pub fn data(&self) -> &[u8] {
        &self.buffer[..self.index]
    }

    /// Grab a byte, or zero if that far hasn't been filled in.
    pub fn byte(&self, position: usize) -> u8 {
        self.data().get(position).copied().unwrap_or(0)
    }

    /// The bytes from `start` up to (not including) the first zero.
    /// Used for the null terminated names.
    pub fn terminated_at(&self, start: usize) -> &[u8] {
        let data = self.data().get(start..).unwrap_or(&[]);
        match data.iter().position(|byte| *byte == 0) {
            Some(end) => &data[..end],
            None => data,
        }
    }
}

impl Default for Event {
    fn default() -> Self {
        Event::new()
    }
}

// Printing the whole buffer is just noise.
impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("len", &self.index)
            .field("data", &self.data())
            .finish()
    }
}
