// There is exactly one event. This is where it lives when nobody is using it.
//
// The host protocol is strictly request then response, so one event is enough: the
// command comes in, gets turned into the reply in place, and goes back out.

// Imports

use log::warn;

use super::event_struct::Event;

// Structs, Enums, Flags

/// A pool of one event.
#[derive(Debug)]
pub struct EventPool {
    free: Option<Event>,
}

// Implementations

impl EventPool {
    /// New pool, with its event sitting in it.
    pub fn new() -> Self {
        EventPool {
            free: Some(Event::new()),
        }
    }

    /// Take the event out. `None` if it is already out.
    pub fn acquire(&mut self) -> Option<Event> {
        self.free.take()
    }

    /// Put the event back.
    pub fn release(&mut self, event: Event) {
        if self.free.is_some() {
            // Two events?? Someone made one by hand. Keep ours, drop theirs.
            warn!("Released an event into a pool that wasn't missing one, dropping it.");
            return;
        }
        self.free = Some(event);
    }

    /// Is the event sitting in the pool right now?
    pub fn is_available(&self) -> bool {
        self.free.is_some()
    }
}

impl Default for EventPool {
    fn default() -> Self {
        EventPool::new()
    }
}
