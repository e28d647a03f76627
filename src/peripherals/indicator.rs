// The status lights, or whatever the board has instead.
//
// The link lights it up when a transaction starts and stops, and the drives tell it
// when the card comes and goes. Implementations have to be cheap, these get called
// in the middle of handshakes.

// Imports

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

// Structs, Enums, Flags

/// Something the user might want to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorEvent {
    TransactionStart,
    TransactionStop,
    CardRemoved,
    CardInserted,
}

/// Anything that can show an [`IndicatorEvent`].
///
/// Takes `&self` since the same handle is shared between the link and the drives.
/// Use interior mutability if you need to keep state.
pub trait Indicator {
    fn notify(&self, event: IndicatorEvent);
}

/// The handle everyone holds onto. Single threaded, so an `Rc` is plenty.
pub type IndicatorHandle = Rc<dyn Indicator>;

/// Just logs. Good enough when there are no lights.
#[derive(Debug, Default)]
pub struct LogIndicator;

/// Remembers everything it was told. Handy for tests.
#[derive(Debug, Default)]
pub struct RecordingIndicator {
    events: RefCell<Vec<IndicatorEvent>>,
}

// Implementations

impl Indicator for LogIndicator {
    fn notify(&self, event: IndicatorEvent) {
        match event {
            // These happen constantly.
            IndicatorEvent::TransactionStart | IndicatorEvent::TransactionStop => {
                debug!("Indicator: {event:?}")
            }
            IndicatorEvent::CardRemoved | IndicatorEvent::CardInserted => {
                info!("Indicator: {event:?}")
            }
        }
    }
}

impl RecordingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything seen so far, oldest first.
    pub fn events(&self) -> Vec<IndicatorEvent> {
        self.events.borrow().clone()
    }

    /// Forget everything seen so far.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// How many times a particular event showed up.
    pub fn count(&self, event: IndicatorEvent) -> usize {
        self.events.borrow().iter().filter(|seen| **seen == event).count()
    }
}

impl Indicator for RecordingIndicator {
    fn notify(&self, event: IndicatorEvent) {
        self.events.borrow_mut().push(event);
    }
}
