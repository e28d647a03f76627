// Driving the link from the outside.

// Imports

use log::{debug, info, warn};

use super::handshake::{prepare_read, read_byte, LinkPins};
use super::inbound::{process_byte, reset, write_all};
use super::link_struct::{InboundState, Link, LinkOptions};
use super::outbound::encode_event;
use crate::error_types::link::LinkError;
use crate::event::event_struct::Event;
use crate::event::pool::EventPool;
use crate::peripherals::indicator::{IndicatorEvent, IndicatorHandle};

// Implementations

impl<P: LinkPins> Link<P> {
    /// Bring up the link with the default options. We always start out listening.
    pub fn new(pins: P, indicator: IndicatorHandle) -> Self {
        Link::with_options(pins, LinkOptions::default(), indicator)
    }

    pub fn with_options(mut pins: P, options: LinkOptions, indicator: IndicatorHandle) -> Self {
        pins.set_ack(false);
        prepare_read(&mut pins);
        info!("Link is initialized.");
        Link {
            pins,
            options,
            state: InboundState::Command,
            pool: EventPool::new(),
            current: None,
            ready: None,
            indicator,
        }
    }

    /// Check for a byte from the host, and run it through the state machine if
    /// there is one. Never reads more than one byte.
    ///
    /// Returns whether a finished message is waiting.
    pub fn poll(&mut self) -> Result<bool, LinkError> {
        if self.pins.strobe() {
            let token = read_byte(&mut self.pins, self.options.handshake_timeout)?;
            self.process_byte(token)?;
        }
        Ok(self.ready.is_some())
    }

    /// Run a byte through the state machine, as if it came off the bus.
    ///
    /// Commands the link answers by itself (ping and friends) write their reply
    /// before this returns.
    pub fn process_byte(&mut self, token: u8) -> Result<(), LinkError> {
        process_byte(self, token)
    }

    /// Take the finished message, if there is one. Each message comes out exactly once.
    pub fn take_event(&mut self) -> Option<Event> {
        self.ready.take()
    }

    /// Is a finished message waiting?
    pub fn has_event(&self) -> bool {
        self.ready.is_some()
    }

    /// Grab the free event, for building a reply from scratch.
    pub fn acquire_event(&mut self) -> Result<Event, LinkError> {
        self.pool.acquire().ok_or(LinkError::NoFreeEvent)
    }

    /// Done with an event without sending it.
    pub fn release_event(&mut self, event: Event) {
        self.pool.release(event);
    }

    /// Send a reply to the host, then put the event back in the pool.
    ///
    /// Blocks until the host has taken every byte. The bus is back to listening
    /// afterwards even if the host stopped answering part way.
    pub fn send_event(&mut self, event: Event) -> Result<(), LinkError> {
        let wire = encode_event(&event);
        debug!("Sending {event:?} as {} bytes.", wire.len());

        let result = if wire.is_empty() {
            Ok(())
        } else {
            write_all(&mut self.pins, &wire, self.options.handshake_timeout)
        };
        if let Err(error) = result {
            warn!("Failed to send {:?}: {error}", event.kind());
        }

        prepare_read(&mut self.pins);
        self.indicator.notify(IndicatorEvent::TransactionStop);
        self.pool.release(event);
        result
    }

    /// Throw away a half received message and wait for the next command.
    pub fn reset(&mut self) {
        reset(self)
    }

    pub fn state(&self) -> InboundState {
        self.state
    }

    pub fn options(&self) -> LinkOptions {
        self.options
    }

    pub fn pins(&self) -> &P {
        &self.pins
    }

    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }
}
