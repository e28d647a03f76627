// Moving single bytes across the bus, with all the handshaking that takes.

// Imports

use std::time::{Duration, Instant};

use log::{trace, warn};

use super::link_struct::BusDirection;
use crate::error_types::link::{HandshakeWait, LinkError};

// Structs, Enums, Flags

/// The wires going to the host.
///
/// Implement this over whatever GPIO the board has. The inputs are expected to be
/// debounced already.
pub trait LinkPins {
    /// Sample the data bus.
    fn read_data(&mut self) -> u8;
    /// Put a byte on the data bus. Only does anything while pointed at `Output`.
    fn write_data(&mut self, data: u8);
    /// Turn our side of the data bus around.
    fn set_bus_direction(&mut self, direction: BusDirection);
    /// Is STROBE high?
    fn strobe(&mut self) -> bool;
    /// Is DIRECTION high? (is the host driving the bus?)
    fn direction_high(&mut self) -> bool;
    /// Drive ACK.
    fn set_ack(&mut self, high: bool);
}

// Functions

/// Point the bus inwards so the host can talk.
pub(crate) fn prepare_read<P: LinkPins>(pins: &mut P) {
    pins.set_bus_direction(BusDirection::Input);
}

/// Point the bus outwards, but only once the host has let go of it. Otherwise
/// both sides would be driving it at once.
pub(crate) fn prepare_write<P: LinkPins>(pins: &mut P, timeout: Option<Duration>) -> Result<(), LinkError> {
    wait_until(pins, timeout, HandshakeWait::BusRelease, |pins| !pins.direction_high())?;
    pins.set_bus_direction(BusDirection::Output);
    Ok(())
}

/// Get one byte from the host.
pub(crate) fn read_byte<P: LinkPins>(pins: &mut P, timeout: Option<Duration>) -> Result<u8, LinkError> {
    // Wait for the host to say the byte is there.
    wait_until(pins, timeout, HandshakeWait::StrobeHigh, |pins| pins.strobe())?;

    // Grab it right away, then acknowledge it.
    let data = pins.read_data();
    pins.set_ack(true);

    // Wait for the host to drop strobe, then drop ours.
    let waited = wait_until(pins, timeout, HandshakeWait::StrobeLow, |pins| !pins.strobe());
    pins.set_ack(false);
    waited?;

    trace!("Read {data:#04x} from host.");
    Ok(data)
}

/// Send one byte to the host. The bus must already be pointed outwards.
pub(crate) fn write_byte<P: LinkPins>(pins: &mut P, data: u8, timeout: Option<Duration>) -> Result<(), LinkError> {
    trace!("Writing {data:#04x} to host.");
    pins.write_data(data);

    // Raise ACK to say the data is there, then wait for the host to take it.
    pins.set_ack(true);
    let waited = wait_until(pins, timeout, HandshakeWait::StrobeHigh, |pins| pins.strobe());
    pins.set_ack(false);
    waited?;

    wait_until(pins, timeout, HandshakeWait::StrobeLow, |pins| !pins.strobe())
}

/// Spin until `done` says so, or until the timeout (if there is one) runs out.
fn wait_until<P, C>(pins: &mut P, timeout: Option<Duration>, wait: HandshakeWait, mut done: C) -> Result<(), LinkError>
where
    P: LinkPins,
    C: FnMut(&mut P) -> bool,
{
    let started = Instant::now();
    loop {
        if done(pins) {
            return Ok(());
        }
        if let Some(limit) = timeout {
            if started.elapsed() >= limit {
                warn!("Host didn't finish the handshake ({wait:?}) within {limit:?}.");
                return Err(LinkError::HandshakeTimeout(wait));
            }
        }
        std::hint::spin_loop();
    }
}
