// The inbound state machine. Gets handed one byte at a time, and builds events
// out of them.

// Imports

use log::{debug, error, warn};

use super::handshake::{prepare_read, prepare_write, write_byte, LinkPins};
use super::link_struct::{InboundState, Link};
use super::protocol::{
    command_grammar, PROTOCOL_VERSION, PROTO_DONE, PROTO_PING, PROTO_PONG, PROTO_VERSION_INFO,
};
use crate::error_types::link::LinkError;
use crate::event::event_struct::EventKind;
use crate::peripherals::indicator::IndicatorEvent;

// Functions

/// Feed one byte to the state machine.
pub(super) fn process_byte<P: LinkPins>(link: &mut Link<P>, token: u8) -> Result<(), LinkError> {
    if link.state == InboundState::Command {
        return start_command(link, token);
    }

    let event = match link.current.as_mut() {
        Some(event) => event,
        None => {
            // Mid message with no message?? Start over.
            error!("Inbound state {:?} without an event, resetting.", link.state);
            link.state = InboundState::Command;
            return Ok(());
        }
    };

    // Every state keeps the byte, it's only what comes next that differs.
    event.add_byte(token);

    let next = match link.state {
        InboundState::Command => InboundState::Command,
        InboundState::UntilTerminator => {
            if token == 0 {
                InboundState::Command
            } else {
                InboundState::UntilTerminator
            }
        }
        InboundState::Header { remaining } => {
            if remaining > 1 {
                InboundState::Header {
                    remaining: remaining - 1,
                }
            } else if matches!(event.kind(), EventKind::WriteSector | EventKind::WriteSectorLong) {
                // Header done, now the whole sector.
                InboundState::Payload { remaining: 256 }
            } else {
                InboundState::Command
            }
        }
        InboundState::MountDrive => InboundState::MountFlag,
        InboundState::MountFlag => InboundState::UntilTerminator,
        InboundState::Payload { remaining } => {
            if remaining > 1 {
                InboundState::Payload {
                    remaining: remaining - 1,
                }
            } else {
                InboundState::Command
            }
        }
        InboundState::Length => {
            // The length byte stays in the event, zero means a full 256.
            let remaining = if token == 0 { 256 } else { u16::from(token) };
            InboundState::Payload { remaining }
        }
    };

    link.state = next;
    if next == InboundState::Command {
        finish_message(link);
    }
    Ok(())
}

/// First byte of a transaction.
fn start_command<P: LinkPins>(link: &mut Link<P>, code: u8) -> Result<(), LinkError> {
    link.indicator.notify(IndicatorEvent::TransactionStart);

    // The ones that never make it past the link.
    match code {
        PROTO_VERSION_INFO => {
            debug!("Got protocol version query.");
            return reply_inline(link, &[PROTO_VERSION_INFO, PROTOCOL_VERSION]);
        }
        PROTO_PING => {
            debug!("Got PING");
            return reply_inline(link, &[PROTO_PONG]);
        }
        PROTO_DONE => {
            debug!("Host says the transaction is done.");
            link.indicator.notify(IndicatorEvent::TransactionStop);
            return Ok(());
        }
        _ => {}
    }

    let (kind, next) = match command_grammar(code) {
        Some(grammar) => grammar,
        None => {
            warn!("Got unknown command code: {code:#04x}");
            link.indicator.notify(IndicatorEvent::TransactionStop);
            return Ok(());
        }
    };

    let mut event = match link.pool.acquire() {
        Some(event) => event,
        None => {
            error!("No free event for command {code:#04x}, dropping it.");
            link.indicator.notify(IndicatorEvent::TransactionStop);
            return Err(LinkError::NoFreeEvent);
        }
    };
    event.clean(kind);
    debug!("Got command {code:#04x} ({kind:?}), next state {next:?}");

    link.current = Some(event);
    link.state = next;
    if next == InboundState::Command {
        // No arguments, so it's done already.
        finish_message(link);
    }
    Ok(())
}

/// The current message is complete, hand it over.
fn finish_message<P: LinkPins>(link: &mut Link<P>) {
    if let Some(event) = link.current.take() {
        debug!("Inbound message complete: {event:?}");
        link.ready = Some(event);
    }
}

/// Answer right here, without making an event.
fn reply_inline<P: LinkPins>(link: &mut Link<P>, bytes: &[u8]) -> Result<(), LinkError> {
    let timeout = link.options.handshake_timeout;
    let result = write_all(&mut link.pins, bytes, timeout);
    // Back to listening no matter what happened.
    prepare_read(&mut link.pins);
    link.indicator.notify(IndicatorEvent::TransactionStop);
    result
}

/// Turn the bus around and write a run of bytes.
pub(super) fn write_all<P: LinkPins>(
    pins: &mut P,
    bytes: &[u8],
    timeout: Option<std::time::Duration>,
) -> Result<(), LinkError> {
    prepare_write(pins, timeout)?;
    for byte in bytes {
        write_byte(pins, *byte, timeout)?;
    }
    Ok(())
}

/// Drop whatever was being assembled and go back to waiting for a command.
pub(super) fn reset<P: LinkPins>(link: &mut Link<P>) {
    if let Some(event) = link.current.take() {
        debug!("Dropping partial message {event:?}");
        link.pool.release(event);
    }
    link.state = InboundState::Command;
}

