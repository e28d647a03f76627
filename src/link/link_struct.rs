// The link to the host computer.
//
// One 8 bit data bus that both sides take turns driving, and three handshake lines:
//
// DIRECTION - From the host. High while the host is driving the bus.
// STROBE    - From the host. Data is on the bus when the host is sending, or the
//             host's acknowledge when we are sending.
// ACK       - To the host. Our acknowledge when the host is sending, or our
//             strobe when we are sending.
//
// Bytes come in one at a time and get assembled into events. Events going back
// out get flattened into bytes.

// Imports

use std::time::Duration;

use super::handshake::LinkPins;
use crate::event::event_struct::Event;
use crate::event::pool::EventPool;
use crate::peripherals::indicator::IndicatorHandle;

// Structs, Enums, Flags

/// Where the inbound state machine is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InboundState {
    /// Waiting for a command byte. Also where every message ends up.
    Command,
    /// Keep collecting until a zero byte, and keep the zero too.
    UntilTerminator,
    /// Collect exactly this many more header bytes.
    Header { remaining: u8 },
    /// Mount command, next byte is the drive.
    MountDrive,
    /// Mount command, next byte is the read-only flag. Then comes the name.
    MountFlag,
    /// Collect exactly this many more data bytes.
    Payload { remaining: u16 },
    /// Next byte is a length (0 meaning 256), then that many bytes.
    Length,
}

/// Which way the data bus is pointed on our end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusDirection {
    /// We are listening, the host drives.
    Input,
    /// We drive, the host listens.
    Output,
}

/// Knobs for the link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkOptions {
    /// Give up on a handshake after this long.
    ///
    /// Real hardware waits forever, so this defaults to `None`. Tests set it so a
    /// host that stops answering fails the test instead of hanging it.
    pub handshake_timeout: Option<Duration>,
}

/// The link itself.
pub struct Link<P: LinkPins> {
    pub(super) pins: P,
    pub(super) options: LinkOptions,
    pub(super) state: InboundState,
    /// Where the single event lives while nobody has it.
    pub(super) pool: EventPool,
    /// The message being assembled right now.
    pub(super) current: Option<Event>,
    /// A finished message waiting to be picked up.
    pub(super) ready: Option<Event>,
    pub(super) indicator: IndicatorHandle,
}
