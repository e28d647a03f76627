// Errors on the host link.
use thiserror::Error;

/// Which handshake wait gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeWait {
    /// Waiting for the host to raise STROBE.
    StrobeHigh,
    /// Waiting for the host to drop STROBE.
    StrobeLow,
    /// Waiting for the host to let go of the data bus.
    BusRelease,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LinkError {
    /// Only ever returned when a handshake timeout was configured.
    /// Without one the link just waits forever, like the hardware does.
    #[error("The host stopped answering the handshake ({0:?}).")]
    HandshakeTimeout(HandshakeWait),
    /// The single event is still out. Someone forgot to send or release it.
    #[error("No free event to decode the command into.")]
    NoFreeEvent,
}
