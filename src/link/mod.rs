// Everything about the wire to the host lives in here.
pub mod protocol;
pub mod link_struct;
pub mod link_methods;
pub mod handshake;
mod inbound;
mod outbound;
pub mod scripted_host;
