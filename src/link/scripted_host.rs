// A pretend host, living entirely in memory.
//
// Queue up the bytes the host should send, run the link, then look at what came
// back. Follows the same handshake a real host does, so the link under test can't
// tell the difference.

// Imports

use std::collections::VecDeque;

use super::handshake::LinkPins;
use super::link_struct::BusDirection;

// Structs, Enums, Flags

#[derive(Debug, Clone)]
pub struct ScriptedHost {
    /// Bytes the host still wants to send.
    inbound: VecDeque<u8>,
    /// Bytes the host has received.
    outbound: Vec<u8>,
    /// What we last put on the bus.
    bus: u8,
    ack: bool,
    direction: BusDirection,
    /// A host that stopped answering never raises strobe.
    responsive: bool,
    /// A host that never lets go of the bus.
    holding_bus: bool,
}

// Implementations

impl ScriptedHost {
    pub fn new() -> Self {
        ScriptedHost {
            inbound: VecDeque::new(),
            outbound: Vec::new(),
            bus: 0,
            ack: false,
            direction: BusDirection::Input,
            responsive: true,
            holding_bus: false,
        }
    }

    /// A host that has gone quiet. Any handshake with it hangs (or times out).
    pub fn silent() -> Self {
        ScriptedHost {
            responsive: false,
            ..ScriptedHost::new()
        }
    }

    /// Queue up bytes for the host to send.
    pub fn send(&mut self, bytes: &[u8]) {
        self.inbound.extend(bytes.iter().copied());
    }

    /// Everything the host has received, clearing it out.
    pub fn take_received(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.outbound)
    }

    /// Everything the host has received so far.
    pub fn received(&self) -> &[u8] {
        &self.outbound
    }

    /// How many bytes the host still has to send.
    pub fn pending(&self) -> usize {
        self.inbound.len()
    }

    pub fn set_responsive(&mut self, responsive: bool) {
        self.responsive = responsive;
    }

    /// Make the host keep (or stop keeping) DIRECTION high.
    pub fn set_holding_bus(&mut self, holding: bool) {
        self.holding_bus = holding;
    }

    pub fn bus_direction(&self) -> BusDirection {
        self.direction
    }

    pub fn ack(&self) -> bool {
        self.ack
    }
}

impl Default for ScriptedHost {
    fn default() -> Self {
        ScriptedHost::new()
    }
}

impl LinkPins for ScriptedHost {
    fn read_data(&mut self) -> u8 {
        // Nothing driving the bus, it floats high.
        self.inbound.front().copied().unwrap_or(0xff)
    }

    fn write_data(&mut self, data: u8) {
        if self.direction == BusDirection::Output {
            self.bus = data;
        }
    }

    fn set_bus_direction(&mut self, direction: BusDirection) {
        self.direction = direction;
    }

    fn strobe(&mut self) -> bool {
        if !self.responsive {
            return false;
        }
        match self.direction {
            // Host holds strobe up while it has a byte out and we haven't taken it.
            BusDirection::Input => !self.ack && !self.inbound.is_empty(),
            // Host answers our ACK with its strobe.
            BusDirection::Output => self.ack,
        }
    }

    fn direction_high(&mut self) -> bool {
        self.holding_bus
    }

    fn set_ack(&mut self, high: bool) {
        // The rising edge is where the byte changes hands.
        if high && !self.ack && self.responsive {
            match self.direction {
                BusDirection::Input => {
                    let _ = self.inbound.pop_front();
                }
                BusDirection::Output => self.outbound.push(self.bus),
            }
        }
        self.ack = high;
    }
}
