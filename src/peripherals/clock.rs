// The real time clock.
//
// We never look inside the time, the host sends eight bytes and gets eight bytes back.
// The layout is month, day, year (high), year (low), hour, minute, second, day of week.

// Imports

use log::debug;

use crate::error_types::clock::ClockError;

// Structs, Enums, Flags

/// Size of a clock record on the wire.
pub const CLOCK_RECORD_SIZE: usize = 8;

/// Eight bytes of time, exactly as the host sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockRecord(pub [u8; CLOCK_RECORD_SIZE]);

/// Anything that can keep time.
pub trait Clock {
    fn get_clock(&mut self) -> Result<ClockRecord, ClockError>;
    fn set_clock(&mut self, record: &ClockRecord) -> Result<(), ClockError>;
}

/// No clock chip fitted.
///
/// Reads hand back a fixed January 1st at midnight so hosts that always ask for the
/// time at boot still get something sensible. Writes are refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct AbsentClock;

// Implementations

impl ClockRecord {
    /// Build a record from loose bytes. Missing bytes become zero, extra bytes are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut record = [0u8; CLOCK_RECORD_SIZE];
        let length = bytes.len().min(CLOCK_RECORD_SIZE);
        record[..length].copy_from_slice(&bytes[..length]);
        ClockRecord(record)
    }

    pub fn as_bytes(&self) -> &[u8; CLOCK_RECORD_SIZE] {
        &self.0
    }

    pub fn month(&self) -> u8 {
        self.0[0]
    }

    pub fn day(&self) -> u8 {
        self.0[1]
    }

    /// Last two digits of the year.
    pub fn year(&self) -> u8 {
        self.0[3]
    }

    pub fn hour(&self) -> u8 {
        self.0[4]
    }

    pub fn minute(&self) -> u8 {
        self.0[5]
    }

    pub fn second(&self) -> u8 {
        self.0[6]
    }

    pub fn day_of_week(&self) -> u8 {
        self.0[7]
    }
}

impl Clock for AbsentClock {
    fn get_clock(&mut self) -> Result<ClockRecord, ClockError> {
        debug!("No clock fitted, handing out the fallback time.");
        // Jan 1st, 00:00:00, Sunday.
        Ok(ClockRecord([1, 1, 0, 0, 0, 0, 0, 1]))
    }

    fn set_clock(&mut self, _record: &ClockRecord) -> Result<(), ClockError> {
        Err(ClockError::NotPresent)
    }
}
