// All of the error types live here, grouped by who returns them.

pub mod clock;
pub mod config;
pub mod disk;
pub mod link;
pub mod storage;

mod conversions;
