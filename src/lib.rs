// The controller core cannot use unwraps.
#![deny(clippy::unwrap_used)]
// Gotta use all the results.
#![deny(unused_results)]

// Wire level stuff.
pub mod event;
pub mod link;

// Virtual drives.
pub mod disk;
pub mod disks;

// Everything the core talks to but does not own.
pub mod peripherals;
pub mod storage;

// Ties the link to the drives.
pub mod controller;

pub mod error_types;

// Within the crate, we can use:
mod helpers;
