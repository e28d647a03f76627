// Real time clock errors.
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("There is no real time clock fitted.")]
    NotPresent,
    #[error("The clock did not accept the new time.")]
    Rejected,
}
