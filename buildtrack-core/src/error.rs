use thiserror::Error;

use crate::domain::AcceptanceStatus;

/// Errors raised by the few core operations that can reject their input.
///
/// The derivation functions themselves never fail; malformed optional fields
/// simply exclude a record from the rule that needed them.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("cannot move acceptance record from {from} to {to}")]
    InvalidTransition {
        from: AcceptanceStatus,
        to: AcceptanceStatus,
    },
    #[error("invalid date: {0}")]
    InvalidDate(String),
}
