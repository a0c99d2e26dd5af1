//! Senses-subsystem error type.

use thiserror::Error;

/// Errors produced by `pursuit-senses`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SensesError {
    /// The bus hands out exactly one subscription.
    #[error("noise bus already has a subscriber")]
    AlreadySubscribed,

    /// The subscription was dropped; nobody will ever drain this event.
    #[error("noise bus is closed")]
    BusClosed,

    #[error("unknown noise kind {0:?}")]
    UnknownNoiseKind(String),
}

pub type SensesResult<T> = Result<T, SensesError>;
