//! # Errors
//!
//! A single error type for the fountain core. Construction-time misconfiguration
//! is fatal (`BadParameter`). An underdetermined decode is not an error at
//! all — it is reachable as `Ok(None)` from
//! [`crate::decoder::Decoder::decode`], since "not enough symbols yet" is the
//! ordinary outcome of polling a fountain decoder, not an exceptional one.

use thiserror::Error;

/// Errors surfaced by the fountain core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FountainError {
    /// Invalid configuration, rejected at construction.
    #[error("bad parameter: {reason}")]
    BadParameter {
        /// Human-readable explanation.
        reason: String,
    },
}

impl FountainError {
    pub(crate) fn bad_parameter(reason: impl Into<String>) -> Self {
        FountainError::BadParameter {
            reason: reason.into(),
        }
    }
}
