//! Parse errors for user-supplied identifiers and amounts.

use thiserror::Error;

/// Malformed input detected before any network interaction.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid token standard: {0}")]
    InvalidTokenStandard(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}
