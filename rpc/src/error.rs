//! RPC error types.

use thiserror::Error;
use znn_transactions::LedgerError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RpcError {
    #[error("invalid node url: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("node returned HTTP {0}")]
    Http(u16),

    #[error("node error {code}: {message}")]
    Node { code: i64, message: String },

    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<RpcError> for LedgerError {
    fn from(e: RpcError) -> Self {
        match e {
            RpcError::Node { code, message } => LedgerError::Rpc { code, message },
            RpcError::Decode(reason) => LedgerError::Decode(reason),
            other => LedgerError::Transport(other.to_string()),
        }
    }
}
