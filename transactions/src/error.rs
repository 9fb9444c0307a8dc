use std::fmt;

use thiserror::Error;
use znn_types::FormatError;

/// Failure of a ledger facade call.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The node could not be reached or the connection broke.
    #[error("transport error: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC error object.
    #[error("node error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The node answered, but not in a form we understand.
    #[error("undecodable response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error(transparent)]
    InvalidFormat(#[from] FormatError),

    #[error("ledger query failed: {0}")]
    QueryFailure(LedgerError),

    #[error("signing failed: {0}")]
    SigningFailure(String),

    #[error("rejected by network: {0}")]
    RejectedByNetwork(String),

    #[error("transport failure: {0}")]
    TransportFailure(String),

    #[error("proof-of-work failed: {0}")]
    ProofFailure(String),

    #[error("cancelled")]
    Cancelled,
}

/// Pipeline transition that failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Assemble,
    Digest,
    Resolve,
    Sign,
    Publish,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Assemble => "assembly",
            Stage::Digest => "digest",
            Stage::Resolve => "resource resolution",
            Stage::Sign => "signing",
            Stage::Publish => "publication",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submission aborted at `stage`. Nothing after `stage` ran.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: TransactionError,
}

impl PipelineError {
    pub fn new(stage: Stage, source: TransactionError) -> Self {
        Self { stage, source }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.source, TransactionError::Cancelled)
    }
}
