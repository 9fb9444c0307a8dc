use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkError {
    #[error("work generation cancelled")]
    Cancelled,

    #[error("nonce space exhausted at difficulty {0}")]
    Exhausted(u64),
}
