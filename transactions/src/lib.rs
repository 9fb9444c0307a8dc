//! Account block transactions: drafting, assembly, resource resolution, signing and
//! publication.
//!
//! The [`Pipeline`] drives a [`TransactionDraft`] through every stage against a
//! [`Ledger`], paying with plasma when the account has it and with proof-of-work from a
//! [`ProofOfWork`] engine when it does not. Any stage failing aborts the submission;
//! nothing reaches the node unless every earlier stage succeeded.

pub mod abi;
pub mod assembler;
pub mod digest;
pub mod draft;
pub mod embedded;
pub mod error;
pub mod ledger;
pub mod pipeline;
pub mod prover;
pub mod publisher;
pub mod resolver;
pub mod signer;

pub use draft::{
    AssembledBlock, BlockHeader, HashedBlock, PublishedBlock, ResolvedBlock, ResourcePayment,
    SignedBlock, TransactionDraft,
};
pub use error::{LedgerError, PipelineError, Stage, TransactionError};
pub use ledger::Ledger;
pub use pipeline::{AddressLocks, BatchError, Pipeline, PipelineOptions};
pub use prover::ProofOfWork;
pub use resolver::ResolvePolicy;
pub use signer::{sign_block, BlockSigner};
