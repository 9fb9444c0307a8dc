//! Drives drafts through assembly, digest, resolution, signing and publication.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::OwnedMutexGuard;
use tokio_util::sync::CancellationToken;
use tracing::{info_span, Instrument};
use znn_types::params::{DEFAULT_POW_DIFFICULTY, MAINNET_CHAIN_IDENTIFIER, MIN_PLASMA};
use znn_types::Address;

use crate::assembler::assemble;
use crate::draft::{PublishedBlock, TransactionDraft};
use crate::error::{PipelineError, Stage, TransactionError};
use crate::ledger::Ledger;
use crate::prover::ProofOfWork;
use crate::publisher::publish;
use crate::resolver::{resolve, ResolvePolicy};
use crate::signer::{sign_block, BlockSigner};

/// Tunables for every submission made through a pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Plasma a block must fuse; `None` or zero means `MIN_PLASMA`.
    pub required_plasma: Option<u64>,
    /// Fallback and floor difficulty for proof-of-work; zero means
    /// `DEFAULT_POW_DIFFICULTY`.
    pub default_difficulty: u64,
    pub chain_identifier: u64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            required_plasma: None,
            default_difficulty: DEFAULT_POW_DIFFICULTY,
            chain_identifier: MAINNET_CHAIN_IDENTIFIER,
        }
    }
}

impl PipelineOptions {
    /// Plasma a block must fuse to skip proof-of-work.
    pub fn plasma_requirement(&self) -> u64 {
        self.policy().required_plasma()
    }

    fn policy(&self) -> ResolvePolicy {
        ResolvePolicy::new(
            self.required_plasma.unwrap_or(MIN_PLASMA),
            self.default_difficulty,
        )
    }
}

/// One async mutex per address, held for a whole submission so that two blocks from
/// the same account never race for the same height.
#[derive(Default)]
pub struct AddressLocks {
    table: Mutex<HashMap<Address, Arc<tokio::sync::Mutex<()>>>>,
}

impl AddressLocks {
    pub async fn lock(&self, address: Address) -> OwnedMutexGuard<()> {
        let slot = {
            let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(table.entry(address).or_default())
        };
        slot.lock_owned().await
    }
}

/// Blocks published before a batch stopped, and why it stopped.
#[derive(Debug, thiserror::Error)]
#[error("{error} ({} block(s) published before the failure)", .published.len())]
pub struct BatchError {
    pub published: Vec<PublishedBlock>,
    #[source]
    pub error: PipelineError,
}

/// The transaction pipeline over a ledger `L` and a proof-of-work engine `P`.
pub struct Pipeline<L, P> {
    ledger: L,
    prover: Arc<P>,
    locks: AddressLocks,
    options: PipelineOptions,
}

impl<L: Ledger, P: ProofOfWork> Pipeline<L, P> {
    pub fn new(ledger: L, prover: P) -> Self {
        Self {
            ledger,
            prover: Arc::new(prover),
            locks: AddressLocks::default(),
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn prover(&self) -> &Arc<P> {
        &self.prover
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run `draft` to publication as `signer`.
    pub async fn submit<S: BlockSigner + ?Sized>(
        &self,
        signer: &S,
        draft: TransactionDraft,
    ) -> Result<PublishedBlock, PipelineError> {
        self.submit_with_cancel(signer, draft, &CancellationToken::new())
            .await
    }

    /// Like [`submit`](Self::submit), giving up with `Cancelled` once `timeout` passes.
    ///
    /// A stage already talking to the node finishes first; the abort lands at the next
    /// stage boundary or inside proof-of-work.
    pub async fn submit_with_timeout<S: BlockSigner + ?Sized>(
        &self,
        signer: &S,
        draft: TransactionDraft,
        timeout: Duration,
    ) -> Result<PublishedBlock, PipelineError> {
        let cancel = CancellationToken::new();
        let run = self.submit_with_cancel(signer, draft, &cancel);
        tokio::pin!(run);
        tokio::select! {
            result = &mut run => result,
            _ = tokio::time::sleep(timeout) => {
                tracing::debug!(?timeout, "submission timed out, cancelling");
                cancel.cancel();
                run.await
            }
        }
    }

    /// Run `draft` to publication, aborting with `Cancelled` once `cancel` fires.
    pub async fn submit_with_cancel<S: BlockSigner + ?Sized>(
        &self,
        signer: &S,
        draft: TransactionDraft,
        cancel: &CancellationToken,
    ) -> Result<PublishedBlock, PipelineError> {
        let address = signer.address();
        let span = info_span!("submit", %address, block_type = ?draft.block_type());
        async move {
            let _held = self.locks.lock(address).await;
            self.run_stages(signer, address, draft, cancel).await
        }
        .instrument(span)
        .await
    }

    async fn run_stages<S: BlockSigner + ?Sized>(
        &self,
        signer: &S,
        address: Address,
        draft: TransactionDraft,
        cancel: &CancellationToken,
    ) -> Result<PublishedBlock, PipelineError> {
        let checkpoint = |stage: Stage| {
            if cancel.is_cancelled() {
                Err(PipelineError::new(stage, TransactionError::Cancelled))
            } else {
                Ok(())
            }
        };

        checkpoint(Stage::Assemble)?;
        let assembled = assemble(&self.ledger, address, self.options.chain_identifier, draft)
            .await
            .map_err(|e| PipelineError::new(Stage::Assemble, e))?;

        checkpoint(Stage::Digest)?;
        let hashed = assembled.hash();
        tracing::debug!(digest = %hashed.digest(), "digest computed");

        checkpoint(Stage::Resolve)?;
        let policy = self.options.policy();
        let resolved = resolve(&self.ledger, &self.prover, hashed, &policy, cancel)
            .await
            .map_err(|e| PipelineError::new(Stage::Resolve, e))?;
        tracing::debug!(payment = ?resolved.payment(), "resources resolved");

        checkpoint(Stage::Sign)?;
        let signed =
            sign_block(resolved, signer).map_err(|e| PipelineError::new(Stage::Sign, e))?;
        tracing::debug!("block signed");

        checkpoint(Stage::Publish)?;
        let receipt = publish(&self.ledger, signed)
            .await
            .map_err(|e| PipelineError::new(Stage::Publish, e))?;
        tracing::info!(
            hash = %receipt.hash,
            height = receipt.height,
            "block published"
        );
        Ok(receipt)
    }

    /// Submit `drafts` in order, stopping at the first failure. Later drafts are
    /// dropped unsubmitted.
    pub async fn submit_all<S: BlockSigner + ?Sized>(
        &self,
        signer: &S,
        drafts: Vec<TransactionDraft>,
    ) -> Result<Vec<PublishedBlock>, BatchError> {
        self.submit_batch(signer, drafts, None).await
    }

    /// Like [`submit_all`](Self::submit_all), with each draft bounded by `timeout`
    /// the way [`submit_with_timeout`](Self::submit_with_timeout) bounds one.
    pub async fn submit_all_with_timeout<S: BlockSigner + ?Sized>(
        &self,
        signer: &S,
        drafts: Vec<TransactionDraft>,
        timeout: Duration,
    ) -> Result<Vec<PublishedBlock>, BatchError> {
        self.submit_batch(signer, drafts, Some(timeout)).await
    }

    async fn submit_batch<S: BlockSigner + ?Sized>(
        &self,
        signer: &S,
        drafts: Vec<TransactionDraft>,
        timeout: Option<Duration>,
    ) -> Result<Vec<PublishedBlock>, BatchError> {
        let mut published = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let result = match timeout {
                Some(timeout) => self.submit_with_timeout(signer, draft, timeout).await,
                None => self.submit(signer, draft).await,
            };
            match result {
                Ok(receipt) => published.push(receipt),
                Err(error) => return Err(BatchError { published, error }),
            }
        }
        Ok(published)
    }
}
