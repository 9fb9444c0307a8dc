//! Decides how a block pays for itself: fused plasma when the account has enough,
//! proof-of-work otherwise.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use znn_types::params::{DEFAULT_POW_DIFFICULTY, MIN_PLASMA};
use znn_types::{Hash, Nonce, RequiredPowParams};
use znn_work::WorkError;

use crate::draft::{HashedBlock, ResolvedBlock, ResourcePayment};
use crate::error::TransactionError;
use crate::ledger::Ledger;
use crate::prover::ProofOfWork;

/// Resource requirements for one block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvePolicy {
    required_plasma: u64,
    default_difficulty: u64,
}

impl ResolvePolicy {
    /// Zero in either field takes the protocol default.
    pub fn new(required_plasma: u64, default_difficulty: u64) -> Self {
        Self {
            required_plasma: if required_plasma == 0 {
                MIN_PLASMA
            } else {
                required_plasma
            },
            default_difficulty: if default_difficulty == 0 {
                DEFAULT_POW_DIFFICULTY
            } else {
                default_difficulty
            },
        }
    }

    pub fn required_plasma(&self) -> u64 {
        self.required_plasma
    }

    pub fn default_difficulty(&self) -> u64 {
        self.default_difficulty
    }
}

impl Default for ResolvePolicy {
    fn default() -> Self {
        Self::new(MIN_PLASMA, DEFAULT_POW_DIFFICULTY)
    }
}

/// Settle the block's payment.
///
/// The plasma query runs exactly once. If it fails, work is computed at the default
/// difficulty without asking the node anything else. If plasma covers the requirement,
/// the block fuses exactly the required amount. Otherwise the node's required
/// difficulty is used, never below the default, and the default alone when that query
/// fails. Lack of plasma is never an error.
pub async fn resolve<L, P>(
    ledger: &L,
    prover: &Arc<P>,
    block: HashedBlock,
    policy: &ResolvePolicy,
    cancel: &CancellationToken,
) -> Result<ResolvedBlock, TransactionError>
where
    L: Ledger + ?Sized,
    P: ProofOfWork,
{
    let address = block.header().address;
    let difficulty = match ledger.plasma(&address).await {
        Err(e) => {
            tracing::warn!(
                %address,
                error = %e,
                difficulty = policy.default_difficulty,
                "plasma query failed, falling back to proof-of-work"
            );
            policy.default_difficulty
        }
        Ok(info) if info.current_plasma >= policy.required_plasma => {
            tracing::debug!(
                %address,
                current = info.current_plasma,
                required = policy.required_plasma,
                "paying with plasma"
            );
            return Ok(block.with_payment(ResourcePayment::Plasma {
                fused_plasma: policy.required_plasma,
            }));
        }
        Ok(info) => {
            let params = RequiredPowParams {
                address,
                block_type: block.header().block_type,
                to_address: block.header().to_address,
                data: block.header().data.clone(),
            };
            match ledger.required_pow(&params).await {
                Ok(required) => {
                    let difficulty = required.required_difficulty.max(policy.default_difficulty);
                    tracing::debug!(
                        %address,
                        current = info.current_plasma,
                        network = required.required_difficulty,
                        difficulty,
                        "insufficient plasma, computing proof-of-work"
                    );
                    difficulty
                }
                Err(e) => {
                    tracing::warn!(
                        %address,
                        error = %e,
                        difficulty = policy.default_difficulty,
                        "required difficulty query failed, using default"
                    );
                    policy.default_difficulty
                }
            }
        }
    };

    let nonce = compute_nonce(Arc::clone(prover), *block.digest(), difficulty, cancel).await?;
    Ok(block.with_payment(ResourcePayment::Work { difficulty, nonce }))
}

/// Raises the worker's stop flag once the waiting future is gone.
struct StopOnDrop(Arc<AtomicBool>);

impl Drop for StopOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

async fn compute_nonce<P: ProofOfWork>(
    prover: Arc<P>,
    digest: Hash,
    difficulty: u64,
    cancel: &CancellationToken,
) -> Result<Nonce, TransactionError> {
    if cancel.is_cancelled() {
        return Err(TransactionError::Cancelled);
    }

    let stop = Arc::new(AtomicBool::new(false));
    let _guard = StopOnDrop(Arc::clone(&stop));
    let worker_stop = Arc::clone(&stop);
    let mut worker =
        tokio::task::spawn_blocking(move || prover.generate(&digest, difficulty, &worker_stop));

    tokio::select! {
        joined = &mut worker => match joined {
            Ok(Ok(nonce)) => Ok(nonce),
            Ok(Err(WorkError::Cancelled)) => Err(TransactionError::Cancelled),
            Ok(Err(e)) => Err(TransactionError::ProofFailure(e.to_string())),
            Err(e) => Err(TransactionError::ProofFailure(format!("worker panicked: {e}"))),
        },
        _ = cancel.cancelled() => {
            stop.store(true, Ordering::Relaxed);
            tracing::debug!(difficulty, "proof-of-work cancelled");
            Err(TransactionError::Cancelled)
        }
    }
}
