//! Nullable proof-of-work engine.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use znn_transactions::ProofOfWork;
use znn_types::{Hash, Nonce};
use znn_work::WorkError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Instant,
    UntilCancelled,
    Exhausted,
}

/// Hands out a fixed nonce without hashing anything.
///
/// [`NullProver::blocking`] never finishes on its own; it spins until the caller raises
/// the cancel flag, which makes it useful for cancellation and timeout tests.
pub struct NullProver {
    nonce: Nonce,
    mode: Mode,
    calls: AtomicUsize,
    last_difficulty: AtomicU64,
}

impl NullProver {
    pub const DEFAULT_NONCE: Nonce = Nonce::from_u64(0x5EED);

    pub fn new() -> Self {
        Self::with_mode(Mode::Instant)
    }

    pub fn with_nonce(nonce: Nonce) -> Self {
        Self {
            nonce,
            ..Self::new()
        }
    }

    pub fn blocking() -> Self {
        Self::with_mode(Mode::UntilCancelled)
    }

    /// Always reports an exhausted search.
    pub fn exhausted() -> Self {
        Self::with_mode(Mode::Exhausted)
    }

    fn with_mode(mode: Mode) -> Self {
        Self {
            nonce: Self::DEFAULT_NONCE,
            mode,
            calls: AtomicUsize::new(0),
            last_difficulty: AtomicU64::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Difficulty of the most recent request, 0 before any.
    pub fn last_difficulty(&self) -> u64 {
        self.last_difficulty.load(Ordering::SeqCst)
    }
}

impl Default for NullProver {
    fn default() -> Self {
        Self::new()
    }
}

impl ProofOfWork for NullProver {
    fn generate(
        &self,
        _digest: &Hash,
        difficulty: u64,
        cancel: &AtomicBool,
    ) -> Result<Nonce, WorkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_difficulty.store(difficulty, Ordering::SeqCst);
        match self.mode {
            Mode::Instant => Ok(self.nonce),
            Mode::Exhausted => Err(WorkError::Exhausted(difficulty)),
            Mode::UntilCancelled => {
                while !cancel.load(Ordering::Relaxed) {
                    std::thread::sleep(Duration::from_millis(1));
                }
                Err(WorkError::Cancelled)
            }
        }
    }
}
