//! The proof-of-work seam.

use std::sync::atomic::AtomicBool;

use znn_types::{Hash, Nonce};
use znn_work::{WorkError, WorkGenerator};

/// Computes a nonce over a block digest. Runs on a blocking thread; implementations
/// must return `WorkError::Cancelled` soon after `cancel` is raised.
pub trait ProofOfWork: Send + Sync + 'static {
    fn generate(&self, digest: &Hash, difficulty: u64, cancel: &AtomicBool)
        -> Result<Nonce, WorkError>;
}

impl ProofOfWork for WorkGenerator {
    fn generate(
        &self,
        digest: &Hash,
        difficulty: u64,
        cancel: &AtomicBool,
    ) -> Result<Nonce, WorkError> {
        WorkGenerator::generate(self, digest, difficulty, cancel)
    }
}
