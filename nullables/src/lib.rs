//! Nullable infrastructure for deterministic testing.
//!
//! The pipeline talks to the outside world through three seams: the ledger, the
//! proof-of-work engine and the signer. This crate provides test-friendly
//! implementations of each that:
//! - Return scripted values
//! - Record what they were asked to do
//! - Never touch the network or burn CPU
//!
//! Usage: swap real implementations for nullables in tests.

pub mod ledger;
pub mod prover;
pub mod signer;

pub use ledger::NullLedger;
pub use prover::NullProver;
pub use signer::NullSigner;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
