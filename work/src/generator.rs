//! PoW generation (multi-threaded CPU).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use rayon::prelude::*;
use znn_types::{Hash, Nonce};

use crate::target::{difficulty_to_target, work_value};
use crate::WorkError;

/// Generates proof-of-work for a block digest using all available CPU cores.
#[derive(Clone, Copy, Debug, Default)]
pub struct WorkGenerator;

/// Nonces tried per thread between checks of the stop flags.
const BATCH_SIZE: u64 = 4096;

impl WorkGenerator {
    /// Search for a nonce meeting `difficulty`.
    ///
    /// The nonce space is striped across rayon's threads; the first thread to find a
    /// valid nonce stops the others. Setting `cancel` from another thread aborts the
    /// search within one batch and yields `WorkError::Cancelled`.
    pub fn generate(
        &self,
        digest: &Hash,
        difficulty: u64,
        cancel: &AtomicBool,
    ) -> Result<Nonce, WorkError> {
        if cancel.load(Ordering::Relaxed) {
            return Err(WorkError::Cancelled);
        }
        if difficulty <= 1 {
            return Ok(Nonce::ZERO);
        }

        let target = difficulty_to_target(difficulty);
        let found = AtomicBool::new(false);
        let found_nonce = AtomicU64::new(0);
        let num_threads = rayon::current_num_threads().max(1) as u64;

        (0..num_threads).into_par_iter().for_each(|thread_id| {
            let mut nonce = thread_id;
            loop {
                if found.load(Ordering::Acquire) || cancel.load(Ordering::Relaxed) {
                    return;
                }
                for _ in 0..BATCH_SIZE {
                    if work_value(digest, &nonce.to_le_bytes()) >= target {
                        if !found.swap(true, Ordering::AcqRel) {
                            found_nonce.store(nonce, Ordering::Release);
                        }
                        return;
                    }
                    nonce = match nonce.checked_add(num_threads) {
                        Some(next) => next,
                        None => return,
                    };
                }
            }
        });

        if found.load(Ordering::Acquire) {
            Ok(Nonce::from_u64(found_nonce.load(Ordering::Acquire)))
        } else if cancel.load(Ordering::Relaxed) {
            Err(WorkError::Cancelled)
        } else {
            Err(WorkError::Exhausted(difficulty))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_work;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn generated_nonce_validates() {
        let digest = Hash::new([0x42; 32]);
        let nonce = WorkGenerator
            .generate(&digest, 1000, &AtomicBool::new(false))
            .unwrap();
        assert!(validate_work(&digest, &nonce, 1000));
    }

    #[test]
    fn trivial_difficulty_is_immediate() {
        let nonce = WorkGenerator
            .generate(&Hash::ZERO, 0, &AtomicBool::new(false))
            .unwrap();
        assert_eq!(nonce, Nonce::ZERO);
    }

    #[test]
    fn pre_cancelled_search_returns_cancelled() {
        let result = WorkGenerator.generate(&Hash::ZERO, 1000, &AtomicBool::new(true));
        assert_eq!(result, Err(WorkError::Cancelled));
    }

    #[test]
    fn cancel_stops_unreachable_search() {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let handle = thread::spawn(move || {
            WorkGenerator.generate(&Hash::new([1; 32]), u64::MAX, &flag)
        });
        thread::sleep(Duration::from_millis(50));
        cancel.store(true, Ordering::Relaxed);
        assert_eq!(handle.join().unwrap(), Err(WorkError::Cancelled));
    }
}
