//! Nonce search (multi-threaded CPU).

use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;

use crate::validator::seal_digest;
use crate::{CancelFlag, Difficulty, WorkError, WorkNonce};

/// Nonces tried per thread before checking the cancel flag and attempt cap.
const BATCH_SIZE: u64 = 1024;

const NOT_FOUND: u64 = u64::MAX;

/// Searches for a nonce that seals a header at a given difficulty.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sealer {
    max_attempts: Option<u64>,
}

impl Sealer {
    /// A sealer with no attempt cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sealer that gives up with [`WorkError::SealingTimeout`] after roughly
    /// `max_attempts` hashes (checked per batch, across all threads).
    pub fn with_max_attempts(max_attempts: u64) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    pub fn max_attempts(&self) -> Option<u64> {
        self.max_attempts
    }

    /// Find a nonce `>= 1` such that `seal_digest(header_prefix, nonce)` meets
    /// `difficulty`.
    ///
    /// The nonce space is interleaved across rayon threads. A thread keeps
    /// searching while its next nonce is below the best one found so far, so
    /// an uncapped, uncancelled search always returns the smallest qualifying
    /// nonce.
    pub fn seal(
        &self,
        header_prefix: &[u8],
        difficulty: Difficulty,
        cancel: &CancelFlag,
    ) -> Result<WorkNonce, WorkError> {
        let found = AtomicU64::new(NOT_FOUND);
        let attempts = AtomicU64::new(0);
        let num_threads = rayon::current_num_threads().max(1) as u64;

        (0..num_threads).into_par_iter().for_each(|thread_id| {
            let mut nonce = 1 + thread_id;

            loop {
                if found.load(Ordering::Relaxed) < nonce || cancel.is_cancelled() {
                    return;
                }
                if let Some(max) = self.max_attempts {
                    if attempts.load(Ordering::Relaxed) >= max {
                        return;
                    }
                }

                for _ in 0..BATCH_SIZE {
                    if difficulty.is_met_by(&seal_digest(header_prefix, nonce)) {
                        found.fetch_min(nonce, Ordering::Relaxed);
                        return;
                    }
                    nonce = match nonce.checked_add(num_threads) {
                        Some(next) => next,
                        None => return,
                    };
                }
                attempts.fetch_add(BATCH_SIZE, Ordering::Relaxed);
            }
        });

        match found.load(Ordering::Relaxed) {
            NOT_FOUND if cancel.is_cancelled() => Err(WorkError::Cancelled),
            NOT_FOUND => Err(WorkError::SealingTimeout {
                attempts: attempts.load(Ordering::Relaxed),
            }),
            nonce => Ok(WorkNonce(nonce)),
        }
    }
}
