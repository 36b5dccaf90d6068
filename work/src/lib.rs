//! Proof-of-work block sealing.
//!
//! A block is sealed by searching for a nonce such that the Blake2b-256 digest
//! of `header_prefix || nonce_le` starts with a fixed number of zero hex
//! characters. The search is CPU-bound; it runs across rayon worker threads,
//! honours a [`CancelFlag`] between batches and can be capped by attempt count.

pub mod cancel;
pub mod difficulty;
pub mod error;
pub mod generator;
pub mod validator;

pub use cancel::CancelFlag;
pub use difficulty::Difficulty;
pub use error::WorkError;
pub use generator::Sealer;
pub use validator::{seal_digest, validate_seal};

/// The result of a successful nonce search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkNonce(pub u64);
