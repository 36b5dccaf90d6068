//! Abstract storage for ChainWallet state.
//!
//! Persisted state is a handful of opaque byte blobs under stable string keys.
//! Every backend (LMDB on device, in-memory for testing) implements
//! [`KvStore`]; the rest of the codebase depends only on the trait.

pub mod error;
pub mod kv;

pub use error::StoreError;
pub use kv::KvStore;
