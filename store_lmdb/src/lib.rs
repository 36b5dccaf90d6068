//! LMDB storage backend for ChainWallet state.
//!
//! Implements [`KvStore`](chainwallet_store::KvStore) over a single named
//! database inside one `heed` environment.

pub mod environment;
pub mod error;
pub mod kv;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use kv::LmdbKvStore;
