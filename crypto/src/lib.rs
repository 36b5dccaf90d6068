//! Cryptographic primitives for ChainWallet.
//!
//! - **Blake2b-256** for content hashing (block seals, address derivation)
//! - **bincode** as the canonical encoding fed to the hasher
//! - **AES-256-GCM** for encrypting persisted wallet and ledger state,
//!   keyed by an **Argon2id** derivation of the application secret

pub mod cipher;
pub mod error;
pub mod hash;

pub use cipher::StateCipher;
pub use error::CryptoError;
pub use hash::{blake2b_256, blake2b_256_multi, canonical_bytes, hash_value};
