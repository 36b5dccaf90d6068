//! Wallet core library for ChainWallet.
//!
//! Provides everything a wallet front end needs on top of the ledger:
//! - Address generation
//! - The Wallet Sync Service ([`WalletService`]): owns the ledger, applies
//!   transfers, mines, and re-derives the wallet snapshot after every mutation
//! - The Secure State Store ([`SecureStateStore`]): encrypted, versioned
//!   persistence of the wallet and ledger snapshots
//! - TOML configuration

pub mod address;
pub mod config;
pub mod error;
pub mod service;
pub mod snapshot;
pub mod state_store;

pub use address::generate_address;
pub use config::WalletConfig;
pub use error::WalletError;
pub use service::{TransferMode, WalletService};
pub use snapshot::WalletSnapshot;
pub use state_store::{Loaded, SecureStateStore, StateEnvelope, STATE_FORMAT_VERSION};
