//! The ChainWallet ledger.
//!
//! An append-only chain of proof-of-work sealed blocks plus a mutable pool of
//! not-yet-sealed transactions. Balances and histories are never stored; they
//! are derived by replaying sealed blocks.
//!
//! The chain always starts with a genesis block holding a single zero-amount
//! `system -> network` transaction. Mining seals the whole pool into a new
//! block and refills the pool with the miner's reward, which is itself only
//! sealed by the following mine.

pub mod block;
pub mod config;
pub mod error;
pub mod genesis;
pub mod ledger;
pub mod pool;
pub mod snapshot;

pub use block::Block;
pub use config::LedgerConfig;
pub use error::LedgerError;
pub use genesis::{create_genesis_block, genesis_transaction};
pub use ledger::Ledger;
pub use pool::PendingPool;
pub use snapshot::{LedgerSnapshot, LEDGER_SNAPSHOT_VERSION};
