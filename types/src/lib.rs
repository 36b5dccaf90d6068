//! Fundamental types for the ChainWallet ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, amounts, block hashes, transaction ids and timestamps.

pub mod address;
pub mod amount;
pub mod block;
pub mod error;
pub mod id;
pub mod time;

pub use address::Address;
pub use amount::{Amount, Balance};
pub use block::BlockHash;
pub use error::TypesError;
pub use id::TxId;
pub use time::{Clock, SystemClock, Timestamp};
