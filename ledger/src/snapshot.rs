//! Ledger snapshots: the full chain plus pool, for persistence.
//!
//! A snapshot is trusted only after [`Ledger::from_snapshot`](crate::Ledger::from_snapshot)
//! has re-validated every block hash and link.

use chainwallet_transactions::Transaction;
use serde::{Deserialize, Serialize};

use crate::Block;

/// Snapshot format version.
pub const LEDGER_SNAPSHOT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Snapshot version for compatibility.
    pub version: u32,
    /// Every sealed block, genesis first.
    pub blocks: Vec<Block>,
    /// The pending pool in admission order.
    pub pending: Vec<Transaction>,
}

impl LedgerSnapshot {
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
