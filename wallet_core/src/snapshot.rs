//! The wallet snapshot: a derived, disposable view of one address.

use chainwallet_ledger::Ledger;
use chainwallet_transactions::Transaction;
use chainwallet_types::{Address, Balance};
use serde::{Deserialize, Serialize};

/// Balance and history are recomputed from the ledger on every sync and
/// never treated as authoritative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub address: Address,
    pub balance: Balance,
    pub transactions: Vec<Transaction>,
}

impl WalletSnapshot {
    /// Replay the ledger for `address`.
    pub fn derive(ledger: &Ledger, address: &Address) -> Self {
        Self {
            address: address.clone(),
            balance: ledger.balance_of(address),
            transactions: ledger.transactions_of(address),
        }
    }

    /// An empty snapshot for a wallet with no history.
    pub fn empty(address: Address) -> Self {
        Self {
            address,
            balance: 0,
            transactions: Vec::new(),
        }
    }
}
