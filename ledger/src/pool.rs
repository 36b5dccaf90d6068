//! The pending pool: transactions admitted but not yet sealed.

use chainwallet_transactions::{Transaction, TxStatus};
use chainwallet_types::TxId;
use serde::{Deserialize, Serialize};

/// Admission-ordered transactions awaiting the next block.
///
/// Entries keep whatever status admission gave them, `failed` and
/// `double-spent` included, so rejected transfers stay visible until sealed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingPool {
    entries: Vec<Transaction>,
}

impl PendingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_entries(entries: Vec<Transaction>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn get(&self, id: &TxId) -> Option<&Transaction> {
        self.entries.iter().find(|tx| &tx.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &TxId) -> Option<&mut Transaction> {
        self.entries.iter_mut().find(|tx| &tx.id == id)
    }

    /// An earlier still-`pending` entry with the same sender and amount.
    ///
    /// `tx` may be online or deferred; either is checked. Only that exact
    /// pair counts as a conflict. Different amounts from the same sender, or
    /// an earlier entry that is `pending-offline`, do not.
    pub fn conflicting_entry(&self, tx: &Transaction) -> Option<&Transaction> {
        self.entries.iter().find(|entry| {
            entry.status == TxStatus::Pending && entry.from == tx.from && entry.amount == tx.amount
        })
    }

    pub(crate) fn push(&mut self, tx: Transaction) {
        self.entries.push(tx);
    }

    /// The pool as it will be sealed: `pending` entries promoted to
    /// `confirmed`, every other entry unchanged.
    pub(crate) fn promoted(&self) -> Vec<Transaction> {
        self.entries
            .iter()
            .cloned()
            .map(|mut tx| {
                if tx.status == TxStatus::Pending {
                    tx.status = TxStatus::Confirmed;
                }
                tx
            })
            .collect()
    }

    /// Replace the whole pool with a single entry.
    pub(crate) fn reset_to(&mut self, tx: Transaction) {
        self.entries = vec![tx];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainwallet_transactions::TransferRequest;
    use chainwallet_types::{Address, Amount, SystemClock};

    fn tx(from: &str, amount: u64, status: TxStatus) -> Transaction {
        let mut tx = Transaction::create(
            TransferRequest::new(Address::new(from), Address::new("to"), Amount::new(amount)),
            &SystemClock,
        )
        .unwrap();
        tx.status = status;
        tx
    }

    #[test]
    fn conflict_requires_same_sender_amount_and_pending() {
        let mut pool = PendingPool::new();
        pool.push(tx("a", 5, TxStatus::Pending));

        assert!(pool.conflicting_entry(&tx("a", 5, TxStatus::Pending)).is_some());
        assert!(pool.conflicting_entry(&tx("a", 6, TxStatus::Pending)).is_none());
        assert!(pool.conflicting_entry(&tx("b", 5, TxStatus::Pending)).is_none());
    }

    #[test]
    fn offline_entries_do_not_conflict() {
        let mut pool = PendingPool::new();
        pool.push(tx("a", 5, TxStatus::PendingOffline));
        pool.push(tx("a", 5, TxStatus::DoubleSpent));
        assert!(pool.conflicting_entry(&tx("a", 5, TxStatus::Pending)).is_none());
    }

    #[test]
    fn promotion_only_touches_pending() {
        let mut pool = PendingPool::new();
        pool.push(tx("a", 1, TxStatus::Pending));
        pool.push(tx("a", 2, TxStatus::PendingOffline));
        pool.push(tx("a", 3, TxStatus::Failed));
        pool.push(tx("a", 4, TxStatus::DoubleSpent));

        let statuses: Vec<_> = pool.promoted().into_iter().map(|tx| tx.status).collect();
        assert_eq!(
            statuses,
            vec![
                TxStatus::Confirmed,
                TxStatus::PendingOffline,
                TxStatus::Failed,
                TxStatus::DoubleSpent,
            ]
        );
        // The pool itself is untouched until the block is committed.
        assert_eq!(pool.as_slice()[0].status, TxStatus::Pending);
    }

    #[test]
    fn reset_replaces_everything() {
        let mut pool = PendingPool::new();
        pool.push(tx("a", 1, TxStatus::Pending));
        pool.push(tx("b", 2, TxStatus::Pending));
        let reward = tx("system", 10, TxStatus::Confirmed);
        let id = reward.id;
        pool.reset_to(reward);
        assert_eq!(pool.len(), 1);
        assert!(pool.get(&id).is_some());
    }
}
