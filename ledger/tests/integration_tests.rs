//! End-to-end ledger scenarios: admission outcomes, mining, reward lag,
//! offline settlement and validation, driven through the public API only.

use std::sync::Arc;

use chainwallet_ledger::{Ledger, LedgerConfig, LedgerError};
use chainwallet_nullables::NullClock;
use chainwallet_transactions::{Transaction, TransferRequest, TxStatus};
use chainwallet_types::{Address, Amount};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_ledger() -> (Arc<NullClock>, Ledger) {
    let clock = Arc::new(NullClock::new(1_700_000_000_000));
    let ledger = Ledger::new(LedgerConfig::default(), clock.clone()).unwrap();
    (clock, ledger)
}

fn wallet(seed: u8) -> Address {
    Address::new(format!("0x{}", format!("{seed:02x}").repeat(8)))
}

fn transfer(clock: &NullClock, from: &Address, to: &Address, amount: u64) -> Transaction {
    Transaction::create(
        TransferRequest::new(from.clone(), to.clone(), Amount::new(amount)),
        clock,
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// 1. Insufficient balance, then the delayed reward
// ---------------------------------------------------------------------------

#[test]
fn failed_transfer_then_reward_after_two_mines() {
    let (clock, mut ledger) = new_ledger();
    let x = wallet(1);
    let y = wallet(2);
    assert_eq!(ledger.balance_of(&x), 0);

    let tx = ledger.add_transaction(transfer(&clock, &x, &y, 10)).unwrap();
    assert_eq!(tx.status, TxStatus::Failed);

    clock.advance(1_000);
    ledger.mine_pending_transactions(&x).unwrap().expect("pool was not empty");
    assert_eq!(ledger.balance_of(&x), 0, "reward is not sealed yet");

    clock.advance(1_000);
    ledger.mine_pending_transactions(&x).unwrap().expect("reward is pooled");
    assert_eq!(ledger.balance_of(&x), 10);

    let history = ledger.transactions_of(&x);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].status, TxStatus::Failed);
    assert_eq!(history[1].from, Address::system());
    assert_eq!(history[1].status, TxStatus::Confirmed);
    assert!(ledger.is_chain_valid());
}

// ---------------------------------------------------------------------------
// 2. Double spend in the pool
// ---------------------------------------------------------------------------

#[test]
fn second_equal_transfer_is_double_spent_and_both_are_sealed() {
    let (clock, mut ledger) = new_ledger();
    let a = wallet(1);
    let b = wallet(2);

    // Seed the pool, then collect two rewards for A.
    ledger.add_transaction(transfer(&clock, &b, &a, 1)).unwrap();
    ledger.mine_pending_transactions(&a).unwrap();
    ledger.mine_pending_transactions(&a).unwrap();
    ledger.mine_pending_transactions(&b).unwrap();
    assert_eq!(ledger.balance_of(&a), 20);

    let first = ledger.add_transaction(transfer(&clock, &a, &b, 5)).unwrap();
    let second = ledger.add_transaction(transfer(&clock, &a, &b, 5)).unwrap();
    assert_eq!(first.status, TxStatus::Pending);
    assert_eq!(second.status, TxStatus::DoubleSpent);

    let block = ledger.mine_pending_transactions(&b).unwrap().unwrap();
    assert!(block.transactions().iter().any(|tx| tx.id == first.id));
    assert!(block.transactions().iter().any(|tx| tx.id == second.id));

    let history = ledger.transactions_of(&a);
    let statuses: Vec<_> = history
        .iter()
        .filter(|tx| tx.id == first.id || tx.id == second.id)
        .map(|tx| tx.status)
        .collect();
    assert_eq!(statuses, vec![TxStatus::Confirmed, TxStatus::DoubleSpent]);
    // Balance is the signed sum over every sealed transfer, flagged or not.
    assert_eq!(ledger.balance_of(&a), 10);
}

// ---------------------------------------------------------------------------
// 3. Offline settlement
// ---------------------------------------------------------------------------

#[test]
fn offline_transfer_confirmed_later() {
    let (clock, mut ledger) = new_ledger();
    let a = wallet(1);
    let b = wallet(2);
    ledger.add_transaction(transfer(&clock, &b, &a, 1)).unwrap();
    ledger.mine_pending_transactions(&a).unwrap();
    ledger.mine_pending_transactions(&b).unwrap();

    let tx = ledger
        .add_transaction(
            Transaction::create_offline(
                TransferRequest::new(a.clone(), b.clone(), Amount::new(4)),
                clock.as_ref(),
            )
            .unwrap(),
        )
        .unwrap();
    assert_eq!(tx.status, TxStatus::PendingOffline);
    assert_eq!(ledger.balance_of(&b), 0);

    ledger.confirm_offline_transaction(&tx.id, &a).unwrap().unwrap();
    assert_eq!(
        ledger.find_transaction(&tx.id).unwrap().status,
        TxStatus::Confirmed
    );
    // B also collected the reward sealed in the same block.
    assert_eq!(ledger.balance_of(&b), 14);
    assert_eq!(ledger.balance_of(&a), 6);
}

#[test]
fn offline_transfer_invalidated() {
    let (clock, mut ledger) = new_ledger();
    let a = wallet(1);
    let b = wallet(2);
    ledger.add_transaction(transfer(&clock, &b, &a, 1)).unwrap();
    ledger.mine_pending_transactions(&a).unwrap();
    ledger.mine_pending_transactions(&b).unwrap();
    let height = ledger.len();

    let tx = ledger
        .add_transaction(
            Transaction::create_offline(
                TransferRequest::new(a.clone(), b.clone(), Amount::new(4)),
                clock.as_ref(),
            )
            .unwrap(),
        )
        .unwrap();
    ledger.resolve_offline_transaction(&tx.id).unwrap();
    assert_eq!(ledger.len(), height, "invalidation does not mine");

    // A second resolution hits a terminal state.
    assert!(matches!(
        ledger.resolve_offline_transaction(&tx.id),
        Err(LedgerError::Transaction(_))
    ));

    ledger.mine_pending_transactions(&b).unwrap();
    assert_eq!(
        ledger.find_transaction(&tx.id).unwrap().status,
        TxStatus::DoubleSpent
    );
    assert_eq!(ledger.balance_of(&a), 6);
}

// ---------------------------------------------------------------------------
// 4. Snapshots
// ---------------------------------------------------------------------------

#[test]
fn snapshot_survives_json_and_keeps_mining() {
    let (clock, mut ledger) = new_ledger();
    let a = wallet(1);
    let b = wallet(2);
    ledger.add_transaction(transfer(&clock, &b, &a, 1)).unwrap();
    ledger.mine_pending_transactions(&a).unwrap();

    let json = serde_json::to_string(&ledger.snapshot()).unwrap();
    let mut restored = Ledger::from_snapshot(
        LedgerConfig::default(),
        clock.clone(),
        serde_json::from_str(&json).unwrap(),
    )
    .unwrap();

    restored.mine_pending_transactions(&b).unwrap().unwrap();
    assert_eq!(restored.balance_of(&a), 10);
    assert_eq!(restored.len(), 3);
    assert!(restored.is_chain_valid());
}
