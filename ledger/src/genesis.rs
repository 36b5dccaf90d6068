//! Genesis block creation.
//!
//! The genesis block holds one confirmed, zero-amount `system -> network`
//! transaction with the nil id, sealed against the all-zero hash. It is
//! stamped with the creation time, so every fresh chain has its own genesis
//! hash.

use chainwallet_transactions::{Transaction, TxStatus};
use chainwallet_types::{Address, Amount, BlockHash, Clock, TxId};
use chainwallet_work::{CancelFlag, Difficulty, Sealer};

use crate::{Block, LedgerError};

pub fn genesis_transaction(clock: &dyn Clock) -> Transaction {
    Transaction {
        id: TxId::GENESIS,
        from: Address::system(),
        to: Address::network(),
        amount: Amount::ZERO,
        status: TxStatus::Confirmed,
        timestamp: clock.now(),
    }
}

/// Create and seal the genesis block.
pub fn create_genesis_block(
    clock: &dyn Clock,
    difficulty: Difficulty,
    sealer: &Sealer,
) -> Result<Block, LedgerError> {
    Block::seal(
        0,
        BlockHash::ZERO,
        clock.now(),
        vec![genesis_transaction(clock)],
        difficulty,
        sealer,
        &CancelFlag::new(),
    )
}
