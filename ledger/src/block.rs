//! Sealed blocks.
//!
//! A block's hash is Blake2b-256 over the canonical encoding of
//! `{index, previous_hash, timestamp, transactions, nonce}`. The nonce is
//! encoded last, so the sealer can hash a fixed prefix followed by each
//! candidate nonce.

use chainwallet_crypto::canonical_bytes;
use chainwallet_transactions::Transaction;
use chainwallet_types::{BlockHash, Timestamp};
use chainwallet_work::{seal_digest, CancelFlag, Difficulty, Sealer};
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// The hashed fields of a block, minus the nonce.
#[derive(Serialize)]
struct SealingPrefix<'a> {
    index: u64,
    previous_hash: &'a BlockHash,
    timestamp: Timestamp,
    transactions: &'a [Transaction],
}

/// A sealed block. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: Timestamp,
    transactions: Vec<Transaction>,
    previous_hash: BlockHash,
    nonce: u64,
    hash: BlockHash,
}

impl Block {
    /// Search for a nonce and build the sealed block.
    pub fn seal(
        index: u64,
        previous_hash: BlockHash,
        timestamp: Timestamp,
        transactions: Vec<Transaction>,
        difficulty: Difficulty,
        sealer: &Sealer,
        cancel: &CancelFlag,
    ) -> Result<Self, LedgerError> {
        let prefix = header_prefix(index, &previous_hash, timestamp, &transactions)?;
        let nonce = sealer.seal(&prefix, difficulty, cancel)?.0;
        let hash = BlockHash::new(seal_digest(&prefix, nonce));
        Ok(Self {
            index,
            timestamp,
            transactions,
            previous_hash,
            nonce,
            hash,
        })
    }

    /// Recompute the hash from the stored fields.
    pub fn compute_hash(&self) -> Result<BlockHash, LedgerError> {
        let prefix = header_prefix(
            self.index,
            &self.previous_hash,
            self.timestamp,
            &self.transactions,
        )?;
        Ok(BlockHash::new(seal_digest(&prefix, self.nonce)))
    }

    /// Whether the stored hash matches the fields it was sealed over.
    pub fn has_valid_hash(&self) -> bool {
        matches!(self.compute_hash(), Ok(hash) if hash == self.hash)
    }

    pub fn meets_difficulty(&self, difficulty: Difficulty) -> bool {
        difficulty.is_met_by(self.hash.as_bytes())
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn previous_hash(&self) -> &BlockHash {
        &self.previous_hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> &BlockHash {
        &self.hash
    }

    #[cfg(test)]
    pub(crate) fn transactions_mut(&mut self) -> &mut Vec<Transaction> {
        &mut self.transactions
    }

    /// Recompute the hash with the first nonce that does NOT meet
    /// `difficulty`.
    #[cfg(test)]
    pub(crate) fn reseal_without_work(&mut self, difficulty: Difficulty) {
        for nonce in 0.. {
            self.nonce = nonce;
            if let Ok(hash) = self.compute_hash() {
                if !difficulty.is_met_by(hash.as_bytes()) {
                    self.hash = hash;
                    return;
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn set_previous_hash(&mut self, previous_hash: BlockHash) {
        self.previous_hash = previous_hash;
    }
}

fn header_prefix(
    index: u64,
    previous_hash: &BlockHash,
    timestamp: Timestamp,
    transactions: &[Transaction],
) -> Result<Vec<u8>, LedgerError> {
    Ok(canonical_bytes(&SealingPrefix {
        index,
        previous_hash,
        timestamp,
        transactions,
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainwallet_crypto::hash_value;
    use chainwallet_transactions::TransferRequest;
    use chainwallet_types::{Address, Amount, Clock, SystemClock};

    #[derive(Serialize)]
    struct FullHeader<'a> {
        index: u64,
        previous_hash: &'a BlockHash,
        timestamp: Timestamp,
        transactions: &'a [Transaction],
        nonce: u64,
    }

    fn sample_block() -> Block {
        let tx = Transaction::create(
            TransferRequest::new(Address::new("a"), Address::new("b"), Amount::new(3)),
            &SystemClock,
        )
        .unwrap();
        Block::seal(
            1,
            BlockHash::new([7; 32]),
            SystemClock.now(),
            vec![tx],
            Difficulty::new(1).unwrap(),
            &Sealer::new(),
            &CancelFlag::new(),
        )
        .unwrap()
    }

    #[test]
    fn sealed_block_meets_difficulty() {
        let block = sample_block();
        assert!(block.meets_difficulty(Difficulty::new(1).unwrap()));
        assert!(block.hash().to_hex().starts_with('0'));
        assert!(block.nonce() >= 1);
    }

    #[test]
    fn recomputed_hash_matches() {
        let block = sample_block();
        assert_eq!(block.compute_hash().unwrap(), *block.hash());
        assert!(block.has_valid_hash());
    }

    #[test]
    fn hash_equals_full_header_hash() {
        let block = sample_block();
        let full = FullHeader {
            index: block.index(),
            previous_hash: block.previous_hash(),
            timestamp: block.timestamp(),
            transactions: block.transactions(),
            nonce: block.nonce(),
        };
        assert_eq!(hash_value(&full).unwrap(), *block.hash());
    }

    #[test]
    fn tampering_breaks_hash() {
        let mut block = sample_block();
        block.transactions_mut()[0].amount = Amount::new(300);
        assert!(!block.has_valid_hash());
    }

    #[test]
    fn cancelled_seal_is_an_error() {
        let cancel = CancelFlag::new();
        cancel.cancel();
        let result = Block::seal(
            0,
            BlockHash::ZERO,
            Timestamp::EPOCH,
            vec![],
            Difficulty::new(4).unwrap(),
            &Sealer::new(),
            &cancel,
        );
        assert!(matches!(
            result,
            Err(LedgerError::Sealing(chainwallet_work::WorkError::Cancelled))
        ));
    }

    #[test]
    fn json_roundtrip_preserves_validity() {
        let block = sample_block();
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(back, block);
        assert!(back.has_valid_hash());
    }
}
