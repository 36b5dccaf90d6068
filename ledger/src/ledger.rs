//! The ledger: sealed chain plus pending pool.

use std::sync::Arc;

use chainwallet_transactions::{Transaction, TxStatus, ValidationError};
use chainwallet_types::{Address, Balance, Clock, TxId};
use chainwallet_work::{CancelFlag, Difficulty, Sealer};

use crate::genesis::create_genesis_block;
use crate::snapshot::{LedgerSnapshot, LEDGER_SNAPSHOT_VERSION};
use crate::{Block, LedgerConfig, LedgerError, PendingPool};

/// The append-only block chain and its pending pool.
///
/// Blocks are never edited after sealing. All mutation goes through
/// `&mut self`, so callers sharing a ledger get single-writer discipline from
/// whatever lock they wrap it in.
pub struct Ledger {
    config: LedgerConfig,
    clock: Arc<dyn Clock>,
    sealer: Sealer,
    chain: Vec<Block>,
    pending: PendingPool,
}

impl Ledger {
    /// A fresh chain holding only the genesis block.
    pub fn new(config: LedgerConfig, clock: Arc<dyn Clock>) -> Result<Self, LedgerError> {
        let sealer = sealer_for(&config);
        let genesis = create_genesis_block(clock.as_ref(), config.difficulty, &sealer)?;
        tracing::debug!(hash = %genesis.hash(), "genesis block created");
        Ok(Self {
            config,
            clock,
            sealer,
            chain: vec![genesis],
            pending: PendingPool::new(),
        })
    }

    /// Rebuild a ledger from a snapshot, rejecting one whose chain does not
    /// validate.
    ///
    /// Beyond [`is_chain_valid`](Self::is_chain_valid), the genesis hash is
    /// recomputed and every block must meet the configured difficulty, so a
    /// chain re-hashed without work is refused.
    pub fn from_snapshot(
        config: LedgerConfig,
        clock: Arc<dyn Clock>,
        snapshot: LedgerSnapshot,
    ) -> Result<Self, LedgerError> {
        if snapshot.version != LEDGER_SNAPSHOT_VERSION {
            return Err(LedgerError::InvalidSnapshot(format!(
                "unsupported version {}",
                snapshot.version
            )));
        }
        match snapshot.blocks.first() {
            Some(genesis) if genesis.index() == 0 => {}
            Some(_) => {
                return Err(LedgerError::InvalidSnapshot(
                    "first block is not a genesis block".to_string(),
                ))
            }
            None => return Err(LedgerError::InvalidSnapshot("empty chain".to_string())),
        }
        if !indices_are_contiguous(&snapshot.blocks) {
            return Err(LedgerError::InvalidSnapshot(
                "block indices are not contiguous".to_string(),
            ));
        }
        if !chain_links_are_valid(&snapshot.blocks) {
            return Err(LedgerError::InvalidSnapshot(
                "chain does not validate".to_string(),
            ));
        }
        if !blocks_carry_work(&snapshot.blocks, config.difficulty) {
            return Err(LedgerError::InvalidSnapshot(format!(
                "block hashes do not meet difficulty {}",
                config.difficulty.zeros()
            )));
        }

        Ok(Self {
            sealer: sealer_for(&config),
            config,
            clock,
            chain: snapshot.blocks,
            pending: PendingPool::from_entries(snapshot.pending),
        })
    }

    /// Capture the chain and pool for persistence.
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            version: LEDGER_SNAPSHOT_VERSION,
            blocks: self.chain.clone(),
            pending: self.pending.as_slice().to_vec(),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Admit a transaction to the pending pool.
    ///
    /// Malformed transactions are rejected with an error and never reach the
    /// pool. Insufficient sealed balance marks the transaction `failed`; an
    /// earlier `pending` entry with the same sender and amount marks it
    /// `double-spent`. Either way it is appended and returned with its final
    /// status.
    pub fn add_transaction(&mut self, mut tx: Transaction) -> Result<Transaction, LedgerError> {
        tx.validate()?;
        if tx.status.is_terminal() {
            return Err(LedgerError::NotAdmissible {
                id: tx.id,
                status: tx.status,
            });
        }
        if self.find_transaction(&tx.id).is_some() {
            return Err(LedgerError::DuplicateTransaction(tx.id));
        }

        let balance = self.balance_of(&tx.from);
        if balance < tx.amount.as_balance() {
            tx.transition_to(TxStatus::Failed)?;
            tracing::warn!(
                id = %tx.id,
                from = %tx.from,
                amount = %tx.amount,
                balance,
                "transaction failed: insufficient balance"
            );
        } else if let Some(existing) = self.pending.conflicting_entry(&tx) {
            tracing::warn!(
                id = %tx.id,
                conflicts_with = %existing.id,
                "double spend detected in pending pool"
            );
            tx.transition_to(TxStatus::DoubleSpent)?;
        }

        tracing::info!(id = %tx.id, status = %tx.status, "transaction added to pool");
        self.pending.push(tx.clone());
        Ok(tx)
    }

    /// Seal the pool into a new block and reward `miner`.
    ///
    /// Returns `None` without touching the chain if the pool is empty.
    pub fn mine_pending_transactions(
        &mut self,
        miner: &Address,
    ) -> Result<Option<Block>, LedgerError> {
        self.mine_pending_transactions_with(miner, &CancelFlag::new())
    }

    /// Like [`mine_pending_transactions`](Self::mine_pending_transactions) but
    /// the nonce search stops when `cancel` is raised. A cancelled or timed
    /// out seal leaves the chain and the pool untouched.
    pub fn mine_pending_transactions_with(
        &mut self,
        miner: &Address,
        cancel: &CancelFlag,
    ) -> Result<Option<Block>, LedgerError> {
        if miner.is_empty() {
            return Err(ValidationError::MissingParty("miner").into());
        }
        if self.pending.is_empty() {
            tracing::debug!("no transactions to mine");
            return Ok(None);
        }

        let tip = self.latest_block();
        let block = Block::seal(
            tip.index() + 1,
            *tip.hash(),
            self.clock.now(),
            self.pending.promoted(),
            self.config.difficulty,
            &self.sealer,
            cancel,
        )?;

        self.chain.push(block.clone());
        self.pending.reset_to(Transaction::reward(
            miner.clone(),
            self.config.mining_reward,
            self.clock.as_ref(),
        ));

        tracing::info!(
            index = block.index(),
            hash = %block.hash(),
            nonce = block.nonce(),
            transactions = block.transactions().len(),
            %miner,
            "block mined"
        );
        Ok(Some(block))
    }

    /// Confirm a deferred transfer: move its pool entry back to `pending`
    /// and mine, which promotes it to `confirmed`.
    ///
    /// If mining fails the entry is restored to `pending-offline`.
    pub fn confirm_offline_transaction(
        &mut self,
        id: &TxId,
        miner: &Address,
    ) -> Result<Option<Block>, LedgerError> {
        self.confirm_offline_transaction_with(id, miner, &CancelFlag::new())
    }

    pub fn confirm_offline_transaction_with(
        &mut self,
        id: &TxId,
        miner: &Address,
        cancel: &CancelFlag,
    ) -> Result<Option<Block>, LedgerError> {
        let entry = self
            .pending
            .get_mut(id)
            .ok_or(LedgerError::UnknownTransaction(*id))?;
        entry.transition_to(TxStatus::Pending)?;

        let mined = self.mine_pending_transactions_with(miner, cancel);
        if mined.is_err() {
            if let Some(entry) = self.pending.get_mut(id) {
                entry.status = TxStatus::PendingOffline;
            }
        } else {
            tracing::info!(%id, "offline transaction confirmed");
        }
        mined
    }

    /// Invalidate a deferred transfer: mark its pool entry `double-spent`
    /// without mining. The entry is sealed by the next unrelated mine.
    pub fn resolve_offline_transaction(&mut self, id: &TxId) -> Result<(), LedgerError> {
        let entry = self
            .pending
            .get_mut(id)
            .ok_or(LedgerError::UnknownTransaction(*id))?;
        entry.transition_to(TxStatus::DoubleSpent)?;
        tracing::warn!(%id, "offline transaction marked double-spent");
        Ok(())
    }

    /// Recompute every non-genesis block's hash and check the links.
    ///
    /// Read-only; never fails, only reports.
    pub fn is_chain_valid(&self) -> bool {
        chain_links_are_valid(&self.chain)
    }

    /// Signed sum over sealed transactions touching `address`.
    ///
    /// Pool entries never count. Sealed `failed` entries are history only
    /// and move no funds; `double-spent` entries count like any other.
    pub fn balance_of(&self, address: &Address) -> Balance {
        self.sealed_transactions()
            .filter(|tx| tx.status.moves_funds())
            .map(|tx| tx.net_effect_on(address))
            .sum()
    }

    /// Every sealed transaction touching `address`, in sealed order.
    pub fn transactions_of(&self, address: &Address) -> Vec<Transaction> {
        self.sealed_transactions()
            .filter(|tx| tx.touches(address))
            .cloned()
            .collect()
    }

    /// An owned copy of the whole chain.
    pub fn chain(&self) -> Vec<Block> {
        self.chain.clone()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn latest_block(&self) -> &Block {
        // The chain always holds at least the genesis block.
        &self.chain[self.chain.len() - 1]
    }

    pub fn block_by_index(&self, index: u64) -> Option<&Block> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.chain.get(i))
    }

    pub fn pending_transactions(&self) -> &[Transaction] {
        self.pending.as_slice()
    }

    pub fn pending_pool(&self) -> &PendingPool {
        &self.pending
    }

    /// Look up a transaction in the sealed chain, then the pool.
    pub fn find_transaction(&self, id: &TxId) -> Option<&Transaction> {
        self.sealed_transactions()
            .find(|tx| &tx.id == id)
            .or_else(|| self.pending.get(id))
    }

    /// Number of sealed blocks, genesis included.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Always false: the genesis block is never removed.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    fn sealed_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.chain.iter().flat_map(|block| block.transactions())
    }
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("config", &self.config)
            .field("blocks", &self.chain.len())
            .field("pending", &self.pending.len())
            .finish()
    }
}

fn sealer_for(config: &LedgerConfig) -> Sealer {
    match config.max_seal_attempts {
        Some(max) => Sealer::with_max_attempts(max),
        None => Sealer::new(),
    }
}

fn chain_links_are_valid(chain: &[Block]) -> bool {
    chain.windows(2).all(|pair| {
        let (previous, current) = (&pair[0], &pair[1]);
        current.has_valid_hash() && current.previous_hash() == previous.hash()
    })
}

fn blocks_carry_work(chain: &[Block], difficulty: Difficulty) -> bool {
    chain.first().is_some_and(Block::has_valid_hash)
        && chain.iter().all(|block| block.meets_difficulty(difficulty))
}

fn indices_are_contiguous(chain: &[Block]) -> bool {
    chain
        .iter()
        .enumerate()
        .all(|(position, block)| block.index() == position as u64)
}
