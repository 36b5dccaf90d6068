//! The Wallet Sync Service.
//!
//! [`WalletService`] is the composition root's handle on one wallet. It owns
//! the ledger (single writer, behind a mutex), the encrypted state store and
//! the current [`WalletSnapshot`]. After every ledger mutation it re-derives
//! the snapshot and persists it.
//!
//! Sealing is CPU-bound, so every mine runs on tokio's blocking pool. The
//! ledger lock is held for the whole seal; raise the [`CancelFlag`] from
//! [`WalletService::cancel_handle`] to abandon one. The flag re-arms as soon
//! as that seal ends, so later mines run normally.

use std::sync::{Arc, Mutex, MutexGuard};

use chainwallet_ledger::{Block, Ledger};
use chainwallet_store::KvStore;
use chainwallet_transactions::{Transaction, TransferRequest, ValidationError};
use chainwallet_types::{Address, Amount, Balance, Clock, TxId};
use chainwallet_work::CancelFlag;

use crate::{generate_address, SecureStateStore, WalletConfig, WalletError, WalletSnapshot};

/// How a transfer settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferMode {
    /// Admit and mine immediately.
    Online,
    /// Admit as `pending-offline`; settle later with
    /// [`WalletService::resolve_offline`].
    Offline,
}

pub struct WalletService<S: KvStore> {
    config: WalletConfig,
    clock: Arc<dyn Clock>,
    ledger: Arc<Mutex<Ledger>>,
    state: SecureStateStore<S>,
    snapshot: WalletSnapshot,
    cancel: CancelFlag,
}

impl<S: KvStore> WalletService<S> {
    /// Restore (or create) the wallet and its ledger from `store`.
    ///
    /// A persisted ledger that fails validation is discarded for a fresh
    /// genesis chain. A missing wallet gets a newly generated address.
    pub async fn open(
        config: WalletConfig,
        store: S,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, WalletError> {
        let state = SecureStateStore::with_secret(store, &config.state_secret)?;
        Self::open_with_state(config, state, clock).await
    }

    /// Like [`open`](Self::open) with an already keyed state store.
    pub async fn open_with_state(
        config: WalletConfig,
        state: SecureStateStore<S>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, WalletError> {
        let restored = if config.persist_ledger {
            state.load_ledger().and_then(|loaded| {
                match Ledger::from_snapshot(config.ledger.clone(), clock.clone(), loaded.value) {
                    Ok(ledger) => Some(ledger),
                    Err(e) => {
                        tracing::warn!(error = %e, "discarding stored ledger");
                        None
                    }
                }
            })
        } else {
            None
        };
        let ledger = match restored {
            Some(ledger) => {
                tracing::info!(blocks = ledger.len(), "ledger restored");
                ledger
            }
            None => fresh_ledger(&config, clock.clone()).await?,
        };

        let address = match state.load_wallet() {
            Some(loaded) => {
                tracing::info!(address = %loaded.value.address, "wallet loaded from storage");
                loaded.value.address
            }
            None => {
                let address = generate_address(clock.as_ref());
                tracing::info!(%address, "created new wallet");
                address
            }
        };

        let mut service = Self {
            config,
            clock,
            ledger: Arc::new(Mutex::new(ledger)),
            state,
            snapshot: WalletSnapshot::empty(address),
            cancel: CancelFlag::new(),
        };
        service.sync()?;
        Ok(service)
    }

    pub fn address(&self) -> &Address {
        &self.snapshot.address
    }

    pub fn balance(&self) -> Balance {
        self.snapshot.balance
    }

    /// The snapshot as of the last sync.
    pub fn snapshot(&self) -> &WalletSnapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn state_store(&self) -> &SecureStateStore<S> {
        &self.state
    }

    /// Flag that aborts the in-flight (or next) seal. It is cleared once
    /// that seal returns.
    pub fn cancel_handle(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Run a read-only query against the ledger.
    pub fn with_ledger<R>(&self, f: impl FnOnce(&Ledger) -> R) -> Result<R, WalletError> {
        Ok(f(&*self.lock_ledger()?))
    }

    /// Send `amount` from this wallet to `to`.
    ///
    /// Insufficient funds are not an error: the transfer is recorded as
    /// `failed`. Online transfers are mined immediately with this wallet as
    /// the miner. Returns the transaction in its latest state.
    ///
    /// If that mine fails (cancelled or timed out) the error is returned but
    /// the transfer stays admitted and `pending` in the pool; the next
    /// [`mine`](Self::mine) seals it. Do not resend: an equal second transfer
    /// is flagged `double-spent`.
    pub async fn send(
        &mut self,
        to: &str,
        amount: u64,
        mode: TransferMode,
    ) -> Result<Transaction, WalletError> {
        if to.trim().is_empty() {
            return Err(ValidationError::MissingParty("receiver").into());
        }
        let to = Address::parse_wallet(to)?;
        let request = TransferRequest::new(self.address().clone(), to, Amount::new(amount));
        let tx = match mode {
            TransferMode::Online => Transaction::create(request, self.clock.as_ref())?,
            TransferMode::Offline => Transaction::create_offline(request, self.clock.as_ref())?,
        };

        let admitted = self.lock_ledger()?.add_transaction(tx)?;
        tracing::info!(id = %admitted.id, status = %admitted.status, ?mode, "transfer submitted");

        let mined = match mode {
            TransferMode::Online => self.mine_on_worker(None).await.map(|_| ()),
            TransferMode::Offline => Ok(()),
        };
        self.sync()?;
        mined?;

        let latest = self.with_ledger(|ledger| ledger.find_transaction(&admitted.id).cloned())?;
        Ok(latest.unwrap_or(admitted))
    }

    /// Settle a deferred transfer: `success` confirms and mines it, otherwise
    /// it is marked `double-spent` without mining.
    pub async fn resolve_offline(&mut self, id: TxId, success: bool) -> Result<(), WalletError> {
        let result = if success {
            self.mine_on_worker(Some(id)).await.map(|_| ())
        } else {
            self.lock_ledger()?
                .resolve_offline_transaction(&id)
                .map_err(WalletError::from)
        };
        self.sync()?;
        result
    }

    /// Mine the pool with this wallet as the miner.
    pub async fn mine(&mut self) -> Result<Option<Block>, WalletError> {
        let mined = self.mine_on_worker(None).await;
        self.sync()?;
        mined
    }

    /// Wipe stored state, start a fresh genesis chain and a new address.
    pub async fn reset(&mut self) -> Result<(), WalletError> {
        self.state.clear();
        self.cancel.reset();
        let ledger = fresh_ledger(&self.config, self.clock.clone()).await?;
        *self.lock_ledger()? = ledger;
        let address = generate_address(self.clock.as_ref());
        tracing::info!(%address, "wallet reset");
        self.snapshot = WalletSnapshot::empty(address);
        self.sync()?;
        Ok(())
    }

    /// Re-derive the snapshot from the ledger and persist it.
    ///
    /// Persistence failures are logged by the state store and never surface
    /// here; only a poisoned ledger lock does.
    pub fn sync(&mut self) -> Result<&WalletSnapshot, WalletError> {
        let (snapshot, ledger_snapshot) = {
            let ledger = self.lock_ledger()?;
            let snapshot = WalletSnapshot::derive(&ledger, &self.snapshot.address);
            let ledger_snapshot = self.config.persist_ledger.then(|| ledger.snapshot());
            (snapshot, ledger_snapshot)
        };

        self.snapshot = snapshot;
        self.state.save_wallet(&self.snapshot);
        if let Some(ledger_snapshot) = ledger_snapshot {
            self.state.save_ledger(&ledger_snapshot);
        }
        tracing::debug!(
            address = %self.snapshot.address,
            balance = self.snapshot.balance,
            transactions = self.snapshot.transactions.len(),
            "wallet synced"
        );
        Ok(&self.snapshot)
    }

    /// Mine (or confirm `offline` and mine) on the blocking pool.
    async fn mine_on_worker(&self, offline: Option<TxId>) -> Result<Option<Block>, WalletError> {
        let ledger = self.ledger.clone();
        let miner = self.address().clone();
        let cancel = self.cancel.clone();

        tokio::task::spawn_blocking(move || {
            let mut ledger = ledger.lock().map_err(|_| WalletError::LedgerPoisoned)?;
            let mined = match offline {
                Some(id) => ledger.confirm_offline_transaction_with(&id, &miner, &cancel),
                None => ledger.mine_pending_transactions_with(&miner, &cancel),
            };
            cancel.reset();
            mined.map_err(WalletError::from)
        })
        .await
        .map_err(|e| WalletError::Worker(e.to_string()))?
    }

    fn lock_ledger(&self) -> Result<MutexGuard<'_, Ledger>, WalletError> {
        self.ledger.lock().map_err(|_| WalletError::LedgerPoisoned)
    }
}

async fn fresh_ledger(config: &WalletConfig, clock: Arc<dyn Clock>) -> Result<Ledger, WalletError> {
    let ledger_config = config.ledger.clone();
    let ledger = tokio::task::spawn_blocking(move || Ledger::new(ledger_config, clock))
        .await
        .map_err(|e| WalletError::Worker(e.to_string()))?;
    Ok(ledger?)
}
