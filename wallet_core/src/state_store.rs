//! Encrypted, versioned persistence of wallet and ledger snapshots.
//!
//! Each snapshot is JSON-encoded, sealed with AES-256-GCM and wrapped in a
//! JSON envelope `{ "version": 1, "payload": "<hex>" }` before being written
//! to the key/value store. The store itself only ever sees opaque bytes.
//!
//! Save and clear failures are logged and swallowed: in-memory state stays
//! authoritative and callers carry on as if the write had not happened.
//! Load failures are logged and reported as "nothing stored".

use chainwallet_crypto::StateCipher;
use chainwallet_ledger::LedgerSnapshot;
use chainwallet_store::KvStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{WalletError, WalletSnapshot};

/// Current on-disk format version.
pub const STATE_FORMAT_VERSION: u32 = 1;

pub const WALLET_KEY: &str = "chainwallet.wallet";
pub const VERSION_KEY: &str = "chainwallet.version";
pub const LEDGER_KEY: &str = "chainwallet.ledger";

/// The persisted wrapper around one encrypted snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEnvelope {
    pub version: u32,
    /// Hex-encoded `nonce || ciphertext`.
    pub payload: String,
}

/// A loaded value plus whether it was written by a different format version.
///
/// No migrations exist yet; a mismatched payload is returned as decrypted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loaded<T> {
    pub value: T,
    pub migration_needed: bool,
}

pub struct SecureStateStore<S> {
    store: S,
    cipher: StateCipher,
}

impl<S: KvStore> SecureStateStore<S> {
    pub fn new(store: S, cipher: StateCipher) -> Self {
        Self { store, cipher }
    }

    /// Derive the encryption key from `secret` (Argon2id, fixed app salt).
    pub fn with_secret(store: S, secret: &str) -> Result<Self, WalletError> {
        Ok(Self::new(store, StateCipher::from_passphrase(secret)?))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist the wallet snapshot and the format version.
    pub fn save_wallet(&self, snapshot: &WalletSnapshot) {
        let result = self.seal(snapshot).and_then(|bytes| {
            self.store.put(WALLET_KEY, &bytes)?;
            self.store
                .put(VERSION_KEY, STATE_FORMAT_VERSION.to_string().as_bytes())?;
            Ok(())
        });
        match result {
            Ok(()) => tracing::debug!(address = %snapshot.address, "wallet saved"),
            Err(e) => tracing::error!(error = %e, "failed to save wallet"),
        }
    }

    pub fn load_wallet(&self) -> Option<Loaded<WalletSnapshot>> {
        let stored_version = self.stored_version();
        let loaded = self.load(WALLET_KEY, "wallet")?;
        Some(Loaded {
            migration_needed: loaded.migration_needed
                || stored_version != Some(STATE_FORMAT_VERSION),
            value: loaded.value,
        })
    }

    pub fn save_ledger(&self, snapshot: &LedgerSnapshot) {
        let result = self
            .seal(snapshot)
            .and_then(|bytes| Ok(self.store.put(LEDGER_KEY, &bytes)?));
        match result {
            Ok(()) => tracing::debug!(blocks = snapshot.blocks.len(), "ledger saved"),
            Err(e) => tracing::error!(error = %e, "failed to save ledger"),
        }
    }

    pub fn load_ledger(&self) -> Option<Loaded<LedgerSnapshot>> {
        self.load(LEDGER_KEY, "ledger")
    }

    /// Remove every persisted key.
    pub fn clear(&self) {
        for key in [WALLET_KEY, VERSION_KEY, LEDGER_KEY] {
            if let Err(e) = self.store.delete(key) {
                tracing::error!(key, error = %e, "failed to clear stored state");
            }
        }
        tracing::info!("stored wallet and ledger cleared");
    }

    fn seal<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, WalletError> {
        let plaintext =
            serde_json::to_vec(value).map_err(|e| WalletError::Serialization(e.to_string()))?;
        let envelope = StateEnvelope {
            version: STATE_FORMAT_VERSION,
            payload: hex::encode(self.cipher.encrypt(&plaintext)?),
        };
        serde_json::to_vec(&envelope).map_err(|e| WalletError::Serialization(e.to_string()))
    }

    fn open<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Loaded<T>, WalletError> {
        let envelope: StateEnvelope =
            serde_json::from_slice(bytes).map_err(|e| WalletError::Serialization(e.to_string()))?;
        let sealed =
            hex::decode(&envelope.payload).map_err(|e| WalletError::Serialization(e.to_string()))?;
        let plaintext = self.cipher.decrypt(&sealed)?;
        let value =
            serde_json::from_slice(&plaintext).map_err(|e| WalletError::Serialization(e.to_string()))?;
        Ok(Loaded {
            value,
            migration_needed: envelope.version != STATE_FORMAT_VERSION,
        })
    }

    fn load<T: DeserializeOwned>(&self, key: &str, what: &str) -> Option<Loaded<T>> {
        let bytes = match self.store.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                tracing::debug!(what, "nothing stored");
                return None;
            }
            Err(e) => {
                tracing::error!(what, error = %e, "failed to read stored state");
                return None;
            }
        };
        match self.open(&bytes) {
            Ok(loaded) => {
                if loaded.migration_needed {
                    tracing::warn!(what, expected = STATE_FORMAT_VERSION, "stored state version mismatch");
                }
                Some(loaded)
            }
            Err(e) => {
                tracing::error!(what, error = %e, "failed to decrypt stored state");
                None
            }
        }
    }

    fn stored_version(&self) -> Option<u32> {
        self.store
            .get(VERSION_KEY)
            .ok()
            .flatten()
            .and_then(|bytes| String::from_utf8(bytes).ok())
            .and_then(|s| s.trim().parse().ok())
    }
}
