use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] chainwallet_types::TypesError),

    #[error(transparent)]
    Validation(#[from] chainwallet_transactions::ValidationError),

    #[error("ledger error: {0}")]
    Ledger(#[from] chainwallet_ledger::LedgerError),

    #[error("storage error: {0}")]
    Store(#[from] chainwallet_store::StoreError),

    #[error("crypto error: {0}")]
    Crypto(#[from] chainwallet_crypto::CryptoError),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("ledger lock poisoned")]
    LedgerPoisoned,

    #[error("mining worker failed: {0}")]
    Worker(String),
}
