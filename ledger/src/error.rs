use chainwallet_transactions::{TransactionError, TxStatus, ValidationError};
use chainwallet_types::TxId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error("transaction {0} is not in the pending pool")]
    UnknownTransaction(TxId),

    #[error("transaction {0} is already on the ledger")]
    DuplicateTransaction(TxId),

    #[error("transaction {id} with status {status} cannot be admitted")]
    NotAdmissible { id: TxId, status: TxStatus },

    #[error("sealing failed: {0}")]
    Sealing(#[from] chainwallet_work::WorkError),

    #[error("block encoding failed: {0}")]
    Encoding(#[from] chainwallet_crypto::CryptoError),

    #[error("invalid ledger snapshot: {0}")]
    InvalidSnapshot(String),
}

impl From<ValidationError> for LedgerError {
    fn from(e: ValidationError) -> Self {
        LedgerError::Transaction(TransactionError::Validation(e))
    }
}
