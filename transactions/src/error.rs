use chainwallet_types::TxId;
use thiserror::Error;

use crate::TxStatus;

/// A malformed transfer. Always recoverable: reject the input, leave the
/// ledger alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("transaction is missing its {0} address")]
    MissingParty(&'static str),

    #[error("amount must be positive")]
    ZeroAmount,

    #[error("sender and receiver must differ: {0}")]
    SelfTransfer(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("transaction {id} cannot move from {from} to {to}")]
    IllegalTransition { id: TxId, from: TxStatus, to: TxStatus },
}
