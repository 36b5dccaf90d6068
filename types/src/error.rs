//! Errors raised while constructing fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid wallet address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("invalid hash hex: {0}")]
    InvalidHash(String),

    #[error("invalid transaction id: {0}")]
    InvalidTxId(String),
}
