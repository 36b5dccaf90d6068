//! Ledger transfers and their lifecycle.
//!
//! A [`Transaction`] moves an [`Amount`](chainwallet_types::Amount) between two
//! opaque ledger addresses. Its [`TxStatus`] follows a small state machine:
//!
//! - **pending**: admitted on the online path, waiting to be sealed
//! - **pending-offline**: admitted on the deferred path, waiting for explicit
//!   confirmation or invalidation
//! - **confirmed**, **failed**, **double-spent**: terminal
//!
//! Stateless checks (parties present, positive amount, no self-transfer) live
//! in [`validation`]. Stateful checks (sealed balance, conflicting pool
//! entries) belong to the ledger.

pub mod error;
pub mod status;
pub mod transaction;
pub mod validation;

pub use error::{TransactionError, ValidationError};
pub use status::TxStatus;
pub use transaction::{Transaction, TransferRequest};
pub use validation::validate_transfer;
