//! The transaction record and its factory.

use chainwallet_types::{Address, Amount, Balance, Clock, Timestamp, TxId};
use serde::{Deserialize, Serialize};

use crate::{validate_transfer, TransactionError, TxStatus, ValidationError};

/// A caller's request to move funds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferRequest {
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
}

impl TransferRequest {
    pub fn new(from: Address, to: Address, amount: Amount) -> Self {
        Self { from, to, amount }
    }
}

/// A ledger transfer.
///
/// Field order is part of the block hash encoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
    pub status: TxStatus,
    pub timestamp: Timestamp,
}

impl Transaction {
    /// Build an unsealed `pending` transaction (online path).
    pub fn create(request: TransferRequest, clock: &dyn Clock) -> Result<Self, ValidationError> {
        Self::with_status(request, TxStatus::Pending, clock)
    }

    /// Build an unsealed `pending-offline` transaction (deferred path).
    pub fn create_offline(
        request: TransferRequest,
        clock: &dyn Clock,
    ) -> Result<Self, ValidationError> {
        Self::with_status(request, TxStatus::PendingOffline, clock)
    }

    fn with_status(
        request: TransferRequest,
        status: TxStatus,
        clock: &dyn Clock,
    ) -> Result<Self, ValidationError> {
        validate_transfer(&request.from, &request.to, request.amount)?;
        Ok(Self {
            id: TxId::generate(),
            from: request.from,
            to: request.to,
            amount: request.amount,
            status,
            timestamp: clock.now(),
        })
    }

    /// A mining reward: `system -> miner`, already confirmed.
    pub fn reward(miner: Address, amount: Amount, clock: &dyn Clock) -> Self {
        Self {
            id: TxId::generate(),
            from: Address::system(),
            to: miner,
            amount,
            status: TxStatus::Confirmed,
            timestamp: clock.now(),
        }
    }

    /// Re-run stateless validation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_transfer(&self.from, &self.to, self.amount)
    }

    pub fn touches(&self, address: &Address) -> bool {
        &self.from == address || &self.to == address
    }

    /// Signed effect of this transaction on `address`, ignoring status.
    pub fn net_effect_on(&self, address: &Address) -> Balance {
        let mut delta = 0;
        if &self.from == address {
            delta -= self.amount.as_balance();
        }
        if &self.to == address {
            delta += self.amount.as_balance();
        }
        delta
    }

    /// Move to `next`, enforcing the lifecycle rules.
    pub fn transition_to(&mut self, next: TxStatus) -> Result<(), TransactionError> {
        if !self.status.can_transition_to(next) {
            return Err(TransactionError::IllegalTransition {
                id: self.id,
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
