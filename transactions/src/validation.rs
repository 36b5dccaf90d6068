//! Stateless transfer validation.
//!
//! The ledger re-runs these checks on admission and never trusts callers to
//! have done so.

use chainwallet_types::{Address, Amount};

use crate::ValidationError;

/// Validate the parties and amount of a transfer.
pub fn validate_transfer(
    from: &Address,
    to: &Address,
    amount: Amount,
) -> Result<(), ValidationError> {
    if from.is_empty() {
        return Err(ValidationError::MissingParty("sender"));
    }
    if to.is_empty() {
        return Err(ValidationError::MissingParty("receiver"));
    }
    if amount.is_zero() {
        return Err(ValidationError::ZeroAmount);
    }
    if from == to {
        return Err(ValidationError::SelfTransfer(from.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::new(s)
    }

    #[test]
    fn accepts_well_formed_transfer() {
        assert_eq!(
            validate_transfer(&addr("0xaaaa"), &addr("0xbbbb"), Amount::new(1)),
            Ok(())
        );
    }

    #[test]
    fn rejects_missing_sender() {
        assert_eq!(
            validate_transfer(&addr(""), &addr("0xbbbb"), Amount::new(1)),
            Err(ValidationError::MissingParty("sender"))
        );
    }

    #[test]
    fn rejects_missing_receiver() {
        assert_eq!(
            validate_transfer(&addr("0xaaaa"), &addr(""), Amount::new(1)),
            Err(ValidationError::MissingParty("receiver"))
        );
    }

    #[test]
    fn rejects_zero_amount() {
        assert_eq!(
            validate_transfer(&addr("0xaaaa"), &addr("0xbbbb"), Amount::ZERO),
            Err(ValidationError::ZeroAmount)
        );
    }

    #[test]
    fn rejects_self_transfer() {
        assert!(matches!(
            validate_transfer(&addr("0xaaaa"), &addr("0xaaaa"), Amount::new(5)),
            Err(ValidationError::SelfTransfer(_))
        ));
    }

    #[test]
    fn system_parties_are_legal() {
        assert!(validate_transfer(&Address::system(), &addr("0xaaaa"), Amount::new(10)).is_ok());
    }
}
