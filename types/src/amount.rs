//! Transfer amounts and derived balances.
//!
//! Amounts are unsigned raw units (u64) to avoid floating-point errors.
//! Balances are derived by replaying signed credits and debits, so they are
//! signed and wide enough that no realistic chain can overflow them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A signed balance derived from sealed history.
pub type Balance = i128;

/// A transfer amount in raw units.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The amount as a signed balance delta.
    pub fn as_balance(&self) -> Balance {
        Balance::from(self.0)
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl From<u64> for Amount {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_zero() {
        assert!(Amount::ZERO.is_zero());
        assert!(!Amount::new(1).is_zero());
    }

    #[test]
    fn as_balance_preserves_max() {
        assert_eq!(Amount::new(u64::MAX).as_balance(), u64::MAX as i128);
    }

    #[test]
    fn checked_add_detects_overflow() {
        assert_eq!(Amount::new(2).checked_add(Amount::new(3)), Some(Amount::new(5)));
        assert_eq!(Amount::new(u64::MAX).checked_add(Amount::new(1)), None);
    }
}
