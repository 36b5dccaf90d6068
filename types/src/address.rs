//! Ledger addresses.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::TypesError;

/// A ledger party.
///
/// The ledger treats addresses as opaque strings: `system` (mining rewards)
/// and `network` (genesis) are legal parties alongside wallet addresses.
/// Wallet addresses are `0x` followed by [`Address::WALLET_HEX_LEN`] lowercase
/// hex characters and are validated with [`Address::parse_wallet`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// The standard prefix for wallet addresses.
    pub const WALLET_PREFIX: &'static str = "0x";

    /// Number of hex characters after the prefix.
    pub const WALLET_HEX_LEN: usize = 16;

    const SYSTEM: &'static str = "system";
    const NETWORK: &'static str = "network";

    /// Wrap a raw string without format checks.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Source of mining rewards and of the genesis transaction.
    pub fn system() -> Self {
        Self::new(Self::SYSTEM)
    }

    /// Recipient of the genesis transaction.
    pub fn network() -> Self {
        Self::new(Self::NETWORK)
    }

    /// Parse and validate a wallet address (e.g. one read from a QR code).
    ///
    /// Surrounding whitespace is trimmed and upper-case hex is normalised.
    pub fn parse_wallet(raw: &str) -> Result<Self, TypesError> {
        let trimmed = raw.trim();
        let invalid = |reason: &str| TypesError::InvalidAddress {
            address: raw.to_string(),
            reason: reason.to_string(),
        };

        let fragment = trimmed
            .strip_prefix(Self::WALLET_PREFIX)
            .ok_or_else(|| invalid("missing 0x prefix"))?;
        if fragment.len() != Self::WALLET_HEX_LEN {
            return Err(invalid(&format!(
                "expected {} hex characters, found {}",
                Self::WALLET_HEX_LEN,
                fragment.len()
            )));
        }
        if !fragment.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid("non-hex character"));
        }

        Ok(Self(format!(
            "{}{}",
            Self::WALLET_PREFIX,
            fragment.to_ascii_lowercase()
        )))
    }

    /// Build a wallet address from the leading bytes of a digest.
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        let fragment = hex::encode(&digest[..Self::WALLET_HEX_LEN / 2]);
        Self(format!("{}{}", Self::WALLET_PREFIX, fragment))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Whether this address has the wallet format.
    pub fn is_wallet(&self) -> bool {
        Self::parse_wallet(&self.0).is_ok_and(|parsed| parsed.0 == self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
