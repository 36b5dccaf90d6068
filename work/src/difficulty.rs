//! The sealing difficulty predicate.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::WorkError;

/// Number of leading zero hex characters a block hash must have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    /// A 32-byte digest has 64 hex characters.
    pub const MAX: u8 = 64;

    pub fn new(zeros: u8) -> Result<Self, WorkError> {
        if zeros > Self::MAX {
            return Err(WorkError::DifficultyOutOfRange(zeros));
        }
        Ok(Self(zeros))
    }

    pub fn zeros(&self) -> u8 {
        self.0
    }

    /// Whether `digest` rendered as hex begins with at least `zeros` `0` characters.
    pub fn is_met_by(&self, digest: &[u8; 32]) -> bool {
        let full_bytes = usize::from(self.0 / 2);
        if digest[..full_bytes].iter().any(|b| *b != 0) {
            return false;
        }
        self.0 % 2 == 0 || digest[full_bytes] >> 4 == 0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = WorkError;

    fn try_from(zeros: u8) -> Result<Self, Self::Error> {
        Self::new(zeros)
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
