//! Ledger parameters.

use chainwallet_types::Amount;
use chainwallet_work::Difficulty;
use serde::{Deserialize, Serialize};

fn default_mining_reward() -> Amount {
    Amount::new(10)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Leading zero hex characters every block hash must have.
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Amount credited to the miner after each sealed block.
    #[serde(default = "default_mining_reward")]
    pub mining_reward: Amount,

    /// Give up sealing after this many nonces. `None` searches until found.
    #[serde(default)]
    pub max_seal_attempts: Option<u64>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            mining_reward: default_mining_reward(),
            max_seal_attempts: None,
        }
    }
}
