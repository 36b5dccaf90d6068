//! Transaction status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a transaction is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TxStatus {
    Pending,
    PendingOffline,
    Confirmed,
    Failed,
    DoubleSpent,
}

impl TxStatus {
    /// No transition leaves a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed | Self::DoubleSpent)
    }

    /// Failed entries stay in history for audit but never move funds.
    /// Double-spent entries are only flagged; once sealed they count like
    /// any other transfer.
    pub fn moves_funds(&self) -> bool {
        !matches!(self, Self::Failed)
    }

    /// Whether `self -> next` is a legal lifecycle step.
    ///
    /// `pending-offline -> pending` is the confirmation hand-off: the entry
    /// rejoins the online path so the next mine promotes it.
    pub fn can_transition_to(&self, next: TxStatus) -> bool {
        use TxStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed | Failed | DoubleSpent)
                | (PendingOffline, Pending | Confirmed | Failed | DoubleSpent)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PendingOffline => "pending-offline",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
            Self::DoubleSpent => "double-spent",
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TxStatus; 5] = [
        TxStatus::Pending,
        TxStatus::PendingOffline,
        TxStatus::Confirmed,
        TxStatus::Failed,
        TxStatus::DoubleSpent,
    ];

    #[test]
    fn terminal_states_have_no_exits() {
        for from in ALL.iter().filter(|s| s.is_terminal()) {
            for to in ALL {
                assert!(!from.can_transition_to(to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn online_path() {
        assert!(TxStatus::Pending.can_transition_to(TxStatus::Confirmed));
        assert!(TxStatus::Pending.can_transition_to(TxStatus::DoubleSpent));
        assert!(!TxStatus::Pending.can_transition_to(TxStatus::PendingOffline));
        assert!(!TxStatus::Pending.can_transition_to(TxStatus::Pending));
    }

    #[test]
    fn offline_path() {
        assert!(TxStatus::PendingOffline.can_transition_to(TxStatus::Pending));
        assert!(TxStatus::PendingOffline.can_transition_to(TxStatus::DoubleSpent));
        assert!(TxStatus::PendingOffline.can_transition_to(TxStatus::Failed));
    }

    #[test]
    fn only_failed_entries_hold_funds_back() {
        assert!(TxStatus::Confirmed.moves_funds());
        assert!(TxStatus::Pending.moves_funds());
        assert!(!TxStatus::Failed.moves_funds());
        assert!(TxStatus::DoubleSpent.moves_funds());
    }

    #[test]
    fn serde_names_are_kebab_case() {
        for status in ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: TxStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }
}
