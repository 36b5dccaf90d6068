use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkError {
    #[error("difficulty {0} out of range (max 64 hex zeros)")]
    DifficultyOutOfRange(u8),

    #[error("sealing gave up after {attempts} attempts")]
    SealingTimeout { attempts: u64 },

    #[error("sealing cancelled")]
    Cancelled,
}
