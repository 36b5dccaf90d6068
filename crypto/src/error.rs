use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("canonical encoding failed: {0}")]
    Encoding(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    #[error("decryption failed: wrong key or corrupted data")]
    Decryption,

    #[error("ciphertext too short: {0} bytes")]
    Truncated(usize),
}
