//! Symmetric encryption for persisted state blobs.
//!
//! 1. Argon2id derives a 32-byte key from the application secret and a fixed
//!    application salt (the key must be reproducible across restarts)
//! 2. AES-256-GCM encrypts each blob under a fresh random nonce
//! 3. The output is `nonce || ciphertext || tag`

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use std::fmt;
use zeroize::Zeroizing;

use crate::CryptoError;

const ARGON2_MEMORY_KIB: u32 = 19_456;
const ARGON2_ITERATIONS: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;
const KEY_LEN: usize = 32;

/// AES-GCM nonce length in bytes (96 bits).
const NONCE_LEN: usize = 12;

const APP_SALT: &[u8] = b"chainwallet/state-store/v1";

/// Encrypts and decrypts opaque state blobs under one symmetric key.
#[derive(Clone)]
pub struct StateCipher {
    key: Zeroizing<[u8; KEY_LEN]>,
}

impl StateCipher {
    /// Use an already-derived 32-byte key.
    pub fn from_key(key: [u8; KEY_LEN]) -> Self {
        Self {
            key: Zeroizing::new(key),
        }
    }

    /// Derive the key from a passphrase with Argon2id.
    pub fn from_passphrase(passphrase: &str) -> Result<Self, CryptoError> {
        let params = Params::new(
            ARGON2_MEMORY_KIB,
            ARGON2_ITERATIONS,
            ARGON2_PARALLELISM,
            Some(KEY_LEN),
        )
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        argon2
            .hash_password_into(passphrase.as_bytes(), APP_SALT, &mut key[..])
            .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

        Ok(Self { key })
    }

    /// Encrypt `plaintext`, returning `nonce || ciphertext`.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let cipher = Aes256Gcm::new_from_slice(&self.key[..])
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        out.extend_from_slice(&nonce_bytes);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }

    /// Decrypt a blob produced by [`StateCipher::encrypt`].
    pub fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if sealed.len() < NONCE_LEN {
            return Err(CryptoError::Truncated(sealed.len()));
        }
        let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_LEN);

        let cipher = Aes256Gcm::new_from_slice(&self.key[..])
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| CryptoError::Decryption)
    }
}

impl fmt::Debug for StateCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCipher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let cipher = StateCipher::from_key([7u8; 32]);
        let sealed = cipher.encrypt(b"{\"balance\":10}").unwrap();
        assert_ne!(&sealed[NONCE_LEN..], b"{\"balance\":10}".as_slice());
        assert_eq!(cipher.decrypt(&sealed).unwrap(), b"{\"balance\":10}");
    }

    #[test]
    fn fresh_nonce_per_encryption() {
        let cipher = StateCipher::from_key([7u8; 32]);
        let a = cipher.encrypt(b"same").unwrap();
        let b = cipher.encrypt(b"same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let sealed = StateCipher::from_key([1u8; 32]).encrypt(b"secret").unwrap();
        let result = StateCipher::from_key([2u8; 32]).decrypt(&sealed);
        assert!(matches!(result, Err(CryptoError::Decryption)));
    }

    #[test]
    fn tampered_ciphertext_fails_authentication() {
        let cipher = StateCipher::from_key([1u8; 32]);
        let mut sealed = cipher.encrypt(b"secret").unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0xFF;
        assert!(cipher.decrypt(&sealed).is_err());
    }

    #[test]
    fn truncated_input_rejected() {
        let cipher = StateCipher::from_key([1u8; 32]);
        assert!(matches!(cipher.decrypt(&[0u8; 4]), Err(CryptoError::Truncated(4))));
    }

    #[test]
    fn passphrase_derivation_is_reproducible() {
        let sealed = StateCipher::from_passphrase("demo-secret")
            .unwrap()
            .encrypt(b"payload")
            .unwrap();
        let reopened = StateCipher::from_passphrase("demo-secret").unwrap();
        assert_eq!(reopened.decrypt(&sealed).unwrap(), b"payload");

        let other = StateCipher::from_passphrase("other-secret").unwrap();
        assert!(other.decrypt(&sealed).is_err());
    }
}
