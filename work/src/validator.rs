//! Seal validation.

use chainwallet_crypto::blake2b_256_multi;

use crate::Difficulty;

/// Digest of a sealing header prefix with `nonce` appended little-endian.
pub fn seal_digest(header_prefix: &[u8], nonce: u64) -> [u8; 32] {
    blake2b_256_multi(&[header_prefix, &nonce.to_le_bytes()])
}

/// Validate that `nonce` seals `header_prefix` at `difficulty`.
pub fn validate_seal(header_prefix: &[u8], nonce: u64, difficulty: Difficulty) -> bool {
    difficulty.is_met_by(&seal_digest(header_prefix, nonce))
}
