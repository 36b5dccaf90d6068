//! Blake2b content hashing.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use chainwallet_types::BlockHash;
use serde::Serialize;

use crate::CryptoError;

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Canonical byte encoding of a value: bincode with fixed-width little-endian
/// integers, fields in declaration order.
pub fn canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CryptoError> {
    bincode::serialize(value).map_err(|e| CryptoError::Encoding(e.to_string()))
}

/// Deterministic content hash of structured data.
pub fn hash_value<T: Serialize + ?Sized>(value: &T) -> Result<BlockHash, CryptoError> {
    let bytes = canonical_bytes(value)?;
    Ok(BlockHash::new(blake2b_256(&bytes)))
}
