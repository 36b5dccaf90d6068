//! Wallet address generation.

use chainwallet_crypto::blake2b_256_multi;
use chainwallet_types::{Address, Clock};
use rand::RngCore;

/// Generate a fresh wallet address from the current time and 32 random bytes.
pub fn generate_address(clock: &dyn Clock) -> Address {
    let mut entropy = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut entropy);
    let now = clock.now().as_millis().to_le_bytes();
    Address::from_digest(&blake2b_256_multi(&[&now, &entropy]))
}
