use proptest::prelude::*;

use chainwallet_types::{Address, BlockHash, Timestamp};

proptest! {
    /// Leading-zero nibble count agrees with the hex rendering.
    #[test]
    fn leading_zero_nibbles_match_hex(bytes in prop::array::uniform32(0u8..)) {
        let hash = BlockHash::new(bytes);
        let expected = hash.to_hex().chars().take_while(|c| *c == '0').count() as u32;
        prop_assert_eq!(hash.leading_zero_nibbles(), expected);
    }

    /// BlockHash::is_zero is true only for all-zero bytes.
    #[test]
    fn block_hash_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let hash = BlockHash::new(bytes);
        prop_assert_eq!(hash.is_zero(), bytes == [0u8; 32]);
    }

    /// Hex rendering parses back to the same hash.
    #[test]
    fn block_hash_hex_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = BlockHash::new(bytes);
        let parsed: BlockHash = hash.to_hex().parse().unwrap();
        prop_assert_eq!(parsed, hash);
    }

    /// Addresses derived from any digest are valid wallet addresses.
    #[test]
    fn digest_addresses_are_wallets(bytes in prop::array::uniform32(0u8..)) {
        let addr = Address::from_digest(&bytes);
        prop_assert!(addr.is_wallet());
        prop_assert_eq!(Address::parse_wallet(addr.as_str()).unwrap(), addr);
    }

    /// Strings without the 0x prefix never parse as wallet addresses.
    #[test]
    fn unprefixed_strings_rejected(s in "[a-f0-9]{16}") {
        prop_assert!(Address::parse_wallet(&s).is_err());
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }
}
