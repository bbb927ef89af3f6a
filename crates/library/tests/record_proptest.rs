//! Property-based tests for descriptor decoding and catalog capping.
//! Verifies invariants hold for ALL inputs, not just fixed examples.

// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)]

use library::{decode, Catalog, DecodeError, Tier, FORMAT_VERSION};
use proptest::prelude::*;

fn any_tier() -> impl Strategy<Value = Tier> {
    proptest::sample::select(Tier::ALL.to_vec())
}

proptest! {
    /// decode never panics, whatever the bytes.
    #[test]
    fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..200), tier in any_tier()) {
        let _ = decode(&bytes, tier);
    }

    /// Anything shorter than the declared size is Truncated, before magic is looked at.
    #[test]
    fn short_input_is_truncated(tier in any_tier(), len in 0usize..64) {
        let bytes = vec![0xAAu8; len.min(tier.size() - 1)];
        prop_assert_eq!(decode(&bytes, tier), Err(DecodeError::Truncated));
    }

    /// A full-length buffer with the wrong tag is BadMagic.
    #[test]
    fn wrong_magic_is_rejected(tier in any_tier(), tag in any::<[u8; 4]>()) {
        prop_assume!(&tag != tier.magic());
        let mut bytes = vec![0u8; tier.size()];
        bytes[0..4].copy_from_slice(&tag);
        prop_assert_eq!(decode(&bytes, tier), Err(DecodeError::BadMagic));
    }

    /// Valid header plus arbitrary body always decodes, and labels are valid text
    /// no longer than their field.
    #[test]
    fn valid_header_always_decodes(tier in any_tier(), body in proptest::collection::vec(any::<u8>(), 128)) {
        let mut bytes = body[..tier.size()].to_vec();
        bytes[0..4].copy_from_slice(tier.magic());
        if tier.has_version() {
            bytes[4] = FORMAT_VERSION;
        }
        let rec = decode(&bytes, tier).unwrap();
        prop_assert_eq!(rec.tier(), tier);
        prop_assert!(rec.label().len() <= 48);
        prop_assert!(!rec.label().contains('\0'));
    }

    /// Any version other than 1 is rejected on versioned tiers only.
    #[test]
    fn version_checked_only_where_present(tier in any_tier(), version in 2u8..=255) {
        let mut bytes = vec![0u8; tier.size()];
        bytes[0..4].copy_from_slice(tier.magic());
        bytes[4] = version;
        let result = decode(&bytes, tier);
        if tier.has_version() {
            prop_assert_eq!(result, Err(DecodeError::UnsupportedVersion));
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// A capped catalog equals the smallest `limit` names, whatever the insert order.
    #[test]
    fn catalog_keeps_smallest_names(
        names in proptest::collection::btree_set("[A-Za-z0-9]{1,12}", 0..60),
        limit in 1usize..30,
        seed in any::<u64>(),
    ) {
        let mut shuffled: Vec<_> = names.iter().cloned().collect();
        // Deterministic shuffle from the seed.
        let n = shuffled.len();
        let mut state = seed | 1;
        for i in (1..n).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let j = (state % (i as u64 + 1)) as usize;
            shuffled.swap(i, j);
        }
        let mut cat: Catalog = Catalog::with_limit(limit);
        for name in &shuffled {
            cat.insert(name);
        }
        let expected: Vec<_> = names.iter().take(limit).map(String::as_str).collect();
        prop_assert_eq!(cat.iter().collect::<Vec<_>>(), expected);
        prop_assert_eq!(cat.truncated(), names.len() > limit);
    }
}
