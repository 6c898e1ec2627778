//! Property tests for the token codec and active-set serialization.
//!
//! 1. `decode(encode(s)) == s` for arbitrary Unicode text.
//! 2. Encoded tokens only contain path-segment-safe characters.
//! 3. Decoding arbitrary input never panics.
//! 4. Active-set serialization is stable under re-parsing.

use livepane_core::codec::{decode, encode};
use livepane_core::{ActiveSet, PaneId};
use proptest::prelude::*;

fn is_path_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '=')
}

proptest! {
    #[test]
    fn round_trip_any_text(text in any::<String>()) {
        prop_assert_eq!(decode(&encode(&text)).unwrap(), text);
    }

    #[test]
    fn round_trip_printable(text in "\\PC*") {
        prop_assert_eq!(decode(&encode(&text)).unwrap(), text);
    }

    #[test]
    fn tokens_are_path_safe(text in any::<String>()) {
        let token = encode(&text);
        prop_assert!(token.chars().all(is_path_safe), "unsafe token: {token}");
    }

    #[test]
    fn decode_never_panics(token in ".{0,64}") {
        let _ = decode(&token);
    }

    #[test]
    fn active_set_serialization_is_stable(raw in proptest::collection::vec(1u32..=13, 1..8)) {
        let set = ActiveSet::from_ids(raw.iter().filter_map(|&r| PaneId::new(r).ok()));
        let text = set.serialize();
        prop_assert_eq!(ActiveSet::parse(&text), Some(set));
        prop_assert_eq!(ActiveSet::parse(&text).unwrap().serialize(), text);
    }

    #[test]
    fn active_set_is_standard_subset_or_custom_singleton(
        raw in proptest::collection::vec(1u32..=13, 0..8)
    ) {
        let set = ActiveSet::from_ids(raw.iter().filter_map(|&r| PaneId::new(r).ok()));
        if set.is_custom_mode() {
            prop_assert_eq!(set.len(), 1);
        } else {
            prop_assert!(set.iter().all(PaneId::is_standard));
        }
    }
}
