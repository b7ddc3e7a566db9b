//! Prefix-of-key iteration checked against brute-force enumeration.

use paste::paste;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use triemap::{Fast, Medium, SizePolicy, Small, TrieMap};

const WORDS: &[&[u8]] = &[
    b"",
    b"A",
    b"ABSENTEEISM",
    b"ABSENTED",
    b"ABSENTMIND",
    b"ABSENTS",
    b"ABSTRACTIONISTS",
    b"ABSTRACTIONISTXY",
    b"ANTENNA",
];

const QUERIES: &[&[u8]] = &[
    b"ABSENTEEISM",
    b"ABSENTEEISMX",
    b"ABSTRACTIONISTXY",
    b"ANTENNA",
    b"ABSENTMIND",
    b"ABSENTS",
    b"ABSENTED",
    b"ABSTRACTIONISTS",
    b"ABSTRACTIONIST",
    b"AN",
    b"",
    b"ZEBRA",
];

fn word_map<P: SizePolicy>() -> TrieMap<usize, P> {
    WORDS
        .iter()
        .enumerate()
        .map(|(i, w)| (w.to_vec(), i))
        .collect()
}

/// All prefixes of `query` present in `keys`, shortest first.
fn expected_prefixes(query: &[u8], keys: &BTreeSet<Vec<u8>>) -> Vec<Vec<u8>> {
    (0..=query.len())
        .map(|len| query[..len].to_vec())
        .filter(|prefix| keys.contains(prefix))
        .collect()
}

fn prefixes_match_brute_force<P: SizePolicy>() {
    let map = word_map::<P>();
    let keys: BTreeSet<Vec<u8>> = WORDS.iter().map(|w| w.to_vec()).collect();

    for query in QUERIES {
        let expected = expected_prefixes(query, &keys);
        let found: Vec<Vec<u8>> = map.prefix_items(query).map(|(k, _)| k).collect();
        assert_eq!(found, expected, "prefixes of {:?}", query);

        // Values ride along with the right keys
        for (key, value) in map.prefix_items(query) {
            assert_eq!(map.get(&key), Some(value));
        }

        // Reverse iteration is the same sequence, longest first
        let mut reversed = expected.clone();
        reversed.reverse();
        let found_rev: Vec<Vec<u8>> = map.prefix_items_rev(query).map(|(k, _)| k).collect();
        assert_eq!(found_rev, reversed, "reverse prefixes of {:?}", query);
    }
}

fn prefixes_after_erasures<P: SizePolicy>() {
    let mut map = word_map::<P>();
    let mut keys: BTreeSet<Vec<u8>> = WORDS.iter().map(|w| w.to_vec()).collect();

    // Remove a few keys so prefix walks cross re-compressed paths
    for gone in [&b""[..], b"ABSENTED", b"ABSTRACTIONISTS"] {
        assert_eq!(map.erase(gone), 1);
        keys.remove(gone);
        assert!(map.check_invariants());

        for query in QUERIES {
            let expected = expected_prefixes(query, &keys);
            let found: Vec<Vec<u8>> = map.prefix_items(query).map(|(k, _)| k).collect();
            assert_eq!(found, expected, "prefixes of {:?} after erasures", query);
        }
    }
}

fn random_prefixes_match_brute_force<P: SizePolicy>() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut map: TrieMap<u32, P> = TrieMap::new();
    let mut keys = BTreeSet::new();

    for _ in 0..800 {
        let len = rng.gen_range(0..10);
        let key: Vec<u8> = (0..len).map(|_| rng.gen_range(b'a'..=b'd')).collect();
        map.insert(&key, len as u32);
        keys.insert(key);
    }

    for _ in 0..2_000 {
        let len = rng.gen_range(0..14);
        let query: Vec<u8> = (0..len).map(|_| rng.gen_range(b'a'..=b'd')).collect();
        let expected = expected_prefixes(&query, &keys);
        let found: Vec<Vec<u8>> = map.prefix_items(&query).map(|(k, _)| k).collect();
        assert_eq!(found, expected, "prefixes of {:?}", query);
    }
}

macro_rules! policy_suite {
    ($policy:ty, $label:ident) => {
        paste! {
            #[test]
            fn [<test_prefixes_match_brute_force_ $label>]() {
                prefixes_match_brute_force::<$policy>();
            }

            #[test]
            fn [<test_prefixes_after_erasures_ $label>]() {
                prefixes_after_erasures::<$policy>();
            }

            #[test]
            fn [<test_random_prefixes_ $label>]() {
                random_prefixes_match_brute_force::<$policy>();
            }
        }
    };
}

policy_suite!(Small, small);
policy_suite!(Medium, medium);
policy_suite!(Fast, fast);
