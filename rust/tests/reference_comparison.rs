//! Behavioral comparison against std::collections::BTreeMap.
//!
//! Every observable behavior of the trie (iteration order, lookup
//! outcomes, bounds, erase results) is checked against an ordered
//! reference map over the same operation sequence, for each size policy.

use paste::paste;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use triemap::{Fast, Medium, SizePolicy, Small, TrieMap};

/// Random word over a 28-letter alphabet ('@' through '[').
fn random_word(rng: &mut StdRng, max_len: usize) -> Vec<u8> {
    let len = rng.gen_range(1..=max_len);
    (0..len).map(|_| rng.gen_range(b'@'..b'@' + 28)).collect()
}

fn word_set(seed: u64, count: usize) -> Vec<Vec<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut words: Vec<Vec<u8>> = (0..count).map(|_| random_word(&mut rng, 14)).collect();
    words.sort();
    words.dedup();
    words.shuffle(&mut rng);
    words
}

fn assert_same_entries<V: Copy + std::fmt::Debug + PartialEq, P: SizePolicy>(
    map: &TrieMap<V, P>,
    reference: &BTreeMap<Vec<u8>, V>,
) {
    assert_eq!(map.len(), reference.len());
    let trie_items: Vec<(Vec<u8>, V)> = map.items().map(|(k, v)| (k, *v)).collect();
    let ref_items: Vec<(Vec<u8>, V)> = reference.iter().map(|(k, v)| (k.clone(), *v)).collect();
    assert_eq!(trie_items, ref_items);

    let mut trie_rev: Vec<Vec<u8>> = map.items_rev().map(|(k, _)| k).collect();
    trie_rev.reverse();
    let ref_keys: Vec<Vec<u8>> = reference.keys().cloned().collect();
    assert_eq!(trie_rev, ref_keys);
}

fn insert_and_iterate<P: SizePolicy>() {
    let words = word_set(42, 1500);
    let mut map: TrieMap<usize, P> = TrieMap::new();
    let mut reference = BTreeMap::new();

    for (i, word) in words.iter().enumerate() {
        let (returned_key, returned_value, added) = {
            let (cursor, added) = map.insert(word, i);
            (cursor.key(), cursor.value().copied(), added)
        };
        assert!(added, "fresh insert of {:?} reported as duplicate", word);
        assert_eq!(returned_key.as_deref(), Some(&word[..]));
        assert_eq!(returned_value, Some(i));
        assert_eq!(map.len(), i + 1);
        reference.insert(word.clone(), i);
    }

    assert!(map.check_invariants());
    assert_same_entries(&map, &reference);
}

fn lookups_agree<P: SizePolicy>() {
    let words = word_set(99, 1000);
    let map: TrieMap<usize, P> = words.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();
    let reference: BTreeMap<Vec<u8>, usize> =
        words.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();

    // Every stored key must round-trip through every query form
    for (key, value) in &reference {
        assert_eq!(map.get(key), Some(value));
        assert_eq!(map.count(key, false), 1);
        assert_eq!(map.find(key, false).key().as_deref(), Some(&key[..]));
        assert_eq!(map.lower_bound(key).key().as_deref(), Some(&key[..]));

        let expected_upper = reference
            .range((std::ops::Bound::Excluded(key.clone()), std::ops::Bound::Unbounded))
            .next()
            .map(|(k, _)| k.clone());
        assert_eq!(map.upper_bound(key, false).key(), expected_upper);

        let (lower, upper) = map.equal_range(key, false);
        assert_eq!(lower.key().as_deref(), Some(&key[..]));
        assert_eq!(upper.key(), expected_upper);
    }

    // Random probes, mostly misses
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20_000 {
        let probe = random_word(&mut rng, 14);
        assert_eq!(map.get(&probe), reference.get(&probe));
        assert_eq!(map.count(&probe, false), usize::from(reference.contains_key(&probe)));

        let expected_lower = reference.range(probe.clone()..).next().map(|(k, _)| k.clone());
        assert_eq!(map.lower_bound(&probe).key(), expected_lower, "lower_bound {:?}", probe);

        let expected_upper = reference
            .range((std::ops::Bound::Excluded(probe.clone()), std::ops::Bound::Unbounded))
            .next()
            .map(|(k, _)| k.clone());
        assert_eq!(map.upper_bound(&probe, false).key(), expected_upper);
    }
}

fn match_part_counts_agree<P: SizePolicy>() {
    let words = word_set(5, 600);
    let map: TrieMap<usize, P> = words.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();
    let reference: BTreeMap<Vec<u8>, usize> =
        words.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();

    // Every prefix of every (sampled) stored key: the subtree count must
    // equal the number of stored keys extending the prefix
    for word in words.iter().step_by(3) {
        for len in 0..=word.len() {
            let prefix = &word[..len];
            let expected = reference
                .keys()
                .filter(|k| k.starts_with(prefix))
                .count();
            assert_eq!(
                map.count(prefix, true),
                expected,
                "count match_part of {:?}",
                prefix
            );

            let expected_first = reference
                .keys()
                .find(|k| k.starts_with(prefix))
                .cloned();
            assert_eq!(map.find(prefix, true).key(), expected_first);

            let expected_after = reference
                .keys()
                .filter(|k| k.starts_with(prefix))
                .last()
                .and_then(|last| {
                    reference
                        .range((std::ops::Bound::Excluded(last.clone()), std::ops::Bound::Unbounded))
                        .next()
                        .map(|(k, _)| k.clone())
                });
            if expected > 0 {
                assert_eq!(
                    map.upper_bound(prefix, true).key(),
                    expected_after,
                    "upper_bound match_part of {:?}",
                    prefix
                );
            }
        }
    }
}

fn clone_rejects_duplicates<P: SizePolicy>() {
    let words = word_set(17, 800);
    let original: TrieMap<usize, P> =
        words.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();

    let mut copy = original.clone();
    for (i, word) in words.iter().enumerate() {
        let (value, added) = {
            let (cursor, added) = copy.insert(word, usize::MAX);
            (cursor.value().copied(), added)
        };
        assert!(!added, "duplicate {:?} was inserted", word);
        assert_eq!(value, Some(i), "duplicate insert disturbed {:?}", word);
        assert_eq!(copy.len(), words.len());
    }

    copy.clear();
    assert_eq!(copy.len(), 0);
    assert_eq!(copy.items().count(), 0);
    assert_eq!(original.len(), words.len());
    assert!(original.check_invariants());
}

fn interleaved_erase_and_reinsert<P: SizePolicy>() {
    let words = word_set(23, 900);
    let reference: BTreeMap<Vec<u8>, usize> =
        words.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();
    let mut map: TrieMap<usize, P> =
        words.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();

    let mut rng = StdRng::seed_from_u64(31);
    let mut keys = words.clone();
    keys.shuffle(&mut rng);

    // Walk two fronts through the shuffled keys: erase ten, reinsert five,
    // so a moving window of keys is absent at any time
    let mut erase_front = 0usize;
    let mut insert_front = 0usize;
    let mut expected_len = keys.len();
    while erase_front < keys.len() {
        for _ in 0..10 {
            if erase_front >= keys.len() {
                break;
            }
            assert_eq!(map.erase(&keys[erase_front]), 1);
            erase_front += 1;
            expected_len -= 1;
        }
        for _ in 0..5 {
            if insert_front >= erase_front {
                break;
            }
            let key = &keys[insert_front];
            let (_, added) = map.insert(key, reference[key]);
            assert!(added);
            insert_front += 1;
            expected_len += 1;
        }
        assert_eq!(map.len(), expected_len);

        // Reinserted keys are present, the erased window is absent,
        // untouched keys are intact
        for key in &keys[..insert_front] {
            assert_eq!(map.get(key), Some(&reference[key]));
        }
        for key in &keys[insert_front..erase_front] {
            assert_eq!(map.get(key), None);
        }
        for key in &keys[erase_front..] {
            assert_eq!(map.get(key), Some(&reference[key]));
        }
    }
    assert!(map.check_invariants());
}

fn erase_at_returns_in_order_successor<P: SizePolicy>() {
    let words = word_set(53, 500);
    let mut map: TrieMap<usize, P> =
        words.iter().enumerate().map(|(i, w)| (w.clone(), i)).collect();

    let mut rng = StdRng::seed_from_u64(59);
    let mut keys = words.clone();
    keys.shuffle(&mut rng);

    for key in &keys {
        let cursor = map.find(key, false);
        assert!(!cursor.at_end(), "couldn't find {:?} to erase", key);
        let expected_next = {
            let mut next = cursor;
            next.move_next();
            next.key()
        };
        let successor = map.erase_at(cursor.position());
        assert_eq!(
            map.cursor_at(successor).key(),
            expected_next,
            "successor after erasing {:?}",
            key
        );
    }
    assert!(map.is_empty());
    assert!(map.check_invariants());
}

fn random_stress<P: SizePolicy>(operations: usize) {
    let mut rng = StdRng::seed_from_u64(1);
    let mut map: TrieMap<u32, P> = TrieMap::new();
    let mut reference: BTreeMap<Vec<u8>, u32> = BTreeMap::new();
    let mut inserted: Vec<Vec<u8>> = Vec::new();

    for op in 0..operations {
        match rng.gen_range(0..10) {
            0..=4 => {
                let key = random_word(&mut rng, 15);
                let value = rng.gen();
                let (_, added) = map.insert(&key, value);
                assert_eq!(added, !reference.contains_key(&key), "op {}", op);
                if added {
                    reference.insert(key.clone(), value);
                    inserted.push(key);
                }
            }
            5..=7 => {
                if inserted.is_empty() {
                    continue;
                }
                let index = rng.gen_range(0..inserted.len());
                let key = inserted.swap_remove(index);
                let in_reference = reference.remove(&key).is_some();
                assert_eq!(map.erase(&key), usize::from(in_reference), "op {}", op);
            }
            _ => {
                let key = random_word(&mut rng, 15);
                assert_eq!(map.get(&key), reference.get(&key), "op {}", op);
            }
        }
        assert_eq!(map.len(), reference.len(), "op {}", op);
    }

    // Final state agrees entry for entry, and on arbitrary probes
    assert_same_entries(&map, &reference);
    for _ in 0..10_000 {
        let probe = random_word(&mut rng, 15);
        assert_eq!(map.get(&probe), reference.get(&probe));
    }
    assert!(map.check_invariants());
}

macro_rules! policy_suite {
    ($policy:ty, $label:ident, $stress_ops:expr) => {
        paste! {
            #[test]
            fn [<test_insert_and_iterate_ $label>]() {
                insert_and_iterate::<$policy>();
            }

            #[test]
            fn [<test_lookups_agree_ $label>]() {
                lookups_agree::<$policy>();
            }

            #[test]
            fn [<test_match_part_counts_agree_ $label>]() {
                match_part_counts_agree::<$policy>();
            }

            #[test]
            fn [<test_clone_rejects_duplicates_ $label>]() {
                clone_rejects_duplicates::<$policy>();
            }

            #[test]
            fn [<test_interleaved_erase_and_reinsert_ $label>]() {
                interleaved_erase_and_reinsert::<$policy>();
            }

            #[test]
            fn [<test_erase_at_returns_in_order_successor_ $label>]() {
                erase_at_returns_in_order_successor::<$policy>();
            }

            #[test]
            fn [<test_random_stress_ $label>]() {
                random_stress::<$policy>($stress_ops);
            }
        }
    };
}

policy_suite!(Small, small, 30_000);
policy_suite!(Medium, medium, 100_000);
policy_suite!(Fast, fast, 30_000);

#[test]
fn test_get_or_insert_acts_as_subscript() {
    let mut map: TrieMap<i32> = [("ABSENTEEISM", 2)].into_iter().collect();
    *map.get_or_insert(b"ABSENTEEISM", 0) += 1;
    assert_eq!(map.get(b"ABSENTEEISM"), Some(&3));

    *map.get_or_insert(b"foobar", 0) = 153;
    assert_eq!(map.get(b"foobar"), Some(&153));
    assert_eq!(map.len(), 2);
}

#[test]
fn test_values_survive_structure_churn() {
    // String values exercise drops and moves through splits, promotions,
    // splices, and conversions
    let mut map: TrieMap<String, Small> = TrieMap::new();
    let words: Vec<Vec<u8>> = word_set(71, 400);
    for word in &words {
        map.insert(word, String::from_utf8_lossy(word).to_string());
    }
    for word in words.iter().step_by(2) {
        assert_eq!(map.erase(word), 1);
    }
    for (i, word) in words.iter().enumerate() {
        let expected = (i % 2 == 1).then(|| String::from_utf8_lossy(word).to_string());
        assert_eq!(map.get(word).cloned(), expected);
    }
    assert!(map.check_invariants());
}
