use super::*;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, BTreeSet};

use crate::testutil::TrieBuilder;

fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    // A small alphabet so keys share prefixes. Stored keys never contain NUL,
    // and payload keys never contain the separator.
    let byte = prop::sample::select(vec![b'a', b'b', b'c', 0x7f, 0xd0, 0xff]);
    prop::collection::vec(byte, 0..=8)
}

fn key_set_strategy() -> impl Strategy<Value = BTreeSet<Vec<u8>>> {
    prop::collection::btree_set(key_strategy(), 0..=64)
}

fn brute_force_prefixes(keys: &BTreeSet<Vec<u8>>, query: &[u8]) -> Vec<Vec<u8>> {
    (1..=query.len())
        .map(|n| query[..n].to_vec())
        .filter(|p| keys.contains(p))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_set_equivalence(
        keys in key_set_strategy(),
        queries in prop::collection::vec(key_strategy(), 0..=32),
    ) {
        let bytes = TrieBuilder::new().with_keys(&keys).bytes();
        let d = CompletionDawg::from_bytes(&bytes).unwrap();

        let expected: Vec<Vec<u8>> = keys.iter().cloned().collect();
        prop_assert_eq!(d.keys(""), expected);

        for query in queries {
            prop_assert_eq!(d.contains(&query), keys.contains(&query));

            let completed: Vec<Vec<u8>> =
                keys.iter().filter(|k| k.starts_with(&query)).cloned().collect();
            prop_assert_eq!(d.has_keys_with_prefix(&query), !completed.is_empty());
            prop_assert_eq!(d.keys(&query), completed);

            let nonempty: BTreeSet<Vec<u8>> =
                keys.iter().filter(|k| !k.is_empty()).cloned().collect();
            prop_assert_eq!(d.prefixes(&query), brute_force_prefixes(&nonempty, &query));
        }
    }

    #[test]
    fn prop_int_values(
        map in prop::collection::btree_map(key_strategy(), 0u32..(1 << 31), 0..=64),
    ) {
        let bytes = TrieBuilder::new()
            .with_values(map.iter().map(|(k, &v)| (k, v)))
            .bytes();
        let d = IntCompletionDawg::from_bytes(&bytes).unwrap();

        for (key, &value) in &map {
            prop_assert_eq!(d.get(key).unwrap(), value);
        }
        let expected: Vec<(Vec<u8>, u32)> = map.iter().map(|(k, &v)| (k.clone(), v)).collect();
        prop_assert_eq!(d.items(""), expected);
    }

    #[test]
    fn prop_payloads_grouped(
        pairs in prop::collection::vec(
            (key_strategy(), prop::collection::vec(any::<u8>(), 0..=12)),
            0..=48,
        ),
    ) {
        let bytes = TrieBuilder::new()
            .with_payloads(pairs.iter().map(|(k, p)| (k, p)))
            .bytes();
        let d = BytesDawg::from_bytes(&bytes).unwrap();

        let mut grouped: BTreeMap<Vec<u8>, BTreeSet<Vec<u8>>> = BTreeMap::new();
        for (key, payload) in &pairs {
            grouped.entry(key.clone()).or_default().insert(payload.clone());
        }

        for (key, payloads) in &grouped {
            let got: BTreeSet<Vec<u8>> = d.get(key).unwrap().into_iter().collect();
            prop_assert_eq!(&got, payloads);
            prop_assert_eq!(d.get(key).unwrap().len(), payloads.len());
        }

        let keys = d.keys("");
        let expected: Vec<Vec<u8>> = grouped
            .iter()
            .flat_map(|(k, ps)| std::iter::repeat(k.clone()).take(ps.len()))
            .collect();
        prop_assert_eq!(keys, expected);
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(
        bytes in prop::collection::vec(any::<u8>(), 0..=512),
        query in key_strategy(),
    ) {
        for order in [ByteOrder::Little, ByteOrder::Big] {
            let config = Config::default().with_byte_order(order);
            if let Ok(d) = CompletionDawg::from_bytes_with(&bytes, &config) {
                let _ = d.contains(&query);
                let _ = d.prefixes(&query);
                let _ = d.has_keys_with_prefix(&query);
                let _ = d.iter_keys("").take(10_000).count();
            }
            if let Ok(d) = BytesDawg::from_bytes_with(&bytes, &config) {
                let _ = d.get(&query);
                let _ = d.iter_items("").take(10_000).count();
            }
        }
    }
}

#[test]
fn randomized_large_set() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut keys: BTreeSet<Vec<u8>> = BTreeSet::new();
    while keys.len() < 2_000 {
        let len = rng.gen_range(1..=12);
        keys.insert((0..len).map(|_| rng.gen_range(b'a'..=b'z')).collect());
    }

    let bytes = TrieBuilder::new().with_keys(&keys).bytes();
    let d = CompletionDawg::from_bytes(&bytes).unwrap();
    let expected: Vec<Vec<u8>> = keys.iter().cloned().collect();
    assert_eq!(d.keys(""), expected);
    for key in keys.iter().step_by(7) {
        assert!(d.contains(key));
        let mut missing = key.clone();
        missing.push(b'{');
        assert!(!d.contains(&missing));
    }
}
