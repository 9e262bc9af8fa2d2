//! Property-Based Tests for the Cache Module
//!
//! Uses proptest to verify the pool-level correctness properties: bounded
//! size under arbitrary insert sequences, exactness of prefix invalidation,
//! and round-trip reads within the TTL window.

use proptest::prelude::*;
use std::collections::HashSet;

use serde_json::json;

use crate::cache::CachePool;

const TEST_MAX_SIZE: usize = 16;
const TEST_TTL_SECS: u64 = 300;
const NOW: u64 = 1_000_000;

// == Strategies ==
/// Entity-style cache keys: `<family>:<id>` the way handlers build them.
fn key_strategy() -> impl Strategy<Value = String> {
    ("[a-d]{1,4}", 0u32..20).prop_map(|(family, id)| format!("{family}:{id}"))
}

fn prefix_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-d]{1,2}".prop_map(|s| s),
        ("[a-d]{1,4}", 0u32..20).prop_map(|(family, id)| format!("{family}:{id}")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The pool never holds more than max_size live entries, no matter how
    // many distinct keys are inserted.
    #[test]
    fn prop_size_bound_holds(keys in prop::collection::vec(key_strategy(), 1..100)) {
        let mut pool = CachePool::new(TEST_MAX_SIZE, TEST_TTL_SECS);

        for (i, key) in keys.iter().enumerate() {
            pool.insert(key.clone(), json!(i), NOW);
            prop_assert!(pool.len() <= TEST_MAX_SIZE, "pool grew past its bound");
        }
    }

    // Storing a value and reading it back before expiry returns exactly
    // the stored value.
    #[test]
    fn prop_roundtrip_within_ttl(key in key_strategy(), payload in "[a-z0-9 ]{0,64}") {
        let mut pool = CachePool::new(TEST_MAX_SIZE, TEST_TTL_SECS);

        pool.insert(key.clone(), json!(payload), NOW);
        let read = pool.get(&key, NOW + (TEST_TTL_SECS * 1000) - 1);
        prop_assert_eq!(read, Some(json!(payload)));
    }

    // Prefix invalidation removes exactly the matching subset: afterwards
    // no surviving key starts with the prefix, and every non-matching key
    // that was live before is still readable.
    #[test]
    fn prop_prefix_invalidation_exact(
        keys in prop::collection::hash_set(key_strategy(), 1..TEST_MAX_SIZE),
        prefix in prefix_strategy(),
    ) {
        let mut pool = CachePool::new(TEST_MAX_SIZE, TEST_TTL_SECS);

        for key in &keys {
            pool.insert(key.clone(), json!("v"), NOW);
        }

        let matching: HashSet<&String> = keys.iter().filter(|k| k.starts_with(&prefix)).collect();
        let removed = pool.invalidate_prefix(&prefix);

        prop_assert_eq!(removed, matching.len(), "removed count mismatch");
        for key in &keys {
            let survives = pool.get(key, NOW).is_some();
            prop_assert_eq!(survives, !matching.contains(key), "wrong key affected: {}", key);
        }
    }

    // Deleting a key leaves every other live key readable.
    #[test]
    fn prop_delete_is_local(
        keys in prop::collection::hash_set(key_strategy(), 2..TEST_MAX_SIZE),
    ) {
        let mut pool = CachePool::new(TEST_MAX_SIZE, TEST_TTL_SECS);

        for key in &keys {
            pool.insert(key.clone(), json!("v"), NOW);
        }

        let victim = keys.iter().next().unwrap().clone();
        pool.remove(&victim);

        for key in &keys {
            if key != &victim {
                prop_assert!(pool.get(key, NOW).is_some(), "unrelated key lost: {}", key);
            }
        }
    }
}
