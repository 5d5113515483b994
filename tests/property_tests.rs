//! Property-based tests for the memoizers.
//!
//! For any sequence of calls the wrapped callable must run exactly once per
//! distinct key, every call must return what an unmemoized call would, and the
//! cache must end up holding exactly one entry per distinct key.

use memoization::keys;
use memoization::{Cache, ConcurrentCache, LockedCache, MemoizedBiFunction, MemoizedFunction, Memoizer};
use cached::UnboundCache;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn reference(x: i32) -> i64 {
    i64::from(x) * 3 - 1
}

proptest! {
    #[test]
    fn one_invocation_per_distinct_key(calls in prop::collection::vec(-50i32..50, 0..200)) {
        let invocations = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&invocations);
        let memo = MemoizedFunction::with_default_key(move |x: i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            reference(x)
        });
        for &x in &calls {
            prop_assert_eq!(memo.apply(x), reference(x));
        }
        let distinct: HashSet<i32> = calls.iter().copied().collect();
        prop_assert_eq!(invocations.load(Ordering::SeqCst), distinct.len());

        let cached: HashMap<i32, i64> = memo.cache().entries().into_iter().collect();
        let expected: HashMap<i32, i64> = distinct.iter().map(|&x| (x, reference(x))).collect();
        prop_assert_eq!(cached, expected);
    }

    #[test]
    fn derived_keys_collapse_calls(calls in prop::collection::vec(0u32..1000, 1..100), modulus in 1u32..10) {
        let invocations = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&invocations);
        let memo = Memoizer::new(ConcurrentCache::new(), move |x: &u32| x % modulus, move |x: u32| {
            counter.fetch_add(1, Ordering::SeqCst);
            x
        });
        let mut first_seen: HashMap<u32, u32> = HashMap::new();
        for &x in &calls {
            let expected = *first_seen.entry(x % modulus).or_insert(x);
            prop_assert_eq!(memo.call(x), expected);
        }
        prop_assert_eq!(invocations.load(Ordering::SeqCst), first_seen.len());
        prop_assert_eq!(memo.cache().len(), first_seen.len());
    }

    #[test]
    fn failures_never_populate(calls in prop::collection::vec(0u8..20, 0..100)) {
        let memo = Memoizer::fallible(ConcurrentCache::new(), keys::identity, |x: u8| {
            if x % 2 == 0 { Ok(x / 2) } else { Err(x) }
        });
        for &x in &calls {
            let result = memo.try_call(x);
            if x % 2 == 0 {
                prop_assert_eq!(result, Ok(x / 2));
            } else {
                prop_assert_eq!(result, Err(x));
            }
        }
        prop_assert!(memo.cache().keys().iter().all(|x| x % 2 == 0));
    }

    #[test]
    fn locked_store_matches_concurrent_cache(calls in prop::collection::vec((0i32..10, 0i32..10), 0..100)) {
        let concurrent = MemoizedBiFunction::with_default_key(|a: i32, b: i32| a * 10 + b);
        let locked = MemoizedBiFunction::new(
            LockedCache::new(UnboundCache::new()),
            |a: &i32, b: &i32| keys::hash_pair(a, b),
            |a: i32, b: i32| a * 10 + b,
        );
        for &(a, b) in &calls {
            prop_assert_eq!(concurrent.apply(a, b), locked.apply(a, b));
        }
        prop_assert_eq!(concurrent.cache().len(), locked.cache().len());
    }
}
