use memoization::keys;
use memoization::primitive::{DoublePredicate, DoubleSupplier, IntBinaryOperator};
use memoization::{
    as_shared_cache, Cache, ConcurrentCache, FloatKey, LockedCache, MemoizeError, MemoizedCallable,
    MemoizedConsumer, MemoizedFunction, MemoizedPredicate, Memoizer,
};
use cached::UnboundCache;
use rayon::prelude::*;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn counter() -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let handle = Arc::clone(&calls);
    (calls, handle)
}

#[test]
fn string_length_with_identity_key() {
    init_logger();
    let (calls, handle) = counter();
    let length = MemoizedFunction::with_default_key(move |s: String| {
        handle.fetch_add(1, Ordering::SeqCst);
        s.len()
    });
    assert_eq!(length.apply("ab".to_string()), 2);
    assert_eq!(length.apply("ab".to_string()), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(length.cache().entries(), vec![("ab".to_string(), 2)]);
}

#[test]
fn int_sum_with_string_key() {
    init_logger();
    let sum: IntBinaryOperator<String> =
        IntBinaryOperator::new(ConcurrentCache::new(), |a: &i32, b: &i32| keys::space_joined(a, b), |a, b| a + b);
    assert_eq!(sum.apply(123, 789), 912);
    assert_eq!(sum.cache().entries(), vec![("123 789".to_string(), 912)]);
}

#[test]
fn double_supplier_computes_once() {
    init_logger();
    let (calls, handle) = counter();
    let supplier = DoubleSupplier::with_default_key(move || {
        handle.fetch_add(1, Ordering::SeqCst);
        123.456
    });
    for _ in 0..4 {
        assert_eq!(supplier.get(), 123.456);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn double_predicate_keyed_by_value() {
    init_logger();
    let predicate = DoublePredicate::with_default_key(|x| x > 100.0);
    assert!(predicate.test(123.456));
    let entries = predicate.cache().entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0.value(), 123.456);
    assert!(entries[0].1);
}

#[test]
fn consumer_stores_key_as_sentinel() {
    init_logger();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    let consumer = MemoizedConsumer::with_default_key(move |s: String| log.lock().unwrap().push(s));
    consumer.accept("test".to_string());
    consumer.accept("test".to_string());
    assert_eq!(*seen.lock().unwrap(), vec!["test".to_string()]);
    assert_eq!(
        consumer.cache().entries(),
        vec![("test".to_string(), "test".to_string())]
    );
}

#[test]
fn static_key_is_shared_across_threads_and_time() {
    init_logger();
    let (calls, handle) = counter();
    let supplier = DoubleSupplier::with_default_key(move || handle.fetch_add(1, Ordering::SeqCst) as f64);
    let first = supplier.get();
    let from_threads: Vec<f64> = thread::scope(|scope| {
        let workers: Vec<_> = (0..4).map(|_| scope.spawn(|| supplier.get())).collect();
        workers.into_iter().map(|w| w.join().unwrap()).collect()
    });
    thread::sleep(Duration::from_millis(5));
    assert_eq!(supplier.get(), first);
    assert!(from_threads.iter().all(|&v| v == first));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn builder_rejects_missing_collaborators() {
    let missing: Result<Memoizer<String, String, usize>, MemoizeError> =
        Memoizer::builder().default_key().function(|s: String| s.len()).build();
    match missing {
        Err(MemoizeError::InvalidArgument { argument, hint }) => {
            assert_eq!(argument, "cache");
            assert!(hint.contains("default_cache()"));
        }
        Ok(_) => panic!("built without a cache"),
    }
}

#[derive(Debug, PartialEq)]
struct Timeout(u32);

#[test]
fn failure_is_transparent_and_retried() {
    init_logger();
    let (calls, handle) = counter();
    let fetch = Memoizer::fallible(ConcurrentCache::new(), keys::identity, move |id: u32| {
        if handle.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(Timeout(id))
        } else {
            Ok(format!("record {}", id))
        }
    });
    assert_eq!(fetch.try_call(7), Err(Timeout(7)));
    assert!(!fetch.cache().contains_key(&7));
    assert_eq!(fetch.try_call(7), Ok("record 7".to_string()));
    assert_eq!(fetch.try_call(7), Ok("record 7".to_string()));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn panic_propagates_without_caching() {
    init_logger();
    let (calls, handle) = counter();
    let flaky = MemoizedFunction::with_default_key(move |n: u8| {
        if handle.fetch_add(1, Ordering::SeqCst) == 0 {
            panic!("first call fails");
        }
        n * 2
    });
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| flaky.apply(4)));
    assert!(outcome.is_err());
    assert!(flaky.cache().is_empty());
    assert_eq!(flaky.apply(4), 8);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn callable_errors_keep_their_identity() {
    let load = MemoizedCallable::with_default_key(|| "not a number".parse::<i32>());
    let direct = "not a number".parse::<i32>();
    assert_eq!(load.call(), direct);
    assert!(load.cache().is_empty());
}

#[test]
fn concurrent_same_key_computes_once() {
    init_logger();
    let (calls, handle) = counter();
    let slow = MemoizedFunction::with_default_key(move |n: u64| {
        handle.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        n + 1
    });
    let results: Vec<u64> = (0..64).into_par_iter().map(|_| slow.apply(41)).collect();
    assert!(results.iter().all(|&v| v == 42));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn concurrent_distinct_keys_compute_once_each() {
    init_logger();
    let (calls, handle) = counter();
    let square = MemoizedFunction::with_default_key(move |n: u64| {
        handle.fetch_add(1, Ordering::SeqCst);
        n * n
    });
    (0..10_000u64).into_par_iter().for_each(|i| {
        assert_eq!(square.apply(i % 100), (i % 100) * (i % 100));
    });
    assert_eq!(calls.load(Ordering::SeqCst), 100);
    assert_eq!(square.cache().len(), 100);
}

#[test]
fn different_keys_do_not_wait_for_each_other() {
    init_logger();
    let (sender, receiver) = mpsc::channel::<()>();
    let receiver = Mutex::new(receiver);
    let sender = Mutex::new(sender);
    // "wait" only finishes once "signal" has run, so the two must overlap
    let rendezvous = MemoizedPredicate::with_default_key(move |role: &'static str| match role {
        "wait" => receiver
            .lock()
            .unwrap()
            .recv_timeout(Duration::from_secs(5))
            .is_ok(),
        _ => sender.lock().unwrap().send(()).is_ok(),
    });
    let waited = thread::scope(|scope| {
        let waiter = scope.spawn(|| rendezvous.test("wait"));
        thread::sleep(Duration::from_millis(20));
        assert!(rendezvous.test("signal"));
        waiter.join().unwrap()
    });
    assert!(waited);
}

#[test]
fn aliased_cache_is_visible_to_caller() {
    let shared = Arc::new(ConcurrentCache::new());
    let length = MemoizedFunction::with_cache(Arc::clone(&shared), |s: String| s.len());
    length.apply("abc".to_string());
    assert_eq!(shared.get(&"abc".to_string()), Some(3));

    // the caller's inserts are seen by the memoizer as well
    shared.insert("fake".to_string(), 99);
    assert_eq!(length.apply("fake".to_string()), 99);
}

#[test]
fn copied_map_is_independent() {
    let mut original = HashMap::new();
    original.insert("seed".to_string(), 0usize);
    let length = MemoizedFunction::with_cache(&original, |s: String| s.len());
    assert_eq!(length.apply("seed".to_string()), 0);
    length.apply("other".to_string());
    assert_eq!(original.len(), 1);
    assert_eq!(length.cache().len(), 2);

    let explicit = as_shared_cache(&original);
    assert!(!Arc::ptr_eq(&explicit, length.cache()));
}

#[test]
fn locked_store_backs_memoizer() {
    let (calls, handle) = counter();
    let store = Arc::new(LockedCache::new(UnboundCache::new()));
    let half = MemoizedFunction::with_cache(Arc::clone(&store), move |x: f64| {
        handle.fetch_add(1, Ordering::SeqCst);
        x / 2.0
    });
    assert_eq!(half.apply(5.0), 2.5);
    assert_eq!(half.apply(5.0), 2.5);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.get(&FloatKey::new(5.0)), Some(2.5));
}
