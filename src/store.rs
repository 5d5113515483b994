//! Adapter that lets any store from the `cached` crate back a memoizer.
//!
//! This is how bounded or expiring caches are plugged in: the memoizer does not
//! know the store's eviction policy, it only sees [`Cache`].

use crate::cache::{Cache, IntoSharedCache};
use cached::Cached;
use log::trace;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A `cached` store behind a mutex.
///
/// The lock is never held while a value is computed, so different keys compute
/// in parallel and a computation may recurse into the same memoizer. The price
/// is a weaker guarantee than [`ConcurrentCache`](crate::cache::ConcurrentCache):
/// two callers racing on the same missing key may both compute it. The first
/// value stored wins and every racer returns that value.
///
/// [`hits`](LockedCache::hits) and [`misses`](LockedCache::misses) count
/// memoized lookups, one per [`Cache::get_or_try_insert_with`] call. The
/// store's own counters also see the plain `get` calls and the second lookup
/// made when a computed value is stored, so they are not forwarded.
pub struct LockedCache<S> {
    store: Mutex<S>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S> LockedCache<S> {
    pub fn new(store: S) -> Self {
        LockedCache {
            store: Mutex::new(store),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Runs `f` with exclusive access to the underlying store.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn into_inner(self) -> S {
        self.store
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S> LockedCache<S> {
    /// Memoized lookups answered from the store.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Memoized lookups that ran the computation, failed ones included.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn capacity<K, V>(&self) -> Option<usize>
    where
        S: Cached<K, V>,
    {
        <S as Cached<K, V>>::cache_capacity(&self.lock())
    }
}

impl<K, V, S> Cache<K, V> for LockedCache<S>
where
    S: Cached<K, V> + Send,
    K: Hash + Eq + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        self.lock().cache_get(key).cloned()
    }

    fn insert(&self, key: K, value: V) -> Option<V> {
        self.lock().cache_set(key, value)
    }

    fn len(&self) -> usize {
        self.lock().cache_size()
    }

    fn get_or_try_insert_with<E, F>(&self, key: K, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.lock().cache_get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value.clone());
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let value = init()?;
        let mut stored = false;
        let kept = self
            .lock()
            .cache_get_or_set_with(key, || {
                stored = true;
                value
            })
            .clone();
        if !stored {
            trace!("lost insert race, keeping the stored value");
        }
        Ok(kept)
    }
}

impl<K, V, S> IntoSharedCache<K, V> for LockedCache<S>
where
    LockedCache<S>: Cache<K, V>,
{
    type Cache = Self;

    fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
