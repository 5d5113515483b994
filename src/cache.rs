//! The cache abstraction used by every memoizer, and the default concurrent cache.
//!
//! A memoizer never owns its cache outright: it holds an `Arc` shared with the
//! caller. [`as_shared_cache`] is the single place where a caller-supplied
//! container becomes that shared cache, either by aliasing it (an `Arc` of a
//! cache) or by copying its entries once (a plain `HashMap` or `BTreeMap`).

use dashmap::DashMap;
use log::debug;
use once_cell::sync::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

/// A mutable associative container from `K` to `V` that can be shared across threads.
pub trait Cache<K, V>: Send + Sync {
    /// Returns a copy of the value stored under `key`, if any.
    fn get(&self, key: &K) -> Option<V>;

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    fn insert(&self, key: K, value: V) -> Option<V>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the value stored under `key`, or runs `init`, stores its result
    /// and returns it.
    ///
    /// When `init` fails the error is returned unchanged and nothing is stored
    /// under `key`.
    fn get_or_try_insert_with<E, F>(&self, key: K, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>;
}

type Slot<V> = Arc<OnceCell<V>>;

/// Unbounded cache where every key owns a write-once slot.
///
/// Concurrent callers asking for the same missing key block on its slot while
/// exactly one of them computes the value, so a computation runs at most once
/// per key. Callers asking for different keys never wait on each other's
/// computation: the map shard is only locked long enough to find the slot.
///
/// A computation must not ask for its own key again; that deadlocks.
pub struct ConcurrentCache<K, V> {
    slots: DashMap<K, Slot<V>>,
}

impl<K: Eq + Hash, V> ConcurrentCache<K, V> {
    pub fn new() -> Self {
        ConcurrentCache {
            slots: DashMap::new(),
        }
    }

    /// Drops the slot for `key` if it is still the vacant slot we computed into
    /// and nobody else is waiting on it.
    fn vacate(&self, key: &K, slot: &Slot<V>) {
        self.slots.remove_if(key, |_, current| {
            Arc::ptr_eq(current, slot) && current.get().is_none() && Arc::strong_count(current) == 2
        });
    }
}

impl<K: Eq + Hash + Clone, V: Clone> ConcurrentCache<K, V> {
    /// Snapshot of the filled entries, in no particular order.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.slots
            .iter()
            .filter_map(|entry| {
                entry
                    .value()
                    .get()
                    .map(|value| (entry.key().clone(), value.clone()))
            })
            .collect()
    }

    pub fn keys(&self) -> Vec<K> {
        self.slots
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .map(|entry| entry.key().clone())
            .collect()
    }
}

impl<K: Eq + Hash, V> Default for ConcurrentCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for ConcurrentCache<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ConcurrentCache {
            slots: iter
                .into_iter()
                .map(|(key, value)| (key, Arc::new(OnceCell::with_value(value))))
                .collect(),
        }
    }
}

impl<K: Eq + Hash + fmt::Debug, V: fmt::Debug> fmt::Debug for ConcurrentCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut map = f.debug_map();
        for entry in self.slots.iter() {
            if let Some(value) = entry.value().get() {
                map.entry(entry.key(), value);
            }
        }
        map.finish()
    }
}

/// Removes the slot on drop unless it was filled, so that an error or a panic
/// in the computation leaves no entry behind.
struct VacancyGuard<'a, K: Eq + Hash, V> {
    cache: &'a ConcurrentCache<K, V>,
    key: K,
    slot: Slot<V>,
}

impl<K: Eq + Hash, V> Drop for VacancyGuard<'_, K, V> {
    fn drop(&mut self) {
        if self.slot.get().is_none() {
            self.cache.vacate(&self.key, &self.slot);
        }
    }
}

impl<K, V> Cache<K, V> for ConcurrentCache<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        self.slots.get(key).and_then(|slot| slot.get().cloned())
    }

    fn contains_key(&self, key: &K) -> bool {
        self.slots
            .get(key)
            .is_some_and(|slot| slot.get().is_some())
    }

    fn insert(&self, key: K, value: V) -> Option<V> {
        self.slots
            .insert(key, Arc::new(OnceCell::with_value(value)))
            .and_then(|previous| previous.get().cloned())
    }

    fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    fn get_or_try_insert_with<E, F>(&self, key: K, init: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.slots.get(&key).and_then(|slot| slot.get().cloned()) {
            return Ok(value);
        }
        let slot = Arc::clone(self.slots.entry(key.clone()).or_default().value());
        let guard = VacancyGuard {
            cache: self,
            key,
            slot,
        };
        let value = guard.slot.get_or_try_init(init)?;
        Ok(value.clone())
    }
}

/// Conversion of a caller-supplied container into the cache a memoizer shares.
pub trait IntoSharedCache<K, V> {
    type Cache: Cache<K, V>;

    fn into_shared(self) -> Arc<Self::Cache>;
}

/// An already shared cache is aliased: the caller keeps seeing every entry
/// the memoizer stores.
impl<K, V, C: Cache<K, V>> IntoSharedCache<K, V> for Arc<C> {
    type Cache = C;

    fn into_shared(self) -> Arc<C> {
        self
    }
}

impl<K, V> IntoSharedCache<K, V> for ConcurrentCache<K, V>
where
    ConcurrentCache<K, V>: Cache<K, V>,
{
    type Cache = Self;

    fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl<K, V, S> IntoSharedCache<K, V> for HashMap<K, V, S>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
    S: BuildHasher,
{
    type Cache = ConcurrentCache<K, V>;

    fn into_shared(self) -> Arc<ConcurrentCache<K, V>> {
        debug!("moving {} entries into a concurrent cache", self.len());
        Arc::new(self.into_iter().collect())
    }
}

/// A borrowed map is copied once; later memoizer inserts never reach it.
impl<K, V, S> IntoSharedCache<K, V> for &HashMap<K, V, S>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
    S: BuildHasher,
{
    type Cache = ConcurrentCache<K, V>;

    fn into_shared(self) -> Arc<ConcurrentCache<K, V>> {
        debug!("copying {} entries into a concurrent cache", self.len());
        Arc::new(
            self.iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}

impl<K, V> IntoSharedCache<K, V> for BTreeMap<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    type Cache = ConcurrentCache<K, V>;

    fn into_shared(self) -> Arc<ConcurrentCache<K, V>> {
        debug!("moving {} entries into a concurrent cache", self.len());
        Arc::new(self.into_iter().collect())
    }
}

/// Turns `cache` into the shared cache a memoizer holds.
///
/// An `Arc` is aliased, an owned cache is moved, and a plain map is copied into
/// a new [`ConcurrentCache`].
pub fn as_shared_cache<K, V, T: IntoSharedCache<K, V>>(cache: T) -> Arc<T::Cache> {
    cache.into_shared()
}
