//! Memoizers for one- and two-argument predicates.

use crate::cache::{Cache, ConcurrentCache, IntoSharedCache};
use crate::keys::DefaultKey;
use crate::memoizer::Memoizer;
use std::convert::Infallible;
use std::hash::Hash;
use std::sync::Arc;

pub struct MemoizedPredicate<T, K, C = ConcurrentCache<K, bool>> {
    memoizer: Memoizer<T, K, bool, Infallible, C>,
}

impl<T, K> MemoizedPredicate<T, K>
where
    T: DefaultKey<Key = K> + 'static,
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    pub fn with_default_key(predicate: impl Fn(T) -> bool + Send + Sync + 'static) -> Self {
        Self::new(ConcurrentCache::new(), T::default_key, predicate)
    }
}

impl<T, K, C> MemoizedPredicate<T, K, C>
where
    T: 'static,
    K: 'static,
    C: Cache<K, bool>,
{
    pub fn new(
        cache: impl IntoSharedCache<K, bool, Cache = C>,
        key_fn: impl Fn(&T) -> K + Send + Sync + 'static,
        predicate: impl Fn(T) -> bool + Send + Sync + 'static,
    ) -> Self {
        MemoizedPredicate {
            memoizer: Memoizer::new(cache, key_fn, predicate),
        }
    }

    pub fn test(&self, value: T) -> bool {
        self.memoizer.call(value)
    }

    pub fn cache(&self) -> &Arc<C> {
        self.memoizer.cache()
    }

    pub fn memoizer(&self) -> &Memoizer<T, K, bool, Infallible, C> {
        &self.memoizer
    }
}

impl<T, K, C> From<Memoizer<T, K, bool, Infallible, C>> for MemoizedPredicate<T, K, C> {
    fn from(memoizer: Memoizer<T, K, bool, Infallible, C>) -> Self {
        MemoizedPredicate { memoizer }
    }
}

impl<T, K, C> Clone for MemoizedPredicate<T, K, C> {
    fn clone(&self) -> Self {
        MemoizedPredicate {
            memoizer: self.memoizer.clone(),
        }
    }
}

pub struct MemoizedBiPredicate<T, U, K, C = ConcurrentCache<K, bool>> {
    memoizer: Memoizer<(T, U), K, bool, Infallible, C>,
}

impl<T, U, K> MemoizedBiPredicate<T, U, K>
where
    (T, U): DefaultKey<Key = K>,
    T: 'static,
    U: 'static,
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    pub fn with_default_key(predicate: impl Fn(T, U) -> bool + Send + Sync + 'static) -> Self {
        MemoizedBiPredicate {
            memoizer: Memoizer::new(ConcurrentCache::new(), <(T, U)>::default_key, move |(t, u)| predicate(t, u)),
        }
    }
}

impl<T, U, K, C> MemoizedBiPredicate<T, U, K, C>
where
    T: 'static,
    U: 'static,
    K: 'static,
    C: Cache<K, bool>,
{
    pub fn new(
        cache: impl IntoSharedCache<K, bool, Cache = C>,
        key_fn: impl Fn(&T, &U) -> K + Send + Sync + 'static,
        predicate: impl Fn(T, U) -> bool + Send + Sync + 'static,
    ) -> Self {
        MemoizedBiPredicate {
            memoizer: Memoizer::new(cache, move |(t, u): &(T, U)| key_fn(t, u), move |(t, u)| predicate(t, u)),
        }
    }

    pub fn test(&self, first: T, second: U) -> bool {
        self.memoizer.call((first, second))
    }

    pub fn cache(&self) -> &Arc<C> {
        self.memoizer.cache()
    }

    pub fn memoizer(&self) -> &Memoizer<(T, U), K, bool, Infallible, C> {
        &self.memoizer
    }
}

impl<T, U, K, C> From<Memoizer<(T, U), K, bool, Infallible, C>> for MemoizedBiPredicate<T, U, K, C> {
    fn from(memoizer: Memoizer<(T, U), K, bool, Infallible, C>) -> Self {
        MemoizedBiPredicate { memoizer }
    }
}

impl<T, U, K, C> Clone for MemoizedBiPredicate<T, U, K, C> {
    fn clone(&self) -> Self {
        MemoizedBiPredicate {
            memoizer: self.memoizer.clone(),
        }
    }
}
