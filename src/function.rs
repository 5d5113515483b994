//! Memoizers for one- and two-argument functions.

use crate::cache::{Cache, ConcurrentCache, IntoSharedCache};
use crate::keys::DefaultKey;
use crate::memoizer::Memoizer;
use std::convert::Infallible;
use std::hash::Hash;
use std::sync::Arc;

pub struct MemoizedFunction<T, V, K, C = ConcurrentCache<K, V>> {
    memoizer: Memoizer<T, K, V, Infallible, C>,
}

impl<T, V, K> MemoizedFunction<T, V, K>
where
    T: DefaultKey<Key = K> + 'static,
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Keys each call by its argument, in a fresh cache.
    pub fn with_default_key(function: impl Fn(T) -> V + Send + Sync + 'static) -> Self {
        Self::with_cache(ConcurrentCache::new(), function)
    }
}

impl<T, V, K, C> MemoizedFunction<T, V, K, C>
where
    T: DefaultKey<Key = K> + 'static,
    K: 'static,
    V: 'static,
    C: Cache<K, V>,
{
    pub fn with_cache(
        cache: impl IntoSharedCache<K, V, Cache = C>,
        function: impl Fn(T) -> V + Send + Sync + 'static,
    ) -> Self {
        Self::new(cache, T::default_key, function)
    }
}

impl<T, V, K, C> MemoizedFunction<T, V, K, C>
where
    T: 'static,
    K: 'static,
    V: 'static,
    C: Cache<K, V>,
{
    pub fn new(
        cache: impl IntoSharedCache<K, V, Cache = C>,
        key_fn: impl Fn(&T) -> K + Send + Sync + 'static,
        function: impl Fn(T) -> V + Send + Sync + 'static,
    ) -> Self {
        MemoizedFunction {
            memoizer: Memoizer::new(cache, key_fn, function),
        }
    }

    pub fn apply(&self, value: T) -> V {
        self.memoizer.call(value)
    }

    pub fn cache(&self) -> &Arc<C> {
        self.memoizer.cache()
    }

    pub fn memoizer(&self) -> &Memoizer<T, K, V, Infallible, C> {
        &self.memoizer
    }
}

impl<T, V, K, C> From<Memoizer<T, K, V, Infallible, C>> for MemoizedFunction<T, V, K, C> {
    fn from(memoizer: Memoizer<T, K, V, Infallible, C>) -> Self {
        MemoizedFunction { memoizer }
    }
}

impl<T, V, K, C> Clone for MemoizedFunction<T, V, K, C> {
    fn clone(&self) -> Self {
        MemoizedFunction {
            memoizer: self.memoizer.clone(),
        }
    }
}

pub struct MemoizedBiFunction<T, U, V, K, C = ConcurrentCache<K, V>> {
    memoizer: Memoizer<(T, U), K, V, Infallible, C>,
}

impl<T, U, V, K> MemoizedBiFunction<T, U, V, K>
where
    (T, U): DefaultKey<Key = K>,
    T: 'static,
    U: 'static,
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Keys each call by the pair of its arguments, in a fresh cache.
    ///
    /// The key is the tuple of both argument keys, not a string of their hash
    /// codes; use [`keys::hash_pair`](crate::keys::hash_pair) with
    /// [`MemoizedBiFunction::new`] for that.
    pub fn with_default_key(function: impl Fn(T, U) -> V + Send + Sync + 'static) -> Self {
        MemoizedBiFunction {
            memoizer: Memoizer::new(ConcurrentCache::new(), <(T, U)>::default_key, move |(t, u)| function(t, u)),
        }
    }
}

impl<T, U, V, K, C> MemoizedBiFunction<T, U, V, K, C>
where
    T: 'static,
    U: 'static,
    K: 'static,
    V: 'static,
    C: Cache<K, V>,
{
    pub fn new(
        cache: impl IntoSharedCache<K, V, Cache = C>,
        key_fn: impl Fn(&T, &U) -> K + Send + Sync + 'static,
        function: impl Fn(T, U) -> V + Send + Sync + 'static,
    ) -> Self {
        MemoizedBiFunction {
            memoizer: Memoizer::new(cache, move |(t, u): &(T, U)| key_fn(t, u), move |(t, u)| function(t, u)),
        }
    }

    pub fn apply(&self, first: T, second: U) -> V {
        self.memoizer.call((first, second))
    }

    pub fn cache(&self) -> &Arc<C> {
        self.memoizer.cache()
    }

    pub fn memoizer(&self) -> &Memoizer<(T, U), K, V, Infallible, C> {
        &self.memoizer
    }
}

impl<T, U, V, K, C> From<Memoizer<(T, U), K, V, Infallible, C>> for MemoizedBiFunction<T, U, V, K, C> {
    fn from(memoizer: Memoizer<(T, U), K, V, Infallible, C>) -> Self {
        MemoizedBiFunction { memoizer }
    }
}

impl<T, U, V, K, C> Clone for MemoizedBiFunction<T, U, V, K, C> {
    fn clone(&self) -> Self {
        MemoizedBiFunction {
            memoizer: self.memoizer.clone(),
        }
    }
}
